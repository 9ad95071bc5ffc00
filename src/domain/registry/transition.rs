//! Stage transition rule shared by every registry backend

use super::{ModelName, ModelVersion, Stage};
use crate::domain::DomainError;

/// Outcome of a stage transition
#[derive(Debug, Clone)]
pub struct StageTransition {
    /// The version that was moved
    pub target: ModelVersion,
    /// Versions whose stage changed as a side effect (archived previous holders)
    pub archived: Vec<ModelVersion>,
}

/// Move `version` to `stage` within `versions`.
///
/// Staging and Production are exclusive: the previous holder is archived, so at
/// most one version per model carries either label.
pub fn apply_stage_transition(
    name: &ModelName,
    versions: &mut [ModelVersion],
    version: u32,
    stage: Stage,
) -> Result<StageTransition, DomainError> {
    if !versions.iter().any(|v| v.version() == version) {
        return Err(DomainError::not_found(format!(
            "Version {} of model '{}' not found",
            version, name
        )));
    }

    let mut archived = Vec::new();

    for v in versions.iter_mut() {
        if v.version() == version {
            continue;
        }

        if stage.is_exclusive() && v.stage() == stage {
            v.set_stage(Stage::Archived);
            archived.push(v.clone());
        }
    }

    let target = versions
        .iter_mut()
        .find(|v| v.version() == version)
        .map(|v| {
            v.set_stage(stage);
            v.clone()
        })
        .ok_or_else(|| DomainError::internal("transition target vanished"))?;

    Ok(StageTransition { target, archived })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn name() -> ModelName {
        ModelName::new("iris").unwrap()
    }

    fn versions(n: u32) -> Vec<ModelVersion> {
        (1..=n).map(|v| ModelVersion::new(name(), v, format!("run-{}", v))).collect()
    }

    #[test]
    fn test_promote_single_version() {
        let mut all = versions(1);
        let result = apply_stage_transition(&name(), &mut all, 1, Stage::Production).unwrap();

        assert_eq!(result.target.stage(), Stage::Production);
        assert!(result.archived.is_empty());
        assert_eq!(all[0].stage(), Stage::Production);
    }

    #[test]
    fn test_previous_holder_archived() {
        let mut all = versions(3);
        apply_stage_transition(&name(), &mut all, 1, Stage::Production).unwrap();
        apply_stage_transition(&name(), &mut all, 2, Stage::Staging).unwrap();

        let result = apply_stage_transition(&name(), &mut all, 3, Stage::Production).unwrap();

        assert_eq!(result.archived.len(), 1);
        assert_eq!(result.archived[0].version(), 1);
        assert_eq!(all[0].stage(), Stage::Archived);
        assert_eq!(all[1].stage(), Stage::Staging);
        assert_eq!(all[2].stage(), Stage::Production);
    }

    #[test]
    fn test_non_exclusive_stage_keeps_others() {
        let mut all = versions(2);
        apply_stage_transition(&name(), &mut all, 1, Stage::Archived).unwrap();
        let result = apply_stage_transition(&name(), &mut all, 2, Stage::Archived).unwrap();

        assert!(result.archived.is_empty());
        assert_eq!(all[0].stage(), Stage::Archived);
    }

    #[test]
    fn test_unknown_version() {
        let mut all = versions(2);
        let err = apply_stage_transition(&name(), &mut all, 5, Stage::Production).unwrap_err();
        assert!(err.is_not_found());
    }
}
