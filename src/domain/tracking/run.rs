//! Tracking run entity

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Lifecycle of a tracking run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RunStatus {
    Running,
    Finished,
    Failed,
}

impl fmt::Display for RunStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Running => write!(f, "RUNNING"),
            Self::Finished => write!(f, "FINISHED"),
            Self::Failed => write!(f, "FAILED"),
        }
    }
}

/// One recorded execution of the training job with its parameters and metrics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackingRun {
    run_id: String,
    experiment: String,
    status: RunStatus,
    #[serde(default)]
    params: BTreeMap<String, String>,
    #[serde(default)]
    metrics: BTreeMap<String, f64>,
    started_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    ended_at: Option<DateTime<Utc>>,
}

impl TrackingRun {
    /// Start a new run with a fresh identifier
    pub fn start(experiment: impl Into<String>) -> Self {
        Self {
            run_id: Uuid::new_v4().simple().to_string(),
            experiment: experiment.into(),
            status: RunStatus::Running,
            params: BTreeMap::new(),
            metrics: BTreeMap::new(),
            started_at: Utc::now(),
            ended_at: None,
        }
    }

    pub fn run_id(&self) -> &str {
        &self.run_id
    }

    pub fn experiment(&self) -> &str {
        &self.experiment
    }

    pub fn status(&self) -> RunStatus {
        self.status
    }

    pub fn params(&self) -> &BTreeMap<String, String> {
        &self.params
    }

    pub fn metrics(&self) -> &BTreeMap<String, f64> {
        &self.metrics
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub fn ended_at(&self) -> Option<DateTime<Utc>> {
        self.ended_at
    }

    pub fn is_active(&self) -> bool {
        self.status == RunStatus::Running
    }

    pub fn set_param(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.params.insert(key.into(), value.into());
    }

    pub fn set_metric(&mut self, key: impl Into<String>, value: f64) {
        self.metrics.insert(key.into(), value);
    }

    /// Close the run; terminal status is recorded with the end time
    pub fn finish(&mut self, status: RunStatus) {
        self.status = status;
        self.ended_at = Some(Utc::now());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_run() {
        let run = TrackingRun::start("Iris_Classification");
        assert_eq!(run.experiment(), "Iris_Classification");
        assert_eq!(run.status(), RunStatus::Running);
        assert_eq!(run.run_id().len(), 32);
        assert!(run.ended_at().is_none());
    }

    #[test]
    fn test_params_and_metrics() {
        let mut run = TrackingRun::start("exp");
        run.set_param("model_type", "LogisticRegression");
        run.set_metric("accuracy", 0.9);
        run.set_metric("accuracy", 0.95);

        assert_eq!(run.params()["model_type"], "LogisticRegression");
        assert_eq!(run.metrics()["accuracy"], 0.95);
    }

    #[test]
    fn test_finish() {
        let mut run = TrackingRun::start("exp");
        run.finish(RunStatus::Failed);

        assert!(!run.is_active());
        assert!(run.ended_at().is_some());
    }

    #[test]
    fn test_status_serialization() {
        assert_eq!(
            serde_json::to_string(&RunStatus::Finished).unwrap(),
            "\"FINISHED\""
        );
    }
}
