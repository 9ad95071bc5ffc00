//! Registry factory for runtime backend selection from a tracking URI

use std::path::PathBuf;
use std::sync::Arc;

use crate::domain::{DomainError, ModelRegistry};

use super::file_store::FileModelRegistry;
use super::in_memory::InMemoryModelRegistry;

/// Tracking location used when none is configured
pub const DEFAULT_TRACKING_URI: &str = "./mlruns";

/// Supported registry backends
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryBackend {
    /// JSON files below a root directory
    File(PathBuf),
    /// Process-local, for testing/development
    InMemory,
}

impl RegistryBackend {
    /// Parse a tracking URI.
    ///
    /// `file:<path>`, `file://<path>` and bare paths select the file store,
    /// `memory:` the in-memory store. Remote schemes are rejected.
    pub fn from_tracking_uri(uri: Option<&str>) -> Result<Self, DomainError> {
        let uri = uri.map(str::trim).filter(|s| !s.is_empty()).unwrap_or(DEFAULT_TRACKING_URI);

        if uri == "memory:" {
            return Ok(Self::InMemory);
        }

        let path = if let Some(rest) = uri.strip_prefix("file://") {
            rest
        } else if let Some(rest) = uri.strip_prefix("file:") {
            rest
        } else if let Some((scheme, _)) = uri.split_once("://") {
            return Err(DomainError::configuration(format!(
                "Unsupported tracking URI scheme '{}' in '{}': only file-based registries are available",
                scheme, uri
            )));
        } else {
            uri
        };

        if path.is_empty() {
            return Err(DomainError::configuration(format!(
                "Tracking URI '{}' has an empty path",
                uri
            )));
        }

        Ok(Self::File(PathBuf::from(path)))
    }
}

/// Factory for creating registry instances
#[derive(Debug)]
pub struct RegistryFactory;

impl RegistryFactory {
    pub fn create(backend: &RegistryBackend) -> Arc<dyn ModelRegistry> {
        match backend {
            RegistryBackend::File(root) => Arc::new(FileModelRegistry::new(root.clone())),
            RegistryBackend::InMemory => Arc::new(InMemoryModelRegistry::new()),
        }
    }

    /// Parse the tracking URI and build the matching registry
    pub fn from_tracking_uri(uri: Option<&str>) -> Result<Arc<dyn ModelRegistry>, DomainError> {
        Ok(Self::create(&RegistryBackend::from_tracking_uri(uri)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_local_directory() {
        assert_eq!(
            RegistryBackend::from_tracking_uri(None).unwrap(),
            RegistryBackend::File(PathBuf::from("./mlruns"))
        );
        assert_eq!(
            RegistryBackend::from_tracking_uri(Some("  ")).unwrap(),
            RegistryBackend::File(PathBuf::from("./mlruns"))
        );
    }

    #[test]
    fn test_file_uris() {
        assert_eq!(
            RegistryBackend::from_tracking_uri(Some("file:///var/lib/mlruns")).unwrap(),
            RegistryBackend::File(PathBuf::from("/var/lib/mlruns"))
        );
        assert_eq!(
            RegistryBackend::from_tracking_uri(Some("file:./mlruns")).unwrap(),
            RegistryBackend::File(PathBuf::from("./mlruns"))
        );
        assert_eq!(
            RegistryBackend::from_tracking_uri(Some("/data/registry")).unwrap(),
            RegistryBackend::File(PathBuf::from("/data/registry"))
        );
    }

    #[test]
    fn test_memory_uri() {
        assert_eq!(
            RegistryBackend::from_tracking_uri(Some("memory:")).unwrap(),
            RegistryBackend::InMemory
        );
    }

    #[test]
    fn test_remote_uri_rejected() {
        let err = RegistryBackend::from_tracking_uri(Some("http://your-mlflow-server:5000"))
            .unwrap_err();
        assert!(matches!(err, DomainError::Configuration { .. }));
        assert!(err.to_string().contains("'http'"));
    }

    #[test]
    fn test_empty_file_path_rejected() {
        assert!(RegistryBackend::from_tracking_uri(Some("file:")).is_err());
    }
}
