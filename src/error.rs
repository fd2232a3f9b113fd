//! Error types for report building and artifact handling
//!
//! Two families:
//! - [`ReportError`] means the input was malformed and no model was built
//! - [`ArtifactError`] means a model exists but writing or opening it failed

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading input or building a report model
#[derive(Error, Debug)]
pub enum ReportError {
    #[error("invalid severity '{0}' (expected low, medium, high or critical)")]
    InvalidSeverity(String),

    #[error("issue for {file_path} is listed under {expected} but tagged {found}")]
    CategoryMismatch {
        file_path: String,
        expected: String,
        found: String,
    },

    #[error("metric {name} has invalid value {value}")]
    InvalidMetric { name: &'static str, value: f64 },

    #[error("flavor pool for {rating} has {len} lines, at least {min} required")]
    FlavorPoolTooSmall {
        rating: String,
        len: usize,
        min: usize,
    },

    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed analysis document: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Errors raised after a model was built, while persisting or displaying it
#[derive(Error, Debug)]
pub enum ArtifactError {
    #[error("failed to write report to {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to launch viewer '{program}': {source}")]
    Launch {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("viewer '{program}' exited with status {status}")]
    ViewerExit { program: String, status: i32 },
}

pub type Result<T> = std::result::Result<T, ReportError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_severity_message() {
        let err = ReportError::InvalidSeverity("urgent".into());
        assert_eq!(
            err.to_string(),
            "invalid severity 'urgent' (expected low, medium, high or critical)"
        );
    }

    #[test]
    fn test_artifact_error_keeps_path() {
        let err = ArtifactError::Write {
            path: PathBuf::from("/nowhere/report.html"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert!(err.to_string().contains("/nowhere/report.html"));
        assert!(err.to_string().contains("denied"));
    }
}
