//! Error types for TaskFlow
//!
//! Centralized error handling using thiserror.

use thiserror::Error;

use crate::domain::RunStats;

/// All error types that can occur in TaskFlow
#[derive(Debug, Error)]
pub enum TaskflowError {
    /// An iteration count, probability or sleep range is outside policy bounds
    #[error("Configuration error: {0}")]
    InvalidConfig(String),

    /// The run was interrupted; carries the statistics gathered so far
    #[error("Execution cancelled after {} outer iterations", stats.total_outer)]
    Cancelled { stats: Box<RunStats> },

    /// The terminal surface could not be drawn to or restored
    #[error("Render error: {0}")]
    Render(String),

    /// Invalid state transition or operation
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML serialization/deserialization error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl TaskflowError {
    /// True when the run ended because of an external interrupt.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled { .. })
    }

    /// Partial statistics of a cancelled run.
    pub fn partial_stats(&self) -> Option<&RunStats> {
        match self {
            Self::Cancelled { stats } => Some(stats),
            _ => None,
        }
    }
}

/// Marker error raised by the executor when its cancellation token fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("execution cancelled")]
pub struct Cancelled;

/// Result type alias for TaskFlow operations
pub type Result<T> = std::result::Result<T, TaskflowError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_config_error() {
        let err = TaskflowError::InvalidConfig("inner_iterations must be between 1 and 20".to_string());
        assert_eq!(
            err.to_string(),
            "Configuration error: inner_iterations must be between 1 and 20"
        );
    }

    #[test]
    fn test_cancelled_error_carries_stats() {
        let mut stats = RunStats::new();
        stats.total_outer = 3;
        let err = TaskflowError::Cancelled { stats: Box::new(stats) };
        assert!(err.is_cancelled());
        assert_eq!(err.to_string(), "Execution cancelled after 3 outer iterations");
        assert_eq!(err.partial_stats().map(|s| s.total_outer), Some(3));
    }

    #[test]
    fn test_render_error() {
        let err = TaskflowError::Render("broken pipe".to_string());
        assert!(!err.is_cancelled());
        assert!(err.partial_stats().is_none());
        assert_eq!(err.to_string(), "Render error: broken pipe");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: TaskflowError = io_err.into();
        assert!(matches!(err, TaskflowError::Io(_)));
        assert!(err.to_string().contains("file not found"));
    }

    #[test]
    fn test_yaml_error_conversion() {
        let yaml_err = serde_yaml::from_str::<Vec<u32>>("{ not: a list").unwrap_err();
        let err: TaskflowError = yaml_err.into();
        assert!(matches!(err, TaskflowError::Yaml(_)));
    }

    #[test]
    fn test_cancelled_marker_display() {
        assert_eq!(Cancelled.to_string(), "execution cancelled");
    }
}
