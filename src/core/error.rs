//! Error types for the preview extraction tool
//!
//! This module defines the error types used throughout the application.
//! Note that an empty tool response is NOT an error: it is the normal
//! outcome for documents without an embedded preview and is modeled as
//! `PreviewOutcome::Empty` in the pipeline module.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for the preview extraction tool
#[derive(Error, Debug)]
pub enum ExtractError {
    /// The ExifTool executable could not be found at any discovery path
    #[error("ExifTool executable not found (searched: {})", format_searched(.searched))]
    ToolNotFound {
        /// Every location that was checked, in discovery order
        searched: Vec<PathBuf>,
    },

    /// The OS refused to spawn the ExifTool process
    #[error("Failed to launch '{}': {source}", .tool.display())]
    ProcessLaunchFailed {
        tool: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The tool produced output that is not a decodable image
    #[error("Preview data could not be decoded as an image: {0}")]
    DecodeFailed(#[from] image::ImageError),

    /// General I/O error
    #[error("IO error: {0}")]
    IoError(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

fn format_searched(searched: &[PathBuf]) -> String {
    if searched.is_empty() {
        return "no candidate locations".to_string();
    }
    searched
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, ExtractError>;

impl From<std::io::Error> for ExtractError {
    fn from(err: std::io::Error) -> Self {
        ExtractError::IoError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tool_not_found_lists_searched_paths() {
        let err = ExtractError::ToolNotFound {
            searched: vec![PathBuf::from("/a/exiftool"), PathBuf::from("/b/exiftool")],
        };
        let msg = err.to_string();
        assert!(msg.contains("/a/exiftool"));
        assert!(msg.contains("/b/exiftool"));
    }

    #[test]
    fn test_tool_not_found_with_no_candidates() {
        let err = ExtractError::ToolNotFound { searched: vec![] };
        assert!(err.to_string().contains("no candidate locations"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: ExtractError = io.into();
        assert!(matches!(err, ExtractError::IoError(_)));
        assert!(err.to_string().contains("denied"));
    }
}
