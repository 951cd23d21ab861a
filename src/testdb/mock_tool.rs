//! Mock tool implementation for testing without ExifTool
//!
//! This module provides a mock implementation of the `PreviewTool` trait
//! that serves scripted responses per file name and records every
//! invocation, so tests can assert both outcomes and the exact invocation
//! shape (mode and rendered argument vector) without spawning a process.

use std::collections::HashMap;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::core::error::{ExtractError, Result};
use crate::core::pipeline::file_name_of;
use crate::tool::traits::{ExtractionMode, PreviewTool};

/// Scripted response for one file
#[derive(Debug, Clone)]
pub enum MockResponse {
    /// The tool emits these bytes on stdout
    Bytes(Vec<u8>),
    /// The tool runs but produces no output
    Empty,
    /// Discovery fails before any process is spawned
    NotFound,
    /// The OS refuses to spawn the tool
    LaunchFailure(String),
}

/// One recorded invocation of the mock tool
#[derive(Debug, Clone)]
pub struct RecordedCall {
    /// File the extraction was requested for
    pub path: PathBuf,
    /// Mode the pipeline selected
    pub mode: ExtractionMode,
    /// Argument vector exactly as the real backend would render it
    pub args: Vec<OsString>,
}

/// Mock preview tool with scripted per-file responses
#[derive(Debug, Default)]
pub struct MockTool {
    responses: HashMap<String, MockResponse>,
    default_response: Option<MockResponse>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl MockTool {
    /// Create a mock with no scripted responses
    ///
    /// Unscripted files behave like documents without an embedded preview.
    pub fn new() -> Self {
        Self::default()
    }

    /// Script a response for a specific file name
    pub fn with_response(mut self, file_name: &str, response: MockResponse) -> Self {
        self.responses.insert(file_name.to_string(), response);
        self
    }

    /// Script the response served for any unscripted file
    pub fn with_default_response(mut self, response: MockResponse) -> Self {
        self.default_response = Some(response);
        self
    }

    /// All invocations recorded so far
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Number of invocations recorded so far
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    fn response_for(&self, file_name: &str) -> MockResponse {
        self.responses
            .get(file_name)
            .or(self.default_response.as_ref())
            .cloned()
            .unwrap_or(MockResponse::Empty)
    }
}

impl PreviewTool for MockTool {
    fn extract(&self, path: &Path, mode: ExtractionMode) -> Result<Vec<u8>> {
        let response = self.response_for(&file_name_of(path));

        // Discovery failure precedes the spawn, so nothing is recorded.
        if matches!(response, MockResponse::NotFound) {
            return Err(ExtractError::ToolNotFound {
                searched: vec![
                    PathBuf::from("mock-install-dir/exiftool"),
                    PathBuf::from("mock-user-data/exiftool"),
                ],
            });
        }

        self.calls.lock().unwrap().push(RecordedCall {
            path: path.to_path_buf(),
            mode,
            args: mode.args(path),
        });

        match response {
            MockResponse::Bytes(bytes) => Ok(bytes),
            MockResponse::Empty => Ok(Vec::new()),
            MockResponse::LaunchFailure(message) => Err(ExtractError::ProcessLaunchFailed {
                tool: PathBuf::from("mock-exiftool"),
                source: std::io::Error::other(message),
            }),
            MockResponse::NotFound => unreachable!("handled before recording"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::OsString;

    #[test]
    fn test_scripted_bytes_are_served() {
        let tool = MockTool::new().with_response("a.indd", MockResponse::Bytes(vec![1, 2, 3]));
        let bytes = tool
            .extract(Path::new("a.indd"), ExtractionMode::PageImage)
            .unwrap();
        assert_eq!(bytes, vec![1, 2, 3]);
    }

    #[test]
    fn test_unscripted_files_are_empty() {
        let tool = MockTool::new();
        let bytes = tool
            .extract(Path::new("other.indt"), ExtractionMode::ThumbnailImage)
            .unwrap();
        assert!(bytes.is_empty());
    }

    #[test]
    fn test_calls_record_mode_and_args() {
        let tool = MockTool::new();
        tool.extract(Path::new("doc.indd"), ExtractionMode::PageImage)
            .unwrap();

        let calls = tool.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].mode, ExtractionMode::PageImage);
        assert!(calls[0].args.contains(&OsString::from("-pageimage")));
        assert_eq!(calls[0].args[0], OsString::from("doc.indd"));
    }

    #[test]
    fn test_not_found_records_nothing() {
        let tool = MockTool::new().with_default_response(MockResponse::NotFound);
        let err = tool
            .extract(Path::new("doc.indd"), ExtractionMode::PageImage)
            .unwrap_err();
        assert!(matches!(err, ExtractError::ToolNotFound { .. }));
        assert_eq!(tool.call_count(), 0);
    }

    #[test]
    fn test_launch_failure_is_recorded() {
        let tool =
            MockTool::new().with_default_response(MockResponse::LaunchFailure("EACCES".into()));
        let err = tool
            .extract(Path::new("doc.indd"), ExtractionMode::PageImage)
            .unwrap_err();
        assert!(matches!(err, ExtractError::ProcessLaunchFailed { .. }));
        assert_eq!(tool.call_count(), 1);
    }
}
