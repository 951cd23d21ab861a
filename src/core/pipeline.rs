//! Preview extraction pipeline
//!
//! The single-attempt pipeline behind every view request: select the
//! extraction mode for the file, run the tool, classify the raw result,
//! decode. Each request is independent; there is no batching, deduplication
//! or retrying.

use std::path::Path;

use log::{debug, info, trace};

use crate::core::error::Result;
use crate::preview::decoder::{decode_preview, DecodedPreview};
use crate::tool::traits::{ExtractionMode, PreviewTool};

/// Terminal result of a successful pipeline run
///
/// An empty tool response is a well-defined outcome, not an error: the
/// document simply has no embedded preview. It is kept distinct from every
/// failure in the error taxonomy.
#[derive(Debug)]
pub enum PreviewOutcome {
    /// The tool produced no output; the view stays blank
    Empty,
    /// A preview was extracted and decoded
    Decoded(DecodedPreview),
}

impl PreviewOutcome {
    /// Check if this outcome carries a decoded preview
    pub fn is_decoded(&self) -> bool {
        matches!(self, PreviewOutcome::Decoded(_))
    }
}

/// Run one tool invocation and return the raw output bytes
///
/// Mode selection happens here so every caller (pipeline, CLI `--output`
/// passthrough) invokes the tool identically.
pub fn extract_raw<T: PreviewTool + ?Sized>(tool: &T, path: &Path) -> Result<Vec<u8>> {
    let mode = ExtractionMode::for_path(path);
    debug!("extracting {} from {}", mode, path.display());
    tool.extract(path, mode)
}

/// Run the full extraction pipeline for a file
///
/// Tool discovery and launch failures, and decode failures, propagate as
/// errors; an empty response is `PreviewOutcome::Empty`.
pub fn extract_preview<T: PreviewTool + ?Sized>(tool: &T, path: &Path) -> Result<PreviewOutcome> {
    let raw = extract_raw(tool, path)?;

    if raw.is_empty() {
        info!("no embedded preview in {}", path.display());
        return Ok(PreviewOutcome::Empty);
    }

    trace!("decoding {} byte preview payload", raw.len());
    let preview = decode_preview(&raw)?;
    debug!(
        "decoded {}x{} preview for {}",
        preview.width(),
        preview.height(),
        path.display()
    );
    Ok(PreviewOutcome::Decoded(preview))
}

/// Display name of a path for titles and log records
pub fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::ExtractError;
    use crate::testdb::mock_tool::{MockResponse, MockTool};
    use crate::testdb::payload;
    use std::path::Path;

    #[test]
    fn test_decoded_outcome_for_valid_payload() {
        let tool = MockTool::new().with_response(
            "report.indd",
            MockResponse::Bytes(payload::png_payload(1200, 900, 21)),
        );

        let outcome = extract_preview(&tool, Path::new("report.indd")).unwrap();
        match outcome {
            PreviewOutcome::Decoded(preview) => {
                assert_eq!(preview.display_title("report.indd"), "900×675: report.indd");
            }
            PreviewOutcome::Empty => panic!("expected a decoded preview"),
        }

        // The document extension selected the page-image invocation.
        let calls = tool.calls();
        assert_eq!(calls.len(), 1);
        assert!(calls[0].mode.is_page_image());
    }

    #[test]
    fn test_empty_outcome_is_not_an_error() {
        let tool = MockTool::new().with_response("template.indt", MockResponse::Empty);
        let outcome = extract_preview(&tool, Path::new("template.indt")).unwrap();
        assert!(!outcome.is_decoded());
        assert!(!tool.calls()[0].mode.is_page_image());
    }

    #[test]
    fn test_malformed_payload_is_decode_failure_not_empty() {
        let tool = MockTool::new()
            .with_response("broken.indd", MockResponse::Bytes(payload::malformed_payload()));
        let err = extract_preview(&tool, Path::new("broken.indd")).unwrap_err();
        assert!(matches!(err, ExtractError::DecodeFailed(_)));
    }

    #[test]
    fn test_tool_errors_propagate() {
        let tool = MockTool::new().with_default_response(MockResponse::NotFound);
        let err = extract_preview(&tool, Path::new("report.indd")).unwrap_err();
        assert!(matches!(err, ExtractError::ToolNotFound { .. }));
        // Discovery failed before any invocation could be recorded.
        assert!(tool.calls().is_empty());
    }

    #[test]
    fn test_pipeline_is_idempotent_for_unchanged_input() {
        let tool = MockTool::new().with_response(
            "report.indd",
            MockResponse::Bytes(payload::png_payload(640, 480, 3)),
        );

        let first = extract_raw(&tool, Path::new("report.indd")).unwrap();
        let second = extract_raw(&tool, Path::new("report.indd")).unwrap();
        assert_eq!(first, second);

        let title_a = match extract_preview(&tool, Path::new("report.indd")).unwrap() {
            PreviewOutcome::Decoded(p) => p.display_title("report.indd"),
            PreviewOutcome::Empty => panic!("expected preview"),
        };
        let title_b = match extract_preview(&tool, Path::new("report.indd")).unwrap() {
            PreviewOutcome::Decoded(p) => p.display_title("report.indd"),
            PreviewOutcome::Empty => panic!("expected preview"),
        };
        assert_eq!(title_a, title_b);
    }

    #[test]
    fn test_file_name_of() {
        assert_eq!(file_name_of(Path::new("/data/report.indd")), "report.indd");
        assert_eq!(file_name_of(Path::new("report.indd")), "report.indd");
    }
}
