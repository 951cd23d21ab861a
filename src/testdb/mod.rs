//! Test database with mock tools and scenarios
//!
//! This module provides everything needed to exercise the extraction
//! pipeline without an ExifTool installation:
//!
//! - `mock_tool` - Scripted `PreviewTool` backend that records invocations
//! - `payload` - Deterministic synthetic image payloads
//! - `scenarios` - Predefined end-to-end scenarios and a batch runner
//!
//! The scenarios are reachable from the CLI (`indd-preview test ...`) so
//! the whole pipeline can be demonstrated on a machine without the external
//! tool, and they double as fixtures for the unit tests.

pub mod mock_tool;
pub mod payload;
pub mod scenarios;

// Re-export commonly used types for convenience
pub use mock_tool::{MockResponse, MockTool, RecordedCall};
pub use scenarios::{
    run_all, run_scenarios, ExpectedOutcome, ScenarioLibrary, ScenarioResult, TestScenario,
    TestSummary,
};
