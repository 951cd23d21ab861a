//! Predefined test scenarios for the extraction pipeline
//!
//! This module provides ready-to-use end-to-end scenarios covering the
//! pipeline's terminal states: decoded preview, empty response, missing
//! tool, launch refusal, and malformed output. Each scenario packages a
//! scripted mock tool, the file to request, and the expected outcome.
//!
//! Scenarios are runnable from the CLI (`indd-preview test run-all`) and
//! reused directly by unit tests.

use std::path::PathBuf;

use crate::core::error::ExtractError;
use crate::core::pipeline::{extract_preview, extract_raw, file_name_of, PreviewOutcome};
use crate::testdb::mock_tool::{MockResponse, MockTool};
use crate::testdb::payload;
use crate::tool::traits::ExtractionMode;

/// Expected terminal state of a scenario run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExpectedOutcome {
    /// Pipeline publishes a preview with exactly this title
    Preview { title: String },
    /// Pipeline finishes without a preview and without an error
    Empty,
    /// Pipeline fails before any process is spawned
    ToolMissing,
    /// Pipeline fails because the OS refused the spawn
    LaunchRefused,
    /// Pipeline fails decoding a non-empty payload
    DecodeFailure,
}

/// A complete pipeline scenario
pub struct TestScenario {
    /// Scenario name for identification
    pub name: String,
    /// Description of what this scenario covers
    pub description: String,
    /// File the view request targets
    pub file: PathBuf,
    /// Scripted tool backend
    pub tool: MockTool,
    /// Expected terminal state
    pub expected: ExpectedOutcome,
    /// Mode the request is expected to select, if asserted
    pub expected_mode: Option<ExtractionMode>,
    /// Run the extraction twice and require identical results
    pub verify_idempotent: bool,
}

/// Result of running one scenario
#[derive(Debug, Clone)]
pub struct ScenarioResult {
    /// Scenario name
    pub name: String,
    /// Whether every check passed
    pub passed: bool,
    /// Human-readable detail, filled on failure
    pub details: String,
}

impl ScenarioResult {
    fn pass(name: &str) -> Self {
        Self {
            name: name.to_string(),
            passed: true,
            details: String::new(),
        }
    }

    fn fail(name: &str, details: String) -> Self {
        Self {
            name: name.to_string(),
            passed: false,
            details,
        }
    }
}

impl TestScenario {
    /// Execute the scenario against the pipeline and check expectations
    pub fn run(&self) -> ScenarioResult {
        let result = extract_preview(&self.tool, &self.file);

        let outcome_check = match (&self.expected, &result) {
            (ExpectedOutcome::Preview { title }, Ok(PreviewOutcome::Decoded(preview))) => {
                let actual = preview.display_title(&file_name_of(&self.file));
                if actual == *title {
                    Ok(())
                } else {
                    Err(format!("expected title '{}', got '{}'", title, actual))
                }
            }
            (ExpectedOutcome::Empty, Ok(PreviewOutcome::Empty)) => Ok(()),
            (ExpectedOutcome::ToolMissing, Err(ExtractError::ToolNotFound { .. })) => {
                if self.tool.call_count() == 0 {
                    Ok(())
                } else {
                    Err("tool invocation was recorded despite missing executable".to_string())
                }
            }
            (ExpectedOutcome::LaunchRefused, Err(ExtractError::ProcessLaunchFailed { .. })) => {
                Ok(())
            }
            (ExpectedOutcome::DecodeFailure, Err(ExtractError::DecodeFailed(_))) => Ok(()),
            (expected, actual) => Err(format!("expected {:?}, got {:?}", expected, actual)),
        };

        if let Err(details) = outcome_check {
            return ScenarioResult::fail(&self.name, details);
        }

        if let Some(expected_mode) = self.expected_mode {
            let calls = self.tool.calls();
            match calls.first() {
                Some(call) if call.mode == expected_mode => {
                    // The rendered argument vector must match the mode's
                    // template exactly.
                    if call.args != expected_mode.args(&self.file) {
                        return ScenarioResult::fail(
                            &self.name,
                            format!("unexpected argument vector: {:?}", call.args),
                        );
                    }
                }
                Some(call) => {
                    return ScenarioResult::fail(
                        &self.name,
                        format!("expected {} invocation, got {}", expected_mode, call.mode),
                    );
                }
                None => {
                    return ScenarioResult::fail(&self.name, "no invocation recorded".to_string());
                }
            }
        }

        if self.verify_idempotent {
            let first = extract_raw(&self.tool, &self.file);
            let second = extract_raw(&self.tool, &self.file);
            match (first, second) {
                (Ok(a), Ok(b)) if a == b => {}
                (Ok(_), Ok(_)) => {
                    return ScenarioResult::fail(
                        &self.name,
                        "repeated extraction produced different bytes".to_string(),
                    );
                }
                (a, b) => {
                    return ScenarioResult::fail(
                        &self.name,
                        format!("repeated extraction errored: {:?} / {:?}", a.err(), b.err()),
                    );
                }
            }
        }

        ScenarioResult::pass(&self.name)
    }
}

/// Collection of all predefined scenarios
pub struct ScenarioLibrary;

impl ScenarioLibrary {
    /// Scenario: document with a rendered page image
    pub fn page_image_success() -> TestScenario {
        TestScenario {
            name: "page_image_success".to_string(),
            description: "An .indd document yields a page image published with a scaled title"
                .to_string(),
            file: PathBuf::from("report.indd"),
            tool: MockTool::new().with_response(
                "report.indd",
                MockResponse::Bytes(payload::png_payload(1200, 900, 17)),
            ),
            expected: ExpectedOutcome::Preview {
                title: "900×675: report.indd".to_string(),
            },
            expected_mode: Some(ExtractionMode::PageImage),
            verify_idempotent: false,
        }
    }

    /// Scenario: template without an embedded thumbnail
    pub fn thumbnail_without_preview() -> TestScenario {
        TestScenario {
            name: "thumbnail_without_preview".to_string(),
            description: "An .indt template with no embedded thumbnail leaves the view blank"
                .to_string(),
            file: PathBuf::from("template.indt"),
            tool: MockTool::new().with_response("template.indt", MockResponse::Empty),
            expected: ExpectedOutcome::Empty,
            expected_mode: Some(ExtractionMode::ThumbnailImage),
            verify_idempotent: false,
        }
    }

    /// Scenario: ExifTool missing from both discovery paths
    pub fn tool_missing() -> TestScenario {
        TestScenario {
            name: "tool_missing".to_string(),
            description: "Discovery fails at both locations; no process is spawned".to_string(),
            file: PathBuf::from("report.indd"),
            tool: MockTool::new().with_default_response(MockResponse::NotFound),
            expected: ExpectedOutcome::ToolMissing,
            expected_mode: None,
            verify_idempotent: false,
        }
    }

    /// Scenario: the OS refuses to spawn the tool
    pub fn launch_refused() -> TestScenario {
        TestScenario {
            name: "launch_refused".to_string(),
            description: "A spawn refusal surfaces as a distinct launch failure".to_string(),
            file: PathBuf::from("report.indd"),
            tool: MockTool::new()
                .with_default_response(MockResponse::LaunchFailure("access denied".to_string())),
            expected: ExpectedOutcome::LaunchRefused,
            expected_mode: None,
            verify_idempotent: false,
        }
    }

    /// Scenario: tool emits bytes that are not an image
    pub fn malformed_output() -> TestScenario {
        TestScenario {
            name: "malformed_output".to_string(),
            description: "Non-empty undecodable output is a decode failure, never 'no preview'"
                .to_string(),
            file: PathBuf::from("broken.indd"),
            tool: MockTool::new()
                .with_response("broken.indd", MockResponse::Bytes(payload::malformed_payload())),
            expected: ExpectedOutcome::DecodeFailure,
            expected_mode: None,
            verify_idempotent: false,
        }
    }

    /// Scenario: unknown extension falls back to the thumbnail request
    pub fn unknown_extension_fallback() -> TestScenario {
        TestScenario {
            name: "unknown_extension_fallback".to_string(),
            description: "A file with an unrecognized extension selects the thumbnail invocation"
                .to_string(),
            file: PathBuf::from("notes.txt"),
            tool: MockTool::new().with_response(
                "notes.txt",
                MockResponse::Bytes(payload::jpeg_payload(64, 64, 9)),
            ),
            expected: ExpectedOutcome::Preview {
                title: "48×48: notes.txt".to_string(),
            },
            expected_mode: Some(ExtractionMode::ThumbnailImage),
            verify_idempotent: false,
        }
    }

    /// Scenario: repeated extraction of an unchanged file
    pub fn repeated_extraction() -> TestScenario {
        TestScenario {
            name: "repeated_extraction".to_string(),
            description: "Two requests for the same unchanged file are byte-identical".to_string(),
            file: PathBuf::from("report.indd"),
            tool: MockTool::new().with_response(
                "report.indd",
                MockResponse::Bytes(payload::png_payload(640, 480, 5)),
            ),
            expected: ExpectedOutcome::Preview {
                title: "480×360: report.indd".to_string(),
            },
            expected_mode: Some(ExtractionMode::PageImage),
            verify_idempotent: true,
        }
    }

    /// All predefined scenarios
    pub fn all() -> Vec<TestScenario> {
        vec![
            Self::page_image_success(),
            Self::thumbnail_without_preview(),
            Self::tool_missing(),
            Self::launch_refused(),
            Self::malformed_output(),
            Self::unknown_extension_fallback(),
            Self::repeated_extraction(),
        ]
    }

    /// Look up a scenario by name
    pub fn by_name(name: &str) -> Option<TestScenario> {
        Self::all().into_iter().find(|s| s.name == name)
    }
}

/// Summary of a scenario batch run
#[derive(Debug, Clone, Default)]
pub struct TestSummary {
    /// Total scenarios run
    pub total: usize,
    /// Scenarios that passed every check
    pub passed: usize,
    /// Individual results
    pub results: Vec<ScenarioResult>,
}

impl TestSummary {
    /// Whether every scenario passed
    pub fn all_passed(&self) -> bool {
        self.passed == self.total
    }
}

/// Run every predefined scenario
pub fn run_all() -> TestSummary {
    run_scenarios(ScenarioLibrary::all())
}

/// Run a specific list of scenarios
pub fn run_scenarios(scenarios: Vec<TestScenario>) -> TestSummary {
    let mut summary = TestSummary::default();
    for scenario in scenarios {
        let result = scenario.run();
        summary.total += 1;
        if result.passed {
            summary.passed += 1;
        }
        summary.results.push(result);
    }
    summary
}
