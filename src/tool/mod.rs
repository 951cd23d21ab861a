//! External tool interaction module
//!
//! This module provides everything needed to run ExifTool as a preview
//! extraction backend.
//!
//! # Submodules
//!
//! - `traits` - Backend abstraction and extraction mode selection
//! - `locator` - Staged on-disk discovery of the ExifTool executable
//! - `exiftool` - The real subprocess backend
//!
//! # Architecture
//!
//! The module uses a trait-based abstraction to enable testing without an
//! ExifTool installation:
//!
//! - `PreviewTool` - Runs one extraction, returns raw output bytes
//! - `ExtractionMode` - Which kind of preview is requested, plus the
//!   argument template for it
//!
//! Both the real subprocess backend and the mock tool in `testdb` implement
//! `PreviewTool`, allowing the extraction pipeline to work with either.

pub mod exiftool;
pub mod locator;
pub mod traits;

// Re-export commonly used types for convenience
pub use exiftool::ExifTool;
pub use locator::{DiscoveryStage, ResolvedTool, ToolLocator, TOOL_BITS, TOOL_VERSION};
pub use traits::{is_supported, ExtractionMode, PreviewTool};
