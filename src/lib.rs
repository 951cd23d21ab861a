//! InDesign Preview Tool Library
//!
//! A fast, reliable library for extracting preview images from Adobe
//! InDesign documents (.indd) and templates (.indt). The heavy lifting is
//! delegated to ExifTool, driven as a subprocess: the tool's binary
//! standard output is drained into memory, decoded as an image, and
//! published to a display surface without blocking the caller.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//!
//! - [`core`] - Configuration, error handling, and the extraction pipeline
//! - [`tool`] - ExifTool discovery and the subprocess backend, behind the
//!   `PreviewTool` trait
//! - [`preview`] - Image decoding, display metadata, and the panel surface
//! - [`plugin`] - The host capability-set contract (can-handle, prepare,
//!   view, cleanup) and the InDesign viewer implementation
//! - [`ui`] - Background controller and the channel-based publish step
//! - [`testdb`] - Mock tools, synthetic payloads and end-to-end scenarios
//! - [`cli`] - Command-line interface (only used by the binary)
//!
//! # Example Usage
//!
//! ```rust,no_run
//! use indd_preview_tool::core::config::Config;
//! use indd_preview_tool::plugin::{ContextObject, InDesignViewer, Viewer};
//! use indd_preview_tool::tool::locator::ToolLocator;
//! use std::path::Path;
//!
//! fn main() -> anyhow::Result<()> {
//!     let config = Config::load_default()?;
//!     let locator = ToolLocator::from_config(&config.tool);
//!
//!     let mut viewer = InDesignViewer::discover(&locator)?;
//!     let context = ContextObject::new();
//!
//!     let path = Path::new("report.indd");
//!     if viewer.can_handle(path) {
//!         viewer.prepare(path, &context);
//!         viewer.view(path, &context);
//!
//!         // On the thread that owns the display surface:
//!         while context.is_busy() {
//!             viewer.process_events(&context);
//!         }
//!     }
//!
//!     viewer.cleanup();
//!     Ok(())
//! }
//! ```
//!
//! # Threading Model
//!
//! `view` returns immediately: the pipeline (mode selection, subprocess
//! execution, output drain, decode) runs on a background thread, and the
//! panel can be shown before the image is ready. The terminal result is
//! sent through a channel and applied by whichever thread owns the display
//! surface. There is no cancellation; a request that outlives its view
//! completes anyway, and the panel's liveness flag turns its publish into
//! a no-op.
//!
//! # Testing Without ExifTool
//!
//! The `testdb` module provides a scripted mock backend and a scenario
//! library:
//!
//! ```rust
//! use indd_preview_tool::testdb;
//!
//! let summary = testdb::run_all();
//! assert!(summary.all_passed());
//! ```

// Core modules - always available
pub mod cli;
pub mod core;
pub mod plugin;
pub mod preview;
pub mod testdb;
pub mod tool;
pub mod ui;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
