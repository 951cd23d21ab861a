//! Preview decoding and display module
//!
//! This module turns raw tool output into something a host can show:
//!
//! - `decoder` - Byte buffer to decoded image plus display metadata
//! - `panel` - The display surface previews are published to

pub mod decoder;
pub mod panel;

// Re-export commonly used types for convenience
pub use decoder::{decode_preview, DecodedPreview, DISPLAY_DPI, SOURCE_DPI};
pub use panel::{ImagePanel, PublishOutcome};
