//! Viewer events
//!
//! Defines the event types sent from the background extraction worker to
//! whichever thread owns the display surface. Events travel through a
//! channel and are applied by the owner on its own execution context; the
//! worker itself never touches the surface.

use std::path::PathBuf;

use crate::preview::decoder::DecodedPreview;

/// Events emitted for one view request
///
/// Every request produces a `Started` event followed by exactly one
/// terminal event (`Ready`, `Empty` or `Failed`).
pub enum PreviewEvent {
    /// The background extraction has started
    Started {
        /// File being extracted
        path: PathBuf,
    },

    /// A preview was extracted and decoded
    Ready {
        /// The decoded preview, ready to publish
        preview: DecodedPreview,
        /// Display title computed from the scaled dimensions
        title: String,
    },

    /// The document has no embedded preview; the view stays blank
    Empty {
        /// File that produced no output
        path: PathBuf,
    },

    /// The pipeline failed; the view shows an unavailable state
    Failed {
        /// File the failure belongs to
        path: PathBuf,
        /// Rendered error message for logs and the unavailable title
        error: String,
    },
}

impl PreviewEvent {
    /// Whether this is a terminal event for its request
    pub fn is_terminal(&self) -> bool {
        !matches!(self, PreviewEvent::Started { .. })
    }
}
