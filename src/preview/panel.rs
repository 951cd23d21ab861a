//! Image panel display surface
//!
//! The panel is the surface a decoded preview is published to. Handles are
//! cheap clones sharing one interior, so the host can keep a handle wired
//! into its view tree while the controller's owner applies results to the
//! same state.
//!
//! There is no cancellation in the pipeline: a request that outlives its
//! view still completes, and its publish must land nowhere. `release()`
//! flips the liveness flag, after which `publish()` is a recorded no-op.

use std::sync::{Arc, RwLock};

use log::debug;

use crate::preview::decoder::DecodedPreview;

/// Default preferred panel width in display units
pub const DEFAULT_PREFERRED_WIDTH: f64 = 800.0;

/// Default preferred panel height in display units
pub const DEFAULT_PREFERRED_HEIGHT: f64 = 600.0;

/// Default fraction of the preferred size the preview may fill
pub const DEFAULT_FILL_RATIO: f64 = 0.9;

/// Outcome of a publish attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublishOutcome {
    /// The preview was stored and the zoom recomputed
    Published,
    /// The panel was already released; nothing was stored
    Skipped,
}

#[derive(Debug)]
struct PanelState {
    source: Option<DecodedPreview>,
    preferred_width: f64,
    preferred_height: f64,
    fill_ratio: f64,
    zoom: f64,
    live: bool,
}

impl Default for PanelState {
    fn default() -> Self {
        Self {
            source: None,
            preferred_width: DEFAULT_PREFERRED_WIDTH,
            preferred_height: DEFAULT_PREFERRED_HEIGHT,
            fill_ratio: DEFAULT_FILL_RATIO,
            zoom: 1.0,
            live: true,
        }
    }
}

/// Shared handle to a preview display surface
#[derive(Debug, Clone, Default)]
pub struct ImagePanel {
    inner: Arc<RwLock<PanelState>>,
}

impl ImagePanel {
    /// Create a new live panel with default preferred size
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the preferred display size and fill ratio
    pub fn set_preferred_size_fit(&self, width: f64, height: f64, fill_ratio: f64) {
        let mut state = self.inner.write().unwrap();
        state.preferred_width = width;
        state.preferred_height = height;
        state.fill_ratio = fill_ratio;
    }

    /// Publish a decoded preview to this surface
    ///
    /// Recomputes zoom-to-fit for the stored preview. Returns `Skipped`
    /// without touching any state when the panel has been released.
    pub fn publish(&self, preview: DecodedPreview) -> PublishOutcome {
        let mut state = self.inner.write().unwrap();
        if !state.live {
            debug!("publish skipped: panel was released before the preview arrived");
            return PublishOutcome::Skipped;
        }

        state.zoom = zoom_to_fit(
            f64::from(preview.width()),
            f64::from(preview.height()),
            state.preferred_width,
            state.preferred_height,
            state.fill_ratio,
        );
        state.source = Some(preview);
        PublishOutcome::Published
    }

    /// Release the surface; all further publishes become no-ops
    pub fn release(&self) {
        let mut state = self.inner.write().unwrap();
        state.live = false;
        state.source = None;
    }

    /// Whether the surface is still accepting publishes
    pub fn is_live(&self) -> bool {
        self.inner.read().unwrap().live
    }

    /// Whether a preview has been published
    pub fn has_source(&self) -> bool {
        self.inner.read().unwrap().source.is_some()
    }

    /// Run a closure against the published preview, if any
    pub fn with_source<R>(&self, f: impl FnOnce(&DecodedPreview) -> R) -> Option<R> {
        self.inner.read().unwrap().source.as_ref().map(f)
    }

    /// Current zoom factor
    pub fn zoom(&self) -> f64 {
        self.inner.read().unwrap().zoom
    }
}

/// Scale a preview into the preferred box
///
/// Honors the fill ratio and never upscales past 1:1.
fn zoom_to_fit(width: f64, height: f64, box_width: f64, box_height: f64, fill_ratio: f64) -> f64 {
    if width <= 0.0 || height <= 0.0 {
        return 1.0;
    }
    let fit_x = box_width * fill_ratio / width;
    let fit_y = box_height * fill_ratio / height;
    fit_x.min(fit_y).min(1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preview::decoder::decode_preview;
    use crate::testdb::payload;

    fn sample_preview(width: u32, height: u32) -> DecodedPreview {
        decode_preview(&payload::png_payload(width, height, 11)).unwrap()
    }

    #[test]
    fn test_publish_to_live_panel() {
        let panel = ImagePanel::new();
        assert!(!panel.has_source());

        let outcome = panel.publish(sample_preview(40, 30));
        assert_eq!(outcome, PublishOutcome::Published);
        assert!(panel.has_source());
        assert_eq!(panel.with_source(|p| p.width()), Some(40));
    }

    #[test]
    fn test_publish_after_release_is_skipped() {
        let panel = ImagePanel::new();
        panel.release();

        let outcome = panel.publish(sample_preview(40, 30));
        assert_eq!(outcome, PublishOutcome::Skipped);
        assert!(!panel.has_source());
        assert!(!panel.is_live());
    }

    #[test]
    fn test_clones_share_state() {
        let panel = ImagePanel::new();
        let handle = panel.clone();
        handle.release();
        assert_eq!(panel.publish(sample_preview(8, 8)), PublishOutcome::Skipped);
    }

    #[test]
    fn test_zoom_fits_large_preview_into_box() {
        let panel = ImagePanel::new();
        panel.set_preferred_size_fit(800.0, 600.0, 0.9);
        panel.publish(sample_preview(1440, 540));
        // Width-bound: 800 * 0.9 / 1440 = 0.5
        assert!((panel.zoom() - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_zoom_never_upscales() {
        let panel = ImagePanel::new();
        panel.set_preferred_size_fit(800.0, 600.0, 0.9);
        panel.publish(sample_preview(10, 10));
        assert!((panel.zoom() - 1.0).abs() < f64::EPSILON);
    }
}
