//! Host plugin contract
//!
//! A previewer host drives plugins through a small, closed capability set:
//! can-handle, prepare, view, cleanup. The host also hands every call an
//! opaque context object carrying the busy flag, title, viewer content
//! slot and preferred-size setter. This module defines both sides of that
//! contract; `indesign` provides the InDesign document implementation.

pub mod indesign;

use std::path::Path;
use std::sync::{Arc, RwLock};

use crate::preview::panel::{
    ImagePanel, DEFAULT_FILL_RATIO, DEFAULT_PREFERRED_HEIGHT, DEFAULT_PREFERRED_WIDTH,
};

// Re-export the concrete viewer for convenience
pub use indesign::InDesignViewer;

/// Preferred display size and fill ratio for a view
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PreferredSize {
    /// Preferred width in display units
    pub width: f64,
    /// Preferred height in display units
    pub height: f64,
    /// Fraction of the preferred size the content may fill
    pub fill_ratio: f64,
}

impl Default for PreferredSize {
    fn default() -> Self {
        Self {
            width: DEFAULT_PREFERRED_WIDTH,
            height: DEFAULT_PREFERRED_HEIGHT,
            fill_ratio: DEFAULT_FILL_RATIO,
        }
    }
}

#[derive(Debug, Default)]
struct ContextState {
    busy: bool,
    title: String,
    content: Option<ImagePanel>,
    preferred: PreferredSize,
}

/// The opaque collaborator object a host passes into every plugin call
///
/// Handles are cheap clones sharing one interior, so state set while a
/// view is being prepared stays visible when the background result is
/// applied later.
#[derive(Debug, Clone, Default)]
pub struct ContextObject {
    inner: Arc<RwLock<ContextState>>,
}

impl ContextObject {
    /// Create a fresh context
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the busy-state flag
    pub fn set_busy(&self, busy: bool) {
        self.inner.write().unwrap().busy = busy;
    }

    /// Current busy-state flag
    pub fn is_busy(&self) -> bool {
        self.inner.read().unwrap().busy
    }

    /// Set the title string
    pub fn set_title(&self, title: &str) {
        self.inner.write().unwrap().title = title.to_string();
    }

    /// Current title string
    pub fn title(&self) -> String {
        self.inner.read().unwrap().title.clone()
    }

    /// Wire a panel into the viewer content slot
    pub fn set_viewer_content(&self, panel: ImagePanel) {
        self.inner.write().unwrap().content = Some(panel);
    }

    /// Current viewer content, if any
    pub fn viewer_content(&self) -> Option<ImagePanel> {
        self.inner.read().unwrap().content.clone()
    }

    /// Set the preferred display size and fill ratio
    pub fn set_preferred_size_fit(&self, width: f64, height: f64, fill_ratio: f64) {
        let mut state = self.inner.write().unwrap();
        state.preferred = PreferredSize {
            width,
            height,
            fill_ratio,
        };
        if let Some(ref panel) = state.content {
            panel.set_preferred_size_fit(width, height, fill_ratio);
        }
    }

    /// Current preferred size
    pub fn preferred_size(&self) -> PreferredSize {
        self.inner.read().unwrap().preferred
    }
}

/// Capability set a previewer host drives plugins through
///
/// Exactly four operations, no deeper hierarchy. `view` must return
/// promptly: slow work belongs on a background thread so the host can show
/// the panel before the content is ready.
pub trait Viewer {
    /// Whether this plugin handles the given path
    fn can_handle(&self, path: &Path) -> bool;

    /// Announce display preferences before the view is created
    fn prepare(&mut self, path: &Path, context: &ContextObject);

    /// Wire the display surface into the context and start producing content
    fn view(&mut self, path: &Path, context: &ContextObject);

    /// Release the display surface reference
    fn cleanup(&mut self);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_clones_share_state() {
        let context = ContextObject::new();
        let handle = context.clone();

        handle.set_busy(true);
        handle.set_title("report.indd");

        assert!(context.is_busy());
        assert_eq!(context.title(), "report.indd");
    }

    #[test]
    fn test_preferred_size_reaches_wired_panel() {
        let context = ContextObject::new();
        let panel = ImagePanel::new();
        context.set_viewer_content(panel.clone());
        context.set_preferred_size_fit(800.0, 600.0, 0.9);

        let preferred = context.preferred_size();
        assert_eq!(preferred.width, 800.0);
        assert_eq!(preferred.height, 600.0);
        assert_eq!(preferred.fill_ratio, 0.9);
    }

    #[test]
    fn test_viewer_content_slot() {
        let context = ContextObject::new();
        assert!(context.viewer_content().is_none());

        context.set_viewer_content(ImagePanel::new());
        assert!(context.viewer_content().is_some());
    }
}
