//! InDesign document viewer plugin
//!
//! Implements the host capability set for `.indd` and `.indt` files. The
//! viewer wires a fresh panel into the context, shows the plain file name
//! while the background extraction runs, and leaves the terminal result to
//! be applied by whoever owns the surface (see `process_events`).

use std::path::Path;
use std::sync::Arc;

use log::debug;

use crate::core::error::Result;
use crate::core::pipeline::file_name_of;
use crate::preview::panel::ImagePanel;
use crate::tool::exiftool::ExifTool;
use crate::tool::locator::ToolLocator;
use crate::tool::traits::{is_supported, PreviewTool};
use crate::ui::controller::{apply_event, PreviewController};

/// Preferred view width announced during prepare
const PREFERRED_WIDTH: f64 = 800.0;

/// Preferred view height announced during prepare
const PREFERRED_HEIGHT: f64 = 600.0;

/// Fraction of the preferred size the preview may fill
const PREFERRED_FILL: f64 = 0.9;

/// Viewer plugin for InDesign documents and templates
pub struct InDesignViewer<T: PreviewTool> {
    tool: Arc<T>,
    controller: PreviewController,
    panel: Option<ImagePanel>,
}

impl InDesignViewer<ExifTool> {
    /// Create a viewer backed by a discovered ExifTool installation
    pub fn discover(locator: &ToolLocator) -> Result<Self> {
        Ok(Self::new(ExifTool::discover(locator)?))
    }
}

impl<T: PreviewTool + 'static> InDesignViewer<T> {
    /// Create a viewer with an explicit backend
    pub fn new(tool: T) -> Self {
        Self {
            tool: Arc::new(tool),
            controller: PreviewController::new(),
            panel: None,
        }
    }

    /// The controller carrying this viewer's events
    pub fn controller(&self) -> &PreviewController {
        &self.controller
    }

    /// Apply all pending events to the surface and context
    ///
    /// Must be called on the thread that owns the display surface. Returns
    /// the number of events applied.
    pub fn process_events(&self, context: &super::ContextObject) -> usize {
        let mut applied = 0;
        while let Some(event) = self.controller.try_recv_event() {
            apply_event(event, self.panel.as_ref(), context);
            applied += 1;
        }
        applied
    }
}

impl<T: PreviewTool + 'static> super::Viewer for InDesignViewer<T> {
    fn can_handle(&self, path: &Path) -> bool {
        is_supported(path)
    }

    fn prepare(&mut self, _path: &Path, context: &super::ContextObject) {
        context.set_preferred_size_fit(PREFERRED_WIDTH, PREFERRED_HEIGHT, PREFERRED_FILL);
    }

    fn view(&mut self, path: &Path, context: &super::ContextObject) {
        let panel = ImagePanel::new();
        let preferred = context.preferred_size();
        panel.set_preferred_size_fit(preferred.width, preferred.height, preferred.fill_ratio);

        context.set_viewer_content(panel.clone());
        context.set_title(&file_name_of(path));
        context.set_busy(true);
        self.panel = Some(panel);

        debug!("view requested for {}", path.display());
        self.controller
            .request(Arc::clone(&self.tool), path.to_path_buf());
    }

    fn cleanup(&mut self) {
        if let Some(panel) = self.panel.take() {
            panel.release();
        }
    }
}
