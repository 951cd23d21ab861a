//! Preview controller
//!
//! Runs the extraction pipeline off the caller's thread so a panel can be
//! shown before its image is ready. One worker thread is spawned per view
//! request; requests are independent and never batched, deduplicated or
//! cancelled. Results travel back through a channel, and the thread that
//! owns the display surface applies them with [`apply_event`].

use std::path::PathBuf;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use log::{info, warn};

use crate::core::pipeline::{extract_preview, file_name_of, PreviewOutcome};
use crate::plugin::ContextObject;
use crate::preview::panel::{ImagePanel, PublishOutcome};
use crate::tool::traits::PreviewTool;
use crate::ui::events::PreviewEvent;

// =============================================================================
// Controller State
// =============================================================================

/// Current state of the preview controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ViewerState {
    /// No request has been issued yet
    Idle = 0,
    /// A background extraction is running
    Extracting = 1,
    /// The last request reached a terminal outcome
    Done = 2,
    /// The last request failed
    Error = 3,
}

impl From<u8> for ViewerState {
    fn from(value: u8) -> Self {
        match value {
            1 => ViewerState::Extracting,
            2 => ViewerState::Done,
            3 => ViewerState::Error,
            _ => ViewerState::Idle,
        }
    }
}

// =============================================================================
// Preview Controller
// =============================================================================

/// Thread-safe controller for background preview extraction
///
/// The controller owns the worker side of a view request and the event
/// channel back to the surface owner. It never publishes by itself: the
/// owner drains events on its own thread and performs the publish there,
/// which keeps the UI-affinity of the surface intact.
pub struct PreviewController {
    /// Current state, lock-free for status checks
    state: Arc<AtomicU8>,
    /// Event receiver for the surface owner
    event_rx: Mutex<Receiver<PreviewEvent>>,
    /// Event sender cloned into workers
    event_tx: Sender<PreviewEvent>,
    /// Most recent worker handle
    worker_handle: Mutex<Option<JoinHandle<()>>>,
}

impl PreviewController {
    /// Create a new idle controller
    pub fn new() -> Self {
        let (event_tx, event_rx) = mpsc::channel();
        Self {
            state: Arc::new(AtomicU8::new(ViewerState::Idle as u8)),
            event_rx: Mutex::new(event_rx),
            event_tx,
            worker_handle: Mutex::new(None),
        }
    }

    /// Get current state
    pub fn state(&self) -> ViewerState {
        ViewerState::from(self.state.load(Ordering::SeqCst))
    }

    /// Check if a background extraction is running
    pub fn is_extracting(&self) -> bool {
        self.state() == ViewerState::Extracting
    }

    /// Try to receive the next event (non-blocking)
    pub fn try_recv_event(&self) -> Option<PreviewEvent> {
        match self.event_rx.lock().unwrap().try_recv() {
            Ok(event) => Some(event),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => None,
        }
    }

    /// Receive an event with a timeout
    pub fn recv_event_timeout(&self, timeout: Duration) -> Option<PreviewEvent> {
        self.event_rx.lock().unwrap().recv_timeout(timeout).ok()
    }

    /// Drain all pending events
    pub fn drain_events(&self) -> Vec<PreviewEvent> {
        let mut events = Vec::new();
        while let Some(event) = self.try_recv_event() {
            events.push(event);
        }
        events
    }

    /// Issue a view request
    ///
    /// Spawns one worker thread that runs the pipeline to completion and
    /// emits `Started` plus exactly one terminal event. Returns
    /// immediately; the caller's thread stays free to show the panel.
    pub fn request<T>(&self, tool: Arc<T>, path: PathBuf)
    where
        T: PreviewTool + 'static,
    {
        self.state
            .store(ViewerState::Extracting as u8, Ordering::SeqCst);

        let state = Arc::clone(&self.state);
        let event_tx = self.event_tx.clone();

        let _ = event_tx.send(PreviewEvent::Started { path: path.clone() });

        let handle = thread::spawn(move || {
            Self::extraction_worker(tool, path, state, event_tx);
        });

        // Requests are independent; a still-running predecessor keeps
        // running detached and its stale publish is suppressed by the
        // panel liveness check.
        *self.worker_handle.lock().unwrap() = Some(handle);
    }

    /// Wait for the most recent worker to finish (used by CLI and tests)
    pub fn wait(&self) {
        if let Some(handle) = self.worker_handle.lock().unwrap().take() {
            let _ = handle.join();
        }
    }

    /// Worker thread body: run the pipeline, emit one terminal event
    fn extraction_worker<T>(
        tool: Arc<T>,
        path: PathBuf,
        state: Arc<AtomicU8>,
        event_tx: Sender<PreviewEvent>,
    ) where
        T: PreviewTool + 'static,
    {
        match extract_preview(tool.as_ref(), &path) {
            Ok(PreviewOutcome::Decoded(preview)) => {
                let title = preview.display_title(&file_name_of(&path));
                state.store(ViewerState::Done as u8, Ordering::SeqCst);
                let _ = event_tx.send(PreviewEvent::Ready { preview, title });
            }
            Ok(PreviewOutcome::Empty) => {
                state.store(ViewerState::Done as u8, Ordering::SeqCst);
                let _ = event_tx.send(PreviewEvent::Empty { path });
            }
            Err(e) => {
                state.store(ViewerState::Error as u8, Ordering::SeqCst);
                let _ = event_tx.send(PreviewEvent::Failed {
                    path,
                    error: e.to_string(),
                });
            }
        }
    }
}

impl Default for PreviewController {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Publish Step
// =============================================================================

/// Apply one event to the display surface and its context
///
/// This is the publish step. It must run on the thread that owns the
/// surface; everything it does is synchronous. A `Ready` event against a
/// released (or absent) panel is a logged no-op so an abandoned view never
/// receives a late image.
pub fn apply_event(event: PreviewEvent, panel: Option<&ImagePanel>, context: &ContextObject) {
    match event {
        PreviewEvent::Started { .. } => {
            context.set_busy(true);
        }
        PreviewEvent::Ready { preview, title } => {
            match panel.map(|p| p.publish(preview)) {
                Some(PublishOutcome::Published) => {
                    context.set_title(&title);
                }
                Some(PublishOutcome::Skipped) | None => {
                    info!("discarding preview for a view that is no longer live");
                }
            }
            context.set_busy(false);
        }
        PreviewEvent::Empty { path } => {
            info!("leaving view blank: {} has no embedded preview", path.display());
            context.set_busy(false);
        }
        PreviewEvent::Failed { path, error } => {
            warn!("preview extraction failed for {}: {}", path.display(), error);
            context.set_title(&format!("Preview unavailable: {}", file_name_of(&path)));
            context.set_busy(false);
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testdb::mock_tool::{MockResponse, MockTool};
    use crate::testdb::payload;

    fn ready_tool(file: &str, width: u32, height: u32) -> Arc<MockTool> {
        Arc::new(MockTool::new().with_response(
            file,
            MockResponse::Bytes(payload::png_payload(width, height, 13)),
        ))
    }

    fn wait_terminal(controller: &PreviewController) -> PreviewEvent {
        loop {
            let event = controller
                .recv_event_timeout(Duration::from_secs(5))
                .expect("worker did not emit a terminal event");
            if event.is_terminal() {
                return event;
            }
        }
    }

    #[test]
    fn test_state_conversion() {
        assert_eq!(ViewerState::from(0), ViewerState::Idle);
        assert_eq!(ViewerState::from(1), ViewerState::Extracting);
        assert_eq!(ViewerState::from(2), ViewerState::Done);
        assert_eq!(ViewerState::from(3), ViewerState::Error);
        assert_eq!(ViewerState::from(255), ViewerState::Idle); // Invalid
    }

    #[test]
    fn test_request_emits_started_then_ready() {
        let controller = PreviewController::new();
        controller.request(ready_tool("report.indd", 1200, 900), PathBuf::from("report.indd"));

        let first = controller
            .recv_event_timeout(Duration::from_secs(5))
            .unwrap();
        assert!(matches!(first, PreviewEvent::Started { .. }));

        match wait_terminal(&controller) {
            PreviewEvent::Ready { title, .. } => {
                assert_eq!(title, "900×675: report.indd");
            }
            _ => panic!("expected Ready event"),
        }
        controller.wait();
        assert_eq!(controller.state(), ViewerState::Done);
    }

    #[test]
    fn test_empty_response_reaches_empty_event() {
        let controller = PreviewController::new();
        let tool = Arc::new(MockTool::new().with_response("template.indt", MockResponse::Empty));
        controller.request(tool, PathBuf::from("template.indt"));

        assert!(matches!(
            wait_terminal(&controller),
            PreviewEvent::Empty { .. }
        ));
        controller.wait();
        assert_eq!(controller.state(), ViewerState::Done);
    }

    #[test]
    fn test_tool_missing_reaches_failed_event() {
        let controller = PreviewController::new();
        let tool = Arc::new(MockTool::new().with_default_response(MockResponse::NotFound));
        controller.request(tool, PathBuf::from("report.indd"));

        match wait_terminal(&controller) {
            PreviewEvent::Failed { error, .. } => {
                assert!(error.contains("not found"));
            }
            _ => panic!("expected Failed event"),
        }
        controller.wait();
        assert_eq!(controller.state(), ViewerState::Error);
    }

    #[test]
    fn test_apply_ready_publishes_to_live_panel() {
        let controller = PreviewController::new();
        controller.request(ready_tool("report.indd", 400, 300), PathBuf::from("report.indd"));

        let panel = ImagePanel::new();
        let context = ContextObject::new();
        context.set_busy(true);

        let event = wait_terminal(&controller);
        apply_event(event, Some(&panel), &context);

        assert!(panel.has_source());
        assert_eq!(context.title(), "300×225: report.indd");
        assert!(!context.is_busy());
    }

    #[test]
    fn test_apply_ready_after_release_is_noop() {
        let controller = PreviewController::new();
        controller.request(ready_tool("report.indd", 400, 300), PathBuf::from("report.indd"));

        let panel = ImagePanel::new();
        let context = ContextObject::new();
        context.set_busy(true);
        context.set_title("report.indd");

        // The view is torn down before the worker finishes.
        panel.release();

        let event = wait_terminal(&controller);
        apply_event(event, Some(&panel), &context);

        assert!(!panel.has_source());
        // The stale result must not touch the title either.
        assert_eq!(context.title(), "report.indd");
        assert!(!context.is_busy());
    }

    #[test]
    fn test_apply_empty_clears_busy_and_keeps_view_blank() {
        let panel = ImagePanel::new();
        let context = ContextObject::new();
        context.set_busy(true);

        apply_event(
            PreviewEvent::Empty {
                path: PathBuf::from("template.indt"),
            },
            Some(&panel),
            &context,
        );

        assert!(!panel.has_source());
        assert!(!context.is_busy());
    }

    #[test]
    fn test_apply_failed_sets_unavailable_title() {
        let panel = ImagePanel::new();
        let context = ContextObject::new();
        context.set_busy(true);

        apply_event(
            PreviewEvent::Failed {
                path: PathBuf::from("report.indd"),
                error: "ExifTool executable not found".to_string(),
            },
            Some(&panel),
            &context,
        );

        assert!(context.title().contains("unavailable"));
        assert!(!context.is_busy());
    }

    #[test]
    fn test_concurrent_requests_are_independent() {
        // Two controllers, two requests for the same file: no shared state,
        // identical results.
        let tool = ready_tool("report.indd", 200, 100);
        let a = PreviewController::new();
        let b = PreviewController::new();
        a.request(Arc::clone(&tool), PathBuf::from("report.indd"));
        b.request(Arc::clone(&tool), PathBuf::from("report.indd"));

        let title_a = match wait_terminal(&a) {
            PreviewEvent::Ready { title, .. } => title,
            _ => panic!("expected Ready"),
        };
        let title_b = match wait_terminal(&b) {
            PreviewEvent::Ready { title, .. } => title,
            _ => panic!("expected Ready"),
        };
        assert_eq!(title_a, title_b);
        assert_eq!(tool.call_count(), 2);
    }
}
