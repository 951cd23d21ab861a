//! UI support module
//!
//! Infrastructure for wiring the extraction pipeline into a host
//! previewer. It is UI-framework agnostic: the controller runs the
//! pipeline on a background thread and emits events through a channel,
//! and whichever thread owns the display surface applies them with
//! [`controller::apply_event`].
//!
//! # Threading Model
//!
//! 1. **Event channel** - The worker emits `Started` plus exactly one
//!    terminal event per request; the owner polls without blocking
//! 2. **Atomic state** - Controller state uses atomic operations for
//!    lock-free status checks
//! 3. **No cancellation** - Abandoned requests run to completion; the
//!    panel liveness flag suppresses their publish

pub mod controller;
pub mod events;

// Re-export commonly used types for convenience
pub use controller::{apply_event, PreviewController, ViewerState};
pub use events::PreviewEvent;
