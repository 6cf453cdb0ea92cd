// Gesture recognition: per-contact tracking plus the classification state
// machine that turns raw touch sample batches into tap / flick / drag /
// pinch / splay events.

use thiserror::Error;

use crate::geom::GeomError;

pub mod classifier;
pub mod event;
pub mod input;
pub mod tracker;

// Re-export commonly used items
pub use classifier::{
    MAX_FLICK_DURATION_MS, MAX_FLICK_VARIANCE_DEG, MAX_TAP_DISTANCE, MAX_TAP_DURATION_MS,
    Recognizer,
};
pub use event::{CardinalDirection, EventLog, FnSink, Gesture, GestureEvent, GestureSink, Phase};
pub use tracker::{ContactSet, TargetNode, TouchPoint, TouchSample};

/// Caller misuse surfaced by the tracking and classification layer. Valid,
/// well-formed touch streams never produce these.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum GestureError {
    /// A geometry constructor rejected a sample's coordinates.
    #[error(transparent)]
    Geom(#[from] GeomError),
    /// A sample was applied to the state of a different contact.
    #[error("sample applied to a different contact (identifiers do not match)")]
    IdentifierMismatch,
}
