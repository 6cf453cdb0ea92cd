// Multi-touch gesture classification over a 2-D geometry kernel.
//
// Raw contact samples stream into the gesture module's Recognizer; tap,
// flick, drag, pinch, and splay events stream out through a GestureSink.
// The geom module stands alone as a small computational-geometry toolkit
// (point/vector algebra, convex hull, minimum enclosing circle) that the
// splay path is built on.

pub mod geom;
pub mod gesture;

// Re-export commonly used items
pub use geom::{Circle, GeomError, Point, Vector, convex_hull, min_enclosing_circle};
pub use gesture::{
    CardinalDirection, ContactSet, EventLog, FnSink, Gesture, GestureError, GestureEvent,
    GestureSink, Phase, Recognizer, TargetNode, TouchPoint, TouchSample,
};
