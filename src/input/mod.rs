//! Input handling and the stroke state machine.
//!
//! This module translates raw mouse and touch events into drawing commands.
//! Per-device adapters normalize coordinate spaces and button semantics into
//! a single pointer event type; the reconciler orders those events into an
//! unambiguous command sequence for the paint target.

pub mod events;
pub mod reconciler;

// Re-export commonly used types at module level
pub use events::{Buttons, MouseAdapter, PointerEvent, PointerKind, TouchAdapter, TouchPhase};
pub use reconciler::{InputReconciler, StrokePhase};
