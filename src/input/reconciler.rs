//! Stroke-capture state machine.
//!
//! Orders a heterogeneous stream of pointer events into an unambiguous
//! sequence of [`PaintTarget`] calls. The reconciler owns exactly one piece
//! of state (the stroke phase) and never retains geometry; pixels live in
//! the paint target, the path head lives in the surface.

use log::{debug, trace};

use super::events::{PointerEvent, PointerKind};
use crate::draw::{Color, PaintTarget};

/// Current stroke phase.
///
/// `Drawing` spans the interval from a validated down event to its matching
/// termination; extend events outside that interval are discarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StrokePhase {
    /// Not drawing - waiting for a down event
    #[default]
    Idle,
    /// A stroke is in progress (contact held)
    Drawing,
}

/// Translates pointer events into drawing commands.
///
/// Guards against invalid or duplicate transitions (moves without a down,
/// releases that never reached the surface, re-entry mid-stroke) with
/// no-ops and forced resets; event-ordering anomalies are absorbed here,
/// never raised as errors.
#[derive(Debug, Default)]
pub struct InputReconciler {
    phase: StrokePhase,
}

impl InputReconciler {
    /// Creates a reconciler in the idle phase.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current phase of the state machine.
    pub fn phase(&self) -> StrokePhase {
        self.phase
    }

    /// Whether a stroke is currently active.
    pub fn is_drawing(&self) -> bool {
        self.phase == StrokePhase::Drawing
    }

    /// Feeds one normalized pointer event through the state machine.
    pub fn on_pointer_event(&mut self, event: PointerEvent, target: &mut impl PaintTarget) {
        match event.kind {
            PointerKind::Down => {
                // Valid from any phase; begin discards a stale open path.
                target.begin_stroke(event.x, event.y);
                self.phase = StrokePhase::Drawing;
                debug!("stroke started at ({:.1}, {:.1})", event.x, event.y);
            }
            PointerKind::Move => {
                if self.is_drawing() {
                    target.extend_stroke(event.x, event.y);
                } else {
                    trace!("move while idle ignored");
                }
            }
            PointerKind::Up | PointerKind::Cancel => {
                self.finish(target);
            }
            PointerKind::Leave => {
                // A held primary button keeps the stroke open so re-entry
                // continues the same path; otherwise the stroke ends here.
                if !(self.is_drawing() && event.buttons.primary) {
                    self.finish(target);
                }
            }
            PointerKind::Enter => {
                if self.is_drawing() && !event.buttons.primary {
                    // The release happened outside and its event never
                    // reached the surface.
                    debug!("pointer re-entered without button, forcing idle");
                    self.finish(target);
                }
                // Held re-entry resumes the open path without a fresh begin,
                // avoiding a spurious restart and a visible jump.
            }
        }
    }

    /// Applies a palette selection.
    ///
    /// Ends any in-progress stroke so it cannot silently continue in the
    /// new color; the next down event starts a visually disjoint stroke.
    pub fn on_color_selected(&mut self, color: Color, target: &mut impl PaintTarget) {
        target.set_stroke_color(color);
        self.finish(target);
    }

    /// Applies a brush-size change. The phase is unchanged: a live stroke
    /// keeps running and its next segment picks up the new width.
    pub fn on_brush_width_changed(&mut self, width: f64, target: &mut impl PaintTarget) {
        target.set_stroke_width(width);
    }

    /// Clears the surface and forces the phase back to idle.
    pub fn on_clear(&mut self, target: &mut impl PaintTarget) {
        target.clear();
        self.phase = StrokePhase::Idle;
    }

    fn finish(&mut self, target: &mut impl PaintTarget) {
        // end_stroke is idempotent, so forcing it from Idle is harmless.
        target.end_stroke();
        if self.is_drawing() {
            debug!("stroke finished");
        }
        self.phase = StrokePhase::Idle;
    }
}
