//! Rendering contract between the input reconciler and a paint backend.

use super::color::Color;

/// Minimal raster painting interface driven by the stroke state machine.
///
/// [`DrawingSurface`](super::DrawingSurface) is the production implementation;
/// tests substitute a recording mock so reconciler logic can be exercised
/// without a live Cairo surface.
///
/// All operations are infallible by contract: backends absorb internal
/// failures (they log and skip the paint) rather than surfacing them, since
/// event handlers have no error channel.
pub trait PaintTarget {
    /// Opens a new path at (x, y).
    ///
    /// Always succeeds, discarding any still-open path left behind by an
    /// unterminated stroke.
    fn begin_stroke(&mut self, x: f64, y: f64);

    /// Paints the segment from the path head to (x, y) with the current
    /// color and width, then advances the head.
    ///
    /// A no-op when no path is open.
    fn extend_stroke(&mut self, x: f64, y: f64);

    /// Closes the current path. Idempotent.
    fn end_stroke(&mut self);

    /// Floods the whole surface with the background color and closes any
    /// open path.
    fn clear(&mut self);

    /// Sets the color used by subsequent segments; already-painted pixels
    /// are unaffected.
    fn set_stroke_color(&mut self, color: Color);

    /// Sets the width used by subsequent segments, clamped to the valid
    /// brush range.
    fn set_stroke_width(&mut self, width: f64);
}
