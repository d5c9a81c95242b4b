//! Cairo-backed raster surface that strokes paint into.
//!
//! The surface owns the pixel buffer and the drawing-context parameters
//! (stroke color, stroke width, round caps). Strokes render incrementally:
//! each new point is immediately connected to the previous one and painted,
//! so no stroke history survives beyond the pixels themselves.

use cairo::{Context, Format, ImageSurface, LineCap, LineJoin};
use thiserror::Error;

use super::color::{self, Color};
use super::target::PaintTarget;

/// Smallest accepted brush width in pixels.
pub const MIN_STROKE_WIDTH: f64 = 1.0;
/// Largest accepted brush width in pixels.
pub const MAX_STROKE_WIDTH: f64 = 50.0;
/// Brush width installed on a fresh surface.
pub const DEFAULT_STROKE_WIDTH: f64 = 5.0;

/// Errors that can occur while managing or encoding the surface.
#[derive(Debug, Error)]
pub enum SurfaceError {
    #[error("cairo operation failed: {0}")]
    Cairo(#[from] cairo::Error),

    #[error("failed to encode surface: {0}")]
    Encode(#[from] cairo::IoError),

    #[error("surface has no drawable area")]
    EmptySurface,
}

/// Image formats supported by [`DrawingSurface::export_to_bytes`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    /// Portable Network Graphics (lossless, the web default)
    #[default]
    Png,
}

impl ExportFormat {
    /// File extension for the format, without the dot.
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Png => "png",
        }
    }
}

/// In-memory ARGB32 raster surface with incremental stroke painting.
///
/// Dimensions come from the host's layout box and may legitimately be zero
/// before the first layout pass; every paint operation on a zero-sized
/// surface is a silent no-op.
pub struct DrawingSurface {
    surface: ImageSurface,
    width: i32,
    height: i32,
    stroke_color: Color,
    stroke_width: f64,
    background: Color,
    /// Head of the open path, if a stroke is in progress.
    current_point: Option<(f64, f64)>,
}

impl DrawingSurface {
    /// Creates a surface with the default white background.
    ///
    /// Installs the drawing defaults: black stroke color, width 5, round
    /// caps and joins. Non-positive dimensions are clamped to zero.
    pub fn new(width: i32, height: i32) -> Result<Self, SurfaceError> {
        Self::with_background(width, height, color::WHITE)
    }

    /// Creates a surface filled with `background`.
    pub fn with_background(
        width: i32,
        height: i32,
        background: Color,
    ) -> Result<Self, SurfaceError> {
        let width = width.max(0);
        let height = height.max(0);
        let surface = ImageSurface::create(Format::ARgb32, width, height)?;

        let mut this = Self {
            surface,
            width,
            height,
            stroke_color: color::BLACK,
            stroke_width: DEFAULT_STROKE_WIDTH,
            background,
            current_point: None,
        };
        this.fill_background();
        Ok(this)
    }

    /// Current surface width in pixels.
    pub fn width(&self) -> i32 {
        self.width
    }

    /// Current surface height in pixels.
    pub fn height(&self) -> i32 {
        self.height
    }

    /// Current stroke color.
    pub fn stroke_color(&self) -> Color {
        self.stroke_color
    }

    /// Current stroke width in pixels.
    pub fn stroke_width(&self) -> f64 {
        self.stroke_width
    }

    /// Board background color (what `clear` floods and the eraser paints).
    pub fn background(&self) -> Color {
        self.background
    }

    /// Whether a stroke path is currently open.
    pub fn has_open_path(&self) -> bool {
        self.current_point.is_some()
    }

    fn is_degenerate(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    fn acquire_context(&self) -> Option<Context> {
        match Context::new(&self.surface) {
            Ok(ctx) => Some(ctx),
            Err(err) => {
                log::error!("failed to acquire drawing context: {err}");
                None
            }
        }
    }

    fn fill_background(&mut self) {
        if self.is_degenerate() {
            return;
        }
        let Some(ctx) = self.acquire_context() else {
            return;
        };
        let bg = self.background;
        ctx.set_source_rgba(bg.r, bg.g, bg.b, bg.a);
        let _ = ctx.paint();
    }

    fn stroke_segment(&mut self, from: (f64, f64), to: (f64, f64)) {
        if self.is_degenerate() {
            return;
        }
        let Some(ctx) = self.acquire_context() else {
            return;
        };
        let c = self.stroke_color;
        ctx.set_source_rgba(c.r, c.g, c.b, c.a);
        ctx.set_line_width(self.stroke_width);
        ctx.set_line_cap(LineCap::Round);
        ctx.set_line_join(LineJoin::Round);

        ctx.move_to(from.0, from.1);
        ctx.line_to(to.0, to.1);
        let _ = ctx.stroke();
    }

    /// Resizes the surface while keeping existing content anchored at (0,0).
    ///
    /// Reallocating a raster surface discards its pixels, so the old surface
    /// is blitted onto the new one after the background fill. Shrinking
    /// crops content outside the new bounds; that loss is accepted, not an
    /// error. Non-positive target dimensions produce an empty surface (the
    /// pre-layout state), which later grows back without error.
    ///
    /// Must run once when the surface is first sized to its container and
    /// again on every viewport resize.
    pub fn resize_preserving_content(
        &mut self,
        new_width: i32,
        new_height: i32,
    ) -> Result<(), SurfaceError> {
        let new_width = new_width.max(0);
        let new_height = new_height.max(0);
        if new_width == self.width && new_height == self.height {
            return Ok(());
        }

        log::debug!(
            "resizing surface {}x{} -> {}x{}",
            self.width,
            self.height,
            new_width,
            new_height
        );

        let resized = ImageSurface::create(Format::ARgb32, new_width, new_height)?;
        if new_width > 0 && new_height > 0 {
            let ctx = Context::new(&resized)?;
            let bg = self.background;
            ctx.set_source_rgba(bg.r, bg.g, bg.b, bg.a);
            ctx.paint()?;

            if !self.is_degenerate() {
                ctx.set_source_surface(&self.surface, 0.0, 0.0)?;
                ctx.paint()?;
            }
        }

        self.surface = resized;
        self.width = new_width;
        self.height = new_height;
        Ok(())
    }

    /// Encodes the current pixel contents without mutating them.
    ///
    /// Succeeds for any surface with positive dimensions; a zero-sized
    /// surface reports [`SurfaceError::EmptySurface`].
    pub fn export_to_bytes(&self, format: ExportFormat) -> Result<Vec<u8>, SurfaceError> {
        if self.is_degenerate() {
            return Err(SurfaceError::EmptySurface);
        }
        match format {
            ExportFormat::Png => {
                let mut bytes = Vec::new();
                self.surface.write_to_png(&mut bytes)?;
                Ok(bytes)
            }
        }
    }

    /// Reads back one pixel as `[r, g, b, a]`, or `None` when out of bounds.
    ///
    /// ARGB32 stores premultiplied alpha; the board only ever paints opaque
    /// colors, so the channels come back unscaled.
    pub fn pixel_at(&mut self, x: i32, y: i32) -> Option<[u8; 4]> {
        if x < 0 || y < 0 || x >= self.width || y >= self.height {
            return None;
        }
        let stride = self.surface.stride() as usize;
        let data = self.surface.data().ok()?;
        let offset = y as usize * stride + x as usize * 4;
        let raw = u32::from_ne_bytes(data[offset..offset + 4].try_into().ok()?);
        Some([
            (raw >> 16) as u8,
            (raw >> 8) as u8,
            raw as u8,
            (raw >> 24) as u8,
        ])
    }
}

impl PaintTarget for DrawingSurface {
    fn begin_stroke(&mut self, x: f64, y: f64) {
        // Begin always wins: a path left open by a missed release is dropped.
        self.current_point = Some((x, y));
    }

    fn extend_stroke(&mut self, x: f64, y: f64) {
        let Some(from) = self.current_point else {
            log::trace!("extend_stroke with no open path ignored");
            return;
        };
        self.stroke_segment(from, (x, y));
        self.current_point = Some((x, y));
    }

    fn end_stroke(&mut self) {
        self.current_point = None;
    }

    fn clear(&mut self) {
        self.fill_background();
        self.current_point = None;
    }

    fn set_stroke_color(&mut self, color: Color) {
        self.stroke_color = color;
    }

    fn set_stroke_width(&mut self, width: f64) {
        self.stroke_width = width.clamp(MIN_STROKE_WIDTH, MAX_STROKE_WIDTH);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::color::{BLACK, RED, WHITE};

    fn assert_pixel(surface: &mut DrawingSurface, x: i32, y: i32, expected: Color, label: &str) {
        let [r, g, b, a] = surface.pixel_at(x, y).expect("pixel in bounds");
        let close = |channel: u8, want: f64| (channel as f64 / 255.0 - want).abs() < 0.02;
        assert!(
            close(r, expected.r) && close(g, expected.g) && close(b, expected.b) && a == 255,
            "{label}: got [{r}, {g}, {b}, {a}] at ({x}, {y})"
        );
    }

    #[test]
    fn fresh_surface_is_background_colored() {
        let mut surface = DrawingSurface::new(40, 30).unwrap();
        assert_pixel(&mut surface, 0, 0, WHITE, "corner");
        assert_pixel(&mut surface, 39, 29, WHITE, "opposite corner");
        assert_pixel(&mut surface, 20, 15, WHITE, "center");
    }

    #[test]
    fn horizontal_stroke_paints_with_current_color_and_width() {
        let mut surface = DrawingSurface::new(100, 40).unwrap();
        surface.set_stroke_color(RED);
        surface.set_stroke_width(5.0);

        surface.begin_stroke(10.0, 10.0);
        surface.extend_stroke(50.0, 10.0);
        surface.end_stroke();

        // Interior of the segment is fully covered.
        assert_pixel(&mut surface, 30, 10, RED, "segment interior");
        assert_pixel(&mut surface, 12, 10, RED, "near start");
        assert_pixel(&mut surface, 48, 10, RED, "near end");
        // Well outside the 5px-wide band nothing changed.
        assert_pixel(&mut surface, 30, 25, WHITE, "below stroke");
        assert_pixel(&mut surface, 70, 10, WHITE, "past the end");
    }

    #[test]
    fn extend_without_begin_changes_nothing() {
        let mut surface = DrawingSurface::new(60, 60).unwrap();
        surface.set_stroke_color(RED);
        surface.extend_stroke(30.0, 30.0);
        assert!(!surface.has_open_path());
        assert_pixel(&mut surface, 30, 30, WHITE, "untouched");
    }

    #[test]
    fn begin_discards_previously_open_path() {
        let mut surface = DrawingSurface::new(80, 80).unwrap();
        surface.set_stroke_color(BLACK);
        surface.begin_stroke(5.0, 5.0);
        // A second down without an up starts over; no segment bridges the gap.
        surface.begin_stroke(60.0, 60.0);
        surface.extend_stroke(70.0, 60.0);

        assert_pixel(&mut surface, 30, 30, WHITE, "no bridge segment");
        assert_pixel(&mut surface, 65, 60, BLACK, "new stroke painted");
    }

    #[test]
    fn end_stroke_is_idempotent() {
        let mut surface = DrawingSurface::new(20, 20).unwrap();
        surface.end_stroke();
        surface.begin_stroke(1.0, 1.0);
        surface.end_stroke();
        surface.end_stroke();
        assert!(!surface.has_open_path());
    }

    #[test]
    fn clear_restores_uniform_background() {
        let mut surface = DrawingSurface::new(50, 50).unwrap();
        surface.set_stroke_color(RED);
        surface.begin_stroke(5.0, 5.0);
        surface.extend_stroke(45.0, 45.0);
        surface.clear();

        assert!(!surface.has_open_path());
        for (x, y) in [(5, 5), (25, 25), (45, 45), (0, 49)] {
            assert_pixel(&mut surface, x, y, WHITE, "cleared");
        }
    }

    #[test]
    fn growing_resize_preserves_painted_pixels() {
        let mut surface = DrawingSurface::new(40, 40).unwrap();
        surface.set_stroke_color(RED);
        surface.set_stroke_width(6.0);
        surface.begin_stroke(10.0, 20.0);
        surface.extend_stroke(30.0, 20.0);
        surface.end_stroke();

        surface.resize_preserving_content(80, 60).unwrap();
        assert_eq!((surface.width(), surface.height()), (80, 60));
        assert_pixel(&mut surface, 20, 20, RED, "content kept after grow");
        // The newly exposed region is background, not garbage.
        assert_pixel(&mut surface, 70, 50, WHITE, "new region");
    }

    #[test]
    fn shrinking_resize_crops_out_of_bounds_content() {
        let mut surface = DrawingSurface::new(80, 80).unwrap();
        surface.set_stroke_color(RED);
        surface.set_stroke_width(6.0);
        surface.begin_stroke(10.0, 10.0);
        surface.extend_stroke(70.0, 10.0);
        surface.end_stroke();

        surface.resize_preserving_content(40, 40).unwrap();
        assert_eq!((surface.width(), surface.height()), (40, 40));
        assert_pixel(&mut surface, 20, 10, RED, "in-bounds content kept");
        assert!(surface.pixel_at(70, 10).is_none());
    }

    #[test]
    fn export_produces_png_bytes() {
        let surface = DrawingSurface::new(16, 16).unwrap();
        let bytes = surface.export_to_bytes(ExportFormat::Png).unwrap();
        assert!(bytes.starts_with(&[0x89, b'P', b'N', b'G', b'\r', b'\n', 0x1a, b'\n']));
    }

    #[test]
    fn zero_sized_surface_is_inert() {
        let mut surface = DrawingSurface::new(0, 0).unwrap();
        surface.begin_stroke(1.0, 1.0);
        surface.extend_stroke(2.0, 2.0);
        surface.clear();
        assert!(surface.pixel_at(0, 0).is_none());
        assert!(matches!(
            surface.export_to_bytes(ExportFormat::Png),
            Err(SurfaceError::EmptySurface)
        ));

        // First real layout brings it to life.
        surface.resize_preserving_content(10, 10).unwrap();
        assert!(surface.export_to_bytes(ExportFormat::Png).is_ok());
    }

    #[test]
    fn stroke_width_is_clamped_to_brush_range() {
        let mut surface = DrawingSurface::new(10, 10).unwrap();
        surface.set_stroke_width(0.0);
        assert_eq!(surface.stroke_width(), MIN_STROKE_WIDTH);
        surface.set_stroke_width(400.0);
        assert_eq!(surface.stroke_width(), MAX_STROKE_WIDTH);
        surface.set_stroke_width(7.0);
        assert_eq!(surface.stroke_width(), 7.0);
    }
}
