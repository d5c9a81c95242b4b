//! Aggregate wiring the surface, reconciler, and palette for a host shell.

use log::warn;

use crate::config::Config;
use crate::draw::{
    DrawingSurface, ExportFormat, PaintTarget, Palette, SurfaceError, Swatch,
};
use crate::input::{InputReconciler, PointerEvent};

/// One sketch board: a raster surface plus the input state machine driving
/// it and the palette the host renders as buttons.
///
/// The embedding shell feeds normalized pointer events into
/// [`handle_pointer`](Board::handle_pointer) and wires its palette buttons,
/// brush slider, clear button, and resize observer to the matching methods.
/// Fields are public so hosts and tests can reach the parts directly.
pub struct Board {
    pub surface: DrawingSurface,
    pub reconciler: InputReconciler,
    pub palette: Palette,
}

impl Board {
    /// Creates a board with default settings (white background, black pen,
    /// width 5). Dimensions come from the host's layout box.
    pub fn new(width: i32, height: i32) -> Result<Self, SurfaceError> {
        Self::with_config(width, height, &Config::default())
    }

    /// Creates a board honoring the loaded configuration.
    pub fn with_config(width: i32, height: i32, config: &Config) -> Result<Self, SurfaceError> {
        let background = config.drawing.background_color();
        let mut surface = DrawingSurface::with_background(width, height, background)?;
        surface.set_stroke_color(config.drawing.default_color());
        surface.set_stroke_width(config.drawing.default_brush_width);

        Ok(Self {
            surface,
            reconciler: InputReconciler::new(),
            palette: Palette::new(background),
        })
    }

    /// Feeds one normalized pointer event through the state machine.
    pub fn handle_pointer(&mut self, event: PointerEvent) {
        self.reconciler.on_pointer_event(event, &mut self.surface);
    }

    /// Selects a palette entry by index, ending any in-progress stroke.
    ///
    /// Returns the selected entry, or `None` when the index is out of range
    /// (the selection is then ignored).
    pub fn select_color(&mut self, index: usize) -> Option<Swatch> {
        match self.palette.get(index) {
            Some(swatch) => {
                self.reconciler
                    .on_color_selected(swatch.color, &mut self.surface);
                Some(swatch)
            }
            None => {
                warn!("palette index {index} out of range, selection ignored");
                None
            }
        }
    }

    /// Selects a palette entry by name (case-insensitive).
    pub fn select_color_by_name(&mut self, name: &str) -> Option<Swatch> {
        match self.palette.by_name(name) {
            Some(swatch) => {
                self.reconciler
                    .on_color_selected(swatch.color, &mut self.surface);
                Some(swatch)
            }
            None => {
                warn!("unknown palette color '{name}', selection ignored");
                None
            }
        }
    }

    /// Applies a brush-size change from the slider control.
    pub fn set_brush_width(&mut self, width: f64) {
        self.reconciler
            .on_brush_width_changed(width, &mut self.surface);
    }

    /// Clears the board back to its background color.
    pub fn clear(&mut self) {
        self.reconciler.on_clear(&mut self.surface);
    }

    /// Resizes the surface to the container's new layout box, preserving
    /// content anchored at the origin.
    pub fn resize(&mut self, width: i32, height: i32) -> Result<(), SurfaceError> {
        self.surface.resize_preserving_content(width, height)
    }

    /// Encodes the current drawing without mutating it.
    pub fn export_to_bytes(&self, format: ExportFormat) -> Result<Vec<u8>, SurfaceError> {
        self.surface.export_to_bytes(format)
    }

    /// Whether a stroke is currently active.
    pub fn is_drawing(&self) -> bool {
        self.reconciler.is_drawing()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::color::{BLACK, RED, WHITE};
    use crate::input::{Buttons, PointerKind};

    fn pointer(kind: PointerKind, x: f64, y: f64, buttons: Buttons) -> PointerEvent {
        PointerEvent { kind, x, y, buttons }
    }

    fn assert_pixel(board: &mut Board, x: i32, y: i32, expected: crate::draw::Color, label: &str) {
        let [r, g, b, _] = board.surface.pixel_at(x, y).expect("pixel in bounds");
        let close = |channel: u8, want: f64| (channel as f64 / 255.0 - want).abs() < 0.02;
        assert!(
            close(r, expected.r) && close(g, expected.g) && close(b, expected.b),
            "{label}: got [{r}, {g}, {b}] at ({x}, {y})"
        );
    }

    #[test]
    fn defaults_come_from_the_config() {
        let board = Board::new(64, 64).unwrap();
        assert_eq!(board.surface.stroke_color(), BLACK);
        assert_eq!(board.surface.stroke_width(), 5.0);
        assert_eq!(board.surface.background(), WHITE);
        assert!(!board.is_drawing());
    }

    #[test]
    fn red_drag_paints_a_red_segment_and_goes_idle() {
        let mut board = Board::new(100, 40).unwrap();
        board.select_color_by_name("red").unwrap();

        board.handle_pointer(pointer(PointerKind::Down, 10.0, 10.0, Buttons::PRIMARY));
        assert!(board.is_drawing());
        board.handle_pointer(pointer(PointerKind::Move, 50.0, 10.0, Buttons::PRIMARY));
        board.handle_pointer(pointer(PointerKind::Up, 50.0, 10.0, Buttons::NONE));
        assert!(!board.is_drawing());

        assert_pixel(&mut board, 30, 10, RED, "stroke interior");
        assert_pixel(&mut board, 30, 30, WHITE, "away from stroke");
    }

    #[test]
    fn eraser_paints_in_background_color() {
        let mut board = Board::new(60, 60).unwrap();
        board.select_color_by_name("red").unwrap();
        board.set_brush_width(10.0);
        board.handle_pointer(pointer(PointerKind::Down, 10.0, 30.0, Buttons::PRIMARY));
        board.handle_pointer(pointer(PointerKind::Move, 50.0, 30.0, Buttons::PRIMARY));
        board.handle_pointer(pointer(PointerKind::Up, 50.0, 30.0, Buttons::NONE));
        assert_pixel(&mut board, 30, 30, RED, "painted");

        let eraser = board.select_color_by_name("white").unwrap();
        assert!(board.palette.is_eraser(&eraser));
        board.handle_pointer(pointer(PointerKind::Down, 10.0, 30.0, Buttons::PRIMARY));
        board.handle_pointer(pointer(PointerKind::Move, 50.0, 30.0, Buttons::PRIMARY));
        board.handle_pointer(pointer(PointerKind::Up, 50.0, 30.0, Buttons::NONE));
        assert_pixel(&mut board, 30, 30, WHITE, "erased");
    }

    #[test]
    fn color_swap_mid_stroke_leaves_strokes_disjoint() {
        let mut board = Board::new(120, 60).unwrap();
        board.select_color_by_name("red").unwrap();
        board.handle_pointer(pointer(PointerKind::Down, 10.0, 30.0, Buttons::PRIMARY));
        board.handle_pointer(pointer(PointerKind::Move, 40.0, 30.0, Buttons::PRIMARY));

        // Swap mid-stroke: the stroke ends immediately.
        board.select_color_by_name("blue").unwrap();
        assert!(!board.is_drawing());

        // Without a new down, moves change nothing.
        board.handle_pointer(pointer(PointerKind::Move, 80.0, 30.0, Buttons::PRIMARY));
        assert_pixel(&mut board, 60, 30, WHITE, "gap between strokes");

        board.handle_pointer(pointer(PointerKind::Down, 90.0, 30.0, Buttons::PRIMARY));
        board.handle_pointer(pointer(PointerKind::Move, 110.0, 30.0, Buttons::PRIMARY));
        board.handle_pointer(pointer(PointerKind::Up, 110.0, 30.0, Buttons::NONE));
        assert_pixel(&mut board, 100, 30, crate::draw::color::BLUE, "new color");
        assert_pixel(&mut board, 20, 30, RED, "old stroke untouched");
    }

    #[test]
    fn out_of_range_palette_index_is_ignored() {
        let mut board = Board::new(10, 10).unwrap();
        let before = board.surface.stroke_color();
        assert!(board.select_color(99).is_none());
        assert_eq!(board.surface.stroke_color(), before);
    }

    #[test]
    fn clear_wipes_the_board_and_resets_the_machine() {
        let mut board = Board::new(50, 50).unwrap();
        board.handle_pointer(pointer(PointerKind::Down, 5.0, 5.0, Buttons::PRIMARY));
        board.handle_pointer(pointer(PointerKind::Move, 45.0, 45.0, Buttons::PRIMARY));
        board.clear();

        assert!(!board.is_drawing());
        assert_pixel(&mut board, 25, 25, WHITE, "cleared");
    }
}
