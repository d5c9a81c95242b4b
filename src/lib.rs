//! Freehand raster sketch board.
//!
//! A user paints strokes onto a resizable in-memory canvas with a pointer or
//! touch input, picks a color from a fixed palette, adjusts brush thickness,
//! clears the board, and exports the drawing as a PNG. The crate splits into
//! a raster side ([`draw`]) and an input side ([`input`]) joined by the
//! [`draw::PaintTarget`] contract; [`Board`] wires them together for an
//! embedding shell.
//!
//! There is no stroke history: the canvas is a flat bitmap mutated in place,
//! which deliberately forecloses undo.

pub mod board;
pub mod config;
pub mod draw;
pub mod export;
pub mod input;
pub mod util;

pub use board::Board;
pub use config::Config;
