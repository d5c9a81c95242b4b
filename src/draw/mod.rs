//! Raster drawing primitives (Cairo-based).
//!
//! This module defines the drawing side of the sketch board:
//! - [`Color`]: RGBA color representation with the fixed palette constants
//! - [`Palette`]: the ordered color list the host presents as buttons
//! - [`PaintTarget`]: the rendering contract the input reconciler drives
//! - [`DrawingSurface`]: the Cairo-backed pixel buffer strokes paint into

pub mod color;
pub mod palette;
pub mod surface;
pub mod target;

// Re-export commonly used types at module level
pub use color::Color;
pub use palette::{Palette, Swatch};
pub use surface::{DrawingSurface, ExportFormat, SurfaceError};
pub use target::PaintTarget;
