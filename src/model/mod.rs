//! Data models for palettes and their colors.

mod color;
mod palette;

pub use color::{ColorId, NewColor, PaletteColor, clean_name};
pub use palette::{Palette, PaletteId, builtin_palettes, sanitize_colors, starter_palette};
