//! Color-domain engine: parsing, metrics, transforms, ordering and sampling.

mod codec;
mod extract;
mod ordering;
mod sampler;
mod transform;

pub use codec::{ColorError, HexColor, Hsb, Rgb, UnitRgb, normalize, relative_luminance};
pub use extract::{DropPayload, extract_hex_colors};
pub use ordering::{SortMode, hue_before, sort_colors};
pub use sampler::sample_colors;
pub use transform::{adjust, shade, tint, tint_shade_scale};

/// Anything that carries a normalized color.
///
/// Ordering and sampling are generic over this so they work on bare
/// [`HexColor`] values and on palette entries alike.
pub trait Swatch {
    /// The color's canonical hex value.
    fn hex(&self) -> &HexColor;
}

impl Swatch for HexColor {
    fn hex(&self) -> &HexColor {
        self
    }
}
