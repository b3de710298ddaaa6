//! Tint and shade generation.

use crate::color::codec::{HexColor, Rgb, UnitRgb};

/// Blend a color toward white. `amount` is clamped to `[0, 1]`; 1 is pure white.
pub fn tint(color: &HexColor, amount: f64) -> HexColor {
    let factor = amount.clamp(0.0, 1.0);
    let UnitRgb { r, g, b } = color.rgb().to_unit();
    let blend = |c: f64| c + (1.0 - c) * factor;
    Rgb::from_unit(UnitRgb::new(blend(r), blend(g), blend(b))).to_hex()
}

/// Blend a color toward black. `amount` is clamped to `[0, 1]`; 1 is pure black.
pub fn shade(color: &HexColor, amount: f64) -> HexColor {
    let factor = 1.0 - amount.clamp(0.0, 1.0);
    let UnitRgb { r, g, b } = color.rgb().to_unit();
    Rgb::from_unit(UnitRgb::new(r * factor, g * factor, b * factor)).to_hex()
}

/// Apply a signed adjustment: negative values shade, non-negative values tint.
pub fn adjust(color: &HexColor, value: f64) -> HexColor {
    let value = value.clamp(-1.0, 1.0);
    if value >= 0.0 {
        tint(color, value)
    } else {
        shade(color, -value)
    }
}

/// Generate a tint/shade gradient of `steps` colors.
///
/// Positions are spaced evenly from -1 (black) to +1 (white), shifted by
/// `value` and clamped, so `value = 0` puts the unchanged color at the center.
pub fn tint_shade_scale(color: &HexColor, value: f64, steps: usize) -> Vec<HexColor> {
    match steps {
        0 => Vec::new(),
        1 => vec![adjust(color, value)],
        _ => {
            let step_size = 2.0 / (steps - 1) as f64;
            (0..steps)
                .map(|i| {
                    let position = -1.0 + i as f64 * step_size;
                    adjust(color, position + value)
                })
                .collect()
        }
    }
}
