//! Global constants for the palette engine

/// Storage key for the encoded palette list
pub const PALETTES_KEY: &str = "pfsPalettes.palettes";

/// Storage key for the selected palette identifier
pub const SELECTED_PALETTE_KEY: &str = "pfsPalettes.selectedPaletteID";

/// Name used when a palette name trims to nothing
pub const UNTITLED_PALETTE_NAME: &str = "Untitled Palette";

/// Name of the system-managed palette holding starred colors
pub const STARRED_PALETTE_NAME: &str = "Starred Colors";

/// Colors with saturation below this are sorted as grays in hue mode
pub const GRAY_SATURATION_THRESHOLD: f64 = 0.1;

/// Hues closer than this many degrees belong to the same hue family
pub const HUE_FAMILY_DEGREES: f64 = 5.0;

/// Default number of steps in a tint/shade scale
pub const DEFAULT_TINT_SHADE_STEPS: usize = 9;

/// Default target size when sampling a palette
pub const DEFAULT_SAMPLE_COUNT: usize = 5;
