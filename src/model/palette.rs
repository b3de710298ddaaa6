//! Palette data model.

use std::collections::HashSet;
use std::fmt;

use uuid::Uuid;

use crate::color::{HexColor, normalize};
use crate::model::color::{ColorId, NewColor, PaletteColor, clean_name};

/// Stable identifier of a palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PaletteId(pub Uuid);

impl PaletteId {
    /// Generate a fresh random identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for PaletteId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for PaletteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A named, ordered collection of colors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    /// Unique identifier
    pub id: PaletteId,
    /// Display name, unique across the collection (case-insensitive)
    pub name: String,
    /// Colors in user order; no two share a hex value
    pub colors: Vec<PaletteColor>,
    /// Marked as favorite by the user
    pub is_favorite: bool,
    /// Generated by the application; cannot be renamed or deleted
    pub is_system_managed: bool,
}

impl Palette {
    /// Create a user palette. Colors are taken as given.
    pub fn new(name: impl Into<String>, colors: Vec<PaletteColor>) -> Self {
        Self {
            id: PaletteId::new(),
            name: name.into(),
            colors,
            is_favorite: false,
            is_system_managed: false,
        }
    }

    /// Whether a color with this hex value is present.
    pub fn contains_hex(&self, hex: &HexColor) -> bool {
        self.colors.iter().any(|c| &c.hex == hex)
    }

    /// Look up a color by identifier.
    pub fn color(&self, id: ColorId) -> Option<&PaletteColor> {
        self.colors.iter().find(|c| c.id == id)
    }

    /// The median color by luminance, used as the palette's swatch in lists.
    pub fn representative_color(&self) -> Option<&PaletteColor> {
        if self.colors.is_empty() {
            return None;
        }
        let mut by_luminance: Vec<(f64, &PaletteColor)> = self
            .colors
            .iter()
            .map(|c| (c.hex.luminance(), c))
            .collect();
        by_luminance.sort_by(|a, b| b.0.total_cmp(&a.0));
        Some(by_luminance[by_luminance.len() / 2].1)
    }
}

/// Validate incoming colors: normalize each hex, drop unparsable values and
/// later duplicates, trim names. Every kept color gets a fresh identifier.
pub fn sanitize_colors(colors: impl IntoIterator<Item = NewColor>) -> Vec<PaletteColor> {
    let mut seen = HashSet::new();
    let mut result = Vec::new();

    for color in colors {
        let Ok(hex) = normalize(&color.hex) else {
            log::debug!("Dropping invalid color '{}'", color.hex);
            continue;
        };
        if !seen.insert(hex.clone()) {
            continue;
        }
        result.push(PaletteColor {
            id: ColorId::new(),
            hex,
            name: clean_name(color.name.as_deref()),
        });
    }

    result
}

fn from_table(name: &str, hexes: &[&str]) -> Palette {
    Palette::new(name, sanitize_colors(hexes.iter().map(|h| NewColor::new(*h))))
}

/// The palette every new collection starts with.
pub fn starter_palette() -> Palette {
    Palette::new(
        "Starter Palette",
        sanitize_colors([
            NewColor::named("#F5F5F7", "Pearl"),
            NewColor::named("#C3D0DB", "Fog"),
            NewColor::named("#7FA3B8", "Sky"),
            NewColor::named("#436A86", "Slate"),
            NewColor::named("#1F2D3A", "Ink"),
        ]),
    )
}

const BUILTIN_TABLE: &[(&str, &[&str])] = &[
    ("Nature-Grey", &["#E5E5E9", "#C5CAD7", "#96A0B3", "#6E788D", "#435469", "#1C2A43"]),
    ("Nature-Stone", &["#F7F2EF", "#E1DCCA", "#C6C1A5", "#A5A083", "#888365", "#5E5948"]),
    ("Nature-Red", &["#F6CFCA", "#EAA0A5", "#DC6464", "#C5373D", "#9B251C", "#730C0D"]),
    ("Nature-Blue", &["#C5E5FB", "#9BCAE9", "#5497CE", "#016FAE", "#00488D", "#002359"]),
    ("Nature-Yellow", &["#FFEEC1", "#F6DC87", "#E9C64E", "#CA9B24", "#9B740A", "#69540A"]),
    ("Nature-Olive", &["#F3EEB4", "#DCDC64", "#C5C500", "#96A008", "#647314", "#304415"]),
    ("Nature-Green", &["#D7E5C5", "#A1CA78", "#5EB342", "#429130", "#1B6F2A", "#0E3716"]),
    ("Nature-Teal", &["#CAE5EE", "#96CFD3", "#49BCBC", "#0096A0", "#016579", "#003648"]),
    ("Nature-Purple", &["#EAD3E9", "#D4A9CE", "#B778B3", "#A54991", "#7A2473", "#430B4E"]),
    ("Nature-Orange", &["#FBDCBC", "#FCBC7E", "#F29743", "#E96A00", "#B34A00", "#832A00"]),
    ("Nature-Skin Tones", &["#F6E5D3", "#DCBCA1", "#BC9778", "#916954", "#734E3D", "#432A17"]),
    ("5-Color-Option-1", &["#6DCDDD", "#FB954B", "#0092AD", "#FBC797", "#76C692"]),
    (
        "Atlas-1",
        &[
            "#E5191D", "#4376AC", "#4AA75A", "#87648F", "#D77F32", "#727690", "#D690C6",
            "#B17B7D", "#857B74", "#4386BF", "#204B75", "#588257", "#B7DB7B", "#E3BD05",
            "#FA9C93", "#E9358C", "#A1094E", "#999999", "#6FCDDC", "#BD5E95", "#D0AFB2",
            "#8EADCD", "#92CB9C", "#B8A1BC", "#E7BCDD", "#D89FC0",
        ],
    ),
    (
        "Atlas-2",
        &[
            "#A1DAC8", "#9BBBCD", "#7C8EA9", "#DA8F9F", "#BB969F", "#EAC697", "#E4D282",
            "#E4A1AA", "#AFA5B7", "#85C8B0", "#B8D8E9", "#EEC450", "#BD9D42", "#C6E1C5",
            "#78B677",
        ],
    ),
    ("4-Color-Option-1", &["#D7D8D9", "#E6B481", "#DBDB61", "#445598"]),
    (
        "RColorBrewer: Paired",
        &[
            "#A6CEE3", "#1F78B4", "#B2DF8A", "#33A02C", "#FB9A99", "#E31A1C", "#FDBF6F",
            "#FF7F00", "#CAB2D6", "#6A3D9A", "#FFFF99", "#B15928",
        ],
    ),
    ("2-Color-Option-1", &["#87648F", "#D3D478"]),
    ("2-Color-Option-2", &["#6480BB", "#CE6095"]),
    ("2-Color-Option-3", &["#8DCBC1", "#F69A92"]),
];

/// The curated palettes offered as a one-shot import.
pub fn builtin_palettes() -> Vec<Palette> {
    BUILTIN_TABLE
        .iter()
        .map(|(name, hexes)| from_table(name, hexes))
        .collect()
}
