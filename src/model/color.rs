//! Palette color entries.

use std::fmt;

use uuid::Uuid;

use crate::color::{HexColor, Swatch};

/// Stable identifier of a palette color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ColorId(pub Uuid);

impl ColorId {
    /// Generate a fresh random identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ColorId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ColorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A color stored in a palette.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaletteColor {
    /// Unique identifier
    pub id: ColorId,
    /// Normalized value
    pub hex: HexColor,
    /// Optional display name, never empty when present
    pub name: Option<String>,
}

impl PaletteColor {
    /// Create an unnamed color with a fresh identifier.
    pub fn new(hex: HexColor) -> Self {
        Self {
            id: ColorId::new(),
            hex,
            name: None,
        }
    }

    /// Attach a display name. Blank names are dropped.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = clean_name(Some(&name.into()));
        self
    }

    /// Hover text: the hex value, followed by the name when there is one.
    pub fn tooltip_text(&self) -> String {
        match &self.name {
            Some(name) => format!("{} • {}", self.hex, name),
            None => self.hex.to_string(),
        }
    }

    /// Name if present, otherwise the hex value.
    pub fn label(&self) -> &str {
        self.name.as_deref().unwrap_or(self.hex.as_str())
    }
}

impl Swatch for PaletteColor {
    fn hex(&self) -> &HexColor {
        &self.hex
    }
}

/// A color as supplied from outside, before validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewColor {
    /// Raw hex text, not yet normalized
    pub hex: String,
    /// Raw name, possibly blank
    pub name: Option<String>,
}

impl NewColor {
    /// An unnamed color.
    pub fn new(hex: impl Into<String>) -> Self {
        Self {
            hex: hex.into(),
            name: None,
        }
    }

    /// A named color.
    pub fn named(hex: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            hex: hex.into(),
            name: Some(name.into()),
        }
    }
}

impl From<&PaletteColor> for NewColor {
    fn from(color: &PaletteColor) -> Self {
        Self {
            hex: color.hex.to_string(),
            name: color.name.clone(),
        }
    }
}

impl From<HexColor> for NewColor {
    fn from(hex: HexColor) -> Self {
        Self {
            hex: hex.to_string(),
            name: None,
        }
    }
}

/// Trim a name; blank names become `None`.
pub fn clean_name(name: Option<&str>) -> Option<String> {
    name.map(str::trim)
        .filter(|n| !n.is_empty())
        .map(str::to_string)
}
