//! Versioned record schema for stored and exchanged palettes.
//!
//! Records mirror the on-disk JSON shape and are kept apart from the domain
//! model so that older or hand-edited data can be read leniently:
//!
//! - `isFavorite` and `isSystemManaged` were added after the first release
//!   and default to `false` when absent.
//! - A payload without `version` is treated as version 1.
//! - Color hex strings are stored as given and only normalized when a
//!   record is turned back into a [`Palette`].

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::color::normalize;
use crate::model::{ColorId, NewColor, Palette, PaletteColor, PaletteId, clean_name};

/// A stored color.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorRecord {
    /// Color identifier
    pub id: Uuid,
    /// Hex value, normalized on read
    pub hex: String,
    /// Optional display name
    #[serde(default)]
    pub name: Option<String>,
}

impl ColorRecord {
    /// Create a record with a fresh identifier.
    pub fn new(hex: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            hex: hex.into(),
            name: None,
        }
    }

    /// Set the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

impl From<&PaletteColor> for ColorRecord {
    fn from(color: &PaletteColor) -> Self {
        Self {
            id: color.id.0,
            hex: color.hex.to_string(),
            name: color.name.clone(),
        }
    }
}

impl From<ColorRecord> for NewColor {
    fn from(record: ColorRecord) -> Self {
        NewColor {
            hex: record.hex,
            name: record.name,
        }
    }
}

/// A stored palette.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaletteRecord {
    /// Palette identifier
    pub id: Uuid,
    /// Display name
    pub name: String,
    /// Colors in order
    pub colors: Vec<ColorRecord>,
    /// Favorite flag (absent in older records)
    #[serde(default)]
    pub is_favorite: bool,
    /// System-managed flag (absent in older records)
    #[serde(default)]
    pub is_system_managed: bool,
}

impl PaletteRecord {
    /// Create a record with a fresh identifier.
    pub fn new(name: impl Into<String>, colors: Vec<ColorRecord>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            colors,
            is_favorite: false,
            is_system_managed: false,
        }
    }

    /// Rebuild a palette, keeping stored identifiers.
    ///
    /// Colors are normalized; invalid and repeated hex values are dropped.
    pub fn into_palette(self) -> Palette {
        let mut seen = HashSet::new();
        let mut colors = Vec::with_capacity(self.colors.len());

        for record in self.colors {
            let Ok(hex) = normalize(&record.hex) else {
                log::warn!(
                    "Dropping invalid color '{}' from palette '{}'",
                    record.hex,
                    self.name
                );
                continue;
            };
            if !seen.insert(hex.clone()) {
                continue;
            }
            colors.push(PaletteColor {
                id: ColorId(record.id),
                hex,
                name: clean_name(record.name.as_deref()),
            });
        }

        Palette {
            id: PaletteId(self.id),
            name: self.name,
            colors,
            is_favorite: self.is_favorite,
            is_system_managed: self.is_system_managed,
        }
    }
}

impl From<&Palette> for PaletteRecord {
    fn from(palette: &Palette) -> Self {
        Self {
            id: palette.id.0,
            name: palette.name.clone(),
            colors: palette.colors.iter().map(ColorRecord::from).collect(),
            is_favorite: palette.is_favorite,
            is_system_managed: palette.is_system_managed,
        }
    }
}

/// Exchange file contents: a versioned list of palettes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PalettesPayload {
    /// Payload format version
    #[serde(default = "default_payload_version")]
    pub version: u32,
    /// Exported palettes
    pub palettes: Vec<PaletteRecord>,
}

fn default_payload_version() -> u32 {
    PalettesPayload::CURRENT_VERSION
}

impl PalettesPayload {
    /// Current payload format version.
    pub const CURRENT_VERSION: u32 = 1;

    /// Build a payload from domain palettes.
    pub fn new(palettes: &[Palette]) -> Self {
        Self {
            version: Self::CURRENT_VERSION,
            palettes: palettes.iter().map(PaletteRecord::from).collect(),
        }
    }
}

/// Encode palettes as the stored JSON array.
pub fn encode_palettes(palettes: &[Palette]) -> serde_json::Result<String> {
    let records: Vec<PaletteRecord> = palettes.iter().map(PaletteRecord::from).collect();
    serde_json::to_string(&records)
}

/// Decode the stored JSON array back into palettes.
pub fn decode_palettes(json: &str) -> serde_json::Result<Vec<Palette>> {
    let records: Vec<PaletteRecord> = serde_json::from_str(json)?;
    Ok(records.into_iter().map(PaletteRecord::into_palette).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::starter_palette;

    #[test]
    fn test_missing_flags_default_to_false() {
        let json = r##"{
            "id": "6F9619FF-8B86-D011-B42D-00CF4FC964FF",
            "name": "Old",
            "colors": [{"id": "7F9619FF-8B86-D011-B42D-00CF4FC964FF", "hex": "#abc"}]
        }"##;
        let record: PaletteRecord = serde_json::from_str(json).unwrap();
        assert!(!record.is_favorite);
        assert!(!record.is_system_managed);
        assert_eq!(record.colors[0].name, None);
    }

    #[test]
    fn test_field_names_are_camel_case() {
        let mut record = PaletteRecord::new("Flags", Vec::new());
        record.is_system_managed = true;
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["isSystemManaged"], serde_json::Value::Bool(true));
        assert_eq!(value["isFavorite"], serde_json::Value::Bool(false));
    }

    #[test]
    fn test_into_palette_keeps_ids_and_sanitizes() {
        let record = PaletteRecord::new(
            "Mixed",
            vec![
                ColorRecord::new("#fff").with_name("White"),
                ColorRecord::new("FFFFFF"),
                ColorRecord::new("bogus"),
                ColorRecord::new("#000").with_name(" "),
            ],
        );
        let first_id = record.colors[0].id;
        let palette = record.clone().into_palette();

        assert_eq!(palette.id.0, record.id);
        assert_eq!(palette.colors.len(), 2);
        assert_eq!(palette.colors[0].id.0, first_id);
        assert_eq!(palette.colors[0].hex.as_str(), "#FFFFFF");
        assert_eq!(palette.colors[1].name, None);
    }

    #[test]
    fn test_payload_version_defaults_to_one() {
        let payload: PalettesPayload = serde_json::from_str(r#"{"palettes": []}"#).unwrap();
        assert_eq!(payload.version, 1);
    }

    #[test]
    fn test_encode_decode_palettes() {
        let starter = starter_palette();
        let json = encode_palettes(std::slice::from_ref(&starter)).unwrap();
        let decoded = decode_palettes(&json).unwrap();
        assert_eq!(decoded, vec![starter]);
    }
}
