//! JSON palette payload format.
//!
//! Full-fidelity exchange format: `{ "version": 1, "palettes": [...] }`.
//! Files without a version are read as version 1. Newer versions are read
//! anyway with a warning, since unknown fields are ignored.

use crate::format::error::FormatError;
use crate::format::schema::PalettesPayload;
use crate::format::traits::{
    ExportOptions, ExportResult, FormatWarning, ImportOptions, ImportedData, PaletteFormat,
};
use crate::model::Palette;

/// JSON payload format carrying any number of palettes.
pub struct JsonPayloadFormat;

impl PaletteFormat for JsonPayloadFormat {
    fn id(&self) -> &'static str {
        "json"
    }

    fn display_name(&self) -> &'static str {
        "Palettes (JSON)"
    }

    fn extensions(&self) -> &[&'static str] {
        &["json"]
    }

    fn supports_multiple(&self) -> bool {
        true
    }

    fn export(
        &self,
        palettes: &[Palette],
        options: &ExportOptions,
    ) -> Result<(Vec<u8>, ExportResult), FormatError> {
        let payload = PalettesPayload::new(palettes);
        let json = if options.pretty {
            serde_json::to_vec_pretty(&payload)?
        } else {
            serde_json::to_vec(&payload)?
        };

        let mut result = ExportResult::new();
        result.palettes_exported = palettes.len();
        result.colors_exported = palettes.iter().map(|p| p.colors.len()).sum();

        // Imports never restore the system-managed flag.
        for palette in palettes.iter().filter(|p| p.is_system_managed) {
            result.add_warning(FormatWarning::info(format!(
                "'{}' is exported as a regular palette",
                palette.name
            )));
        }

        log::info!(
            "Exported {} palettes with {} colors",
            result.palettes_exported,
            result.colors_exported
        );

        Ok((json, result))
    }

    fn import(&self, bytes: &[u8], _options: &ImportOptions) -> Result<ImportedData, FormatError> {
        let payload: PalettesPayload = serde_json::from_slice(bytes)?;

        if payload.version > PalettesPayload::CURRENT_VERSION {
            log::warn!(
                "Palette file version {} is newer than supported version {}",
                payload.version,
                PalettesPayload::CURRENT_VERSION
            );
        }

        log::info!(
            "Decoded {} palettes (format version {})",
            payload.palettes.len(),
            payload.version
        );

        Ok(ImportedData::Palettes(payload.palettes))
    }
}
