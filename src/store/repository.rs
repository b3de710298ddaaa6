//! Palette repository.
//!
//! Every change to a [`PaletteCollection`] goes through here. Mutators return
//! whether they were applied; refused operations (deleting the last palette,
//! renaming a system-managed one, adding a duplicate color, ...) leave the
//! state untouched and notify nobody.

use std::fmt;
use std::path::Path;

use crate::color::{
    DropPayload, HexColor, Rgb, SortMode, UnitRgb, adjust, extract_hex_colors, normalize,
    sample_colors, sort_colors, tint_shade_scale,
};
use crate::constants::STARRED_PALETTE_NAME;
use crate::format::{
    ExportOptions, ExportResult, FormatError, FormatRegistry, ImportOptions, ImportedData,
    PaletteFormat, PaletteRecord, PalettesPayload,
};
use crate::model::{
    ColorId, NewColor, Palette, PaletteColor, PaletteId, builtin_palettes, clean_name,
    sanitize_colors,
};
use crate::store::collection::{PaletteCollection, unique_name};
use crate::store::observer::{CollectionChange, CollectionObserver};

/// Outcome of a successful file import.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportSummary {
    /// A color list was added as one new palette
    ColorList {
        /// The new palette
        palette: PaletteId,
    },
    /// Palettes from a JSON payload were appended
    Palettes {
        /// Number of palettes added
        count: usize,
    },
}

impl fmt::Display for ImportSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImportSummary::ColorList { .. } => write!(f, "Imported color list."),
            ImportSummary::Palettes { count } => write!(f, "Imported {} palette(s).", count),
        }
    }
}

/// Owner of the palette collection and its observers.
pub struct PaletteRepository {
    collection: PaletteCollection,
    observers: Vec<Box<dyn CollectionObserver>>,
    formats: FormatRegistry,
}

impl PaletteRepository {
    /// Wrap an existing collection.
    pub fn new(collection: PaletteCollection) -> Self {
        Self {
            collection,
            observers: Vec::new(),
            formats: FormatRegistry::new(),
        }
    }

    /// Register an observer for all future changes.
    pub fn subscribe(&mut self, observer: impl CollectionObserver + 'static) {
        self.observers.push(Box::new(observer));
    }

    /// Current state.
    pub fn collection(&self) -> &PaletteCollection {
        &self.collection
    }

    /// All palettes in display order.
    pub fn palettes(&self) -> &[Palette] {
        self.collection.palettes()
    }

    /// Look up a palette.
    pub fn palette(&self, id: PaletteId) -> Option<&Palette> {
        self.collection.get(id)
    }

    /// Identifier of the selected palette.
    pub fn selected_id(&self) -> PaletteId {
        self.collection.selected_id()
    }

    /// The selected palette.
    pub fn selected_palette(&self) -> Option<&Palette> {
        self.collection.selected()
    }

    fn notify(&mut self, change: CollectionChange) {
        log::trace!("Notifying {} observers: {:?}", self.observers.len(), change);
        for observer in &mut self.observers {
            observer.collection_changed(&self.collection, change);
        }
    }

    // ---- Palettes ----

    /// Make `id` the selected palette.
    pub fn select_palette(&mut self, id: PaletteId) -> bool {
        if !self.collection.select(id) {
            return false;
        }
        log::debug!("Selected palette {}", id);
        self.notify(CollectionChange::Selection);
        true
    }

    /// Append a new palette and select it.
    ///
    /// Colors are sanitized and the name made unique; a blank name becomes
    /// "Untitled Palette".
    pub fn add_palette(
        &mut self,
        name: &str,
        colors: impl IntoIterator<Item = NewColor>,
    ) -> PaletteId {
        let palette = Palette::new(
            self.collection.unique_name(name, None),
            sanitize_colors(colors),
        );
        let id = palette.id;
        log::debug!(
            "Added palette '{}' with {} colors",
            palette.name,
            palette.colors.len()
        );

        self.collection.push(palette);
        self.collection.select(id);
        self.notify(CollectionChange::PalettesAndSelection);
        id
    }

    /// Rename a palette. Blank names and system-managed palettes are refused.
    pub fn rename_palette(&mut self, id: PaletteId, name: &str) -> bool {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return false;
        }
        match self.collection.get(id) {
            Some(palette) if !palette.is_system_managed => {}
            _ => return false,
        }

        let new_name = self.collection.unique_name(trimmed, Some(id));
        let Some(palette) = self.collection.get_mut(id) else {
            return false;
        };
        if palette.name == new_name {
            return false;
        }
        log::debug!("Renamed palette '{}' to '{}'", palette.name, new_name);
        palette.name = new_name;
        self.notify(CollectionChange::Palettes);
        true
    }

    /// Rename the selected palette.
    pub fn rename_selected(&mut self, name: &str) -> bool {
        self.rename_palette(self.selected_id(), name)
    }

    /// Delete a palette.
    ///
    /// Refused for the last remaining palette, for system-managed ones, and
    /// for the last palette that is not system-managed. Deleting the selected
    /// palette selects the one now at the same index, or the last palette if
    /// the index ran off the end.
    pub fn delete_palette(&mut self, id: PaletteId) -> bool {
        if self.collection.len() <= 1 {
            return false;
        }
        let Some(index) = self.collection.position(id) else {
            return false;
        };
        if self.collection.palettes()[index].is_system_managed {
            return false;
        }
        if self.manageable_palettes().len() <= 1 {
            return false;
        }

        let was_selected = self.selected_id() == id;
        let removed = self.collection.remove(index);
        log::debug!("Deleted palette '{}'", removed.name);

        if was_selected {
            let next = index.min(self.collection.len() - 1);
            let next_id = self.collection.palettes()[next].id;
            self.collection.select(next_id);
            self.notify(CollectionChange::PalettesAndSelection);
        } else {
            self.notify(CollectionChange::Palettes);
        }
        true
    }

    /// Delete the selected palette.
    pub fn delete_selected(&mut self) -> bool {
        self.delete_palette(self.selected_id())
    }

    /// Flip a palette's favorite flag.
    pub fn toggle_favorite(&mut self, id: PaletteId) -> bool {
        let Some(palette) = self.collection.get_mut(id) else {
            return false;
        };
        palette.is_favorite = !palette.is_favorite;
        self.notify(CollectionChange::Palettes);
        true
    }

    /// Palettes marked as favorite.
    pub fn favorite_palettes(&self) -> Vec<&Palette> {
        self.palettes().iter().filter(|p| p.is_favorite).collect()
    }

    /// Palettes the user may rename or delete.
    pub fn manageable_palettes(&self) -> Vec<&Palette> {
        self.palettes()
            .iter()
            .filter(|p| !p.is_system_managed)
            .collect()
    }

    // ---- Colors of the selected palette ----

    /// Add a color to the selected palette.
    ///
    /// Invalid input and colors already present are ignored.
    pub fn add_color(&mut self, hex: &str) -> bool {
        match normalize(hex) {
            Ok(hex) => self.add_hex_colors(vec![hex]) == 1,
            Err(e) => {
                log::debug!("{}", e);
                false
            }
        }
    }

    /// Add every hex color found in `text`, in order. Returns how many were new.
    pub fn add_colors_from_text(&mut self, text: &str) -> usize {
        self.add_hex_colors(extract_hex_colors(text))
    }

    /// Add a color picked from a native color panel.
    pub fn add_native_color(&mut self, color: UnitRgb) -> bool {
        self.add_hex_colors(vec![Rgb::from_unit(color).to_hex()]) == 1
    }

    /// Add the colors carried by dropped items.
    ///
    /// Returns whether any item carried a usable color, even if all of them
    /// were already in the palette.
    pub fn handle_drop(&mut self, payloads: &[DropPayload]) -> bool {
        let colors: Vec<HexColor> = payloads.iter().flat_map(DropPayload::colors).collect();
        let handled = !colors.is_empty();
        self.add_hex_colors(colors);
        handled
    }

    fn add_hex_colors(&mut self, colors: Vec<HexColor>) -> usize {
        let Some(palette) = self.collection.selected_mut() else {
            return 0;
        };

        let mut added = 0;
        for hex in colors {
            if palette.contains_hex(&hex) {
                continue;
            }
            palette.colors.push(PaletteColor::new(hex));
            added += 1;
        }

        if added > 0 {
            log::debug!("Added {} colors to '{}'", added, palette.name);
            self.notify(CollectionChange::Palettes);
        }
        added
    }

    /// Change a color of the selected palette.
    ///
    /// Refused for invalid hex input, unknown ids, and a hex value that
    /// another color of the palette already has.
    pub fn update_color(&mut self, id: ColorId, new_hex: &str, new_name: Option<&str>) -> bool {
        let Ok(hex) = normalize(new_hex) else {
            return false;
        };
        let name = clean_name(new_name);
        let Some(palette) = self.collection.selected_mut() else {
            return false;
        };
        if palette.colors.iter().any(|c| c.id != id && c.hex == hex) {
            return false;
        }
        let Some(color) = palette.colors.iter_mut().find(|c| c.id == id) else {
            return false;
        };
        if color.hex == hex && color.name == name {
            return false;
        }

        color.hex = hex;
        color.name = name;
        self.notify(CollectionChange::Palettes);
        true
    }

    /// Remove a color from the selected palette.
    pub fn remove_color(&mut self, id: ColorId) -> bool {
        let Some(palette) = self.collection.selected_mut() else {
            return false;
        };
        let before = palette.colors.len();
        palette.colors.retain(|c| c.id != id);
        if palette.colors.len() == before {
            return false;
        }
        self.notify(CollectionChange::Palettes);
        true
    }

    /// Colors of the selected palette in display order.
    pub fn sorted_colors(&self, mode: SortMode) -> Vec<PaletteColor> {
        self.selected_palette()
            .map(|p| sort_colors(&p.colors, mode))
            .unwrap_or_default()
    }

    // ---- Derived palettes ----

    /// Preview a perceptual subset of the selected palette.
    pub fn sample_colors(&self, count: usize) -> Vec<PaletteColor> {
        self.selected_palette()
            .map(|p| sample_colors(&p.colors, count))
            .unwrap_or_default()
    }

    /// Create "<name> (<count> colors)" from a sample of the selected palette.
    pub fn sample_and_create(&mut self, count: usize) -> Option<PaletteId> {
        let palette = self.selected_palette()?;
        let sampled = sample_colors(&palette.colors, count);
        if sampled.is_empty() {
            return None;
        }
        let name = format!("{} ({} colors)", palette.name, count);
        let colors: Vec<NewColor> = sampled.iter().map(NewColor::from).collect();
        Some(self.add_palette(&name, colors))
    }

    /// Create a tinted (`value > 0`) or shaded (`value < 0`) copy of the
    /// selected palette. `value` is clamped to `[-1, 1]`.
    pub fn create_tint_shade_palette(&mut self, value: f64) -> Option<PaletteId> {
        if !value.is_finite() {
            return None;
        }
        let value = value.clamp(-1.0, 1.0);
        let palette = self.selected_palette()?;
        if palette.colors.is_empty() {
            return None;
        }

        let colors: Vec<NewColor> = palette
            .colors
            .iter()
            .map(|c| NewColor {
                hex: adjust(&c.hex, value).to_string(),
                name: c.name.clone(),
            })
            .collect();
        let kind = if value >= 0.0 { "tint" } else { "shade" };
        let name = format!(
            "{} ({} {}%)",
            palette.name,
            kind,
            (value.abs() * 100.0).round()
        );
        Some(self.add_palette(&name, colors))
    }

    /// Create "<color> Scale" from the tint/shade scale of one color.
    pub fn create_scale_palette(
        &mut self,
        color: ColorId,
        value: f64,
        steps: usize,
    ) -> Option<PaletteId> {
        let color = self.selected_palette()?.color(color)?;
        let scale = tint_shade_scale(&color.hex, value, steps);
        if scale.is_empty() {
            return None;
        }
        let name = format!("{} Scale", color.label());
        Some(self.add_palette(&name, scale.into_iter().map(NewColor::from)))
    }

    // ---- Starred colors ----

    /// The system-managed palette of starred colors, if created yet.
    pub fn starred_palette(&self) -> Option<&Palette> {
        self.palettes().iter().find(|p| p.is_system_managed)
    }

    /// Whether `hex` is in the starred palette.
    pub fn is_color_starred(&self, hex: &str) -> bool {
        match (normalize(hex), self.starred_palette()) {
            (Ok(hex), Some(starred)) => starred.contains_hex(&hex),
            _ => false,
        }
    }

    /// Star or unstar a color. Returns the new starred state, or `None` for
    /// invalid input.
    ///
    /// The starred palette is created on first use without changing the
    /// selection, and is kept when it becomes empty.
    pub fn toggle_star_color(&mut self, hex: &str) -> Option<bool> {
        let hex = normalize(hex).ok()?;
        let name = self
            .selected_palette()
            .and_then(|p| p.colors.iter().find(|c| c.hex == hex))
            .and_then(|c| c.name.clone());

        let existing = self.starred_palette().map(|p| p.id);
        let starred_id = match existing {
            Some(id) => id,
            None => {
                let name = self.collection.unique_name(STARRED_PALETTE_NAME, None);
                let mut palette = Palette::new(name, Vec::new());
                palette.is_system_managed = true;
                let id = palette.id;
                log::debug!("Created '{}' palette", palette.name);
                self.collection.push(palette);
                id
            }
        };

        let palette = self.collection.get_mut(starred_id)?;
        let starred = match palette.colors.iter().position(|c| c.hex == hex) {
            Some(index) => {
                palette.colors.remove(index);
                false
            }
            None => {
                palette.colors.push(PaletteColor {
                    id: ColorId::new(),
                    hex,
                    name,
                });
                true
            }
        };

        self.notify(CollectionChange::Palettes);
        Some(starred)
    }

    // ---- Import / export ----

    /// Append palettes, never merging into existing ones.
    ///
    /// Each palette gets a fresh id, a name unique among existing and
    /// already-imported palettes, and sanitized colors. The last one is
    /// selected. Returns how many were added.
    pub fn import_palettes(&mut self, records: impl IntoIterator<Item = PaletteRecord>) -> usize {
        let mut taken = self.collection.taken_names(None);
        let mut last = None;
        let mut count = 0;

        for record in records {
            let name = unique_name(&record.name, &taken);
            taken.insert(name.to_lowercase());

            let mut palette = Palette::new(
                name,
                sanitize_colors(record.colors.into_iter().map(NewColor::from)),
            );
            palette.is_favorite = record.is_favorite;
            last = Some(palette.id);
            self.collection.push(palette);
            count += 1;
        }

        let Some(last) = last else {
            return 0;
        };
        self.collection.select(last);
        log::info!("Imported {} palettes", count);
        self.notify(CollectionChange::PalettesAndSelection);
        count
    }

    /// Import the curated built-in palettes.
    pub fn add_builtin_palettes(&mut self) -> usize {
        self.import_palettes(builtin_palettes().iter().map(PaletteRecord::from))
    }

    /// Import file contents, choosing the format from the file name.
    ///
    /// The whole file is decoded before anything changes, so a failed import
    /// leaves the collection as it was.
    pub fn import_bytes(
        &mut self,
        file_name: &str,
        bytes: &[u8],
    ) -> Result<ImportSummary, FormatError> {
        let format = self
            .formats
            .for_file_name(file_name)
            .ok_or_else(|| FormatError::unsupported_format(file_name))?;
        let stem = Path::new(file_name)
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or_default();
        let data = format.import(bytes, &ImportOptions::new().fallback_name(stem))?;

        let summary = match data {
            ImportedData::ColorList { name, colors } => ImportSummary::ColorList {
                palette: self.add_palette(&name, colors),
            },
            ImportedData::Palettes(records) => ImportSummary::Palettes {
                count: self.import_palettes(records),
            },
        };
        log::info!("{} ({})", summary, file_name);
        Ok(summary)
    }

    /// All palettes as a versioned payload.
    pub fn export_payload(&self) -> PalettesPayload {
        PalettesPayload::new(self.palettes())
    }

    /// Encode for a file name: every palette for JSON, the selected palette
    /// for single-palette formats.
    pub fn export_bytes(&self, file_name: &str) -> Result<(Vec<u8>, ExportResult), FormatError> {
        let format = self
            .formats
            .for_file_name(file_name)
            .ok_or_else(|| FormatError::unsupported_format(file_name))?;
        self.export_with(format)
    }

    /// The selected palette as a color list.
    pub fn export_selected_color_list(&self) -> Result<(Vec<u8>, ExportResult), FormatError> {
        let format = self
            .formats
            .get("clr")
            .ok_or_else(|| FormatError::unsupported_format("clr"))?;
        self.export_with(format)
    }

    fn export_with(
        &self,
        format: &dyn PaletteFormat,
    ) -> Result<(Vec<u8>, ExportResult), FormatError> {
        let options = ExportOptions::new().pretty(true);
        if format.supports_multiple() {
            return format.export(self.palettes(), &options);
        }
        let selected = self.selected_palette().ok_or_else(|| {
            FormatError::UnsupportedOperation("no palette is selected".to_string())
        })?;
        format.export(std::slice::from_ref(selected), &options)
    }
}

impl Default for PaletteRepository {
    fn default() -> Self {
        Self::new(PaletteCollection::seeded())
    }
}
