//! The palette collection: an ordered list of palettes plus a selection.

use std::collections::HashSet;

use crate::constants::UNTITLED_PALETTE_NAME;
use crate::model::{Palette, PaletteId, starter_palette};

/// Ordered palettes and the currently selected one.
///
/// The collection is never empty and the selection always names one of its
/// palettes. Only [`PaletteRepository`](crate::store::PaletteRepository)
/// mutates it.
#[derive(Debug, Clone, PartialEq)]
pub struct PaletteCollection {
    palettes: Vec<Palette>,
    selected: PaletteId,
}

impl PaletteCollection {
    /// Build a collection from loaded palettes.
    ///
    /// An empty list is replaced by the starter palette. A selection that does
    /// not name a palette falls back to the first one.
    pub fn new(palettes: Vec<Palette>, selected: Option<PaletteId>) -> Self {
        let palettes = if palettes.is_empty() {
            vec![starter_palette()]
        } else {
            palettes
        };

        let selected = selected
            .filter(|id| palettes.iter().any(|p| p.id == *id))
            .unwrap_or(palettes[0].id);

        Self { palettes, selected }
    }

    /// A fresh collection holding only the starter palette.
    pub fn seeded() -> Self {
        Self::new(Vec::new(), None)
    }

    /// All palettes in display order.
    pub fn palettes(&self) -> &[Palette] {
        &self.palettes
    }

    /// Number of palettes (always at least one).
    pub fn len(&self) -> usize {
        self.palettes.len()
    }

    /// Whether there are no palettes. Never true once constructed.
    pub fn is_empty(&self) -> bool {
        self.palettes.is_empty()
    }

    /// Identifier of the selected palette.
    pub fn selected_id(&self) -> PaletteId {
        self.selected
    }

    /// The selected palette.
    pub fn selected(&self) -> Option<&Palette> {
        self.get(self.selected)
    }

    /// Look up a palette by identifier.
    pub fn get(&self, id: PaletteId) -> Option<&Palette> {
        self.palettes.iter().find(|p| p.id == id)
    }

    /// Index of a palette in display order.
    pub fn position(&self, id: PaletteId) -> Option<usize> {
        self.palettes.iter().position(|p| p.id == id)
    }

    /// Find a palette by name, ignoring case.
    pub fn find_by_name(&self, name: &str) -> Option<&Palette> {
        let wanted = name.trim().to_lowercase();
        self.palettes
            .iter()
            .find(|p| p.name.to_lowercase() == wanted)
    }

    /// Lowercased names of every palette except `excluding`.
    pub fn taken_names(&self, excluding: Option<PaletteId>) -> HashSet<String> {
        self.palettes
            .iter()
            .filter(|p| Some(p.id) != excluding)
            .map(|p| p.name.to_lowercase())
            .collect()
    }

    /// A name based on `name` that no other palette uses.
    pub fn unique_name(&self, name: &str, excluding: Option<PaletteId>) -> String {
        unique_name(name, &self.taken_names(excluding))
    }

    pub(crate) fn get_mut(&mut self, id: PaletteId) -> Option<&mut Palette> {
        self.palettes.iter_mut().find(|p| p.id == id)
    }

    pub(crate) fn selected_mut(&mut self) -> Option<&mut Palette> {
        self.get_mut(self.selected)
    }

    pub(crate) fn push(&mut self, palette: Palette) {
        self.palettes.push(palette);
    }

    pub(crate) fn remove(&mut self, index: usize) -> Palette {
        self.palettes.remove(index)
    }

    /// Select a palette; false if the id is unknown or already selected.
    pub(crate) fn select(&mut self, id: PaletteId) -> bool {
        if self.selected == id || self.get(id).is_none() {
            return false;
        }
        self.selected = id;
        true
    }
}

impl Default for PaletteCollection {
    fn default() -> Self {
        Self::seeded()
    }
}

/// Resolve a palette name against a set of lowercased names in use.
///
/// The name is trimmed; a blank name becomes "Untitled Palette". On a
/// collision ` 2`, ` 3`, ... is appended until the name is free.
pub fn unique_name(name: &str, taken: &HashSet<String>) -> String {
    let trimmed = name.trim();
    let base = if trimmed.is_empty() {
        UNTITLED_PALETTE_NAME
    } else {
        trimmed
    };

    let mut candidate = base.to_string();
    let mut counter = 2;
    while taken.contains(&candidate.to_lowercase()) {
        candidate = format!("{} {}", base, counter);
        counter += 1;
    }
    candidate
}

#[cfg(test)]
mod tests {
    use super::*;

    fn taken(names: &[&str]) -> HashSet<String> {
        names.iter().map(|n| n.to_lowercase()).collect()
    }

    #[test]
    fn test_unique_name_suffixes() {
        assert_eq!(unique_name("Foo", &taken(&[])), "Foo");
        assert_eq!(unique_name("Foo", &taken(&["Foo"])), "Foo 2");
        assert_eq!(unique_name("foo", &taken(&["FOO", "Foo 2"])), "foo 3");
        assert_eq!(unique_name("  Bar  ", &taken(&["baz"])), "Bar");
    }

    #[test]
    fn test_unique_name_blank() {
        assert_eq!(unique_name("   ", &taken(&[])), "Untitled Palette");
        assert_eq!(
            unique_name("", &taken(&["untitled palette"])),
            "Untitled Palette 2"
        );
    }

    #[test]
    fn test_empty_collection_is_seeded() {
        let collection = PaletteCollection::new(Vec::new(), None);
        assert_eq!(collection.len(), 1);
        assert_eq!(
            collection.selected().map(|p| p.name.as_str()),
            Some("Starter Palette")
        );
    }

    #[test]
    fn test_unknown_selection_falls_back_to_first() {
        let a = Palette::new("A", Vec::new());
        let b = Palette::new("B", Vec::new());
        let first = a.id;
        let second = b.id;

        let collection = PaletteCollection::new(vec![a.clone(), b.clone()], Some(PaletteId::new()));
        assert_eq!(collection.selected_id(), first);

        let collection = PaletteCollection::new(vec![a, b], Some(second));
        assert_eq!(collection.selected_id(), second);
    }

    #[test]
    fn test_taken_names_excludes() {
        let a = Palette::new("Alpha", Vec::new());
        let id = a.id;
        let collection = PaletteCollection::new(vec![a, Palette::new("Beta", Vec::new())], None);

        assert_eq!(collection.unique_name("alpha", None), "alpha 2");
        assert_eq!(collection.unique_name("alpha", Some(id)), "alpha");
        assert_eq!(collection.find_by_name(" BETA ").map(|p| p.name.as_str()), Some("Beta"));
    }
}
