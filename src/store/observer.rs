//! Change notification for palette collections.

use crate::store::collection::PaletteCollection;

/// What part of the collection a mutation touched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollectionChange {
    /// Palette list or palette contents changed
    Palettes,
    /// Only the selected palette changed
    Selection,
    /// Palette list changed and a different palette was selected
    PalettesAndSelection,
}

impl CollectionChange {
    /// Whether the palette list needs saving.
    pub fn palettes_changed(self) -> bool {
        matches!(self, Self::Palettes | Self::PalettesAndSelection)
    }

    /// Whether the selection needs saving.
    pub fn selection_changed(self) -> bool {
        matches!(self, Self::Selection | Self::PalettesAndSelection)
    }
}

/// Receives the new state after every applied repository mutation.
///
/// Refused operations do not notify.
pub trait CollectionObserver {
    /// Called once per applied mutation.
    fn collection_changed(&mut self, collection: &PaletteCollection, change: CollectionChange);
}

impl<F> CollectionObserver for F
where
    F: FnMut(&PaletteCollection, CollectionChange),
{
    fn collection_changed(&mut self, collection: &PaletteCollection, change: CollectionChange) {
        (*self)(collection, change)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_change_flags() {
        assert!(CollectionChange::Palettes.palettes_changed());
        assert!(!CollectionChange::Palettes.selection_changed());
        assert!(!CollectionChange::Selection.palettes_changed());
        assert!(CollectionChange::Selection.selection_changed());
        assert!(CollectionChange::PalettesAndSelection.palettes_changed());
        assert!(CollectionChange::PalettesAndSelection.selection_changed());
    }
}
