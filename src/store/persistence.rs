//! Key-value persistence for the palette collection.
//!
//! The collection is stored under two keys: the encoded palette list and the
//! selected palette's identifier. Backends only move strings; encoding lives
//! in [`crate::format`].

use std::cell::RefCell;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use thiserror::Error;
use uuid::Uuid;

use crate::constants::{PALETTES_KEY, SELECTED_PALETTE_KEY};
use crate::format::{decode_palettes, encode_palettes};
use crate::model::PaletteId;
use crate::store::collection::PaletteCollection;
use crate::store::observer::{CollectionChange, CollectionObserver};

/// Errors raised by storage backends.
#[derive(Error, Debug)]
pub enum StorageError {
    /// File system failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Encoding the collection failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Backend-specific failure (e.g. browser storage unavailable)
    #[error("Storage error: {0}")]
    Backend(String),
}

/// A string key-value store.
pub trait KeyValueStore {
    /// Read a value; `Ok(None)` when the key was never written.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Write a value, replacing any previous one.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// In-memory store. Clones share the same map.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.values.borrow().get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.values
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Directory-backed store writing one `<key>.json` file per key.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Store files in `dir`, created on first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// The platform data directory for this application.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn default_dir() -> Option<PathBuf> {
        dirs::data_dir()
            .or_else(|| dirs::home_dir().map(|h| h.join(".local").join("share")))
            .map(|d| d.join("pfs-palettes"))
    }

    /// Directory holding the files.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path_for(key);
        if !path.exists() {
            return Ok(None);
        }
        Ok(Some(std::fs::read_to_string(path)?))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        std::fs::create_dir_all(&self.dir)?;
        std::fs::write(self.path_for(key), value)?;
        Ok(())
    }
}

/// Browser `localStorage` store.
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStorageStore;

#[cfg(target_arch = "wasm32")]
impl LocalStorageStore {
    fn storage() -> Result<web_sys::Storage, StorageError> {
        web_sys::window()
            .ok_or_else(|| StorageError::Backend("No window object available".to_string()))?
            .local_storage()
            .map_err(|e| StorageError::Backend(format!("localStorage access error: {:?}", e)))?
            .ok_or_else(|| StorageError::Backend("localStorage not available".to_string()))
    }
}

#[cfg(target_arch = "wasm32")]
impl KeyValueStore for LocalStorageStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Self::storage()?
            .get_item(key)
            .map_err(|e| StorageError::Backend(format!("Failed to read {}: {:?}", key, e)))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        Self::storage()?
            .set_item(key, value)
            .map_err(|e| StorageError::Backend(format!("Failed to write {}: {:?}", key, e)))
    }
}

/// Load the collection from a store.
///
/// Missing, unreadable or empty palette data yields the starter palette. The
/// stored selection is used only when it names a loaded palette.
pub fn load_collection(store: &impl KeyValueStore) -> PaletteCollection {
    let palettes = match store.get(PALETTES_KEY) {
        Ok(Some(json)) => decode_palettes(&json).unwrap_or_else(|e| {
            log::warn!("Stored palettes could not be decoded, starting fresh: {}", e);
            Vec::new()
        }),
        Ok(None) => {
            log::debug!("No stored palettes, seeding starter palette");
            Vec::new()
        }
        Err(e) => {
            log::warn!("Failed to read stored palettes: {}", e);
            Vec::new()
        }
    };

    let selected = store
        .get(SELECTED_PALETTE_KEY)
        .ok()
        .flatten()
        .and_then(|raw| Uuid::parse_str(raw.trim()).ok())
        .map(PaletteId);

    let collection = PaletteCollection::new(palettes, selected);
    log::info!("Loaded {} palettes", collection.len());
    collection
}

/// Write the parts of the collection named by `change`.
pub fn save_collection(
    store: &mut impl KeyValueStore,
    collection: &PaletteCollection,
    change: CollectionChange,
) -> Result<(), StorageError> {
    if change.palettes_changed() {
        store.set(PALETTES_KEY, &encode_palettes(collection.palettes())?)?;
    }
    if change.selection_changed() {
        store.set(SELECTED_PALETTE_KEY, &collection.selected_id().to_string())?;
    }
    log::trace!("Saved collection ({:?})", change);
    Ok(())
}

/// Observer that saves the collection after every change.
///
/// Save failures are logged and otherwise ignored; the in-memory state stays
/// authoritative.
#[derive(Debug)]
pub struct PersistOnChange<S> {
    store: S,
    failed_saves: usize,
}

impl<S: KeyValueStore> PersistOnChange<S> {
    /// Persist into `store`.
    pub fn new(store: S) -> Self {
        Self {
            store,
            failed_saves: 0,
        }
    }

    /// Number of saves that failed so far.
    pub fn failed_saves(&self) -> usize {
        self.failed_saves
    }
}

impl<S: KeyValueStore> CollectionObserver for PersistOnChange<S> {
    fn collection_changed(&mut self, collection: &PaletteCollection, change: CollectionChange) {
        if let Err(e) = save_collection(&mut self.store, collection, change) {
            self.failed_saves += 1;
            log::warn!("Failed to save palettes: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Palette, starter_palette};

    struct BrokenStore;

    impl KeyValueStore for BrokenStore {
        fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Err(StorageError::Backend("offline".to_string()))
        }

        fn set(&mut self, _key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::Backend("offline".to_string()))
        }
    }

    fn two_palettes() -> PaletteCollection {
        let second = Palette::new("Second", Vec::new());
        let id = second.id;
        PaletteCollection::new(vec![starter_palette(), second], Some(id))
    }

    #[test]
    fn test_memory_store_clones_share_values() {
        let mut store = MemoryStore::new();
        let view = store.clone();
        store.set("k", "v").unwrap();
        assert_eq!(view.get("k").unwrap().as_deref(), Some("v"));
        assert_eq!(view.get("other").unwrap(), None);
    }

    #[test]
    fn test_save_then_load() {
        let mut store = MemoryStore::new();
        let collection = two_palettes();
        save_collection(&mut store, &collection, CollectionChange::PalettesAndSelection).unwrap();

        let loaded = load_collection(&store);
        assert_eq!(loaded, collection);
    }

    #[test]
    fn test_save_only_touches_changed_keys() {
        let mut store = MemoryStore::new();
        save_collection(&mut store, &two_palettes(), CollectionChange::Selection).unwrap();
        assert!(store.get(PALETTES_KEY).unwrap().is_none());
        assert!(store.get(SELECTED_PALETTE_KEY).unwrap().is_some());
    }

    #[test]
    fn test_load_seeds_when_missing_or_bad() {
        let loaded = load_collection(&MemoryStore::new());
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded.palettes()[0].name, "Starter Palette");

        let mut store = MemoryStore::new();
        store.set(PALETTES_KEY, "{ broken").unwrap();
        assert_eq!(load_collection(&store).palettes()[0].name, "Starter Palette");

        store.set(PALETTES_KEY, "[]").unwrap();
        assert_eq!(load_collection(&store).len(), 1);

        assert_eq!(load_collection(&BrokenStore).len(), 1);
    }

    #[test]
    fn test_load_ignores_unknown_selection() {
        let mut store = MemoryStore::new();
        let collection = two_palettes();
        save_collection(&mut store, &collection, CollectionChange::Palettes).unwrap();
        store.set(SELECTED_PALETTE_KEY, "not-a-uuid").unwrap();

        let loaded = load_collection(&store);
        assert_eq!(loaded.selected_id(), collection.palettes()[0].id);
    }

    #[test]
    fn test_load_reads_legacy_records() {
        let mut store = MemoryStore::new();
        let json = r##"[{
            "id": "3F2504E0-4F89-11D3-9A0C-0305E82C3301",
            "name": "Old",
            "colors": [
                {"id": "4F2504E0-4F89-11D3-9A0C-0305E82C3301", "hex": "#fff", "name": null},
                {"id": "5F2504E0-4F89-11D3-9A0C-0305E82C3301", "hex": "ffffff", "name": null}
            ]
        }]"##;
        store.set(PALETTES_KEY, json).unwrap();
        store
            .set(SELECTED_PALETTE_KEY, "3F2504E0-4F89-11D3-9A0C-0305E82C3301")
            .unwrap();

        let loaded = load_collection(&store);
        let palette = loaded.selected().unwrap();
        assert_eq!(palette.name, "Old");
        assert_eq!(palette.colors.len(), 1);
        assert_eq!(palette.colors[0].hex.as_str(), "#FFFFFF");
        assert!(!palette.is_favorite);
    }

    #[test]
    fn test_persist_on_change_swallows_failures() {
        let mut observer = PersistOnChange::new(BrokenStore);
        observer.collection_changed(&two_palettes(), CollectionChange::Palettes);
        observer.collection_changed(&two_palettes(), CollectionChange::Selection);
        assert_eq!(observer.failed_saves(), 2);
    }

    #[test]
    fn test_file_store_round_trip() {
        let dir = std::env::temp_dir().join(format!("pfs-store-{}", Uuid::new_v4()));
        let mut store = FileStore::new(&dir);
        assert_eq!(store.get(PALETTES_KEY).unwrap(), None);

        store.set(PALETTES_KEY, "[]").unwrap();
        assert_eq!(store.get(PALETTES_KEY).unwrap().as_deref(), Some("[]"));
        assert!(dir.join("pfsPalettes.palettes.json").exists());

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
