//! Palette collection state, its repository, and persistence.
//!
//! [`PaletteRepository`] owns the [`PaletteCollection`] and applies every
//! mutation. Observers registered with [`PaletteRepository::subscribe`]
//! receive the new state after each applied change; [`PersistOnChange`]
//! is the observer that writes it through to a [`KeyValueStore`].

mod collection;
mod observer;
mod persistence;
mod repository;

pub use collection::{PaletteCollection, unique_name};
pub use observer::{CollectionChange, CollectionObserver};
#[cfg(target_arch = "wasm32")]
pub use persistence::LocalStorageStore;
pub use persistence::{
    FileStore, KeyValueStore, MemoryStore, PersistOnChange, StorageError, load_collection,
    save_collection,
};
pub use repository::{ImportSummary, PaletteRepository};
