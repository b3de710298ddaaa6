//! Palette import/export system.
//!
//! A trait-based set of file formats plus the versioned record schema shared
//! by exchange files and the persistence layer.
//!
//! ## Supported Formats
//!
//! - **JSON payload**: all palettes with ids, names, flags and colors
//! - **Color list (.clr)**: one named list of keyed colors
//!
//! ## Usage
//!
//! ```rust,ignore
//! use pfs_palettes::format::{FormatRegistry, ImportOptions};
//!
//! let registry = FormatRegistry::new();
//! let format = registry.for_file_name("warm.clr").unwrap();
//! let data = format.import(&bytes, &ImportOptions::new().fallback_name("warm"))?;
//! ```

mod error;
pub mod formats;
mod registry;
mod schema;
mod traits;

pub use error::FormatError;
pub use registry::FormatRegistry;
pub use schema::{
    ColorRecord, PaletteRecord, PalettesPayload, decode_palettes, encode_palettes,
};
pub use traits::{
    ExportOptions, ExportResult, FormatWarning, ImportOptions, ImportedData, PaletteFormat,
    WarningSeverity,
};
