//! Format registry for discovering and accessing palette formats.

use std::collections::HashMap;
use std::path::Path;

use crate::format::formats::{ColorListFormat, JsonPayloadFormat};
use crate::format::traits::PaletteFormat;

/// Registry of available palette formats.
///
/// All built-in formats are registered automatically on creation.
pub struct FormatRegistry {
    formats: HashMap<&'static str, Box<dyn PaletteFormat>>,
}

impl FormatRegistry {
    /// Identifier of the native format.
    pub const NATIVE_ID: &'static str = "json";

    /// Create a new registry with all built-in formats registered.
    pub fn new() -> Self {
        let mut registry = Self {
            formats: HashMap::new(),
        };

        registry.register(Box::new(JsonPayloadFormat));
        registry.register(Box::new(ColorListFormat));

        registry
    }

    /// Register a format implementation.
    pub fn register(&mut self, format: Box<dyn PaletteFormat>) {
        self.formats.insert(format.id(), format);
    }

    /// Get a format by its ID.
    pub fn get(&self, id: &str) -> Option<&dyn PaletteFormat> {
        self.formats.get(id).map(|f| f.as_ref())
    }

    /// Find the format registered for a file extension (case-insensitive).
    pub fn by_extension(&self, ext: &str) -> Option<&dyn PaletteFormat> {
        let ext = ext.to_ascii_lowercase();
        self.formats
            .values()
            .find(|f| f.extensions().iter().any(|e| *e == ext))
            .map(|f| f.as_ref())
    }

    /// Pick the format for a file name. Unknown extensions use the native format.
    pub fn for_file_name(&self, file_name: &str) -> Option<&dyn PaletteFormat> {
        Path::new(file_name)
            .extension()
            .and_then(|ext| ext.to_str())
            .and_then(|ext| self.by_extension(ext))
            .or_else(|| self.get(Self::NATIVE_ID))
    }

    /// Get all format IDs, sorted.
    pub fn ids(&self) -> Vec<&'static str> {
        let mut ids: Vec<_> = self.formats.keys().copied().collect();
        ids.sort_unstable();
        ids
    }
}

impl Default for FormatRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_formats() {
        let registry = FormatRegistry::new();

        assert!(registry.get("json").is_some());
        assert!(registry.get("clr").is_some());
        assert_eq!(registry.ids(), vec!["clr", "json"]);
    }

    #[test]
    fn test_lookup_by_file_name() {
        let registry = FormatRegistry::new();

        assert_eq!(registry.for_file_name("mine.clr").map(|f| f.id()), Some("clr"));
        assert_eq!(registry.for_file_name("MINE.CLR").map(|f| f.id()), Some("clr"));
        assert_eq!(registry.for_file_name("all.json").map(|f| f.id()), Some("json"));
        assert_eq!(registry.for_file_name("backup").map(|f| f.id()), Some("json"));
        assert_eq!(registry.for_file_name("notes.txt").map(|f| f.id()), Some("json"));
    }

    #[test]
    fn test_multiple_support() {
        let registry = FormatRegistry::new();
        assert!(registry.get("json").is_some_and(|f| f.supports_multiple()));
        assert!(registry.get("clr").is_some_and(|f| !f.supports_multiple()));
    }
}
