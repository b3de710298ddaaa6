//! Trait definitions for palette file formats.

use crate::format::error::FormatError;
use crate::format::schema::PaletteRecord;
use crate::model::{NewColor, Palette};

/// Trait for palette import/export implementations.
///
/// Formats work on in-memory bytes; reading and writing files is left to
/// the caller so that a failed decode never touches repository state.
pub trait PaletteFormat: Send + Sync {
    /// Unique identifier for this format (e.g., "json", "clr").
    fn id(&self) -> &'static str;

    /// Human-readable name for UI display.
    fn display_name(&self) -> &'static str;

    /// File extensions this format uses, without the dot.
    fn extensions(&self) -> &[&'static str];

    /// Whether one file can carry several palettes.
    fn supports_multiple(&self) -> bool;

    /// Encode palettes to bytes.
    fn export(
        &self,
        palettes: &[Palette],
        options: &ExportOptions,
    ) -> Result<(Vec<u8>, ExportResult), FormatError>;

    /// Decode file contents. Nothing is applied until the whole file parsed.
    fn import(&self, bytes: &[u8], options: &ImportOptions) -> Result<ImportedData, FormatError>;
}

/// Options for export operations.
#[derive(Debug, Clone, Default)]
pub struct ExportOptions {
    /// Pretty-print text formats.
    pub pretty: bool,
}

impl ExportOptions {
    /// Create new export options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable pretty printing.
    pub fn pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }
}

/// Options for import operations.
#[derive(Debug, Clone, Default)]
pub struct ImportOptions {
    /// Name to use when the file itself does not carry one (usually the file stem).
    pub fallback_name: Option<String>,
}

impl ImportOptions {
    /// Create new import options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the fallback palette name.
    pub fn fallback_name(mut self, name: impl Into<String>) -> Self {
        self.fallback_name = Some(name.into());
        self
    }
}

/// Decoded file contents, ready to be applied to a repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportedData {
    /// Whole palettes, merged additively
    Palettes(Vec<PaletteRecord>),
    /// A single named list of colors, added as one new palette
    ColorList {
        /// Palette name to use
        name: String,
        /// Colors in file order
        colors: Vec<NewColor>,
    },
}

/// Result of an export operation.
#[derive(Debug, Default)]
pub struct ExportResult {
    /// Number of palettes written.
    pub palettes_exported: usize,

    /// Number of colors written.
    pub colors_exported: usize,

    /// Warnings generated during export (e.g., skipped colors).
    pub warnings: Vec<FormatWarning>,
}

impl ExportResult {
    /// Create a new export result.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a warning to the result.
    pub fn add_warning(&mut self, warning: FormatWarning) {
        self.warnings.push(warning);
    }

    /// Check if there were any warnings.
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// Warning generated during format conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatWarning {
    /// Human-readable warning message.
    pub message: String,

    /// Severity level of the warning.
    pub severity: WarningSeverity,
}

impl FormatWarning {
    /// Create a new warning.
    pub fn new(message: impl Into<String>, severity: WarningSeverity) -> Self {
        Self {
            message: message.into(),
            severity,
        }
    }

    /// Create an info-level warning.
    pub fn info(message: impl Into<String>) -> Self {
        Self::new(message, WarningSeverity::Info)
    }

    /// Create a warning-level warning.
    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(message, WarningSeverity::Warning)
    }
}

/// Severity level for format warnings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WarningSeverity {
    /// Informational message, not a problem.
    Info,
    /// Something was skipped or modified.
    Warning,
}
