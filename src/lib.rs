//! pfs-palettes - Color palette management engine
//!
//! Stores named palettes of colors and provides the color-domain operations
//! around them: hex normalization, perceptual metrics, brightness and
//! hue-family ordering, perceptual sampling, and tint/shade generation.
//!
//! ## Layout
//!
//! - [`color`]: color codec, transforms, ordering, sampling, text extraction
//! - [`model`]: palettes, palette colors, built-in palette sets
//! - [`format`]: record schema and the JSON / color-list file formats
//! - [`store`]: the repository, change observers, and persistence backends
//! - [`config`]: user preferences

pub mod color;
pub mod config;
pub mod constants;
pub mod format;
pub mod model;
pub mod store;
