//! Palette format implementations.

mod color_list;
mod json;

#[cfg(test)]
mod tests;

pub use color_list::ColorListFormat;
pub use json::JsonPayloadFormat;
