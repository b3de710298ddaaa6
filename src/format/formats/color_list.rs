//! Color-list format (`.clr`).
//!
//! A named list of keyed colors, written as XML:
//!
//! ```xml
//! <?xml version="1.0" encoding="UTF-8"?>
//! <colorlist name="Starter Palette">
//!   <color key="Pearl" red="0.960784" green="0.960784" blue="0.968627"/>
//! </colorlist>
//! ```
//!
//! Components are sRGB in `[0, 1]`. Keys are unique within a list.

use std::collections::HashSet;
use std::io::Write;

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, Event};
use quick_xml::{Reader, Writer};

use crate::color::{Rgb, UnitRgb};
use crate::format::error::FormatError;
use crate::format::traits::{
    ExportOptions, ExportResult, FormatWarning, ImportOptions, ImportedData, PaletteFormat,
};
use crate::model::{NewColor, Palette};

const ROOT_ELEMENT: &str = "colorlist";
const COLOR_ELEMENT: &str = "color";

/// Single-palette color-list format.
pub struct ColorListFormat;

impl PaletteFormat for ColorListFormat {
    fn id(&self) -> &'static str {
        "clr"
    }

    fn display_name(&self) -> &'static str {
        "Color List (.clr)"
    }

    fn extensions(&self) -> &[&'static str] {
        &["clr"]
    }

    fn supports_multiple(&self) -> bool {
        false
    }

    fn export(
        &self,
        palettes: &[Palette],
        _options: &ExportOptions,
    ) -> Result<(Vec<u8>, ExportResult), FormatError> {
        let [palette] = palettes else {
            return Err(FormatError::UnsupportedOperation(format!(
                "a color list holds exactly one palette, got {}",
                palettes.len()
            )));
        };

        let mut result = ExportResult::new();
        let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);

        writer
            .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
            .map_err(|e| FormatError::Xml(e.into()))?;

        let mut root = BytesStart::new(ROOT_ELEMENT);
        root.push_attribute(("name", palette.name.as_str()));
        writer
            .write_event(Event::Start(root))
            .map_err(|e| FormatError::Xml(e.into()))?;

        let mut keys = HashSet::new();
        for color in &palette.colors {
            let key = color.label();
            if !keys.insert(key.to_string()) {
                result.add_warning(FormatWarning::warning(format!(
                    "Skipped {} (key '{}' already used)",
                    color.hex, key
                )));
                continue;
            }
            self.write_color(&mut writer, key, color.hex.rgb())?;
            result.colors_exported += 1;
        }

        writer
            .write_event(Event::End(BytesEnd::new(ROOT_ELEMENT)))
            .map_err(|e| FormatError::Xml(e.into()))?;

        result.palettes_exported = 1;
        log::info!(
            "Exported color list '{}' with {} colors ({} warnings)",
            palette.name,
            result.colors_exported,
            result.warnings.len()
        );

        Ok((writer.into_inner(), result))
    }

    fn import(&self, bytes: &[u8], options: &ImportOptions) -> Result<ImportedData, FormatError> {
        let parsed = std::str::from_utf8(bytes)
            .map_err(|e| e.to_string())
            .and_then(parse_list)
            .map_err(|reason| {
                log::warn!("Rejected color list: {}", reason);
                FormatError::InvalidColorList
            })?;

        let name = parsed
            .name
            .filter(|n| !n.trim().is_empty())
            .or_else(|| options.fallback_name.clone())
            .unwrap_or_default();

        log::info!(
            "Decoded color list '{}' with {} colors",
            name,
            parsed.colors.len()
        );

        Ok(ImportedData::ColorList {
            name,
            colors: parsed.colors,
        })
    }
}

impl ColorListFormat {
    /// Write one keyed color element.
    fn write_color<W: Write>(
        &self,
        writer: &mut Writer<W>,
        key: &str,
        rgb: Rgb,
    ) -> Result<(), FormatError> {
        let unit = rgb.to_unit();
        let red = format!("{:.6}", unit.r);
        let green = format!("{:.6}", unit.g);
        let blue = format!("{:.6}", unit.b);

        let mut element = BytesStart::new(COLOR_ELEMENT);
        element.push_attribute(("key", key));
        element.push_attribute(("red", red.as_str()));
        element.push_attribute(("green", green.as_str()));
        element.push_attribute(("blue", blue.as_str()));

        writer
            .write_event(Event::Empty(element))
            .map_err(|e| FormatError::Xml(e.into()))?;
        Ok(())
    }
}

/// Contents of a parsed color list.
struct ParsedList {
    name: Option<String>,
    colors: Vec<NewColor>,
}

fn parse_list(text: &str) -> Result<ParsedList, String> {
    let mut reader = Reader::from_str(text);
    reader.trim_text(true);

    let mut in_root = false;
    let mut seen_root = false;
    let mut name = None;
    let mut colors = Vec::new();

    loop {
        match reader.read_event() {
            Ok(Event::Start(ref e)) | Ok(Event::Empty(ref e)) => match e.name().as_ref() {
                b"colorlist" => {
                    if seen_root {
                        return Err("more than one <colorlist> element".to_string());
                    }
                    seen_root = true;
                    in_root = true;
                    name = attribute(e, "name")?;
                }
                b"color" if in_root => colors.push(parse_color(e)?),
                _ => {}
            },
            Ok(Event::End(ref e)) => {
                if e.name().as_ref() == b"colorlist" {
                    in_root = false;
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(format!("XML error at {}: {}", reader.buffer_position(), e)),
            _ => {}
        }
    }

    if !seen_root {
        return Err("missing <colorlist> element".to_string());
    }

    Ok(ParsedList { name, colors })
}

fn parse_color(element: &BytesStart<'_>) -> Result<NewColor, String> {
    let key = attribute(element, "key")?.ok_or("color without key")?;
    let component = |attr: &str| -> Result<f64, String> {
        let raw = attribute(element, attr)?.ok_or_else(|| format!("color '{key}' lacks {attr}"))?;
        raw.trim()
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| format!("color '{key}' has invalid {attr} '{raw}'"))
    };

    let unit = UnitRgb::new(component("red")?, component("green")?, component("blue")?);
    let hex = Rgb::from_unit(unit).to_hex();
    Ok(NewColor::named(hex.to_string(), key))
}

fn attribute(element: &BytesStart<'_>, name: &str) -> Result<Option<String>, String> {
    for attr in element.attributes() {
        let attr = attr.map_err(|e| e.to_string())?;
        if attr.key.as_ref() == name.as_bytes() {
            let value = attr.unescape_value().map_err(|e| e.to_string())?;
            return Ok(Some(value.into_owned()));
        }
    }
    Ok(None)
}
