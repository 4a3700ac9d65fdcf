//! Theme loading.
//!
//! A theme is a TOML file with one table per widget kind, each holding
//! string-valued properties:
//!
//! ```toml
//! [button]
//! background_color = "(70, 130, 180)"
//! text_color = "(255, 255, 255)"
//!
//! [picture]
//! image = "assets/background.png"
//! ```
//!
//! The theme resolves these into typed values (colors, sizes, paths) that
//! application code hands to widget constructors. Malformed files and
//! malformed property values fail here, at load/lookup time, never during
//! event dispatch.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use trellis_core::Color;

use crate::error::{Error, Result};

/// Wire shape of a theme file: tables of string properties.
#[derive(Debug, Deserialize)]
#[serde(transparent)]
struct RawTheme(HashMap<String, HashMap<String, String>>);

/// A parsed theme file.
#[derive(Debug, Clone)]
pub struct Theme {
    sections: HashMap<String, Section>,
}

impl Theme {
    /// Load and parse a theme file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| Error::ThemeIo {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&text).map_err(|source| Error::ThemeParse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Parse theme text.
    pub fn parse(text: &str) -> std::result::Result<Self, toml::de::Error> {
        let raw: RawTheme = toml::from_str(text)?;
        let sections = raw
            .0
            .into_iter()
            .map(|(name, properties)| {
                (
                    name.to_ascii_lowercase(),
                    Section {
                        name: name.to_ascii_lowercase(),
                        properties,
                    },
                )
            })
            .collect();
        Ok(Self { sections })
    }

    /// Look up a section by name (case-insensitive).
    pub fn section(&self, name: &str) -> Result<&Section> {
        self.sections
            .get(&name.to_ascii_lowercase())
            .ok_or_else(|| Error::MissingSection {
                section: name.to_string(),
            })
    }

    /// Whether the theme contains a section.
    pub fn has_section(&self, name: &str) -> bool {
        self.sections.contains_key(&name.to_ascii_lowercase())
    }
}

/// One widget-kind table of a theme.
#[derive(Debug, Clone)]
pub struct Section {
    name: String,
    properties: HashMap<String, String>,
}

impl Section {
    /// The section name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Raw string value of a property.
    pub fn get(&self, property: &str) -> Result<&str> {
        self.properties
            .get(property)
            .map(String::as_str)
            .ok_or_else(|| Error::MissingProperty {
                section: self.name.clone(),
                property: property.to_string(),
            })
    }

    /// Property interpreted as a color, written `(r, g, b)` or `(r, g, b, a)`.
    pub fn color(&self, property: &str) -> Result<Color> {
        parse_color(self.get(property)?)
            .ok_or_else(|| Error::invalid_value(property, "expected '(r, g, b [, a])'"))
    }

    /// Property interpreted as an unsigned number.
    pub fn number(&self, property: &str) -> Result<u32> {
        self.get(property)?
            .trim()
            .parse()
            .map_err(|_| Error::invalid_value(property, "expected an unsigned integer"))
    }

    /// Property interpreted as a file path.
    pub fn path(&self, property: &str) -> Result<PathBuf> {
        Ok(PathBuf::from(self.get(property)?))
    }
}

/// Parse a `(r, g, b)` or `(r, g, b, a)` color string.
fn parse_color(text: &str) -> Option<Color> {
    let inner = text.trim().strip_prefix('(')?.strip_suffix(')')?;
    let mut components = inner.split(',').map(|c| c.trim().parse::<u8>());

    let r = components.next()?.ok()?;
    let g = components.next()?.ok()?;
    let b = components.next()?.ok()?;
    let a = match components.next() {
        Some(value) => value.ok()?,
        None => 255,
    };
    if components.next().is_some() {
        return None;
    }
    Some(Color::from_rgba8(r, g, b, a))
}

#[cfg(test)]
mod tests {
    use super::*;

    const THEME: &str = r#"
[button]
background_color = "(70, 130, 180)"
text_color = "(255, 255, 255, 200)"
text_size = "18"

[picture]
image = "assets/background.png"
"#;

    #[test]
    fn parses_sections_and_colors() {
        let theme = Theme::parse(THEME).unwrap();
        let button = theme.section("Button").unwrap();

        assert_eq!(
            button.color("background_color").unwrap(),
            Color::from_rgb8(70, 130, 180)
        );
        assert_eq!(
            button.color("text_color").unwrap(),
            Color::from_rgba8(255, 255, 255, 200)
        );
        assert_eq!(button.number("text_size").unwrap(), 18);
        assert_eq!(
            theme.section("picture").unwrap().path("image").unwrap(),
            PathBuf::from("assets/background.png")
        );
    }

    #[test]
    fn missing_section_and_property() {
        let theme = Theme::parse(THEME).unwrap();
        assert!(matches!(
            theme.section("slider"),
            Err(Error::MissingSection { .. })
        ));
        assert!(matches!(
            theme.section("button").unwrap().get("border_color"),
            Err(Error::MissingProperty { .. })
        ));
    }

    #[test]
    fn rejects_malformed_colors() {
        assert!(parse_color("(1, 2)").is_none());
        assert!(parse_color("(1, 2, 3, 4, 5)").is_none());
        assert!(parse_color("(256, 0, 0)").is_none());
        assert!(parse_color("1, 2, 3").is_none());
        assert_eq!(parse_color("( 10 , 20 , 30 )"), Some(Color::from_rgb8(10, 20, 30)));
    }

    #[test]
    fn load_missing_file_is_io_error() {
        assert!(matches!(
            Theme::load("/nonexistent/theme.toml"),
            Err(Error::ThemeIo { .. })
        ));
    }
}
