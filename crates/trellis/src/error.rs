//! Error types for the widget toolkit.
//!
//! Errors here are configuration errors: a required asset could not be
//! loaded or a theme file is malformed. They are raised once, at widget or
//! theme construction time. Routing edge cases (empty child lists, no
//! focused widget) are valid states handled by the dispatcher as no-ops and
//! never surface as errors.

use std::path::PathBuf;

/// Result type alias for toolkit operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while constructing widgets or loading themes.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A texture file could not be read or decoded.
    #[error("failed to load texture '{path}': {source}")]
    Texture {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// A theme file could not be read.
    #[error("failed to read theme '{path}': {source}")]
    ThemeIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A theme file could not be parsed.
    #[error("failed to parse theme '{path}': {source}")]
    ThemeParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// A theme section required by a widget constructor is missing.
    #[error("theme has no section named '{section}'")]
    MissingSection { section: String },

    /// A theme property required by a widget constructor is missing.
    #[error("theme section '{section}' has no property '{property}'")]
    MissingProperty { section: String, property: String },

    /// A theme property value could not be interpreted.
    #[error("invalid value for property '{property}': {message}")]
    InvalidValue { property: String, message: String },

    /// A widget was constructed with no usable frames or images.
    #[error("{0}")]
    InvalidConfiguration(String),
}

impl Error {
    /// Create a texture loading error.
    pub fn texture(path: impl Into<PathBuf>, source: image::ImageError) -> Self {
        Self::Texture {
            path: path.into(),
            source,
        }
    }

    /// Create an invalid-value error.
    pub fn invalid_value(property: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidValue {
            property: property.into(),
            message: message.into(),
        }
    }
}
