//! @ai:module:intent Define error types for property parsing and crate operations
//! @ai:module:layer domain
//! @ai:module:public_api ParseError, ParseErrorKind, Error, Result
//! @ai:module:stateless true

use serde::Serialize;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// @ai:intent First error raised while parsing one entity annotation
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("wrong property marker used, expected `{expected}`")]
    WrongPropertyMarker { expected: &'static str },

    #[error("invalid simple property `{name}`")]
    InvalidSimpleProperty { name: String },

    #[error("invalid complex main property `{name}`")]
    InvalidComplexMainProperty { name: String },

    #[error("invalid sub-property `{value}` at index {index} of `{property}`")]
    InvalidComplexSubProperty {
        property: String,
        index: usize,
        value: String,
    },

    #[error("missing sub-property close encloser")]
    SubPropertyEndEncloserMissing,

    #[error("missing property separator after sub-property close encloser")]
    PropertySeparatorMissing,
}

/// @ai:intent Payload-free discriminant of a parse outcome, `None` when no error is recorded
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ParseErrorKind {
    #[default]
    None,
    WrongPropertyMarker,
    InvalidSimpleProperty,
    InvalidComplexMainProperty,
    InvalidComplexSubProperty,
    SubPropertyEndEncloserMissing,
    PropertySeparatorMissing,
}

impl ParseError {
    /// @ai:intent Get the discriminant of this error
    /// @ai:effects pure
    pub fn kind(&self) -> ParseErrorKind {
        match self {
            ParseError::WrongPropertyMarker { .. } => ParseErrorKind::WrongPropertyMarker,
            ParseError::InvalidSimpleProperty { .. } => ParseErrorKind::InvalidSimpleProperty,
            ParseError::InvalidComplexMainProperty { .. } => {
                ParseErrorKind::InvalidComplexMainProperty
            }
            ParseError::InvalidComplexSubProperty { .. } => {
                ParseErrorKind::InvalidComplexSubProperty
            }
            ParseError::SubPropertyEndEncloserMissing => {
                ParseErrorKind::SubPropertyEndEncloserMissing
            }
            ParseError::PropertySeparatorMissing => ParseErrorKind::PropertySeparatorMissing,
        }
    }
}

impl ParseErrorKind {
    /// @ai:intent Stable snake_case identifier used in reports
    pub fn as_str(&self) -> &'static str {
        match self {
            ParseErrorKind::None => "none",
            ParseErrorKind::WrongPropertyMarker => "wrong_property_marker",
            ParseErrorKind::InvalidSimpleProperty => "invalid_simple_property",
            ParseErrorKind::InvalidComplexMainProperty => "invalid_complex_main_property",
            ParseErrorKind::InvalidComplexSubProperty => "invalid_complex_sub_property",
            ParseErrorKind::SubPropertyEndEncloserMissing => "sub_property_end_encloser_missing",
            ParseErrorKind::PropertySeparatorMissing => "property_separator_missing",
        }
    }

    pub fn is_none(&self) -> bool {
        *self == ParseErrorKind::None
    }
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// @ai:intent Unified error type for configuration, I/O and parsing operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid TOML: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Failed to write TOML: {0}")]
    TomlWrite(#[from] toml::ser::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid grammar settings: {0}")]
    InvalidSettings(String),

    #[error("Invalid rule `{name}`: {message}")]
    InvalidRule { name: String, message: String },

    #[error("Unknown entity kind: {0}")]
    UnknownEntityKind(String),

    #[error(transparent)]
    Parse(#[from] ParseError),
}

pub type Result<T> = std::result::Result<T, Error>;
