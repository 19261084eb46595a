//! Error types shared by the headergen crates

use std::path::PathBuf;
use thiserror::Error;

/// Malformed annotation syntax
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PropertyParsingError {
    /// An encloser, bracket or quote is never closed, or closed out of order
    #[error("unbalanced '{encloser}' in \"{text}\"")]
    Unbalanced { encloser: char, text: String },

    /// Two consecutive separators or a leading/trailing separator
    #[error("empty property in \"{0}\"")]
    EmptyProperty(String),

    /// Argument list with no property name in front of it
    #[error("property with arguments has no name: \"{0}\"")]
    EmptyName(String),

    #[error("empty argument in property '{0}'")]
    EmptyArgument(String),

    /// Text after the closing encloser of an argument list
    #[error("unexpected text after the arguments of property '{0}'")]
    TrailingText(String),
}

/// Error recorded while building the entity model of a file
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{}{description}", location_prefix(.file, .line, .column))]
pub struct ParsingError {
    pub description: String,
    pub file: Option<PathBuf>,
    pub line: u32,
    pub column: u32,
}

impl ParsingError {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            file: None,
            line: 0,
            column: 0,
        }
    }

    pub fn at(mut self, file: impl Into<PathBuf>, line: u32, column: u32) -> Self {
        self.file = Some(file.into());
        self.line = line;
        self.column = column;
        self
    }
}

fn location_prefix(file: &Option<PathBuf>, line: &u32, column: &u32) -> String {
    match file {
        Some(file) => format!("{}:{}:{}: ", file.display(), line, column),
        None => String::new(),
    }
}

/// Settings could not be loaded or are inconsistent
#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("failed to read settings file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse settings: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid settings: {0}")]
    Invalid(String),
}
