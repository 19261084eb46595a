//! Parser error types

use headergen_core::ParsingError;
use std::path::PathBuf;
use thiserror::Error;

/// The front-end could not produce a translation unit
#[derive(Error, Debug)]
pub enum FrontEndError {
    #[error("no translation unit available for {0}")]
    MissingTranslationUnit(PathBuf),

    #[error("failed to read AST dump {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed AST dump {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("front-end rejected {path}: {reason}")]
    Rejected { path: PathBuf, reason: String },
}

/// A file could not be turned into a usable [`FileParsingResult`](headergen_core::FileParsingResult)
#[derive(Error, Debug)]
pub enum FileParsingFailure {
    /// Fatal for the file: no entity is produced
    #[error("failed to create a translation unit for {path}: {source}")]
    FrontEnd {
        path: PathBuf,
        #[source]
        source: FrontEndError,
    },

    /// Entity errors while parsing was configured to abort on the first one
    #[error("{} parsing error(s) in {path}{}", .errors.len(), first_error(.errors))]
    Entities {
        path: PathBuf,
        errors: Vec<ParsingError>,
    },
}

impl FileParsingFailure {
    pub fn path(&self) -> &std::path::Path {
        match self {
            FileParsingFailure::FrontEnd { path, .. } | FileParsingFailure::Entities { path, .. } => {
                path
            }
        }
    }
}

fn first_error(errors: &[ParsingError]) -> String {
    errors
        .first()
        .map(|e| format!(", first: {e}"))
        .unwrap_or_default()
}
