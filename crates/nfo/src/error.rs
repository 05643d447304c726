// crates/nfo/src/error.rs
//! Error types for NFO decoding and encoding

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result type for NFO operations
pub type NfoResult<T> = Result<T, NfoError>;

/// Errors that can occur while reading or writing NFO files
#[derive(Debug, Error)]
pub enum NfoError {
    /// Failed to read an NFO file
    #[error("Failed to read NFO file at {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Failed to write an NFO file
    #[error("Failed to write NFO file at {path}: {source}")]
    WriteError {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Failed to create the directory an NFO file is written into
    #[error("Failed to create directory at {path}: {source}")]
    DirectoryCreationError {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Malformed XML in a file on disk
    #[error("Invalid XML in {path}: {reason}")]
    ParseError { path: PathBuf, reason: String },

    /// Malformed XML in an in-memory document
    #[error("XML parsing error: {0}")]
    XmlParse(String),

    /// The writer failed to produce XML
    #[error("XML serialization error: {0}")]
    Serialize(String),

    /// The writer failed to produce XML for a file on disk
    #[error("Failed to encode NFO file at {path}: {reason}")]
    EncodeError { path: PathBuf, reason: String },
}

impl From<quick_xml::Error> for NfoError {
    fn from(err: quick_xml::Error) -> Self {
        NfoError::XmlParse(err.to_string())
    }
}

impl From<quick_xml::events::attributes::AttrError> for NfoError {
    fn from(err: quick_xml::events::attributes::AttrError) -> Self {
        NfoError::XmlParse(err.to_string())
    }
}

impl NfoError {
    /// Attaches the originating file path to a path-less parse or
    /// serialization error.
    ///
    /// Errors that already carry a path are returned unchanged.
    pub fn with_path(self, path: &Path) -> Self {
        match self {
            NfoError::XmlParse(reason) => NfoError::ParseError {
                path: path.to_path_buf(),
                reason,
            },
            NfoError::Serialize(reason) => NfoError::EncodeError {
                path: path.to_path_buf(),
                reason,
            },
            other => other,
        }
    }

    /// Returns true for read, write and directory failures
    pub fn is_io(&self) -> bool {
        matches!(
            self,
            NfoError::ReadError { .. }
                | NfoError::WriteError { .. }
                | NfoError::DirectoryCreationError { .. }
        )
    }

    /// Returns true for malformed XML
    pub fn is_parse(&self) -> bool {
        matches!(self, NfoError::ParseError { .. } | NfoError::XmlParse(_))
    }

    /// The file path the error is tagged with, if any
    pub fn path(&self) -> Option<&Path> {
        match self {
            NfoError::ReadError { path, .. }
            | NfoError::WriteError { path, .. }
            | NfoError::DirectoryCreationError { path, .. }
            | NfoError::ParseError { path, .. }
            | NfoError::EncodeError { path, .. } => Some(path),
            NfoError::XmlParse(_) | NfoError::Serialize(_) => None,
        }
    }
}
