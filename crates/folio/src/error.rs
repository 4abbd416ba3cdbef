//! Error types for Folio operations.
//!
//! This module provides the main error type [`FolioError`] which wraps the
//! error conditions of importing tag files.

use std::io;

use thiserror::Error;

use folio_tagfile::error::ParseError;

/// The main error type for Folio operations.
///
/// # Diagnostic Variants
///
/// The `TagFile` variant keeps the tag-file source next to the structured
/// diagnostics, so callers can point at the offending XML.
#[derive(Debug, Error)]
pub enum FolioError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("{err}")]
    TagFile {
        err: ParseError,
        src: String,
        name: String,
    },
}

impl FolioError {
    /// Create a new `TagFile` error with the associated source.
    pub fn new_tag_file_error(
        err: ParseError,
        src: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self::TagFile {
            err,
            src: src.into(),
            name: name.into(),
        }
    }
}
