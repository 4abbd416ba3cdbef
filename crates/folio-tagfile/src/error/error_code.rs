//! Error codes for tag-file diagnostics.
//!
//! Error codes are organized by phase:
//! - `T0xx` - XML well-formedness errors
//! - `T1xx` - Schema warnings
//! - `T2xx` - Merge errors and warnings

use std::fmt;

/// Error codes for categorizing diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // =========================================================================
    // XML Errors (T0xx)
    // =========================================================================
    /// Malformed XML.
    ///
    /// The tag file is not well-formed (mismatched end tag, bad attribute
    /// syntax, invalid UTF-8). Reading stops and nothing from the file is
    /// merged.
    T001,

    /// Unknown entity reference.
    ///
    /// An `&name;` reference that is neither predefined nor a character
    /// reference. The reference is dropped from the text.
    T002,

    // =========================================================================
    // Schema Warnings (T1xx)
    // =========================================================================
    /// Unknown tag.
    ///
    /// The element name is not part of the tag-file schema. It is ignored.
    T100,

    /// Unexpected tag.
    ///
    /// The element is known but not valid inside the enclosing compound or
    /// member, e.g. `base` outside a class.
    T101,

    /// Unknown compound kind.
    ///
    /// The `kind` attribute of a `compound` is not one of the supported
    /// kinds. The whole compound is skipped.
    T102,

    // =========================================================================
    // Merge Warnings (T2xx)
    // =========================================================================
    /// Unresolved include.
    ///
    /// A file includes another file that none of the imported tag files
    /// declares. The include edge is left out.
    T200,

    /// Duplicate anchor.
    ///
    /// A `docanchor` label is already registered by another entry. The
    /// first registration is kept.
    T201,
}

impl ErrorCode {
    /// Returns the code as a string (e.g., "T001").
    pub fn as_str(&self) -> &'static str {
        match self {
            // XML errors
            ErrorCode::T001 => "T001",
            ErrorCode::T002 => "T002",
            // Schema warnings
            ErrorCode::T100 => "T100",
            ErrorCode::T101 => "T101",
            ErrorCode::T102 => "T102",
            // Merge warnings
            ErrorCode::T200 => "T200",
            ErrorCode::T201 => "T201",
        }
    }

    /// Returns a short description of what this error code means.
    pub fn description(&self) -> &'static str {
        match self {
            // XML errors
            ErrorCode::T001 => "malformed XML",
            ErrorCode::T002 => "unknown entity reference",
            // Schema warnings
            ErrorCode::T100 => "unknown tag",
            ErrorCode::T101 => "unexpected tag",
            ErrorCode::T102 => "unknown compound kind",
            // Merge warnings
            ErrorCode::T200 => "unresolved include",
            ErrorCode::T201 => "duplicate anchor",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_display() {
        assert_eq!(ErrorCode::T001.to_string(), "T001");
        assert_eq!(ErrorCode::T101.to_string(), "T101");
        assert_eq!(ErrorCode::T200.to_string(), "T200");
    }

    #[test]
    fn test_error_code_description() {
        assert_eq!(ErrorCode::T001.description(), "malformed XML");
        assert_eq!(ErrorCode::T102.description(), "unknown compound kind");
        assert_eq!(ErrorCode::T201.description(), "duplicate anchor");
    }
}
