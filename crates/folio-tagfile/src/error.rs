//! Error and diagnostic system for the tag-file reader.
//!
//! Tag-file parsing is permissive: schema violations are recorded as
//! warnings and reading continues, as are includes that do not resolve
//! during the merge. Only malformed XML stops a tag file.
//!
//! # Overview
//!
//! A [`Diagnostic`] is a single error or warning with an optional
//! [`ErrorCode`], labelled byte spans into the tag file and help text.
//! [`ParseError`] wraps the diagnostics of a tag file that could not be
//! read.
//!
//! # Example
//!
//! ```
//! # use folio_tagfile::error::{Diagnostic, ErrorCode};
//! # use folio_tagfile::Span;
//!
//! let diag = Diagnostic::warning("unexpected tag `base` found")
//!     .with_code(ErrorCode::T101)
//!     .with_label(Span::new(40..46), "only valid inside a class compound")
//!     .with_help("move the element into a class, struct or union compound");
//! ```

mod collector;
mod diagnostic;
mod error_code;
mod label;
mod parse_error;
mod severity;

pub(crate) use collector::DiagnosticCollector;

pub use diagnostic::Diagnostic;
pub use error_code::ErrorCode;
pub use label::Label;
pub use parse_error::ParseError;
pub use severity::Severity;
