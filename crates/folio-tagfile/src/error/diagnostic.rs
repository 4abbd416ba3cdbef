//! The core diagnostic type for tag-file errors and warnings.

use std::fmt;

use crate::{
    error::{Severity, error_code::ErrorCode, label::Label},
    span::Span,
};

/// A diagnostic message with source location information.
///
/// # Example
///
/// ```text
/// warning[T101]: unexpected tag `base` found
///   --> doc/ext.tag:12:7
///    |
/// 12 |       <base>QObject</base>
///    |       ^^^^^^ only valid inside a class compound
/// ```
#[derive(Debug, Clone)]
pub struct Diagnostic {
    severity: Severity,
    code: Option<ErrorCode>,
    message: String,
    labels: Vec<Label>,
    help: Option<String>,
}

impl Diagnostic {
    /// Create an error diagnostic.
    ///
    /// # Example
    ///
    /// ```
    /// # use folio_tagfile::error::{Diagnostic, ErrorCode};
    /// # use folio_tagfile::Span;
    ///
    /// let diag = Diagnostic::error("malformed tag file")
    ///     .with_code(ErrorCode::T001)
    ///     .with_label(Span::new(0..10), "parsing stopped here");
    /// ```
    pub fn error(message: impl Into<String>) -> Self {
        Self::new(Severity::Error, message)
    }

    /// Create a warning diagnostic.
    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, message)
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn code(&self) -> Option<ErrorCode> {
        self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn labels(&self) -> &[Label] {
        &self.labels
    }

    pub fn help(&self) -> Option<&str> {
        self.help.as_deref()
    }

    /// Set the error code.
    pub fn with_code(mut self, code: ErrorCode) -> Self {
        self.code = Some(code);
        self
    }

    /// Add a primary label to this diagnostic.
    pub fn with_label(mut self, span: Span, message: impl Into<String>) -> Self {
        self.labels.push(Label::primary(span, message));
        self
    }

    /// Add a secondary label to this diagnostic.
    pub fn with_secondary_label(mut self, span: Span, message: impl Into<String>) -> Self {
        self.labels.push(Label::secondary(span, message));
        self
    }

    /// Set the help text.
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            severity,
            code: None,
            message: message.into(),
            labels: Vec::new(),
            help: None,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Format: "warning[T100]: message" or "error: message"
        write!(f, "{}", self.severity)?;
        if let Some(code) = self.code {
            write!(f, "[{}]", code)?;
        }
        write!(f, ": {}", self.message)
    }
}

impl std::error::Error for Diagnostic {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diagnostic_new() {
        let diag = Diagnostic::new(Severity::Error, "test error");

        assert!(diag.severity().is_error());
        assert_eq!(diag.message(), "test error");
        assert!(diag.code().is_none());
        assert!(diag.labels().is_empty());
        assert!(diag.help().is_none());
    }

    #[test]
    fn test_diagnostic_builder_chain() {
        let diag = Diagnostic::warning("duplicate anchor `intro`")
            .with_code(ErrorCode::T201)
            .with_label(Span::new(100..120), "duplicate")
            .with_secondary_label(Span::new(50..70), "first registered here")
            .with_help("anchor labels must be unique across tag files");

        assert!(diag.severity().is_warning());
        assert_eq!(diag.code(), Some(ErrorCode::T201));
        assert_eq!(diag.labels().len(), 2);
        assert!(diag.labels()[0].is_primary());
        assert!(diag.labels()[1].is_secondary());
        assert_eq!(
            diag.help(),
            Some("anchor labels must be unique across tag files")
        );
    }

    #[test]
    fn test_diagnostic_display_with_code() {
        let diag = Diagnostic::warning("unknown tag `foo` found").with_code(ErrorCode::T100);

        assert_eq!(diag.to_string(), "warning[T100]: unknown tag `foo` found");
    }

    #[test]
    fn test_diagnostic_display_without_code() {
        let diag = Diagnostic::error("malformed tag file");

        assert_eq!(diag.to_string(), "error: malformed tag file");
    }
}
