//! The ParseError type for tag files that could not be read.

use std::fmt;

use crate::error::Diagnostic;

/// Error type for reading a tag file.
///
/// Wraps the fatal diagnostic together with the warnings collected before
/// reading stopped.
#[derive(Debug)]
pub struct ParseError {
    diagnostics: Vec<Diagnostic>,
}

impl ParseError {
    /// Create a new parse error from diagnostics.
    pub fn new(diagnostics: Vec<Diagnostic>) -> Self {
        Self { diagnostics }
    }

    /// Get all diagnostics in this error.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// The diagnostics with error severity.
    pub fn errors(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(|d| d.severity().is_error())
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut errors = self.errors();
        if let Some(first) = errors.next() {
            write!(f, "{}", first)?;
            let rest = self.diagnostics.len() - 1;
            if rest > 0 {
                write!(f, " (+{} more)", rest)?;
            }
        }
        Ok(())
    }
}

impl std::error::Error for ParseError {}

impl From<Diagnostic> for ParseError {
    fn from(diagnostic: Diagnostic) -> Self {
        Self {
            diagnostics: vec![diagnostic],
        }
    }
}

impl From<Vec<Diagnostic>> for ParseError {
    fn from(diagnostics: Vec<Diagnostic>) -> Self {
        Self { diagnostics }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    #[test]
    fn test_parse_error_from_diagnostic() {
        let diag = Diagnostic::error("malformed tag file").with_code(ErrorCode::T001);
        let err: ParseError = diag.into();

        assert_eq!(err.diagnostics().len(), 1);
        assert_eq!(err.diagnostics()[0].message(), "malformed tag file");
    }

    #[test]
    fn test_parse_error_display_single() {
        let err: ParseError = Diagnostic::error("malformed tag file").into();

        assert_eq!(err.to_string(), "error: malformed tag file");
    }

    #[test]
    fn test_parse_error_display_leads_with_error() {
        let diags = vec![
            Diagnostic::warning("unknown tag `foo` found"),
            Diagnostic::error("malformed tag file"),
        ];
        let err: ParseError = diags.into();

        assert_eq!(err.to_string(), "error: malformed tag file (+1 more)");
        assert_eq!(err.errors().count(), 1);
    }
}
