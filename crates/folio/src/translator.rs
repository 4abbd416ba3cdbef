//! Locale-specific headings used by the HTML output.

use folio_core::doc::{ParamSectKind, SimpleSectKind};

/// Headings the renderer needs from the output language.
pub trait Translator {
    /// Heading of a simple section; empty for sections with a user title.
    fn simple_sect(&self, kind: SimpleSectKind) -> &str;

    /// Heading of a parameter section.
    fn param_sect(&self, kind: ParamSectKind) -> &str;

    fn classes(&self) -> &str;

    fn namespaces(&self) -> &str;

    fn files(&self) -> &str;

    fn related_pages(&self) -> &str;
}

/// English headings.
#[derive(Debug, Clone, Copy, Default)]
pub struct English;

impl Translator for English {
    fn simple_sect(&self, kind: SimpleSectKind) -> &str {
        match kind {
            SimpleSectKind::See => "See also",
            SimpleSectKind::Return => "Returns",
            SimpleSectKind::Author => "Author",
            SimpleSectKind::Authors => "Authors",
            SimpleSectKind::Version => "Version",
            SimpleSectKind::Since => "Since",
            SimpleSectKind::Date => "Date",
            SimpleSectKind::Note => "Note",
            SimpleSectKind::Warning => "Warning",
            SimpleSectKind::Pre => "Precondition",
            SimpleSectKind::Post => "Postcondition",
            SimpleSectKind::Copyright => "Copyright",
            SimpleSectKind::Invar => "Invariant",
            SimpleSectKind::Remark => "Remarks",
            SimpleSectKind::Attention => "Attention",
            SimpleSectKind::User | SimpleSectKind::Rcs | SimpleSectKind::Unknown => "",
        }
    }

    fn param_sect(&self, kind: ParamSectKind) -> &str {
        match kind {
            ParamSectKind::Param => "Parameters",
            ParamSectKind::RetVal => "Return values",
            ParamSectKind::Exception => "Exceptions",
            ParamSectKind::TemplateParam => "Template Parameters",
        }
    }

    fn classes(&self) -> &str {
        "Classes"
    }

    fn namespaces(&self) -> &str {
        "Namespaces"
    }

    fn files(&self) -> &str {
        "Files"
    }

    fn related_pages(&self) -> &str {
        "Related Pages"
    }
}
