//! Source language detection.

use std::fmt;

/// Programming language of a documented source or code fragment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SrcLang {
    #[default]
    Unknown,
    Idl,
    Java,
    CSharp,
    D,
    Php,
    ObjC,
    Cpp,
    JavaScript,
    Python,
    Fortran,
    Vhdl,
    Xml,
    Tcl,
    Markdown,
}

impl SrcLang {
    /// Language of `name`, which may be a file name or a bare extension
    /// (`".py"`, `"py"`). Unknown and missing extensions fall back to C++.
    pub fn from_file_name(name: &str) -> Self {
        let ext = match name.rfind('.') {
            Some(pos) => &name[pos + 1..],
            None => name,
        };
        Self::from_extension(ext).unwrap_or(SrcLang::Cpp)
    }

    /// Language registered for an extension without the leading dot.
    pub fn from_extension(ext: &str) -> Option<Self> {
        let lang = match ext {
            "idl" | "ddl" | "odl" => SrcLang::Idl,
            "java" => SrcLang::Java,
            "as" | "js" => SrcLang::JavaScript,
            "cs" => SrcLang::CSharp,
            "d" => SrcLang::D,
            "php" | "php4" | "php5" | "inc" | "phtml" => SrcLang::Php,
            "m" | "M" | "mm" => SrcLang::ObjC,
            "c" | "cc" | "cxx" | "cpp" | "c++" | "h" | "hh" | "hxx" | "hpp" | "h++" | "ii"
            | "ixx" | "ipp" | "i++" | "inl" => SrcLang::Cpp,
            "py" | "pyw" => SrcLang::Python,
            "f" | "for" | "f90" | "f95" | "f03" | "f08" => SrcLang::Fortran,
            "vhd" | "vhdl" => SrcLang::Vhdl,
            "xml" => SrcLang::Xml,
            "tcl" => SrcLang::Tcl,
            "md" | "markdown" => SrcLang::Markdown,
            _ => return None,
        };
        Some(lang)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SrcLang::Unknown => "unknown",
            SrcLang::Idl => "idl",
            SrcLang::Java => "java",
            SrcLang::CSharp => "csharp",
            SrcLang::D => "d",
            SrcLang::Php => "php",
            SrcLang::ObjC => "objc",
            SrcLang::Cpp => "cpp",
            SrcLang::JavaScript => "javascript",
            SrcLang::Python => "python",
            SrcLang::Fortran => "fortran",
            SrcLang::Vhdl => "vhdl",
            SrcLang::Xml => "xml",
            SrcLang::Tcl => "tcl",
            SrcLang::Markdown => "markdown",
        }
    }
}

impl fmt::Display for SrcLang {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
