//! Folio Core Types and Definitions
//!
//! This crate provides the foundational types shared by the Folio tag-file
//! importer and the HTML renderer. It includes:
//!
//! - **Doc**: The comment AST arena and its visitor ([`doc`] module)
//! - **Entry**: The documentation entry tree that imported symbols merge into ([`entry::Entry`])
//! - **Arguments**: Parsed function argument lists ([`arguments::ArgumentList`])
//! - **Language**: Source language detection by file name ([`language::SrcLang`])
//! - **Symbols**: File definitions, file-name buckets and the anchor dictionary
//!   ([`symbols::SymbolTable`])

pub mod arguments;
pub mod doc;
pub mod entry;
pub mod language;
pub mod symbols;
