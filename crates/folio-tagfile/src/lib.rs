//! Folio Tag-File Reader
//!
//! Reads doxygen-style XML tag files and merges their contents into a
//! [`folio_core::entry::Entry`] tree and a [`folio_core::symbols::SymbolTable`].
//!
//! Reading happens in two steps:
//!
//! 1. [`parse`] streams the XML through an event handler that fills one
//!    flat record per compound ([`records`]). Schema violations are kept as
//!    warnings; malformed XML is a [`error::ParseError`].
//! 2. [`TagFile::build_lists`] turns the records into entries. After every
//!    tag file of a project has been merged, [`TagFile::add_includes`]
//!    links the include edges, which may cross tag files.
//!
//! # Example
//!
//! ```
//! use folio_core::{entry::Entry, symbols::SymbolTable};
//!
//! let source = r#"<tagfile>
//!   <compound kind="class">
//!     <name>Widget</name>
//!     <filename>classWidget.html</filename>
//!   </compound>
//! </tagfile>"#;
//!
//! let mut tag_file = folio_tagfile::parse(source, "widgets.tag").unwrap();
//! let mut root = Entry::root();
//! let mut symbols = SymbolTable::new();
//! tag_file.build_lists(&mut root, &mut symbols);
//! assert_eq!(root.children()[0].name, "Widget");
//! ```

mod builder;
pub mod error;
mod handler;
mod reader;
pub mod records;
mod span;
mod tag_file;

pub use reader::parse;
pub use span::{Location, Span};
pub use tag_file::TagFile;
