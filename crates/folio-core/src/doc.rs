//! Comment AST.
//!
//! A parsed documentation comment is stored as a [`DocTree`]: an arena of
//! nodes addressed by [`NodeId`]. Each node owns its children through the
//! arena's forward edges and keeps a plain index back to its parent, so the
//! tree can be walked in both directions without shared ownership.
//!
//! Node payloads are split in two closed enums:
//!
//! - [`Leaf`] kinds are visited once through [`DocVisitor::visit`].
//! - [`Composite`] kinds get a paired [`DocVisitor::visit_pre`] /
//!   [`DocVisitor::visit_post`] around their children.
//!
//! # Example
//!
//! ```
//! use folio_core::doc::{Composite, DocTree, Leaf, Style, StyleChange};
//!
//! let mut tree = DocTree::new(Composite::Root { single_line: true });
//! let para = tree.append(tree.root(), Composite::Para);
//! tree.append(para, Leaf::StyleChange(StyleChange::new(Style::Bold, true)));
//! tree.append(para, Leaf::Word("word".to_string()));
//! tree.append(para, Leaf::StyleChange(StyleChange::new(Style::Bold, false)));
//!
//! assert_eq!(tree.children(para).len(), 3);
//! ```

mod node;
mod tree;
mod visit;

pub use node::{
    AutoList, Cite, Composite, DiagramFile, DocNode, Formula, HRef, HtmlAttrib, HtmlCell,
    HtmlHeader, HtmlList, HtmlListKind, Image, ImageKind, IncOperator, IncOperatorKind, Include,
    IncludeKind, IndexEntry, Leaf, Link, LinkedWord, ParamDir, ParamList, ParamSect,
    ParamSectKind, Ref, SecRefItem, Section, SimpleSect, SimpleSectKind, Style, StyleChange, Url,
    Verbatim, VerbatimKind, XRefItem,
};
pub use tree::{DocTree, NodeId};
pub use visit::{DocVisitor, walk};
