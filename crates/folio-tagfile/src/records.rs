//! Accumulator records filled in while a tag file is read.
//!
//! Each compound kind has its own flat record. The handler keeps one record
//! per kind under construction and appends it to [`TagRecords`] when the
//! closing `</compound>` is seen.

use folio_core::entry::{BaseInfo, Protection, Specifier};

use crate::span::Span;

/// A linkable anchor inside a documentation page (`<docanchor>`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagAnchorInfo {
    pub label: String,
    pub file_name: String,
    pub title: String,
    pub span: Span,
}

/// An enum value nested inside an enumeration member.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagEnumValueInfo {
    pub name: String,
    pub file: String,
    pub anchor: String,
    pub clang_id: String,
}

/// A member of any compound.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagMemberInfo {
    pub ty: String,
    pub name: String,
    pub anchor_file: String,
    pub anchor: String,
    pub arglist: String,
    pub kind: String,
    pub clang_id: String,
    pub doc_anchors: Vec<TagAnchorInfo>,
    pub protection: Protection,
    pub virt: Specifier,
    pub is_static: bool,
    pub enum_values: Vec<TagEnumValueInfo>,
}

/// The class-like compound kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassKind {
    Class,
    Struct,
    Union,
    Interface,
    Exception,
    Protocol,
    Category,
    Enum,
    Service,
    Singleton,
}

impl ClassKind {
    /// Class kind named by a compound `kind` attribute.
    pub fn from_compound_kind(kind: &str) -> Option<Self> {
        let kind = match kind {
            "class" => ClassKind::Class,
            "struct" => ClassKind::Struct,
            "union" => ClassKind::Union,
            "interface" => ClassKind::Interface,
            "exception" => ClassKind::Exception,
            "protocol" => ClassKind::Protocol,
            "category" => ClassKind::Category,
            "enum" => ClassKind::Enum,
            "service" => ClassKind::Service,
            "singleton" => ClassKind::Singleton,
            _ => return None,
        };
        Some(kind)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagClassInfo {
    pub kind: ClassKind,
    pub name: String,
    pub filename: String,
    pub clang_id: String,
    pub doc_anchors: Vec<TagAnchorInfo>,
    /// Moved into the merged entry by the list builder.
    pub bases: Option<Vec<BaseInfo>>,
    pub members: Vec<TagMemberInfo>,
    /// Moved into the merged entry by the list builder.
    pub template_arguments: Option<Vec<String>>,
    pub class_list: Vec<String>,
    pub is_objc: bool,
}

impl TagClassInfo {
    pub fn new(kind: ClassKind) -> Self {
        Self {
            kind,
            name: String::new(),
            filename: String::new(),
            clang_id: String::new(),
            doc_anchors: Vec::new(),
            bases: None,
            members: Vec::new(),
            template_arguments: None,
            class_list: Vec::new(),
            is_objc: false,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagNamespaceInfo {
    pub name: String,
    pub filename: String,
    pub clang_id: String,
    pub class_list: Vec<String>,
    pub namespace_list: Vec<String>,
    pub doc_anchors: Vec<TagAnchorInfo>,
    pub members: Vec<TagMemberInfo>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagPackageInfo {
    pub name: String,
    pub filename: String,
    pub doc_anchors: Vec<TagAnchorInfo>,
    pub members: Vec<TagMemberInfo>,
    pub class_list: Vec<String>,
}

/// An `<includes>` edge of a file compound.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagIncludeInfo {
    /// Output file base of the included file.
    pub id: String,
    pub name: String,
    pub text: String,
    pub is_local: bool,
    pub is_imported: bool,
    pub span: Span,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagFileInfo {
    pub name: String,
    pub path: String,
    pub filename: String,
    pub doc_anchors: Vec<TagAnchorInfo>,
    pub members: Vec<TagMemberInfo>,
    pub class_list: Vec<String>,
    pub namespace_list: Vec<String>,
    pub includes: Vec<TagIncludeInfo>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagGroupInfo {
    pub name: String,
    pub title: String,
    pub filename: String,
    pub doc_anchors: Vec<TagAnchorInfo>,
    pub members: Vec<TagMemberInfo>,
    pub subgroup_list: Vec<String>,
    pub class_list: Vec<String>,
    pub namespace_list: Vec<String>,
    pub file_list: Vec<String>,
    pub page_list: Vec<String>,
    pub dir_list: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagPageInfo {
    pub name: String,
    pub title: String,
    pub filename: String,
    pub doc_anchors: Vec<TagAnchorInfo>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagDirInfo {
    pub name: String,
    pub filename: String,
    pub path: String,
    pub subdir_list: Vec<String>,
    pub file_list: Vec<String>,
    pub doc_anchors: Vec<TagAnchorInfo>,
}

/// Every compound read from one tag file, in document order per kind.
#[derive(Debug, Clone, Default)]
pub struct TagRecords {
    pub(crate) classes: Vec<TagClassInfo>,
    pub(crate) files: Vec<TagFileInfo>,
    pub(crate) namespaces: Vec<TagNamespaceInfo>,
    pub(crate) groups: Vec<TagGroupInfo>,
    pub(crate) pages: Vec<TagPageInfo>,
    pub(crate) packages: Vec<TagPackageInfo>,
    pub(crate) dirs: Vec<TagDirInfo>,
}

impl TagRecords {
    pub fn classes(&self) -> &[TagClassInfo] {
        &self.classes
    }

    pub fn files(&self) -> &[TagFileInfo] {
        &self.files
    }

    pub fn namespaces(&self) -> &[TagNamespaceInfo] {
        &self.namespaces
    }

    pub fn groups(&self) -> &[TagGroupInfo] {
        &self.groups
    }

    pub fn pages(&self) -> &[TagPageInfo] {
        &self.pages
    }

    pub fn packages(&self) -> &[TagPackageInfo] {
        &self.packages
    }

    pub fn dirs(&self) -> &[TagDirInfo] {
        &self.dirs
    }

    /// Total number of compounds.
    pub fn len(&self) -> usize {
        self.classes.len()
            + self.files.len()
            + self.namespaces.len()
            + self.groups.len()
            + self.pages.len()
            + self.packages.len()
            + self.dirs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_class_kind_from_compound_kind() {
        assert_eq!(ClassKind::from_compound_kind("struct"), Some(ClassKind::Struct));
        assert_eq!(
            ClassKind::from_compound_kind("singleton"),
            Some(ClassKind::Singleton)
        );
        assert_eq!(ClassKind::from_compound_kind("file"), None);
        assert_eq!(ClassKind::from_compound_kind("Class"), None);
    }

    #[test]
    fn test_records_len() {
        let mut records = TagRecords::default();
        assert!(records.is_empty());

        records.classes.push(TagClassInfo::new(ClassKind::Class));
        records.pages.push(TagPageInfo::default());
        assert_eq!(records.len(), 2);
    }
}
