//! The documentation entry tree.
//!
//! An [`Entry`] is the format-agnostic record of one documented symbol:
//! a class, file, namespace, member, page and so on. Imported tag files and
//! natively parsed sources both produce entries; they are merged under a
//! single root and later turned into output pages.

use std::fmt;

use crate::{arguments::ArgumentList, language::SrcLang};

/// What kind of symbol an [`Entry`] documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Section {
    #[default]
    Empty,
    Class,
    Namespace,
    Package,
    GroupDoc,
    PageDoc,
    MainPageDoc,
    Source,
    Header,
    Define,
    Variable,
    Enum,
    Function,
}

const SOURCE_EXTENSIONS: &[&str] = &[
    ".c", ".cc", ".cxx", ".cpp", ".c++", ".java", ".ii", ".ixx", ".ipp", ".i++", ".inl", ".xml",
    ".m", ".mm", ".py", ".cs", ".d", ".php", ".js",
];

const HEADER_EXTENSIONS: &[&str] = &[
    ".h", ".hh", ".hxx", ".hpp", ".h++", ".idl", ".ddl", ".pidl", ".ice",
];

impl Section {
    /// Section of a file entry, derived from the file's extension.
    pub fn for_file_name(name: &str) -> Self {
        let lower = name.to_ascii_lowercase();
        if SOURCE_EXTENSIONS.iter().any(|ext| lower.ends_with(ext)) {
            Section::Source
        } else if HEADER_EXTENSIONS.iter().any(|ext| lower.ends_with(ext)) {
            Section::Header
        } else {
            Section::Empty
        }
    }

    pub fn is_file(&self) -> bool {
        matches!(self, Section::Source | Section::Header)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Section::Empty => "empty",
            Section::Class => "class",
            Section::Namespace => "namespace",
            Section::Package => "package",
            Section::GroupDoc => "group",
            Section::PageDoc => "page",
            Section::MainPageDoc => "mainpage",
            Section::Source => "source",
            Section::Header => "header",
            Section::Define => "define",
            Section::Variable => "variable",
            Section::Enum => "enum",
            Section::Function => "function",
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A class-level trait (`struct`, `protocol`, scoped enum, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Trait {
    Struct,
    Union,
    Interface,
    Enum,
    Exception,
    Protocol,
    Category,
    Service,
    Singleton,
    Strong,
}

impl Trait {
    fn bit(self) -> u16 {
        1 << (self as u16)
    }
}

/// Set of [`Trait`]s attached to an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Traits(u16);

impl Traits {
    pub fn set(&mut self, t: Trait) {
        self.0 |= t.bit();
    }

    pub fn has(&self, t: Trait) -> bool {
        self.0 & t.bit() != 0
    }

    pub fn clear(&mut self) {
        self.0 = 0;
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }
}

impl From<Trait> for Traits {
    fn from(t: Trait) -> Self {
        let mut traits = Traits::default();
        traits.set(t);
        traits
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Protection {
    #[default]
    Public,
    Protected,
    Private,
    Package,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Specifier {
    #[default]
    Normal,
    Virtual,
    Pure,
}

/// Flavour of a function or variable member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MemberType {
    #[default]
    Method,
    Signal,
    Slot,
    Dcop,
    Property,
    Event,
}

/// Where an imported entry lives in the external documentation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagInfo {
    pub tag_name: String,
    pub file_name: String,
    pub anchor: String,
}

/// A base class of a class entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaseInfo {
    pub name: String,
    pub protection: Protection,
    pub virt: Specifier,
}

impl BaseInfo {
    pub fn new(name: impl Into<String>, protection: Protection, virt: Specifier) -> Self {
        Self {
            name: name.into(),
            protection,
            virt,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GroupPri {
    #[default]
    InGroup,
    AddToGroup,
    DefGroup,
}

/// Membership of an entry in a documentation group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grouping {
    pub group_name: String,
    pub pri: GroupPri,
}

/// A labelled anchor inside a documentation page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SectionInfo {
    pub label: String,
    pub file_name: String,
    pub title: String,
    /// Tag file the anchor was imported from.
    pub tag_name: String,
}

/// A node of the entry tree.
///
/// The fields mirror what a documentation parser collects for a symbol and
/// are public so importers can fill them in directly. Children are owned by
/// their parent and added through [`Entry::add_sub_entry`].
#[derive(Debug, Clone, Default)]
pub struct Entry {
    pub section: Section,
    pub name: String,
    pub ty: String,
    pub args: String,
    pub arg_list: Option<ArgumentList>,
    pub template_arg_lists: Vec<ArgumentList>,
    pub extends: Vec<BaseInfo>,
    pub traits: Traits,
    pub protection: Protection,
    pub virt: Specifier,
    pub is_static: bool,
    pub member_type: MemberType,
    pub file_name: String,
    pub id: String,
    pub lang: SrcLang,
    pub tag_info: Option<TagInfo>,
    pub anchors: Vec<SectionInfo>,
    pub groups: Vec<Grouping>,
    children: Vec<Entry>,
}

impl Entry {
    pub fn new(section: Section, name: impl Into<String>) -> Self {
        Self {
            section,
            name: name.into(),
            ..Self::default()
        }
    }

    /// The root of an entry tree.
    pub fn root() -> Self {
        Self::default()
    }

    pub fn add_sub_entry(&mut self, child: Entry) {
        self.children.push(child);
    }

    pub fn children(&self) -> &[Entry] {
        &self.children
    }

    /// Children with the given section.
    pub fn children_in(&self, section: Section) -> impl Iterator<Item = &Entry> {
        self.children.iter().filter(move |e| e.section == section)
    }

    /// First direct child named `name`.
    pub fn find_child(&self, name: &str) -> Option<&Entry> {
        self.children.iter().find(|e| e.name == name)
    }
}
