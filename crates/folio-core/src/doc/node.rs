//! Node payloads of the comment AST.

use std::fmt;

/// An HTML attribute carried over from the comment source (`<td align="left">`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HtmlAttrib {
    pub name: String,
    pub value: String,
}

impl HtmlAttrib {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Inline or block style toggled by a [`StyleChange`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Style {
    Bold,
    Italic,
    Code,
    Center,
    Small,
    Subscript,
    Superscript,
    Preformatted,
    Span,
    Div,
}

/// Switches a [`Style`] on or off at this point of the text flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleChange {
    pub style: Style,
    pub enable: bool,
    pub attribs: Vec<HtmlAttrib>,
}

impl StyleChange {
    pub fn new(style: Style, enable: bool) -> Self {
        Self {
            style,
            enable,
            attribs: Vec::new(),
        }
    }

    pub fn with_attribs(mut self, attribs: Vec<HtmlAttrib>) -> Self {
        self.attribs = attribs;
        self
    }
}

/// A bare URL or e-mail address found in running text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Url {
    pub url: String,
    pub is_email: bool,
}

impl Url {
    pub fn web(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            is_email: false,
        }
    }

    pub fn email(address: impl Into<String>) -> Self {
        Self {
            url: address.into(),
            is_email: true,
        }
    }
}

/// A word that resolved to a documented symbol.
///
/// `reference` names the tag file the symbol was imported from and is empty
/// for symbols of the current project.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkedWord {
    pub word: String,
    pub reference: String,
    pub file: String,
    pub rel_path: String,
    pub anchor: String,
    pub tooltip: String,
}

/// Raw block kinds produced by `\code`, `\verbatim`, `\htmlonly`, `\dot` and friends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerbatimKind {
    Code,
    HtmlOnly,
    ManOnly,
    LatexOnly,
    RtfOnly,
    XmlOnly,
    DocbookOnly,
    Verbatim,
    Dot,
    Msc,
    PlantUml,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verbatim {
    pub kind: VerbatimKind,
    pub text: String,
    pub is_block: bool,
    /// Explicit language extension (`{.py}`), overrides the ambient one.
    pub language: String,
    pub context: String,
    pub rel_path: String,
    pub is_example: bool,
    pub example_file: String,
}

impl Verbatim {
    pub fn new(kind: VerbatimKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
            is_block: true,
            language: String::new(),
            context: String::new(),
            rel_path: String::new(),
            is_example: false,
            example_file: String::new(),
        }
    }

    pub fn inline(mut self) -> Self {
        self.is_block = false;
        self
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }
}

/// Sub-kinds of the `\include` family of commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IncludeKind {
    Include,
    IncWithLines,
    DontInclude,
    HtmlInclude,
    LatexInclude,
    VerbInclude,
    Snippet,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Include {
    pub kind: IncludeKind,
    pub file: String,
    pub text: String,
    pub context: String,
    pub is_example: bool,
    pub example_file: String,
    /// Marker delimiting the snippet for [`IncludeKind::Snippet`].
    pub block_id: String,
}

impl Include {
    pub fn new(kind: IncludeKind, file: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            kind,
            file: file.into(),
            text: text.into(),
            context: String::new(),
            is_example: false,
            example_file: String::new(),
            block_id: String::new(),
        }
    }

    pub fn with_block_id(mut self, block_id: impl Into<String>) -> Self {
        self.block_id = block_id.into();
        self
    }

    /// Extension of the included file including the leading dot, or `""`.
    pub fn extension(&self) -> &str {
        match self.file.rfind('.') {
            Some(pos) if !self.file[pos..].contains('/') => &self.file[pos..],
            _ => "",
        }
    }
}

/// `\line`, `\skipline`, `\skip` and `\until` following a `\dontinclude`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IncOperatorKind {
    Line,
    SkipLine,
    Skip,
    Until,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncOperator {
    pub kind: IncOperatorKind,
    pub text: String,
    pub context: String,
    pub is_first: bool,
    pub is_last: bool,
    pub is_example: bool,
    pub example_file: String,
}

impl IncOperator {
    pub fn new(kind: IncOperatorKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
            context: String::new(),
            is_first: false,
            is_last: false,
            is_example: false,
            example_file: String::new(),
        }
    }

    pub fn first(mut self) -> Self {
        self.is_first = true;
        self
    }

    pub fn last(mut self) -> Self {
        self.is_last = true;
        self
    }
}

/// A TeX formula, rendered either through MathJax or a pre-rendered image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Formula {
    /// Base name of the rendered bitmap (`form_3`).
    pub name: String,
    pub text: String,
    pub rel_path: String,
}

impl Formula {
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: text.into(),
            rel_path: String::new(),
        }
    }

    /// Display formulas start with `\[` or `\{`; everything else flows inline.
    pub fn is_inline(&self) -> bool {
        !(self.text.starts_with("\\[") || self.text.starts_with("\\{"))
    }
}

/// An `\addindex` entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IndexEntry {
    pub entry: String,
    pub scope: Option<String>,
    pub member: Option<String>,
    pub member_anchor: Option<String>,
}

impl IndexEntry {
    pub fn new(entry: impl Into<String>) -> Self {
        Self {
            entry: entry.into(),
            ..Self::default()
        }
    }

    pub fn in_member(
        mut self,
        scope: impl Into<String>,
        member: impl Into<String>,
        anchor: impl Into<String>,
    ) -> Self {
        self.scope = Some(scope.into());
        self.member = Some(member.into());
        self.member_anchor = Some(anchor.into());
        self
    }
}

/// A `\cite` reference; `file` is empty when the key did not resolve.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cite {
    pub text: String,
    pub reference: String,
    pub file: String,
    pub rel_path: String,
    pub anchor: String,
}

/// Nodes without children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Leaf {
    Word(String),
    LinkedWord(LinkedWord),
    WhiteSpace(String),
    /// Entity or command symbol as written in the comment (`&copy;`, `\@`).
    Symbol(String),
    Url(Url),
    LineBreak,
    HorRuler,
    StyleChange(StyleChange),
    Anchor(String),
    Verbatim(Verbatim),
    Include(Include),
    IncOperator(IncOperator),
    Formula(Formula),
    IndexEntry(IndexEntry),
    SimpleSectSep,
    Cite(Cite),
}

/// Numbered (`-#`) or bulleted (`-`) markdown-style list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AutoList {
    pub is_enum_list: bool,
    pub depth: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimpleSectKind {
    Unknown,
    See,
    Return,
    Author,
    Authors,
    Version,
    Since,
    Date,
    Note,
    Warning,
    Copyright,
    Pre,
    Post,
    Invar,
    Remark,
    Attention,
    User,
    Rcs,
}

impl SimpleSectKind {
    /// CSS class suffix of the section (`<dl class="section note">`).
    pub fn as_str(&self) -> &'static str {
        match self {
            SimpleSectKind::Unknown => "unknown",
            SimpleSectKind::See => "see",
            SimpleSectKind::Return => "return",
            SimpleSectKind::Author => "author",
            SimpleSectKind::Authors => "authors",
            SimpleSectKind::Version => "version",
            SimpleSectKind::Since => "since",
            SimpleSectKind::Date => "date",
            SimpleSectKind::Note => "note",
            SimpleSectKind::Warning => "warning",
            SimpleSectKind::Copyright => "copyright",
            SimpleSectKind::Pre => "pre",
            SimpleSectKind::Post => "post",
            SimpleSectKind::Invar => "invariant",
            SimpleSectKind::Remark => "remark",
            SimpleSectKind::Attention => "attention",
            SimpleSectKind::User => "user",
            SimpleSectKind::Rcs => "rcs",
        }
    }
}

impl fmt::Display for SimpleSectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimpleSect {
    pub kind: SimpleSectKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub level: u8,
    pub anchor: String,
    pub title: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HtmlListKind {
    Ordered,
    Unordered,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HtmlList {
    pub kind: HtmlListKind,
    pub attribs: Vec<HtmlAttrib>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HtmlCell {
    pub is_heading: bool,
    pub attribs: Vec<HtmlAttrib>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HtmlHeader {
    pub level: u8,
    pub attribs: Vec<HtmlAttrib>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HRef {
    pub url: String,
    pub rel_path: String,
    pub attribs: Vec<HtmlAttrib>,
}

/// Output format an `\image` command targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageKind {
    Html,
    Latex,
    Rtf,
    DocBook,
}

/// An `\image`; its children form the caption.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Image {
    pub kind: ImageKind,
    pub name: String,
    pub url: String,
    pub rel_path: String,
    pub attribs: Vec<HtmlAttrib>,
}

/// A `\dotfile`, `\mscfile` or `\diafile`; its children form the caption.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagramFile {
    pub file: String,
    pub rel_path: String,
    pub context: String,
}

/// Target of `\link`, `\ref` and internal references.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Link {
    pub reference: String,
    pub file: String,
    pub rel_path: String,
    pub anchor: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ref {
    pub reference: String,
    pub file: String,
    pub rel_path: String,
    pub anchor: String,
    pub is_sub_page: bool,
    pub has_link_text: bool,
    pub target_title: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SecRefItem {
    pub file: String,
    pub anchor: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamSectKind {
    Param,
    RetVal,
    Exception,
    TemplateParam,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParamSect {
    pub kind: ParamSectKind,
    pub has_in_out_specifier: bool,
    pub has_type_specifier: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParamDir {
    #[default]
    Unspecified,
    In,
    Out,
    InOut,
}

/// One row of a parameter section; the children describe the parameter.
///
/// Names and types are [`Leaf::Word`] or [`Leaf::LinkedWord`] values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParamList {
    pub parameters: Vec<Leaf>,
    pub param_types: Vec<Leaf>,
    pub direction: ParamDir,
}

/// A `\todo`, `\bug`, `\deprecated` style item linking to its list page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct XRefItem {
    pub key: String,
    pub file: String,
    pub anchor: String,
    pub title: String,
    pub rel_path: String,
}

/// Nodes with children, visited through a pre/post pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Composite {
    Root { single_line: bool },
    Para,
    AutoList(AutoList),
    AutoListItem,
    Title,
    SimpleList,
    SimpleListItem,
    SimpleSect(SimpleSect),
    Section(Section),
    HtmlList(HtmlList),
    HtmlListItem(Vec<HtmlAttrib>),
    HtmlDescList(Vec<HtmlAttrib>),
    HtmlDescTitle(Vec<HtmlAttrib>),
    HtmlDescData(Vec<HtmlAttrib>),
    HtmlTable(Vec<HtmlAttrib>),
    HtmlRow(Vec<HtmlAttrib>),
    HtmlCell(HtmlCell),
    HtmlCaption(Vec<HtmlAttrib>),
    HtmlBlockQuote(Vec<HtmlAttrib>),
    HtmlHeader(HtmlHeader),
    Internal,
    HRef(HRef),
    Image(Image),
    DotFile(DiagramFile),
    MscFile(DiagramFile),
    DiaFile(DiagramFile),
    Link(Link),
    Ref(Ref),
    SecRefItem(SecRefItem),
    SecRefList,
    ParamSect(ParamSect),
    ParamList(ParamList),
    XRefItem(XRefItem),
    InternalRef(Link),
    Copy,
    Text,
    ParBlock,
}

/// A node of the comment AST.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocNode {
    Leaf(Leaf),
    Composite(Composite),
}

impl DocNode {
    pub fn is_leaf(&self) -> bool {
        matches!(self, DocNode::Leaf(_))
    }

    pub fn as_leaf(&self) -> Option<&Leaf> {
        match self {
            DocNode::Leaf(leaf) => Some(leaf),
            DocNode::Composite(_) => None,
        }
    }

    pub fn as_composite(&self) -> Option<&Composite> {
        match self {
            DocNode::Composite(composite) => Some(composite),
            DocNode::Leaf(_) => None,
        }
    }

    pub fn is_white_space(&self) -> bool {
        matches!(self, DocNode::Leaf(Leaf::WhiteSpace(_)))
    }

    pub fn is_para(&self) -> bool {
        matches!(self, DocNode::Composite(Composite::Para))
    }
}

impl From<Leaf> for DocNode {
    fn from(leaf: Leaf) -> Self {
        DocNode::Leaf(leaf)
    }
}

impl From<Composite> for DocNode {
    fn from(composite: Composite) -> Self {
        DocNode::Composite(composite)
    }
}
