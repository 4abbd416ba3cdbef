//! The tag-file XML event handler.
//!
//! [`TagFileHandler`] receives start/end/text events from the reader and
//! fills in one accumulator record per compound. Element names are routed
//! through a static dispatch table; every handler inspects the current
//! [`State`] to decide which record the element belongs to. `member`,
//! `enumvalue` and `templarg` push the enclosing state and restore it when
//! they close, so a member can sit inside any compound kind.

use std::{collections::HashMap, mem, sync::OnceLock};

use log::{trace, warn};

use folio_core::entry::{BaseInfo, Protection, Specifier};

use crate::{
    error::{Diagnostic, DiagnosticCollector, ErrorCode, ParseError},
    records::{
        ClassKind, TagAnchorInfo, TagClassInfo, TagDirInfo, TagEnumValueInfo, TagFileInfo,
        TagGroupInfo, TagIncludeInfo, TagMemberInfo, TagNamespaceInfo, TagPackageInfo,
        TagPageInfo, TagRecords,
    },
    span::{Location, Span},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum State {
    Invalid,
    InClass,
    InFile,
    InNamespace,
    InGroup,
    InPage,
    InMember,
    InEnumValue,
    InPackage,
    InDir,
    InTempArgList,
}

/// Attributes of a start tag, unescaped.
#[derive(Debug, Clone, Default)]
pub(crate) struct Attributes(Vec<(String, String)>);

impl Attributes {
    /// Value of `name`, or `""` when the attribute is absent.
    pub(crate) fn value(&self, name: &str) -> &str {
        self.0
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
            .unwrap_or("")
    }
}

impl FromIterator<(String, String)> for Attributes {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

type StartHandler = fn(&mut TagFileHandler, &Attributes);
type EndHandler = fn(&mut TagFileHandler);

#[derive(Clone, Copy)]
struct ElementHandlers {
    start: StartHandler,
    end: EndHandler,
}

fn register(
    handlers: &mut HashMap<&'static str, ElementHandlers>,
    name: &'static str,
    start: StartHandler,
    end: EndHandler,
) {
    handlers.insert(name, ElementHandlers { start, end });
}

fn element_handlers() -> &'static HashMap<&'static str, ElementHandlers> {
    static HANDLERS: OnceLock<HashMap<&'static str, ElementHandlers>> = OnceLock::new();
    HANDLERS.get_or_init(|| {
        type H = TagFileHandler;
        let mut handlers = HashMap::new();
        let h = &mut handlers;
        register(h, "compound", H::start_compound, H::end_compound);
        register(h, "member", H::start_member, H::end_member);
        register(h, "enumvalue", H::start_enum_value, H::end_enum_value);
        register(h, "name", H::start_string_value, H::end_name);
        register(h, "base", H::start_base, H::end_base);
        register(h, "filename", H::start_string_value, H::end_filename);
        register(h, "includes", H::start_includes, H::end_includes);
        register(h, "path", H::start_string_value, H::end_path);
        register(h, "anchorfile", H::start_string_value, H::end_anchor_file);
        register(h, "anchor", H::start_string_value, H::end_anchor);
        register(h, "clangid", H::start_string_value, H::end_clang_id);
        register(h, "arglist", H::start_string_value, H::end_arglist);
        register(h, "title", H::start_string_value, H::end_title);
        register(h, "subgroup", H::start_string_value, H::end_subgroup);
        register(h, "class", H::start_string_value, H::end_class);
        register(h, "namespace", H::start_string_value, H::end_namespace);
        register(h, "file", H::start_string_value, H::end_file);
        register(h, "dir", H::start_string_value, H::end_dir);
        register(h, "page", H::start_string_value, H::end_page);
        register(h, "docanchor", H::start_doc_anchor, H::end_doc_anchor);
        register(h, "tagfile", H::start_ignore, H::end_ignore);
        register(h, "templarg", H::start_template_arg, H::end_template_arg);
        register(h, "type", H::start_string_value, H::end_type);
        handlers
    })
}

fn protection(value: &str) -> Protection {
    match value {
        "protected" => Protection::Protected,
        "private" => Protection::Private,
        _ => Protection::Public,
    }
}

/// Streaming handler for one tag file.
#[derive(Debug)]
pub(crate) struct TagFileHandler {
    tag_name: String,
    state: State,
    state_stack: Vec<State>,

    cur_class: Option<TagClassInfo>,
    cur_file: Option<TagFileInfo>,
    cur_namespace: Option<TagNamespaceInfo>,
    cur_package: Option<TagPackageInfo>,
    cur_group: Option<TagGroupInfo>,
    cur_page: Option<TagPageInfo>,
    cur_dir: Option<TagDirInfo>,
    cur_member: Option<TagMemberInfo>,
    cur_enum_value: Option<TagEnumValueInfo>,
    /// Index of the open `<includes>` in the current file's include list.
    cur_include: Option<usize>,

    cur_string: String,
    anchor_file: String,
    anchor_title: String,
    anchor_span: Span,

    span: Span,
    location: Location,

    records: TagRecords,
    diagnostics: DiagnosticCollector,
}

impl TagFileHandler {
    pub(crate) fn new(tag_name: &str) -> Self {
        Self {
            tag_name: tag_name.to_string(),
            state: State::Invalid,
            state_stack: Vec::new(),
            cur_class: None,
            cur_file: None,
            cur_namespace: None,
            cur_package: None,
            cur_group: None,
            cur_page: None,
            cur_dir: None,
            cur_member: None,
            cur_enum_value: None,
            cur_include: None,
            cur_string: String::new(),
            anchor_file: String::new(),
            anchor_title: String::new(),
            anchor_span: Span::default(),
            span: Span::default(),
            location: Location { line: 1, column: 1 },
            records: TagRecords::default(),
            diagnostics: DiagnosticCollector::new(),
        }
    }

    /// Position of the event about to be delivered.
    pub(crate) fn set_position(&mut self, span: Span, location: Location) {
        self.span = span;
        self.location = location;
    }

    pub(crate) fn state(&self) -> State {
        self.state
    }

    pub(crate) fn start_element(&mut self, name: &str, attrs: &Attributes) {
        match element_handlers().get(name) {
            Some(handlers) => (handlers.start)(self, attrs),
            None => self.unknown_tag(name),
        }
    }

    pub(crate) fn end_element(&mut self, name: &str) {
        match element_handlers().get(name) {
            Some(handlers) => (handlers.end)(self),
            None => self.unknown_tag(name),
        }
    }

    pub(crate) fn characters(&mut self, text: &str) {
        self.cur_string.push_str(text);
    }

    pub(crate) fn emit(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.emit(diagnostic);
    }

    pub(crate) fn diagnostic_count(&self) -> usize {
        self.diagnostics.len()
    }

    /// The completed records and the warnings raised while reading.
    ///
    /// # Errors
    ///
    /// Returns every collected diagnostic if an error was emitted.
    pub(crate) fn finish(self) -> Result<(TagRecords, Vec<Diagnostic>), ParseError> {
        let warnings = self.diagnostics.finish()?;
        Ok((self.records, warnings))
    }

    fn unknown_tag(&mut self, name: &str) {
        warn!(
            tag_file = self.tag_name.as_str(),
            line = self.location.line;
            "Unknown tag `{name}` found"
        );
        self.diagnostics.emit(
            Diagnostic::warning(format!("unknown tag `{name}` found"))
                .with_code(ErrorCode::T100)
                .with_label(self.span, "ignored"),
        );
    }

    fn unexpected_tag(&mut self, name: &str) {
        warn!(
            tag_file = self.tag_name.as_str(),
            line = self.location.line;
            "Unexpected tag `{name}` found"
        );
        self.diagnostics.emit(
            Diagnostic::warning(format!("unexpected tag `{name}` found"))
                .with_code(ErrorCode::T101)
                .with_label(self.span, "not valid here; its content is dropped"),
        );
    }

    fn start_ignore(&mut self, _attrs: &Attributes) {}

    fn end_ignore(&mut self) {}

    fn start_string_value(&mut self, _attrs: &Attributes) {
        self.cur_string.clear();
    }

    fn start_compound(&mut self, attrs: &Attributes) {
        self.cur_string.clear();

        let kind = attrs.value("kind");
        if let Some(class_kind) = ClassKind::from_compound_kind(kind) {
            let mut class = TagClassInfo::new(class_kind);
            class.is_objc = attrs.value("objc") == "yes";
            self.cur_class = Some(class);
            self.state = State::InClass;
            return;
        }

        self.state = match kind {
            "file" => {
                self.cur_file = Some(TagFileInfo::default());
                State::InFile
            }
            "namespace" => {
                self.cur_namespace = Some(TagNamespaceInfo::default());
                State::InNamespace
            }
            "group" => {
                self.cur_group = Some(TagGroupInfo::default());
                State::InGroup
            }
            "page" => {
                self.cur_page = Some(TagPageInfo::default());
                State::InPage
            }
            "package" => {
                self.cur_package = Some(TagPackageInfo::default());
                State::InPackage
            }
            "dir" => {
                self.cur_dir = Some(TagDirInfo::default());
                State::InDir
            }
            _ => {
                warn!(
                    tag_file = self.tag_name.as_str(),
                    line = self.location.line;
                    "Unknown compound attribute `{kind}` found"
                );
                self.diagnostics.emit(
                    Diagnostic::warning(format!("unknown compound kind `{kind}`"))
                        .with_code(ErrorCode::T102)
                        .with_label(self.span, "compound skipped")
                        .with_help(
                            "expected one of class, struct, union, interface, enum, exception, \
                             protocol, category, service, singleton, file, namespace, group, \
                             page, package, dir",
                        ),
                );
                State::Invalid
            }
        };
    }

    fn end_compound(&mut self) {
        match self.state {
            State::InClass => self.records.classes.extend(self.cur_class.take()),
            State::InFile => self.records.files.extend(self.cur_file.take()),
            State::InNamespace => self.records.namespaces.extend(self.cur_namespace.take()),
            State::InGroup => self.records.groups.extend(self.cur_group.take()),
            State::InPage => self.records.pages.extend(self.cur_page.take()),
            State::InPackage => self.records.packages.extend(self.cur_package.take()),
            State::InDir => self.records.dirs.extend(self.cur_dir.take()),
            _ => self.unexpected_tag("compound"),
        }
        trace!(state:? = self.state; "Compound closed");
        self.state = State::Invalid;
    }

    fn start_member(&mut self, attrs: &Attributes) {
        let member = TagMemberInfo {
            kind: attrs.value("kind").to_string(),
            protection: protection(attrs.value("protection")),
            virt: match attrs.value("virtualness") {
                "virtual" => Specifier::Virtual,
                "pure" => Specifier::Pure,
                _ => Specifier::Normal,
            },
            is_static: attrs.value("static") == "yes",
            ..TagMemberInfo::default()
        };
        self.cur_member = Some(member);

        self.state_stack.push(self.state);
        self.state = State::InMember;
    }

    fn end_member(&mut self) {
        self.state = self.state_stack.pop().unwrap_or(State::Invalid);

        let Some(member) = self.cur_member.take() else {
            return;
        };
        match self.members_slot() {
            Some(members) => members.push(member),
            None => self.unexpected_tag("member"),
        }
    }

    fn start_enum_value(&mut self, attrs: &Attributes) {
        if self.state != State::InMember {
            self.unexpected_tag("enumvalue");
            return;
        }

        self.cur_string.clear();
        self.cur_enum_value = Some(TagEnumValueInfo {
            name: String::new(),
            file: attrs.value("file").to_string(),
            anchor: attrs.value("anchor").to_string(),
            clang_id: attrs.value("clangid").to_string(),
        });

        self.state_stack.push(self.state);
        self.state = State::InEnumValue;
    }

    fn end_enum_value(&mut self) {
        // Misplaced start tags were already reported.
        if self.state != State::InEnumValue {
            return;
        }

        self.state = self.state_stack.pop().unwrap_or(State::Invalid);
        let name = self.cur_string.trim().to_string();
        if let (Some(mut value), Some(member)) =
            (self.cur_enum_value.take(), self.cur_member.as_mut())
        {
            value.name = name;
            member.enum_values.push(value);
        }
    }

    fn start_doc_anchor(&mut self, attrs: &Attributes) {
        self.anchor_file = attrs.value("file").to_string();
        self.anchor_title = attrs.value("title").to_string();
        self.anchor_span = self.span;
        self.cur_string.clear();
    }

    fn end_doc_anchor(&mut self) {
        let anchor = TagAnchorInfo {
            label: mem::take(&mut self.cur_string),
            file_name: mem::take(&mut self.anchor_file),
            title: mem::take(&mut self.anchor_title),
            span: self.anchor_span,
        };
        match self.doc_anchors_slot() {
            Some(anchors) => anchors.push(anchor),
            None => self.unexpected_tag("docanchor"),
        }
    }

    fn start_base(&mut self, attrs: &Attributes) {
        self.cur_string.clear();

        let class = match self.state {
            State::InClass => self.cur_class.as_mut(),
            _ => None,
        };
        let Some(class) = class else {
            self.unexpected_tag("base");
            return;
        };

        let virt = match attrs.value("virtualness") {
            "virtual" => Specifier::Virtual,
            _ => Specifier::Normal,
        };
        // The name arrives as text; `end_base` patches it in.
        class.bases.get_or_insert_with(Vec::new).push(BaseInfo::new(
            String::new(),
            protection(attrs.value("protection")),
            virt,
        ));
    }

    fn end_base(&mut self) {
        let base = match self.state {
            State::InClass => self
                .cur_class
                .as_mut()
                .and_then(|class| class.bases.as_mut())
                .and_then(|bases| bases.last_mut()),
            _ => None,
        };
        match base {
            Some(base) => base.name = mem::take(&mut self.cur_string),
            None => self.unexpected_tag("base"),
        }
    }

    fn start_includes(&mut self, attrs: &Attributes) {
        self.cur_include = None;

        let file = match self.state {
            State::InFile => self.cur_file.as_mut(),
            _ => None,
        };
        match file {
            Some(file) => {
                // Recorded now; the display text is filled in at the closing tag.
                file.includes.push(TagIncludeInfo {
                    id: attrs.value("id").to_string(),
                    name: attrs.value("name").to_string(),
                    text: String::new(),
                    is_local: attrs.value("local") == "yes",
                    is_imported: attrs.value("imported") == "yes",
                    span: self.span,
                });
                self.cur_include = Some(file.includes.len() - 1);
            }
            None => self.unexpected_tag("includes"),
        }

        self.cur_string.clear();
    }

    fn end_includes(&mut self) {
        let Some(index) = self.cur_include.take() else {
            return;
        };
        if let Some(include) = self
            .cur_file
            .as_mut()
            .and_then(|file| file.includes.get_mut(index))
        {
            include.text = mem::take(&mut self.cur_string);
        }
    }

    fn start_template_arg(&mut self, _attrs: &Attributes) {
        self.cur_string.clear();
        if self.state == State::InClass && self.cur_class.is_some() {
            self.state_stack.push(self.state);
            self.state = State::InTempArgList;
        }
    }

    fn end_template_arg(&mut self) {
        if self.state != State::InTempArgList {
            self.unexpected_tag("templarg");
            return;
        }

        self.state = self.state_stack.pop().unwrap_or(State::Invalid);
        let name = mem::take(&mut self.cur_string);
        if let Some(class) = self.cur_class.as_mut() {
            class.template_arguments.get_or_insert_with(Vec::new).push(name);
        }
    }

    fn end_name(&mut self) {
        self.store_text("name", Self::name_slot);
    }

    fn end_filename(&mut self) {
        self.store_text("filename", Self::filename_slot);
    }

    fn end_path(&mut self) {
        self.store_text("path", |h| match h.state {
            State::InFile => h.cur_file.as_mut().map(|f| &mut f.path),
            State::InDir => h.cur_dir.as_mut().map(|d| &mut d.path),
            _ => None,
        });
    }

    fn end_title(&mut self) {
        self.store_text("title", |h| match h.state {
            State::InGroup => h.cur_group.as_mut().map(|g| &mut g.title),
            State::InPage => h.cur_page.as_mut().map(|p| &mut p.title),
            _ => None,
        });
    }

    fn end_clang_id(&mut self) {
        self.store_text("clangid", |h| match h.state {
            State::InMember => h.cur_member.as_mut().map(|m| &mut m.clang_id),
            State::InClass => h.cur_class.as_mut().map(|c| &mut c.clang_id),
            State::InNamespace => h.cur_namespace.as_mut().map(|n| &mut n.clang_id),
            _ => None,
        });
    }

    fn end_type(&mut self) {
        self.store_text("type", |h| h.member_field().map(|m| &mut m.ty));
    }

    fn end_anchor(&mut self) {
        self.store_text("anchor", |h| h.member_field().map(|m| &mut m.anchor));
    }

    fn end_anchor_file(&mut self) {
        self.store_text("anchorfile", |h| h.member_field().map(|m| &mut m.anchor_file));
    }

    fn end_arglist(&mut self) {
        self.store_text("arglist", |h| h.member_field().map(|m| &mut m.arglist));
    }

    fn end_class(&mut self) {
        self.push_text("class", |h| match h.state {
            State::InClass => h.cur_class.as_mut().map(|c| &mut c.class_list),
            State::InFile => h.cur_file.as_mut().map(|f| &mut f.class_list),
            State::InNamespace => h.cur_namespace.as_mut().map(|n| &mut n.class_list),
            State::InGroup => h.cur_group.as_mut().map(|g| &mut g.class_list),
            State::InPackage => h.cur_package.as_mut().map(|p| &mut p.class_list),
            _ => None,
        });
    }

    fn end_namespace(&mut self) {
        self.push_text("namespace", |h| match h.state {
            State::InNamespace => h.cur_namespace.as_mut().map(|n| &mut n.namespace_list),
            State::InFile => h.cur_file.as_mut().map(|f| &mut f.namespace_list),
            State::InGroup => h.cur_group.as_mut().map(|g| &mut g.namespace_list),
            _ => None,
        });
    }

    fn end_file(&mut self) {
        self.push_text("file", |h| match h.state {
            State::InGroup => h.cur_group.as_mut().map(|g| &mut g.file_list),
            State::InDir => h.cur_dir.as_mut().map(|d| &mut d.file_list),
            _ => None,
        });
    }

    fn end_page(&mut self) {
        self.push_text("page", |h| match h.state {
            State::InGroup => h.cur_group.as_mut().map(|g| &mut g.page_list),
            _ => None,
        });
    }

    fn end_dir(&mut self) {
        self.push_text("dir", |h| match h.state {
            State::InDir => h.cur_dir.as_mut().map(|d| &mut d.subdir_list),
            State::InGroup => h.cur_group.as_mut().map(|g| &mut g.dir_list),
            _ => None,
        });
    }

    fn end_subgroup(&mut self) {
        self.push_text("subgroup", |h| match h.state {
            State::InGroup => h.cur_group.as_mut().map(|g| &mut g.subgroup_list),
            _ => None,
        });
    }

    /// Move the accumulated text into the field `slot` selects, or warn.
    fn store_text(&mut self, tag: &str, slot: fn(&mut Self) -> Option<&mut String>) {
        let text = mem::take(&mut self.cur_string);
        match slot(self) {
            Some(field) => *field = text,
            None => self.unexpected_tag(tag),
        }
    }

    /// Append the accumulated text to the list `slot` selects, or warn.
    fn push_text(&mut self, tag: &str, slot: fn(&mut Self) -> Option<&mut Vec<String>>) {
        let text = mem::take(&mut self.cur_string);
        match slot(self) {
            Some(list) => list.push(text),
            None => self.unexpected_tag(tag),
        }
    }

    fn member_field(&mut self) -> Option<&mut TagMemberInfo> {
        match self.state {
            State::InMember => self.cur_member.as_mut(),
            _ => None,
        }
    }

    fn name_slot(&mut self) -> Option<&mut String> {
        match self.state {
            State::InClass => self.cur_class.as_mut().map(|c| &mut c.name),
            State::InFile => self.cur_file.as_mut().map(|f| &mut f.name),
            State::InNamespace => self.cur_namespace.as_mut().map(|n| &mut n.name),
            State::InGroup => self.cur_group.as_mut().map(|g| &mut g.name),
            State::InPage => self.cur_page.as_mut().map(|p| &mut p.name),
            State::InDir => self.cur_dir.as_mut().map(|d| &mut d.name),
            State::InMember => self.cur_member.as_mut().map(|m| &mut m.name),
            State::InPackage => self.cur_package.as_mut().map(|p| &mut p.name),
            _ => None,
        }
    }

    fn filename_slot(&mut self) -> Option<&mut String> {
        match self.state {
            State::InClass => self.cur_class.as_mut().map(|c| &mut c.filename),
            State::InNamespace => self.cur_namespace.as_mut().map(|n| &mut n.filename),
            State::InFile => self.cur_file.as_mut().map(|f| &mut f.filename),
            State::InGroup => self.cur_group.as_mut().map(|g| &mut g.filename),
            State::InPage => self.cur_page.as_mut().map(|p| &mut p.filename),
            State::InPackage => self.cur_package.as_mut().map(|p| &mut p.filename),
            State::InDir => self.cur_dir.as_mut().map(|d| &mut d.filename),
            _ => None,
        }
    }

    /// Member list of the compound `state` refers to.
    fn members_slot(&mut self) -> Option<&mut Vec<TagMemberInfo>> {
        match self.state {
            State::InClass => self.cur_class.as_mut().map(|c| &mut c.members),
            State::InFile => self.cur_file.as_mut().map(|f| &mut f.members),
            State::InNamespace => self.cur_namespace.as_mut().map(|n| &mut n.members),
            State::InGroup => self.cur_group.as_mut().map(|g| &mut g.members),
            State::InPackage => self.cur_package.as_mut().map(|p| &mut p.members),
            _ => None,
        }
    }

    fn doc_anchors_slot(&mut self) -> Option<&mut Vec<TagAnchorInfo>> {
        match self.state {
            State::InClass => self.cur_class.as_mut().map(|c| &mut c.doc_anchors),
            State::InFile => self.cur_file.as_mut().map(|f| &mut f.doc_anchors),
            State::InNamespace => self.cur_namespace.as_mut().map(|n| &mut n.doc_anchors),
            State::InGroup => self.cur_group.as_mut().map(|g| &mut g.doc_anchors),
            State::InPage => self.cur_page.as_mut().map(|p| &mut p.doc_anchors),
            State::InMember => self.cur_member.as_mut().map(|m| &mut m.doc_anchors),
            State::InPackage => self.cur_package.as_mut().map(|p| &mut p.doc_anchors),
            State::InDir => self.cur_dir.as_mut().map(|d| &mut d.doc_anchors),
            _ => None,
        }
    }
}
