//! Merges tag-file records into the entry tree and the symbol table.

use std::collections::HashMap;

use log::{debug, info, warn};

use folio_core::{
    arguments::{Argument, ArgumentList},
    entry::{Entry, GroupPri, Grouping, MemberType, Section, SectionInfo, TagInfo, Trait},
    language::SrcLang,
    symbols::{FileDef, FileId, IncludeDependency, SymbolError, SymbolTable},
};

use crate::{
    TagFile,
    error::{Diagnostic, ErrorCode},
    records::{ClassKind, TagAnchorInfo, TagClassInfo, TagFileInfo, TagMemberInfo},
    span::Span,
};

/// Everything after the last `/`.
fn strip_path(name: &str) -> &str {
    match name.rfind('/') {
        Some(pos) => &name[pos + 1..],
        None => name,
    }
}

fn class_trait(kind: ClassKind) -> Option<Trait> {
    match kind {
        ClassKind::Class => None,
        ClassKind::Struct => Some(Trait::Struct),
        ClassKind::Union => Some(Trait::Union),
        ClassKind::Interface => Some(Trait::Interface),
        ClassKind::Enum => Some(Trait::Enum),
        ClassKind::Exception => Some(Trait::Exception),
        ClassKind::Protocol => Some(Trait::Protocol),
        ClassKind::Category => Some(Trait::Category),
        ClassKind::Service => Some(Trait::Service),
        ClassKind::Singleton => Some(Trait::Singleton),
    }
}

struct ListBuilder<'a> {
    tag_name: &'a str,
    symbols: &'a mut SymbolTable,
    warnings: &'a mut Vec<Diagnostic>,
    /// Where each anchor this tag file registered was declared.
    anchor_spans: HashMap<String, Span>,
}

impl ListBuilder<'_> {
    fn tag_info(&self, file_name: &str, anchor: &str) -> TagInfo {
        TagInfo {
            tag_name: self.tag_name.to_string(),
            file_name: file_name.to_string(),
            anchor: anchor.to_string(),
        }
    }

    fn add_doc_anchors(&mut self, entry: &mut Entry, anchors: &[TagAnchorInfo]) {
        for anchor in anchors {
            let info = SectionInfo {
                label: anchor.label.clone(),
                file_name: anchor.file_name.clone(),
                title: anchor.title.clone(),
                tag_name: self.tag_name.to_string(),
            };
            match self.symbols.add_anchor(info.clone()) {
                Ok(()) => {
                    self.anchor_spans.insert(anchor.label.clone(), anchor.span);
                    entry.anchors.push(info);
                }
                Err(SymbolError::DuplicateAnchor { label, first_file }) => {
                    warn!(
                        tag_file = self.tag_name,
                        label = label.as_str();
                        "Duplicate anchor found"
                    );
                    let mut diagnostic = Diagnostic::warning(format!("duplicate anchor `{label}`"))
                        .with_code(ErrorCode::T201)
                        .with_label(anchor.span, "duplicate")
                        .with_help(format!(
                            "the label is already registered for `{first_file}`"
                        ));
                    // Only anchors of this tag file can be pointed at.
                    if let Some(&first) = self.anchor_spans.get(&label) {
                        diagnostic = diagnostic.with_secondary_label(first, "first declared here");
                    }
                    self.warnings.push(diagnostic);
                }
            }
        }
    }

    fn build_member_list(&mut self, parent: &mut Entry, members: &[TagMemberInfo]) {
        for member in members {
            let mut entry = Entry::new(Section::Empty, member.name.as_str());
            entry.ty = member.ty.clone();
            entry.args = member.arglist.clone();
            if !entry.args.is_empty() {
                entry.arg_list = Some(ArgumentList::parse(&entry.args));
            }

            if !member.enum_values.is_empty() {
                entry.traits.set(Trait::Strong);
                for value in &member.enum_values {
                    let mut value_entry = Entry::new(Section::Variable, value.name.as_str());
                    value_entry.ty = "@".to_string();
                    value_entry.id = value.clang_id.clone();
                    value_entry.tag_info = Some(self.tag_info(&value.file, &value.anchor));
                    entry.add_sub_entry(value_entry);
                }
            }

            entry.protection = member.protection;
            entry.virt = member.virt;
            entry.is_static = member.is_static;
            entry.file_name = parent.file_name.clone();
            entry.id = member.clang_id.clone();

            if parent.section == Section::GroupDoc {
                entry.groups.push(Grouping {
                    group_name: parent.name.clone(),
                    pri: GroupPri::InGroup,
                });
            }

            self.add_doc_anchors(&mut entry, &member.doc_anchors);
            entry.tag_info = Some(self.tag_info(&member.anchor_file, &member.anchor));

            let (section, member_type) = match member.kind.as_str() {
                "define" => {
                    entry.ty = "#define".to_string();
                    (Section::Define, MemberType::Method)
                }
                "enumvalue" => (Section::Variable, MemberType::Method),
                "property" => (Section::Variable, MemberType::Property),
                "event" => (Section::Variable, MemberType::Event),
                "variable" => (Section::Variable, MemberType::Method),
                "typedef" => {
                    entry.ty.insert_str(0, "typedef ");
                    (Section::Variable, MemberType::Method)
                }
                "enumeration" => (Section::Enum, MemberType::Method),
                "function" => (Section::Function, MemberType::Method),
                "signal" => (Section::Function, MemberType::Signal),
                "prototype" => (Section::Function, MemberType::Method),
                "friend" => {
                    entry.ty.insert_str(0, "friend ");
                    (Section::Function, MemberType::Method)
                }
                "dcop" => (Section::Function, MemberType::Dcop),
                "slot" => (Section::Function, MemberType::Slot),
                other => {
                    debug!(kind = other, name = member.name.as_str(); "Member kind not classified");
                    (Section::Empty, MemberType::Method)
                }
            };
            entry.section = section;
            entry.member_type = member_type;

            parent.add_sub_entry(entry);
        }
    }

    fn build_class(&mut self, class: &mut TagClassInfo) -> Entry {
        let mut entry = Entry::new(Section::Class, class.name.as_str());
        entry.traits.clear();
        if let Some(t) = class_trait(class.kind) {
            entry.traits.set(t);
        }
        if class.kind == ClassKind::Protocol {
            entry.name.push_str("-p");
        }

        self.add_doc_anchors(&mut entry, &class.doc_anchors);
        entry.tag_info = Some(self.tag_info(&class.filename, ""));
        entry.id = class.clang_id.clone();
        entry.lang = if class.is_objc {
            SrcLang::ObjC
        } else {
            SrcLang::Unknown
        };

        if let Some(bases) = class.bases.take() {
            entry.extends = bases;
        }
        if let Some(names) = class.template_arguments.take() {
            entry.template_arg_lists.push(
                names
                    .into_iter()
                    .map(|name| Argument::new("class", name))
                    .collect(),
            );
        }

        self.build_member_list(&mut entry, &class.members);
        entry
    }

    fn build_file(&mut self, file: &TagFileInfo) -> Entry {
        let mut entry = Entry::new(Section::for_file_name(&file.name), file.name.as_str());
        self.add_doc_anchors(&mut entry, &file.doc_anchors);
        entry.tag_info = Some(self.tag_info(&file.filename, ""));

        let full_name = format!("{}:{}{}", self.tag_name, file.path, strip_path(&file.name));
        entry.file_name = full_name.clone();

        let file_def = FileDef::new(
            format!("{}:{}", self.tag_name, file.path),
            file.name.as_str(),
            self.tag_name,
            &file.filename,
        );
        self.symbols.add_file(file_def, &full_name);

        self.build_member_list(&mut entry, &file.members);
        entry
    }
}

impl TagFile {
    /// Merge the records into `root` and register files and anchors in
    /// `symbols`.
    ///
    /// Classes, files, namespaces, packages, groups and pages are appended
    /// in that order. Base-class and template-argument lists move out of
    /// the class records, so a second call merges classes without them.
    pub fn build_lists(&mut self, root: &mut Entry, symbols: &mut SymbolTable) {
        let mut builder = ListBuilder {
            tag_name: &self.tag_name,
            symbols,
            warnings: &mut self.warnings,
            anchor_spans: HashMap::new(),
        };
        let records = &mut self.records;

        for class in &mut records.classes {
            let entry = builder.build_class(class);
            root.add_sub_entry(entry);
        }

        for file in &records.files {
            let entry = builder.build_file(file);
            root.add_sub_entry(entry);
        }

        for namespace in &records.namespaces {
            let mut entry = Entry::new(Section::Namespace, namespace.name.as_str());
            builder.add_doc_anchors(&mut entry, &namespace.doc_anchors);
            entry.id = namespace.clang_id.clone();
            entry.tag_info = Some(builder.tag_info(&namespace.filename, ""));
            builder.build_member_list(&mut entry, &namespace.members);
            root.add_sub_entry(entry);
        }

        for package in &records.packages {
            let mut entry = Entry::new(Section::Package, package.name.as_str());
            builder.add_doc_anchors(&mut entry, &package.doc_anchors);
            entry.tag_info = Some(builder.tag_info(&package.filename, ""));
            builder.build_member_list(&mut entry, &package.members);
            root.add_sub_entry(entry);
        }

        for group in &records.groups {
            let mut entry = Entry::new(Section::GroupDoc, group.name.as_str());
            entry.ty = group.title.clone();
            builder.add_doc_anchors(&mut entry, &group.doc_anchors);
            entry.tag_info = Some(builder.tag_info(&group.filename, ""));
            builder.build_member_list(&mut entry, &group.members);
            root.add_sub_entry(entry);
        }

        for page in &records.pages {
            let section = if page.filename == "index" {
                Section::MainPageDoc
            } else {
                Section::PageDoc
            };
            let mut entry = Entry::new(section, page.name.as_str());
            entry.args = page.title.clone();
            builder.add_doc_anchors(&mut entry, &page.doc_anchors);
            entry.tag_info = Some(builder.tag_info(&page.filename, ""));
            root.add_sub_entry(entry);
        }

        info!(
            tag_file = self.tag_name.as_str(),
            classes = records.classes.len(),
            files = records.files.len(),
            namespaces = records.namespaces.len(),
            groups = records.groups.len(),
            pages = records.pages.len();
            "Merged tag file"
        );
    }

    /// Register the include edges of every file this tag file declares.
    ///
    /// Run this only after [`build_lists`](TagFile::build_lists) has merged
    /// every tag file of the project: include targets may live in another
    /// tag file. An include whose file name is not in `symbols` at all is
    /// reported as a warning and left out; the other edges are still added.
    pub fn add_includes(&mut self, symbols: &mut SymbolTable) {
        for file in &self.records.files {
            let Some(bucket) = symbols.find_file_name(&file.name) else {
                continue;
            };
            let path = format!("{}:{}", self.tag_name, file.path);
            let sources: Vec<FileId> = bucket
                .files()
                .iter()
                .copied()
                .filter(|&id| symbols.file(id).path() == path)
                .collect();

            for include in &file.includes {
                let Some(targets) = symbols.find_file_name(&include.name) else {
                    warn!(
                        tag_file = self.tag_name.as_str(),
                        file = file.name.as_str(),
                        include = include.name.as_str();
                        "Unresolved include"
                    );
                    self.warnings.push(
                        Diagnostic::warning(format!(
                            "`{}` includes `{}`, which no imported tag file declares",
                            file.name, include.name
                        ))
                        .with_code(ErrorCode::T200)
                        .with_label(include.span, "include skipped")
                        .with_help("import the tag file that declares the included file"),
                    );
                    continue;
                };
                let matches: Vec<FileId> = targets
                    .files()
                    .iter()
                    .copied()
                    .filter(|&id| symbols.file(id).output_file_base() == include.id)
                    .collect();

                for &source in &sources {
                    for &target in &matches {
                        debug!(
                            file = file.name.as_str(),
                            include = include.name.as_str();
                            "Adding include dependency"
                        );
                        symbols
                            .file_mut(source)
                            .add_include_dependency(IncludeDependency {
                                target,
                                text: include.text.clone(),
                                is_local: include.is_local,
                                is_imported: include.is_imported,
                            });
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_path() {
        assert_eq!(strip_path("src/ui/widget.h"), "widget.h");
        assert_eq!(strip_path("widget.h"), "widget.h");
        assert_eq!(strip_path("dir/"), "");
    }

    #[test]
    fn test_class_trait_mapping() {
        assert_eq!(class_trait(ClassKind::Class), None);
        assert_eq!(class_trait(ClassKind::Union), Some(Trait::Union));
        assert_eq!(class_trait(ClassKind::Protocol), Some(Trait::Protocol));
    }
}
