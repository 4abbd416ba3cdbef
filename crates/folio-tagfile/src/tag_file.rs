//! A tag file that has been read but not necessarily merged yet.

use log::debug;

use crate::{error::Diagnostic, records::TagRecords};

/// The records of one tag file plus the warnings raised while reading it.
///
/// Merge it into an entry tree with [`TagFile::build_lists`]; once every
/// tag file of the project is merged, resolve its include edges with
/// [`TagFile::add_includes`].
#[derive(Debug)]
pub struct TagFile {
    pub(crate) tag_name: String,
    pub(crate) records: TagRecords,
    pub(crate) warnings: Vec<Diagnostic>,
}

impl TagFile {
    pub(crate) fn new(tag_name: &str, records: TagRecords, warnings: Vec<Diagnostic>) -> Self {
        Self {
            tag_name: tag_name.to_string(),
            records,
            warnings,
        }
    }

    pub fn tag_name(&self) -> &str {
        &self.tag_name
    }

    pub fn records(&self) -> &TagRecords {
        &self.records
    }

    /// Schema and merge warnings, in the order they were raised.
    pub fn warnings(&self) -> &[Diagnostic] {
        &self.warnings
    }

    /// Log everything that was read at debug level.
    pub fn summary(&self) {
        let tag_file = self.tag_name.as_str();

        for class in self.records.classes() {
            debug!(
                tag_file,
                name = class.name.as_str(),
                filename = class.filename.as_str();
                "class"
            );
            for base in class.bases.iter().flatten() {
                debug!(tag_file, base = base.name.as_str(); "  base");
            }
            for member in &class.members {
                debug!(
                    tag_file,
                    kind = member.kind.as_str(),
                    name = member.name.as_str(),
                    anchor = member.anchor.as_str(),
                    arglist = member.arglist.as_str();
                    "  member"
                );
            }
        }

        for namespace in self.records.namespaces() {
            debug!(
                tag_file,
                name = namespace.name.as_str(),
                filename = namespace.filename.as_str();
                "namespace"
            );
            for class in &namespace.class_list {
                debug!(tag_file, class = class.as_str(); "  class");
            }
            for member in &namespace.members {
                debug!(
                    tag_file,
                    kind = member.kind.as_str(),
                    name = member.name.as_str();
                    "  member"
                );
            }
        }

        for file in self.records.files() {
            debug!(tag_file, name = file.name.as_str(), filename = file.filename.as_str(); "file");
            for namespace in &file.namespace_list {
                debug!(tag_file, namespace = namespace.as_str(); "  namespace");
            }
            for class in &file.class_list {
                debug!(tag_file, class = class.as_str(); "  class");
            }
            for member in &file.members {
                debug!(
                    tag_file,
                    kind = member.kind.as_str(),
                    name = member.name.as_str();
                    "  member"
                );
            }
            for include in &file.includes {
                debug!(
                    tag_file,
                    id = include.id.as_str(),
                    name = include.name.as_str();
                    "  includes"
                );
            }
        }

        for group in self.records.groups() {
            debug!(
                tag_file,
                name = group.name.as_str(),
                filename = group.filename.as_str();
                "group"
            );
            for subgroup in &group.subgroup_list {
                debug!(tag_file, subgroup = subgroup.as_str(); "  subgroup");
            }
            for page in &group.page_list {
                debug!(tag_file, page = page.as_str(); "  page");
            }
            for member in &group.members {
                debug!(
                    tag_file,
                    kind = member.kind.as_str(),
                    name = member.name.as_str();
                    "  member"
                );
            }
        }

        for page in self.records.pages() {
            debug!(
                tag_file,
                name = page.name.as_str(),
                title = page.title.as_str(),
                filename = page.filename.as_str();
                "page"
            );
        }

        for package in self.records.packages() {
            debug!(
                tag_file,
                name = package.name.as_str(),
                filename = package.filename.as_str();
                "package"
            );
        }

        for dir in self.records.dirs() {
            debug!(tag_file, name = dir.name.as_str(), path = dir.path.as_str(); "dir");
            for file in &dir.file_list {
                debug!(tag_file, file = file.as_str(); "  file");
            }
            for subdir in &dir.subdir_list {
                debug!(tag_file, subdir = subdir.as_str(); "  subdir");
            }
        }
    }
}
