//! Project-wide symbol table.
//!
//! The [`SymbolTable`] owns every [`FileDef`] known to the project, the
//! file-name index that groups same-named files into [`FileName`] buckets,
//! and the dictionary of labelled anchors. Tag-file importers write into it;
//! renderers only query it.

use std::{cmp::Ordering, collections::HashMap};

use indexmap::IndexMap;
use log::trace;
use thiserror::Error;

use crate::entry::SectionInfo;

/// Errors raised while registering symbols.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SymbolError {
    #[error("duplicate anchor `{label}` (first defined in `{first_file}`)")]
    DuplicateAnchor { label: String, first_file: String },
}

/// Index of a [`FileDef`] inside its [`SymbolTable`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FileId(usize);

/// An `#include` edge between two files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncludeDependency {
    pub target: FileId,
    pub text: String,
    pub is_local: bool,
    pub is_imported: bool,
}

/// A documented file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileDef {
    path: String,
    name: String,
    reference: String,
    output_file_base: String,
    includes: Vec<IncludeDependency>,
}

impl FileDef {
    /// Create a file definition.
    ///
    /// # Arguments
    ///
    /// * `path` - Directory part, prefixed with the tag name for imported files.
    /// * `name` - File name without directory.
    /// * `reference` - Tag file the definition was imported from, empty for local files.
    /// * `doc_name` - Documentation page name; its extension is stripped to form the output base.
    pub fn new(
        path: impl Into<String>,
        name: impl Into<String>,
        reference: impl Into<String>,
        doc_name: &str,
    ) -> Self {
        let output_file_base = match doc_name.rfind('.') {
            Some(pos) => &doc_name[..pos],
            None => doc_name,
        };
        Self {
            path: path.into(),
            name: name.into(),
            reference: reference.into(),
            output_file_base: output_file_base.to_string(),
            includes: Vec::new(),
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn reference(&self) -> &str {
        &self.reference
    }

    pub fn output_file_base(&self) -> &str {
        &self.output_file_base
    }

    pub fn includes(&self) -> &[IncludeDependency] {
        &self.includes
    }

    pub fn add_include_dependency(&mut self, dependency: IncludeDependency) {
        self.includes.push(dependency);
    }
}

/// All files sharing one base name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileName {
    full_name: String,
    file_name: String,
    files: Vec<FileId>,
}

impl FileName {
    fn new(full_name: &str, file_name: &str) -> Self {
        Self {
            full_name: full_name.to_string(),
            file_name: file_name.to_string(),
            files: Vec::new(),
        }
    }

    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn files(&self) -> &[FileId] {
        &self.files
    }
}

/// Case-insensitive ordering on the full name or the base name.
fn compare_file_names(a: &FileName, b: &FileName, full_path_names: bool) -> Ordering {
    let (a, b) = if full_path_names {
        (&a.full_name, &b.full_name)
    } else {
        (&a.file_name, &b.file_name)
    };
    a.to_lowercase().cmp(&b.to_lowercase())
}

/// Symbol table owning files, file-name buckets and anchors.
#[derive(Debug, Default)]
pub struct SymbolTable {
    files: Vec<FileDef>,
    /// Buckets keyed by lowercase base name.
    file_names: IndexMap<String, FileName>,
    /// Bucket positions in `file_names`, kept sorted.
    sorted: Vec<usize>,
    anchors: HashMap<String, SectionInfo>,
    full_path_names: bool,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sort the file-name list by full path instead of base name.
    pub fn with_full_path_names(mut self, full_path_names: bool) -> Self {
        self.full_path_names = full_path_names;
        self
    }

    /// Register `file` under its base name.
    ///
    /// A file whose name matches an existing bucket (ignoring case) joins that
    /// bucket; otherwise a new bucket named `full_name` is created and inserted
    /// into the sorted file-name list.
    pub fn add_file(&mut self, file: FileDef, full_name: &str) -> FileId {
        let id = FileId(self.files.len());
        let key = file.name().to_lowercase();

        match self.file_names.get_mut(&key) {
            Some(bucket) => bucket.files.push(id),
            None => {
                let mut bucket = FileName::new(full_name, file.name());
                bucket.files.push(id);
                let (index, _) = self.file_names.insert_full(key, bucket);

                let full_path_names = self.full_path_names;
                let file_names = &self.file_names;
                let new_bucket = &file_names[index];
                let position = self.sorted.partition_point(|&existing| {
                    compare_file_names(&file_names[existing], new_bucket, full_path_names)
                        != Ordering::Greater
                });
                self.sorted.insert(position, index);
                trace!(name = file.name(), position = position; "Created file-name bucket");
            }
        }

        self.files.push(file);
        id
    }

    pub fn file(&self, id: FileId) -> &FileDef {
        &self.files[id.0]
    }

    pub fn file_mut(&mut self, id: FileId) -> &mut FileDef {
        &mut self.files[id.0]
    }

    /// Bucket holding every file called `name` (case-insensitive).
    pub fn find_file_name(&self, name: &str) -> Option<&FileName> {
        self.file_names.get(&name.to_lowercase())
    }

    /// File-name buckets in sorted order.
    pub fn file_names(&self) -> impl Iterator<Item = &FileName> {
        self.sorted.iter().map(|&index| &self.file_names[index])
    }

    pub fn file_count(&self) -> usize {
        self.files.len()
    }

    /// Register a labelled anchor.
    ///
    /// # Errors
    ///
    /// Returns [`SymbolError::DuplicateAnchor`] if the label is already taken;
    /// the first registration is kept.
    pub fn add_anchor(&mut self, info: SectionInfo) -> Result<(), SymbolError> {
        if let Some(existing) = self.anchors.get(&info.label) {
            return Err(SymbolError::DuplicateAnchor {
                label: info.label,
                first_file: existing.file_name.clone(),
            });
        }
        self.anchors.insert(info.label.clone(), info);
        Ok(())
    }

    pub fn anchor(&self, label: &str) -> Option<&SectionInfo> {
        self.anchors.get(label)
    }
}
