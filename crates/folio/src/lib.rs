//! Folio - doxygen-style HTML documentation from comment trees and tag files
//!
//! This library renders parsed documentation comments ([`folio_core::doc`])
//! to HTML and imports the tag files of other projects so their symbols can
//! be linked to.

pub mod code;
pub mod config;
pub mod graph;
pub mod html;
pub mod index;
pub mod translator;

mod error;

pub use error::FolioError;
pub use folio_core::{doc, entry, language, symbols};

use std::{fs, path::Path};

use log::{debug, info, warn};

use folio_core::{
    doc::{AutoList, Composite, DocTree, NodeId, Ref, Section},
    entry::Entry,
    symbols::SymbolTable,
};
use folio_tagfile::TagFile;

use config::AppConfig;
use html::HtmlRenderer;
use translator::Translator;

/// The symbols of every imported tag file, merged into one entry tree.
///
/// # Examples
///
/// ```rust
/// use folio::{Project, config::AppConfig, html::HtmlRenderer};
///
/// let source = r#"<tagfile>
///   <compound kind="class">
///     <name>Widget</name>
///     <filename>classWidget.html</filename>
///   </compound>
/// </tagfile>"#;
///
/// let config = AppConfig::default();
/// let mut project = Project::new(config.clone());
/// project.import_tag_source(source, "widgets.tag")
///     .expect("Failed to import");
/// project.resolve_includes();
///
/// let mut renderer = HtmlRenderer::new(&config);
/// let html = project.render_index(&mut renderer);
/// assert!(html.contains("classWidget.html"));
/// ```
pub struct Project {
    config: AppConfig,
    root: Entry,
    symbols: SymbolTable,
    tag_files: Vec<TagFile>,
}

impl Project {
    pub fn new(config: AppConfig) -> Self {
        let symbols = SymbolTable::new().with_full_path_names(config.tagfiles().full_path_names());
        Self {
            config,
            root: Entry::root(),
            symbols,
            tag_files: Vec::new(),
        }
    }

    /// Read and merge the tag file at `path`.
    ///
    /// The tag name is the file name of `path`.
    ///
    /// # Errors
    ///
    /// Returns `FolioError` if the file cannot be read or is not well-formed
    /// XML. Nothing of a failed tag file is merged.
    pub fn import_tag_file(&mut self, path: &Path) -> Result<&TagFile, FolioError> {
        info!(path:? = path; "Reading tag file");
        let source = fs::read_to_string(path)?;
        let tag_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.to_string_lossy().into_owned());
        self.import_tag_source(&source, &tag_name)
    }

    /// Parse `source` as the tag file `tag_name` and merge it.
    ///
    /// # Errors
    ///
    /// Returns [`FolioError::TagFile`] if `source` is not well-formed XML.
    pub fn import_tag_source(
        &mut self,
        source: &str,
        tag_name: &str,
    ) -> Result<&TagFile, FolioError> {
        let mut tag_file = folio_tagfile::parse(source, tag_name)
            .map_err(|err| FolioError::new_tag_file_error(err, source, tag_name))?;

        tag_file.build_lists(&mut self.root, &mut self.symbols);
        for warning in tag_file.warnings() {
            warn!(tag_file = tag_name; "{warning}");
        }
        tag_file.summary();

        self.tag_files.push(tag_file);
        let tag_file = &self.tag_files[self.tag_files.len() - 1];
        Ok(tag_file)
    }

    /// Link the include edges of every imported tag file.
    ///
    /// Call this after the last import: includes may cross tag files.
    /// Includes that no imported tag file declares are logged, recorded as
    /// warnings on their tag file and left out.
    pub fn resolve_includes(&mut self) {
        for tag_file in &mut self.tag_files {
            tag_file.add_includes(&mut self.symbols);
        }
        debug!(files = self.symbols.file_count(); "Includes resolved");
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn root(&self) -> &Entry {
        &self.root
    }

    pub fn symbols(&self) -> &SymbolTable {
        &self.symbols
    }

    pub fn tag_files(&self) -> &[TagFile] {
        &self.tag_files
    }

    /// A comment tree listing every imported compound, one section per kind.
    pub fn index_tree(&self, translator: &dyn Translator) -> DocTree {
        let mut tree = DocTree::new(Composite::Root { single_line: false });

        let mut classes = Vec::new();
        let mut namespaces = Vec::new();
        let mut files = Vec::new();
        let mut pages = Vec::new();
        for tag_file in &self.tag_files {
            let tag_name = tag_file.tag_name();
            let records = tag_file.records();
            classes.extend(
                records
                    .classes()
                    .iter()
                    .map(|c| (tag_name, c.name.as_str(), c.filename.as_str())),
            );
            namespaces.extend(
                records
                    .namespaces()
                    .iter()
                    .map(|n| (tag_name, n.name.as_str(), n.filename.as_str())),
            );
            files.extend(
                records
                    .files()
                    .iter()
                    .map(|f| (tag_name, f.name.as_str(), f.filename.as_str())),
            );
            pages.extend(records.pages().iter().map(|p| {
                let title = if p.title.is_empty() { &p.name } else { &p.title };
                (tag_name, title.as_str(), p.filename.as_str())
            }));
        }

        let sections = [
            ("classes", translator.classes(), classes),
            ("namespaces", translator.namespaces(), namespaces),
            ("files", translator.files(), files),
            ("pages", translator.related_pages(), pages),
        ];
        for (anchor, title, items) in sections {
            if !items.is_empty() {
                add_index_section(&mut tree, anchor, title, &items);
            }
        }
        tree
    }

    /// Render [`index_tree`](Project::index_tree) with `renderer`.
    pub fn render_index(&self, renderer: &mut HtmlRenderer) -> String {
        let tree = self.index_tree(renderer.translator());
        renderer.render(&tree, "")
    }
}

fn add_index_section(tree: &mut DocTree, anchor: &str, title: &str, items: &[(&str, &str, &str)]) {
    let section = tree.append(
        tree.root(),
        Composite::Section(Section {
            level: 2,
            anchor: anchor.to_string(),
            title: title.to_string(),
        }),
    );
    let list: NodeId = tree.append(
        section,
        Composite::AutoList(AutoList {
            is_enum_list: false,
            depth: 0,
        }),
    );
    for &(tag_name, name, file) in items {
        let item = tree.append(list, Composite::AutoListItem);
        tree.append(
            item,
            Composite::Ref(Ref {
                reference: tag_name.to_string(),
                file: file.to_string(),
                target_title: name.to_string(),
                ..Ref::default()
            }),
        );
    }
}
