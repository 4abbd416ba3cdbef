//! HTML output of comment trees.
//!
//! [`HtmlRenderer`] owns everything a render needs (configuration, headings,
//! code parsers, tag-file link destinations, the index list and the diagram
//! adapter) and hands borrowed views of it to a fresh [`HtmlDocVisitor`] for
//! every tree.

pub mod anchor;
pub mod entity;
pub mod escape;
pub mod links;
pub mod paragraph;
mod visitor;

use log::debug;

use folio_core::doc::{DocTree, walk};

use crate::{
    code::CodeParsers,
    config::{AppConfig, HtmlConfig},
    graph::{ExternalTools, GraphAdapter, GraphRenderer},
    index::IndexItems,
    translator::{English, Translator},
};

pub use links::ExternalLinks;
pub use visitor::{HtmlDocVisitor, RenderContext};

/// Renders comment trees to HTML fragments.
pub struct HtmlRenderer {
    config: HtmlConfig,
    translator: Box<dyn Translator>,
    parsers: CodeParsers,
    links: ExternalLinks,
    index: IndexItems,
    graphs: GraphAdapter,
}

impl HtmlRenderer {
    /// A renderer that runs the configured external diagram tools.
    pub fn new(config: &AppConfig) -> Self {
        let tools = ExternalTools::from_config(config.graphs());
        Self::with_graph_renderer(config, Box::new(tools))
    }

    /// A renderer that hands diagrams to `renderer`.
    pub fn with_graph_renderer(config: &AppConfig, renderer: Box<dyn GraphRenderer>) -> Self {
        let html = config.html().clone();
        let links = ExternalLinks::from_config(config.tagfiles(), html.ext_links_in_window());
        let graphs = GraphAdapter::from_config(renderer, &html, config.graphs());
        Self {
            config: html,
            translator: Box::new(English),
            parsers: CodeParsers::new(),
            links,
            index: IndexItems::new(),
            graphs,
        }
    }

    pub fn with_translator(mut self, translator: Box<dyn Translator>) -> Self {
        self.translator = translator;
        self
    }

    pub fn config(&self) -> &HtmlConfig {
        &self.config
    }

    pub fn translator(&self) -> &dyn Translator {
        self.translator.as_ref()
    }

    pub fn parsers_mut(&mut self) -> &mut CodeParsers {
        &mut self.parsers
    }

    pub fn links(&self) -> &ExternalLinks {
        &self.links
    }

    pub fn links_mut(&mut self) -> &mut ExternalLinks {
        &mut self.links
    }

    /// Index entries registered by every render so far.
    pub fn index(&self) -> &IndexItems {
        &self.index
    }

    pub fn graphs(&self) -> &GraphAdapter {
        &self.graphs
    }

    /// Render `tree` as an HTML fragment.
    ///
    /// `lang_ext` is the extension of the file the comment was written in.
    pub fn render(&mut self, tree: &DocTree, lang_ext: &str) -> String {
        debug!(nodes = tree.len(), lang_ext; "Rendering comment tree");

        let mut out = String::new();
        let ctx = RenderContext {
            config: &self.config,
            translator: self.translator.as_ref(),
            parsers: &self.parsers,
            links: &self.links,
            index: &mut self.index,
            graphs: &mut self.graphs,
        };
        let mut visitor = HtmlDocVisitor::new(&mut out, ctx, lang_ext);
        walk(&mut visitor, tree, tree.root());
        out
    }
}
