//! The HTML document visitor.

use std::path::Path;

use log::{error, trace};

use folio_core::{
    doc::{
        Composite, DocNode, DocTree, DocVisitor, HtmlAttrib, HtmlListKind, ImageKind,
        IncOperatorKind, IncludeKind, Leaf, NodeId, ParamDir, ParamSectKind, SimpleSectKind,
        Style, StyleChange, Url, Verbatim, VerbatimKind,
    },
    language::SrcLang,
};

use crate::{
    code::{CodeFragment, HtmlCodeWriter, extract_block},
    config::HtmlConfig,
    graph::GraphAdapter,
    html::{
        anchor::index_entry_anchor,
        entity::html_entity,
        escape::{
            attribs_to_string, convert_to_html, convert_to_xml, filter, filter_quoted_cdata_attr,
        },
        links::{ExternalLinks, correct_url},
        paragraph::{
            first_non_white_space, has_visible_content, last_non_white_space,
            must_be_outside_paragraph, paragraph_context, parent_needs_tag,
        },
    },
    index::IndexList,
    translator::Translator,
};

const PREFRAG_START: &str = "<div class=\"fragment\">";
const PREFRAG_END: &str = "</div><!-- fragment -->";

/// `type` of nested enumerated lists, cycling with depth.
const LIST_TYPES: [&str; 4] = ["1", "a", "i", "A"];

const ANTI_SPAM: &str = "<span style=\"display: none;\">.nosp@m.</span>";

/// The collaborators a visitor reads from and reports to.
pub struct RenderContext<'a> {
    pub config: &'a HtmlConfig,
    pub translator: &'a dyn Translator,
    pub parsers: &'a crate::code::CodeParsers,
    pub links: &'a ExternalLinks,
    pub index: &'a mut dyn IndexList,
    pub graphs: &'a mut GraphAdapter,
}

/// Writes a comment AST as HTML into a string sink.
///
/// Output is suppressed while `hide` is set. Nodes that hide their subtree
/// (images for other output formats, the middle of an include-operator
/// run) save the previous state on `enabled` and restore it when done.
pub struct HtmlDocVisitor<'a> {
    out: &'a mut String,
    ctx: RenderContext<'a>,
    lang_ext: String,
    inside_pre: bool,
    hide: bool,
    enabled: Vec<bool>,
}

impl<'a> HtmlDocVisitor<'a> {
    /// `lang_ext` is the extension of the file the comment belongs to; it
    /// selects the code parser for fragments without their own language.
    pub fn new(out: &'a mut String, ctx: RenderContext<'a>, lang_ext: &str) -> Self {
        Self {
            out,
            ctx,
            lang_ext: lang_ext.to_string(),
            inside_pre: false,
            hide: false,
            enabled: Vec::new(),
        }
    }

    fn push_enabled(&mut self) {
        self.enabled.push(self.hide);
    }

    fn pop_enabled(&mut self) {
        if let Some(hide) = self.enabled.pop() {
            self.hide = hide;
        }
    }

    fn push(&mut self, text: &str) {
        self.out.push_str(text);
    }

    fn filter(&mut self, text: &str) {
        filter(self.out, text);
    }

    fn extension(&self) -> &str {
        self.ctx.config.file_extension()
    }

    /// `file` with the output extension appended unless it already has it.
    fn with_extension(&self, file: &str) -> String {
        let extension = self.extension();
        if file.ends_with(extension) {
            file.to_string()
        } else {
            format!("{file}{extension}")
        }
    }

    fn start_link(
        &mut self,
        reference: &str,
        file: &str,
        rel_path: &str,
        anchor: &str,
        tooltip: &str,
    ) {
        let links = self.ctx.links;
        if reference.is_empty() {
            self.push("<a class=\"el\" ");
        } else {
            self.push("<a class=\"elRef\" ");
            self.push(links.link_target());
            self.push(&links.external_ref(rel_path, reference, false));
        }
        self.push("href=\"");
        self.push(&links.external_ref(rel_path, reference, true));
        if !file.is_empty() {
            let file = self.with_extension(file);
            self.push(&file);
        }
        if !anchor.is_empty() {
            self.push("#");
            self.push(anchor);
        }
        self.push("\"");
        if !tooltip.is_empty() {
            self.push(" title=\"");
            self.push(&tooltip.replace('"', "&quot;"));
            self.push("\"");
        }
        self.push(">");
    }

    fn end_link(&mut self) {
        self.push("</a>");
    }

    fn write_obfuscated_mail_address(&mut self, address: &str) {
        self.push("<a href=\"#\" onclick=\"location.href='mai'+'lto:'");
        for chunk in mail_chunks(address, 3, 2) {
            self.push("+'");
            filter_quoted_cdata_attr(self.out, chunk);
            self.push("'");
        }
        self.push("; return false;\">");
    }

    fn write_url(&mut self, url: &Url) {
        if url.is_email {
            self.write_obfuscated_mail_address(&url.url);
            let chunks = mail_chunks(&url.url, 5, 4);
            let count = chunks.len();
            for (i, chunk) in chunks.into_iter().enumerate() {
                self.filter(chunk);
                if i + 1 < count {
                    self.push(ANTI_SPAM);
                }
            }
            self.push("</a>");
        } else {
            self.push("<a href=\"");
            self.push(&url.url);
            self.push("\">");
            self.filter(&url.url);
            self.push("</a>");
        }
    }

    /// Whether the paragraph `para` is wrapped in explicit tags.
    ///
    /// `boundary` is its first or last non-white-space child, depending on
    /// which tag is being decided.
    fn paragraph_tagged(&self, tree: &DocTree, para: NodeId, boundary: Option<NodeId>) -> bool {
        if !parent_needs_tag(tree, para) || !has_visible_content(tree, para) {
            return false;
        }
        if boundary.is_some_and(|node| must_be_outside_paragraph(tree.node(node))) {
            return false;
        }
        !paragraph_context(tree, para).is_alone()
    }

    /// Close the enclosing paragraph before block content that cannot live
    /// inside `<p>`.
    fn force_end_paragraph(&mut self, tree: &DocTree, id: NodeId) {
        if self.hide {
            return;
        }
        let Some(para) = tree.parent(id).filter(|&p| tree.node(p).is_para()) else {
            return;
        };
        let siblings = tree.children(para);
        let Some(index) = siblings.iter().position(|&c| c == id) else {
            return;
        };
        let Some(&previous) = siblings[..index]
            .iter()
            .rev()
            .find(|&&c| !tree.node(c).is_white_space())
        else {
            return;
        };
        if must_be_outside_paragraph(tree.node(previous)) {
            return;
        }
        if self.paragraph_tagged(tree, para, None) {
            self.push("</p>");
        }
    }

    /// Reopen the enclosing paragraph after block content, if inline
    /// content follows.
    fn force_start_paragraph(&mut self, tree: &DocTree, id: NodeId) {
        if self.hide {
            return;
        }
        let Some(para) = tree.parent(id).filter(|&p| tree.node(p).is_para()) else {
            return;
        };
        let siblings = tree.children(para);
        let Some(index) = siblings.iter().position(|&c| c == id) else {
            return;
        };
        let Some(&next) = siblings[index + 1..]
            .iter()
            .find(|&&c| !tree.node(c).is_white_space())
        else {
            return;
        };
        if must_be_outside_paragraph(tree.node(next)) {
            return;
        }
        if self.paragraph_tagged(tree, para, None) {
            self.push("<p>");
        }
    }

    fn write_code(&mut self, parser_ext: &str, fragment: &CodeFragment<'_>) {
        let parser = self.ctx.parsers.parser_for(parser_ext);
        let mut writer = HtmlCodeWriter::new(&mut *self.out);
        parser.parse_code(&mut writer, fragment);
    }

    fn visit_leaf(&mut self, tree: &DocTree, id: NodeId, leaf: &Leaf) {
        match leaf {
            Leaf::IncOperator(op) => {
                if op.is_first {
                    if !self.hide {
                        self.push(PREFRAG_START);
                    }
                    self.push_enabled();
                    self.hide = true;
                }
                if op.kind != IncOperatorKind::Skip {
                    self.pop_enabled();
                    if !self.hide {
                        let lang_ext = self.lang_ext.clone();
                        let fragment = CodeFragment::new(
                            &op.context,
                            &op.text,
                            SrcLang::from_file_name(&lang_ext),
                        )
                        .example(op.is_example, &op.example_file)
                        .line_numbers(true);
                        self.write_code(&lang_ext, &fragment);
                    }
                    self.push_enabled();
                    self.hide = true;
                }
                if op.is_last {
                    self.pop_enabled();
                    if !self.hide {
                        self.push(PREFRAG_END);
                    }
                } else if !self.enabled.last().copied().unwrap_or(self.hide) {
                    // The run is hidden between operators; the separator
                    // follows the visibility the run started with.
                    self.push("\n");
                }
                return;
            }
            Leaf::Symbol(symbol) if !self.hide => {
                match html_entity(symbol) {
                    Some(html) => self.push(html),
                    None => error!(symbol = symbol.as_str(); "Unsupported HTML entity"),
                }
                return;
            }
            _ => {}
        }

        if self.hide {
            return;
        }

        match leaf {
            Leaf::Word(word) => self.filter(word),
            Leaf::LinkedWord(word) => {
                self.start_link(
                    &word.reference,
                    &word.file,
                    &word.rel_path,
                    &word.anchor,
                    &word.tooltip,
                );
                self.filter(&word.word);
                self.end_link();
            }
            Leaf::WhiteSpace(chars) => {
                if self.inside_pre {
                    self.push(chars);
                } else {
                    self.push(" ");
                }
            }
            Leaf::Url(url) => self.write_url(url),
            Leaf::LineBreak => self.push("<br />\n"),
            Leaf::HorRuler => {
                self.force_end_paragraph(tree, id);
                self.push("<hr/>\n");
                self.force_start_paragraph(tree, id);
            }
            Leaf::StyleChange(change) => self.visit_style_change(tree, id, change),
            Leaf::Anchor(anchor) => {
                self.push("<a class=\"anchor\" id=\"");
                self.push(anchor);
                self.push("\"></a>");
            }
            Leaf::Verbatim(verbatim) => self.visit_verbatim(tree, id, verbatim),
            Leaf::Include(include) => {
                let lang = SrcLang::from_file_name(include.extension());
                let parser_ext = include.extension();
                let base = CodeFragment::new(&include.context, &include.text, lang)
                    .example(include.is_example, &include.example_file);
                match include.kind {
                    IncludeKind::Include => {
                        self.force_end_paragraph(tree, id);
                        self.push(PREFRAG_START);
                        self.write_code(parser_ext, &base.inline_fragment(true));
                        self.push(PREFRAG_END);
                        self.force_start_paragraph(tree, id);
                    }
                    IncludeKind::IncWithLines => {
                        self.force_end_paragraph(tree, id);
                        self.push(PREFRAG_START);
                        self.write_code(
                            parser_ext,
                            &base.in_file(&include.file).line_numbers(true),
                        );
                        self.push(PREFRAG_END);
                        self.force_start_paragraph(tree, id);
                    }
                    IncludeKind::DontInclude | IncludeKind::LatexInclude => {}
                    IncludeKind::HtmlInclude => self.push(&include.text),
                    IncludeKind::VerbInclude => {
                        self.force_end_paragraph(tree, id);
                        self.push("<pre class=\"fragment\">");
                        self.filter(&include.text);
                        self.push("</pre>");
                        self.force_start_paragraph(tree, id);
                    }
                    IncludeKind::Snippet => {
                        self.force_end_paragraph(tree, id);
                        self.push(PREFRAG_START);
                        let block = extract_block(&include.text, &include.block_id);
                        let fragment = CodeFragment { text: block, ..base }
                            .inline_fragment(true)
                            .line_numbers(true);
                        self.write_code(parser_ext, &fragment);
                        self.push(PREFRAG_END);
                        self.force_start_paragraph(tree, id);
                    }
                }
            }
            Leaf::Formula(formula) => {
                let display = !formula.is_inline();
                if display {
                    self.force_end_paragraph(tree, id);
                    self.push("<p class=\"formulaDsp\">\n");
                }
                if self.ctx.config.use_mathjax() {
                    let text = formula.text.as_str();
                    let delimited = !display
                        && text.len() >= 2
                        && text.starts_with('$')
                        && text.ends_with('$');
                    if delimited {
                        self.push("\\(");
                        self.push(&convert_to_html(&text[1..text.len() - 1]));
                        self.push("\\)");
                    } else {
                        self.push(&convert_to_html(text));
                    }
                } else {
                    self.push("<img class=\"formula");
                    self.push(if display { "Dsp" } else { "Inl" });
                    self.push("\" alt=\"");
                    filter_quoted_cdata_attr(self.out, &formula.text);
                    self.push("\" src=\"");
                    self.push(&formula.rel_path);
                    self.push(&formula.name);
                    self.push(".png\"/>");
                }
                if display {
                    self.push("\n</p>\n");
                    self.force_start_paragraph(tree, id);
                }
            }
            Leaf::IndexEntry(entry) => {
                let anchor = index_entry_anchor(entry);
                self.push("<a name=\"");
                self.push(&anchor);
                self.push("\"></a>");
                self.ctx.index.add_index_item(
                    entry.scope.as_deref(),
                    entry.member.as_deref(),
                    &anchor,
                    &entry.entry,
                );
            }
            Leaf::SimpleSectSep => self.push("</dd>\n<dd>\n"),
            Leaf::Cite(cite) => {
                if cite.file.is_empty() {
                    self.push("<b>[");
                } else {
                    self.start_link(&cite.reference, &cite.file, &cite.rel_path, &cite.anchor, "");
                }
                self.filter(&cite.text);
                if cite.file.is_empty() {
                    self.push("]</b>");
                } else {
                    self.end_link();
                }
            }
            Leaf::IncOperator(_) | Leaf::Symbol(_) => {}
        }
    }

    fn visit_style_change(&mut self, tree: &DocTree, id: NodeId, change: &StyleChange) {
        let attribs = attribs_to_string(&change.attribs);
        let inline_tag = match change.style {
            Style::Bold => Some("b"),
            Style::Italic => Some("em"),
            Style::Code => Some("code"),
            Style::Subscript => Some("sub"),
            Style::Superscript => Some("sup"),
            Style::Small => Some("small"),
            Style::Span => Some("span"),
            Style::Center | Style::Preformatted | Style::Div => None,
        };
        if let Some(tag) = inline_tag {
            if change.enable {
                self.push(&format!("<{tag}{attribs}>"));
            } else {
                self.push(&format!("</{tag}>"));
            }
            return;
        }

        if change.enable {
            self.force_end_paragraph(tree, id);
            match change.style {
                Style::Center => self.push(&format!("<center{attribs}>")),
                Style::Preformatted => {
                    self.push(&format!("<pre{attribs}>"));
                    self.inside_pre = true;
                }
                _ => self.push(&format!("<div {attribs}>")),
            }
        } else {
            match change.style {
                Style::Center => self.push("</center>"),
                Style::Preformatted => {
                    self.inside_pre = false;
                    self.push("</pre>");
                }
                _ => self.push("</div>"),
            }
            self.force_start_paragraph(tree, id);
        }
    }

    fn visit_verbatim(&mut self, tree: &DocTree, id: NodeId, verbatim: &Verbatim) {
        let lang_ext = if verbatim.language.is_empty() {
            self.lang_ext.clone()
        } else {
            verbatim.language.clone()
        };

        match verbatim.kind {
            VerbatimKind::Code => {
                self.force_end_paragraph(tree, id);
                self.push(PREFRAG_START);
                let fragment = CodeFragment::new(
                    &verbatim.context,
                    &verbatim.text,
                    SrcLang::from_file_name(&lang_ext),
                )
                .example(verbatim.is_example, &verbatim.example_file)
                .line_numbers(true);
                self.write_code(&lang_ext, &fragment);
                self.push(PREFRAG_END);
                self.force_start_paragraph(tree, id);
            }
            VerbatimKind::Verbatim => {
                self.force_end_paragraph(tree, id);
                self.push("<pre class=\"fragment\">");
                self.filter(&verbatim.text);
                self.push("</pre>");
                self.force_start_paragraph(tree, id);
            }
            VerbatimKind::HtmlOnly => {
                if verbatim.is_block {
                    self.force_end_paragraph(tree, id);
                }
                self.push(&verbatim.text);
                if verbatim.is_block {
                    self.force_start_paragraph(tree, id);
                }
            }
            VerbatimKind::ManOnly
            | VerbatimKind::LatexOnly
            | VerbatimKind::RtfOnly
            | VerbatimKind::XmlOnly
            | VerbatimKind::DocbookOnly => {}
            VerbatimKind::Dot | VerbatimKind::Msc | VerbatimKind::PlantUml => {
                self.force_end_paragraph(tree, id);
                let graphs = &mut *self.ctx.graphs;
                let out = &mut *self.out;
                let (text, rel_path, context) =
                    (&verbatim.text, &verbatim.rel_path, &verbatim.context);
                let result = match verbatim.kind {
                    VerbatimKind::Dot => graphs.write_inline_dot(out, text, rel_path, context),
                    VerbatimKind::Msc => graphs.write_inline_msc(out, text, rel_path, context),
                    _ => graphs.write_inline_plantuml(out, text, rel_path, context),
                };
                if let Err(err) = result {
                    error!(kind:? = verbatim.kind, err:%; "Skipping inline diagram");
                }
                self.force_start_paragraph(tree, id);
            }
        }
    }

    fn visit_composite_pre(&mut self, tree: &DocTree, id: NodeId, node: &Composite) {
        // Images for other formats hide their caption even when already hidden.
        if matches!(node, Composite::Image(image) if image.kind != ImageKind::Html) {
            self.push_enabled();
            self.hide = true;
            return;
        }
        if self.hide {
            return;
        }
        let has_children = !tree.children(id).is_empty();

        match node {
            Composite::Root { .. }
            | Composite::Title
            | Composite::Internal
            | Composite::Copy
            | Composite::Text
            | Composite::ParBlock => {}
            Composite::Para => {
                let first = first_non_white_space(tree, id);
                if self.paragraph_tagged(tree, id, first) {
                    let context = paragraph_context(tree, id).context;
                    self.push("<p");
                    self.push(context.class_attr());
                    self.push(">");
                }
            }
            Composite::AutoList(list) => {
                self.force_end_paragraph(tree, id);
                if list.is_enum_list {
                    let list_type = LIST_TYPES[list.depth % LIST_TYPES.len()];
                    self.push(&format!("<ol type=\"{list_type}\">"));
                } else {
                    self.push("<ul>");
                }
                self.newline_unless_pre();
            }
            Composite::AutoListItem | Composite::SimpleListItem => self.push("<li>"),
            Composite::SimpleList => {
                self.force_end_paragraph(tree, id);
                self.push("<ul>");
                self.newline_unless_pre();
            }
            Composite::SimpleSect(sect) => {
                self.force_end_paragraph(tree, id);
                self.push(&format!("<dl class=\"section {}\"><dt>", sect.kind));
                let translator = self.ctx.translator;
                self.push(translator.simple_sect(sect.kind));
                if !matches!(sect.kind, SimpleSectKind::User | SimpleSectKind::Rcs) {
                    self.push("</dt><dd>");
                }
            }
            Composite::Section(section) => {
                self.force_end_paragraph(tree, id);
                self.push(&format!(
                    "<h{}><a class=\"anchor\" id=\"{}\"></a>\n",
                    section.level, section.anchor
                ));
                self.filter(&section.title);
                self.push(&format!("</h{}>\n", section.level));
            }
            Composite::HtmlList(list) => {
                self.force_end_paragraph(tree, id);
                let tag = match list.kind {
                    HtmlListKind::Ordered => "ol",
                    HtmlListKind::Unordered => "ul",
                };
                self.push(&format!("<{tag}{}>\n", attribs_to_string(&list.attribs)));
            }
            Composite::HtmlListItem(attribs) => {
                self.push(&format!("<li{}>", attribs_to_string(attribs)));
                self.newline_unless_pre();
            }
            Composite::HtmlDescList(attribs) => {
                self.force_end_paragraph(tree, id);
                self.push(&format!("<dl{}>\n", attribs_to_string(attribs)));
            }
            Composite::HtmlDescTitle(attribs) => {
                self.push(&format!("<dt{}>", attribs_to_string(attribs)));
            }
            Composite::HtmlDescData(attribs) => {
                self.push(&format!("<dd{}>", attribs_to_string(attribs)));
            }
            Composite::HtmlTable(attribs) => {
                self.force_end_paragraph(tree, id);
                let attribs = attribs_to_string(attribs);
                if attribs.is_empty() {
                    self.push("<table class=\"doxtable\">\n");
                } else {
                    self.push(&format!("<table {attribs}>\n"));
                }
            }
            Composite::HtmlRow(attribs) => {
                self.push(&format!("<tr{}>\n", attribs_to_string(attribs)));
            }
            Composite::HtmlCell(cell) => {
                let tag = if cell.is_heading { "th" } else { "td" };
                self.push(&format!("<{tag}{}>", attribs_to_string(&cell.attribs)));
            }
            Composite::HtmlCaption(attribs) => {
                self.push("<caption");
                self.push(&attribs_to_string(attribs));
                if !attribs.iter().any(|a: &HtmlAttrib| a.name == "align") {
                    self.push(" align=\"bottom\"");
                }
                self.push(">");
            }
            Composite::HtmlBlockQuote(attribs) => {
                self.force_end_paragraph(tree, id);
                let attribs = attribs_to_string(attribs);
                if attribs.is_empty() {
                    self.push("<blockquote class=\"doxtable\">\n");
                } else {
                    self.push(&format!("<blockquote {attribs}>\n"));
                }
            }
            Composite::HtmlHeader(header) => {
                self.force_end_paragraph(tree, id);
                self.push(&format!(
                    "<h{}{}>",
                    header.level,
                    attribs_to_string(&header.attribs)
                ));
            }
            Composite::HRef(href) => match href.url.strip_prefix("mailto:") {
                Some(address) => self.write_obfuscated_mail_address(address),
                None => {
                    let url = correct_url(&href.url, &href.rel_path);
                    self.push(&format!(
                        "<a href=\"{}\"{}>",
                        convert_to_xml(&url),
                        attribs_to_string(&href.attribs)
                    ));
                }
            },
            Composite::Image(image) => {
                self.force_end_paragraph(tree, id);
                let base_name = image
                    .name
                    .rsplit(['/', '\\'])
                    .next()
                    .unwrap_or(image.name.as_str());
                self.push("<div class=\"image\">\n");
                let attribs = attribs_to_string(&image.attribs);
                if image.url.is_empty() {
                    self.push(&format!(
                        "<img src=\"{}{}\" alt=\"{base_name}\"{attribs}/>\n",
                        image.rel_path, image.name
                    ));
                } else {
                    self.push(&format!(
                        "<img src=\"{}\" {attribs}/>\n",
                        correct_url(&image.url, &image.rel_path)
                    ));
                }
                if has_children {
                    self.push("<div class=\"caption\">\n");
                }
            }
            Composite::DotFile(diagram)
            | Composite::MscFile(diagram)
            | Composite::DiaFile(diagram) => {
                self.force_end_paragraph(tree, id);
                let class = match node {
                    Composite::DotFile(_) => "dotgraph",
                    Composite::MscFile(_) => "mscgraph",
                    _ => "diagraph",
                };
                self.push(&format!("<div class=\"{class}\">\n"));

                let graphs = &mut *self.ctx.graphs;
                let out = &mut *self.out;
                let file = Path::new(&diagram.file);
                match node {
                    Composite::DotFile(_) => {
                        graphs.write_dot_file(out, file, &diagram.rel_path, &diagram.context)
                    }
                    Composite::MscFile(_) => {
                        graphs.write_msc_file(out, file, &diagram.rel_path, &diagram.context)
                    }
                    _ => graphs.write_dia_file(out, file, &diagram.rel_path, &diagram.context),
                }

                if has_children {
                    self.push("<div class=\"caption\">\n");
                }
            }
            Composite::Link(link) => {
                self.start_link(&link.reference, &link.file, &link.rel_path, &link.anchor, "");
            }
            Composite::Ref(reference) => {
                if !reference.file.is_empty() {
                    let anchor = if reference.is_sub_page { "" } else { reference.anchor.as_str() };
                    self.start_link(
                        &reference.reference,
                        &reference.file,
                        &reference.rel_path,
                        anchor,
                        "",
                    );
                }
                if !reference.has_link_text {
                    self.filter(&reference.target_title);
                }
            }
            Composite::SecRefItem(item) => {
                let file = self.with_extension(&item.file);
                self.push(&format!("<li><a href=\"{file}#{}\">", item.anchor));
            }
            Composite::SecRefList => {
                self.force_end_paragraph(tree, id);
                self.push("<div class=\"multicol\">\n<ul>\n");
            }
            Composite::ParamSect(sect) => {
                self.force_end_paragraph(tree, id);
                let class = match sect.kind {
                    ParamSectKind::Param => "params",
                    ParamSectKind::RetVal => "retval",
                    ParamSectKind::Exception => "exception",
                    ParamSectKind::TemplateParam => "tparams",
                };
                let translator = self.ctx.translator;
                let heading = translator.param_sect(sect.kind);
                self.push(&format!(
                    "<dl class=\"{class}\"><dt>{heading}</dt><dd>\n  <table class=\"{class}\">\n"
                ));
            }
            Composite::ParamList(list) => {
                self.push("    <tr>");
                let sect = tree
                    .parent(id)
                    .and_then(|p| match tree.node(p) {
                        DocNode::Composite(Composite::ParamSect(sect)) => Some(*sect),
                        _ => None,
                    });

                if sect.is_some_and(|s| s.has_in_out_specifier) {
                    self.push("<td class=\"paramdir\">");
                    match list.direction {
                        ParamDir::Unspecified => {}
                        ParamDir::In => self.push("[in]"),
                        ParamDir::Out => self.push("[out]"),
                        ParamDir::InOut => self.push("[in,out]"),
                    }
                    self.push("</td>");
                }
                if sect.is_some_and(|s| s.has_type_specifier) {
                    self.push("<td class=\"paramtype\">");
                    for (i, ty) in list.param_types.iter().enumerate() {
                        if i > 0 {
                            self.push("&#160;|&#160;");
                        }
                        self.write_param_word(ty);
                    }
                    self.push("</td>");
                }
                self.push("<td class=\"paramname\">");
                for (i, param) in list.parameters.iter().enumerate() {
                    if i > 0 {
                        self.push(",");
                    }
                    self.write_param_word(param);
                }
                self.push("</td><td>");
            }
            Composite::XRefItem(item) => {
                if item.title.is_empty() {
                    return;
                }
                self.force_end_paragraph(tree, id);
                let anonymous = item.file == "@";
                if anonymous {
                    self.push(&format!("<dl class=\"{}\"><dt><b>", item.key));
                } else {
                    let file = self.with_extension(&item.file);
                    self.push(&format!(
                        "<dl class=\"{}\"><dt><b><a class=\"el\" href=\"{}{file}#{}\">",
                        item.key, item.rel_path, item.anchor
                    ));
                }
                self.filter(&item.title);
                self.push(":");
                if !anonymous {
                    self.push("</a>");
                }
                self.push("</b></dt><dd>");
            }
            Composite::InternalRef(link) => {
                self.start_link("", &link.file, &link.rel_path, &link.anchor, "");
            }
        }
    }

    fn visit_composite_post(&mut self, tree: &DocTree, id: NodeId, node: &Composite) {
        if matches!(node, Composite::Image(image) if image.kind != ImageKind::Html) {
            self.pop_enabled();
            return;
        }
        if self.hide {
            return;
        }
        let has_children = !tree.children(id).is_empty();

        match node {
            Composite::Root { .. }
            | Composite::Internal
            | Composite::Copy
            | Composite::Text
            | Composite::ParBlock => {}
            Composite::Para => {
                let last = last_non_white_space(tree, id);
                if self.paragraph_tagged(tree, id, last) {
                    self.push("</p>\n");
                }
            }
            Composite::Title => self.push("</dt><dd>"),
            Composite::AutoList(list) => {
                self.push(if list.is_enum_list { "</ol>" } else { "</ul>" });
                self.newline_unless_pre();
                self.force_start_paragraph(tree, id);
            }
            Composite::AutoListItem | Composite::SimpleListItem => {
                self.push("</li>");
                self.newline_unless_pre();
            }
            Composite::SimpleList => {
                self.push("</ul>");
                self.newline_unless_pre();
                self.force_start_paragraph(tree, id);
            }
            Composite::SimpleSect(_) => {
                self.push("</dd></dl>\n");
                self.force_start_paragraph(tree, id);
            }
            Composite::Section(_) => self.force_start_paragraph(tree, id),
            Composite::HtmlList(list) => {
                self.push(match list.kind {
                    HtmlListKind::Ordered => "</ol>",
                    HtmlListKind::Unordered => "</ul>",
                });
                self.newline_unless_pre();
                self.force_start_paragraph(tree, id);
            }
            Composite::HtmlListItem(_) => self.push("</li>\n"),
            Composite::HtmlDescList(_) => {
                self.push("</dl>\n");
                self.force_start_paragraph(tree, id);
            }
            Composite::HtmlDescTitle(_) => self.push("</dt>\n"),
            Composite::HtmlDescData(_) => self.push("</dd>\n"),
            Composite::HtmlTable(_) => {
                self.push("</table>\n");
                self.force_start_paragraph(tree, id);
            }
            Composite::HtmlRow(_) => self.push("</tr>\n"),
            Composite::HtmlCell(cell) => self.push(if cell.is_heading { "</th>" } else { "</td>" }),
            Composite::HtmlCaption(_) => self.push("</caption>\n"),
            Composite::HtmlBlockQuote(_) => {
                self.push("</blockquote>\n");
                self.force_start_paragraph(tree, id);
            }
            Composite::HtmlHeader(header) => {
                self.push(&format!("</h{}>\n", header.level));
                self.force_start_paragraph(tree, id);
            }
            Composite::HRef(_) | Composite::Link(_) => self.end_link(),
            Composite::Image(_) => {
                if has_children {
                    self.push("</div>");
                }
                self.push("</div>\n");
                self.force_start_paragraph(tree, id);
            }
            Composite::DotFile(_) | Composite::MscFile(_) | Composite::DiaFile(_) => {
                if has_children {
                    self.push("</div>\n");
                }
                self.push("</div>\n");
                self.force_start_paragraph(tree, id);
            }
            Composite::Ref(reference) => {
                if !reference.file.is_empty() {
                    self.end_link();
                }
            }
            Composite::SecRefItem(_) => self.push("</a></li>\n"),
            Composite::SecRefList => {
                self.push("</ul>\n</div>\n");
                self.force_start_paragraph(tree, id);
            }
            Composite::ParamSect(_) => {
                self.push("  </table>\n  </dd>\n</dl>\n");
                self.force_start_paragraph(tree, id);
            }
            Composite::ParamList(_) => self.push("</td></tr>\n"),
            Composite::XRefItem(item) => {
                if item.title.is_empty() {
                    return;
                }
                self.push("</dd></dl>\n");
                self.force_start_paragraph(tree, id);
            }
            Composite::InternalRef(_) => {
                self.end_link();
                self.push(" ");
            }
        }
    }

    fn newline_unless_pre(&mut self) {
        if !self.inside_pre {
            self.push("\n");
        }
    }

    /// Parameter names and types are plain or linked words.
    fn write_param_word(&mut self, leaf: &Leaf) {
        match leaf {
            Leaf::Word(word) => self.filter(word),
            Leaf::LinkedWord(word) => {
                self.start_link(
                    &word.reference,
                    &word.file,
                    &word.rel_path,
                    &word.anchor,
                    &word.tooltip,
                );
                self.filter(&word.word);
                self.end_link();
            }
            other => trace!(leaf:? = other; "Ignoring non-word parameter part"),
        }
    }
}

impl DocVisitor for HtmlDocVisitor<'_> {
    fn visit(&mut self, tree: &DocTree, id: NodeId) {
        if let DocNode::Leaf(leaf) = tree.node(id) {
            self.visit_leaf(tree, id, leaf);
        }
    }

    fn visit_pre(&mut self, tree: &DocTree, id: NodeId) {
        if let DocNode::Composite(node) = tree.node(id) {
            self.visit_composite_pre(tree, id, node);
        }
    }

    fn visit_post(&mut self, tree: &DocTree, id: NodeId) {
        if let DocNode::Composite(node) = tree.node(id) {
            self.visit_composite_post(tree, id, node);
        }
    }
}

/// Split `text` into chunks of alternating `first` and `second` characters.
fn mail_chunks(text: &str, first: usize, second: usize) -> Vec<&str> {
    let mut chunks = Vec::new();
    let mut size = first;
    let mut rest = text;
    while !rest.is_empty() {
        let end = rest
            .char_indices()
            .nth(size)
            .map_or(rest.len(), |(index, _)| index);
        let (chunk, tail) = rest.split_at(end);
        chunks.push(chunk);
        rest = tail;
        size = if size == first { second } else { first };
    }
    chunks
}
