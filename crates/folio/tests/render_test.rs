//! Integration tests for rendering comment trees through `HtmlRenderer`.

use std::{cell::RefCell, rc::Rc};

use proptest::prelude::*;

use folio::{
    config::{AppConfig, GraphConfig, HtmlConfig, TagFileConfig},
    doc::{
        AutoList, Composite, DocTree, HtmlCell, Image, ImageKind, IncOperator, IncOperatorKind,
        IndexEntry, Leaf, NodeId, ParamDir, ParamList, ParamSect, ParamSectKind, SimpleSect,
        SimpleSectKind, Style, StyleChange, Url, Verbatim, VerbatimKind,
    },
    code::{CodeFragment, CodeOutput, CodeParser},
    graph::{DiagramKind, GraphError, GraphRenderer, RenderJob},
    html::HtmlRenderer,
    translator::{English, Translator},
};

/// Answers every job with an empty image map.
#[derive(Default)]
struct RecordingRenderer {
    kinds: Rc<RefCell<Vec<DiagramKind>>>,
}

impl GraphRenderer for RecordingRenderer {
    fn render(&mut self, job: &RenderJob<'_>) -> Result<String, GraphError> {
        self.kinds.borrow_mut().push(job.kind);
        Ok(String::new())
    }
}

fn renderer() -> HtmlRenderer {
    HtmlRenderer::with_graph_renderer(&AppConfig::default(), Box::new(RecordingRenderer::default()))
}

fn render(tree: &DocTree) -> String {
    renderer().render(tree, ".cpp")
}

fn word(text: &str) -> Leaf {
    Leaf::Word(text.to_string())
}

fn single_line_para() -> (DocTree, NodeId) {
    let mut tree = DocTree::new(Composite::Root { single_line: true });
    let para = tree.append(tree.root(), Composite::Para);
    (tree, para)
}

fn multi_line_para() -> (DocTree, NodeId) {
    let mut tree = DocTree::new(Composite::Root { single_line: false });
    let para = tree.append(tree.root(), Composite::Para);
    (tree, para)
}

#[test]
fn test_bold_word_on_single_line() {
    let (mut tree, para) = single_line_para();
    tree.append(para, Leaf::StyleChange(StyleChange::new(Style::Bold, true)));
    tree.append(para, word("word"));
    tree.append(para, Leaf::StyleChange(StyleChange::new(Style::Bold, false)));

    assert_eq!(render(&tree), "<b>word</b>");
}

#[test]
fn test_root_paragraphs_get_tags() {
    let mut tree = DocTree::new(Composite::Root { single_line: false });
    let first = tree.append(tree.root(), Composite::Para);
    tree.append(first, word("first"));
    let second = tree.append(tree.root(), Composite::Para);
    tree.append(second, word("second"));

    assert_eq!(render(&tree), "<p>first</p>\n<p>second</p>\n");
}

#[test]
fn test_whitespace_only_paragraph_is_dropped() {
    let (mut tree, para) = multi_line_para();
    tree.append(para, Leaf::WhiteSpace("  ".to_string()));

    assert_eq!(render(&tree), "");
}

#[test]
fn test_list_breaks_paragraph() {
    let (mut tree, para) = multi_line_para();
    tree.append(para, word("before"));
    let list = tree.append(
        para,
        Composite::AutoList(AutoList {
            is_enum_list: false,
            depth: 0,
        }),
    );
    let item = tree.append(list, Composite::AutoListItem);
    let item_para = tree.append(item, Composite::Para);
    tree.append(item_para, word("x"));
    tree.append(para, word("after"));

    assert_eq!(
        render(&tree),
        "<p>before</p><ul>\n<li>x</li>\n</ul>\n<p>after</p>\n"
    );
}

#[test]
fn test_nested_enum_list_types() {
    let (mut tree, para) = multi_line_para();
    let list = tree.append(
        para,
        Composite::AutoList(AutoList {
            is_enum_list: true,
            depth: 1,
        }),
    );
    let item = tree.append(list, Composite::AutoListItem);
    tree.append(item, word("one"));

    assert_eq!(render(&tree), "<ol type=\"a\">\n<li>one</li>\n</ol>\n");
}

#[test]
fn test_table_cells() {
    let (mut tree, para) = multi_line_para();
    let table = tree.append(para, Composite::HtmlTable(Vec::new()));
    let row = tree.append(table, Composite::HtmlRow(Vec::new()));

    let single = tree.append(
        row,
        Composite::HtmlCell(HtmlCell {
            is_heading: false,
            attribs: Vec::new(),
        }),
    );
    let only = tree.append(single, Composite::Para);
    tree.append(only, word("cell"));

    let double = tree.append(
        row,
        Composite::HtmlCell(HtmlCell {
            is_heading: false,
            attribs: Vec::new(),
        }),
    );
    let a = tree.append(double, Composite::Para);
    tree.append(a, word("a"));
    let b = tree.append(double, Composite::Para);
    tree.append(b, word("b"));

    assert_eq!(
        render(&tree),
        "<table class=\"doxtable\">\n<tr>\n<td>cell</td>\
         <td><p class=\"starttd\">a</p>\n<p class=\"endtd\">b</p>\n</td></tr>\n</table>\n"
    );
}

#[test]
fn test_param_section() {
    let (mut tree, para) = multi_line_para();
    let sect = tree.append(
        para,
        Composite::ParamSect(ParamSect {
            kind: ParamSectKind::Param,
            has_in_out_specifier: true,
            has_type_specifier: false,
        }),
    );
    let list = tree.append(
        sect,
        Composite::ParamList(ParamList {
            parameters: vec![word("count")],
            param_types: Vec::new(),
            direction: ParamDir::In,
        }),
    );
    let description = tree.append(list, Composite::Para);
    tree.append(description, word("How many."));

    assert_eq!(
        render(&tree),
        "<dl class=\"params\"><dt>Parameters</dt><dd>\n  <table class=\"params\">\n\
         \x20   <tr><td class=\"paramdir\">[in]</td><td class=\"paramname\">count</td>\
         <td>How many.</td></tr>\n  </table>\n  </dd>\n</dl>\n"
    );
}

#[test]
fn test_simple_section() {
    let (mut tree, para) = multi_line_para();
    let sect = tree.append(
        para,
        Composite::SimpleSect(SimpleSect {
            kind: SimpleSectKind::Note,
        }),
    );
    let body = tree.append(sect, Composite::Para);
    tree.append(body, word("Careful."));

    assert_eq!(
        render(&tree),
        "<dl class=\"section note\"><dt>Note</dt><dd>Careful.</dd></dl>\n"
    );
}

#[test]
fn test_include_operators_are_separated() {
    let mut tree = DocTree::new(Composite::Root { single_line: true });
    let root = tree.root();
    tree.append(root, Leaf::IncOperator(IncOperator::new(IncOperatorKind::Line, "a").first()));
    tree.append(root, Leaf::IncOperator(IncOperator::new(IncOperatorKind::Skip, "")));
    tree.append(root, Leaf::IncOperator(IncOperator::new(IncOperatorKind::Skip, "")));
    tree.append(root, Leaf::IncOperator(IncOperator::new(IncOperatorKind::Line, "b").last()));

    let line = |text: &str| {
        format!("<div class=\"line\"><span class=\"lineno\">    1</span>{text}</div>\n")
    };
    assert_eq!(
        render(&tree),
        format!(
            "<div class=\"fragment\">{}\n\n\n{}</div><!-- fragment -->",
            line("a"),
            line("b")
        )
    );
}

#[test]
fn test_hidden_image_suppresses_caption() {
    let (mut tree, para) = multi_line_para();
    let image = tree.append(
        para,
        Composite::Image(Image {
            kind: ImageKind::Latex,
            name: "pic.eps".to_string(),
            url: String::new(),
            rel_path: String::new(),
            attribs: Vec::new(),
        }),
    );
    tree.append(image, word("caption"));
    tree.append(image, Leaf::IndexEntry(IndexEntry::new("hidden")));

    let mut renderer = renderer();
    assert_eq!(renderer.render(&tree, ""), "");
    assert!(renderer.index().is_empty());
}

#[test]
fn test_html_image_with_caption() {
    let (mut tree, para) = multi_line_para();
    let image = tree.append(
        para,
        Composite::Image(Image {
            kind: ImageKind::Html,
            name: "img/pic.png".to_string(),
            url: String::new(),
            rel_path: "../".to_string(),
            attribs: Vec::new(),
        }),
    );
    tree.append(image, word("caption"));

    assert_eq!(
        render(&tree),
        "<div class=\"image\">\n<img src=\"../img/pic.png\" alt=\"pic.png\"/>\n\
         <div class=\"caption\">\ncaption</div></div>\n"
    );
}

#[test]
fn test_index_entry_registers_anchor() {
    let (mut tree, para) = single_line_para();
    tree.append(para, Leaf::IndexEntry(IndexEntry::new("binary tree")));

    let mut renderer = renderer();
    assert_eq!(renderer.render(&tree, ""), "<a name=\"binary%20tree\"></a>");
    assert_eq!(renderer.index().len(), 1);
    assert_eq!(renderer.index().items()[0].word, "binary tree");
}

#[test]
fn test_web_url() {
    let (mut tree, para) = single_line_para();
    tree.append(para, Leaf::Url(Url::web("https://example.com/?a=1&b=2")));

    assert_eq!(
        render(&tree),
        "<a href=\"https://example.com/?a=1&b=2\">https://example.com/?a=1&amp;b=2</a>"
    );
}

/// Headings in German, everything else in English.
struct German;

impl Translator for German {
    fn simple_sect(&self, kind: SimpleSectKind) -> &str {
        match kind {
            SimpleSectKind::Note => "Hinweis",
            other => English.simple_sect(other),
        }
    }

    fn param_sect(&self, kind: ParamSectKind) -> &str {
        English.param_sect(kind)
    }

    fn classes(&self) -> &str {
        "Klassen"
    }

    fn namespaces(&self) -> &str {
        "Namensbereiche"
    }

    fn files(&self) -> &str {
        "Dateien"
    }

    fn related_pages(&self) -> &str {
        "Zusätzliche Informationen"
    }
}

/// Writes every fragment as a single upper-cased line.
struct ShoutingParser;

impl CodeParser for ShoutingParser {
    fn parse_code(&self, out: &mut dyn CodeOutput, fragment: &CodeFragment<'_>) {
        out.start_code_line(false);
        out.codify(&fragment.text.trim_end().to_uppercase());
        out.end_code_line();
    }
}

#[test]
fn test_custom_translator_and_code_parser() {
    let mut renderer = renderer().with_translator(Box::new(German));
    renderer.parsers_mut().register(".py", Box::new(ShoutingParser));

    let (mut tree, para) = multi_line_para();
    let sect = tree.append(
        para,
        Composite::SimpleSect(SimpleSect {
            kind: SimpleSectKind::Note,
        }),
    );
    let body = tree.append(sect, Composite::Para);
    tree.append(
        body,
        Leaf::Verbatim(Verbatim::new(VerbatimKind::Code, "print(x)\n").with_language(".py")),
    );

    let html = renderer.render(&tree, ".cpp");
    assert!(html.contains("<dt>Hinweis</dt>"), "{html}");
    assert!(html.contains("PRINT(X)"), "{html}");
    assert!(!html.contains("print(x)"), "{html}");
}

#[test]
fn test_fresh_renderers_are_idempotent() {
    let (mut tree, para) = multi_line_para();
    tree.append(para, word("text"));
    tree.append(para, Leaf::Verbatim(Verbatim::new(VerbatimKind::Code, "int x;\n")));
    tree.append(para, word("more"));

    assert_eq!(render(&tree), render(&tree));
}

#[test]
fn test_inline_dot_graph() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let config = AppConfig::new(
        HtmlConfig::new(dir.path(), ".html"),
        GraphConfig::default(),
        TagFileConfig::default(),
    );
    let kinds = Rc::new(RefCell::new(Vec::new()));
    let graph_renderer = RecordingRenderer {
        kinds: Rc::clone(&kinds),
    };
    let mut renderer = HtmlRenderer::with_graph_renderer(&config, Box::new(graph_renderer));

    let (mut tree, para) = single_line_para();
    tree.append(para, Leaf::Verbatim(Verbatim::new(VerbatimKind::Dot, "digraph { a -> b }")));

    let html = renderer.render(&tree, "");
    assert_eq!(
        html,
        "<div align=\"center\">\n<img src=\"dot_inline_dotgraph_1.png\" \
         alt=\"dot_inline_dotgraph_1.png\" border=\"0\" usemap=\"#dot_inline_dotgraph_1.map\"/>\n\
         </div>\n"
    );
    assert_eq!(*kinds.borrow(), [DiagramKind::Dot]);
    assert!(!dir.path().join("inline_dotgraph_1.dot").exists());
    assert_eq!(renderer.graphs().counters().dot(), 2);
}

fn mail_js_chunks(html: &str) -> String {
    let start = html.find("lto:'").expect("missing mailto") + "lto:'".len();
    let end = html.find("; return false;").expect("missing onclick end");
    html[start..end]
        .split("+'")
        .filter(|chunk| !chunk.is_empty())
        .map(|chunk| chunk.trim_end_matches('\''))
        .collect()
}

fn mail_visible_text(html: &str) -> String {
    let marker = "return false;\">";
    let start = html.find(marker).expect("missing link text") + marker.len();
    let end = html.rfind("</a>").expect("missing link end");
    html[start..end].replace("<span style=\"display: none;\">.nosp@m.</span>", "")
}

proptest! {
    #[test]
    fn prop_mail_address_reconstructs(address in "[a-z0-9._-]{1,12}@[a-z0-9-]{1,10}\\.[a-z]{2,4}") {
        let (mut tree, para) = single_line_para();
        tree.append(para, Leaf::Url(Url::email(address.clone())));
        let html = render(&tree);

        prop_assert!(html.starts_with("<a href=\"#\" onclick=\"location.href='mai'+'lto:'"));
        prop_assert!(!html.contains(&address));
        prop_assert_eq!(mail_js_chunks(&html), address.clone());
        prop_assert_eq!(mail_visible_text(&html), address);
    }
}
