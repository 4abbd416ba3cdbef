//! Code fragments: the parser interface the renderer hands listings to, and
//! the HTML sink the parsers write into.
//!
//! A [`CodeParser`] turns the text of a fragment into calls on a
//! [`CodeOutput`]. Parsers are looked up by file extension in
//! [`CodeParsers`]; anything unregistered goes through [`PlainCodeParser`].

use indexmap::IndexMap;
use log::trace;

use folio_core::language::SrcLang;

use crate::html::escape::filter;

/// Receiver of highlighted code.
pub trait CodeOutput {
    fn start_code_line(&mut self, has_line_numbers: bool);

    fn end_code_line(&mut self);

    fn write_line_number(&mut self, line: usize);

    /// Write source text that needs escaping.
    fn codify(&mut self, text: &str);
}

/// A piece of source code to be rendered.
#[derive(Debug, Clone, Copy)]
pub struct CodeFragment<'a> {
    /// Scope the fragment is documented in, used to resolve links.
    pub context: &'a str,
    pub text: &'a str,
    pub lang: SrcLang,
    pub is_example: bool,
    pub example_file: &'a str,
    /// File the fragment was included from.
    pub file: Option<&'a str>,
    /// First and last line to render, 1-based and inclusive.
    pub start_line: Option<usize>,
    pub end_line: Option<usize>,
    /// The text is a part of `file` rather than all of it.
    pub inline_fragment: bool,
    pub show_line_numbers: bool,
}

impl<'a> CodeFragment<'a> {
    pub fn new(context: &'a str, text: &'a str, lang: SrcLang) -> Self {
        Self {
            context,
            text,
            lang,
            is_example: false,
            example_file: "",
            file: None,
            start_line: None,
            end_line: None,
            inline_fragment: false,
            show_line_numbers: false,
        }
    }

    pub fn example(mut self, is_example: bool, example_file: &'a str) -> Self {
        self.is_example = is_example;
        self.example_file = example_file;
        self
    }

    pub fn in_file(mut self, file: &'a str) -> Self {
        self.file = Some(file);
        self
    }

    pub fn lines(mut self, start_line: usize, end_line: usize) -> Self {
        self.start_line = Some(start_line);
        self.end_line = Some(end_line);
        self
    }

    pub fn inline_fragment(mut self, inline_fragment: bool) -> Self {
        self.inline_fragment = inline_fragment;
        self
    }

    pub fn line_numbers(mut self, show: bool) -> Self {
        self.show_line_numbers = show;
        self
    }
}

/// A source-language parser that renders code fragments.
pub trait CodeParser {
    fn parse_code(&self, out: &mut dyn CodeOutput, fragment: &CodeFragment<'_>);
}

/// Renders fragments line by line without highlighting.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainCodeParser;

impl CodeParser for PlainCodeParser {
    fn parse_code(&self, out: &mut dyn CodeOutput, fragment: &CodeFragment<'_>) {
        let first = fragment.start_line.unwrap_or(1);
        let last = fragment.end_line.unwrap_or(usize::MAX);
        trace!(
            lang = fragment.lang.as_str(),
            first,
            inline = fragment.inline_fragment;
            "Plain code fragment"
        );

        for (index, line) in fragment.text.lines().enumerate() {
            let number = index + 1;
            if number < first {
                continue;
            }
            if number > last {
                break;
            }
            out.start_code_line(fragment.show_line_numbers);
            if fragment.show_line_numbers {
                out.write_line_number(number);
            }
            out.codify(line);
            out.end_code_line();
        }
    }
}

/// Writes code lines as `<div class="line">` rows.
pub struct HtmlCodeWriter<'a> {
    out: &'a mut String,
}

impl<'a> HtmlCodeWriter<'a> {
    pub fn new(out: &'a mut String) -> Self {
        Self { out }
    }
}

impl CodeOutput for HtmlCodeWriter<'_> {
    fn start_code_line(&mut self, _has_line_numbers: bool) {
        self.out.push_str("<div class=\"line\">");
    }

    fn end_code_line(&mut self) {
        self.out.push_str("</div>\n");
    }

    fn write_line_number(&mut self, line: usize) {
        self.out
            .push_str(&format!("<span class=\"lineno\">{line:5}</span>"));
    }

    fn codify(&mut self, text: &str) {
        filter(self.out, text);
    }
}

/// Code parsers by file extension.
#[derive(Default)]
pub struct CodeParsers {
    parsers: IndexMap<String, Box<dyn CodeParser>>,
    fallback: PlainCodeParser,
}

impl CodeParsers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `parser` for `extension` (`"py"` or `".py"`).
    pub fn register(&mut self, extension: &str, parser: Box<dyn CodeParser>) {
        self.parsers.insert(normalize(extension), parser);
    }

    /// The parser for `extension`, or the plain parser.
    pub fn parser_for(&self, extension: &str) -> &dyn CodeParser {
        match self.parsers.get(&normalize(extension)) {
            Some(parser) => parser.as_ref(),
            None => &self.fallback,
        }
    }
}

fn normalize(extension: &str) -> String {
    extension.trim_start_matches('.').to_ascii_lowercase()
}

/// The lines between the line holding the first occurrence of `marker` and
/// the line holding the second one.
///
/// Without a second marker the block runs to the end of `text`; without a
/// first marker it is empty.
pub fn extract_block<'t>(text: &'t str, marker: &str) -> &'t str {
    let Some(first) = text.find(marker) else {
        return "";
    };
    let Some(newline) = text[first..].find('\n') else {
        return "";
    };
    let start = first + newline + 1;

    let Some(offset) = text[start..].find(marker) else {
        return &text[start..];
    };
    let second = start + offset;
    let end = text[..second].rfind('\n').map_or(0, |i| i + 1);
    if start < end { &text[start..end] } else { "" }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        events: Vec<String>,
    }

    impl CodeOutput for Recorder {
        fn start_code_line(&mut self, has_line_numbers: bool) {
            self.events.push(format!("start({has_line_numbers})"));
        }

        fn end_code_line(&mut self) {
            self.events.push("end".to_string());
        }

        fn write_line_number(&mut self, line: usize) {
            self.events.push(format!("#{line}"));
        }

        fn codify(&mut self, text: &str) {
            self.events.push(text.to_string());
        }
    }

    #[test]
    fn test_plain_parser_numbers_lines() {
        let mut out = Recorder::default();
        let fragment = CodeFragment::new("", "a\nb\n", SrcLang::Cpp).line_numbers(true);
        PlainCodeParser.parse_code(&mut out, &fragment);

        assert_eq!(
            out.events,
            ["start(true)", "#1", "a", "end", "start(true)", "#2", "b", "end"]
        );
    }

    #[test]
    fn test_plain_parser_honours_line_bounds() {
        let mut out = Recorder::default();
        let fragment = CodeFragment::new("", "1\n2\n3\n4\n", SrcLang::Cpp).lines(2, 3);
        PlainCodeParser.parse_code(&mut out, &fragment);

        assert_eq!(out.events, ["start(false)", "2", "end", "start(false)", "3", "end"]);
    }

    #[test]
    fn test_html_code_writer() {
        let mut html = String::new();
        let fragment = CodeFragment::new("", "if (a < b)", SrcLang::Cpp).line_numbers(true);
        PlainCodeParser.parse_code(&mut HtmlCodeWriter::new(&mut html), &fragment);

        assert_eq!(
            html,
            "<div class=\"line\"><span class=\"lineno\">    1</span>if (a &lt; b)</div>\n"
        );
    }

    #[test]
    fn test_registry_falls_back_to_plain() {
        struct Shouting;
        impl CodeParser for Shouting {
            fn parse_code(&self, out: &mut dyn CodeOutput, fragment: &CodeFragment<'_>) {
                out.codify(&fragment.text.to_uppercase());
            }
        }

        let mut parsers = CodeParsers::new();
        parsers.register(".PY", Box::new(Shouting));

        let fragment = CodeFragment::new("", "pass", SrcLang::Python);
        let mut out = Recorder::default();
        parsers.parser_for("py").parse_code(&mut out, &fragment);
        assert_eq!(out.events, ["PASS"]);

        let mut out = Recorder::default();
        parsers.parser_for(".rs").parse_code(&mut out, &fragment);
        assert_eq!(out.events, ["start(false)", "pass", "end"]);
    }

    #[test]
    fn test_extract_block() {
        let text = "intro\n// [setup]\nlet a = 1;\nlet b = 2;\n// [setup]\nrest\n";
        assert_eq!(extract_block(text, "[setup]"), "let a = 1;\nlet b = 2;\n");
    }

    #[test]
    fn test_extract_block_without_closing_marker() {
        let text = "// [tail]\nx\ny\n";
        assert_eq!(extract_block(text, "[tail]"), "x\ny\n");
    }

    #[test]
    fn test_extract_block_missing_marker() {
        assert_eq!(extract_block("a\nb\n", "[none]"), "");
        assert_eq!(extract_block("// [m]\n// [m]\n", "[m]"), "");
    }
}
