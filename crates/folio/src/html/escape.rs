//! Text escaping for element content and attribute values.

use folio_core::doc::HtmlAttrib;

/// Escape `<`, `>` and `&` for element content.
pub fn filter(out: &mut String, text: &str) {
    for c in text.chars() {
        match c {
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '&' => out.push_str("&amp;"),
            _ => out.push(c),
        }
    }
}

/// Escape a value placed inside a double-quoted attribute.
///
/// Only `&` and `"` are replaced; formula sources stay readable in `alt`.
pub fn filter_quoted_cdata_attr(out: &mut String, text: &str) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
}

/// Escape the five XML special characters.
pub fn convert_to_xml(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '&' => result.push_str("&amp;"),
            '\'' => result.push_str("&apos;"),
            '"' => result.push_str("&quot;"),
            _ => result.push(c),
        }
    }
    result
}

/// Escape text for HTML content, quoting apostrophes numerically.
pub fn convert_to_html(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '&' => result.push_str("&amp;"),
            '\'' => result.push_str("&#39;"),
            '"' => result.push_str("&quot;"),
            _ => result.push(c),
        }
    }
    result
}

/// Render attributes as ` name="value"` pairs, skipping empty values.
pub fn attribs_to_string(attribs: &[HtmlAttrib]) -> String {
    let mut result = String::new();
    for attrib in attribs.iter().filter(|a| !a.value.is_empty()) {
        result.push(' ');
        result.push_str(&attrib.name);
        result.push_str("=\"");
        result.push_str(&convert_to_xml(&attrib.value));
        result.push('"');
    }
    result
}
