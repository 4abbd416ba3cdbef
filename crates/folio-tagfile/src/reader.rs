//! Drives [`quick_xml`] over a tag file and feeds the events to the handler.

use std::borrow::Cow;

use log::{debug, error, info};
use quick_xml::{
    Reader,
    escape::{resolve_predefined_entity, unescape},
    events::{BytesStart, Event},
};

use crate::{
    TagFile,
    error::{Diagnostic, ErrorCode, ParseError},
    handler::{Attributes, TagFileHandler},
    span::{LineIndex, Span},
};

/// Read a tag file.
///
/// `tag_name` identifies the tag file in merged entries and file paths;
/// it is normally the path the tag file was loaded from.
///
/// Schema violations (unknown or misplaced elements, unknown compound
/// kinds) are logged and returned as warnings on the [`TagFile`].
///
/// # Errors
///
/// Returns [`ParseError`] when the document is not well-formed XML. The
/// error carries the span and line/column of the failure; nothing read from
/// the file is kept.
pub fn parse(source: &str, tag_name: &str) -> Result<TagFile, ParseError> {
    info!(tag_file = tag_name; "Reading tag file");

    let lines = LineIndex::new(source);
    let mut handler = TagFileHandler::new(tag_name);
    let mut reader = Reader::from_str(source);
    reader.config_mut().trim_text(false);
    let mut buf = Vec::new();
    // Elements still open, with the span of their start tag.
    let mut open: Vec<(String, Span)> = Vec::new();

    loop {
        let start = reader.buffer_position() as usize;
        let event = reader.read_event_into(&mut buf);
        let end = reader.buffer_position() as usize;
        handler.set_position(Span::new(start..end), lines.location(start));

        match event {
            Ok(Event::Start(e)) => {
                let name = element_name(&e);
                handler.start_element(&name, &attributes(&e));
                open.push((name, Span::new(start..end)));
            }
            Ok(Event::Empty(e)) => {
                let name = element_name(&e);
                handler.start_element(&name, &attributes(&e));
                handler.end_element(&name);
            }
            Ok(Event::End(e)) => {
                let name = String::from_utf8_lossy(e.local_name().as_ref()).into_owned();
                handler.end_element(&name);
                open.pop();
            }
            Ok(Event::Text(e)) => {
                let raw = String::from_utf8_lossy(&e);
                match unescape(&raw) {
                    Ok(text) => handler.characters(&text),
                    Err(_) => handler.characters(&raw),
                }
            }
            Ok(Event::CData(e)) => {
                handler.characters(&String::from_utf8_lossy(&e));
            }
            Ok(Event::GeneralRef(e)) => {
                let name = String::from_utf8_lossy(&e).into_owned();
                match resolve_reference(&name) {
                    Some(text) => handler.characters(&text),
                    None => {
                        let location = lines.location(start);
                        error!(
                            tag_file = tag_name,
                            line = location.line;
                            "Unsupported entity `&{name};`"
                        );
                        handler.emit(
                            Diagnostic::warning(format!("unknown entity reference `&{name};`"))
                                .with_code(ErrorCode::T002)
                                .with_label(Span::new(start..end), "dropped"),
                        );
                    }
                }
            }
            Ok(Event::Eof) => match open.pop() {
                Some((name, opened)) => {
                    let location = lines.location(end);
                    error!(
                        tag_file = tag_name,
                        line = location.line,
                        column = location.column;
                        "Unexpected end of tag file inside `<{name}>`"
                    );
                    let diagnostic = Diagnostic::error(format!(
                        "unexpected end of file at line {} column {}: `<{name}>` is not closed",
                        location.line, location.column
                    ))
                    .with_code(ErrorCode::T001)
                    .with_label(Span::new(end..end), "reading stopped here")
                    .with_secondary_label(opened, "opened here");
                    return Err(fail(handler, diagnostic));
                }
                None => break,
            },
            Ok(_) => {}
            Err(err) => {
                let location = lines.location(end);
                error!(
                    tag_file = tag_name,
                    line = location.line,
                    column = location.column;
                    "Fatal error in tag file: {err}"
                );
                let diagnostic = Diagnostic::error(format!(
                    "malformed tag file at line {} column {}: {err}",
                    location.line, location.column
                ))
                .with_code(ErrorCode::T001)
                .with_label(Span::new(end..end), "reading stopped here");
                return Err(fail(handler, diagnostic));
            }
        }
        buf.clear();
    }

    debug!(
        tag_file = tag_name,
        warnings = handler.diagnostic_count();
        "Finished reading tag file"
    );
    let (records, warnings) = handler.finish()?;
    Ok(TagFile::new(tag_name, records, warnings))
}

/// Stop reading with `diagnostic`; the handler's records are dropped.
fn fail(mut handler: TagFileHandler, diagnostic: Diagnostic) -> ParseError {
    handler.emit(diagnostic);
    handler
        .finish()
        .err()
        .unwrap_or_else(|| ParseError::new(Vec::new()))
}

fn element_name(e: &BytesStart<'_>) -> String {
    String::from_utf8_lossy(e.local_name().as_ref()).into_owned()
}

fn attributes(e: &BytesStart<'_>) -> Attributes {
    e.attributes()
        .flatten()
        .map(|attr| {
            let key = String::from_utf8_lossy(attr.key.local_name().as_ref()).into_owned();
            let raw = String::from_utf8_lossy(&attr.value).into_owned();
            let value = unescape(&raw)
                .map(Cow::into_owned)
                .unwrap_or_else(|_| raw.clone());
            (key, value)
        })
        .collect()
}

/// Text of a predefined entity or a character reference (`#38`, `#x26`).
fn resolve_reference(name: &str) -> Option<String> {
    if let Some(code) = name.strip_prefix('#') {
        let value = match code.strip_prefix('x') {
            Some(hex) => u32::from_str_radix(hex, 16).ok()?,
            None => code.parse().ok()?,
        };
        return char::from_u32(value).map(String::from);
    }
    resolve_predefined_entity(name).map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_reference() {
        assert_eq!(resolve_reference("amp").as_deref(), Some("&"));
        assert_eq!(resolve_reference("lt").as_deref(), Some("<"));
        assert_eq!(resolve_reference("#38").as_deref(), Some("&"));
        assert_eq!(resolve_reference("#x3C").as_deref(), Some("<"));
        assert_eq!(resolve_reference("nbsp"), None);
        assert_eq!(resolve_reference("#xZZ"), None);
    }

    #[test]
    fn test_attributes_are_unescaped() {
        let mut reader = Reader::from_str(r#"<includes name="a&amp;b.h" local="yes"/>"#);
        let mut buf = Vec::new();
        let Ok(Event::Empty(e)) = reader.read_event_into(&mut buf) else {
            panic!("expected an empty element");
        };

        let attrs = attributes(&e);
        assert_eq!(attrs.value("name"), "a&b.h");
        assert_eq!(attrs.value("local"), "yes");
        assert_eq!(attrs.value("missing"), "");
    }
}
