//! Lenient HTML fragment parser.
//!
//! Feeds `quick-xml` events into an [`ElementTree`]. Fragments are authored
//! HTML, so the reader runs with end-name checks disabled: void elements never
//! open a scope, an end tag closes the nearest open element with that name,
//! and end tags with no open match are dropped.

use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;

use crate::entities::normalize_entities;
use crate::error::DomError;
use crate::tree::{ElementTree, NodeId};

/// Elements that never have content.
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

/// True if `tag` is an HTML void element.
pub fn is_void_element(tag: &str) -> bool {
    VOID_ELEMENTS.contains(&tag)
}

/// Parse `markup` and append the resulting nodes as children of `parent`.
///
/// # Errors
///
/// Returns [`DomError`] if the reader hits malformed markup it cannot
/// recover from (for example an unterminated tag).
pub fn parse_fragment<T: ElementTree>(
    tree: &mut T,
    parent: NodeId,
    markup: &str,
) -> Result<(), DomError> {
    let markup = normalize_entities(markup);
    let mut reader = Reader::from_str(&markup);
    let config = reader.config_mut();
    config.trim_text(false);
    config.check_end_names = false;
    config.allow_unmatched_ends = true;

    // Open elements with their tag names; the bottom entry is `parent`.
    let mut open: Vec<(NodeId, String)> = vec![(parent, String::new())];
    let mut pending = String::new();

    loop {
        match reader.read_event()? {
            Event::Start(e) => {
                flush_text(tree, &open, &mut pending);
                let (node, tag) = open_element(tree, &reader, &e);
                tree.append_child(current(&open), node);
                if !is_void_element(&tag) {
                    open.push((node, tag));
                }
            }
            Event::Empty(e) => {
                flush_text(tree, &open, &mut pending);
                let (node, _) = open_element(tree, &reader, &e);
                tree.append_child(current(&open), node);
            }
            Event::End(e) => {
                flush_text(tree, &open, &mut pending);
                let tag = decode_name(&reader, e.name().as_ref());
                if let Some(pos) = open.iter().rposition(|(_, t)| *t == tag)
                    && pos > 0
                {
                    open.truncate(pos);
                }
            }
            Event::Text(e) => {
                pending.push_str(&reader.decoder().decode(&e)?);
            }
            Event::GeneralRef(e) => {
                let entity = reader.decoder().decode(&e)?;
                pending.push_str(&decode_reference(&entity));
            }
            Event::CData(e) => {
                pending.push_str(&String::from_utf8_lossy(&e));
            }
            Event::Eof => {
                flush_text(tree, &open, &mut pending);
                return Ok(());
            }
            Event::Comment(_) | Event::Decl(_) | Event::PI(_) | Event::DocType(_) => {}
        }
    }
}

fn current(open: &[(NodeId, String)]) -> NodeId {
    // The bottom entry is never popped.
    open[open.len() - 1].0
}

fn flush_text<T: ElementTree>(tree: &mut T, open: &[(NodeId, String)], pending: &mut String) {
    if pending.is_empty() {
        return;
    }
    tree.append_text(current(open), pending);
    pending.clear();
}

fn open_element<T: ElementTree>(
    tree: &mut T,
    reader: &Reader<&[u8]>,
    e: &BytesStart,
) -> (NodeId, String) {
    let tag = decode_name(reader, e.name().as_ref());
    let node = tree.create_element(&tag);

    for attr in e.html_attributes().flatten() {
        let key = decode_name(reader, attr.key.as_ref());
        let value = attr.unescape_value().map_or_else(
            |_| String::from_utf8_lossy(&attr.value).into_owned(),
            std::borrow::Cow::into_owned,
        );
        tree.set_attr(node, &key, &value);
    }

    (node, tag)
}

fn decode_name(reader: &Reader<&[u8]>, name: &[u8]) -> String {
    reader
        .decoder()
        .decode(name)
        .map_or_else(
            |_| String::from_utf8_lossy(name).into_owned(),
            std::borrow::Cow::into_owned,
        )
        .to_ascii_lowercase()
}

/// Decode a general reference (`amp`, `#233`, `#xE9`) to its text.
fn decode_reference(entity: &str) -> String {
    match entity {
        "lt" => "<".to_owned(),
        "gt" => ">".to_owned(),
        "amp" => "&".to_owned(),
        "apos" => "'".to_owned(),
        "quot" => "\"".to_owned(),
        s if s.starts_with('#') => {
            let code = match s.strip_prefix("#x").or_else(|| s.strip_prefix("#X")) {
                Some(hex) => u32::from_str_radix(hex, 16).ok(),
                None => s[1..].parse::<u32>().ok(),
            };
            code.and_then(char::from_u32)
                .map_or_else(|| format!("&{entity};"), |c| c.to_string())
        }
        _ => format!("&{entity};"),
    }
}
