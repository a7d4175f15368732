//! HTML serialization of element trees.
//!
//! Output is deterministic: attributes are written in insertion order, void
//! elements get no closing tag, and every other element is closed explicitly.

use crate::parser::is_void_element;
use crate::tree::{ElementTree, NodeId};

/// Serialize the children of `node` (not `node` itself).
pub fn serialize_children<T: ElementTree>(tree: &T, node: NodeId) -> String {
    let mut out = String::with_capacity(1024);
    for &child in tree.children(node) {
        write_node(tree, child, &mut out);
    }
    out
}

/// Serialize `node` including its own tag.
pub fn serialize_node<T: ElementTree>(tree: &T, node: NodeId) -> String {
    let mut out = String::with_capacity(1024);
    write_node(tree, node, &mut out);
    out
}

fn write_node<T: ElementTree>(tree: &T, node: NodeId, out: &mut String) {
    let Some(tag) = tree.tag(node) else {
        if let Some(text) = tree.text(node) {
            escape_into(text, false, out);
        }
        return;
    };

    out.push('<');
    out.push_str(tag);
    for (key, value) in tree.attrs(node) {
        out.push(' ');
        out.push_str(key);
        out.push_str("=\"");
        escape_into(value, true, out);
        out.push('"');
    }
    out.push('>');

    if is_void_element(tag) {
        return;
    }

    for &child in tree.children(node) {
        write_node(tree, child, out);
    }

    out.push_str("</");
    out.push_str(tag);
    out.push('>');
}

fn escape_into(text: &str, in_attr: bool, out: &mut String) {
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' if in_attr => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
}
