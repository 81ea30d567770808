//! Static markup serialization.

use crate::node::{ComponentNode, Element, Node};

const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

/// Serialize a node to markup.
#[must_use]
pub fn to_markup(node: &Node) -> String {
    let mut out = String::new();
    write_node(&mut out, node);
    out
}

/// Serialize a sequence of sibling nodes.
#[must_use]
pub fn to_markup_all(nodes: &[Node]) -> String {
    let mut out = String::new();
    for node in nodes {
        write_node(&mut out, node);
    }
    out
}

fn write_node(out: &mut String, node: &Node) {
    match node {
        Node::Text(text) => out.push_str(&escape_text(text)),
        Node::Element(el) => write_element(out, el),
        Node::Component(c) => write_placeholder(out, c),
    }
}

fn write_element(out: &mut String, el: &Element) {
    out.push('<');
    out.push_str(el.tag());
    for (name, value) in el.attributes() {
        write_attribute(out, name, value);
    }
    if let Some(style) = el.style_attribute() {
        write_attribute(out, "style", &style);
    }

    if is_void(el.tag()) && el.child_nodes().is_empty() {
        out.push_str("/>");
        return;
    }

    out.push('>');
    for child in el.child_nodes() {
        write_node(out, child);
    }
    out.push_str("</");
    out.push_str(el.tag());
    out.push('>');
}

// Shallow trees keep nested components; they print under the component name.
fn write_placeholder(out: &mut String, node: &ComponentNode) {
    let name = node.name();
    out.push('<');
    out.push_str(&name);
    for (key, value) in node.props() {
        if key == "children" {
            continue;
        }
        if let Some(value) = value.to_attribute_value() {
            write_attribute(out, key, &value);
        }
    }
    let children = node.props().children();
    if children.is_empty() {
        out.push_str("/>");
        return;
    }
    out.push('>');
    for child in &children {
        write_node(out, child);
    }
    out.push_str("</");
    out.push_str(&name);
    out.push('>');
}

fn write_attribute(out: &mut String, name: &str, value: &str) {
    out.push(' ');
    out.push_str(name);
    out.push_str("=\"");
    out.push_str(&escape_attribute(value));
    out.push('"');
}

fn is_void(tag: &str) -> bool {
    VOID_ELEMENTS.iter().any(|v| v.eq_ignore_ascii_case(tag))
}

/// Escape `&`, `<` and `>` in text content.
#[must_use]
pub fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}

/// Escape `&` and `"` in attribute values.
#[must_use]
pub fn escape_attribute(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}
