//! HTML serialization of document nodes.

use ego_tree::NodeId;

use crate::document::{Document, NodeData};

/// Elements that never have content or a closing tag.
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "basefont", "bgsound", "br", "col", "embed", "frame", "hr", "img", "input",
    "keygen", "link", "meta", "param", "source", "track", "wbr",
];

/// Elements whose text children are written without escaping.
const RAW_TEXT_ELEMENTS: &[&str] = &[
    "iframe", "noembed", "noframes", "noscript", "plaintext", "script", "style", "xmp",
];

fn is_void_element(tag: &str) -> bool {
    VOID_ELEMENTS.contains(&tag)
}

/// Serialize a node and its subtree.
///
/// Boolean attributes set through `toggle_attribute` are written bare
/// (`hidden`), void elements get no closing tag, every other element is
/// closed explicitly.
pub(crate) fn write_node(doc: &Document, id: NodeId, out: &mut String) {
    let Some(data) = doc.data(id) else {
        return;
    };
    match data {
        NodeData::Document => {
            for child in doc.children(id) {
                write_node(doc, child, out);
            }
        }
        NodeData::Text(text) => {
            let raw = doc
                .parent(id)
                .and_then(|parent| doc.tag(parent))
                .is_some_and(|tag| RAW_TEXT_ELEMENTS.contains(&tag));
            if raw {
                out.push_str(text);
            } else {
                push_escaped(out, text, false);
            }
        }
        NodeData::Comment(text) => {
            out.push_str("<!--");
            out.push_str(text);
            out.push_str("-->");
        }
        NodeData::Element(element) => {
            out.push('<');
            out.push_str(&element.tag);
            for (key, value) in &element.attrs {
                out.push(' ');
                out.push_str(key);
                if let Some(value) = value {
                    out.push_str("=\"");
                    push_escaped(out, value, true);
                    out.push('"');
                }
            }
            out.push('>');

            if is_void_element(&element.tag) {
                return;
            }

            for child in doc.children(id) {
                write_node(doc, child, out);
            }

            out.push_str("</");
            out.push_str(&element.tag);
            out.push('>');
        }
    }
}

/// Escape text the way `innerHTML` does.
fn push_escaped(out: &mut String, text: &str, in_attribute: bool) {
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '\u{a0}' => out.push_str("&nbsp;"),
            '"' if in_attribute => out.push_str("&quot;"),
            '<' if !in_attribute => out.push_str("&lt;"),
            '>' if !in_attribute => out.push_str("&gt;"),
            _ => out.push(ch),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_serialize_built_tree() {
        let mut doc = Document::new();
        let button = doc.create_element("button");
        doc.set_attribute(button, "class", "tab-link");
        doc.set_attribute(button, "aria-selected", "true");
        doc.set_text_content(button, "macOS");
        let root = doc.root();
        doc.append_child(root, button);

        assert_eq!(
            doc.to_html(),
            r#"<button class="tab-link" aria-selected="true">macOS</button>"#
        );
    }

    #[test]
    fn test_empty_attribute_value_is_written() {
        let mut doc = Document::new();
        let img = doc.create_element("img");
        doc.set_attribute(img, "alt", "");
        assert_eq!(doc.outer_html(img), r#"<img alt="">"#);
    }

    #[test]
    fn test_escape_text_and_attributes() {
        let mut doc = Document::new();
        let p = doc.create_element("p");
        doc.set_attribute(p, "title", "say \"hi\" & <go>\u{a0}");
        doc.set_text_content(p, "a < b & c > d\u{a0}");
        assert_eq!(
            doc.outer_html(p),
            r#"<p title="say &quot;hi&quot; &amp; <go>&nbsp;">a &lt; b &amp; c &gt; d&nbsp;</p>"#
        );
    }

    #[test]
    fn test_style_text_is_not_escaped() {
        let doc = Document::parse("<style>a > b { color: red }</style>");
        assert_eq!(doc.to_html(), "<style>a > b { color: red }</style>");
    }

    #[test]
    fn test_void_elements() {
        assert!(is_void_element("br"));
        assert!(is_void_element("img"));
        assert!(!is_void_element("div"));
    }
}
