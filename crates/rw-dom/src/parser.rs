//! HTML fragment parsing.
//!
//! Markup is parsed by html5ever through scraper, so entities, implied end
//! tags, raw-text elements (`<script>`, `<style>`) and stray characters such as
//! a bare `&` or `<` are handled exactly as a browser handles them. The parsed
//! tree is then copied into the document.

use ego_tree::NodeId;
use scraper::{Html, Node};

use crate::document::{Document, Element, NodeData};

/// Parse `html` in a `<body>` context and append the resulting nodes to
/// `parent`.
pub(crate) fn parse_fragment_into(doc: &mut Document, parent: NodeId, html: &str) {
    let fragment = Html::parse_fragment(html);
    if !fragment.errors.is_empty() {
        tracing::debug!(errors = fragment.errors.len(), "Recovered from malformed HTML");
    }

    // Parsed fragments hang off a synthetic <html> element.
    let mut pending: Vec<_> = fragment
        .root_element()
        .children()
        .rev()
        .map(|node| (node, parent))
        .collect();

    while let Some((source, target)) = pending.pop() {
        let Some(data) = convert(source.value()) else {
            continue;
        };
        let node = doc.create_node(data);
        doc.append_child(target, node);
        pending.extend(source.children().rev().map(|child| (child, node)));
    }
}

fn convert(node: &Node) -> Option<NodeData> {
    match node {
        Node::Element(element) => Some(NodeData::Element(Element {
            tag: element.name().to_owned(),
            attrs: element
                .attrs()
                .map(|(name, value)| (name.to_owned(), Some(value.to_owned())))
                .collect(),
        })),
        Node::Text(text) => Some(NodeData::Text((**text).to_owned())),
        Node::Comment(comment) => Some(NodeData::Comment((**comment).to_owned())),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn roundtrip(html: &str) -> String {
        Document::parse(html).to_html()
    }

    #[test]
    fn test_parse_nested_elements() {
        let doc = Document::parse("<p><strong>Bold</strong> text</p>");
        let p = doc.children(doc.root())[0];
        assert_eq!(doc.tag(p), Some("p"));

        let children = doc.children(p);
        assert_eq!(children.len(), 2);
        assert_eq!(doc.tag(children[0]), Some("strong"));
        assert_eq!(doc.data(children[1]), Some(&NodeData::Text(" text".to_owned())));
    }

    #[test]
    fn test_parse_keeps_whitespace() {
        assert_eq!(roundtrip("<div>\n  <p>x</p>\n</div>"), "<div>\n  <p>x</p>\n</div>");
    }

    #[test]
    fn test_parse_void_elements_without_slash() {
        let doc = Document::parse("<p>Before<br>After</p><hr>");
        let top = doc.children(doc.root());
        assert_eq!(top.len(), 2);
        assert_eq!(doc.text_content(top[0]), "BeforeAfter");
        assert_eq!(doc.to_html(), "<p>Before<br>After</p><hr>");
    }

    #[test]
    fn test_parse_self_closing_element() {
        assert_eq!(roundtrip(r#"<p><img src="a.png"/>x</p>"#), r#"<p><img src="a.png">x</p>"#);
    }

    #[test]
    fn test_parse_boolean_attribute() {
        let doc = Document::parse("<div hidden>x</div>");
        let div = doc.children(doc.root())[0];
        assert_eq!(doc.attribute(div, "hidden"), Some(""));
    }

    #[test]
    fn test_parse_entities() {
        let doc = Document::parse("<p>a&nbsp;b &amp; c&#8212;d&mdash;e</p>");
        let p = doc.children(doc.root())[0];
        assert_eq!(doc.text_content(p), "a\u{00a0}b & c\u{2014}d\u{2014}e");
    }

    #[test]
    fn test_parse_attribute_entities() {
        let doc = Document::parse(r#"<div data-title="A &amp; B">x</div>"#);
        let div = doc.children(doc.root())[0];
        assert_eq!(doc.attribute(div, "data-title"), Some("A & B"));
    }

    #[test]
    fn test_parse_lowercases_names() {
        let doc = Document::parse(r#"<DIV CLASS="x">y</DIV>"#);
        assert_eq!(doc.elements_by_class("x").len(), 1);
    }

    #[test]
    fn test_parse_bare_ampersand() {
        let doc = Document::parse("<p>Tom & Jerry</p>");
        let p = doc.children(doc.root())[0];
        assert_eq!(doc.text_content(p), "Tom & Jerry");
        assert_eq!(doc.to_html(), "<p>Tom &amp; Jerry</p>");
    }

    #[test]
    fn test_parse_less_than_in_text() {
        let doc = Document::parse("<p>if a < b</p><p>next</p>");
        assert_eq!(doc.children(doc.root()).len(), 2);
        assert_eq!(doc.to_html(), "<p>if a &lt; b</p><p>next</p>");
    }

    #[test]
    fn test_parse_script_body_is_raw_text() {
        let html = "<script>if (a<b && c) {}</script><p>after</p>";
        let doc = Document::parse(html);
        let script = doc.children(doc.root())[0];
        assert_eq!(doc.text_content(script), "if (a<b && c) {}");
        assert_eq!(doc.to_html(), html);
    }

    #[test]
    fn test_unmatched_end_tag_is_skipped() {
        assert_eq!(roundtrip("<p>a</span>b</p>"), "<p>ab</p>");
    }

    #[test]
    fn test_implied_end_tags() {
        assert_eq!(
            roundtrip("<ul><li>one<li>two</ul><p>first<p>second"),
            "<ul><li>one</li><li>two</li></ul><p>first</p><p>second</p>"
        );
    }

    #[test]
    fn test_comments_are_kept() {
        assert_eq!(
            roundtrip("<!-- lead --><p>a<!-- note -->b</p>"),
            "<!-- lead --><p>a<!-- note -->b</p>"
        );
    }

    #[test]
    fn test_authored_empty_attribute_keeps_value() {
        assert_eq!(
            roundtrip(r#"<img alt="" src="a.png"><input disabled>"#),
            r#"<img alt="" src="a.png"><input disabled="">"#
        );
    }

    #[test]
    fn test_attribute_order_is_preserved() {
        assert_eq!(
            roundtrip(r#"<a title="t" href="/x" class="c" id="i">x</a>"#),
            r#"<a title="t" href="/x" class="c" id="i">x</a>"#
        );
    }
}
