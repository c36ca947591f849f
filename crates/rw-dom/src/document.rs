//! Document tree backed by `ego_tree`.

use ego_tree::{NodeId, Tree};

use crate::parser;
use crate::serializer;

/// Element tag with its attributes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    /// Tag name as the HTML parser reports it (lowercase for HTML elements).
    pub tag: String,
    /// Attributes in source order. `None` marks a boolean attribute that is
    /// serialized bare (`hidden`).
    pub attrs: Vec<(String, Option<String>)>,
}

impl Element {
    /// Create an element without attributes.
    #[must_use]
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attrs: Vec::new(),
        }
    }

    /// Value of the named attribute. Boolean attributes read as `""`.
    #[must_use]
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_deref().unwrap_or_default())
    }

    /// Whether the whitespace-separated `class` attribute contains `class`.
    #[must_use]
    pub fn has_class(&self, class: &str) -> bool {
        self.attr("class")
            .is_some_and(|classes| classes.split_ascii_whitespace().any(|c| c == class))
    }

    fn set_attr(&mut self, name: &str, value: Option<&str>) {
        let value = value.map(str::to_owned);
        match self.attrs.iter_mut().find(|(key, _)| key == name) {
            Some((_, existing)) => *existing = value,
            None => self.attrs.push((name.to_owned(), value)),
        }
    }

    fn remove_attr(&mut self, name: &str) {
        self.attrs.retain(|(key, _)| key != name);
    }
}

/// Payload of a node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeData {
    /// The document root.
    Document,
    /// Element node.
    Element(Element),
    /// Text node (unescaped).
    Text(String),
    /// Comment node.
    Comment(String),
}

/// An HTML document.
///
/// Nodes are addressed by [`NodeId`]. Detaching a node removes it from its
/// parent but keeps it in the tree's storage, so handles held by callers
/// never dangle. Lookups with a handle from another document find nothing.
#[derive(Debug, Clone)]
pub struct Document {
    tree: Tree<NodeData>,
    active_element: Option<NodeId>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Create an empty document.
    #[must_use]
    pub fn new() -> Self {
        Self {
            tree: Tree::new(NodeData::Document),
            active_element: None,
        }
    }

    /// Parse an HTML fragment into a new document.
    ///
    /// Parsing follows the HTML5 algorithm and never fails: malformed markup
    /// is repaired the way a browser would repair it.
    #[must_use]
    pub fn parse(html: &str) -> Self {
        let mut doc = Self::new();
        let root = doc.root();
        parser::parse_fragment_into(&mut doc, root, html);
        doc
    }

    /// Root holding the top-level content.
    #[must_use]
    pub fn root(&self) -> NodeId {
        self.tree.root().id()
    }

    /// Create a detached element.
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        self.create_node(NodeData::Element(Element::new(tag.to_ascii_lowercase())))
    }

    pub(crate) fn create_text(&mut self, text: &str) -> NodeId {
        self.create_node(NodeData::Text(text.to_owned()))
    }

    pub(crate) fn create_node(&mut self, data: NodeData) -> NodeId {
        self.tree.orphan(data).id()
    }

    /// Node payload.
    #[must_use]
    pub fn data(&self, id: NodeId) -> Option<&NodeData> {
        self.tree.get(id).map(|node| node.value())
    }

    /// Element payload, or `None` for other node kinds.
    #[must_use]
    pub fn element(&self, id: NodeId) -> Option<&Element> {
        match self.data(id)? {
            NodeData::Element(element) => Some(element),
            _ => None,
        }
    }

    /// Run `update` on the element payload; no-op for other node kinds.
    fn update_element(&mut self, id: NodeId, update: impl FnOnce(&mut Element)) {
        if let Some(mut node) = self.tree.get_mut(id)
            && let NodeData::Element(element) = node.value()
        {
            update(element);
        }
    }

    /// Tag name of an element node.
    #[must_use]
    pub fn tag(&self, id: NodeId) -> Option<&str> {
        self.element(id).map(|element| element.tag.as_str())
    }

    /// Parent node, `None` for the root and detached nodes.
    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.tree.get(id)?.parent().map(|parent| parent.id())
    }

    /// Child nodes in order.
    #[must_use]
    pub fn children(&self, id: NodeId) -> Vec<NodeId> {
        self.tree
            .get(id)
            .map(|node| node.children().map(|child| child.id()).collect())
            .unwrap_or_default()
    }

    /// Child elements in order, skipping text and comments.
    pub fn element_children(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.tree
            .get(id)
            .into_iter()
            .flat_map(|node| node.children())
            .filter(|child| child.value().is_element())
            .map(|child| child.id())
    }

    /// Ancestors from the parent up to the root.
    pub fn ancestors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.tree
            .get(id)
            .into_iter()
            .flat_map(|node| node.ancestors())
            .map(|ancestor| ancestor.id())
    }

    /// Whether `node` is `ancestor` or one of its descendants.
    #[must_use]
    pub fn contains(&self, ancestor: NodeId, node: NodeId) -> bool {
        node == ancestor || self.ancestors(node).any(|a| a == ancestor)
    }

    /// Whether the node is attached to the document root.
    #[must_use]
    pub fn is_connected(&self, id: NodeId) -> bool {
        self.contains(self.root(), id)
    }

    /// Append `child` as the last child of `parent`, detaching it first.
    ///
    /// Inserting a node into its own subtree is ignored.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        if !self.can_insert(parent, child) {
            return;
        }
        if let Some(mut parent) = self.tree.get_mut(parent) {
            parent.append_id(child);
        }
    }

    /// Insert `child` as the first child of `parent`, detaching it first.
    pub fn prepend_child(&mut self, parent: NodeId, child: NodeId) {
        if !self.can_insert(parent, child) {
            return;
        }
        if let Some(mut parent) = self.tree.get_mut(parent) {
            parent.prepend_id(child);
        }
    }

    fn can_insert(&self, parent: NodeId, child: NodeId) -> bool {
        if self.tree.get(child).is_none() || self.contains(child, parent) {
            tracing::debug!(?parent, ?child, "Refusing to insert node");
            return false;
        }
        true
    }

    /// Remove a node (and its subtree) from the tree.
    ///
    /// Focus inside the removed subtree is dropped.
    pub fn detach(&mut self, id: NodeId) {
        if let Some(focused) = self.active_element
            && self.contains(id, focused)
        {
            self.active_element = None;
        }
        if let Some(mut node) = self.tree.get_mut(id) {
            node.detach();
        }
    }

    /// Move every child of `from` to the end of `to`, preserving order.
    pub fn move_children(&mut self, from: NodeId, to: NodeId) {
        if self.contains(from, to) {
            return;
        }
        for child in self.children(from) {
            self.append_child(to, child);
        }
    }

    /// Attribute value of an element.
    #[must_use]
    pub fn attribute(&self, id: NodeId, name: &str) -> Option<&str> {
        self.element(id).and_then(|element| element.attr(name))
    }

    /// Whether the element carries the attribute (with any value).
    #[must_use]
    pub fn has_attribute(&self, id: NodeId, name: &str) -> bool {
        self.attribute(id, name).is_some()
    }

    /// Set an attribute, keeping its position if it already exists.
    ///
    /// No-op on non-element nodes.
    pub fn set_attribute(&mut self, id: NodeId, name: &str, value: &str) {
        self.update_element(id, |element| element.set_attr(name, Some(value)));
    }

    /// Remove an attribute if present.
    pub fn remove_attribute(&mut self, id: NodeId, name: &str) {
        self.update_element(id, |element| element.remove_attr(name));
    }

    /// Add (`force == true`) or remove a boolean attribute, like
    /// `Element.toggleAttribute(name, force)`.
    ///
    /// An added attribute is serialized bare; an existing one is left as is.
    pub fn toggle_attribute(&mut self, id: NodeId, name: &str, force: bool) {
        self.update_element(id, |element| {
            if !force {
                element.remove_attr(name);
            } else if element.attr(name).is_none() {
                element.set_attr(name, None);
            }
        });
    }

    /// Whether the element's class list contains `class`.
    #[must_use]
    pub fn has_class(&self, id: NodeId, class: &str) -> bool {
        self.element(id).is_some_and(|element| element.has_class(class))
    }

    /// Add a class to the element's class list.
    pub fn add_class(&mut self, id: NodeId, class: &str) {
        self.toggle_class(id, class, true);
    }

    /// Add (`force == true`) or remove a class, like `classList.toggle(class, force)`.
    pub fn toggle_class(&mut self, id: NodeId, class: &str, force: bool) {
        self.update_element(id, |element| {
            let current = element.attr("class");
            let mut classes: Vec<&str> = current
                .unwrap_or_default()
                .split_ascii_whitespace()
                .filter(|&c| c != class)
                .collect();
            if force {
                classes.push(class);
            }
            if classes.is_empty() && current.is_none() {
                return;
            }
            let updated = classes.join(" ");
            element.set_attr("class", Some(&updated));
        });
    }

    /// Connected elements carrying `class`, in document order.
    #[must_use]
    pub fn elements_by_class(&self, class: &str) -> Vec<NodeId> {
        self.descendants(self.root())
            .filter(|&node| self.has_class(node, class))
            .collect()
    }

    /// First direct child element carrying `class`.
    #[must_use]
    pub fn child_by_class(&self, parent: NodeId, class: &str) -> Option<NodeId> {
        self.element_children(parent)
            .find(|&child| self.has_class(child, class))
    }

    /// Direct child elements carrying `class`, in order.
    #[must_use]
    pub fn children_by_class(&self, parent: NodeId, class: &str) -> Vec<NodeId> {
        self.element_children(parent)
            .filter(|&child| self.has_class(child, class))
            .collect()
    }

    /// First connected element whose `id` attribute equals `id`.
    #[must_use]
    pub fn element_by_id(&self, id: &str) -> Option<NodeId> {
        self.descendants(self.root())
            .find(|&node| self.attribute(node, "id") == Some(id))
    }

    /// Descendants of `id` (excluding itself) in document order.
    pub fn descendants(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.tree
            .get(id)
            .into_iter()
            .flat_map(|node| node.descendants().skip(1))
            .map(|node| node.id())
    }

    /// Replace all children with a single text node.
    pub fn set_text_content(&mut self, id: NodeId, text: &str) {
        for child in self.children(id) {
            self.detach(child);
        }
        if !text.is_empty() {
            let node = self.create_text(text);
            self.append_child(id, node);
        }
    }

    /// Concatenated text of the node and its descendants. Comments are skipped.
    #[must_use]
    pub fn text_content(&self, id: NodeId) -> String {
        if let Some(NodeData::Text(text)) = self.data(id) {
            return text.clone();
        }
        self.descendants(id)
            .filter_map(|node| match self.data(node) {
                Some(NodeData::Text(text)) => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Serialized children of the node.
    #[must_use]
    pub fn inner_html(&self, id: NodeId) -> String {
        let mut out = String::new();
        for child in self.children(id) {
            serializer::write_node(self, child, &mut out);
        }
        out
    }

    /// Serialized node including its own tag.
    #[must_use]
    pub fn outer_html(&self, id: NodeId) -> String {
        let mut out = String::new();
        serializer::write_node(self, id, &mut out);
        out
    }

    /// Serialized document content.
    #[must_use]
    pub fn to_html(&self) -> String {
        self.inner_html(self.root())
    }

    /// Give keyboard focus to a connected element.
    ///
    /// Other node kinds and detached elements cannot take focus; the call is
    /// ignored.
    pub fn focus(&mut self, id: NodeId) {
        if self.element(id).is_some() && self.is_connected(id) {
            self.active_element = Some(id);
        }
    }

    /// Element holding keyboard focus.
    #[must_use]
    pub fn active_element(&self) -> Option<NodeId> {
        self.active_element
    }
}

impl NodeData {
    fn is_element(&self) -> bool {
        matches!(self, Self::Element(_))
    }
}
