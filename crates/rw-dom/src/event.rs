//! Input events and listener registration.
//!
//! Events bubble: a dispatch visits the target first, then each ancestor up to
//! the document root. Listeners are plain values (`H`) registered per node and
//! event type; the host decides what invoking a listener means.

use std::collections::HashMap;

use ego_tree::NodeId;

use crate::document::Document;

/// Kind of input event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventType {
    /// Pointer activation.
    Click,
    /// Key press.
    KeyDown,
}

/// Keyboard key, named after `KeyboardEvent.key`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Key {
    ArrowLeft,
    ArrowRight,
    Home,
    End,
    Enter,
    Space,
    /// Any key without special handling.
    Other(String),
}

impl Key {
    /// Map a `KeyboardEvent.key` value.
    ///
    /// ```
    /// use rw_dom::Key;
    ///
    /// assert_eq!(Key::from_dom(" "), Key::Space);
    /// assert_eq!(Key::from_dom("ArrowRight"), Key::ArrowRight);
    /// assert_eq!(Key::from_dom("a"), Key::Other("a".to_owned()));
    /// ```
    #[must_use]
    pub fn from_dom(key: &str) -> Self {
        match key {
            "ArrowLeft" | "Left" => Self::ArrowLeft,
            "ArrowRight" | "Right" => Self::ArrowRight,
            "Home" => Self::Home,
            "End" => Self::End,
            "Enter" => Self::Enter,
            " " | "Spacebar" => Self::Space,
            other => Self::Other(other.to_owned()),
        }
    }
}

/// A dispatched input event.
#[derive(Debug, Clone)]
pub struct Event {
    kind: EventType,
    key: Option<Key>,
    target: NodeId,
    default_prevented: bool,
}

impl Event {
    /// Click on `target`.
    #[must_use]
    pub fn click(target: NodeId) -> Self {
        Self::new(EventType::Click, None, target)
    }

    /// Key press with `target` holding focus.
    #[must_use]
    pub fn key_down(target: NodeId, key: Key) -> Self {
        Self::new(EventType::KeyDown, Some(key), target)
    }

    fn new(kind: EventType, key: Option<Key>, target: NodeId) -> Self {
        Self {
            kind,
            key,
            target,
            default_prevented: false,
        }
    }

    #[must_use]
    pub fn kind(&self) -> EventType {
        self.kind
    }

    /// Pressed key for [`EventType::KeyDown`] events.
    #[must_use]
    pub fn key(&self) -> Option<&Key> {
        self.key.as_ref()
    }

    /// Node the event was dispatched to.
    #[must_use]
    pub fn target(&self) -> NodeId {
        self.target
    }

    /// Suppress the browser's default action.
    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    #[must_use]
    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }
}

/// Registry of event listeners keyed by node.
#[derive(Debug, Clone)]
pub struct Listeners<H> {
    entries: HashMap<NodeId, Vec<(EventType, H)>>,
}

impl<H> Default for Listeners<H> {
    fn default() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }
}

impl<H: Clone> Listeners<H> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handler` for `kind` events reaching `node`.
    pub fn add(&mut self, node: NodeId, kind: EventType, handler: H) {
        self.entries.entry(node).or_default().push((kind, handler));
    }

    /// Listeners an event reaches, in invocation order.
    ///
    /// Walks from the event target up through its ancestors, yielding each
    /// matching listener with the node it is registered on.
    #[must_use]
    pub fn propagation_path(&self, doc: &Document, event: &Event) -> Vec<(NodeId, H)> {
        let kind = event.kind();
        std::iter::once(event.target())
            .chain(doc.ancestors(event.target()))
            .flat_map(move |node| {
                self.entries
                    .get(&node)
                    .into_iter()
                    .flatten()
                    .filter(move |(registered, _)| *registered == kind)
                    .map(move |(_, handler)| (node, handler.clone()))
            })
            .collect()
    }
}
