//! Page-level entry point and event routing.

use rw_config::TabsConfig;
use rw_dom::{Document, Event, EventType, Key, Listeners, NodeId};

use crate::ids::ContainerIds;
use crate::widget::TabWidget;

/// Listener registered by a widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Listener {
    /// Click on a tab button.
    Button { widget: usize, index: usize },
    /// Key press inside a navigation strip.
    Nav { widget: usize },
}

/// A document with its tab containers enhanced.
///
/// Owns the document, one [`TabWidget`] per container, and the listeners
/// those widgets registered. Input events are dispatched synchronously and
/// bubble from the target to the root; each widget only ever touches its own
/// buttons and panels, so containers never affect one another.
#[derive(Debug, Clone)]
pub struct TabsPage {
    document: Document,
    widgets: Vec<TabWidget>,
    listeners: Listeners<Listener>,
}

impl TabsPage {
    /// Enhance every tab container in `document`.
    ///
    /// Run once, after the page content is available. Containers are
    /// collected up front in document order and each becomes an independent
    /// widget. Containers removed from the tree by an earlier container (for
    /// example, sitting outside the content wrapper of a tab block) are skipped.
    #[must_use]
    pub fn init(document: Document, config: &TabsConfig) -> Self {
        Self::init_with_ids(document, config, ContainerIds::new())
    }

    /// Parse `html` and enhance it.
    ///
    /// Malformed markup is repaired by the HTML parser, so this never fails.
    #[must_use]
    pub fn from_html(html: &str, config: &TabsConfig) -> Self {
        Self::init(Document::parse(html), config)
    }

    fn init_with_ids(mut document: Document, config: &TabsConfig, ids: ContainerIds) -> Self {
        let mut widgets = Vec::new();
        let mut listeners = Listeners::new();

        for (index, container) in document
            .elements_by_class(&config.container_class)
            .into_iter()
            .enumerate()
        {
            if !document.is_connected(container) {
                tracing::debug!(index, "Skipping detached tabs container");
                continue;
            }

            let id = ids.resolve(document.attribute(container, &config.id_attribute), index);
            let widget = TabWidget::build(&mut document, container, id, config);
            tracing::debug!(container = %widget.id(), tabs = widget.len(), "Enhanced tabs container");

            let slot = widgets.len();
            for (tab, &button) in widget.buttons().iter().enumerate() {
                let listener = Listener::Button {
                    widget: slot,
                    index: tab,
                };
                listeners.add(button, EventType::Click, listener);
            }
            listeners.add(widget.nav(), EventType::KeyDown, Listener::Nav { widget: slot });
            widgets.push(widget);
        }

        tracing::debug!(containers = widgets.len(), "Tabs initialized");

        Self {
            document,
            widgets,
            listeners,
        }
    }

    #[must_use]
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Widgets in container discovery order.
    #[must_use]
    pub fn widgets(&self) -> &[TabWidget] {
        &self.widgets
    }

    /// Widget whose container id (declared or synthesized) is `id`.
    #[must_use]
    pub fn widget_by_id(&self, id: &str) -> Option<&TabWidget> {
        self.widgets.iter().find(|widget| widget.id() == id)
    }

    /// Activate tab `index` of widget `widget` without moving focus.
    pub fn activate(&mut self, widget: usize, index: usize) {
        if let Some(widget) = self.widgets.get_mut(widget) {
            widget.activate(&mut self.document, index);
        }
    }

    /// Move keyboard focus to `node`.
    pub fn focus(&mut self, node: NodeId) {
        self.document.focus(node);
    }

    /// Click on `target`.
    pub fn click(&mut self, target: NodeId) -> Event {
        self.dispatch(Event::click(target))
    }

    /// Press `key` on the focused element (or the document when nothing
    /// holds focus).
    pub fn key_down(&mut self, key: Key) -> Event {
        let target = self
            .document
            .active_element()
            .unwrap_or_else(|| self.document.root());
        self.dispatch(Event::key_down(target, key))
    }

    /// Dispatch `event` to the listeners along its propagation path.
    ///
    /// Returns the event so callers can inspect `default_prevented`.
    pub fn dispatch(&mut self, mut event: Event) -> Event {
        let path = self.listeners.propagation_path(&self.document, &event);

        for (_, listener) in path {
            match listener {
                Listener::Button { widget, index } => {
                    self.widgets[widget].handle_click(&mut self.document, index, &mut event);
                }
                Listener::Nav { widget } => {
                    self.widgets[widget].handle_key_down(&mut self.document, &mut event);
                }
            }
        }

        event
    }

    /// Serialize the current document.
    #[must_use]
    pub fn to_html(&self) -> String {
        self.document.to_html()
    }
}
