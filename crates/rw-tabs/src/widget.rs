//! A single tab group.

use rw_config::TabsConfig;
use rw_dom::{Document, Event, Key, NodeId};

/// Class toggled on the active button and panel.
pub const ACTIVE_CLASS: &str = "is-active";

/// An enhanced tab container.
///
/// Owns handles to its navigation strip, content area, buttons and panels,
/// plus the active index. `buttons[i]` controls `panels[i]`.
///
/// # Output HTML Structure
///
/// ```html
/// <div class="tabs" data-tabs-id="install">
///   <div class="tabs-nav" role="tablist">
///     <button class="tab-link is-active" type="button" id="install-tab-0" role="tab"
///             aria-controls="install-panel-0" tabindex="0" aria-selected="true">macOS</button>
///     <button class="tab-link" type="button" id="install-tab-1" role="tab"
///             aria-controls="install-panel-1" tabindex="-1" aria-selected="false">Linux</button>
///   </div>
///   <div class="tabs-content">
///     <div class="tab-panel is-active" id="install-panel-0" role="tabpanel"
///          aria-labelledby="install-tab-0">...</div>
///     <div class="tab-panel" id="install-panel-1" role="tabpanel"
///          aria-labelledby="install-tab-1" hidden>...</div>
///   </div>
/// </div>
/// ```
#[derive(Debug, Clone)]
pub struct TabWidget {
    id: String,
    container: NodeId,
    nav: NodeId,
    content: NodeId,
    buttons: Vec<NodeId>,
    panels: Vec<NodeId>,
    active: Option<usize>,
}

impl TabWidget {
    /// Transform `container` in place.
    ///
    /// Each direct tab block becomes a button and a panel; the block itself
    /// is removed. The navigation strip is prepended to the container and the
    /// content area appended, leaving any other children where they were.
    pub(crate) fn build(
        doc: &mut Document,
        container: NodeId,
        id: String,
        config: &TabsConfig,
    ) -> Self {
        let nav = doc.create_element("div");
        doc.set_attribute(nav, "class", "tabs-nav");
        doc.set_attribute(nav, "role", "tablist");
        let content = doc.create_element("div");
        doc.set_attribute(content, "class", "tabs-content");

        let mut buttons = Vec::new();
        let mut panels = Vec::new();

        for (idx, block) in doc
            .children_by_class(container, &config.tab_class)
            .into_iter()
            .enumerate()
        {
            let title = doc
                .attribute(block, &config.title_attribute)
                .filter(|title| !title.is_empty())
                .map_or_else(|| format!("Tab {}", idx + 1), str::to_owned);
            let tab_id = format!("{id}-tab-{idx}");
            let panel_id = format!("{id}-panel-{idx}");

            let button = create_button(doc, &tab_id, &panel_id, &title);
            let panel = create_panel(doc, &panel_id, &tab_id);
            set_button_state(doc, button, idx == 0);
            set_panel_state(doc, panel, idx == 0);

            // An empty content wrapper falls back to the whole block.
            let body = doc
                .child_by_class(block, &config.content_class)
                .filter(|&wrapper| !doc.children(wrapper).is_empty())
                .unwrap_or(block);
            doc.move_children(body, panel);

            doc.append_child(nav, button);
            doc.append_child(content, panel);
            doc.detach(block);

            buttons.push(button);
            panels.push(panel);
        }

        doc.prepend_child(container, nav);
        doc.append_child(container, content);

        let active = (!buttons.is_empty()).then_some(0);
        Self {
            id,
            container,
            nav,
            content,
            buttons,
            panels,
            active,
        }
    }

    /// Container identifier that button and panel ids are derived from.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[must_use]
    pub fn container(&self) -> NodeId {
        self.container
    }

    /// The `role="tablist"` navigation strip.
    #[must_use]
    pub fn nav(&self) -> NodeId {
        self.nav
    }

    /// The `.tabs-content` element holding the panels.
    #[must_use]
    pub fn content(&self) -> NodeId {
        self.content
    }

    /// Tab buttons in index order.
    #[must_use]
    pub fn buttons(&self) -> &[NodeId] {
        &self.buttons
    }

    /// Tab panels in index order.
    #[must_use]
    pub fn panels(&self) -> &[NodeId] {
        &self.panels
    }

    /// Index of the active tab, `None` for a container without tabs.
    #[must_use]
    pub fn active_index(&self) -> Option<usize> {
        self.active
    }

    /// Number of tabs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.buttons.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buttons.is_empty()
    }

    /// Make tab `index` the only active tab.
    ///
    /// Updates every button and panel, so calling it with the current index
    /// changes nothing. Keyboard focus is left alone. Out-of-range indices are
    /// ignored.
    pub fn activate(&mut self, doc: &mut Document, index: usize) {
        if index >= self.buttons.len() {
            tracing::debug!(container = %self.id, index, "Ignoring activation of missing tab");
            return;
        }

        for (i, &button) in self.buttons.iter().enumerate() {
            set_button_state(doc, button, i == index);
        }
        for (i, &panel) in self.panels.iter().enumerate() {
            set_panel_state(doc, panel, i == index);
        }

        self.active = Some(index);
        tracing::trace!(container = %self.id, index, "Activated tab");
    }

    /// Click on button `index`: activate it and move focus to it.
    pub(crate) fn handle_click(&mut self, doc: &mut Document, index: usize, event: &mut Event) {
        event.prevent_default();
        self.activate(doc, index);
        if let Some(&button) = self.buttons.get(index) {
            doc.focus(button);
        }
    }

    /// Key press bubbling to the navigation strip.
    ///
    /// Only acts while one of this widget's buttons holds focus.
    pub(crate) fn handle_key_down(&mut self, doc: &mut Document, event: &mut Event) {
        let Some(key) = event.key().cloned() else {
            return;
        };
        let Some(current) = doc
            .active_element()
            .and_then(|focused| self.buttons.iter().position(|&b| b == focused))
        else {
            return;
        };

        let count = self.buttons.len();
        let next = match key {
            Key::ArrowRight => (current + 1) % count,
            Key::ArrowLeft => (current + count - 1) % count,
            Key::Home => 0,
            Key::End => count - 1,
            Key::Enter | Key::Space => {
                self.activate(doc, current);
                event.prevent_default();
                return;
            }
            Key::Other(_) => return,
        };

        doc.focus(self.buttons[next]);
        self.activate(doc, next);
        event.prevent_default();
    }
}

fn create_button(doc: &mut Document, tab_id: &str, panel_id: &str, title: &str) -> NodeId {
    let button = doc.create_element("button");
    doc.set_attribute(button, "class", "tab-link");
    doc.set_attribute(button, "type", "button");
    doc.set_attribute(button, "id", tab_id);
    doc.set_attribute(button, "role", "tab");
    doc.set_attribute(button, "aria-controls", panel_id);
    doc.set_text_content(button, title);
    button
}

fn create_panel(doc: &mut Document, panel_id: &str, tab_id: &str) -> NodeId {
    let panel = doc.create_element("div");
    doc.set_attribute(panel, "class", "tab-panel");
    doc.set_attribute(panel, "id", panel_id);
    doc.set_attribute(panel, "role", "tabpanel");
    doc.set_attribute(panel, "aria-labelledby", tab_id);
    panel
}

fn set_button_state(doc: &mut Document, button: NodeId, active: bool) {
    doc.toggle_class(button, ACTIVE_CLASS, active);
    doc.set_attribute(button, "tabindex", if active { "0" } else { "-1" });
    doc.set_attribute(button, "aria-selected", if active { "true" } else { "false" });
}

fn set_panel_state(doc: &mut Document, panel: NodeId, active: bool) {
    doc.toggle_class(panel, ACTIVE_CLASS, active);
    doc.toggle_attribute(panel, "hidden", !active);
}
