//! Accessible tabbed content for documentation pages.
//!
//! Authors mark up tab groups declaratively:
//!
//! ```html
//! <div class="tabs" data-tabs-id="install">
//!   <div class="tab" data-title="macOS"><div class="tab-content">brew install rw</div></div>
//!   <div class="tab" data-title="Linux">apt install rw</div>
//! </div>
//! ```
//!
//! [`TabsPage::init`] turns every such container into a WAI-ARIA tab widget:
//! a `.tabs-nav[role=tablist]` strip of `button.tab-link[role=tab]` elements
//! followed by a `.tabs-content` area of `div.tab-panel[role=tabpanel]`
//! panels. The page then routes click and keyboard events to the widget that
//! owns the target, keeping exactly one tab active per container.
//!
//! # Example
//!
//! ```
//! use rw_config::TabsConfig;
//! use rw_dom::Key;
//! use rw_tabs::TabsPage;
//!
//! let html = r#"<div class="tabs" data-tabs-id="install"><div class="tab" data-title="macOS">brew</div><div class="tab" data-title="Linux">apt</div></div>"#;
//! let mut page = TabsPage::from_html(html, &TabsConfig::default());
//!
//! let widget = &page.widgets()[0];
//! assert_eq!(widget.active_index(), Some(0));
//!
//! let first = widget.buttons()[0];
//! page.focus(first);
//! page.key_down(Key::ArrowRight);
//!
//! assert_eq!(page.widgets()[0].active_index(), Some(1));
//! assert!(page.to_html().contains(r#"id="install-panel-1" role="tabpanel""#));
//! ```

mod ids;
mod page;
mod widget;

pub use page::TabsPage;
pub use widget::{ACTIVE_CLASS, TabWidget};
