//! Headless HTML document tree.
//!
//! Provides just enough of the browser DOM to run page enhancements outside a
//! browser: an `ego_tree` of element, text and comment nodes, attribute and
//! class-list access, focus tracking, HTML5 fragment parsing (html5ever via
//! scraper) and serialization, and a bubbling event dispatch registry.
//!
//! # Example
//!
//! ```
//! use rw_dom::Document;
//!
//! let mut doc = Document::parse(r#"<div class="note"><p>Hello & goodbye</p></div>"#);
//! let note = doc.elements_by_class("note")[0];
//! doc.add_class(note, "is-open");
//! doc.toggle_attribute(note, "hidden", true);
//!
//! assert_eq!(
//!     doc.to_html(),
//!     r#"<div class="note is-open" hidden><p>Hello &amp; goodbye</p></div>"#
//! );
//! ```

mod document;
mod event;
mod parser;
mod serializer;

pub use document::{Document, Element, NodeData};
pub use ego_tree::NodeId;
pub use event::{Event, EventType, Key, Listeners};
