//! Header navigation decoration.
//!
//! Turns an authored navigation fragment into the site header:
//!
//! 1. [`FragmentLoader`] loads the fragment into the caller's tree and splits
//!    it into sections.
//! 2. [`expand_placeholders`] replaces placeholder markers with entries
//!    derived from the page index.
//! 3. [`assemble_navigation`] partitions the sections into brand, primary
//!    links and tools, and builds the `nav` element.
//! 4. [`Navigation::click`] drives dropdown and hamburger state through an
//!    [`InteractionController`].
//!
//! [`HeaderDecorator`] runs steps 1-3 against a target block.
//!
//! # Example
//!
//! ```
//! use nav_dom::{Document, ElementTree};
//! use nav_header::{HeaderDecorator, HeaderOptions, StaticFragmentLoader};
//! use nav_index::{PageRecord, StaticPageIndex};
//!
//! let loader = StaticFragmentLoader::new().with_fragment(
//!     "/nav",
//!     "<div><p>Brand</p></div><div><ul><li>placeholder</li></ul></div>",
//! );
//! let index = StaticPageIndex::new(vec![
//!     PageRecord::new("/settori/agricoltura", "Settori | Agricoltura").with_category("Settori"),
//! ]);
//! let decorator = HeaderDecorator::new(loader, index, HeaderOptions::default());
//!
//! let mut doc = Document::new();
//! let block = doc.create_element("div");
//! doc.append_child(doc.root(), block);
//!
//! let nav = decorator.decorate(&mut doc, block).unwrap();
//! assert_eq!(nav.controller().dropdown_items().len(), 1);
//! ```

pub mod classes;

mod assemble;
mod decorate;
mod fragment;
mod interaction;
mod placeholder;

pub use assemble::{Navigation, assemble_navigation};
pub use decorate::{HeaderDecorator, HeaderOptions};
pub use fragment::{FragmentLoader, FsFragmentLoader, StaticFragmentLoader, decorate_sections};
pub use interaction::{ClickHandler, Expansion, InteractionController};
pub use placeholder::{ExpansionReport, Placeholder, classify_placeholders, expand_placeholders};
