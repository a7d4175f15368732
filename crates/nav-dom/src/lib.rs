//! Element tree for fragment decoration.
//!
//! This crate provides:
//! - [`ElementTree`]: the mutation and traversal interface decoration code
//!   is written against
//! - [`Document`]: an arena implementation with explicit parent links
//! - [`parse_fragment`]: lenient HTML fragment parsing into a tree
//! - [`serialize_children`] / [`serialize_node`]: HTML output
//!
//! # Example
//!
//! ```
//! use nav_dom::{Document, ElementTree, parse_fragment, serialize_children};
//!
//! let mut doc = Document::new();
//! let root = doc.root();
//! parse_fragment(&mut doc, root, "<ul><li>One</li></ul>").unwrap();
//!
//! let li = doc.first_descendant(root, "li").unwrap();
//! doc.add_class(li, "active");
//!
//! assert_eq!(
//!     serialize_children(&doc, root),
//!     r#"<ul><li class="active">One</li></ul>"#
//! );
//! ```

mod entities;
mod error;
mod parser;
mod serializer;
mod tree;

pub use error::DomError;
pub use parser::{is_void_element, parse_fragment};
pub use serializer::{serialize_children, serialize_node};
pub use tree::{Document, ElementTree, NodeId, NodeKind};
