//! Page index access for navigation decoration.
//!
//! This crate provides:
//! - [`PageRecord`]: one entry of the site's page index
//! - [`PageIndex`]: a total fetch interface, with [`HttpPageIndex`] and
//!   [`StaticPageIndex`] implementations
//! - [`pages_by_category`], [`group_by_category`], [`clean_title`]: pure
//!   helpers that derive navigation entries from fetched records
//!
//! # Example
//!
//! ```
//! use nav_index::{PageIndex, PageRecord, StaticPageIndex, clean_title, pages_by_category};
//!
//! let index = StaticPageIndex::new(vec![
//!     PageRecord::new("/settori/agricoltura", "Settori | Agricoltura").with_category("Settori"),
//! ]);
//! let pages = index.fetch_pages();
//!
//! let settori = pages_by_category(&pages, "settori");
//! assert_eq!(clean_title(&settori[0].title), "Agricoltura");
//! ```

mod category;
mod client;
mod error;
mod record;

pub use category::{
    CategoryGroup, CategoryGroups, TITLE_SEPARATOR, clean_title, group_by_category,
    pages_by_category,
};
pub use client::{DEFAULT_INDEX_URL, DEFAULT_TIMEOUT_SECS, HttpPageIndex, PageIndex, StaticPageIndex};
pub use error::IndexError;
pub use record::{PageRecord, parse_index};
