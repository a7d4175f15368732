//! Page records and the index payload envelope.

use serde::{Deserialize, Deserializer, Serialize};
use tracing::debug;

use crate::error::IndexError;

/// One page from the site's page index.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRecord {
    /// URL path of the page (e.g. "/settori/agricoltura").
    pub path: String,
    /// Page title, possibly composite ("Settori | Agricoltura").
    #[serde(default, deserialize_with = "null_as_empty")]
    pub title: String,
    /// Free-form category name.
    #[serde(default)]
    pub category: Option<String>,
}

impl PageRecord {
    /// Create a record.
    #[must_use]
    pub fn new(path: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            title: title.into(),
            category: None,
        }
    }

    /// Set the category.
    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Category name, `None` when missing or blank.
    #[must_use]
    pub fn category_name(&self) -> Option<&str> {
        self.category.as_deref().filter(|c| !c.trim().is_empty())
    }
}

fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Deserialize)]
struct IndexPayload {
    #[serde(default)]
    data: Option<Vec<serde_json::Value>>,
}

/// Parse an index payload of the form `{ "data": [ ... ] }`.
///
/// A payload without `data` (or with `"data": null`) yields an empty list.
/// Rows that are not valid records are skipped.
///
/// # Errors
///
/// Returns [`IndexError::Json`] if the body is not JSON or `data` is not a
/// list.
pub fn parse_index(body: &str) -> Result<Vec<PageRecord>, IndexError> {
    let payload: IndexPayload = serde_json::from_str(body)?;
    let pages = payload
        .data
        .unwrap_or_default()
        .into_iter()
        .filter_map(|row| match serde_json::from_value::<PageRecord>(row) {
            Ok(page) => Some(page),
            Err(e) => {
                debug!(error = %e, "Skipping malformed index row");
                None
            }
        })
        .collect();
    Ok(pages)
}
