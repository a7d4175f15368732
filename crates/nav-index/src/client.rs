//! Page index sources.
//!
//! [`PageIndex`] is total: implementations swallow their own failures and
//! return an empty list, so callers only ever deal with "zero or more pages".

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use tracing::{info, warn};
use ureq::Agent;

use crate::error::IndexError;
use crate::record::{PageRecord, parse_index};

/// Well-known page index endpoint.
pub const DEFAULT_INDEX_URL: &str =
    "https://main--boilerplate--eds-codeland.aem.page/query-index.json";

/// Default HTTP timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Source of page records.
pub trait PageIndex {
    /// Fetch all pages. Never fails; errors yield an empty list.
    fn fetch_pages(&self) -> Vec<PageRecord>;
}

/// Page index read over HTTP.
pub struct HttpPageIndex {
    agent: Agent,
    url: String,
}

impl HttpPageIndex {
    /// Create a client for the given endpoint.
    #[must_use]
    pub fn new(url: impl Into<String>, timeout: Duration) -> Self {
        let agent = Agent::config_builder()
            .timeout_global(Some(timeout))
            .http_status_as_error(false)
            .build()
            .into();

        Self {
            agent,
            url: url.into(),
        }
    }

    /// Endpoint this client reads.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    fn try_fetch(&self) -> Result<Vec<PageRecord>, IndexError> {
        let response = self
            .agent
            .get(&self.url)
            .header("Accept", "application/json")
            .call()?;

        let status = response.status().as_u16();
        if status >= 400 {
            return Err(IndexError::HttpStatus { status });
        }

        let body = response.into_body().read_to_string()?;
        parse_index(&body)
    }
}

impl Default for HttpPageIndex {
    fn default() -> Self {
        Self::new(
            DEFAULT_INDEX_URL,
            Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        )
    }
}

impl PageIndex for HttpPageIndex {
    fn fetch_pages(&self) -> Vec<PageRecord> {
        match self.try_fetch() {
            Ok(pages) => {
                info!(url = %self.url, count = pages.len(), "Fetched page index");
                pages
            }
            Err(e) => {
                warn!(url = %self.url, error = %e, "Failed to fetch page index");
                Vec::new()
            }
        }
    }
}

/// In-memory page index.
///
/// Counts fetches so callers can check how often the index was read.
#[derive(Debug, Default)]
pub struct StaticPageIndex {
    pages: Vec<PageRecord>,
    fetches: AtomicUsize,
}

impl StaticPageIndex {
    /// Create an index serving `pages`.
    #[must_use]
    pub fn new(pages: Vec<PageRecord>) -> Self {
        Self {
            pages,
            fetches: AtomicUsize::new(0),
        }
    }

    /// Number of `fetch_pages` calls so far.
    #[must_use]
    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::Relaxed)
    }
}

impl PageIndex for StaticPageIndex {
    fn fetch_pages(&self) -> Vec<PageRecord> {
        self.fetches.fetch_add(1, Ordering::Relaxed);
        self.pages.clone()
    }
}
