//! The decoration pass: load, expand, assemble, replace.

use std::path::Path;

use nav_config::{Config, ConfigError};
use nav_dom::{ElementTree, NodeId};
use nav_index::{HttpPageIndex, PageIndex};
use tracing::{debug, info};

use crate::assemble::{Navigation, assemble_navigation};
use crate::fragment::{FragmentLoader, FsFragmentLoader};
use crate::placeholder::expand_placeholders;

/// Inputs of a decoration pass that are not collaborators.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HeaderOptions {
    /// Fragment path handed to the loader.
    pub fragment_path: String,
    /// Sentinel token marking placeholders.
    pub placeholder: String,
    /// Language label used when the tools list has no usable first item.
    pub default_language: String,
}

impl Default for HeaderOptions {
    fn default() -> Self {
        Self {
            fragment_path: "/nav".to_owned(),
            placeholder: "placeholder".to_owned(),
            default_language: "ITA".to_owned(),
        }
    }
}

impl From<&Config> for HeaderOptions {
    fn from(config: &Config) -> Self {
        Self {
            fragment_path: config.fragment_resolved.path.clone(),
            placeholder: config.navigation.placeholder.clone(),
            default_language: config.navigation.default_language.clone(),
        }
    }
}

/// Decorates header blocks with a navigation built from a fragment and the
/// page index.
pub struct HeaderDecorator<L, I> {
    loader: L,
    index: I,
    options: HeaderOptions,
}

impl<L: FragmentLoader, I: PageIndex> HeaderDecorator<L, I> {
    #[must_use]
    pub fn new(loader: L, index: I, options: HeaderOptions) -> Self {
        Self {
            loader,
            index,
            options,
        }
    }

    #[must_use]
    pub fn options(&self) -> &HeaderOptions {
        &self.options
    }

    #[must_use]
    pub fn loader(&self) -> &L {
        &self.loader
    }

    #[must_use]
    pub fn index(&self) -> &I {
        &self.index
    }

    /// Replace the content of `block` with the assembled navigation.
    ///
    /// Returns `None`, leaving `block` untouched, if the fragment cannot be
    /// loaded. The page index is read once per call.
    ///
    /// The fragment is loaded into `tree` and stays there, detached, once its
    /// content has been moved into the navigation. The same goes for the
    /// block's previous children and any removed placeholders. An arena tree
    /// such as [`nav_dom::Document`] never frees nodes, so it grows by one
    /// fragment per call; decorate into a fresh document when that matters.
    pub fn decorate<T: ElementTree>(&self, tree: &mut T, block: NodeId) -> Option<Navigation> {
        let path = self.options.fragment_path.as_str();
        let Some(fragment) = self.loader.load_fragment(tree, path) else {
            debug!(path = %path, "Navigation fragment unavailable, skipping decoration");
            return None;
        };

        let pages = self.index.fetch_pages();
        let report = expand_placeholders(tree, fragment, &pages, &self.options.placeholder);
        let navigation = assemble_navigation(tree, fragment, &self.options.default_language);

        tree.clear_children(block);
        tree.append_child(block, navigation.root());

        info!(
            path = %path,
            pages = pages.len(),
            expanded = report.expanded,
            removed = report.removed,
            entries = report.entries,
            dropdowns = navigation.controller().dropdown_items().len(),
            "Decorated header"
        );
        Some(navigation)
    }
}

impl HeaderDecorator<FsFragmentLoader, HttpPageIndex> {
    /// Decorator reading fragments from disk and pages over HTTP.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        let loader = FsFragmentLoader::new(config.fragment_resolved.root.clone());
        let index = HttpPageIndex::new(config.index.url.clone(), config.index.timeout());
        Self::new(loader, index, HeaderOptions::from(config))
    }

    /// Load `navbar.toml` and build a decorator from it.
    ///
    /// With `None`, the file is searched for in the current directory and its
    /// parents, and defaults are used if there is none. See [`Config::load`].
    ///
    /// ```no_run
    /// use nav_dom::{Document, ElementTree};
    /// use nav_header::HeaderDecorator;
    ///
    /// let decorator = HeaderDecorator::load(None)?;
    /// let mut doc = Document::new();
    /// let block = doc.create_element("div");
    /// doc.append_child(doc.root(), block);
    /// decorator.decorate(&mut doc, block);
    /// # Ok::<(), nav_config::ConfigError>(())
    /// ```
    pub fn load(config_path: Option<&Path>) -> Result<Self, ConfigError> {
        let config = Config::load(config_path)?;
        Ok(Self::from_config(&config))
    }
}
