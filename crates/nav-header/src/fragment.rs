//! Fragment loading.
//!
//! A fragment is authored markup loaded by path (e.g. `/nav`). Loaders parse
//! it into a detached `main` element of the caller's tree and decorate it
//! into sections: each top-level `div` becomes a `div.section`, and within a
//! section default content is wrapped in `div.default-content-wrapper` while
//! each block `div` (a `div` with a class) is wrapped in `div.<block>-wrapper`.
//!
//! Loaders never fail loudly: an unreadable or unparsable fragment is logged
//! and reported as `None`.

use std::collections::HashMap;
use std::path::{Component, Path, PathBuf};

use nav_dom::{ElementTree, NodeId, parse_fragment};

use crate::classes;

/// Source of fragments.
pub trait FragmentLoader {
    /// Load the fragment at `path` into `tree` as a detached `main` element.
    ///
    /// Returns `None` if the fragment does not exist or cannot be parsed.
    fn load_fragment<T: ElementTree>(&self, tree: &mut T, path: &str) -> Option<NodeId>;
}

/// Loads `<root>/<path>.plain.html` from disk.
#[derive(Clone, Debug)]
pub struct FsFragmentLoader {
    root: PathBuf,
}

impl FsFragmentLoader {
    /// Create a loader reading from `root`.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// File backing a fragment path, `None` if the path escapes the root.
    fn file_for(&self, path: &str) -> Option<PathBuf> {
        let relative = Path::new(path.trim_start_matches('/'));
        if relative.as_os_str().is_empty()
            || relative
                .components()
                .any(|c| !matches!(c, Component::Normal(_)))
        {
            return None;
        }
        let mut file = self.root.join(relative).into_os_string();
        file.push(".plain.html");
        Some(PathBuf::from(file))
    }
}

impl FragmentLoader for FsFragmentLoader {
    fn load_fragment<T: ElementTree>(&self, tree: &mut T, path: &str) -> Option<NodeId> {
        let Some(file) = self.file_for(path) else {
            tracing::warn!(path = %path, "Rejected fragment path");
            return None;
        };
        match std::fs::read_to_string(&file) {
            Ok(markup) => build_fragment(tree, path, &markup),
            Err(e) => {
                tracing::warn!(path = %file.display(), error = %e, "Failed to read fragment");
                None
            }
        }
    }
}

/// In-memory fragments keyed by path.
#[derive(Clone, Debug, Default)]
pub struct StaticFragmentLoader {
    fragments: HashMap<String, String>,
}

impl StaticFragmentLoader {
    /// Create an empty loader; every load returns `None`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register markup for a path.
    #[must_use]
    pub fn with_fragment(mut self, path: impl Into<String>, markup: impl Into<String>) -> Self {
        self.fragments.insert(path.into(), markup.into());
        self
    }
}

impl FragmentLoader for StaticFragmentLoader {
    fn load_fragment<T: ElementTree>(&self, tree: &mut T, path: &str) -> Option<NodeId> {
        let markup = self.fragments.get(path)?;
        build_fragment(tree, path, markup)
    }
}

/// Parse markup into a detached `main` and decorate its sections.
fn build_fragment<T: ElementTree>(tree: &mut T, path: &str, markup: &str) -> Option<NodeId> {
    let main = tree.create_element("main");
    if let Err(e) = parse_fragment(tree, main, markup) {
        tracing::warn!(path = %path, error = %e, "Failed to parse fragment");
        return None;
    }
    decorate_sections(tree, main);
    Some(main)
}

/// Turn top-level `div`s of `main` into sections with wrapped content.
pub fn decorate_sections<T: ElementTree>(tree: &mut T, main: NodeId) {
    for section in tree.child_elements(main) {
        if !tree.is_tag(section, "div") {
            continue;
        }
        tree.add_class(section, classes::SECTION);
        wrap_section_content(tree, section);
    }
}

fn wrap_section_content<T: ElementTree>(tree: &mut T, section: NodeId) {
    let children = tree.children(section).to_vec();
    tree.clear_children(section);

    let mut default_wrapper: Option<NodeId> = None;
    for child in children {
        if let Some(block) = block_name(tree, child) {
            default_wrapper = None;
            let wrapper = tree.create_element("div");
            tree.set_class(wrapper, &format!("{block}-wrapper"));
            tree.append_child(wrapper, child);
            tree.append_child(section, wrapper);
            continue;
        }

        let is_blank = tree.text(child).is_some_and(|t| t.trim().is_empty());
        match default_wrapper {
            Some(wrapper) => tree.append_child(wrapper, child),
            None if is_blank => {}
            None => {
                let wrapper = tree.create_element("div");
                tree.set_class(wrapper, classes::DEFAULT_CONTENT_WRAPPER);
                tree.append_child(wrapper, child);
                tree.append_child(section, wrapper);
                default_wrapper = Some(wrapper);
            }
        }
    }
}

/// Block name of a node: the first class of a classed `div`.
fn block_name<T: ElementTree>(tree: &T, node: NodeId) -> Option<String> {
    if !tree.is_tag(node, "div") {
        return None;
    }
    tree.attr(node, "class")?
        .split_whitespace()
        .next()
        .map(str::to_owned)
}
