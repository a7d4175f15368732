//! Placeholder expansion.
//!
//! Authors mark spots in the navigation fragment where entries should be
//! generated from the page index. A marker comes in one of two shapes, and
//! [`classify_placeholders`] turns each into a [`Placeholder`] variant before
//! anything is mutated:
//!
//! - [`Placeholder::LinkScoped`]: a link whose target or text is the sentinel
//!   token. It sits inside a category's submenu; the category label is read
//!   from the list item two list levels up, and the placeholder item becomes
//!   one item per matching page.
//! - [`Placeholder::ListItemScoped`]: a bare list item (no link) whose text is
//!   the sentinel token. It becomes a complete two-level menu, one item per
//!   category with that category's pages nested below.
//!
//! Every marker is either replaced by at least one entry or removed.

use nav_dom::{ElementTree, NodeId};
use nav_index::{PageRecord, clean_title, group_by_category, pages_by_category};
use tracing::debug;

/// A classified placeholder marker.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Placeholder {
    /// Marker link inside a category submenu.
    LinkScoped {
        /// The marker link.
        link: NodeId,
    },
    /// Bare list item standing for the whole category menu.
    ListItemScoped {
        /// The marker list item.
        item: NodeId,
    },
}

/// Outcome counts of one expansion pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ExpansionReport {
    /// Markers replaced by generated entries.
    pub expanded: usize,
    /// Markers removed because nothing matched.
    pub removed: usize,
    /// Markers already consumed by an earlier expansion.
    pub skipped: usize,
    /// Top-level entries generated.
    pub entries: usize,
}

/// Find placeholder markers under `root`, in document order.
///
/// `token` is compared case-insensitively after trimming.
pub fn classify_placeholders<T: ElementTree>(
    tree: &T,
    root: NodeId,
    token: &str,
) -> Vec<Placeholder> {
    tree.descendants(root)
        .into_iter()
        .filter_map(|node| {
            if tree.is_tag(node, "a") && is_marker_link(tree, node, token) {
                Some(Placeholder::LinkScoped { link: node })
            } else if tree.is_tag(node, "li") && is_marker_item(tree, node, token) {
                Some(Placeholder::ListItemScoped { item: node })
            } else {
                None
            }
        })
        .collect()
}

/// Classify and expand every placeholder under `root`.
///
/// Markers are collected before the first mutation, so entries generated
/// here are never re-examined within the same pass.
pub fn expand_placeholders<T: ElementTree>(
    tree: &mut T,
    root: NodeId,
    pages: &[PageRecord],
    token: &str,
) -> ExpansionReport {
    let mut report = ExpansionReport::default();
    for placeholder in classify_placeholders(tree, root, token) {
        placeholder.expand(tree, pages, &mut report);
    }
    report
}

impl Placeholder {
    /// Replace this marker with generated entries, or remove it.
    pub fn expand<T: ElementTree>(
        self,
        tree: &mut T,
        pages: &[PageRecord],
        report: &mut ExpansionReport,
    ) {
        match self {
            Self::LinkScoped { link } => expand_link_scoped(tree, link, pages, report),
            Self::ListItemScoped { item } => expand_list_item_scoped(tree, item, pages, report),
        }
    }
}

fn matches_token(value: &str, token: &str) -> bool {
    value.trim().to_lowercase() == token.trim().to_lowercase()
}

/// Last path segment of a link target, ignoring query, fragment and a
/// trailing slash.
fn target_segment(href: &str) -> &str {
    let href = href.trim();
    let end = href.find(['?', '#']).unwrap_or(href.len());
    let path = href[..end].trim_end_matches('/');
    path.rsplit('/').next().unwrap_or(path)
}

fn is_marker_link<T: ElementTree>(tree: &T, link: NodeId, token: &str) -> bool {
    let target_matches = tree
        .attr(link, "href")
        .is_some_and(|href| matches_token(target_segment(href), token));
    target_matches || matches_token(&tree.text_content(link), token)
}

fn is_marker_item<T: ElementTree>(tree: &T, item: NodeId, token: &str) -> bool {
    tree.first_descendant(item, "a").is_none() && matches_token(&tree.text_content(item), token)
}

/// Label of a category item: its direct link's text, else its first
/// non-blank direct text.
fn category_label<T: ElementTree>(tree: &T, item: NodeId) -> Option<String> {
    let children = tree.children(item);
    let from_link = children
        .iter()
        .find(|&&c| tree.is_tag(c, "a"))
        .map(|&link| tree.text_content(link).trim().to_owned());
    let from_text = || {
        children
            .iter()
            .find_map(|&c| tree.text(c).map(str::trim).filter(|t| !t.is_empty()))
            .map(str::to_owned)
    };
    from_link
        .filter(|label| !label.is_empty())
        .or_else(from_text)
}

/// `li > a[href]` for one page.
fn page_entry<T: ElementTree>(tree: &mut T, page: &PageRecord) -> NodeId {
    let item = tree.create_element("li");
    let link = tree.create_element("a");
    tree.set_attr(link, "href", &page.path);
    tree.append_text(link, clean_title(&page.title));
    tree.append_child(item, link);
    item
}

/// Put `entries` where `marker` is: the first replaces it, the rest follow
/// it as a contiguous run in order.
fn splice_entries<T: ElementTree>(tree: &mut T, marker: NodeId, entries: &[NodeId]) {
    let mut anchor = marker;
    for (i, &entry) in entries.iter().enumerate() {
        if i == 0 {
            tree.replace(marker, entry);
        } else {
            tree.insert_after(anchor, entry);
        }
        anchor = entry;
    }
}

fn expand_link_scoped<T: ElementTree>(
    tree: &mut T,
    link: NodeId,
    pages: &[PageRecord],
    report: &mut ExpansionReport,
) {
    let Some(item) = tree.closest_ancestor(link, "li") else {
        debug!("Placeholder link outside any list item, removing it");
        tree.remove(link);
        report.removed += 1;
        return;
    };
    if tree.parent(item).is_none() {
        report.skipped += 1;
        return;
    }

    let list = tree.closest_ancestor(item, "ul");
    let category = list
        .and_then(|list| tree.closest_ancestor(list, "li"))
        .and_then(|owner| category_label(tree, owner));
    let (Some(list), Some(category)) = (list, category) else {
        debug!("Placeholder without category ancestor, removing it");
        tree.remove(item);
        report.removed += 1;
        return;
    };

    let matching = pages_by_category(pages, &category);
    if matching.is_empty() {
        debug!(category = %category, "No pages for placeholder category");
        tree.remove(item);
        report.removed += 1;
        return;
    }

    // The first entry takes the marker's place; the rest go to the end of
    // the submenu.
    let count = matching.len();
    for (i, page) in matching.into_iter().enumerate() {
        let entry = page_entry(tree, page);
        if i == 0 {
            tree.replace(item, entry);
        } else {
            tree.append_child(list, entry);
        }
    }
    report.expanded += 1;
    report.entries += count;
}

fn expand_list_item_scoped<T: ElementTree>(
    tree: &mut T,
    item: NodeId,
    pages: &[PageRecord],
    report: &mut ExpansionReport,
) {
    if tree.parent(item).is_none() {
        report.skipped += 1;
        return;
    }

    let groups = group_by_category(pages);
    if groups.is_empty() {
        debug!("No categories for placeholder menu");
        tree.remove(item);
        report.removed += 1;
        return;
    }

    let mut entries = Vec::with_capacity(groups.len());
    for group in &groups {
        let category_item = tree.create_element("li");
        tree.append_text(category_item, group.name);
        let list = tree.create_element("ul");
        for &page in &group.pages {
            let entry = page_entry(tree, page);
            tree.append_child(list, entry);
        }
        tree.append_child(category_item, list);
        entries.push(category_item);
    }
    splice_entries(tree, item, &entries);
    report.expanded += 1;
    report.entries += entries.len();
}

#[cfg(test)]
mod tests {
    use nav_dom::{Document, parse_fragment, serialize_children};
    use pretty_assertions::assert_eq;

    use super::*;

    const TOKEN: &str = "placeholder";

    fn load(markup: &str) -> (Document, NodeId) {
        let mut doc = Document::new();
        let root = doc.root();
        parse_fragment(&mut doc, root, markup).unwrap();
        (doc, root)
    }

    fn settori_pages() -> Vec<PageRecord> {
        vec![
            PageRecord::new("/settori/agricoltura", "Settori | Agricoltura")
                .with_category("Settori"),
            PageRecord::new("/prodotti/trattori", "Prodotti | Trattori").with_category("Prodotti"),
            PageRecord::new("/settori/vigneti", "Settori | Vigneti").with_category("settori"),
            PageRecord::new("/chi-siamo", "Chi siamo"),
        ]
    }

    #[test]
    fn test_classify_both_shapes() {
        let (doc, root) = load(concat!(
            "<ul>",
            r#"<li>Settori<ul><li><a href="/placeholder">Vedi</a></li></ul></li>"#,
            "<li>Prodotti<ul><li><a href=\"/x\"> PlaceHolder </a></li></ul></li>",
            "<li>placeholder</li>",
            r#"<li><a href="/chi-siamo">Chi siamo</a></li>"#,
            "</ul>"
        ));

        let placeholders = classify_placeholders(&doc, root, TOKEN);

        assert_eq!(placeholders.len(), 3);
        assert!(matches!(placeholders[0], Placeholder::LinkScoped { .. }));
        assert!(matches!(placeholders[1], Placeholder::LinkScoped { .. }));
        assert!(matches!(placeholders[2], Placeholder::ListItemScoped { .. }));
    }

    #[test]
    fn test_classify_absolute_target() {
        let (doc, root) = load(
            r#"<ul><li>S<ul><li><a href="https://example.com/placeholder/?x=1">Tutti</a></li></ul></li></ul>"#,
        );

        assert_eq!(classify_placeholders(&doc, root, TOKEN).len(), 1);
    }

    #[test]
    fn test_classify_ignores_similar_targets() {
        let (doc, root) = load(
            r#"<ul><li><a href="/placeholders">x</a></li><li>placeholder text</li></ul>"#,
        );

        assert!(classify_placeholders(&doc, root, TOKEN).is_empty());
    }

    #[test]
    fn test_link_scoped_replaces_marker_and_appends_rest() {
        let (mut doc, root) = load(concat!(
            "<ul><li>Settori<ul>",
            r#"<li><a href="/settori">Panoramica</a></li>"#,
            r#"<li><a href="/placeholder">placeholder</a></li>"#,
            r#"<li><a href="/contatti">Contatti</a></li>"#,
            "</ul></li></ul>"
        ));

        let report = expand_placeholders(&mut doc, root, &settori_pages(), TOKEN);

        assert_eq!(
            serialize_children(&doc, root),
            concat!(
                "<ul><li>Settori<ul>",
                r#"<li><a href="/settori">Panoramica</a></li>"#,
                r#"<li><a href="/settori/agricoltura">Agricoltura</a></li>"#,
                r#"<li><a href="/contatti">Contatti</a></li>"#,
                r#"<li><a href="/settori/vigneti">Vigneti</a></li>"#,
                "</ul></li></ul>"
            )
        );
        assert_eq!(
            report,
            ExpansionReport {
                expanded: 1,
                entries: 2,
                ..Default::default()
            }
        );
    }

    #[test]
    fn test_link_scoped_category_from_link_label() {
        let (mut doc, root) = load(concat!(
            r#"<ul><li><a href="/prodotti">Prodotti</a><ul>"#,
            r#"<li><a href="/placeholder">placeholder</a></li>"#,
            "</ul></li></ul>"
        ));

        expand_placeholders(&mut doc, root, &settori_pages(), TOKEN);

        assert_eq!(
            serialize_children(&doc, root),
            concat!(
                r#"<ul><li><a href="/prodotti">Prodotti</a><ul>"#,
                r#"<li><a href="/prodotti/trattori">Trattori</a></li>"#,
                "</ul></li></ul>"
            )
        );
    }

    #[test]
    fn test_link_scoped_without_matches_removes_item() {
        let (mut doc, root) = load(concat!(
            "<ul><li>Servizi<ul>",
            r#"<li><a href="/assistenza">Assistenza</a></li>"#,
            r#"<li><a href="/placeholder">placeholder</a></li>"#,
            "</ul></li></ul>"
        ));

        let report = expand_placeholders(&mut doc, root, &settori_pages(), TOKEN);

        assert_eq!(
            serialize_children(&doc, root),
            r#"<ul><li>Servizi<ul><li><a href="/assistenza">Assistenza</a></li></ul></li></ul>"#
        );
        assert_eq!(report.removed, 1);
    }

    #[test]
    fn test_link_scoped_without_category_ancestor_removes_item() {
        let (mut doc, root) = load(concat!(
            r#"<ul><li><a href="/a">A</a></li><li><a href="/placeholder">placeholder</a></li></ul>"#,
        ));

        let report = expand_placeholders(&mut doc, root, &settori_pages(), TOKEN);

        assert_eq!(
            serialize_children(&doc, root),
            r#"<ul><li><a href="/a">A</a></li></ul>"#
        );
        assert_eq!(report.removed, 1);
    }

    #[test]
    fn test_link_outside_list_removed() {
        let (mut doc, root) = load(r#"<p>Go <a href="/placeholder">placeholder</a></p>"#);

        expand_placeholders(&mut doc, root, &settori_pages(), TOKEN);

        assert_eq!(serialize_children(&doc, root), "<p>Go </p>");
    }

    #[test]
    fn test_two_markers_in_one_item_expand_once() {
        let (mut doc, root) = load(concat!(
            "<ul><li>Settori<ul><li>",
            r#"<a href="/placeholder">placeholder</a><a href="/placeholder">placeholder</a>"#,
            "</li></ul></li></ul>"
        ));

        let report = expand_placeholders(&mut doc, root, &settori_pages(), TOKEN);

        assert_eq!(report.expanded, 1);
        assert_eq!(report.skipped, 1);
        let list = doc.descendants_by_tag(root, "ul")[1];
        assert_eq!(doc.child_elements(list).len(), 2);
    }

    #[test]
    fn test_independent_markers_resolved_separately() {
        let (mut doc, root) = load(concat!(
            "<ul>",
            r#"<li>Settori<ul><li><a href="/placeholder">placeholder</a></li></ul></li>"#,
            r#"<li>Prodotti<ul><li><a href="/placeholder">placeholder</a></li></ul></li>"#,
            "</ul>"
        ));

        let report = expand_placeholders(&mut doc, root, &settori_pages(), TOKEN);

        assert_eq!(report.expanded, 2);
        assert_eq!(report.entries, 3);
        assert!(classify_placeholders(&doc, root, TOKEN).is_empty());
    }

    #[test]
    fn test_list_item_scoped_builds_two_level_menu() {
        let (mut doc, root) = load(concat!(
            r#"<ul><li><a href="/">Home</a></li><li>placeholder</li>"#,
            r#"<li><a href="/contatti">Contatti</a></li></ul>"#
        ));

        let report = expand_placeholders(&mut doc, root, &settori_pages(), TOKEN);

        assert_eq!(
            serialize_children(&doc, root),
            concat!(
                r#"<ul><li><a href="/">Home</a></li>"#,
                "<li>Settori<ul>",
                r#"<li><a href="/settori/agricoltura">Agricoltura</a></li>"#,
                r#"<li><a href="/settori/vigneti">Vigneti</a></li>"#,
                "</ul></li>",
                "<li>Prodotti<ul>",
                r#"<li><a href="/prodotti/trattori">Trattori</a></li>"#,
                "</ul></li>",
                r#"<li><a href="/contatti">Contatti</a></li></ul>"#
            )
        );
        assert_eq!(report.entries, 2);
    }

    #[test]
    fn test_list_item_scoped_without_categories_removed() {
        let (mut doc, root) = load("<ul><li>Home</li><li> Placeholder </li></ul>");

        let report = expand_placeholders(&mut doc, root, &[], TOKEN);

        assert_eq!(serialize_children(&doc, root), "<ul><li>Home</li></ul>");
        assert_eq!(report.removed, 1);
    }

    #[test]
    fn test_expansion_leaves_records_untouched() {
        let pages = settori_pages();
        let before = pages.clone();
        let (mut doc, root) = load("<ul><li>placeholder</li></ul>");

        expand_placeholders(&mut doc, root, &pages, TOKEN);

        assert_eq!(pages, before);
    }

    #[test]
    fn test_custom_token() {
        let (mut doc, root) = load("<ul><li>placeholder</li><li>AUTO</li></ul>");

        expand_placeholders(&mut doc, root, &settori_pages(), "auto");

        let top: Vec<_> = doc
            .child_elements(doc.child_elements(root)[0])
            .into_iter()
            .map(|li| doc.text(doc.children(li)[0]).unwrap_or_default().to_owned())
            .collect();
        assert_eq!(top, vec!["placeholder", "Settori", "Prodotti"]);
    }

    #[test]
    fn test_target_segment() {
        assert_eq!(target_segment("/placeholder"), "placeholder");
        assert_eq!(target_segment("https://x.org/a/placeholder/"), "placeholder");
        assert_eq!(target_segment("/placeholder#top"), "placeholder");
        assert_eq!(target_segment("placeholder"), "placeholder");
    }
}
