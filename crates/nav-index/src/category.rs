//! Category filtering and grouping over page records.
//!
//! All functions borrow the fetched records; nothing here mutates them.

use std::collections::HashMap;

use crate::record::PageRecord;

/// Separator used in composite page titles ("Section | Item").
pub const TITLE_SEPARATOR: char = '|';

/// Pages whose category equals `name`, compared case-insensitively.
///
/// Pages without a category never match. Source order is preserved.
pub fn pages_by_category<'a>(pages: &'a [PageRecord], name: &str) -> Vec<&'a PageRecord> {
    let wanted = name.to_lowercase();
    pages
        .iter()
        .filter(|page| {
            page.category_name()
                .is_some_and(|category| category.to_lowercase() == wanted)
        })
        .collect()
}

/// Display title for a page.
///
/// Returns the trimmed last segment of a composite title, or `raw` unchanged
/// when it has no separator.
pub fn clean_title(raw: &str) -> &str {
    if !raw.contains(TITLE_SEPARATOR) {
        return raw;
    }
    raw.rsplit(TITLE_SEPARATOR).next().map_or(raw, str::trim)
}

/// Pages sharing one category.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CategoryGroup<'a> {
    /// Category name as it first appeared in the index.
    pub name: &'a str,
    /// Pages in source order.
    pub pages: Vec<&'a PageRecord>,
}

/// Categories in first-seen order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CategoryGroups<'a> {
    groups: Vec<CategoryGroup<'a>>,
}

impl<'a> CategoryGroups<'a> {
    /// Number of categories.
    #[must_use]
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// True if no page had a category.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Group by category name, compared case-insensitively.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&CategoryGroup<'a>> {
        let wanted = name.to_lowercase();
        self.groups
            .iter()
            .find(|group| group.name.to_lowercase() == wanted)
    }

    /// Category names in first-seen order.
    pub fn names(&self) -> impl Iterator<Item = &'a str> + '_ {
        self.groups.iter().map(|group| group.name)
    }

    /// Iterate over groups in first-seen order.
    pub fn iter(&self) -> std::slice::Iter<'_, CategoryGroup<'a>> {
        self.groups.iter()
    }
}

impl<'a, 'g> IntoIterator for &'g CategoryGroups<'a> {
    type Item = &'g CategoryGroup<'a>;
    type IntoIter = std::slice::Iter<'g, CategoryGroup<'a>>;

    fn into_iter(self) -> Self::IntoIter {
        self.groups.iter()
    }
}

/// Group pages by category, skipping pages with a missing or blank category.
///
/// Names are compared case-insensitively, the same way
/// [`pages_by_category`] matches them; a group keeps the spelling it was
/// first seen with.
pub fn group_by_category(pages: &[PageRecord]) -> CategoryGroups<'_> {
    let mut groups: Vec<CategoryGroup<'_>> = Vec::new();
    let mut positions: HashMap<String, usize> = HashMap::new();

    for page in pages {
        let Some(name) = page.category_name() else {
            continue;
        };
        let key = name.to_lowercase();
        match positions.get(&key) {
            Some(&index) => groups[index].pages.push(page),
            None => {
                positions.insert(key, groups.len());
                groups.push(CategoryGroup {
                    name,
                    pages: vec![page],
                });
            }
        }
    }

    CategoryGroups { groups }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn sample_pages() -> Vec<PageRecord> {
        vec![
            PageRecord::new("/settori/agricoltura", "Settori | Agricoltura")
                .with_category("Agricoltura"),
            PageRecord::new("/chi-siamo", "Chi siamo"),
            PageRecord::new("/prodotti/trattori", "Prodotti | Trattori").with_category("Prodotti"),
            PageRecord::new("/settori/vigneti", "Vigneti").with_category("agricoltura"),
            PageRecord::new("/news", "News").with_category(""),
            PageRecord::new("/prodotti/ricambi", "Ricambi").with_category("Prodotti"),
        ]
    }

    #[test]
    fn test_clean_title_takes_last_segment() {
        assert_eq!(clean_title("Settori | Agricoltura"), "Agricoltura");
        assert_eq!(clean_title("A | B | C"), "C");
        assert_eq!(clean_title("Trailing |"), "");
    }

    #[test]
    fn test_clean_title_without_separator_unchanged() {
        assert_eq!(clean_title("NoSeparator"), "NoSeparator");
        assert_eq!(clean_title("  padded  "), "  padded  ");
    }

    #[test]
    fn test_pages_by_category_case_insensitive() {
        let pages = sample_pages();

        let paths: Vec<_> = pages_by_category(&pages, "Agricoltura")
            .into_iter()
            .map(|p| p.path.as_str())
            .collect();

        assert_eq!(paths, vec!["/settori/agricoltura", "/settori/vigneti"]);
    }

    #[test]
    fn test_pages_by_category_unknown_and_empty() {
        let pages = sample_pages();

        assert!(pages_by_category(&pages, "Servizi").is_empty());
        assert!(pages_by_category(&pages, "").is_empty());
        assert!(pages_by_category(&[], "Prodotti").is_empty());
    }

    #[test]
    fn test_group_by_category_first_seen_order() {
        let pages = sample_pages();
        let groups = group_by_category(&pages);

        assert_eq!(
            groups.names().collect::<Vec<_>>(),
            vec!["Agricoltura", "Prodotti"]
        );
        let agricoltura = groups.get("AGRICOLTURA").unwrap();
        assert_eq!(agricoltura.name, "Agricoltura");
        assert_eq!(agricoltura.pages.len(), 2);
        let prodotti = groups.get("Prodotti").unwrap();
        assert_eq!(
            prodotti.pages.iter().map(|p| p.path.as_str()).collect::<Vec<_>>(),
            vec!["/prodotti/trattori", "/prodotti/ricambi"]
        );
    }

    #[test]
    fn test_group_by_category_skips_missing() {
        let pages = vec![
            PageRecord::new("/a", "A"),
            PageRecord::new("/b", "B").with_category(" "),
        ];

        let groups = group_by_category(&pages);

        assert!(groups.is_empty());
        assert_eq!(groups.len(), 0);
    }
}
