//! Navigation assembly.
//!
//! Consumes a decorated fragment (placeholders already expanded) and builds:
//!
//! ```text
//! nav#nav[aria-expanded]
//! ├── div.nav-hamburger > button > span.nav-hamburger-icon > span
//! ├── div.nav-top
//! │   ├── div.nav-brand        (section 0, moved)
//! │   └── div.nav-tools        (section 2)
//! ├── div.nav-bottom
//! │   └── div.nav-sections     (section 1, moved; li.nav-drop per submenu)
//! └── div.nav-tools-mobile     (clone of div.nav-tools)
//! ```
//!
//! Missing sections contribute nothing.

use nav_dom::{ElementTree, NodeId};

use crate::classes;
use crate::interaction::{Expansion, InteractionController};

/// Arrow shown after the current language label.
const LANG_ARROW_GLYPH: &str = "\u{2228}";

/// An assembled navigation and its interaction state.
#[derive(Clone, Debug)]
pub struct Navigation {
    root: NodeId,
    controller: InteractionController,
}

impl Navigation {
    /// The `nav` element.
    #[must_use]
    pub fn root(&self) -> NodeId {
        self.root
    }

    #[must_use]
    pub fn controller(&self) -> &InteractionController {
        &self.controller
    }

    /// Whether the hamburger menu is open.
    #[must_use]
    pub fn is_expanded(&self) -> bool {
        self.controller.nav_state().is_expanded()
    }

    /// State of the dropdown on `item`, `None` if `item` is not a dropdown.
    #[must_use]
    pub fn dropdown_state(&self, item: NodeId) -> Option<Expansion> {
        self.controller.dropdown_state(item)
    }

    /// Deliver a click on `target` and re-render.
    ///
    /// Returns `true` if any handler ran.
    pub fn click<T: ElementTree>(&mut self, tree: &mut T, target: NodeId) -> bool {
        let fired = self.controller.dispatch_click(tree, target);
        if fired.is_empty() {
            return false;
        }
        self.controller.render(tree, self.root);
        true
    }
}

/// Build the navigation from the sections of `fragment`.
///
/// The returned root is detached; section content is moved out of
/// `fragment`.
pub fn assemble_navigation<T: ElementTree>(
    tree: &mut T,
    fragment: NodeId,
    default_language: &str,
) -> Navigation {
    let mut controller = InteractionController::new();

    let nav = tree.create_element("nav");
    tree.set_attr(nav, "id", classes::NAV_ID);
    tree.set_attr(nav, "aria-expanded", Expansion::Collapsed.aria_value());

    let top = element_with_class(tree, "div", classes::TOP);
    let bottom = element_with_class(tree, "div", classes::BOTTOM);

    let sections: Vec<NodeId> = tree
        .descendants(fragment)
        .into_iter()
        .filter(|&n| tree.has_class(n, classes::SECTION))
        .take(3)
        .collect();

    if let Some(&section) = sections.first() {
        let brand = element_with_class(tree, "div", classes::BRAND);
        tree.move_children(section, brand);
        tree.append_child(top, brand);
    }

    if let Some(&section) = sections.get(1) {
        let links = element_with_class(tree, "div", classes::SECTIONS);
        tree.move_children(section, links);
        mark_dropdowns(tree, links, &mut controller);
        tree.append_child(bottom, links);
    }

    let tools = sections
        .get(2)
        .map(|&section| build_tools(tree, section, default_language));
    if let Some(tools) = tools {
        tree.append_child(top, tools);
    }

    tree.append_child(nav, top);
    tree.append_child(nav, bottom);
    if let Some(tools) = tools {
        let mobile = tree.clone_subtree(tools);
        tree.set_class(mobile, classes::TOOLS_MOBILE);
        tree.append_child(nav, mobile);
    }

    let hamburger = build_hamburger(tree);
    controller.register_hamburger(hamburger);
    tree.prepend_child(nav, hamburger);

    controller.render(tree, nav);
    Navigation {
        root: nav,
        controller,
    }
}

fn element_with_class<T: ElementTree>(tree: &mut T, tag: &str, class: &str) -> NodeId {
    let node = tree.create_element(tag);
    tree.set_class(node, class);
    node
}

/// Tag every list item that owns a nested list as a dropdown.
fn mark_dropdowns<T: ElementTree>(
    tree: &mut T,
    links: NodeId,
    controller: &mut InteractionController,
) {
    for item in tree.descendants_by_tag(links, "li") {
        let Some(level) = tree.parent(item).filter(|&p| tree.is_tag(p, "ul")) else {
            continue;
        };
        if tree.first_descendant(item, "ul").is_none() {
            continue;
        }
        tree.add_class(item, classes::DROP);
        controller.register_dropdown(item, level);
    }
}

/// Language selector and action buttons from the tools section.
fn build_tools<T: ElementTree>(tree: &mut T, section: NodeId, default_language: &str) -> NodeId {
    let tools = element_with_class(tree, "div", classes::TOOLS);
    let scope = tree
        .descendants(section)
        .into_iter()
        .find(|&n| tree.has_class(n, classes::DEFAULT_CONTENT_WRAPPER))
        .unwrap_or(section);

    if let Some(list) = tree.first_descendant(scope, "ul") {
        let label = tree
            .first_descendant(list, "li")
            .map(|item| tree.text_content(item).trim().to_owned())
            .filter(|label| !label.is_empty())
            .unwrap_or_else(|| default_language.to_owned());

        let lang = element_with_class(tree, "div", classes::LANG);
        let current = tree.create_element("span");
        tree.append_text(current, &label);
        let arrow = element_with_class(tree, "span", classes::LANG_ARROW);
        tree.append_text(arrow, LANG_ARROW_GLYPH);
        tree.append_child(lang, current);
        tree.append_child(lang, arrow);
        tree.append_child(tools, lang);
    }

    if let Some(paragraph) = tree.first_descendant(scope, "p") {
        let links = tree.descendants_by_tag(paragraph, "a");
        if !links.is_empty() {
            let buttons = element_with_class(tree, "div", classes::BUTTONS);
            for link in links {
                let href = tree.attr(link, "href").unwrap_or_default().to_owned();
                let text = tree.text_content(link);
                let button = element_with_class(tree, "a", classes::BUTTON);
                tree.set_attr(button, "href", &href);
                tree.append_text(button, &text);
                tree.append_child(buttons, button);
            }
            tree.append_child(tools, buttons);
        }
    }

    tools
}

/// `div.nav-hamburger` holding the toggle button.
fn build_hamburger<T: ElementTree>(tree: &mut T) -> NodeId {
    let hamburger = element_with_class(tree, "div", classes::HAMBURGER);
    let button = tree.create_element("button");
    tree.set_attr(button, "type", "button");
    tree.set_attr(button, "aria-controls", classes::NAV_ID);
    tree.set_attr(button, "aria-label", "Menu");
    let icon = element_with_class(tree, "span", classes::HAMBURGER_ICON);
    let bar = tree.create_element("span");
    tree.append_child(icon, bar);
    tree.append_child(button, icon);
    tree.append_child(hamburger, button);
    hamburger
}

#[cfg(test)]
mod tests {
    use nav_dom::{Document, serialize_node};
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::fragment::{FragmentLoader, StaticFragmentLoader};

    const HAMBURGER_HTML: &str = concat!(
        r#"<div class="nav-hamburger"><button type="button" aria-controls="nav" aria-label="Menu">"#,
        r#"<span class="nav-hamburger-icon"><span></span></span></button></div>"#
    );

    fn fragment(doc: &mut Document, markup: &str) -> NodeId {
        StaticFragmentLoader::new()
            .with_fragment("/nav", markup)
            .load_fragment(doc, "/nav")
            .unwrap()
    }

    #[test]
    fn test_full_structure() {
        let mut doc = Document::new();
        let main = fragment(
            &mut doc,
            concat!(
                r#"<div><p><a href="/">Codeland</a></p></div>"#,
                "<div><ul>",
                "<li>Settori<ul><li><a href=\"/settori/a\">A</a></li></ul></li>",
                r#"<li><a href="/contatti">Contatti</a></li>"#,
                "</ul></div>",
                "<div><ul><li>ENG</li><li>ITA</li></ul>",
                r#"<p><a href="/login">Accedi</a><a href="/demo">Demo</a></p></div>"#
            ),
        );

        let nav = assemble_navigation(&mut doc, main, "ITA");

        let tools = concat!(
            r#"<div class="nav-lang"><span>ENG</span><span class="nav-lang-arrow">∨</span></div>"#,
            r#"<div class="nav-buttons">"#,
            r#"<a class="nav-btn" href="/login">Accedi</a><a class="nav-btn" href="/demo">Demo</a>"#,
            "</div>"
        );
        assert_eq!(
            serialize_node(&doc, nav.root()),
            [
                r#"<nav id="nav" aria-expanded="false">"#,
                HAMBURGER_HTML,
                r#"<div class="nav-top">"#,
                r#"<div class="nav-brand"><div class="default-content-wrapper"><p><a href="/">Codeland</a></p></div></div>"#,
                r#"<div class="nav-tools">"#,
                tools,
                "</div></div>",
                r#"<div class="nav-bottom"><div class="nav-sections"><div class="default-content-wrapper"><ul>"#,
                r#"<li class="nav-drop" aria-expanded="false">Settori<ul><li><a href="/settori/a">A</a></li></ul></li>"#,
                r#"<li><a href="/contatti">Contatti</a></li>"#,
                "</ul></div></div></div>",
                r#"<div class="nav-tools-mobile">"#,
                tools,
                "</div></nav>",
            ]
            .concat()
        );
    }

    #[test]
    fn test_sections_are_moved() {
        let mut doc = Document::new();
        let main = fragment(&mut doc, "<div><p>Brand</p></div><div><ul><li>x</li></ul></div>");

        assemble_navigation(&mut doc, main, "ITA");

        for section in doc.child_elements(main) {
            assert!(doc.children(section).is_empty());
        }
    }

    #[test]
    fn test_missing_tools_section() {
        let mut doc = Document::new();
        let main = fragment(&mut doc, "<div><p>Brand</p></div><div><ul><li>x</li></ul></div>");

        let nav = assemble_navigation(&mut doc, main, "ITA");

        let classes: Vec<_> = doc
            .child_elements(nav.root())
            .into_iter()
            .map(|n| doc.attr(n, "class").unwrap_or_default().to_owned())
            .collect();
        assert_eq!(classes, vec!["nav-hamburger", "nav-top", "nav-bottom"]);
        let top = doc.child_elements(nav.root())[1];
        assert_eq!(doc.child_elements(top).len(), 1);
    }

    #[test]
    fn test_empty_fragment() {
        let mut doc = Document::new();
        let main = fragment(&mut doc, "");

        let nav = assemble_navigation(&mut doc, main, "ITA");

        assert_eq!(
            serialize_node(&doc, nav.root()),
            [
                r#"<nav id="nav" aria-expanded="false">"#,
                HAMBURGER_HTML,
                r#"<div class="nav-top"></div><div class="nav-bottom"></div></nav>"#,
            ]
            .concat()
        );
    }

    #[test]
    fn test_tools_without_list_or_buttons() {
        let mut doc = Document::new();
        let main = fragment(&mut doc, "<div></div><div></div><div><p>Solo testo</p></div>");

        let nav = assemble_navigation(&mut doc, main, "ITA");

        let tools = doc
            .descendants(nav.root())
            .into_iter()
            .find(|&n| doc.has_class(n, classes::TOOLS))
            .unwrap();
        assert_eq!(serialize_node(&doc, tools), r#"<div class="nav-tools"></div>"#);
    }

    #[test]
    fn test_default_language_for_empty_list_item() {
        let mut doc = Document::new();
        let main = fragment(&mut doc, "<div></div><div></div><div><ul><li> </li></ul></div>");

        let nav = assemble_navigation(&mut doc, main, "ITA");

        let lang = doc
            .descendants(nav.root())
            .into_iter()
            .find(|&n| doc.has_class(n, classes::LANG))
            .unwrap();
        assert_eq!(doc.text_content(lang), "ITA∨");
    }

    #[test]
    fn test_mobile_tools_are_independent_copy() {
        let mut doc = Document::new();
        let main = fragment(
            &mut doc,
            r#"<div></div><div></div><div><p><a href="/x">X</a></p></div>"#,
        );
        let nav = assemble_navigation(&mut doc, main, "ITA");
        let find = |doc: &Document, class: &str| {
            doc.descendants(nav.root())
                .into_iter()
                .find(|&n| doc.has_class(n, class))
                .unwrap()
        };
        let desktop = find(&doc, classes::TOOLS);
        let mobile = find(&doc, classes::TOOLS_MOBILE);

        doc.clear_children(desktop);

        assert!(doc.children(desktop).is_empty());
        assert_eq!(doc.text_content(mobile), "X");
    }

    #[test]
    fn test_dropdowns_registered_per_level() {
        let mut doc = Document::new();
        let main = fragment(
            &mut doc,
            concat!(
                "<div></div><div><ul>",
                "<li>A<ul><li>B<ul><li>c</li></ul></li></ul></li>",
                "<li>D</li>",
                "</ul></div>"
            ),
        );

        let nav = assemble_navigation(&mut doc, main, "ITA");

        let drops: Vec<_> = nav
            .controller()
            .dropdown_items()
            .into_iter()
            .map(|li| doc.text(doc.children(li)[0]).unwrap_or_default().to_owned())
            .collect();
        assert_eq!(drops, vec!["A", "B"]);
    }

    #[test]
    fn test_click_updates_aria() {
        let mut doc = Document::new();
        let main = fragment(
            &mut doc,
            concat!(
                "<div></div><div><ul>",
                "<li>A<ul><li><a href=\"/a\">a</a></li></ul></li>",
                "<li>B<ul><li><a href=\"/b\">b</a></li></ul></li>",
                "</ul></div>"
            ),
        );
        let mut nav = assemble_navigation(&mut doc, main, "ITA");
        let items = nav.controller().dropdown_items();
        let link = doc.first_descendant(items[1], "a").unwrap();

        assert!(nav.click(&mut doc, link));

        assert_eq!(doc.attr(items[0], "aria-expanded"), Some("false"));
        assert_eq!(doc.attr(items[1], "aria-expanded"), Some("true"));
        assert_eq!(nav.dropdown_state(items[1]), Some(Expansion::Expanded));
        assert!(!nav.is_expanded());
    }

    #[test]
    fn test_hamburger_click_toggles_root() {
        let mut doc = Document::new();
        let main = fragment(&mut doc, "");
        let mut nav = assemble_navigation(&mut doc, main, "ITA");
        let icon = doc
            .descendants(nav.root())
            .into_iter()
            .find(|&n| doc.has_class(n, classes::HAMBURGER_ICON))
            .unwrap();

        assert!(nav.click(&mut doc, icon));
        assert_eq!(doc.attr(nav.root(), "aria-expanded"), Some("true"));

        assert!(nav.click(&mut doc, icon));
        assert_eq!(doc.attr(nav.root(), "aria-expanded"), Some("false"));
    }

    #[test]
    fn test_click_outside_handlers() {
        let mut doc = Document::new();
        let main = fragment(&mut doc, "");
        let mut nav = assemble_navigation(&mut doc, main, "ITA");
        let root = nav.root();

        assert!(!nav.click(&mut doc, root));
    }
}
