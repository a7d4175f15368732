//! Open/closed state of the navigation and its dropdowns.
//!
//! State lives in [`InteractionController`], never in the tree: attributes
//! such as `aria-expanded` are a projection written by
//! [`InteractionController::render`]. Clicks are dispatched by walking from
//! the target up through its ancestors and running every handler met on the
//! way, the same path a bubbling DOM event takes. A dropdown handler stops
//! the walk so an enclosing handler never sees the click.

use std::collections::HashMap;

use nav_dom::{ElementTree, NodeId};

/// Expanded/collapsed state of one toggleable element.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Expansion {
    #[default]
    Collapsed,
    Expanded,
}

impl Expansion {
    #[must_use]
    pub fn is_expanded(self) -> bool {
        self == Self::Expanded
    }

    /// The opposite state.
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Collapsed => Self::Expanded,
            Self::Expanded => Self::Collapsed,
        }
    }

    /// Value of the `aria-expanded` attribute.
    #[must_use]
    pub fn aria_value(self) -> &'static str {
        match self {
            Self::Collapsed => "false",
            Self::Expanded => "true",
        }
    }
}

impl From<bool> for Expansion {
    fn from(expanded: bool) -> Self {
        if expanded {
            Self::Expanded
        } else {
            Self::Collapsed
        }
    }
}

/// Handler attached to a node.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClickHandler {
    /// Toggles the dropdown at this index.
    Dropdown(usize),
    /// Toggles the whole navigation.
    Hamburger,
}

#[derive(Clone, Debug)]
struct Dropdown {
    item: NodeId,
    /// List holding the item; dropdowns sharing it are mutually exclusive.
    level: NodeId,
    state: Expansion,
}

/// Owner of all open/closed state.
#[derive(Clone, Debug, Default)]
pub struct InteractionController {
    nav: Expansion,
    dropdowns: Vec<Dropdown>,
    handlers: HashMap<NodeId, ClickHandler>,
}

impl InteractionController {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `item` as a dropdown among the items of `level`.
    ///
    /// Registering the same item twice keeps the first registration.
    pub fn register_dropdown(&mut self, item: NodeId, level: NodeId) -> usize {
        if let Some(ClickHandler::Dropdown(index)) = self.handlers.get(&item) {
            return *index;
        }
        let index = self.dropdowns.len();
        self.dropdowns.push(Dropdown {
            item,
            level,
            state: Expansion::Collapsed,
        });
        self.handlers.insert(item, ClickHandler::Dropdown(index));
        index
    }

    /// Register `button` as the navigation toggle.
    pub fn register_hamburger(&mut self, button: NodeId) {
        self.handlers.insert(button, ClickHandler::Hamburger);
    }

    /// Handler attached directly to `node`.
    #[must_use]
    pub fn handler(&self, node: NodeId) -> Option<ClickHandler> {
        self.handlers.get(&node).copied()
    }

    #[must_use]
    pub fn nav_state(&self) -> Expansion {
        self.nav
    }

    /// State of the dropdown registered for `item`.
    #[must_use]
    pub fn dropdown_state(&self, item: NodeId) -> Option<Expansion> {
        self.dropdowns
            .iter()
            .find(|d| d.item == item)
            .map(|d| d.state)
    }

    /// Registered dropdown items, in registration order.
    #[must_use]
    pub fn dropdown_items(&self) -> Vec<NodeId> {
        self.dropdowns.iter().map(|d| d.item).collect()
    }

    /// Deliver a click on `target`, returning the handlers that ran.
    pub fn dispatch_click<T: ElementTree>(
        &mut self,
        tree: &T,
        target: NodeId,
    ) -> Vec<ClickHandler> {
        let mut fired = Vec::new();
        let mut current = Some(target);
        while let Some(node) = current {
            if let Some(handler) = self.handler(node) {
                self.run(handler);
                fired.push(handler);
                if matches!(handler, ClickHandler::Dropdown(_)) {
                    break;
                }
            }
            current = tree.parent(node);
        }
        fired
    }

    fn run(&mut self, handler: ClickHandler) {
        match handler {
            ClickHandler::Dropdown(index) => self.toggle_dropdown(index),
            ClickHandler::Hamburger => self.toggle_nav(),
        }
    }

    /// Toggle one dropdown, collapsing its siblings.
    ///
    /// The prior state is read first; every dropdown on the same level is
    /// then collapsed, and the clicked one is set to the inverse of its prior
    /// state. Dropdowns on other levels keep their state.
    pub fn toggle_dropdown(&mut self, index: usize) {
        let Some(clicked) = self.dropdowns.get(index) else {
            return;
        };
        let was_expanded = clicked.state.is_expanded();
        let level = clicked.level;

        for dropdown in self.dropdowns.iter_mut().filter(|d| d.level == level) {
            dropdown.state = Expansion::Collapsed;
        }
        self.dropdowns[index].state = Expansion::from(!was_expanded);
    }

    /// Flip the navigation's expanded state.
    pub fn toggle_nav(&mut self) {
        self.nav = self.nav.toggled();
    }

    /// Write `aria-expanded` for the navigation root and every dropdown.
    pub fn render<T: ElementTree>(&self, tree: &mut T, root: NodeId) {
        tree.set_attr(root, "aria-expanded", self.nav.aria_value());
        for dropdown in &self.dropdowns {
            tree.set_attr(dropdown.item, "aria-expanded", dropdown.state.aria_value());
        }
    }
}
