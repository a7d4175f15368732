//! Class names and ids of the rendered navigation.
//!
//! Stylesheets and accessibility tooling target these names, so they are
//! part of the output contract.

/// Id of the navigation root, referenced by the hamburger's `aria-controls`.
pub const NAV_ID: &str = "nav";

/// Row holding brand and desktop tools.
pub const TOP: &str = "nav-top";
/// Row holding the primary links.
pub const BOTTOM: &str = "nav-bottom";
/// Brand container.
pub const BRAND: &str = "nav-brand";
/// Primary links container.
pub const SECTIONS: &str = "nav-sections";
/// Desktop tools block.
pub const TOOLS: &str = "nav-tools";
/// Mobile copy of the tools block.
pub const TOOLS_MOBILE: &str = "nav-tools-mobile";
/// Primary-link item owning a nested list.
pub const DROP: &str = "nav-drop";
/// Hamburger toggle container.
pub const HAMBURGER: &str = "nav-hamburger";
pub const HAMBURGER_ICON: &str = "nav-hamburger-icon";
/// Language selector.
pub const LANG: &str = "nav-lang";
pub const LANG_ARROW: &str = "nav-lang-arrow";
/// Action button container and buttons.
pub const BUTTONS: &str = "nav-buttons";
pub const BUTTON: &str = "nav-btn";

/// Section marker added by fragment decoration.
pub const SECTION: &str = "section";
/// Wrapper around a section's default (non-block) content.
pub const DEFAULT_CONTENT_WRAPPER: &str = "default-content-wrapper";
