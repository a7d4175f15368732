//! HTML entity normalization ahead of XML parsing.
//!
//! Authored fragments are HTML, not XML: they use named entities the XML
//! parser does not know and may contain bare ampersands. Named entities are
//! replaced with their Unicode characters, the five XML entities and numeric
//! references are kept for the parser, everything else gets its ampersand
//! escaped so it survives as literal text.

use std::sync::LazyLock;

use regex::Regex;

/// Matches an ampersand and, optionally, the reference that follows it.
static REFERENCE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"&(#[0-9]+;|#[xX][0-9a-fA-F]+;|[a-zA-Z][a-zA-Z0-9]*;)?")
        .expect("invalid reference regex")
});

/// Rewrite HTML references into a form the XML reader accepts.
pub fn normalize_entities(html: &str) -> String {
    if !html.contains('&') {
        return html.to_owned();
    }
    REFERENCE_PATTERN
        .replace_all(html, |caps: &regex::Captures| {
            let Some(reference) = caps.get(1).map(|m| m.as_str()) else {
                return "&amp;".to_owned();
            };
            if reference.starts_with('#') {
                return caps[0].to_owned();
            }
            let name = reference.trim_end_matches(';');
            if matches!(name, "amp" | "lt" | "gt" | "quot" | "apos") {
                return caps[0].to_owned();
            }
            entity_to_unicode(name).map_or_else(|| format!("&amp;{reference}"), str::to_owned)
        })
        .into_owned()
}

/// Map an HTML entity name to its character.
fn entity_to_unicode(name: &str) -> Option<&'static str> {
    Some(match name {
        "nbsp" => "\u{00a0}",
        "shy" => "\u{00ad}",
        "mdash" => "\u{2014}",
        "ndash" => "\u{2013}",
        "hellip" => "\u{2026}",
        "bull" => "\u{2022}",
        "middot" => "\u{00b7}",

        "lsquo" => "\u{2018}",
        "rsquo" => "\u{2019}",
        "ldquo" => "\u{201c}",
        "rdquo" => "\u{201d}",
        "laquo" => "\u{00ab}",
        "raquo" => "\u{00bb}",
        "lsaquo" => "\u{2039}",
        "rsaquo" => "\u{203a}",

        "copy" => "\u{00a9}",
        "reg" => "\u{00ae}",
        "trade" => "\u{2122}",
        "euro" => "\u{20ac}",
        "pound" => "\u{00a3}",
        "deg" => "\u{00b0}",

        "rarr" => "\u{2192}",
        "larr" => "\u{2190}",
        "darr" => "\u{2193}",
        "uarr" => "\u{2191}",
        "or" => "\u{2228}",

        // Accented letters common in Italian and French content
        "agrave" => "\u{00e0}",
        "aacute" => "\u{00e1}",
        "egrave" => "\u{00e8}",
        "eacute" => "\u{00e9}",
        "igrave" => "\u{00ec}",
        "iacute" => "\u{00ed}",
        "ograve" => "\u{00f2}",
        "oacute" => "\u{00f3}",
        "ugrave" => "\u{00f9}",
        "uacute" => "\u{00fa}",
        "Agrave" => "\u{00c0}",
        "Egrave" => "\u{00c8}",
        "Eacute" => "\u{00c9}",
        "Igrave" => "\u{00cc}",
        "Ograve" => "\u{00d2}",
        "Ugrave" => "\u{00d9}",
        "ccedil" => "\u{00e7}",
        "ntilde" => "\u{00f1}",
        "uuml" => "\u{00fc}",
        "ouml" => "\u{00f6}",
        "auml" => "\u{00e4}",

        _ => return None,
    })
}
