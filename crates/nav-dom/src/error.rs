//! Error types for fragment parsing.

/// Error while parsing fragment markup.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum DomError {
    /// XML reader error.
    #[error("markup parse error")]
    Xml(#[from] quick_xml::Error),

    /// Malformed attribute.
    #[error("attribute error")]
    Attr(#[from] quick_xml::events::attributes::AttrError),

    /// Text could not be decoded.
    #[error("encoding error")]
    Encoding(#[from] quick_xml::encoding::EncodingError),
}
