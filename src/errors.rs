use thiserror::Error;

/// Error type for markup that cannot be turned into tokens at all.
///
/// Mismatched or unbalanced closing tags are not errors: they are logged and
/// tokenization carries on with a best-effort context stack.
#[derive(Error, Debug)]
pub enum MarkupError {
    /// The markup reader gave up on the input
    #[error("Failed to read markup: {0}")]
    Syntax(#[from] quick_xml::Error),

    /// Something the reader took for a tag has no valid element name, as
    /// with a stray `<` in text
    #[error("Invalid element name `{0}`")]
    ElementName(String),

    /// An element's attribute list could not be parsed
    #[error("Failed to read attributes: {0}")]
    Attribute(#[from] quick_xml::events::attributes::AttrError),

    /// A tag name, attribute or text node is not valid UTF-8
    #[error("Markup is not valid UTF-8: {0}")]
    Encoding(#[from] core::str::Utf8Error),
}
