#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::element::{Context, Element};
use crate::alignment::sequence_matcher::Alignable;

/// What a token holds at its position in the document.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone)]
pub enum TokenKind {
    /// A run of text in its escaped source form.
    Text(String),

    /// A void element such as `<br>` or `<img>`.
    Element(Element),
}

/// The atomic unit of a flattened document: a piece of text or a void
/// element, tagged with the stack of elements open around it.
///
/// Tokens compare through their comparison key. For text it consists of the
/// trimmed text and the context, for void elements of the element and the
/// context. The same text under different ancestors (for instance newly
/// bolded) is therefore not equal.
///
/// A token can be marked dirty, after which it is not equal to any token,
/// itself included. Equality is thus not reflexive, much like for `f64::NAN`.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone)]
pub struct Token {
    context: Context,
    kind: TokenKind,

    #[cfg_attr(feature = "serde", serde(skip))]
    dirty: bool,
}

/// The part of a token that decides whether two tokens align.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ComparisonKey<'a> {
    Text {
        text: &'a str,
        context: &'a Context,
    },
    Element {
        element: &'a Element,
        context: &'a Context,
    },
}

impl Token {
    pub fn text(context: Context, text: impl Into<String>) -> Self {
        Self {
            context,
            kind: TokenKind::Text(text.into()),
            dirty: false,
        }
    }

    pub fn element(context: Context, element: Element) -> Self {
        Self {
            context,
            kind: TokenKind::Element(element),
            dirty: false,
        }
    }

    pub fn context(&self) -> &Context { &self.context }

    pub fn kind(&self) -> &TokenKind { &self.kind }

    /// The text of a text token, `None` for void elements.
    pub fn text_content(&self) -> Option<&str> {
        match &self.kind {
            TokenKind::Text(text) => Some(text),
            TokenKind::Element(_) => None,
        }
    }

    /// Returns `None` once the token has been marked dirty.
    pub fn comparison_key(&self) -> Option<ComparisonKey<'_>> {
        if self.dirty {
            return None;
        }

        Some(match &self.kind {
            TokenKind::Text(text) => ComparisonKey::Text {
                text: text.trim(),
                context: &self.context,
            },
            TokenKind::Element(element) => ComparisonKey::Element {
                element,
                context: &self.context,
            },
        })
    }

    /// Irreversibly stops the token from comparing equal to any other token.
    pub fn mark_dirty(&mut self) { self.dirty = true; }

    pub fn is_dirty(&self) -> bool { self.dirty }

    /// Text tokens holding nothing but whitespace. They never anchor an
    /// alignment.
    pub fn is_whitespace(&self) -> bool {
        self.text_content()
            .is_some_and(|text| text.chars().all(char::is_whitespace))
    }

    /// Text tokens holding at least one non-whitespace character.
    pub fn is_word_bearing(&self) -> bool {
        self.text_content()
            .is_some_and(|text| !text.chars().all(char::is_whitespace))
    }

    /// Level of the outermost header element around the token.
    pub fn header_level(&self) -> Option<u8> {
        self.context.iter().find_map(Element::header_level)
    }

    /// Returns a text token sharing this token's context.
    pub fn sibling_text(&self, text: impl Into<String>) -> Self {
        Self::text(self.context.clone(), text)
    }

    /// Inserts `element` into the context so that it encloses everything
    /// from `depth` inwards.
    ///
    /// # Panics
    ///
    /// Panics if `depth` is larger than the context, which means the caller
    /// computed the depth from an unrelated context.
    pub fn insert_into_context(&mut self, depth: usize, element: Element) {
        assert!(
            depth <= self.context.len(),
            "Cannot insert `<{}>` at depth {depth} into a context of depth {}",
            element.name(),
            self.context.len()
        );

        self.context.insert(depth, element);
    }

    pub(crate) fn write_content(&self, html: &mut String) {
        match &self.kind {
            TokenKind::Text(text) => html.push_str(text),
            TokenKind::Element(element) => element.write_self_closing_tag(html),
        }
    }
}

impl PartialEq for Token {
    fn eq(&self, other: &Self) -> bool {
        match (self.comparison_key(), other.comparison_key()) {
            (Some(key), Some(other_key)) => key == other_key,
            _ => false,
        }
    }
}

impl Alignable for Token {
    type Key<'a> = ComparisonKey<'a>;

    fn alignment_key(&self) -> Option<ComparisonKey<'_>> { self.comparison_key() }

    fn is_junk(&self) -> bool { self.is_whitespace() }
}

impl AsRef<Token> for Token {
    fn as_ref(&self) -> &Token { self }
}

impl AsMut<Token> for Token {
    fn as_mut(&mut self) -> &mut Token { self }
}

#[cfg(test)]
mod tests {
    use im::vector;

    use super::*;
    use crate::tokenizer::element::Attribute;

    fn paragraph() -> Context { vector![Element::synthetic("p")] }

    #[test]
    fn test_text_equality_ignores_surrounding_whitespace() {
        assert!(Token::text(paragraph(), "  ") == Token::text(paragraph(), "\n"));
        assert!(Token::text(paragraph(), "word") == Token::text(paragraph(), "word"));
        assert!(Token::text(paragraph(), "word") != Token::text(paragraph(), "other"));
    }

    #[test]
    fn test_context_is_part_of_identity() {
        let mut bold = paragraph();
        bold.push_back(Element::synthetic("b"));

        assert!(Token::text(paragraph(), "word") != Token::text(bold, "word"));
    }

    #[test]
    fn test_attributes_are_part_of_identity() {
        let small = Element::new("img", vec![Attribute::new("width", "10")]);
        let large = Element::new("img", vec![Attribute::new("width", "20")]);

        assert!(Token::element(paragraph(), small.clone()) == Token::element(paragraph(), small));
        assert!(
            Token::element(paragraph(), large) != Token::element(paragraph(), Element::synthetic("img"))
        );
    }

    #[test]
    fn test_dirty_tokens_never_compare_equal() {
        let mut dirty = Token::text(paragraph(), "word");
        dirty.mark_dirty();

        assert!(dirty != Token::text(paragraph(), "word"));
        assert!(Token::text(paragraph(), "word") != dirty);
        assert!(dirty != dirty.clone());
        assert!(dirty.comparison_key().is_none());
    }

    #[test]
    fn test_whitespace_and_words() {
        assert!(Token::text(paragraph(), " \t").is_whitespace());
        assert!(Token::text(paragraph(), "").is_whitespace());
        assert!(!Token::text(paragraph(), "").is_word_bearing());
        assert!(Token::text(paragraph(), ",").is_word_bearing());
        assert!(!Token::element(paragraph(), Element::synthetic("br")).is_whitespace());
        assert!(!Token::element(paragraph(), Element::synthetic("br")).is_word_bearing());
    }

    #[test]
    fn test_header_level_uses_outermost_header() {
        let context = vector![
            Element::synthetic("div"),
            Element::synthetic("h2"),
            Element::synthetic("h3")
        ];

        assert_eq!(Token::text(context, "x").header_level(), Some(2));
        assert_eq!(Token::text(paragraph(), "x").header_level(), None);
    }

    #[test]
    fn test_insert_into_context() {
        let mut token = Token::text(paragraph(), "x");
        token.insert_into_context(0, Element::synthetic("ins"));

        assert_eq!(
            token.context(),
            &vector![Element::synthetic("ins"), Element::synthetic("p")]
        );
    }

    #[test]
    #[should_panic(expected = "Cannot insert `<ins>` at depth 2")]
    fn test_insert_into_context_too_deep() {
        Token::text(paragraph(), "x").insert_into_context(2, Element::synthetic("ins"));
    }
}
