#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    Token, alignment::sequence_matcher::Alignable, errors::MarkupError, render, tokenize,
    tokenizer::element::Context,
};

/// A header and the markup following it up to the next header.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Section {
    pub heading: String,
    pub level: u8,
    pub body: String,
}

impl Section {
    pub fn new(heading: impl Into<String>, level: u8, body: impl Into<String>) -> Self {
        Self {
            heading: heading.into(),
            level,
            body: body.into(),
        }
    }
}

/// Sections are the same section when their heading and level match,
/// whatever their bodies.
impl Alignable for Section {
    type Key<'a> = (&'a str, u8);

    fn alignment_key(&self) -> Option<(&str, u8)> { Some((self.heading.trim(), self.level)) }
}

/// A document split at its headers.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    /// Markup before the first header.
    pub summary: String,
    pub sections: Vec<Section>,
}

impl Document {
    /// ```
    /// use reconcile_html::{Document, Section};
    ///
    /// let document = Document::parse("<p>Intro</p><h2>Usage</h2><p>Run it.</p>").unwrap();
    ///
    /// assert_eq!(document.summary, "<p>Intro</p>");
    /// assert_eq!(document.sections, vec![Section::new("Usage", 2, "<p>Run it.</p>")]);
    /// ```
    pub fn parse(markup: &str) -> Result<Self, MarkupError> { Ok(Self::from_tokens(&tokenize(markup)?)) }

    /// Groups the tokens by the header element they are in. A group outside
    /// of headers is the body of the section before it, or the summary when
    /// no header precedes it.
    pub fn from_tokens(tokens: &[Token]) -> Self {
        let mut document = Self::default();

        for group in tokens.chunk_by(|left, right| header_context(left) == header_context(right)) {
            match group[0].header_level() {
                Some(level) => document
                    .sections
                    .push(Section::new(heading_text(group), level, String::new())),
                None => {
                    let body = render(group);
                    match document.sections.last_mut() {
                        Some(section) => section.body = body,
                        None => document.summary = body,
                    }
                }
            }
        }

        document
    }
}

/// The context of a token up to and including its outermost header element.
fn header_context(token: &Token) -> Option<Context> {
    let context = token.context();
    context
        .iter()
        .position(|element| element.header_level().is_some())
        .map(|index| context.take(index + 1))
}

fn heading_text(tokens: &[Token]) -> String { tokens.iter().filter_map(Token::text_content).collect() }
