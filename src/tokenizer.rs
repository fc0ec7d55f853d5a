use core::str;

use log::{debug, warn};
use quick_xml::{
    Reader,
    events::{BytesStart, Event},
};

use crate::errors::MarkupError;

pub mod element;
pub mod text_splitter;
pub mod token;

use element::{Attribute, Context, Element, is_void_element};
use text_splitter::split_text;
use token::Token;

/// Flattens a markup fragment into tokens, each carrying the elements open
/// around it.
///
/// Text is split into whitespace, punctuation and word runs, void elements
/// become element tokens and every other element only shows up in the
/// contexts of the tokens it contains. An element without content holds a
/// single empty text token. Closing tags that don't match the innermost open
/// element are logged and then close it anyway.
///
/// ```
/// use reconcile_html::{TokenKind, tokenize};
///
/// let tokens = tokenize("<p>Hi <b>you</b><br></p>").unwrap();
///
/// assert_eq!(tokens.len(), 4);
/// assert_eq!(tokens[2].text_content(), Some("you"));
/// assert_eq!(tokens[2].context().len(), 2);
/// assert!(matches!(tokens[3].kind(), TokenKind::Element(element) if element.name() == "br"));
/// ```
///
/// # Errors
///
/// Returns `MarkupError` if the markup cannot be read at all, for example
/// because of an unterminated tag or a stray `<` in text.
pub fn tokenize(markup: &str) -> Result<Vec<Token>, MarkupError> {
    let mut reader = Reader::from_str(markup);
    let config = reader.config_mut();
    config.trim_text(false);
    config.check_end_names = false;
    config.allow_unmatched_ends = true;

    let mut builder = SequenceBuilder::default();

    loop {
        match reader.read_event()? {
            Event::Start(start) => {
                let element = read_element(&start)?;
                if element.is_void() {
                    builder.push_element(element);
                } else {
                    builder.open(element);
                }
            }
            Event::Empty(start) => {
                let element = read_element(&start)?;
                if element.is_void() {
                    builder.push_element(element);
                } else {
                    debug!("Reading `<{}/>` as an empty element", element.name());
                    let name = element.name().to_owned();
                    builder.open(element);
                    builder.close(&name);
                }
            }
            Event::End(end) => {
                let name = str::from_utf8(end.name().as_ref())?.to_ascii_lowercase();
                if !is_void_element(&name) {
                    builder.close(&name);
                }
            }
            Event::Text(text) => builder.push_text(str::from_utf8(&text)?),
            Event::GeneralRef(reference) => {
                builder.push_reference(str::from_utf8(&reference)?);
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(builder.finish())
}

fn read_element(start: &BytesStart<'_>) -> Result<Element, MarkupError> {
    let name = str::from_utf8(start.name().as_ref())?.to_ascii_lowercase();
    if !is_element_name(&name) {
        return Err(MarkupError::ElementName(name));
    }

    let attributes = start
        .html_attributes()
        .map(|attribute| {
            let attribute = attribute?;
            Ok(Attribute::new(
                str::from_utf8(attribute.key.as_ref())?.to_ascii_lowercase(),
                str::from_utf8(&attribute.value)?,
            ))
        })
        .collect::<Result<Vec<_>, MarkupError>>()?;

    Ok(Element::new(name, attributes))
}

/// `[a-z][a-z0-9-]*`, anything else is text the reader mistook for a tag.
fn is_element_name(name: &str) -> bool {
    let mut chars = name.chars();
    chars.next().is_some_and(|first| first.is_ascii_lowercase())
        && chars.all(|character| {
            character.is_ascii_lowercase() || character.is_ascii_digit() || character == '-'
        })
}

/// Keeps the stack of open elements while tokens are appended.
#[derive(Debug, Default)]
struct SequenceBuilder {
    context: Context,
    tokens: Vec<Token>,

    /// The element closed last, as long as nothing was emitted since.
    last_closed: Option<Element>,

    /// Whether a token was emitted since the innermost element was opened.
    emitted_since_open: bool,
}

impl SequenceBuilder {
    fn open(&mut self, element: Element) {
        // `<b>x</b><b>y</b>` would otherwise serialize as `<b>xy</b>`
        if self.last_closed.as_ref() == Some(&element) {
            self.tokens.push(Token::text(self.context.clone(), ""));
        }

        self.last_closed = None;
        self.emitted_since_open = false;
        self.context.push_back(element);
    }

    fn close(&mut self, name: &str) {
        let context = self.context.clone();
        match self.context.pop_back() {
            Some(element) => {
                // `<td></td>` would otherwise vanish
                if !self.emitted_since_open {
                    self.tokens.push(Token::text(context, ""));
                    self.emitted_since_open = true;
                }

                if element.name() != name {
                    warn!(
                        "Mismatched closing tag `</{name}>`, closing `<{}>` instead",
                        element.name()
                    );
                }
                self.last_closed = Some(element);
            }
            None => warn!("Ignoring closing tag `</{name}>` without an open element"),
        }
    }

    fn push_text(&mut self, text: &str) {
        for run in split_text(text) {
            self.push(Token::text(self.context.clone(), run));
        }
    }

    fn push_reference(&mut self, name: &str) {
        self.push(Token::text(self.context.clone(), format!("&{name};")));
    }

    fn push_element(&mut self, element: Element) {
        self.push(Token::element(self.context.clone(), element));
    }

    fn push(&mut self, token: Token) {
        self.tokens.push(token);
        self.last_closed = None;
        self.emitted_since_open = true;
    }

    fn finish(self) -> Vec<Token> {
        if !self.context.is_empty() {
            warn!(
                "{} element(s) left open at the end of the markup",
                self.context.len()
            );
        }

        self.tokens
    }
}
