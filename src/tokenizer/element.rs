#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::consts::{HEADER_ELEMENTS, VOID_ELEMENTS};

/// The stack of elements open at a token's position, outermost first.
///
/// Contexts are persistent vectors so every token can hold its own copy
/// while sharing structure with its neighbours.
pub type Context = im::Vector<Element>;

/// A single `name="value"` pair of an element. The value is kept in its
/// escaped source form.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Attribute {
    pub name: String,
    pub value: String,
}

impl Attribute {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// An element name together with its attributes in source order.
///
/// Attributes are part of an element's identity: two elements are equal only
/// if their names and full attribute lists are.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Element {
    name: String,
    attributes: Vec<Attribute>,
}

impl Element {
    pub fn new(name: impl Into<String>, attributes: Vec<Attribute>) -> Self {
        Self {
            name: name.into(),
            attributes,
        }
    }

    /// An element without attributes, such as the insertion and deletion
    /// markers.
    pub fn synthetic(name: impl Into<String>) -> Self { Self::new(name, Vec::new()) }

    pub fn name(&self) -> &str { &self.name }

    pub fn attributes(&self) -> &[Attribute] { &self.attributes }

    pub fn is_void(&self) -> bool { is_void_element(&self.name) }

    /// Returns `n` for `<hn>` elements.
    pub fn header_level(&self) -> Option<u8> {
        HEADER_ELEMENTS
            .iter()
            .position(|header| *header == self.name)
            .and_then(|index| u8::try_from(index + 1).ok())
    }

    pub(crate) fn write_open_tag(&self, html: &mut String) {
        html.push('<');
        self.write_name_and_attributes(html);
        html.push('>');
    }

    pub(crate) fn write_self_closing_tag(&self, html: &mut String) {
        html.push('<');
        self.write_name_and_attributes(html);
        html.push_str("/>");
    }

    pub(crate) fn write_close_tag(&self, html: &mut String) {
        html.push_str("</");
        html.push_str(&self.name);
        html.push('>');
    }

    fn write_name_and_attributes(&self, html: &mut String) {
        html.push_str(&self.name);
        for attribute in &self.attributes {
            html.push(' ');
            html.push_str(&attribute.name);
            html.push_str("=\"");
            // values are already escaped apart from quotes coming from
            // single-quoted or unquoted source attributes
            html.push_str(&attribute.value.replace('"', "&quot;"));
            html.push('"');
        }
    }
}

pub fn is_void_element(name: &str) -> bool { VOID_ELEMENTS.contains(&name) }

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    use super::*;

    #[test_case("h1", Some(1))]
    #[test_case("h6", Some(6))]
    #[test_case("p", None)]
    #[test_case("header", None)]
    fn test_header_level(name: &str, expected: Option<u8>) {
        assert_eq!(Element::synthetic(name).header_level(), expected);
    }

    #[test]
    fn test_write_tags() {
        let element = Element::new(
            "a",
            vec![
                Attribute::new("href", "/wiki?a=1&amp;b=2"),
                Attribute::new("title", "say \"hi\""),
            ],
        );

        let mut html = String::new();
        element.write_open_tag(&mut html);
        element.write_close_tag(&mut html);
        assert_eq!(
            html,
            "<a href=\"/wiki?a=1&amp;b=2\" title=\"say &quot;hi&quot;\"></a>"
        );

        let mut html = String::new();
        Element::synthetic("br").write_self_closing_tag(&mut html);
        assert_eq!(html, "<br/>");
    }

    #[test]
    fn test_attributes_are_part_of_identity() {
        let plain = Element::synthetic("span");
        let styled = Element::new("span", vec![Attribute::new("class", "x")]);

        assert!(plain != styled);
        assert!(styled.is_void() == plain.is_void());
    }
}
