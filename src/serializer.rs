pub mod tag_synthesizer;

use crate::{
    Token,
    tokenizer::element::Context,
    utils::common_prefix_len::common_prefix_len,
};

/// Turns tokens back into markup.
///
/// The tokens don't have to come from a single document. Between two tokens
/// the elements below their shared context prefix are closed innermost
/// first, then the new ones are opened outermost first, so the result is
/// always well-formed and opens no more tags than needed.
///
/// ```
/// use reconcile_html::{render, tokenize};
///
/// let markup = "<p>Some <b>bold</b> text<br/></p>";
/// assert_eq!(render(&tokenize(markup).unwrap()), markup);
/// ```
pub fn render<'a, I>(tokens: I) -> String
where
    I: IntoIterator<Item = &'a Token>,
{
    let mut html = String::new();
    let mut context = Context::new();

    for token in tokens {
        write_transition(&mut html, &context, token.context());
        token.write_content(&mut html);
        context = token.context().clone();
    }

    write_transition(&mut html, &context, &Context::new());

    html
}

fn write_transition(html: &mut String, from: &Context, to: &Context) {
    let shared = common_prefix_len(from, 0..from.len(), to, 0..to.len());

    for index in (shared..from.len()).rev() {
        from[index].write_close_tag(html);
    }

    for index in shared..to.len() {
        to[index].write_open_tag(html);
    }
}

#[cfg(test)]
mod tests {
    use im::vector;
    use insta::assert_snapshot;
    use test_case::test_case;

    use super::*;
    use crate::{tokenize, tokenizer::element::Element};

    #[test_case("" ; "empty")]
    #[test_case("plain text" ; "text only")]
    #[test_case("<h1>This is <em>a</em> header</h1>\n\n<div><p>This is the <strong>beginning</strong> of my paragraph.</p></div>" ; "nested")]
    #[test_case("<p>a<br/>b</p><p><img src=\"a.png\" alt=\"A\"/></p>" ; "void elements")]
    #[test_case("<ul><li>one</li><li>two</li></ul>" ; "reopened siblings")]
    #[test_case("<p><a href=\"/wiki/x?a=1&amp;b=2\">x &amp; y</a></p>" ; "escaped content")]
    fn test_round_trip(markup: &str) {
        assert_eq!(render(&tokenize(markup).unwrap()), markup);
    }

    #[test]
    fn test_render_closes_mismatched_tags() {
        assert_snapshot!(render(&tokenize("<p><b>x</p></b>").unwrap()), @"<p><b>x</b></p>");
    }

    #[test]
    fn test_render_closes_unclosed_elements() {
        assert_snapshot!(render(&tokenize("<div><p>x").unwrap()), @"<div><p>x</p></div>");
    }

    #[test]
    fn test_render_tokens_from_different_documents() {
        let old = tokenize("<p>old <b>bold</b></p>").unwrap();
        let new = tokenize("<div><p>new</p></div>").unwrap();

        let mixed = [&old[0], &new[0], &old[2]];
        assert_snapshot!(render(mixed), @"<p>old</p><div><p>new</p></div><p><b>bold</b></p>");
    }

    #[test]
    fn test_render_synthetic_tokens() {
        let tokens = vec![
            Token::text(vector![Element::synthetic("p")], "a"),
            Token::text(
                vector![Element::synthetic("p"), Element::synthetic("ins")],
                "b",
            ),
            Token::element(vector![Element::synthetic("p")], Element::synthetic("br")),
        ];

        assert_snapshot!(render(&tokens), @"<p>a<ins>b</ins><br/></p>");
    }
}
