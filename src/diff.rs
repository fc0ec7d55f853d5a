pub mod annotated_token;
pub(crate) mod brackets;
mod concise;
mod stretch;

use annotated_token::{AnnotatedToken, Change};

use crate::{
    DiffOptions, Token,
    alignment::{opcode::Opcode, opcodes},
    errors::MarkupError,
    serializer::{render, tag_synthesizer::insert_tag},
    tokenize,
    tokenizer::element::Element,
};

/// Marks up the differences between two documents.
///
/// Deleted content is wrapped in `<del>`, inserted content in `<ins>`.
/// Whitespace-only changes are not reported. In concise mode, short
/// unchanged spans are treated as part of the changes around them, deleted
/// text collapses to a placeholder and added text is bracketed.
///
/// ```
/// use reconcile_html::diff;
///
/// assert_eq!(
///     diff("<p>Hello world</p>", "<p>Hello there world</p>", false).unwrap(),
///     "<p>Hello <ins>there </ins>world</p>"
/// );
/// ```
pub fn diff(old: &str, new: &str, concise: bool) -> Result<String, MarkupError> {
    diff_with_options(old, new, concise, &DiffOptions::default())
}

/// Like [`diff`], with the wrapper elements, the placeholder and the
/// stretching parameters taken from `options`.
pub fn diff_with_options(
    old: &str,
    new: &str,
    concise: bool,
    options: &DiffOptions,
) -> Result<String, MarkupError> {
    let old = tokenize(old)?;
    let new = tokenize(new)?;

    Ok(render_annotated(annotate(&old, &new, concise, options), options))
}

/// Diffs two token sequences into a single sequence in which every token is
/// annotated with how it changed.
///
/// Unchanged tokens are taken from `new`. Where content was replaced, the
/// deleted tokens come before the inserted ones.
pub fn annotate(old: &[Token], new: &[Token], concise: bool, options: &DiffOptions) -> Vec<AnnotatedToken> {
    if concise {
        concise::annotate_concisely(old, new, options)
    } else {
        merge_opcodes(old, new, &opcodes(old, new))
    }
}

/// Wraps the deleted and inserted runs in their marker elements and
/// serializes the result.
pub fn render_annotated(mut tokens: Vec<AnnotatedToken>, options: &DiffOptions) -> String {
    insert_tag(
        &mut tokens,
        &Element::synthetic(options.deleted_tag.as_str()),
        |token| token.change == Change::Deleted,
    );
    insert_tag(
        &mut tokens,
        &Element::synthetic(options.inserted_tag.as_str()),
        |token| token.change == Change::Inserted,
    );

    render(tokens.iter().map(|token| &token.token))
}

fn merge_opcodes(old: &[Token], new: &[Token], opcodes: &[Opcode]) -> Vec<AnnotatedToken> {
    let mut annotated = Vec::with_capacity(new.len());

    for opcode in opcodes {
        if opcode.is_equal() {
            annotated.extend(
                new[opcode.new.clone()]
                    .iter()
                    .map(|token| AnnotatedToken::new(token.clone(), Change::Unchanged)),
            );
        }

        if opcode.removes() {
            annotated.extend(
                old[opcode.old.clone()]
                    .iter()
                    .map(|token| AnnotatedToken::new(token.clone(), Change::Deleted)),
            );
        }

        if opcode.adds() {
            annotated.extend(
                new[opcode.new.clone()]
                    .iter()
                    .map(|token| AnnotatedToken::new(token.clone(), Change::Inserted)),
            );
        }
    }

    annotated
}
