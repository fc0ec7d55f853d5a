use super::{
    annotated_token::{AnnotatedToken, Change},
    brackets::{bracket, omit},
    stretch::stretch,
};
use crate::{DiffOptions, Token};

/// Annotates the differences between `old` and `new` for quick reading:
/// short unchanged spans are absorbed into their neighbouring changes,
/// deleted text shrinks to a placeholder and added text is bracketed.
pub fn annotate_concisely(old: &[Token], new: &[Token], options: &DiffOptions) -> Vec<AnnotatedToken> {
    let stretched = stretch(old, new, options.stretch_threshold, options.max_stretch_depth);

    let mut annotated = Vec::with_capacity(new.len());
    for opcode in &stretched.opcodes {
        if opcode.is_equal() {
            annotated.extend(
                new[opcode.new.clone()]
                    .iter()
                    .map(|token| AnnotatedToken::new(token.clone(), Change::Unchanged)),
            );
        }

        if opcode.removes() {
            annotated.extend(
                omit(&old[opcode.old.clone()], &options.omission_placeholder)
                    .into_iter()
                    .map(|token| AnnotatedToken::new(token, Change::Deleted)),
            );
        }

        if opcode.adds() {
            annotated.extend(
                bracket(&new[opcode.new.clone()])
                    .into_iter()
                    .map(|token| AnnotatedToken::new(token, Change::Inserted)),
            );
        }
    }

    annotated
}
