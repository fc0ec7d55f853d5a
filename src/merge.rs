mod merged_tokens;
mod proposal;

use core::ops::Range;

use log::debug;
pub use merged_tokens::MergedTokens;
use proposal::ProposalStream;

use crate::{Token, alignment::opcodes, diff::brackets::bracket, errors::MarkupError, tokenize};

/// Merges several independently edited versions of a document.
///
/// Each candidate is diffed against `original`. Where only one candidate
/// changed a part of the original, or all that did agree, the change is
/// taken. Where candidates disagree, every distinct proposal is kept in
/// brackets, one after the other, for someone to resolve. Changes of
/// different candidates that overlap are compared over the whole span they
/// cover together, so one is never taken while the other is bracketed.
///
/// ```
/// use reconcile_html::merge;
///
/// let merged = merge(
///     "<p>The cat sat.</p>",
///     &["<p>The dog sat.</p>", "<p>The cat sat down.</p>"],
/// )
/// .unwrap();
///
/// assert_eq!(merged, "<p>The dog sat down.</p>");
/// ```
pub fn merge<S: AsRef<str>>(original: &str, candidates: &[S]) -> Result<String, MarkupError> {
    let original = tokenize(original)?;
    let candidates = candidates
        .iter()
        .map(|candidate| tokenize(candidate.as_ref()))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(merge_tokens(&original, &candidates).to_html())
}

/// Merges token sequences, see [`merge`].
pub fn merge_tokens(original: &[Token], candidates: &[Vec<Token>]) -> MergedTokens {
    let mut streams: Vec<ProposalStream> = candidates
        .iter()
        .map(|candidate| ProposalStream::new(opcodes(original, candidate)))
        .collect();

    let mut merged = MergedTokens::default();
    let mut position = 0;

    loop {
        let insertions: Vec<Option<&[Token]>> = streams
            .iter_mut()
            .zip(candidates)
            .map(|(stream, candidate)| {
                stream
                    .take_insertion(position)
                    .map(|range| &candidate[range])
            })
            .collect();
        if insertions.iter().any(Option::is_some) {
            resolve(&[], &insertions, position..position, &mut merged);
        }

        if position >= original.len() {
            break;
        }

        let mut end = streams
            .iter()
            .filter_map(ProposalStream::front_end)
            .min()
            .unwrap_or(original.len());
        debug_assert!(end > position, "Proposals must cover the original without gaps");

        // Grow the chunk until no change crosses its end
        loop {
            let widened = streams
                .iter()
                .filter_map(|stream| stream.change_end_before(end))
                .fold(end, usize::max);
            if widened == end {
                break;
            }
            end = widened;
        }

        let proposals: Vec<Option<&[Token]>> = streams
            .iter_mut()
            .zip(candidates)
            .map(|(stream, candidate)| stream.take_until(end).map(|range| &candidate[range]))
            .collect();
        resolve(&original[position..end], &proposals, position..end, &mut merged);

        position = end;
    }

    merged
}

/// Appends the outcome of one aligned chunk: the original when nobody
/// changed it, the change when there is only one, and every distinct
/// change in brackets otherwise.
fn resolve(
    original: &[Token],
    proposals: &[Option<&[Token]>],
    range: Range<usize>,
    merged: &mut MergedTokens,
) {
    let mut distinct: Vec<&[Token]> = Vec::new();
    for &proposal in proposals.iter().flatten() {
        if proposal != original && !distinct.contains(&proposal) {
            distinct.push(proposal);
        }
    }

    match distinct.as_slice() {
        [] => merged.tokens.extend_from_slice(original),
        [change] => merged.tokens.extend_from_slice(change),
        changes => {
            debug!(
                "Conflict over original tokens {range:?} between {} proposals",
                changes.len()
            );

            merged.conflicts += 1;
            for change in changes {
                merged.tokens.extend(bracket(change));
            }
        }
    }
}
