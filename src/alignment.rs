mod myers;
pub mod opcode;
mod raw_operation;
pub mod sequence_matcher;

use opcode::{Opcode, group_operations};
use sequence_matcher::{Alignable, SequenceMatcher};

/// Aligns two sequences while ignoring junk items as anchors.
///
/// This is what the pairwise diff runs first: whitespace-only tokens can't
/// pull unrelated text into alignment, yet are kept in the opcodes.
///
/// ```
/// use reconcile_html::{OpcodeKind, opcodes, tokenize};
///
/// let old = tokenize("<p>a  b</p>").unwrap();
/// let new = tokenize("<p>a b</p>").unwrap();
///
/// let kinds: Vec<_> = opcodes(&old, &new).iter().map(|opcode| opcode.kind).collect();
/// assert_eq!(kinds, vec![OpcodeKind::Equal]);
/// ```
pub fn opcodes<T: Alignable>(old: &[T], new: &[T]) -> Vec<Opcode> {
    SequenceMatcher::new(old, new).opcodes()
}

/// Aligns two sequences with a plain longest common subsequence, using
/// nothing but `PartialEq`.
pub fn lcs_opcodes<T: PartialEq>(old: &[T], new: &[T]) -> Vec<Opcode> {
    group_operations(myers::myers_diff(old, new))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::alignment::opcode::OpcodeKind;

    fn chars(text: &str) -> Vec<char> { text.chars().collect() }

    #[test]
    fn test_lcs_opcodes() {
        assert_eq!(
            lcs_opcodes(&chars("abcd"), &chars("axcy")),
            vec![
                Opcode::equal(0..1, 0..1),
                Opcode::new(OpcodeKind::Replace, 1..2, 1..2),
                Opcode::equal(2..3, 2..3),
                Opcode::new(OpcodeKind::Replace, 3..4, 3..4),
            ]
        );
    }

    #[test]
    fn test_lcs_opcodes_of_items_unequal_to_themselves() {
        let items = [1.0, f64::NAN, 2.0];

        assert_eq!(
            lcs_opcodes(&items, &items),
            vec![
                Opcode::equal(0..1, 0..1),
                Opcode::new(OpcodeKind::Replace, 1..2, 1..2),
                Opcode::equal(2..3, 2..3),
            ]
        );
    }

    #[test]
    fn test_lcs_matches_at_least_as_much() {
        let old = chars("the quick brown fox");
        let new = chars("the quack brawn fix");

        let lcs_matched: usize = lcs_opcodes(&old, &new)
            .iter()
            .filter(|opcode| opcode.is_equal())
            .map(|opcode| opcode.old.len())
            .sum();
        let matched: usize = opcodes(&old, &new)
            .iter()
            .filter(|opcode| opcode.is_equal())
            .map(|opcode| opcode.old.len())
            .sum();

        assert!(matched <= lcs_matched);
        assert!(lcs_matched >= old.len() - 3);
    }
}
