use log::debug;

use crate::{
    Token,
    alignment::{lcs_opcodes, opcode::Opcode, opcodes},
};

/// Opcodes after stretching, and how many passes it took.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stretched {
    pub opcodes: Vec<Opcode>,
    pub passes: usize,
}

/// Absorbs unchanged runs shorter than `threshold` into the changes around
/// them.
///
/// The tokens of every short equal run are marked dirty, on copies, so the
/// next alignment can't match them again. The first alignment ignores
/// whitespace as anchors; the later ones are plain LCS runs. Stops after
/// `max_depth` passes, when there is nothing left to stretch, or once the
/// documents are found to be equal.
pub fn stretch(old: &[Token], new: &[Token], threshold: usize, max_depth: usize) -> Stretched {
    let mut stretched = Stretched {
        opcodes: opcodes(old, new),
        passes: 0,
    };

    let mut dirty_old = old.to_vec();
    let mut dirty_new = new.to_vec();

    while stretched.passes < max_depth {
        if stretched.opcodes.iter().all(Opcode::is_equal) {
            break;
        }

        let mut dirtied = 0;
        for opcode in stretched
            .opcodes
            .iter()
            .filter(|opcode| opcode.is_equal() && opcode.old.len() < threshold)
        {
            dirty_old[opcode.old.clone()]
                .iter_mut()
                .for_each(Token::mark_dirty);
            dirty_new[opcode.new.clone()]
                .iter_mut()
                .for_each(Token::mark_dirty);
            dirtied += 1;
        }

        if dirtied == 0 {
            break;
        }

        stretched.passes += 1;
        debug!(
            "Stretching pass {} absorbed {dirtied} unchanged span(s)",
            stretched.passes
        );

        stretched.opcodes = lcs_opcodes(&dirty_old, &dirty_new);
    }

    stretched
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{alignment::opcode::OpcodeKind, tokenize};

    fn stretch_markup(old: &str, new: &str, threshold: usize, max_depth: usize) -> Stretched {
        stretch(
            &tokenize(old).unwrap(),
            &tokenize(new).unwrap(),
            threshold,
            max_depth,
        )
    }

    #[test]
    fn test_equal_documents_are_not_stretched() {
        let stretched = stretch_markup("<p>a b</p>", "<p>a b</p>", 5, 3);

        assert_eq!(stretched.passes, 0);
        assert_eq!(stretched.opcodes, vec![Opcode::equal(0..3, 0..3)]);
    }

    #[test]
    fn test_short_context_is_absorbed() {
        let stretched = stretch_markup("<p>a b c</p>", "<p>a x c</p>", 5, 3);

        assert_eq!(stretched.passes, 1);
        assert_eq!(
            stretched.opcodes,
            vec![Opcode::new(OpcodeKind::Replace, 0..5, 0..5)]
        );
    }

    #[test]
    fn test_long_context_is_kept() {
        let stretched = stretch_markup(
            "<p>one two three four five six seven</p>",
            "<p>one two three four five six SEVEN</p>",
            5,
            3,
        );

        assert_eq!(stretched.passes, 0);
        assert_eq!(
            stretched.opcodes,
            vec![
                Opcode::equal(0..12, 0..12),
                Opcode::new(OpcodeKind::Replace, 12..13, 12..13),
            ]
        );
    }

    #[test]
    fn test_no_passes_allowed() {
        let stretched = stretch_markup("<p>a b c</p>", "<p>a x c</p>", 5, 0);

        assert_eq!(stretched.passes, 0);
        assert_eq!(stretched.opcodes.len(), 3);
    }

    #[test]
    fn test_alternating_runs_collapse_in_one_pass() {
        let old = "<p>aa bb cc dd ee ff gg hh ii jj kk ll</p>";
        let new = "<p>aa XX cc YY ee ZZ gg WW ii VV kk UU</p>";

        let stretched = stretch_markup(old, new, 100, 3);

        assert_eq!(stretched.passes, 1);
        assert_eq!(
            stretched.opcodes,
            vec![Opcode::new(OpcodeKind::Replace, 0..23, 0..23)]
        );
    }

    #[test]
    fn test_whitespace_inside_changes_takes_another_pass() {
        let stretched = stretch_markup("<p>aa bb cc dd</p>", "<p>aa XX YY dd</p>", 100, 3);

        assert_eq!(stretched.passes, 2);
        assert_eq!(
            stretched.opcodes,
            vec![Opcode::new(OpcodeKind::Replace, 0..7, 0..7)]
        );
    }

    #[test]
    fn test_passes_stop_at_max_depth() {
        let stretched = stretch_markup("<p>aa bb cc dd</p>", "<p>aa XX YY dd</p>", 100, 1);

        assert_eq!(stretched.passes, 1);
        assert_eq!(
            stretched.opcodes,
            vec![
                Opcode::new(OpcodeKind::Replace, 0..3, 0..3),
                Opcode::equal(3..4, 3..4),
                Opcode::new(OpcodeKind::Replace, 4..7, 4..7),
            ]
        );
    }
}
