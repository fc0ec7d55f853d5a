use log::debug;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::document::Section;
use crate::{
    DiffOptions,
    alignment::{opcodes, sequence_matcher::Alignable},
    diff::{annotate, annotated_token::AnnotatedToken, render_annotated},
    errors::MarkupError,
    tokenize,
};

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SectionChange {
    /// Present on both sides with an unchanged body.
    Unchanged,
    /// Present on both sides, the body changed.
    Edited,
    Inserted,
    Deleted,
}

/// The difference of one section between two versions of a document.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionDiff {
    pub heading: String,
    pub level: u8,

    /// The new body, or the old one for deleted sections.
    pub body: String,

    /// The body with its changes marked up. Inserted and deleted sections
    /// have their whole body marked.
    pub body_diff: String,

    pub change: SectionChange,

    /// Whether the section was found at another position in the old
    /// document than its neighbours suggest.
    pub moved: bool,

    /// Position in the new document, `None` for deleted sections.
    pub index: Option<usize>,
}

impl SectionDiff {
    /// Whether there is nothing to show for this section.
    pub fn is_empty(&self) -> bool { self.change == SectionChange::Unchanged && !self.moved }
}

/// Diffs two lists of sections.
///
/// Sections are matched by heading and level, not by position or body.
/// Matched sections get their bodies diffed. A section which appears to be
/// deleted at one place and inserted at another is reported once, at its
/// new position, as moved.
///
/// ```
/// use reconcile_html::{Section, SectionChange, diff_sections};
///
/// let old = vec![Section::new("A", 2, "<p>a</p>"), Section::new("B", 2, "<p>b</p>")];
/// let new = vec![Section::new("A", 2, "<p>a!</p>")];
///
/// let diffs = diff_sections(&old, &new, false).unwrap();
/// let changes: Vec<_> = diffs.iter().map(|diff| diff.change).collect();
/// assert_eq!(changes, vec![SectionChange::Edited, SectionChange::Deleted]);
/// ```
pub fn diff_sections(old: &[Section], new: &[Section], concise: bool) -> Result<Vec<SectionDiff>, MarkupError> {
    diff_sections_with_options(old, new, concise, &DiffOptions::default())
}

pub fn diff_sections_with_options(
    old: &[Section],
    new: &[Section],
    concise: bool,
    options: &DiffOptions,
) -> Result<Vec<SectionDiff>, MarkupError> {
    let mut diffs = Vec::with_capacity(new.len());

    for opcode in opcodes(old, new) {
        if opcode.is_equal() {
            for (old_section, index) in old[opcode.old.clone()].iter().zip(opcode.new.clone()) {
                diffs.push(matched(old_section, &new[index], index, concise, options)?);
            }
        }

        if opcode.removes() {
            for section in &old[opcode.old.clone()] {
                let (body_diff, _) = body_diff(&section.body, "", concise, options)?;
                diffs.push(SectionDiff {
                    heading: section.heading.clone(),
                    level: section.level,
                    body: section.body.clone(),
                    body_diff,
                    change: SectionChange::Deleted,
                    moved: false,
                    index: None,
                });
            }
        }

        if opcode.adds() {
            for index in opcode.new.clone() {
                let section = &new[index];
                let (body_diff, _) = body_diff("", &section.body, concise, options)?;
                diffs.push(SectionDiff {
                    heading: section.heading.clone(),
                    level: section.level,
                    body: section.body.clone(),
                    body_diff,
                    change: SectionChange::Inserted,
                    moved: false,
                    index: Some(index),
                });
            }
        }
    }

    pair_moved_sections(&mut diffs, old, new, concise, options)?;

    Ok(diffs)
}

fn matched(
    old: &Section,
    new: &Section,
    index: usize,
    concise: bool,
    options: &DiffOptions,
) -> Result<SectionDiff, MarkupError> {
    let (body_diff, edited) = body_diff(&old.body, &new.body, concise, options)?;

    Ok(SectionDiff {
        heading: new.heading.clone(),
        level: new.level,
        body: new.body.clone(),
        body_diff,
        change: if edited {
            SectionChange::Edited
        } else {
            SectionChange::Unchanged
        },
        moved: false,
        index: Some(index),
    })
}

/// Turns every deletion whose section reappears as an insertion into a
/// match at the inserted position.
fn pair_moved_sections(
    diffs: &mut Vec<SectionDiff>,
    old: &[Section],
    new: &[Section],
    concise: bool,
    options: &DiffOptions,
) -> Result<(), MarkupError> {
    let mut position = 0;
    while position < diffs.len() {
        let deleted = &diffs[position];
        if deleted.change != SectionChange::Deleted {
            position += 1;
            continue;
        }

        let old_section = old
            .iter()
            .find(|section| section.alignment_key() == Some(identity(deleted)) && section.body == deleted.body);
        let reinserted = diffs.iter().enumerate().find_map(|(inserted, diff)| {
            (diff.change == SectionChange::Inserted && identity(diff) == identity(deleted))
                .then_some((inserted, diff.index?))
        });

        match (old_section, reinserted) {
            (Some(old_section), Some((inserted, index))) => {
                debug!("Section `{}` moved to position {index}", old_section.heading.trim());

                let mut moved = matched(old_section, &new[index], index, concise, options)?;
                moved.moved = true;
                diffs[inserted] = moved;
                diffs.remove(position);
            }
            _ => position += 1,
        }
    }

    Ok(())
}

fn identity(diff: &SectionDiff) -> (&str, u8) { (diff.heading.trim(), diff.level) }

/// Diffs two bodies, returning the marked up diff and whether anything
/// changed.
pub(super) fn body_diff(
    old: &str,
    new: &str,
    concise: bool,
    options: &DiffOptions,
) -> Result<(String, bool), MarkupError> {
    let annotated = annotate(&tokenize(old)?, &tokenize(new)?, concise, options);
    let changed = !annotated.iter().all(AnnotatedToken::is_unchanged);

    Ok((render_annotated(annotated, options), changed))
}

#[cfg(test)]
mod tests {
    use insta::assert_snapshot;
    use pretty_assertions::assert_eq;

    use super::*;

    fn section(heading: &str, body: &str) -> Section { Section::new(heading, 2, body) }

    fn summary(diffs: &[SectionDiff]) -> Vec<(&str, SectionChange, bool, Option<usize>)> {
        diffs
            .iter()
            .map(|diff| (diff.heading.as_str(), diff.change, diff.moved, diff.index))
            .collect()
    }

    #[test]
    fn test_unchanged_sections() {
        let sections = vec![section("A", "<p>a</p>"), section("B", "<p>b</p>")];
        let diffs = diff_sections(&sections, &sections, false).unwrap();

        assert_eq!(
            summary(&diffs),
            vec![
                ("A", SectionChange::Unchanged, false, Some(0)),
                ("B", SectionChange::Unchanged, false, Some(1)),
            ]
        );
        assert!(diffs.iter().all(SectionDiff::is_empty));
    }

    #[test]
    fn test_reordered_sections_are_matched() {
        let a = section("A", "<p>a</p>");
        let b = section("B", "<p>b</p>");
        let c = section("C", "<p>c</p>");

        let diffs = diff_sections(&[a.clone(), b.clone(), c.clone()], &[b, c, a], false).unwrap();

        assert_eq!(
            summary(&diffs),
            vec![
                ("B", SectionChange::Unchanged, false, Some(0)),
                ("C", SectionChange::Unchanged, false, Some(1)),
                ("A", SectionChange::Unchanged, true, Some(2)),
            ]
        );
    }

    #[test]
    fn test_moved_and_edited() {
        let diffs = diff_sections(
            &[section("A", "<p>a</p>"), section("B", "<p>x b</p>")],
            &[section("B", "<p>x c</p>"), section("A", "<p>a</p>")],
            false,
        )
        .unwrap();

        assert_eq!(
            summary(&diffs),
            vec![
                ("B", SectionChange::Edited, true, Some(0)),
                ("A", SectionChange::Unchanged, false, Some(1)),
            ]
        );
        assert_snapshot!(diffs[0].body_diff, @"<p>x <del>b</del><ins>c</ins></p>");
    }

    #[test]
    fn test_inserted_and_deleted_sections() {
        let diffs = diff_sections(
            &[section("A", "<p>a</p>"), section("B", "<p>b</p>")],
            &[section("A", "<p>a</p>"), section("C", "<p>c</p>")],
            false,
        )
        .unwrap();

        assert_eq!(
            summary(&diffs),
            vec![
                ("A", SectionChange::Unchanged, false, Some(0)),
                ("B", SectionChange::Deleted, false, None),
                ("C", SectionChange::Inserted, false, Some(1)),
            ]
        );
        assert_snapshot!(diffs[1].body_diff, @"<del><p>b</p></del>");
        assert_snapshot!(diffs[2].body_diff, @"<ins><p>c</p></ins>");
        assert_eq!(diffs[1].body, "<p>b</p>");
    }

    #[test]
    fn test_whitespace_only_body_change_is_not_an_edit() {
        let diffs = diff_sections(
            &[section("A", "<p>a  b</p>")],
            &[section("A", "<p>a b</p>")],
            false,
        )
        .unwrap();

        assert_eq!(diffs[0].change, SectionChange::Unchanged);
    }

    #[test]
    fn test_level_is_part_of_identity() {
        let diffs = diff_sections(
            &[Section::new("A", 2, "")],
            &[Section::new("A", 3, "")],
            false,
        )
        .unwrap();

        assert_eq!(
            summary(&diffs),
            vec![
                ("A", SectionChange::Deleted, false, None),
                ("A", SectionChange::Inserted, false, Some(0)),
            ]
        );
    }

    #[test]
    fn test_concise_body_diff() {
        let diffs = diff_sections(
            &[section("A", "<p>a b c</p>")],
            &[section("A", "<p>a x c</p>")],
            true,
        )
        .unwrap();

        assert_eq!(diffs[0].change, SectionChange::Edited);
        assert_snapshot!(diffs[0].body_diff, @"<del><p>[…]</p></del><ins><p>[a x c]</p></ins>");
    }
}
