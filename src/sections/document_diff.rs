use std::collections::BTreeMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::{
    document::Document,
    section_diff::{SectionDiff, body_diff, diff_sections_with_options},
};
use crate::{DiffOptions, errors::MarkupError};

/// The difference of the text before the first header.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SummaryDiff {
    /// The new summary.
    pub body: String,
    pub diff: String,
    pub changed: bool,
}

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentDiff {
    pub summary: SummaryDiff,
    pub sections: Vec<SectionDiff>,
}

impl DocumentDiff {
    /// Diffs of the sections present in the new document, by their position
    /// in it.
    pub fn sections_by_index(&self) -> BTreeMap<usize, &SectionDiff> {
        self.sections
            .iter()
            .filter_map(|section| section.index.map(|index| (index, section)))
            .collect()
    }

    /// Number of changed parts: the summary and every section with
    /// something to show.
    pub fn edit_count(&self) -> usize {
        usize::from(self.summary.changed) + self.sections.iter().filter(|section| !section.is_empty()).count()
    }

    pub fn is_significant(&self, threshold: usize) -> bool { self.edit_count() >= threshold }

    /// Whether at least `options.significant_edit_count` parts changed.
    pub fn is_significant_with(&self, options: &DiffOptions) -> bool {
        self.is_significant(options.significant_edit_count)
    }

    pub fn is_empty(&self) -> bool { self.edit_count() == 0 }
}

/// Diffs two documents section by section.
///
/// ```
/// use reconcile_html::{Document, SectionChange, diff_documents};
///
/// let old = Document::parse("<p>Intro</p><h2>A</h2><p>a</p>").unwrap();
/// let new = Document::parse("<p>Intro</p><h2>A</h2><p>a</p><h2>B</h2><p>b</p>").unwrap();
///
/// let diff = diff_documents(&old, &new, false).unwrap();
/// assert!(!diff.summary.changed);
/// assert_eq!(diff.edit_count(), 1);
/// assert_eq!(diff.sections_by_index()[&1].change, SectionChange::Inserted);
/// ```
pub fn diff_documents(old: &Document, new: &Document, concise: bool) -> Result<DocumentDiff, MarkupError> {
    diff_documents_with_options(old, new, concise, &DiffOptions::default())
}

pub fn diff_documents_with_options(
    old: &Document,
    new: &Document,
    concise: bool,
    options: &DiffOptions,
) -> Result<DocumentDiff, MarkupError> {
    let (diff, changed) = body_diff(&old.summary, &new.summary, concise, options)?;

    Ok(DocumentDiff {
        summary: SummaryDiff {
            body: new.summary.clone(),
            diff,
            changed,
        },
        sections: diff_sections_with_options(&old.sections, &new.sections, concise, options)?,
    })
}

#[cfg(test)]
mod tests {
    use insta::assert_snapshot;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::sections::section_diff::SectionChange;

    fn diff_markup(old: &str, new: &str) -> DocumentDiff {
        diff_documents(
            &Document::parse(old).unwrap(),
            &Document::parse(new).unwrap(),
            false,
        )
        .unwrap()
    }

    #[test]
    fn test_empty_documents() {
        let diff = diff_markup("", "");

        assert_eq!(diff, DocumentDiff::default());
        assert!(diff.is_empty());
    }

    #[test]
    fn test_summary_change() {
        let diff = diff_markup("<p>Intro text</p>", "<p>Intro new text</p>");

        assert!(diff.summary.changed);
        assert_eq!(diff.summary.body, "<p>Intro new text</p>");
        assert_snapshot!(diff.summary.diff, @"<p>Intro <ins>new </ins>text</p>");
        assert_eq!(diff.edit_count(), 1);
    }

    #[test]
    fn test_significance() {
        let old = "<h2>A</h2><p>x a</p><h2>B</h2><p>x b</p><h2>C</h2><p>x c</p>";
        let new = "<p>Intro</p><h2>A</h2><p>x a!</p><h2>C</h2><p>x c</p><h2>D</h2>";
        let diff = diff_markup(old, new);

        let changes: Vec<_> = diff.sections.iter().map(|section| section.change).collect();
        assert_eq!(
            changes,
            vec![
                SectionChange::Edited,
                SectionChange::Deleted,
                SectionChange::Unchanged,
                SectionChange::Inserted,
            ]
        );
        assert_eq!(diff.edit_count(), 4);
        assert!(diff.is_significant_with(&DiffOptions::default()));
        assert!(!diff.is_significant(5));
        assert!(!diff.is_significant_with(&DiffOptions {
            significant_edit_count: 5,
            ..DiffOptions::default()
        }));

        let by_index = diff.sections_by_index();
        assert_eq!(by_index.keys().copied().collect::<Vec<_>>(), vec![0, 1, 2]);
        assert_eq!(by_index[&2].heading, "D");
    }
}
