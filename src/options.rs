#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::consts::{
    DEFAULT_DELETED_TAG, DEFAULT_INSERTED_TAG, DEFAULT_MAX_STRETCH_DEPTH,
    DEFAULT_OMISSION_PLACEHOLDER, DEFAULT_SIGNIFICANT_EDIT_COUNT, DEFAULT_STRETCH_THRESHOLD,
};

/// Tunables of the diff renderers.
///
/// The stretching constants were picked empirically; they are exposed so
/// hosts can tune them instead of relying on the defaults.
///
/// ```
/// use reconcile_html::{DiffOptions, diff_with_options};
///
/// let options = DiffOptions {
///     inserted_tag: "mark".to_owned(),
///     ..DiffOptions::default()
/// };
///
/// let diff = diff_with_options("<p>Hi</p>", "<p>Hi there</p>", false, &options).unwrap();
/// assert_eq!(diff, "<p>Hi<mark> there</mark></p>");
/// ```
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffOptions {
    /// Equal runs shorter than this are treated as part of the surrounding
    /// change in concise mode.
    pub stretch_threshold: usize,

    /// Maximum number of stretching passes in concise mode.
    pub max_stretch_depth: usize,

    /// Name of the element wrapping inserted runs.
    pub inserted_tag: String,

    /// Name of the element wrapping deleted runs.
    pub deleted_tag: String,

    /// Literal text standing in for deleted text in concise mode.
    pub omission_placeholder: String,

    /// Number of changed parts from which a document diff is significant.
    pub significant_edit_count: usize,
}

impl Default for DiffOptions {
    fn default() -> Self {
        Self {
            stretch_threshold: DEFAULT_STRETCH_THRESHOLD,
            max_stretch_depth: DEFAULT_MAX_STRETCH_DEPTH,
            inserted_tag: DEFAULT_INSERTED_TAG.to_owned(),
            deleted_tag: DEFAULT_DELETED_TAG.to_owned(),
            omission_placeholder: DEFAULT_OMISSION_PLACEHOLDER.to_owned(),
            significant_edit_count: DEFAULT_SIGNIFICANT_EDIT_COUNT,
        }
    }
}
