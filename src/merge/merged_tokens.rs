#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{Token, render};

/// The outcome of a merge: the merged document and the number of places
/// where candidates disagreed.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Default)]
pub struct MergedTokens {
    pub tokens: Vec<Token>,
    pub conflicts: usize,
}

impl MergedTokens {
    pub fn has_conflicts(&self) -> bool { self.conflicts > 0 }

    pub fn to_html(&self) -> String { render(&self.tokens) }
}
