#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::Token;

/// How a token of a diff relates to the two documents.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Change {
    Unchanged,
    Deleted,
    Inserted,
}

/// A token of a diff: either shared by both documents or present in only
/// one of them.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone)]
pub struct AnnotatedToken {
    pub token: Token,
    pub change: Change,
}

impl AnnotatedToken {
    pub fn new(token: Token, change: Change) -> Self { Self { token, change } }

    pub fn is_unchanged(&self) -> bool { self.change == Change::Unchanged }
}

impl AsRef<Token> for AnnotatedToken {
    fn as_ref(&self) -> &Token { &self.token }
}

impl AsMut<Token> for AnnotatedToken {
    fn as_mut(&mut self) -> &mut Token { &mut self.token }
}
