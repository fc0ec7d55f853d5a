use core::ops::Range;

/// A single step of an edit script, as produced by the LCS algorithm.
///
/// `Delete` carries a range of the old sequence and `Insert` one of the new
/// sequence; the other side's position follows from the preceding steps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawOperation {
    Equal { old: Range<usize>, new: Range<usize> },
    Delete(Range<usize>),
    Insert(Range<usize>),
}
