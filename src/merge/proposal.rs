use core::ops::Range;
use std::collections::VecDeque;

use crate::alignment::opcode::Opcode;

/// What one candidate has in place of a range of the original.
///
/// Insertions have an empty, zero-width `original` range. Unchanged ranges
/// span as many items on both sides.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Proposal {
    pub original: Range<usize>,
    pub candidate: Range<usize>,
    pub changed: bool,
}

impl Proposal {
    fn from_opcode(opcode: Opcode) -> Self {
        Self {
            changed: !opcode.is_equal(),
            original: opcode.old,
            candidate: opcode.new,
        }
    }

    fn is_insertion_at(&self, position: usize) -> bool {
        self.original.is_empty() && self.original.start == position
    }
}

/// One candidate's proposals, consumed front to back in lock-step with the
/// others. The front proposal always starts where the previous chunk ended.
#[derive(Debug, Clone)]
pub struct ProposalStream {
    proposals: VecDeque<Proposal>,
}

impl ProposalStream {
    pub fn new(opcodes: Vec<Opcode>) -> Self {
        Self {
            proposals: opcodes.into_iter().map(Proposal::from_opcode).collect(),
        }
    }

    /// End of the original range covered by the front proposal.
    pub fn front_end(&self) -> Option<usize> { self.proposals.front().map(|proposal| proposal.original.end) }

    /// End of the furthest change starting before `end`.
    pub fn change_end_before(&self, end: usize) -> Option<usize> {
        self.proposals
            .iter()
            .take_while(|proposal| proposal.original.start < end)
            .filter(|proposal| proposal.changed)
            .map(|proposal| proposal.original.end)
            .max()
    }

    /// Takes the insertion anchored at `position`, if the candidate has one.
    pub fn take_insertion(&mut self, position: usize) -> Option<Range<usize>> {
        if self
            .proposals
            .front()
            .is_some_and(|proposal| proposal.is_insertion_at(position))
        {
            self.proposals.pop_front().map(|proposal| proposal.candidate)
        } else {
            None
        }
    }

    /// Takes what the candidate has in place of the original up to `end`.
    ///
    /// Returns `None` when the candidate keeps that part of the original,
    /// otherwise the candidate's range standing in for it, unchanged parts
    /// included. An unchanged run reaching past `end` is split there. An
    /// exhausted stream proposes nothing.
    pub fn take_until(&mut self, end: usize) -> Option<Range<usize>> {
        let mut taken: Option<Range<usize>> = None;
        let mut changed = false;

        while let Some(front) = self.proposals.front() {
            if front.original.start >= end {
                break;
            }

            let piece = if front.original.end <= end {
                self.proposals.pop_front()
            } else {
                self.split_front(end)
            };
            let Some(piece) = piece else {
                break;
            };

            changed |= piece.changed;
            taken = Some(match taken {
                Some(range) => range.start..piece.candidate.end,
                None => piece.candidate,
            });
        }

        if changed { taken } else { None }
    }

    /// Cuts the front proposal at `end` and returns the part before it.
    ///
    /// Chunks are widened over every change they overlap, so only unchanged
    /// runs should get here. A change is still handled: it is taken whole
    /// and the rest of its original range stays behind as a deletion.
    fn split_front(&mut self, end: usize) -> Option<Proposal> {
        let front = self.proposals.front_mut()?;

        let candidate = if front.changed {
            let whole = front.candidate.clone();
            front.candidate.start = front.candidate.end;
            whole
        } else {
            let split = front.candidate.start + (end - front.original.start);
            let head = front.candidate.start..split;
            front.candidate.start = split;
            head
        };

        let head = Proposal {
            original: front.original.start..end,
            candidate,
            changed: front.changed,
        };
        front.original.start = end;

        Some(head)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::alignment::opcode::OpcodeKind;

    fn stream() -> ProposalStream {
        ProposalStream::new(vec![
            Opcode::equal(0..2, 0..2),
            Opcode::new(OpcodeKind::Insert, 2..2, 2..3),
            Opcode::new(OpcodeKind::Replace, 2..5, 3..4),
            Opcode::equal(5..7, 4..6),
        ])
    }

    #[test]
    fn test_insertions_are_taken_only_at_their_anchor() {
        let mut stream = stream();

        assert_eq!(stream.take_insertion(0), None);
        assert_eq!(stream.take_until(2), None);
        assert_eq!(stream.take_insertion(2), Some(2..3));
        assert_eq!(stream.front_end(), Some(5));
    }

    #[test]
    fn test_change_end_before() {
        let stream = stream();

        assert_eq!(stream.change_end_before(2), None);
        assert_eq!(stream.change_end_before(3), Some(5));
        assert_eq!(stream.change_end_before(7), Some(5));
    }

    #[test]
    fn test_pieces_of_a_chunk_are_joined() {
        let mut stream = stream();
        stream.take_until(2);
        stream.take_insertion(2);

        assert_eq!(stream.take_until(6), Some(3..5));
        assert_eq!(stream.front_end(), Some(7));
        assert_eq!(stream.take_until(7), None);
        assert_eq!(stream.front_end(), None);
        assert_eq!(stream.take_until(8), None);
    }

    #[test]
    fn test_insertion_inside_a_chunk_is_part_of_it() {
        let mut stream = stream();

        assert_eq!(stream.take_until(5), Some(0..4));
        assert_eq!(stream.front_end(), Some(7));
    }

    #[test]
    fn test_split_equal_range_keeps_the_original() {
        let mut stream = stream();

        assert_eq!(stream.take_until(1), None);
        assert_eq!(stream.front_end(), Some(2));
        assert_eq!(stream.take_until(2), None);
        assert_eq!(stream.take_insertion(2), Some(2..3));
    }

    #[test]
    fn test_change_cut_short_is_taken_whole() {
        let mut stream = stream();
        stream.take_until(2);
        stream.take_insertion(2);

        assert_eq!(stream.take_until(3), Some(3..4));
        assert_eq!(stream.take_until(5), Some(4..4));
        assert_eq!(stream.front_end(), Some(7));
    }
}
