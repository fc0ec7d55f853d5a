use core::{fmt, hash::Hash};
use std::collections::HashMap;

use super::opcode::Opcode;

/// Something that can be aligned against other items of its type.
///
/// Two items align when both have a key and the keys are equal. Items
/// without a key never align, not even with themselves. Junk items never
/// seed a match, but may extend one whose ends they are adjacent to.
pub trait Alignable {
    type Key<'a>: Eq + Hash
    where
        Self: 'a;

    fn alignment_key(&self) -> Option<Self::Key<'_>>;

    fn is_junk(&self) -> bool { false }
}

fn aligns<'a, T: Alignable + 'a>(old: &'a T, new: &'a T) -> bool {
    match (old.alignment_key(), new.alignment_key()) {
        (Some(old_key), Some(new_key)) => old_key == new_key,
        _ => false,
    }
}

/// A longest contiguous matching block: `size` items starting at `old` and
/// `new` align.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct Match {
    old: usize,
    new: usize,
    size: usize,
}

/// Ratcliff-Obershelp style matcher: recursively finds the longest
/// contiguous matching block and matches what lies on either side of it.
///
/// Unlike the usual implementations there is no popularity heuristic; frequent
/// items are never thrown away, only items declared junk are ignored when
/// looking for anchors.
pub struct SequenceMatcher<'a, T>
where
    T: Alignable,
{
    old: &'a [T],
    new: &'a [T],
    new_positions: HashMap<T::Key<'a>, Vec<usize>>,
}

impl<'a, T> fmt::Debug for SequenceMatcher<'a, T>
where
    T: Alignable + 'a,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SequenceMatcher")
            .field("old_len", &self.old.len())
            .field("new_len", &self.new.len())
            .finish_non_exhaustive()
    }
}

impl<'a, T> SequenceMatcher<'a, T>
where
    T: Alignable + 'a,
{
    pub fn new(old: &'a [T], new: &'a [T]) -> Self {
        let mut new_positions: HashMap<T::Key<'a>, Vec<usize>> = HashMap::new();
        for (index, item) in new.iter().enumerate() {
            if item.is_junk() {
                continue;
            }

            if let Some(key) = item.alignment_key() {
                new_positions.entry(key).or_default().push(index);
            }
        }

        Self {
            old,
            new,
            new_positions,
        }
    }

    /// Returns the opcodes turning `old` into `new`. Equal opcodes only
    /// cover aligned items, so they can be copied from either side.
    pub fn opcodes(&self) -> Vec<Opcode> {
        let mut opcodes = Vec::new();
        let (mut old_position, mut new_position) = (0, 0);

        for block in self.matching_blocks() {
            if old_position < block.old || new_position < block.new {
                opcodes.push(Opcode::change(
                    old_position..block.old,
                    new_position..block.new,
                ));
            }

            old_position = block.old + block.size;
            new_position = block.new + block.size;

            if block.size > 0 {
                opcodes.push(Opcode::equal(
                    block.old..old_position,
                    block.new..new_position,
                ));
            }
        }

        opcodes
    }

    /// Sorted, non-adjacent matching blocks, terminated by an empty block at
    /// the end of both sequences.
    fn matching_blocks(&self) -> Vec<Match> {
        let mut queue = vec![(0, self.old.len(), 0, self.new.len())];
        let mut blocks = Vec::new();

        while let Some((old_start, old_end, new_start, new_end)) = queue.pop() {
            let block = self.find_longest_match(old_start, old_end, new_start, new_end);
            if block.size == 0 {
                continue;
            }

            if old_start < block.old && new_start < block.new {
                queue.push((old_start, block.old, new_start, block.new));
            }
            if block.old + block.size < old_end && block.new + block.size < new_end {
                queue.push((block.old + block.size, old_end, block.new + block.size, new_end));
            }
            blocks.push(block);
        }

        blocks.sort_unstable();

        let mut collapsed: Vec<Match> = Vec::with_capacity(blocks.len() + 1);
        for block in blocks {
            match collapsed.last_mut() {
                Some(last) if last.old + last.size == block.old && last.new + last.size == block.new => {
                    last.size += block.size;
                }
                _ => collapsed.push(block),
            }
        }

        collapsed.push(Match {
            old: self.old.len(),
            new: self.new.len(),
            size: 0,
        });

        collapsed
    }

    /// Finds the longest block of aligned non-junk items within
    /// `old[old_start..old_end]` and `new[new_start..new_end]`, preferring the
    /// earliest one in `old`, then the earliest in `new`. The block is then
    /// grown over adjacent aligned junk on both ends.
    fn find_longest_match(
        &self,
        old_start: usize,
        old_end: usize,
        new_start: usize,
        new_end: usize,
    ) -> Match {
        let (old, new) = (self.old, self.new);
        let mut best = Match {
            old: old_start,
            new: new_start,
            size: 0,
        };

        // Length of the match ending at a given index of `new` in the
        // previous row.
        let mut run_lengths: HashMap<usize, usize> = HashMap::new();
        for (old_index, item) in old.iter().enumerate().take(old_end).skip(old_start) {
            let mut next_run_lengths = HashMap::new();

            let positions = item
                .alignment_key()
                .and_then(|key| self.new_positions.get(&key));

            for &new_index in positions.into_iter().flatten() {
                if new_index < new_start {
                    continue;
                }
                if new_index >= new_end {
                    break;
                }

                let previous = new_index
                    .checked_sub(1)
                    .and_then(|previous| run_lengths.get(&previous))
                    .copied()
                    .unwrap_or(0);
                let size = previous + 1;
                next_run_lengths.insert(new_index, size);

                if size > best.size {
                    best = Match {
                        old: old_index + 1 - size,
                        new: new_index + 1 - size,
                        size,
                    };
                }
            }

            run_lengths = next_run_lengths;
        }

        while best.old > old_start
            && best.new > new_start
            && new[best.new - 1].is_junk()
            && aligns(&old[best.old - 1], &new[best.new - 1])
        {
            best.old -= 1;
            best.new -= 1;
            best.size += 1;
        }

        while best.old + best.size < old_end
            && best.new + best.size < new_end
            && new[best.new + best.size].is_junk()
            && aligns(&old[best.old + best.size], &new[best.new + best.size])
        {
            best.size += 1;
        }

        best
    }
}
