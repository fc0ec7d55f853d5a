use core::ops::Range;

use super::raw_operation::RawOperation;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OpcodeKind {
    Equal,
    Insert,
    Delete,
    Replace,
}

/// One alignment instruction: how `old[old]` relates to `new[new]`.
///
/// `Insert` opcodes have an empty, zero-width `old` range positioned where
/// the new items go; `Delete` opcodes have an empty `new` range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Opcode {
    pub kind: OpcodeKind,
    pub old: Range<usize>,
    pub new: Range<usize>,
}

impl Opcode {
    pub fn new(kind: OpcodeKind, old: Range<usize>, new: Range<usize>) -> Self {
        Self { kind, old, new }
    }

    pub fn equal(old: Range<usize>, new: Range<usize>) -> Self {
        debug_assert_eq!(old.len(), new.len(), "Equal opcodes span as many items on both sides");
        Self::new(OpcodeKind::Equal, old, new)
    }

    /// A change opcode whose kind is derived from which sides are non-empty.
    pub fn change(old: Range<usize>, new: Range<usize>) -> Self {
        let kind = match (old.is_empty(), new.is_empty()) {
            (true, _) => OpcodeKind::Insert,
            (false, true) => OpcodeKind::Delete,
            (false, false) => OpcodeKind::Replace,
        };

        Self::new(kind, old, new)
    }

    pub fn is_equal(&self) -> bool { self.kind == OpcodeKind::Equal }

    /// Whether items of the old sequence disappear.
    pub fn removes(&self) -> bool { matches!(self.kind, OpcodeKind::Delete | OpcodeKind::Replace) }

    /// Whether items of the new sequence appear.
    pub fn adds(&self) -> bool { matches!(self.kind, OpcodeKind::Insert | OpcodeKind::Replace) }
}

/// Groups an ordered edit script into opcodes: adjacent equal steps merge,
/// and every maximal run of deletions and insertions becomes one change.
pub(crate) fn group_operations<I>(operations: I) -> Vec<Opcode>
where
    I: IntoIterator<Item = RawOperation>,
{
    let mut opcodes: Vec<Opcode> = Vec::new();
    let (mut old_position, mut new_position) = (0, 0);
    let mut change_start: Option<(usize, usize)> = None;

    for operation in operations {
        match operation {
            RawOperation::Equal { old, new } => {
                if let Some((old_start, new_start)) = change_start.take() {
                    opcodes.push(Opcode::change(
                        old_start..old_position,
                        new_start..new_position,
                    ));
                }

                match opcodes.last_mut() {
                    Some(last) if last.is_equal() && last.old.end == old.start => {
                        last.old.end = old.end;
                        last.new.end = new.end;
                    }
                    _ => opcodes.push(Opcode::equal(old.clone(), new.clone())),
                }

                old_position = old.end;
                new_position = new.end;
            }
            RawOperation::Delete(old) => {
                change_start.get_or_insert((old_position, new_position));
                old_position = old.end;
            }
            RawOperation::Insert(new) => {
                change_start.get_or_insert((old_position, new_position));
                new_position = new.end;
            }
        }
    }

    if let Some((old_start, new_start)) = change_start {
        opcodes.push(Opcode::change(
            old_start..old_position,
            new_start..new_position,
        ));
    }

    opcodes
}
