//! Adapted from <https://github.com/mitsuhiko/similar/blob/7e15c44de11a1cd61e1149189929e189ef977fd8/src/algorithms/myers.rs>
//!
//! Myers' diff algorithm.
//!
//! * time: `O((N+M)D)`
//! * space `O(N+M)`
//!
//! See [the original article by Eugene W. Myers](http://www.xmailserver.org/diff2.pdf)
//! describing it.
//!
//! Items are compared with `PartialEq` only, which does not have to be
//! reflexive: an item that isn't equal to itself simply never lies on a
//! diagonal of the edit graph.

use core::ops::{Index, IndexMut, Range};

use super::raw_operation::RawOperation;
use crate::utils::{common_prefix_len::common_prefix_len, common_suffix_len::common_suffix_len};

/// Myers' diff algorithm.
///
/// Returns the edit script between `old` and `new` as index ranges, in
/// order. Consecutive operations may share a kind; grouping them is left to
/// the caller.
pub fn myers_diff<T>(old: &[T], new: &[T]) -> Vec<RawOperation>
where
    T: PartialEq,
{
    let max_d = (old.len() + new.len()).div_ceil(2) + 1;
    let mut vb = V::new(max_d);
    let mut vf = V::new(max_d);
    let mut result = Vec::new();

    conquer(
        old,
        0..old.len(),
        new,
        0..new.len(),
        &mut vf,
        &mut vb,
        &mut result,
    );

    result
}

// A D-path is a path which starts at (0,0) that has exactly D non-diagonal
// edges. All D-paths consist of a (D - 1)-path followed by a non-diagonal edge
// and then a possibly empty sequence of diagonal edges called a snake.

/// `V` contains the endpoints of the furthest reaching `D-paths`. For each
/// recorded endpoint `(x,y)` in diagonal `k`, we only need to retain `x`
/// because `y` can be computed from `x - k`. In other words, `V` is an array of
/// integers where `V[k]` contains the row index of the endpoint of the furthest
/// reaching path in diagonal `k`.
///
/// `k` can be negative, so `V` keeps an `offset` which maps every diagonal
/// back to a non-negative index.
#[derive(Debug)]
struct V {
    offset: isize,
    v: Vec<usize>,
}

impl V {
    fn new(max_d: usize) -> Self {
        let offset = isize::try_from(max_d).unwrap_or(isize::MAX);
        Self {
            offset,
            v: vec![0; 2 * max_d],
        }
    }

    fn len(&self) -> usize { self.v.len() }
}

impl Index<isize> for V {
    type Output = usize;

    fn index(&self, index: isize) -> &Self::Output {
        let idx = usize::try_from(index + self.offset).unwrap_or(usize::MAX);
        &self.v[idx.min(self.v.len().saturating_sub(1))]
    }
}

impl IndexMut<isize> for V {
    fn index_mut(&mut self, index: isize) -> &mut Self::Output {
        let idx = usize::try_from(index + self.offset).unwrap_or(usize::MAX);
        let len = self.v.len();
        &mut self.v[idx.min(len.saturating_sub(1))]
    }
}

fn split_at(range: Range<usize>, at: usize) -> (Range<usize>, Range<usize>) {
    (range.start..at, at..range.end)
}

/// Finds the start of the middle snake of an optimal D-path by running the
/// greedy algorithm forwards from `(0, 0)` and backwards from `(N, M)` until
/// the two furthest reaching paths overlap.
fn find_middle_snake<T>(
    old: &[T],
    old_range: Range<usize>,
    new: &[T],
    new_range: Range<usize>,
    vf: &mut V,
    vb: &mut V,
) -> Option<(usize, usize)>
where
    T: PartialEq,
{
    let n = old_range.len();
    let m = new_range.len();

    // By Lemma 1 in the paper, the optimal edit script length is odd or even as
    // `delta` is odd or even.
    let delta = isize::try_from(n).unwrap_or(isize::MAX) - isize::try_from(m).unwrap_or(isize::MAX);
    let odd = delta & 1 == 1;

    // The initial point at (0, -1)
    vf[1] = 0;
    // The initial point at (N, M+1)
    vb[1] = 0;

    let d_max = (n + m).div_ceil(2) + 1;
    assert!(vf.len() >= d_max);
    assert!(vb.len() >= d_max);

    let d_max_isize = isize::try_from(d_max).unwrap_or(isize::MAX);
    for d in 0..d_max_isize {
        // Forward path
        for k in (-d..=d).rev().step_by(2) {
            let mut x = if k == -d || (k != d && vf[k - 1] < vf[k + 1]) {
                vf[k + 1]
            } else {
                vf[k - 1] + 1
            };
            let y = usize::try_from(isize::try_from(x).unwrap_or(isize::MAX) - k).unwrap_or(0);

            let (x0, y0) = (x, y);
            if x < old_range.len() && y < new_range.len() {
                let advance = common_prefix_len(
                    old,
                    old_range.start + x..old_range.end,
                    new,
                    new_range.start + y..new_range.end,
                );
                x += advance;
            }

            vf[k] = x;

            // Only check for connections from the forward search when N - M is
            // odd and when there is a reciprocal k line coming from the other
            // direction.
            if odd && (k - delta).abs() <= (d - 1) && vf[k] + vb[-(k - delta)] >= n {
                return Some((x0 + old_range.start, y0 + new_range.start));
            }
        }

        // Backward path
        for k in (-d..=d).rev().step_by(2) {
            let mut x = if k == -d || (k != d && vb[k - 1] < vb[k + 1]) {
                vb[k + 1]
            } else {
                vb[k - 1] + 1
            };
            let mut y = usize::try_from(isize::try_from(x).unwrap_or(isize::MAX) - k).unwrap_or(0);

            if x < n && y < m {
                let advance = common_suffix_len(
                    old,
                    old_range.start..old_range.start + n - x,
                    new,
                    new_range.start..new_range.start + m - y,
                );
                x += advance;
                y += advance;
            }

            vb[k] = x;

            if !odd && (k - delta).abs() <= d && vb[k] + vf[-(k - delta)] >= n {
                return Some((n - x + old_range.start, m - y + new_range.start));
            }
        }
    }

    None
}

fn conquer<T>(
    old: &[T],
    mut old_range: Range<usize>,
    new: &[T],
    mut new_range: Range<usize>,
    vf: &mut V,
    vb: &mut V,
    result: &mut Vec<RawOperation>,
) where
    T: PartialEq,
{
    let common_prefix_len = common_prefix_len(old, old_range.clone(), new, new_range.clone());
    if common_prefix_len > 0 {
        result.push(RawOperation::Equal {
            old: old_range.start..old_range.start + common_prefix_len,
            new: new_range.start..new_range.start + common_prefix_len,
        });
    }
    old_range.start += common_prefix_len;
    new_range.start += common_prefix_len;

    let common_suffix_len = common_suffix_len(old, old_range.clone(), new, new_range.clone());
    let common_suffix = RawOperation::Equal {
        old: old_range.end - common_suffix_len..old_range.end,
        new: new_range.end - common_suffix_len..new_range.end,
    };
    old_range.end -= common_suffix_len;
    new_range.end -= common_suffix_len;

    if old_range.is_empty() && new_range.is_empty() {
        // do nothing
    } else if new_range.is_empty() {
        result.push(RawOperation::Delete(old_range));
    } else if old_range.is_empty() {
        result.push(RawOperation::Insert(new_range));
    } else if let Some((x_start, y_start)) =
        find_middle_snake(old, old_range.clone(), new, new_range.clone(), vf, vb)
    {
        let (old_a, old_b) = split_at(old_range, x_start);
        let (new_a, new_b) = split_at(new_range, y_start);
        conquer(old, old_a, new, new_a, vf, vb, result);
        conquer(old, old_b, new, new_b, vf, vb, result);
    } else {
        result.push(RawOperation::Delete(old_range));
        result.push(RawOperation::Insert(new_range));
    }

    if common_suffix_len > 0 {
        result.push(common_suffix);
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn chars(text: &str) -> Vec<char> { text.chars().collect() }

    #[test]
    fn test_empty_diff() {
        assert_eq!(myers_diff::<char>(&[], &[]), vec![]);
    }

    #[test]
    fn test_identical_content() {
        assert_eq!(
            myers_diff(&chars("abc"), &chars("abc")),
            vec![RawOperation::Equal { old: 0..3, new: 0..3 }]
        );
    }

    #[test]
    fn test_insert_only() {
        assert_eq!(
            myers_diff(&[], &chars("ab")),
            vec![RawOperation::Insert(0..2)]
        );
    }

    #[test]
    fn test_delete_only() {
        assert_eq!(
            myers_diff(&chars("ab"), &[]),
            vec![RawOperation::Delete(0..2)]
        );
    }

    #[test]
    fn test_prefix_and_suffix() {
        assert_eq!(
            myers_diff(&chars("abcd"), &chars("ad")),
            vec![
                RawOperation::Equal { old: 0..1, new: 0..1 },
                RawOperation::Delete(1..3),
                RawOperation::Equal { old: 3..4, new: 1..2 },
            ]
        );
    }
}
