use std::ops::{Index, Range};

use crate::algorithms::{onp, Capture, DiffOp, Replace};

/// Creates a diff between old and new capturing the ops.
///
/// This is like [`onp::diff`] but instead of using an arbitrary hook this
/// will always use [`Replace`] + [`Capture`] and return the captured
/// [`DiffOp`]s.
pub fn capture_diff<Old, New>(
    old: &Old,
    old_range: Range<usize>,
    new: &New,
    new_range: Range<usize>,
) -> Vec<DiffOp>
where
    Old: Index<usize> + ?Sized,
    New: Index<usize> + ?Sized,
    New::Output: PartialEq<Old::Output>,
{
    let mut d = Replace::new(Capture::new());
    match onp::diff(&mut d, old, old_range, new, new_range) {
        Ok(()) => d.into_inner().into_ops(),
        Err(never) => match never {},
    }
}

/// Creates a diff between two slices capturing the ops.
pub fn capture_diff_slices<T: PartialEq>(old: &[T], new: &[T]) -> Vec<DiffOp> {
    capture_diff(old, 0..old.len(), new, 0..new.len())
}

/// Return a measure of similarity in the range `0..=1`.
///
/// A ratio of `1.0` means the two sequences are a complete match, a
/// ratio of `0.0` would indicate completely distinct sequences.  The input
/// is the sequence of diff operations and the length of the old and new
/// sequence.
pub fn get_diff_ratio(ops: &[DiffOp], old_len: usize, new_len: usize) -> f32 {
    let matches = ops
        .iter()
        .map(|op| match *op {
            DiffOp::Equal { len, .. } => len,
            _ => 0,
        })
        .sum::<usize>();
    let len = old_len + new_len;
    if len == 0 {
        1.0
    } else {
        2.0 * matches as f32 / len as f32
    }
}

#[test]
fn test_capture_diff() {
    insta::assert_debug_snapshot!(capture_diff_slices(&[0, 1, 2, 3, 4, 4, 4, 5], &[0, 1, 2, 8, 9, 4, 4, 7]), @r###"
    [
        Equal {
            old_index: 0,
            new_index: 0,
            len: 3,
        },
        Replace {
            old_index: 3,
            old_len: 1,
            new_index: 3,
            new_len: 2,
        },
        Equal {
            old_index: 4,
            new_index: 5,
            len: 2,
        },
        Replace {
            old_index: 6,
            old_len: 2,
            new_index: 7,
            new_len: 1,
        },
    ]
    "###);
}

#[test]
fn test_get_diff_ratio() {
    let ops = capture_diff_slices(b"ABCABBA", b"CBABAC");
    assert_eq!(get_diff_ratio(&ops, 7, 6), 8.0 / 13.0);
    assert_eq!(get_diff_ratio(&[], 0, 0), 1.0);
    let ops = capture_diff_slices(b"abc", b"xyz");
    assert_eq!(get_diff_ratio(&ops, 3, 3), 0.0);
}
