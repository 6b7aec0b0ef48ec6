//! The O(NP) sequence comparison algorithm.
//!
//! * time: `O((M+N)P)` in the worst case, `O(M+N+PD)` expected
//! * space `O(M+N)`
//!
//! Here `M` is the length of the shorter sequence, `N` the length of the
//! longer one, `D` the edit distance and `P = (D - (N - M)) / 2` the number
//! of deletions from the longer sequence.
//!
//! See "An O(NP) Sequence Comparison Algorithm" by Sun Wu, Udi Manber,
//! Gene Myers and Webb Miller (Information Processing Letters 35, 1990).
//!
//! The engine is driven through [`calculate`] which works on any
//! [`Instance`].  [`diff`] uses an instance that records the chain of
//! matched runs and turns it into an edit script for a [`DiffHook`].
use std::convert::Infallible;
use std::ops::{Index, Range};

use crate::algorithms::{ChainedFp, DiffHook, ForwardPoint, Instance, InstanceState, LinkPool};

#[inline(always)]
fn orient<const SWAP: bool>(x: isize, y: isize) -> (isize, isize) {
    if SWAP {
        (y, x)
    } else {
        (x, y)
    }
}

/// Computes `fp[k]` from the better of `fp[k-1]` and `fp[k+1]`.
#[inline(always)]
fn calculate_fp_k<I, const SWAP: bool>(inst: &mut I, k: isize) -> Result<isize, I::Error>
where
    I: Instance + ?Sized,
{
    let vs_k0 = k - 1;
    let vs_y0 = inst.state().fp(vs_k0).point() + 1;
    let hs_k0 = k + 1;
    let hs_y0 = inst.state().fp(hs_k0).point();

    let (y0, k0) = if vs_y0 >= hs_y0 {
        (vs_y0, vs_k0)
    } else {
        (hs_y0, hs_k0)
    };
    let x0 = y0 - k;

    // snake
    let (m, n) = (inst.m(), inst.n());
    let (mut x, mut y) = (x0, y0);
    while x < m && y < n && {
        let (old_index, new_index) = orient::<SWAP>(x, y);
        inst.compare(old_index as usize, new_index as usize)
    } {
        x += 1;
        y += 1;
    }

    let (old_start, new_start) = orient::<SWAP>(x0, y0);
    let (old_end, new_end) = orient::<SWAP>(x, y);
    inst.common_sequence(
        old_start as usize..old_end as usize,
        new_start as usize..new_end as usize,
        k0,
        k,
    )?;

    Ok(y)
}

fn calculate_main<I, const SWAP: bool>(inst: &mut I) -> Result<(), I::Error>
where
    I: Instance + ?Sized,
{
    inst.begin()?;

    let delta = inst.delta();
    let n = inst.n();
    loop {
        inst.state_mut().incr_p();
        let p = inst.p();
        // the ascending pass must run before the descending one: the
        // descending pass ends on `delta` and may seed from `delta - 1`.
        for k in -p..delta {
            let y = calculate_fp_k::<I, SWAP>(inst, k)?;
            inst.state_mut().fp_mut(k).set_point(y);
        }
        for k in (delta..=delta + p).rev() {
            let y = calculate_fp_k::<I, SWAP>(inst, k)?;
            inst.state_mut().fp_mut(k).set_point(y);
        }
        if inst.state().fp(delta).point() == n {
            break;
        }
    }

    inst.done()
}

/// Runs the O(NP) algorithm on an instance.
///
/// This invokes [`Instance::begin`], then the comparison and
/// [`Instance::common_sequence`] hooks for every diagonal of every
/// iteration, and finally [`Instance::done`].  The first hook error
/// aborts the calculation and is returned.
///
/// An instance can only be calculated once.
pub fn calculate<I>(inst: &mut I) -> Result<(), I::Error>
where
    I: Instance + ?Sized,
{
    debug_assert_eq!(inst.p(), -1, "instance was already calculated");
    log::trace!(
        "onp: M={}, N={}, delta={}, swap={}",
        inst.m(),
        inst.n(),
        inst.delta(),
        inst.is_swap()
    );
    if inst.is_swap() {
        calculate_main::<I, true>(inst)?;
    } else {
        calculate_main::<I, false>(inst)?;
    }
    log::trace!("onp: p={}, D={}", inst.p(), inst.d());
    Ok(())
}

/// Returns the edit distance `delta + 2p` of a calculated instance.
///
/// The value is only valid after [`calculate`] returned successfully.
pub fn edit_distance_of<I>(inst: &I) -> usize
where
    I: Instance + ?Sized,
{
    debug_assert!(inst.p() >= 0, "instance was not calculated");
    inst.d()
}

/// Instance recording the common sequence chain per diagonal and
/// replaying it as an edit script on completion.
struct EditScript<'hook, 'old, 'new, Old: ?Sized, New: ?Sized, D> {
    state: InstanceState<ChainedFp>,
    old: &'old Old,
    old_start: usize,
    new: &'new New,
    new_start: usize,
    links: LinkPool,
    d: &'hook mut D,
}

impl<'hook, 'old, 'new, Old, New, D> EditScript<'hook, 'old, 'new, Old, New, D>
where
    Old: Index<usize> + ?Sized,
    New: Index<usize> + ?Sized,
    D: DiffHook,
{
    fn new(
        d: &'hook mut D,
        old: &'old Old,
        old_range: Range<usize>,
        new: &'new New,
        new_range: Range<usize>,
    ) -> Self {
        EditScript {
            state: InstanceState::new(old_range.len(), new_range.len()),
            old,
            old_start: old_range.start,
            new,
            new_start: new_range.start,
            links: LinkPool::new(),
            d,
        }
    }

    fn emit(&mut self) -> Result<(), D::Error> {
        let head = self.state.fp(self.state.delta()).head;
        let first = self.links.reverse(head);
        let (o, n) = (self.old_start, self.new_start);
        let d = &mut *self.d;

        let mut old_pos = 0;
        let mut new_pos = 0;
        for link in self.links.iter(first) {
            let (old_range, new_range) = (link.old_range(), link.new_range());
            if old_pos < old_range.start {
                d.delete(o + old_pos, old_range.start - old_pos, n + new_pos)?;
            }
            if new_pos < new_range.start {
                d.insert(o + old_range.start, n + new_pos, new_range.start - new_pos)?;
            }
            d.equal(o + old_range.start, n + new_range.start, link.len())?;
            old_pos = old_range.end;
            new_pos = new_range.end;
        }

        let (old_len, new_len) = (self.state.old_len(), self.state.new_len());
        if old_pos < old_len {
            d.delete(o + old_pos, old_len - old_pos, n + new_pos)?;
        }
        if new_pos < new_len {
            d.insert(o + old_len, n + new_pos, new_len - new_pos)?;
        }
        Ok(())
    }
}

impl<'hook, 'old, 'new, Old, New, D> Instance for EditScript<'hook, 'old, 'new, Old, New, D>
where
    Old: Index<usize> + ?Sized,
    New: Index<usize> + ?Sized,
    New::Output: PartialEq<Old::Output>,
    D: DiffHook,
{
    type Fp = ChainedFp;
    type Error = D::Error;

    fn state(&self) -> &InstanceState<ChainedFp> {
        &self.state
    }

    fn state_mut(&mut self) -> &mut InstanceState<ChainedFp> {
        &mut self.state
    }

    #[inline(always)]
    fn compare(&self, old_index: usize, new_index: usize) -> bool {
        self.new[self.new_start + new_index] == self.old[self.old_start + old_index]
    }

    fn common_sequence(
        &mut self,
        old: Range<usize>,
        new: Range<usize>,
        k0: isize,
        k: isize,
    ) -> Result<(), D::Error> {
        let prev = self.state.fp(k0).head;
        self.state.fp_mut(k).head = if new.start < new.end {
            Some(self.links.push(prev, old, new.start))
        } else {
            prev
        };
        Ok(())
    }

    fn done(&mut self) -> Result<(), D::Error> {
        self.emit()
    }
}

/// O(NP) diff algorithm.
///
/// Diff `old`, between indices `old_range` and `new` between indices `new_range`.
///
/// The hook receives the edit script in order: for every matched run first
/// the deletion of the unmatched old elements before it, then the
/// insertion of the unmatched new elements before it and finally the run
/// itself as an equal section.  Trailing deletions and insertions follow
/// the last run.
pub fn diff<Old, New, D>(
    d: &mut D,
    old: &Old,
    old_range: Range<usize>,
    new: &New,
    new_range: Range<usize>,
) -> Result<(), D::Error>
where
    Old: Index<usize> + ?Sized,
    New: Index<usize> + ?Sized,
    D: DiffHook,
    New::Output: PartialEq<Old::Output>,
{
    calculate(&mut EditScript::new(d, old, old_range, new, new_range))?;
    d.finish()
}

/// Shortcut for diffing slices.
pub fn diff_slices<D, T>(d: &mut D, old: &[T], new: &[T]) -> Result<(), D::Error>
where
    D: DiffHook,
    T: PartialEq,
{
    diff(d, old, 0..old.len(), new, 0..new.len())
}

/// Observe-only instance that keeps nothing but the forward points.
struct Distance<'old, 'new, T> {
    state: InstanceState<isize>,
    old: &'old [T],
    new: &'new [T],
}

impl<'old, 'new, T: PartialEq> Instance for Distance<'old, 'new, T> {
    type Fp = isize;
    type Error = Infallible;

    fn state(&self) -> &InstanceState<isize> {
        &self.state
    }

    fn state_mut(&mut self) -> &mut InstanceState<isize> {
        &mut self.state
    }

    #[inline(always)]
    fn compare(&self, old_index: usize, new_index: usize) -> bool {
        self.new[new_index] == self.old[old_index]
    }
}

/// Returns the edit distance (number of inserted plus deleted elements)
/// between two slices.
pub fn edit_distance<T: PartialEq>(old: &[T], new: &[T]) -> usize {
    let mut inst = Distance {
        state: InstanceState::new(old.len(), new.len()),
        old,
        new,
    };
    match calculate(&mut inst) {
        Ok(()) => edit_distance_of(&inst),
        Err(never) => match never {},
    }
}

/// Returns the length of the longest common subsequence of two slices.
pub fn lcs_len<T: PartialEq>(old: &[T], new: &[T]) -> usize {
    (old.len() + new.len() - edit_distance(old, new)) / 2
}

#[cfg(test)]
fn capture_ops<T: PartialEq>(old: &[T], new: &[T]) -> Vec<crate::algorithms::DiffOp> {
    let mut d = crate::algorithms::Capture::new();
    diff_slices(&mut d, old, new).unwrap();
    d.into_ops()
}

#[test]
fn test_edit_distance() {
    assert_eq!(edit_distance(b"ABCABBA", b"CBABAC"), 5);
    assert_eq!(edit_distance(b"CBABAC", b"ABCABBA"), 5);
    assert_eq!(lcs_len(b"ABCABBA", b"CBABAC"), 4);
    assert_eq!(edit_distance(b"", b"anything"), 8);
    assert_eq!(edit_distance(b"anything", b""), 8);
    assert_eq!(edit_distance(b"X", b"X"), 0);
    assert_eq!(edit_distance(b"AB", b"BA"), 2);
    assert_eq!(edit_distance::<u8>(b"", b""), 0);
    assert_eq!(edit_distance(b"kitten", b"sitting"), 5);
}

#[test]
fn test_edit_distance_of() {
    let mut inst = Distance {
        state: InstanceState::new(7, 6),
        old: b"ABCABBA",
        new: b"CBABAC",
    };
    calculate(&mut inst).unwrap();
    assert_eq!(inst.p(), 2);
    assert_eq!(edit_distance_of(&inst), 5);
    assert_eq!(edit_distance_of(&inst), inst.d());
}

#[test]
fn test_diff() {
    insta::assert_debug_snapshot!(capture_ops(b"ABCABBA", b"CBABAC"), @r###"
    [
        Delete {
            old_index: 0,
            old_len: 1,
            new_index: 0,
        },
        Insert {
            old_index: 1,
            new_index: 0,
            new_len: 1,
        },
        Equal {
            old_index: 1,
            new_index: 1,
            len: 1,
        },
        Delete {
            old_index: 2,
            old_len: 1,
            new_index: 2,
        },
        Equal {
            old_index: 3,
            new_index: 2,
            len: 2,
        },
        Delete {
            old_index: 5,
            old_len: 1,
            new_index: 4,
        },
        Equal {
            old_index: 6,
            new_index: 4,
            len: 1,
        },
        Insert {
            old_index: 7,
            new_index: 5,
            new_len: 1,
        },
    ]
    "###);
}

#[test]
fn test_empty_old() {
    insta::assert_debug_snapshot!(capture_ops(b"", b"anything"), @r###"
    [
        Insert {
            old_index: 0,
            new_index: 0,
            new_len: 8,
        },
    ]
    "###);
}

#[test]
fn test_single_match() {
    use crate::algorithms::DiffOp;

    assert_eq!(
        capture_ops(b"X", b"X"),
        vec![DiffOp::Equal {
            old_index: 0,
            new_index: 0,
            len: 1
        }]
    );
    assert_eq!(capture_ops::<u8>(b"", b""), vec![]);
    assert_eq!(
        capture_ops(b"abc", b""),
        vec![DiffOp::Delete {
            old_index: 0,
            old_len: 3,
            new_index: 0
        }]
    );
}

#[test]
fn test_tie_break() {
    use crate::algorithms::DiffOp;

    // ties prefer the vertical seed, which keeps the "B" of the old side
    let expected = vec![
        DiffOp::Delete {
            old_index: 0,
            old_len: 1,
            new_index: 0,
        },
        DiffOp::Equal {
            old_index: 1,
            new_index: 0,
            len: 1,
        },
        DiffOp::Insert {
            old_index: 2,
            new_index: 1,
            new_len: 1,
        },
    ];
    assert_eq!(capture_ops(b"AB", b"BA"), expected);
    assert_eq!(capture_ops(b"BA", b"AB"), expected);
}

#[test]
fn test_ranges() {
    use crate::algorithms::{Capture, DiffOp};

    let old = b"__ABCABBA__";
    let new = b"xxxCBABAC";
    let mut d = Capture::new();
    diff(&mut d, &old[..], 2..9, &new[..], 3..9).unwrap();
    let ops = d.into_ops();
    assert_eq!(ops.len(), 8);
    assert_eq!(
        ops[2],
        DiffOp::Equal {
            old_index: 3,
            new_index: 4,
            len: 1
        }
    );
    assert_eq!(
        ops[7],
        DiffOp::Insert {
            old_index: 9,
            new_index: 8,
            new_len: 1
        }
    );
}

#[test]
fn test_hook_lifecycle() {
    struct Counting<'a> {
        state: InstanceState<isize>,
        old: &'a [u8],
        new: &'a [u8],
        begin: usize,
        done: usize,
        calls: Vec<(isize, isize)>,
    }

    impl<'a> Instance for Counting<'a> {
        type Fp = isize;
        type Error = ();

        fn state(&self) -> &InstanceState<isize> {
            &self.state
        }

        fn state_mut(&mut self) -> &mut InstanceState<isize> {
            &mut self.state
        }

        fn compare(&self, old_index: usize, new_index: usize) -> bool {
            self.old[old_index] == self.new[new_index]
        }

        fn common_sequence(
            &mut self,
            _old: Range<usize>,
            _new: Range<usize>,
            k0: isize,
            k: isize,
        ) -> Result<(), ()> {
            assert_eq!(self.begin, 1);
            assert_eq!(self.done, 0);
            self.calls.push((k0, k));
            Ok(())
        }

        fn begin(&mut self) -> Result<(), ()> {
            self.begin += 1;
            Ok(())
        }

        fn done(&mut self) -> Result<(), ()> {
            self.done += 1;
            Ok(())
        }
    }

    let mut inst = Counting {
        state: InstanceState::new(7, 6),
        old: b"ABCABBA",
        new: b"CBABAC",
        begin: 0,
        done: 0,
        calls: Vec::new(),
    };
    calculate(&mut inst).unwrap();
    assert_eq!(inst.begin, 1);
    assert_eq!(inst.done, 1);
    assert_eq!(inst.p(), 2);
    assert_eq!(inst.d(), 5);
    // one call per diagonal of the band in every iteration
    assert_eq!(inst.calls.len(), 2 + 4 + 6);
    assert_eq!(&inst.calls[..2], &[(-1, 0), (0, 1)]);
    assert_eq!(inst.calls.last(), Some(&(2, 1)));
}

#[test]
fn test_hook_error_aborts() {
    struct Failing {
        state: InstanceState<isize>,
        calls: usize,
    }

    impl Instance for Failing {
        type Fp = isize;
        type Error = &'static str;

        fn state(&self) -> &InstanceState<isize> {
            &self.state
        }

        fn state_mut(&mut self) -> &mut InstanceState<isize> {
            &mut self.state
        }

        fn compare(&self, _old_index: usize, _new_index: usize) -> bool {
            false
        }

        fn common_sequence(
            &mut self,
            _old: Range<usize>,
            _new: Range<usize>,
            _k0: isize,
            _k: isize,
        ) -> Result<(), &'static str> {
            self.calls += 1;
            Err("stop")
        }

        fn done(&mut self) -> Result<(), &'static str> {
            panic!("done must not be reached");
        }
    }

    let mut inst = Failing {
        state: InstanceState::new(3, 4),
        calls: 0,
    };
    assert_eq!(calculate(&mut inst), Err("stop"));
    assert_eq!(inst.calls, 1);
}
