use std::ops::Range;

use crate::algorithms::FpArray;

/// A value stored per diagonal in the forward point array.
///
/// The engine only ever reads and writes the furthest reaching `y`
/// coordinate through this trait.  Instances that need to remember more
/// per diagonal (for instance the head of a common sequence chain) use a
/// composite type and update the extra fields from their hooks.
pub trait ForwardPoint: Clone {
    /// The value every diagonal starts out with (a point of `-1`).
    fn sentinel() -> Self;

    /// Returns the furthest reaching `y` coordinate.
    fn point(&self) -> isize;

    /// Replaces the furthest reaching `y` coordinate.
    fn set_point(&mut self, y: isize);
}

impl ForwardPoint for isize {
    #[inline(always)]
    fn sentinel() -> isize {
        -1
    }

    #[inline(always)]
    fn point(&self) -> isize {
        *self
    }

    #[inline(always)]
    fn set_point(&mut self, y: isize) {
        *self = y;
    }
}

/// The bookkeeping every [`Instance`] carries.
///
/// This holds the swap flag, the (possibly swapped) lengths `M` and `N`,
/// `delta`, the search radius `p` and the forward point array sized for
/// the diagonals `-(M+1)..=N+1`.  `M` is always the shorter of the two
/// sequences.
#[derive(Debug, Clone)]
pub struct InstanceState<F> {
    swap: bool,
    m: isize,
    n: isize,
    delta: isize,
    p: isize,
    fp: FpArray<F>,
}

impl<F: ForwardPoint> InstanceState<F> {
    /// Creates the state for comparing a sequence of `old_len` elements
    /// with one of `new_len` elements.
    pub fn new(old_len: usize, new_len: usize) -> InstanceState<F> {
        let swap = old_len > new_len;
        let (m, n) = if swap {
            (new_len as isize, old_len as isize)
        } else {
            (old_len as isize, new_len as isize)
        };
        InstanceState {
            swap,
            m,
            n,
            delta: n - m,
            p: -1,
            fp: FpArray::new(-(m + 1), n + 1, F::sentinel()),
        }
    }
}

impl<F> InstanceState<F> {
    /// Length of the shorter sequence.
    #[inline(always)]
    pub fn m(&self) -> isize {
        self.m
    }

    /// Length of the longer sequence.
    #[inline(always)]
    pub fn n(&self) -> isize {
        self.n
    }

    /// `N - M`, the diagonal the search ends on.
    #[inline(always)]
    pub fn delta(&self) -> isize {
        self.delta
    }

    /// The current search radius.  `-1` before the calculation started.
    #[inline(always)]
    pub fn p(&self) -> isize {
        self.p
    }

    /// Widens the search radius by one.
    pub fn incr_p(&mut self) {
        self.p += 1;
    }

    /// Returns `true` if the old sequence is longer than the new one and
    /// the roles of `x` and `y` are transposed.
    #[inline(always)]
    pub fn is_swap(&self) -> bool {
        self.swap
    }

    /// Length of the old sequence as passed in by the caller.
    pub fn old_len(&self) -> usize {
        (if self.swap { self.n } else { self.m }) as usize
    }

    /// Length of the new sequence as passed in by the caller.
    pub fn new_len(&self) -> usize {
        (if self.swap { self.m } else { self.n }) as usize
    }

    /// The edit distance `delta + 2p`.
    ///
    /// Only meaningful once the calculation finished.
    pub fn d(&self) -> usize {
        (self.delta + 2 * self.p) as usize
    }

    /// The forward point of diagonal `k`.
    #[inline(always)]
    pub fn fp(&self, k: isize) -> &F {
        &self.fp[k]
    }

    /// Mutable access to the forward point of diagonal `k`.
    #[inline(always)]
    pub fn fp_mut(&mut self, k: isize) -> &mut F {
        &mut self.fp[k]
    }
}

/// The capability set the O(NP) engine drives.
///
/// An instance owns an [`InstanceState`] and supplies the element
/// comparison.  The remaining methods are hooks with empty defaults which
/// let an instance observe the computation.
///
/// All positions handed to [`compare`](Self::compare) and
/// [`common_sequence`](Self::common_sequence) are in caller coordinates:
/// the first one indexes the old sequence and the second one the new
/// sequence, regardless of whether the engine swapped them internally.
pub trait Instance {
    /// The per diagonal value stored in the forward point array.
    type Fp: ForwardPoint;

    /// The error the hooks can fail with.
    type Error;

    /// Returns the bookkeeping of this instance.
    fn state(&self) -> &InstanceState<Self::Fp>;

    /// Returns the bookkeeping of this instance mutably.
    fn state_mut(&mut self) -> &mut InstanceState<Self::Fp>;

    /// Checks if `old[old_index]` and `new[new_index]` are equal.
    ///
    /// This must be a pure and deterministic function.
    fn compare(&self, old_index: usize, new_index: usize) -> bool;

    /// Invoked once for every computed diagonal.
    ///
    /// `old` and `new` are the matched run found by extending the snake
    /// from the seed point (both empty if there was no match) and `k0` is
    /// the diagonal the seed was taken from.  The new forward point for
    /// `k` is written by the engine after this returns.
    fn common_sequence(
        &mut self,
        old: Range<usize>,
        new: Range<usize>,
        k0: isize,
        k: isize,
    ) -> Result<(), Self::Error> {
        let _ = (old, new, k0, k);
        Ok(())
    }

    /// Called once before the first iteration.
    fn begin(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Called once after `fp[delta]` reached `N`.
    fn done(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    #[inline(always)]
    fn m(&self) -> isize {
        self.state().m()
    }

    #[inline(always)]
    fn n(&self) -> isize {
        self.state().n()
    }

    #[inline(always)]
    fn delta(&self) -> isize {
        self.state().delta()
    }

    #[inline(always)]
    fn p(&self) -> isize {
        self.state().p()
    }

    #[inline(always)]
    fn is_swap(&self) -> bool {
        self.state().is_swap()
    }

    /// The edit distance, see [`InstanceState::d`].
    fn d(&self) -> usize {
        self.state().d()
    }
}

#[test]
fn test_state_swap() {
    let state = InstanceState::<isize>::new(7, 6);
    assert!(state.is_swap());
    assert_eq!(state.m(), 6);
    assert_eq!(state.n(), 7);
    assert_eq!(state.delta(), 1);
    assert_eq!(state.p(), -1);
    assert_eq!(state.old_len(), 7);
    assert_eq!(state.new_len(), 6);
    assert_eq!(*state.fp(-7), -1);
    assert_eq!(*state.fp(8), -1);
}

#[test]
fn test_state_no_swap() {
    let state = InstanceState::<isize>::new(3, 3);
    assert!(!state.is_swap());
    assert_eq!(state.delta(), 0);
    assert_eq!(state.old_len(), 3);
    assert_eq!(state.new_len(), 3);
}
