use std::convert::Infallible;
use std::ops::Range;

use crate::algorithms::{Instance, InstanceState};

/// A single [`Instance::common_sequence`] invocation as seen by
/// [`SnakeTrace`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Snake {
    /// The diagonal the seed point was taken from.
    pub k0: isize,
    /// The diagonal that was computed.
    pub k: isize,
    /// The matched range in the old sequence.
    pub old: Range<usize>,
    /// The matched range in the new sequence.
    pub new: Range<usize>,
}

impl Snake {
    /// Returns `true` if no elements matched from the seed point.
    pub fn is_empty(&self) -> bool {
        self.new.start >= self.new.end
    }

    /// Number of matched elements.
    pub fn len(&self) -> usize {
        self.new.len()
    }
}

/// An instance that only observes the computation.
///
/// Every computed diagonal is recorded as a [`Snake`], including the ones
/// that did not match anything.  No chain of runs is kept, so this cannot
/// reconstruct an edit script but it shows exactly how the forward points
/// evolved.
///
/// ```rust
/// use npdiff::algorithms::{onp, Instance, SnakeTrace};
///
/// let mut trace = SnakeTrace::new(b"AB", b"BA");
/// onp::calculate(&mut trace).unwrap();
/// assert_eq!(trace.d(), 2);
/// assert_eq!(trace.matched().count(), 2);
/// ```
pub struct SnakeTrace<'old, 'new, Old, New> {
    state: InstanceState<isize>,
    old: &'old [Old],
    new: &'new [New],
    snakes: Vec<Snake>,
    dimensions: Option<(isize, isize, isize)>,
    outcome: Option<(isize, usize)>,
}

impl<'old, 'new, Old, New> SnakeTrace<'old, 'new, Old, New>
where
    New: PartialEq<Old>,
{
    /// Creates a trace for two slices.
    pub fn new(old: &'old [Old], new: &'new [New]) -> Self {
        SnakeTrace {
            state: InstanceState::new(old.len(), new.len()),
            old,
            new,
            snakes: Vec::new(),
            dimensions: None,
            outcome: None,
        }
    }

    /// The `(M, N, delta)` the calculation started with.
    ///
    /// `None` until the engine invoked [`Instance::begin`].
    pub fn dimensions(&self) -> Option<(isize, isize, isize)> {
        self.dimensions
    }

    /// The final `(p, D)`, recorded when the engine invoked
    /// [`Instance::done`].
    pub fn outcome(&self) -> Option<(isize, usize)> {
        self.outcome
    }

    /// All recorded snakes in the order the engine computed them.
    pub fn snakes(&self) -> &[Snake] {
        &self.snakes
    }

    /// Only the snakes that matched at least one element.
    pub fn matched(&self) -> impl Iterator<Item = &Snake> {
        self.snakes.iter().filter(|snake| !snake.is_empty())
    }

    /// Converts the trace into the recorded snakes.
    pub fn into_snakes(self) -> Vec<Snake> {
        self.snakes
    }
}

impl<'old, 'new, Old, New> Instance for SnakeTrace<'old, 'new, Old, New>
where
    New: PartialEq<Old>,
{
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

    fn common_sequence(
        &mut self,
        old: Range<usize>,
        new: Range<usize>,
        k0: isize,
        k: isize,
    ) -> Result<(), Infallible> {
        self.snakes.push(Snake { k0, k, old, new });
        Ok(())
    }

    fn begin(&mut self) -> Result<(), Infallible> {
        debug_assert!(self.dimensions.is_none());
        self.dimensions = Some((self.m(), self.n(), self.delta()));
        Ok(())
    }

    fn done(&mut self) -> Result<(), Infallible> {
        debug_assert!(self.outcome.is_none());
        self.outcome = Some((self.p(), self.d()));
        Ok(())
    }
}

#[test]
fn test_trace() {
    use crate::algorithms::onp;

    let mut trace = SnakeTrace::new(b"ABCABBA", b"CBABAC");
    assert_eq!(trace.dimensions(), None);
    assert_eq!(trace.outcome(), None);
    onp::calculate(&mut trace).unwrap();
    assert_eq!(trace.dimensions(), Some((6, 7, 1)));
    assert_eq!(trace.outcome(), Some((2, 5)));
    assert_eq!(trace.d(), 5);
    assert_eq!(trace.p(), 2);
    assert!(trace.is_swap());
    assert_eq!(trace.snakes().len(), 12);
    assert_eq!(
        trace.snakes()[3],
        Snake {
            k0: -1,
            k: 0,
            old: 1..2,
            new: 1..2,
        }
    );
    let matched = trace
        .matched()
        .map(|snake| (snake.old.clone(), snake.new.clone()))
        .collect::<Vec<_>>();
    assert_eq!(
        matched,
        vec![
            (1..2, 1..2),
            (2..3, 0..1),
            (3..5, 2..4),
            (0..2, 2..4),
            (3..4, 4..5),
            (4..5, 1..2),
            (6..7, 4..5),
        ]
    );
}

#[test]
fn test_trace_empty() {
    let mut trace = SnakeTrace::<u8, u8>::new(&[], &[]);
    crate::algorithms::onp::calculate(&mut trace).unwrap();
    assert_eq!(trace.d(), 0);
    assert_eq!(trace.dimensions(), Some((0, 0, 0)));
    assert_eq!(trace.outcome(), Some((0, 0)));
    assert_eq!(
        trace.into_snakes(),
        vec![Snake {
            k0: -1,
            k: 0,
            old: 0..0,
            new: 0..0,
        }]
    );
}
