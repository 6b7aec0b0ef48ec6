use std::ops::Range;

use crate::algorithms::ForwardPoint;

/// Handle of a [`Link`] inside a [`LinkPool`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LinkId(usize);

/// One matched run in a common sequence chain.
///
/// The run covers `old_start..old_end` in the old sequence and the equally
/// long range starting at `new_start` in the new sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    prev: Option<LinkId>,
    next: Option<LinkId>,
    old_start: usize,
    old_end: usize,
    new_start: usize,
}

impl Link {
    /// The run that preceded this one on the path.
    pub fn prev(&self) -> Option<LinkId> {
        self.prev
    }

    /// The run that follows this one.  Only set after [`LinkPool::reverse`].
    pub fn next(&self) -> Option<LinkId> {
        self.next
    }

    /// The matched range in the old sequence.
    pub fn old_range(&self) -> Range<usize> {
        self.old_start..self.old_end
    }

    /// The matched range in the new sequence.
    pub fn new_range(&self) -> Range<usize> {
        self.new_start..self.new_start + self.len()
    }

    /// Number of matched elements.
    pub fn len(&self) -> usize {
        self.old_end - self.old_start
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Arena of common sequence links.
///
/// Links are only ever appended and are all released together with the
/// pool.  Each diagonal of the forward point array refers to the head of
/// its chain by [`LinkId`].
#[derive(Debug, Clone, Default)]
pub struct LinkPool {
    links: Vec<Link>,
}

impl LinkPool {
    pub fn new() -> LinkPool {
        LinkPool::default()
    }

    /// Appends a run chained to `prev` and returns its handle.
    pub fn push(&mut self, prev: Option<LinkId>, old: Range<usize>, new_start: usize) -> LinkId {
        let id = LinkId(self.links.len());
        self.links.push(Link {
            prev,
            next: None,
            old_start: old.start,
            old_end: old.end,
            new_start,
        });
        id
    }

    pub fn get(&self, id: LinkId) -> &Link {
        &self.links[id.0]
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    /// Walks the chain ending in `last` backwards and links it forward.
    ///
    /// Returns the first run of the chain.  `prev` links are left intact.
    pub fn reverse(&mut self, last: Option<LinkId>) -> Option<LinkId> {
        let mut next = None;
        let mut current = last;
        while let Some(id) = current {
            let link = &mut self.links[id.0];
            current = link.prev;
            link.next = next;
            next = Some(id);
        }
        next
    }

    /// Iterates over a chain following the `next` links from `first`.
    pub fn iter(&self, first: Option<LinkId>) -> Chain<'_> {
        Chain {
            pool: self,
            current: first,
        }
    }
}

/// Iterator over a reversed chain, see [`LinkPool::iter`].
pub struct Chain<'pool> {
    pool: &'pool LinkPool,
    current: Option<LinkId>,
}

impl<'pool> Iterator for Chain<'pool> {
    type Item = &'pool Link;

    fn next(&mut self) -> Option<&'pool Link> {
        let link = self.pool.get(self.current?);
        self.current = link.next;
        Some(link)
    }
}

/// A forward point that also remembers the head of the common sequence
/// chain that reached it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChainedFp {
    pub point: isize,
    pub head: Option<LinkId>,
}

impl ForwardPoint for ChainedFp {
    fn sentinel() -> ChainedFp {
        ChainedFp {
            point: -1,
            head: None,
        }
    }

    #[inline(always)]
    fn point(&self) -> isize {
        self.point
    }

    #[inline(always)]
    fn set_point(&mut self, y: isize) {
        self.point = y;
    }
}

#[test]
fn test_reverse_chain() {
    let mut pool = LinkPool::new();
    let a = pool.push(None, 0..2, 1);
    let b = pool.push(Some(a), 3..4, 5);
    let _unrelated = pool.push(Some(a), 2..3, 2);
    let c = pool.push(Some(b), 6..9, 7);

    let first = pool.reverse(Some(c));
    assert_eq!(first, Some(a));
    let runs = pool
        .iter(first)
        .map(|link| (link.old_range(), link.new_range()))
        .collect::<Vec<_>>();
    assert_eq!(runs, vec![(0..2, 1..3), (3..4, 5..6), (6..9, 7..10)]);
    assert_eq!(pool.get(c).prev(), Some(b));
    assert_eq!(pool.len(), 4);
}

#[test]
fn test_reverse_empty_chain() {
    let mut pool = LinkPool::new();
    assert!(pool.is_empty());
    assert_eq!(pool.reverse(None), None);
    assert_eq!(pool.iter(None).count(), 0);
}
