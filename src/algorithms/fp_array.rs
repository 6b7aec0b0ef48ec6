use std::ops::{Index, IndexMut};

/// Storage for the furthest reaching points, addressed by diagonal.
///
/// The array covers the closed range `min..=max` of diagonals and is
/// allocated once up front.  Diagonals may be negative; internally the
/// index is shifted by `min` into a zero based buffer.
///
/// Indexing a diagonal outside of the allocated range panics.
#[derive(Debug, Clone)]
pub struct FpArray<T> {
    min: isize,
    values: Vec<T>,
}

impl<T: Clone> FpArray<T> {
    /// Allocates an array for the diagonals `min..=max`, each set to `init`.
    pub fn new(min: isize, max: isize, init: T) -> FpArray<T> {
        let len = if max >= min { (max - min + 1) as usize } else { 0 };
        FpArray {
            min,
            values: vec![init; len],
        }
    }
}

impl<T> FpArray<T> {
    /// The lowest addressable diagonal.
    pub fn min(&self) -> isize {
        self.min
    }

    /// The highest addressable diagonal.
    pub fn max(&self) -> isize {
        self.min + self.values.len() as isize - 1
    }

    #[inline(always)]
    fn offset(&self, k: isize) -> usize {
        debug_assert!(
            k >= self.min && k <= self.max(),
            "diagonal {} outside of {}..={}",
            k,
            self.min,
            self.max()
        );
        (k - self.min) as usize
    }
}

impl<T> Index<isize> for FpArray<T> {
    type Output = T;

    #[inline(always)]
    fn index(&self, k: isize) -> &T {
        &self.values[self.offset(k)]
    }
}

impl<T> IndexMut<isize> for FpArray<T> {
    #[inline(always)]
    fn index_mut(&mut self, k: isize) -> &mut T {
        let offset = self.offset(k);
        &mut self.values[offset]
    }
}

#[test]
fn test_negative_diagonals() {
    let mut fp = FpArray::new(-3, 4, -1isize);
    assert_eq!(fp.min(), -3);
    assert_eq!(fp.max(), 4);
    assert!((-3..=4).all(|k| fp[k] == -1));
    fp[-3] = 7;
    fp[4] = 9;
    fp[0] = 2;
    assert_eq!(fp[-3], 7);
    assert_eq!(fp[4], 9);
    assert_eq!(fp[0], 2);
    assert_eq!(fp[-2], -1);
}

#[test]
#[should_panic]
fn test_out_of_range() {
    let fp = FpArray::new(-1, 1, 0isize);
    let _ = fp[2];
}
