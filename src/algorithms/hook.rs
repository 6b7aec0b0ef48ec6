/// Receives an edit script turning the "old" sequence into the "new" one.
///
/// All indices are absolute positions in the sequences that were passed to
/// the diff function.  Every method has a default that does nothing, so a
/// hook only implements what it is interested in.
pub trait DiffHook: Sized {
    /// The error produced from the hook methods.
    type Error;

    /// `len` elements starting at `old_index` in the old sequence equal the
    /// ones starting at `new_index` in the new sequence.
    fn equal(&mut self, old_index: usize, new_index: usize, len: usize) -> Result<(), Self::Error> {
        let _ = (old_index, new_index, len);
        Ok(())
    }

    /// `old_len` elements starting at `old_index` are removed.  `new_index`
    /// is the position in the new sequence the removal happens at.
    fn delete(
        &mut self,
        old_index: usize,
        old_len: usize,
        new_index: usize,
    ) -> Result<(), Self::Error> {
        let _ = (old_index, old_len, new_index);
        Ok(())
    }

    /// `new_len` elements starting at `new_index` of the new sequence are
    /// added before `old_index` of the old sequence.
    fn insert(
        &mut self,
        old_index: usize,
        new_index: usize,
        new_len: usize,
    ) -> Result<(), Self::Error> {
        let _ = (old_index, new_index, new_len);
        Ok(())
    }

    /// A deletion directly followed by an insertion.
    ///
    /// The O(NP) script never emits this on its own; wrap the hook in
    /// [`Replace`](crate::algorithms::Replace) to get them.  The default
    /// falls back to `delete` and `insert`.
    fn replace(
        &mut self,
        old_index: usize,
        old_len: usize,
        new_index: usize,
        new_len: usize,
    ) -> Result<(), Self::Error> {
        self.delete(old_index, old_len, new_index)?;
        self.insert(old_index + old_len, new_index, new_len)
    }

    /// Called once after the whole script was emitted.
    fn finish(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

impl<'a, D: DiffHook + 'a> DiffHook for &'a mut D {
    type Error = D::Error;

    fn equal(&mut self, old_index: usize, new_index: usize, len: usize) -> Result<(), Self::Error> {
        (**self).equal(old_index, new_index, len)
    }

    fn delete(
        &mut self,
        old_index: usize,
        old_len: usize,
        new_index: usize,
    ) -> Result<(), Self::Error> {
        (**self).delete(old_index, old_len, new_index)
    }

    fn insert(
        &mut self,
        old_index: usize,
        new_index: usize,
        new_len: usize,
    ) -> Result<(), Self::Error> {
        (**self).insert(old_index, new_index, new_len)
    }

    fn replace(
        &mut self,
        old_index: usize,
        old_len: usize,
        new_index: usize,
        new_len: usize,
    ) -> Result<(), Self::Error> {
        (**self).replace(old_index, old_len, new_index, new_len)
    }

    fn finish(&mut self) -> Result<(), Self::Error> {
        (**self).finish()
    }
}

#[test]
fn test_forwarding() {
    use crate::algorithms::{onp, Capture};

    let mut capture = Capture::new();
    {
        let mut forward = &mut capture;
        onp::diff_slices(&mut forward, b"ab", b"b").unwrap();
    }
    assert_eq!(capture.ops().len(), 2);
}
