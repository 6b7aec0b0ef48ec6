use crate::algorithms::DiffHook;

/// A [`DiffHook`] that combines deletions and insertions to give blocks
/// of maximal length, and replacements when appropriate.
///
/// Adjacent equal sections are merged as well.
pub struct Replace<D: DiffHook> {
    d: D,
    del: Option<(usize, usize, usize)>,
    ins: Option<(usize, usize, usize)>,
    eq: Option<(usize, usize, usize)>,
}

impl<D: DiffHook> Replace<D> {
    /// Wraps another hook.
    pub fn new(d: D) -> Self {
        Replace {
            d,
            del: None,
            ins: None,
            eq: None,
        }
    }

    /// Extracts the wrapped hook.
    pub fn into_inner(self) -> D {
        self.d
    }

    fn flush_eq(&mut self) -> Result<(), D::Error> {
        if let Some((old_index, new_index, len)) = self.eq.take() {
            self.d.equal(old_index, new_index, len)?;
        }
        Ok(())
    }

    fn flush_change(&mut self) -> Result<(), D::Error> {
        match (self.del.take(), self.ins.take()) {
            (Some((old_index, old_len, _)), Some((_, new_index, new_len))) => {
                self.d.replace(old_index, old_len, new_index, new_len)
            }
            (Some((old_index, old_len, new_index)), None) => {
                self.d.delete(old_index, old_len, new_index)
            }
            (None, Some((old_index, new_index, new_len))) => {
                self.d.insert(old_index, new_index, new_len)
            }
            (None, None) => Ok(()),
        }
    }
}

impl<D: DiffHook> AsRef<D> for Replace<D> {
    fn as_ref(&self) -> &D {
        &self.d
    }
}

impl<D: DiffHook> AsMut<D> for Replace<D> {
    fn as_mut(&mut self) -> &mut D {
        &mut self.d
    }
}

impl<D: DiffHook> DiffHook for Replace<D> {
    type Error = D::Error;

    fn equal(&mut self, old_index: usize, new_index: usize, len: usize) -> Result<(), D::Error> {
        self.flush_change()?;
        self.eq = Some(match self.eq.take() {
            Some((old0, new0, len0)) => (old0, new0, len0 + len),
            None => (old_index, new_index, len),
        });
        Ok(())
    }

    fn delete(&mut self, old_index: usize, old_len: usize, new_index: usize) -> Result<(), D::Error> {
        self.flush_eq()?;
        self.del = Some(match self.del.take() {
            Some((old0, len0, new0)) => {
                debug_assert_eq!(old_index, old0 + len0);
                (old0, len0 + old_len, new0)
            }
            None => (old_index, old_len, new_index),
        });
        Ok(())
    }

    fn insert(&mut self, old_index: usize, new_index: usize, new_len: usize) -> Result<(), D::Error> {
        self.flush_eq()?;
        self.ins = Some(match self.ins.take() {
            Some((old0, new0, len0)) => {
                debug_assert_eq!(new_index, new0 + len0);
                (old0, new0, len0 + new_len)
            }
            None => (old_index, new_index, new_len),
        });
        Ok(())
    }

    fn replace(
        &mut self,
        old_index: usize,
        old_len: usize,
        new_index: usize,
        new_len: usize,
    ) -> Result<(), D::Error> {
        self.flush_eq()?;
        self.flush_change()?;
        self.d.replace(old_index, old_len, new_index, new_len)
    }

    fn finish(&mut self) -> Result<(), D::Error> {
        self.flush_eq()?;
        self.flush_change()?;
        self.d.finish()
    }
}

#[test]
fn test_replace_lines() {
    use crate::algorithms::onp;

    let a: &[&str] = &[
        ">>>>>>>>>>>>>>>>>>>>>>>>>>>>>>>>\n",
        "a\n",
        "b\n",
        "c\n",
        "================================\n",
        "d\n",
        "e\n",
        "f\n",
        "<<<<<<<<<<<<<<<<<<<<<<<<<<<<<<<<\n",
    ];
    let b: &[&str] = &[
        ">>>>>>>>>>>>>>>>>>>>>>>>>>>>>>>>\n",
        "x\n",
        "b\n",
        "c\n",
        "================================\n",
        "y\n",
        "e\n",
        "f\n",
        "<<<<<<<<<<<<<<<<<<<<<<<<<<<<<<<<\n",
    ];

    struct D(Vec<String>);
    impl DiffHook for D {
        type Error = ();
        fn equal(&mut self, o: usize, n: usize, len: usize) -> Result<(), ()> {
            self.0.push(format!("equal {:?} {:?} {:?}", o, n, len));
            Ok(())
        }
        fn delete(&mut self, o: usize, len: usize, new: usize) -> Result<(), ()> {
            self.0.push(format!("delete {:?} {:?} {:?}", o, len, new));
            Ok(())
        }
        fn insert(&mut self, o: usize, n: usize, len: usize) -> Result<(), ()> {
            self.0.push(format!("insert {:?} {:?} {:?}", o, n, len));
            Ok(())
        }
        fn replace(&mut self, o: usize, l: usize, n: usize, nl: usize) -> Result<(), ()> {
            self.0
                .push(format!("replace {:?} {:?} {:?} {:?}", o, l, n, nl));
            Ok(())
        }
    }
    let mut d = Replace::new(D(Vec::new()));
    onp::diff(&mut d, a, 0..a.len(), b, 0..b.len()).unwrap();

    insta::assert_debug_snapshot!(&d.into_inner().0, @r###"
    [
        "equal 0 0 1",
        "replace 1 1 1 1",
        "equal 2 2 3",
        "replace 5 1 5 1",
        "equal 6 6 3",
    ]
    "###);
}

#[test]
fn test_replace_merges() {
    use crate::algorithms::{onp, Capture, DiffOp};

    let mut d = Replace::new(Capture::new());
    onp::diff_slices(&mut d, b"ABCABBA", b"CBABAC").unwrap();
    let ops = d.into_inner().into_ops();
    assert_eq!(
        ops[0],
        DiffOp::Replace {
            old_index: 0,
            old_len: 1,
            new_index: 0,
            new_len: 1,
        }
    );
    assert_eq!(ops.len(), 7);

    let mut d = Replace::new(Capture::new());
    onp::diff_slices(&mut d, b"a", b"b").unwrap();
    assert_eq!(
        d.as_ref().ops(),
        &[DiffOp::Replace {
            old_index: 0,
            old_len: 1,
            new_index: 0,
            new_len: 1,
        }]
    );
}
