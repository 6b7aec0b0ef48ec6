use npdiff::algorithms::{onp, Capture, DiffOp, Instance, SnakeTrace};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn reference_lcs(a: &[u8], b: &[u8]) -> usize {
    let mut table = vec![vec![0usize; b.len() + 1]; a.len() + 1];
    for i in 0..a.len() {
        for j in 0..b.len() {
            table[i + 1][j + 1] = if a[i] == b[j] {
                table[i][j] + 1
            } else {
                table[i][j + 1].max(table[i + 1][j])
            };
        }
    }
    table[a.len()][b.len()]
}

fn script(a: &[u8], b: &[u8]) -> Vec<DiffOp> {
    let mut d = Capture::new();
    onp::diff_slices(&mut d, a, b).unwrap();
    d.into_ops()
}

fn check_pair(a: &[u8], b: &[u8]) {
    let d = onp::edit_distance(a, b);
    let lcs = reference_lcs(a, b);

    assert_eq!(d, a.len() + b.len() - 2 * lcs, "{:?} {:?}", a, b);
    assert_eq!(d, onp::edit_distance(b, a), "{:?} {:?}", a, b);
    assert!(d >= (a.len() as isize - b.len() as isize).unsigned_abs());
    assert!(d <= a.len() + b.len());
    assert_eq!(onp::lcs_len(a, b), lcs);

    let ops = script(a, b);
    let mut old = Vec::new();
    let mut new = Vec::new();
    let mut matched = 0;
    let mut last_equal: Option<(usize, usize)> = None;
    for op in &ops {
        match *op {
            DiffOp::Equal {
                old_index,
                new_index,
                len,
            } => {
                assert!(len > 0);
                assert_eq!(&a[old_index..old_index + len], &b[new_index..new_index + len]);
                if let Some((old_end, new_end)) = last_equal {
                    assert!(old_index >= old_end && new_index >= new_end);
                }
                last_equal = Some((old_index + len, new_index + len));
                matched += len;
                old.extend_from_slice(&a[old_index..old_index + len]);
                new.extend_from_slice(&b[new_index..new_index + len]);
            }
            DiffOp::Delete {
                old_index, old_len, ..
            } => {
                assert!(old_len > 0);
                old.extend_from_slice(&a[old_index..old_index + old_len]);
            }
            DiffOp::Insert {
                new_index, new_len, ..
            } => {
                assert!(new_len > 0);
                new.extend_from_slice(&b[new_index..new_index + new_len]);
            }
            DiffOp::Replace { .. } => panic!("plain scripts never replace"),
        }
    }
    assert_eq!(old, a);
    assert_eq!(new, b);
    assert_eq!(matched, (a.len() + b.len() - d) / 2);

    // every diagonal of the band is computed once per iteration
    let mut trace = SnakeTrace::new(a, b);
    onp::calculate(&mut trace).unwrap();
    assert_eq!(trace.d(), d);
    let (delta, p) = (trace.delta() as usize, trace.p() as usize);
    let expected_calls = (0..=p).map(|p| delta + 2 * p + 1).sum::<usize>();
    assert_eq!(trace.snakes().len(), expected_calls);
}

fn all_strings(alphabet: &[u8], max_len: usize) -> Vec<Vec<u8>> {
    let mut rv = vec![vec![]];
    let mut start = 0;
    for _ in 0..max_len {
        let end = rv.len();
        for idx in start..end {
            for &c in alphabet {
                let mut s = rv[idx].clone();
                s.push(c);
                rv.push(s);
            }
        }
        start = end;
    }
    rv
}

#[test]
fn test_exhaustive_small() {
    let strings = all_strings(b"abc", 4);
    for a in &strings {
        for b in &strings {
            check_pair(a, b);
        }
    }
}

#[test]
fn test_identity() {
    for a in all_strings(b"ab", 6) {
        assert_eq!(onp::edit_distance(&a, &a), 0);
        let ops = script(&a, &a);
        if a.is_empty() {
            assert!(ops.is_empty());
        } else {
            assert_eq!(
                ops,
                vec![DiffOp::Equal {
                    old_index: 0,
                    new_index: 0,
                    len: a.len()
                }]
            );
        }
    }
}

#[test]
fn test_random_pairs() {
    let mut rng = StdRng::seed_from_u64(0x6f6e70);
    for _ in 0..300 {
        let alphabet = rng.gen_range(1..=6u8);
        let a = (0..rng.gen_range(0..=60))
            .map(|_| b'a' + rng.gen_range(0..alphabet))
            .collect::<Vec<_>>();
        let b = (0..rng.gen_range(0..=60))
            .map(|_| b'a' + rng.gen_range(0..alphabet))
            .collect::<Vec<_>>();
        check_pair(&a, &b);
    }
}

#[test]
fn test_deterministic() {
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..50 {
        let a = (0..rng.gen_range(0..=40))
            .map(|_| rng.gen_range(b'a'..=b'd'))
            .collect::<Vec<_>>();
        let b = (0..rng.gen_range(0..=40))
            .map(|_| rng.gen_range(b'a'..=b'd'))
            .collect::<Vec<_>>();
        assert_eq!(script(&a, &b), script(&a, &b));

        let mut first = SnakeTrace::new(&a, &b);
        let mut second = SnakeTrace::new(&a, &b);
        onp::calculate(&mut first).unwrap();
        onp::calculate(&mut second).unwrap();
        assert_eq!(first.snakes(), second.snakes());
    }
}

#[test]
fn test_scenarios() {
    assert_eq!(onp::edit_distance(b"ABCABBA", b"CBABAC"), 5);
    assert_eq!(onp::lcs_len(b"ABCABBA", b"CBABAC"), 4);

    assert_eq!(onp::edit_distance(b"", b"anything"), 8);
    assert_eq!(
        script(b"", b"anything"),
        vec![DiffOp::Insert {
            old_index: 0,
            new_index: 0,
            new_len: 8
        }]
    );

    let equals = script(b"AB", b"BA")
        .into_iter()
        .filter(|op| matches!(op, DiffOp::Equal { .. }))
        .count();
    assert_eq!(onp::edit_distance(b"AB", b"BA"), 2);
    assert_eq!(equals, 1);
}

#[test]
fn test_large_similar_inputs() {
    let mut rng = StdRng::seed_from_u64(99);
    let a = (0..5000)
        .map(|_| rng.gen_range(b'a'..=b'z'))
        .collect::<Vec<_>>();
    let mut b = a.clone();
    for _ in 0..10 {
        let idx = rng.gen_range(0..b.len());
        b.remove(idx);
    }
    b.extend_from_slice(b"tail");
    assert!(onp::edit_distance(&a, &b) <= 14);
    assert_eq!(onp::edit_distance(&a, &b), onp::edit_distance(&b, &a));
}
