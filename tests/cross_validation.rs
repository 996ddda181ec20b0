//! Cross-validation of every generator against a lexicographic oracle and
//! against each other.

mod common;

use std::collections::{BTreeSet, HashSet};

use circleperm::{
    CircleEngine, Generator, HeapGenerator, InsertionSweep, Permutations, PureCircleEngine,
    Strategy, Tally, configure, factorial, par_count, par_tally, partitions, superpermutation,
};

fn oracle(n: usize) -> BTreeSet<Vec<u8>> {
    common::lexicographic(n).into_iter().collect()
}

fn run<G: Generator>(generator: &mut G) -> BTreeSet<Vec<u8>> {
    common::collect_unique(|visit| generator.for_each(visit))
}

#[test]
fn circle_matches_oracle() {
    common::init_tracing();

    for n in 4..=8 {
        let mut engine = CircleEngine::with_n(n).unwrap();
        assert_eq!(run(&mut engine), oracle(n), "n = {n}");
    }
}

#[test]
fn pure_circle_matches_oracle() {
    for n in 4..=8 {
        let mut engine = PureCircleEngine::with_n(n).unwrap();
        assert_eq!(run(&mut engine), oracle(n), "n = {n}");
    }
}

#[test]
fn heap_matches_oracle() {
    for n in 1..=8 {
        let mut generator = HeapGenerator::new(n);
        assert_eq!(run(&mut generator), oracle(n), "n = {n}");
    }
}

#[test]
fn insertion_matches_oracle() {
    for n in 2..=8 {
        let mut generator = InsertionSweep::new(n);
        assert_eq!(run(&mut generator), oracle(n), "n = {n}");
    }
}

#[test]
fn circle_order_for_four() {
    let mut order: Vec<Vec<u8>> = Vec::new();
    CircleEngine::with_n(4)
        .unwrap()
        .for_each(|p| order.push(p.to_vec()));

    let expected: [[u8; 4]; 12] = [
        [0, 1, 2, 3],
        [1, 2, 3, 0],
        [2, 3, 0, 1],
        [3, 0, 1, 2],
        [1, 2, 0, 3],
        [2, 0, 3, 1],
        [0, 3, 1, 2],
        [3, 1, 2, 0],
        [2, 0, 1, 3],
        [0, 1, 3, 2],
        [1, 3, 2, 0],
        [3, 2, 0, 1],
    ];

    for (got, want) in order.iter().zip(expected.iter()) {
        assert_eq!(got.as_slice(), want.as_slice());
    }
}

#[test]
fn heap_order_for_four() {
    let mut order: Vec<Vec<u8>> = Vec::new();
    HeapGenerator::new(4).for_each(|p| order.push(p.to_vec()));

    let expected: [[u8; 4]; 8] = [
        [0, 1, 2, 3],
        [1, 0, 2, 3],
        [2, 0, 1, 3],
        [0, 2, 1, 3],
        [1, 2, 0, 3],
        [2, 1, 0, 3],
        [3, 1, 0, 2],
        [1, 3, 0, 2],
    ];

    for (got, want) in order.iter().zip(expected.iter()) {
        assert_eq!(got.as_slice(), want.as_slice());
    }
    assert_eq!(order.len(), 24);
}

#[test]
fn insertion_order_for_four() {
    let mut order: Vec<Vec<u8>> = Vec::new();
    InsertionSweep::new(4).for_each(|p| order.push(p.to_vec()));

    let expected: [[u8; 4]; 8] = [
        [3, 0, 1, 2],
        [2, 3, 1, 0],
        [2, 0, 3, 1],
        [2, 0, 1, 3],
        [3, 2, 0, 1],
        [1, 3, 0, 2],
        [1, 2, 3, 0],
        [1, 2, 0, 3],
    ];

    for (got, want) in order.iter().zip(expected.iter()) {
        assert_eq!(got.as_slice(), want.as_slice());
    }
    assert_eq!(order.len(), 24);
}

#[test]
fn tallies_agree_everywhere() {
    for n in 4..=10 {
        let expected = Tally::expected(n);

        for strategy in Strategy::ALL {
            let config = configure(n, strategy).unwrap();
            assert_eq!(Permutations::new(&config).unwrap().tally(), expected, "{strategy} n = {n}");
            assert_eq!(
                par_tally(&config, 2usize.min(n - 3)).unwrap(),
                expected,
                "par {strategy} n = {n}"
            );
        }
    }
}

#[test]
fn counts_up_to_ten() {
    for n in 4..=10 {
        assert_eq!(circleperm::count(n).unwrap(), factorial(n), "n = {n}");
        assert_eq!(par_count(n).unwrap(), factorial(n), "par n = {n}");
    }
}

#[test]
fn configure_then_count_twice() {
    for n in [4, 5, 6, 8, 10] {
        let config = configure(n, Strategy::Circle).unwrap();

        let first = circleperm::count(config.n()).unwrap();
        let second = circleperm::count(config.n()).unwrap();

        assert_eq!(first, second, "n = {n}");
        assert_eq!(first, config.total(), "n = {n}");
    }
}

#[test]
fn resumed_run_emits_each_permutation_once() {
    for strategy in Strategy::ALL {
        let config = configure(5, strategy).unwrap();
        let mut generator = Permutations::new(&config).unwrap();
        let mut seen: Vec<Vec<u8>> = Vec::new();

        let result = generator.try_for_each(|p| {
            seen.push(p.to_vec());
            if seen.len() == 3 { Err("third") } else { Ok(()) }
        });
        assert_eq!(result, Err("third"));

        generator.for_each(|p| seen.push(p.to_vec()));

        assert_eq!(seen.len(), 120, "{strategy}");
        let unique: HashSet<&Vec<u8>> = seen.iter().collect();
        assert_eq!(unique.len(), 120, "{strategy}");
    }
}

#[test]
fn partitions_are_disjoint_and_complete() {
    let n = 6;
    let config = configure(n, Strategy::Circle).unwrap();
    let mut seen: HashSet<Vec<u8>> = HashSet::new();

    for part in partitions(n, 2).unwrap() {
        part.engine(&config).unwrap().for_each(|p| {
            assert!(seen.insert(p.to_vec()), "{p:?} in two partitions");
        });
    }

    assert_eq!(seen.len() as u64, factorial(n));
}

#[test]
fn rerun_after_reset_is_identical() {
    let config = configure(7, Strategy::Circle).unwrap();
    let mut generator = Permutations::new(&config).unwrap();

    let mut first: Vec<Vec<u8>> = Vec::new();
    generator.for_each(|p| first.push(p.to_vec()));

    generator.reset();
    let mut second: Vec<Vec<u8>> = Vec::new();
    generator.for_each(|p| second.push(p.to_vec()));

    assert_eq!(first, second);
}

#[test]
fn superpermutation_contains_every_permutation() {
    for n in 4..=6 {
        let sequence = superpermutation(n).unwrap();
        let windows: HashSet<&[u8]> = sequence.windows(n).collect();

        for p in common::lexicographic(n) {
            assert!(windows.contains(p.as_slice()), "n = {n}: missing {p:?}");
        }
    }
}
