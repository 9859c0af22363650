use itertools::Itertools;
use rand_pcg::Lcg64Xsh32;
use rstest::rstest;

use kronecker::{
    CancelToken, GeneratorConfig, KroneckerError, KroneckerGenerator, Probabilities,
    QuadrantMatrix,
};

fn generator(levels: u32, edges: usize, p: Probabilities) -> KroneckerGenerator {
    GeneratorConfig::new(levels, edges)
        .probabilities(p)
        .seed(17)
        .workers(4)
        .build()
        .unwrap()
}

#[test]
fn zero_levels_is_the_trivial_matrix() {
    let g = generator(0, 5, Probabilities::GRAPH500);
    let edges = g.generate(&mut g.worker_rng(0)).unwrap();
    assert_eq!(edges.side(), 1);
    assert_eq!(edges.pairs(), &[(1, 1); 5]);
}

#[test]
fn zero_edges_is_empty() {
    let g = generator(10, 0, Probabilities::GRAPH500);
    assert!(g.generate(&mut g.worker_rng(0)).unwrap().is_empty());
    let par = g.generate_par().unwrap();
    assert!(par.is_empty());
    assert_eq!(par.side(), 1024);
}

#[rstest]
#[case(Probabilities::new(1.0, 0.0, 0.0, 0.0), (1, 8))]
#[case(Probabilities::new(0.0, 1.0, 0.0, 0.0), (8, 1))]
#[case(Probabilities::new(0.0, 0.0, 1.0, 0.0), (8, 8))]
#[case(Probabilities::new(0.0, 0.0, 0.0, 1.0), (1, 1))]
fn degenerate_probabilities_hit_one_corner(
    #[case] p: Probabilities,
    #[case] expected: (u64, u64),
) {
    let g = generator(3, 50, p);
    let edges = g.generate_par().unwrap();
    assert_eq!(edges.len(), 50);
    assert!(edges.iter().all(|&e| e == expected));
}

#[test]
fn coordinates_stay_in_range() {
    let g = generator(3, 1000, Probabilities::GRAPH500);
    let edges = g.generate(&mut g.worker_rng(0)).unwrap();
    assert_eq!(edges.len(), 1000);
    assert_eq!(edges.side(), 8);
    assert!(edges
        .iter()
        .all(|&(r, c)| (1..=8).contains(&r) && (1..=8).contains(&c)));
}

#[test]
fn top_level_quadrants_follow_the_probabilities() {
    let p = Probabilities::GRAPH500;
    let g = generator(3, 100_000, p);
    let edges = g.generate(&mut g.worker_rng(0)).unwrap();

    let half = edges.side() / 2;
    let mut counts = [0usize; 4];
    for &(r, c) in &edges {
        let ix = match (r > half, c > half) {
            (false, true) => 0,
            (true, false) => 1,
            (true, true) => 2,
            (false, false) => 3,
        };
        counts[ix] += 1;
    }
    for (count, expected) in counts.iter().zip(p.as_array().iter()) {
        let freq = *count as f64 / edges.len() as f64;
        assert!(
            (freq - expected).abs() < 0.02,
            "freq {} expected {} counts {:?}",
            freq,
            expected,
            counts
        );
    }
}

#[test]
fn same_seed_same_edges() {
    let g = generator(12, 5000, Probabilities::GRAPH500);
    let a = g.generate(&mut Lcg64Xsh32::new(99, 3)).unwrap();
    let b = g.generate(&mut Lcg64Xsh32::new(99, 3)).unwrap();
    assert_eq!(a, b);
    let c = g.generate(&mut Lcg64Xsh32::new(100, 3)).unwrap();
    assert_ne!(a, c);

    assert_eq!(g.generate_par().unwrap(), g.generate_par().unwrap());
}

#[test]
fn single_worker_matches_sequential() {
    let g = GeneratorConfig::new(9, 2000)
        .seed(5)
        .workers(1)
        .build()
        .unwrap();
    let sequential = g.generate(&mut g.worker_rng(0)).unwrap();
    assert_eq!(g.generate_par().unwrap(), sequential);
}

#[test]
fn parallel_output_is_the_concatenation_of_worker_shares() {
    let g = generator(6, 10, Probabilities::GRAPH500);
    let par = g.generate_par().unwrap();
    assert_eq!(par.len(), 10);

    // 4 workers over 10 edges: shares of 2, 3, 2, 3
    let mut expected = Vec::new();
    for (worker, n) in [2, 3, 2, 3].iter().enumerate() {
        let mut rng = g.worker_rng(worker);
        for _ in 0..*n {
            expected.push(g.sample_edge(&mut rng).coords());
        }
    }
    assert_eq!(par.into_pairs(), expected);
}

#[test]
fn edge_fold_is_grouping_independent() {
    let g = generator(16, 0, Probabilities::GRAPH500);
    let mut rng = g.worker_rng(0);
    for _ in 0..200 {
        let samples: Vec<QuadrantMatrix> = (0..16).map(|_| g.sampler().sample(&mut rng)).collect();
        let left = samples
            .iter()
            .fold(QuadrantMatrix::unit(), |acc, m| acc.kron(m));
        let tree = samples
            .iter()
            .copied()
            .tree_fold1(|a, b| a.kron(&b))
            .unwrap();
        assert_eq!(left, tree);
        assert_eq!(left.side(), 1 << 16);
    }
}

#[test]
fn first_sample_picks_the_most_significant_bit() {
    // every level picks (1, 2), so row is all-zero bits and col all-one bits
    let g = generator(5, 1, Probabilities::new(1.0, 0.0, 0.0, 0.0));
    let edge = g.sample_edge(&mut g.worker_rng(0));
    assert_eq!(edge.coords(), (1, 32));

    let hi = QuadrantMatrix::new(2, 2, 1).unwrap();
    let lo = QuadrantMatrix::new(2, 1, 2).unwrap();
    let m = [hi, lo, lo].iter().fold(QuadrantMatrix::unit(), |a, b| a.kron(b));
    // row bits 100 -> 5, col bits 011 -> 4 (1-based)
    assert_eq!(m.coords(), (5, 4));
}

#[test]
fn cancellation_between_edges() {
    let g = generator(8, 1000, Probabilities::GRAPH500);
    let cancel = CancelToken::new();
    assert!(g.generate_par_with_cancel(&cancel).is_ok());
    cancel.cancel();
    assert!(cancel.is_cancelled());
    assert!(matches!(
        g.generate_par_with_cancel(&cancel),
        Err(KroneckerError::Cancelled { .. })
    ));
}

#[test]
fn bad_probabilities_fail_at_configuration() {
    let err = GeneratorConfig::new(3, 10)
        .probabilities(Probabilities::new(0.6, 0.2, 0.2, 0.1))
        .build()
        .unwrap_err();
    assert!(matches!(err, KroneckerError::InvalidParameter { .. }));
}
