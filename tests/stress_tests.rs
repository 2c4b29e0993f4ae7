//! Stress tests for bruteknn.
//!
//! Randomized datasets are checked against a sort-based oracle and against
//! the ranking properties every result set must satisfy.

use bruteknn::prelude::*;
use rand::prelude::*;
use std::collections::HashSet;
use std::time::Instant;

/// Generate random vectors.
fn generate_random_vectors(n: usize, dim: usize, seed: u64) -> Vec<Vec<f32>> {
    let mut rng = rand::rngs::StdRng::seed_from_u64(seed);
    (0..n)
        .map(|_| (0..dim).map(|_| rng.gen::<f32>()).collect())
        .collect()
}

/// Generate vectors on a coarse integer grid so many distances tie exactly.
fn generate_grid_vectors(n: usize, dim: usize, seed: u64) -> Vec<Vec<f32>> {
    let mut rng = rand::rngs::StdRng::seed_from_u64(seed);
    (0..n)
        .map(|_| (0..dim).map(|_| rng.gen_range(0..3) as f32).collect())
        .collect()
}

/// Exact answer by sorting every candidate on (distance, index).
fn oracle(query: &[f32], database: &[Vec<f32>], k: usize) -> Vec<(u32, f32)> {
    let mut all: Vec<(u32, f32)> = database
        .iter()
        .enumerate()
        .map(|(i, v)| (i as u32, l2_distance(query, v).unwrap()))
        .collect();
    all.sort_by(|a, b| a.1.total_cmp(&b.1).then(a.0.cmp(&b.0)));
    all.truncate(k);
    all
}

/// Check the properties every result set must satisfy.
fn verify_results(query: &[f32], database: &[Vec<f32>], k: usize, results: &[(u32, f32)]) {
    assert_eq!(results.len(), k.min(database.len()));

    for i in 1..results.len() {
        assert!(
            results[i].1 >= results[i - 1].1,
            "Results not sorted: {} >= {} failed",
            results[i].1,
            results[i - 1].1
        );
    }

    let mut seen = HashSet::new();
    for &(idx, dist) in results {
        assert!(seen.insert(idx), "index {} returned twice", idx);
        assert_eq!(dist, l2_distance(query, &database[idx as usize]).unwrap());
    }

    if let Some(&(_, worst)) = results.last() {
        for (i, v) in database.iter().enumerate() {
            if !seen.contains(&(i as u32)) {
                assert!(l2_distance(query, v).unwrap() >= worst);
            }
        }
    }
}

#[test]
fn stress_test_random_against_oracle() {
    const N: usize = 2000;
    const DIM: usize = 32;
    const NUM_QUERIES: usize = 25;

    let database = generate_random_vectors(N, DIM, 42);
    let queries = generate_random_vectors(NUM_QUERIES, DIM, 123);

    for query in &queries {
        for k in [1, 10, 100] {
            let results = select_top_k(query, &database, k).unwrap();
            verify_results(query, &database, k, &results);
            assert_eq!(results, oracle(query, &database, k));
        }
    }
}

#[test]
fn stress_test_ties_against_oracle() {
    const N: usize = 3000;
    const DIM: usize = 4;

    let database = generate_grid_vectors(N, DIM, 7);
    let queries = generate_grid_vectors(20, DIM, 8);

    for query in &queries {
        for k in [1, 3, 17, 250] {
            let results = select_top_k(query, &database, k).unwrap();
            verify_results(query, &database, k, &results);
            // Ties at the cut-off go to the lowest indices.
            assert_eq!(results, oracle(query, &database, k));
        }
    }
}

#[test]
fn stress_test_sharded_matches_sequential() {
    const N: usize = 10_000;
    const DIM: usize = 8;
    const K: usize = 50;

    let rows = generate_grid_vectors(N, DIM, 99);
    let queries = generate_grid_vectors(10, DIM, 100);

    let sequential = BruteForceSearcher::new(DenseDataset::from_vecs(rows.clone()));
    let config = SearchConfig::new()
        .with_parallel(true)
        .with_parallel_chunk_size(333);
    let sharded = BruteForceSearcher::with_config(DenseDataset::from_vecs(rows), config).unwrap();

    for query in &queries {
        assert_eq!(
            sharded.search(query, K).unwrap(),
            sequential.search(query, K).unwrap()
        );
    }
}

#[test]
fn stress_test_repeatable() {
    let database = generate_random_vectors(5000, 64, 5);
    let query = generate_random_vectors(1, 64, 6).remove(0);

    let first = select_top_k(&query, &database, 20).unwrap();
    for _ in 0..5 {
        assert_eq!(select_top_k(&query, &database, 20).unwrap(), first);
    }
}

#[test]
fn stress_test_throughput() {
    const N: usize = 10_000;
    const DIM: usize = 128;
    const K: usize = 100;
    const NUM_QUERIES: usize = 20;

    let database = generate_random_vectors(N, DIM, 42);
    let queries = generate_random_vectors(NUM_QUERIES, DIM, 123);
    let searcher = BruteForceSearcher::new(DenseDataset::from_vecs(database));

    let start = Instant::now();
    for query in &queries {
        let results = searcher.search(query, K).unwrap();
        assert_eq!(results.len(), K);
    }
    let elapsed = start.elapsed();

    println!(
        "Brute-force: {} queries over {} x {}d in {:?} ({:.2} QPS)",
        NUM_QUERIES,
        N,
        DIM,
        elapsed,
        NUM_QUERIES as f64 / elapsed.as_secs_f64()
    );
}
