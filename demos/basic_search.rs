//! Basic brute-force search example.
//!
//! Builds a small dataset, writes it to an `.fvecs` file, loads it back and
//! runs an exact k-nearest-neighbor search with progress logging.

use bruteknn::prelude::*;

fn main() -> Result<()> {
    tracing_subscriber::fmt().with_target(false).init();

    println!("bruteknn - Basic Brute-Force Example\n");

    let data = vec![
        vec![0.0f32, 0.0, 0.0],  // Point 0: origin
        vec![1.0, 0.0, 0.0],     // Point 1: unit x
        vec![0.0, 1.0, 0.0],     // Point 2: unit y
        vec![0.0, 0.0, 1.0],     // Point 3: unit z
        vec![1.0, 1.0, 1.0],     // Point 4: diagonal
        vec![0.5, 0.5, 0.5],     // Point 5: center
        vec![2.0, 0.0, 0.0],     // Point 6: far x
        vec![0.0, 2.0, 0.0],     // Point 7: far y
        vec![0.0, 0.0, 2.0],     // Point 8: far z
        vec![-1.0, -1.0, -1.0],  // Point 9: negative diagonal
        vec![0.0, 0.0, 0.0],     // Point 10: origin again
    ];

    let path = std::env::temp_dir().join("bruteknn_demo.fvecs");
    write_fvecs(&path, &data)?;
    let loaded = read_fvecs(&path, None)?;
    println!("Dataset: {} points, {} dimensions", loaded.len(), loaded[0].len());

    let dataset = DenseDataset::from(loaded);
    let searcher = BruteForceSearcher::new(dataset);

    let query = vec![0.4f32, 0.4, 0.4];
    println!("\nQuery: {:?}", query);

    let k = 5;
    let progress = ProgressLogger::new();
    let results = searcher.search_with_observer(&query, k, &progress)?;

    println!("\nTop {} nearest neighbors:", k);
    println!("{:>5} {:>10} {:>15}", "Rank", "Index", "Distance");
    println!("{:-<32}", "");
    for (rank, (index, distance)) in results.iter().enumerate() {
        println!("{:>5} {:>10} {:>15.6}", rank + 1, index, distance);
    }

    // Points 0 and 10 are identical; the one seen first ranks first.
    let results = searcher.search(&[0.0, 0.0, 0.0], 1)?;
    println!("\nNearest to the origin: {:?}", results);

    // A query of the wrong dimension fails the whole search.
    match searcher.search(&[0.0, 0.0], 1) {
        Ok(_) => println!("unexpected success"),
        Err(e) => println!("2-d query rejected: {}", e),
    }

    std::fs::remove_file(&path).ok();
    println!("\nDone!");
    Ok(())
}
