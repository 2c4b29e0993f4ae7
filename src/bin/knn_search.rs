//! Exact k-nearest-neighbor search over `.fvecs` files.
//!
//! Loads the first `--num-vectors` database vectors and one query vector,
//! runs a brute-force search and prints the ranking to stdout. Progress and
//! timing go to stderr through `tracing`.

use bruteknn::brute_force::BruteForceSearcher;
use bruteknn::data_format::{read_fvecs, DenseDataset};
use bruteknn::observer::ProgressLogger;
use bruteknn::{KnnError, SearchConfig, SearchResult};
use clap::Parser;
use std::error::Error;
use std::path::PathBuf;
use std::time::Instant;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

const DEFAULT_NUM_VECTORS: u64 = 100;

/// Command line arguments.
#[derive(Parser, Debug)]
#[command(name = "knn_search")]
#[command(about = "Exact brute-force k-nearest-neighbor search over .fvecs files")]
struct Args {
    /// Number of database vectors to load; an invalid count falls back to 100
    #[arg(value_name = "NUM_VECTORS", conflicts_with = "num_vectors")]
    count: Option<String>,

    /// Database vectors
    #[arg(long, value_name = "PATH", default_value = "sift_base.fvecs")]
    base: PathBuf,

    /// Query vectors
    #[arg(long, value_name = "PATH", default_value = "sift_query.fvecs")]
    query: PathBuf,

    /// Number of database vectors to load
    #[arg(short = 'n', long, default_value_t = DEFAULT_NUM_VECTORS, value_parser = clap::value_parser!(u64).range(1..))]
    num_vectors: u64,

    /// Neighbors to return [default: 10, or the config file's value]
    #[arg(short, value_parser = clap::value_parser!(u32).range(1..))]
    k: Option<u32>,

    /// Which vector of the query file to search with
    #[arg(long, default_value_t = 0)]
    query_index: usize,

    /// Shard the scan across all cores
    #[arg(long)]
    parallel: bool,

    /// JSON search configuration; flags given on the command line win
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Print the result set as JSON
    #[arg(long)]
    json: bool,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let mut config = match &args.config {
        Some(path) => SearchConfig::from_json_file(path)?,
        None => SearchConfig::default(),
    };
    if let Some(k) = args.k {
        config = config.with_num_neighbors(k);
    }
    if args.parallel {
        config = config.with_parallel(true);
    }

    let num_vectors = resolve_num_vectors(args.count.as_deref(), args.num_vectors);

    info!("[Step 1] Loading database vectors...");
    info!(
        "Reading first {} vectors from {}",
        num_vectors,
        args.base.display()
    );
    let database = read_fvecs(&args.base, Some(num_vectors as usize))?;
    let dim = match database.first() {
        Some(first) => first.len(),
        None => {
            return Err(
                KnnError::data_loss(format!("no vectors in {}", args.base.display())).into(),
            )
        }
    };
    info!("Loaded {} vectors", database.len());
    info!("Each vector has {} dimensions", dim);

    info!("[Step 2] Loading query vector...");
    let mut queries = read_fvecs(&args.query, Some(args.query_index + 1))?;
    if queries.len() <= args.query_index {
        return Err(KnnError::invalid_argument(format!(
            "query index {} out of range: {} holds {} vectors",
            args.query_index,
            args.query.display(),
            queries.len()
        ))
        .into());
    }
    let query = queries.swap_remove(args.query_index);
    info!("Loaded query vector (dimension: {})", query.len());
    info!("First 5 values: {:?}", &query[..query.len().min(5)]);

    let k = config.num_neighbors;
    info!("[Step 3] Performing brute force search...");
    info!("Finding top {} nearest neighbors", k);

    let searcher = BruteForceSearcher::with_config(DenseDataset::from_vecs(database), config)?;
    let progress = ProgressLogger::new();
    let start = Instant::now();
    let results = searcher.search_with_observer(&query, k as usize, &progress)?;
    info!("Search finished in {:.3?}", start.elapsed());

    let results = SearchResult::from_pairs(results);
    if args.json {
        println!("{}", serde_json::to_string_pretty(&results)?);
        return Ok(());
    }

    println!("Top {} Nearest Neighbors:", k);
    for (rank, neighbor) in results.neighbors.iter().enumerate() {
        println!(
            "Rank {}: Vector #{} (distance: {})",
            rank + 1,
            neighbor.index,
            neighbor.distance
        );
    }

    Ok(())
}

/// The positional count wins over `--num-vectors`; an unusable one is
/// replaced by the default.
fn resolve_num_vectors(count: Option<&str>, flag: u64) -> u64 {
    let Some(count) = count else {
        return flag;
    };
    match count.trim().parse::<u64>() {
        Ok(n) if n > 0 => n,
        _ => {
            warn!(
                "Invalid number of vectors {:?}, using default ({})",
                count, DEFAULT_NUM_VECTORS
            );
            DEFAULT_NUM_VECTORS
        }
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positional_count() {
        let args = Args::parse_from(["knn_search", "1000"]);
        assert_eq!(resolve_num_vectors(args.count.as_deref(), args.num_vectors), 1000);

        let args = Args::parse_from(["knn_search", "-n", "7"]);
        assert_eq!(resolve_num_vectors(args.count.as_deref(), args.num_vectors), 7);

        let args = Args::parse_from(["knn_search"]);
        assert_eq!(resolve_num_vectors(args.count.as_deref(), args.num_vectors), 100);
    }

    #[test]
    fn test_invalid_positional_count_falls_back() {
        for bad in ["0", "-5", "many", ""] {
            assert_eq!(resolve_num_vectors(Some(bad), 42), DEFAULT_NUM_VECTORS);
        }
    }

    #[test]
    fn test_positional_conflicts_with_flag() {
        assert!(Args::try_parse_from(["knn_search", "10", "-n", "20"]).is_err());
    }
}
