use anyhow::Result;
use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;

use iterscan::cluster::MetricKind;
use iterscan::storage::{self, RunKind};
use iterscan::{data, ClusteringDriver, Config, SeededClusteringDriver};

#[derive(Parser, Debug)]
#[clap(
    name = "iterscan",
    about = "Discover dense vertex clusters in a weighted graph by iterative scan"
)]
struct Cli {
    /// Edge list (`source target [weight]` per line) or Parquet edge table
    #[clap(long)]
    input: String,

    /// Output directory for results
    #[clap(long, default_value = "cluster_results")]
    output_dir: String,

    /// Density formula to maximize
    #[clap(long, value_enum, default_value_t = MetricKind::AverageDegree)]
    metric: MetricKind,

    /// Consecutive duplicate discoveries before random restarts stop
    #[clap(long, default_value = "5")]
    failures: usize,

    /// Seed file (one seed set per line); skips random-restart discovery
    #[clap(long)]
    seeds: Option<String>,

    /// Fixed seed for random edge sampling
    #[clap(long)]
    rng_seed: Option<u64>,

    /// Optimize explicit seeds concurrently
    #[clap(long)]
    parallel: bool,

    /// Number of worker threads (0 = use all available cores)
    #[clap(long, default_value = "0")]
    threads: usize,

    /// Verbose logging
    #[clap(long, short)]
    verbose: bool,
}

fn main() -> Result<()> {
    // Parse command line arguments
    let args = Cli::parse();

    // Configure logging
    let log_level = if args.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    env_logger::Builder::new()
        .filter_level(log_level)
        .format_timestamp_millis()
        .parse_default_env()
        .init();

    let config = Config::new(
        args.metric,
        args.failures,
        args.rng_seed,
        args.threads,
        args.parallel,
    );
    config.validate()?;

    let num_threads = config.worker_threads();
    log::info!("Using {} worker threads", num_threads);
    rayon::ThreadPoolBuilder::new()
        .num_threads(num_threads)
        .build_global()?;

    log::info!("Starting iterative scan clustering with {} density", config.metric);
    log::info!("Input: {}", args.input);
    log::info!("Output: {}", args.output_dir);

    // 1. Load graph
    let graph = data::load_graph(&args.input)?;
    log::info!(
        "Loaded graph with {} nodes and {} edges ({} bytes)",
        graph.node_count,
        graph.targets.len() / 2,
        graph.memory_usage()
    );

    // 2. Cluster
    let (clusters, run) = match &args.seeds {
        Some(path) => {
            let seeds = data::seeds::load_seed_sets(path, &graph)?;
            let driver = SeededClusteringDriver::new(config.metric);
            let clusters = if config.parallel {
                driver.run_parallel(&graph, &graph, &seeds)?
            } else {
                driver.run(&graph, &graph, seeds.iter().map(|s| s.iter().copied()))?
            };
            (clusters, RunKind::Seeded { seeds: seeds.len() })
        }
        None => {
            let rng = match config.rng_seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_entropy(),
            };
            let driver = ClusteringDriver::new(config.metric)
                .with_failure_threshold(config.failure_threshold);
            let found = driver.run(&graph, &graph, rng)?;
            let run = RunKind::Discovery {
                restarts: found.restarts,
                duplicates: found.duplicates,
            };
            (found.clusters, run)
        }
    };

    log::info!("Found {} clusters", clusters.len());

    // 3. Save results
    storage::save_results(&clusters, &graph, &config, run, &args.output_dir)?;

    log::info!("Clustering complete. Results saved to {}", args.output_dir);

    Ok(())
}
