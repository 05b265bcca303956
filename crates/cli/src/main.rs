use anyhow::{anyhow, Context, Result};
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use engine::{ItemRecommendation, RecommendationEngine};
use graph_store::fixtures::chain_graph;
use graph_store::{EdgeKind, GraphStore, PropertyValue, Traversal, DISLIKES_BLOB, NAME};
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Semaphore;
use tracing::debug;

/// graph-recs - Graph Collaborative Filtering Recommender
#[derive(Parser)]
#[command(name = "graph-recs")]
#[command(about = "Item recommendations from a user-item interaction graph", long_about = None)]
struct Cli {
    #[command(flatten)]
    source: GraphSource,

    #[command(subcommand)]
    command: Commands,
}

/// Where the graph comes from
#[derive(Args)]
struct GraphSource {
    /// Directory holding users.dat, items.dat and edges.dat
    #[arg(short, long)]
    data_dir: Option<PathBuf>,

    /// Users in the generated chain fixture (when no data dir is given)
    #[arg(long, default_value = "100")]
    fixture_users: usize,

    /// Items in the generated chain fixture
    #[arg(long, default_value = "105")]
    fixture_items: usize,
}

#[derive(Subcommand)]
enum Commands {
    /// Get item recommendations for a user
    Recommend {
        /// Username to get recommendations for
        #[arg(long)]
        username: String,

        /// Read dislikes from the compact blob instead of DISLIKES edges
        #[arg(long)]
        compact: bool,

        /// Print the recommendations as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show a user's interaction profile
    User {
        /// Username to display
        #[arg(long)]
        username: String,
    },

    /// Report the encoded size of a random integer set
    CodecSize {
        /// Number of values to draw
        #[arg(long, default_value = "1000")]
        count: usize,

        /// Values are drawn from [0, max)
        #[arg(long, default_value = "100000000")]
        max: u32,

        /// Seed for reproducible draws
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Run benchmark to test performance
    Benchmark {
        /// Number of requests to make
        #[arg(long, default_value = "100")]
        requests: usize,

        /// Number of concurrent requests
        #[arg(long, default_value = "10")]
        concurrent: usize,

        /// Read dislikes from the compact blob
        #[arg(long)]
        compact: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    // The codec report needs no graph
    if let Commands::CodecSize { count, max, seed } = cli.command {
        return handle_codec_size(count, max, seed);
    }

    let store = Arc::new(load_graph(&cli.source)?);

    match cli.command {
        Commands::Recommend {
            username,
            compact,
            json,
        } => handle_recommend(store, &username, compact, json)?,
        Commands::User { username } => handle_user(&store, &username)?,
        Commands::Benchmark {
            requests,
            concurrent,
            compact,
        } => handle_benchmark(store, requests, concurrent, compact).await?,
        Commands::CodecSize { .. } => {}
    }

    Ok(())
}

fn load_graph(source: &GraphSource) -> Result<GraphStore> {
    let start = Instant::now();
    let store = match &source.data_dir {
        Some(dir) => {
            println!("Loading graph from {}...", dir.display());
            GraphStore::load_from_dir(dir).context("Failed to load graph data")?
        }
        None => {
            println!(
                "Building chain fixture ({} users, {} items)...",
                source.fixture_users, source.fixture_items
            );
            chain_graph(source.fixture_users, source.fixture_items)
                .context("Failed to build fixture graph")?
        }
    };

    let (users, items, edges) = store.counts();
    println!(
        "{} Loaded {} users, {} items, {} edges in {:?}",
        "✓".green(),
        users,
        items,
        edges,
        start.elapsed()
    );
    Ok(store)
}

/// Handle the 'recommend' command
fn handle_recommend(store: Arc<GraphStore>, username: &str, compact: bool, json: bool) -> Result<()> {
    let engine = RecommendationEngine::new(store);

    let recommendations = if compact {
        engine.recommend_compact(username)?
    } else {
        engine.recommend(username)?
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&recommendations)?);
    } else if recommendations.is_empty() {
        println!("No recommendations for '{}'", username);
    } else {
        print_recommendations(username, &recommendations);
    }
    Ok(())
}

/// Handle the 'user' command
fn handle_user(store: &GraphStore, username: &str) -> Result<()> {
    let user = store
        .find_user_id(username)
        .ok_or_else(|| anyhow!("User {} not found", username))?;

    let count = |kind: EdgeKind| -> Result<usize> { Ok(store.outgoing(user, &[kind])?.len()) };

    println!("{}", format!("User: {} (node {})", username, user).bold().blue());
    println!("{}Liked: {}", "• ".green(), count(EdgeKind::Likes)?);
    println!("{}Purchased: {}", "• ".green(), count(EdgeKind::Purchased)?);
    println!("{}Disliked: {}", "• ".green(), count(EdgeKind::Dislikes)?);

    match store.property(user, DISLIKES_BLOB)? {
        Some(PropertyValue::Bytes(blob)) => {
            let decoded = intset::decode(&blob)
                .map(|set| set.len().to_string())
                .unwrap_or_else(|e| format!("corrupt: {e}").red().to_string());
            println!(
                "{}Dislikes blob: {} bytes ({} ids)",
                "• ".cyan(),
                blob.len(),
                decoded
            );
        }
        Some(other) => println!("{}Dislikes blob: not a byte blob ({:?})", "• ".cyan(), other),
        None => println!("{}Dislikes blob: none", "• ".cyan()),
    }

    println!("Recent purchases:");
    for (_, item) in store.outgoing(user, &[EdgeKind::Purchased])?.iter().take(5) {
        let name = store.property(*item, NAME)?;
        let name = name.as_ref().and_then(PropertyValue::as_text).unwrap_or("<unnamed>");
        println!("  - {} (node {})", name, item);
    }
    Ok(())
}

/// Handle the 'codec-size' command
fn handle_codec_size(count: usize, max: u32, seed: Option<u64>) -> Result<()> {
    if max == 0 {
        return Err(anyhow!("--max must be greater than zero"));
    }
    let seed = seed.unwrap_or_else(rand::random);
    let mut rng = StdRng::seed_from_u64(seed);

    let set: intset::CompactIntSet = (0..count).map(|_| rng.random_range(0..max)).collect();
    let bytes = set.to_bytes();

    // Sanity check: the blob must read back as the same set
    let decoded = intset::decode(&bytes).context("Encoded set failed to decode")?;
    if decoded != set {
        return Err(anyhow!("Round trip changed the set"));
    }

    println!("{}", format!("Codec size (seed {}):", seed).bold().blue());
    println!("{}Draws: {} from [0, {})", "• ".green(), count, max);
    println!("{}Distinct values: {}", "• ".green(), set.len());
    println!("{}Buckets: {}", "• ".green(), set.bucket_count());
    println!("{}Encoded size: {} bytes", "• ".cyan(), bytes.len());
    if !set.is_empty() {
        println!(
            "{}Bytes per value: {:.2}",
            "• ".cyan(),
            bytes.len() as f64 / set.len() as f64
        );
    }
    Ok(())
}

/// Handle the 'benchmark' command
async fn handle_benchmark(
    store: Arc<GraphStore>,
    requests: usize,
    concurrent: usize,
    compact: bool,
) -> Result<()> {
    if requests == 0 {
        return Err(anyhow!("--requests must be greater than zero"));
    }
    let usernames: Vec<String> = store.usernames().map(str::to_string).collect();
    let engine = RecommendationEngine::new(store);

    // Pick the users up front
    let mut rng = rand::rng();
    let picks: Vec<String> = (0..requests)
        .filter_map(|_| usernames.choose(&mut rng).cloned())
        .collect();
    if picks.is_empty() {
        return Err(anyhow!("Graph has no users to benchmark"));
    }

    let permits = Arc::new(Semaphore::new(concurrent.max(1)));
    let wall_clock = Instant::now();

    let mut handles = vec![];
    for username in picks {
        let engine = engine.clone();
        let permit = permits.clone().acquire_owned().await?;
        // Recommendation is CPU-bound; keep it off the async workers
        let handle = tokio::task::spawn_blocking(move || {
            let _permit = permit;
            let start = Instant::now();
            let recommendations = if compact {
                engine.recommend_compact(&username)?
            } else {
                engine.recommend(&username)?
            };
            debug!("{} -> {} items", username, recommendations.len());
            Ok::<_, anyhow::Error>(start.elapsed())
        });
        handles.push(handle);
    }

    let mut timings = vec![];
    for handle in handles {
        let elapsed = handle.await??;
        timings.push(elapsed);
    }
    let wall_time = wall_clock.elapsed();

    let total_time: Duration = timings.iter().sum();
    let avg_latency = total_time / (timings.len() as u32);
    timings.sort();
    let percentile = |p: f64| timings[((timings.len() - 1) as f64 * p) as usize];
    let throughput = timings.len() as f64 / wall_time.as_secs_f64();

    println!(
        "{}",
        format!(
            "Benchmark results ({} dislikes):",
            if compact { "blob" } else { "edge" }
        )
        .bold()
        .blue()
    );
    println!("Total time: {:?}", wall_time);
    println!("Average latency: {:?}", avg_latency);
    println!("P50 latency: {:?}", percentile(0.50));
    println!("P95 latency: {:?}", percentile(0.95));
    println!("P99 latency: {:?}", percentile(0.99));
    println!("Throughput: {:.2} requests/second", throughput);

    Ok(())
}

/// Helper function to format and print recommendations
fn print_recommendations(username: &str, recommendations: &[ItemRecommendation]) {
    println!("{}", format!("Recommendations for {}:", username).bold().blue());
    for (i, rec) in recommendations.iter().enumerate() {
        let extra = rec
            .attributes
            .iter()
            .filter(|(key, _)| key.as_str() != NAME)
            .map(|(key, value)| match value {
                PropertyValue::Text(text) => format!("{key}={text}"),
                PropertyValue::Int(n) => format!("{key}={n}"),
                PropertyValue::Bytes(bytes) => format!("{key}=<{} bytes>", bytes.len()),
            })
            .collect::<Vec<_>>()
            .join(", ");
        println!(
            "{}. {} [{}] - Score: {}",
            (i + 1).to_string().green(),
            rec.name().unwrap_or("<unnamed>"),
            extra,
            rec.score
        );
    }
}
