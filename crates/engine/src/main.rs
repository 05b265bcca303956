//! Simple test harness for the recommendation engine.
//!
//! Builds the sliding-window fixture graph and logs the recommendations for
//! one user with both dislike representations side by side.

use std::env;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::EnvFilter;

use engine::{ItemRecommendation, RecommendationEngine};
use graph_store::fixtures::chain_graph;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,engine=debug,sources=debug")),
        )
        .init();

    let username = env::args().nth(1).unwrap_or_else(|| "user10".to_string());

    info!("Building fixture graph...");
    let store = chain_graph(100, 105).context("Failed to build fixture graph")?;
    let engine = RecommendationEngine::new(Arc::new(store));

    // Both variants are CPU-bound; run them on the blocking pool
    let (by_edges, by_blob) = tokio::join!(
        tokio::task::spawn_blocking({
            let engine = engine.clone();
            let username = username.clone();
            move || engine.recommend(&username)
        }),
        tokio::task::spawn_blocking({
            let engine = engine.clone();
            let username = username.clone();
            move || engine.recommend_compact(&username)
        }),
    );
    let by_edges = by_edges.context("Edge variant panicked")??;
    let by_blob = by_blob.context("Blob variant panicked")??;

    log_recommendations("DISLIKES edges", &username, &by_edges);
    log_recommendations("dislikes blob", &username, &by_blob);

    if by_edges != by_blob {
        anyhow::bail!("Variants disagree for {}", username);
    }
    Ok(())
}

fn log_recommendations(variant: &str, username: &str, recommendations: &[ItemRecommendation]) {
    info!(
        "{} recommendations for {} ({}):",
        recommendations.len(),
        username,
        variant
    );
    for (i, rec) in recommendations.iter().enumerate() {
        info!(
            "{}. {} - Score: {}",
            i + 1,
            rec.name().unwrap_or("<unnamed>"),
            rec.score
        );
    }
}
