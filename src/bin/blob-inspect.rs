// Copyright (c) 2025 - Cowboy AI, Inc.
//! Blob Inspector
//!
//! Opens the configured event store and prints one blob's folded state,
//! content hash and event history as JSON.
//!
//! Run with: cargo run --bin blob-inspect -- <aggregate-id>
//!
//! Store selection follows `BLOB_STORE_BACKEND` and `BLOB_STORE_PATH`.

use anyhow::{bail, Context, Result};
use blob_eventsource::{AggregateId, AggregateRepository, Chunks, OperationContext, StoreConfig};
use serde_json::json;
use tracing::info;

const CHUNK_SIZE: usize = 64 * 1024;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut args = std::env::args().skip(1);
    let Some(raw_id) = args.next() else {
        bail!("usage: blob-inspect <aggregate-id>");
    };
    let id = AggregateId::new(raw_id);

    let config = StoreConfig::from_env().context("Invalid store configuration")?;
    let store = config.open().context("Failed to open event store")?;
    let repository = AggregateRepository::new(store);
    let ctx = OperationContext::background();

    info!(aggregate_id = %id, backend = config.backend.name(), "Inspecting blob");

    let history = repository
        .history(&ctx, &id)
        .with_context(|| format!("Failed to load history of {id}"))?;
    let blob = blob_eventsource::Blob::from_envelopes(&history);
    let chunks = Chunks::from_bytes(&blob.data, CHUNK_SIZE).context("Failed to hash blob data")?;

    let report = json!({
        "blob": blob,
        "status": blob.status(),
        "contentHash": chunks.hash,
        "chunkCount": chunks.len(),
        "history": history,
    });
    println!("{}", serde_json::to_string_pretty(&report)?);

    Ok(())
}
