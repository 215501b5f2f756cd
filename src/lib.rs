// Copyright (c) 2025 - Cowboy AI, Inc.
//! Event-sourced persistence for blobs
//!
//! A blob is a named binary value with a content type and a key/value tag
//! map. Its state is never stored directly: every change is an immutable
//! event appended to the blob's stream, and the current state is the fold of
//! that stream.
//!
//! - [`aggregate`] - pure fold and command handlers
//! - [`event_store`] - storage contract with memory, filesystem and redb backends
//! - [`repository`] - load, validate, persist and refold in one call
//! - [`config`] - backend selection from the environment
//! - [`chunks`] - SHA-256 content chunking of payloads

pub mod aggregate;
pub mod chunks;
pub mod config;
pub mod context;
pub mod domain;
pub mod errors;
pub mod event_store;
pub mod events;
pub mod repository;

// Re-export commonly used types
pub use aggregate::{BlobCommand, CommandError};
pub use chunks::{Chunk, Chunks};
pub use config::{ConfigError, StoreBackend, StoreConfig};
pub use context::OperationContext;
pub use domain::{AggregateId, Blob, BlobStatus, BlobType, Tags};
pub use errors::{BlobError, BlobResult, StoreError, StoreResult};
pub use event_store::{EventStore, FileSystemEventStore, InMemoryEventStore};
#[cfg(feature = "kv")]
pub use event_store::RedbEventStore;
pub use events::{BlobEvent, EventEnvelope};
pub use repository::AggregateRepository;
