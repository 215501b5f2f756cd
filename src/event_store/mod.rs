// Copyright (c) 2025 - Cowboy AI, Inc.
//! Event Store Abstraction
//!
//! Storage-agnostic contract for persisting and retrieving blob events, with
//! three interchangeable backends:
//!
//! - [`InMemoryEventStore`] - map of aggregate id to ordered envelopes
//! - [`FileSystemEventStore`] - `<base_dir>/<aggregate_id>/<sequence>` files
//! - [`RedbEventStore`] - one embedded key-value table per aggregate
//!   (feature `kv`)
//!
//! # Event Store Requirements
//!
//! 1. **Append-Only**: envelopes are never updated or deleted
//! 2. **Ordered**: `find` returns ascending sequences whatever the physical order
//! 3. **Optimistic Concurrency**: a batch containing a sequence that already
//!    exists is rejected as a whole, nothing is written
//! 4. **Consistency**: envelopes whose aggregate id differs from the target
//!    stream are rejected
//!
//! # Locking
//!
//! The in-memory and filesystem backends serialize all calls behind a single
//! lock, which caps throughput at one in-flight write across all aggregates.
//! Sharding the lock per aggregate id would lift that ceiling without
//! changing the contract.

use std::collections::BTreeSet;
use std::sync::Arc;

use tracing::warn;

use crate::context::OperationContext;
use crate::domain::AggregateId;
use crate::errors::{StoreError, StoreResult};
use crate::events::EventEnvelope;

pub mod filesystem;
pub mod memory;
#[cfg(feature = "kv")]
pub mod kv;

pub use filesystem::FileSystemEventStore;
pub use memory::InMemoryEventStore;
#[cfg(feature = "kv")]
pub use kv::RedbEventStore;

/// Event Store trait for persisting and retrieving blob events
///
/// All calls block the calling thread for the duration of their I/O.
pub trait EventStore: Send + Sync {
    /// Read all envelopes for an aggregate in ascending sequence order
    ///
    /// # Errors
    ///
    /// - `MissingAggregate` if nothing was ever persisted for `id`
    /// - `Serialization` if a stored record cannot be decoded
    /// - `AggregateMismatch` or `SequenceMismatch` if a stored record does not
    ///   match the stream or sequence it was stored under
    fn find(&self, ctx: &OperationContext, id: &AggregateId) -> StoreResult<Vec<EventEnvelope>>;

    /// Append a batch of envelopes to an aggregate's stream, all or nothing
    ///
    /// An empty batch is a no-op.
    ///
    /// # Errors
    ///
    /// - `ConcurrencyConflict` if any sequence already exists (or repeats in the batch)
    /// - `AggregateMismatch` if an envelope belongs to another aggregate
    fn persist(
        &self,
        ctx: &OperationContext,
        id: &AggregateId,
        envelopes: &[EventEnvelope],
    ) -> StoreResult<()>;
}

impl<S: EventStore + ?Sized> EventStore for Box<S> {
    fn find(&self, ctx: &OperationContext, id: &AggregateId) -> StoreResult<Vec<EventEnvelope>> {
        (**self).find(ctx, id)
    }

    fn persist(
        &self,
        ctx: &OperationContext,
        id: &AggregateId,
        envelopes: &[EventEnvelope],
    ) -> StoreResult<()> {
        (**self).persist(ctx, id, envelopes)
    }
}

impl<S: EventStore + ?Sized> EventStore for Arc<S> {
    fn find(&self, ctx: &OperationContext, id: &AggregateId) -> StoreResult<Vec<EventEnvelope>> {
        (**self).find(ctx, id)
    }

    fn persist(
        &self,
        ctx: &OperationContext,
        id: &AggregateId,
        envelopes: &[EventEnvelope],
    ) -> StoreResult<()> {
        (**self).persist(ctx, id, envelopes)
    }
}

/// Batch checks that need no storage access
///
/// Every envelope must target `id`, and no sequence may repeat within the
/// batch. Backends still have to check the batch against what is stored.
pub(crate) fn check_batch(id: &AggregateId, envelopes: &[EventEnvelope]) -> StoreResult<()> {
    let mut sequences = BTreeSet::new();
    for envelope in envelopes {
        if &envelope.aggregate_id != id {
            warn!(aggregate_id = %id, found = %envelope.aggregate_id, sequence = envelope.sequence, "Rejected envelope for another aggregate");
            return Err(StoreError::AggregateMismatch {
                expected: id.clone(),
                found: envelope.aggregate_id.clone(),
                sequence: envelope.sequence,
            });
        }
        if !sequences.insert(envelope.sequence) {
            return Err(StoreError::ConcurrencyConflict {
                id: id.clone(),
                sequence: envelope.sequence,
            });
        }
    }
    Ok(())
}

/// Check a record read back from storage against where it was stored
///
/// `id` is the stream that was read and `key` the sequence the record was
/// stored under.
pub(crate) fn check_record(
    id: &AggregateId,
    key: u64,
    envelope: EventEnvelope,
) -> StoreResult<EventEnvelope> {
    if &envelope.aggregate_id != id {
        warn!(aggregate_id = %id, found = %envelope.aggregate_id, sequence = key, "Stored record belongs to another aggregate");
        return Err(StoreError::AggregateMismatch {
            expected: id.clone(),
            found: envelope.aggregate_id,
            sequence: key,
        });
    }
    if envelope.sequence != key {
        warn!(aggregate_id = %id, sequence = key, found = envelope.sequence, "Stored record has a different sequence");
        return Err(StoreError::SequenceMismatch {
            id: id.clone(),
            expected: key,
            found: envelope.sequence,
        });
    }
    Ok(envelope)
}
