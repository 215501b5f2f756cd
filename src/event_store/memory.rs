// Copyright (c) 2025 - Cowboy AI, Inc.
//! In-Memory Event Store
//!
//! Keeps each aggregate's envelopes in a map keyed by sequence, so `find`
//! is ordered and the duplicate check is a key lookup. Suited to tests and
//! local development; nothing survives the process.

use std::collections::{BTreeMap, HashMap};

use parking_lot::Mutex;
use tracing::{debug, warn};

use super::{check_batch, EventStore};
use crate::context::OperationContext;
use crate::domain::AggregateId;
use crate::errors::{StoreError, StoreResult};
use crate::events::EventEnvelope;

type Stream = BTreeMap<u64, EventEnvelope>;

/// Event store backed by a mutex-guarded map
#[derive(Debug, Default)]
pub struct InMemoryEventStore {
    streams: Mutex<HashMap<AggregateId, Stream>>,
}

impl InMemoryEventStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of aggregates with at least one event
    pub fn aggregate_count(&self) -> usize {
        self.streams.lock().len()
    }
}

impl EventStore for InMemoryEventStore {
    fn find(&self, ctx: &OperationContext, id: &AggregateId) -> StoreResult<Vec<EventEnvelope>> {
        ctx.check()?;
        let streams = self.streams.lock();

        let stream = streams
            .get(id)
            .ok_or_else(|| StoreError::MissingAggregate(id.clone()))?;

        debug!(aggregate_id = %id, count = stream.len(), "Loaded events from memory");
        Ok(stream.values().cloned().collect())
    }

    fn persist(
        &self,
        ctx: &OperationContext,
        id: &AggregateId,
        envelopes: &[EventEnvelope],
    ) -> StoreResult<()> {
        ctx.check()?;
        check_batch(id, envelopes)?;
        if envelopes.is_empty() {
            return Ok(());
        }

        let mut streams = self.streams.lock();

        if let Some(stream) = streams.get(id) {
            if let Some(existing) = envelopes.iter().find(|e| stream.contains_key(&e.sequence)) {
                warn!(aggregate_id = %id, sequence = existing.sequence, "Rejected batch with existing sequence");
                return Err(StoreError::ConcurrencyConflict {
                    id: id.clone(),
                    sequence: existing.sequence,
                });
            }
        }

        let stream = streams.entry(id.clone()).or_default();
        for envelope in envelopes {
            stream.insert(envelope.sequence, envelope.clone());
        }

        debug!(aggregate_id = %id, count = envelopes.len(), "Persisted events to memory");
        Ok(())
    }
}
