// Copyright (c) 2025 - Cowboy AI, Inc.
//! Aggregate Repository
//!
//! Orchestrates the command lifecycle against an [`EventStore`]:
//!
//! ```text
//! process(cmd) → store.find → fold → validate → generate → store.persist → fold
//! ```
//!
//! The repository holds no state of its own. After a successful persist the
//! new envelopes are folded onto the state that was validated, so the store
//! is read once per command.

use tracing::{debug, info};

use crate::aggregate::{handle, BlobCommand};
use crate::context::OperationContext;
use crate::domain::{AggregateId, Blob};
use crate::errors::{BlobError, BlobResult, StoreError};
use crate::event_store::EventStore;
use crate::events::EventEnvelope;

const FIND: &str = "FIND";

/// Repository for blob aggregates over any event store
#[derive(Debug, Clone)]
pub struct AggregateRepository<S> {
    store: S,
}

impl<S: EventStore> AggregateRepository<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Load and fold the blob's history
    ///
    /// # Errors
    ///
    /// A store failure, including `MissingAggregate` for an unknown id,
    /// is wrapped with operation `find`.
    pub fn find(&self, ctx: &OperationContext, id: &AggregateId) -> BlobResult<Blob> {
        let envelopes = self.load(ctx, id, FIND)?;
        Ok(Blob::from_envelopes(&envelopes))
    }

    /// Ordered envelopes of the blob's history
    pub fn history(&self, ctx: &OperationContext, id: &AggregateId) -> BlobResult<Vec<EventEnvelope>> {
        self.load(ctx, id, FIND)
    }

    /// Validate a command against the current state, persist its events and
    /// return the resulting state
    ///
    /// An unknown aggregate is treated as the empty blob, so only Create can
    /// pass validation against it.
    ///
    /// # Errors
    ///
    /// - `Validation` if the command is illegal; nothing is persisted
    /// - `Store` if loading or persisting fails; durable state is unchanged
    pub fn process(&self, ctx: &OperationContext, command: &BlobCommand) -> BlobResult<Blob> {
        let id = command.aggregate_id();
        let command_type = command.command_type();

        let state = match self.store.find(ctx, id) {
            Ok(envelopes) => Blob::from_envelopes(&envelopes),
            Err(StoreError::MissingAggregate(_)) => Blob::default(),
            Err(source) => return Err(store_error("find", command_type, id, source)),
        };

        let envelopes = handle(&state, command).map_err(|source| {
            debug!(aggregate_id = %id, command = command_type, error = %source, "Command rejected");
            BlobError::Validation {
                command: command_type,
                source,
            }
        })?;

        if envelopes.is_empty() {
            debug!(aggregate_id = %id, command = command_type, "Command produced no events");
            return Ok(state);
        }

        self.store
            .persist(ctx, id, &envelopes)
            .map_err(|source| store_error("persist", command_type, id, source))?;

        let state = state.fold(&envelopes);
        info!(
            aggregate_id = %id,
            command = command_type,
            events = envelopes.len(),
            sequence = state.sequence,
            "Command processed"
        );
        Ok(state)
    }

    fn load(
        &self,
        ctx: &OperationContext,
        id: &AggregateId,
        command: &'static str,
    ) -> BlobResult<Vec<EventEnvelope>> {
        self.store
            .find(ctx, id)
            .map_err(|source| store_error("find", command, id, source))
    }
}

fn store_error(
    operation: &'static str,
    command: &'static str,
    id: &AggregateId,
    source: StoreError,
) -> BlobError {
    BlobError::Store {
        operation,
        command,
        id: id.clone(),
        source,
    }
}
