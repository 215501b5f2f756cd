// Copyright (c) 2025 - Cowboy AI, Inc.
//! Embedded Key-Value Event Store
//!
//! Backed by a single [redb] database file. Each aggregate gets its own
//! table named `blob/<aggregate_id>`, keyed by sequence number with the
//! JSON-encoded envelope as value. Keys are ordered, so iteration already
//! yields ascending sequences.
//!
//! A batch is written inside one write transaction: the duplicate check and
//! every insert either commit together or the transaction is aborted.

use std::path::Path;

use redb::{Database, ReadableTable, TableDefinition, TableError, WriteTransaction};
use tracing::{debug, warn};

use super::{check_batch, check_record, EventStore};
use crate::context::OperationContext;
use crate::domain::AggregateId;
use crate::errors::{StoreError, StoreResult};
use crate::events::{decode, encode, EventEnvelope};

const TABLE_PREFIX: &str = "blob/";

fn table_name(id: &AggregateId) -> String {
    format!("{TABLE_PREFIX}{id}")
}

fn db_error(err: impl Into<redb::Error>) -> StoreError {
    StoreError::Database(err.into().to_string())
}

/// Event store persisting to an embedded redb database
pub struct RedbEventStore {
    db: Database,
}

impl std::fmt::Debug for RedbEventStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedbEventStore").finish_non_exhaustive()
    }
}

impl RedbEventStore {
    /// Open the database at `path`, creating it if needed
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let db = Database::create(path).map_err(db_error)?;
        debug!(path = %path.display(), "Opened redb event store");
        Ok(Self { db })
    }

    fn append(
        ctx: &OperationContext,
        txn: &WriteTransaction,
        id: &AggregateId,
        envelopes: &[EventEnvelope],
    ) -> StoreResult<()> {
        let name = table_name(id);
        let definition = TableDefinition::<u64, &[u8]>::new(&name);
        let mut table = txn.open_table(definition).map_err(db_error)?;

        for envelope in envelopes {
            ctx.check()?;
            if table.get(envelope.sequence).map_err(db_error)?.is_some() {
                warn!(aggregate_id = %id, sequence = envelope.sequence, "Rejected batch with existing sequence");
                return Err(StoreError::ConcurrencyConflict {
                    id: id.clone(),
                    sequence: envelope.sequence,
                });
            }
            let bytes = encode(envelope)?;
            table
                .insert(envelope.sequence, bytes.as_slice())
                .map_err(db_error)?;
        }
        Ok(())
    }
}

impl EventStore for RedbEventStore {
    fn find(&self, ctx: &OperationContext, id: &AggregateId) -> StoreResult<Vec<EventEnvelope>> {
        ctx.check()?;
        let name = table_name(id);
        let definition = TableDefinition::<u64, &[u8]>::new(&name);

        let txn = self.db.begin_read().map_err(db_error)?;
        let table = match txn.open_table(definition) {
            Ok(table) => table,
            Err(TableError::TableDoesNotExist(_)) => {
                return Err(StoreError::MissingAggregate(id.clone()))
            }
            Err(e) => return Err(db_error(e)),
        };

        let mut envelopes = Vec::new();
        for entry in table.iter().map_err(db_error)? {
            let (key, value) = entry.map_err(db_error)?;
            let envelope = decode(value.value())?;
            envelopes.push(check_record(id, key.value(), envelope)?);
        }

        if envelopes.is_empty() {
            return Err(StoreError::MissingAggregate(id.clone()));
        }

        debug!(aggregate_id = %id, count = envelopes.len(), "Loaded events from redb");
        Ok(envelopes)
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

        let txn = self.db.begin_write().map_err(db_error)?;
        match Self::append(ctx, &txn, id, envelopes) {
            Ok(()) => {
                ctx.check()?;
                txn.commit().map_err(db_error)?;
            }
            Err(err) => {
                if let Err(abort) = txn.abort() {
                    warn!(aggregate_id = %id, error = %abort, "Failed to abort write transaction");
                }
                return Err(err);
            }
        }

        debug!(aggregate_id = %id, count = envelopes.len(), "Persisted events to redb");
        Ok(())
    }
}
