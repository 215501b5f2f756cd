// Copyright (c) 2025 - Cowboy AI, Inc.
//! Error types for blob event sourcing
//!
//! - [`StoreError`] - failures raised by an [`EventStore`](crate::event_store::EventStore)
//! - [`BlobError`] - failures surfaced by the
//!   [`AggregateRepository`](crate::repository::AggregateRepository), carrying
//!   the command type and aggregate id of the failed operation
//!
//! Command validation failures are [`CommandError`] values produced by the
//! pure handlers in [`crate::aggregate`].

use thiserror::Error;

use crate::aggregate::CommandError;
use crate::domain::AggregateId;

/// Errors that can occur in event store operations
#[derive(Debug, Error)]
pub enum StoreError {
    /// No events are stored for the aggregate
    #[error("no events found for aggregate {0}")]
    MissingAggregate(AggregateId),

    /// An envelope with this sequence already exists for the aggregate
    #[error("concurrency conflict: event {sequence} already exists for aggregate {id}")]
    ConcurrencyConflict { id: AggregateId, sequence: u64 },

    /// An envelope in the batch belongs to a different aggregate
    #[error("cannot persist event {sequence} of aggregate {found} into stream {expected}")]
    AggregateMismatch {
        expected: AggregateId,
        found: AggregateId,
        sequence: u64,
    },

    /// A stored record sits under a sequence key other than its own
    #[error("record stored as event {expected} of aggregate {id} claims sequence {found}")]
    SequenceMismatch { id: AggregateId, expected: u64, found: u64 },

    /// The aggregate id cannot be mapped onto the storage namespace
    #[error("invalid aggregate id for storage: {0:?}")]
    InvalidAggregateId(String),

    /// Malformed or unrecognized persisted record
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Underlying filesystem failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Embedded database failure
    #[error("database error: {0}")]
    Database(String),

    /// The operation context was cancelled
    #[error("operation cancelled")]
    Cancelled,

    /// The operation context deadline passed
    #[error("operation deadline exceeded")]
    DeadlineExceeded,
}

impl StoreError {
    pub fn is_missing_aggregate(&self) -> bool {
        matches!(self, StoreError::MissingAggregate(_))
    }

    pub fn is_concurrency_conflict(&self) -> bool {
        matches!(self, StoreError::ConcurrencyConflict { .. })
    }
}

/// Result type for event store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors returned by the aggregate repository
#[derive(Debug, Error)]
pub enum BlobError {
    /// The command is illegal against the current blob state
    #[error("cannot process {command} command: {source}")]
    Validation {
        command: &'static str,
        #[source]
        source: CommandError,
    },

    /// The event store failed while serving the command
    #[error("{command} on aggregate {id} failed during {operation}: {source}")]
    Store {
        operation: &'static str,
        command: &'static str,
        id: AggregateId,
        #[source]
        source: StoreError,
    },
}

impl BlobError {
    pub fn is_validation(&self) -> bool {
        matches!(self, BlobError::Validation { .. })
    }

    pub fn is_missing_aggregate(&self) -> bool {
        matches!(self, BlobError::Store { source, .. } if source.is_missing_aggregate())
    }

    pub fn is_concurrency_conflict(&self) -> bool {
        matches!(self, BlobError::Store { source, .. } if source.is_concurrency_conflict())
    }

    /// Validation failure, if this is one
    pub fn command_error(&self) -> Option<&CommandError> {
        match self {
            BlobError::Validation { source, .. } => Some(source),
            BlobError::Store { .. } => None,
        }
    }
}

/// Result type for repository operations
pub type BlobResult<T> = Result<T, BlobError>;
