// Copyright (c) 2025 - Cowboy AI, Inc.
//! Event Envelope and Codec
//!
//! An envelope pairs a [`BlobEvent`] with the identity and ordering metadata
//! needed to persist and replay it. Persistent backends store one JSON record
//! per envelope:
//!
//! ```text
//! {"id": "b1", "sequence": 2, "eventType": "TAE", "tags": {"env": "prod"}}
//! ```

use serde::{Deserialize, Serialize};

use super::BlobEvent;
use crate::domain::AggregateId;
use crate::errors::StoreResult;

/// Event plus aggregate identity and sequence
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventEnvelope {
    /// Aggregate this event belongs to
    #[serde(rename = "id")]
    pub aggregate_id: AggregateId,

    /// Position in the aggregate stream, starting at 1
    pub sequence: u64,

    /// The domain event, flattened next to the metadata
    #[serde(flatten)]
    pub event: BlobEvent,
}

impl EventEnvelope {
    pub fn new(aggregate_id: impl Into<AggregateId>, sequence: u64, event: BlobEvent) -> Self {
        Self {
            aggregate_id: aggregate_id.into(),
            sequence,
            event,
        }
    }
}

/// Wrap events into envelopes with consecutive sequences starting at `first_sequence`
pub fn wrap(
    aggregate_id: &AggregateId,
    first_sequence: u64,
    events: impl IntoIterator<Item = BlobEvent>,
) -> Vec<EventEnvelope> {
    events
        .into_iter()
        .zip(first_sequence..)
        .map(|(event, sequence)| EventEnvelope::new(aggregate_id, sequence, event))
        .collect()
}

/// Serialize an envelope to its persisted JSON record
pub fn encode(envelope: &EventEnvelope) -> StoreResult<Vec<u8>> {
    Ok(serde_json::to_vec(envelope)?)
}

/// Decode a persisted JSON record
///
/// Unknown `eventType` codes and malformed records fail with
/// [`StoreError::Serialization`](crate::errors::StoreError::Serialization).
pub fn decode(bytes: &[u8]) -> StoreResult<EventEnvelope> {
    Ok(serde_json::from_slice(bytes)?)
}
