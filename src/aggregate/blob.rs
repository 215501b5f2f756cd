// Copyright (c) 2025 - Cowboy AI, Inc.
//! Blob Aggregate Fold
//!
//! State is reconstructed by folding envelopes in ascending sequence order:
//!
//! ```text
//! Blob = fold(Envelopes, Blob::default(), apply_envelope)
//! ```
//!
//! Event application never fails: events are facts that already happened,
//! all validation belongs to the command handlers.

use crate::domain::Blob;
use crate::events::{BlobEvent, EventEnvelope};

impl Blob {
    /// Reconstruct state from an ordered envelope list
    ///
    /// An empty list folds to the zero blob.
    pub fn from_envelopes(envelopes: &[EventEnvelope]) -> Self {
        Self::default().fold(envelopes)
    }

    /// Fold further envelopes onto this state
    pub fn fold(self, envelopes: &[EventEnvelope]) -> Self {
        envelopes.iter().fold(self, apply_envelope)
    }
}

/// Apply an event to state (pure function)
///
/// # Invariants
/// - Same event + same state = same result
/// - `Created` ignores prior state entirely
/// - `TagsAdded` and `TagsUpdated` merge identically; they only differ in
///   what they tell an observer of the history
/// - Deleting an absent tag key is a no-op
pub fn apply_event(state: Blob, event: &BlobEvent) -> Blob {
    match event {
        BlobEvent::Created { blob_type, data } => Blob {
            blob_type: blob_type.clone(),
            data: data.clone(),
            ..Blob::default()
        },

        BlobEvent::DataUpdated { data } => Blob {
            data: data.clone(),
            ..state
        },

        BlobEvent::TagsAdded { tags } | BlobEvent::TagsUpdated { tags } => {
            let mut merged = state.tags;
            merged.extend(tags.iter().map(|(k, v)| (k.clone(), v.clone())));
            Blob {
                tags: merged,
                ..state
            }
        }

        BlobEvent::TagsDeleted { keys } => {
            let mut remaining = state.tags;
            for key in keys {
                remaining.remove(key);
            }
            Blob {
                tags: remaining,
                ..state
            }
        }

        BlobEvent::Deleted => Blob {
            deleted: true,
            ..state
        },

        BlobEvent::Restored => Blob {
            deleted: false,
            ..state
        },
    }
}

/// Apply an envelope: the event, then identity and sequence from the metadata
pub fn apply_envelope(state: Blob, envelope: &EventEnvelope) -> Blob {
    Blob {
        id: envelope.aggregate_id.clone(),
        sequence: envelope.sequence,
        ..apply_event(state, &envelope.event)
    }
}
