// Copyright (c) 2025 - Cowboy AI, Inc.
//! Blob Commands
//!
//! Commands express intent and can be rejected. They are plain data: no
//! store reference, no captured closures. Validation and event generation
//! live in [`handlers`](super::handlers) and are selected by variant.
//!
//! ```text
//! Command → validate(Blob, Command) → generate(Blob, Command) → [EventEnvelope]
//! ```

use crate::domain::{AggregateId, BlobType, Tags};

/// Intent against a single blob
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlobCommand {
    /// Create a new blob
    Create {
        id: AggregateId,
        blob_type: BlobType,
        data: Vec<u8>,
    },

    /// Replace or clear the blob's data
    Update {
        id: AggregateId,
        data: Vec<u8>,
        clear: bool,
    },

    /// Add/update some tags and delete others
    UpdateTags {
        id: AggregateId,
        add_or_update: Tags,
        delete_keys: Vec<String>,
    },

    /// Soft-delete the blob
    Delete { id: AggregateId },

    /// Restore a soft-deleted blob
    Restore { id: AggregateId },
}

impl BlobCommand {
    pub fn create(
        id: impl Into<AggregateId>,
        blob_type: impl Into<BlobType>,
        data: impl Into<Vec<u8>>,
    ) -> Self {
        BlobCommand::Create {
            id: id.into(),
            blob_type: blob_type.into(),
            data: data.into(),
        }
    }

    /// Replace the data, or clear it when `clear` is set
    ///
    /// Supplying non-empty data together with `clear` is rejected at validation.
    pub fn update(id: impl Into<AggregateId>, data: impl Into<Vec<u8>>, clear: bool) -> Self {
        BlobCommand::Update {
            id: id.into(),
            data: data.into(),
            clear,
        }
    }

    pub fn update_tags<K, V>(
        id: impl Into<AggregateId>,
        add_or_update: impl IntoIterator<Item = (K, V)>,
        delete_keys: impl IntoIterator<Item = K>,
    ) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        BlobCommand::UpdateTags {
            id: id.into(),
            add_or_update: add_or_update
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
            delete_keys: delete_keys.into_iter().map(Into::into).collect(),
        }
    }

    pub fn delete(id: impl Into<AggregateId>) -> Self {
        BlobCommand::Delete { id: id.into() }
    }

    pub fn restore(id: impl Into<AggregateId>) -> Self {
        BlobCommand::Restore { id: id.into() }
    }

    /// Target aggregate
    pub fn aggregate_id(&self) -> &AggregateId {
        match self {
            BlobCommand::Create { id, .. }
            | BlobCommand::Update { id, .. }
            | BlobCommand::UpdateTags { id, .. }
            | BlobCommand::Delete { id }
            | BlobCommand::Restore { id } => id,
        }
    }

    /// Stable command type name used in errors and logs
    pub fn command_type(&self) -> &'static str {
        match self {
            BlobCommand::Create { .. } => "CREATE",
            BlobCommand::Update { .. } => "UPDATE",
            BlobCommand::UpdateTags { .. } => "UPDATE_TAGS",
            BlobCommand::Delete { .. } => "DELETE",
            BlobCommand::Restore { .. } => "RESTORE",
        }
    }
}
