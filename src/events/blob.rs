// Copyright (c) 2025 - Cowboy AI, Inc.
//! Blob Domain Events
//!
//! All state changes to a blob are represented as immutable events. Each
//! variant carries only the fields it changes; identity and ordering live on
//! the [`EventEnvelope`](super::EventEnvelope).
//!
//! # Wire Discriminants
//!
//! The `eventType` tag is a stable short code and part of the on-disk
//! contract:
//!
//! | Variant       | Code  | Payload            |
//! |---------------|-------|--------------------|
//! | `Created`     | `CE`  | `blobType`, `data` |
//! | `DataUpdated` | `DUE` | `data`             |
//! | `TagsAdded`   | `TAE` | `tags`             |
//! | `TagsUpdated` | `TUE` | `tags`             |
//! | `TagsDeleted` | `TDE` | `keys`             |
//! | `Deleted`     | `DE`  | (none)             |
//! | `Restored`    | `RE`  | (none)             |
//!
//! `data` is written as a standard base64 string.

use serde::{Deserialize, Serialize};

use crate::domain::{BlobType, Tags};

/// Blob Domain Events
///
/// Closed variant set; folding is an exhaustive match in
/// [`apply_event`](crate::aggregate::apply_event).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "eventType")]
pub enum BlobEvent {
    /// Blob was created with its type and initial data
    #[serde(rename = "CE")]
    Created {
        #[serde(rename = "blobType")]
        blob_type: BlobType,
        #[serde(default, with = "super::payload")]
        data: Vec<u8>,
    },

    /// Data was replaced; an empty payload means the data was cleared
    #[serde(rename = "DUE")]
    DataUpdated {
        #[serde(default, with = "super::payload")]
        data: Vec<u8>,
    },

    /// Tags that were not present before
    #[serde(rename = "TAE")]
    TagsAdded { tags: Tags },

    /// Tags whose value changed
    #[serde(rename = "TUE")]
    TagsUpdated { tags: Tags },

    /// Tag keys that were removed
    #[serde(rename = "TDE")]
    TagsDeleted { keys: Vec<String> },

    /// Blob was soft-deleted
    #[serde(rename = "DE")]
    Deleted,

    /// Soft-deleted blob was restored
    #[serde(rename = "RE")]
    Restored,
}

impl BlobEvent {
    /// Every discriminant code, in declaration order
    pub const CODES: [&'static str; 7] = ["CE", "DUE", "TAE", "TUE", "TDE", "DE", "RE"];

    /// Short discriminant code written as `eventType`
    pub fn code(&self) -> &'static str {
        match self {
            BlobEvent::Created { .. } => "CE",
            BlobEvent::DataUpdated { .. } => "DUE",
            BlobEvent::TagsAdded { .. } => "TAE",
            BlobEvent::TagsUpdated { .. } => "TUE",
            BlobEvent::TagsDeleted { .. } => "TDE",
            BlobEvent::Deleted => "DE",
            BlobEvent::Restored => "RE",
        }
    }
}
