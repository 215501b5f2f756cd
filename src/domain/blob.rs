// Copyright (c) 2025 - Cowboy AI, Inc.
//! Blob Value Objects and Aggregate State
//!
//! The `Blob` is never mutated directly. It is the result of folding an
//! aggregate's ordered event history (see [`crate::aggregate`]).

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Tag map carried by a blob
///
/// Keys are unique; a `BTreeMap` keeps iteration (and therefore event
/// generation and serialization) deterministic.
pub type Tags = BTreeMap<String, String>;

/// Opaque identifier naming one blob's event stream
///
/// The empty identifier is reserved for "aggregate does not exist" and is
/// rejected by every command.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AggregateId(String);

impl AggregateId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for AggregateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for AggregateId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for AggregateId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&AggregateId> for AggregateId {
    fn from(id: &AggregateId) -> Self {
        id.clone()
    }
}

/// Content-type tag of a blob (e.g. `text/plain`)
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BlobType(String);

impl BlobType {
    pub fn new(blob_type: impl Into<String>) -> Self {
        Self(blob_type.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for BlobType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for BlobType {
    fn from(blob_type: &str) -> Self {
        Self::new(blob_type)
    }
}

impl From<String> for BlobType {
    fn from(blob_type: String) -> Self {
        Self(blob_type)
    }
}

/// Lifecycle phase of a blob, derived from its folded state
///
/// ```text
/// Nonexistent --Create--> Active --Delete--> Deleted --Restore--> Active
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlobStatus {
    /// No events have been folded yet
    Nonexistent,
    /// Created (or restored) and not deleted
    Active,
    /// Soft-deleted; only Restore is accepted
    Deleted,
}

/// Blob aggregate state
///
/// `sequence` is the highest event sequence folded into this state; the
/// zero value (`sequence == 0`, empty `id`) denotes a blob that does not
/// exist.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Blob {
    /// Aggregate identifier, stamped from the last folded envelope
    pub id: AggregateId,

    /// Content-type tag
    pub blob_type: BlobType,

    /// Binary payload; empty when cleared
    pub data: Vec<u8>,

    /// Soft-delete flag
    pub deleted: bool,

    /// Highest folded event sequence
    pub sequence: u64,

    /// Key/value tags
    pub tags: Tags,
}

impl Blob {
    /// True once any event has been folded into this state
    pub fn exists(&self) -> bool {
        self.sequence != 0 || !self.id.is_empty() || !self.blob_type.is_empty()
    }

    pub fn status(&self) -> BlobStatus {
        if !self.exists() {
            BlobStatus::Nonexistent
        } else if self.deleted {
            BlobStatus::Deleted
        } else {
            BlobStatus::Active
        }
    }

    pub fn has_tag(&self, key: &str) -> bool {
        self.tags.contains_key(key)
    }
}
