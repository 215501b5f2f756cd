// Copyright (c) 2025 - Cowboy AI, Inc.
//! Test Fixtures for blob-eventsource
//!
//! Deterministic events, envelopes and commands shared by the integration
//! suites. Every fixture targets [`BLOB_ID`] unless stated otherwise.

#![allow(dead_code)]

use blob_eventsource::{AggregateId, BlobCommand, BlobEvent, EventEnvelope, Tags};

pub const BLOB_ID: &str = "b1";
pub const OTHER_BLOB_ID: &str = "b2";
pub const TEXT_PLAIN: &str = "text/plain";

pub fn blob_id() -> AggregateId {
    AggregateId::new(BLOB_ID)
}

pub fn tags(pairs: &[(&str, &str)]) -> Tags {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

pub fn created_event() -> BlobEvent {
    BlobEvent::Created {
        blob_type: TEXT_PLAIN.into(),
        data: b"hi".to_vec(),
    }
}

pub fn data_updated_event() -> BlobEvent {
    BlobEvent::DataUpdated {
        data: b"new".to_vec(),
    }
}

pub fn tags_added_event() -> BlobEvent {
    BlobEvent::TagsAdded {
        tags: tags(&[("env", "prod")]),
    }
}

pub fn tags_updated_event() -> BlobEvent {
    BlobEvent::TagsUpdated {
        tags: tags(&[("env", "staging")]),
    }
}

pub fn tags_deleted_event() -> BlobEvent {
    BlobEvent::TagsDeleted {
        keys: vec!["env".to_string()],
    }
}

pub fn deleted_event() -> BlobEvent {
    BlobEvent::Deleted
}

pub fn restored_event() -> BlobEvent {
    BlobEvent::Restored
}

/// One event of every kind, in an order that is also a legal history
pub fn full_history() -> Vec<EventEnvelope> {
    [
        created_event(),
        tags_added_event(),
        tags_updated_event(),
        data_updated_event(),
        tags_deleted_event(),
        deleted_event(),
        restored_event(),
    ]
    .into_iter()
    .zip(1..)
    .map(|(event, sequence)| EventEnvelope::new(BLOB_ID, sequence, event))
    .collect()
}

pub fn envelope(sequence: u64, event: BlobEvent) -> EventEnvelope {
    EventEnvelope::new(BLOB_ID, sequence, event)
}

pub fn create_command() -> BlobCommand {
    BlobCommand::create(BLOB_ID, TEXT_PLAIN, "hi")
}
