// Copyright (c) 2025 - Cowboy AI, Inc.
//! Blob Domain Events
//!
//! Events are immutable facts describing what happened to a blob. They never
//! reference other events, and they are named in the past tense.
//!
//! # Event Flow
//!
//! ```text
//! Command → validate/generate → EventEnvelope → EventStore
//!                                      ↓
//!                               apply_envelope → Blob
//! ```
//!
//! # Module Organization
//!
//! - [`blob`] - the closed [`BlobEvent`] variant set and its wire codes
//! - [`envelope`] - [`EventEnvelope`] plus the JSON codec used by persistent stores
//! - `payload` - base64 encoding of binary `data` fields

pub mod blob;
pub mod envelope;
mod payload;

pub use blob::BlobEvent;
pub use envelope::{decode, encode, wrap, EventEnvelope};
