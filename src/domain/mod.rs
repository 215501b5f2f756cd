// Copyright (c) 2025 - Cowboy AI, Inc.
//! Blob Domain Model
//!
//! Value objects and the aggregate state for the blob bounded context.
//!
//! - [`AggregateId`] - opaque stream key, never empty once persisted
//! - [`BlobType`] - content-type tag
//! - [`Tags`] - unique-key tag map
//! - [`Blob`] - state derived by folding events, never mutated directly

pub mod blob;

pub use blob::{AggregateId, Blob, BlobStatus, BlobType, Tags};
