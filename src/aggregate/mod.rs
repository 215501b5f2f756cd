// Copyright (c) 2025 - Cowboy AI, Inc.
//! Pure Functional Blob Aggregate
//!
//! - State reconstruction via event folding: [EventEnvelope] → Blob
//! - Commands are data; handlers are pure functions over (Blob, Command)
//! - No mutations, no side effects, no I/O
//!
//! # Event Sourcing Pattern
//!
//! ```text
//! Command → validate → generate → Envelopes → EventStore
//!    ↓          ↓          ↓
//! Intent    Rules       Facts
//! ```
//!
//! # Example Usage
//!
//! ```rust
//! use blob_eventsource::aggregate::{handle, BlobCommand};
//! use blob_eventsource::domain::Blob;
//!
//! let state = Blob::default();
//! let events = handle(&state, &BlobCommand::create("b1", "text/plain", "hi")).unwrap();
//! let state = state.fold(&events);
//!
//! assert_eq!(state.sequence, 1);
//! assert_eq!(state.data, b"hi");
//! ```

pub mod blob;
pub mod commands;
pub mod handlers;

pub use blob::{apply_envelope, apply_event};
pub use commands::BlobCommand;
pub use handlers::{generate, handle, validate, CommandError};
