// Copyright (c) 2025 - Cowboy AI, Inc.
//! Event store configuration
//!
//! Environment variables:
//!
//! - `BLOB_STORE_BACKEND` - `memory` (default), `filesystem` or `redb`
//! - `BLOB_STORE_PATH` - base directory (filesystem) or database file (redb);
//!   required by both persistent backends

use std::path::PathBuf;

use thiserror::Error;
use tracing::info;

use crate::errors::StoreError;
use crate::event_store::{EventStore, FileSystemEventStore, InMemoryEventStore};

pub const BACKEND_VAR: &str = "BLOB_STORE_BACKEND";
pub const PATH_VAR: &str = "BLOB_STORE_PATH";

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("unknown BLOB_STORE_BACKEND {0:?}; expected memory, filesystem or redb")]
    UnknownBackend(String),

    #[error("BLOB_STORE_PATH must be set for the {0} backend")]
    MissingPath(&'static str),

    #[error("the {0} backend is not compiled in")]
    BackendDisabled(&'static str),

    #[error("failed to open event store: {0}")]
    Open(#[from] StoreError),
}

/// Storage backend selection
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum StoreBackend {
    #[default]
    Memory,
    FileSystem {
        base_dir: PathBuf,
    },
    Redb {
        path: PathBuf,
    },
}

impl StoreBackend {
    pub fn name(&self) -> &'static str {
        match self {
            StoreBackend::Memory => "memory",
            StoreBackend::FileSystem { .. } => "filesystem",
            StoreBackend::Redb { .. } => "redb",
        }
    }
}

/// Event store configuration
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoreConfig {
    pub backend: StoreBackend,
}

impl StoreConfig {
    pub fn new(backend: StoreBackend) -> Self {
        Self { backend }
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let backend = lookup(BACKEND_VAR)
            .map(|b| b.trim().to_ascii_lowercase())
            .filter(|b| !b.is_empty())
            .unwrap_or_else(|| "memory".to_string());
        let path = lookup(PATH_VAR)
            .filter(|p| !p.trim().is_empty())
            .map(PathBuf::from);

        let backend = match backend.as_str() {
            "memory" => StoreBackend::Memory,
            "filesystem" | "fs" => StoreBackend::FileSystem {
                base_dir: path.ok_or(ConfigError::MissingPath("filesystem"))?,
            },
            "redb" | "kv" => StoreBackend::Redb {
                path: path.ok_or(ConfigError::MissingPath("redb"))?,
            },
            _ => return Err(ConfigError::UnknownBackend(backend)),
        };

        Ok(Self { backend })
    }

    /// Build the configured event store
    pub fn open(&self) -> Result<Box<dyn EventStore>, ConfigError> {
        info!(backend = self.backend.name(), "Opening event store");
        match &self.backend {
            StoreBackend::Memory => Ok(Box::new(InMemoryEventStore::new())),
            StoreBackend::FileSystem { base_dir } => {
                Ok(Box::new(FileSystemEventStore::new(base_dir.clone())))
            }
            #[cfg(feature = "kv")]
            StoreBackend::Redb { path } => {
                Ok(Box::new(crate::event_store::RedbEventStore::open(path)?))
            }
            #[cfg(not(feature = "kv"))]
            StoreBackend::Redb { .. } => Err(ConfigError::BackendDisabled("redb")),
        }
    }
}
