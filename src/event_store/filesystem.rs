// Copyright (c) 2025 - Cowboy AI, Inc.
//! Filesystem Event Store
//!
//! One directory per aggregate, one file per envelope:
//!
//! ```text
//! <base_dir>/
//!     <aggregate_id>/
//!         1          -- JSON record of sequence 1
//!         2
//!         ...
//! ```
//!
//! A batch is first staged as hidden temporary files and only renamed into
//! place once every envelope has been written, so a failed persist leaves
//! the stream as it was.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use tracing::{debug, warn};

use super::{check_batch, check_record, EventStore};
use crate::context::OperationContext;
use crate::domain::AggregateId;
use crate::errors::{StoreError, StoreResult};
use crate::events::{decode, encode, EventEnvelope};

/// Event store writing one file per envelope under a base directory
#[derive(Debug)]
pub struct FileSystemEventStore {
    base_dir: PathBuf,
    lock: Mutex<()>,
}

impl FileSystemEventStore {
    /// Create a store rooted at `base_dir`
    ///
    /// The directory does not need to exist yet; aggregate directories are
    /// created on first persist.
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Directory holding an aggregate's envelopes
    ///
    /// # Errors
    ///
    /// Returns `InvalidAggregateId` for ids that would escape the base
    /// directory or cannot name a directory.
    pub fn stream_dir(&self, id: &AggregateId) -> StoreResult<PathBuf> {
        let raw = id.as_str();
        if raw.is_empty()
            || raw == "."
            || raw == ".."
            || raw.contains(&['/', '\\', '\0'][..])
        {
            return Err(StoreError::InvalidAggregateId(raw.to_string()));
        }
        Ok(self.base_dir.join(raw))
    }

    fn write_batch(
        ctx: &OperationContext,
        dir: &Path,
        envelopes: &[EventEnvelope],
    ) -> StoreResult<()> {
        let mut staged: Vec<(PathBuf, PathBuf)> = Vec::with_capacity(envelopes.len());

        let staging = envelopes.iter().try_for_each(|envelope| -> StoreResult<()> {
            ctx.check()?;
            let bytes = encode(envelope)?;
            let temp = dir.join(format!(".{}.tmp", envelope.sequence));
            let target = dir.join(envelope.sequence.to_string());
            staged.push((temp.clone(), target));
            fs::write(&temp, bytes)?;
            Ok(())
        });

        if let Err(err) = staging {
            for (temp, _) in &staged {
                discard(temp);
            }
            return Err(err);
        }

        for (index, (temp, target)) in staged.iter().enumerate() {
            if let Err(err) = fs::rename(temp, target) {
                for (_, committed) in &staged[..index] {
                    discard(committed);
                }
                for (pending, _) in &staged[index..] {
                    discard(pending);
                }
                return Err(err.into());
            }
        }

        Ok(())
    }
}

fn discard(path: &Path) {
    if let Err(err) = fs::remove_file(path) {
        if err.kind() != ErrorKind::NotFound {
            warn!(path = %path.display(), error = %err, "Failed to remove file during rollback");
        }
    }
}

impl EventStore for FileSystemEventStore {
    fn find(&self, ctx: &OperationContext, id: &AggregateId) -> StoreResult<Vec<EventEnvelope>> {
        ctx.check()?;
        let dir = self.stream_dir(id)?;
        let _guard = self.lock.lock();

        let entries = match fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(StoreError::MissingAggregate(id.clone()))
            }
            Err(e) => return Err(e.into()),
        };

        let mut envelopes = Vec::new();
        for entry in entries {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            // Only numeric names are envelopes; staged temporaries are skipped.
            let Some(sequence) = entry
                .file_name()
                .to_str()
                .and_then(|name| name.parse::<u64>().ok())
            else {
                continue;
            };
            ctx.check()?;
            let envelope = decode(&fs::read(entry.path())?)?;
            envelopes.push(check_record(id, sequence, envelope)?);
        }

        // A directory left without records holds no stream.
        if envelopes.is_empty() {
            return Err(StoreError::MissingAggregate(id.clone()));
        }

        envelopes.sort_by_key(|e| e.sequence);

        debug!(aggregate_id = %id, count = envelopes.len(), "Loaded events from disk");
        Ok(envelopes)
    }

    fn persist(
        &self,
        ctx: &OperationContext,
        id: &AggregateId,
        envelopes: &[EventEnvelope],
    ) -> StoreResult<()> {
        ctx.check()?;
        check_batch(id, envelopes)?;
        if envelopes.is_empty() {
            return Ok(());
        }
        let dir = self.stream_dir(id)?;
        let _guard = self.lock.lock();

        if let Some(existing) = envelopes
            .iter()
            .find(|e| dir.join(e.sequence.to_string()).exists())
        {
            warn!(aggregate_id = %id, sequence = existing.sequence, "Rejected batch with existing sequence");
            return Err(StoreError::ConcurrencyConflict {
                id: id.clone(),
                sequence: existing.sequence,
            });
        }

        let created = !dir.exists();
        fs::create_dir_all(&dir)?;

        if let Err(err) = Self::write_batch(ctx, &dir, envelopes) {
            if created {
                if let Err(e) = fs::remove_dir(&dir) {
                    warn!(dir = %dir.display(), error = %e, "Failed to remove stream directory during rollback");
                }
            }
            return Err(err);
        }

        debug!(aggregate_id = %id, count = envelopes.len(), dir = %dir.display(), "Persisted events to disk");
        Ok(())
    }
}
