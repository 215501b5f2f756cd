// Copyright (c) 2025 - Cowboy AI, Inc.
//! Pure Command Handlers for the Blob Aggregate
//!
//! Each command kind has a validator and a generator:
//!
//! ```text
//! validate(Blob, Command) → Result<(), CommandError>
//! generate(Blob, Command) → [EventEnvelope]
//! ```
//!
//! Both are pure: no I/O, no clock, no mutation. Generated envelopes carry
//! sequences `state.sequence + 1, + 2, …` in emission order.
//!
//! # Business Rules
//!
//! - Create only from nonexistent; Restore only from deleted
//! - Update, UpdateTags and Delete only from active
//! - Delete on an already-deleted blob is rejected, not ignored
//! - UpdateTags tolerates no-ops and emits at most one event per delta
//!   kind, in the fixed order deleted → updated → added

use std::collections::BTreeSet;

use crate::aggregate::commands::BlobCommand;
use crate::domain::{AggregateId, Blob, BlobType, Tags};
use crate::events::{wrap, BlobEvent, EventEnvelope};

/// Command validation error
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    /// Command targets the empty aggregate id
    #[error("ID should not be empty")]
    EmptyId,

    /// Create without a blob type
    #[error("BlobType should not be empty")]
    EmptyBlobType,

    /// Create against a blob that already has history
    #[error("cannot create an existing blob")]
    AlreadyExists,

    /// Create against a soft-deleted blob
    #[error("cannot create a deleted blob")]
    CreateDeleted,

    /// Folded state does not belong to the command's target (blob not found)
    #[error("ID {found:?} in blob does not match {expected:?} in command")]
    IdMismatch {
        expected: AggregateId,
        found: AggregateId,
    },

    /// Update supplied data and asked to clear at the same time
    #[error("cannot update as well as clear data at the same time")]
    UpdateAndClear,

    /// Tag key appears in both the add/update set and the delete set
    #[error("cannot delete tag '{0}' as it is being updated at the same time")]
    TagConflict(String),

    /// Mutation of a soft-deleted blob
    #[error("blob {0} is deleted")]
    BlobDeleted(AggregateId),

    /// Delete of an already-deleted blob
    #[error("blob {0} is already deleted")]
    AlreadyDeleted(AggregateId),

    /// Restore of a blob that is not deleted
    #[error("blob {0} not deleted; only a deleted blob can be restored")]
    NotDeleted(AggregateId),
}

/// Validate and generate in one step
///
/// # Returns
/// - Ok(envelopes), possibly empty, if validation passes
/// - Err(CommandError) if validation fails
pub fn handle(state: &Blob, command: &BlobCommand) -> Result<Vec<EventEnvelope>, CommandError> {
    validate(state, command)?;
    Ok(generate(state, command))
}

/// Check a command against the current state; first failure wins
pub fn validate(state: &Blob, command: &BlobCommand) -> Result<(), CommandError> {
    match command {
        BlobCommand::Create { id, blob_type, .. } => validate_create(state, id, blob_type),
        BlobCommand::Update { id, data, clear } => validate_update(state, id, data, *clear),
        BlobCommand::UpdateTags {
            id,
            add_or_update,
            delete_keys,
        } => validate_update_tags(state, id, add_or_update, delete_keys),
        BlobCommand::Delete { id } => validate_delete(state, id),
        BlobCommand::Restore { id } => validate_restore(state, id),
    }
}

/// Compute the events for an already-validated command
pub fn generate(state: &Blob, command: &BlobCommand) -> Vec<EventEnvelope> {
    match command {
        BlobCommand::Create {
            id,
            blob_type,
            data,
        } => generate_create(id, blob_type, data),
        BlobCommand::Update { id, data, clear } => generate_update(state, id, data, *clear),
        BlobCommand::UpdateTags {
            id,
            add_or_update,
            delete_keys,
        } => generate_update_tags(state, id, add_or_update, delete_keys),
        BlobCommand::Delete { id } => generate_delete(state, id),
        BlobCommand::Restore { id } => generate_restore(state, id),
    }
}

fn validate_create(state: &Blob, id: &AggregateId, blob_type: &BlobType) -> Result<(), CommandError> {
    if state.deleted {
        return Err(CommandError::CreateDeleted);
    }
    if state.exists() {
        return Err(CommandError::AlreadyExists);
    }
    if id.is_empty() {
        return Err(CommandError::EmptyId);
    }
    if blob_type.is_empty() {
        return Err(CommandError::EmptyBlobType);
    }
    Ok(())
}

/// Shared by every command that targets an existing blob
fn validate_target(state: &Blob, id: &AggregateId) -> Result<(), CommandError> {
    if id.is_empty() {
        return Err(CommandError::EmptyId);
    }
    if &state.id != id {
        return Err(CommandError::IdMismatch {
            expected: id.clone(),
            found: state.id.clone(),
        });
    }
    Ok(())
}

fn validate_update(
    state: &Blob,
    id: &AggregateId,
    data: &[u8],
    clear: bool,
) -> Result<(), CommandError> {
    validate_target(state, id)?;
    if !data.is_empty() && clear {
        return Err(CommandError::UpdateAndClear);
    }
    if state.deleted {
        return Err(CommandError::BlobDeleted(id.clone()));
    }
    Ok(())
}

fn validate_update_tags(
    state: &Blob,
    id: &AggregateId,
    add_or_update: &Tags,
    delete_keys: &[String],
) -> Result<(), CommandError> {
    validate_target(state, id)?;
    if let Some(key) = delete_keys.iter().find(|k| add_or_update.contains_key(*k)) {
        return Err(CommandError::TagConflict(key.clone()));
    }
    if state.deleted {
        return Err(CommandError::BlobDeleted(id.clone()));
    }
    Ok(())
}

fn validate_delete(state: &Blob, id: &AggregateId) -> Result<(), CommandError> {
    validate_target(state, id)?;
    if state.deleted {
        return Err(CommandError::AlreadyDeleted(id.clone()));
    }
    Ok(())
}

fn validate_restore(state: &Blob, id: &AggregateId) -> Result<(), CommandError> {
    validate_target(state, id)?;
    if !state.deleted {
        return Err(CommandError::NotDeleted(id.clone()));
    }
    Ok(())
}

fn generate_create(id: &AggregateId, blob_type: &BlobType, data: &[u8]) -> Vec<EventEnvelope> {
    wrap(
        id,
        1,
        [BlobEvent::Created {
            blob_type: blob_type.clone(),
            data: data.to_vec(),
        }],
    )
}

fn generate_update(state: &Blob, id: &AggregateId, data: &[u8], clear: bool) -> Vec<EventEnvelope> {
    let event = if clear {
        Some(BlobEvent::DataUpdated { data: Vec::new() })
    } else if !data.is_empty() {
        Some(BlobEvent::DataUpdated {
            data: data.to_vec(),
        })
    } else {
        None
    };

    wrap(id, state.sequence + 1, event)
}

fn generate_update_tags(
    state: &Blob,
    id: &AggregateId,
    add_or_update: &Tags,
    delete_keys: &[String],
) -> Vec<EventEnvelope> {
    let mut seen = BTreeSet::new();
    let mut deleted = Vec::new();
    for key in delete_keys {
        if state.has_tag(key) && seen.insert(key) {
            deleted.push(key.clone());
        }
    }

    let mut updated = Tags::new();
    let mut added = Tags::new();
    for (key, value) in add_or_update {
        match state.tags.get(key) {
            Some(current) if current != value => {
                updated.insert(key.clone(), value.clone());
            }
            Some(_) => {}
            None => {
                added.insert(key.clone(), value.clone());
            }
        }
    }

    let mut events = Vec::with_capacity(3);
    if !deleted.is_empty() {
        events.push(BlobEvent::TagsDeleted { keys: deleted });
    }
    if !updated.is_empty() {
        events.push(BlobEvent::TagsUpdated { tags: updated });
    }
    if !added.is_empty() {
        events.push(BlobEvent::TagsAdded { tags: added });
    }

    wrap(id, state.sequence + 1, events)
}

fn generate_delete(state: &Blob, id: &AggregateId) -> Vec<EventEnvelope> {
    if state.deleted {
        return Vec::new();
    }
    wrap(id, state.sequence + 1, [BlobEvent::Deleted])
}

fn generate_restore(state: &Blob, id: &AggregateId) -> Vec<EventEnvelope> {
    wrap(id, state.sequence + 1, [BlobEvent::Restored])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn active_blob() -> Blob {
        Blob {
            id: AggregateId::new("b1"),
            blob_type: BlobType::new("text/plain"),
            data: b"hi".to_vec(),
            sequence: 1,
            ..Blob::default()
        }
    }

    fn deleted_blob() -> Blob {
        Blob {
            deleted: true,
            sequence: 2,
            ..active_blob()
        }
    }

    fn tags(pairs: &[(&str, &str)]) -> Tags {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_create_on_fresh_state() {
        // Act
        let events = handle(&Blob::default(), &BlobCommand::create("b1", "text/plain", "hi"))
            .expect("create should be valid");

        // Assert
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].sequence, 1);
        assert_eq!(events[0].event.code(), "CE");
    }

    #[test]
    fn test_create_rejections_in_order() {
        let cmd = BlobCommand::create("b1", "text/plain", "hi");

        assert_eq!(validate(&active_blob(), &cmd), Err(CommandError::AlreadyExists));
        assert_eq!(validate(&deleted_blob(), &cmd), Err(CommandError::CreateDeleted));
        assert_eq!(
            validate(&Blob::default(), &BlobCommand::create("", "text/plain", "hi")),
            Err(CommandError::EmptyId)
        );
        assert_eq!(
            validate(&Blob::default(), &BlobCommand::create("b1", "", "hi")),
            Err(CommandError::EmptyBlobType)
        );
    }

    #[test]
    fn test_target_checks_cover_missing_blob() {
        let cmd = BlobCommand::delete("b1");

        assert_eq!(
            validate(&Blob::default(), &cmd),
            Err(CommandError::IdMismatch {
                expected: AggregateId::new("b1"),
                found: AggregateId::default(),
            })
        );
        assert_eq!(
            validate(&active_blob(), &BlobCommand::delete("")),
            Err(CommandError::EmptyId)
        );
    }

    #[test]
    fn test_update_rejects_update_and_clear() {
        assert_eq!(
            validate(&active_blob(), &BlobCommand::update("b1", "new", true)),
            Err(CommandError::UpdateAndClear)
        );
    }

    #[test]
    fn test_update_rejects_deleted_blob() {
        assert_eq!(
            validate(&deleted_blob(), &BlobCommand::update("b1", "new", false)),
            Err(CommandError::BlobDeleted(AggregateId::new("b1")))
        );
    }

    #[test]
    fn test_update_generation() {
        let state = active_blob();

        let replaced = generate(&state, &BlobCommand::update("b1", "new", false));
        assert_eq!(
            replaced,
            vec![EventEnvelope::new(
                "b1",
                2,
                BlobEvent::DataUpdated {
                    data: b"new".to_vec()
                }
            )]
        );

        let cleared = generate(&state, &BlobCommand::update("b1", "", true));
        assert_eq!(
            cleared,
            vec![EventEnvelope::new(
                "b1",
                2,
                BlobEvent::DataUpdated { data: Vec::new() }
            )]
        );

        let nothing = generate(&state, &BlobCommand::update("b1", "", false));
        assert!(nothing.is_empty());
    }

    #[test]
    fn test_update_tags_emits_deltas_in_fixed_order() {
        // Arrange
        let state = Blob {
            tags: tags(&[("env", "prod"), ("owner", "ops"), ("stale", "1")]),
            ..active_blob()
        };
        let cmd = BlobCommand::update_tags(
            "b1",
            [("env", "staging"), ("owner", "ops"), ("tier", "gold")],
            ["stale", "never-set"],
        );

        // Act
        let events = handle(&state, &cmd).expect("valid");

        // Assert
        assert_eq!(
            events,
            vec![
                EventEnvelope::new(
                    "b1",
                    2,
                    BlobEvent::TagsDeleted {
                        keys: vec!["stale".to_string()]
                    }
                ),
                EventEnvelope::new(
                    "b1",
                    3,
                    BlobEvent::TagsUpdated {
                        tags: tags(&[("env", "staging")])
                    }
                ),
                EventEnvelope::new(
                    "b1",
                    4,
                    BlobEvent::TagsAdded {
                        tags: tags(&[("tier", "gold")])
                    }
                ),
            ]
        );
    }

    #[test]
    fn test_update_tags_no_op_emits_nothing() {
        let state = Blob {
            tags: tags(&[("k", "v")]),
            ..active_blob()
        };

        let events = handle(
            &state,
            &BlobCommand::update_tags("b1", [("k", "v")], Vec::<&str>::new()),
        )
        .expect("no-op is valid");

        assert!(events.is_empty());
    }

    #[test]
    fn test_update_tags_deduplicates_delete_keys() {
        let state = Blob {
            tags: tags(&[("k", "v")]),
            ..active_blob()
        };

        let events = generate(
            &state,
            &BlobCommand::update_tags("b1", Vec::<(&str, &str)>::new(), ["k", "k"]),
        );

        assert_eq!(
            events,
            vec![EventEnvelope::new(
                "b1",
                2,
                BlobEvent::TagsDeleted {
                    keys: vec!["k".to_string()]
                }
            )]
        );
    }

    #[test]
    fn test_update_tags_rejects_conflicting_key() {
        let cmd = BlobCommand::update_tags("b1", [("k", "v")], ["k"]);

        assert_eq!(
            validate(&active_blob(), &cmd),
            Err(CommandError::TagConflict("k".to_string()))
        );
    }

    #[test]
    fn test_delete_and_restore_guards() {
        assert_eq!(
            validate(&deleted_blob(), &BlobCommand::delete("b1")),
            Err(CommandError::AlreadyDeleted(AggregateId::new("b1")))
        );
        assert_eq!(
            validate(&active_blob(), &BlobCommand::restore("b1")),
            Err(CommandError::NotDeleted(AggregateId::new("b1")))
        );

        let deleted = handle(&active_blob(), &BlobCommand::delete("b1")).expect("valid");
        assert_eq!(deleted, vec![EventEnvelope::new("b1", 2, BlobEvent::Deleted)]);

        let restored = handle(&deleted_blob(), &BlobCommand::restore("b1")).expect("valid");
        assert_eq!(restored, vec![EventEnvelope::new("b1", 3, BlobEvent::Restored)]);
    }
}
