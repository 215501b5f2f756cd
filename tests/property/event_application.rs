// Copyright (c) 2025 - Cowboy AI, Inc.
//! Property-Based Tests for Event Folding
//!
//! Folding is a left fold of a pure function, so it must be deterministic,
//! split at any point without changing the result, and track the highest
//! folded sequence.

use blob_eventsource::{Blob, BlobEvent, EventEnvelope, Tags};
use proptest::prelude::*;

fn tag_map() -> impl Strategy<Value = Tags> {
    prop::collection::btree_map("[a-d]", "[x-z]{1,2}", 0..4)
}

fn blob_event() -> impl Strategy<Value = BlobEvent> {
    prop_oneof![
        ("[a-z]{1,8}/[a-z]{1,8}", prop::collection::vec(any::<u8>(), 0..16)).prop_map(
            |(blob_type, data)| BlobEvent::Created {
                blob_type: blob_type.into(),
                data,
            }
        ),
        prop::collection::vec(any::<u8>(), 0..16).prop_map(|data| BlobEvent::DataUpdated { data }),
        tag_map().prop_map(|tags| BlobEvent::TagsAdded { tags }),
        tag_map().prop_map(|tags| BlobEvent::TagsUpdated { tags }),
        prop::collection::vec("[a-d]", 0..3).prop_map(|keys| BlobEvent::TagsDeleted { keys }),
        Just(BlobEvent::Deleted),
        Just(BlobEvent::Restored),
    ]
}

fn stream() -> impl Strategy<Value = Vec<EventEnvelope>> {
    prop::collection::vec(blob_event(), 0..24).prop_map(|events| {
        events
            .into_iter()
            .zip(1..)
            .map(|(event, sequence)| EventEnvelope::new("b1", sequence, event))
            .collect()
    })
}

proptest! {
    /// Replaying the same stream twice yields the same state
    #[test]
    fn prop_fold_is_deterministic(envelopes in stream()) {
        prop_assert_eq!(Blob::from_envelopes(&envelopes), Blob::from_envelopes(&envelopes));
    }

    /// fold(a ++ b) == fold(fold(a), b)
    #[test]
    fn prop_fold_splits_anywhere(envelopes in stream(), split in 0usize..25) {
        let split = split.min(envelopes.len());
        let (head, tail) = envelopes.split_at(split);

        let whole = Blob::from_envelopes(&envelopes);
        let stepwise = Blob::from_envelopes(head).fold(tail);

        prop_assert_eq!(whole, stepwise);
    }

    /// The folded sequence is the last envelope's sequence
    #[test]
    fn prop_sequence_tracks_last_envelope(envelopes in stream()) {
        let state = Blob::from_envelopes(&envelopes);

        prop_assert_eq!(state.sequence, envelopes.last().map_or(0, |e| e.sequence));
        prop_assert_eq!(state.exists(), !envelopes.is_empty());
    }

    /// Deleted/Restored toggle only the flag
    #[test]
    fn prop_delete_restore_preserves_content(envelopes in stream()) {
        let before = Blob::from_envelopes(&envelopes);
        let next = before.sequence + 1;

        let after = before.clone().fold(&[
            EventEnvelope::new("b1", next, BlobEvent::Deleted),
            EventEnvelope::new("b1", next + 1, BlobEvent::Restored),
        ]);

        prop_assert!(!after.deleted);
        prop_assert_eq!(&after.data, &before.data);
        prop_assert_eq!(&after.tags, &before.tags);
        prop_assert_eq!(&after.blob_type, &before.blob_type);
    }
}
