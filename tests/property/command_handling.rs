// Copyright (c) 2025 - Cowboy AI, Inc.
//! Property-Based Tests for Tag Commands
//!
//! Tag deltas are computed against the current state, so re-applying a tag
//! update that already took effect must emit nothing, and the folded result
//! must match a plain map edit.

use blob_eventsource::aggregate::handle;
use blob_eventsource::{Blob, BlobCommand, BlobEvent, EventEnvelope, Tags};
use proptest::prelude::*;

fn tag_map() -> impl Strategy<Value = Tags> {
    prop::collection::btree_map("[a-f]", "[x-z]{1,2}", 0..5)
}

fn tagged_blob(tags: Tags) -> Blob {
    let mut stream = vec![EventEnvelope::new(
        "b1",
        1,
        BlobEvent::Created {
            blob_type: "text/plain".into(),
            data: Vec::new(),
        },
    )];
    if !tags.is_empty() {
        stream.push(EventEnvelope::new("b1", 2, BlobEvent::TagsAdded { tags }));
    }
    Blob::from_envelopes(&stream)
}

proptest! {
    /// A tag update equal to the current tags produces no events
    #[test]
    fn prop_repeated_tag_update_is_no_op(current in tag_map()) {
        let state = tagged_blob(current.clone());

        let envelopes = handle(&state, &BlobCommand::update_tags("b1", current, Vec::<String>::new()))
            .expect("legal tag update");

        prop_assert!(envelopes.is_empty());
    }

    /// Folding the generated events equals editing the map directly
    #[test]
    fn prop_tag_update_matches_map_edit(
        current in tag_map(),
        upserts in tag_map(),
        deletes in prop::collection::vec("[a-f]", 0..4),
    ) {
        let deletes: Vec<String> = deletes
            .into_iter()
            .filter(|k| !upserts.contains_key(k))
            .collect();
        let state = tagged_blob(current.clone());

        let envelopes = handle(
            &state,
            &BlobCommand::update_tags("b1", upserts.clone(), deletes.clone()),
        )
        .expect("legal tag update");
        let folded = state.clone().fold(&envelopes);

        let mut expected = current;
        for key in &deletes {
            expected.remove(key);
        }
        expected.extend(upserts);
        prop_assert_eq!(&folded.tags, &expected);

        // At most one event per delta kind, with consecutive sequences
        prop_assert!(envelopes.len() <= 3);
        for (offset, envelope) in envelopes.iter().enumerate() {
            prop_assert_eq!(envelope.sequence, state.sequence + 1 + offset as u64);
        }
    }
}
