// Copyright (c) 2025 - Cowboy AI, Inc.
//! Blob payloads travel as standard padded base64 strings
//!
//! Used through `#[serde(with = "...")]` on every `data` field.

use base64::{engine::general_purpose, Engine as _};
use serde::{de, Deserialize, Deserializer, Serializer};

pub(crate) fn serialize<S: Serializer>(data: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&general_purpose::STANDARD.encode(data))
}

pub(crate) fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
    let encoded = String::deserialize(deserializer)?;
    general_purpose::STANDARD
        .decode(encoded.as_bytes())
        .map_err(de::Error::custom)
}
