// Copyright (c) 2025 - Cowboy AI, Inc.
//! Content-addressed chunking of blob payloads
//!
//! A payload is split into fixed-size chunks; every chunk carries the SHA-256
//! of its bytes and the whole set carries the SHA-256 of the full stream.
//! Hashes are lowercase hex.

use std::io::{self, ErrorKind, Read};

use sha2::{Digest, Sha256};

/// One slice of a payload and its SHA-256
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    pub hash: String,
    pub data: Vec<u8>,
}

impl Chunk {
    pub fn new(data: Vec<u8>) -> Self {
        Self {
            hash: hex::encode(Sha256::digest(&data)),
            data,
        }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// Ordered chunks of a payload plus the hash of the whole payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunks {
    pub chunks: Vec<Chunk>,
    pub hash: String,
}

impl Chunks {
    /// Split `reader` into chunks of `chunk_size` bytes; the last one may be shorter
    ///
    /// # Errors
    ///
    /// `InvalidInput` for a zero `chunk_size`, otherwise any read error.
    pub fn from_reader(mut reader: impl Read, chunk_size: usize) -> io::Result<Self> {
        if chunk_size == 0 {
            return Err(io::Error::new(
                ErrorKind::InvalidInput,
                "chunk size must be greater than zero",
            ));
        }

        let mut total = Sha256::new();
        let mut chunks = Vec::new();
        loop {
            let buf = read_chunk(&mut reader, chunk_size)?;
            if buf.is_empty() {
                break;
            }
            total.update(&buf);
            let full = buf.len() == chunk_size;
            chunks.push(Chunk::new(buf));
            if !full {
                break;
            }
        }

        Ok(Self {
            chunks,
            hash: hex::encode(total.finalize()),
        })
    }

    pub fn from_bytes(data: &[u8], chunk_size: usize) -> io::Result<Self> {
        Self::from_reader(data, chunk_size)
    }

    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    /// Total payload size in bytes
    pub fn size(&self) -> usize {
        self.chunks.iter().map(Chunk::len).sum()
    }

    /// Reassemble the payload
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.size());
        for chunk in &self.chunks {
            out.extend_from_slice(&chunk.data);
        }
        out
    }
}

/// Fill up to `size` bytes, stopping early only at end of input
fn read_chunk(reader: &mut impl Read, size: usize) -> io::Result<Vec<u8>> {
    let mut buf = vec![0; size];
    let mut filled = 0;
    while filled < size {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    buf.truncate(filled);
    Ok(buf)
}
