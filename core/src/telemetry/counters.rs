// ### `src/telemetry/counters.rs`

//! telemetry/counters.rs
//! Mutable counters kept by each writer and reader.
//!
//! Summary: block counts and byte counts per session.
//! Converted into an immutable `TelemetrySnapshot` by the whole-stream helpers.
use std::ops::AddAssign;

use serde::{Deserialize, Serialize};

use crate::constants::BLOCK_OVERHEAD;

/// Deterministic counters collected during stream processing
#[derive(Default, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TelemetryCounters {
    pub headers: u64,
    pub blocks: u64,
    /// Blocks that carried no plaintext (forced flush of an empty buffer).
    pub blocks_empty: u64,
    pub bytes_plaintext: u64,
    /// Sealed payload bytes (plaintext + tag).
    pub bytes_sealed: u64,
    /// Everything on the wire that is not plaintext: header, nonce, length, tag.
    pub bytes_overhead: u64,
}

impl TelemetryCounters {
    /// Record the session header as overhead.
    pub fn add_header(&mut self, header_len: usize) {
        self.headers += 1;
        self.bytes_overhead += header_len as u64;
    }

    /// Record one block, sealed or opened.
    ///
    /// - `pt_len`: plaintext bytes in the block
    /// - `sealed_len`: sealed payload bytes on the wire
    pub fn add_block(&mut self, pt_len: usize, sealed_len: usize) {
        self.blocks += 1;
        if pt_len == 0 {
            self.blocks_empty += 1;
        }
        self.bytes_plaintext += pt_len as u64;
        self.bytes_sealed += sealed_len as u64;
        self.bytes_overhead += BLOCK_OVERHEAD as u64;
    }

    /// Total bytes this session put on (or took off) the wire.
    pub fn wire_bytes(&self) -> u64 {
        self.bytes_plaintext + self.bytes_overhead
    }

    pub fn merge(&mut self, other: &TelemetryCounters) {
        self.headers += other.headers;
        self.blocks += other.blocks;
        self.blocks_empty += other.blocks_empty;
        self.bytes_plaintext += other.bytes_plaintext;
        self.bytes_sealed += other.bytes_sealed;
        self.bytes_overhead += other.bytes_overhead;
    }
}

impl AddAssign for TelemetryCounters {
    fn add_assign(&mut self, rhs: Self) {
        self.merge(&rhs);
    }
}
