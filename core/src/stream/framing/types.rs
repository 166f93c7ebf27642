use std::fmt;

use thiserror::Error;

use crate::constants::{LENGTH_FIELD_LEN, NONCE_FIELD_LEN};
use crate::crypto::types::Nonce;

/// Wire fields, in stream order. Used to say which field a short read hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WireField {
    SessionHeader,
    Nonce,
    Length,
    Payload,
}

impl fmt::Display for WireField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            WireField::SessionHeader => "session header",
            WireField::Nonce         => "nonce",
            WireField::Length        => "length",
            WireField::Payload       => "sealed payload",
        };
        f.write_str(name)
    }
}

/// Fixed-size prefix of every block.
///
/// All integers are little-endian.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockHeader {
    pub nonce: Nonce,
    /// Sealed payload bytes that follow (plaintext + tag), not the plaintext length.
    pub sealed_len: u64,
}

impl BlockHeader {
    pub const LEN: usize = NONCE_FIELD_LEN  // nonce
        + LENGTH_FIELD_LEN;                 // sealed_len
}

/// Borrowed view of one encoded block.
#[derive(Debug, Clone, Copy)]
pub struct BlockView<'a> {
    pub header: BlockHeader,
    pub sealed: &'a [u8],
}

impl BlockView<'_> {
    /// Total encoded size of this block.
    pub fn wire_len(&self) -> usize {
        BlockHeader::LEN + self.sealed.len()
    }
}

#[derive(Debug, Error)]
pub enum FrameError {
    /// A field ended before its fixed or declared size.
    #[error("truncated {field}: expected {expected} bytes, got {actual}")]
    Truncated {
        field: WireField,
        expected: usize,
        actual: usize,
    },

    /// A length field larger than any conforming writer can emit.
    #[error("oversized block: sealed length {len} exceeds limit {limit}")]
    Oversized { len: u64, limit: u64 },
}
