// ## 📂 File: `src/constants.rs`

//! Wire and sizing constants shared by the writer and reader.

use crate::crypto::types::{KEY_LEN_32, NONCE_LEN_24, TAG_LEN};

/// Default maximum plaintext bytes per block (16 KiB).
pub const DEFAULT_BLOCK_SIZE: usize = 16 * 1024;

/// Upper bound accepted by `StreamConfig::validate` (32 MiB).
pub const MAX_BLOCK_SIZE_LIMIT: usize = 32 * 1024 * 1024;

/// Session header: the writer's ephemeral public key, raw.
pub const SESSION_HEADER_LEN: usize = KEY_LEN_32;

/// Per-block nonce field.
pub const NONCE_FIELD_LEN: usize = NONCE_LEN_24;

/// Per-block sealed length field (u64, little-endian).
pub const LENGTH_FIELD_LEN: usize = 8;

/// Fixed bytes every block adds on top of its plaintext.
pub const BLOCK_OVERHEAD: usize = NONCE_FIELD_LEN + LENGTH_FIELD_LEN + TAG_LEN;

/// HKDF `info` label for the per-session sealing key.
/// The sender and recipient public keys are appended in that order.
pub const SEAL_KDF_LABEL: &[u8] = b"boxstream|seal|v1";
