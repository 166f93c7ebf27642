// ## 📂 File: `src/crypto/types.rs`

use thiserror::Error;

/// X25519 public and secret key length.
pub const KEY_LEN_32: usize = 32;

/// XChaCha20-Poly1305 nonce length. Large enough to draw at random per block.
pub const NONCE_LEN_24: usize = 24;

/// Fixed AEAD tag length (bytes).
pub const TAG_LEN: usize = 16;

/// Per-block nonce.
pub type Nonce = [u8; NONCE_LEN_24];

#[derive(Debug, Error)]
pub enum CryptoError {
    /// The random source refused to produce bytes.
    #[error("secure randomness unavailable: {0}")]
    Entropy(String),

    /// Key material of the wrong size (only reachable through slice constructors).
    #[error("invalid key length: expected={expected}, actual={actual}")]
    InvalidKeyLen { expected: usize, actual: usize },

    /// X25519 produced an all-zero shared secret (low-order peer key).
    #[error("non-contributory key agreement: peer public key has low order")]
    NonContributory,

    /// AEAD tag mismatch (authentication failure).
    #[error("AEAD tag mismatch")]
    TagMismatch,

    /// General derivation or runtime error with context.
    #[error("crypto failure: {0}")]
    Failure(String),
}
