use std::io;

use thiserror::Error;

use crate::crypto::CryptoError;
use crate::stream::config::ConfigError;
use crate::stream::framing::{FrameError, WireField};

/// Unified stream error covering I/O, framing, crypto, and configuration.
/// - `From<T>` impls let `?` cross layers.
/// - Truncation, authentication failure, and local I/O faults stay distinct so a
///   caller can tell "ended early" from "tampered with" from "disk/socket broke".
#[derive(Debug, Error)]
pub enum StreamError {
    /// Secure randomness unavailable while generating the session key pair.
    #[error("key generation failed: {0}")]
    KeyGeneration(String),

    /// Secure randomness unavailable while drawing a block nonce.
    #[error("nonce generation failed: {0}")]
    Entropy(String),

    /// Underlying sink or source failure, passed through unchanged.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The source ended inside a field.
    #[error("truncated stream: {field} incomplete")]
    Truncated { field: WireField },

    /// A block failed to authenticate. Its plaintext was discarded.
    #[error("block authentication failed")]
    Authentication,

    /// Structurally invalid framing.
    #[error("frame error: {0}")]
    Frame(#[from] FrameError),

    /// Primitive misuse (bad key material).
    #[error("crypto error: {0}")]
    Crypto(CryptoError),

    /// Invalid stream configuration.
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    /// This end already hit a hard failure and will not continue.
    #[error("stream poisoned by an earlier failure")]
    Poisoned,
}

impl StreamError {
    /// Map a generation failure at construction time.
    pub(crate) fn key_generation(e: CryptoError) -> Self {
        match e {
            CryptoError::Entropy(msg) => StreamError::KeyGeneration(msg),
            other => StreamError::Crypto(other),
        }
    }

    pub fn is_truncation(&self) -> bool {
        matches!(
            self,
            StreamError::Truncated { .. } | StreamError::Frame(FrameError::Truncated { .. })
        )
    }

    pub fn is_authentication(&self) -> bool {
        matches!(self, StreamError::Authentication)
    }

    fn io_kind(&self) -> io::ErrorKind {
        match self {
            StreamError::Io(e) => e.kind(),
            StreamError::Truncated { .. } => io::ErrorKind::UnexpectedEof,
            StreamError::Authentication | StreamError::Frame(_) | StreamError::Poisoned => {
                io::ErrorKind::InvalidData
            }
            StreamError::Config(_) => io::ErrorKind::InvalidInput,
            StreamError::KeyGeneration(_) | StreamError::Entropy(_) | StreamError::Crypto(_) => {
                io::ErrorKind::Other
            }
        }
    }
}

impl From<CryptoError> for StreamError {
    fn from(e: CryptoError) -> Self {
        match e {
            CryptoError::TagMismatch => StreamError::Authentication,
            CryptoError::Entropy(msg) => StreamError::Entropy(msg),
            other => StreamError::Crypto(other),
        }
    }
}

impl From<StreamError> for io::Error {
    fn from(e: StreamError) -> Self {
        match e {
            StreamError::Io(inner) => inner,
            other => io::Error::new(other.io_kind(), other),
        }
    }
}

/// A failure paired with the progress made before it.
///
/// `processed` bytes were accepted (writer) or filled (reader) and are valid;
/// nothing after them is. Not safely retryable.
#[derive(Debug, Error)]
#[error("{error} (after {processed} bytes)")]
pub struct PartialError {
    pub processed: usize,
    #[source]
    pub error: StreamError,
}

impl PartialError {
    pub fn new(processed: usize, error: StreamError) -> Self {
        Self { processed, error }
    }
}

impl From<PartialError> for StreamError {
    fn from(e: PartialError) -> Self {
        e.error
    }
}
