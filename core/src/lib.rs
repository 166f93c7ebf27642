//! boxstream-core
//!
//! Streaming sealed-box encryption: a byte stream in, independently sealed blocks
//! out, and back again.
//! Synchronous, blocking, single-owner. No FFI.

#![forbid(unsafe_code)]

// Shared and top level
pub mod constants;
pub mod types;

pub mod crypto;
pub mod telemetry;

// Stream layers
pub mod stream;

// -----------------------------------------------------------------------------
// Prelude (Rust users)
// -----------------------------------------------------------------------------
pub mod prelude {
    pub use crate::crypto::{generate_key_pair, KeyPair, PublicKey, SecretKey};
    pub use crate::stream::{
        decrypt_stream, encrypt_stream, InputSource, OutputSink, SealedReader, SealedWriter,
        StreamConfig,
    };
    pub use crate::telemetry::TelemetrySnapshot;
    pub use crate::types::{PartialError, StreamError};
}
