//! stream — sealed, chunked byte streams over an X25519 key agreement.
//!
//! ```text
//! stream         := session_header, block*
//! session_header := ephemeral_public_key (32)
//! block          := nonce (24) || sealed_len (8, u64 LE) || sealed_payload
//! ```
//!
//! `SealedWriter` and `SealedReader` are the streaming ends; `encrypt_stream` and
//! `decrypt_stream` drive them over whole inputs.

pub mod config;
pub mod core;
pub mod framing;
pub mod io;
pub mod reader;
pub mod session;
pub mod writer;

pub use config::{ConfigError, StreamConfig};
pub use io::{InputSource, OutputSink};
pub use reader::SealedReader;
pub use session::SessionState;
pub use writer::SealedWriter;

pub use self::core::{
    decrypt_stream,
    encrypt_stream,
};
