//! Wire framing for sealed streams.
//!
//! Responsibilities:
//! - Define the block header and wire field names
//! - Encode blocks into the canonical byte layout
//! - Decode blocks from slices or blocking readers with strict truncation checks
//!
//! Non-responsibilities:
//! - Cryptography
//! - Buffering and block sizing

pub mod types;
pub mod encode;
pub mod decode;

pub use types::{
    BlockHeader,
    BlockView,
    FrameError,
    WireField,
};
