// ## 📂 File: `src/stream/session.rs`

//! Session header handshake.
//!
//! The writer's ephemeral public key goes out in the clear exactly once, before any
//! block. Both ends track where they are with `SessionState`; the per-block loop
//! only runs in `StreamingBlocks`.

use std::fmt;
use std::io::{Read, Write};

use crate::constants::SESSION_HEADER_LEN;
use crate::crypto::keys::PublicKey;
use crate::stream::framing::WireField;
use crate::stream::io::read_exact_or_eof;
use crate::types::StreamError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Header not yet written/read; no block may be processed.
    AwaitingHeader,
    /// Header exchanged; blocks flow in emission order.
    StreamingBlocks,
    /// Reader saw a clean end of stream at a block boundary.
    Finished,
    /// A hard failure occurred; the instance refuses further work.
    Poisoned,
}

impl SessionState {
    pub fn is_streaming(self) -> bool {
        matches!(self, SessionState::StreamingBlocks)
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SessionState::AwaitingHeader  => "awaiting-header",
            SessionState::StreamingBlocks => "streaming-blocks",
            SessionState::Finished        => "finished",
            SessionState::Poisoned        => "poisoned",
        };
        f.write_str(name)
    }
}

pub fn write_session_header<W: Write + ?Sized>(w: &mut W, ephemeral: &PublicKey) -> Result<(), StreamError> {
    w.write_all(ephemeral.as_bytes())?;
    Ok(())
}

pub fn read_session_header<R: Read + ?Sized>(r: &mut R) -> Result<PublicKey, StreamError> {
    let mut buf = [0u8; SESSION_HEADER_LEN];
    if read_exact_or_eof(r, &mut buf)? < SESSION_HEADER_LEN {
        return Err(StreamError::Truncated { field: WireField::SessionHeader });
    }
    Ok(PublicKey::from_bytes(buf))
}
