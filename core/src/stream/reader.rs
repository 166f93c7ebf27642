// ## 📂 File: `src/stream/reader.rs`

//! Sealed stream reader.
//!
//! Construction consumes the session header. Blocks are then fetched lazily, one at
//! a time, whenever the caller needs more plaintext than the current block holds.
//!
//! End of stream is only recognized when the source is exhausted exactly where the
//! next block would start. A block that opens to zero bytes is skipped, never
//! treated as the end. Anything short of a whole block is truncation.

use std::io::{self, Read};

use tracing::{debug, trace, warn};

use crate::constants::SESSION_HEADER_LEN;
use crate::crypto::keys::{PublicKey, SecretKey};
use crate::crypto::sealed_box::SharedKey;
use crate::stream::config::StreamConfig;
use crate::stream::framing::decode::{read_block_header, read_sealed_payload};
use crate::stream::session::{read_session_header, SessionState};
use crate::telemetry::TelemetryCounters;
use crate::types::{PartialError, StreamError};

pub struct SealedReader<R: Read> {
    inner: R,
    /// Plaintext of the most recently opened block.
    buf: Vec<u8>,
    /// Next unread byte in `buf`; `pos == buf.len()` means fetch before reading.
    pos: usize,

    peer_public_key: PublicKey,
    key: SharedKey,

    config: StreamConfig,
    state: SessionState,
    counters: TelemetryCounters,
    /// Error held back by `Read::read` after it returned the bytes preceding it.
    deferred: Option<StreamError>,
}

impl<R: Read> SealedReader<R> {
    /// Read the session header and prepare to open blocks addressed to `secret_key`.
    pub fn new(secret_key: &SecretKey, inner: R) -> Result<Self, StreamError> {
        Self::with_config(secret_key, inner, StreamConfig::default())
    }

    pub fn with_config(secret_key: &SecretKey, mut inner: R, config: StreamConfig) -> Result<Self, StreamError> {
        config.validate()?;

        // AwaitingHeader lasts only for this call: the header is read before returning.
        let peer_public_key = read_session_header(&mut inner)?;
        let key = SharedKey::for_opening(&peer_public_key, secret_key)?;

        let mut counters = TelemetryCounters::default();
        counters.add_header(SESSION_HEADER_LEN);

        debug!(peer = %peer_public_key, "sealed stream session accepted");

        Ok(Self {
            inner,
            buf: Vec::new(),
            pos: 0,
            peer_public_key,
            key,
            config,
            state: SessionState::StreamingBlocks,
            counters,
            deferred: None,
        })
    }

    /// Fill `out` with plaintext, fetching blocks as needed.
    ///
    /// Returns fewer than `out.len()` bytes only at a clean end of stream. On
    /// failure the error carries how many bytes of `out` were filled with valid
    /// plaintext first; the reader is poisoned afterwards.
    pub fn read_sealed(&mut self, out: &mut [u8]) -> Result<usize, PartialError> {
        match self.state {
            SessionState::Poisoned => return Err(PartialError::new(0, StreamError::Poisoned)),
            SessionState::Finished => return Ok(0),
            SessionState::AwaitingHeader | SessionState::StreamingBlocks => {}
        }

        let mut filled = 0;
        while filled < out.len() {
            if self.pos == self.buf.len() {
                match self.next_block() {
                    Ok(true) => continue,
                    Ok(false) => {
                        self.state = SessionState::Finished;
                        debug!(blocks = self.counters.blocks, bytes = self.counters.bytes_plaintext, "sealed stream ended");
                        break;
                    }
                    Err(e) => {
                        self.state = SessionState::Poisoned;
                        warn!(error = %e, filled, "sealed stream read failed");
                        return Err(PartialError::new(filled, e));
                    }
                }
            }

            let n = (self.buf.len() - self.pos).min(out.len() - filled);
            out[filled..filled + n].copy_from_slice(&self.buf[self.pos..self.pos + n]);
            self.pos += n;
            filled += n;
        }

        Ok(filled)
    }

    /// Fetch and open the next block into `buf`.
    ///
    /// `Ok(false)` on clean end of stream. Unauthenticated plaintext never reaches `buf`.
    fn next_block(&mut self) -> Result<bool, StreamError> {
        let Some(header) = read_block_header(&mut self.inner, self.config.max_sealed_len())? else {
            return Ok(false);
        };
        let sealed = read_sealed_payload(&mut self.inner, &header)?;
        let plaintext = self.key.open(&header.nonce, &sealed)?;

        self.counters.add_block(plaintext.len(), sealed.len());
        trace!(block = self.counters.blocks, plaintext = plaintext.len(), sealed = sealed.len(), "block opened");

        self.buf = plaintext;
        self.pos = 0;
        Ok(true)
    }

    /// The writer's ephemeral public key received as the session header.
    pub fn peer_public_key(&self) -> &PublicKey {
        &self.peer_public_key
    }

    pub fn config(&self) -> &StreamConfig {
        &self.config
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn counters(&self) -> &TelemetryCounters {
        &self.counters
    }

    /// Capacity of the plaintext buffer currently held.
    pub fn buffer_capacity(&self) -> usize {
        self.buf.capacity()
    }

    pub fn get_ref(&self) -> &R {
        &self.inner
    }

    /// Unwrap the source. Unread plaintext of the current block is dropped.
    pub fn into_inner(self) -> R {
        self.inner
    }
}

impl<R: Read> Read for SealedReader<R> {
    /// Partial progress before a failure is returned first; the failure itself
    /// surfaces on the next call.
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if let Some(e) = self.deferred.take() {
            return Err(e.into());
        }
        match self.read_sealed(buf) {
            Ok(n) => Ok(n),
            Err(p) if p.processed > 0 => {
                self.deferred = Some(p.error);
                Ok(p.processed)
            }
            Err(p) => Err(p.error.into()),
        }
    }
}
