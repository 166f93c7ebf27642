// ## 📂 File: `src/stream/writer.rs`

//! Sealed stream writer.
//!
//! Construction generates an ephemeral key pair and writes its public half as the
//! session header. Each `write_sealed` call then buffers plaintext and emits
//! sealed blocks of at most `max_block_size` plaintext bytes.
//!
//! Framing contract:
//! - A block is emitted whenever the buffer is full and more input remains.
//! - After the last input byte the buffer is flushed once more, even when empty.
//!   Every call therefore yields at least one block, and many small writes pay the
//!   per-block overhead (`BLOCK_OVERHEAD`) each time. This is part of the wire
//!   behavior; wrap the writer in a `BufWriter` to coalesce small writes instead.

use std::io::{self, Write};

use rand::rngs::OsRng;
use rand::{CryptoRng, RngCore};
use tracing::{debug, trace, warn};

use crate::constants::SESSION_HEADER_LEN;
use crate::crypto::keys::{KeyPair, PublicKey};
use crate::crypto::nonce::random_nonce;
use crate::crypto::sealed_box::SharedKey;
use crate::stream::config::StreamConfig;
use crate::stream::framing::encode::write_block;
use crate::stream::session::{write_session_header, SessionState};
use crate::telemetry::TelemetryCounters;
use crate::types::{PartialError, StreamError};

pub struct SealedWriter<W: Write, G: RngCore + CryptoRng = OsRng> {
    out: W,
    buf: Vec<u8>,

    key_pair: KeyPair,
    peer_public_key: PublicKey,
    key: SharedKey,
    rng: G,

    config: StreamConfig,
    state: SessionState,
    counters: TelemetryCounters,
    /// Error held back by `Write::write` after it reported the bytes accepted before it.
    deferred: Option<StreamError>,
}

impl<W: Write> SealedWriter<W, OsRng> {
    /// Start a session to `peer_public_key` with the default block size.
    pub fn new(peer_public_key: PublicKey, out: W) -> Result<Self, StreamError> {
        Self::with_config(peer_public_key, out, StreamConfig::default())
    }

    pub fn with_config(peer_public_key: PublicKey, out: W, config: StreamConfig) -> Result<Self, StreamError> {
        SealedWriter::with_rng(peer_public_key, out, OsRng, config)
    }
}

impl<W: Write, G: RngCore + CryptoRng> SealedWriter<W, G> {
    /// Start a session drawing the key pair and every nonce from `rng`.
    ///
    /// Errors:
    /// - `KeyGeneration` if `rng` cannot produce the key pair (fatal, do not retry)
    /// - `Io` if the session header cannot be written
    pub fn with_rng(
        peer_public_key: PublicKey,
        out: W,
        mut rng: G,
        config: StreamConfig,
    ) -> Result<Self, StreamError> {
        config.validate()?;

        let key_pair = KeyPair::generate_with(&mut rng).map_err(StreamError::key_generation)?;
        let key = SharedKey::for_sealing(&peer_public_key, &key_pair.secret)?;

        let mut writer = Self {
            out,
            buf: Vec::with_capacity(config.max_block_size),
            key_pair,
            peer_public_key,
            key,
            rng,
            config,
            state: SessionState::AwaitingHeader,
            counters: TelemetryCounters::default(),
            deferred: None,
        };
        writer.start_session()?;
        Ok(writer)
    }

    /// Send the ephemeral public key; blocks may follow only after this.
    fn start_session(&mut self) -> Result<(), StreamError> {
        debug_assert_eq!(self.state, SessionState::AwaitingHeader);

        write_session_header(&mut self.out, &self.key_pair.public)?;
        self.counters.add_header(SESSION_HEADER_LEN);
        self.state = SessionState::StreamingBlocks;

        debug!(
            ephemeral = %self.key_pair.public,
            peer = %self.peer_public_key,
            max_block_size = self.config.max_block_size,
            "sealed stream session started"
        );
        Ok(())
    }

    /// Seal `data` into one or more blocks.
    ///
    /// Returns the number of input bytes accepted. On failure the error carries the
    /// count accepted before the failing block; those bytes may or may not have
    /// reached the sink intact. Any failure poisons the writer: later calls return
    /// `Poisoned` and emit nothing.
    pub fn write_sealed(&mut self, data: &[u8]) -> Result<usize, PartialError> {
        if self.state == SessionState::Poisoned {
            return Err(PartialError::new(0, StreamError::Poisoned));
        }

        let max = self.config.max_block_size;
        let mut accepted = 0;
        let mut rest = data;

        while !rest.is_empty() {
            if self.buf.len() == max {
                self.flush_block().map_err(|e| self.poison(accepted, e))?;
            }
            let take = (max - self.buf.len()).min(rest.len());
            self.buf.extend_from_slice(&rest[..take]);
            accepted += take;
            rest = &rest[take..];
        }

        self.flush_block().map_err(|e| self.poison(accepted, e))?;
        Ok(accepted)
    }

    /// Seal the current buffer and emit it as one block: nonce, length, payload.
    fn flush_block(&mut self) -> Result<(), StreamError> {
        debug_assert!(self.state.is_streaming());

        let nonce = random_nonce(&mut self.rng)?;
        let sealed = self.key.seal(&nonce, &self.buf)?;
        let pt_len = self.buf.len();
        self.buf.clear();

        write_block(&mut self.out, &nonce, &sealed)?;
        self.counters.add_block(pt_len, sealed.len());

        trace!(block = self.counters.blocks, plaintext = pt_len, sealed = sealed.len(), "block sealed");
        Ok(())
    }

    /// Drop unsent plaintext and refuse further work.
    fn poison(&mut self, accepted: usize, e: StreamError) -> PartialError {
        self.buf.clear();
        self.state = SessionState::Poisoned;
        warn!(error = %e, accepted, "sealed stream write failed");
        PartialError::new(accepted, e)
    }

    /// The ephemeral public key written as this session's header.
    pub fn public_key(&self) -> &PublicKey {
        &self.key_pair.public
    }

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

    pub fn get_ref(&self) -> &W {
        &self.out
    }

    pub fn get_mut(&mut self) -> &mut W {
        &mut self.out
    }

    /// Unwrap the sink. Nothing is buffered between calls, so nothing is lost.
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write, G: RngCore + CryptoRng> Write for SealedWriter<W, G> {
    /// Accepted bytes are reported first; the failure itself surfaces on the
    /// next call.
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if let Some(e) = self.deferred.take() {
            return Err(e.into());
        }
        match self.write_sealed(buf) {
            Ok(n) => Ok(n),
            Err(p) if p.processed > 0 => {
                self.deferred = Some(p.error);
                Ok(p.processed)
            }
            Err(p) => Err(p.error.into()),
        }
    }

    /// Blocks are emitted by every `write`; this only flushes the sink, after
    /// surfacing any failure `write` still holds.
    fn flush(&mut self) -> io::Result<()> {
        if let Some(e) = self.deferred.take() {
            return Err(e.into());
        }
        self.out.flush()
    }
}
