//! Shared fixtures for the integration tests: sealing helpers and fault injectors.
#![allow(dead_code)]

use std::io::{self, Write};

use boxstream_core::prelude::*;
use rand::rngs::OsRng;
use rand::{CryptoRng, RngCore};

pub const BLOCK: usize = boxstream_core::constants::DEFAULT_BLOCK_SIZE;

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}

/// Seal `data` with a single write call. Returns the wire bytes and the writer's ephemeral key.
pub fn seal_once(peer: &PublicKey, data: &[u8]) -> (Vec<u8>, PublicKey) {
    seal_calls(peer, &[data], StreamConfig::default())
}

/// Seal with one `write_sealed` call per slice.
pub fn seal_calls(peer: &PublicKey, calls: &[&[u8]], config: StreamConfig) -> (Vec<u8>, PublicKey) {
    let mut writer = SealedWriter::with_config(*peer, Vec::new(), config).unwrap();
    for data in calls {
        let n = writer.write_sealed(data).unwrap();
        assert_eq!(n, data.len());
    }
    let ephemeral = *writer.public_key();
    (writer.into_inner(), ephemeral)
}

/// Drain a whole stream through `read_sealed` in fixed chunks.
pub fn open_all(secret: &SecretKey, wire: &[u8]) -> Result<Vec<u8>, StreamError> {
    open_all_with(secret, wire, StreamConfig::default(), 4096)
}

pub fn open_all_with(
    secret: &SecretKey,
    wire: &[u8],
    config: StreamConfig,
    chunk_len: usize,
) -> Result<Vec<u8>, StreamError> {
    let mut reader = SealedReader::with_config(secret, wire, config)?;
    let mut out = Vec::new();
    let mut chunk = vec![0u8; chunk_len];
    loop {
        let n = reader.read_sealed(&mut chunk)?;
        out.extend_from_slice(&chunk[..n]);
        if n < chunk.len() {
            break;
        }
    }
    Ok(out)
}

pub fn random_bytes(len: usize) -> Vec<u8> {
    let mut buf = vec![0u8; len];
    OsRng.fill_bytes(&mut buf);
    buf
}

/// Sink that accepts `limit` bytes in total, then fails every write.
pub struct FailingWriter {
    pub written: Vec<u8>,
    pub limit: usize,
}

impl FailingWriter {
    pub fn new(limit: usize) -> Self {
        Self { written: Vec::new(), limit }
    }
}

impl Write for FailingWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let room = self.limit.saturating_sub(self.written.len());
        if room == 0 {
            return Err(io::Error::new(io::ErrorKind::BrokenPipe, "sink closed"));
        }
        let n = room.min(buf.len());
        self.written.extend_from_slice(&buf[..n]);
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// CSPRNG that serves `successes` fills from the OS, then reports exhaustion.
pub struct FailingRng {
    pub successes: usize,
}

impl RngCore for FailingRng {
    fn next_u32(&mut self) -> u32 {
        OsRng.next_u32()
    }

    fn next_u64(&mut self) -> u64 {
        OsRng.next_u64()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        OsRng.fill_bytes(dest)
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        if self.successes == 0 {
            return Err(rand::Error::new(io::Error::new(
                io::ErrorKind::Other,
                "entropy source unavailable",
            )));
        }
        self.successes -= 1;
        OsRng.try_fill_bytes(dest)
    }
}

impl CryptoRng for FailingRng {}

/// CSPRNG whose `fail_on`-th fill (1-based) fails; every other fill succeeds.
pub struct FlakyRng {
    pub calls: usize,
    pub fail_on: usize,
}

impl FlakyRng {
    pub fn new(fail_on: usize) -> Self {
        Self { calls: 0, fail_on }
    }
}

impl RngCore for FlakyRng {
    fn next_u32(&mut self) -> u32 {
        OsRng.next_u32()
    }

    fn next_u64(&mut self) -> u64 {
        OsRng.next_u64()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        OsRng.fill_bytes(dest)
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.calls += 1;
        if self.calls == self.fail_on {
            return Err(rand::Error::new(io::Error::new(
                io::ErrorKind::Other,
                "entropy source unavailable",
            )));
        }
        OsRng.try_fill_bytes(dest)
    }
}

impl CryptoRng for FlakyRng {}
