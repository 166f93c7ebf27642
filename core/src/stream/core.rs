// ## `core.rs` — whole-stream public API

use std::io::Write;

use tracing::debug;

use crate::crypto::keys::{PublicKey, SecretKey};
use crate::stream::config::StreamConfig;
use crate::stream::io::{open_input, open_output, read_exact_or_eof, take_captured, InputSource, OutputSink};
use crate::stream::reader::SealedReader;
use crate::stream::writer::SealedWriter;
use crate::telemetry::{Stage, TelemetrySnapshot, TelemetryTimer};
use crate::types::StreamError;

/// 🔐 Seal everything `input` yields into a stream addressed to `peer_public_key`.
///
/// Input is read in `max_block_size` chunks and each chunk is one `write_sealed`
/// call, so every block but the last is full. An empty input produces a stream
/// with the session header and no blocks.
pub fn encrypt_stream(
    input: InputSource,
    output: OutputSink,
    peer_public_key: &PublicKey,
    config: &StreamConfig,
) -> Result<TelemetrySnapshot, StreamError> {
    config.validate()?;
    let mut timer = TelemetryTimer::new();

    let mut reader = open_input(input)?;
    let (sink, captured) = open_output(output)?;
    let mut writer = SealedWriter::with_config(*peer_public_key, sink, config.clone())?;

    let mut chunk = vec![0u8; config.max_block_size];
    loop {
        let n = timer.time(Stage::Read, || read_exact_or_eof(&mut reader, &mut chunk))?;
        if n == 0 {
            break;
        }
        timer.time(Stage::Seal, || writer.write_sealed(&chunk[..n]))?;
        if n < chunk.len() {
            break;
        }
    }
    timer.time(Stage::Write, || writer.flush())?;

    let counters = writer.counters().clone();
    drop(writer);
    timer.finish();

    debug!(blocks = counters.blocks, bytes = counters.bytes_plaintext, "stream sealed");

    let mut snapshot = TelemetrySnapshot::from(&counters, &timer);
    if let Some(buf) = take_captured(captured)? {
        snapshot.attach_output(buf);
    }
    Ok(snapshot)
}

/// 🔓 Open a sealed stream from `input` with `secret_key`, writing plaintext to `output`.
///
/// Fails on the first truncated or unauthenticated block. Plaintext from earlier
/// blocks may already have reached `output` by then.
pub fn decrypt_stream(
    input: InputSource,
    output: OutputSink,
    secret_key: &SecretKey,
    config: &StreamConfig,
) -> Result<TelemetrySnapshot, StreamError> {
    config.validate()?;
    let mut timer = TelemetryTimer::new();

    let source = open_input(input)?;
    let (mut sink, captured) = open_output(output)?;
    let mut reader = SealedReader::with_config(secret_key, source, config.clone())?;

    let mut chunk = vec![0u8; config.max_block_size];
    loop {
        let n = timer.time(Stage::Open, || reader.read_sealed(&mut chunk))?;
        if n > 0 {
            timer.time(Stage::Write, || sink.write_all(&chunk[..n]))?;
        }
        if n < chunk.len() {
            break;
        }
    }
    timer.time(Stage::Write, || sink.flush())?;

    let counters = reader.counters().clone();
    drop(sink);
    timer.finish();

    debug!(blocks = counters.blocks, bytes = counters.bytes_plaintext, "stream opened");

    let mut snapshot = TelemetrySnapshot::from(&counters, &timer);
    if let Some(buf) = take_captured(captured)? {
        snapshot.attach_output(buf);
    }
    Ok(snapshot)
}
