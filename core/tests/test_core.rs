// Whole-stream helpers: encrypt_stream / decrypt_stream over memory, readers and files.

mod common;

#[cfg(test)]
mod tests {
    use std::io::{Cursor, Write};

    use boxstream_core::constants::{BLOCK_OVERHEAD, MAX_BLOCK_SIZE_LIMIT, SESSION_HEADER_LEN};
    use boxstream_core::prelude::*;
    use boxstream_core::stream::config::ConfigError;
    use boxstream_core::telemetry::Stage;

    use crate::common::{init_tracing, random_bytes, BLOCK};

    fn seal_memory(peer: &PublicKey, data: &[u8], config: &StreamConfig) -> TelemetrySnapshot {
        encrypt_stream(InputSource::Memory(data.to_vec()), OutputSink::Memory, peer, config).unwrap()
    }

// # ✅ Memory round trips

    #[test]
    fn memory_roundtrip_default_config() {
        init_tracing();
        let bob = generate_key_pair().unwrap();
        let config = StreamConfig::default();
        let data = random_bytes(3 * BLOCK + 100);

        let sealed = seal_memory(&bob.public, &data, &config);
        let wire = sealed.output.clone().expect("memory sink captures output");
        assert_eq!(sealed.counters.blocks, 4);
        assert_eq!(sealed.counters.bytes_plaintext, data.len() as u64);
        assert_eq!(sealed.counters.wire_bytes(), wire.len() as u64);
        assert!(sealed.sanity_check());

        let opened = decrypt_stream(InputSource::Memory(wire), OutputSink::Memory, &bob.secret, &config).unwrap();
        assert_eq!(opened.output.as_deref(), Some(&data[..]));
        assert_eq!(opened.counters, sealed.counters);
        assert!(opened.sanity_check());
    }

    #[test]
    fn full_chunks_then_a_short_tail() {
        let bob = generate_key_pair().unwrap();
        let config = StreamConfig::default().with_block_size(256);

        // Exact multiple: no trailing empty block.
        let sealed = seal_memory(&bob.public, &vec![1u8; 4 * 256], &config);
        assert_eq!(sealed.counters.blocks, 4);
        assert_eq!(sealed.counters.blocks_empty, 0);

        let sealed = seal_memory(&bob.public, &vec![1u8; 4 * 256 + 1], &config);
        assert_eq!(sealed.counters.blocks, 5);
    }

    #[test]
    fn empty_input_is_header_only() {
        let bob = generate_key_pair().unwrap();
        let config = StreamConfig::default();

        let sealed = seal_memory(&bob.public, &[], &config);
        let wire = sealed.output.unwrap();
        assert_eq!(wire.len(), SESSION_HEADER_LEN);
        assert_eq!(sealed.counters.blocks, 0);

        let opened = decrypt_stream(InputSource::Memory(wire), OutputSink::Memory, &bob.secret, &config).unwrap();
        assert_eq!(opened.output, Some(Vec::new()));
    }

    #[test]
    fn reader_input_and_writer_output() {
        let bob = generate_key_pair().unwrap();
        let config = StreamConfig::default();
        let data = random_bytes(BLOCK + 1);

        let sealed = encrypt_stream(
            InputSource::Reader(Box::new(Cursor::new(data.clone()))),
            OutputSink::Memory,
            &bob.public,
            &config,
        )
        .unwrap();
        let wire = sealed.output.unwrap();
        assert_eq!(wire.len(), SESSION_HEADER_LEN + data.len() + 2 * BLOCK_OVERHEAD);

        // A caller-provided writer gets the plaintext; nothing is captured.
        let opened = decrypt_stream(
            InputSource::Reader(Box::new(Cursor::new(wire))),
            OutputSink::Writer(Box::new(std::io::sink())),
            &bob.secret,
            &config,
        )
        .unwrap();
        assert!(opened.output.is_none());
        assert_eq!(opened.counters.bytes_plaintext, data.len() as u64);
    }

    #[test]
    fn helpers_interoperate_with_sealed_writer() {
        let bob = generate_key_pair().unwrap();
        let mut writer = SealedWriter::new(bob.public, Vec::new()).unwrap();
        writer.write_all(b"written by hand").unwrap();
        let wire = writer.into_inner();

        let opened = decrypt_stream(
            InputSource::Memory(wire),
            OutputSink::Memory,
            &bob.secret,
            &StreamConfig::default(),
        )
        .unwrap();
        assert_eq!(opened.output.unwrap(), b"written by hand");
    }

// # ✅ Files

    #[test]
    fn file_roundtrip() {
        let bob = generate_key_pair().unwrap();
        let config = StreamConfig::default();
        let dir = tempfile::tempdir().unwrap();
        let plain_path = dir.path().join("plain.bin");
        let sealed_path = dir.path().join("sealed.bin");
        let opened_path = dir.path().join("opened.bin");

        let data = random_bytes(5 * BLOCK + 3);
        std::fs::write(&plain_path, &data).unwrap();

        let sealed = encrypt_stream(
            InputSource::File(plain_path),
            OutputSink::File(sealed_path.clone()),
            &bob.public,
            &config,
        )
        .unwrap();
        assert!(sealed.output.is_none());
        let on_disk = std::fs::metadata(&sealed_path).unwrap().len();
        assert_eq!(on_disk, sealed.counters.wire_bytes());

        decrypt_stream(
            InputSource::File(sealed_path),
            OutputSink::File(opened_path.clone()),
            &bob.secret,
            &config,
        )
        .unwrap();
        assert!(std::fs::read(&opened_path).unwrap() == data);
    }

    #[test]
    fn missing_input_file_is_io_error() {
        let bob = generate_key_pair().unwrap();
        let dir = tempfile::tempdir().unwrap();

        let err = encrypt_stream(
            InputSource::File(dir.path().join("does-not-exist")),
            OutputSink::Memory,
            &bob.public,
            &StreamConfig::default(),
        )
        .unwrap_err();
        assert!(matches!(err, StreamError::Io(ref e) if e.kind() == std::io::ErrorKind::NotFound));
    }

// # ❌ Failures

    #[test]
    fn decrypt_with_wrong_key_fails() {
        let bob = generate_key_pair().unwrap();
        let eve = generate_key_pair().unwrap();
        let config = StreamConfig::default();
        let wire = seal_memory(&bob.public, b"secret", &config).output.unwrap();

        let err = decrypt_stream(InputSource::Memory(wire), OutputSink::Memory, &eve.secret, &config).unwrap_err();
        assert!(err.is_authentication());
    }

    #[test]
    fn decrypt_truncated_stream_fails() {
        let bob = generate_key_pair().unwrap();
        let config = StreamConfig::default();
        let mut wire = seal_memory(&bob.public, &random_bytes(2 * BLOCK), &config).output.unwrap();
        wire.truncate(wire.len() - 1);

        let err = decrypt_stream(InputSource::Memory(wire), OutputSink::Memory, &bob.secret, &config).unwrap_err();
        assert!(err.is_truncation(), "got {err:?}");
    }

    #[test]
    fn reader_with_smaller_block_size_rejects_full_blocks() {
        let bob = generate_key_pair().unwrap();
        let wire = seal_memory(&bob.public, &vec![0u8; 1024], &StreamConfig::default()).output.unwrap();

        let small = StreamConfig::default().with_block_size(512);
        let err = decrypt_stream(InputSource::Memory(wire), OutputSink::Memory, &bob.secret, &small).unwrap_err();
        assert!(matches!(err, StreamError::Frame(_)), "got {err:?}");
    }

// # ❌ Configuration

    #[test]
    fn config_validation() {
        assert!(StreamConfig::default().validate().is_ok());
        assert_eq!(StreamConfig::new(None), StreamConfig::default());
        assert_eq!(StreamConfig::new(Some(0)).validate(), Err(ConfigError::ZeroBlockSize));
        assert_eq!(
            StreamConfig::new(Some(MAX_BLOCK_SIZE_LIMIT + 1)).validate(),
            Err(ConfigError::BlockSizeTooLarge { requested: MAX_BLOCK_SIZE_LIMIT + 1, limit: MAX_BLOCK_SIZE_LIMIT })
        );
        assert!(StreamConfig::new(Some(MAX_BLOCK_SIZE_LIMIT)).validate().is_ok());
    }

    #[test]
    fn invalid_config_is_rejected_everywhere() {
        let bob = generate_key_pair().unwrap();
        let bad = StreamConfig::new(Some(0));

        let err = encrypt_stream(InputSource::Memory(vec![1]), OutputSink::Memory, &bob.public, &bad).unwrap_err();
        assert!(matches!(err, StreamError::Config(ConfigError::ZeroBlockSize)));

        let err = decrypt_stream(InputSource::Memory(vec![]), OutputSink::Memory, &bob.secret, &bad).unwrap_err();
        assert!(matches!(err, StreamError::Config(_)));

        assert!(matches!(
            SealedWriter::with_config(bob.public, Vec::new(), bad.clone()),
            Err(StreamError::Config(_))
        ));
        assert!(matches!(
            SealedReader::with_config(&bob.secret, &[0u8; 0][..], bad),
            Err(StreamError::Config(_))
        ));
    }

// # ✅ Telemetry snapshot

    #[test]
    fn snapshot_serializes_without_output() {
        let bob = generate_key_pair().unwrap();
        let sealed = seal_memory(&bob.public, &random_bytes(2 * BLOCK), &StreamConfig::default());

        let json = sealed.to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["counters"]["blocks"], 2);
        assert_eq!(value["counters"]["headers"], 1);
        assert!(value.get("output").is_none());

        let back: TelemetrySnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back.counters, sealed.counters);
        assert!(back.output.is_none());
    }

    #[test]
    fn snapshot_records_stage_times() {
        let bob = generate_key_pair().unwrap();
        let sealed = seal_memory(&bob.public, &random_bytes(BLOCK), &StreamConfig::default());

        assert!(sealed.stage_times.get(Stage::Seal) > std::time::Duration::ZERO);
        assert!(sealed.total_stage_time() <= sealed.elapsed);
        assert!(sealed.throughput_plaintext_bytes_per_sec >= 0.0);
    }
}
