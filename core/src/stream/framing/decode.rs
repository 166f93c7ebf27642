use std::io::Read;

use byteorder::{ByteOrder, LittleEndian};

use crate::constants::{LENGTH_FIELD_LEN, NONCE_FIELD_LEN};
use crate::crypto::types::Nonce;
use crate::stream::framing::types::{BlockHeader, BlockView, FrameError, WireField};
use crate::stream::io::read_exact_or_eof;
use crate::types::StreamError;

#[inline]
pub fn parse_block_header(wire: &[u8]) -> Result<BlockHeader, FrameError> {
    if wire.len() < NONCE_FIELD_LEN {
        return Err(FrameError::Truncated {
            field: WireField::Nonce,
            expected: NONCE_FIELD_LEN,
            actual: wire.len(),
        });
    }
    if wire.len() < BlockHeader::LEN {
        return Err(FrameError::Truncated {
            field: WireField::Length,
            expected: LENGTH_FIELD_LEN,
            actual: wire.len() - NONCE_FIELD_LEN,
        });
    }

    let mut nonce: Nonce = [0u8; NONCE_FIELD_LEN];
    nonce.copy_from_slice(&wire[..NONCE_FIELD_LEN]);
    let sealed_len = LittleEndian::read_u64(&wire[NONCE_FIELD_LEN..BlockHeader::LEN]);

    Ok(BlockHeader { nonce, sealed_len })
}

/// Decode the block at the front of `wire`, borrowing its payload.
///
/// Trailing bytes after the block are left for the caller.
pub fn decode_block(wire: &[u8]) -> Result<BlockView<'_>, FrameError> {
    let header = parse_block_header(wire)?;
    let body = &wire[BlockHeader::LEN..];

    let sealed_len = usize::try_from(header.sealed_len).unwrap_or(usize::MAX);
    if body.len() < sealed_len {
        return Err(FrameError::Truncated {
            field: WireField::Payload,
            expected: sealed_len,
            actual: body.len(),
        });
    }

    Ok(BlockView { header, sealed: &body[..sealed_len] })
}

/// Split a buffer of back-to-back blocks (no session header) into views.
pub fn decode_blocks(mut wire: &[u8]) -> Result<Vec<BlockView<'_>>, FrameError> {
    let mut blocks = Vec::new();
    while !wire.is_empty() {
        let block = decode_block(wire)?;
        wire = &wire[block.wire_len()..];
        blocks.push(block);
    }
    Ok(blocks)
}

/// Read the next block header from a byte source.
///
/// - `Ok(None)`: the source was exhausted exactly at a block boundary (clean end).
/// - `Truncated`: the source ended part way through the nonce or length field.
/// - `Oversized`: the declared length exceeds `max_sealed_len`; nothing is allocated.
pub fn read_block_header<R: Read + ?Sized>(
    r: &mut R,
    max_sealed_len: u64,
) -> Result<Option<BlockHeader>, StreamError> {
    let mut nonce: Nonce = [0u8; NONCE_FIELD_LEN];
    let n = read_exact_or_eof(r, &mut nonce)?;
    if n == 0 {
        return Ok(None);
    }
    if n < NONCE_FIELD_LEN {
        return Err(StreamError::Truncated { field: WireField::Nonce });
    }

    let mut len_buf = [0u8; LENGTH_FIELD_LEN];
    if read_exact_or_eof(r, &mut len_buf)? < LENGTH_FIELD_LEN {
        return Err(StreamError::Truncated { field: WireField::Length });
    }
    let sealed_len = LittleEndian::read_u64(&len_buf);

    if sealed_len > max_sealed_len {
        return Err(FrameError::Oversized { len: sealed_len, limit: max_sealed_len }.into());
    }

    Ok(Some(BlockHeader { nonce, sealed_len }))
}

/// Read exactly `header.sealed_len` payload bytes.
pub fn read_sealed_payload<R: Read + ?Sized>(
    r: &mut R,
    header: &BlockHeader,
) -> Result<Vec<u8>, StreamError> {
    // Bounded by `read_block_header`, so this always fits.
    let len = usize::try_from(header.sealed_len)
        .map_err(|_| FrameError::Oversized { len: header.sealed_len, limit: usize::MAX as u64 })?;

    let mut sealed = vec![0u8; len];
    if read_exact_or_eof(r, &mut sealed)? < len {
        return Err(StreamError::Truncated { field: WireField::Payload });
    }
    Ok(sealed)
}
