use std::io::{self, Write};

use byteorder::{ByteOrder, LittleEndian, WriteBytesExt};

use crate::constants::NONCE_FIELD_LEN;
use crate::crypto::types::Nonce;
use crate::stream::framing::types::BlockHeader;

/// Encode a block header into its fixed wire layout.
///
/// Layout:
///
/// ```text
/// [ nonce (24) ]
/// [ sealed_len (8, u64 LE) ]
/// ```
pub fn encode_block_header(header: &BlockHeader) -> [u8; BlockHeader::LEN] {
    let mut out = [0u8; BlockHeader::LEN];
    out[..NONCE_FIELD_LEN].copy_from_slice(&header.nonce);
    LittleEndian::write_u64(&mut out[NONCE_FIELD_LEN..], header.sealed_len);
    out
}

/// Encode a whole block into a fresh buffer.
pub fn encode_block(nonce: &Nonce, sealed: &[u8]) -> Vec<u8> {
    let header = BlockHeader { nonce: *nonce, sealed_len: sealed.len() as u64 };
    let mut out = Vec::with_capacity(BlockHeader::LEN + sealed.len());
    out.extend_from_slice(&encode_block_header(&header));
    out.extend_from_slice(sealed);
    out
}

/// Write one block to `out` as three ordered writes: nonce, length, payload.
///
/// Returns the number of bytes written. A failure at any step is returned as-is;
/// whatever already reached the sink is an incomplete block the reader will
/// report as truncated.
pub fn write_block<W: Write + ?Sized>(out: &mut W, nonce: &Nonce, sealed: &[u8]) -> io::Result<usize> {
    out.write_all(nonce)?;
    out.write_u64::<LittleEndian>(sealed.len() as u64)?;
    out.write_all(sealed)?;
    Ok(BlockHeader::LEN + sealed.len())
}
