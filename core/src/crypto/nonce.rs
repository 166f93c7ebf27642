// ## 📂 File: `src/crypto/nonce.rs`

//! Random per-block nonces.
//!
//! Blocks are sealed under one session key for the whole stream, so every nonce
//! is drawn fresh from the CSPRNG. 24 bytes keeps the collision probability
//! negligible without any counter state.

use rand::{CryptoRng, RngCore};

use crate::crypto::types::{CryptoError, Nonce, NONCE_LEN_24};

/// Draw a fresh 24-byte nonce.
#[inline]
pub fn random_nonce<R>(rng: &mut R) -> Result<Nonce, CryptoError>
where
    R: RngCore + CryptoRng + ?Sized,
{
    let mut nonce = [0u8; NONCE_LEN_24];
    rng.try_fill_bytes(&mut nonce)
        .map_err(|e| CryptoError::Entropy(e.to_string()))?;
    Ok(nonce)
}
