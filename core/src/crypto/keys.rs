// ## 📂 File: `src/crypto/keys.rs`

//! crypto/keys.rs
//! Fixed-size X25519 key types and ephemeral key-pair generation.
//!
//! Design notes:
//! - Keys are `[u8; 32]` newtypes, so a size mismatch cannot reach the wire code.
//! - Secret keys are zeroized on drop and never printed.
//! - Generation goes through `try_fill_bytes` so an exhausted random source
//!   surfaces as `CryptoError::Entropy` instead of a panic.

use std::fmt;

use rand::rngs::OsRng;
use rand::{CryptoRng, RngCore};
use x25519_dalek::StaticSecret;
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

use crate::crypto::types::{CryptoError, KEY_LEN_32};

#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct PublicKey([u8; KEY_LEN_32]);

impl PublicKey {
    pub const LEN: usize = KEY_LEN_32;

    pub const fn from_bytes(bytes: [u8; KEY_LEN_32]) -> Self {
        Self(bytes)
    }

    /// Build from a slice, rejecting anything that is not exactly 32 bytes.
    pub fn try_from_slice(bytes: &[u8]) -> Result<Self, CryptoError> {
        let arr: [u8; KEY_LEN_32] = bytes.try_into().map_err(|_| CryptoError::InvalidKeyLen {
            expected: KEY_LEN_32,
            actual: bytes.len(),
        })?;
        Ok(Self(arr))
    }

    pub fn as_bytes(&self) -> &[u8; KEY_LEN_32] {
        &self.0
    }

    pub fn to_bytes(self) -> [u8; KEY_LEN_32] {
        self.0
    }
}

impl From<[u8; KEY_LEN_32]> for PublicKey {
    fn from(bytes: [u8; KEY_LEN_32]) -> Self {
        Self(bytes)
    }
}

impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PublicKey({})", hex::encode(self.0))
    }
}

impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct SecretKey([u8; KEY_LEN_32]);

impl SecretKey {
    pub const LEN: usize = KEY_LEN_32;

    pub fn from_bytes(bytes: [u8; KEY_LEN_32]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; KEY_LEN_32] {
        &self.0
    }

    /// Derive the matching public key (X25519 base-point multiplication).
    pub fn public_key(&self) -> PublicKey {
        let secret = self.to_static_secret();
        PublicKey(x25519_dalek::PublicKey::from(&secret).to_bytes())
    }

    pub(crate) fn to_static_secret(&self) -> StaticSecret {
        StaticSecret::from(self.0)
    }
}

impl fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SecretKey(<redacted>)")
    }
}

/// An X25519 key pair. Writers generate one per session and discard it with the writer.
#[derive(Clone, Debug)]
pub struct KeyPair {
    pub public: PublicKey,
    pub secret: SecretKey,
}

impl KeyPair {
    /// Generate from the operating system CSPRNG.
    pub fn generate() -> Result<Self, CryptoError> {
        Self::generate_with(&mut OsRng)
    }

    /// Generate from a caller-supplied CSPRNG.
    pub fn generate_with<R>(rng: &mut R) -> Result<Self, CryptoError>
    where
        R: RngCore + CryptoRng + ?Sized,
    {
        let mut seed = Zeroizing::new([0u8; KEY_LEN_32]);
        rng.try_fill_bytes(seed.as_mut())
            .map_err(|e| CryptoError::Entropy(e.to_string()))?;

        let secret = SecretKey(*seed);
        let public = secret.public_key();
        Ok(Self { public, secret })
    }
}

/// `generate_key_pair() -> (public_key, secret_key)` over the OS random source.
pub fn generate_key_pair() -> Result<KeyPair, CryptoError> {
    KeyPair::generate()
}
