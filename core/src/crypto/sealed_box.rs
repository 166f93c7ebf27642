// ## 📂 File: `src/crypto/sealed_box.rs`

//! crypto/sealed_box.rs
//! Asymmetric sealed box: X25519 agreement, HKDF-SHA256, XChaCha20-Poly1305.
//!
//! Design notes:
//! - `seal(pt, nonce, recipient_pk, sender_sk)` and `open(ct, nonce, sender_pk, recipient_sk)`
//!   agree on the same key: DH is symmetric and the HKDF `info` always lists the
//!   sender key first, then the recipient key.
//! - A stream seals many blocks under one key pair, so the derived key is
//!   precomputed once per session (`SharedKey`) rather than per block.
//! - Output length is always `plaintext.len() + TAG_LEN`; an empty plaintext is valid.
//! - Tag verification fails closed. No partial plaintext is ever returned.

use chacha20poly1305::aead::{Aead, KeyInit};
use chacha20poly1305::{XChaCha20Poly1305, XNonce};
use hkdf::Hkdf;
use sha2::Sha256;
use zeroize::Zeroizing;

use crate::constants::SEAL_KDF_LABEL;
use crate::crypto::keys::{PublicKey, SecretKey};
use crate::crypto::types::{CryptoError, Nonce, KEY_LEN_32, TAG_LEN};

/// Session key derived from one side's secret key and the other side's public key.
#[derive(Clone)]
pub struct SharedKey {
    cipher: XChaCha20Poly1305,
}

impl SharedKey {
    /// Key for sealing from `sender` to `recipient`.
    pub fn for_sealing(recipient: &PublicKey, sender: &SecretKey) -> Result<Self, CryptoError> {
        let sender_pk = sender.public_key();
        Self::derive(sender, recipient, &sender_pk, recipient)
    }

    /// Key for opening what `sender` sealed to the holder of `recipient`.
    pub fn for_opening(sender: &PublicKey, recipient: &SecretKey) -> Result<Self, CryptoError> {
        let recipient_pk = recipient.public_key();
        Self::derive(recipient, sender, sender, &recipient_pk)
    }

    fn derive(
        own: &SecretKey,
        peer: &PublicKey,
        sender_pk: &PublicKey,
        recipient_pk: &PublicKey,
    ) -> Result<Self, CryptoError> {
        let peer_point = x25519_dalek::PublicKey::from(peer.to_bytes());
        let shared = own.to_static_secret().diffie_hellman(&peer_point);
        if !shared.was_contributory() {
            return Err(CryptoError::NonContributory);
        }

        let mut info = Vec::with_capacity(SEAL_KDF_LABEL.len() + 2 * KEY_LEN_32);
        info.extend_from_slice(SEAL_KDF_LABEL);
        info.extend_from_slice(sender_pk.as_bytes());
        info.extend_from_slice(recipient_pk.as_bytes());

        let hk = Hkdf::<Sha256>::new(None, shared.as_bytes());
        let mut key = Zeroizing::new([0u8; KEY_LEN_32]);
        hk.expand(&info, key.as_mut())
            .map_err(|_| CryptoError::Failure("HKDF expand failed (SHA-256)".into()))?;

        let cipher = XChaCha20Poly1305::new_from_slice(key.as_ref())
            .map_err(|_| CryptoError::InvalidKeyLen { expected: KEY_LEN_32, actual: key.len() })?;
        Ok(Self { cipher })
    }

    /// Seal `plaintext` under `nonce`. Never fails for well-formed inputs.
    pub fn seal(&self, nonce: &Nonce, plaintext: &[u8]) -> Result<Vec<u8>, CryptoError> {
        self.cipher
            .encrypt(XNonce::from_slice(nonce), plaintext)
            .map_err(|_| CryptoError::Failure("XChaCha20-Poly1305 seal failed".into()))
    }

    /// Open `sealed` under `nonce`, returning the plaintext only if the tag verifies.
    pub fn open(&self, nonce: &Nonce, sealed: &[u8]) -> Result<Vec<u8>, CryptoError> {
        if sealed.len() < TAG_LEN {
            return Err(CryptoError::TagMismatch);
        }
        self.cipher
            .decrypt(XNonce::from_slice(nonce), sealed)
            .map_err(|_| CryptoError::TagMismatch)
    }
}

/// One-shot seal. Prefer `SharedKey` when sealing more than one message.
pub fn seal(
    plaintext: &[u8],
    nonce: &Nonce,
    recipient_pk: &PublicKey,
    sender_sk: &SecretKey,
) -> Result<Vec<u8>, CryptoError> {
    SharedKey::for_sealing(recipient_pk, sender_sk)?.seal(nonce, plaintext)
}

/// One-shot open.
pub fn open(
    sealed: &[u8],
    nonce: &Nonce,
    sender_pk: &PublicKey,
    recipient_sk: &SecretKey,
) -> Result<Vec<u8>, CryptoError> {
    SharedKey::for_opening(sender_pk, recipient_sk)?.open(nonce, sealed)
}
