// SPDX-License-Identifier: MIT OR Apache-2.0

//! Asymmetric encryption towards a peer's public key.
//!
//! Key pairs are never stored. Both the identity key pair and the per-chat key pairs are
//! re-derived on demand from seed material and a salt, so the same inputs always yield the same
//! keys on every device holding them.
use hkdf::Hkdf;
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use thiserror::Error;

use crate::cbor::{DecodeError, EncodeError, decode_cbor, encode_cbor};
use crate::crypto::hpke::{HpkeCiphertext, HpkeError, hpke_open, hpke_seal};
use crate::crypto::x25519::{PublicKey, SECRET_KEY_SIZE, SecretKey};

/// Domain separator mixed into every HKDF expansion.
const KEY_DERIVATION_INFO: &[u8] = b"palantir asymmetric key pair v1";

/// HPKE context string binding ciphertexts to this protocol.
const HPKE_INFO: &[u8] = b"palantir hpke v1";

/// X25519 key pair.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyPair {
    secret_key: SecretKey,
    public_key: PublicKey,
}

impl KeyPair {
    pub fn from_secret_key(secret_key: SecretKey) -> Self {
        let public_key = secret_key.public_key();
        Self {
            secret_key,
            public_key,
        }
    }

    pub fn public_key(&self) -> &PublicKey {
        &self.public_key
    }

    pub fn secret_key(&self) -> &SecretKey {
        &self.secret_key
    }
}

/// Interface for deterministic key derivation and asymmetric encryption.
pub trait Encryption {
    /// Derives a key pair from `seed_material` and `salt`. Equal inputs yield equal key pairs.
    fn create_asymmetric_key_pair(
        &self,
        seed_material: &[u8],
        salt: &[u8],
    ) -> Result<KeyPair, EncryptionError>;

    /// Encrypts `plaintext` so that only the holder of the secret half of `public_key` can read
    /// it. `aad` is authenticated but not encrypted.
    fn encrypt(
        &self,
        public_key: &PublicKey,
        plaintext: &[u8],
        aad: &[u8],
    ) -> Result<Vec<u8>, EncryptionError>;

    fn decrypt(
        &self,
        key_pair: &KeyPair,
        ciphertext: &[u8],
        aad: &[u8],
    ) -> Result<Vec<u8>, EncryptionError>;
}

/// HKDF-SHA256 key derivation with HPKE (X25519, HKDF-SHA256, ChaCha20Poly1305) encryption.
///
/// Ciphertexts are the CBOR encoding of [`HpkeCiphertext`].
#[derive(Clone, Copy, Debug, Default)]
pub struct HpkeEncryption;

impl Encryption for HpkeEncryption {
    fn create_asymmetric_key_pair(
        &self,
        seed_material: &[u8],
        salt: &[u8],
    ) -> Result<KeyPair, EncryptionError> {
        let hkdf = Hkdf::<Sha256>::new(Some(salt), seed_material);
        let mut okm = [0u8; SECRET_KEY_SIZE];
        hkdf.expand(KEY_DERIVATION_INFO, &mut okm)
            .map_err(|_| EncryptionError::KeyDerivation)?;
        Ok(KeyPair::from_secret_key(SecretKey::from_bytes(okm)))
    }

    fn encrypt(
        &self,
        public_key: &PublicKey,
        plaintext: &[u8],
        aad: &[u8],
    ) -> Result<Vec<u8>, EncryptionError> {
        let ciphertext = hpke_seal(public_key, HPKE_INFO, aad, plaintext)?;
        Ok(encode_cbor(&ciphertext)?)
    }

    fn decrypt(
        &self,
        key_pair: &KeyPair,
        ciphertext: &[u8],
        aad: &[u8],
    ) -> Result<Vec<u8>, EncryptionError> {
        let ciphertext: HpkeCiphertext = decode_cbor(ciphertext)?;
        let plaintext = hpke_open(&ciphertext, key_pair.secret_key(), HPKE_INFO, aad)?;
        Ok(plaintext)
    }
}

#[derive(Debug, Error)]
pub enum EncryptionError {
    #[error("could not expand key material")]
    KeyDerivation,

    #[error(transparent)]
    Hpke(#[from] HpkeError),

    #[error(transparent)]
    Encode(#[from] EncodeError),

    #[error(transparent)]
    Decode(#[from] DecodeError),
}
