// SPDX-License-Identifier: MIT OR Apache-2.0

//! Ed25519 keys and signatures used to authenticate ledger entries.
//!
//! Identity payloads, contact requests and document attestations are all signed with an Ed25519
//! [`PrivateKey`]. Signing and verification go through the [`SignatureGenerator`] and
//! [`SignatureValidator`] interfaces so alternative schemes can be plugged into the protocol
//! steps; [`Ed25519Signer`] is the implementation used by default.
use std::fmt;

use ed25519_dalek::{SigningKey, Verifier, VerifyingKey};
use thiserror::Error;

use crate::crypto::{Rng, RngError};
use crate::serde::impl_hex_serde;

pub const PRIVATE_KEY_LEN: usize = ed25519_dalek::SECRET_KEY_LENGTH;

pub const PUBLIC_KEY_LEN: usize = ed25519_dalek::PUBLIC_KEY_LENGTH;

pub const SIGNATURE_LEN: usize = ed25519_dalek::SIGNATURE_LENGTH;

/// Private Ed25519 key used for signing.
#[derive(Clone)]
pub struct PrivateKey(SigningKey);

impl PrivateKey {
    /// Generates a new private key from the given random number generator.
    pub fn random(rng: &Rng) -> Result<Self, RngError> {
        Ok(Self::from_bytes(&rng.random_array()?))
    }

    pub fn from_bytes(bytes: &[u8; PRIVATE_KEY_LEN]) -> Self {
        Self(SigningKey::from_bytes(bytes))
    }

    pub fn to_bytes(&self) -> [u8; PRIVATE_KEY_LEN] {
        self.0.to_bytes()
    }

    pub fn public_key(&self) -> PublicKey {
        PublicKey(self.0.verifying_key())
    }

    pub fn sign(&self, bytes: &[u8]) -> Signature {
        use ed25519_dalek::Signer;
        Signature(self.0.sign(bytes).to_bytes())
    }
}

impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Do not reveal secret values when printing debug info.
        f.debug_tuple("PrivateKey").field(&"***").finish()
    }
}

/// Public Ed25519 key used for verifying signatures.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct PublicKey(VerifyingKey);

impl PublicKey {
    pub fn from_bytes(bytes: &[u8; PUBLIC_KEY_LEN]) -> Result<Self, IdentityError> {
        let key = VerifyingKey::from_bytes(bytes).map_err(|_| IdentityError::InvalidPublicKey)?;
        Ok(Self(key))
    }

    pub fn as_bytes(&self) -> &[u8; PUBLIC_KEY_LEN] {
        self.0.as_bytes()
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.as_bytes())
    }

    /// Returns `true` if the signature was created by the private counterpart over `bytes`.
    pub fn verify(&self, bytes: &[u8], signature: &Signature) -> bool {
        let signature = ed25519_dalek::Signature::from_bytes(signature.as_bytes());
        self.0.verify(bytes, &signature).is_ok()
    }
}

impl TryFrom<&[u8]> for PublicKey {
    type Error = IdentityError;

    fn try_from(value: &[u8]) -> Result<Self, Self::Error> {
        let bytes: [u8; PUBLIC_KEY_LEN] = value
            .try_into()
            .map_err(|_| IdentityError::InvalidLength(value.len(), PUBLIC_KEY_LEN))?;
        Self::from_bytes(&bytes)
    }
}

impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("PublicKey").field(&self.to_hex()).finish()
    }
}

impl_hex_serde!(PublicKey);

/// Ed25519 signature.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Signature([u8; SIGNATURE_LEN]);

impl Signature {
    pub fn from_bytes(bytes: [u8; SIGNATURE_LEN]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; SIGNATURE_LEN] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl TryFrom<&[u8]> for Signature {
    type Error = IdentityError;

    fn try_from(value: &[u8]) -> Result<Self, Self::Error> {
        let bytes: [u8; SIGNATURE_LEN] = value
            .try_into()
            .map_err(|_| IdentityError::InvalidLength(value.len(), SIGNATURE_LEN))?;
        Ok(Self(bytes))
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl fmt::Debug for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Signature").field(&self.to_hex()).finish()
    }
}

impl_hex_serde!(Signature);

/// Creates signatures over arbitrary byte payloads.
pub trait SignatureGenerator {
    fn sign(&self, private_key: &PrivateKey, bytes: &[u8]) -> Signature;
}

/// Checks signatures over arbitrary byte payloads.
pub trait SignatureValidator {
    fn is_valid(&self, public_key: &PublicKey, bytes: &[u8], signature: &Signature) -> bool;
}

/// Plain Ed25519 signing and verification.
#[derive(Clone, Copy, Debug, Default)]
pub struct Ed25519Signer;

impl SignatureGenerator for Ed25519Signer {
    fn sign(&self, private_key: &PrivateKey, bytes: &[u8]) -> Signature {
        private_key.sign(bytes)
    }
}

impl SignatureValidator for Ed25519Signer {
    fn is_valid(&self, public_key: &PublicKey, bytes: &[u8], signature: &Signature) -> bool {
        public_key.verify(bytes, signature)
    }
}

#[derive(Debug, Error)]
pub enum IdentityError {
    #[error("invalid length {0} bytes, expected {1} bytes")]
    InvalidLength(usize, usize),

    #[error("bytes do not represent a valid ed25519 public key")]
    InvalidPublicKey,
}
