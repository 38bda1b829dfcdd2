// SPDX-License-Identifier: MIT OR Apache-2.0

//! Sealing secret salts towards a contact's encryption key.
//!
//! Uses HPKE base mode ([RFC 9180]) with X25519 key encapsulation, HKDF-SHA256 and
//! ChaCha20Poly1305.
//!
//! [RFC 9180]: https://www.rfc-editor.org/rfc/rfc9180
use hpke_rs::{Hpke, HpkePrivateKey, HpkePublicKey, Mode};
use hpke_rs_crypto::types::{AeadAlgorithm, KdfAlgorithm, KemAlgorithm};
use hpke_rs_rust_crypto::HpkeRustCrypto;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::crypto::x25519::{PublicKey, SecretKey};

/// Sealed payload as it is stored on the ledger.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HpkeCiphertext {
    /// Ephemeral public key of the sender.
    #[serde(with = "serde_bytes")]
    pub kem_output: Vec<u8>,

    #[serde(with = "serde_bytes")]
    pub ciphertext: Vec<u8>,
}

fn suite() -> Hpke<HpkeRustCrypto> {
    Hpke::new(
        Mode::Base,
        KemAlgorithm::DhKem25519,
        KdfAlgorithm::HkdfSha256,
        AeadAlgorithm::ChaCha20Poly1305,
    )
}

/// Seals `plaintext` for the holder of `recipient`'s secret key.
///
/// Opening only succeeds with the same `info` and `aad`.
pub fn hpke_seal(
    recipient: &PublicKey,
    info: &[u8],
    aad: &[u8],
    plaintext: &[u8],
) -> Result<HpkeCiphertext, HpkeError> {
    let recipient = HpkePublicKey::new(recipient.as_bytes().to_vec());
    let (kem_output, ciphertext) = suite()
        .seal(&recipient, info, aad, plaintext, None, None, None)
        .map_err(HpkeError::Seal)?;
    Ok(HpkeCiphertext {
        kem_output,
        ciphertext,
    })
}

pub fn hpke_open(
    sealed: &HpkeCiphertext,
    secret_key: &SecretKey,
    info: &[u8],
    aad: &[u8],
) -> Result<Vec<u8>, HpkeError> {
    let secret_key = HpkePrivateKey::new(secret_key.as_bytes().to_vec());
    suite()
        .open(
            &sealed.kem_output,
            &secret_key,
            info,
            aad,
            &sealed.ciphertext,
            None,
            None,
            None,
        )
        .map_err(HpkeError::Open)
}

#[derive(Debug, Error)]
pub enum HpkeError {
    #[error("sealing salt failed: {0:?}")]
    Seal(hpke_rs::HpkeError),

    /// Wrong key or a different context, expected for entries addressed to somebody else.
    #[error("salt can not be opened: {0:?}")]
    Open(hpke_rs::HpkeError),
}
