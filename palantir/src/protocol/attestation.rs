// SPDX-License-Identifier: MIT OR Apache-2.0

use palantir_core::hash::HASH_LEN;
use palantir_core::identity::SIGNATURE_LEN;
use palantir_core::{Hash, Signature};

use crate::protocol::PayloadError;

/// Size of an encoded attestation payload.
pub const ATTESTATION_PAYLOAD_LEN: usize = HASH_LEN + SIGNATURE_LEN;

/// Signed document hash published to the ledger, encoded as `document_hash || signature`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AttestationPayload {
    pub document_hash: Hash,
    pub signature: Signature,
}

impl AttestationPayload {
    pub fn to_bytes(&self) -> [u8; ATTESTATION_PAYLOAD_LEN] {
        let mut bytes = [0u8; ATTESTATION_PAYLOAD_LEN];
        bytes[..HASH_LEN].copy_from_slice(self.document_hash.as_bytes());
        bytes[HASH_LEN..].copy_from_slice(self.signature.as_bytes());
        bytes
    }

    /// Reads a payload from a ledger entry. Bytes behind the fixed-size payload are padding.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, PayloadError> {
        if bytes.len() < ATTESTATION_PAYLOAD_LEN {
            return Err(PayloadError::InvalidLength(
                bytes.len(),
                ATTESTATION_PAYLOAD_LEN,
            ));
        }
        Ok(Self {
            document_hash: Hash::try_from(&bytes[..HASH_LEN])?,
            signature: Signature::try_from(&bytes[HASH_LEN..ATTESTATION_PAYLOAD_LEN])?,
        })
    }
}
