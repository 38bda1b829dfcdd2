// SPDX-License-Identifier: MIT OR Apache-2.0

use palantir_core::crypto::x25519::{PUBLIC_KEY_SIZE, PublicKey as EncryptionPublicKey};
use palantir_core::identity::SIGNATURE_LEN;
use palantir_core::{
    Address, KeyedAddress, PublicKey, Signature, SignatureGenerator, SignatureValidator,
};

use crate::protocol::PayloadError;
use crate::protocol::marker::{append_end_marker, strip_end_marker};

/// Size of an identity payload without end marker.
pub const IDENTITY_PAYLOAD_LEN: usize = PUBLIC_KEY_SIZE + SIGNATURE_LEN;

/// Builds `public_key || signature || END_MARKER`.
///
/// The signature is made over the public key bytes with the private key of the address the
/// payload gets published at.
pub fn build_signed_identity_payload<S: SignatureGenerator>(
    signer: &S,
    public_key: &EncryptionPublicKey,
    keyed_address: &KeyedAddress,
) -> Vec<u8> {
    let signature = signer.sign(&keyed_address.private_key, public_key.as_bytes());

    let mut payload = Vec::with_capacity(IDENTITY_PAYLOAD_LEN);
    payload.extend_from_slice(public_key.as_bytes());
    payload.extend_from_slice(signature.as_bytes());
    append_end_marker(payload)
}

/// Reads an identity payload found at `address` and checks its signature against the address.
pub fn parse_signed_identity_payload<V: SignatureValidator>(
    validator: &V,
    bytes: &[u8],
    address: &Address,
) -> Result<EncryptionPublicKey, PayloadError> {
    let payload = strip_end_marker(bytes)?;
    if payload.len() != IDENTITY_PAYLOAD_LEN {
        return Err(PayloadError::InvalidLength(
            payload.len(),
            IDENTITY_PAYLOAD_LEN,
        ));
    }

    let (public_key_bytes, signature_bytes) = payload.split_at(PUBLIC_KEY_SIZE);
    let public_key = EncryptionPublicKey::try_from(public_key_bytes)?;
    let signature = Signature::try_from(signature_bytes)?;

    let verifying_key = PublicKey::try_from(address)?;
    if !validator.is_valid(&verifying_key, public_key.as_bytes(), &signature) {
        return Err(PayloadError::InvalidSignature);
    }

    Ok(public_key)
}
