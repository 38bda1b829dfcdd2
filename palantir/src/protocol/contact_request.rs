// SPDX-License-Identifier: MIT OR Apache-2.0

use palantir_core::cbor::{decode_cbor, encode_cbor};
use palantir_core::crypto::x25519::PublicKey as EncryptionPublicKey;
use palantir_core::{
    Address, PrivateKey, PublicKey, Signature, SignatureGenerator, SignatureValidator,
};
use serde::{Deserialize, Serialize};

use crate::protocol::PayloadError;
use crate::protocol::marker::{append_end_marker, strip_end_marker};

/// Request to open a chat, sent to the request address of the peer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactRequest {
    /// Address both peers will write chat entries to.
    pub chat_address: Address,

    /// Address where the accepting peer leaves the encrypted chat salt.
    pub chat_key_address: Address,

    /// Identity address of the requester. Signatures are checked against it.
    pub public_key_address: Address,

    /// Request address of the requester.
    pub contact_address: Address,

    /// Identity encryption key of the requester.
    pub public_key: EncryptionPublicKey,

    pub name: String,
}

#[derive(Serialize, Deserialize)]
struct SignedEnvelope {
    #[serde(with = "serde_bytes")]
    body: Vec<u8>,
    signature: Signature,
}

impl ContactRequest {
    /// Signs the request with the private key of the requester's identity address.
    pub fn to_signed_bytes<S: SignatureGenerator>(
        &self,
        signer: &S,
        private_key: &PrivateKey,
    ) -> Result<Vec<u8>, PayloadError> {
        let body = encode_cbor(self)?;
        let signature = signer.sign(private_key, &body);
        let envelope = encode_cbor(&SignedEnvelope { body, signature })?;
        Ok(append_end_marker(envelope))
    }

    /// Reads a signed request and checks it was signed by the identity it claims to come from.
    pub fn from_signed_bytes<V: SignatureValidator>(
        validator: &V,
        bytes: &[u8],
    ) -> Result<Self, PayloadError> {
        let envelope: SignedEnvelope = decode_cbor(strip_end_marker(bytes)?)?;
        let request: ContactRequest = decode_cbor(&envelope.body[..])?;

        let verifying_key = PublicKey::try_from(&request.public_key_address)?;
        if !validator.is_valid(&verifying_key, &envelope.body, &envelope.signature) {
            return Err(PayloadError::InvalidSignature);
        }

        Ok(request)
    }
}
