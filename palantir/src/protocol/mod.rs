// SPDX-License-Identifier: MIT OR Apache-2.0

//! Protocol steps shared between interactors.
//!
//! Steps are plain values borrowing the collaborators they need. Interactors compose them instead
//! of inheriting from each other, for example both identity interactors use the same
//! [`IdentityPublisher`].
//!
//! Ledger entries have no length field and may be padded by the transport. Every variable-length
//! payload is therefore terminated with [`END_MARKER`].
mod attestation;
mod chat;
mod contact_request;
mod identity;
mod identity_payload;
mod key_exchange;
mod marker;
mod publish;

pub use attestation::{ATTESTATION_PAYLOAD_LEN, AttestationPayload};
pub use chat::{open_chat_message, seal_chat_message};
pub use contact_request::ContactRequest;
pub use identity::{IDENTITY_ADDRESS_INDEX, UserIdentity};
pub use identity_payload::{
    IDENTITY_PAYLOAD_LEN, build_signed_identity_payload, parse_signed_identity_payload,
};
pub use key_exchange::KeyExchange;
pub use marker::{END_MARKER, append_end_marker, strip_end_marker};
pub use publish::{IdentityPublisher, send_contact_details};

use palantir_core::cbor::{DecodeError, EncodeError};
use palantir_core::crypto::EncryptionError;
use palantir_core::crypto::x25519::X25519Error;
use palantir_core::{HashError, IdentityError};
use thiserror::Error;

/// Errors which can occur while building or reading protocol payloads.
#[derive(Debug, Error)]
pub enum PayloadError {
    #[error("payload is not terminated with an end marker")]
    MissingEndMarker,

    #[error("invalid payload length {0} bytes, expected {1} bytes")]
    InvalidLength(usize, usize),

    #[error("signature does not match payload")]
    InvalidSignature,

    #[error(transparent)]
    Identity(#[from] IdentityError),

    #[error(transparent)]
    Key(#[from] X25519Error),

    #[error(transparent)]
    Hash(#[from] HashError),

    #[error(transparent)]
    Encryption(#[from] EncryptionError),

    #[error(transparent)]
    Encode(#[from] EncodeError),

    #[error(transparent)]
    Decode(#[from] DecodeError),
}
