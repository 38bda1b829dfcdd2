// SPDX-License-Identifier: MIT OR Apache-2.0

//! Values passed between interactors, the ledger and the contact repository.
use palantir_core::Address;
use palantir_core::crypto::x25519::PublicKey;
use serde::{Deserialize, Serialize};

/// Raw ledger entry.
///
/// Entries are immutable once written, they can only be ignored by later reads.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Message {
    pub payload: Vec<u8>,
    pub address: Address,
}

impl Message {
    pub fn new(address: Address, payload: Vec<u8>) -> Self {
        Self { payload, address }
    }
}

/// Locally stored relationship to another peer.
///
/// Records are only ever upserted, a declined contact keeps its record with `rejected` set.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub chat_address: Address,
    /// Identity address of the local user owning this record.
    pub public_key_address: Address,
    pub accepted: bool,
    pub rejected: bool,
}

/// Identity of a peer as published on the ledger.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContactInformation {
    /// Key used to encrypt secrets towards the peer.
    pub public_key: PublicKey,
    /// Mailbox receiving contact requests for the peer.
    pub contact_address: Address,
}

/// Decrypted chat entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Identity address of the author.
    pub sender: Address,
    pub text: String,
    /// Seconds since UNIX epoch at the time of sending.
    pub timestamp: u64,
}
