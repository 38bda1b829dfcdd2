// SPDX-License-Identifier: MIT OR Apache-2.0

//! Interfaces of the collaborators the interactors are built on.
use std::future::Future;

use palantir_core::{Address, PublicKey};

use crate::entity::{Contact, ContactInformation, Message};
use crate::error::LedgerError;
use crate::response::Response;

/// Interface for reading and writing ledger entries.
///
/// Two variants of the trait are provided: one which is thread-safe (implementing `Sync`) and one
/// which is purely intended for single-threaded execution contexts.
#[trait_variant::make(Messenger: Send)]
pub trait LocalMessenger {
    /// Append an entry to the ledger.
    async fn send_message(&self, message: Message) -> Result<(), LedgerError>;

    /// Get all entries published at an address, in the order the ledger returns them.
    ///
    /// Reads may lag behind writes and may contain entries which were not written by this
    /// protocol.
    async fn get_messages_by_address(&self, address: &Address)
    -> Result<Vec<Message>, LedgerError>;
}

/// Interface for local contact records and identity lookups.
///
/// Two variants of the trait are provided: one which is thread-safe (implementing `Sync`) and one
/// which is purely intended for single-threaded execution contexts.
#[trait_variant::make(ContactRepository: Send)]
pub trait LocalContactRepository {
    /// Insert or update the contact identified by `chat_address` for the local user
    /// `public_key_address`.
    async fn add_contact(
        &self,
        chat_address: &Address,
        accepted: bool,
        public_key_address: &Address,
    ) -> Result<(), LedgerError>;

    /// Load the identity published at `address`.
    ///
    /// Fails with [`ResponseCode::NoContactInformationPresent`](crate::ResponseCode) when no valid
    /// identity was found and with
    /// [`ResponseCode::AmbiguousContactInformation`](crate::ResponseCode) when several different
    /// ones were.
    async fn load_contact_information_by_address(
        &self,
        address: &Address,
    ) -> Result<ContactInformation, LedgerError>;

    /// All contact records of the local user `public_key_address`.
    async fn load_contacts(&self, public_key_address: &Address)
    -> Result<Vec<Contact>, LedgerError>;
}

/// Interface for resolving the signing key of a document issuer.
///
/// Two variants of the trait are provided: one which is thread-safe (implementing `Sync`) and one
/// which is purely intended for single-threaded execution contexts.
#[trait_variant::make(IssuerKeyLookup: Send)]
pub trait LocalIssuerKeyLookup {
    /// Returns `None` when the issuer is unknown.
    async fn issuer_public_key(&self, issuer: &str) -> Result<Option<PublicKey>, LedgerError>;
}

/// A single use case.
///
/// `execute` never fails: every outcome, including errors, is expressed as a [`Response`].
pub trait Interactor {
    type Request;

    type Output;

    fn execute(
        &self,
        request: Self::Request,
    ) -> impl Future<Output = Response<Self::Output>> + Send;
}
