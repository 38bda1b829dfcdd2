// SPDX-License-Identifier: MIT OR Apache-2.0

use palantir_core::crypto::Rng;
use palantir_core::crypto::x25519::PublicKey as EncryptionPublicKey;
use palantir_core::{
    Address, AddressGenerator, Ed25519AddressGenerator, Ed25519Signer, Seed, SignatureGenerator,
};
use tracing::debug;

use crate::config::Config;
use crate::error::InteractorError;
use crate::protocol::{ContactRequest, IDENTITY_ADDRESS_INDEX, send_contact_details};
use crate::response::{Response, ResponseCode};
use crate::traits::{ContactRepository, Interactor, Messenger};
use crate::usecase::respond;

#[derive(Clone, Debug)]
pub struct AddContactRequest {
    /// Name shown to the peer.
    pub name: String,
    pub seed: Seed,
    /// Identity encryption key of the requester.
    pub user_public_key: EncryptionPublicKey,
    /// Identity address of the peer.
    pub contact_address: Address,
}

#[derive(Clone, Debug)]
pub struct AddContactOutput {
    pub chat_address: Address,
    /// Where the chat key will show up once the peer accepted.
    pub chat_key_address: Address,
}

/// Sends a signed contact request to a peer.
///
/// Fresh random chat and chat key addresses are chosen for every request. The requester records
/// the contact as accepted right away.
#[derive(Debug)]
pub struct AddContactInteractor<M, R, A = Ed25519AddressGenerator, S = Ed25519Signer> {
    messenger: M,
    repository: R,
    address_generator: A,
    signer: S,
    rng: Rng,
    config: Config,
}

impl<M, R> AddContactInteractor<M, R> {
    pub fn new(messenger: M, repository: R) -> Self {
        Self::with_collaborators(messenger, repository, Ed25519AddressGenerator, Ed25519Signer)
    }
}

impl<M, R, A, S> AddContactInteractor<M, R, A, S> {
    pub fn with_collaborators(messenger: M, repository: R, address_generator: A, signer: S) -> Self {
        Self {
            messenger,
            repository,
            address_generator,
            signer,
            rng: Rng::default(),
            config: Config::default(),
        }
    }

    pub fn with_config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }
}

impl<M, R, A, S> AddContactInteractor<M, R, A, S>
where
    M: Messenger + Sync,
    R: ContactRepository + Sync,
    A: AddressGenerator + Sync,
    S: SignatureGenerator + Sync,
{
    async fn add_contact(
        &self,
        request: AddContactRequest,
    ) -> Result<AddContactOutput, InteractorError> {
        let keyed_address = self.address_generator.get_address(
            &request.seed,
            self.config.security_level,
            IDENTITY_ADDRESS_INDEX,
        )?;
        if keyed_address.address == request.contact_address {
            return Err(InteractorError::Rejected(ResponseCode::CannotAddContact));
        }

        let receiver = self
            .repository
            .load_contact_information_by_address(&request.contact_address)
            .await?;

        let contact_request = ContactRequest {
            chat_address: Address::random(&self.rng)?,
            chat_key_address: Address::random(&self.rng)?,
            public_key_address: keyed_address.address,
            contact_address: keyed_address.address.derive_request_address(),
            public_key: request.user_public_key,
            name: request.name,
        };
        let payload = contact_request.to_signed_bytes(&self.signer, &keyed_address.private_key)?;
        send_contact_details(&self.messenger, payload, &receiver).await?;

        self.repository
            .add_contact(&contact_request.chat_address, true, &keyed_address.address)
            .await?;

        debug!(
            chat_address = %contact_request.chat_address,
            contact = %request.contact_address,
            "sent contact request"
        );

        Ok(AddContactOutput {
            chat_address: contact_request.chat_address,
            chat_key_address: contact_request.chat_key_address,
        })
    }
}

impl<M, R, A, S> Interactor for AddContactInteractor<M, R, A, S>
where
    M: Messenger + Sync,
    R: ContactRepository + Sync,
    A: AddressGenerator + Sync,
    S: SignatureGenerator + Sync,
{
    type Request = AddContactRequest;

    type Output = AddContactOutput;

    async fn execute(&self, request: AddContactRequest) -> Response<AddContactOutput> {
        respond("add contact", self.add_contact(request).await)
    }
}
