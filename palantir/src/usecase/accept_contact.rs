// SPDX-License-Identifier: MIT OR Apache-2.0

use palantir_core::Address;
use palantir_core::crypto::{Encryption, HpkeEncryption, KeyPair, Rng};
use tracing::debug;

use crate::error::InteractorError;
use crate::protocol::{ContactRequest, KeyExchange};
use crate::response::{Response, ResponseCode};
use crate::traits::{ContactRepository, Interactor, Messenger};
use crate::usecase::respond;

/// Size of the secret salt the chat key pair is derived from.
const CHAT_SALT_LEN: usize = 32;

#[derive(Clone, Debug)]
pub struct AcceptContactRequest {
    /// Pending request, as listed by the contacts interactor.
    pub contact_request: ContactRequest,
    /// Identity address of the accepting user.
    pub user_public_key_address: Address,
}

#[derive(Clone, Debug)]
pub struct AcceptContactOutput {
    pub chat_address: Address,
    pub chat_key_pair: KeyPair,
}

/// Accepts a pending contact request.
///
/// A fresh secret salt is encrypted towards the requester and written to the chat key address.
/// Both sides derive the chat key pair from it.
#[derive(Debug)]
pub struct AcceptContactInteractor<M, R, E = HpkeEncryption> {
    messenger: M,
    repository: R,
    encryption: E,
    rng: Rng,
}

impl<M, R> AcceptContactInteractor<M, R> {
    pub fn new(messenger: M, repository: R) -> Self {
        Self::with_encryption(messenger, repository, HpkeEncryption)
    }
}

impl<M, R, E> AcceptContactInteractor<M, R, E> {
    pub fn with_encryption(messenger: M, repository: R, encryption: E) -> Self {
        Self {
            messenger,
            repository,
            encryption,
            rng: Rng::default(),
        }
    }
}

impl<M, R, E> AcceptContactInteractor<M, R, E>
where
    M: Messenger + Sync,
    R: ContactRepository + Sync,
    E: Encryption + Sync,
{
    async fn accept_contact(
        &self,
        request: AcceptContactRequest,
    ) -> Result<AcceptContactOutput, InteractorError> {
        let contact_request = request.contact_request;

        let already_accepted = self
            .repository
            .load_contacts(&request.user_public_key_address)
            .await?
            .iter()
            .any(|contact| contact.chat_address == contact_request.chat_address && contact.accepted);
        if already_accepted {
            return Err(InteractorError::Rejected(ResponseCode::ContactAlreadyExists));
        }

        let requester = self
            .repository
            .load_contact_information_by_address(&contact_request.public_key_address)
            .await?;

        let salt: [u8; CHAT_SALT_LEN] = self.rng.random_array()?;
        let key_exchange = KeyExchange::new(&self.messenger, &self.encryption);
        key_exchange
            .exchange_key(
                &contact_request.chat_key_address,
                &requester.public_key,
                &salt,
            )
            .await?;
        let chat_key_pair = key_exchange.chat_key_pair(&salt, &contact_request.chat_address)?;

        self.repository
            .add_contact(
                &contact_request.chat_address,
                true,
                &request.user_public_key_address,
            )
            .await?;

        debug!(chat_address = %contact_request.chat_address, "accepted contact");

        Ok(AcceptContactOutput {
            chat_address: contact_request.chat_address,
            chat_key_pair,
        })
    }
}

impl<M, R, E> Interactor for AcceptContactInteractor<M, R, E>
where
    M: Messenger + Sync,
    R: ContactRepository + Sync,
    E: Encryption + Sync,
{
    type Request = AcceptContactRequest;

    type Output = AcceptContactOutput;

    async fn execute(&self, request: AcceptContactRequest) -> Response<AcceptContactOutput> {
        respond("accept contact", self.accept_contact(request).await)
    }
}
