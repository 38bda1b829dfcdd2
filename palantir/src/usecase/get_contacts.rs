// SPDX-License-Identifier: MIT OR Apache-2.0

use std::collections::HashSet;

use palantir_core::{Address, Ed25519Signer, SignatureValidator};
use tracing::trace;

use crate::entity::Contact;
use crate::error::InteractorError;
use crate::protocol::ContactRequest;
use crate::response::Response;
use crate::traits::{ContactRepository, Interactor, Messenger};
use crate::usecase::respond;

#[derive(Clone, Debug)]
pub struct GetContactsRequest {
    /// Identity address of the user.
    pub public_key_address: Address,
    pub request_address: Address,
}

#[derive(Clone, Debug, Default)]
pub struct GetContactsOutput {
    pub approved: Vec<Contact>,
    /// Valid requests at the request address without a local record yet.
    pub pending: Vec<ContactRequest>,
}

/// Lists approved contacts and pending contact requests.
///
/// Declined contacts show up in neither list.
#[derive(Debug)]
pub struct GetContactsInteractor<M, R, V = Ed25519Signer> {
    messenger: M,
    repository: R,
    validator: V,
}

impl<M, R> GetContactsInteractor<M, R> {
    pub fn new(messenger: M, repository: R) -> Self {
        Self::with_validator(messenger, repository, Ed25519Signer)
    }
}

impl<M, R, V> GetContactsInteractor<M, R, V> {
    pub fn with_validator(messenger: M, repository: R, validator: V) -> Self {
        Self {
            messenger,
            repository,
            validator,
        }
    }
}

impl<M, R, V> GetContactsInteractor<M, R, V>
where
    M: Messenger + Sync,
    R: ContactRepository + Sync,
    V: SignatureValidator + Sync,
{
    async fn get_contacts(
        &self,
        request: GetContactsRequest,
    ) -> Result<GetContactsOutput, InteractorError> {
        let contacts = self
            .repository
            .load_contacts(&request.public_key_address)
            .await?;
        let mut known: HashSet<Address> =
            contacts.iter().map(|contact| contact.chat_address).collect();

        let entries = self
            .messenger
            .get_messages_by_address(&request.request_address)
            .await?;
        let mut pending = Vec::new();
        for entry in entries {
            match ContactRequest::from_signed_bytes(&self.validator, &entry.payload) {
                Ok(contact_request) => {
                    if known.insert(contact_request.chat_address) {
                        pending.push(contact_request);
                    }
                }
                Err(err) => {
                    trace!(address = %request.request_address, "drop contact request: {err}");
                }
            }
        }

        Ok(GetContactsOutput {
            approved: contacts
                .into_iter()
                .filter(|contact| contact.accepted)
                .collect(),
            pending,
        })
    }
}

impl<M, R, V> Interactor for GetContactsInteractor<M, R, V>
where
    M: Messenger + Sync,
    R: ContactRepository + Sync,
    V: SignatureValidator + Sync,
{
    type Request = GetContactsRequest;

    type Output = GetContactsOutput;

    async fn execute(&self, request: GetContactsRequest) -> Response<GetContactsOutput> {
        respond("get contacts", self.get_contacts(request).await)
    }
}

#[cfg(test)]
mod tests {
    use palantir_core::{Address, AddressGenerator, Ed25519AddressGenerator, Ed25519Signer};
    use palantir_core::{SecurityLevel, Seed};

    use crate::entity::Message;
    use crate::error::LedgerError;
    use crate::memory::{MemoryContactRepository, MemoryLedger};
    use crate::protocol::ContactRequest;
    use crate::response::ResponseCode;
    use crate::test_utils::{FailingContactRepository, FailingMessenger};
    use crate::traits::{ContactRepository, Interactor, Messenger};

    use super::{GetContactsInteractor, GetContactsRequest};

    const USER: Address = Address::from_bytes([9; 32]);

    fn request() -> GetContactsRequest {
        GetContactsRequest {
            public_key_address: USER,
            request_address: USER.derive_request_address(),
        }
    }

    /// Contact request for `chat`, signed by the identity of `seed`.
    fn signed_request(seed: &str, chat: u8) -> Vec<u8> {
        let keyed = Ed25519AddressGenerator
            .get_address(&Seed::new(seed), SecurityLevel::default(), 0)
            .unwrap();
        ContactRequest {
            chat_address: Address::from_bytes([chat; 32]),
            chat_key_address: Address::from_bytes([chat + 100; 32]),
            public_key_address: keyed.address,
            contact_address: keyed.address.derive_request_address(),
            public_key: palantir_core::crypto::x25519::PublicKey::from_bytes([7; 32]),
            name: seed.into(),
        }
        .to_signed_bytes(&Ed25519Signer, &keyed.private_key)
        .unwrap()
    }

    async fn write(ledger: &MemoryLedger, payload: Vec<u8>) {
        ledger
            .send_message(Message::new(USER.derive_request_address(), payload))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn approved_and_pending() {
        let ledger = MemoryLedger::new();
        let repository = MemoryContactRepository::new(ledger.clone());

        write(&ledger, signed_request("seed-A", 1)).await;
        // Delivered twice, listed once.
        write(&ledger, signed_request("seed-A", 1)).await;
        write(&ledger, signed_request("seed-B", 2)).await;
        write(&ledger, signed_request("seed-C", 3)).await;
        write(&ledger, b"spam".to_vec()).await;

        // Accepted and declined requests are no longer pending.
        repository
            .add_contact(&Address::from_bytes([2; 32]), true, &USER)
            .await
            .unwrap();
        repository
            .add_contact(&Address::from_bytes([3; 32]), false, &USER)
            .await
            .unwrap();

        let output = GetContactsInteractor::new(ledger, repository)
            .execute(request())
            .await
            .into_payload()
            .unwrap();
        assert_eq!(output.approved.len(), 1);
        assert_eq!(output.approved[0].chat_address, Address::from_bytes([2; 32]));
        assert_eq!(output.pending.len(), 1);
        assert_eq!(output.pending[0].name, "seed-A");
    }

    #[tokio::test]
    async fn forged_requests_are_dropped() {
        let ledger = MemoryLedger::new();
        let mut forged = signed_request("seed-A", 1);
        forged[10] ^= 1;
        write(&ledger, forged).await;

        let output = GetContactsInteractor::new(
            ledger.clone(),
            MemoryContactRepository::new(ledger),
        )
        .execute(request())
        .await
        .into_payload()
        .unwrap();
        assert!(output.pending.is_empty());
    }

    #[tokio::test]
    async fn failures_pass_through() {
        let response = GetContactsInteractor::new(
            FailingMessenger::new(LedgerError::Transport("offline".into())),
            MemoryContactRepository::new(MemoryLedger::new()),
        )
        .execute(request())
        .await;
        assert_eq!(response.code(), ResponseCode::MessengerException);
        assert!(response.payload().is_none());

        let response = GetContactsInteractor::new(
            MemoryLedger::new(),
            FailingContactRepository::new(LedgerError::Code(ResponseCode::CannotAddContact)),
        )
        .execute(request())
        .await;
        assert_eq!(response.code(), ResponseCode::CannotAddContact);
    }
}
