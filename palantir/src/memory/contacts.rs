// SPDX-License-Identifier: MIT OR Apache-2.0

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use palantir_core::crypto::x25519::PublicKey as EncryptionPublicKey;
use palantir_core::{Address, Ed25519Signer, SignatureValidator};
use tracing::trace;

use crate::entity::{Contact, ContactInformation};
use crate::error::LedgerError;
use crate::protocol::parse_signed_identity_payload;
use crate::response::ResponseCode;
use crate::traits::{ContactRepository, Messenger};

/// Owner identity address and chat address.
type ContactKey = (Address, Address);

/// Contact records kept in memory, identities are read from the ledger.
#[derive(Clone, Debug)]
pub struct MemoryContactRepository<M, V = Ed25519Signer> {
    messenger: M,
    validator: V,
    contacts: Arc<RwLock<HashMap<ContactKey, Contact>>>,
}

impl<M> MemoryContactRepository<M, Ed25519Signer> {
    pub fn new(messenger: M) -> Self {
        Self::with_validator(messenger, Ed25519Signer)
    }
}

impl<M, V> MemoryContactRepository<M, V> {
    pub fn with_validator(messenger: M, validator: V) -> Self {
        Self {
            messenger,
            validator,
            contacts: Arc::default(),
        }
    }

    /// Record for `chat_address` owned by `public_key_address`, if any.
    pub fn contact(&self, chat_address: &Address, public_key_address: &Address) -> Option<Contact> {
        self.contacts
            .read()
            .expect("acquire shared read access on contacts")
            .get(&(*public_key_address, *chat_address))
            .cloned()
    }
}

impl<M, V> ContactRepository for MemoryContactRepository<M, V>
where
    M: Messenger + Sync,
    V: SignatureValidator + Send + Sync,
{
    async fn add_contact(
        &self,
        chat_address: &Address,
        accepted: bool,
        public_key_address: &Address,
    ) -> Result<(), LedgerError> {
        let contact = Contact {
            chat_address: *chat_address,
            public_key_address: *public_key_address,
            accepted,
            rejected: !accepted,
        };
        self.contacts
            .write()
            .expect("acquire exclusive write access on contacts")
            .insert((*public_key_address, *chat_address), contact);
        Ok(())
    }

    async fn load_contact_information_by_address(
        &self,
        address: &Address,
    ) -> Result<ContactInformation, LedgerError> {
        let messages = self.messenger.get_messages_by_address(address).await?;

        let mut public_keys: Vec<EncryptionPublicKey> = Vec::new();
        for message in messages {
            match parse_signed_identity_payload(&self.validator, &message.payload, address) {
                Ok(public_key) => {
                    if !public_keys.contains(&public_key) {
                        public_keys.push(public_key);
                    }
                }
                Err(err) => trace!(%address, "ignore invalid identity entry: {err}"),
            }
        }

        match public_keys.as_slice() {
            [] => Err(LedgerError::Code(ResponseCode::NoContactInformationPresent)),
            [public_key] => Ok(ContactInformation {
                public_key: *public_key,
                contact_address: address.derive_request_address(),
            }),
            _ => Err(LedgerError::Code(
                ResponseCode::AmbiguousContactInformation,
            )),
        }
    }

    async fn load_contacts(&self, public_key_address: &Address) -> Result<Vec<Contact>, LedgerError> {
        let contacts = self
            .contacts
            .read()
            .expect("acquire shared read access on contacts");
        let mut result: Vec<Contact> = contacts
            .values()
            .filter(|contact| &contact.public_key_address == public_key_address)
            .cloned()
            .collect();
        result.sort_by_key(|contact| contact.chat_address);
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use palantir_core::crypto::{Encryption, HpkeEncryption};
    use palantir_core::{
        Address, AddressGenerator, Ed25519AddressGenerator, Ed25519Signer, SecurityLevel, Seed,
    };

    use crate::entity::Message;
    use crate::error::LedgerError;
    use crate::memory::MemoryLedger;
    use crate::protocol::build_signed_identity_payload;
    use crate::response::ResponseCode;
    use crate::traits::{ContactRepository, Messenger};

    use super::MemoryContactRepository;

    #[tokio::test]
    async fn upsert_contact() {
        let repository = MemoryContactRepository::new(MemoryLedger::new());
        let user = Address::from_bytes([1; 32]);
        let chat = Address::from_bytes([2; 32]);

        repository.add_contact(&chat, true, &user).await.unwrap();
        let contact = repository.contact(&chat, &user).unwrap();
        assert!(contact.accepted);
        assert!(!contact.rejected);

        repository.add_contact(&chat, false, &user).await.unwrap();
        let contact = repository.contact(&chat, &user).unwrap();
        assert!(!contact.accepted);
        assert!(contact.rejected);

        let contacts = repository.load_contacts(&user).await.unwrap();
        assert_eq!(contacts.len(), 1);
        assert!(
            repository
                .load_contacts(&Address::from_bytes([3; 32]))
                .await
                .unwrap()
                .is_empty()
        );
    }

    #[tokio::test]
    async fn contact_information() {
        let ledger = MemoryLedger::with_padding(64);
        let repository = MemoryContactRepository::new(ledger.clone());

        let keyed = Ed25519AddressGenerator
            .get_address(&Seed::new("seed-A"), SecurityLevel::default(), 0)
            .unwrap();
        let key_pair = HpkeEncryption
            .create_asymmetric_key_pair(b"seed-A", keyed.address.as_bytes())
            .unwrap();

        assert_eq!(
            repository
                .load_contact_information_by_address(&keyed.address)
                .await,
            Err(LedgerError::Code(ResponseCode::NoContactInformationPresent))
        );

        // Noise is ignored.
        ledger
            .send_message(Message::new(keyed.address, b"spam".to_vec()))
            .await
            .unwrap();
        assert_eq!(
            repository
                .load_contact_information_by_address(&keyed.address)
                .await,
            Err(LedgerError::Code(ResponseCode::NoContactInformationPresent))
        );

        let payload = build_signed_identity_payload(&Ed25519Signer, key_pair.public_key(), &keyed);
        ledger
            .send_message(Message::new(keyed.address, payload.clone()))
            .await
            .unwrap();
        // Republishing the same identity is not ambiguous.
        ledger
            .send_message(Message::new(keyed.address, payload))
            .await
            .unwrap();

        let information = repository
            .load_contact_information_by_address(&keyed.address)
            .await
            .unwrap();
        assert_eq!(&information.public_key, key_pair.public_key());
        assert_eq!(
            information.contact_address,
            keyed.address.derive_request_address()
        );

        let other_key_pair = HpkeEncryption
            .create_asymmetric_key_pair(b"seed-A", b"other")
            .unwrap();
        let payload =
            build_signed_identity_payload(&Ed25519Signer, other_key_pair.public_key(), &keyed);
        ledger
            .send_message(Message::new(keyed.address, payload))
            .await
            .unwrap();
        assert_eq!(
            repository
                .load_contact_information_by_address(&keyed.address)
                .await,
            Err(LedgerError::Code(ResponseCode::AmbiguousContactInformation))
        );
    }
}
