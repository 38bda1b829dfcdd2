// SPDX-License-Identifier: MIT OR Apache-2.0

use palantir_core::Address;
use palantir_core::crypto::x25519::PublicKey as EncryptionPublicKey;
use palantir_core::crypto::{Encryption, KeyPair};
use tracing::trace;

use crate::entity::Message;
use crate::error::InteractorError;
use crate::protocol::marker::{append_end_marker, strip_end_marker};
use crate::traits::Messenger;

/// Hands a secret salt to a peer through the ledger, encrypted towards the peer's identity key.
#[derive(Debug)]
pub struct KeyExchange<'a, M, E> {
    messenger: &'a M,
    encryption: &'a E,
}

impl<'a, M, E> KeyExchange<'a, M, E>
where
    M: Messenger + Sync,
    E: Encryption + Sync,
{
    pub fn new(messenger: &'a M, encryption: &'a E) -> Self {
        Self {
            messenger,
            encryption,
        }
    }

    /// Encrypts `secret_salt` towards the peer and writes it to the peer's key exchange address.
    pub async fn exchange_key(
        &self,
        peer_key_address: &Address,
        peer_public_key: &EncryptionPublicKey,
        secret_salt: &[u8],
    ) -> Result<(), InteractorError> {
        let ciphertext =
            self.encryption
                .encrypt(peer_public_key, secret_salt, peer_key_address.as_bytes())?;
        self.messenger
            .send_message(Message::new(*peer_key_address, append_end_marker(ciphertext)))
            .await?;
        Ok(())
    }

    /// Reads the secret salt sent to `key_address`.
    ///
    /// Returns the first entry which decrypts with `key_pair`, or `None` when there is none yet.
    pub async fn receive_key(
        &self,
        key_address: &Address,
        key_pair: &KeyPair,
    ) -> Result<Option<Vec<u8>>, InteractorError> {
        let messages = self.messenger.get_messages_by_address(key_address).await?;
        for message in messages {
            let Ok(ciphertext) = strip_end_marker(&message.payload) else {
                trace!(address = %key_address, "ignore key exchange entry without end marker");
                continue;
            };
            match self
                .encryption
                .decrypt(key_pair, ciphertext, key_address.as_bytes())
            {
                Ok(salt) => return Ok(Some(salt)),
                Err(err) => {
                    trace!(address = %key_address, "ignore undecryptable key exchange entry: {err}");
                }
            }
        }
        Ok(None)
    }

    /// Derives the key pair both chat participants use, given the exchanged salt.
    pub fn chat_key_pair(
        &self,
        secret_salt: &[u8],
        chat_address: &Address,
    ) -> Result<KeyPair, InteractorError> {
        Ok(self
            .encryption
            .create_asymmetric_key_pair(secret_salt, chat_address.as_bytes())?)
    }
}

#[cfg(test)]
mod tests {
    use palantir_core::Address;
    use palantir_core::crypto::{Encryption, HpkeEncryption};

    use crate::entity::Message;
    use crate::memory::MemoryLedger;
    use crate::traits::Messenger;

    use super::KeyExchange;

    #[tokio::test]
    async fn exchange_and_receive() {
        let ledger = MemoryLedger::new();
        let encryption = HpkeEncryption;
        let key_exchange = KeyExchange::new(&ledger, &encryption);

        let peer = encryption
            .create_asymmetric_key_pair(b"peer", b"identity")
            .unwrap();
        let key_address = Address::from_bytes([4; 32]);

        assert_eq!(
            key_exchange.receive_key(&key_address, &peer).await.unwrap(),
            None
        );

        // Noise at the same address is skipped.
        ledger
            .send_message(Message::new(key_address, b"garbage".to_vec()))
            .await
            .unwrap();

        key_exchange
            .exchange_key(&key_address, peer.public_key(), b"secret salt")
            .await
            .unwrap();
        assert_eq!(ledger.sent_messages().len(), 2);

        let salt = key_exchange
            .receive_key(&key_address, &peer)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(salt, b"secret salt");

        // Both sides derive the same chat key pair from the salt.
        let chat_address = Address::from_bytes([5; 32]);
        assert_eq!(
            key_exchange.chat_key_pair(&salt, &chat_address).unwrap(),
            key_exchange
                .chat_key_pair(b"secret salt", &chat_address)
                .unwrap()
        );

        // Other key pairs can not read the salt.
        let stranger = encryption
            .create_asymmetric_key_pair(b"stranger", b"identity")
            .unwrap();
        assert_eq!(
            key_exchange
                .receive_key(&key_address, &stranger)
                .await
                .unwrap(),
            None
        );
    }
}
