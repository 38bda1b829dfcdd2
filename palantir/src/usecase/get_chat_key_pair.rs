// SPDX-License-Identifier: MIT OR Apache-2.0

use palantir_core::Address;
use palantir_core::crypto::{Encryption, HpkeEncryption, KeyPair};

use crate::error::InteractorError;
use crate::protocol::KeyExchange;
use crate::response::Response;
use crate::traits::{Interactor, Messenger};
use crate::usecase::respond;

#[derive(Clone, Debug)]
pub struct GetChatKeyPairRequest {
    pub chat_address: Address,
    pub chat_key_address: Address,
    /// Identity key pair of the requester.
    pub user_key_pair: KeyPair,
}

/// Picks up the chat key pair after a contact request was accepted.
///
/// The output is `None` as long as the peer has not accepted yet.
#[derive(Debug)]
pub struct GetChatKeyPairInteractor<M, E = HpkeEncryption> {
    messenger: M,
    encryption: E,
}

impl<M> GetChatKeyPairInteractor<M> {
    pub fn new(messenger: M) -> Self {
        Self::with_encryption(messenger, HpkeEncryption)
    }
}

impl<M, E> GetChatKeyPairInteractor<M, E> {
    pub fn with_encryption(messenger: M, encryption: E) -> Self {
        Self {
            messenger,
            encryption,
        }
    }
}

impl<M, E> GetChatKeyPairInteractor<M, E>
where
    M: Messenger + Sync,
    E: Encryption + Sync,
{
    async fn get_chat_key_pair(
        &self,
        request: GetChatKeyPairRequest,
    ) -> Result<Option<KeyPair>, InteractorError> {
        let key_exchange = KeyExchange::new(&self.messenger, &self.encryption);
        let Some(salt) = key_exchange
            .receive_key(&request.chat_key_address, &request.user_key_pair)
            .await?
        else {
            return Ok(None);
        };
        Ok(Some(key_exchange.chat_key_pair(&salt, &request.chat_address)?))
    }
}

impl<M, E> Interactor for GetChatKeyPairInteractor<M, E>
where
    M: Messenger + Sync,
    E: Encryption + Sync,
{
    type Request = GetChatKeyPairRequest;

    type Output = Option<KeyPair>;

    async fn execute(&self, request: GetChatKeyPairRequest) -> Response<Option<KeyPair>> {
        respond("get chat key pair", self.get_chat_key_pair(request).await)
    }
}

#[cfg(test)]
mod tests {
    use palantir_core::Address;
    use palantir_core::crypto::{Encryption, HpkeEncryption, KeyPair};

    use crate::error::LedgerError;
    use crate::memory::MemoryLedger;
    use crate::protocol::KeyExchange;
    use crate::response::ResponseCode;
    use crate::test_utils::FailingMessenger;
    use crate::traits::Interactor;

    use super::{GetChatKeyPairInteractor, GetChatKeyPairRequest};

    const CHAT: Address = Address::from_bytes([1; 32]);

    const CHAT_KEY: Address = Address::from_bytes([2; 32]);

    fn request(user_key_pair: &KeyPair) -> GetChatKeyPairRequest {
        GetChatKeyPairRequest {
            chat_address: CHAT,
            chat_key_address: CHAT_KEY,
            user_key_pair: user_key_pair.clone(),
        }
    }

    #[tokio::test]
    async fn pending_then_accepted() {
        let ledger = MemoryLedger::new();
        let user_key_pair = HpkeEncryption
            .create_asymmetric_key_pair(b"seed-A", b"identity")
            .unwrap();
        let interactor = GetChatKeyPairInteractor::new(ledger.clone());

        let response = interactor.execute(request(&user_key_pair)).await;
        assert_eq!(response.code(), ResponseCode::Success);
        assert_eq!(response.into_payload(), Some(None));

        KeyExchange::new(&ledger, &HpkeEncryption)
            .exchange_key(&CHAT_KEY, user_key_pair.public_key(), b"secret salt")
            .await
            .unwrap();

        let chat_key_pair = interactor
            .execute(request(&user_key_pair))
            .await
            .into_payload()
            .unwrap()
            .unwrap();
        assert_eq!(
            chat_key_pair,
            HpkeEncryption
                .create_asymmetric_key_pair(b"secret salt", CHAT.as_bytes())
                .unwrap()
        );

        // A salt for somebody else stays unreadable.
        let stranger = HpkeEncryption
            .create_asymmetric_key_pair(b"seed-M", b"identity")
            .unwrap();
        let response = interactor.execute(request(&stranger)).await;
        assert_eq!(response.into_payload(), Some(None));
    }

    #[tokio::test]
    async fn failing_read() {
        let user_key_pair = HpkeEncryption
            .create_asymmetric_key_pair(b"seed-A", b"identity")
            .unwrap();
        let response = GetChatKeyPairInteractor::new(FailingMessenger::new(LedgerError::Code(
            ResponseCode::NoContactInformationPresent,
        )))
        .execute(request(&user_key_pair))
        .await;
        assert_eq!(response.code(), ResponseCode::NoContactInformationPresent);
        assert!(response.payload().is_none());
    }
}
