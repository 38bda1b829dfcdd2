// SPDX-License-Identifier: MIT OR Apache-2.0

use palantir_core::Address;
use palantir_core::crypto::{Encryption, HpkeEncryption, KeyPair};
use tracing::trace;

use crate::entity::ChatMessage;
use crate::error::InteractorError;
use crate::protocol::open_chat_message;
use crate::response::Response;
use crate::traits::{Interactor, Messenger};
use crate::usecase::respond;

#[derive(Clone, Debug)]
pub struct GetMessagesRequest {
    pub chat_address: Address,
    pub chat_key_pair: KeyPair,
}

/// Reads and decrypts all messages of a chat.
///
/// Entries which do not decrypt or do not parse are skipped, only a failing read fails the call.
/// Messages are returned in the order the ledger returned them.
#[derive(Debug)]
pub struct GetMessagesInteractor<M, E = HpkeEncryption> {
    messenger: M,
    encryption: E,
}

impl<M> GetMessagesInteractor<M> {
    pub fn new(messenger: M) -> Self {
        Self::with_encryption(messenger, HpkeEncryption)
    }
}

impl<M, E> GetMessagesInteractor<M, E> {
    pub fn with_encryption(messenger: M, encryption: E) -> Self {
        Self {
            messenger,
            encryption,
        }
    }
}

impl<M, E> GetMessagesInteractor<M, E>
where
    M: Messenger + Sync,
    E: Encryption + Sync,
{
    async fn get_messages(
        &self,
        request: GetMessagesRequest,
    ) -> Result<Vec<ChatMessage>, InteractorError> {
        let entries = self
            .messenger
            .get_messages_by_address(&request.chat_address)
            .await?;

        let messages = entries
            .iter()
            .filter_map(|entry| {
                match open_chat_message(
                    &self.encryption,
                    &request.chat_key_pair,
                    &request.chat_address,
                    &entry.payload,
                ) {
                    Ok(message) => Some(message),
                    Err(err) => {
                        trace!(address = %request.chat_address, "drop chat entry: {err}");
                        None
                    }
                }
            })
            .collect();
        Ok(messages)
    }
}

impl<M, E> Interactor for GetMessagesInteractor<M, E>
where
    M: Messenger + Sync,
    E: Encryption + Sync,
{
    type Request = GetMessagesRequest;

    type Output = Vec<ChatMessage>;

    async fn execute(&self, request: GetMessagesRequest) -> Response<Vec<ChatMessage>> {
        respond("get messages", self.get_messages(request).await)
    }
}
