// SPDX-License-Identifier: MIT OR Apache-2.0

use std::time::{SystemTime, UNIX_EPOCH};

use palantir_core::Address;
use palantir_core::crypto::{Encryption, HpkeEncryption, KeyPair};

use crate::config::Config;
use crate::entity::{ChatMessage, Message};
use crate::error::InteractorError;
use crate::protocol::seal_chat_message;
use crate::response::{Response, ResponseCode};
use crate::traits::{Interactor, Messenger};
use crate::usecase::respond;

#[derive(Clone, Debug)]
pub struct SendMessageRequest {
    pub chat_address: Address,
    pub chat_key_pair: KeyPair,
    pub message: String,
    /// Identity address of the sender.
    pub user_public_key_address: Address,
}

/// Encrypts a chat message with the chat key pair and writes it to the chat address.
#[derive(Debug)]
pub struct SendMessageInteractor<M, E = HpkeEncryption> {
    messenger: M,
    encryption: E,
    config: Config,
}

impl<M> SendMessageInteractor<M> {
    pub fn new(messenger: M) -> Self {
        Self::with_encryption(messenger, HpkeEncryption)
    }
}

impl<M, E> SendMessageInteractor<M, E> {
    pub fn with_encryption(messenger: M, encryption: E) -> Self {
        Self {
            messenger,
            encryption,
            config: Config::default(),
        }
    }

    pub fn with_config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }
}

impl<M, E> SendMessageInteractor<M, E>
where
    M: Messenger + Sync,
    E: Encryption + Sync,
{
    async fn send_message(&self, request: SendMessageRequest) -> Result<(), InteractorError> {
        if request.message.len() > self.config.max_message_length {
            return Err(InteractorError::Rejected(ResponseCode::MessageTooLong));
        }

        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|duration| duration.as_secs())
            .unwrap_or_default();
        let message = ChatMessage {
            sender: request.user_public_key_address,
            text: request.message,
            timestamp,
        };

        let payload = seal_chat_message(
            &self.encryption,
            &request.chat_key_pair,
            &request.chat_address,
            &message,
        )?;
        self.messenger
            .send_message(Message::new(request.chat_address, payload))
            .await?;
        Ok(())
    }
}

impl<M, E> Interactor for SendMessageInteractor<M, E>
where
    M: Messenger + Sync,
    E: Encryption + Sync,
{
    type Request = SendMessageRequest;

    type Output = ();

    async fn execute(&self, request: SendMessageRequest) -> Response {
        respond("send message", self.send_message(request).await)
    }
}
