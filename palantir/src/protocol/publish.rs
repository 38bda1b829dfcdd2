// SPDX-License-Identifier: MIT OR Apache-2.0

use palantir_core::crypto::x25519::PublicKey as EncryptionPublicKey;
use palantir_core::{KeyedAddress, SignatureGenerator};
use tracing::debug;

use crate::entity::{ContactInformation, Message};
use crate::error::InteractorError;
use crate::protocol::identity_payload::build_signed_identity_payload;
use crate::traits::Messenger;

/// Writes a signed identity payload to the identity address it belongs to.
#[derive(Debug)]
pub struct IdentityPublisher<'a, M, S> {
    messenger: &'a M,
    signer: &'a S,
}

impl<'a, M, S> IdentityPublisher<'a, M, S>
where
    M: Messenger + Sync,
    S: SignatureGenerator + Sync,
{
    pub fn new(messenger: &'a M, signer: &'a S) -> Self {
        Self { messenger, signer }
    }

    pub async fn publish(
        &self,
        keyed_address: &KeyedAddress,
        public_key: &EncryptionPublicKey,
    ) -> Result<(), InteractorError> {
        let payload = build_signed_identity_payload(self.signer, public_key, keyed_address);
        self.messenger
            .send_message(Message::new(keyed_address.address, payload))
            .await?;
        debug!(address = %keyed_address.address, "published identity");
        Ok(())
    }
}

/// Sends an already signed payload to the contact address of a peer.
pub async fn send_contact_details<M: Messenger + Sync>(
    messenger: &M,
    payload: Vec<u8>,
    receiver: &ContactInformation,
) -> Result<(), InteractorError> {
    messenger
        .send_message(Message::new(receiver.contact_address, payload))
        .await?;
    debug!(address = %receiver.contact_address, "sent contact details");
    Ok(())
}
