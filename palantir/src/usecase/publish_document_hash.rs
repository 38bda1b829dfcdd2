// SPDX-License-Identifier: MIT OR Apache-2.0

use palantir_core::crypto::Rng;
use palantir_core::{Address, Ed25519Signer, Hash, PrivateKey, SignatureGenerator};
use tracing::debug;

use crate::entity::Message;
use crate::error::InteractorError;
use crate::protocol::AttestationPayload;
use crate::response::Response;
use crate::traits::{Interactor, Messenger};
use crate::usecase::respond;

#[derive(Clone, Debug)]
pub struct PublishDocumentHashRequest {
    pub document: Vec<u8>,
    /// Key of the issuer, its public key is what verifiers look up.
    pub signing_key: PrivateKey,
}

#[derive(Clone, Debug)]
pub struct PublishDocumentHashOutput {
    /// Random address the attestation was published at. It can not be recovered from the
    /// document, callers have to hand it to verifiers themselves.
    pub reference: Address,
    pub document_hash: Hash,
}

/// Publishes `document_hash || signature` of a document at a fresh random address.
#[derive(Debug)]
pub struct PublishDocumentHashInteractor<M, S = Ed25519Signer> {
    messenger: M,
    signer: S,
    rng: Rng,
}

impl<M> PublishDocumentHashInteractor<M> {
    pub fn new(messenger: M) -> Self {
        Self::with_signer(messenger, Ed25519Signer)
    }
}

impl<M, S> PublishDocumentHashInteractor<M, S> {
    pub fn with_signer(messenger: M, signer: S) -> Self {
        Self {
            messenger,
            signer,
            rng: Rng::default(),
        }
    }
}

impl<M, S> PublishDocumentHashInteractor<M, S>
where
    M: Messenger + Sync,
    S: SignatureGenerator + Sync,
{
    async fn publish(
        &self,
        request: PublishDocumentHashRequest,
    ) -> Result<PublishDocumentHashOutput, InteractorError> {
        let payload = AttestationPayload {
            document_hash: Hash::new(&request.document),
            signature: self.signer.sign(&request.signing_key, &request.document),
        };
        let reference = Address::random(&self.rng)?;

        self.messenger
            .send_message(Message::new(reference, payload.to_bytes().to_vec()))
            .await?;
        debug!(%reference, hash = %payload.document_hash, "published document hash");

        Ok(PublishDocumentHashOutput {
            reference,
            document_hash: payload.document_hash,
        })
    }
}

impl<M, S> Interactor for PublishDocumentHashInteractor<M, S>
where
    M: Messenger + Sync,
    S: SignatureGenerator + Sync,
{
    type Request = PublishDocumentHashRequest;

    type Output = PublishDocumentHashOutput;

    async fn execute(
        &self,
        request: PublishDocumentHashRequest,
    ) -> Response<PublishDocumentHashOutput> {
        respond("publish document hash", self.publish(request).await)
    }
}

#[cfg(test)]
mod tests {
    use palantir_core::{Hash, PrivateKey};

    use crate::error::LedgerError;
    use crate::memory::MemoryLedger;
    use crate::protocol::AttestationPayload;
    use crate::response::ResponseCode;
    use crate::test_utils::FailingMessenger;
    use crate::traits::{Interactor, Messenger};

    use super::{PublishDocumentHashInteractor, PublishDocumentHashRequest};

    fn request(document: &[u8]) -> PublishDocumentHashRequest {
        PublishDocumentHashRequest {
            document: document.to_vec(),
            signing_key: PrivateKey::from_bytes(&[1; 32]),
        }
    }

    #[tokio::test]
    async fn publish_at_random_address() {
        let ledger = MemoryLedger::new();
        let interactor = PublishDocumentHashInteractor::new(ledger.clone());

        let first = interactor
            .execute(request(b"invoice #1"))
            .await
            .into_payload()
            .unwrap();
        let second = interactor
            .execute(request(b"invoice #1"))
            .await
            .into_payload()
            .unwrap();
        assert_eq!(first.document_hash, Hash::new(b"invoice #1"));
        assert_eq!(first.document_hash, second.document_hash);
        assert_ne!(first.reference, second.reference);

        let entries = ledger
            .get_messages_by_address(&first.reference)
            .await
            .unwrap();
        assert_eq!(entries.len(), 1);
        let payload = AttestationPayload::from_bytes(&entries[0].payload).unwrap();
        assert_eq!(payload.document_hash, first.document_hash);
        assert!(
            PrivateKey::from_bytes(&[1; 32])
                .public_key()
                .verify(b"invoice #1", &payload.signature)
        );
    }

    #[tokio::test]
    async fn ledger_error() {
        let response = PublishDocumentHashInteractor::new(FailingMessenger::new(
            LedgerError::Transport("offline".into()),
        ))
        .execute(request(b"invoice #1"))
        .await;
        assert_eq!(response.code(), ResponseCode::MessengerException);
    }
}
