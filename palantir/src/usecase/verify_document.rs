// SPDX-License-Identifier: MIT OR Apache-2.0

use palantir_core::{Address, Ed25519Signer, Hash, SignatureValidator};
use tracing::{debug, trace};

use crate::error::InteractorError;
use crate::protocol::AttestationPayload;
use crate::response::Response;
use crate::traits::{Interactor, IssuerKeyLookup, Messenger};
use crate::usecase::respond;

#[derive(Clone, Debug)]
pub struct VerifyDocumentRequest {
    pub document: Vec<u8>,
    /// Address returned when the document hash was published.
    pub reference: Address,
    pub issuer: String,
}

/// Checks a document against its published attestation.
///
/// The output is `true` only when the document hash equals the published one and the signature
/// over the document verifies with the issuer's key. The hash is compared first, the issuer key
/// is not even looked up for a modified document. A missing attestation or an unknown issuer
/// yields `false`, not a failure code.
#[derive(Debug)]
pub struct VerifyDocumentInteractor<M, L, V = Ed25519Signer> {
    messenger: M,
    issuers: L,
    validator: V,
}

impl<M, L> VerifyDocumentInteractor<M, L> {
    pub fn new(messenger: M, issuers: L) -> Self {
        Self::with_validator(messenger, issuers, Ed25519Signer)
    }
}

impl<M, L, V> VerifyDocumentInteractor<M, L, V> {
    pub fn with_validator(messenger: M, issuers: L, validator: V) -> Self {
        Self {
            messenger,
            issuers,
            validator,
        }
    }
}

impl<M, L, V> VerifyDocumentInteractor<M, L, V>
where
    M: Messenger + Sync,
    L: IssuerKeyLookup + Sync,
    V: SignatureValidator + Sync,
{
    async fn verify(&self, request: VerifyDocumentRequest) -> Result<bool, InteractorError> {
        let document_hash = Hash::new(&request.document);

        let entries = self
            .messenger
            .get_messages_by_address(&request.reference)
            .await?;
        let Some(payload) = entries
            .iter()
            .find_map(|entry| AttestationPayload::from_bytes(&entry.payload).ok())
        else {
            trace!(reference = %request.reference, "no attestation found");
            return Ok(false);
        };

        if payload.document_hash != document_hash {
            debug!(reference = %request.reference, "document hash does not match");
            return Ok(false);
        }

        let Some(public_key) = self.issuers.issuer_public_key(&request.issuer).await? else {
            debug!(issuer = %request.issuer, "unknown issuer");
            return Ok(false);
        };

        Ok(self
            .validator
            .is_valid(&public_key, &request.document, &payload.signature))
    }
}

impl<M, L, V> Interactor for VerifyDocumentInteractor<M, L, V>
where
    M: Messenger + Sync,
    L: IssuerKeyLookup + Sync,
    V: SignatureValidator + Sync,
{
    type Request = VerifyDocumentRequest;

    type Output = bool;

    async fn execute(&self, request: VerifyDocumentRequest) -> Response<bool> {
        respond("verify document", self.verify(request).await)
    }
}
