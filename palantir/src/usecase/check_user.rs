// SPDX-License-Identifier: MIT OR Apache-2.0

use palantir_core::crypto::x25519::PublicKey as EncryptionPublicKey;
use palantir_core::{
    Address, AddressGenerator, Ed25519AddressGenerator, Ed25519Signer, Seed, SignatureGenerator,
};
use tracing::{debug, info};

use crate::config::Config;
use crate::error::{InteractorError, LedgerError};
use crate::protocol::{IDENTITY_ADDRESS_INDEX, IdentityPublisher};
use crate::response::{Response, ResponseCode};
use crate::traits::{ContactRepository, Interactor, Messenger};
use crate::usecase::respond;

#[derive(Clone, Debug)]
pub struct CheckUserRequest {
    pub identity_address: Address,
    pub public_key: EncryptionPublicKey,
    pub request_address: Address,
    pub seed: Seed,
}

/// Makes sure a user's identity is still readable from the ledger.
///
/// Ledger nodes prune old entries and reads may lag behind writes, so an identity which was
/// published once can disappear. When no identity is found it gets published again, exactly once
/// per call, and the call still succeeds.
///
/// The identity is re-signed with a key derived from the request's seed. Unlike a blind resend,
/// a seed which does not derive `identity_address` and `request_address` resolves to
/// [`ResponseCode::SeedMismatch`] and nothing is published, since an entry signed by another key
/// would never be readable at the identity address.
#[derive(Debug)]
pub struct CheckUserInteractor<M, R, A = Ed25519AddressGenerator, S = Ed25519Signer> {
    messenger: M,
    repository: R,
    address_generator: A,
    signer: S,
    config: Config,
}

impl<M, R> CheckUserInteractor<M, R> {
    pub fn new(messenger: M, repository: R) -> Self {
        Self::with_collaborators(messenger, repository, Ed25519AddressGenerator, Ed25519Signer)
    }
}

impl<M, R, A, S> CheckUserInteractor<M, R, A, S> {
    pub fn with_collaborators(messenger: M, repository: R, address_generator: A, signer: S) -> Self {
        Self {
            messenger,
            repository,
            address_generator,
            signer,
            config: Config::default(),
        }
    }

    pub fn with_config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }
}

impl<M, R, A, S> CheckUserInteractor<M, R, A, S>
where
    M: Messenger + Sync,
    R: ContactRepository + Sync,
    A: AddressGenerator + Sync,
    S: SignatureGenerator + Sync,
{
    async fn check_user(&self, request: CheckUserRequest) -> Result<(), InteractorError> {
        match self
            .repository
            .load_contact_information_by_address(&request.identity_address)
            .await
        {
            Ok(_) => {
                debug!(address = %request.identity_address, "identity is present");
                Ok(())
            }
            Err(LedgerError::Code(code)) if code.is_self_healing() => {
                info!(address = %request.identity_address, "identity is missing, publishing again");
                self.resend(&request).await
            }
            Err(err) => Err(err.into()),
        }
    }

    async fn resend(&self, request: &CheckUserRequest) -> Result<(), InteractorError> {
        let keyed_address = self.address_generator.get_address(
            &request.seed,
            self.config.security_level,
            IDENTITY_ADDRESS_INDEX,
        )?;

        // A payload signed by another key would not be readable at the identity address.
        if keyed_address.address != request.identity_address
            || keyed_address.address.derive_request_address() != request.request_address
        {
            return Err(InteractorError::Rejected(ResponseCode::SeedMismatch));
        }

        IdentityPublisher::new(&self.messenger, &self.signer)
            .publish(&keyed_address, &request.public_key)
            .await
    }
}

impl<M, R, A, S> Interactor for CheckUserInteractor<M, R, A, S>
where
    M: Messenger + Sync,
    R: ContactRepository + Sync,
    A: AddressGenerator + Sync,
    S: SignatureGenerator + Sync,
{
    type Request = CheckUserRequest;

    type Output = ();

    async fn execute(&self, request: CheckUserRequest) -> Response {
        respond("check user", self.check_user(request).await)
    }
}
