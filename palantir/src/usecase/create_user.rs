// SPDX-License-Identifier: MIT OR Apache-2.0

use palantir_core::crypto::{Encryption, HpkeEncryption, KeyPair};
use palantir_core::{
    Address, AddressGenerator, Ed25519AddressGenerator, Ed25519Signer, Seed, SignatureGenerator,
};

use crate::config::Config;
use crate::error::InteractorError;
use crate::protocol::{IdentityPublisher, UserIdentity};
use crate::response::Response;
use crate::traits::{Interactor, Messenger};
use crate::usecase::respond;

#[derive(Clone, Debug)]
pub struct CreateUserRequest {
    pub seed: Seed,
}

#[derive(Clone, Debug)]
pub struct CreateUserOutput {
    pub key_pair: KeyPair,
    pub identity_address: Address,
    pub request_address: Address,
}

/// Derives a user's identity from its seed and publishes it.
///
/// Nothing is kept between calls, a failed attempt is retried by executing again.
#[derive(Debug)]
pub struct CreateUserInteractor<
    M,
    A = Ed25519AddressGenerator,
    E = HpkeEncryption,
    S = Ed25519Signer,
> {
    messenger: M,
    address_generator: A,
    encryption: E,
    signer: S,
    config: Config,
}

impl<M> CreateUserInteractor<M> {
    pub fn new(messenger: M) -> Self {
        Self::with_collaborators(messenger, Ed25519AddressGenerator, HpkeEncryption, Ed25519Signer)
    }
}

impl<M, A, E, S> CreateUserInteractor<M, A, E, S> {
    pub fn with_collaborators(messenger: M, address_generator: A, encryption: E, signer: S) -> Self {
        Self {
            messenger,
            address_generator,
            encryption,
            signer,
            config: Config::default(),
        }
    }

    pub fn with_config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }
}

impl<M, A, E, S> CreateUserInteractor<M, A, E, S>
where
    M: Messenger + Sync,
    A: AddressGenerator + Sync,
    E: Encryption + Sync,
    S: SignatureGenerator + Sync,
{
    async fn create_user(
        &self,
        request: CreateUserRequest,
    ) -> Result<CreateUserOutput, InteractorError> {
        let identity = UserIdentity::derive(
            &self.address_generator,
            &self.encryption,
            &request.seed,
            self.config.security_level,
        )?;

        IdentityPublisher::new(&self.messenger, &self.signer)
            .publish(&identity.keyed_address, identity.key_pair.public_key())
            .await?;

        Ok(CreateUserOutput {
            identity_address: identity.keyed_address.address,
            request_address: identity.request_address,
            key_pair: identity.key_pair,
        })
    }
}

impl<M, A, E, S> Interactor for CreateUserInteractor<M, A, E, S>
where
    M: Messenger + Sync,
    A: AddressGenerator + Sync,
    E: Encryption + Sync,
    S: SignatureGenerator + Sync,
{
    type Request = CreateUserRequest;

    type Output = CreateUserOutput;

    async fn execute(&self, request: CreateUserRequest) -> Response<CreateUserOutput> {
        respond("create user", self.create_user(request).await)
    }
}
