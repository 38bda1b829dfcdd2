// SPDX-License-Identifier: MIT OR Apache-2.0

use palantir_core::crypto::{Encryption, KeyPair};
use palantir_core::{Address, AddressGenerator, KeyedAddress, SecurityLevel, Seed};

use crate::error::InteractorError;

/// Index of the identity address among all addresses of a seed.
pub const IDENTITY_ADDRESS_INDEX: u64 = 0;

/// Everything a user's identity consists of, re-derived from the seed on demand.
#[derive(Clone, Debug)]
pub struct UserIdentity {
    pub keyed_address: KeyedAddress,
    pub request_address: Address,
    pub key_pair: KeyPair,
}

impl UserIdentity {
    /// Derives the identity address at index 0, its request address and the identity key pair.
    ///
    /// The key pair is derived from the seed with the identity address as salt, equal seeds yield
    /// equal identities.
    pub fn derive<A: AddressGenerator, E: Encryption>(
        address_generator: &A,
        encryption: &E,
        seed: &Seed,
        security_level: SecurityLevel,
    ) -> Result<Self, InteractorError> {
        let keyed_address =
            address_generator.get_address(seed, security_level, IDENTITY_ADDRESS_INDEX)?;
        let request_address = keyed_address.address.derive_request_address();
        let key_pair = encryption
            .create_asymmetric_key_pair(seed.as_bytes(), keyed_address.address.as_bytes())?;
        Ok(Self {
            keyed_address,
            request_address,
            key_pair,
        })
    }

    pub fn address(&self) -> &Address {
        &self.keyed_address.address
    }
}
