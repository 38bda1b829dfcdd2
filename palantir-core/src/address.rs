// SPDX-License-Identifier: MIT OR Apache-2.0

//! Ledger addresses and their deterministic derivation from a seed.
//!
//! An [`Address`] is the 32-byte identifier of a ledger mailbox. Addresses derived through an
//! [`AddressGenerator`] come with the private key they were derived from ([`KeyedAddress`]): the
//! address bytes are the Ed25519 verifying key of that private key, so every entry signed by the
//! seed holder can be authenticated against the address it was read from.
//!
//! ```
//! use palantir_core::{AddressGenerator, Ed25519AddressGenerator, SecurityLevel, Seed};
//!
//! let seed = Seed::new("seed-A");
//! let keyed = Ed25519AddressGenerator
//!     .get_address(&seed, SecurityLevel::default(), 0)
//!     .unwrap();
//! let again = Ed25519AddressGenerator
//!     .get_address(&seed, SecurityLevel::default(), 0)
//!     .unwrap();
//! assert_eq!(keyed.address, again.address);
//! ```
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::crypto::{Rng, RngError};
use crate::identity::{IdentityError, PrivateKey, PublicKey};
use crate::serde::impl_hex_serde;

/// Size of ledger addresses.
pub const ADDRESS_LEN: usize = 32;

/// BLAKE3 context for deriving identity keys from a seed.
const ADDRESS_DERIVATION_CONTEXT: &str = "palantir 2024 address derivation v1";

/// BLAKE3 context for deriving the request mailbox of an identity.
const REQUEST_ADDRESS_CONTEXT: &str = "palantir 2024 request address v1";

/// 32-byte ledger mailbox identifier.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Address([u8; ADDRESS_LEN]);

impl Address {
    pub const fn from_bytes(bytes: [u8; ADDRESS_LEN]) -> Self {
        Self(bytes)
    }

    /// Returns a fresh, unpredictable address which is not linked to any seed.
    pub fn random(rng: &Rng) -> Result<Self, RngError> {
        Ok(Self(rng.random_array()?))
    }

    /// Well-known mailbox where peers drop contact requests for the owner of this address.
    pub fn derive_request_address(&self) -> Address {
        Address(blake3::derive_key(REQUEST_ADDRESS_CONTEXT, &self.0))
    }

    pub fn as_bytes(&self) -> &[u8; ADDRESS_LEN] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl From<PublicKey> for Address {
    fn from(public_key: PublicKey) -> Self {
        Self(*public_key.as_bytes())
    }
}

impl TryFrom<&Address> for PublicKey {
    type Error = IdentityError;

    fn try_from(address: &Address) -> Result<Self, Self::Error> {
        PublicKey::from_bytes(address.as_bytes())
    }
}

impl TryFrom<&[u8]> for Address {
    type Error = AddressError;

    fn try_from(value: &[u8]) -> Result<Self, Self::Error> {
        let bytes: [u8; ADDRESS_LEN] = value
            .try_into()
            .map_err(|_| AddressError::InvalidLength(value.len(), ADDRESS_LEN))?;
        Ok(Self(bytes))
    }
}

impl FromStr for Address {
    type Err = AddressError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::try_from(hex::decode(value)?.as_slice())
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Address").field(&self.to_hex()).finish()
    }
}

impl_hex_serde!(Address);

/// Secret seed from which a user's identity is derived.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Seed(String);

impl Seed {
    pub fn new(seed: impl Into<String>) -> Self {
        Self(seed.into())
    }

    /// Generates a new seed from 32 random bytes.
    pub fn random(rng: &Rng) -> Result<Self, RngError> {
        let bytes: [u8; 32] = rng.random_array()?;
        Ok(Self(hex::encode(bytes)))
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

impl fmt::Debug for Seed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Do not reveal secret values when printing debug info.
        f.debug_tuple("Seed").field(&"***").finish()
    }
}

/// Strength parameter of the address derivation, between 1 and 3.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct SecurityLevel(u8);

impl SecurityLevel {
    pub const MIN: u8 = 1;

    pub const MAX: u8 = 3;

    pub fn new(level: u8) -> Result<Self, AddressError> {
        if !(Self::MIN..=Self::MAX).contains(&level) {
            return Err(AddressError::InvalidSecurityLevel(level));
        }
        Ok(Self(level))
    }

    pub fn value(&self) -> u8 {
        self.0
    }
}

impl Default for SecurityLevel {
    fn default() -> Self {
        Self(2)
    }
}

impl TryFrom<u8> for SecurityLevel {
    type Error = AddressError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<SecurityLevel> for u8 {
    fn from(level: SecurityLevel) -> Self {
        level.0
    }
}

/// Address together with the private key controlling it.
#[derive(Clone, Debug)]
pub struct KeyedAddress {
    pub address: Address,
    pub private_key: PrivateKey,
}

/// Interface for deriving addresses from a seed.
///
/// Implementations must be pure: equal inputs always yield equal addresses.
pub trait AddressGenerator {
    fn get_address(
        &self,
        seed: &Seed,
        security_level: SecurityLevel,
        index: u64,
    ) -> Result<KeyedAddress, AddressError>;
}

/// Derives an Ed25519 private key with BLAKE3 and uses its verifying key as the address.
#[derive(Clone, Copy, Debug, Default)]
pub struct Ed25519AddressGenerator;

impl AddressGenerator for Ed25519AddressGenerator {
    fn get_address(
        &self,
        seed: &Seed,
        security_level: SecurityLevel,
        index: u64,
    ) -> Result<KeyedAddress, AddressError> {
        if seed.as_bytes().is_empty() {
            return Err(AddressError::EmptySeed);
        }

        // Seed has variable length, everything after it is fixed-size.
        let mut key_material = Vec::with_capacity(seed.as_bytes().len() + 9);
        key_material.extend_from_slice(seed.as_bytes());
        key_material.push(security_level.value());
        key_material.extend_from_slice(&index.to_le_bytes());

        let private_key =
            PrivateKey::from_bytes(&blake3::derive_key(ADDRESS_DERIVATION_CONTEXT, &key_material));
        Ok(KeyedAddress {
            address: private_key.public_key().into(),
            private_key,
        })
    }
}

#[derive(Debug, Error)]
pub enum AddressError {
    #[error("invalid address length {0} bytes, expected {1} bytes")]
    InvalidLength(usize, usize),

    #[error("invalid hex encoding in address string")]
    InvalidHexEncoding(#[from] hex::FromHexError),

    #[error("security level {0} is out of range, expected 1 to 3")]
    InvalidSecurityLevel(u8),

    #[error("can not derive an address from an empty seed")]
    EmptySeed,
}
