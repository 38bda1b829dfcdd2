// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core data types and cryptographic primitives for messaging over an append-only ledger.
//!
//! Peers never talk to each other directly. Everything they exchange is written to addressed
//! mailboxes on a shared, eventually-consistent ledger, which is why this crate centres around
//! three things:
//!
//! - [`Address`]: a 32-byte mailbox identifier, deterministically derived from a [`Seed`], a
//!   [`SecurityLevel`] and an index. Identity addresses double as Ed25519 verifying keys, so
//!   anything signed by the holder of the seed can be checked against the address it was read
//!   from.
//! - Identity: Ed25519 [`PrivateKey`], [`PublicKey`] and [`Signature`] with the
//!   [`SignatureGenerator`] and [`SignatureValidator`] interfaces.
//! - Encryption: X25519 [`crypto::KeyPair`]s which can be re-derived from seed material and a
//!   salt, and HPKE sealing of arbitrary payloads towards a public key.
//!
//! [`Hash`] is a BLAKE3 digest, used for document attestations.
pub mod address;
pub mod cbor;
pub mod crypto;
pub mod hash;
pub mod identity;
mod serde;

pub use address::{
    Address, AddressError, AddressGenerator, Ed25519AddressGenerator, KeyedAddress, SecurityLevel,
    Seed,
};
pub use hash::{Hash, HashError};
pub use identity::{
    Ed25519Signer, IdentityError, PrivateKey, PublicKey, Signature, SignatureGenerator,
    SignatureValidator,
};
