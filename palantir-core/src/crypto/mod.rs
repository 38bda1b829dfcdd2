// SPDX-License-Identifier: MIT OR Apache-2.0

//! X25519 key pairs, HPKE sealing and randomness.
mod encryption;
mod hpke;
mod rng;
mod secret;
pub mod x25519;

pub use encryption::{Encryption, EncryptionError, HpkeEncryption, KeyPair};
pub use hpke::{HpkeCiphertext, HpkeError, hpke_open, hpke_seal};
pub use rng::{Rng, RngError};
pub use secret::Secret;
