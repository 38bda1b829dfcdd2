// SPDX-License-Identifier: MIT OR Apache-2.0

use std::sync::Mutex;

use rand_chacha::ChaCha20Rng;
use rand_chacha::rand_core::{SeedableRng, TryRngCore};
use thiserror::Error;

/// Source of unpredictable bytes for chat addresses, secret salts and fresh seeds.
///
/// ChaCha20 seeded from the operating system. Shared between tasks, so access is serialized.
#[derive(Debug)]
pub struct Rng(Mutex<ChaCha20Rng>);

impl Default for Rng {
    fn default() -> Self {
        Self(Mutex::new(ChaCha20Rng::from_os_rng()))
    }
}

impl Rng {
    /// Deterministic generator for reproducible tests.
    #[cfg(any(test, feature = "test_utils"))]
    pub fn from_seed(seed: [u8; 32]) -> Self {
        Self(Mutex::new(ChaCha20Rng::from_seed(seed)))
    }

    pub fn random_array<const N: usize>(&self) -> Result<[u8; N], RngError> {
        let mut bytes = [0u8; N];
        self.0
            .lock()
            .map_err(|_| RngError::Poisoned)?
            .try_fill_bytes(&mut bytes)
            .map_err(|_| RngError::Exhausted)?;
        Ok(bytes)
    }
}

#[derive(Debug, Error)]
pub enum RngError {
    #[error("random generator was poisoned by a panicking task")]
    Poisoned,

    #[error("random generator could not produce bytes")]
    Exhausted,
}

#[cfg(test)]
mod tests {
    use super::Rng;

    #[test]
    fn seeded_is_reproducible() {
        let first: [u8; 64] = Rng::from_seed([1; 32]).random_array().unwrap();
        let second: [u8; 64] = Rng::from_seed([1; 32]).random_array().unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn salts_do_not_repeat() {
        let rng = Rng::default();
        let salt: [u8; 32] = rng.random_array().unwrap();
        let next: [u8; 32] = rng.random_array().unwrap();
        assert_ne!(salt, next);
    }
}
