// SPDX-License-Identifier: MIT OR Apache-2.0

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use palantir_core::PublicKey;

use crate::error::LedgerError;
use crate::traits::IssuerKeyLookup;

/// Signing keys of known document issuers.
///
/// The registry is created empty and owned by whoever injects it into the verifying interactor,
/// there is no process-wide instance.
#[derive(Clone, Debug, Default)]
pub struct IssuerRegistry {
    issuers: Arc<RwLock<HashMap<String, PublicKey>>>,
}

impl IssuerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers or replaces the key of an issuer.
    pub fn register(&self, issuer: impl Into<String>, public_key: PublicKey) {
        self.issuers
            .write()
            .expect("acquire exclusive write access on registry")
            .insert(issuer.into(), public_key);
    }

    pub fn public_key(&self, issuer: &str) -> Option<PublicKey> {
        self.issuers
            .read()
            .expect("acquire shared read access on registry")
            .get(issuer)
            .copied()
    }

    /// Forgets all issuers.
    pub fn clear(&self) {
        self.issuers
            .write()
            .expect("acquire exclusive write access on registry")
            .clear();
    }

    pub fn len(&self) -> usize {
        self.issuers
            .read()
            .expect("acquire shared read access on registry")
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl IssuerKeyLookup for IssuerRegistry {
    async fn issuer_public_key(&self, issuer: &str) -> Result<Option<PublicKey>, LedgerError> {
        Ok(self.public_key(issuer))
    }
}
