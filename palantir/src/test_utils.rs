// SPDX-License-Identifier: MIT OR Apache-2.0

//! Collaborators which always fail, and logging for tests.
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use palantir_core::Address;

use crate::entity::{Contact, ContactInformation, Message};
use crate::error::LedgerError;
use crate::traits::{ContactRepository, Messenger};

pub fn setup_logging() {
    if std::env::var("RUST_LOG").is_ok() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .try_init();
    }
}

/// Messenger failing every call with the same error.
#[derive(Clone, Debug)]
pub struct FailingMessenger {
    error: LedgerError,
    calls: Arc<AtomicUsize>,
}

impl FailingMessenger {
    pub fn new(error: LedgerError) -> Self {
        Self {
            error,
            calls: Arc::default(),
        }
    }

    /// Number of calls made so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Messenger for FailingMessenger {
    async fn send_message(&self, _message: Message) -> Result<(), LedgerError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(self.error.clone())
    }

    async fn get_messages_by_address(
        &self,
        _address: &Address,
    ) -> Result<Vec<Message>, LedgerError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(self.error.clone())
    }
}

/// Contact repository failing every call with the same error.
#[derive(Clone, Debug)]
pub struct FailingContactRepository {
    error: LedgerError,
}

impl FailingContactRepository {
    pub fn new(error: LedgerError) -> Self {
        Self { error }
    }
}

impl ContactRepository for FailingContactRepository {
    async fn add_contact(
        &self,
        _chat_address: &Address,
        _accepted: bool,
        _public_key_address: &Address,
    ) -> Result<(), LedgerError> {
        Err(self.error.clone())
    }

    async fn load_contact_information_by_address(
        &self,
        _address: &Address,
    ) -> Result<ContactInformation, LedgerError> {
        Err(self.error.clone())
    }

    async fn load_contacts(
        &self,
        _public_key_address: &Address,
    ) -> Result<Vec<Contact>, LedgerError> {
        Err(self.error.clone())
    }
}
