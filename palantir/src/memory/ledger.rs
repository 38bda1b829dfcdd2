// SPDX-License-Identifier: MIT OR Apache-2.0

use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use palantir_core::Address;

use crate::entity::Message;
use crate::error::LedgerError;
use crate::traits::Messenger;

#[derive(Debug, Default)]
pub struct InnerMemoryLedger {
    entries: HashMap<Address, Vec<Vec<u8>>>,
    sent: Vec<Message>,
}

/// An append-only ledger kept in memory.
///
/// Entries can be padded to a fixed block size, like transports which only carry fixed-size
/// fragments do, and pruned per address to simulate snapshots dropping old entries.
#[derive(Clone, Debug, Default)]
pub struct MemoryLedger {
    inner: Arc<RwLock<InnerMemoryLedger>>,
    block_size: Option<usize>,
}

impl MemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pads every written entry with zeros up to a multiple of `block_size`.
    pub fn with_padding(block_size: usize) -> Self {
        Self {
            inner: Arc::default(),
            block_size: Some(block_size.max(1)),
        }
    }

    /// Obtain a read-lock on the ledger.
    pub fn read_ledger(&self) -> RwLockReadGuard<'_, InnerMemoryLedger> {
        self.inner
            .read()
            .expect("acquire shared read access on ledger")
    }

    /// Obtain a write-lock on the ledger.
    pub fn write_ledger(&self) -> RwLockWriteGuard<'_, InnerMemoryLedger> {
        self.inner
            .write()
            .expect("acquire exclusive write access on ledger")
    }

    /// Every message sent through this ledger, in order, as handed over by the sender.
    pub fn sent_messages(&self) -> Vec<Message> {
        self.read_ledger().sent.clone()
    }

    /// Drops all entries at `address`. The log of sent messages is kept.
    pub fn prune(&self, address: &Address) {
        self.write_ledger().entries.remove(address);
    }
}

impl Messenger for MemoryLedger {
    async fn send_message(&self, message: Message) -> Result<(), LedgerError> {
        let mut payload = message.payload.clone();
        if let Some(block_size) = self.block_size {
            let padded_len = payload.len().div_ceil(block_size) * block_size;
            payload.resize(padded_len, 0);
        }

        let mut ledger = self.write_ledger();
        ledger
            .entries
            .entry(message.address)
            .or_default()
            .push(payload);
        ledger.sent.push(message);
        Ok(())
    }

    async fn get_messages_by_address(
        &self,
        address: &Address,
    ) -> Result<Vec<Message>, LedgerError> {
        let ledger = self.read_ledger();
        let messages = ledger
            .entries
            .get(address)
            .map(|entries| {
                entries
                    .iter()
                    .map(|payload| Message::new(*address, payload.clone()))
                    .collect()
            })
            .unwrap_or_default();
        Ok(messages)
    }
}
