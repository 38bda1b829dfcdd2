// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory implementations of the ledger, the contact repository and the issuer key lookup.
//!
//! All of them can be cloned cheaply and shared between tasks, clones operate on the same state.
mod contacts;
mod issuers;
mod ledger;

pub use contacts::MemoryContactRepository;
pub use issuers::IssuerRegistry;
pub use ledger::MemoryLedger;
