// SPDX-License-Identifier: MIT OR Apache-2.0

//! Messaging, contact handshakes and document attestations between peers which only share an
//! append-only, eventually-consistent ledger.
//!
//! Every operation is an [`Interactor`]: the caller builds a request, passes it to
//! [`Interactor::execute`] and always receives a [`Response`] carrying exactly one
//! [`ResponseCode`]. Errors never cross this boundary as `Err` or panics.
//!
//! The ledger and the local contact storage are injected through the [`Messenger`] and
//! [`ContactRepository`] interfaces. In-memory implementations of both live in [`memory`].
//!
//! ## Handshake
//!
//! 1. Both peers publish their identity ([`usecase::CreateUserInteractor`]) and keep it alive
//!    with [`usecase::CheckUserInteractor`], for example through a [`Poller`].
//! 2. The requester sends a signed contact request to the peer's request address
//!    ([`usecase::AddContactInteractor`]).
//! 3. The peer lists pending requests ([`usecase::GetContactsInteractor`]) and either accepts
//!    ([`usecase::AcceptContactInteractor`]) or declines
//!    ([`usecase::DeclineContactInteractor`]) them.
//! 4. After acceptance the requester picks up the chat key pair
//!    ([`usecase::GetChatKeyPairInteractor`]) and both sides exchange encrypted messages
//!    ([`usecase::SendMessageInteractor`], [`usecase::GetMessagesInteractor`]).
pub mod config;
pub mod entity;
pub mod error;
pub mod memory;
mod poller;
pub mod protocol;
pub mod response;
#[cfg(any(test, feature = "test_utils"))]
pub mod test_utils;
mod traits;
pub mod usecase;

pub use config::Config;
pub use entity::{ChatMessage, Contact, ContactInformation, Message};
pub use error::{InteractorError, LedgerError};
pub use poller::Poller;
pub use response::{Response, ResponseCode};
pub use traits::{
    ContactRepository, Interactor, IssuerKeyLookup, LocalContactRepository, LocalIssuerKeyLookup,
    LocalMessenger, Messenger,
};
