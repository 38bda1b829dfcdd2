// SPDX-License-Identifier: MIT OR Apache-2.0

//! Interactors, one per use case.
//!
//! Each interactor runs its steps as a `Result<_, InteractorError>` and converts the outcome into a
//! [`Response`] at the very end. Nothing else is shared between them except the protocol steps in
//! [`crate::protocol`].
mod accept_contact;
mod add_contact;
mod check_user;
mod create_user;
mod decline_contact;
mod get_chat_key_pair;
mod get_contacts;
mod get_messages;
mod publish_document_hash;
mod send_message;
mod verify_document;

pub use accept_contact::{AcceptContactInteractor, AcceptContactOutput, AcceptContactRequest};
pub use add_contact::{AddContactInteractor, AddContactOutput, AddContactRequest};
pub use check_user::{CheckUserInteractor, CheckUserRequest};
pub use create_user::{CreateUserInteractor, CreateUserOutput, CreateUserRequest};
pub use decline_contact::{DeclineContactInteractor, DeclineContactRequest};
pub use get_chat_key_pair::{GetChatKeyPairInteractor, GetChatKeyPairRequest};
pub use get_contacts::{GetContactsInteractor, GetContactsOutput, GetContactsRequest};
pub use get_messages::{GetMessagesInteractor, GetMessagesRequest};
pub use publish_document_hash::{
    PublishDocumentHashInteractor, PublishDocumentHashOutput, PublishDocumentHashRequest,
};
pub use send_message::{SendMessageInteractor, SendMessageRequest};
pub use verify_document::{VerifyDocumentInteractor, VerifyDocumentRequest};

use tracing::{debug, warn};

use crate::error::InteractorError;
use crate::response::Response;

/// Converts the outcome of an interactor into its response.
fn respond<T>(operation: &'static str, result: Result<T, InteractorError>) -> Response<T> {
    match result {
        Ok(output) => {
            debug!(operation, "interactor finished");
            Response::success(output)
        }
        Err(err) => {
            let code = err.code();
            warn!(operation, %code, "interactor failed: {err}");
            Response::failure(code)
        }
    }
}
