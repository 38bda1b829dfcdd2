// SPDX-License-Identifier: MIT OR Apache-2.0

use palantir_core::Address;
use tracing::{debug, warn};

use crate::response::{Response, ResponseCode};
use crate::traits::{ContactRepository, Interactor};

#[derive(Clone, Debug)]
pub struct DeclineContactRequest {
    pub contact_chat_address: Address,
    pub user_public_key_address: Address,
}

/// Marks a contact request as rejected.
///
/// Unlike the other interactors every failure is reported as
/// [`ResponseCode::UnkownException`], the original code is only logged.
#[derive(Debug)]
pub struct DeclineContactInteractor<R> {
    repository: R,
}

impl<R> DeclineContactInteractor<R> {
    pub fn new(repository: R) -> Self {
        Self { repository }
    }
}

impl<R> Interactor for DeclineContactInteractor<R>
where
    R: ContactRepository + Sync,
{
    type Request = DeclineContactRequest;

    type Output = ();

    async fn execute(&self, request: DeclineContactRequest) -> Response {
        match self
            .repository
            .add_contact(
                &request.contact_chat_address,
                false,
                &request.user_public_key_address,
            )
            .await
        {
            Ok(()) => {
                debug!(chat_address = %request.contact_chat_address, "declined contact");
                Response::success(())
            }
            Err(err) => {
                warn!(operation = "decline contact", "interactor failed: {err}");
                Response::failure(ResponseCode::UnkownException)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use palantir_core::Address;

    use crate::error::LedgerError;
    use crate::memory::{MemoryContactRepository, MemoryLedger};
    use crate::response::ResponseCode;
    use crate::test_utils::FailingContactRepository;
    use crate::traits::Interactor;

    use super::{DeclineContactInteractor, DeclineContactRequest};

    fn request() -> DeclineContactRequest {
        DeclineContactRequest {
            contact_chat_address: Address::from_bytes([1; 32]),
            user_public_key_address: Address::from_bytes([2; 32]),
        }
    }

    #[tokio::test]
    async fn contact_is_rejected() {
        let repository = MemoryContactRepository::new(MemoryLedger::new());
        let interactor = DeclineContactInteractor::new(repository.clone());

        let response = interactor.execute(request()).await;
        assert_eq!(response.code(), ResponseCode::Success);

        let contact = repository
            .contact(&Address::from_bytes([1; 32]), &Address::from_bytes([2; 32]))
            .unwrap();
        assert!(contact.rejected);
        assert!(!contact.accepted);
    }

    #[tokio::test]
    async fn every_error_is_unknown() {
        for error in [
            LedgerError::Code(ResponseCode::CannotAddContact),
            LedgerError::Code(ResponseCode::NoContactInformationPresent),
            LedgerError::Transport("disk full".into()),
        ] {
            let interactor = DeclineContactInteractor::new(FailingContactRepository::new(error));
            let response = interactor.execute(request()).await;
            assert_eq!(response.code(), ResponseCode::UnkownException);
        }
    }
}
