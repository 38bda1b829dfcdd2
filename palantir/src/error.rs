// SPDX-License-Identifier: MIT OR Apache-2.0

use palantir_core::crypto::{EncryptionError, RngError};
use palantir_core::{AddressError, IdentityError};
use thiserror::Error;

use crate::protocol::PayloadError;
use crate::response::ResponseCode;

/// Errors raised by ledger transports and contact repositories.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum LedgerError {
    /// Failure with a code the interactors pass through to the caller.
    #[error("ledger failed with {0}")]
    Code(ResponseCode),

    #[error("ledger transport failed: {0}")]
    Transport(String),
}

/// Errors which can occur inside an interactor before they get mapped to a [`ResponseCode`].
#[derive(Debug, Error)]
pub enum InteractorError {
    #[error(transparent)]
    Ledger(#[from] LedgerError),

    #[error(transparent)]
    Address(#[from] AddressError),

    #[error(transparent)]
    Identity(#[from] IdentityError),

    #[error(transparent)]
    Encryption(#[from] EncryptionError),

    #[error(transparent)]
    Payload(#[from] PayloadError),

    #[error(transparent)]
    Rng(#[from] RngError),

    /// Request was refused before touching the ledger.
    #[error("request was rejected: {0}")]
    Rejected(ResponseCode),
}

impl InteractorError {
    /// Response code reported to the caller.
    ///
    /// Typed ledger failures keep their code, every other error becomes
    /// [`ResponseCode::UnkownException`].
    pub fn code(&self) -> ResponseCode {
        match self {
            InteractorError::Ledger(LedgerError::Code(code)) => *code,
            InteractorError::Ledger(LedgerError::Transport(_)) => ResponseCode::MessengerException,
            InteractorError::Rejected(code) => *code,
            _ => ResponseCode::UnkownException,
        }
    }
}

#[cfg(test)]
mod tests {
    use palantir_core::AddressError;

    use crate::response::ResponseCode;

    use super::{InteractorError, LedgerError};

    #[test]
    fn code_mapping() {
        let err: InteractorError = LedgerError::Code(ResponseCode::CannotAddContact).into();
        assert_eq!(err.code(), ResponseCode::CannotAddContact);

        let err: InteractorError = LedgerError::Transport("node offline".into()).into();
        assert_eq!(err.code(), ResponseCode::MessengerException);

        let err: InteractorError = AddressError::EmptySeed.into();
        assert_eq!(err.code(), ResponseCode::UnkownException);

        let err = InteractorError::Rejected(ResponseCode::MessageTooLong);
        assert_eq!(err.code(), ResponseCode::MessageTooLong);
    }
}
