// SPDX-License-Identifier: MIT OR Apache-2.0

//! Outcome of every interactor call.
use std::fmt;

use serde::{Deserialize, Serialize};

/// Closed set of outcomes an interactor can resolve to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResponseCode {
    Success,

    /// The ledger transport failed without a more specific code.
    MessengerException,

    /// Anything which is not a recognised ledger failure.
    // Name kept for compatibility with deployed clients.
    UnkownException,

    /// No valid identity was found at the requested address.
    NoContactInformationPresent,

    /// More than one distinct identity was published at the requested address.
    AmbiguousContactInformation,

    CannotAddContact,

    ContactAlreadyExists,

    MessageTooLong,

    /// The given seed does not derive the given identity.
    SeedMismatch,
}

impl ResponseCode {
    /// Returns `true` for codes which trigger a compensating action instead of being surfaced.
    pub fn is_self_healing(&self) -> bool {
        matches!(self, ResponseCode::NoContactInformationPresent)
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ResponseCode::Success)
    }
}

impl fmt::Display for ResponseCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            ResponseCode::Success => "success",
            ResponseCode::MessengerException => "messenger exception",
            ResponseCode::UnkownException => "unknown exception",
            ResponseCode::NoContactInformationPresent => "no contact information present",
            ResponseCode::AmbiguousContactInformation => "ambiguous contact information",
            ResponseCode::CannotAddContact => "cannot add contact",
            ResponseCode::ContactAlreadyExists => "contact already exists",
            ResponseCode::MessageTooLong => "message too long",
            ResponseCode::SeedMismatch => "seed mismatch",
        };
        write!(f, "{value}")
    }
}

/// Result of an interactor call.
///
/// The payload is only present when the code is [`ResponseCode::Success`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Response<T = ()> {
    code: ResponseCode,
    payload: Option<T>,
}

impl<T> Response<T> {
    pub fn success(payload: T) -> Self {
        Self {
            code: ResponseCode::Success,
            payload: Some(payload),
        }
    }

    /// Response without payload.
    ///
    /// Passing [`ResponseCode::Success`] is a mistake, an operation succeeding without output
    /// returns `Response::success(())`. It is mapped to `UnkownException`.
    pub fn failure(code: ResponseCode) -> Self {
        let code = if code.is_success() {
            ResponseCode::UnkownException
        } else {
            code
        };
        Self {
            code,
            payload: None,
        }
    }

    pub fn code(&self) -> ResponseCode {
        self.code
    }

    pub fn is_success(&self) -> bool {
        self.code.is_success()
    }

    pub fn payload(&self) -> Option<&T> {
        self.payload.as_ref()
    }

    pub fn into_payload(self) -> Option<T> {
        self.payload
    }
}

#[cfg(test)]
mod tests {
    use super::{Response, ResponseCode};

    #[test]
    fn payload_only_on_success() {
        let response = Response::success(5);
        assert_eq!(response.code(), ResponseCode::Success);
        assert_eq!(response.payload(), Some(&5));

        let response: Response<u8> = Response::failure(ResponseCode::MessageTooLong);
        assert_eq!(response.code(), ResponseCode::MessageTooLong);
        assert!(!response.is_success());
        assert_eq!(response.into_payload(), None);
    }

    #[test]
    fn failure_is_never_success() {
        let response: Response = Response::failure(ResponseCode::Success);
        assert_eq!(response.code(), ResponseCode::UnkownException);
        assert!(response.payload().is_none());
    }

    #[test]
    fn self_healing_codes() {
        assert!(ResponseCode::NoContactInformationPresent.is_self_healing());
        assert!(!ResponseCode::AmbiguousContactInformation.is_self_healing());
        assert!(!ResponseCode::MessengerException.is_self_healing());
        assert!(!ResponseCode::UnkownException.is_self_healing());
    }
}
