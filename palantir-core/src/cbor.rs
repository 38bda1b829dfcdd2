// SPDX-License-Identifier: MIT OR Apache-2.0

//! [CBOR] codec for structured ledger payloads.
//!
//! Contact requests, chat entries and sealed key exchange envelopes are written as CBOR before
//! the end marker frames them for the ledger.
//!
//! [CBOR]: https://cbor.io/
use std::io::Read;

use ciborium::de::Error as CiboriumDecodeError;
use ciborium::ser::Error as CiboriumEncodeError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Writes `value` as a CBOR payload.
pub fn encode_cbor<T: Serialize>(value: &T) -> Result<Vec<u8>, EncodeError> {
    let mut payload = Vec::new();
    ciborium::ser::into_writer(value, &mut payload).map_err(|err| match err {
        CiboriumEncodeError::Io(err) => EncodeError::Io(err),
        CiboriumEncodeError::Value(reason) => EncodeError::Unsupported(reason),
    })?;
    Ok(payload)
}

/// Reads a CBOR payload back into `T`.
pub fn decode_cbor<T: for<'a> Deserialize<'a>, R: Read>(payload: R) -> Result<T, DecodeError> {
    ciborium::from_reader(payload).map_err(|err| match err {
        CiboriumDecodeError::Io(err) => DecodeError::Io(err),
        CiboriumDecodeError::Syntax(offset) => DecodeError::Malformed(offset),
        CiboriumDecodeError::Semantic(offset, reason) => DecodeError::Unexpected(offset, reason),
        CiboriumDecodeError::RecursionLimitExceeded => DecodeError::TooDeep,
    })
}

#[derive(Debug, Error)]
pub enum EncodeError {
    #[error("failed writing payload: {0}")]
    Io(std::io::Error),

    #[error("value can not be represented as payload: {0}")]
    Unsupported(String),
}

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("failed reading payload: {0}")]
    Io(std::io::Error),

    /// Bytes are not CBOR at all.
    #[error("malformed payload at byte {0}")]
    Malformed(usize),

    /// Valid CBOR, but not the expected shape.
    #[error("unexpected payload structure at byte {0:?}: {1}")]
    Unexpected(Option<usize>, String),

    #[error("payload is nested too deeply")]
    TooDeep,
}
