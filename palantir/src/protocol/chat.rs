// SPDX-License-Identifier: MIT OR Apache-2.0

use palantir_core::Address;
use palantir_core::cbor::{decode_cbor, encode_cbor};
use palantir_core::crypto::{Encryption, KeyPair};

use crate::entity::ChatMessage;
use crate::protocol::PayloadError;
use crate::protocol::marker::{append_end_marker, strip_end_marker};

/// Encrypts a chat entry for everyone holding the chat key pair.
///
/// The chat address is authenticated as associated data, an entry copied to another chat does
/// not open there.
pub fn seal_chat_message<E: Encryption>(
    encryption: &E,
    chat_key_pair: &KeyPair,
    chat_address: &Address,
    message: &ChatMessage,
) -> Result<Vec<u8>, PayloadError> {
    let plaintext = encode_cbor(message)?;
    let ciphertext = encryption.encrypt(
        chat_key_pair.public_key(),
        &plaintext,
        chat_address.as_bytes(),
    )?;
    Ok(append_end_marker(ciphertext))
}

pub fn open_chat_message<E: Encryption>(
    encryption: &E,
    chat_key_pair: &KeyPair,
    chat_address: &Address,
    bytes: &[u8],
) -> Result<ChatMessage, PayloadError> {
    let ciphertext = strip_end_marker(bytes)?;
    let plaintext = encryption.decrypt(chat_key_pair, ciphertext, chat_address.as_bytes())?;
    let message = decode_cbor(&plaintext[..])?;
    Ok(message)
}
