// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::protocol::PayloadError;

/// Sentinel marking the logical end of a payload inside a padded ledger entry.
pub const END_MARKER: &[u8] = b"\x00\x1ePALANTIR-END\x1e\x00";

pub fn append_end_marker(mut payload: Vec<u8>) -> Vec<u8> {
    payload.extend_from_slice(END_MARKER);
    payload
}

/// Returns everything in front of the last end marker, dropping the marker and any padding
/// behind it.
pub fn strip_end_marker(bytes: &[u8]) -> Result<&[u8], PayloadError> {
    let position = bytes
        .windows(END_MARKER.len())
        .rposition(|window| window == END_MARKER)
        .ok_or(PayloadError::MissingEndMarker)?;
    Ok(&bytes[..position])
}
