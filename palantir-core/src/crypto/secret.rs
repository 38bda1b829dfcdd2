// SPDX-License-Identifier: MIT OR Apache-2.0

use std::fmt;

use serde::{Deserialize, Serialize};
use subtle::ConstantTimeEq;
use zeroize::ZeroizeOnDrop;

/// Key material which must not leak.
///
/// Wiped when dropped, compared in constant time and redacted in `Debug` output, so key pairs can
/// be logged with `?` safely.
#[derive(Clone, Eq, Serialize, Deserialize, ZeroizeOnDrop)]
pub struct Secret<const N: usize>(#[serde(with = "serde_bytes")] [u8; N]);

impl<const N: usize> Secret<N> {
    pub fn from_bytes(bytes: [u8; N]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; N] {
        &self.0
    }
}

impl<const N: usize> PartialEq for Secret<N> {
    fn eq(&self, other: &Self) -> bool {
        self.0.ct_eq(&other.0).into()
    }
}

impl<const N: usize> fmt::Debug for Secret<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Secret<{N}>(redacted)")
    }
}

#[cfg(test)]
mod tests {
    use super::Secret;

    #[test]
    fn redacted_in_logs() {
        let secret = Secret::from_bytes([42u8; 4]);
        let printed = format!("{secret:?}");
        assert_eq!(printed, "Secret<4>(redacted)");
        assert!(!printed.contains("42"));
    }

    #[test]
    fn compares_by_value() {
        assert_eq!(Secret::from_bytes([1u8; 32]), Secret::from_bytes([1u8; 32]));
        assert_ne!(Secret::from_bytes([1u8; 32]), Secret::from_bytes([2u8; 32]));
    }
}
