// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration shared by interactors and the poller.
use std::time::Duration;

use palantir_core::SecurityLevel;
use serde::{Deserialize, Serialize};

/// Security level used when deriving identity addresses.
pub const DEFAULT_SECURITY_LEVEL: u8 = 2;

/// Interval between two identity checks.
pub const DEFAULT_CHECK_USER_INTERVAL: Duration = Duration::from_secs(60);

/// Maximum size of a chat message in bytes, before encryption.
pub const DEFAULT_MAX_MESSAGE_LENGTH: usize = 2048;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Strength of the address derivation for identity addresses.
    ///
    /// Changing it changes every derived address, users re-creating their identity from a seed
    /// need to use the same value as before.
    pub security_level: SecurityLevel,

    /// How often a [`Poller`](crate::Poller) re-runs its interactor.
    pub check_user_interval: Duration,

    /// Messages above this size are rejected with
    /// [`ResponseCode::MessageTooLong`](crate::ResponseCode::MessageTooLong).
    pub max_message_length: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            security_level: SecurityLevel::default(),
            check_user_interval: DEFAULT_CHECK_USER_INTERVAL,
            max_message_length: DEFAULT_MAX_MESSAGE_LENGTH,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Config, DEFAULT_SECURITY_LEVEL};

    #[test]
    fn defaults() {
        let config = Config::default();
        assert_eq!(config.security_level.value(), DEFAULT_SECURITY_LEVEL);
        assert_eq!(config.check_user_interval.as_secs(), 60);
        assert_eq!(config.max_message_length, 2048);
    }

    #[test]
    fn from_json() {
        let json = r#"{
            "security_level": 3,
            "check_user_interval": { "secs": 5, "nanos": 0 },
            "max_message_length": 16
        }"#;
        let config: Config = serde_json::from_str(json).unwrap();
        assert_eq!(config.security_level.value(), 3);
        assert_eq!(config.check_user_interval.as_secs(), 5);
        assert_eq!(config.max_message_length, 16);

        let invalid = r#"{
            "security_level": 7,
            "check_user_interval": { "secs": 5, "nanos": 0 },
            "max_message_length": 16
        }"#;
        assert!(serde_json::from_str::<Config>(invalid).is_err());
    }
}
