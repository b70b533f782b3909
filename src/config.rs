use std::sync::LazyLock;

use parking_lot::RwLock;
use tracing::info;

pub const DEFAULT_LANGUAGE_CODE: &str = "en";

static SHARED: LazyLock<RwLock<NfcConfiguration>> =
    LazyLock::new(|| RwLock::new(NfcConfiguration::default()));

/// Process wide settings the platform layers push down before reading or
/// writing tags. The codec itself only ever sees the values as arguments.
#[derive(Debug, Clone, PartialEq, Eq, uniffi::Record)]
pub struct NfcConfiguration {
    /// ISO 639-1 language code applied to text records that do not carry
    /// their own
    pub default_language_code: String,
}

impl Default for NfcConfiguration {
    fn default() -> Self {
        Self {
            default_language_code: DEFAULT_LANGUAGE_CODE.to_string(),
        }
    }
}

impl NfcConfiguration {
    /// Snapshot of the shared configuration
    pub fn shared() -> NfcConfiguration {
        SHARED.read().clone()
    }

    /// Replace the shared configuration, a blank language code leaves the
    /// current one in place
    pub fn update(new_config: NfcConfiguration) {
        if new_config.default_language_code.trim().is_empty() {
            return;
        }

        info!(
            language = %new_config.default_language_code,
            "updating nfc configuration"
        );

        *SHARED.write() = new_config;
    }
}
