use crossnfc_ndef::{NdefError, encode, record::{self, NdefRecord}};
use tracing::warn;

use crate::{config::NfcConfiguration, tag_info::TagInfo};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error, uniffi::Error)]
pub enum WriteError {
    #[error("tag is not writable")]
    NotWritable,

    #[error("message is {size} bytes but the tag only holds {capacity}")]
    CapacityExceeded { capacity: u32, size: u64 },

    #[error("could not encode records: {0}")]
    Codec(NdefError),
}

impl From<NdefError> for WriteError {
    fn from(error: NdefError) -> Self {
        Self::Codec(error)
    }
}

/// Encode records for a write against a specific tag.
///
/// Writability and capacity are checked up front, the codec itself never
/// truncates. The returned buffer goes verbatim to the platform write
/// primitive.
pub fn prepare_write(tag: &TagInfo, records: &[NdefRecord]) -> Result<Vec<u8>, WriteError> {
    if !tag.is_writable {
        return Err(WriteError::NotWritable);
    }

    if let Some(capacity) = tag.capacity {
        let size = record::content_size(records);
        if size > capacity as u64 {
            warn!(capacity, size, "message does not fit on the tag");
            return Err(WriteError::CapacityExceeded { capacity, size });
        }
    }

    let config = NfcConfiguration::shared();
    Ok(encode(records, &config.default_language_code)?)
}

/// Encode the canonical erase message for clearing a tag
pub fn prepare_clear(tag: &TagInfo) -> Result<Vec<u8>, WriteError> {
    if !tag.is_writable {
        return Err(WriteError::NotWritable);
    }

    let config = NfcConfiguration::shared();
    Ok(encode(&[], &config.default_language_code)?)
}
