use crossnfc_ndef::record::{self, NdefRecord};

/// What a platform radio layer reports about a discovered tag, plus the
/// records pulled off it
#[derive(Debug, Clone, PartialEq, Eq, Default, uniffi::Record)]
pub struct TagInfo {
    /// Raw hardware identifier of the tag
    pub identifier: Vec<u8>,
    pub is_writable: bool,
    /// Maximum NDEF content size in bytes, when the radio reports one
    pub capacity: Option<u32>,
    pub records: Vec<NdefRecord>,
}

impl TagInfo {
    pub fn new(
        identifier: Vec<u8>,
        is_writable: bool,
        capacity: Option<u32>,
        records: Vec<NdefRecord>,
    ) -> Self {
        Self { identifier, is_writable, capacity, records }
    }

    pub fn serial_number(&self) -> String {
        crossnfc_util::bytes_to_hex_string(&self.identifier, ":")
    }

    pub fn is_empty(&self) -> bool {
        record::is_empty(&self.records)
    }

    pub fn content_size(&self) -> u64 {
        record::content_size(&self.records)
    }
}
