use crate::{NdefError, record, record::NdefRecord};

/// Stateless codec handle for the platform bindings
#[derive(Debug, Clone, Default, uniffi::Object)]
pub struct NdefCodec;

#[uniffi::export]
impl NdefCodec {
    #[uniffi::constructor]
    pub fn new() -> Self {
        Self
    }

    #[uniffi::method]
    pub fn encode(
        &self,
        records: Vec<NdefRecord>,
        default_language_code: String,
    ) -> Result<Vec<u8>, NdefError> {
        crate::encode(&records, &default_language_code)
    }

    #[uniffi::method]
    pub fn decode(&self, bytes: Vec<u8>) -> Result<Vec<NdefRecord>, NdefError> {
        crate::decode(&bytes)
    }
}

#[uniffi::export]
fn render_message(record: NdefRecord) -> String {
    record.message()
}

#[uniffi::export]
fn content_size(records: Vec<NdefRecord>) -> u64 {
    record::content_size(&records)
}

#[uniffi::export]
fn records_are_empty(records: Vec<NdefRecord>) -> bool {
    record::is_empty(&records)
}
