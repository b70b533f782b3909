use crossnfc_ndef::record::NdefRecord;

use crate::{config::NfcConfiguration, tag_info::TagInfo, write, write::WriteError};

#[uniffi::export]
fn shared_configuration() -> NfcConfiguration {
    NfcConfiguration::shared()
}

#[uniffi::export]
fn update_configuration(config: NfcConfiguration) {
    NfcConfiguration::update(config)
}

#[uniffi::export]
fn prepare_write(tag: TagInfo, records: Vec<NdefRecord>) -> Result<Vec<u8>, WriteError> {
    write::prepare_write(&tag, &records)
}

#[uniffi::export]
fn prepare_clear(tag: TagInfo) -> Result<Vec<u8>, WriteError> {
    write::prepare_clear(&tag)
}

#[uniffi::export]
fn tag_serial_number(tag: TagInfo) -> String {
    tag.serial_number()
}

#[uniffi::export]
fn tag_is_empty(tag: TagInfo) -> bool {
    tag.is_empty()
}

#[uniffi::export]
fn init_logging() {
    crate::logging::init()
}
