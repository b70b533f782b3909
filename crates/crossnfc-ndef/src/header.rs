use crate::ndef_type::NdefType;

#[derive(Debug, Clone, PartialEq, Eq, uniffi::Record)]
pub struct NdefHeader {
    pub message_begin: bool,
    pub message_end: bool,
    pub chunked: bool,
    pub short_record: bool,
    pub has_id_length: bool,
    pub type_name_format: NdefType,
    pub type_length: u8,
    pub payload_length: u32,
    pub id_length: Option<u8>,
}

impl NdefHeader {
    /// First octet of a record frame: MB, ME, CF, SR, IL flags plus the TNF
    pub fn flag_byte(&self) -> u8 {
        let mut flags = self.type_name_format.tnf();

        if self.message_begin {
            flags |= 0x80;
        }

        if self.message_end {
            flags |= 0x40;
        }

        if self.chunked {
            flags |= 0x20;
        }

        if self.short_record {
            flags |= 0x10;
        }

        if self.has_id_length {
            flags |= 0x08;
        }

        flags
    }
}
