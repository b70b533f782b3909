use crate::ndef_type::NdefType;

uniffi::setup_scaffolding!();

pub mod encoder;
pub mod ffi;
pub mod header;
pub mod ndef_type;
pub mod parser;
pub mod payload;
pub mod record;

pub use encoder::encode;
pub use parser::decode;
pub use record::NdefRecord;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error, uniffi::Error)]
pub enum NdefError {
    /// Unknown, Unchanged and Reserved records have no wire form of their own
    #[error("{0:?} records cannot be encoded")]
    UnsupportedRecordType(NdefType),

    #[error("{0:?} record has no payload to encode")]
    MissingPayload(NdefType),

    /// A declared length field runs past the end of the input,
    /// `needed` is the number of missing bytes when known, zero otherwise
    #[error("input truncated, need {needed} more bytes")]
    TruncatedInput { needed: u64 },

    #[error("external record type is not a domain:type pair: {0:?}")]
    MalformedExternalType(String),
}
