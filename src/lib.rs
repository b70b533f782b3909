pub mod config;
pub mod ffi;
pub mod logging;
pub mod tag_info;
pub mod write;

pub use crossnfc_ndef::{NdefError, NdefRecord, decode, encode};

uniffi::setup_scaffolding!();
