use crate::{ndef_type::NdefType, payload};

pub const DEFAULT_MIME_TYPE: &str = "text/plain";

/// One logical NDEF record.
///
/// The `payload` field holds content bytes, not wire framing: for a well known
/// text record it is the bare text and the language lives in `language_code`.
/// A record coming straight off a platform radio may still carry the wire form
/// payload (status byte + language code + text) with `language_code` unset,
/// [`NdefRecord::message`] handles both shapes.
#[derive(Debug, Clone, PartialEq, Eq, uniffi::Record)]
pub struct NdefRecord {
    pub type_format: NdefType,
    pub payload: Option<Vec<u8>>,
    pub mime_type: String,
    pub external_domain: Option<String>,
    pub external_type: Option<String>,
    pub uri: Option<String>,
    pub language_code: Option<String>,
}

impl Default for NdefRecord {
    fn default() -> Self {
        Self {
            type_format: NdefType::Empty,
            payload: None,
            mime_type: DEFAULT_MIME_TYPE.to_string(),
            external_domain: None,
            external_type: None,
            uri: None,
            language_code: None,
        }
    }
}

impl NdefRecord {
    /// Well known text record, the language code falls back to the configured
    /// default at encode time when malformed
    pub fn text(text: impl Into<String>, language_code: impl Into<String>) -> Self {
        Self {
            type_format: NdefType::WellKnown,
            payload: Some(text.into().into_bytes()),
            language_code: Some(language_code.into()),
            ..Self::default()
        }
    }

    pub fn uri(uri: impl Into<String>) -> Self {
        Self {
            type_format: NdefType::Uri,
            uri: Some(uri.into()),
            ..Self::default()
        }
    }

    pub fn mime(mime_type: impl Into<String>, payload: Vec<u8>) -> Self {
        Self {
            type_format: NdefType::Mime,
            mime_type: mime_type.into(),
            payload: Some(payload),
            ..Self::default()
        }
    }

    pub fn external(
        domain: impl Into<String>,
        type_: impl Into<String>,
        payload: Vec<u8>,
    ) -> Self {
        Self {
            type_format: NdefType::External,
            external_domain: Some(domain.into()),
            external_type: Some(type_.into()),
            payload: Some(payload),
            ..Self::default()
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// Human readable rendering of the record, never fails.
    ///
    /// The URI wins when present, everything else is a best effort text decode,
    /// malformed payloads come back as garbage rather than an error.
    pub fn message(&self) -> String {
        if let Some(uri) = &self.uri {
            if !uri.trim().is_empty() {
                return uri.clone();
            }
        }

        let Some(payload) = &self.payload else {
            return String::new();
        };

        match self.type_format {
            // wire form text payload, strip the status byte and language code
            NdefType::WellKnown if self.language_code.is_none() => wire_text(payload),
            _ => String::from_utf8_lossy(payload).into_owned(),
        }
    }
}

/// Sum of payload byte lengths, callers compare this against a tag's reported
/// capacity before attempting a write
pub fn content_size(records: &[NdefRecord]) -> u64 {
    records
        .iter()
        .map(|record| record.payload.as_ref().map_or(0, |payload| payload.len() as u64))
        .sum()
}

/// A tag is empty when it has no records at all or leads with an empty record
pub fn is_empty(records: &[NdefRecord]) -> bool {
    match records.first() {
        None => true,
        Some(record) => record.type_format == NdefType::Empty,
    }
}

fn wire_text(payload: &[u8]) -> String {
    let Some(&status) = payload.first() else {
        return String::new();
    };

    let is_utf16 = status & 0x80 != 0;
    let language_code_length = (status & 0x3F) as usize;
    let text = payload.get(1 + language_code_length..).unwrap_or_default();

    if is_utf16 {
        payload::utf16_be_lossy(text)
    } else {
        String::from_utf8_lossy(text).into_owned()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn uri_takes_precedence_over_payload() {
        let record = NdefRecord {
            uri: Some("https://example.com".to_string()),
            payload: Some(b"ignored".to_vec()),
            ..NdefRecord::default()
        };

        assert_eq!(record.message(), "https://example.com");
    }

    #[test]
    fn blank_uri_falls_through_to_payload() {
        let record = NdefRecord {
            type_format: NdefType::Mime,
            uri: Some("   ".to_string()),
            payload: Some(b"hello".to_vec()),
            ..NdefRecord::default()
        };

        assert_eq!(record.message(), "hello");
    }

    #[test]
    fn wire_form_text_is_stripped() {
        // status byte 0x02, language "en", text "hello"
        let record = NdefRecord {
            type_format: NdefType::WellKnown,
            payload: Some(vec![0x02, b'e', b'n', b'h', b'e', b'l', b'l', b'o']),
            ..NdefRecord::default()
        };

        assert_eq!(record.message(), "hello");
    }

    #[test]
    fn decoded_text_is_returned_as_is() {
        let record = NdefRecord::text("hello", "en");
        assert_eq!(record.message(), "hello");
    }

    #[test]
    fn utf16_wire_form_text() {
        let record = NdefRecord {
            type_format: NdefType::WellKnown,
            payload: Some(vec![0x82, b'e', b'n', 0x00, b'h', 0x00, b'i']),
            ..NdefRecord::default()
        };

        assert_eq!(record.message(), "hi");
    }

    #[test]
    fn message_never_panics_on_malformed_payloads() {
        let zero_length = NdefRecord {
            type_format: NdefType::WellKnown,
            payload: Some(Vec::new()),
            ..NdefRecord::default()
        };
        assert_eq!(zero_length.message(), "");

        // language code length runs past the payload
        let overrun = NdefRecord {
            type_format: NdefType::WellKnown,
            payload: Some(vec![0x3F, b'e']),
            ..NdefRecord::default()
        };
        assert_eq!(overrun.message(), "");

        let absent = NdefRecord::empty();
        assert_eq!(absent.message(), "");
    }

    #[test]
    fn content_size_sums_payloads() {
        let records = vec![
            NdefRecord::text("hello", "en"),
            NdefRecord::mime("application/json", vec![0; 10]),
            NdefRecord::empty(),
        ];

        assert_eq!(content_size(&records), 15);
        assert_eq!(content_size(&[]), 0);
    }

    #[test]
    fn emptiness_follows_the_first_record() {
        assert!(is_empty(&[]));
        assert!(is_empty(&[NdefRecord::empty()]));
        assert!(is_empty(&[NdefRecord::empty(), NdefRecord::text("x", "en")]));
        assert!(!is_empty(&[NdefRecord::text("x", "en")]));
    }
}
