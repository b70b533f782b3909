use tracing::warn;

use crate::{
    NdefError,
    header::NdefHeader,
    ndef_type::NdefType,
    payload,
    record::NdefRecord,
};

/// Fallback when neither the record nor the configuration carries a usable code
const FALLBACK_LANGUAGE_CODE: &str = "en";

/// Encode records into an NDEF message byte stream.
///
/// The first record gets the MB flag, the last one ME. An empty slice encodes
/// the canonical erase message: a single empty record with both flags set.
/// Capacity checks are the caller's job, nothing is ever truncated here.
pub fn encode(records: &[NdefRecord], default_language_code: &str) -> Result<Vec<u8>, NdefError> {
    if records.is_empty() {
        return encode_record(&NdefRecord::empty(), true, true, default_language_code);
    }

    let mut message = Vec::new();
    let last = records.len() - 1;

    for (index, record) in records.iter().enumerate() {
        let frame = encode_record(record, index == 0, index == last, default_language_code)?;
        message.extend_from_slice(&frame);
    }

    Ok(message)
}

fn encode_record(
    record: &NdefRecord,
    message_begin: bool,
    message_end: bool,
    default_language_code: &str,
) -> Result<Vec<u8>, NdefError> {
    let (type_, payload) = type_and_payload(record, default_language_code)?;

    let Ok(type_length) = u8::try_from(type_.len()) else {
        return Err(NdefError::MalformedExternalType(
            String::from_utf8_lossy(&type_).into_owned(),
        ));
    };

    let header = NdefHeader {
        message_begin,
        message_end,
        chunked: false,
        short_record: payload.len() < 256,
        has_id_length: false,
        type_name_format: record.type_format,
        type_length,
        payload_length: payload.len() as u32,
        id_length: None,
    };

    let mut frame = Vec::with_capacity(6 + type_.len() + payload.len());
    frame.push(header.flag_byte());
    frame.push(header.type_length);

    if header.short_record {
        frame.push(header.payload_length as u8);
    } else {
        frame.extend_from_slice(&header.payload_length.to_be_bytes());
    }

    frame.extend_from_slice(&type_);
    frame.extend_from_slice(&payload);

    Ok(frame)
}

fn type_and_payload(
    record: &NdefRecord,
    default_language_code: &str,
) -> Result<(Vec<u8>, Vec<u8>), NdefError> {
    match record.type_format {
        NdefType::Empty => Ok((Vec::new(), Vec::new())),

        NdefType::WellKnown => {
            let text = record
                .payload
                .as_ref()
                .ok_or(NdefError::MissingPayload(NdefType::WellKnown))?;

            let language = language_code(record, default_language_code);

            let mut payload = Vec::with_capacity(1 + language.len() + text.len());
            // low 6 bits are the language code length, bit 7 clear selects UTF-8
            payload.push(language.len() as u8);
            payload.extend_from_slice(language.as_bytes());
            payload.extend_from_slice(text);

            Ok((b"T".to_vec(), payload))
        }

        NdefType::Uri => {
            let uri = uri_source(record)?;
            let (code, suffix) = payload::compress_uri(&uri);

            let mut payload = Vec::with_capacity(1 + suffix.len());
            payload.push(code);
            payload.extend_from_slice(suffix.as_bytes());

            Ok((b"U".to_vec(), payload))
        }

        NdefType::Mime => {
            let data = record
                .payload
                .as_ref()
                .ok_or(NdefError::MissingPayload(NdefType::Mime))?;

            Ok((record.mime_type.clone().into_bytes(), data.clone()))
        }

        NdefType::External => {
            let (Some(domain), Some(external_type)) =
                (&record.external_domain, &record.external_type)
            else {
                return Err(NdefError::MalformedExternalType(String::new()));
            };

            if domain.is_empty() || external_type.is_empty() {
                return Err(NdefError::MalformedExternalType(format!(
                    "{domain}:{external_type}"
                )));
            }

            let data = record
                .payload
                .as_ref()
                .ok_or(NdefError::MissingPayload(NdefType::External))?;

            Ok((format!("{domain}:{external_type}").into_bytes(), data.clone()))
        }

        type_format @ (NdefType::Unknown | NdefType::Unchanged | NdefType::Reserved) => {
            Err(NdefError::UnsupportedRecordType(type_format))
        }
    }
}

/// The URI field wins, write paths that predate it put the string in the payload
fn uri_source(record: &NdefRecord) -> Result<String, NdefError> {
    if let Some(uri) = &record.uri {
        if !uri.trim().is_empty() {
            return Ok(uri.clone());
        }
    }

    match &record.payload {
        Some(payload) => Ok(String::from_utf8_lossy(payload).into_owned()),
        None => Err(NdefError::MissingPayload(NdefType::Uri)),
    }
}

/// The record's own language code when it is two ASCII letters, then the
/// configured default, then the hard fallback
fn language_code(record: &NdefRecord, default_language_code: &str) -> String {
    if let Some(code) = &record.language_code {
        if is_iso639_code(code) {
            return code.to_ascii_lowercase();
        }

        warn!(%code, "ignoring malformed record language code");
    }

    let default = default_language_code.trim();
    if is_iso639_code(default) {
        return default.to_ascii_lowercase();
    }

    // accept an over long default by keeping its first two letters
    let truncated: String = default.chars().take(2).collect();
    if is_iso639_code(&truncated) {
        return truncated.to_ascii_lowercase();
    }

    warn!(
        default = %default_language_code,
        "ignoring malformed default language code"
    );
    FALLBACK_LANGUAGE_CODE.to_string()
}

fn is_iso639_code(code: &str) -> bool {
    code.len() == 2 && code.bytes().all(|byte| byte.is_ascii_alphabetic())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn text_record_framing() {
        let bytes = encode(&[NdefRecord::text("hello", "en")], "en").unwrap();

        assert_eq!(
            bytes,
            vec![0xD1, 0x01, 0x08, b'T', 0x02, b'e', b'n', b'h', b'e', b'l', b'l', b'o']
        );
    }

    #[test]
    fn erase_message_is_a_single_empty_record() {
        assert_eq!(encode(&[], "en").unwrap(), vec![0xD0, 0x00, 0x00]);
        assert_eq!(encode(&[NdefRecord::empty()], "en").unwrap(), vec![0xD0, 0x00, 0x00]);
    }

    #[test]
    fn uri_record_is_prefix_compressed() {
        let bytes = encode(&[NdefRecord::uri("https://github.com/x")], "en").unwrap();

        let mut expected = vec![0xD3, 0x01, 0x0D, b'U', 0x04];
        expected.extend_from_slice(b"github.com/x");
        assert_eq!(bytes, expected);
    }

    #[test]
    fn uri_without_a_known_prefix_is_emitted_verbatim() {
        let bytes = encode(&[NdefRecord::uri("custom-scheme:xyz")], "en").unwrap();

        let mut expected = vec![0xD3, 0x01, 0x12, b'U', 0x00];
        expected.extend_from_slice(b"custom-scheme:xyz");
        assert_eq!(bytes, expected);
    }

    #[test]
    fn uri_falls_back_to_the_payload_bytes() {
        // write paths that predate the uri field put the string in the payload
        let record = NdefRecord {
            type_format: NdefType::Uri,
            payload: Some(b"https://github.com/x".to_vec()),
            ..NdefRecord::default()
        };

        let with_uri_field = encode(&[NdefRecord::uri("https://github.com/x")], "en").unwrap();
        assert_eq!(encode(&[record], "en").unwrap(), with_uri_field);
    }

    #[test]
    fn short_record_boundary() {
        // 254 and 255 byte payloads still fit the single length byte
        for length in [254usize, 255] {
            let bytes = encode(&[NdefRecord::mime("application/json", vec![0xAB; length])], "en")
                .unwrap();

            assert_eq!(bytes[0], 0xD2);
            assert_eq!(bytes[2] as usize, length);
            assert_eq!(bytes.len(), 3 + 16 + length);
        }

        // 256 forces the 4 byte big endian length field
        let bytes =
            encode(&[NdefRecord::mime("application/json", vec![0xAB; 256])], "en").unwrap();

        assert_eq!(bytes[0], 0xC2);
        assert_eq!(&bytes[2..6], &[0x00, 0x00, 0x01, 0x00]);
        assert_eq!(bytes.len(), 6 + 16 + 256);
    }

    #[test]
    fn message_flags_across_records() {
        let records = vec![
            NdefRecord::text("a", "en"),
            NdefRecord::text("b", "en"),
            NdefRecord::text("c", "en"),
        ];

        let bytes = encode(&records, "en").unwrap();

        // every frame here is 4 header/type bytes plus 4 payload bytes
        let frames: Vec<&[u8]> = bytes.chunks(8).collect();
        assert_eq!(frames.len(), 3);
        assert_eq!(frames[0][0], 0x91);
        assert_eq!(frames[1][0], 0x11);
        assert_eq!(frames[2][0], 0x51);
    }

    #[test]
    fn language_code_fallbacks() {
        // record code wins when valid
        let bytes = encode(&[NdefRecord::text("x", "FR")], "en").unwrap();
        assert_eq!(&bytes[4..7], &[0x02, b'f', b'r']);

        // malformed record code falls back to the default
        let bytes = encode(&[NdefRecord::text("x", "english")], "de").unwrap();
        assert_eq!(&bytes[4..7], &[0x02, b'd', b'e']);

        let record = NdefRecord {
            language_code: None,
            ..NdefRecord::text("x", "en")
        };
        let bytes = encode(&[record], "fr").unwrap();
        assert_eq!(&bytes[4..7], &[0x02, b'f', b'r']);

        // over long default keeps its first two letters
        let bytes = encode(&[NdefRecord::text("x", "!!")], "fra").unwrap();
        assert_eq!(&bytes[4..7], &[0x02, b'f', b'r']);

        // nothing usable anywhere
        let bytes = encode(&[NdefRecord::text("x", "!!")], "12").unwrap();
        assert_eq!(&bytes[4..7], &[0x02, b'e', b'n']);
    }

    #[test]
    fn unsupported_record_types_are_rejected() {
        for type_format in [NdefType::Unknown, NdefType::Unchanged, NdefType::Reserved] {
            let record = NdefRecord {
                type_format,
                payload: Some(vec![0x01]),
                ..NdefRecord::default()
            };

            assert_eq!(
                encode(&[record], "en").unwrap_err(),
                NdefError::UnsupportedRecordType(type_format)
            );
        }
    }

    #[test]
    fn missing_payloads_are_rejected() {
        let record = NdefRecord {
            type_format: NdefType::WellKnown,
            payload: None,
            ..NdefRecord::default()
        };
        assert_eq!(
            encode(&[record], "en").unwrap_err(),
            NdefError::MissingPayload(NdefType::WellKnown)
        );

        let record = NdefRecord {
            type_format: NdefType::Uri,
            ..NdefRecord::default()
        };
        assert_eq!(
            encode(&[record], "en").unwrap_err(),
            NdefError::MissingPayload(NdefType::Uri)
        );
    }

    #[test]
    fn external_record_requires_domain_and_type() {
        let record = NdefRecord {
            type_format: NdefType::External,
            payload: Some(vec![0x01]),
            external_domain: Some("example.com".to_string()),
            external_type: None,
            ..NdefRecord::default()
        };

        assert!(matches!(
            encode(&[record], "en").unwrap_err(),
            NdefError::MalformedExternalType(_)
        ));
    }

    #[test]
    fn empty_record_ignores_in_memory_fields() {
        let record = NdefRecord {
            type_format: NdefType::Empty,
            payload: Some(b"leftover".to_vec()),
            uri: Some("https://example.com".to_string()),
            ..NdefRecord::default()
        };

        assert_eq!(encode(&[record], "en").unwrap(), vec![0xD0, 0x00, 0x00]);
    }
}
