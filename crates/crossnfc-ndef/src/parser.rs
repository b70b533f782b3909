pub mod stream;

use stream::{Stream, StreamExt as _};
use tracing::warn;
use winnow::{
    ModalResult, Parser,
    binary::{
        Endianness,
        bits::{bits, bool as take_bool, take as take_bits},
    },
    error::{ContextError, ErrMode, Needed},
    token::{any, take},
};

use crate::{
    NdefError,
    header::NdefHeader,
    ndef_type::NdefType,
    payload,
    record::{DEFAULT_MIME_TYPE, NdefRecord},
};

/// One record frame as it sits on the wire, before any interpretation
#[derive(Debug, Clone, PartialEq, Eq)]
struct RawRecord {
    header: NdefHeader,
    type_: Vec<u8>,
    payload: Vec<u8>,
}

/// Decode a raw NDEF message into records.
///
/// Frames are parsed until the ME flag is seen or the input runs dry, bytes
/// after the ME record are ignored. A declared length that runs past the end
/// of the buffer is a hard [`NdefError::TruncatedInput`].
pub fn decode(input: &[u8]) -> Result<Vec<NdefRecord>, NdefError> {
    let mut stream = stream::new(input);
    let mut records = Vec::new();

    while !stream.is_empty() {
        let raw = parse_ndef_record.parse_next(&mut stream).map_err(truncated)?;
        let message_end = raw.header.message_end;

        records.push(into_record(raw)?);

        if message_end {
            break;
        }
    }

    Ok(records)
}

fn parse_ndef_record(input: &mut Stream<'_>) -> ModalResult<RawRecord> {
    let header = parse_header.parse_next(input)?;
    let type_ = parse_type(input, header.type_length)?;

    // this codec never emits ids, anything present is skipped over
    let _id = parse_id(input, header.id_length)?;

    let payload = parse_payload(input, header.payload_length)?;

    Ok(RawRecord { header, type_, payload })
}

fn parse_header_byte(input: &mut Stream<'_>) -> ModalResult<(bool, bool, bool, bool, bool, u8)> {
    bits::<_, _, ErrMode<ContextError>, _, _>((
        take_bool,
        take_bool,
        take_bool,
        take_bool,
        take_bool,
        take_bits(3_u8),
    ))
    .parse_next(input)
}

fn parse_header(input: &mut Stream<'_>) -> ModalResult<NdefHeader> {
    let (message_begin, message_end, chunked, short_record, has_id_length, type_name_format) =
        parse_header_byte(input)?;

    let type_length = winnow::binary::u8.parse_next(input)?;

    let payload_length = if short_record {
        any.map(|x: u8| x as u32).parse_next(input)?
    } else {
        winnow::binary::u32(Endianness::Big).parse_next(input)?
    };

    let id_length = if has_id_length {
        Some(any.parse_next(input)?)
    } else {
        None
    };

    Ok(NdefHeader {
        message_begin,
        message_end,
        chunked,
        short_record,
        has_id_length,
        type_name_format: NdefType::from_tnf(type_name_format),
        type_length,
        payload_length,
        id_length,
    })
}

fn parse_type(input: &mut Stream<'_>, type_length: u8) -> ModalResult<Vec<u8>> {
    take(type_length as usize)
        .map(|s: &[u8]| s.to_vec())
        .parse_next(input)
}

fn parse_id(input: &mut Stream<'_>, id_length: Option<u8>) -> ModalResult<Option<Vec<u8>>> {
    if let Some(id_len) = id_length {
        take(id_len as usize)
            .map(|s: &[u8]| Some(s.to_vec()))
            .parse_next(input)
    } else {
        Ok(None)
    }
}

fn parse_payload(input: &mut Stream<'_>, payload_length: u32) -> ModalResult<Vec<u8>> {
    take(payload_length as usize)
        .map(|s: &[u8]| s.to_vec())
        .parse_next(input)
}

fn truncated(error: ErrMode<ContextError>) -> NdefError {
    warn!("ndef message ended mid record: {error}");

    match error {
        ErrMode::Incomplete(Needed::Size(needed)) => NdefError::TruncatedInput {
            needed: needed.get() as u64,
        },
        _ => NdefError::TruncatedInput { needed: 0 },
    }
}

/// Map a parsed frame onto the logical record model
fn into_record(raw: RawRecord) -> Result<NdefRecord, NdefError> {
    let RawRecord { header, type_, payload } = raw;

    let record = match header.type_name_format {
        // whatever was declared alongside an empty TNF is dropped on the floor
        NdefType::Empty => NdefRecord::empty(),

        NdefType::WellKnown if type_ == b"T" => text_record(&payload)?,

        NdefType::WellKnown if type_ == b"U" => uri_record(&payload),
        NdefType::Uri => uri_record(&payload),

        NdefType::WellKnown => NdefRecord {
            type_format: NdefType::WellKnown,
            payload: Some(payload),
            ..NdefRecord::default()
        },

        NdefType::Mime => {
            let mime_type = String::from_utf8_lossy(&type_).into_owned();
            NdefRecord {
                type_format: NdefType::Mime,
                mime_type: if mime_type.is_empty() {
                    DEFAULT_MIME_TYPE.to_string()
                } else {
                    mime_type
                },
                payload: Some(payload),
                ..NdefRecord::default()
            }
        }

        NdefType::External => {
            let combined = String::from_utf8_lossy(&type_).into_owned();
            let Some((domain, external_type)) = combined.split_once(':') else {
                return Err(NdefError::MalformedExternalType(combined));
            };

            if domain.is_empty() || external_type.is_empty() {
                return Err(NdefError::MalformedExternalType(combined));
            }

            NdefRecord {
                type_format: NdefType::External,
                external_domain: Some(domain.to_string()),
                external_type: Some(external_type.to_string()),
                payload: Some(payload),
                ..NdefRecord::default()
            }
        }

        type_format @ (NdefType::Unknown | NdefType::Unchanged | NdefType::Reserved) => {
            NdefRecord {
                type_format,
                payload: Some(payload),
                ..NdefRecord::default()
            }
        }
    };

    Ok(record)
}

fn text_record(payload: &[u8]) -> Result<NdefRecord, NdefError> {
    let Some(&status) = payload.first() else {
        return Err(NdefError::TruncatedInput { needed: 1 });
    };

    let is_utf16 = status & 0x80 != 0;
    let language_code_length = (status & 0x3F) as usize;

    let Some(language_code) = payload.get(1..1 + language_code_length) else {
        return Err(NdefError::TruncatedInput {
            needed: (1 + language_code_length - payload.len()) as u64,
        });
    };

    let text = &payload[1 + language_code_length..];
    let text = if is_utf16 {
        payload::utf16_be_lossy(text)
    } else {
        String::from_utf8_lossy(text).into_owned()
    };

    Ok(NdefRecord {
        type_format: NdefType::WellKnown,
        payload: Some(text.into_bytes()),
        language_code: Some(String::from_utf8_lossy(language_code).into_owned()),
        ..NdefRecord::default()
    })
}

fn uri_record(payload: &[u8]) -> NdefRecord {
    let uri = match payload.split_first() {
        Some((&code, suffix)) => {
            format!("{}{}", payload::uri_prefix(code), String::from_utf8_lossy(suffix))
        }
        None => String::new(),
    };

    NdefRecord {
        type_format: NdefType::Uri,
        uri: Some(uri),
        ..NdefRecord::default()
    }
}
