uniffi::setup_scaffolding!();

/// Hex rendering of raw tag bytes, uppercase, with an optional separator
/// between octets (`""` for none)
pub fn bytes_to_hex_string(bytes: &[u8], separator: &str) -> String {
    if separator.is_empty() {
        return hex::encode_upper(bytes);
    }

    bytes
        .iter()
        .map(|byte| format!("{byte:02X}"))
        .collect::<Vec<String>>()
        .join(separator)
}

pub fn text_to_bytes(text: &str) -> Vec<u8> {
    text.as_bytes().to_vec()
}

mod ffi {
    #[uniffi::export]
    fn bytes_to_hex_string(bytes: Vec<u8>, separator: String) -> String {
        super::bytes_to_hex_string(&bytes, &separator)
    }

    #[uniffi::export]
    fn text_to_bytes(text: String) -> Vec<u8> {
        text.into_bytes()
    }

    #[uniffi::export]
    fn hex_decode(hex: &str) -> Option<Vec<u8>> {
        hex::decode(hex).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_string_without_separator() {
        assert_eq!(bytes_to_hex_string(&[0x04, 0xA1, 0xFF], ""), "04A1FF");
        assert_eq!(bytes_to_hex_string(&[], ""), "");
    }

    #[test]
    fn hex_string_with_separator() {
        assert_eq!(bytes_to_hex_string(&[0x04, 0xA1, 0xFF], ":"), "04:A1:FF");
        assert_eq!(bytes_to_hex_string(&[0x04], ":"), "04");
    }

    #[test]
    fn text_round_trips_as_utf8() {
        assert_eq!(text_to_bytes("hello"), b"hello".to_vec());
    }
}
