/// URI prefix codes as defined in NFC Forum RTD URI specification
pub const URI_PREFIXES: &[&str] = &[
    "",                           // 0x00 - no prepending
    "http://www.",                // 0x01
    "https://www.",               // 0x02
    "http://",                    // 0x03
    "https://",                   // 0x04
    "tel:",                       // 0x05
    "mailto:",                    // 0x06
    "ftp://anonymous:anonymous@", // 0x07
    "ftp://ftp.",                 // 0x08
    "ftps://",                    // 0x09
    "sftp://",                    // 0x0A
    "smb://",                     // 0x0B
    "nfs://",                     // 0x0C
    "ftp://",                     // 0x0D
    "dav://",                     // 0x0E
    "news:",                      // 0x0F
    "telnet://",                  // 0x10
    "imap:",                      // 0x11
    "rtsp://",                    // 0x12
    "urn:",                       // 0x13
    "pop:",                       // 0x14
    "sip:",                       // 0x15
    "sips:",                      // 0x16
    "tftp:",                      // 0x17
    "btspp://",                   // 0x18
    "btl2cap://",                 // 0x19
    "btgoep://",                  // 0x1A
    "tcpobex://",                 // 0x1B
    "irdaobex://",                // 0x1C
    "file://",                    // 0x1D
    "urn:epc:id:",                // 0x1E
    "urn:epc:tag:",               // 0x1F
    "urn:epc:pat:",               // 0x20
    "urn:epc:raw:",               // 0x21
    "urn:epc:",                   // 0x22
    "urn:nfc:",                   // 0x23
];

/// Split a URI into the longest matching prefix code and the remaining suffix.
/// Returns code 0x00 and the full string when nothing in the table matches.
pub fn compress_uri(uri: &str) -> (u8, &str) {
    let mut code = 0u8;
    let mut prefix_len = 0;

    for (index, prefix) in URI_PREFIXES.iter().enumerate().skip(1) {
        if prefix.len() > prefix_len && uri.starts_with(prefix) {
            code = index as u8;
            prefix_len = prefix.len();
        }
    }

    (code, &uri[prefix_len..])
}

/// Prefix string for a code read off the wire, out of range codes expand to nothing
pub fn uri_prefix(code: u8) -> &'static str {
    URI_PREFIXES.get(code as usize).copied().unwrap_or("")
}

/// Lossy decode of big endian UTF-16 text payload bytes
pub fn utf16_be_lossy(bytes: &[u8]) -> String {
    String::from_utf16_lossy(
        &bytes
            .chunks_exact(2)
            .map(|chunk| u16::from_be_bytes([chunk[0], chunk[1]]))
            .collect::<Vec<u16>>(),
    )
}
