//! Payload of the well-known URI (`U`) record: one abbreviation byte followed
//! by the rest of the URI.

use crate::NdefError;

const PREFIXES: [&str; 36] = [
    "",
    "http://www.",
    "https://www.",
    "http://",
    "https://",
    "tel:",
    "mailto:",
    "ftp://anonymous:anonymous@",
    "ftp://ftp.",
    "ftps://",
    "sftp://",
    "smb://",
    "nfs://",
    "ftp://",
    "dav://",
    "news:",
    "telnet://",
    "imap:",
    "rtsp://",
    "urn:",
    "pop:",
    "sip:",
    "sips:",
    "tftp:",
    "btspp://",
    "btl2cap://",
    "btgoep://",
    "tcpobex://",
    "irdaobex://",
    "file://",
    "urn:epc:id:",
    "urn:epc:tag:",
    "urn:epc:pat:",
    "urn:epc:raw:",
    "urn:epc:",
    "urn:nfc:",
];

/// Abbreviates `uri` with the longest matching prefix.
pub fn create_payload(uri: &str) -> Vec<u8> {
    let (code, prefix) = PREFIXES
        .iter()
        .enumerate()
        .skip(1)
        .filter(|(_, prefix)| uri.starts_with(*prefix))
        .max_by_key(|(_, prefix)| prefix.len())
        .unwrap_or((0, &""));

    let rest = &uri[prefix.len()..];
    let mut payload: Vec<u8> = Vec::with_capacity(1 + rest.len());
    payload.push(code as u8);
    payload.extend_from_slice(rest.as_bytes());
    payload
}

/// Expands a payload back into the full URI.
///
/// Reserved abbreviation codes are read as "no prefix".
pub fn get_uri(payload: &[u8]) -> Result<String, NdefError> {
    let Some((&code, rest)) = payload.split_first() else {
        return Err(NdefError::Truncated { offset: 0, needed: 1 });
    };

    let prefix = PREFIXES.get(code as usize).copied().unwrap_or("");
    let rest = std::str::from_utf8(rest)
        .map_err(|e| NdefError::Malformed(format!("URI is not UTF-8: {e}")))?;

    Ok(format!("{prefix}{rest}"))
}
