//! Payload of the well-known Text (`T`) record:
//!
//! ```text
//! status (bit 7: UTF-16, bit 6: reserved, bits 0..5: language length) | language | text
//! ```

use crate::NdefError;

const UTF16_FLAG: u8 = 0x80;
const RESERVED_FLAG: u8 = 0x40;
const LANG_LEN_MASK: u8 = 0x3F;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextEncoding {
    Utf8,
    Utf16,
}

impl TextEncoding {
    /// Label understood by the record decoder.
    pub fn label(&self) -> &'static str {
        match self {
            TextEncoding::Utf8 => "utf-8",
            TextEncoding::Utf16 => "utf-16",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextPayload<'a> {
    pub encoding: TextEncoding,
    pub lang: String,
    /// Still encoded; decoding is the reader's business.
    pub text: &'a [u8],
}

/// Builds a UTF-8 text payload.
pub fn create_payload(text: &str, lang: &str) -> Result<Vec<u8>, NdefError> {
    let lang_len = lang.len();
    if lang_len > LANG_LEN_MASK as usize || !lang.is_ascii() {
        return Err(NdefError::Malformed(format!("invalid language code '{lang}'")));
    }

    let mut payload: Vec<u8> = Vec::with_capacity(1 + lang_len + text.len());
    payload.push(lang_len as u8);
    payload.extend_from_slice(lang.as_bytes());
    payload.extend_from_slice(text.as_bytes());
    Ok(payload)
}

pub fn get_payload(payload: &[u8]) -> Result<TextPayload<'_>, NdefError> {
    let Some((&status, rest)) = payload.split_first() else {
        return Err(NdefError::Truncated { offset: 0, needed: 1 });
    };

    if status & RESERVED_FLAG != 0 {
        return Err(NdefError::Malformed("reserved bit set in text status".to_string()));
    }

    let lang_len = (status & LANG_LEN_MASK) as usize;
    if lang_len > rest.len() {
        return Err(NdefError::Truncated {
            offset: 1,
            needed: lang_len - rest.len(),
        });
    }

    let (lang, text) = rest.split_at(lang_len);
    let lang = std::str::from_utf8(lang)
        .ok()
        .filter(|l| l.is_ascii())
        .ok_or_else(|| NdefError::Malformed("language code is not ASCII".to_string()))?;

    let encoding = if status & UTF16_FLAG != 0 {
        TextEncoding::Utf16
    } else {
        TextEncoding::Utf8
    };

    Ok(TextPayload {
        encoding,
        lang: lang.to_string(),
        text,
    })
}
