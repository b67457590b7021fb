//! Record header layout:
//!
//! ```text
//!  7    6    5    4    3    2..0
//! [MB] [ME] [CF] [SR] [IL] [TNF]
//! type length | payload length (1 or 4 bytes) | id length (if IL) | type | id | payload
//! ```

use crate::NdefError;

const MB: u8 = 0x80;
const ME: u8 = 0x40;
const CF: u8 = 0x20;
const SR: u8 = 0x10;
const IL: u8 = 0x08;
const TNF_MASK: u8 = 0x07;

/// Type Name Format: how the type field of a record is to be read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tnf {
    Empty,
    WellKnown,
    Media,
    AbsoluteUri,
    External,
    Unknown,
    Unchanged,
    Reserved,
}

impl Tnf {
    fn from_bits(bits: u8) -> Self {
        match bits & TNF_MASK {
            0x00 => Tnf::Empty,
            0x01 => Tnf::WellKnown,
            0x02 => Tnf::Media,
            0x03 => Tnf::AbsoluteUri,
            0x04 => Tnf::External,
            0x05 => Tnf::Unknown,
            0x06 => Tnf::Unchanged,
            _ => Tnf::Reserved,
        }
    }

    fn bits(self) -> u8 {
        match self {
            Tnf::Empty => 0x00,
            Tnf::WellKnown => 0x01,
            Tnf::Media => 0x02,
            Tnf::AbsoluteUri => 0x03,
            Tnf::External => 0x04,
            Tnf::Unknown => 0x05,
            Tnf::Unchanged => 0x06,
            Tnf::Reserved => 0x07,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NdefRecord {
    pub tnf: Tnf,
    pub record_type: Vec<u8>,
    pub id: Vec<u8>,
    pub payload: Vec<u8>,
}

impl NdefRecord {
    pub fn new(tnf: Tnf, record_type: &[u8], payload: Vec<u8>) -> Self {
        Self {
            tnf,
            record_type: record_type.to_vec(),
            id: Vec::new(),
            payload,
        }
    }

    pub fn with_id(mut self, id: &[u8]) -> Self {
        self.id = id.to_vec();
        self
    }

    fn encoded_len(&self) -> usize {
        let payload_len_size = if self.is_short() { 1 } else { 4 };
        let id_len_size = usize::from(!self.id.is_empty());
        1 + 1
            + payload_len_size
            + id_len_size
            + self.record_type.len()
            + self.id.len()
            + self.payload.len()
    }

    fn is_short(&self) -> bool {
        self.payload.len() < 256
    }
}

/// Serializes `records` into a single message.
pub fn create_message(records: &[NdefRecord]) -> Result<Vec<u8>, NdefError> {
    if records.is_empty() {
        return Err(NdefError::Empty);
    }

    let total: usize = records.iter().map(NdefRecord::encoded_len).sum();
    let mut buffer: Vec<u8> = Vec::with_capacity(total);
    let last = records.len() - 1;

    for (idx, record) in records.iter().enumerate() {
        check_lengths(record)?;

        let mut header: u8 = record.tnf.bits();
        if idx == 0 {
            header |= MB;
        }
        if idx == last {
            header |= ME;
        }
        if record.is_short() {
            header |= SR;
        }
        if !record.id.is_empty() {
            header |= IL;
        }

        buffer.push(header);
        buffer.push(record.record_type.len() as u8);
        if record.is_short() {
            buffer.push(record.payload.len() as u8);
        } else {
            buffer.extend_from_slice(&(record.payload.len() as u32).to_be_bytes());
        }
        if !record.id.is_empty() {
            buffer.push(record.id.len() as u8);
        }
        buffer.extend_from_slice(&record.record_type);
        buffer.extend_from_slice(&record.id);
        buffer.extend_from_slice(&record.payload);
    }

    Ok(buffer)
}

fn check_lengths(record: &NdefRecord) -> Result<(), NdefError> {
    if record.record_type.len() > u8::MAX as usize {
        return Err(NdefError::Malformed("type longer than 255 bytes".to_string()));
    }
    if record.id.len() > u8::MAX as usize {
        return Err(NdefError::Malformed("id longer than 255 bytes".to_string()));
    }
    if u32::try_from(record.payload.len()).is_err() {
        return Err(NdefError::Malformed("payload longer than 4 GiB".to_string()));
    }
    if record.tnf == Tnf::Empty
        && !(record.record_type.is_empty() && record.id.is_empty() && record.payload.is_empty())
    {
        return Err(NdefError::Malformed("empty record carries data".to_string()));
    }
    Ok(())
}

/// Parses a message. Bytes after the record flagged ME are ignored, tags
/// commonly pad their memory.
pub fn get_records(bytes: &[u8]) -> Result<Vec<NdefRecord>, NdefError> {
    if bytes.is_empty() {
        return Err(NdefError::Empty);
    }

    let mut cursor = Cursor::new(bytes);
    let mut records: Vec<NdefRecord> = Vec::new();

    loop {
        let header: u8 = cursor.u8()?;

        if records.is_empty() && header & MB == 0 {
            return Err(NdefError::Malformed("first record lacks the begin flag".to_string()));
        }
        if !records.is_empty() && header & MB != 0 {
            return Err(NdefError::Malformed(format!(
                "begin flag set on record {}",
                records.len()
            )));
        }
        if header & CF != 0 {
            return Err(NdefError::Unsupported("chunked records".to_string()));
        }

        let tnf = Tnf::from_bits(header);
        if matches!(tnf, Tnf::Unchanged | Tnf::Reserved) {
            return Err(NdefError::Malformed(format!("type name format {tnf:?} outside a chunk")));
        }

        let type_len = cursor.u8()? as usize;
        let payload_len = if header & SR != 0 {
            cursor.u8()? as usize
        } else {
            let raw: [u8; 4] = cursor
                .take(4)?
                .try_into()
                .map_err(|_| NdefError::Malformed("payload length".to_string()))?;
            u32::from_be_bytes(raw) as usize
        };
        let id_len = if header & IL != 0 { cursor.u8()? as usize } else { 0 };

        let record = NdefRecord {
            tnf,
            record_type: cursor.take(type_len)?.to_vec(),
            id: cursor.take(id_len)?.to_vec(),
            payload: cursor.take(payload_len)?.to_vec(),
        };

        if record.tnf == Tnf::Empty && type_len + id_len + payload_len != 0 {
            return Err(NdefError::Malformed("empty record carries data".to_string()));
        }

        records.push(record);

        if header & ME != 0 {
            return Ok(records);
        }
    }
}

struct Cursor<'a> {
    bytes: &'a [u8],
    offset: usize,
}

impl<'a> Cursor<'a> {
    fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, offset: 0 }
    }

    fn u8(&mut self) -> Result<u8, NdefError> {
        Ok(self.take(1)?[0])
    }

    fn take(&mut self, len: usize) -> Result<&'a [u8], NdefError> {
        let remaining = self.bytes.len() - self.offset;
        if len > remaining {
            return Err(NdefError::Truncated {
                offset: self.offset,
                needed: len - remaining,
            });
        }
        let slice = &self.bytes[self.offset..self.offset + len];
        self.offset += len;
        Ok(slice)
    }
}
