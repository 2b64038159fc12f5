#![cfg_attr(not(test), no_std)]

//! Companion app message protocol for the diaryface watchface.
//!
//! Messages are small key/value dictionaries. The transport that serializes
//! them lives outside this crate; here we only model the dictionary, the
//! protocol keys, and the fixed-layout records carried in byte tuples.

mod exchange;
pub mod keys;
pub mod record;

pub use exchange::{OutboundRequest, Response, classify, decode_battery, decode_calendar};
pub use record::{BatteryStatus, EVENT_RECORD_LEN, EventRecord};

use heapless::Vec;

/// Inbox buffer size negotiated with the platform.
pub const INBOX_BYTES: usize = 124;
/// Outbox buffer size negotiated with the platform.
pub const OUTBOX_BYTES: usize = 256;
/// Maximum tuples carried by one message.
pub const MAX_TUPLES: usize = 4;
/// Largest byte payload a single tuple may carry.
pub const MAX_VALUE_BYTES: usize = INBOX_BYTES;

/// Serialized dictionary header: one tuple-count byte.
const DICT_HEADER_BYTES: usize = 1;
/// Serialized tuple header: key (4) + type (1) + length (2).
const TUPLE_HEADER_BYTES: usize = 7;

/// Protocol-level errors raised while building or reading messages.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum MessageError {
    /// No room for another tuple.
    Full,
    /// A tuple with the same key is already present.
    DuplicateKey(u32),
    /// Byte payload exceeds [`MAX_VALUE_BYTES`].
    ValueTooLarge { len: usize },
}

/// Errors raised when a tuple payload does not match its record layout.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum DecodeError {
    /// Payload length differs from the fixed record size.
    Length { expected: usize, actual: usize },
    /// Calendar payload announced a record count other than one.
    Count(u8),
    /// Tuple carried an integer where bytes were expected.
    NotBytes,
}

/// One tuple value.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum Value {
    U8(u8),
    I8(i8),
    Bytes(Vec<u8, MAX_VALUE_BYTES>),
}

impl Value {
    /// Builds a byte value, rejecting payloads larger than the inbox.
    pub fn bytes(data: &[u8]) -> Result<Self, MessageError> {
        Vec::from_slice(data)
            .map(Self::Bytes)
            .map_err(|_| MessageError::ValueTooLarge { len: data.len() })
    }

    /// Reads the value as an unsigned byte, the way the platform reads the
    /// first byte of any tuple.
    pub fn as_u8(&self) -> Option<u8> {
        match self {
            Self::U8(value) => Some(*value),
            Self::I8(value) => Some(*value as u8),
            Self::Bytes(bytes) => bytes.first().copied(),
        }
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Self::Bytes(bytes) => Some(bytes),
            _ => None,
        }
    }

    fn payload_len(&self) -> usize {
        match self {
            Self::U8(_) | Self::I8(_) => 1,
            Self::Bytes(bytes) => bytes.len(),
        }
    }
}

/// Key/value pair inside a [`Message`].
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Tuple {
    pub key: u32,
    pub value: Value,
}

/// A companion message dictionary.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct Message {
    tuples: Vec<Tuple, MAX_TUPLES>,
}

impl Message {
    pub const fn new() -> Self {
        Self { tuples: Vec::new() }
    }

    /// Appends a tuple. Keys are unique within a message.
    pub fn push(&mut self, key: u32, value: Value) -> Result<(), MessageError> {
        if self.contains(key) {
            return Err(MessageError::DuplicateKey(key));
        }

        self.tuples
            .push(Tuple { key, value })
            .map_err(|_| MessageError::Full)
    }

    /// Builder form of [`Message::push`].
    pub fn with(mut self, key: u32, value: Value) -> Result<Self, MessageError> {
        self.push(key, value)?;
        Ok(self)
    }

    pub fn find(&self, key: u32) -> Option<&Value> {
        self.tuples
            .iter()
            .find(|tuple| tuple.key == key)
            .map(|tuple| &tuple.value)
    }

    pub fn contains(&self, key: u32) -> bool {
        self.find(key).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Tuple> {
        self.tuples.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.tuples.is_empty()
    }

    /// Size of the message once serialized by the platform.
    pub fn encoded_len(&self) -> usize {
        DICT_HEADER_BYTES
            + self
                .tuples
                .iter()
                .map(|tuple| TUPLE_HEADER_BYTES + tuple.value.payload_len())
                .sum::<usize>()
    }

    /// Whether the serialized message fits a buffer of `limit` bytes.
    pub fn fits(&self, limit: usize) -> bool {
        self.encoded_len() <= limit
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_keys_are_rejected() {
        let mut message = Message::new();
        message.push(keys::RECONNECT, Value::U8(1)).unwrap();
        assert_eq!(
            message.push(keys::RECONNECT, Value::U8(2)),
            Err(MessageError::DuplicateKey(keys::RECONNECT))
        );
    }

    #[test]
    fn capacity_is_bounded() {
        let mut message = Message::new();
        for key in 0..MAX_TUPLES as u32 {
            message.push(key, Value::U8(0)).unwrap();
        }
        assert_eq!(message.push(99, Value::U8(0)), Err(MessageError::Full));
    }

    #[test]
    fn oversized_bytes_are_rejected() {
        let data = [0u8; MAX_VALUE_BYTES + 1];
        assert_eq!(
            Value::bytes(&data),
            Err(MessageError::ValueTooLarge {
                len: MAX_VALUE_BYTES + 1
            })
        );
    }

    #[test]
    fn encoded_len_counts_headers() {
        let message = Message::new()
            .with(keys::REQUEST_CALENDAR, Value::I8(0))
            .unwrap()
            .with(keys::CLOCK_STYLE, Value::U8(keys::CLOCK_STYLE_24H))
            .unwrap();
        assert_eq!(message.encoded_len(), 1 + 2 * (7 + 1));
        assert!(message.fits(OUTBOX_BYTES));
    }

    #[test]
    fn u8_view_reads_first_byte_of_any_value() {
        assert_eq!(Value::U8(7).as_u8(), Some(7));
        assert_eq!(Value::I8(-1).as_u8(), Some(0xFF));
        assert_eq!(Value::bytes(&[3, 4]).unwrap().as_u8(), Some(3));
        assert_eq!(Value::bytes(&[]).unwrap().as_u8(), None);
        assert_eq!(Value::U8(1).as_bytes(), None);
    }
}
