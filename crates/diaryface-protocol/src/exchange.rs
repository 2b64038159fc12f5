//! Request builders and inbound response classification.

use crate::{
    DecodeError, Message, MessageError, Value, keys,
    record::{BatteryStatus, EVENT_RECORD_LEN, EventRecord},
};

/// Outbound requests the watch issues.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum OutboundRequest {
    Calendar { fetch_index: i8, clock_style: u8 },
    Battery,
}

impl OutboundRequest {
    pub fn to_message(self) -> Result<Message, MessageError> {
        match self {
            Self::Calendar {
                fetch_index,
                clock_style,
            } => Message::new()
                .with(keys::REQUEST_CALENDAR, Value::I8(fetch_index))?
                .with(keys::CLOCK_STYLE, Value::U8(clock_style)),
            Self::Battery => Message::new().with(
                keys::REQUEST_BATTERY,
                Value::U8(keys::BATTERY_REQUEST_MARKER),
            ),
        }
    }

    /// Recovers a request from its wire form, used by companion-side code.
    pub fn from_message(message: &Message) -> Option<Self> {
        if let Some(index) = message.find(keys::REQUEST_CALENDAR) {
            let clock_style = message
                .find(keys::CLOCK_STYLE)
                .and_then(Value::as_u8)
                .unwrap_or(keys::CLOCK_STYLE_24H);
            return Some(Self::Calendar {
                fetch_index: index.as_u8()? as i8,
                clock_style,
            });
        }

        message
            .contains(keys::REQUEST_BATTERY)
            .then_some(Self::Battery)
    }
}

/// The four response kinds a companion message can carry.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Response<'a> {
    Settings { partial_inverse: Option<bool> },
    Reconnect,
    Calendar(&'a Value),
    Battery(&'a Value),
}

/// Picks the response kind of a message. Exactly one kind is expected per
/// message; when several keys are present the first in priority order wins:
/// settings, reconnect, calendar, battery.
pub fn classify(message: &Message) -> Option<Response<'_>> {
    if message.contains(keys::SETTINGS_RESPONSE) {
        let partial_inverse = message
            .find(keys::PARTIAL_INVERSE)
            .and_then(Value::as_u8)
            .map(|raw| raw != 0);
        return Some(Response::Settings { partial_inverse });
    }

    if message.contains(keys::RECONNECT) {
        return Some(Response::Reconnect);
    }

    if let Some(value) = message.find(keys::CALENDAR_RESPONSE) {
        return Some(Response::Calendar(value));
    }

    message.find(keys::BATTERY_RESPONSE).map(Response::Battery)
}

/// Decodes a calendar payload: one count byte, then exactly one event.
pub fn decode_calendar(value: &Value) -> Result<EventRecord, DecodeError> {
    let bytes = value.as_bytes().ok_or(DecodeError::NotBytes)?;
    if bytes.len() != 1 + EVENT_RECORD_LEN {
        return Err(DecodeError::Length {
            expected: 1 + EVENT_RECORD_LEN,
            actual: bytes.len(),
        });
    }
    if bytes[0] != 1 {
        return Err(DecodeError::Count(bytes[0]));
    }

    EventRecord::decode(&bytes[1..])
}

pub fn decode_battery(value: &Value) -> Result<BatteryStatus, DecodeError> {
    let bytes = value.as_bytes().ok_or(DecodeError::NotBytes)?;
    BatteryStatus::decode(bytes)
}
