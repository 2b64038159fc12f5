//! Fixed-layout records carried inside byte tuples.

use core::str;

use heapless::String;

use crate::DecodeError;

/// Visible characters in a title or location.
pub const TEXT_CHARS: usize = 20;
/// Visible characters in a start-date encoding.
pub const START_DATE_CHARS: usize = 17;

const TITLE_OFFSET: usize = 1;
const HAS_LOCATION_OFFSET: usize = TITLE_OFFSET + TEXT_CHARS + 1;
const LOCATION_OFFSET: usize = HAS_LOCATION_OFFSET + 1;
const ALL_DAY_OFFSET: usize = LOCATION_OFFSET + TEXT_CHARS + 1;
const START_DATE_OFFSET: usize = ALL_DAY_OFFSET + 1;
const ALARMS_OFFSET: usize = 64;

/// Serialized event size.
///
/// Layout (little-endian, naturally aligned):
/// - 1 byte slot index
/// - 21 bytes title, NUL-terminated
/// - 1 byte has-location flag
/// - 21 bytes location, NUL-terminated
/// - 1 byte all-day flag
/// - 18 bytes start date, NUL-terminated
/// - 1 byte padding
/// - 2 x `i32` alarm offsets
pub const EVENT_RECORD_LEN: usize = ALARMS_OFFSET + 8;

/// Serialized battery status size.
pub const BATTERY_RECORD_LEN: usize = 2;

/// One calendar entry as sent by the companion app.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct EventRecord {
    pub index: u8,
    pub title: String<TEXT_CHARS>,
    pub location: Option<String<TEXT_CHARS>>,
    pub all_day: bool,
    /// `MM/DD H:MM` or `MM/DD/YY H:MM`, optionally followed by ` AM`/` PM`.
    pub start_date: String<START_DATE_CHARS>,
    pub alarms: [i32; 2],
}

impl EventRecord {
    pub fn decode(bytes: &[u8]) -> Result<Self, DecodeError> {
        if bytes.len() != EVENT_RECORD_LEN {
            return Err(DecodeError::Length {
                expected: EVENT_RECORD_LEN,
                actual: bytes.len(),
            });
        }

        let has_location = bytes[HAS_LOCATION_OFFSET] != 0;
        let alarm = |offset: usize| {
            i32::from_le_bytes([
                bytes[offset],
                bytes[offset + 1],
                bytes[offset + 2],
                bytes[offset + 3],
            ])
        };

        Ok(Self {
            index: bytes[0],
            title: text_field(&bytes[TITLE_OFFSET..HAS_LOCATION_OFFSET]),
            location: has_location
                .then(|| text_field(&bytes[LOCATION_OFFSET..ALL_DAY_OFFSET])),
            all_day: bytes[ALL_DAY_OFFSET] != 0,
            start_date: text_field(&bytes[START_DATE_OFFSET..ALARMS_OFFSET - 1]),
            alarms: [alarm(ALARMS_OFFSET), alarm(ALARMS_OFFSET + 4)],
        })
    }

    pub fn encode(&self) -> [u8; EVENT_RECORD_LEN] {
        let mut out = [0u8; EVENT_RECORD_LEN];
        out[0] = self.index;
        copy_text(&mut out[TITLE_OFFSET..HAS_LOCATION_OFFSET], &self.title);
        if let Some(location) = &self.location {
            out[HAS_LOCATION_OFFSET] = 1;
            copy_text(&mut out[LOCATION_OFFSET..ALL_DAY_OFFSET], location);
        }
        out[ALL_DAY_OFFSET] = self.all_day as u8;
        copy_text(
            &mut out[START_DATE_OFFSET..ALARMS_OFFSET - 1],
            &self.start_date,
        );
        out[ALARMS_OFFSET..ALARMS_OFFSET + 4].copy_from_slice(&self.alarms[0].to_le_bytes());
        out[ALARMS_OFFSET + 4..].copy_from_slice(&self.alarms[1].to_le_bytes());
        out
    }

    /// Location text when the event carries one.
    pub fn location_text(&self) -> &str {
        self.location.as_deref().unwrap_or("")
    }
}

/// Phone battery status mirrored on the watch.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct BatteryStatus {
    /// 0 until the companion has reported once.
    pub state: u8,
    /// Percentage, -1 when unknown.
    pub level: i8,
}

impl BatteryStatus {
    pub const UNKNOWN: Self = Self {
        state: 0,
        level: -1,
    };

    pub fn decode(bytes: &[u8]) -> Result<Self, DecodeError> {
        match bytes {
            [state, level] => Ok(Self {
                state: *state,
                level: *level as i8,
            }),
            _ => Err(DecodeError::Length {
                expected: BATTERY_RECORD_LEN,
                actual: bytes.len(),
            }),
        }
    }

    pub fn encode(&self) -> [u8; BATTERY_RECORD_LEN] {
        [self.state, self.level as u8]
    }

    /// Percentage worth drawing, if any.
    pub fn known_level(&self) -> Option<u8> {
        if self.state != 0 && (0..=100).contains(&self.level) {
            Some(self.level as u8)
        } else {
            None
        }
    }
}

impl Default for BatteryStatus {
    fn default() -> Self {
        Self::UNKNOWN
    }
}

/// Reads a NUL-terminated text field. A field without terminator is clipped
/// to `N` bytes and invalid UTF-8 is cut at the last valid character.
fn text_field<const N: usize>(field: &[u8]) -> String<N> {
    let end = field
        .iter()
        .position(|b| *b == 0)
        .unwrap_or(field.len())
        .min(N);
    let raw = &field[..end];
    let text = match str::from_utf8(raw) {
        Ok(text) => text,
        Err(err) => str::from_utf8(&raw[..err.valid_up_to()]).unwrap_or(""),
    };

    let mut out = String::new();
    let _ = out.push_str(text);
    out
}

fn copy_text(field: &mut [u8], text: &str) {
    let len = text.len().min(field.len().saturating_sub(1));
    field[..len].copy_from_slice(&text.as_bytes()[..len]);
}
