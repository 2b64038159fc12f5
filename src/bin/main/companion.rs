use chrono::{NaiveDateTime, TimeDelta};
use diaryface_core::text::clipped;
use diaryface_protocol::{
    BatteryStatus, EVENT_RECORD_LEN, EventRecord, Message, MessageError, OutboundRequest, Value,
    keys,
};
use log::debug;

const CONFERENCE_TITLE: &str = "Rust Conference";
const CONFERENCE_VENUE: &str = "Hall B";
const KEYNOTE_TITLE: &str = "Keynote";
/// Minutes after start-up at which the keynote begins.
const KEYNOTE_OFFSET_MINUTES: i64 = 3;
const BATTERY_CHARGING_STATE: u8 = 1;
const BATTERY_START_LEVEL: i8 = 87;

/// Phone-side app: answers requests from a fixed agenda built around the
/// simulated start time.
pub(super) struct ScriptedCompanion {
    online: bool,
    partial_inverse: bool,
    started_at: NaiveDateTime,
    battery_level: i8,
}

impl ScriptedCompanion {
    pub(super) fn new(online: bool, started_at: NaiveDateTime) -> Self {
        Self {
            online,
            partial_inverse: true,
            started_at,
            battery_level: BATTERY_START_LEVEL,
        }
    }

    pub(super) fn is_online(&self) -> bool {
        self.online
    }

    /// Messages the app pushes when it first sees the watch.
    pub(super) fn greeting(&self) -> Result<[Message; 2], MessageError> {
        let settings = Message::new()
            .with(keys::SETTINGS_RESPONSE, Value::U8(1))?
            .with(keys::PARTIAL_INVERSE, Value::U8(u8::from(self.partial_inverse)))?;
        Ok([settings, self.reconnect_notice()?])
    }

    pub(super) fn reconnect_notice(&self) -> Result<Message, MessageError> {
        Message::new().with(keys::RECONNECT, Value::U8(1))
    }

    pub(super) fn answer(
        &mut self,
        request: OutboundRequest,
    ) -> Result<Option<Message>, MessageError> {
        match request {
            OutboundRequest::Calendar {
                fetch_index,
                clock_style,
            } => {
                let Some(event) = self.agenda_entry(fetch_index, clock_style) else {
                    debug!("companion has no event for index {}", fetch_index);
                    return Ok(None);
                };

                let mut payload = [0u8; 1 + EVENT_RECORD_LEN];
                payload[0] = 1;
                payload[1..].copy_from_slice(&event.encode());
                Message::new()
                    .with(keys::CALENDAR_RESPONSE, Value::bytes(&payload)?)
                    .map(Some)
            }
            OutboundRequest::Battery => {
                let status = BatteryStatus {
                    state: BATTERY_CHARGING_STATE,
                    level: self.battery_level,
                };
                self.battery_level = (self.battery_level - 1).max(0);
                Message::new()
                    .with(keys::BATTERY_RESPONSE, Value::bytes(&status.encode())?)
                    .map(Some)
            }
        }
    }

    /// Slot 0 is an all-day conference, slot 1 the timed keynote inside it.
    fn agenda_entry(&self, fetch_index: i8, clock_style: u8) -> Option<EventRecord> {
        match fetch_index {
            0 => Some(EventRecord {
                index: 0,
                title: clipped(CONFERENCE_TITLE),
                location: Some(clipped(CONFERENCE_VENUE)),
                all_day: true,
                start_date: clipped(&self.started_at.format("%m/%d").to_string()),
                alarms: [0, 0],
            }),
            1 => {
                let starts = self.started_at + TimeDelta::minutes(KEYNOTE_OFFSET_MINUTES);
                let pattern = if clock_style == keys::CLOCK_STYLE_12H {
                    "%m/%d %-I:%M %p"
                } else {
                    "%m/%d %-H:%M"
                };
                Some(EventRecord {
                    index: 1,
                    title: clipped(KEYNOTE_TITLE),
                    location: None,
                    all_day: false,
                    start_date: clipped(&starts.format(pattern).to_string()),
                    alarms: [-10, 0],
                })
            }
            _ => None,
        }
    }
}
