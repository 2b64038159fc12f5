//! Minute-tick clock face text and event-alarm matching.

use core::fmt::Write;

use diaryface_protocol::EventRecord;
use heapless::String;

use crate::{
    calendar::{ClockStyle, ClockTime, month_abbrev},
    event_time::StartDate,
};

pub const TIME_BYTES: usize = 8;
pub const DATE_BYTES: usize = 24;
pub const WEEK_BYTES: usize = 4;

/// Text for the clock half of the screen. Date and week are only present on
/// the first tick of a new day.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ClockFace {
    pub time: String<TIME_BYTES>,
    pub date: Option<String<DATE_BYTES>>,
    pub week: Option<String<WEEK_BYTES>>,
}

const fn twelve_hour(hour: u8) -> u8 {
    match hour % 12 {
        0 => 12,
        other => other,
    }
}

/// `HH:MM` on the 24h clock, `H:MM` on the 12h clock.
pub fn time_text(time: &ClockTime, style: ClockStyle) -> String<TIME_BYTES> {
    let mut out = String::new();
    let _ = match style {
        ClockStyle::TwentyFourHour => write!(out, "{:02}:{:02}", time.hour, time.minute),
        ClockStyle::TwelveHour => write!(out, "{}:{:02}", twelve_hour(time.hour), time.minute),
    };
    out
}

/// `Friday Jul 4`
pub fn date_text(time: &ClockTime) -> String<DATE_BYTES> {
    let date = &time.date;
    let mut out = String::new();
    let _ = write!(
        out,
        "{} {} {}",
        date.weekday.name(),
        month_abbrev(date.month).unwrap_or(""),
        date.day
    );
    out
}

/// `W27`
pub fn week_text(time: &ClockTime) -> String<WEEK_BYTES> {
    let mut out = String::new();
    let _ = write!(out, "W{:02}", time.date.iso_week());
    out
}

/// Time-of-day in the shape the companion writes into start dates:
/// `9:05` / `14:30` on the 24h clock, `9:05 AM` on the 12h clock.
pub fn alarm_time_text(time: &ClockTime, style: ClockStyle) -> String<TIME_BYTES> {
    let mut out = String::new();
    let _ = match style {
        ClockStyle::TwentyFourHour => write!(out, "{}:{:02}", time.hour, time.minute),
        ClockStyle::TwelveHour => {
            let meridiem = if time.hour < 12 { "AM" } else { "PM" };
            write!(
                out,
                "{}:{:02} {}",
                twelve_hour(time.hour),
                time.minute,
                meridiem
            )
        }
    };
    out
}

/// Whether `event` starts exactly at `time`.
pub fn starts_at(event: &EventRecord, time: &ClockTime, style: ClockStyle) -> bool {
    let start = StartDate::parse(&event.start_date);
    let today = time.date.short_date();

    start.date_prefix().as_bytes() == today.as_slice()
        && start.time_of_day() == alarm_time_text(time, style).as_str()
}

/// Remembers the day the date line was last drawn for.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct ClockFaceState {
    drawn_day: Option<u8>,
}

impl ClockFaceState {
    pub const fn new() -> Self {
        Self { drawn_day: None }
    }

    pub fn render(&mut self, time: &ClockTime, style: ClockStyle) -> ClockFace {
        let new_day = self.drawn_day != Some(time.date.day);
        if new_day {
            self.drawn_day = Some(time.date.day);
        }

        ClockFace {
            time: time_text(time, style),
            date: new_day.then(|| date_text(time)),
            week: new_day.then(|| week_text(time)),
        }
    }
}
