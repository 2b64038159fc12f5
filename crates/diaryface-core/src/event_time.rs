//! Start-date labels for the event card: "Today 14:30", "Friday All day",
//! "Jul 14 - 9:00 AM".

use core::fmt::Write;

use heapless::String;

use crate::{
    calendar::{CivilDate, month_abbrev},
    close_days::DateLabelCache,
    text::{SliceWriter, clipped},
};

pub const ALL_DAY: &str = "All day";
/// Byte budget of the on-screen start-date field.
pub const LABEL_BYTES: usize = 20;

/// Fixed-offset view of a start-date encoding.
///
/// ```text
/// MM/DD H:MM[ AM]        time-of-day at offset 6
/// MM/DD/YY H:MM[ AM]     time-of-day at offset 9
/// ```
///
/// The byte at offset 5 tells the two apart. Every accessor checks the input
/// length first; short or garbled input yields empty fields, never a panic.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct StartDate<'a> {
    raw: &'a str,
    time_offset: usize,
}

impl<'a> StartDate<'a> {
    pub fn parse(raw: &'a str) -> Self {
        let time_offset = if raw.as_bytes().get(5) == Some(&b'/') {
            9
        } else {
            6
        };
        Self { raw, time_offset }
    }

    /// `MM/DD`, or whatever shorter prefix the input has.
    pub fn date_prefix(&self) -> &'a str {
        self.raw.get(..5).unwrap_or(self.raw)
    }

    pub fn month(&self) -> u8 {
        leading_number(self.raw.as_bytes().get(0..2))
    }

    pub fn day(&self) -> u8 {
        leading_number(self.raw.as_bytes().get(3..5))
    }

    pub fn time_of_day(&self) -> &'a str {
        self.raw.get(self.time_offset..).unwrap_or("")
    }
}

/// Reads digits until the first non-digit, like the companion's own parser.
fn leading_number(digits: Option<&[u8]>) -> u8 {
    let mut value = 0u8;
    for byte in digits.unwrap_or(&[]) {
        if !byte.is_ascii_digit() {
            break;
        }
        value = value.saturating_mul(10).saturating_add(byte - b'0');
    }
    value
}

/// Turns a start-date encoding into the label shown under the event title.
#[derive(Clone, Debug, Default)]
pub struct CalendarTimeFormatter {
    cache: DateLabelCache,
}

impl CalendarTimeFormatter {
    pub const fn new() -> Self {
        Self {
            cache: DateLabelCache::new(),
        }
    }

    /// Writes the label into `out`, truncating when it does not fit.
    pub fn format<'a>(
        &mut self,
        today: CivilDate,
        raw: &str,
        all_day: bool,
        out: &'a mut [u8],
    ) -> &'a str {
        self.cache.ensure_fresh(today);

        let start = StartDate::parse(raw);
        let mut writer = SliceWriter::new(out);
        let _ = match self.cache.lookup(raw) {
            Some(label) => writer.write_str(label),
            None => match (month_abbrev(start.month()), start.day()) {
                (Some(month), day @ 1..=31) => write!(writer, "{} {} -", month, day),
                _ => write!(writer, "{} -", start.date_prefix()),
            },
        };

        let suffix = if all_day {
            ALL_DAY
        } else {
            start.time_of_day()
        };
        let _ = write!(writer, " {}", suffix);
        writer.into_str()
    }

    /// [`format`](Self::format) into an owned field-sized string.
    pub fn label(&mut self, today: CivilDate, raw: &str, all_day: bool) -> String<LABEL_BYTES> {
        let mut buf = [0u8; LABEL_BYTES];
        clipped(self.format(today, raw, all_day, &mut buf))
    }

    pub fn cache(&self) -> &DateLabelCache {
        &self.cache
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::Weekday;

    const JULY_4: CivilDate = CivilDate::new(2025, 7, 4, Weekday::Friday);

    fn render(raw: &str, all_day: bool) -> String<LABEL_BYTES> {
        CalendarTimeFormatter::new().label(JULY_4, raw, all_day)
    }

    #[test]
    fn today_with_twenty_four_hour_time() {
        assert_eq!(render("07/04/25 14:30", false).as_str(), "Today 14:30");
    }

    #[test]
    fn today_with_twelve_hour_time() {
        assert_eq!(render("07/04/25 2:30 PM", false).as_str(), "Today 2:30 PM");
    }

    #[test]
    fn short_encoding_uses_earlier_time_offset() {
        assert_eq!(render("07/05 9:15", false).as_str(), "Tomorrow 9:15");
    }

    #[test]
    fn weekday_label_within_the_week() {
        assert_eq!(render("07/08/25 8:00 AM", false).as_str(), "Tuesday 8:00 AM");
        assert_eq!(render("07/09", true).as_str(), "Wednesday All day");
    }

    #[test]
    fn outside_the_week_falls_back_to_month_and_day() {
        assert_eq!(render("07/14/25", true).as_str(), "Jul 14 - All day");
        assert_eq!(render("12/01 18:45", false).as_str(), "Dec 1 - 18:45");
    }

    #[test]
    fn garbled_month_keeps_raw_prefix() {
        assert_eq!(render("xx/14/25", true).as_str(), "xx/14 - All day");
    }

    #[test]
    fn short_input_never_reads_out_of_bounds() {
        assert_eq!(render("", false).as_str(), " - ");
        assert_eq!(render("07", true).as_str(), "07 - All day");
        assert_eq!(render("07/04", false).as_str(), "Today ");
    }

    #[test]
    fn output_is_truncated_to_caller_buffer() {
        let mut formatter = CalendarTimeFormatter::new();
        let mut buf = [0u8; 9];
        let text = formatter.format(JULY_4, "07/09/25 11:59 PM", false, &mut buf);
        assert_eq!(text, "Wednesday");
    }

    #[test]
    fn formatter_refreshes_cache_on_new_day() {
        let mut formatter = CalendarTimeFormatter::new();
        let mut buf = [0u8; LABEL_BYTES];
        assert_eq!(
            formatter.format(JULY_4, "07/05 10:00", false, &mut buf),
            "Tomorrow 10:00"
        );

        let july_5 = JULY_4.plus_days(1);
        let mut buf = [0u8; LABEL_BYTES];
        assert_eq!(
            formatter.format(july_5, "07/05 10:00", false, &mut buf),
            "Today 10:00"
        );
    }

    #[test]
    fn start_date_fields_are_extracted_by_offset() {
        let long = StartDate::parse("11/23/25 7:05 PM");
        assert_eq!(long.date_prefix(), "11/23");
        assert_eq!(long.month(), 11);
        assert_eq!(long.day(), 23);
        assert_eq!(long.time_of_day(), "7:05 PM");

        let short = StartDate::parse("03/09 0:15");
        assert_eq!(short.month(), 3);
        assert_eq!(short.day(), 9);
        assert_eq!(short.time_of_day(), "0:15");
    }
}
