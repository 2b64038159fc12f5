//! Rolling week of short dates mapped to display labels.

use core::str;

use log::debug;

use crate::calendar::CivilDate;

/// Days covered by the cache: today through today + 6.
pub const CLOSE_DAYS: usize = 7;

pub const TODAY: &str = "Today";
pub const TOMORROW: &str = "Tomorrow";

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
struct CloseDay {
    date: [u8; 5],
    label: &'static str,
}

impl CloseDay {
    const EMPTY: Self = Self {
        date: [0u8; 5],
        label: "",
    };
}

/// Maps `MM/DD` prefixes of the coming week to "Today", "Tomorrow" or the
/// weekday name.
///
/// The table is keyed on day-of-month only: a new build happens whenever the
/// observed day number changes. Two different dates sharing a day number
/// (for example the 5th of consecutive months with no tick in between) are
/// treated as the same day.
#[derive(Clone, Debug)]
pub struct DateLabelCache {
    days: [CloseDay; CLOSE_DAYS],
    built_for_day: Option<u8>,
}

impl DateLabelCache {
    pub const fn new() -> Self {
        Self {
            days: [CloseDay::EMPTY; CLOSE_DAYS],
            built_for_day: None,
        }
    }

    /// Rebuilds the table when `today` falls on a different day-of-month than
    /// the last build. Returns `true` when a rebuild happened.
    pub fn ensure_fresh(&mut self, today: CivilDate) -> bool {
        if self.built_for_day == Some(today.day) {
            return false;
        }

        for (offset, slot) in self.days.iter_mut().enumerate() {
            let date = today.plus_days(offset as u16);
            *slot = CloseDay {
                date: date.short_date(),
                label: date.weekday.name(),
            };
        }
        self.days[0].label = TODAY;
        self.days[1].label = TOMORROW;
        self.built_for_day = Some(today.day);

        debug!(
            "close-day cache rebuilt for {:02}/{:02}",
            today.month, today.day
        );
        true
    }

    /// Label for a date whose first five bytes are `MM/DD`. `None` means the
    /// date is outside the coming week.
    pub fn lookup(&self, short_date: &str) -> Option<&'static str> {
        let prefix = short_date.as_bytes().get(..5)?;
        self.days
            .iter()
            .find(|day| day.date.as_slice() == prefix)
            .map(|day| day.label)
    }

    pub fn entries(&self) -> impl Iterator<Item = (&str, &'static str)> {
        self.days
            .iter()
            .map(|day| (str::from_utf8(&day.date).unwrap_or(""), day.label))
    }
}

impl Default for DateLabelCache {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::Weekday;

    #[test]
    fn first_call_always_builds() {
        let mut cache = DateLabelCache::new();
        assert!(cache.ensure_fresh(CivilDate::new(2025, 7, 4, Weekday::Friday)));
    }

    #[test]
    fn second_call_same_day_is_a_no_op() {
        let mut cache = DateLabelCache::new();
        let today = CivilDate::new(2025, 7, 4, Weekday::Friday);
        cache.ensure_fresh(today);
        let before: [CloseDay; CLOSE_DAYS] = cache.days;

        assert!(!cache.ensure_fresh(today));
        assert_eq!(cache.days, before);
    }

    #[test]
    fn today_and_tomorrow_are_literal_for_every_weekday() {
        for weekday in 0..7u8 {
            let mut cache = DateLabelCache::new();
            cache.ensure_fresh(CivilDate::new(
                2025,
                3,
                9 + weekday,
                Weekday::from_index(weekday),
            ));
            let labels: heapless::Vec<&str, CLOSE_DAYS> =
                cache.entries().map(|(_, label)| label).collect();
            assert_eq!(labels[0], TODAY);
            assert_eq!(labels[1], TOMORROW);
        }
    }

    #[test]
    fn week_spans_month_boundary() {
        let mut cache = DateLabelCache::new();
        cache.ensure_fresh(CivilDate::new(2025, 6, 28, Weekday::Saturday));

        let dates: heapless::Vec<&str, CLOSE_DAYS> =
            cache.entries().map(|(date, _)| date).collect();
        assert_eq!(
            dates.as_slice(),
            &["06/28", "06/29", "06/30", "07/01", "07/02", "07/03", "07/04"]
        );
        assert_eq!(cache.lookup("07/01/25 9:00"), Some("Tuesday"));
        assert_eq!(cache.lookup("07/04"), Some("Friday"));
        assert_eq!(cache.lookup("06/29 10:00"), Some(TOMORROW));
    }

    #[test]
    fn lookup_misses_outside_week_and_on_short_input() {
        let mut cache = DateLabelCache::new();
        cache.ensure_fresh(CivilDate::new(2025, 7, 4, Weekday::Friday));
        assert_eq!(cache.lookup("07/11"), None);
        assert_eq!(cache.lookup("07/0"), None);
        assert_eq!(cache.lookup(""), None);
    }

    #[test]
    fn same_day_number_next_month_keeps_stale_table() {
        let mut cache = DateLabelCache::new();
        cache.ensure_fresh(CivilDate::new(2025, 7, 4, Weekday::Friday));
        assert!(!cache.ensure_fresh(CivilDate::new(2025, 8, 4, Weekday::Monday)));
        assert_eq!(cache.lookup("08/04"), None);
        assert_eq!(cache.lookup("07/04"), Some(TODAY));
    }
}
