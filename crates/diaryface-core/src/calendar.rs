//! Civil calendar arithmetic for date labels and the clock face.
//!
//! Dates arrive from the platform clock already broken down; nothing here
//! parses or converts epoch time.

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Weekday {
    Sunday,
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
}

impl Weekday {
    const ALL: [Self; 7] = [
        Self::Sunday,
        Self::Monday,
        Self::Tuesday,
        Self::Wednesday,
        Self::Thursday,
        Self::Friday,
        Self::Saturday,
    ];

    /// Sunday-based index, wrapped modulo 7.
    pub const fn from_index(index: u8) -> Self {
        Self::ALL[(index % 7) as usize]
    }

    pub const fn index(self) -> u8 {
        self as u8
    }

    pub const fn next(self) -> Self {
        Self::from_index(self.index() + 1)
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Sunday => "Sunday",
            Self::Monday => "Monday",
            Self::Tuesday => "Tuesday",
            Self::Wednesday => "Wednesday",
            Self::Thursday => "Thursday",
            Self::Friday => "Friday",
            Self::Saturday => "Saturday",
        }
    }

    /// ISO-8601 day number, Monday = 1 .. Sunday = 7.
    const fn iso_number(self) -> u8 {
        match self {
            Self::Sunday => 7,
            other => other.index(),
        }
    }
}

/// Broken-down local date.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct CivilDate {
    pub year: u16,
    /// 1..=12
    pub month: u8,
    /// 1..=31
    pub day: u8,
    pub weekday: Weekday,
}

impl CivilDate {
    pub const fn new(year: u16, month: u8, day: u8, weekday: Weekday) -> Self {
        Self {
            year,
            month,
            day,
            weekday,
        }
    }

    /// Steps forward one day at a time, rolling months and years over.
    pub fn plus_days(self, days: u16) -> Self {
        let mut next = self;
        for _ in 0..days {
            next.day = next.day.saturating_add(1);
            if next.day > days_in_month(next.year, next.month) {
                next.day = 1;
                next.month += 1;
                if next.month > 12 {
                    next.month = 1;
                    next.year = next.year.saturating_add(1);
                }
            }
            next.weekday = next.weekday.next();
        }
        next
    }

    /// `MM/DD`, the prefix shared by every start-date encoding.
    pub fn short_date(&self) -> [u8; 5] {
        [
            b'0' + (self.month / 10) % 10,
            b'0' + self.month % 10,
            b'/',
            b'0' + (self.day / 10) % 10,
            b'0' + self.day % 10,
        ]
    }

    /// Day of the year, 1-based.
    pub fn ordinal(&self) -> u16 {
        let full_months: u16 = (1..self.month.clamp(1, 12))
            .map(|month| days_in_month(self.year, month) as u16)
            .sum();
        full_months + self.day as u16
    }

    /// ISO-8601 week number.
    pub fn iso_week(&self) -> u8 {
        let ordinal = self.ordinal() as i32;
        let weekday = self.weekday.iso_number() as i32;
        let week = (ordinal - weekday + 10) / 7;

        if week < 1 {
            iso_weeks_in_year(self.year.saturating_sub(1))
        } else if week > iso_weeks_in_year(self.year) as i32 {
            1
        } else {
            week as u8
        }
    }
}

/// Wall-clock reading delivered with every minute tick.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ClockTime {
    pub date: CivilDate,
    pub hour: u8,
    pub minute: u8,
}

impl ClockTime {
    pub const fn new(date: CivilDate, hour: u8, minute: u8) -> Self {
        Self { date, hour, minute }
    }
}

/// User's clock style, forwarded to the companion so it formats event
/// times to match.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ClockStyle {
    TwelveHour,
    TwentyFourHour,
}

impl ClockStyle {
    pub const fn wire_code(self) -> u8 {
        match self {
            Self::TwelveHour => diaryface_protocol::keys::CLOCK_STYLE_12H,
            Self::TwentyFourHour => diaryface_protocol::keys::CLOCK_STYLE_24H,
        }
    }
}

pub const fn is_leap_year(year: u16) -> bool {
    if year % 400 == 0 {
        return true;
    }
    if year % 100 == 0 {
        return false;
    }
    year % 4 == 0
}

pub fn days_in_month(year: u16, month: u8) -> u8 {
    const DAYS_PER_MONTH: [u8; 12] = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

    let month = month.clamp(1, 12);
    if month == 2 && is_leap_year(year) {
        29
    } else {
        DAYS_PER_MONTH[(month - 1) as usize]
    }
}

pub fn month_abbrev(month: u8) -> Option<&'static str> {
    const MONTHS: [&str; 12] = [
        "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
    ];

    MONTHS.get(month.checked_sub(1)? as usize).copied()
}

fn iso_weeks_in_year(year: u16) -> u8 {
    let p = |y: i32| (y + y / 4 - y / 100 + y / 400) % 7;
    let year = year as i32;
    if p(year) == 4 || p(year - 1) == 3 {
        53
    } else {
        52
    }
}
