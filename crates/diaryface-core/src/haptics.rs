//! Vibration cues and the pulse trains behind them.

/// Why the watch is vibrating.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum HapticCue {
    /// A link came back.
    Confirmation,
    /// A link was lost.
    StrongAlert,
    /// The next event starts now.
    EventAlarm,
}

impl HapticCue {
    pub const fn pattern(self) -> VibePattern {
        match self {
            Self::Confirmation => VibePattern(3),
            Self::StrongAlert => VibePattern(7),
            Self::EventAlarm => VibePattern(8),
        }
    }
}

/// Numbered vibration pattern, 0 (none) through 8 (most insistent).
///
/// Segments alternate motor-on and motor-off durations in milliseconds,
/// starting with on. Numbers outside 0..=8 are silent.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct VibePattern(pub u8);

const SHORT: u32 = 150;
const GAP: u32 = 150;
const LONG: u32 = 500;
const HARD: u32 = 400;

const NONE: &[u32] = &[];
const SINGLE: &[u32] = &[SHORT];
const DOUBLE: &[u32] = &[SHORT, GAP, SHORT];
const TRIPLE: &[u32] = &[SHORT, GAP, SHORT, GAP, SHORT];
const LONG_ONE: &[u32] = &[LONG];
const SUBTLE: &[u32] = &[SHORT, GAP, SHORT, GAP, LONG];
const LESS_SUBTLE: &[u32] = &[LONG, GAP, LONG, GAP, LONG];
const FIVE_HARD: &[u32] = &[HARD, GAP, HARD, GAP, HARD, GAP, HARD, GAP, HARD];
const ALARM: &[u32] = &[
    LONG, GAP, SHORT, GAP, SHORT, GAP, LONG, GAP, SHORT, GAP, SHORT, GAP, LONG,
];

impl VibePattern {
    pub const MAX: u8 = 8;

    pub const fn segments(self) -> &'static [u32] {
        match self.0 {
            1 => SINGLE,
            2 => DOUBLE,
            3 => TRIPLE,
            4 => LONG_ONE,
            5 => SUBTLE,
            6 => LESS_SUBTLE,
            7 => FIVE_HARD,
            8 => ALARM,
            _ => NONE,
        }
    }

    pub const fn is_silent(self) -> bool {
        self.segments().is_empty()
    }

    /// Number of motor-on pulses.
    pub const fn pulses(self) -> usize {
        self.segments().len().div_ceil(2)
    }

    /// Total run time including gaps.
    pub fn duration_ms(self) -> u32 {
        self.segments().iter().sum()
    }
}
