#![cfg_attr(not(test), no_std)]

//! Calendar sync and connection-health core of the diaryface watchface.
//!
//! [`SyncSession`] is the only stateful entry point: the host feeds it
//! [`SessionEvent`]s and carries out the [`Intent`]s it returns. Nothing here
//! touches timers, radios or the display.

pub mod calendar;
pub mod clock;
pub mod close_days;
pub mod connectivity;
pub mod event_time;
pub mod events;
pub mod haptics;
pub mod intent;
pub mod session;
pub mod settings;
pub mod sync;
pub mod text;

pub use calendar::{CivilDate, ClockStyle, ClockTime, Weekday};
pub use intent::{Alert, EventCard, Intent, Intents};
pub use session::{SessionEvent, SyncSession};
pub use settings::{PreferenceStore, Preferences};
pub use sync::{Request, SendFailure, SyncConfig};
