//! Dictionary keys and marker values shared with the companion app.

/// Inbound: companion restarted and wants a fresh calendar request.
pub const RECONNECT: u32 = 0;
/// Outbound: calendar request carrying the fetch index (`i8`).
pub const REQUEST_CALENDAR: u32 = 1;
/// Outbound: clock style accompanying a calendar request (`u8`).
pub const CLOCK_STYLE: u32 = 2;
/// Inbound: count byte followed by one serialized event.
pub const CALENDAR_RESPONSE: u32 = 3;
/// Outbound: battery request marker.
pub const REQUEST_BATTERY: u32 = 8;
/// Inbound: serialized battery status.
pub const BATTERY_RESPONSE: u32 = 9;
/// Inbound: settings payload follows under [`PARTIAL_INVERSE`].
pub const SETTINGS_RESPONSE: u32 = 28;
/// Inbound settings tuple and persist key for the partial-inverse preference.
pub const PARTIAL_INVERSE: u32 = 100;

pub const CLOCK_STYLE_12H: u8 = 1;
pub const CLOCK_STYLE_24H: u8 = 2;

/// Value written under [`REQUEST_BATTERY`].
pub const BATTERY_REQUEST_MARKER: u8 = 1;
