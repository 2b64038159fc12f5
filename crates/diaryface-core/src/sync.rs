//! Request/response exchange with the companion app: outbound requests,
//! outbox feedback, and the periodic re-synchronization cadence.

use diaryface_protocol::OutboundRequest;
use log::{debug, warn};

use crate::{calendar::ClockStyle, intent::Intent};

/// Delays and cadence for the sync protocol.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct SyncConfig {
    /// Delay before retrying a request the outbox refused.
    pub retry_ms: u32,
    /// Delay between an accepted calendar request and its battery follow-up.
    pub battery_follow_up_ms: u32,
    /// Delay before requesting the next event slot.
    pub next_slot_ms: u32,
    /// Delay before answering a reconnect notice.
    pub reconnect_ms: u32,
    /// Delay before the periodic full re-fetch.
    pub periodic_ms: u32,
    /// Delay before the first request after start-up.
    pub startup_ms: u32,
    /// Wall-clock minutes between full re-fetches.
    pub resync_every_minutes: u8,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            retry_ms: 1_000,
            battery_follow_up_ms: 1_000,
            next_slot_ms: 200,
            reconnect_ms: 200,
            periodic_ms: 500,
            startup_ms: 200,
            resync_every_minutes: 10,
        }
    }
}

/// Deferred work the session asks the scheduler to run later.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Request {
    Calendar,
    Battery,
}

impl From<OutboundRequest> for Request {
    fn from(request: OutboundRequest) -> Self {
        match request {
            OutboundRequest::Calendar { .. } => Self::Calendar,
            OutboundRequest::Battery => Self::Battery,
        }
    }
}

/// Outbox failure reasons the platform reports.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SendFailure {
    /// The companion app is not reachable over the link.
    NotConnected,
    /// The companion did not acknowledge in time.
    Timeout,
    /// The message was refused by the companion.
    Rejected,
}

pub struct SyncProtocolDriver {
    config: SyncConfig,
    clock_style: ClockStyle,
}

impl SyncProtocolDriver {
    pub const fn new(config: SyncConfig, clock_style: ClockStyle) -> Self {
        Self {
            config,
            clock_style,
        }
    }

    pub const fn config(&self) -> &SyncConfig {
        &self.config
    }

    pub const fn clock_style(&self) -> ClockStyle {
        self.clock_style
    }

    pub fn set_clock_style(&mut self, clock_style: ClockStyle) {
        self.clock_style = clock_style;
    }

    pub fn calendar_request(&self, fetch_index: u8) -> OutboundRequest {
        OutboundRequest::Calendar {
            fetch_index: fetch_index as i8,
            clock_style: self.clock_style.wire_code(),
        }
    }

    pub fn battery_request(&self) -> OutboundRequest {
        OutboundRequest::Battery
    }

    /// The outbox could not take `request`; try the same request again later.
    pub fn on_busy(&self, request: Request) -> Intent {
        debug!("outbox busy, retrying {:?} in {}ms", request, self.config.retry_ms);
        Intent::Schedule {
            after_ms: self.config.retry_ms,
            task: request,
        }
    }

    /// The outbox took `request`. Calendar requests are followed by a
    /// battery request.
    pub fn on_accepted(&self, request: Request) -> Option<Intent> {
        match request {
            Request::Calendar => Some(Intent::Schedule {
                after_ms: self.config.battery_follow_up_ms,
                task: Request::Battery,
            }),
            Request::Battery => None,
        }
    }

    /// Whether `failure` means the app is unreachable. Other reasons are
    /// logged and otherwise ignored.
    pub fn on_failure(&self, failure: SendFailure) -> bool {
        match failure {
            SendFailure::NotConnected => true,
            other => {
                warn!("send failed: {:?}", other);
                false
            }
        }
    }

    pub fn is_resync_minute(&self, minute: u8) -> bool {
        match self.config.resync_every_minutes {
            0 => false,
            every => minute % every == 0,
        }
    }

    pub fn schedule(&self, after_ms: u32, task: Request) -> Intent {
        Intent::Schedule { after_ms, task }
    }
}
