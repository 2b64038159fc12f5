//! Watchface sync session: calendar/battery exchange, link health and the
//! clock face, driven one event at a time.

use diaryface_protocol::{
    BatteryStatus, Message, Response, classify, decode_battery, decode_calendar,
};
use heapless::String;
use log::{debug, info};

use crate::{
    calendar::{ClockStyle, ClockTime},
    clock::{ClockFaceState, starts_at},
    connectivity::{ConnectivityTracker, LinkEdge},
    event_time::CalendarTimeFormatter,
    events::EventStore,
    haptics::HapticCue,
    intent::{Alert, EventCard, Intent, Intents, emit},
    settings::Preferences,
    sync::{Request, SendFailure, SyncConfig, SyncProtocolDriver},
    text::clipped,
};

/// Everything the host feeds into the session.
#[derive(Clone, Copy, Debug)]
pub enum SessionEvent<'a> {
    MinuteTick(ClockTime),
    Inbound(&'a Message),
    TimerFired(Request),
    OutboxBusy(Request),
    OutboxAccepted(Request),
    SendFailed(SendFailure),
    TransportChanged(bool),
}

pub struct SyncSession {
    driver: SyncProtocolDriver,
    store: EventStore,
    links: ConnectivityTracker,
    formatter: CalendarTimeFormatter,
    face: ClockFaceState,
    battery: BatteryStatus,
    preferences: Preferences,
    now: ClockTime,
}

impl SyncSession {
    pub fn new(
        config: SyncConfig,
        clock_style: ClockStyle,
        now: ClockTime,
        transport_connected: bool,
    ) -> Self {
        Self {
            driver: SyncProtocolDriver::new(config, clock_style),
            store: EventStore::new(),
            links: ConnectivityTracker::new(transport_connected),
            formatter: CalendarTimeFormatter::new(),
            face: ClockFaceState::new(),
            battery: BatteryStatus::UNKNOWN,
            preferences: Preferences::default(),
            now,
        }
    }

    /// Applies the stored preferences, draws the clock and queues the first
    /// calendar request.
    pub fn start(&mut self, preferences: Preferences) -> Intents {
        self.preferences = preferences;

        let mut intents = Intents::new();
        emit(
            &mut intents,
            Intent::ApplyPartialInverse(preferences.partial_inverse),
        );
        emit(
            &mut intents,
            Intent::ShowClock(self.face.render(&self.now, self.driver.clock_style())),
        );
        emit(&mut intents, Intent::ShowBattery(self.battery));

        self.store.begin_pass();
        emit(
            &mut intents,
            self.driver
                .schedule(self.driver.config().startup_ms, Request::Calendar),
        );

        info!(
            "session started transport={} partial_inverse={}",
            self.links.transport_connected(),
            preferences.partial_inverse
        );
        intents
    }

    pub fn handle(&mut self, event: SessionEvent<'_>) -> Intents {
        let mut intents = Intents::new();
        match event {
            SessionEvent::MinuteTick(now) => self.on_minute_tick(now, &mut intents),
            SessionEvent::Inbound(message) => self.on_inbound(message, &mut intents),
            SessionEvent::TimerFired(request) => {
                emit(&mut intents, Intent::Send(self.outbound(request)));
            }
            SessionEvent::OutboxBusy(request) => {
                emit(&mut intents, self.driver.on_busy(request));
            }
            SessionEvent::OutboxAccepted(request) => {
                if let Some(follow_up) = self.driver.on_accepted(request) {
                    emit(&mut intents, follow_up);
                }
            }
            SessionEvent::SendFailed(failure) => {
                if self.driver.on_failure(failure) {
                    let edge = self.links.app_unreachable();
                    self.on_link_edge(edge, &mut intents);
                }
            }
            SessionEvent::TransportChanged(connected) => {
                let edge = self.links.set_transport(connected);
                self.on_link_edge(edge, &mut intents);
            }
        }
        intents
    }

    fn outbound(&self, request: Request) -> diaryface_protocol::OutboundRequest {
        match request {
            Request::Calendar => self.driver.calendar_request(self.store.fetch_index()),
            Request::Battery => self.driver.battery_request(),
        }
    }

    pub fn store(&self) -> &EventStore {
        &self.store
    }

    pub fn battery(&self) -> BatteryStatus {
        self.battery
    }

    pub fn preferences(&self) -> Preferences {
        self.preferences
    }

    pub fn transport_connected(&self) -> bool {
        self.links.transport_connected()
    }

    pub fn app_connected(&self) -> bool {
        self.links.app_connected()
    }

    pub fn clock_style(&self) -> ClockStyle {
        self.driver.clock_style()
    }

    pub fn now(&self) -> ClockTime {
        self.now
    }
}

include!("inbound.rs");
include!("links.rs");
include!("ticks.rs");
