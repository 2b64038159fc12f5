//! Side effects the session asks its host to carry out.

use diaryface_protocol::{BatteryStatus, OutboundRequest};
use heapless::{String, Vec};
use log::warn;

use crate::{
    clock::ClockFace, event_time::LABEL_BYTES, haptics::HapticCue, sync::Request,
};

/// Upper bound on intents produced by a single event.
pub const MAX_INTENTS: usize = 8;

pub type Intents = Vec<Intent, MAX_INTENTS>;

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Intent {
    /// Hand a request to the outbox now.
    Send(OutboundRequest),
    /// Fire [`crate::SessionEvent::TimerFired`] with `task` after `after_ms`.
    Schedule { after_ms: u32, task: Request },
    ShowEvent(EventCard),
    ShowAlert(Alert),
    ShowClock(ClockFace),
    ShowBattery(BatteryStatus),
    Vibrate(HapticCue),
    ApplyPartialInverse(bool),
    PersistPartialInverse(bool),
}

/// The three text lines of the event half of the screen.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct EventCard {
    pub title: String<LABEL_BYTES>,
    pub when: String<LABEL_BYTES>,
    pub location: String<LABEL_BYTES>,
}

/// Warning that replaces the event card while a link is down.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Alert {
    TransportDisconnected,
    AppDisconnected,
}

impl Alert {
    pub const fn title(self) -> &'static str {
        "WARNING!"
    }

    pub const fn detail(self) -> &'static str {
        match self {
            Self::TransportDisconnected => "BT disconnected",
            Self::AppDisconnected => "App disconnected",
        }
    }
}

pub(crate) fn emit(intents: &mut Intents, intent: Intent) {
    if let Err(dropped) = intents.push(intent) {
        warn!("intent queue full, dropping {:?}", dropped);
    }
}
