//! Two-slot event buffer with change detection and alarm-slot selection.

use diaryface_protocol::EventRecord;
use log::debug;

/// Slots in the buffer: next upcoming event and the one after it.
pub const EVENT_SLOTS: usize = 2;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ChangeDecision {
    Changed,
    Unchanged,
}

impl ChangeDecision {
    pub const fn is_changed(self) -> bool {
        matches!(self, Self::Changed)
    }
}

/// What the sync pass should do after a calendar response was stored.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct IngestStep {
    pub slot: usize,
    pub change: ChangeDecision,
    /// Slot whose card should replace the one on screen.
    pub display_slot: Option<usize>,
    /// Whether the next slot should be requested.
    pub request_next: bool,
}

/// Live events, the snapshot they are compared against, and the two-phase
/// fetch cursor.
#[derive(Clone, Debug, Default)]
pub struct EventStore {
    live: [EventRecord; EVENT_SLOTS],
    previous: [EventRecord; EVENT_SLOTS],
    fetch_index: u8,
    alarm_slot: usize,
}

impl EventStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `event` in `slot` and reports whether its title or start date
    /// differ from what was last received for that slot. The snapshot is
    /// refreshed either way.
    pub fn ingest(&mut self, slot: usize, event: EventRecord) -> ChangeDecision {
        let Some(previous) = self.previous.get_mut(slot) else {
            return ChangeDecision::Unchanged;
        };

        let change = if event.title != previous.title || event.start_date != previous.start_date {
            ChangeDecision::Changed
        } else {
            ChangeDecision::Unchanged
        };

        *previous = event.clone();
        self.live[slot] = event;
        change
    }

    /// Ingests a calendar response into the slot named by the fetch index and
    /// advances the cursor past slot 0.
    pub fn accept(&mut self, event: EventRecord) -> Option<IngestStep> {
        let mut step = self.accept_at(self.fetch_index as usize, event)?;
        if step.slot == 0 {
            self.fetch_index = 1;
            step.request_next = true;
        }
        Some(step)
    }

    /// Ingests into an explicit slot and applies the display rules without
    /// moving the fetch cursor.
    ///
    /// Slot 0 takes over the card and the alarm whenever it changed. Slot 1
    /// only does so when slot 0 is an all-day event and slot 1 is timed.
    pub fn accept_at(&mut self, slot: usize, event: EventRecord) -> Option<IngestStep> {
        if slot >= EVENT_SLOTS {
            return None;
        }

        let change = self.ingest(slot, event);
        let mut step = IngestStep {
            slot,
            change,
            display_slot: None,
            request_next: false,
        };

        if slot == 0 {
            if change.is_changed() {
                self.alarm_slot = 0;
                step.display_slot = Some(0);
            }
        } else if self.live[0].all_day && !self.live[1].all_day && change.is_changed() {
            self.alarm_slot = 1;
            step.display_slot = Some(1);
        }

        debug!(
            "slot {} ingested change={:?} display={:?}",
            slot, step.change, step.display_slot
        );
        Some(step)
    }

    /// Starts a new synchronization pass from slot 0.
    pub fn begin_pass(&mut self) {
        self.fetch_index = 0;
    }

    pub fn fetch_index(&self) -> u8 {
        self.fetch_index
    }

    pub fn slot(&self, slot: usize) -> Option<&EventRecord> {
        self.live.get(slot)
    }

    pub fn alarm_slot(&self) -> usize {
        self.alarm_slot
    }

    pub fn alarm_event(&self) -> &EventRecord {
        &self.live[self.alarm_slot]
    }
}
