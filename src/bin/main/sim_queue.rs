use std::{cmp::Ordering, collections::BinaryHeap};

use diaryface_core::{Request, SendFailure};
use diaryface_protocol::Message;
use embassy_time::{Duration, Instant};

/// Something the simulated platform delivers to the watch at a set time.
#[derive(Debug)]
pub(super) enum SimEvent {
    Timer(Request),
    Deliver(Message),
    SendFailed(SendFailure),
    Transport(bool),
    Tick,
    FlushPreferences,
}

struct Entry {
    at: Instant,
    seq: u64,
    event: SimEvent,
}

impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Entry {}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Entry {
    // Reversed so the max-heap pops the earliest deadline first; ties pop in
    // insertion order.
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .at
            .cmp(&self.at)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// Deadline-ordered queue of pending simulator events.
#[derive(Default)]
pub(super) struct SimQueue {
    heap: BinaryHeap<Entry>,
    next_seq: u64,
}

impl SimQueue {
    pub(super) fn push_at(&mut self, at: Instant, event: SimEvent) {
        let seq = self.next_seq;
        self.next_seq = self.next_seq.wrapping_add(1);
        self.heap.push(Entry { at, seq, event });
    }

    pub(super) fn push_after(&mut self, now: Instant, after: Duration, event: SimEvent) {
        self.push_at(now + after, event);
    }

    pub(super) fn next_deadline(&self) -> Option<Instant> {
        self.heap.peek().map(|entry| entry.at)
    }

    pub(super) fn pop(&mut self) -> Option<SimEvent> {
        self.heap.pop().map(|entry| entry.event)
    }

    pub(super) fn len(&self) -> usize {
        self.heap.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pops_earliest_deadline_first() {
        let base = Instant::from_millis(1_000);
        let mut queue = SimQueue::default();
        queue.push_after(base, Duration::from_millis(500), SimEvent::Tick);
        queue.push_after(base, Duration::from_millis(200), SimEvent::Timer(Request::Calendar));

        assert_eq!(queue.next_deadline(), Some(Instant::from_millis(1_200)));
        assert!(matches!(queue.pop(), Some(SimEvent::Timer(Request::Calendar))));
        assert!(matches!(queue.pop(), Some(SimEvent::Tick)));
        assert!(queue.pop().is_none());
    }

    #[test]
    fn equal_deadlines_keep_insertion_order() {
        let at = Instant::from_millis(10);
        let mut queue = SimQueue::default();
        queue.push_at(at, SimEvent::Transport(false));
        queue.push_at(at, SimEvent::Transport(true));
        assert_eq!(queue.len(), 2);

        assert!(matches!(queue.pop(), Some(SimEvent::Transport(false))));
        assert!(matches!(queue.pop(), Some(SimEvent::Transport(true))));
    }
}
