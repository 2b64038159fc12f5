use std::fmt::Debug;

use diaryface_core::settings::{PreferenceStore, Preferences};
use log::{info, warn};

use super::PREFS_SAVE_DEBOUNCE_MS;

/// Debounced preference writer driven by the simulator's deadline queue.
///
/// Every method that can leave a write outstanding reports how long the
/// caller should wait before the next flush attempt.
pub(super) struct SettingsSyncState {
    saved: Preferences,
    unsaved: Option<Preferences>,
    flush_at_ms: u64,
}

impl SettingsSyncState {
    pub(super) fn new(saved: Preferences) -> Self {
        Self {
            saved,
            unsaved: None,
            flush_at_ms: 0,
        }
    }

    /// Records the live value. Returns a delay only when a new flush deadline
    /// was armed, so callers queue one flush per distinct change.
    pub(super) fn track_current(&mut self, current: Preferences, now_ms: u64) -> Option<u64> {
        if current == self.saved {
            self.unsaved = None;
            return None;
        }
        if self.unsaved == Some(current) {
            return None;
        }

        self.unsaved = Some(current);
        self.flush_at_ms = now_ms + PREFS_SAVE_DEBOUNCE_MS;
        Some(PREFS_SAVE_DEBOUNCE_MS)
    }

    /// Milliseconds until the outstanding write is due, or `None` when
    /// everything is saved.
    pub(super) fn due_in(&self, now_ms: u64) -> Option<u64> {
        self.unsaved.map(|_| self.flush_at_ms.saturating_sub(now_ms))
    }

    /// Writes the outstanding value once its deadline has passed. A failed
    /// save stays outstanding and is retried one debounce period later.
    pub(super) fn flush_if_due<S>(&mut self, store: Option<&mut S>, now_ms: u64) -> Option<u64>
    where
        S: PreferenceStore,
        S::Error: Debug,
    {
        let candidate = self.unsaved?;
        if now_ms < self.flush_at_ms {
            return self.due_in(now_ms);
        }

        let Some(store) = store else {
            self.saved = candidate;
            self.unsaved = None;
            return None;
        };

        match store.save(&candidate) {
            Ok(()) => {
                info!("preferences saved: partial_inverse={}", candidate.partial_inverse);
                self.saved = candidate;
                self.unsaved = None;
                None
            }
            Err(err) => {
                warn!(
                    "preferences save failed ({:?}); retrying in {} ms",
                    err, PREFS_SAVE_DEBOUNCE_MS
                );
                self.flush_at_ms = now_ms + PREFS_SAVE_DEBOUNCE_MS;
                Some(PREFS_SAVE_DEBOUNCE_MS)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct MemoryStore {
        fail_next: u32,
        saves: Vec<Preferences>,
    }

    impl PreferenceStore for MemoryStore {
        type Error = &'static str;

        fn load(&mut self) -> Result<Option<Preferences>, Self::Error> {
            Ok(self.saves.last().copied())
        }

        fn save(&mut self, preferences: &Preferences) -> Result<(), Self::Error> {
            if self.fail_next > 0 {
                self.fail_next -= 1;
                return Err("disk full");
            }
            self.saves.push(*preferences);
            Ok(())
        }
    }

    #[test]
    fn change_waits_for_debounce() {
        let mut store = MemoryStore::default();
        let mut sync = SettingsSyncState::new(Preferences::new(false));
        assert_eq!(
            sync.track_current(Preferences::new(true), 1_000),
            Some(PREFS_SAVE_DEBOUNCE_MS)
        );

        let early = 1_000 + PREFS_SAVE_DEBOUNCE_MS - 1;
        assert_eq!(sync.flush_if_due(Some(&mut store), early), Some(1));
        assert!(store.saves.is_empty());

        let due = 1_000 + PREFS_SAVE_DEBOUNCE_MS;
        assert_eq!(sync.flush_if_due(Some(&mut store), due), None);
        assert_eq!(store.saves, [Preferences::new(true)]);
        assert_eq!(sync.due_in(due), None);
    }

    #[test]
    fn reverting_to_saved_value_cancels_pending_write() {
        let mut sync = SettingsSyncState::new(Preferences::new(false));
        sync.track_current(Preferences::new(true), 0);
        assert_eq!(sync.track_current(Preferences::new(false), 100), None);
        assert_eq!(sync.due_in(100), None);
    }

    #[test]
    fn repeated_value_keeps_first_deadline() {
        let mut sync = SettingsSyncState::new(Preferences::new(false));
        sync.track_current(Preferences::new(true), 0);
        assert_eq!(sync.track_current(Preferences::new(true), 400), None);
        assert_eq!(
            sync.flush_if_due(None::<&mut MemoryStore>, PREFS_SAVE_DEBOUNCE_MS),
            None
        );
    }

    #[test]
    fn failed_save_is_retried_after_another_debounce() {
        let mut store = MemoryStore {
            fail_next: 1,
            ..MemoryStore::default()
        };
        let mut sync = SettingsSyncState::new(Preferences::new(false));
        sync.track_current(Preferences::new(true), 0);

        let first = PREFS_SAVE_DEBOUNCE_MS;
        assert_eq!(
            sync.flush_if_due(Some(&mut store), first),
            Some(PREFS_SAVE_DEBOUNCE_MS)
        );
        assert!(store.saves.is_empty());
        assert_eq!(sync.due_in(first), Some(PREFS_SAVE_DEBOUNCE_MS));

        let retry = first + PREFS_SAVE_DEBOUNCE_MS;
        assert_eq!(sync.flush_if_due(Some(&mut store), retry), None);
        assert_eq!(store.saves, [Preferences::new(true)]);
        assert_eq!(store.load(), Ok(Some(Preferences::new(true))));
    }
}
