//! Persisted user preferences abstraction.

/// Persist key of the partial-inverse preference.
pub const PARTIAL_INVERSE_KEY: u32 = 100;

/// User-tunable settings that should survive a restart.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Preferences {
    /// Draw the date and time on an inverted background.
    pub partial_inverse: bool,
}

impl Preferences {
    pub const fn new(partial_inverse: bool) -> Self {
        Self { partial_inverse }
    }
}

/// Abstract preference persistence backend.
pub trait PreferenceStore {
    type Error;

    fn load(&mut self) -> Result<Option<Preferences>, Self::Error>;
    fn save(&mut self, preferences: &Preferences) -> Result<(), Self::Error>;
}
