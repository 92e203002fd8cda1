use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::instrument::Instrument;

/// Stable player identity for one session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProfileId(Uuid);

impl ProfileId {
    /// Generate a fresh random identity.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ProfileId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ProfileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A player taking part in a session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerProfile {
    #[serde(default)]
    pub id: ProfileId,
    #[serde(default)]
    pub name: String,
    pub current_instrument: Instrument,
}

impl PlayerProfile {
    pub fn new(name: impl Into<String>, current_instrument: Instrument) -> Self {
        Self {
            id: ProfileId::new(),
            name: name.into(),
            current_instrument,
        }
    }

    /// The selected instrument after drum grouping.
    pub fn unison_instrument(&self) -> Instrument {
        self.current_instrument.unison_group()
    }
}
