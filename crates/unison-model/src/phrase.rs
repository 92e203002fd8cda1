use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

/// Phrase categories found in a chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PhraseType {
    // Note modifiers
    StarPower,
    TremoloLane,
    TrillLane,
    DrumFill,

    // Versus modes
    VersusPlayer1,
    VersusPlayer2,

    Solo,
    BigRockEnding,
}

/// A span of the chart timeline.
///
/// Covers the half-open tick range `[tick, tick + tick_length)`.
/// Identity is `(phrase_type, tick, tick_end)`; the seconds-based
/// `time`/`time_length` are carried for display only.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Phrase {
    pub phrase_type: PhraseType,
    #[serde(default)]
    pub time: f64,
    #[serde(default)]
    pub time_length: f64,
    pub tick: u32,
    pub tick_length: u32,
}

impl Phrase {
    pub fn new(
        phrase_type: PhraseType,
        time: f64,
        time_length: f64,
        tick: u32,
        tick_length: u32,
    ) -> Self {
        Self {
            phrase_type,
            time,
            time_length,
            tick,
            tick_length,
        }
    }

    /// Phrase with tick placement only (time fields zeroed).
    pub fn from_ticks(phrase_type: PhraseType, tick: u32, tick_length: u32) -> Self {
        Self::new(phrase_type, 0.0, 0.0, tick, tick_length)
    }

    /// Exclusive end tick. Saturates instead of wrapping at `u32::MAX`.
    pub fn tick_end(&self) -> u32 {
        self.tick.saturating_add(self.tick_length)
    }

    pub fn contains_tick(&self, tick: u32) -> bool {
        self.tick <= tick && tick < self.tick_end()
    }
}

impl PartialEq for Phrase {
    fn eq(&self, other: &Self) -> bool {
        self.phrase_type == other.phrase_type
            && self.tick == other.tick
            && self.tick_end() == other.tick_end()
    }
}

impl Eq for Phrase {}

impl Hash for Phrase {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.phrase_type.hash(state);
        self.tick.hash(state);
        self.tick_end().hash(state);
    }
}
