use serde::{Deserialize, Serialize};

/// Progress of a unison phrase through a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PhraseStatus {
    #[default]
    NotStarted,
    Started,
    /// At least one participant missed. Counting continues.
    Failed,
    /// The bonus was awarded.
    Complete,
}

/// Outcome of a completion check after a hit or miss.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    /// Every required player hit: award, then end.
    Award,
    /// Every required player reported, not all of them hit: end only.
    EndWithoutAward,
}

/// Per-phrase bookkeeping, stored in an arena parallel to the phrase list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PhraseProgress {
    /// Registered players whose instrument group is in the phrase.
    pub required: u32,
    pub hits: u32,
    pub misses: u32,
    pub status: PhraseStatus,
    /// Phrase end has been signalled. No further events are accepted.
    pub ended: bool,
}

impl PhraseProgress {
    /// Move NotStarted -> Started. Returns true if this call started it.
    pub fn begin(&mut self) -> bool {
        if self.status == PhraseStatus::NotStarted {
            self.status = PhraseStatus::Started;
            true
        } else {
            false
        }
    }

    /// Counts the event, not the player. Each participant reports at most
    /// one hit or miss per phrase.
    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    /// A miss fails the phrase regardless of how many hits are still possible.
    pub fn record_miss(&mut self) {
        self.status = PhraseStatus::Failed;
        self.misses += 1;
    }

    /// Evaluate the award and end conditions.
    ///
    /// The award check looks at counts only, so it is not gated on status.
    pub fn completion(&self) -> Option<Completion> {
        if self.ended {
            None
        } else if self.hits == self.required {
            Some(Completion::Award)
        } else if self.hits + self.misses == self.required {
            Some(Completion::EndWithoutAward)
        } else {
            None
        }
    }

    /// Apply a completion outcome and mark the phrase ended.
    pub fn finish(&mut self, completion: Completion) {
        if completion == Completion::Award {
            self.status = PhraseStatus::Complete;
        }
        self.ended = true;
    }

    pub fn is_awarded(&self) -> bool {
        self.status == PhraseStatus::Complete
    }
}
