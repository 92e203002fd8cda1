use unison_model::{Instrument, UnisonPhrase};

use crate::phrase_state::PhraseProgress;

/// Forward cursor over the tick-ordered unison phrase list.
///
/// Lookups start at the first phrase that can still receive events and stop
/// at the first phrase starting after the queried tick. The cursor moves past
/// a phrase once it has ended, once no registered player plays it, or once
/// every player has reported a tick at or past its end. Players reporting
/// slightly out of tick order relative to each other still resolve to the
/// right phrase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PhraseCursor {
    next: usize,
}

impl PhraseCursor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index of the earliest phrase a lookup still considers.
    pub fn position(&self) -> usize {
        self.next
    }

    /// Find the phrase containing `tick` for `instrument`.
    ///
    /// `phrases` must be sorted by start tick.
    pub fn find(&self, phrases: &[UnisonPhrase], tick: u32, instrument: Instrument) -> Option<usize> {
        let start = self.next.min(phrases.len());
        phrases[start..]
            .iter()
            .take_while(|u| u.phrase.tick <= tick)
            .position(|u| u.matches(tick, instrument))
            .map(|offset| start + offset)
    }

    /// Skip over every leading phrase that can no longer receive events.
    ///
    /// `settled_tick` is the lowest latest tick across all registered
    /// players, `None` while any of them has yet to report.
    pub fn advance(
        &mut self,
        phrases: &[UnisonPhrase],
        progress: &[PhraseProgress],
        settled_tick: Option<u32>,
    ) {
        while let (Some(unison), Some(p)) = (phrases.get(self.next), progress.get(self.next)) {
            let passed = settled_tick.is_some_and(|t| unison.phrase.tick_end() <= t);
            if !(p.ended || p.required == 0 || passed) {
                break;
            }
            self.next += 1;
        }
    }

    /// Rewind to the first phrase, for when required counts change.
    pub fn reset(&mut self) {
        self.next = 0;
    }
}
