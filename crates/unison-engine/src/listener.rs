use std::sync::mpsc::Sender;
use std::sync::{Arc, Mutex, MutexGuard};

use serde::{Deserialize, Serialize};
use unison_model::{Phrase, PlayerProfile, ProfileId, UnisonPhrase};

/// Receives unison phrase lifecycle notifications.
///
/// Every callback defaults to a no-op so consumers only implement what
/// they display. `index` is the phrase's position in the coordinator's
/// phrase list.
pub trait UnisonListener: Send {
    /// First start, hit or miss seen on the phrase.
    fn on_phrase_start(
        &mut self,
        _index: usize,
        _unison: &UnisonPhrase,
        _participants: &[PlayerProfile],
    ) {
    }

    /// A participant missed the phrase.
    fn on_phrase_fail(&mut self, _index: usize, _unison: &UnisonPhrase, _profile: &PlayerProfile) {}

    /// A participant hit the phrase.
    fn on_phrase_hit(&mut self, _index: usize, _unison: &UnisonPhrase, _profile: &PlayerProfile) {}

    /// Every participant hit the phrase and the bonus went out.
    fn on_phrase_award(&mut self, _index: usize, _unison: &UnisonPhrase) {}

    /// Every participant has reported. Fires once per phrase.
    fn on_phrase_end(&mut self, _index: usize, _unison: &UnisonPhrase) {}
}

/// Owned form of a lifecycle notification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum UnisonEvent {
    PhraseStart {
        index: usize,
        phrase: Phrase,
        participants: Vec<ProfileId>,
    },
    PhraseFail {
        index: usize,
        phrase: Phrase,
        player: ProfileId,
    },
    PhraseHit {
        index: usize,
        phrase: Phrase,
        player: ProfileId,
    },
    PhraseAward {
        index: usize,
        phrase: Phrase,
    },
    PhraseEnd {
        index: usize,
        phrase: Phrase,
    },
}

impl UnisonEvent {
    pub fn index(&self) -> usize {
        match self {
            Self::PhraseStart { index, .. }
            | Self::PhraseFail { index, .. }
            | Self::PhraseHit { index, .. }
            | Self::PhraseAward { index, .. }
            | Self::PhraseEnd { index, .. } => *index,
        }
    }

    fn start(index: usize, unison: &UnisonPhrase, participants: &[PlayerProfile]) -> Self {
        Self::PhraseStart {
            index,
            phrase: unison.phrase,
            participants: participants.iter().map(|p| p.id).collect(),
        }
    }

    fn fail(index: usize, unison: &UnisonPhrase, profile: &PlayerProfile) -> Self {
        Self::PhraseFail {
            index,
            phrase: unison.phrase,
            player: profile.id,
        }
    }

    fn hit(index: usize, unison: &UnisonPhrase, profile: &PlayerProfile) -> Self {
        Self::PhraseHit {
            index,
            phrase: unison.phrase,
            player: profile.id,
        }
    }

    fn award(index: usize, unison: &UnisonPhrase) -> Self {
        Self::PhraseAward {
            index,
            phrase: unison.phrase,
        }
    }

    fn end(index: usize, unison: &UnisonPhrase) -> Self {
        Self::PhraseEnd {
            index,
            phrase: unison.phrase,
        }
    }
}

/// Records notifications in delivery order.
///
/// Clones share the same log, so keep one handle and subscribe another.
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    events: Arc<Mutex<Vec<UnisonEvent>>>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<UnisonEvent>> {
        self.events.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn push(&self, event: UnisonEvent) {
        self.lock().push(event);
    }

    /// Snapshot of everything recorded so far.
    pub fn events(&self) -> Vec<UnisonEvent> {
        self.lock().clone()
    }

    /// Remove and return everything recorded so far.
    pub fn drain(&self) -> Vec<UnisonEvent> {
        std::mem::take(&mut *self.lock())
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}

impl UnisonListener for EventLog {
    fn on_phrase_start(&mut self, index: usize, unison: &UnisonPhrase, participants: &[PlayerProfile]) {
        self.push(UnisonEvent::start(index, unison, participants));
    }

    fn on_phrase_fail(&mut self, index: usize, unison: &UnisonPhrase, profile: &PlayerProfile) {
        self.push(UnisonEvent::fail(index, unison, profile));
    }

    fn on_phrase_hit(&mut self, index: usize, unison: &UnisonPhrase, profile: &PlayerProfile) {
        self.push(UnisonEvent::hit(index, unison, profile));
    }

    fn on_phrase_award(&mut self, index: usize, unison: &UnisonPhrase) {
        self.push(UnisonEvent::award(index, unison));
    }

    fn on_phrase_end(&mut self, index: usize, unison: &UnisonPhrase) {
        self.push(UnisonEvent::end(index, unison));
    }
}

/// Forwards notifications as messages. A dropped receiver is ignored.
impl UnisonListener for Sender<UnisonEvent> {
    fn on_phrase_start(&mut self, index: usize, unison: &UnisonPhrase, participants: &[PlayerProfile]) {
        let _ = self.send(UnisonEvent::start(index, unison, participants));
    }

    fn on_phrase_fail(&mut self, index: usize, unison: &UnisonPhrase, profile: &PlayerProfile) {
        let _ = self.send(UnisonEvent::fail(index, unison, profile));
    }

    fn on_phrase_hit(&mut self, index: usize, unison: &UnisonPhrase, profile: &PlayerProfile) {
        let _ = self.send(UnisonEvent::hit(index, unison, profile));
    }

    fn on_phrase_award(&mut self, index: usize, unison: &UnisonPhrase) {
        let _ = self.send(UnisonEvent::award(index, unison));
    }

    fn on_phrase_end(&mut self, index: usize, unison: &UnisonPhrase) {
        let _ = self.send(UnisonEvent::end(index, unison));
    }
}
