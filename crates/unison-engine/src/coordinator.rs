// Unison phrase coordinator.
//
// Tracks, for every unison phrase, how many registered players must hit it
// and how many have hit or missed so far, and awards the bonus to every
// participant once all of them hit.

use std::collections::HashMap;

use log::{debug, info, warn};
use unison_model::{Instrument, PlayerProfile, ProfileId, UnisonPhrase};

use crate::config::{DuplicatePlayers, LateRegistration, UnisonConfig};
use crate::error::UnisonError;
use crate::listener::UnisonListener;
use crate::lookup::PhraseCursor;
use crate::phrase_state::{Completion, PhraseProgress};
use crate::player_engine::PlayerEngine;
use crate::summary::SessionSummary;

/// Coordinates unison phrases across all players of one session.
///
/// Driven from a single update loop: every mutating call takes `&mut self`.
/// Register every player before the first phrase event arrives.
pub struct UnisonCoordinator<E: PlayerEngine> {
    config: UnisonConfig,
    phrases: Vec<UnisonPhrase>,
    /// Parallel to `phrases`.
    progress: Vec<PhraseProgress>,
    cursor: PhraseCursor,
    players: Vec<PlayerProfile>,
    engines: HashMap<ProfileId, E>,
    /// Latest tick each registered player has reported.
    reported: HashMap<ProfileId, u32>,
    listeners: Vec<Box<dyn UnisonListener>>,
    /// Set by the first start/hit/miss call.
    play_started: bool,
}

impl<E: PlayerEngine> UnisonCoordinator<E> {
    /// `phrases` must be ordered by start tick.
    pub fn new(phrases: Vec<UnisonPhrase>) -> Self {
        Self::with_config(phrases, UnisonConfig::default())
    }

    pub fn with_config(phrases: Vec<UnisonPhrase>, config: UnisonConfig) -> Self {
        if config.log_phrases_on_load {
            for unison in &phrases {
                info!(
                    "[Unison] Tick: {} to {} for {}",
                    unison.phrase.tick,
                    unison.phrase.tick_end(),
                    unison.instrument_list()
                );
            }
        }

        Self {
            progress: vec![PhraseProgress::default(); phrases.len()],
            config,
            phrases,
            cursor: PhraseCursor::new(),
            players: Vec::new(),
            engines: HashMap::new(),
            reported: HashMap::new(),
            listeners: Vec::new(),
            play_started: false,
        }
    }

    /// Add a lifecycle listener. Subscribe before play begins.
    pub fn subscribe(&mut self, listener: Box<dyn UnisonListener>) {
        self.listeners.push(listener);
    }

    /// Add a player and count it toward every phrase its instrument plays.
    pub fn register_player(&mut self, profile: PlayerProfile, engine: E) -> Result<(), UnisonError> {
        if self.play_started {
            match self.config.late_registration {
                LateRegistration::Reject => {
                    return Err(UnisonError::RegistrationClosed { id: profile.id });
                }
                LateRegistration::Count => {
                    warn!(
                        "[Register] player {} joined after play started; phrases in progress may not reach quorum",
                        profile.id
                    );
                }
            }
        }

        if self.engines.contains_key(&profile.id) {
            match self.config.duplicate_players {
                DuplicatePlayers::Reject => {
                    return Err(UnisonError::DuplicatePlayer { id: profile.id });
                }
                DuplicatePlayers::Replace => {
                    warn!("[Register] player {} registered twice, replacing engine", profile.id);
                }
            }
        }

        let instrument = profile.unison_instrument();
        info!(
            "[Register] player {} ({}) on {}",
            profile.id, profile.name, profile.current_instrument
        );

        for (unison, progress) in self.phrases.iter().zip(self.progress.iter_mut()) {
            if unison.contains(instrument) {
                progress.required += 1;
            }
        }
        debug!(
            "[Register] required counts: {:?}",
            self.progress.iter().map(|p| p.required).collect::<Vec<_>>()
        );

        self.engines.insert(profile.id, engine);
        self.players.push(profile);

        // A skipped phrase may now have a player, and the newcomer has not
        // reported yet.
        self.cursor.reset();
        self.advance_cursor();
        Ok(())
    }

    /// Index of the phrase containing `tick` for `instrument`, if any.
    ///
    /// Pure containment over the whole chart, whatever state the phrase is in.
    /// Event handling uses the coordinator's cursor instead, which skips
    /// phrases that can no longer receive events.
    pub fn find_unison_phrase(&self, tick: u32, instrument: Instrument) -> Option<usize> {
        PhraseCursor::new().find(&self.phrases, tick, instrument)
    }

    /// A player's engine began evaluating a note that may be in a unison.
    pub fn notify_phrase_start(&mut self, profile: &PlayerProfile, tick: u32) {
        let Some(index) = self.resolve(profile, tick) else {
            return;
        };
        self.start_phrase(index);
    }

    /// A player hit a unison phrase.
    ///
    /// The quorum counts hit events, not distinct players: each player's
    /// engine must report at most one hit or miss per phrase.
    pub fn notify_phrase_hit(&mut self, profile: &PlayerProfile, tick: u32) {
        let Some(index) = self.resolve(profile, tick) else {
            return;
        };
        self.start_phrase(index);

        debug!(
            "Player {} [{}] hit phrase {} with note tick {}",
            profile.id, profile.current_instrument, index, tick
        );
        let unison = &self.phrases[index];
        for listener in &mut self.listeners {
            listener.on_phrase_hit(index, unison, profile);
        }

        self.progress[index].record_hit();
        self.check_for_phrase_completion(index);
    }

    /// A player missed a unison phrase.
    pub fn notify_phrase_miss(&mut self, profile: &PlayerProfile, tick: u32) {
        let Some(index) = self.resolve(profile, tick) else {
            return;
        };
        self.start_phrase(index);

        debug!(
            "Player {} [{}] missed phrase {} with note tick {}",
            profile.id, profile.current_instrument, index, tick
        );
        let unison = &self.phrases[index];
        for listener in &mut self.listeners {
            listener.on_phrase_fail(index, unison, profile);
        }

        self.progress[index].record_miss();
        self.check_for_phrase_completion(index);
    }

    /// Map an incoming event to a live phrase.
    fn resolve(&mut self, profile: &PlayerProfile, tick: u32) -> Option<usize> {
        self.play_started = true;

        let Some(instrument) = self.registered_instrument(&profile.id) else {
            debug!("Ignoring phrase event from unregistered player {}", profile.id);
            return None;
        };

        let latest = self.reported.entry(profile.id).or_insert(tick);
        *latest = (*latest).max(tick);
        self.advance_cursor();

        let index = self.cursor.find(&self.phrases, tick, instrument)?;
        if self.progress[index].ended {
            debug!("Ignoring phrase event for ended phrase {index}");
            return None;
        }
        Some(index)
    }

    /// Lowest latest tick across the roster, once every player has reported.
    fn settled_tick(&self) -> Option<u32> {
        if self.players.is_empty() {
            return None;
        }
        self.players
            .iter()
            .map(|p| self.reported.get(&p.id).copied())
            .try_fold(u32::MAX, |low, tick| tick.map(|t| low.min(t)))
    }

    fn advance_cursor(&mut self) {
        let settled = self.settled_tick();
        self.cursor.advance(&self.phrases, &self.progress, settled);
    }

    /// Instrument the player was counted under at registration.
    fn registered_instrument(&self, id: &ProfileId) -> Option<Instrument> {
        self.players
            .iter()
            .rev()
            .find(|p| p.id == *id)
            .map(|p| p.current_instrument)
    }

    fn start_phrase(&mut self, index: usize) {
        if !self.progress[index].begin() {
            return;
        }

        let unison = &self.phrases[index];
        let participants: Vec<PlayerProfile> = self
            .players
            .iter()
            .filter(|p| unison.contains(p.current_instrument))
            .cloned()
            .collect();
        debug!(
            "[Unison] phrase {} started with {} participants",
            index,
            participants.len()
        );
        for listener in &mut self.listeners {
            listener.on_phrase_start(index, unison, &participants);
        }
    }

    fn check_for_phrase_completion(&mut self, index: usize) {
        let Some(completion) = self.progress[index].completion() else {
            return;
        };

        if completion == Completion::Award {
            self.award_unison_bonus(index);
        }
        self.progress[index].finish(completion);

        let unison = &self.phrases[index];
        if completion == Completion::Award {
            for listener in &mut self.listeners {
                listener.on_phrase_award(index, unison);
            }
        }
        for listener in &mut self.listeners {
            listener.on_phrase_end(index, unison);
        }

        self.advance_cursor();
    }

    fn award_unison_bonus(&mut self, index: usize) {
        info!("Awarding unison bonus for phrase {index}");
        let unison = &self.phrases[index];
        for profile in &self.players {
            if !unison.contains(profile.current_instrument) {
                continue;
            }
            if let Some(engine) = self.engines.get_mut(&profile.id) {
                info!("Awarding unison bonus to player {}", profile.id);
                engine.award_unison_bonus_star_power();
            }
        }
    }

    pub fn progress(&self, index: usize) -> Option<&PhraseProgress> {
        self.progress.get(index)
    }

    pub fn required_count(&self, index: usize) -> Option<u32> {
        self.progress(index).map(|p| p.required)
    }

    /// Registered players in registration order.
    pub fn players(&self) -> &[PlayerProfile] {
        &self.players
    }

    pub fn engine(&self, id: &ProfileId) -> Option<&E> {
        self.engines.get(id)
    }

    pub fn cursor_position(&self) -> usize {
        self.cursor.position()
    }

    pub fn summary(&self) -> SessionSummary {
        SessionSummary::from_progress(&self.progress)
    }
}
