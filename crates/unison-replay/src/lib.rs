//! Replays a recorded unison session against the coordinator.
//!
//! A script lists the unison phrases (or the per-instrument phrase tracks
//! to derive them from), the players, and the ordered phrase events each
//! player's engine reported. Engines are replaced by recorders that count
//! bonus awards.

pub mod logging;

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use log::info;
use serde::{Deserialize, Serialize};
use unison_engine::{
    EventLog, PlayerEngine, SessionSummary, UnisonConfig, UnisonCoordinator, UnisonEvent,
};
use unison_model::{
    Instrument, Phrase, PlayerProfile, ProfileId, UnisonPhrase, extract_unison_phrases,
};

/// Kind of phrase event reported by a player's engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    Start,
    Hit,
    Miss,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScriptedEvent {
    pub kind: EventKind,
    /// Id of a player listed in the script.
    pub player: ProfileId,
    pub tick: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReplayScript {
    pub phrases: Vec<UnisonPhrase>,
    /// Used only when `phrases` is empty.
    pub tracks: Vec<(Instrument, Vec<Phrase>)>,
    pub players: Vec<PlayerProfile>,
    pub events: Vec<ScriptedEvent>,
}

impl ReplayScript {
    /// The unison phrase list, derived from `tracks` when not given directly.
    pub fn unison_phrases(&self) -> Vec<UnisonPhrase> {
        if self.phrases.is_empty() {
            extract_unison_phrases(&self.tracks)
        } else {
            self.phrases.clone()
        }
    }
}

/// Engine stand-in that counts bonus awards.
#[derive(Debug, Default)]
pub struct RecordingEngine {
    pub awards: u32,
}

impl PlayerEngine for RecordingEngine {
    fn award_unison_bonus_star_power(&mut self) {
        self.awards += 1;
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerAwards {
    pub name: String,
    pub id: ProfileId,
    pub instrument: Instrument,
    pub awards: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReplayReport {
    pub events: Vec<UnisonEvent>,
    pub summary: SessionSummary,
    /// Fraction of unison phrases awarded.
    pub award_rate: f64,
    pub players: Vec<PlayerAwards>,
}

pub fn load_script<P: AsRef<Path>>(path: P) -> Result<ReplayScript> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read replay script {}", path.display()))?;
    let script = serde_json::from_str(&content)
        .with_context(|| format!("failed to parse replay script {}", path.display()))?;
    Ok(script)
}

/// Run every scripted event through a fresh coordinator.
pub fn run_script(script: &ReplayScript, config: UnisonConfig) -> Result<ReplayReport> {
    let phrases = script.unison_phrases();
    info!(
        "Replaying {} events over {} unison phrases with {} players",
        script.events.len(),
        phrases.len(),
        script.players.len()
    );

    let mut coordinator = UnisonCoordinator::with_config(phrases, config);
    let log = EventLog::new();
    coordinator.subscribe(Box::new(log.clone()));
    for profile in &script.players {
        coordinator.register_player(profile.clone(), RecordingEngine::default())?;
    }

    // A repeated id keeps the last profile, as the coordinator does.
    let by_id: HashMap<ProfileId, PlayerProfile> = coordinator
        .players()
        .iter()
        .map(|p| (p.id, p.clone()))
        .collect();

    for (n, event) in script.events.iter().enumerate() {
        let Some(profile) = by_id.get(&event.player) else {
            bail!("event {n} references unknown player {}", event.player);
        };
        match event.kind {
            EventKind::Start => coordinator.notify_phrase_start(profile, event.tick),
            EventKind::Hit => coordinator.notify_phrase_hit(profile, event.tick),
            EventKind::Miss => coordinator.notify_phrase_miss(profile, event.tick),
        }
    }

    let players = script
        .players
        .iter()
        .map(|p| PlayerAwards {
            name: p.name.clone(),
            id: p.id,
            instrument: p.current_instrument,
            awards: coordinator.engine(&p.id).map_or(0, |e| e.awards),
        })
        .collect();

    let summary = coordinator.summary();
    info!(
        "Awarded {} of {} unison phrases",
        summary.awarded, summary.total
    );
    Ok(ReplayReport {
        events: log.drain(),
        award_rate: summary.award_rate(),
        summary,
        players,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use unison_engine::UnisonError;
    use unison_model::PhraseType;

    fn script() -> ReplayScript {
        let guitar = PlayerProfile::new("guitar", Instrument::FiveFretGuitar);
        let drums = PlayerProfile::new("drums", Instrument::FourLaneDrums);
        ReplayScript {
            phrases: vec![UnisonPhrase::new(
                Phrase::from_ticks(PhraseType::StarPower, 0, 480),
                [Instrument::FiveFretGuitar, Instrument::ProDrums],
            )],
            events: vec![
                ScriptedEvent {
                    kind: EventKind::Hit,
                    player: guitar.id,
                    tick: 100,
                },
                ScriptedEvent {
                    kind: EventKind::Hit,
                    player: drums.id,
                    tick: 100,
                },
            ],
            players: vec![guitar, drums],
            ..Default::default()
        }
    }

    #[test]
    fn run_awards_both_players() {
        let report = run_script(&script(), UnisonConfig::default()).unwrap();
        assert_eq!(report.summary.awarded, 1);
        assert_eq!(report.award_rate, 1.0);
        assert!(report.players.iter().all(|p| p.awards == 1));
        assert_eq!(report.events.len(), 5);
    }

    #[test]
    fn unknown_player_is_an_error() {
        let mut s = script();
        let stranger = PlayerProfile::new("stranger", Instrument::Keys);
        s.events[0].player = stranger.id;
        let err = run_script(&s, UnisonConfig::default()).unwrap_err();
        assert!(
            err.to_string()
                .contains(&format!("event 0 references unknown player {}", stranger.id))
        );
    }

    #[test]
    fn players_may_share_a_name() {
        let mut s = script();
        s.players[1].name = "guitar".into();
        let report = run_script(&s, UnisonConfig::default()).unwrap();
        assert_eq!(report.summary.awarded, 1);
    }

    #[test]
    fn strict_config_rejects_duplicate_ids() {
        let mut s = script();
        s.players[1].id = s.players[0].id;
        let err = run_script(&s, UnisonConfig::strict()).unwrap_err();
        assert_eq!(
            err.downcast_ref::<UnisonError>(),
            Some(&UnisonError::DuplicatePlayer { id: s.players[0].id })
        );
    }

    #[test]
    fn tracks_used_when_phrases_missing() {
        let sp = Phrase::from_ticks(PhraseType::StarPower, 960, 480);
        let s = ReplayScript {
            tracks: vec![
                (Instrument::FiveFretGuitar, vec![sp]),
                (Instrument::FiveFretBass, vec![sp]),
            ],
            ..Default::default()
        };
        let phrases = s.unison_phrases();
        assert_eq!(phrases.len(), 1);
        assert!(phrases[0].contains(Instrument::FiveFretBass));
    }
}
