use std::path::PathBuf;

use unison_engine::{UnisonConfig, UnisonEvent};
use unison_replay::{EventKind, ReplayScript, load_script, run_script};

fn band_session() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("scripts/band_session.json")
}

#[test]
fn band_session_outcomes() {
    let script = load_script(band_session()).unwrap();
    assert_eq!(script.events.len(), 7);
    assert_eq!(script.events[5].kind, EventKind::Miss);
    assert_eq!(script.events[5].player, script.players[2].id);

    let report = run_script(&script, UnisonConfig::default()).unwrap();
    assert_eq!(report.summary.total, 2);
    assert_eq!(report.summary.awarded, 1);
    assert_eq!(report.summary.ended_without_award, 1);
    assert_eq!(report.award_rate, 0.5);

    let awards: Vec<(&str, u32)> = report
        .players
        .iter()
        .map(|p| (p.name.as_str(), p.awards))
        .collect();
    assert_eq!(awards, vec![("guitar", 1), ("bass", 1), ("drums", 0)]);
}

#[test]
fn band_session_event_order() {
    let script = load_script(band_session()).unwrap();
    let report = run_script(&script, UnisonConfig::default()).unwrap();

    let kinds: Vec<(&str, usize)> = report
        .events
        .iter()
        .map(|e| {
            let kind = match e {
                UnisonEvent::PhraseStart { .. } => "start",
                UnisonEvent::PhraseHit { .. } => "hit",
                UnisonEvent::PhraseFail { .. } => "fail",
                UnisonEvent::PhraseAward { .. } => "award",
                UnisonEvent::PhraseEnd { .. } => "end",
            };
            (kind, e.index())
        })
        .collect();

    assert_eq!(
        kinds,
        vec![
            ("start", 0),
            ("hit", 0),
            ("hit", 0),
            ("award", 0),
            ("end", 0),
            ("start", 1),
            ("hit", 1),
            ("fail", 1),
            ("hit", 1),
            ("end", 1),
        ]
    );
}

#[test]
fn script_round_trips_through_tempfile() {
    let script = load_script(band_session()).unwrap();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("copy.json");
    std::fs::write(&path, serde_json::to_string(&script).unwrap()).unwrap();
    let reloaded: ReplayScript = load_script(&path).unwrap();
    assert_eq!(reloaded, script);
}

#[test]
fn missing_script_reports_path() {
    let err = load_script("does/not/exist.json").unwrap_err();
    assert!(err.to_string().contains("does/not/exist.json"));
}
