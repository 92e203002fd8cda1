use std::collections::{BTreeSet, HashMap};

use serde::{Deserialize, Serialize};

use crate::instrument::Instrument;
use crate::phrase::{Phrase, PhraseType};

/// A phrase every listed instrument must clear for the shared bonus.
///
/// The instrument set only ever holds normalized instruments
/// (see [`Instrument::unison_group`]).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawUnisonPhrase")]
pub struct UnisonPhrase {
    pub phrase: Phrase,
    instruments: BTreeSet<Instrument>,
}

#[derive(Deserialize)]
struct RawUnisonPhrase {
    phrase: Phrase,
    instruments: BTreeSet<Instrument>,
}

impl From<RawUnisonPhrase> for UnisonPhrase {
    fn from(raw: RawUnisonPhrase) -> Self {
        Self::new(raw.phrase, raw.instruments)
    }
}

impl UnisonPhrase {
    pub fn new(phrase: Phrase, instruments: impl IntoIterator<Item = Instrument>) -> Self {
        Self {
            phrase,
            instruments: instruments
                .into_iter()
                .map(Instrument::unison_group)
                .collect(),
        }
    }

    pub fn instruments(&self) -> &BTreeSet<Instrument> {
        &self.instruments
    }

    /// Whether `instrument` (normalized here) takes part in this phrase.
    pub fn contains(&self, instrument: Instrument) -> bool {
        self.instruments.contains(&instrument.unison_group())
    }

    /// Whether the note at `tick` on `instrument` belongs to this phrase.
    pub fn matches(&self, tick: u32, instrument: Instrument) -> bool {
        self.phrase.contains_tick(tick) && self.contains(instrument)
    }

    /// Comma separated instrument list for log output.
    pub fn instrument_list(&self) -> String {
        self.instruments
            .iter()
            .map(|i| i.to_string())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Build the unison phrase list from per-instrument phrase tracks.
///
/// A star power phrase whose identity appears on at least two distinct
/// instrument groups becomes a unison phrase for those groups. The
/// result is ordered by start tick, then end tick.
pub fn extract_unison_phrases(tracks: &[(Instrument, Vec<Phrase>)]) -> Vec<UnisonPhrase> {
    let mut by_phrase: HashMap<Phrase, BTreeSet<Instrument>> = HashMap::new();
    for (instrument, phrases) in tracks {
        for phrase in phrases
            .iter()
            .filter(|p| p.phrase_type == PhraseType::StarPower)
        {
            by_phrase
                .entry(*phrase)
                .or_default()
                .insert(instrument.unison_group());
        }
    }

    let mut unisons: Vec<UnisonPhrase> = by_phrase
        .into_iter()
        .filter(|(_, instruments)| instruments.len() >= 2)
        .map(|(phrase, instruments)| UnisonPhrase::new(phrase, instruments))
        .collect();
    unisons.sort_by_key(|u| (u.phrase.tick, u.phrase.tick_end()));
    unisons
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sp(tick: u32, len: u32) -> Phrase {
        Phrase::from_ticks(PhraseType::StarPower, tick, len)
    }

    #[test]
    fn new_normalizes_instruments() {
        let u = UnisonPhrase::new(
            sp(0, 100),
            [Instrument::FourLaneDrums, Instrument::FiveFretGuitar],
        );
        assert!(u.instruments().contains(&Instrument::ProDrums));
        assert!(!u.instruments().contains(&Instrument::FourLaneDrums));
    }

    #[test]
    fn contains_normalizes_query() {
        let u = UnisonPhrase::new(sp(0, 100), [Instrument::ProDrums]);
        assert!(u.contains(Instrument::FourLaneDrums));
        assert!(u.contains(Instrument::ProDrums));
        assert!(!u.contains(Instrument::FiveLaneDrums));
    }

    #[test]
    fn matches_requires_tick_and_instrument() {
        let u = UnisonPhrase::new(sp(100, 100), [Instrument::FiveFretGuitar]);
        assert!(u.matches(150, Instrument::FiveFretGuitar));
        assert!(!u.matches(150, Instrument::FiveFretBass));
        assert!(!u.matches(200, Instrument::FiveFretGuitar));
    }

    #[test]
    fn instrument_list_is_sorted() {
        let u = UnisonPhrase::new(
            sp(0, 1),
            [Instrument::Vocals, Instrument::FiveFretBass, Instrument::FiveFretGuitar],
        );
        assert_eq!(u.instrument_list(), "FiveFretGuitar, FiveFretBass, Vocals");
    }

    #[test]
    fn deserialize_normalizes_instruments() {
        let json = r#"{
            "phrase": {"phrase_type": "StarPower", "tick": 0, "tick_length": 10},
            "instruments": ["FourLaneDrums", "Keys"]
        }"#;
        let u: UnisonPhrase = serde_json::from_str(json).unwrap();
        assert!(u.instruments().contains(&Instrument::ProDrums));
        assert_eq!(u.instruments().len(), 2);
    }

    #[test]
    fn extract_groups_shared_star_power() {
        let tracks = vec![
            (Instrument::FiveFretGuitar, vec![sp(0, 480), sp(1920, 480)]),
            (Instrument::FiveFretBass, vec![sp(0, 480)]),
            (Instrument::ProDrums, vec![sp(1920, 480), sp(3840, 480)]),
        ];
        let unisons = extract_unison_phrases(&tracks);
        assert_eq!(unisons.len(), 2);

        assert_eq!(unisons[0].phrase.tick, 0);
        assert_eq!(
            unisons[0].instruments().iter().copied().collect::<Vec<_>>(),
            vec![Instrument::FiveFretGuitar, Instrument::FiveFretBass]
        );
        assert_eq!(unisons[1].phrase.tick, 1920);
        assert!(unisons[1].contains(Instrument::ProDrums));
    }

    #[test]
    fn extract_ignores_single_instrument_and_other_categories() {
        let tracks = vec![
            (
                Instrument::FiveFretGuitar,
                vec![Phrase::from_ticks(PhraseType::Solo, 0, 480), sp(960, 480)],
            ),
            (
                Instrument::FiveFretBass,
                vec![Phrase::from_ticks(PhraseType::Solo, 0, 480)],
            ),
        ];
        assert!(extract_unison_phrases(&tracks).is_empty());
    }

    #[test]
    fn extract_counts_drum_variants_once() {
        let tracks = vec![
            (Instrument::FourLaneDrums, vec![sp(0, 480)]),
            (Instrument::ProDrums, vec![sp(0, 480)]),
        ];
        assert!(extract_unison_phrases(&tracks).is_empty());
    }

    #[test]
    fn extract_orders_by_tick() {
        let tracks = vec![
            (Instrument::Keys, vec![sp(5000, 10), sp(100, 10), sp(2000, 10)]),
            (Instrument::Vocals, vec![sp(2000, 10), sp(5000, 10), sp(100, 10)]),
        ];
        let ticks: Vec<u32> = extract_unison_phrases(&tracks)
            .iter()
            .map(|u| u.phrase.tick)
            .collect();
        assert_eq!(ticks, vec![100, 2000, 5000]);
    }
}
