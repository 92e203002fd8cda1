// Chart-side value types for unison phrases
// (instruments, phrases, unison phrase sets, player profiles).

pub mod instrument;
pub mod phrase;
pub mod profile;
pub mod unison;

pub use instrument::Instrument;
pub use phrase::{Phrase, PhraseType};
pub use profile::{PlayerProfile, ProfileId};
pub use unison::{UnisonPhrase, extract_unison_phrases};
