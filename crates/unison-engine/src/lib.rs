// Unison phrase coordination: per-phrase quorum tracking across every
// registered player, bonus awards, and lifecycle notifications.

pub mod config;
pub mod coordinator;
pub mod error;
pub mod listener;
pub mod lookup;
pub mod phrase_state;
pub mod player_engine;
pub mod summary;

pub use config::{DuplicatePlayers, LateRegistration, UnisonConfig};
pub use coordinator::UnisonCoordinator;
pub use error::UnisonError;
pub use listener::{EventLog, UnisonEvent, UnisonListener};
pub use lookup::PhraseCursor;
pub use phrase_state::{Completion, PhraseProgress, PhraseStatus};
pub use player_engine::PlayerEngine;
pub use summary::SessionSummary;
