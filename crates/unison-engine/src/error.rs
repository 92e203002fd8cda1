use thiserror::Error;
use unison_model::ProfileId;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum UnisonError {
    #[error("Registration is closed: player {id} joined after play started")]
    RegistrationClosed { id: ProfileId },

    #[error("Player already registered: {id}")]
    DuplicatePlayer { id: ProfileId },
}
