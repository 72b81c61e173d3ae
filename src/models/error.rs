//! Errors raised by clock transitions, logs, and the game store.

use crate::models::game::GameId;
use thiserror::Error;

pub type Result<T, E = MatchError> = std::result::Result<T, E>;

/// Errors that can occur during match console operations.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum MatchError {
    /// The requested clock or game transition is not valid from the current state.
    #[error("invalid transition: {0}")]
    InvalidTransition(String),
    /// No game with this id.
    #[error("game {0} not found")]
    NotFound(GameId),
    /// The game was modified concurrently and the retry also conflicted.
    #[error("game {0} was modified concurrently, try again")]
    Conflict(GameId),
    /// Clock settings out of range.
    #[error("invalid clock settings: {0}")]
    InvalidConfig(String),
    /// A substitution must bring on a different player than it takes off.
    #[error("a player cannot be substituted for themselves")]
    InvalidSubstitution,
    #[error("a possession is already open for this game")]
    PossessionAlreadyOpen,
    #[error("no open possession for this game")]
    NoOpenPossession,
    /// The in-memory store lock was poisoned by a panicking writer.
    #[error("store lock poisoned")]
    LockPoisoned,
}

impl MatchError {
    pub(crate) fn invalid_transition(msg: impl Into<String>) -> Self {
        MatchError::InvalidTransition(msg.into())
    }
}
