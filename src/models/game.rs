//! Game aggregate: one match with its clock, roster, and event logs.

use crate::models::clock::{ClockSettings, ClockState};
use crate::models::error::{MatchError, Result};
use crate::models::possession::PossessionLog;
use crate::models::roster::Roster;
use crate::models::shot::ShotRecord;
use crate::models::substitution::SubstitutionLog;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a game.
pub type GameId = Uuid;
/// Unique identifier for a club (the team whose players are tracked).
pub type ClubId = Uuid;
/// Unique identifier for a player.
pub type PlayerId = Uuid;

/// Goals for our club and for the opponent.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct Score {
    pub ours: u32,
    pub theirs: u32,
}

impl Score {
    pub fn is_level(&self) -> bool {
        self.ours == self.theirs
    }
}

/// A scheduled or live match.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Game {
    pub id: GameId,
    pub club_id: ClubId,
    pub clock: ClockState,
    pub roster: Roster,
    pub substitutions: SubstitutionLog,
    pub shots: Vec<ShotRecord>,
    pub possessions: PossessionLog,
    pub score: Score,
    /// Set once periods and overtime are exhausted or a golden goal is scored.
    pub completed: bool,
    pub created_at: DateTime<Utc>,
}

impl Game {
    /// Schedule a game with a stopped clock at the start of period 1.
    pub fn new(club_id: ClubId, settings: ClockSettings) -> Result<Self> {
        settings.validate()?;
        Ok(Self {
            id: Uuid::new_v4(),
            club_id,
            clock: ClockState::new(settings),
            roster: Roster::new(),
            substitutions: SubstitutionLog::new(),
            shots: Vec::new(),
            possessions: PossessionLog::new(),
            score: Score::default(),
            completed: false,
            created_at: Utc::now(),
        })
    }

    /// Fail if the match has already finished.
    pub fn ensure_live(&self) -> Result<()> {
        if self.completed {
            return Err(MatchError::invalid_transition("game is already completed"));
        }
        Ok(())
    }
}
