//! Possession intervals: offense/defense spans written synchronously as play happens.

use crate::models::clock::PeriodMark;
use crate::models::error::{MatchError, Result};
use crate::models::game::{ClubId, GameId, PlayerId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub type PossessionId = Uuid;

/// Whether our club attacked or defended during the interval.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PossessionKind {
    #[default]
    Offense,
    Defense,
}

/// How a possession ended.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PossessionResult {
    Goal,
    Turnover,
    OutOfBounds,
    Timeout,
    PeriodEnd,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Possession {
    pub id: PossessionId,
    pub game_id: GameId,
    pub club_id: ClubId,
    /// Player who gained the ball, if known.
    pub player_id: Option<PlayerId>,
    pub kind: PossessionKind,
    pub period: PeriodMark,
    pub started_at: DateTime<Utc>,
    /// None while the possession is open.
    pub ended_at: Option<DateTime<Utc>>,
    /// Set at close time.
    pub duration_ms: Option<u64>,
    pub shots_taken: u32,
    pub result: Option<PossessionResult>,
}

impl Possession {
    pub fn is_open(&self) -> bool {
        self.ended_at.is_none()
    }
}

/// Possession log of one game. At most one possession is open at a time.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PossessionLog {
    possessions: Vec<Possession>,
}

impl PossessionLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn possessions(&self) -> &[Possession] {
        &self.possessions
    }

    pub fn open_possession(&self) -> Option<&Possession> {
        self.possessions.iter().rev().find(|p| p.is_open())
    }

    fn open_possession_mut(&mut self) -> Option<&mut Possession> {
        self.possessions.iter_mut().rev().find(|p| p.is_open())
    }

    /// Start a possession. Fails if one is already open.
    pub fn open(
        &mut self,
        game_id: GameId,
        club_id: ClubId,
        player_id: Option<PlayerId>,
        kind: PossessionKind,
        period: PeriodMark,
        now: DateTime<Utc>,
    ) -> Result<&Possession> {
        if self.open_possession().is_some() {
            return Err(MatchError::PossessionAlreadyOpen);
        }
        self.possessions.push(Possession {
            id: Uuid::new_v4(),
            game_id,
            club_id,
            player_id,
            kind,
            period,
            started_at: now,
            ended_at: None,
            duration_ms: None,
            shots_taken: 0,
            result: None,
        });
        Ok(&self.possessions[self.possessions.len() - 1])
    }

    /// Close the open possession with `result`, computing its duration.
    pub fn close(&mut self, result: PossessionResult, now: DateTime<Utc>) -> Result<&Possession> {
        let p = self
            .open_possession_mut()
            .ok_or(MatchError::NoOpenPossession)?;
        let elapsed = (now - p.started_at).num_milliseconds().max(0);
        p.ended_at = Some(now);
        p.duration_ms = Some(elapsed as u64);
        p.result = Some(result);
        Ok(&*p)
    }

    /// Count a shot against the open possession. Returns false if none is open.
    pub fn attribute_shot(&mut self) -> bool {
        match self.open_possession_mut() {
            Some(p) => {
                p.shots_taken += 1;
                true
            }
            None => false,
        }
    }
}
