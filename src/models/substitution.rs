//! Substitution events and the per-game append-only log.

use crate::models::clock::PeriodMark;
use crate::models::error::{MatchError, Result};
use crate::models::game::{ClubId, GameId, PlayerId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;

/// One substitution: `player_in` comes on for `player_out`.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct SubstitutionEvent {
    pub game_id: GameId,
    pub club_id: ClubId,
    pub player_in: PlayerId,
    pub player_out: PlayerId,
    pub period: PeriodMark,
    /// Seconds left on the period clock when the substitution happened.
    pub time_remaining_secs: u32,
    pub created_at: DateTime<Utc>,
}

impl SubstitutionEvent {
    pub fn new(
        game_id: GameId,
        club_id: ClubId,
        player_in: PlayerId,
        player_out: PlayerId,
        period: PeriodMark,
        time_remaining_secs: u32,
        created_at: DateTime<Utc>,
    ) -> Result<Self> {
        if player_in == player_out {
            return Err(MatchError::InvalidSubstitution);
        }
        Ok(Self {
            game_id,
            club_id,
            player_in,
            player_out,
            period,
            time_remaining_secs,
            created_at,
        })
    }

    /// Chronological sort key: period ascending, then time remaining descending (the clock counts down).
    pub fn chronological_key(&self) -> (PeriodMark, Reverse<u32>) {
        (self.period, Reverse(self.time_remaining_secs))
    }
}

/// Whether a player came on or went off.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlayerEventKind {
    In,
    Out,
}

/// A substitution seen from one player's point of view.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct PlayerEvent {
    pub kind: PlayerEventKind,
    pub period: PeriodMark,
    pub time_remaining_secs: u32,
}

/// Append-only substitution log of one game, kept in insertion order.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubstitutionLog {
    events: Vec<SubstitutionEvent>,
}

impl SubstitutionLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, event: SubstitutionEvent) {
        self.events.push(event);
    }

    /// Events in insertion order.
    pub fn events(&self) -> &[SubstitutionEvent] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Events in chronological order. The sort is stable, so insertion order breaks ties.
    pub fn chronological(&self) -> Vec<&SubstitutionEvent> {
        let mut ordered: Vec<&SubstitutionEvent> = self.events.iter().collect();
        ordered.sort_by_key(|e| e.chronological_key());
        ordered
    }

    /// Chronologically ordered in/out events for one player.
    pub fn player_events(&self, player_id: PlayerId) -> Vec<PlayerEvent> {
        self.chronological()
            .into_iter()
            .filter_map(|e| {
                let kind = if e.player_in == player_id {
                    PlayerEventKind::In
                } else if e.player_out == player_id {
                    PlayerEventKind::Out
                } else {
                    return None;
                };
                Some(PlayerEvent {
                    kind,
                    period: e.period,
                    time_remaining_secs: e.time_remaining_secs,
                })
            })
            .collect()
    }

    /// Full events involving one player, chronologically ordered.
    pub fn for_player(&self, player_id: PlayerId) -> Vec<SubstitutionEvent> {
        self.chronological()
            .into_iter()
            .filter(|e| e.player_in == player_id || e.player_out == player_id)
            .cloned()
            .collect()
    }
}
