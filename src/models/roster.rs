//! Per-game roster: who starts on court and who starts on the bench.

use crate::models::game::{ClubId, GameId, PlayerId};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct RosterEntry {
    pub game_id: GameId,
    pub club_id: ClubId,
    pub player_id: PlayerId,
    /// On court at the start of period 1.
    pub is_starting: bool,
    #[serde(default)]
    pub starting_position: Option<String>,
}

/// Roster of one game, at most one entry per player.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Roster {
    entries: Vec<RosterEntry>,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the entry for `entry.player_id`.
    pub fn set_entry(&mut self, entry: RosterEntry) {
        match self.entries.iter_mut().find(|e| e.player_id == entry.player_id) {
            Some(existing) => *existing = entry,
            None => self.entries.push(entry),
        }
    }

    pub fn entry(&self, player_id: PlayerId) -> Option<&RosterEntry> {
        self.entries.iter().find(|e| e.player_id == player_id)
    }

    /// Players without a roster entry start on the bench.
    pub fn is_starting(&self, player_id: PlayerId) -> bool {
        self.entry(player_id).is_some_and(|e| e.is_starting)
    }

    pub fn entries(&self) -> &[RosterEntry] {
        &self.entries
    }
}
