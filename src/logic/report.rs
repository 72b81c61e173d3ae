//! Per-player play-time and fatigue report for one game.

use crate::logic::fatigue::{classify_fatigue, shooting_degradation, FatigueLevel};
use crate::logic::play_time::{reconstruct_play_time, PeriodLayout, PlayTime};
use crate::models::{Game, PlayerId};
use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PlayerReport {
    pub player_id: PlayerId,
    pub is_starting: bool,
    pub play_time: PlayTime,
    /// Field-goal percentage points lost from the first to the second half of periods played.
    pub degradation: f64,
    pub fatigue: FatigueLevel,
}

/// Reconstruct a player's on-court time over the game as played up to `now`.
pub fn player_play_time(game: &Game, player_id: PlayerId, now: DateTime<Utc>) -> PlayTime {
    let layout = PeriodLayout::from_clock(&game.clock, now);
    let events = game.substitutions.player_events(player_id);
    reconstruct_play_time(game.roster.is_starting(player_id), &events, &layout)
}

pub fn player_report(game: &Game, player_id: PlayerId, now: DateTime<Utc>) -> PlayerReport {
    let play_time = player_play_time(game, player_id, now);
    let degradation = shooting_degradation(&game.shots, player_id);
    let fatigue = classify_fatigue(play_time.percent, degradation);
    PlayerReport {
        player_id,
        is_starting: game.roster.is_starting(player_id),
        play_time,
        degradation,
        fatigue,
    }
}
