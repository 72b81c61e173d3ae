//! Fatigue classification from play time and shooting decline.

use crate::models::{PeriodMark, PlayerId, ShotRecord};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FatigueLevel {
    Fresh,
    Normal,
    Tired,
    Exhausted,
}

/// Classify fatigue. Rules are checked in order and the first match wins.
///
/// `degradation` is the drop in field-goal percentage points from the first half
/// of the periods played to the second half.
pub fn classify_fatigue(play_time_percent: f64, degradation: f64) -> FatigueLevel {
    if play_time_percent < 40.0 {
        FatigueLevel::Fresh
    } else if play_time_percent < 70.0 && degradation < 10.0 {
        FatigueLevel::Normal
    } else if play_time_percent < 85.0 || degradation < 15.0 {
        FatigueLevel::Tired
    } else {
        FatigueLevel::Exhausted
    }
}

/// Field-goal percentage per period for one player, over periods in which they shot.
pub fn field_goal_by_period(shots: &[ShotRecord], player_id: PlayerId) -> BTreeMap<PeriodMark, f64> {
    let mut tallies: BTreeMap<PeriodMark, (u32, u32)> = BTreeMap::new();
    for shot in shots.iter().filter(|s| s.player_id == player_id) {
        let (made, attempts) = tallies.entry(shot.period).or_default();
        *attempts += 1;
        if shot.made {
            *made += 1;
        }
    }
    tallies
        .into_iter()
        .map(|(period, (made, attempts))| {
            (period, 100.0 * f64::from(made) / f64::from(attempts))
        })
        .collect()
}

/// Mean field-goal % over the first half of periods played minus the mean over the second half.
///
/// With an odd number of periods the middle one counts towards the second half.
/// Fewer than two periods with shots gives no measurable decline (0).
pub fn shooting_degradation(shots: &[ShotRecord], player_id: PlayerId) -> f64 {
    let per_period: Vec<f64> = field_goal_by_period(shots, player_id).into_values().collect();
    if per_period.len() < 2 {
        return 0.0;
    }
    let (first, second) = per_period.split_at(per_period.len() / 2);
    mean(first) - mean(second)
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}
