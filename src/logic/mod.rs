//! Match console logic: clock controller, live console operations, play-time reconstruction, fatigue.

pub mod clock;
mod console;
mod fatigue;
mod play_time;
mod possession;
mod report;

pub use clock::{PeriodAdvance, PeriodOutcome};
pub use console::{
    advance_game_period, configure_clock, pause_clock, read_clock, record_opponent_goal,
    record_shot, record_substitution, set_roster_entry, start_clock, stop_clock,
};
pub use fatigue::{classify_fatigue, field_goal_by_period, shooting_degradation, FatigueLevel};
pub use play_time::{reconstruct_play_time, DataQualityWarning, PeriodLayout, PlayTime};
pub use possession::{close_possession, open_possession};
pub use report::{player_play_time, player_report, PlayerReport};
