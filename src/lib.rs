//! Match console web app: library with the match clock, event logs, and play-time reconstruction.

pub mod config;
pub mod logic;
pub mod models;
pub mod store;

pub use config::ServerConfig;
pub use logic::{
    advance_game_period, classify_fatigue, close_possession, configure_clock, open_possession,
    pause_clock, player_play_time, player_report, read_clock, reconstruct_play_time,
    record_opponent_goal, record_shot, record_substitution, set_roster_entry,
    shooting_degradation, start_clock, stop_clock, DataQualityWarning, FatigueLevel,
    PeriodAdvance, PeriodLayout, PeriodOutcome, PlayTime, PlayerReport,
};
pub use models::{
    ClockRun, ClockSettings, ClockSnapshot, ClockState, ClockStatus, ClubId, Game, GameId,
    MatchError, OvertimeSettings, PeriodMark, PlayerEvent, PlayerEventKind, PlayerId, Possession,
    PossessionKind, PossessionResult, Roster, RosterEntry, Score, ShotRecord, SubstitutionEvent,
    SubstitutionLog,
};
pub use store::MatchStore;
