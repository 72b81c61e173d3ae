//! Data structures for the match console: clock, roster, substitution/shot/possession logs, games.

mod clock;
mod error;
mod game;
mod possession;
mod roster;
mod shot;
mod substitution;

pub use clock::{
    ClockRun, ClockSettings, ClockSnapshot, ClockState, ClockStatus, OvertimeSettings, PeriodMark,
    DEFAULT_NUMBER_OF_PERIODS, DEFAULT_PERIOD_SECS, MAX_OVERTIME_PERIODS, MAX_PERIOD_SECS,
    MAX_REGULATION_PERIODS,
};
pub use error::{MatchError, Result};
pub use game::{ClubId, Game, GameId, PlayerId, Score};
pub use possession::{Possession, PossessionId, PossessionKind, PossessionLog, PossessionResult};
pub use roster::{Roster, RosterEntry};
pub use shot::ShotRecord;
pub use substitution::{PlayerEvent, PlayerEventKind, SubstitutionEvent, SubstitutionLog};
