//! Match clock: persisted state of one game's timer.
//!
//! The clock never ticks. While running it only stores when it was started and
//! how much time was left at that moment; the remaining time shown to clients
//! is derived from those fields on every read (see `logic::clock`).

use crate::models::error::{MatchError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Regulation periods allowed per match.
pub const MAX_REGULATION_PERIODS: u8 = 10;
/// Overtime periods allowed per match.
pub const MAX_OVERTIME_PERIODS: u8 = 10;
pub const DEFAULT_NUMBER_OF_PERIODS: u8 = 4;
pub const DEFAULT_PERIOD_SECS: u32 = 600;
/// Longest regulation or overtime period accepted.
pub const MAX_PERIOD_SECS: u32 = 24 * 3600;

/// Overtime rules for a match. Absent settings mean a level match simply ends.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct OvertimeSettings {
    pub period_secs: u32,
    pub max_periods: u8,
    /// First goal in overtime ends the match instead of time expiry.
    #[serde(default)]
    pub golden_goal: bool,
}

/// Period configuration of a match.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct ClockSettings {
    pub number_of_periods: u8,
    pub period_secs: u32,
    #[serde(default)]
    pub overtime: Option<OvertimeSettings>,
}

impl Default for ClockSettings {
    fn default() -> Self {
        Self {
            number_of_periods: DEFAULT_NUMBER_OF_PERIODS,
            period_secs: DEFAULT_PERIOD_SECS,
            overtime: None,
        }
    }
}

impl ClockSettings {
    /// Check period counts and durations are in range.
    pub fn validate(&self) -> Result<()> {
        if !(1..=MAX_REGULATION_PERIODS).contains(&self.number_of_periods) {
            return Err(MatchError::InvalidConfig(format!(
                "number of periods must be between 1 and {}, got {}",
                MAX_REGULATION_PERIODS, self.number_of_periods
            )));
        }
        if self.period_secs == 0 {
            return Err(MatchError::InvalidConfig("period duration must be positive".into()));
        }
        if self.period_secs > MAX_PERIOD_SECS {
            return Err(MatchError::InvalidConfig(format!(
                "period duration must be at most {}s, got {}s",
                MAX_PERIOD_SECS, self.period_secs
            )));
        }
        if let Some(ot) = &self.overtime {
            if ot.period_secs == 0 {
                return Err(MatchError::InvalidConfig(
                    "overtime period duration must be positive".into(),
                ));
            }
            if ot.period_secs > MAX_PERIOD_SECS {
                return Err(MatchError::InvalidConfig(format!(
                    "overtime period duration must be at most {}s, got {}s",
                    MAX_PERIOD_SECS, ot.period_secs
                )));
            }
            if ot.max_periods > MAX_OVERTIME_PERIODS {
                return Err(MatchError::InvalidConfig(format!(
                    "at most {} overtime periods, got {}",
                    MAX_OVERTIME_PERIODS, ot.max_periods
                )));
            }
        }
        Ok(())
    }

    pub fn period_ms(&self) -> u64 {
        u64::from(self.period_secs) * 1000
    }

    /// Overtime period length; falls back to the regulation length when overtime is not configured.
    pub fn overtime_period_ms(&self) -> u64 {
        self.overtime
            .map(|ot| u64::from(ot.period_secs) * 1000)
            .unwrap_or_else(|| self.period_ms())
    }

    pub fn overtime_enabled(&self) -> bool {
        self.overtime.is_some_and(|ot| ot.max_periods > 0)
    }
}

/// A period of play: regulation periods count from 1, overtime periods count from 1 after regulation.
///
/// Ordering follows play order: every regulation period sorts before every overtime period.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PeriodMark {
    Regulation(u8),
    Overtime(u8),
}

impl PeriodMark {
    pub fn is_overtime(&self) -> bool {
        matches!(self, PeriodMark::Overtime(_))
    }
}

/// Coarse clock state as shown to clients.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClockStatus {
    Stopped,
    Running,
    Paused,
}

/// Timer state. Each variant carries exactly the fields that are authoritative in it.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ClockRun {
    /// `remaining_ms` is the displayed value.
    Stopped { remaining_ms: u64 },
    /// `remaining_ms` is the value at `started_at`; displayed value is derived from the wall clock.
    Running {
        started_at: DateTime<Utc>,
        remaining_ms: u64,
    },
    /// `remaining_ms` is the displayed value, frozen at `paused_at`.
    Paused {
        paused_at: DateTime<Utc>,
        remaining_ms: u64,
    },
}

impl ClockRun {
    pub fn status(&self) -> ClockStatus {
        match self {
            ClockRun::Stopped { .. } => ClockStatus::Stopped,
            ClockRun::Running { .. } => ClockStatus::Running,
            ClockRun::Paused { .. } => ClockStatus::Paused,
        }
    }

    /// Remaining time stored in the state (the elapsed-time reference point while running).
    pub fn baseline_ms(&self) -> u64 {
        match *self {
            ClockRun::Stopped { remaining_ms }
            | ClockRun::Running { remaining_ms, .. }
            | ClockRun::Paused { remaining_ms, .. } => remaining_ms,
        }
    }
}

/// Persisted clock of one game.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct ClockState {
    pub run: ClockRun,
    /// Regulation period, 1..=number_of_periods. Stays at the last period during overtime.
    pub current_period: u8,
    /// 0 during regulation, 1.. once overtime has started.
    pub overtime_period_number: u8,
    pub settings: ClockSettings,
}

impl Default for ClockState {
    fn default() -> Self {
        Self::new(ClockSettings::default())
    }
}

impl ClockState {
    /// A stopped clock at the start of period 1 with the full period remaining.
    pub fn new(settings: ClockSettings) -> Self {
        Self {
            run: ClockRun::Stopped {
                remaining_ms: settings.period_ms(),
            },
            current_period: 1,
            overtime_period_number: 0,
            settings,
        }
    }

    pub fn status(&self) -> ClockStatus {
        self.run.status()
    }

    pub fn is_overtime(&self) -> bool {
        self.overtime_period_number > 0
    }

    pub fn period_mark(&self) -> PeriodMark {
        if self.is_overtime() {
            PeriodMark::Overtime(self.overtime_period_number)
        } else {
            PeriodMark::Regulation(self.current_period)
        }
    }

    /// Full length of the period currently being played.
    pub fn active_period_ms(&self) -> u64 {
        if self.is_overtime() {
            self.settings.overtime_period_ms()
        } else {
            self.settings.period_ms()
        }
    }

    /// True while in overtime under golden-goal rules.
    pub fn ends_on_first_goal(&self) -> bool {
        self.is_overtime() && self.settings.overtime.is_some_and(|ot| ot.golden_goal)
    }
}

/// Read model returned to polling clients. Always built from a fresh derivation.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct ClockSnapshot {
    pub state: ClockStatus,
    pub current_period: u8,
    pub derived_remaining_ms: u64,
    /// Rounded up: shows 0 only once the period has fully expired.
    pub derived_remaining_seconds: u64,
    pub is_overtime: bool,
    pub overtime_period_number: u8,
    pub golden_goal: bool,
}
