//! Play-time reconstruction from a player's substitution events.
//!
//! Each event is mapped onto an absolute game time (seconds since the start of
//! period 1, continuous across period boundaries), after which on-court time is a
//! single fold over the ordered events. Bad input is reported as data-quality
//! warnings and the fold carries on with a best-effort interpretation.

use crate::logic::clock::derived_remaining_ms;
use crate::models::{ClockState, PeriodMark, PlayerEvent, PlayerEventKind};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;

/// Lengths of the periods that make up a game: regulation periods followed by any overtime played.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub struct PeriodLayout {
    pub number_of_periods: u8,
    pub period_secs: u32,
    pub overtime_periods: u8,
    pub overtime_period_secs: u32,
    /// Absolute seconds at which play stopped, when the game ended early or is still in progress.
    pub played_secs: Option<u32>,
}

impl PeriodLayout {
    /// Regulation periods only.
    pub fn regulation(number_of_periods: u8, period_secs: u32) -> Self {
        Self {
            number_of_periods,
            period_secs,
            overtime_periods: 0,
            overtime_period_secs: 0,
            played_secs: None,
        }
    }

    pub fn with_overtime(self, overtime_periods: u8, overtime_period_secs: u32) -> Self {
        Self {
            overtime_periods,
            overtime_period_secs,
            ..self
        }
    }

    /// Cut the game off at `secs` of absolute game time.
    pub fn played_until(self, secs: u32) -> Self {
        Self {
            played_secs: Some(secs),
            ..self
        }
    }

    /// The game as played up to `now`: periods before the clock's current one in full,
    /// plus the part of the current period that has elapsed.
    pub fn from_clock(clock: &ClockState, now: DateTime<Utc>) -> Self {
        let settings = clock.settings;
        let layout = Self::regulation(settings.number_of_periods, settings.period_secs)
            .with_overtime(
                clock.overtime_period_number,
                settings.overtime.map_or(0, |ot| ot.period_secs),
            );
        let mark = clock.period_mark();
        let elapsed_ms = clock
            .active_period_ms()
            .saturating_sub(derived_remaining_ms(clock, now));
        let elapsed = u32::try_from(elapsed_ms / 1000).unwrap_or(u32::MAX);
        match layout.period_start(mark) {
            Some(start) => layout.played_until(start.saturating_add(elapsed)),
            None => layout,
        }
    }

    /// Length of `period`, or None if the game has no such period.
    pub fn duration(&self, period: PeriodMark) -> Option<u32> {
        match period {
            PeriodMark::Regulation(n) if (1..=self.number_of_periods).contains(&n) => {
                Some(self.period_secs)
            }
            PeriodMark::Overtime(n) if (1..=self.overtime_periods).contains(&n) => {
                Some(self.overtime_period_secs)
            }
            _ => None,
        }
    }

    /// Seconds played before `period` begins.
    pub fn period_start(&self, period: PeriodMark) -> Option<u32> {
        self.duration(period)?;
        let start = match period {
            PeriodMark::Regulation(n) => u32::from(n - 1).saturating_mul(self.period_secs),
            PeriodMark::Overtime(n) => self
                .regulation_seconds()
                .saturating_add(u32::from(n - 1).saturating_mul(self.overtime_period_secs)),
        };
        Some(start)
    }

    fn regulation_seconds(&self) -> u32 {
        u32::from(self.number_of_periods).saturating_mul(self.period_secs)
    }

    /// Seconds of play: the sum of all period lengths, cut off at `played_secs` if set.
    pub fn total_seconds(&self) -> u32 {
        let full = self.regulation_seconds().saturating_add(
            u32::from(self.overtime_periods).saturating_mul(self.overtime_period_secs),
        );
        self.played_secs.map_or(full, |played| played.min(full))
    }
}

/// Input problems found while reconstructing play time.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DataQualityWarning {
    /// Subbed in while already on court; the running interval was kept.
    InWhileOnCourt { period: PeriodMark, time_remaining_secs: u32 },
    /// Subbed out while on the bench; no time was credited.
    OutWhileOnBench { period: PeriodMark, time_remaining_secs: u32 },
    /// The event names a period the game did not have; it was skipped.
    PeriodOutsideGame { period: PeriodMark, time_remaining_secs: u32 },
    /// Time remaining exceeded the period length; it was clamped to the start of the period.
    TimeRemainingExceedsPeriod {
        period: PeriodMark,
        time_remaining_secs: u32,
        period_secs: u32,
    },
    /// The event happened before the previous one; it was treated as simultaneous.
    OutOfOrder { period: PeriodMark, time_remaining_secs: u32 },
    /// The event lies after the point where play stopped; it was moved back to that point.
    AfterPlayStopped { period: PeriodMark, time_remaining_secs: u32 },
}

impl fmt::Display for DataQualityWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataQualityWarning::InWhileOnCourt { period, time_remaining_secs } => write!(
                f,
                "sub-in at {:?} {}s while already on court",
                period, time_remaining_secs
            ),
            DataQualityWarning::OutWhileOnBench { period, time_remaining_secs } => write!(
                f,
                "sub-out at {:?} {}s while on the bench",
                period, time_remaining_secs
            ),
            DataQualityWarning::PeriodOutsideGame { period, time_remaining_secs } => write!(
                f,
                "event at {:?} {}s is outside the periods played",
                period, time_remaining_secs
            ),
            DataQualityWarning::TimeRemainingExceedsPeriod {
                period,
                time_remaining_secs,
                period_secs,
            } => write!(
                f,
                "event at {:?} has {}s remaining but the period lasts {}s",
                period, time_remaining_secs, period_secs
            ),
            DataQualityWarning::OutOfOrder { period, time_remaining_secs } => write!(
                f,
                "event at {:?} {}s is earlier than the previous event",
                period, time_remaining_secs
            ),
            DataQualityWarning::AfterPlayStopped { period, time_remaining_secs } => write!(
                f,
                "event at {:?} {}s is after play stopped",
                period, time_remaining_secs
            ),
        }
    }
}

/// Reconstructed on-court time for one player in one game.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PlayTime {
    pub seconds: u32,
    pub percent: f64,
    pub total_game_seconds: u32,
    pub warnings: Vec<DataQualityWarning>,
}

/// Fold state: whether the player is on court and since when.
struct Tally {
    on_court: bool,
    cursor: u32,
    accumulated: u32,
    warnings: Vec<DataQualityWarning>,
}

impl Tally {
    fn apply(mut self, event: &PlayerEvent, layout: &PeriodLayout) -> Self {
        let period = event.period;
        let (Some(start), Some(duration)) = (layout.period_start(period), layout.duration(period))
        else {
            self.warnings.push(DataQualityWarning::PeriodOutsideGame {
                period,
                time_remaining_secs: event.time_remaining_secs,
            });
            return self;
        };

        let remaining = if event.time_remaining_secs > duration {
            self.warnings.push(DataQualityWarning::TimeRemainingExceedsPeriod {
                period,
                time_remaining_secs: event.time_remaining_secs,
                period_secs: duration,
            });
            duration
        } else {
            event.time_remaining_secs
        };

        let mut at = start.saturating_add(duration - remaining);
        let end = layout.total_seconds();
        if at > end {
            self.warnings.push(DataQualityWarning::AfterPlayStopped {
                period,
                time_remaining_secs: event.time_remaining_secs,
            });
            at = end;
        }
        if at < self.cursor {
            self.warnings.push(DataQualityWarning::OutOfOrder {
                period,
                time_remaining_secs: event.time_remaining_secs,
            });
            at = self.cursor;
        }

        match event.kind {
            PlayerEventKind::In => {
                if self.on_court {
                    self.warnings.push(DataQualityWarning::InWhileOnCourt {
                        period,
                        time_remaining_secs: event.time_remaining_secs,
                    });
                    self.accumulated += at - self.cursor;
                }
                self.on_court = true;
            }
            PlayerEventKind::Out => {
                if self.on_court {
                    self.accumulated += at - self.cursor;
                } else {
                    self.warnings.push(DataQualityWarning::OutWhileOnBench {
                        period,
                        time_remaining_secs: event.time_remaining_secs,
                    });
                }
                self.on_court = false;
            }
        }
        self.cursor = at;
        self
    }
}

/// Total on-court seconds for a player.
///
/// `events` must be in chronological order (period ascending, time remaining descending),
/// as returned by `SubstitutionLog::player_events`.
pub fn reconstruct_play_time(
    is_starting: bool,
    events: &[PlayerEvent],
    layout: &PeriodLayout,
) -> PlayTime {
    let total = layout.total_seconds();
    let start = Tally {
        on_court: is_starting,
        cursor: 0,
        accumulated: 0,
        warnings: Vec::new(),
    };
    let tally = events.iter().fold(start, |t, e| t.apply(e, layout));

    let seconds = if tally.on_court {
        tally.accumulated + total.saturating_sub(tally.cursor)
    } else {
        tally.accumulated
    };
    for w in &tally.warnings {
        log::warn!("play-time reconstruction: {}", w);
    }
    let percent = if total == 0 {
        0.0
    } else {
        100.0 * f64::from(seconds) / f64::from(total)
    };

    PlayTime {
        seconds,
        percent,
        total_game_seconds: total,
        warnings: tally.warnings,
    }
}
