//! Clock controller: transitions over `ClockState` and the remaining-time derivation.
//!
//! Every function takes the current wall time as an argument and returns a new
//! value. Nothing here keeps time on its own; the displayed remaining time is
//! recomputed from the persisted fields on each read.

use crate::models::{ClockRun, ClockSettings, ClockSnapshot, ClockState, MatchError, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// What an `advance_period` call moved the match into.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum PeriodOutcome {
    /// Next regulation period.
    Regulation { period: u8 },
    /// Next overtime period. Under golden goal the first goal ends the match.
    Overtime { number: u8, golden_goal: bool },
    /// Periods and overtime are exhausted; the match is over.
    Completed,
}

/// Result of a period advance: the new clock plus the outcome to hand to match completion.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct PeriodAdvance {
    pub clock: ClockState,
    pub outcome: PeriodOutcome,
}

fn elapsed_ms(since: DateTime<Utc>, now: DateTime<Utc>) -> u64 {
    (now - since).num_milliseconds().max(0) as u64
}

/// Remaining time in the current period as of `now`.
pub fn derived_remaining_ms(clock: &ClockState, now: DateTime<Utc>) -> u64 {
    match clock.run {
        ClockRun::Stopped { remaining_ms } | ClockRun::Paused { remaining_ms, .. } => remaining_ms,
        ClockRun::Running {
            started_at,
            remaining_ms,
        } => remaining_ms.saturating_sub(elapsed_ms(started_at, now)),
    }
}

/// Read model for polling clients.
pub fn snapshot(clock: &ClockState, now: DateTime<Utc>) -> ClockSnapshot {
    let remaining_ms = derived_remaining_ms(clock, now);
    ClockSnapshot {
        state: clock.status(),
        current_period: clock.current_period,
        derived_remaining_ms: remaining_ms,
        derived_remaining_seconds: remaining_ms.div_ceil(1000),
        is_overtime: clock.is_overtime(),
        overtime_period_number: clock.overtime_period_number,
        golden_goal: clock.ends_on_first_goal(),
    }
}

/// Start or resume the clock. Starting a running clock is a no-op.
pub fn start(clock: &ClockState, now: DateTime<Utc>) -> ClockState {
    match clock.run {
        ClockRun::Running { .. } => {
            log::debug!("start ignored: clock already running");
            *clock
        }
        ClockRun::Stopped { remaining_ms } | ClockRun::Paused { remaining_ms, .. } => {
            log::info!(
                "clock started in {:?} with {} ms remaining",
                clock.period_mark(),
                remaining_ms
            );
            ClockState {
                run: ClockRun::Running {
                    started_at: now,
                    remaining_ms,
                },
                ..*clock
            }
        }
    }
}

/// Pause a running clock, folding the elapsed time into the baseline.
///
/// Pausing a paused clock is a no-op; pausing a stopped clock is an invalid transition.
pub fn pause(clock: &ClockState, now: DateTime<Utc>) -> Result<ClockState> {
    match clock.run {
        ClockRun::Running {
            started_at,
            remaining_ms,
        } => {
            let remaining_ms = remaining_ms.saturating_sub(elapsed_ms(started_at, now));
            log::info!(
                "clock paused in {:?} with {} ms remaining",
                clock.period_mark(),
                remaining_ms
            );
            Ok(ClockState {
                run: ClockRun::Paused {
                    paused_at: now,
                    remaining_ms,
                },
                ..*clock
            })
        }
        ClockRun::Paused { .. } => {
            log::debug!("pause ignored: clock already paused");
            Ok(*clock)
        }
        ClockRun::Stopped { .. } => Err(MatchError::invalid_transition(
            "cannot pause a stopped clock",
        )),
    }
}

/// Stop the clock from any state, freezing the currently derived remaining time.
pub fn stop(clock: &ClockState, now: DateTime<Utc>) -> ClockState {
    let remaining_ms = derived_remaining_ms(clock, now);
    log::info!(
        "clock stopped in {:?} with {} ms remaining",
        clock.period_mark(),
        remaining_ms
    );
    ClockState {
        run: ClockRun::Stopped { remaining_ms },
        ..*clock
    }
}

/// Move to the next period, entering overtime or completing the match when regulation ends.
///
/// Only allowed once the period has run out unless `force` is set. `scores_level`
/// decides whether overtime is played.
pub fn advance_period(
    clock: &ClockState,
    now: DateTime<Utc>,
    scores_level: bool,
    force: bool,
) -> Result<PeriodAdvance> {
    let remaining_ms = derived_remaining_ms(clock, now);
    if remaining_ms > 0 && !force {
        return Err(MatchError::invalid_transition(format!(
            "cannot advance period with {} ms remaining",
            remaining_ms
        )));
    }

    let settings = clock.settings;
    let max_overtime = settings.overtime.map_or(0, |ot| ot.max_periods);
    let golden_goal = settings.overtime.is_some_and(|ot| ot.golden_goal);

    let advance = if clock.is_overtime() {
        if clock.overtime_period_number < max_overtime && scores_level {
            enter_overtime(clock, clock.overtime_period_number + 1, golden_goal)
        } else {
            complete(clock)
        }
    } else if clock.current_period < settings.number_of_periods {
        let period = clock.current_period + 1;
        PeriodAdvance {
            clock: ClockState {
                run: ClockRun::Stopped {
                    remaining_ms: settings.period_ms(),
                },
                current_period: period,
                ..*clock
            },
            outcome: PeriodOutcome::Regulation { period },
        }
    } else if settings.overtime_enabled() && scores_level {
        enter_overtime(clock, 1, golden_goal)
    } else {
        complete(clock)
    };

    log::info!("period advanced: {:?}", advance.outcome);
    Ok(advance)
}

fn enter_overtime(clock: &ClockState, number: u8, golden_goal: bool) -> PeriodAdvance {
    PeriodAdvance {
        clock: ClockState {
            run: ClockRun::Stopped {
                remaining_ms: clock.settings.overtime_period_ms(),
            },
            overtime_period_number: number,
            ..*clock
        },
        outcome: PeriodOutcome::Overtime {
            number,
            golden_goal,
        },
    }
}

fn complete(clock: &ClockState) -> PeriodAdvance {
    PeriodAdvance {
        clock: ClockState {
            run: ClockRun::Stopped { remaining_ms: 0 },
            ..*clock
        },
        outcome: PeriodOutcome::Completed,
    }
}

/// Replace the period configuration. Only allowed on a stopped clock that has not left period 1.
pub fn configure(clock: &ClockState, settings: ClockSettings) -> Result<ClockState> {
    settings.validate()?;
    if !matches!(clock.run, ClockRun::Stopped { .. })
        || clock.current_period != 1
        || clock.is_overtime()
    {
        return Err(MatchError::invalid_transition(
            "clock settings can only change before the match is under way",
        ));
    }
    Ok(ClockState::new(settings))
}
