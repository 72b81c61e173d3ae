//! Live match console: clock, roster, substitution, and scoring operations on a game.

use crate::logic::clock::{self, PeriodOutcome};
use crate::models::{
    ClockSettings, ClockSnapshot, Game, PeriodMark, PlayerId, PossessionResult,
    Result, RosterEntry, Score, ShotRecord, SubstitutionEvent,
};
use chrono::{DateTime, Utc};

/// Start or resume the game clock.
pub fn start_clock(game: &mut Game, now: DateTime<Utc>) -> Result<ClockSnapshot> {
    game.ensure_live()?;
    game.clock = clock::start(&game.clock, now);
    Ok(clock::snapshot(&game.clock, now))
}

pub fn pause_clock(game: &mut Game, now: DateTime<Utc>) -> Result<ClockSnapshot> {
    game.ensure_live()?;
    game.clock = clock::pause(&game.clock, now)?;
    Ok(clock::snapshot(&game.clock, now))
}

/// Stop the clock. Allowed on a completed game, where it only freezes the display.
pub fn stop_clock(game: &mut Game, now: DateTime<Utc>) -> ClockSnapshot {
    game.clock = clock::stop(&game.clock, now);
    clock::snapshot(&game.clock, now)
}

/// Advance to the next period, overtime, or the end of the match.
///
/// Any open possession is closed with `PeriodEnd`; a `Completed` outcome marks the game completed.
pub fn advance_game_period(game: &mut Game, now: DateTime<Utc>, force: bool) -> Result<PeriodOutcome> {
    game.ensure_live()?;
    let advance = clock::advance_period(&game.clock, now, game.score.is_level(), force)?;
    if game.possessions.open_possession().is_some() {
        game.possessions.close(PossessionResult::PeriodEnd, now)?;
    }
    game.clock = advance.clock;
    if advance.outcome == PeriodOutcome::Completed {
        log::info!(
            "game {} completed at {}-{}",
            game.id,
            game.score.ours,
            game.score.theirs
        );
        game.completed = true;
    }
    Ok(advance.outcome)
}

/// Replace the clock settings before the match is under way.
pub fn configure_clock(
    game: &mut Game,
    settings: ClockSettings,
    now: DateTime<Utc>,
) -> Result<ClockSnapshot> {
    game.ensure_live()?;
    game.clock = clock::configure(&game.clock, settings)?;
    Ok(clock::snapshot(&game.clock, now))
}

/// Set whether a player starts on court.
pub fn set_roster_entry(
    game: &mut Game,
    player_id: PlayerId,
    is_starting: bool,
    starting_position: Option<String>,
) -> RosterEntry {
    let entry = RosterEntry {
        game_id: game.id,
        club_id: game.club_id,
        player_id,
        is_starting,
        starting_position,
    };
    game.roster.set_entry(entry.clone());
    entry
}

/// Log a substitution.
///
/// Without an explicit `at` (period, seconds remaining) the event is stamped with the
/// clock's current period and derived remaining time.
pub fn record_substitution(
    game: &mut Game,
    player_in: PlayerId,
    player_out: PlayerId,
    at: Option<(PeriodMark, u32)>,
    now: DateTime<Utc>,
) -> Result<SubstitutionEvent> {
    game.ensure_live()?;
    let (period, time_remaining_secs) = match at {
        Some(at) => at,
        None => {
            let snap = clock::snapshot(&game.clock, now);
            let secs = u32::try_from(snap.derived_remaining_seconds).unwrap_or(u32::MAX);
            (game.clock.period_mark(), secs)
        }
    };
    let event = SubstitutionEvent::new(
        game.id,
        game.club_id,
        player_in,
        player_out,
        period,
        time_remaining_secs,
        now,
    )?;
    log::debug!(
        "game {}: substitution {} for {} at {:?} {}s",
        game.id,
        player_in,
        player_out,
        period,
        time_remaining_secs
    );
    game.substitutions.record(event.clone());
    Ok(event)
}

/// Log a shot by one of our players in the current period.
///
/// The shot counts against the open possession; a made shot scores and closes the possession as a goal.
pub fn record_shot(
    game: &mut Game,
    player_id: PlayerId,
    made: bool,
    now: DateTime<Utc>,
) -> Result<ShotRecord> {
    game.ensure_live()?;
    let shot = ShotRecord {
        player_id,
        period: game.clock.period_mark(),
        made,
        created_at: now,
    };
    game.shots.push(shot.clone());
    let had_possession = game.possessions.attribute_shot();
    if made {
        game.score.ours += 1;
        if had_possession {
            game.possessions.close(PossessionResult::Goal, now)?;
        }
        goal_scored(game, now);
    }
    Ok(shot)
}

/// Log a goal by the opponent.
pub fn record_opponent_goal(game: &mut Game, now: DateTime<Utc>) -> Result<Score> {
    game.ensure_live()?;
    game.score.theirs += 1;
    goal_scored(game, now);
    Ok(game.score)
}

/// Under golden goal any overtime goal ends the match.
fn goal_scored(game: &mut Game, now: DateTime<Utc>) {
    if game.clock.ends_on_first_goal() {
        log::info!("game {}: golden goal, match over", game.id);
        game.clock = clock::stop(&game.clock, now);
        game.completed = true;
    }
}

/// Freshly derived clock read.
pub fn read_clock(game: &Game, now: DateTime<Utc>) -> ClockSnapshot {
    clock::snapshot(&game.clock, now)
}
