//! Possession tracking on a live game.

use crate::models::{Game, PlayerId, Possession, PossessionKind, PossessionResult, Result};
use chrono::{DateTime, Utc};

/// Open a possession in the clock's current period ("gained ball").
pub fn open_possession(
    game: &mut Game,
    kind: PossessionKind,
    player_id: Option<PlayerId>,
    now: DateTime<Utc>,
) -> Result<Possession> {
    game.ensure_live()?;
    let period = game.clock.period_mark();
    let (game_id, club_id) = (game.id, game.club_id);
    let possession = game
        .possessions
        .open(game_id, club_id, player_id, kind, period, now)?;
    Ok(possession.clone())
}

/// Close the open possession (goal, turnover, out of bounds, timeout, or period end).
pub fn close_possession(
    game: &mut Game,
    result: PossessionResult,
    now: DateTime<Utc>,
) -> Result<Possession> {
    let possession = game.possessions.close(result, now)?;
    log::debug!(
        "game {}: possession closed ({:?}) after {:?} ms",
        possession.game_id,
        result,
        possession.duration_ms
    );
    Ok(possession.clone())
}
