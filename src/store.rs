//! In-memory game store with optimistic concurrency.
//!
//! Reads take a shared lock and never mutate. Writes run the operation on a copy of
//! the game outside the lock, then commit only if the record's version is unchanged
//! since the copy was taken. On a version mismatch the operation is re-run once on
//! the fresh state; a second mismatch is reported as `MatchError::Conflict`.

use crate::models::{Game, GameId, MatchError, Result};
use std::collections::HashMap;
use std::sync::RwLock;

/// Attempts made by `update` before giving up with a conflict.
const WRITE_ATTEMPTS: usize = 2;

struct GameRecord {
    game: Game,
    version: u64,
}

#[derive(Default)]
pub struct MatchStore {
    games: RwLock<HashMap<GameId, GameRecord>>,
}

impl MatchStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a new game. Returns its id.
    pub fn insert(&self, game: Game) -> Result<GameId> {
        let id = game.id;
        let mut g = self.games.write().map_err(|_| MatchError::LockPoisoned)?;
        g.insert(id, GameRecord { game, version: 0 });
        Ok(id)
    }

    /// Run a read-only view over a game under the shared lock.
    pub fn read<T>(&self, id: GameId, view: impl FnOnce(&Game) -> T) -> Result<T> {
        let g = self.games.read().map_err(|_| MatchError::LockPoisoned)?;
        let record = g.get(&id).ok_or(MatchError::NotFound(id))?;
        Ok(view(&record.game))
    }

    /// Copy of the stored game.
    pub fn get(&self, id: GameId) -> Result<Game> {
        self.read(id, Game::clone)
    }

    /// Number of committed writes to a game.
    pub fn version(&self, id: GameId) -> Result<u64> {
        let g = self.games.read().map_err(|_| MatchError::LockPoisoned)?;
        g.get(&id)
            .map(|r| r.version)
            .ok_or(MatchError::NotFound(id))
    }

    /// Apply `op` to a game with compare-and-set on the record version.
    ///
    /// `op` may run more than once and must derive everything from the game it is given.
    /// An error from `op` aborts without writing.
    pub fn update<T>(&self, id: GameId, mut op: impl FnMut(&mut Game) -> Result<T>) -> Result<T> {
        for attempt in 1..=WRITE_ATTEMPTS {
            let (mut draft, expected) = {
                let g = self.games.read().map_err(|_| MatchError::LockPoisoned)?;
                let record = g.get(&id).ok_or(MatchError::NotFound(id))?;
                (record.game.clone(), record.version)
            };

            let out = op(&mut draft)?;

            let mut g = self.games.write().map_err(|_| MatchError::LockPoisoned)?;
            let record = g.get_mut(&id).ok_or(MatchError::NotFound(id))?;
            if record.version == expected {
                record.game = draft;
                record.version += 1;
                return Ok(out);
            }
            log::warn!(
                "game {}: concurrent write detected on attempt {} (expected version {}, found {})",
                id,
                attempt,
                expected,
                record.version
            );
        }
        Err(MatchError::Conflict(id))
    }
}
