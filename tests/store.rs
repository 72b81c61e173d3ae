//! Integration tests for the game store's optimistic concurrency.

use chrono::{Duration, Utc};
use match_console_web::{
    pause_clock, read_clock, start_clock, ClockSettings, ClockStatus, Game, MatchError, MatchStore,
};
use std::cell::Cell;
use std::sync::Arc;
use std::thread;
use uuid::Uuid;

fn store_with_game() -> (MatchStore, Uuid) {
    let store = MatchStore::new();
    let game = Game::new(Uuid::new_v4(), ClockSettings::default()).unwrap();
    let id = store.insert(game).unwrap();
    (store, id)
}

#[test]
fn unknown_game_is_not_found() {
    let store = MatchStore::new();
    let id = Uuid::new_v4();
    assert_eq!(store.get(id).unwrap_err(), MatchError::NotFound(id));
    assert_eq!(
        store.update(id, |g| start_clock(g, Utc::now())).unwrap_err(),
        MatchError::NotFound(id)
    );
}

#[test]
fn committed_writes_bump_the_version() {
    let (store, id) = store_with_game();
    assert_eq!(store.version(id).unwrap(), 0);
    store.update(id, |g| start_clock(g, Utc::now())).unwrap();
    assert_eq!(store.version(id).unwrap(), 1);
    assert_eq!(
        store.read(id, |g| g.clock.status()).unwrap(),
        ClockStatus::Running
    );
}

#[test]
fn failed_operation_writes_nothing() {
    let (store, id) = store_with_game();
    let err = store.update(id, |g| pause_clock(g, Utc::now())).unwrap_err();
    assert!(matches!(err, MatchError::InvalidTransition(_)));
    assert_eq!(store.version(id).unwrap(), 0);
}

#[test]
fn reads_do_not_mutate() {
    let (store, id) = store_with_game();
    store.update(id, |g| start_clock(g, Utc::now())).unwrap();
    for _ in 0..10 {
        store.read(id, |g| read_clock(g, Utc::now())).unwrap();
    }
    assert_eq!(store.version(id).unwrap(), 1);
}

#[test]
fn concurrent_write_is_retried_on_fresh_state() {
    let (store, id) = store_with_game();
    let started = Utc::now() - Duration::seconds(30);
    store.update(id, |g| start_clock(g, started)).unwrap();

    let calls = Cell::new(0);
    let now = Utc::now();
    let snap = store
        .update(id, |g| {
            calls.set(calls.get() + 1);
            if calls.get() == 1 {
                // Another client pauses between our read and our commit.
                store.update(id, |other| pause_clock(other, now)).unwrap();
            }
            pause_clock(g, now)
        })
        .unwrap();

    assert_eq!(calls.get(), 2);
    assert_eq!(snap.state, ClockStatus::Paused);
    // The elapsed time was subtracted once, not twice.
    let baseline = store.read(id, |g| g.clock.run.baseline_ms()).unwrap();
    assert_eq!(baseline, snap.derived_remaining_ms);
    assert!((569_000..=570_000).contains(&baseline));
    assert_eq!(store.version(id).unwrap(), 3);
}

#[test]
fn repeated_conflict_is_surfaced() {
    let (store, id) = store_with_game();
    let err = store
        .update(id, |g| {
            store
                .update(id, |other| {
                    other.score.theirs += 1;
                    Ok(())
                })
                .unwrap();
            start_clock(g, Utc::now())
        })
        .unwrap_err();
    assert_eq!(err, MatchError::Conflict(id));
    assert_eq!(store.read(id, |g| g.score.theirs).unwrap(), 2);
    assert_eq!(
        store.read(id, |g| g.clock.status()).unwrap(),
        ClockStatus::Stopped
    );
}

#[test]
fn parallel_pauses_subtract_elapsed_time_once() {
    let (store, id) = store_with_game();
    let started = Utc::now() - Duration::seconds(60);
    store.update(id, |g| start_clock(g, started)).unwrap();
    let pause_at = Utc::now();

    let store = Arc::new(store);
    let handles: Vec<_> = (0..8)
        .map(|_| {
            let store = Arc::clone(&store);
            thread::spawn(move || store.update(id, |g| pause_clock(g, pause_at)))
        })
        .collect();
    for h in handles {
        match h.join().unwrap() {
            Ok(snap) => assert_eq!(snap.state, ClockStatus::Paused),
            Err(e) => assert_eq!(e, MatchError::Conflict(id)),
        }
    }

    let expected = 600_000 - (pause_at - started).num_milliseconds() as u64;
    assert_eq!(
        store.read(id, |g| g.clock.run.baseline_ms()).unwrap(),
        expected
    );
}
