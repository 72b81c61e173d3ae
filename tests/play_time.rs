//! Integration tests for play-time reconstruction.

use match_console_web::{
    reconstruct_play_time, DataQualityWarning, PeriodLayout, PeriodMark, PlayerEvent,
    PlayerEventKind,
};
use proptest::prelude::*;

fn four_by_ten() -> PeriodLayout {
    PeriodLayout::regulation(4, 600)
}

fn sub_in(period: u8, time_remaining_secs: u32) -> PlayerEvent {
    PlayerEvent {
        kind: PlayerEventKind::In,
        period: PeriodMark::Regulation(period),
        time_remaining_secs,
    }
}

fn sub_out(period: u8, time_remaining_secs: u32) -> PlayerEvent {
    PlayerEvent {
        kind: PlayerEventKind::Out,
        period: PeriodMark::Regulation(period),
        time_remaining_secs,
    }
}

#[test]
fn starter_without_substitutions_plays_whole_game() {
    let pt = reconstruct_play_time(true, &[], &four_by_ten());
    assert_eq!(pt.seconds, 2400);
    assert_eq!(pt.total_game_seconds, 2400);
    assert!((pt.percent - 100.0).abs() < 1e-9);
    assert!(pt.warnings.is_empty());
}

#[test]
fn bench_player_without_substitutions_plays_nothing() {
    let pt = reconstruct_play_time(false, &[], &four_by_ten());
    assert_eq!(pt.seconds, 0);
    assert_eq!(pt.percent, 0.0);
}

#[test]
fn bench_player_subbed_in_mid_second_period() {
    let pt = reconstruct_play_time(false, &[sub_in(2, 300)], &four_by_ten());
    assert_eq!(pt.seconds, 1500);
    assert!((pt.percent - 62.5).abs() < 1e-9);
}

#[test]
fn starter_out_in_first_back_in_third() {
    let events = [sub_out(1, 400), sub_in(3, 100)];
    let pt = reconstruct_play_time(true, &events, &four_by_ten());
    assert_eq!(pt.seconds, 900);
    assert!(pt.warnings.is_empty());
}

#[test]
fn interval_spanning_period_boundary_needs_no_special_case() {
    // In with 60s left in period 1, out with 540s left in period 2: 60 + 60.
    let events = [sub_in(1, 60), sub_out(2, 540)];
    let pt = reconstruct_play_time(false, &events, &four_by_ten());
    assert_eq!(pt.seconds, 120);
}

#[test]
fn overtime_periods_extend_the_game() {
    let layout = four_by_ten().with_overtime(1, 300);
    assert_eq!(layout.total_seconds(), 2700);
    assert_eq!(layout.period_start(PeriodMark::Overtime(1)), Some(2400));

    let events = [PlayerEvent {
        kind: PlayerEventKind::In,
        period: PeriodMark::Overtime(1),
        time_remaining_secs: 200,
    }];
    let pt = reconstruct_play_time(false, &events, &layout);
    assert_eq!(pt.seconds, 200);

    let starter = reconstruct_play_time(true, &[], &layout);
    assert_eq!(starter.seconds, 2700);
}

#[test]
fn play_stopped_early_caps_the_game_length() {
    let layout = four_by_ten().with_overtime(1, 300).played_until(2440);
    assert_eq!(layout.total_seconds(), 2440);

    let starter = reconstruct_play_time(true, &[], &layout);
    assert_eq!(starter.seconds, 2440);
    assert!((starter.percent - 100.0).abs() < 1e-9);

    // Came on with 250s left in overtime, i.e. 10s after the final goal.
    let late = [PlayerEvent {
        kind: PlayerEventKind::In,
        period: PeriodMark::Overtime(1),
        time_remaining_secs: 250,
    }];
    let pt = reconstruct_play_time(false, &late, &layout);
    assert_eq!(pt.seconds, 0);
    assert!(matches!(
        pt.warnings.as_slice(),
        [DataQualityWarning::AfterPlayStopped { .. }]
    ));
}

#[test]
fn sub_in_while_on_court_keeps_running_interval() {
    let events = [sub_in(1, 300), sub_out(2, 600)];
    let pt = reconstruct_play_time(true, &events, &four_by_ten());
    assert_eq!(pt.seconds, 600);
    assert!(matches!(
        pt.warnings.as_slice(),
        [DataQualityWarning::InWhileOnCourt { .. }]
    ));
}

#[test]
fn sub_out_while_on_bench_credits_nothing() {
    let events = [sub_out(1, 500), sub_in(4, 100)];
    let pt = reconstruct_play_time(false, &events, &four_by_ten());
    assert_eq!(pt.seconds, 100);
    assert!(matches!(
        pt.warnings.as_slice(),
        [DataQualityWarning::OutWhileOnBench { .. }]
    ));
}

#[test]
fn event_outside_layout_is_skipped() {
    let events = [sub_out(5, 100)];
    let pt = reconstruct_play_time(true, &events, &four_by_ten());
    assert_eq!(pt.seconds, 2400);
    assert!(matches!(
        pt.warnings.as_slice(),
        [DataQualityWarning::PeriodOutsideGame { .. }]
    ));
}

#[test]
fn time_remaining_beyond_period_is_clamped() {
    let events = [sub_in(2, 900)];
    let pt = reconstruct_play_time(false, &events, &four_by_ten());
    // Clamped to the start of period 2.
    assert_eq!(pt.seconds, 1800);
    assert!(matches!(
        pt.warnings.as_slice(),
        [DataQualityWarning::TimeRemainingExceedsPeriod { period_secs: 600, .. }]
    ));
}

#[test]
fn unordered_events_do_not_run_the_clock_backwards() {
    let events = [sub_out(3, 300), sub_in(1, 300)];
    let pt = reconstruct_play_time(true, &events, &four_by_ten());
    // Out at 1500, then the late "in" is treated as happening at 1500 too.
    assert_eq!(pt.seconds, 1500 + 900);
    assert!(pt
        .warnings
        .iter()
        .any(|w| matches!(w, DataQualityWarning::OutOfOrder { .. })));
}

#[test]
fn empty_layout_gives_zero_percent() {
    let pt = reconstruct_play_time(true, &[], &PeriodLayout::regulation(0, 600));
    assert_eq!(pt.seconds, 0);
    assert_eq!(pt.percent, 0.0);
}

fn event_strategy() -> impl Strategy<Value = PlayerEvent> {
    (any::<bool>(), 1u8..=4, 0u32..=600).prop_map(|(is_in, period, remaining)| PlayerEvent {
        kind: if is_in {
            PlayerEventKind::In
        } else {
            PlayerEventKind::Out
        },
        period: PeriodMark::Regulation(period),
        time_remaining_secs: remaining,
    })
}

proptest! {
    #[test]
    fn play_time_never_exceeds_game_length(
        is_starting in any::<bool>(),
        mut events in prop::collection::vec(event_strategy(), 0..30),
    ) {
        events.sort_by_key(|e| (e.period, std::cmp::Reverse(e.time_remaining_secs)));
        let pt = reconstruct_play_time(is_starting, &events, &four_by_ten());
        prop_assert!(pt.seconds <= 2400);
        prop_assert!((0.0..=100.0).contains(&pt.percent));
        let has_out_of_order = pt.warnings.iter().any(|w| matches!(w, DataQualityWarning::OutOfOrder { .. }));
        prop_assert!(!has_out_of_order);
    }
}
