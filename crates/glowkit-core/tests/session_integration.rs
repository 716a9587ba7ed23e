//! Integration tests for full timer sessions driven against the
//! database, mirroring what the CLI does across invocations: engines are
//! serialized to the kv store between steps and workout credits land in
//! the workouts table.

use glowkit_core::storage::Database;
use glowkit_core::{
    BreathPhase, BreathingSequencer, Event, MeditationCountdown, TimerState, WorkoutStopwatch,
};

/// Round-trip an engine through the kv store, as the CLI does between
/// invocations.
fn persist_and_reload<T>(db: &Database, key: &str, engine: &T) -> T
where
    T: serde::Serialize + for<'de> serde::Deserialize<'de>,
{
    db.kv_set(key, &serde_json::to_string(engine).unwrap()).unwrap();
    serde_json::from_str(&db.kv_get(key).unwrap().unwrap()).unwrap()
}

#[test]
fn breathing_session_survives_persistence() {
    let db = Database::open_memory().unwrap();
    let mut seq = BreathingSequencer::default();
    seq.start_at(0);
    seq.tick_at(5000);
    assert_eq!(seq.phase(), BreathPhase::Hold);

    // Reload mid-phase; progress continues from where it left off.
    let mut seq: BreathingSequencer = persist_and_reload(&db, "breathing_engine", &seq);
    assert_eq!(seq.phase(), BreathPhase::Hold);
    assert_eq!(seq.cycle(), 1);

    let event = seq.tick_at(11_000);
    assert!(matches!(
        event,
        Some(Event::PhaseChanged { phase: BreathPhase::Out, .. })
    ));
}

#[test]
fn full_meditation_session_completes_once() {
    let db = Database::open_memory().unwrap();
    let mut timer = MeditationCountdown::new(300);
    timer.start_at(0);

    // Tick once a second; completion fires exactly once, at the end.
    let mut completions = 0;
    for second in 1..=310u64 {
        let mut timer2: MeditationCountdown = persist_and_reload(&db, "meditation_engine", &timer);
        if let Some(Event::CountdownCompleted { .. }) = timer2.tick_at(second * 1000) {
            completions += 1;
        }
        timer = timer2;
    }

    assert_eq!(completions, 1);
    assert_eq!(timer.state(), TimerState::Complete);
    assert_eq!(timer.remaining_secs(), 0);
}

#[test]
fn workout_credits_accumulate_in_the_database() {
    let db = Database::open_memory().unwrap();
    let mut sw = WorkoutStopwatch::new();

    // Two sessions: 25 minutes and 40 minutes.
    for minutes in [25u64, 40] {
        sw.start_at(0);
        sw.lap_at(minutes * 30_000);
        let event = sw.reset_at(minutes * 60_000);
        if let Some(Event::StopwatchReset {
            credited_min,
            laps_discarded,
            at,
        }) = event
        {
            assert_eq!(credited_min, minutes);
            db.record_workout(credited_min, laps_discarded as u64, at).unwrap();
        } else {
            panic!("reset must produce a StopwatchReset event");
        }
    }

    let stats = db.workout_stats().unwrap();
    assert_eq!(stats.total_workouts, 2);
    assert_eq!(stats.total_minutes, 65);
}

#[test]
fn independent_timers_do_not_interact() {
    // Breathing, meditation, and stopwatch instances own their state
    // exclusively; driving one never moves another.
    let mut seq = BreathingSequencer::default();
    let mut countdown = MeditationCountdown::new(300);
    let mut sw = WorkoutStopwatch::new();

    seq.start_at(0);
    sw.start_at(0);
    seq.tick_at(10_000);
    sw.tick_at(10_000);

    assert_eq!(countdown.state(), TimerState::Idle);
    assert_eq!(countdown.remaining_secs(), 300);

    countdown.start_at(10_000);
    countdown.tick_at(15_000);
    assert_eq!(countdown.remaining_secs(), 295);
    assert_eq!(seq.phase(), BreathPhase::Hold);
    assert_eq!(sw.elapsed_ms(), 10_000);
}
