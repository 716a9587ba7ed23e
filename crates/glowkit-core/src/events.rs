use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::timer::{BreathPhase, TimerKind, TimerState};

/// Every state change in the system produces an Event.
/// The CLI prints them; a GUI host would poll for them.
///
/// Events are the callback surface of the timer engines: a host that would
/// otherwise register on-tick / on-phase-change / on-complete handlers instead
/// inspects the event returned by each command or tick.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    TimerStarted {
        timer: TimerKind,
        at: DateTime<Utc>,
    },
    TimerPaused {
        timer: TimerKind,
        elapsed_ms: u64,
        at: DateTime<Utc>,
    },
    TimerResumed {
        timer: TimerKind,
        elapsed_ms: u64,
        at: DateTime<Utc>,
    },
    TimerReset {
        timer: TimerKind,
        at: DateTime<Utc>,
    },
    /// Breathing sequencer crossed into a new phase.
    PhaseChanged {
        phase: BreathPhase,
        cycle: u32,
        at: DateTime<Utc>,
    },
    /// Meditation countdown reached zero (terminal until reset).
    CountdownCompleted {
        total_secs: u64,
        at: DateTime<Utc>,
    },
    /// Lap captured on a running stopwatch.
    LapRecorded {
        lap_index: usize,
        elapsed_ms: u64,
        at: DateTime<Utc>,
    },
    /// Stopwatch reset; whole elapsed minutes credited to the lifetime total.
    StopwatchReset {
        credited_min: u64,
        laps_discarded: usize,
        at: DateTime<Utc>,
    },
    BreathingSnapshot {
        state: TimerState,
        phase: BreathPhase,
        cycle: u32,
        phase_elapsed_ms: u64,
        phase_total_ms: u64,
        at: DateTime<Utc>,
    },
    CountdownSnapshot {
        state: TimerState,
        remaining_secs: u64,
        total_secs: u64,
        at: DateTime<Utc>,
    },
    StopwatchSnapshot {
        state: TimerState,
        elapsed_ms: u64,
        laps: Vec<u64>,
        at: DateTime<Utc>,
    },
}
