//! Workout stopwatch.
//!
//! Counts upward while running, with pause/resume, lap capture, and reset.
//! Observed elapsed time is always derived from the wall clock
//! (`now - last resume + previously accumulated`), never from summed tick
//! deltas, so scheduling jitter cannot compound.
//!
//! Whole elapsed minutes are credited to a lifetime workout counter on
//! `reset()` only -- pausing indefinitely never credits minutes. The
//! credit is reported in the reset event for the host to persist.

use serde::{Deserialize, Serialize};

use super::{now_ms, TimerKind, TimerState};
use crate::events::Event;

/// Count-up stopwatch with lap capture.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WorkoutStopwatch {
    #[serde(default)]
    state: TimerState,
    /// Elapsed up to the last flush.
    elapsed_ms: u64,
    /// Captured elapsed snapshots, appended only while running.
    laps: Vec<u64>,
    #[serde(default)]
    last_tick_epoch_ms: Option<u64>,
}

impl WorkoutStopwatch {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> TimerState {
        self.state
    }

    pub fn laps(&self) -> &[u64] {
        &self.laps
    }

    /// Elapsed as of the last command or tick.
    pub fn elapsed_ms(&self) -> u64 {
        self.elapsed_ms
    }

    /// Live elapsed at `now`, without mutating state.
    pub fn elapsed_ms_at(&self, now: u64) -> u64 {
        match self.last_tick_epoch_ms {
            Some(last) if self.state == TimerState::Running => {
                self.elapsed_ms + now.saturating_sub(last)
            }
            _ => self.elapsed_ms,
        }
    }

    pub fn snapshot(&self) -> Event {
        Event::StopwatchSnapshot {
            state: self.state,
            elapsed_ms: self.elapsed_ms,
            laps: self.laps.clone(),
            at: chrono::Utc::now(),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    pub fn start(&mut self) -> Option<Event> {
        self.start_at(now_ms())
    }

    /// Start fresh from `Idle` or continue from a paused offset.
    /// A second start on a running stopwatch is a no-op: elapsed stays
    /// continuous, nothing jumps or resets.
    pub fn start_at(&mut self, now: u64) -> Option<Event> {
        match self.state {
            TimerState::Idle => {
                self.state = TimerState::Running;
                self.last_tick_epoch_ms = Some(now);
                Some(Event::TimerStarted {
                    timer: TimerKind::Workout,
                    at: chrono::Utc::now(),
                })
            }
            TimerState::Paused => {
                self.state = TimerState::Running;
                self.last_tick_epoch_ms = Some(now);
                Some(Event::TimerResumed {
                    timer: TimerKind::Workout,
                    elapsed_ms: self.elapsed_ms,
                    at: chrono::Utc::now(),
                })
            }
            TimerState::Running | TimerState::Complete => None,
        }
    }

    pub fn pause(&mut self) -> Option<Event> {
        self.pause_at(now_ms())
    }

    /// Freeze elapsed. No minutes are credited here; only reset credits.
    pub fn pause_at(&mut self, now: u64) -> Option<Event> {
        if self.state != TimerState::Running {
            return None;
        }
        self.flush_elapsed(now);
        self.state = TimerState::Paused;
        self.last_tick_epoch_ms = None;
        Some(Event::TimerPaused {
            timer: TimerKind::Workout,
            elapsed_ms: self.elapsed_ms,
            at: chrono::Utc::now(),
        })
    }

    pub fn lap(&mut self) -> Option<Event> {
        self.lap_at(now_ms())
    }

    /// Capture the current elapsed value. Valid only while running;
    /// lapping a paused or idle stopwatch leaves the lap list unchanged.
    pub fn lap_at(&mut self, now: u64) -> Option<Event> {
        if self.state != TimerState::Running {
            return None;
        }
        self.flush_elapsed(now);
        self.laps.push(self.elapsed_ms);
        Some(Event::LapRecorded {
            lap_index: self.laps.len(),
            elapsed_ms: self.elapsed_ms,
            at: chrono::Utc::now(),
        })
    }

    pub fn reset(&mut self) -> Option<Event> {
        self.reset_at(now_ms())
    }

    /// Zero the stopwatch and discard laps. Whole elapsed minutes are
    /// credited in the returned event for the host to accumulate.
    pub fn reset_at(&mut self, now: u64) -> Option<Event> {
        if self.state == TimerState::Running {
            self.flush_elapsed(now);
        }
        let credited_min = self.elapsed_ms / 60_000;
        let laps_discarded = self.laps.len();

        self.state = TimerState::Idle;
        self.elapsed_ms = 0;
        self.laps.clear();
        self.last_tick_epoch_ms = None;

        Some(Event::StopwatchReset {
            credited_min,
            laps_discarded,
            at: chrono::Utc::now(),
        })
    }

    pub fn tick(&mut self) -> Option<Event> {
        self.tick_at(now_ms())
    }

    /// Refresh elapsed from the wall clock. Never produces an event;
    /// the stopwatch has no phases to cross.
    pub fn tick_at(&mut self, now: u64) -> Option<Event> {
        if self.state == TimerState::Running {
            self.flush_elapsed(now);
        }
        None
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn flush_elapsed(&mut self, now: u64) {
        if let Some(last) = self.last_tick_epoch_ms {
            self.elapsed_ms += now.saturating_sub(last);
            self.last_tick_epoch_ms = Some(now);
        }
    }
}
