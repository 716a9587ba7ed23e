//! Meditation countdown.
//!
//! A single configurable duration chosen from a fixed preset list,
//! decremented once per elapsed second. Unlike the other engines it does
//! not recompute remaining time from the start epoch: it must stop exactly
//! at zero regardless of scheduling slack, so whole elapsed seconds are
//! drained from a millisecond accumulator instead.

use serde::{Deserialize, Serialize};

use super::{now_ms, TimerKind, TimerState};
use crate::events::Event;

/// Selectable session lengths, in seconds (5/10/15/20 minutes).
pub const COUNTDOWN_PRESETS_SECS: [u64; 4] = [300, 600, 900, 1200];

/// Fallback when a requested duration is not a preset.
pub const DEFAULT_COUNTDOWN_SECS: u64 = 600;

/// One-shot countdown with a terminal `Complete` state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeditationCountdown {
    state: TimerState,
    total_secs: u64,
    remaining_secs: u64,
    /// Sub-second remainder carried between ticks.
    carry_ms: u64,
    #[serde(default)]
    last_tick_epoch_ms: Option<u64>,
}

impl MeditationCountdown {
    /// Create a countdown for `requested_secs`.
    ///
    /// An out-of-range duration falls back to [`DEFAULT_COUNTDOWN_SECS`]
    /// rather than failing; this is the only implicit fallback in the
    /// library.
    pub fn new(requested_secs: u64) -> Self {
        let total_secs = if COUNTDOWN_PRESETS_SECS.contains(&requested_secs) {
            requested_secs
        } else {
            DEFAULT_COUNTDOWN_SECS
        };
        Self {
            state: TimerState::Idle,
            total_secs,
            remaining_secs: total_secs,
            carry_ms: 0,
            last_tick_epoch_ms: None,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> TimerState {
        self.state
    }

    pub fn total_secs(&self) -> u64 {
        self.total_secs
    }

    pub fn remaining_secs(&self) -> u64 {
        self.remaining_secs
    }

    pub fn snapshot(&self) -> Event {
        Event::CountdownSnapshot {
            state: self.state,
            remaining_secs: self.remaining_secs,
            total_secs: self.total_secs,
            at: chrono::Utc::now(),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Change the session length. Only honored while `Idle`; invalid
    /// values fall back to the default preset.
    pub fn set_duration_secs(&mut self, requested_secs: u64) {
        if self.state != TimerState::Idle {
            return;
        }
        *self = Self::new(requested_secs);
    }

    pub fn start(&mut self) -> Option<Event> {
        self.start_at(now_ms())
    }

    pub fn start_at(&mut self, now: u64) -> Option<Event> {
        match self.state {
            TimerState::Idle => {
                self.state = TimerState::Running;
                self.last_tick_epoch_ms = Some(now);
                Some(Event::TimerStarted {
                    timer: TimerKind::Meditation,
                    at: chrono::Utc::now(),
                })
            }
            TimerState::Paused => {
                self.state = TimerState::Running;
                self.last_tick_epoch_ms = Some(now);
                Some(Event::TimerResumed {
                    timer: TimerKind::Meditation,
                    elapsed_ms: (self.total_secs - self.remaining_secs) * 1000 + self.carry_ms,
                    at: chrono::Utc::now(),
                })
            }
            // Complete is terminal until reset.
            TimerState::Running | TimerState::Complete => None,
        }
    }

    pub fn pause(&mut self) -> Option<Event> {
        self.pause_at(now_ms())
    }

    pub fn pause_at(&mut self, now: u64) -> Option<Event> {
        if self.state != TimerState::Running {
            return None;
        }
        // Drain whole seconds first so the freeze point is accurate.
        let completed = self.drain_elapsed(now);
        self.state = TimerState::Paused;
        self.last_tick_epoch_ms = None;
        if completed {
            // Pausing exactly on the final second still completes.
            self.state = TimerState::Complete;
            return Some(Event::CountdownCompleted {
                total_secs: self.total_secs,
                at: chrono::Utc::now(),
            });
        }
        Some(Event::TimerPaused {
            timer: TimerKind::Meditation,
            elapsed_ms: (self.total_secs - self.remaining_secs) * 1000 + self.carry_ms,
            at: chrono::Utc::now(),
        })
    }

    pub fn reset(&mut self) -> Option<Event> {
        self.state = TimerState::Idle;
        self.remaining_secs = self.total_secs;
        self.carry_ms = 0;
        self.last_tick_epoch_ms = None;
        Some(Event::TimerReset {
            timer: TimerKind::Meditation,
            at: chrono::Utc::now(),
        })
    }

    pub fn tick(&mut self) -> Option<Event> {
        self.tick_at(now_ms())
    }

    /// Call periodically. Returns `Some(Event::CountdownCompleted)` once,
    /// when remaining reaches zero.
    pub fn tick_at(&mut self, now: u64) -> Option<Event> {
        if self.state != TimerState::Running {
            return None;
        }
        if self.drain_elapsed(now) {
            self.state = TimerState::Complete;
            self.last_tick_epoch_ms = None;
            return Some(Event::CountdownCompleted {
                total_secs: self.total_secs,
                at: chrono::Utc::now(),
            });
        }
        None
    }

    // ── Internal ─────────────────────────────────────────────────────

    /// Move wall-clock time into the accumulator and decrement whole
    /// seconds. Returns true when remaining hits zero.
    fn drain_elapsed(&mut self, now: u64) -> bool {
        if let Some(last) = self.last_tick_epoch_ms {
            self.carry_ms += now.saturating_sub(last);
            self.last_tick_epoch_ms = Some(now);
        }
        while self.carry_ms >= 1000 && self.remaining_secs > 0 {
            self.carry_ms -= 1000;
            self.remaining_secs -= 1;
        }
        self.remaining_secs == 0
    }
}

impl Default for MeditationCountdown {
    fn default() -> Self {
        Self::new(DEFAULT_COUNTDOWN_SECS)
    }
}
