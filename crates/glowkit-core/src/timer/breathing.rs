//! Breathing exercise sequencer.
//!
//! An infinite repeating cycle of timed phases:
//!
//! ```text
//! In (4 s) -> Hold (7 s) -> Out (8 s) -> Rest (2 s) -> In ...
//! ```
//!
//! A cycle counter increments each time the sequencer wraps back to `In`.
//! Phase advance happens inside `tick()` against the duration table, so
//! there is never a pending scheduled callback: reset is a single state
//! clear and a later tick cannot fire a stale transition.

use serde::{Deserialize, Serialize};

use super::{now_ms, TimerKind, TimerState};
use crate::events::Event;

/// Named phases of one breathing cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BreathPhase {
    In,
    Hold,
    Out,
    Rest,
}

impl BreathPhase {
    fn next(self) -> Self {
        match self {
            BreathPhase::In => BreathPhase::Hold,
            BreathPhase::Hold => BreathPhase::Out,
            BreathPhase::Out => BreathPhase::Rest,
            BreathPhase::Rest => BreathPhase::In,
        }
    }

    /// Prompt text for the phase.
    pub fn prompt(self) -> &'static str {
        match self {
            BreathPhase::In => "Breathe In...",
            BreathPhase::Hold => "Hold...",
            BreathPhase::Out => "Breathe Out...",
            BreathPhase::Rest => "Rest...",
        }
    }
}

/// Per-phase durations in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhaseTable {
    #[serde(default = "default_in_ms")]
    pub in_ms: u64,
    #[serde(default = "default_hold_ms")]
    pub hold_ms: u64,
    #[serde(default = "default_out_ms")]
    pub out_ms: u64,
    #[serde(default = "default_rest_ms")]
    pub rest_ms: u64,
}

fn default_in_ms() -> u64 {
    4000
}
fn default_hold_ms() -> u64 {
    7000
}
fn default_out_ms() -> u64 {
    8000
}
fn default_rest_ms() -> u64 {
    2000
}

impl PhaseTable {
    pub fn duration_ms(&self, phase: BreathPhase) -> u64 {
        match phase {
            BreathPhase::In => self.in_ms,
            BreathPhase::Hold => self.hold_ms,
            BreathPhase::Out => self.out_ms,
            BreathPhase::Rest => self.rest_ms,
        }
    }

    pub fn cycle_ms(&self) -> u64 {
        self.in_ms + self.hold_ms + self.out_ms + self.rest_ms
    }
}

impl Default for PhaseTable {
    fn default() -> Self {
        Self {
            in_ms: default_in_ms(),
            hold_ms: default_hold_ms(),
            out_ms: default_out_ms(),
            rest_ms: default_rest_ms(),
        }
    }
}

/// Repeating breathing sequencer.
///
/// Operates on wall-clock deltas -- no internal thread. The caller is
/// responsible for calling `tick()` periodically; runs until explicitly
/// stopped.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BreathingSequencer {
    table: PhaseTable,
    state: TimerState,
    phase: BreathPhase,
    /// Completed-or-current cycle number; 1 during the first cycle.
    cycle: u32,
    /// Time spent in the current phase up to the last flush.
    phase_elapsed_ms: u64,
    /// Epoch ms of the last flush while running.
    #[serde(default)]
    last_tick_epoch_ms: Option<u64>,
}

impl BreathingSequencer {
    pub fn new(table: PhaseTable) -> Self {
        Self {
            table,
            state: TimerState::Idle,
            phase: BreathPhase::In,
            cycle: 0,
            phase_elapsed_ms: 0,
            last_tick_epoch_ms: None,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> TimerState {
        self.state
    }

    pub fn phase(&self) -> BreathPhase {
        self.phase
    }

    pub fn cycle(&self) -> u32 {
        self.cycle
    }

    pub fn table(&self) -> &PhaseTable {
        &self.table
    }

    pub fn snapshot(&self) -> Event {
        Event::BreathingSnapshot {
            state: self.state,
            phase: self.phase,
            cycle: self.cycle,
            phase_elapsed_ms: self.phase_elapsed_ms,
            phase_total_ms: self.table.duration_ms(self.phase),
            at: chrono::Utc::now(),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    pub fn start(&mut self) -> Option<Event> {
        self.start_at(now_ms())
    }

    /// Start from `Idle` (fresh cycle) or resume from `Paused`.
    /// A start while already running is a no-op.
    pub fn start_at(&mut self, now: u64) -> Option<Event> {
        match self.state {
            TimerState::Idle => {
                self.state = TimerState::Running;
                self.phase = BreathPhase::In;
                self.cycle = 1;
                self.phase_elapsed_ms = 0;
                self.last_tick_epoch_ms = Some(now);
                Some(Event::TimerStarted {
                    timer: TimerKind::Breathing,
                    at: chrono::Utc::now(),
                })
            }
            TimerState::Paused => {
                self.state = TimerState::Running;
                self.last_tick_epoch_ms = Some(now);
                Some(Event::TimerResumed {
                    timer: TimerKind::Breathing,
                    elapsed_ms: self.phase_elapsed_ms,
                    at: chrono::Utc::now(),
                })
            }
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
        self.flush_elapsed(now);
        self.state = TimerState::Paused;
        self.last_tick_epoch_ms = None;
        Some(Event::TimerPaused {
            timer: TimerKind::Breathing,
            elapsed_ms: self.phase_elapsed_ms,
            at: chrono::Utc::now(),
        })
    }

    /// Stop and clear. Any phase transition that would have been due later
    /// is dropped with the cleared state.
    pub fn reset(&mut self) -> Option<Event> {
        self.state = TimerState::Idle;
        self.phase = BreathPhase::In;
        self.cycle = 0;
        self.phase_elapsed_ms = 0;
        self.last_tick_epoch_ms = None;
        Some(Event::TimerReset {
            timer: TimerKind::Breathing,
            at: chrono::Utc::now(),
        })
    }

    pub fn tick(&mut self) -> Option<Event> {
        self.tick_at(now_ms())
    }

    /// Advance zero or more phases. Overshoot past a phase boundary is
    /// carried into the next phase, so displayed progress never drifts
    /// from wall-clock time. Returns the newest phase crossing, if any.
    pub fn tick_at(&mut self, now: u64) -> Option<Event> {
        if self.state != TimerState::Running {
            return None;
        }
        self.flush_elapsed(now);

        // With a positive cycle length the advance loop always terminates:
        // every wrap drains at least one millisecond. An all-zero table
        // would spin forever, so refuse to advance at all.
        if self.table.cycle_ms() == 0 {
            return None;
        }

        let mut advanced = false;
        while self.phase_elapsed_ms >= self.table.duration_ms(self.phase) {
            self.phase_elapsed_ms -= self.table.duration_ms(self.phase);
            self.phase = self.phase.next();
            if self.phase == BreathPhase::In {
                self.cycle += 1;
            }
            advanced = true;
        }

        if advanced {
            Some(Event::PhaseChanged {
                phase: self.phase,
                cycle: self.cycle,
                at: chrono::Utc::now(),
            })
        } else {
            None
        }
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn flush_elapsed(&mut self, now: u64) {
        if let Some(last) = self.last_tick_epoch_ms {
            self.phase_elapsed_ms += now.saturating_sub(last);
            self.last_tick_epoch_ms = Some(now);
        }
    }
}

impl Default for BreathingSequencer {
    fn default() -> Self {
        Self::new(PhaseTable::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phases_advance_through_the_cycle() {
        let mut seq = BreathingSequencer::default();
        assert!(seq.start_at(0).is_some());
        assert_eq!(seq.phase(), BreathPhase::In);
        assert_eq!(seq.cycle(), 1);

        assert!(matches!(
            seq.tick_at(4000),
            Some(Event::PhaseChanged { phase: BreathPhase::Hold, .. })
        ));
        assert!(seq.tick_at(5000).is_none());
        assert!(matches!(
            seq.tick_at(11_000),
            Some(Event::PhaseChanged { phase: BreathPhase::Out, .. })
        ));
        assert!(matches!(
            seq.tick_at(19_000),
            Some(Event::PhaseChanged { phase: BreathPhase::Rest, .. })
        ));
    }

    #[test]
    fn cycle_increments_on_wrap() {
        let mut seq = BreathingSequencer::default();
        seq.start_at(0);
        // One full cycle is 21 s.
        let event = seq.tick_at(21_000);
        assert!(matches!(
            event,
            Some(Event::PhaseChanged { phase: BreathPhase::In, cycle: 2, .. })
        ));
        assert_eq!(seq.cycle(), 2);
    }

    #[test]
    fn overshoot_carries_into_next_phase() {
        let mut seq = BreathingSequencer::default();
        seq.start_at(0);
        // 5.5 s is 1.5 s into Hold.
        seq.tick_at(5500);
        assert_eq!(seq.phase(), BreathPhase::Hold);
        // At 11 s the carried 1.5 s means Hold completes exactly.
        seq.tick_at(11_000);
        assert_eq!(seq.phase(), BreathPhase::Out);
    }

    #[test]
    fn a_sparse_tick_skips_multiple_phases() {
        let mut seq = BreathingSequencer::default();
        seq.start_at(0);
        // Jump straight past In and Hold into Out.
        let event = seq.tick_at(12_000);
        assert!(matches!(
            event,
            Some(Event::PhaseChanged { phase: BreathPhase::Out, .. })
        ));
    }

    #[test]
    fn start_while_running_is_a_noop() {
        let mut seq = BreathingSequencer::default();
        seq.start_at(0);
        seq.tick_at(4000);
        assert_eq!(seq.phase(), BreathPhase::Hold);
        assert!(seq.start_at(4500).is_none());
        // State untouched: still in Hold, same cycle.
        assert_eq!(seq.phase(), BreathPhase::Hold);
        assert_eq!(seq.cycle(), 1);
    }

    #[test]
    fn reset_during_hold_cancels_pending_transition() {
        let mut seq = BreathingSequencer::default();
        seq.start_at(0);
        seq.tick_at(5000);
        assert_eq!(seq.phase(), BreathPhase::Hold);

        seq.reset();
        assert_eq!(seq.state(), TimerState::Idle);

        // Wait far past where the Out transition would have fired.
        assert!(seq.tick_at(60_000).is_none());
        assert_eq!(seq.state(), TimerState::Idle);
        assert_eq!(seq.phase(), BreathPhase::In);
        assert_eq!(seq.cycle(), 0);
    }

    #[test]
    fn pause_freezes_phase_progress() {
        let mut seq = BreathingSequencer::default();
        seq.start_at(0);
        seq.tick_at(2000);
        assert!(matches!(seq.pause_at(3000), Some(Event::TimerPaused { elapsed_ms: 3000, .. })));
        // Paused: wall-clock time passing changes nothing.
        assert!(seq.tick_at(50_000).is_none());
        assert_eq!(seq.phase(), BreathPhase::In);
        // Resume: 1 s more completes In.
        seq.start_at(100_000);
        assert!(matches!(
            seq.tick_at(101_000),
            Some(Event::PhaseChanged { phase: BreathPhase::Hold, .. })
        ));
    }

    #[test]
    fn all_zero_duration_table_never_advances() {
        let table = PhaseTable {
            in_ms: 0,
            hold_ms: 0,
            out_ms: 0,
            rest_ms: 0,
        };
        let mut seq = BreathingSequencer::new(table);
        seq.start_at(0);
        // Ticks terminate and leave the sequencer where it started.
        assert!(seq.tick_at(1000).is_none());
        assert!(seq.tick_at(60_000).is_none());
        assert_eq!(seq.phase(), BreathPhase::In);
        assert_eq!(seq.cycle(), 1);
    }

    #[test]
    fn zero_duration_phase_is_skipped() {
        let table = PhaseTable {
            in_ms: 4000,
            hold_ms: 0,
            out_ms: 8000,
            rest_ms: 2000,
        };
        let mut seq = BreathingSequencer::new(table);
        seq.start_at(0);
        // In completes at 4 s; the zero-length Hold passes straight
        // through to Out.
        let event = seq.tick_at(4000);
        assert!(matches!(
            event,
            Some(Event::PhaseChanged { phase: BreathPhase::Out, .. })
        ));
        assert!(matches!(
            seq.tick_at(12_000),
            Some(Event::PhaseChanged { phase: BreathPhase::Rest, .. })
        ));
    }

    #[test]
    fn pause_while_idle_is_a_noop() {
        let mut seq = BreathingSequencer::default();
        assert!(seq.pause_at(0).is_none());
        assert_eq!(seq.state(), TimerState::Idle);
    }
}
