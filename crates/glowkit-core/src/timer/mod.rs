//! Wellness timer engines.
//!
//! All engines are wall-clock-based state machines. None uses internal
//! threads - the caller is responsible for calling `tick()` periodically.
//! Commands and ticks return `Option<Event>`; `snapshot()` returns a full
//! state event for rendering.
//!
//! Every time-sensitive operation has an `*_at(now_ms)` form taking an
//! explicit epoch-millisecond timestamp; the plain form reads the system
//! clock. Hosts replaying history and tests both drive the `_at` variants.

mod breathing;
mod countdown;
mod stopwatch;

pub use breathing::{BreathPhase, BreathingSequencer, PhaseTable};
pub use countdown::{MeditationCountdown, COUNTDOWN_PRESETS_SECS, DEFAULT_COUNTDOWN_SECS};
pub use stopwatch::WorkoutStopwatch;

use serde::{Deserialize, Serialize};

/// Shared state shape across all engines.
///
/// ```text
/// Idle -> Running <-> Paused -> Idle
/// Running -> Complete            (countdown only, automatic at zero)
/// ```
///
/// Reset from any state returns to `Idle` with elapsed cleared. `Complete`
/// is terminal until reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerState {
    #[default]
    Idle,
    Running,
    Paused,
    Complete,
}

/// Which engine an event refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerKind {
    Breathing,
    Meditation,
    Workout,
}

pub(crate) fn now_ms() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}
