//! # Glowkit Core Library
//!
//! This library provides the core logic for Glowkit, a wellness toolkit:
//! a color-harmony engine for outfit palette suggestions and a family of
//! phased timers (breathing sequencer, meditation countdown, workout
//! stopwatch). All operations are available via a standalone CLI binary;
//! any GUI would be a thin layer over the same core library.
//!
//! ## Architecture
//!
//! - **Color engine**: pure RGB/HSL conversion and harmony derivation,
//!   no side effects
//! - **Timer engines**: wall-clock-based state machines that require the
//!   caller to periodically invoke `tick()` for progress updates
//! - **Storage**: SQLite-based workout history and TOML-based configuration
//!
//! ## Key Components
//!
//! - [`generate_harmonies`]: base color to four related palettes
//! - [`BreathingSequencer`], [`MeditationCountdown`], [`WorkoutStopwatch`]:
//!   the timer state machines
//! - [`Database`], [`Config`]: persistence and configuration
//! - [`Event`]: every state change, serialized for the host

pub mod color;
pub mod cue;
pub mod error;
pub mod events;
pub mod storage;
pub mod timer;

pub use color::{generate_harmonies, generate_harmonies_hex, HarmonySet, Hsl, Rgb, Scheme};
pub use cue::{Cue, CueSink};
pub use error::{ColorError, ConfigError, CoreError, DatabaseError};
pub use events::Event;
pub use storage::{Config, Database, WorkoutStats};
pub use timer::{
    BreathPhase, BreathingSequencer, MeditationCountdown, PhaseTable, TimerKind, TimerState,
    WorkoutStopwatch,
};
