//! Session cues.
//!
//! Timers signal moments the user should notice: a breathing phase shift,
//! a completed meditation, a captured lap. How the signal is delivered is a
//! capability chosen once at construction -- an audio-capable host picks the
//! bell, everything else picks text. There is no runtime fallback branching
//! on caught audio failures.

use std::io::Write;

use crate::timer::BreathPhase;

/// A moment worth signaling to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cue {
    PhaseShift(BreathPhase),
    SessionComplete,
    LapMark,
}

/// Output capability for cues. Implementations decide the medium;
/// callers only announce the moment.
pub trait CueSink {
    fn cue(&mut self, cue: Cue);
}

/// Audio sink: rings the terminal bell, with a short text tag.
pub struct TerminalBell<W: Write> {
    out: W,
}

impl<W: Write> TerminalBell<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }
}

impl<W: Write> CueSink for TerminalBell<W> {
    fn cue(&mut self, cue: Cue) {
        let tag = match cue {
            Cue::PhaseShift(phase) => phase.prompt(),
            Cue::SessionComplete => "Session complete",
            Cue::LapMark => "Lap",
        };
        // BEL first so the sound lands even if the line is swallowed.
        let _ = writeln!(self.out, "\x07{tag}");
        let _ = self.out.flush();
    }
}

/// Visual sink: plain text only.
pub struct VisualCue<W: Write> {
    out: W,
}

impl<W: Write> VisualCue<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }
}

impl<W: Write> CueSink for VisualCue<W> {
    fn cue(&mut self, cue: Cue) {
        let line = match cue {
            Cue::PhaseShift(phase) => phase.prompt(),
            Cue::SessionComplete => "* Session complete *",
            Cue::LapMark => "-- lap --",
        };
        let _ = writeln!(self.out, "{line}");
        let _ = self.out.flush();
    }
}

/// Select a sink from configuration, once, at construction time.
pub fn select_sink(audio: bool) -> Box<dyn CueSink> {
    if audio {
        Box::new(TerminalBell::new(std::io::stderr()))
    } else {
        Box::new(VisualCue::new(std::io::stderr()))
    }
}
