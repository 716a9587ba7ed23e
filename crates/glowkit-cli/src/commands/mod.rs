pub mod breathe;
pub mod config;
pub mod meditate;
pub mod palette;
pub mod stats;
pub mod stopwatch;
