use clap::Subcommand;
use glowkit_core::cue::{select_sink, Cue};
use glowkit_core::storage::{Config, Database};
use glowkit_core::{Event, WorkoutStopwatch};

const ENGINE_KEY: &str = "stopwatch_engine";

#[derive(Subcommand)]
pub enum StopwatchAction {
    /// Start (or resume) the stopwatch
    Start,
    /// Pause, preserving elapsed time
    Pause,
    /// Capture a lap (running stopwatch only)
    Lap,
    /// Zero the stopwatch; whole elapsed minutes are credited to the
    /// workout history
    Reset,
    /// Tick the stopwatch and print the current state as JSON
    Status,
}

fn load_engine(db: &Database) -> WorkoutStopwatch {
    if let Ok(Some(json)) = db.kv_get(ENGINE_KEY) {
        if let Ok(engine) = serde_json::from_str::<WorkoutStopwatch>(&json) {
            return engine;
        }
    }
    WorkoutStopwatch::new()
}

fn save_engine(db: &Database, engine: &WorkoutStopwatch) -> Result<(), Box<dyn std::error::Error>> {
    let json = serde_json::to_string(engine)?;
    db.kv_set(ENGINE_KEY, &json)?;
    Ok(())
}

pub fn run(action: StopwatchAction) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let db = Database::open()?;
    let mut engine = load_engine(&db);

    match action {
        StopwatchAction::Start => {
            if let Some(event) = engine.start() {
                println!("{}", serde_json::to_string_pretty(&event)?);
            } else {
                println!("{}", serde_json::to_string_pretty(&engine.snapshot())?);
            }
        }
        StopwatchAction::Pause => {
            if let Some(event) = engine.pause() {
                println!("{}", serde_json::to_string_pretty(&event)?);
            } else {
                println!("{}", serde_json::to_string_pretty(&engine.snapshot())?);
            }
        }
        StopwatchAction::Lap => {
            if let Some(event) = engine.lap() {
                select_sink(config.cues.audio).cue(Cue::LapMark);
                println!("{}", serde_json::to_string_pretty(&event)?);
            } else {
                // Lap while not running records nothing.
                println!("{}", serde_json::to_string_pretty(&engine.snapshot())?);
            }
        }
        StopwatchAction::Reset => {
            if let Some(event) = engine.reset() {
                if let Event::StopwatchReset {
                    credited_min,
                    laps_discarded,
                    at,
                } = &event
                {
                    if *credited_min > 0 {
                        db.record_workout(*credited_min, *laps_discarded as u64, *at)?;
                    }
                }
                println!("{}", serde_json::to_string_pretty(&event)?);
            }
        }
        StopwatchAction::Status => {
            engine.tick();
            println!("{}", serde_json::to_string_pretty(&engine.snapshot())?);
        }
    }

    save_engine(&db, &engine)?;
    Ok(())
}
