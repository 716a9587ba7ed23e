use clap::Subcommand;
use glowkit_core::cue::{select_sink, Cue};
use glowkit_core::storage::{Config, Database};
use glowkit_core::{Event, MeditationCountdown};

const ENGINE_KEY: &str = "meditation_engine";

#[derive(Subcommand)]
pub enum MeditateAction {
    /// Start (or resume) a meditation session
    Start {
        /// Session length in seconds (300/600/900/1200); out-of-range
        /// values fall back to the configured default
        #[arg(long)]
        secs: Option<u64>,
    },
    /// Pause the session
    Pause,
    /// Reset to the configured duration
    Reset,
    /// Tick the countdown and print the current state as JSON
    Status,
}

fn load_engine(db: &Database, config: &Config) -> MeditationCountdown {
    if let Ok(Some(json)) = db.kv_get(ENGINE_KEY) {
        if let Ok(engine) = serde_json::from_str::<MeditationCountdown>(&json) {
            return engine;
        }
    }
    MeditationCountdown::new(config.meditation.default_secs)
}

fn save_engine(
    db: &Database,
    engine: &MeditationCountdown,
) -> Result<(), Box<dyn std::error::Error>> {
    let json = serde_json::to_string(engine)?;
    db.kv_set(ENGINE_KEY, &json)?;
    Ok(())
}

pub fn run(action: MeditateAction) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let db = Database::open()?;
    let mut engine = load_engine(&db, &config);

    match action {
        MeditateAction::Start { secs } => {
            if let Some(secs) = secs {
                // Honored only while idle; invalid presets fall back.
                engine.set_duration_secs(secs);
            }
            if let Some(event) = engine.start() {
                println!("{}", serde_json::to_string_pretty(&event)?);
            } else {
                println!("{}", serde_json::to_string_pretty(&engine.snapshot())?);
            }
        }
        MeditateAction::Pause => {
            if let Some(event) = engine.pause() {
                println!("{}", serde_json::to_string_pretty(&event)?);
            } else {
                println!("{}", serde_json::to_string_pretty(&engine.snapshot())?);
            }
        }
        MeditateAction::Reset => {
            if let Some(event) = engine.reset() {
                println!("{}", serde_json::to_string_pretty(&event)?);
            }
        }
        MeditateAction::Status => {
            let completed = engine.tick();
            println!("{}", serde_json::to_string_pretty(&engine.snapshot())?);
            if let Some(event) = completed {
                if matches!(event, Event::CountdownCompleted { .. }) {
                    select_sink(config.cues.audio).cue(Cue::SessionComplete);
                }
                println!("{}", serde_json::to_string_pretty(&event)?);
            }
        }
    }

    save_engine(&db, &engine)?;
    Ok(())
}
