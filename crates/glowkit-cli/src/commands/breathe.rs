use clap::Subcommand;
use glowkit_core::cue::{select_sink, Cue};
use glowkit_core::storage::{Config, Database};
use glowkit_core::{BreathingSequencer, Event};

const ENGINE_KEY: &str = "breathing_engine";

#[derive(Subcommand)]
pub enum BreatheAction {
    /// Start (or resume) the breathing cycle
    Start,
    /// Pause the cycle
    Pause,
    /// Stop and clear the cycle
    Reset,
    /// Tick the sequencer and print the current state as JSON
    Status,
}

fn load_engine(db: &Database, config: &Config) -> BreathingSequencer {
    if let Ok(Some(json)) = db.kv_get(ENGINE_KEY) {
        if let Ok(engine) = serde_json::from_str::<BreathingSequencer>(&json) {
            return engine;
        }
    }
    BreathingSequencer::new(config.breathing.phases)
}

fn save_engine(db: &Database, engine: &BreathingSequencer) -> Result<(), Box<dyn std::error::Error>> {
    let json = serde_json::to_string(engine)?;
    db.kv_set(ENGINE_KEY, &json)?;
    Ok(())
}

pub fn run(action: BreatheAction) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let db = Database::open()?;
    let mut engine = load_engine(&db, &config);

    match action {
        BreatheAction::Start => {
            if let Some(event) = engine.start() {
                println!("{}", serde_json::to_string_pretty(&event)?);
            } else {
                println!("{}", serde_json::to_string_pretty(&engine.snapshot())?);
            }
        }
        BreatheAction::Pause => {
            if let Some(event) = engine.pause() {
                println!("{}", serde_json::to_string_pretty(&event)?);
            } else {
                println!("{}", serde_json::to_string_pretty(&engine.snapshot())?);
            }
        }
        BreatheAction::Reset => {
            if let Some(event) = engine.reset() {
                println!("{}", serde_json::to_string_pretty(&event)?);
            }
        }
        BreatheAction::Status => {
            let crossed = engine.tick();
            println!("{}", serde_json::to_string_pretty(&engine.snapshot())?);
            if let Some(event) = crossed {
                if let Event::PhaseChanged { phase, .. } = event {
                    select_sink(config.cues.audio).cue(Cue::PhaseShift(phase));
                }
                println!("{}", serde_json::to_string_pretty(&event)?);
            }
        }
    }

    save_engine(&db, &engine)?;
    Ok(())
}
