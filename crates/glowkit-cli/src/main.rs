use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "glowkit-cli", version, about = "Glowkit CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Color harmony suggestions
    Palette {
        #[command(subcommand)]
        action: commands::palette::PaletteAction,
    },
    /// Breathing exercise sequencer
    Breathe {
        #[command(subcommand)]
        action: commands::breathe::BreatheAction,
    },
    /// Meditation countdown
    Meditate {
        #[command(subcommand)]
        action: commands::meditate::MeditateAction,
    },
    /// Workout stopwatch
    Stopwatch {
        #[command(subcommand)]
        action: commands::stopwatch::StopwatchAction,
    },
    /// Workout statistics
    Stats,
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn main() {
    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Palette { action } => commands::palette::run(action),
        Commands::Breathe { action } => commands::breathe::run(action),
        Commands::Meditate { action } => commands::meditate::run(action),
        Commands::Stopwatch { action } => commands::stopwatch::run(action),
        Commands::Stats => commands::stats::run(),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
