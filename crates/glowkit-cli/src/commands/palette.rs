use clap::Subcommand;
use glowkit_core::color::{generate_harmonies_hex, Rgb, PRESET_PALETTES, STYLE_TIPS};
use glowkit_core::storage::Database;

const TIP_INDEX_KEY: &str = "style_tip_index";

#[derive(Subcommand)]
pub enum PaletteAction {
    /// Derive harmony palettes from a base color
    Suggest {
        /// Base color as #RRGGBB
        hex: String,
    },
    /// Print the HSL form of a color
    Convert {
        /// Color as #RRGGBB
        hex: String,
    },
    /// List the built-in named palettes
    Presets,
    /// Print the next style tip
    Tip,
}

pub fn run(action: PaletteAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        PaletteAction::Suggest { hex } => {
            let harmonies = generate_harmonies_hex(&hex)?;
            println!("{}", serde_json::to_string_pretty(&harmonies)?);
        }
        PaletteAction::Convert { hex } => {
            let rgb = Rgb::from_hex(&hex)?;
            let hsl = rgb.to_hsl();
            println!(
                "{}",
                serde_json::to_string_pretty(&serde_json::json!({
                    "hex": rgb.to_hex(),
                    "rgb": rgb,
                    "hsl": hsl,
                }))?
            );
        }
        PaletteAction::Presets => {
            println!("{}", serde_json::to_string_pretty(&PRESET_PALETTES)?);
        }
        PaletteAction::Tip => {
            let db = Database::open()?;
            let index = db
                .kv_get(TIP_INDEX_KEY)?
                .and_then(|v| v.parse::<usize>().ok())
                .unwrap_or(0);
            println!("{}", STYLE_TIPS[index % STYLE_TIPS.len()]);
            db.kv_set(TIP_INDEX_KEY, &((index + 1) % STYLE_TIPS.len()).to_string())?;
        }
    }
    Ok(())
}
