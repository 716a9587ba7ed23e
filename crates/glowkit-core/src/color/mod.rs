mod convert;
mod harmony;

pub use convert::{Hsl, Rgb};
pub use harmony::{
    generate_harmonies, generate_harmonies_hex, HarmonySet, PresetPalette, Scheme,
    PRESET_PALETTES, STYLE_TIPS,
};
