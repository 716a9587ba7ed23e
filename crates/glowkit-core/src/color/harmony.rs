//! Color harmony derivation.
//!
//! Given one base color, deterministically derive four related palettes by
//! rotating or softening its hue/saturation/lightness. Labels and mood
//! descriptions are fixed presentation constants per scheme, not computed.

use serde::{Deserialize, Serialize};

use super::convert::{Hsl, Rgb};
use crate::error::ColorError;

/// The four derivation rules, in presentation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scheme {
    Complementary,
    Analogous,
    Triadic,
    Pastel,
}

impl Scheme {
    pub fn label(self) -> &'static str {
        match self {
            Scheme::Complementary => "Complementary Contrast",
            Scheme::Analogous => "Analogous Harmony",
            Scheme::Triadic => "Triadic Balance",
            Scheme::Pastel => "Soft Pastel Mix",
        }
    }

    pub fn mood(self) -> &'static str {
        match self {
            Scheme::Complementary => {
                "Bold & Dynamic - Creates striking visual impact and energy"
            }
            Scheme::Analogous => {
                "Peaceful & Cohesive - Creates gentle, harmonious combinations"
            }
            Scheme::Triadic => {
                "Vibrant & Balanced - Perfect for playful, creative expressions"
            }
            Scheme::Pastel => {
                "Gentle & Dreamy - Ideal for romantic, feminine aesthetics"
            }
        }
    }
}

/// A group of related colors with its scheme label and mood description.
///
/// Produced fresh on each request; never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HarmonySet {
    pub scheme: Scheme,
    pub label: String,
    pub mood: String,
    pub colors: Vec<Rgb>,
}

impl HarmonySet {
    fn new(scheme: Scheme, colors: Vec<Rgb>) -> Self {
        Self {
            scheme,
            label: scheme.label().to_string(),
            mood: scheme.mood().to_string(),
            colors,
        }
    }

    /// The palette as lowercase hex strings.
    pub fn hex_colors(&self) -> Vec<String> {
        self.colors.iter().map(|c| c.to_hex()).collect()
    }
}

/// Derive the four harmony sets for a base color, in fixed order:
/// complementary, analogous, triadic, pastel.
///
/// All rotations preserve the base saturation and lightness; the pastel
/// variant keeps the hue and softens saturation/lightness within floors
/// and ceilings so the palette never washes out entirely.
pub fn generate_harmonies(base: Rgb) -> Vec<HarmonySet> {
    let Hsl { h, s, l } = base.to_hsl();
    let rotate = |deg: u16| Hsl::new((h + deg) % 360, s, l).to_rgb();

    vec![
        HarmonySet::new(Scheme::Complementary, vec![base, rotate(180)]),
        HarmonySet::new(Scheme::Analogous, vec![base, rotate(30), rotate(330)]),
        HarmonySet::new(Scheme::Triadic, vec![base, rotate(120), rotate(240)]),
        HarmonySet::new(
            Scheme::Pastel,
            vec![
                base,
                Hsl::new(h, s.saturating_sub(20).max(20), (l + 20).min(90)).to_rgb(),
                Hsl::new(h, s.saturating_sub(30).max(15), (l + 30).min(95)).to_rgb(),
            ],
        ),
    ]
}

/// Parse a `#RRGGBB` string and derive its harmonies.
///
/// Malformed input is propagated, never papered over with a fallback color.
pub fn generate_harmonies_hex(input: &str) -> Result<Vec<HarmonySet>, ColorError> {
    Ok(generate_harmonies(Rgb::from_hex(input)?))
}

/// A fixed, named palette with a mood description.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct PresetPalette {
    pub name: &'static str,
    pub colors: [&'static str; 3],
    pub mood: &'static str,
}

/// The built-in palette library shown alongside generated harmonies.
pub const PRESET_PALETTES: [PresetPalette; 6] = [
    PresetPalette {
        name: "warm",
        colors: ["#FFB6C1", "#FFDAB9", "#F0E68C"],
        mood: "Energetic & Cheerful - Perfect for boosting confidence and spreading positivity",
    },
    PresetPalette {
        name: "cool",
        colors: ["#B0E0E6", "#E6E6FA", "#D8BFD8"],
        mood: "Calm & Serene - Ideal for peaceful moments and professional settings",
    },
    PresetPalette {
        name: "neutral",
        colors: ["#F5F5DC", "#E6E6E6", "#D2B48C"],
        mood: "Sophisticated & Timeless - Great for versatile, elegant looks",
    },
    PresetPalette {
        name: "pastel",
        colors: ["#FFE4E1", "#E0FFFF", "#F0FFF0"],
        mood: "Soft & Romantic - Perfect for gentle, dreamy aesthetics",
    },
    PresetPalette {
        name: "earthy",
        colors: ["#DEB887", "#D2691E", "#CD853F"],
        mood: "Grounded & Natural - Excellent for cozy, autumn-inspired outfits",
    },
    PresetPalette {
        name: "vibrant",
        colors: ["#FF69B4", "#00CED1", "#FFD700"],
        mood: "Bold & Confident - Great for making a statement and standing out",
    },
];

/// Rotating style tips surfaced by the CLI.
pub const STYLE_TIPS: [&str; 10] = [
    "Layer pastel accessories to brighten any outfit",
    "Mix textures like silk and cotton for visual interest",
    "Add a pop of color with your favorite scarf",
    "Invest in quality basics that make you feel confident",
    "Experiment with different silhouettes to find your favorites",
    "Don't forget to accessorize with jewelry that speaks to you",
    "Comfort is key - choose pieces you love to wear",
    "Try the rule of three: pick three colors max per outfit",
    "Balance loose fits with fitted pieces for a flattering look",
    "Your smile is the best accessory you can wear",
];
