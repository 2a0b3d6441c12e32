//! Color Palettes
//!
//! Preset hex palettes for the dashboard curves.

use super::ChartError;

/// A named palette of hex colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub name: &'static str,
    pub colors: &'static [&'static str],
}

/// All preset palettes.
pub const PALETTES: &[Palette] = &[
    Palette {
        name: "brown_blue_pastel",
        colors: &["#e0beb3", "#b3d5e0", "#beacf6"],
    },
    Palette {
        name: "brown_blue_vivid",
        colors: &["#f6beac", "#ace4fc", "#beacf6"],
    },
    Palette {
        name: "hillshade_glacier",
        colors: &["#f6beac", "#ffffff", "#33b5cb"],
    },
    Palette {
        name: "lines_jet_r",
        colors: &["#ffffff", "#d62728", "#1f77b4"],
    },
];

/// Look up a preset palette by name (case-insensitive).
pub fn palette(name: &str) -> Result<&'static Palette, ChartError> {
    let lower = name.to_lowercase();
    PALETTES
        .iter()
        .find(|p| p.name == lower)
        .ok_or_else(|| ChartError::UnknownPalette {
            name: name.to_string(),
            available: palette_names().join("', '"),
        })
}

/// Names of all preset palettes.
pub fn palette_names() -> Vec<&'static str> {
    PALETTES.iter().map(|p| p.name).collect()
}
