use std::collections::BTreeMap;

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.75, 0.55);
            let rgb: Srgb = hsl.into_color();
            Color32::from_rgb(
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            )
        })
        .collect()
}

/// Line colour of the monthly trend chart (`#90CAF9`).
pub const TREND_BLUE: Color32 = Color32::from_rgb(0x90, 0xCA, 0xF9);
pub const CASUAL_BLUE: Color32 = Color32::from_rgb(0x1F, 0x77, 0xB4);
pub const REGISTERED_ORANGE: Color32 = Color32::from_rgb(0xFF, 0x7F, 0x0E);

// ---------------------------------------------------------------------------
// Series colours: legend name → Color32
// ---------------------------------------------------------------------------

/// Assigns a distinct colour to each series of a grouped chart.
#[derive(Debug, Clone)]
pub struct ColorMap {
    mapping: BTreeMap<String, Color32>,
    default_color: Color32,
}

impl ColorMap {
    /// Build a colour map over the given series names, in order.
    pub fn new<I, S>(series: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names: Vec<String> = series.into_iter().map(Into::into).collect();
        let palette = generate_palette(names.len());
        let mapping = names.into_iter().zip(palette).collect();

        ColorMap {
            mapping,
            default_color: Color32::GRAY,
        }
    }

    /// Look up the colour for a series.
    pub fn color_for(&self, series: &str) -> Color32 {
        self.mapping
            .get(series)
            .copied()
            .unwrap_or(self.default_color)
    }
}
