use std::collections::{BTreeMap, BTreeSet};

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};
use plotters::style::RGBColor;

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// An 8-bit sRGB triple shared by the static chart and the viewer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub fn to_color32(self) -> Color32 {
        Color32::from_rgb(self.0, self.1, self.2)
    }

    pub fn to_plotters(self) -> RGBColor {
        RGBColor(self.0, self.1, self.2)
    }
}

/// Accent used for the frontier line, markers and labels (matplotlib's `C1`).
pub const FRONTIER: Rgb = Rgb(255, 127, 14);

/// Colour of trials whose label is not in the map.
pub const DEFAULT_POINT: Rgb = Rgb(31, 119, 180);

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Rgb> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            // Start at blue so a single series looks like the usual default.
            let hue = 210.0 + (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.65, 0.45);
            let rgb: Srgb = hsl.into_color();
            Rgb(
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            )
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Color mapping: point label → colour
// ---------------------------------------------------------------------------

/// Maps the distinct labels of a run to distinct colours.
#[derive(Debug, Clone, Default)]
pub struct ColorMap {
    mapping: BTreeMap<String, Rgb>,
}

impl ColorMap {
    /// Build a colour map from the labels of all points.
    pub fn new<'a>(labels: impl IntoIterator<Item = &'a str>) -> Self {
        let unique: BTreeSet<&str> = labels.into_iter().collect();
        let palette = generate_palette(unique.len());
        let mapping = unique
            .into_iter()
            .zip(palette)
            .map(|(label, c)| (label.to_string(), c))
            .collect();

        ColorMap { mapping }
    }

    /// Look up the colour for a label.
    pub fn color_for(&self, label: &str) -> Rgb {
        self.mapping.get(label).copied().unwrap_or(DEFAULT_POINT)
    }

    /// Return the legend entries (label → colour).
    pub fn legend_entries(&self) -> Vec<(String, Rgb)> {
        self.mapping
            .iter()
            .map(|(label, c)| (label.clone(), *c))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.mapping.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mapping.is_empty()
    }
}
