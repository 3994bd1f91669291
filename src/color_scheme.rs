//! Color schemes for the dashboard.
//!
//! A scheme sets the egui visuals and supplies the palette used for series
//! that carry no explicit color.

use eframe::egui::{Color32, Context, Visuals};
use serde::{Deserialize, Serialize};

/// Visual theme for the dashboard.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ColorScheme {
    /// Dark grey figure with muted green/blue/red/amber lines.
    #[default]
    Graphite,
    /// The eframe dark default.
    Dark,
    Light,
}

impl ColorScheme {
    /// All built-in schemes (useful for combo-box UIs).
    pub fn all() -> &'static [ColorScheme] {
        &[
            ColorScheme::Graphite,
            ColorScheme::Dark,
            ColorScheme::Light,
        ]
    }

    pub fn label(&self) -> &'static str {
        match self {
            ColorScheme::Graphite => "Graphite",
            ColorScheme::Dark => "Dark",
            ColorScheme::Light => "Light",
        }
    }

    pub fn visuals(&self) -> Visuals {
        match self {
            ColorScheme::Graphite => {
                let mut v = Visuals::dark();
                let figure = Color32::from_rgb(0x2d, 0x2d, 0x2d);
                let axes = Color32::from_rgb(0x40, 0x40, 0x40);
                let text = Color32::from_rgb(0xb0, 0xbd, 0xbb);
                v.panel_fill = figure;
                v.window_fill = figure;
                v.extreme_bg_color = axes;
                v.faint_bg_color = Color32::from_rgb(0x34, 0x34, 0x34);
                v.override_text_color = Some(text);
                v.widgets.noninteractive.bg_fill = figure;
                v.widgets.noninteractive.fg_stroke.color = text;
                v.widgets.noninteractive.bg_stroke.color = Color32::from_rgb(0x34, 0x34, 0x34);
                v
            }
            ColorScheme::Dark => Visuals::dark(),
            ColorScheme::Light => Visuals::light(),
        }
    }

    /// Apply this scheme's visuals to an egui context.
    pub fn apply(&self, ctx: &Context) {
        ctx.set_visuals(self.visuals());
    }

    /// Palette for series without an explicit color.
    pub fn trace_colors(&self) -> Vec<Color32> {
        match self {
            ColorScheme::Graphite => vec![
                Color32::from_rgb(0x74, 0xaf, 0x60),
                Color32::from_rgb(0x49, 0xb6, 0xd2),
                Color32::from_rgb(0xdb, 0x47, 0x43),
                Color32::from_rgb(0xeb, 0xa9, 0x2b),
            ],
            // x, y, z as red, green, blue.
            ColorScheme::Dark => vec![
                Color32::from_rgb(0xe0, 0x5a, 0x4f),
                Color32::from_rgb(0x6c, 0xc2, 0x5e),
                Color32::from_rgb(0x4f, 0x8f, 0xe0),
            ],
            ColorScheme::Light => vec![
                Color32::from_rgb(0xb2, 0x22, 0x22),
                Color32::from_rgb(0x22, 0x8b, 0x22),
                Color32::from_rgb(0x1f, 0x4e, 0xa8),
            ],
        }
    }
}
