//! SeriesStyle: visual styling for a plotted series.

use eframe::egui;
use egui_plot::LineStyle;
use serde::{Deserialize, Serialize};

/// Dash pattern of a line. Serializable mirror of [`egui_plot::LineStyle`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum LineDash {
    #[default]
    Solid,
    Dashed { length: f32 },
    Dotted { spacing: f32 },
}

impl From<LineDash> for LineStyle {
    fn from(d: LineDash) -> Self {
        match d {
            LineDash::Solid => LineStyle::Solid,
            LineDash::Dashed { length } => LineStyle::Dashed { length },
            LineDash::Dotted { spacing } => LineStyle::Dotted { spacing },
        }
    }
}

/// The display metadata of one series (legend label, color, width, dash pattern).
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesStyle {
    pub label: String,
    /// `None` picks a palette color from the series index.
    pub color: Option<egui::Color32>,
    pub width: f32,
    pub dash: LineDash,
}

impl Default for SeriesStyle {
    fn default() -> Self {
        Self {
            label: String::new(),
            color: None,
            width: 1.5,
            dash: LineDash::Solid,
        }
    }
}

impl SeriesStyle {
    pub fn new<S: Into<String>>(label: S) -> Self {
        Self {
            label: label.into(),
            ..Default::default()
        }
    }

    pub fn with_color(mut self, color: egui::Color32) -> Self {
        self.color = Some(color);
        self
    }

    pub fn with_dash(mut self, dash: LineDash) -> Self {
        self.dash = dash;
        self
    }

    pub fn with_width(mut self, width: f32) -> Self {
        self.width = width;
        self
    }

    /// Color to draw with, falling back to `palette[index]` (cycled).
    pub fn resolved_color(&self, palette: &[egui::Color32], index: usize) -> egui::Color32 {
        match self.color {
            Some(c) => c,
            None if palette.is_empty() => egui::Color32::GRAY,
            None => palette[index % palette.len()],
        }
    }
}

/// Standard three-axis labels such as `acc_x`, `acc_y`, `acc_z`.
pub fn triaxial(prefix: &str) -> Vec<SeriesStyle> {
    ["x", "y", "z"]
        .iter()
        .map(|axis| SeriesStyle::new(format!("{prefix}_{axis}")))
        .collect()
}
