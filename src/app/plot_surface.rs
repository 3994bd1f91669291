//! egui render surface: paints the latest redraw as a grid of plots.

use eframe::egui;
use egui_plot::{Corner, GridMark, Legend, Line, Plot};

use crate::data::channel::{AxisId, LineArtifact};
use crate::data::x_formatter::XFormatter;
use crate::surface::{AxisSpec, Figure, RenderSurface};

/// Holds the figure layout and the most recently redrawn set of lines.
///
/// Between redraws the surface keeps painting the previous frame, so a stopped
/// animator leaves its last good frame on screen.
pub struct PlotSurface {
    figure: Figure,
    lines: Vec<LineArtifact>,
    x_formatter: XFormatter,
    palette: Vec<egui::Color32>,
    redraws: u64,
}

impl PlotSurface {
    pub fn new(figure: Figure, x_formatter: XFormatter, palette: Vec<egui::Color32>) -> Self {
        Self {
            figure,
            lines: Vec::new(),
            x_formatter,
            palette,
            redraws: 0,
        }
    }

    pub fn figure(&self) -> &Figure {
        &self.figure
    }

    pub fn lines(&self) -> &[LineArtifact] {
        &self.lines
    }

    pub fn redraws(&self) -> u64 {
        self.redraws
    }

    pub fn set_palette(&mut self, palette: Vec<egui::Color32>) {
        self.palette = palette;
    }

    /// Paint every axis of the figure, filling the available space row by row.
    pub fn show(&self, ui: &mut egui::Ui) {
        let rows = self.figure.rows.max(1);
        let cols = self.figure.cols.max(1);
        let spacing = ui.spacing().item_spacing;
        let avail = ui.available_size();
        let cell = egui::vec2(
            (avail.x - spacing.x * (cols - 1) as f32) / cols as f32,
            (avail.y - spacing.y * (rows - 1) as f32) / rows as f32,
        );

        for row in 0..rows {
            ui.horizontal(|ui| {
                for col in 0..cols {
                    let idx = row * cols + col;
                    let Some(spec) = self.figure.axis(AxisId(idx)) else {
                        continue;
                    };
                    ui.allocate_ui(cell, |ui| {
                        ui.vertical(|ui| self.show_axis(ui, AxisId(idx), spec, cell));
                    });
                }
            });
        }
    }

    fn show_axis(&self, ui: &mut egui::Ui, axis: AxisId, spec: &AxisSpec, cell: egui::Vec2) {
        let title_height = if spec.title.is_empty() {
            0.0
        } else {
            ui.strong(&spec.title).rect.height() + ui.spacing().item_spacing.y
        };

        let fmt = self.x_formatter.clone();
        let mut plot = Plot::new(("liveimu_axis", axis.0))
            .width(cell.x)
            .height((cell.y - title_height).max(40.0))
            .allow_drag(false)
            .allow_zoom(false)
            .allow_scroll(false)
            .allow_boxed_zoom(false)
            .show_grid(true)
            .legend(Legend::default().position(Corner::LeftTop))
            .x_axis_formatter(move |x: GridMark, _range: &std::ops::RangeInclusive<f64>| {
                fmt.format(x.value)
            });
        if let Some(label) = &spec.x_label {
            plot = plot.x_axis_label(label.clone());
        }
        if let Some(label) = &spec.y_label {
            plot = plot.y_axis_label(label.clone());
        }

        let (x_min, x_max) = spec.x_range;
        let (y_min, y_max) = spec.y_range;
        plot.show(ui, |plot_ui| {
            plot_ui.set_plot_bounds_x(x_min..=x_max);
            plot_ui.set_plot_bounds_y(y_min..=y_max);
            for line in self.lines.iter().filter(|l| l.axis == axis) {
                plot_ui.line(
                    Line::new(line.style.label.clone(), line.points())
                        .color(line.color(&self.palette))
                        .width(line.style.width.max(0.1))
                        .style(line.style.dash.into()),
                );
            }
        });
    }
}

impl RenderSurface for PlotSurface {
    fn redraw(&mut self, frame: &[&LineArtifact]) {
        self.lines = frame.iter().map(|a| (*a).clone()).collect();
        self.redraws += 1;
    }
}
