//! Standalone eframe application driving an [`Animator`] from the UI frame loop.

use std::time::Instant;

use chrono::{DateTime, Local};
use eframe::egui;
use egui_phosphor::regular::{PLAY, STOP, WARNING};

use crate::color_scheme::ColorScheme;
use crate::data::animator::Animator;

use super::PlotSurface;

/// The dashboard window.
///
/// Every UI frame polls the animator; when a tick is due it runs on the UI
/// thread and the surface repaints with the new frame. A failing tick stops
/// the animator and the error is shown in the toolbar while the last good
/// frame stays on screen.
pub struct DashboardApp {
    animator: Animator<PlotSurface>,
    color_scheme: ColorScheme,
    color_scheme_applied: bool,
    last_error: Option<String>,
    last_tick_at: Option<DateTime<Local>>,
}

impl DashboardApp {
    pub fn new(animator: Animator<PlotSurface>, color_scheme: ColorScheme) -> Self {
        Self {
            animator,
            color_scheme,
            color_scheme_applied: false,
            last_error: None,
            last_tick_at: None,
        }
    }

    pub fn animator(&self) -> &Animator<PlotSurface> {
        &self.animator
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Run a due tick, stopping the animator on failure.
    pub fn step(&mut self, now: Instant) {
        match self.animator.poll(now) {
            Ok(Some(_)) => self.last_tick_at = Some(Local::now()),
            Ok(None) => {}
            Err(e) => {
                log::error!("live update stopped: {e}");
                self.animator.stop();
                self.last_error = Some(e.to_string());
            }
        }
    }

    fn toolbar(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            if self.animator.is_running() {
                if ui.button(format!("{STOP} Stop")).clicked() {
                    self.animator.stop();
                }
            } else if ui.button(format!("{PLAY} Start")).clicked() {
                self.last_error = None;
                self.animator.start(Instant::now());
            }
            ui.separator();
            let mut scheme = self.color_scheme;
            egui::ComboBox::from_id_salt("liveimu_color_scheme")
                .selected_text(scheme.label())
                .show_ui(ui, |ui| {
                    for s in ColorScheme::all() {
                        ui.selectable_value(&mut scheme, *s, s.label());
                    }
                });
            if scheme != self.color_scheme {
                self.color_scheme = scheme;
                self.color_scheme_applied = false;
            }
            ui.separator();
            ui.label(format!("ticks: {}", self.animator.ticks()));
            if let Some(at) = &self.last_tick_at {
                ui.label(format!("last frame {}", at.format("%H:%M:%S%.3f")));
            }
            if let Some(err) = &self.last_error {
                ui.separator();
                ui.colored_label(ui.visuals().error_fg_color, format!("{WARNING} {err}"));
            }
        });
    }
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if !self.color_scheme_applied {
            self.color_scheme.apply(ctx);
            self.animator
                .surface_mut()
                .set_palette(self.color_scheme.trace_colors());
            self.color_scheme_applied = true;
        }

        self.step(Instant::now());

        egui::TopBottomPanel::top("liveimu_toolbar").show(ctx, |ui| self.toolbar(ui));
        egui::CentralPanel::default().show(ctx, |ui| self.animator.surface().show(ui));

        if let Some(wait) = self.animator.time_until_next(Instant::now()) {
            ctx.request_repaint_after(wait);
        }
    }
}
