//! The egui dashboard.
//!
//! | Sub-module        | Responsibility |
//! | ----------------- | -------------- |
//! | [`plot_surface`]  | [`PlotSurface`]: render surface painting a figure with `egui_plot` |
//! | [`dashboard_app`] | [`DashboardApp`]: eframe app polling the animator each UI frame |
//! | [`run`]           | [`run_dashboard`], [`run_headless`] and animator wiring from config |

mod dashboard_app;
mod plot_surface;
mod run;

pub use dashboard_app::DashboardApp;
pub use plot_surface::PlotSurface;
pub use run::{build_animator, run_dashboard, run_headless};
