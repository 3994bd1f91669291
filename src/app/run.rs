//! Entry points: the native dashboard window and the headless loop.

use std::time::{Duration, Instant};

use eframe::egui;

use crate::config::DashboardConfig;
use crate::data::animator::Animator;
use crate::data::frame::FrameHub;
use crate::error::StreamResult;
use crate::inlet::Inlet;
use crate::surface::RenderSurface;

use super::{DashboardApp, PlotSurface};

/// Wire an animator from `cfg`: one frame hub fed by `inlet`, one channel per
/// configured entry, registered in configuration order.
pub fn build_animator<S: RenderSurface>(
    cfg: &DashboardConfig,
    inlet: Box<dyn Inlet>,
    surface: S,
) -> StreamResult<Animator<S>> {
    cfg.validate()?;
    let hub = FrameHub::shared(inlet);
    let mut animator = Animator::new(surface, cfg.tick_interval());
    animator.set_frame_fetch(FrameHub::fetcher(&hub));
    for channel in cfg.build_channels(&hub)? {
        animator.register(channel);
    }
    Ok(animator)
}

/// Open the dashboard in a native window. Blocks until the window is closed.
pub fn run_dashboard(cfg: DashboardConfig, inlet: Box<dyn Inlet>) -> anyhow::Result<()> {
    let surface = PlotSurface::new(
        cfg.figure.clone(),
        cfg.x_formatter(),
        cfg.color_scheme.trace_colors(),
    );
    let mut animator = build_animator(&cfg, inlet, surface)?;
    animator.start(Instant::now());
    let app = DashboardApp::new(animator, cfg.color_scheme);

    let opts = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(cfg.title.clone())
            .with_inner_size(egui::vec2(cfg.window_size[0], cfg.window_size[1])),
        ..Default::default()
    };

    eframe::run_native(
        &cfg.title,
        opts,
        Box::new(|cc| {
            let mut fonts = egui::FontDefinitions::default();
            egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);
            cc.egui_ctx.set_fonts(fonts);
            Ok(Box::new(app))
        }),
    )
    .map_err(|e| anyhow::anyhow!("dashboard window failed: {e}"))
}

/// Tick `animator` `ticks` times on a fixed period without a window.
///
/// Returns on the first failing tick. `on_tick` sees the animator after every
/// successful tick.
pub fn run_headless<S, F>(
    animator: &mut Animator<S>,
    ticks: u64,
    mut on_tick: F,
) -> StreamResult<()>
where
    S: RenderSurface,
    F: FnMut(&Animator<S>),
{
    animator.start(Instant::now());
    let mut done = 0;
    while done < ticks {
        let now = Instant::now();
        match animator.poll(now) {
            Ok(Some(_)) => {
                done += 1;
                on_tick(&*animator);
            }
            Ok(None) => {
                let wait = animator.time_until_next(now).unwrap_or(Duration::ZERO);
                std::thread::sleep(wait);
            }
            Err(e) => {
                animator.stop();
                return Err(e);
            }
        }
    }
    animator.stop();
    Ok(())
}
