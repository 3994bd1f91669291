//! Dashboard configuration, loadable from YAML.
//!
//! [`DashboardConfig::default`] reproduces the three-IMU layout: a 3x2 grid
//! with accelerometer data on the left and gyroscope data on the right, each
//! IMU contributing six consecutive values to every sample frame.

use std::path::Path;
use std::time::Duration;

use anyhow::Context;
use eframe::egui::Color32;
use serde::{Deserialize, Serialize};

use crate::color_scheme::ColorScheme;
use crate::data::channel::{AxisId, Channel, SeriesOrder};
use crate::data::frame::{FrameHub, SharedFrameHub};
use crate::data::series_style::{LineDash, SeriesStyle};
use crate::data::transform::{GaussianSmoother, MovingAverage, Transform};
use crate::data::x_formatter::{XFormatter, XLabels};
use crate::error::{StreamError, StreamResult};
use crate::inlet::{InletConfig, SyntheticImu};
use crate::surface::{AxisSpec, Figure};

// ─────────────────────────────────────────────────────────────────────────────
// Smoothing
// ─────────────────────────────────────────────────────────────────────────────

/// Transform applied to every series before drawing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Smoothing {
    #[default]
    None,
    Gaussian {
        sigma: f64,
        #[serde(default = "default_truncate")]
        truncate: f64,
    },
    MovingAverage {
        window: usize,
    },
}

fn default_truncate() -> f64 {
    GaussianSmoother::DEFAULT_TRUNCATE
}

impl Smoothing {
    pub fn build(&self) -> StreamResult<Option<Box<dyn Transform>>> {
        let transform: Option<Box<dyn Transform>> = match self {
            Smoothing::None => None,
            Smoothing::Gaussian { sigma, truncate } => Some(Box::new(
                GaussianSmoother::with_truncate(*sigma, *truncate).map_err(StreamError::config)?,
            )),
            Smoothing::MovingAverage { window } => Some(Box::new(
                MovingAverage::new(*window).map_err(StreamError::config)?,
            )),
        };
        Ok(transform)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Series and channel entries
// ─────────────────────────────────────────────────────────────────────────────

/// Serializable mirror of [`SeriesStyle`]; colors are `#RRGGBB` strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesStyleConfig {
    pub label: String,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub width: Option<f32>,
    #[serde(default)]
    pub dash: LineDash,
}

impl SeriesStyleConfig {
    pub fn new<S: Into<String>>(label: S) -> Self {
        Self {
            label: label.into(),
            color: None,
            width: None,
            dash: LineDash::Solid,
        }
    }

    fn with_color(mut self, hex: &str) -> Self {
        self.color = Some(hex.to_string());
        self
    }

    pub fn to_style(&self) -> StreamResult<SeriesStyle> {
        let mut style = SeriesStyle::new(self.label.clone()).with_dash(self.dash);
        if let Some(hex) = &self.color {
            let c = Color32::from_hex(hex).map_err(|e| {
                StreamError::config(format!(
                    "series `{}`: invalid color `{hex}` ({e:?})",
                    self.label
                ))
            })?;
            style = style.with_color(c);
        }
        if let Some(w) = self.width {
            style = style.with_width(w);
        }
        Ok(style)
    }
}

/// One channel: a contiguous slice of the sample frame drawn on one axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChannelConfig {
    pub name: String,
    /// Index into `figure.axes`.
    pub axis: usize,
    /// Position of the first value of this channel in the sample frame.
    pub offset: usize,
    pub series: Vec<SeriesStyleConfig>,
    /// Overrides the dashboard-wide smoothing.
    #[serde(default)]
    pub smoothing: Option<Smoothing>,
}

fn triaxial_styles(prefix: &str, colors: Option<[&str; 3]>) -> Vec<SeriesStyleConfig> {
    ["x", "y", "z"]
        .iter()
        .enumerate()
        .map(|(i, axis)| {
            let s = SeriesStyleConfig::new(format!("{prefix}_{axis}"));
            match colors {
                Some(c) => s.with_color(c[i]),
                None => s,
            }
        })
        .collect()
}

// ─────────────────────────────────────────────────────────────────────────────
// DashboardConfig
// ─────────────────────────────────────────────────────────────────────────────

/// Top-level configuration.
///
/// | Field              | Purpose |
/// |--------------------|---------|
/// | `tick_interval_ms` | Paint-cycle period shared by all channels |
/// | `window`           | Rolling buffer length per series, in samples |
/// | `sample_rate_hz`   | Used to label the x axis in seconds |
/// | `x_labels`         | Sample counts or elapsed seconds on the x axis |
/// | `smoothing`        | Default transform for every channel |
/// | `figure`           | Grid of axes |
/// | `inlet`            | Where sample frames come from |
/// | `channels`         | Frame slices bound to axes |
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub title: String,
    pub tick_interval_ms: u64,
    pub window: usize,
    pub sample_rate_hz: f64,
    pub x_labels: XLabels,
    pub order: SeriesOrder,
    pub color_scheme: ColorScheme,
    pub smoothing: Smoothing,
    pub figure: Figure,
    pub inlet: InletConfig,
    /// Pull the inlet on its own thread so a slow stream never stalls the UI.
    pub background_inlet: bool,
    pub channels: Vec<ChannelConfig>,
    /// Initial native window size in points.
    pub window_size: [f32; 2],
}

impl Default for DashboardConfig {
    fn default() -> Self {
        const IMUS: usize = 3;
        const GYRO_COLORS: [&str; 3] = ["#F1A610", "#F1108B", "#10F1BE"];

        let mut figure = Figure::new(IMUS, 2);
        let mut channels = Vec::new();
        for imu in 1..=IMUS {
            let base = (imu - 1) * SyntheticImu::VALUES_PER_IMU;
            figure.axes.push(AxisSpec {
                title: format!("3-DoF accelerometer data of IMU {imu}"),
                x_label: Some("Time (s)".to_string()),
                y_label: Some("Acceleration (m/s2)".to_string()),
                x_range: (0.0, 1000.0),
                y_range: (-25.0, 100.0),
            });
            channels.push(ChannelConfig {
                name: format!("imu{imu}_acc"),
                axis: figure.axes.len() - 1,
                offset: base,
                series: triaxial_styles("acc", None),
                smoothing: None,
            });
            figure.axes.push(AxisSpec {
                title: format!("3-DoF gyroscope data of IMU {imu}"),
                x_label: Some("Time (s)".to_string()),
                y_label: Some("Angular velocity (rad/s)".to_string()),
                x_range: (0.0, 1000.0),
                y_range: (0.0, 200.0),
            });
            channels.push(ChannelConfig {
                name: format!("imu{imu}_gyro"),
                axis: figure.axes.len() - 1,
                offset: base + 3,
                series: triaxial_styles("gyro", Some(GYRO_COLORS)),
                smoothing: None,
            });
        }

        Self {
            title: "IMU stream".to_string(),
            tick_interval_ms: 50,
            window: 1000,
            sample_rate_hz: 20.0,
            x_labels: XLabels::default(),
            order: SeriesOrder::NewestFirst,
            color_scheme: ColorScheme::Graphite,
            smoothing: Smoothing::Gaussian {
                sigma: 3.0,
                truncate: GaussianSmoother::DEFAULT_TRUNCATE,
            },
            figure,
            inlet: InletConfig::default(),
            background_inlet: false,
            channels,
            window_size: [1000.0, 900.0],
        }
    }
}

impl DashboardConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path_ref = path.as_ref();
        let contents = std::fs::read_to_string(path_ref)
            .with_context(|| format!("reading dashboard config {}", path_ref.display()))?;
        let config = Self::from_yaml(&contents)
            .with_context(|| format!("parsing dashboard config {}", path_ref.display()))?;
        Ok(config)
    }

    pub fn from_yaml(contents: &str) -> anyhow::Result<Self> {
        let config: DashboardConfig = serde_yaml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_yaml(&self) -> anyhow::Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    pub fn x_formatter(&self) -> XFormatter {
        XFormatter::from_labels(self.x_labels, self.sample_rate_hz)
    }

    /// Values per frame the configured inlet is known to produce.
    fn frame_width(&self) -> Option<usize> {
        match &self.inlet {
            InletConfig::Synthetic { imus, .. } => Some(imus * SyntheticImu::VALUES_PER_IMU),
            _ => None,
        }
    }

    pub fn validate(&self) -> StreamResult<()> {
        if self.tick_interval_ms == 0 {
            return Err(StreamError::config("tick_interval_ms must be positive"));
        }
        if self.window == 0 {
            return Err(StreamError::config("window must hold at least one sample"));
        }
        self.figure.validate()?;
        self.smoothing.build()?;
        if self.channels.is_empty() {
            return Err(StreamError::config("no channels configured"));
        }
        let width = self.frame_width();
        for ch in &self.channels {
            if ch.axis >= self.figure.axes.len() {
                return Err(StreamError::config(format!(
                    "channel `{}` targets axis {} but the figure has {}",
                    ch.name,
                    ch.axis,
                    self.figure.axes.len()
                )));
            }
            if ch.series.is_empty() {
                return Err(StreamError::config(format!(
                    "channel `{}`: no series configured",
                    ch.name
                )));
            }
            let end = ch.offset.checked_add(ch.series.len()).ok_or_else(|| {
                StreamError::config(format!(
                    "channel `{}`: offset {} is out of range",
                    ch.name, ch.offset
                ))
            })?;
            if let Some(width) = width {
                if end > width {
                    return Err(StreamError::config(format!(
                        "channel `{}` reads values {}..{end} but frames carry {width}",
                        ch.name, ch.offset
                    )));
                }
            }
            for s in &ch.series {
                s.to_style()?;
            }
            if let Some(sm) = &ch.smoothing {
                sm.build()?;
            }
        }
        Ok(())
    }

    /// Build every configured channel reading from `hub`.
    pub fn build_channels(&self, hub: &SharedFrameHub) -> StreamResult<Vec<Channel>> {
        self.channels
            .iter()
            .map(|ch| {
                let styles = ch
                    .series
                    .iter()
                    .map(SeriesStyleConfig::to_style)
                    .collect::<StreamResult<Vec<_>>>()?;
                let smoothing = ch.smoothing.as_ref().unwrap_or(&self.smoothing);
                let range = ch.offset..ch.offset.saturating_add(styles.len());
                Channel::builder(ch.name.clone())
                    .axis(AxisId(ch.axis))
                    .capacity(self.window)
                    .order(self.order)
                    .series_iter(styles)
                    .source(FrameHub::slice_source(hub, range))
                    .boxed_transform(smoothing.build()?)
                    .build()
            })
            .collect()
    }
}
