//! liveimu crate root: re-exports and module wiring.
//!
//! A small streaming-plot engine plus an egui dashboard for live IMU data:
//! - `data`: rolling buffers, sources, transforms, channels and the animator
//! - `surface`: the render-surface seam, figure layout, a headless recorder
//! - `inlet`: pull-based sample inlets (synthetic, stdin, file, TCP)
//! - `config`: YAML dashboard configuration
//! - `app`: the eframe dashboard and headless runner

pub mod app;
pub mod color_scheme;
pub mod config;
pub mod data;
pub mod error;
pub mod inlet;
pub mod surface;

// Public re-exports for a compact external API
pub use color_scheme::ColorScheme;
pub use config::{ChannelConfig, DashboardConfig, SeriesStyleConfig, Smoothing};
pub use data::animator::{Animator, AnimatorState, TickReport};
pub use data::channel::{ArtifactId, AxisId, Channel, ChannelBuilder, LineArtifact, SeriesOrder};
pub use data::frame::{FrameHub, SampleFrame, SharedFrameHub, SliceSource};
pub use data::rolling::RollingBuffer;
pub use data::series_style::{LineDash, SeriesStyle};
pub use data::source::{Background, Source};
pub use data::transform::{FnTransform, GaussianSmoother, MovingAverage, Transform};
pub use data::x_formatter::{ElapsedFormatter, XFormatter, XLabels};
pub use error::{BoxError, ErrorKind, StreamError, StreamResult};
pub use inlet::{Inlet, InletConfig};
pub use surface::{AxisSpec, Figure, RecordingSurface, RenderSurface};
