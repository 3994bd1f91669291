//! Channels: one source, one rolling buffer per sub-series, one line artifact per
//! sub-series, and an optional transform applied before drawing.

use std::sync::atomic::{AtomicU32, Ordering};

use serde::{Deserialize, Serialize};

use crate::data::rolling::RollingBuffer;
use crate::data::series_style::SeriesStyle;
use crate::data::source::Source;
use crate::data::transform::Transform;
use crate::error::{StreamError, StreamResult};

/// Numeric identifier of a line artifact, unique within the process.
pub type ArtifactId = u32;

/// Index of an axis in the [`Figure`](crate::surface::Figure) a line is drawn on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct AxisId(pub usize);

/// Order in which the rendered series is laid out along the x axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SeriesOrder {
    /// Oldest sample at index 0, newest at the right edge.
    #[default]
    OldestFirst,
    /// Newest sample at index 0.
    NewestFirst,
}

/// A drawable line. x-data is implicit: `0..ydata.len()` in elapsed ticks.
#[derive(Debug, Clone, PartialEq)]
pub struct LineArtifact {
    pub id: ArtifactId,
    pub axis: AxisId,
    pub style: SeriesStyle,
    /// Position of the series within its channel, used for palette colors.
    pub series_index: usize,
    ydata: Vec<f64>,
}

impl LineArtifact {
    fn new(axis: AxisId, style: SeriesStyle, series_index: usize) -> Self {
        static NEXT_ID: AtomicU32 = AtomicU32::new(1);
        Self {
            id: NEXT_ID.fetch_add(1, Ordering::Relaxed),
            axis,
            style,
            series_index,
            ydata: Vec::new(),
        }
    }

    pub fn ydata(&self) -> &[f64] {
        &self.ydata
    }

    /// `[x, y]` pairs ready for plotting.
    pub fn points(&self) -> Vec<[f64; 2]> {
        self.ydata
            .iter()
            .enumerate()
            .map(|(i, y)| [i as f64, *y])
            .collect()
    }

    pub fn color(&self, palette: &[egui::Color32]) -> egui::Color32 {
        self.style.resolved_color(palette, self.series_index)
    }
}

pub struct Channel {
    name: String,
    source: Box<dyn Source>,
    buffers: Vec<RollingBuffer>,
    artifacts: Vec<LineArtifact>,
    transform: Option<Box<dyn Transform>>,
    order: SeriesOrder,
    reported_short_window: bool,
}

impl Channel {
    pub fn builder<S: Into<String>>(name: S) -> ChannelBuilder {
        ChannelBuilder::new(name)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of sub-series, i.e. values expected per sample.
    pub fn arity(&self) -> usize {
        self.buffers.len()
    }

    pub fn capacity(&self) -> usize {
        self.buffers[0].capacity()
    }

    pub fn buffer(&self, series: usize) -> Option<&RollingBuffer> {
        self.buffers.get(series)
    }

    pub fn buffers(&self) -> &[RollingBuffer] {
        &self.buffers
    }

    pub fn artifacts(&self) -> &[LineArtifact] {
        &self.artifacts
    }

    pub fn order(&self) -> SeriesOrder {
        self.order
    }

    fn check_arity(&self, got: usize) -> StreamResult<()> {
        if got != self.buffers.len() {
            return Err(StreamError::Arity {
                channel: self.name.clone(),
                expected: self.buffers.len(),
                got,
            });
        }
        Ok(())
    }

    /// Pull one sample tuple from the source. NaN and infinite values are
    /// rejected so they never enter a buffer.
    pub fn sample(&mut self) -> StreamResult<Vec<f64>> {
        let values = self.source.pull().map_err(|source| StreamError::Source {
            channel: self.name.clone(),
            source,
        })?;
        self.check_arity(values.len())?;
        if let Some(bad) = values.iter().find(|v| !v.is_finite()) {
            return Err(StreamError::Source {
                channel: self.name.clone(),
                source: format!("non-finite sample value {bad}").into(),
            });
        }
        Ok(values)
    }

    /// Push one value per sub-series, evicting the oldest when full.
    pub fn update(&mut self, values: &[f64]) -> StreamResult<()> {
        self.check_arity(values.len())?;
        for (buf, v) in self.buffers.iter_mut().zip(values) {
            buf.push(*v);
        }
        Ok(())
    }

    /// Recompute every artifact's y-data from the current buffers.
    ///
    /// Buffers shorter than the transform's minimum window are drawn raw. On
    /// error no artifact is modified.
    pub fn render(&mut self) -> StreamResult<&[LineArtifact]> {
        let capacity = self.capacity();
        let mut staged = Vec::with_capacity(self.buffers.len());
        for buf in &self.buffers {
            let raw = buf.to_vec();
            let mut series = match &self.transform {
                Some(t) if raw.len() >= t.min_len() => {
                    let out = t.apply(&raw).map_err(|source| StreamError::Transform {
                        channel: self.name.clone(),
                        source,
                    })?;
                    if out.len() > capacity {
                        return Err(StreamError::TransformLength {
                            channel: self.name.clone(),
                            len: out.len(),
                            capacity,
                        });
                    }
                    out
                }
                Some(t) => {
                    if !self.reported_short_window {
                        log::warn!(
                            "channel `{}`: {} samples buffered, transform needs {}; drawing raw",
                            self.name,
                            raw.len(),
                            t.min_len()
                        );
                    }
                    raw
                }
                None => raw,
            };
            if self.order == SeriesOrder::NewestFirst {
                series.reverse();
            }
            staged.push(series);
        }
        if let Some(t) = &self.transform {
            let filled = self.buffers.iter().all(|b| b.len() >= t.min_len());
            self.reported_short_window = !filled;
        }
        for (artifact, series) in self.artifacts.iter_mut().zip(staged) {
            artifact.ydata = series;
        }
        Ok(&self.artifacts)
    }
}

impl std::fmt::Debug for Channel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Channel")
            .field("name", &self.name)
            .field("arity", &self.arity())
            .field("capacity", &self.capacity())
            .field("order", &self.order)
            .field("transform", &self.transform.is_some())
            .finish()
    }
}

/// Validating constructor for [`Channel`].
pub struct ChannelBuilder {
    name: String,
    axis: AxisId,
    capacity: usize,
    styles: Vec<SeriesStyle>,
    source: Option<Box<dyn Source>>,
    transform: Option<Box<dyn Transform>>,
    order: SeriesOrder,
}

impl ChannelBuilder {
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            axis: AxisId::default(),
            capacity: 0,
            styles: Vec::new(),
            source: None,
            transform: None,
            order: SeriesOrder::default(),
        }
    }

    pub fn axis(mut self, axis: AxisId) -> Self {
        self.axis = axis;
        self
    }

    pub fn capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Add one sub-series.
    pub fn series(mut self, style: SeriesStyle) -> Self {
        self.styles.push(style);
        self
    }

    pub fn series_iter<I: IntoIterator<Item = SeriesStyle>>(mut self, styles: I) -> Self {
        self.styles.extend(styles);
        self
    }

    pub fn source<S: Source + 'static>(mut self, source: S) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    pub fn transform<T: Transform + 'static>(mut self, transform: T) -> Self {
        self.transform = Some(Box::new(transform));
        self
    }

    pub fn boxed_transform(mut self, transform: Option<Box<dyn Transform>>) -> Self {
        self.transform = transform;
        self
    }

    pub fn order(mut self, order: SeriesOrder) -> Self {
        self.order = order;
        self
    }

    pub fn build(self) -> StreamResult<Channel> {
        let name = self.name;
        if self.capacity == 0 {
            return Err(StreamError::config(format!(
                "channel `{name}`: buffer capacity must be at least 1"
            )));
        }
        if self.styles.is_empty() {
            return Err(StreamError::config(format!(
                "channel `{name}`: no series configured"
            )));
        }
        let source = self
            .source
            .ok_or_else(|| StreamError::config(format!("channel `{name}`: no source bound")))?;
        if let Some(arity) = source.arity() {
            if arity != self.styles.len() {
                return Err(StreamError::config(format!(
                    "channel `{name}`: source yields {arity} values but {} series are bound",
                    self.styles.len()
                )));
            }
        }
        let axis = self.axis;
        let buffers = self
            .styles
            .iter()
            .map(|_| RollingBuffer::new(self.capacity))
            .collect();
        let artifacts = self
            .styles
            .into_iter()
            .enumerate()
            .map(|(i, style)| LineArtifact::new(axis, style, i))
            .collect();
        Ok(Channel {
            name,
            source,
            buffers,
            artifacts,
            transform: self.transform,
            order: self.order,
            reported_short_window: false,
        })
    }
}
