//! Render surfaces and the figure layout they draw into.
//!
//! A [`RenderSurface`] receives one batched redraw per successful tick. The
//! engine never talks to the UI directly; the egui implementation lives in
//! [`crate::app::PlotSurface`].

use serde::{Deserialize, Serialize};

use crate::data::channel::{AxisId, LineArtifact};
use crate::error::{StreamError, StreamResult};

pub trait RenderSurface {
    /// Replace the visible frame with `frame`, given in registration order.
    fn redraw(&mut self, frame: &[&LineArtifact]);
}

/// One plotting axis with fixed ranges, configured once at setup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AxisSpec {
    pub title: String,
    pub x_label: Option<String>,
    pub y_label: Option<String>,
    pub x_range: (f64, f64),
    pub y_range: (f64, f64),
}

impl Default for AxisSpec {
    fn default() -> Self {
        Self {
            title: String::new(),
            x_label: None,
            y_label: None,
            x_range: (0.0, 1000.0),
            y_range: (-1.0, 1.0),
        }
    }
}

/// Grid of axes, filled row by row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Figure {
    pub rows: usize,
    pub cols: usize,
    pub axes: Vec<AxisSpec>,
}

impl Figure {
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            axes: Vec::new(),
        }
    }

    pub fn add_axis(&mut self, spec: AxisSpec) -> StreamResult<AxisId> {
        if self.axes.len() >= self.rows * self.cols {
            return Err(StreamError::config(format!(
                "figure is {}x{}, cannot add axis #{}",
                self.rows,
                self.cols,
                self.axes.len() + 1
            )));
        }
        self.axes.push(spec);
        Ok(AxisId(self.axes.len() - 1))
    }

    pub fn axis(&self, id: AxisId) -> Option<&AxisSpec> {
        self.axes.get(id.0)
    }

    pub fn validate(&self) -> StreamResult<()> {
        if self.rows == 0 || self.cols == 0 {
            return Err(StreamError::config("figure needs at least one row and column"));
        }
        if self.axes.is_empty() {
            return Err(StreamError::config("figure has no axes"));
        }
        if self.axes.len() > self.rows * self.cols {
            return Err(StreamError::config(format!(
                "figure is {}x{} but {} axes are configured",
                self.rows,
                self.cols,
                self.axes.len()
            )));
        }
        Ok(())
    }
}

/// Headless surface keeping a copy of every frame it was asked to draw.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    frames: Vec<Vec<LineArtifact>>,
    keep: Option<usize>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Only retain the most recent `frames` redraws.
    pub fn keep_last(frames: usize) -> Self {
        Self {
            frames: Vec::new(),
            keep: Some(frames.max(1)),
        }
    }

    pub fn frames(&self) -> &[Vec<LineArtifact>] {
        &self.frames
    }

    pub fn last_frame(&self) -> Option<&[LineArtifact]> {
        self.frames.last().map(Vec::as_slice)
    }

    pub fn redraw_count(&self) -> usize {
        self.frames.len()
    }
}

impl RenderSurface for RecordingSurface {
    fn redraw(&mut self, frame: &[&LineArtifact]) {
        self.frames.push(frame.iter().map(|a| (*a).clone()).collect());
        if let Some(keep) = self.keep {
            if self.frames.len() > keep {
                let excess = self.frames.len() - keep;
                self.frames.drain(..excess);
            }
        }
    }
}
