//! X-axis value formatters.
//!
//! The x axis of every plot counts samples. [`XFormatter`] labels those
//! indices either as raw counts or as elapsed seconds for a known sampling rate.

use serde::{Deserialize, Serialize};

// ─────────────────────────────────────────────────────────────────────────────
// ElapsedFormatter
// ─────────────────────────────────────────────────────────────────────────────

/// Converts a sample index into elapsed seconds.
///
/// The sign is dropped so that newest-first layouts, where indices count
/// backwards in time, still read as positive durations.
#[derive(Debug, Clone, PartialEq)]
pub struct ElapsedFormatter {
    /// Samples per second of the underlying stream.
    pub sample_rate_hz: f64,
    /// Digits after the decimal point.
    pub decimal_places: usize,
}

impl Default for ElapsedFormatter {
    fn default() -> Self {
        Self {
            sample_rate_hz: 20.0,
            decimal_places: 0,
        }
    }
}

impl ElapsedFormatter {
    pub fn new(sample_rate_hz: f64) -> Self {
        Self {
            sample_rate_hz,
            ..Self::default()
        }
    }

    /// Seconds represented by sample index `x`.
    ///
    /// ```
    /// # use liveimu::data::x_formatter::ElapsedFormatter;
    /// let f = ElapsedFormatter::new(20.0);
    /// assert_eq!(f.seconds(100.0), 5.0);
    /// ```
    pub fn seconds(&self, x: f64) -> f64 {
        if self.sample_rate_hz > 0.0 {
            (x / self.sample_rate_hz).abs()
        } else {
            x.abs()
        }
    }

    pub fn format(&self, x: f64) -> String {
        format!("{:.*}", self.decimal_places, self.seconds(x))
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// XFormatter
// ─────────────────────────────────────────────────────────────────────────────

/// How x-axis ticks are labelled, as chosen in the dashboard configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum XLabels {
    /// Plain sample counts.
    SampleIndex,
    /// Elapsed seconds at the configured sample rate.
    Seconds {
        #[serde(default)]
        decimal_places: usize,
    },
}

impl Default for XLabels {
    fn default() -> Self {
        XLabels::Seconds { decimal_places: 0 }
    }
}

/// Formatter handed to the plot widget.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum XFormatter {
    #[default]
    Index,
    Elapsed(ElapsedFormatter),
}

impl XFormatter {
    pub fn elapsed(sample_rate_hz: f64) -> Self {
        XFormatter::Elapsed(ElapsedFormatter::new(sample_rate_hz))
    }

    pub fn from_labels(labels: XLabels, sample_rate_hz: f64) -> Self {
        match labels {
            XLabels::SampleIndex => XFormatter::Index,
            XLabels::Seconds { decimal_places } => XFormatter::Elapsed(ElapsedFormatter {
                sample_rate_hz,
                decimal_places,
            }),
        }
    }

    pub fn format(&self, value: f64) -> String {
        match self {
            XFormatter::Index => format!("{:.0}", value.abs()),
            XFormatter::Elapsed(ef) => ef.format(value),
        }
    }
}
