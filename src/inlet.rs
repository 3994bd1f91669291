//! Pull-based sample inlets.
//!
//! An [`Inlet`] blocks until the next sample is available and returns it with
//! a timestamp. The crate ships a synthetic IMU generator and a line-oriented
//! text reader usable on stdin, files and TCP connections.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::net::TcpStream;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use rand::{rngs::StdRng, Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::data::frame::SampleFrame;
use crate::data::source::Background;
use crate::error::{BoxError, StreamError, StreamResult};

pub trait Inlet: Send {
    fn pull_sample(&mut self) -> Result<SampleFrame, BoxError>;
}

impl Inlet for Background<SampleFrame> {
    fn pull_sample(&mut self) -> Result<SampleFrame, BoxError> {
        self.latest()
    }
}

/// Where samples come from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum InletConfig {
    Synthetic {
        #[serde(default = "default_imus")]
        imus: usize,
        #[serde(default = "default_rate_hz")]
        rate_hz: f64,
        #[serde(default)]
        noise: f64,
        #[serde(default)]
        seed: u64,
        /// Sleep between samples to emulate a live device.
        #[serde(default)]
        paced: bool,
    },
    Stdin,
    File {
        path: PathBuf,
    },
    Tcp {
        address: String,
    },
}

fn default_imus() -> usize {
    3
}

fn default_rate_hz() -> f64 {
    20.0
}

impl Default for InletConfig {
    fn default() -> Self {
        InletConfig::Synthetic {
            imus: default_imus(),
            rate_hz: default_rate_hz(),
            noise: 1.5,
            seed: 0,
            paced: false,
        }
    }
}

/// Open the configured inlet, optionally moving it onto its own thread.
pub fn open(cfg: &InletConfig, background: bool) -> StreamResult<Box<dyn Inlet>> {
    let inlet: Box<dyn Inlet> = match cfg {
        InletConfig::Synthetic {
            imus,
            rate_hz,
            noise,
            seed,
            paced,
        } => {
            if !noise.is_finite() {
                return Err(StreamError::config(format!(
                    "synthetic noise must be finite, got {noise}"
                )));
            }
            let mut s = SyntheticImu::new(*imus, *rate_hz)?
                .with_noise(*noise, *seed);
            s.paced = *paced;
            log::info!("synthetic inlet: {imus} IMUs at {rate_hz} Hz");
            Box::new(s)
        }
        InletConfig::Stdin => {
            log::info!("reading samples from stdin");
            Box::new(LineInlet::new(BufReader::new(std::io::stdin())))
        }
        InletConfig::File { path } => {
            let f = File::open(path)
                .map_err(|e| StreamError::Inlet(format!("{}: {e}", path.display())))?;
            log::info!("reading samples from {}", path.display());
            Box::new(LineInlet::new(BufReader::new(f)))
        }
        InletConfig::Tcp { address } => {
            let stream = TcpStream::connect(address)
                .map_err(|e| StreamError::Inlet(format!("{address}: {e}")))?;
            log::info!("connected to sample stream at {address}");
            Box::new(LineInlet::new(BufReader::new(stream)))
        }
    };
    if !background {
        return Ok(inlet);
    }
    let mut inlet = inlet;
    let bg = Background::spawn("inlet", move || inlet.pull_sample())
        .map_err(|e| StreamError::Inlet(format!("cannot spawn inlet thread: {e}")))?;
    Ok(Box::new(bg))
}

/// Deterministic accelerometer/gyroscope generator.
///
/// Every frame carries six values per IMU: acc x/y/z followed by gyro x/y/z.
/// Time advances by `1 / rate_hz` per pulled sample.
pub struct SyntheticImu {
    imus: usize,
    rate_hz: f64,
    noise: f64,
    rng: StdRng,
    n: u64,
    pub paced: bool,
    next_at: Option<Instant>,
}

impl SyntheticImu {
    pub const VALUES_PER_IMU: usize = 6;

    pub fn new(imus: usize, rate_hz: f64) -> StreamResult<Self> {
        if imus == 0 {
            return Err(StreamError::config("synthetic inlet needs at least one IMU"));
        }
        if !rate_hz.is_finite() || rate_hz <= 0.0 {
            return Err(StreamError::config(format!(
                "synthetic sample rate must be positive, got {rate_hz}"
            )));
        }
        Ok(Self {
            imus,
            rate_hz,
            noise: 0.0,
            rng: StdRng::seed_from_u64(0),
            n: 0,
            paced: false,
            next_at: None,
        })
    }

    pub fn with_noise(mut self, noise: f64, seed: u64) -> Self {
        self.noise = noise.abs();
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    pub fn width(&self) -> usize {
        self.imus * Self::VALUES_PER_IMU
    }

    fn jitter(&mut self) -> f64 {
        if self.noise == 0.0 {
            0.0
        } else {
            self.rng.gen_range(-self.noise..=self.noise)
        }
    }

    fn pace(&mut self) {
        let period = Duration::from_secs_f64(1.0 / self.rate_hz);
        let now = Instant::now();
        let due = *self.next_at.get_or_insert(now);
        if due > now {
            std::thread::sleep(due - now);
        }
        self.next_at = Some(due.max(now) + period);
    }
}

impl Inlet for SyntheticImu {
    fn pull_sample(&mut self) -> Result<SampleFrame, BoxError> {
        if self.paced {
            self.pace();
        }
        let t = self.n as f64 / self.rate_hz;
        let tau = std::f64::consts::TAU;
        let mut values = Vec::with_capacity(self.width());
        for imu in 0..self.imus {
            let phase = imu as f64 * 0.7;
            for axis in 0..3 {
                let f = 0.2 + 0.1 * axis as f64;
                let base = 35.0 + 30.0 * (tau * f * t + phase + axis as f64).sin();
                let v = base + self.jitter();
                values.push(v);
            }
            for axis in 0..3 {
                let f = 0.05 + 0.05 * axis as f64;
                let base = 100.0 + 60.0 * (tau * f * t + phase - axis as f64).cos();
                let v = base + self.jitter();
                values.push(v);
            }
        }
        self.n += 1;
        Ok(SampleFrame {
            values,
            timestamp: t,
        })
    }
}

/// One sample per line; values separated by commas and/or whitespace.
pub struct LineInlet<R> {
    reader: R,
    opened: Instant,
    line: String,
}

impl<R: BufRead + Send> LineInlet<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            opened: Instant::now(),
            line: String::new(),
        }
    }
}

/// Parse a sample line. Blank lines yield `None`.
pub fn parse_line(line: &str) -> Result<Option<Vec<f64>>, BoxError> {
    let fields: Vec<&str> = line
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|f| !f.is_empty())
        .collect();
    if fields.is_empty() {
        return Ok(None);
    }
    let values = fields
        .iter()
        .map(|f| {
            f.parse::<f64>()
                .map_err(|e| format!("invalid sample field `{f}`: {e}"))
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Some(values))
}

impl<R: BufRead + Send> Inlet for LineInlet<R> {
    fn pull_sample(&mut self) -> Result<SampleFrame, BoxError> {
        loop {
            self.line.clear();
            if self.reader.read_line(&mut self.line)? == 0 {
                return Err("sample stream closed".into());
            }
            if let Some(values) = parse_line(&self.line)? {
                return Ok(SampleFrame {
                    values,
                    timestamp: self.opened.elapsed().as_secs_f64(),
                });
            }
        }
    }
}
