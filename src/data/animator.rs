//! The animator: one shared timer driving every registered channel, followed by a
//! single batched redraw per tick.

use std::time::{Duration, Instant};

use crate::data::channel::{Channel, LineArtifact};
use crate::error::{BoxError, StreamError, StreamResult};
use crate::surface::RenderSurface;

/// Hook run once at the start of every tick, before any channel samples.
pub type FrameFetch = Box<dyn FnMut() -> Result<(), BoxError>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimatorState {
    Idle,
    Running { next_due: Instant },
}

/// Summary of one completed tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TickReport {
    /// 1-based count of successful ticks.
    pub tick: u64,
    /// Number of artifacts handed to the surface.
    pub artifacts: usize,
}

pub struct Animator<S: RenderSurface> {
    tick_interval: Duration,
    state: AnimatorState,
    channels: Vec<Channel>,
    frame_fetch: Option<FrameFetch>,
    surface: S,
    ticks: u64,
}

impl<S: RenderSurface> Animator<S> {
    pub fn new(surface: S, tick_interval: Duration) -> Self {
        Self {
            tick_interval,
            state: AnimatorState::Idle,
            channels: Vec::new(),
            frame_fetch: None,
            surface,
            ticks: 0,
        }
    }

    /// Append a channel; registration order is draw order.
    pub fn register(&mut self, channel: Channel) {
        log::debug!("registered channel `{}` ({} series)", channel.name(), channel.arity());
        self.channels.push(channel);
    }

    pub fn set_frame_fetch(&mut self, fetch: FrameFetch) {
        self.frame_fetch = Some(fetch);
    }

    pub fn channels(&self) -> &[Channel] {
        &self.channels
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn tick_interval(&self) -> Duration {
        self.tick_interval
    }

    pub fn set_tick_interval(&mut self, interval: Duration) {
        self.tick_interval = interval;
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn state(&self) -> AnimatorState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        matches!(self.state, AnimatorState::Running { .. })
    }

    /// Idle → Running. The first tick is due immediately.
    pub fn start(&mut self, now: Instant) {
        if !self.is_running() {
            log::info!(
                "animator started: {} channels every {:?}",
                self.channels.len(),
                self.tick_interval
            );
            self.state = AnimatorState::Running { next_due: now };
        }
    }

    /// Running → Idle. No further ticks are scheduled.
    pub fn stop(&mut self) {
        if self.is_running() {
            log::info!("animator stopped after {} ticks", self.ticks);
            self.state = AnimatorState::Idle;
        }
    }

    /// Time left until the next tick, `None` when idle.
    pub fn time_until_next(&self, now: Instant) -> Option<Duration> {
        match self.state {
            AnimatorState::Idle => None,
            AnimatorState::Running { next_due } => Some(next_due.saturating_duration_since(now)),
        }
    }

    /// Run a tick if one is due. The next tick is scheduled one interval after
    /// `now`; lateness is not compensated.
    pub fn poll(&mut self, now: Instant) -> StreamResult<Option<TickReport>> {
        match self.state {
            AnimatorState::Running { next_due } if now >= next_due => {
                self.state = AnimatorState::Running {
                    next_due: now + self.tick_interval,
                };
                self.tick().map(Some)
            }
            _ => Ok(None),
        }
    }

    /// Sample, update and render every channel in registration order, then issue
    /// exactly one redraw. Any failure aborts the tick before the redraw; a
    /// sampling failure leaves every buffer untouched.
    pub fn tick(&mut self) -> StreamResult<TickReport> {
        if let Some(fetch) = self.frame_fetch.as_mut() {
            fetch().map_err(StreamError::Frame)?;
        }

        let samples = self
            .channels
            .iter_mut()
            .map(Channel::sample)
            .collect::<StreamResult<Vec<_>>>()?;

        for (channel, values) in self.channels.iter_mut().zip(&samples) {
            channel.update(values)?;
        }

        for channel in self.channels.iter_mut() {
            channel.render()?;
        }

        let frame: Vec<&LineArtifact> = self
            .channels
            .iter()
            .flat_map(|c| c.artifacts())
            .collect();
        self.surface.redraw(&frame);

        self.ticks += 1;
        log::debug!("tick {}: redrew {} artifacts", self.ticks, frame.len());
        Ok(TickReport {
            tick: self.ticks,
            artifacts: frame.len(),
        })
    }
}
