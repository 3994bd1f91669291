//! Shared per-tick sample frames.
//!
//! A [`FrameHub`] pulls exactly one [`SampleFrame`] from its inlet per tick;
//! channels then read their slice of that frame through a [`SliceSource`].

use std::cell::RefCell;
use std::ops::Range;
use std::rc::Rc;

use crate::data::animator::FrameFetch;
use crate::data::source::Source;
use crate::error::BoxError;
use crate::inlet::Inlet;

/// One record pulled from an inlet.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleFrame {
    pub values: Vec<f64>,
    /// Seconds, in the inlet's own clock.
    pub timestamp: f64,
}

pub type SharedFrameHub = Rc<RefCell<FrameHub>>;

pub struct FrameHub {
    inlet: Box<dyn Inlet>,
    latest: Option<SampleFrame>,
    fetched: u64,
}

impl FrameHub {
    pub fn new(inlet: Box<dyn Inlet>) -> Self {
        Self {
            inlet,
            latest: None,
            fetched: 0,
        }
    }

    pub fn shared(inlet: Box<dyn Inlet>) -> SharedFrameHub {
        Rc::new(RefCell::new(Self::new(inlet)))
    }

    /// Pull the next frame from the inlet and make it the latest.
    pub fn fetch(&mut self) -> Result<&SampleFrame, BoxError> {
        let frame = self.inlet.pull_sample()?;
        log::trace!("frame {} @ {:.3}: {:?}", self.fetched, frame.timestamp, frame.values);
        self.fetched += 1;
        Ok(self.latest.insert(frame))
    }

    pub fn latest(&self) -> Option<&SampleFrame> {
        self.latest.as_ref()
    }

    /// Number of frames pulled so far.
    pub fn fetched(&self) -> u64 {
        self.fetched
    }

    pub fn slice(&self, range: Range<usize>) -> Result<Vec<f64>, BoxError> {
        let frame = self
            .latest
            .as_ref()
            .ok_or("no frame fetched yet")?;
        frame
            .values
            .get(range.clone())
            .map(<[f64]>::to_vec)
            .ok_or_else(|| {
                format!(
                    "frame has {} values, slice {}..{} is out of range",
                    frame.values.len(),
                    range.start,
                    range.end
                )
                .into()
            })
    }

    /// Fetch hook to install with [`Animator::set_frame_fetch`](crate::Animator::set_frame_fetch).
    pub fn fetcher(hub: &SharedFrameHub) -> FrameFetch {
        let hub = Rc::clone(hub);
        Box::new(move || hub.borrow_mut().fetch().map(|_| ()))
    }

    pub fn slice_source(hub: &SharedFrameHub, range: Range<usize>) -> SliceSource {
        SliceSource {
            hub: Rc::clone(hub),
            range,
        }
    }
}

/// Source reading a fixed slice of the hub's latest frame.
pub struct SliceSource {
    hub: SharedFrameHub,
    range: Range<usize>,
}

impl Source for SliceSource {
    fn pull(&mut self) -> Result<Vec<f64>, BoxError> {
        self.hub.borrow().slice(self.range.clone())
    }

    fn arity(&self) -> Option<usize> {
        Some(self.range.len())
    }
}
