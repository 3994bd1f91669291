//! Sample sources feeding channels, and the background-thread wrapper that
//! keeps slow producers from stalling a tick.

use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread::JoinHandle;

use crate::error::BoxError;

/// A producer of one sample tuple per call.
pub trait Source {
    fn pull(&mut self) -> Result<Vec<f64>, BoxError>;

    /// Number of values every sample carries, if known up front.
    fn arity(&self) -> Option<usize> {
        None
    }
}

impl<F> Source for F
where
    F: FnMut() -> Result<Vec<f64>, BoxError>,
{
    fn pull(&mut self) -> Result<Vec<f64>, BoxError> {
        self()
    }
}

/// Runs a producer on its own thread and hands out the most recent value.
///
/// The first call blocks until the producer delivered something. Later calls
/// never block: they return the newest value received so far, repeating the
/// previous one if nothing new arrived. A failed or vanished producer turns
/// every subsequent call into an error.
pub struct Background<T> {
    rx: Receiver<Result<T, String>>,
    last: Option<T>,
    failure: Option<String>,
    arity: Option<usize>,
    _handle: JoinHandle<()>,
}

impl<T: Clone + Send + 'static> Background<T> {
    /// Values buffered between two pulls before the producer has to wait.
    pub const QUEUE_DEPTH: usize = 1;

    pub fn spawn<F>(name: &str, mut producer: F) -> std::io::Result<Self>
    where
        F: FnMut() -> Result<T, BoxError> + Send + 'static,
    {
        let (tx, rx) = mpsc::sync_channel(Self::QUEUE_DEPTH);
        let handle = std::thread::Builder::new()
            .name(format!("liveimu-{name}"))
            .spawn(move || loop {
                match producer() {
                    Ok(v) => {
                        // Receiver dropped: nobody is listening anymore.
                        if tx.send(Ok(v)).is_err() {
                            break;
                        }
                    }
                    Err(e) => {
                        let _ = tx.send(Err(e.to_string()));
                        break;
                    }
                }
            })?;
        log::debug!("spawned background producer `{name}`");
        Ok(Self {
            rx,
            last: None,
            failure: None,
            arity: None,
            _handle: handle,
        })
    }

    /// Declare the arity reported through [`Source::arity`].
    pub fn with_arity(mut self, arity: usize) -> Self {
        self.arity = Some(arity);
        self
    }

    fn accept(&mut self, msg: Result<T, String>) -> Result<(), BoxError> {
        match msg {
            Ok(v) => {
                self.last = Some(v);
                Ok(())
            }
            Err(e) => {
                self.failure = Some(e.clone());
                Err(e.into())
            }
        }
    }

    pub fn latest(&mut self) -> Result<T, BoxError> {
        if let Some(msg) = &self.failure {
            return Err(msg.clone().into());
        }
        if self.last.is_none() {
            match self.rx.recv() {
                Ok(msg) => self.accept(msg)?,
                Err(_) => return Err(self.exited()),
            }
        }
        loop {
            match self.rx.try_recv() {
                Ok(msg) => self.accept(msg)?,
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => return Err(self.exited()),
            }
        }
        self.last
            .clone()
            .ok_or_else(|| "background producer delivered nothing".into())
    }

    fn exited(&mut self) -> BoxError {
        let msg = "background producer exited".to_string();
        self.failure = Some(msg.clone());
        msg.into()
    }
}

impl Source for Background<Vec<f64>> {
    fn pull(&mut self) -> Result<Vec<f64>, BoxError> {
        self.latest()
    }

    fn arity(&self) -> Option<usize> {
        self.arity
    }
}
