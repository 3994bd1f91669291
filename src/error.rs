//! Error types for the streaming engine.
//!
//! Failures coming from external collaborators (sources, transforms, inlets)
//! are carried as [`BoxError`] and wrapped into [`StreamError`] together with
//! the name of the channel they occurred on.

/// Boxed error returned by sources, transforms and inlets.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Coarse classification of a [`StreamError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A source failed or produced a sample of the wrong shape.
    SourceFailure,
    /// A transform failed on the current buffer contents.
    TransformFailure,
    /// Invalid setup, detected before any tick runs.
    ConfigurationError,
}

/// Errors raised while building or ticking channels.
#[derive(thiserror::Error, Debug)]
pub enum StreamError {
    #[error("source failure on channel `{channel}`: {source}")]
    Source {
        channel: String,
        #[source]
        source: BoxError,
    },
    #[error("channel `{channel}` expected {expected} values per sample, got {got}")]
    Arity {
        channel: String,
        expected: usize,
        got: usize,
    },
    #[error("frame fetch failed: {0}")]
    Frame(#[source] BoxError),
    #[error("transform failure on channel `{channel}`: {source}")]
    Transform {
        channel: String,
        #[source]
        source: BoxError,
    },
    #[error("transform on channel `{channel}` returned {len} values, capacity is {capacity}")]
    TransformLength {
        channel: String,
        len: usize,
        capacity: usize,
    },
    #[error("invalid configuration: {0}")]
    Configuration(String),
    #[error("cannot open inlet: {0}")]
    Inlet(String),
}

impl StreamError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            StreamError::Source { .. } | StreamError::Arity { .. } | StreamError::Frame(_) => {
                ErrorKind::SourceFailure
            }
            StreamError::Transform { .. } | StreamError::TransformLength { .. } => {
                ErrorKind::TransformFailure
            }
            StreamError::Configuration(_) | StreamError::Inlet(_) => {
                ErrorKind::ConfigurationError
            }
        }
    }

    pub(crate) fn config<S: Into<String>>(msg: S) -> Self {
        StreamError::Configuration(msg.into())
    }
}

pub type StreamResult<T> = Result<T, StreamError>;
