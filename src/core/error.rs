//! Error types for the dispatcher

pub type Result<T> = std::result::Result<T, DispatchError>;

#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    /// Generic IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration value did not name a known severity (non-fatal; the
    /// gate falls back to INFO)
    #[error("unrecognized log level: '{value}'")]
    UnrecognizedLevel { value: String },

    /// A deferred argument panicked while the worker evaluated it
    #[error("deferred evaluation failed: {detail}")]
    ArgumentEvaluation { detail: String },

    /// The sink rejected or failed on a finished record
    #[error("sink '{sink}' failed: {message}")]
    SinkEmit { sink: String, message: String },

    /// Task submitted after shutdown began
    #[error("dispatcher already stopped")]
    DispatcherStopped,

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl DispatchError {
    /// Create an argument-evaluation error
    pub fn evaluation(detail: impl Into<String>) -> Self {
        DispatchError::ArgumentEvaluation {
            detail: detail.into(),
        }
    }

    /// Create a sink emit error
    pub fn sink_emit(sink: impl Into<String>, message: impl Into<String>) -> Self {
        DispatchError::SinkEmit {
            sink: sink.into(),
            message: message.into(),
        }
    }

    /// Create a generic error
    pub fn other<S: Into<String>>(msg: S) -> Self {
        DispatchError::Other(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = DispatchError::evaluation("supplier panicked");
        assert!(matches!(err, DispatchError::ArgumentEvaluation { .. }));

        let err = DispatchError::sink_emit("console", "stdout closed");
        assert!(matches!(err, DispatchError::SinkEmit { .. }));
    }

    #[test]
    fn test_error_display() {
        let err = DispatchError::UnrecognizedLevel {
            value: "LOUD".to_string(),
        };
        assert_eq!(err.to_string(), "unrecognized log level: 'LOUD'");

        let err = DispatchError::sink_emit("json", "disk full");
        assert_eq!(err.to_string(), "sink 'json' failed: disk full");

        let err = DispatchError::DispatcherStopped;
        assert_eq!(err.to_string(), "dispatcher already stopped");
    }
}
