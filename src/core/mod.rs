//! Core dispatcher types and traits

pub mod builder;
pub mod dispatcher;
pub mod error;
pub mod gate;
pub mod level;
pub mod metrics;
pub mod sink;
pub mod task;
pub mod value;
pub mod worker;

pub use builder::{Dispatch, EventBuilder};
pub use dispatcher::{AsyncDispatcher, DispatcherBuilder, WORKER_THREAD_NAME};
pub use error::{DispatchError, Result};
pub use gate::{LevelGate, LOGGING_LEVEL_ENV};
pub use level::LogLevel;
pub use metrics::DispatcherMetrics;
pub use sink::Sink;
pub use task::{LogRecord, LogTask};
pub use value::{ArgValue, LogValue};
pub use worker::WorkerState;
