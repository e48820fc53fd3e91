//! # deferlog
//!
//! An asynchronous logging dispatcher that moves expensive log-argument
//! computation off the calling thread and onto a dedicated background
//! worker, while preserving FIFO ordering and level-based filtering.
//!
//! ## Features
//!
//! - **Lazy arguments**: suppliers captured at the call site run on the
//!   worker, exactly once, and never when the level is filtered out
//! - **Cheap gating**: disabled calls allocate nothing
//! - **Ordered**: one consumer, global FIFO across all producer threads
//! - **Drained shutdown**: `shutdown()` blocks until every queued task has
//!   been processed; nothing is dropped
//!
//! ```
//! use deferlog::{AsyncDispatcher, LogLevel};
//!
//! let dispatcher = AsyncDispatcher::builder()
//!     .min_level(LogLevel::Info)
//!     .build();
//!
//! dispatcher
//!     .event(LogLevel::Info)
//!     .message("order {} total {}")
//!     .arg("ord-991")
//!     .arg_with(|| 42 * 100) // runs on the worker thread
//!     .log();
//!
//! dispatcher.shutdown();
//! ```

pub mod core;
pub mod macros;
pub mod sinks;

pub mod prelude {
    pub use crate::core::{
        ArgValue, AsyncDispatcher, Dispatch, DispatchError, DispatcherBuilder, DispatcherMetrics,
        EventBuilder, LevelGate, LogLevel, LogRecord, LogTask, LogValue, Result, Sink,
        WorkerState, LOGGING_LEVEL_ENV, WORKER_THREAD_NAME,
    };
    pub use crate::sinks::{ConsoleSink, JsonSink};
}

pub use crate::core::{
    ArgValue, AsyncDispatcher, Dispatch, DispatchError, DispatcherBuilder, DispatcherMetrics,
    EventBuilder, LevelGate, LogLevel, LogRecord, LogTask, LogValue, Result, Sink, WorkerState,
    LOGGING_LEVEL_ENV, WORKER_THREAD_NAME,
};
pub use crate::sinks::{ConsoleSink, JsonSink};
