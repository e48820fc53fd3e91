//! Logging macros for pattern-plus-arguments calls.
//!
//! These macros cover the common levelled-call shape: a message pattern and
//! any number of literal arguments. Arguments become literal values; they
//! are rendered into the pattern by the sink, not on the calling thread.
//! For deferred arguments, use the event builder's `arg_with` directly.
//!
//! # Examples
//!
//! ```
//! use deferlog::{AsyncDispatcher, LogLevel};
//! use deferlog::info;
//!
//! let dispatcher = AsyncDispatcher::builder()
//!     .min_level(LogLevel::Info)
//!     .build();
//!
//! info!(dispatcher, "server listening on port {}", 8080);
//!
//! let user_id = 42;
//! info!(dispatcher, "user {} performed action: {}", user_id, "login");
//! ```

/// Log a pattern with literal arguments at an explicit level.
///
/// # Examples
///
/// ```
/// # use deferlog::{AsyncDispatcher, LogLevel};
/// # let dispatcher = AsyncDispatcher::builder().min_level(LogLevel::Trace).build();
/// use deferlog::log;
/// log!(dispatcher, LogLevel::Info, "simple message");
/// log!(dispatcher, LogLevel::Error, "error code: {}", 500);
/// ```
#[macro_export]
macro_rules! log {
    ($dispatcher:expr, $level:expr, $pattern:expr $(, $arg:expr)* $(,)?) => {{
        #[allow(unused_mut)]
        let mut event = $dispatcher.event($level).message($pattern);
        $(event = event.arg($arg);)*
        event.log();
    }};
}

/// Log a trace-level message.
#[macro_export]
macro_rules! trace {
    ($dispatcher:expr, $($rest:tt)+) => {
        $crate::log!($dispatcher, $crate::LogLevel::Trace, $($rest)+)
    };
}

/// Log a debug-level message.
///
/// # Examples
///
/// ```
/// # use deferlog::{AsyncDispatcher, LogLevel};
/// # let dispatcher = AsyncDispatcher::builder().min_level(LogLevel::Debug).build();
/// use deferlog::debug;
/// debug!(dispatcher, "counter value: {}", 10);
/// ```
#[macro_export]
macro_rules! debug {
    ($dispatcher:expr, $($rest:tt)+) => {
        $crate::log!($dispatcher, $crate::LogLevel::Debug, $($rest)+)
    };
}

/// Log an info-level message.
#[macro_export]
macro_rules! info {
    ($dispatcher:expr, $($rest:tt)+) => {
        $crate::log!($dispatcher, $crate::LogLevel::Info, $($rest)+)
    };
}

/// Log a warning-level message.
#[macro_export]
macro_rules! warn {
    ($dispatcher:expr, $($rest:tt)+) => {
        $crate::log!($dispatcher, $crate::LogLevel::Warn, $($rest)+)
    };
}

/// Log an error-level message.
///
/// # Examples
///
/// ```
/// # use deferlog::AsyncDispatcher;
/// # let dispatcher = AsyncDispatcher::new();
/// use deferlog::error;
/// error!(dispatcher, "failed to connect to {}: code {}", "db-1", 500);
/// ```
#[macro_export]
macro_rules! error {
    ($dispatcher:expr, $($rest:tt)+) => {
        $crate::log!($dispatcher, $crate::LogLevel::Error, $($rest)+)
    };
}
