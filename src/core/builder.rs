//! Fluent event construction
//!
//! `EventBuilder` accumulates a message pattern, literal or deferred
//! arguments, and an optional error value, then hands the finished task to a
//! [`Dispatch`] implementation. The gate verdict is taken when the builder
//! is created; a disabled builder is a complete no-op: nothing is allocated,
//! boxed, or invoked.

use super::level::LogLevel;
use super::task::LogTask;
use super::value::{ArgValue, LogValue};
use std::error::Error;

/// Capability seam between event construction and the dispatch engine.
///
/// One concrete implementation exists (`AsyncDispatcher`); tests substitute
/// recording implementations.
pub trait Dispatch: Send + Sync {
    fn is_enabled(&self, level: LogLevel) -> bool;
    fn submit(&self, task: LogTask);
}

/// Builder for a single log event
///
/// # Example
///
/// ```
/// use deferlog::{AsyncDispatcher, LogLevel};
///
/// let dispatcher = AsyncDispatcher::builder()
///     .min_level(LogLevel::Debug)
///     .build();
///
/// dispatcher
///     .event(LogLevel::Info)
///     .message("user {} paid {}")
///     .arg("u-17")
///     .arg_with(|| 1299 * 3)
///     .log();
/// ```
pub struct EventBuilder<'a> {
    dispatcher: &'a dyn Dispatch,
    level: LogLevel,
    enabled: bool,
    message: Option<LogValue>,
    args: Vec<LogValue>,
    error: Option<Box<dyn Error + Send + Sync>>,
}

impl<'a> EventBuilder<'a> {
    pub fn new(dispatcher: &'a dyn Dispatch, level: LogLevel) -> Self {
        let enabled = dispatcher.is_enabled(level);
        Self {
            dispatcher,
            level,
            enabled,
            message: None,
            args: Vec::new(),
            error: None,
        }
    }

    /// Set the message pattern
    #[must_use]
    pub fn message(mut self, pattern: impl Into<String>) -> Self {
        if self.enabled {
            self.message = Some(LogValue::literal(pattern.into()));
        }
        self
    }

    /// Set the message pattern from a supplier run on the worker thread
    #[must_use]
    pub fn message_with<F>(mut self, supplier: F) -> Self
    where
        F: FnOnce() -> String + Send + 'static,
    {
        if self.enabled {
            self.message = Some(LogValue::deferred(supplier));
        }
        self
    }

    /// Append a literal argument
    #[must_use]
    pub fn arg<V: Into<ArgValue>>(mut self, value: V) -> Self {
        if self.enabled {
            self.args.push(LogValue::Literal(value.into()));
        }
        self
    }

    /// Append a deferred argument, run on the worker thread exactly once
    #[must_use]
    pub fn arg_with<F, V>(mut self, supplier: F) -> Self
    where
        F: FnOnce() -> V + Send + 'static,
        V: Into<ArgValue>,
    {
        if self.enabled {
            self.args.push(LogValue::deferred(supplier));
        }
        self
    }

    /// Attach an error value, appended after all positional arguments
    #[must_use]
    pub fn error<E>(mut self, error: E) -> Self
    where
        E: Into<Box<dyn Error + Send + Sync>>,
    {
        if self.enabled {
            self.error = Some(error.into());
        }
        self
    }

    /// Build the task and hand it to the dispatcher.
    ///
    /// A no-op when the builder's level is below the gate threshold.
    pub fn log(self) {
        if !self.enabled {
            return;
        }
        let message = self
            .message
            .unwrap_or_else(|| LogValue::Literal(ArgValue::String(String::new())));
        let task = LogTask::new(self.level, message, self.args, self.error);
        self.dispatcher.submit(task);
    }

    /// Set the message pattern, then log
    pub fn log_with(self, pattern: impl Into<String>) {
        self.message(pattern).log();
    }
}
