//! Queued log task and the finished record handed to the sink

use super::level::LogLevel;
use super::value::{ArgValue, LogValue};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::cell::RefCell;
use std::error::Error;

// Thread-local caches for thread information to avoid repeated allocations
thread_local! {
    static THREAD_ID_CACHE: RefCell<Option<String>> = const { RefCell::new(None) };
    static THREAD_NAME_CACHE: RefCell<Option<Option<String>>> = const { RefCell::new(None) };
}

fn get_thread_id() -> String {
    THREAD_ID_CACHE.with(|cache| {
        let mut cache = cache.borrow_mut();
        if cache.is_none() {
            *cache = Some(format!("{:?}", std::thread::current().id()));
        }
        cache
            .as_ref()
            .expect("thread_id cache initialized in previous line")
            .clone()
    })
}

fn get_thread_name() -> Option<String> {
    THREAD_NAME_CACHE.with(|cache| {
        let mut cache = cache.borrow_mut();
        if cache.is_none() {
            *cache = Some(std::thread::current().name().map(String::from));
        }
        cache
            .as_ref()
            .expect("thread_name cache initialized in previous line")
            .clone()
    })
}

/// Sanitize a message pattern to prevent log injection.
///
/// Replaces newlines, carriage returns, and tabs with escape sequences so a
/// record cannot masquerade as several. Runs on the worker thread.
pub(crate) fn sanitize_pattern(pattern: &str) -> String {
    pattern
        .replace('\n', "\\n")
        .replace('\r', "\\r")
        .replace('\t', "\\t")
}

/// A log event accepted by the gate and queued for the worker.
///
/// Immutable once enqueued. Deferred values inside it are resolved only by
/// the worker, never on the producer thread.
#[derive(Debug)]
pub struct LogTask {
    pub(crate) level: LogLevel,
    pub(crate) message: LogValue,
    pub(crate) args: Vec<LogValue>,
    pub(crate) error: Option<Box<dyn Error + Send + Sync>>,
    pub(crate) timestamp: DateTime<Utc>,
    pub(crate) thread_id: String,
    pub(crate) thread_name: Option<String>,
}

impl LogTask {
    pub(crate) fn new(
        level: LogLevel,
        message: LogValue,
        args: Vec<LogValue>,
        error: Option<Box<dyn Error + Send + Sync>>,
    ) -> Self {
        Self {
            level,
            message,
            args,
            error,
            timestamp: Utc::now(),
            thread_id: get_thread_id(),
            thread_name: get_thread_name(),
        }
    }

    pub fn level(&self) -> LogLevel {
        self.level
    }

    /// Resolve every deferred value and produce the finished record.
    ///
    /// Arguments are resolved in their original order and swapped in place
    /// with the computed literal; the optional error value is appended after
    /// all positional arguments. Panic messages from failed suppliers are
    /// returned alongside the record; the record itself is still complete,
    /// with `ArgValue::Null` standing in for each failed slot.
    pub(crate) fn into_record(self) -> (LogRecord, Vec<String>) {
        let mut failures = Vec::new();

        let (message, message_failure) = self.message.resolve();
        if let Some(detail) = message_failure {
            failures.push(detail);
        }

        let mut args = Vec::with_capacity(self.args.len() + usize::from(self.error.is_some()));
        for value in self.args {
            let (resolved, failure) = value.resolve();
            if let Some(detail) = failure {
                failures.push(detail);
            }
            args.push(resolved);
        }
        if let Some(error) = self.error {
            args.push(ArgValue::String(error.to_string()));
        }

        let record = LogRecord {
            level: self.level,
            message: sanitize_pattern(&message.to_string()),
            args,
            timestamp: self.timestamp,
            thread_id: self.thread_id,
            thread_name: self.thread_name,
        };
        (record, failures)
    }
}

/// A finished log record: every value resolved, ready for the sink.
#[derive(Debug, Clone, Serialize)]
pub struct LogRecord {
    pub level: LogLevel,
    pub message: String,
    pub args: Vec<ArgValue>,
    pub timestamp: DateTime<Utc>,
    pub thread_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thread_name: Option<String>,
}
