//! Async dispatcher implementation

use super::{
    builder::{Dispatch, EventBuilder},
    gate::LevelGate,
    level::LogLevel,
    metrics::DispatcherMetrics,
    sink::Sink,
    task::LogTask,
    worker::{self, StateCell, WorkerState},
};
use crate::sinks::ConsoleSink;
use crossbeam_channel::{unbounded, Receiver, Sender};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;

/// Name of the background worker thread
pub const WORKER_THREAD_NAME: &str = "log-dispatch-worker";

/// Asynchronous log dispatcher.
///
/// Level gating and task construction happen on the calling thread; deferred
/// argument evaluation and sink emission happen on one background worker, in
/// global FIFO order. Callers never pay for evaluation: a call below the
/// gate threshold allocates nothing and never invokes a supplier, and an
/// enabled call costs one queue insertion.
///
/// The queue is unbounded: under sustained producer overload with a slow
/// sink, memory grows without limit. Shutdown drains with no timeout: a
/// deferred supplier that never returns will block [`shutdown`] (and `Drop`)
/// indefinitely.
///
/// [`shutdown`]: AsyncDispatcher::shutdown
///
/// # Example
///
/// ```
/// use deferlog::{AsyncDispatcher, LogLevel};
///
/// let dispatcher = AsyncDispatcher::builder()
///     .min_level(LogLevel::Info)
///     .build();
///
/// dispatcher.info("service started");
/// dispatcher
///     .event(LogLevel::Debug)
///     .message("card {}")
///     .arg_with(|| "**** **** **** 4242".to_string()) // never runs: DEBUG is gated off
///     .log();
///
/// dispatcher.shutdown(); // blocks until the queue is drained
/// ```
pub struct AsyncDispatcher {
    gate: LevelGate,
    sender: Mutex<Option<Sender<LogTask>>>,
    receiver: Mutex<Option<Receiver<LogTask>>>,
    sink_slot: Mutex<Option<Box<dyn Sink>>>,
    started: AtomicBool,
    handle: Mutex<Option<thread::JoinHandle<()>>>,
    state: Arc<StateCell>,
    metrics: Arc<DispatcherMetrics>,
}

impl AsyncDispatcher {
    /// Create a dispatcher with the default configuration: level from the
    /// `LOGGING_LEVEL` environment variable (INFO fallback) and a console
    /// sink.
    #[must_use]
    pub fn new() -> Self {
        Self::builder().build()
    }

    /// Create a builder for AsyncDispatcher
    #[must_use]
    pub fn builder() -> DispatcherBuilder {
        DispatcherBuilder::new()
    }

    fn with_parts(gate: LevelGate, sink: Box<dyn Sink>) -> Self {
        let (sender, receiver) = unbounded();
        Self {
            gate,
            sender: Mutex::new(Some(sender)),
            receiver: Mutex::new(Some(receiver)),
            sink_slot: Mutex::new(Some(sink)),
            started: AtomicBool::new(false),
            handle: Mutex::new(None),
            state: Arc::new(StateCell::new()),
            metrics: Arc::new(DispatcherMetrics::new()),
        }
    }

    /// Start an event at the given level
    pub fn event(&self, level: LogLevel) -> EventBuilder<'_> {
        EventBuilder::new(self, level)
    }

    #[inline]
    pub fn trace(&self, pattern: impl Into<String>) {
        self.event(LogLevel::Trace).log_with(pattern);
    }

    #[inline]
    pub fn debug(&self, pattern: impl Into<String>) {
        self.event(LogLevel::Debug).log_with(pattern);
    }

    #[inline]
    pub fn info(&self, pattern: impl Into<String>) {
        self.event(LogLevel::Info).log_with(pattern);
    }

    #[inline]
    pub fn warn(&self, pattern: impl Into<String>) {
        self.event(LogLevel::Warn).log_with(pattern);
    }

    #[inline]
    pub fn error(&self, pattern: impl Into<String>) {
        self.event(LogLevel::Error).log_with(pattern);
    }

    /// Minimum severity this dispatcher accepts
    pub fn min_level(&self) -> LogLevel {
        self.gate.min_level()
    }

    /// Current worker lifecycle state
    pub fn worker_state(&self) -> WorkerState {
        self.state.load()
    }

    /// Metrics for observability
    pub fn metrics(&self) -> &DispatcherMetrics {
        &self.metrics
    }

    /// Spawn the worker on first use.
    ///
    /// The compare-exchange guard makes startup race-safe: any number of
    /// threads may race the first submission, exactly one spawns the worker.
    fn ensure_started(&self) {
        if self.started.load(Ordering::Acquire) {
            return;
        }

        let mut handle = self.handle.lock();
        if self
            .started
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return;
        }

        let receiver = self.receiver.lock().take();
        let sink = self.sink_slot.lock().take();
        if let (Some(receiver), Some(sink)) = (receiver, sink) {
            let state = Arc::clone(&self.state);
            let metrics = Arc::clone(&self.metrics);
            state.store(WorkerState::Running);

            match thread::Builder::new()
                .name(WORKER_THREAD_NAME.to_string())
                .spawn(move || worker::run(receiver, sink, state, metrics))
            {
                Ok(joiner) => *handle = Some(joiner),
                Err(e) => {
                    eprintln!("[DISPATCH CRITICAL] failed to spawn worker thread: {}", e);
                    self.state.store(WorkerState::Stopped);
                }
            }
        }
    }

    /// Stop intake and block until every queued task has been processed.
    ///
    /// Transitions the worker Running → Draining, closes the channel (which
    /// wakes a worker blocked on an empty queue), and joins the worker. The
    /// drain has no timeout and never cancels a task mid-evaluation.
    /// Idempotent; later submissions are rejected and counted in metrics.
    ///
    /// Dropping the dispatcher performs the same drain.
    pub fn shutdown(&self) {
        let sender = self.sender.lock().take();
        if sender.is_none() {
            return;
        }
        if self.state.load() == WorkerState::Running {
            self.state.store(WorkerState::Draining);
        }
        drop(sender);

        let handle = {
            let mut slot = self.handle.lock();
            // Claim startup so a racing first submission cannot spawn a
            // worker mid-shutdown.
            let _ = self.started.compare_exchange(
                false,
                true,
                Ordering::AcqRel,
                Ordering::Acquire,
            );
            slot.take()
        };

        match handle {
            Some(handle) => {
                if handle.join().is_err() {
                    eprintln!("[DISPATCH CRITICAL] worker thread panicked during drain");
                }
            }
            None => {
                // Worker never ran, so nothing was ever queued.
                self.receiver.lock().take();
                self.sink_slot.lock().take();
            }
        }
        self.state.store(WorkerState::Stopped);
    }
}

impl Dispatch for AsyncDispatcher {
    #[inline]
    fn is_enabled(&self, level: LogLevel) -> bool {
        self.gate.is_enabled(level)
    }

    fn submit(&self, task: LogTask) {
        self.ensure_started();
        let sender = self.sender.lock();
        match sender.as_ref() {
            Some(sender) => {
                if sender.send(task).is_ok() {
                    self.metrics.record_submitted();
                } else {
                    self.metrics.record_rejected();
                }
            }
            None => {
                self.metrics.record_rejected();
            }
        }
    }
}

impl Default for AsyncDispatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for AsyncDispatcher {
    fn drop(&mut self) {
        self.shutdown();
    }
}

/// Builder for constructing AsyncDispatcher with a fluent API
///
/// # Example
/// ```no_run
/// use deferlog::{AsyncDispatcher, JsonSink, LogLevel};
///
/// let dispatcher = AsyncDispatcher::builder()
///     .level_source("debug") // raw `logging.level` value; INFO fallback
///     .sink(JsonSink::new("app.jsonl").unwrap())
///     .build();
/// ```
pub struct DispatcherBuilder {
    min_level: Option<LogLevel>,
    level_source: Option<String>,
    sink: Option<Box<dyn Sink>>,
}

impl DispatcherBuilder {
    pub fn new() -> Self {
        Self {
            min_level: None,
            level_source: None,
            sink: None,
        }
    }

    /// Set the minimum level explicitly, bypassing configuration resolution
    #[must_use = "builder methods return a new value"]
    pub fn min_level(mut self, level: LogLevel) -> Self {
        self.min_level = Some(level);
        self
    }

    /// Provide the raw `logging.level` configuration value.
    ///
    /// Unrecognized values fall back to INFO.
    #[must_use = "builder methods return a new value"]
    pub fn level_source(mut self, value: impl Into<String>) -> Self {
        self.level_source = Some(value.into());
        self
    }

    /// Set the sink receiving finished records.
    ///
    /// Defaults to [`ConsoleSink`] when not called.
    #[must_use = "builder methods return a new value"]
    pub fn sink<S: Sink + 'static>(mut self, sink: S) -> Self {
        self.sink = Some(Box::new(sink));
        self
    }

    /// Build the AsyncDispatcher
    pub fn build(self) -> AsyncDispatcher {
        let gate = if let Some(level) = self.min_level {
            LevelGate::new(level)
        } else if let Some(source) = self.level_source {
            LevelGate::from_source(Some(&source))
        } else {
            LevelGate::from_env()
        };
        let sink = self
            .sink
            .unwrap_or_else(|| Box::new(ConsoleSink::new()));
        AsyncDispatcher::with_parts(gate, sink)
    }
}

impl Default for DispatcherBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_basic() {
        let dispatcher = AsyncDispatcher::builder()
            .min_level(LogLevel::Debug)
            .build();

        assert_eq!(dispatcher.min_level(), LogLevel::Debug);
        assert_eq!(dispatcher.worker_state(), WorkerState::Idle);
    }

    #[test]
    fn test_builder_level_source_fallback() {
        let dispatcher = AsyncDispatcher::builder()
            .level_source("NOISY")
            .build();

        assert_eq!(dispatcher.min_level(), LogLevel::Info);
    }

    #[test]
    fn test_builder_default() {
        let builder = DispatcherBuilder::default();
        let dispatcher = builder.build();
        assert_eq!(dispatcher.metrics().submitted_count(), 0);
    }

    #[test]
    fn test_shutdown_idempotent() {
        let dispatcher = AsyncDispatcher::builder()
            .min_level(LogLevel::Trace)
            .build();

        dispatcher.shutdown();
        dispatcher.shutdown();
        assert_eq!(dispatcher.worker_state(), WorkerState::Stopped);
    }

    #[test]
    fn test_shutdown_without_start_stops_directly() {
        let dispatcher = AsyncDispatcher::new();
        assert_eq!(dispatcher.worker_state(), WorkerState::Idle);
        dispatcher.shutdown();
        assert_eq!(dispatcher.worker_state(), WorkerState::Stopped);
    }

    #[test]
    fn test_submit_after_shutdown_rejected() {
        let dispatcher = AsyncDispatcher::builder()
            .min_level(LogLevel::Trace)
            .build();

        dispatcher.shutdown();
        dispatcher.info("too late");
        assert_eq!(dispatcher.metrics().rejected_count(), 1);
        assert_eq!(dispatcher.metrics().submitted_count(), 0);
    }
}
