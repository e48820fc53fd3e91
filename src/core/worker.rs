//! Single-consumer worker loop
//!
//! Exactly one worker thread serves a dispatcher. Deferred evaluations are
//! therefore fully serialized: a slow supplier in one task delays every
//! subsequent task. That trade-off (ordering and simplicity over
//! throughput) is part of the contract; do not replace the single consumer
//! with a pool.

use super::error::DispatchError;
use super::metrics::DispatcherMetrics;
use super::sink::Sink;
use super::task::LogTask;
use super::value::panic_message;
use crossbeam_channel::Receiver;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;

/// Lifecycle of the worker thread
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum WorkerState {
    /// Constructed, worker thread not yet spawned
    Idle = 0,
    /// Worker consuming the queue
    Running = 1,
    /// Intake closed, queued tasks still being processed
    Draining = 2,
    /// Terminal: queue fully drained, worker exited
    Stopped = 3,
}

/// Atomic cell holding a [`WorkerState`]
#[derive(Debug)]
pub(crate) struct StateCell(AtomicU8);

impl StateCell {
    pub(crate) const fn new() -> Self {
        Self(AtomicU8::new(WorkerState::Idle as u8))
    }

    pub(crate) fn load(&self) -> WorkerState {
        match self.0.load(Ordering::Acquire) {
            0 => WorkerState::Idle,
            1 => WorkerState::Running,
            2 => WorkerState::Draining,
            _ => WorkerState::Stopped,
        }
    }

    pub(crate) fn store(&self, state: WorkerState) {
        self.0.store(state as u8, Ordering::Release);
    }
}

/// Worker loop body.
///
/// Blocks on the queue until the channel is closed; crossbeam delivers every
/// buffered task before `recv` reports disconnection, so the shutdown drain
/// falls out of the loop itself.
pub(crate) fn run(
    receiver: Receiver<LogTask>,
    mut sink: Box<dyn Sink>,
    state: Arc<StateCell>,
    metrics: Arc<DispatcherMetrics>,
) {
    while let Ok(task) = receiver.recv() {
        process(task, sink.as_mut(), &metrics);
    }

    if let Err(e) = sink.flush() {
        eprintln!("[DISPATCH ERROR] final flush failed: {}", e);
    }
    state.store(WorkerState::Stopped);
}

/// Process one task: resolve deferred values, then emit.
///
/// Failures are confined to the task at hand. A panicking supplier is
/// reported and replaced with a placeholder; the rest of the task still
/// resolves and emits. A failing or panicking sink is reported and the loop
/// moves on.
fn process(task: LogTask, sink: &mut dyn Sink, metrics: &DispatcherMetrics) {
    let (record, failures) = task.into_record();
    for detail in failures {
        metrics.record_eval_failure();
        eprintln!(
            "[DISPATCH ERROR] {}",
            DispatchError::evaluation(detail)
        );
    }

    let emit_result = panic::catch_unwind(AssertUnwindSafe(|| sink.emit(&record)));
    match emit_result {
        Ok(Ok(())) => {
            metrics.record_emitted();
        }
        Ok(Err(e)) => {
            metrics.record_sink_failure();
            eprintln!(
                "[DISPATCH ERROR] {}",
                DispatchError::sink_emit(sink.name(), e.to_string())
            );
        }
        Err(payload) => {
            metrics.record_sink_failure();
            eprintln!(
                "[DISPATCH CRITICAL] sink '{}' panicked: {}",
                sink.name(),
                panic_message(payload.as_ref())
            );
        }
    }
}
