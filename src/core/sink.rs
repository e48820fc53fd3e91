//! Sink trait for finished log records
//!
//! The sink is the external consumer of the pipeline: it receives fully
//! evaluated records and owns all rendering and output. The worker thread
//! owns the sink exclusively, so implementations need `Send` but not `Sync`.

use super::{error::Result, task::LogRecord};

pub trait Sink: Send {
    fn emit(&mut self, record: &LogRecord) -> Result<()>;
    fn flush(&mut self) -> Result<()>;
    fn name(&self) -> &str;
}
