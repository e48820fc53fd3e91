//! JSON sink for machine-readable output

use crate::core::{LogRecord, Result, Sink};
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;

/// JSON file sink
///
/// Writes each record as a single-line JSON object (JSONL format),
/// compatible with log aggregation tools like ELK, Loki, etc.
pub struct JsonSink {
    writer: BufWriter<File>,
    pretty: bool,
}

impl JsonSink {
    /// Create a new JSON sink appending to the given path
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;

        Ok(Self {
            writer: BufWriter::new(file),
            pretty: false,
        })
    }

    /// Create a new JSON sink with pretty printing
    pub fn new_pretty<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;

        Ok(Self {
            writer: BufWriter::new(file),
            pretty: true,
        })
    }
}

impl Sink for JsonSink {
    fn name(&self) -> &str {
        "json"
    }

    fn emit(&mut self, record: &LogRecord) -> Result<()> {
        let json = if self.pretty {
            serde_json::to_string_pretty(record)?
        } else {
            serde_json::to_string(record)?
        };

        writeln!(self.writer, "{}", json)?;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}
