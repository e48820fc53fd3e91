//! Console sink implementation

use crate::core::{LogLevel, LogRecord, Result, Sink};
#[cfg(feature = "console")]
use colored::Colorize;

pub struct ConsoleSink {
    use_colors: bool,
}

impl ConsoleSink {
    pub fn new() -> Self {
        Self { use_colors: true }
    }

    pub fn with_colors(use_colors: bool) -> Self {
        Self { use_colors }
    }

    fn format_level(&self, level: LogLevel) -> String {
        let plain = format!("{:5}", level.to_str());
        #[cfg(feature = "console")]
        if self.use_colors {
            return plain.color(level.color_code()).to_string();
        }
        plain
    }

    fn format_text(&self, record: &LogRecord) -> String {
        format!(
            "[{}] [{}] {} - {}",
            record.timestamp.format("%Y-%m-%dT%H:%M:%S%.3fZ"),
            self.format_level(record.level),
            record.thread_name.as_ref().unwrap_or(&record.thread_id),
            render_pattern(&record.message, record),
        )
    }
}

impl Default for ConsoleSink {
    fn default() -> Self {
        Self::new()
    }
}

impl Sink for ConsoleSink {
    fn emit(&mut self, record: &LogRecord) -> Result<()> {
        let output = self.format_text(record);

        // Route errors to stderr, everything else to stdout
        match record.level {
            LogLevel::Error => eprintln!("{}", output),
            _ => println!("{}", output),
        }
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        use std::io::Write;
        std::io::stdout().flush()?;
        std::io::stderr().flush()?;
        Ok(())
    }

    fn name(&self) -> &str {
        "console"
    }
}

/// Substitute `{}` placeholders with the record's arguments, in order.
///
/// Placeholders beyond the argument list stay literal; arguments beyond the
/// placeholders are appended after the message.
fn render_pattern(pattern: &str, record: &LogRecord) -> String {
    let mut out = String::with_capacity(pattern.len() + 16);
    let mut args = record.args.iter();
    let mut rest = pattern;

    while let Some(pos) = rest.find("{}") {
        out.push_str(&rest[..pos]);
        match args.next() {
            Some(arg) => out.push_str(&arg.to_string()),
            None => out.push_str("{}"),
        }
        rest = &rest[pos + 2..];
    }
    out.push_str(rest);

    for leftover in args {
        out.push(' ');
        out.push_str(&leftover.to_string());
    }
    out
}
