//! Minimum-severity gate
//!
//! The gate is resolved once at dispatcher construction and never mutated
//! afterwards, so producers can check it without synchronization.

use super::level::LogLevel;

/// Environment variable consulted when no explicit level is configured.
///
/// Holds the `logging.level` option: one of TRACE, DEBUG, INFO, WARN, ERROR
/// (case-insensitive).
pub const LOGGING_LEVEL_ENV: &str = "LOGGING_LEVEL";

/// Decides whether a severity is enabled.
///
/// An unreadable or unrecognized configuration value falls back to
/// [`LogLevel::Info`] without surfacing an error.
///
/// # Example
///
/// ```
/// use deferlog::{LevelGate, LogLevel};
///
/// let gate = LevelGate::from_source(Some("warn"));
/// assert!(!gate.is_enabled(LogLevel::Info));
/// assert!(gate.is_enabled(LogLevel::Error));
///
/// // Garbage falls back to INFO
/// let gate = LevelGate::from_source(Some("verbose"));
/// assert_eq!(gate.min_level(), LogLevel::Info);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelGate {
    min_level: LogLevel,
}

impl LevelGate {
    pub fn new(min_level: LogLevel) -> Self {
        Self { min_level }
    }

    /// Resolve the gate from a raw configuration value.
    pub fn from_source(value: Option<&str>) -> Self {
        let min_level = value
            .and_then(|s| s.parse::<LogLevel>().ok())
            .unwrap_or_default();
        Self { min_level }
    }

    /// Resolve the gate from the [`LOGGING_LEVEL_ENV`] environment variable.
    pub fn from_env() -> Self {
        Self::from_source(std::env::var(LOGGING_LEVEL_ENV).ok().as_deref())
    }

    #[inline]
    pub fn is_enabled(&self, level: LogLevel) -> bool {
        level >= self.min_level
    }

    pub fn min_level(&self) -> LogLevel {
        self.min_level
    }
}

impl Default for LevelGate {
    fn default() -> Self {
        Self::from_env()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gate_threshold() {
        let gate = LevelGate::new(LogLevel::Warn);
        assert!(!gate.is_enabled(LogLevel::Trace));
        assert!(!gate.is_enabled(LogLevel::Debug));
        assert!(!gate.is_enabled(LogLevel::Info));
        assert!(gate.is_enabled(LogLevel::Warn));
        assert!(gate.is_enabled(LogLevel::Error));
    }

    #[test]
    fn test_from_source_parses_known_names() {
        assert_eq!(
            LevelGate::from_source(Some("TRACE")).min_level(),
            LogLevel::Trace
        );
        assert_eq!(
            LevelGate::from_source(Some("error")).min_level(),
            LogLevel::Error
        );
        assert_eq!(
            LevelGate::from_source(Some(" Debug ")).min_level(),
            LogLevel::Debug
        );
    }

    #[test]
    fn test_from_source_falls_back_to_info() {
        assert_eq!(LevelGate::from_source(None).min_level(), LogLevel::Info);
        assert_eq!(
            LevelGate::from_source(Some("")).min_level(),
            LogLevel::Info
        );
        assert_eq!(
            LevelGate::from_source(Some("VERBOSE")).min_level(),
            LogLevel::Info
        );
    }
}
