//! Reference sink implementations
//!
//! The dispatch core hands finished records to a [`Sink`](crate::core::Sink)
//! and never renders anything itself. These are the stock consumers.

pub mod console;
pub mod json;

pub use console::ConsoleSink;
pub use json::JsonSink;
