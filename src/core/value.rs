//! Log argument values
//!
//! This module provides:
//! - `ArgValue`: the rendered form of a log argument
//! - `LogValue`: a literal argument, or a deferred computation that the
//!   worker thread resolves exactly once

use serde::{Deserialize, Serialize};
use std::fmt;
use std::panic::{self, AssertUnwindSafe};

/// Rendered value of a single log argument
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ArgValue {
    String(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    Null,
}

impl fmt::Display for ArgValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgValue::String(s) => write!(f, "{}", s),
            ArgValue::Int(i) => write!(f, "{}", i),
            ArgValue::Float(fl) => write!(f, "{}", fl),
            ArgValue::Bool(b) => write!(f, "{}", b),
            ArgValue::Null => write!(f, "null"),
        }
    }
}

impl From<String> for ArgValue {
    fn from(s: String) -> Self {
        ArgValue::String(s)
    }
}

impl From<&str> for ArgValue {
    fn from(s: &str) -> Self {
        ArgValue::String(s.to_string())
    }
}

impl From<i64> for ArgValue {
    fn from(i: i64) -> Self {
        ArgValue::Int(i)
    }
}

impl From<i32> for ArgValue {
    fn from(i: i32) -> Self {
        ArgValue::Int(i as i64)
    }
}

impl From<u32> for ArgValue {
    fn from(i: u32) -> Self {
        ArgValue::Int(i as i64)
    }
}

impl From<usize> for ArgValue {
    fn from(i: usize) -> Self {
        ArgValue::Int(i as i64)
    }
}

impl From<f64> for ArgValue {
    fn from(f: f64) -> Self {
        ArgValue::Float(f)
    }
}

impl From<f32> for ArgValue {
    fn from(f: f32) -> Self {
        ArgValue::Float(f as f64)
    }
}

impl From<bool> for ArgValue {
    fn from(b: bool) -> Self {
        ArgValue::Bool(b)
    }
}

/// A log argument as captured at the call site.
///
/// `Deferred` holds a computation that has not run yet; the worker resolves
/// it exactly once, off the calling thread.
pub enum LogValue {
    Literal(ArgValue),
    Deferred(Box<dyn FnOnce() -> ArgValue + Send>),
}

impl LogValue {
    pub fn literal(value: impl Into<ArgValue>) -> Self {
        LogValue::Literal(value.into())
    }

    pub fn deferred<F, V>(supplier: F) -> Self
    where
        F: FnOnce() -> V + Send + 'static,
        V: Into<ArgValue>,
    {
        LogValue::Deferred(Box::new(move || supplier().into()))
    }

    /// Resolve to a rendered value, running the deferred computation if
    /// there is one.
    ///
    /// A panicking supplier yields `ArgValue::Null` plus the panic message;
    /// the caller decides how to report it.
    pub(crate) fn resolve(self) -> (ArgValue, Option<String>) {
        match self {
            LogValue::Literal(value) => (value, None),
            LogValue::Deferred(supplier) => {
                match panic::catch_unwind(AssertUnwindSafe(supplier)) {
                    Ok(value) => (value, None),
                    Err(payload) => (ArgValue::Null, Some(panic_message(payload.as_ref()))),
                }
            }
        }
    }
}

impl fmt::Debug for LogValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogValue::Literal(value) => f.debug_tuple("Literal").field(value).finish(),
            LogValue::Deferred(_) => f.write_str("Deferred(<pending>)"),
        }
    }
}

/// Extract a readable message from a panic payload
pub(crate) fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
