//! Diagnostics sink.
//!
//! Generators hand free-form operator text (solver logs and the like) to a
//! sink they were constructed with instead of writing to a global logger,
//! so concurrent runs stay independent and tests can capture the output.

use parking_lot::Mutex;
use std::sync::Arc;

/// Receiver of free-form diagnostic text. Nothing downstream parses it.
pub trait DiagnosticsSink: Send + Sync {
    fn log(&self, text: &str);
}

/// Forwards diagnostics to `tracing` at debug level.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl DiagnosticsSink for TracingSink {
    fn log(&self, text: &str) {
        tracing::debug!(target: "vbmap::diag", "{}", text);
    }
}

/// Keeps every message in memory.
#[derive(Debug, Default)]
pub struct CapturingSink {
    messages: Mutex<Vec<String>>,
}

impl CapturingSink {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().clone()
    }

    /// All messages joined with newlines.
    pub fn text(&self) -> String {
        self.messages.lock().join("\n")
    }
}

impl DiagnosticsSink for CapturingSink {
    fn log(&self, text: &str) {
        self.messages.lock().push(text.to_owned());
    }
}
