// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Diagnostics channel of the converter.
//!
//! Every message goes to `tracing` under the `cadbridge` target and, when
//! one is installed, to a caller supplied [`LogSink`].

use std::fmt;

/// Message severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum LogLevel {
    Info,
    Warning,
    Error,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            LogLevel::Info => "info",
            LogLevel::Warning => "warning",
            LogLevel::Error => "error",
        })
    }
}

/// Callback receiving every diagnostic message.
pub type LogSink = Box<dyn Fn(&str, LogLevel)>;

/// Logger shared by one conversion.
#[derive(Default)]
pub struct BridgeLogger {
    sink: Option<LogSink>,
}

impl BridgeLogger {
    /// Logger without a callback; messages only reach `tracing`.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_sink(sink: impl Fn(&str, LogLevel) + 'static) -> Self {
        Self {
            sink: Some(Box::new(sink)),
        }
    }

    pub fn has_sink(&self) -> bool {
        self.sink.is_some()
    }

    pub fn log(&self, message: &str, level: LogLevel) {
        match level {
            LogLevel::Info => tracing::info!(target: "cadbridge", "{message}"),
            LogLevel::Warning => tracing::warn!(target: "cadbridge", "{message}"),
            LogLevel::Error => tracing::error!(target: "cadbridge", "{message}"),
        }
        if let Some(sink) = &self.sink {
            sink(message, level);
        }
    }

    #[inline]
    pub fn info(&self, message: &str) {
        self.log(message, LogLevel::Info);
    }

    #[inline]
    pub fn warn(&self, message: &str) {
        self.log(message, LogLevel::Warning);
    }

    #[inline]
    pub fn error(&self, message: &str) {
        self.log(message, LogLevel::Error);
    }

    /// Reports a failed call as `"<error> (in: <operation>)"`.
    pub fn failure(&self, error: &dyn fmt::Display, operation: &str, level: LogLevel) {
        self.log(&format!("{error} (in: {operation})"), level);
    }
}

impl fmt::Debug for BridgeLogger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BridgeLogger")
            .field("sink", &self.sink.as_ref().map(|_| "<callback>"))
            .finish()
    }
}
