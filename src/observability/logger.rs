// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::fmt;
use std::sync::Arc;

use serde::Deserialize;

use crate::observability::messages::StructuredLog;

/// Severity levels a caller-supplied logger receives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogLevel {
    Info,
    Warn,
    Error,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        };
        f.write_str(label)
    }
}

/// Caller-supplied log callback.
pub type LogFn = dyn Fn(&str, LogLevel) + Send + Sync;

/// Destination for engine log messages.
///
/// The default logger forwards each message to `tracing` with its structured
/// fields. A custom logger receives the rendered message text and its level instead,
/// and `tracing` is bypassed.
#[derive(Clone, Default)]
pub struct Logger {
    sink: Option<Arc<LogFn>>,
}

impl Logger {
    pub fn custom<F>(sink: F) -> Self
    where
        F: Fn(&str, LogLevel) + Send + Sync + 'static,
    {
        Self {
            sink: Some(Arc::new(sink)),
        }
    }

    pub fn is_custom(&self) -> bool {
        self.sink.is_some()
    }

    pub fn emit<M: StructuredLog>(&self, message: &M) {
        match &self.sink {
            Some(sink) => sink(&message.to_string(), message.level()),
            None => message.log(),
        }
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("custom", &self.is_custom())
            .finish()
    }
}
