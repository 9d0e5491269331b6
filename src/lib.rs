// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

pub mod backends;      // built-in unit implementations
pub mod config;        // references, validation, options, definition files
pub mod engine;        // scheduling, supervision, execution
pub mod errors;        // error handling
pub mod observability; // structured log messages
pub mod pipeline;      // units and pipelines
pub mod traits;        // Transform / Router abstractions
pub mod utils;         // retry / timeout helpers for unit bodies

pub use config::ExecutionOptions;
pub use engine::{execute, PipelineExecutor, PipelineResult};
pub use pipeline::{Pipeline, Unit};
