// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

mod config;
mod execution;
mod loader;

pub use config::ValidationError;
pub use execution::{ExecutionError, UnitError};
pub use loader::LoaderError;
