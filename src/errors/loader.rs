// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Errors for pipeline definition loading and built-in unit instantiation.

use thiserror::Error;

use super::ValidationError;

#[derive(Debug, Error)]
pub enum LoaderError {
    #[error("Failed to read pipeline definition: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid YAML pipeline definition: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid TOML pipeline definition: {0}")]
    Toml(#[from] toml::de::Error),

    /// The definition names a built-in unit that does not exist
    #[error("Unit '{name}' uses unknown built-in '{implementation}'")]
    UnknownImplementation { name: String, implementation: String },

    /// The built-in unit rejected its options
    #[error("Unit '{name}' has invalid options: {reason}")]
    InvalidOptions { name: String, reason: String },

    #[error("Invalid execution options: {reason}")]
    InvalidExecutionOptions { reason: String },

    #[error(transparent)]
    Validation(#[from] ValidationError),
}
