// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use async_trait::async_trait;
use serde::Deserialize;

use super::{text_input, text_output};
use crate::traits::{Record, Transform};

/// Configuration for the Prefix Suffix Adder unit
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PrefixSuffixConfig {
    pub prefix: Option<String>,
    pub suffix: Option<String>,
}

/// Prefix Suffix Adder unit - wraps the `text` input
pub struct PrefixSuffixAdderUnit {
    config: PrefixSuffixConfig,
}

impl PrefixSuffixAdderUnit {
    pub fn new(config: PrefixSuffixConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl Transform for PrefixSuffixAdderUnit {
    async fn transform(&self, inputs: Record) -> anyhow::Result<Record> {
        let input = text_input(&inputs)?;
        let mut result = String::new();

        if let Some(prefix) = &self.config.prefix {
            result.push_str(prefix);
        }

        result.push_str(input);

        if let Some(suffix) = &self.config.suffix {
            result.push_str(suffix);
        }

        Ok(text_output(result))
    }
}
