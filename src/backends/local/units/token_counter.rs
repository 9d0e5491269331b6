// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use async_trait::async_trait;
use serde::Serialize;

use super::text_input;
use crate::traits::{Record, Transform};

/// Token Counter unit - counts characters, words and lines of the `text` input
pub struct TokenCounterUnit;

impl TokenCounterUnit {
    pub fn new() -> Self {
        Self
    }
}

impl Default for TokenCounterUnit {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Serialize)]
struct TokenCountResult {
    char_count: usize,
    word_count: usize,
    line_count: usize,
}

#[async_trait]
impl Transform for TokenCounterUnit {
    async fn transform(&self, inputs: Record) -> anyhow::Result<Record> {
        let text = text_input(&inputs)?;

        let result = TokenCountResult {
            char_count: text.chars().count(),
            word_count: text.split_whitespace().count(),
            line_count: text.lines().count().max(1), // At least 1 line even if empty
        };

        match serde_json::to_value(result)? {
            serde_json::Value::Object(record) => Ok(record),
            other => anyhow::bail!("token counts serialized to {}, expected an object", other),
        }
    }
}
