// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use async_trait::async_trait;

use super::{text_input, text_output};
use crate::traits::{Record, Transform};

/// Reverse Text unit - reverses the `text` input
pub struct ReverseTextUnit;

impl ReverseTextUnit {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ReverseTextUnit {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Transform for ReverseTextUnit {
    async fn transform(&self, inputs: Record) -> anyhow::Result<Record> {
        let reversed: String = text_input(&inputs)?.chars().rev().collect();
        Ok(text_output(reversed))
    }
}
