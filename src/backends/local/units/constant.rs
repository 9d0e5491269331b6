// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use async_trait::async_trait;

use crate::traits::{Record, Transform};

/// Constant unit - emits its options as its output record
///
/// Typically used as an entry unit to seed a pipeline from a definition file.
pub struct ConstantUnit {
    record: Record,
}

impl ConstantUnit {
    pub fn new(record: Record) -> Self {
        Self { record }
    }
}

#[async_trait]
impl Transform for ConstantUnit {
    async fn transform(&self, _inputs: Record) -> anyhow::Result<Record> {
        Ok(self.record.clone())
    }
}
