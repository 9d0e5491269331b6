// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::json;

use crate::traits::{Record, Router, Transform};

/// Returns its inputs unchanged
pub struct EchoUnit;

#[async_trait]
impl Transform for EchoUnit {
    async fn transform(&self, inputs: Record) -> anyhow::Result<Record> {
        Ok(inputs)
    }
}

/// Emits a single `value` field
pub struct ValueUnit {
    pub value: serde_json::Value,
}

impl ValueUnit {
    pub fn new(value: serde_json::Value) -> Self {
        Self { value }
    }
}

#[async_trait]
impl Transform for ValueUnit {
    async fn transform(&self, _inputs: Record) -> anyhow::Result<Record> {
        let mut out = Record::new();
        out.insert("value".into(), self.value.clone());
        Ok(out)
    }
}

/// A unit that always fails for testing failure scenarios
pub struct FailingUnit {
    pub message: String,
}

impl FailingUnit {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[async_trait]
impl Transform for FailingUnit {
    async fn transform(&self, _inputs: Record) -> anyhow::Result<Record> {
        anyhow::bail!("{}", self.message)
    }
}

/// Sleeps before echoing its inputs
pub struct SleepingUnit {
    pub delay: Duration,
}

impl SleepingUnit {
    pub fn millis(ms: u64) -> Self {
        Self {
            delay: Duration::from_millis(ms),
        }
    }
}

#[async_trait]
impl Transform for SleepingUnit {
    async fn transform(&self, inputs: Record) -> anyhow::Result<Record> {
        tokio::time::sleep(self.delay).await;
        Ok(inputs)
    }
}

/// Counts how many times it ran; emits the count as `runs`
#[derive(Clone, Default)]
pub struct CountingUnit {
    pub runs: Arc<AtomicUsize>,
}

impl CountingUnit {
    pub fn count(&self) -> usize {
        self.runs.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Transform for CountingUnit {
    async fn transform(&self, _inputs: Record) -> anyhow::Result<Record> {
        let runs = self.runs.fetch_add(1, Ordering::SeqCst) + 1;
        let mut out = Record::new();
        out.insert("runs".into(), json!(runs));
        Ok(out)
    }
}

/// Router with a fixed decision
pub struct StaticRouter {
    pub routes: Vec<String>,
}

impl StaticRouter {
    pub fn new(routes: &[&str]) -> Self {
        Self {
            routes: routes.iter().map(|r| r.to_string()).collect(),
        }
    }
}

#[async_trait]
impl Router for StaticRouter {
    async fn route(&self, _inputs: Record) -> anyhow::Result<Vec<String>> {
        Ok(self.routes.clone())
    }
}

/// A router that always fails
pub struct FailingRouter {
    pub message: String,
}

impl FailingRouter {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[async_trait]
impl Router for FailingRouter {
    async fn route(&self, _inputs: Record) -> anyhow::Result<Vec<String>> {
        anyhow::bail!("{}", self.message)
    }
}
