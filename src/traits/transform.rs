// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::future::Future;

use async_trait::async_trait;

use super::Record;

/// A unit body that turns resolved inputs into an output record.
///
/// Implementations are opaque to the engine: they may do network calls, sleep, or
/// anything else. The supervisor only races them against the unit timeout.
#[async_trait]
pub trait Transform: Send + Sync {
    async fn transform(&self, inputs: Record) -> anyhow::Result<Record>;
}

/// Adapter turning an async closure into a [`Transform`].
///
/// ```rust
/// use the_switchyard::traits::{Record, TransformFn};
/// use serde_json::json;
///
/// let shout = TransformFn::new(|inputs: Record| async move {
///     let text = inputs.get("text").and_then(|v| v.as_str()).unwrap_or_default();
///     let mut out = Record::new();
///     out.insert("text".into(), json!(text.to_uppercase()));
///     Ok(out)
/// });
/// # let _ = shout;
/// ```
pub struct TransformFn<F> {
    func: F,
}

impl<F, Fut> TransformFn<F>
where
    F: Fn(Record) -> Fut + Send + Sync,
    Fut: Future<Output = anyhow::Result<Record>> + Send + 'static,
{
    pub fn new(func: F) -> Self {
        Self { func }
    }
}

#[async_trait]
impl<F, Fut> Transform for TransformFn<F>
where
    F: Fn(Record) -> Fut + Send + Sync,
    Fut: Future<Output = anyhow::Result<Record>> + Send + 'static,
{
    async fn transform(&self, inputs: Record) -> anyhow::Result<Record> {
        (self.func)(inputs).await
    }
}
