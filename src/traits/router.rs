// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::future::Future;

use async_trait::async_trait;

use super::Record;

/// A unit body that decides which units run next.
///
/// A router consumes inputs exactly like a [`super::Transform`] but evaluates to a
/// list of unit names instead of business data. Names that do not exist in the
/// pipeline are logged and ignored by the scheduler.
#[async_trait]
pub trait Router: Send + Sync {
    async fn route(&self, inputs: Record) -> anyhow::Result<Vec<String>>;
}

/// Adapter turning an async closure into a [`Router`].
pub struct RouterFn<F> {
    func: F,
}

impl<F, Fut> RouterFn<F>
where
    F: Fn(Record) -> Fut + Send + Sync,
    Fut: Future<Output = anyhow::Result<Vec<String>>> + Send + 'static,
{
    pub fn new(func: F) -> Self {
        Self { func }
    }
}

#[async_trait]
impl<F, Fut> Router for RouterFn<F>
where
    F: Fn(Record) -> Fut + Send + Sync,
    Fut: Future<Output = anyhow::Result<Vec<String>>> + Send + 'static,
{
    async fn route(&self, inputs: Record) -> anyhow::Result<Vec<String>> {
        (self.func)(inputs).await
    }
}
