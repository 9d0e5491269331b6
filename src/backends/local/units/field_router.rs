// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::collections::BTreeMap;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;

use crate::traits::{Record, Router};

fn default_field() -> String {
    "value".to_string()
}

/// Configuration for the Field Router unit
///
/// # Example
/// ```yaml
/// field: sentiment
/// routes:
///   positive: thank_you
///   negative: [escalate, apologize]
/// default: log_only
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct FieldRouterConfig {
    /// Input whose value selects the route
    #[serde(default = "default_field")]
    pub field: String,
    /// Input value -> unit name(s)
    #[serde(default)]
    pub routes: BTreeMap<String, RouteTargets>,
    /// Unit(s) chosen when no route matches
    #[serde(default)]
    pub default: Option<RouteTargets>,
}

/// One unit name or a list of them.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum RouteTargets {
    One(String),
    Many(Vec<String>),
}

impl RouteTargets {
    fn to_vec(&self) -> Vec<String> {
        match self {
            RouteTargets::One(name) => vec![name.clone()],
            RouteTargets::Many(names) => names.clone(),
        }
    }
}

/// Field Router unit - chooses the next units from the value of one input
///
/// Strings match route keys directly; numbers and booleans match their JSON text
/// (`42`, `true`). Without a match the `default` targets are chosen, or nothing.
pub struct FieldRouterUnit {
    config: FieldRouterConfig,
}

impl FieldRouterUnit {
    pub fn new(config: FieldRouterConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl Router for FieldRouterUnit {
    async fn route(&self, inputs: Record) -> anyhow::Result<Vec<String>> {
        let key = match inputs.get(&self.config.field) {
            Some(Value::String(text)) => Some(text.clone()),
            Some(Value::Null) | None => None,
            Some(other) => Some(other.to_string()),
        };

        let targets = key
            .and_then(|key| self.config.routes.get(&key))
            .or(self.config.default.as_ref());

        Ok(targets.map(RouteTargets::to_vec).unwrap_or_default())
    }
}
