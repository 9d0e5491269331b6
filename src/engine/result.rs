// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Per-unit and per-run results.

use std::collections::BTreeMap;
use std::time::Duration;

use serde::Serialize;
use serde_json::Value;

use crate::config::consts::ROUTER_OUTPUT_FIELD;
use crate::errors::{ExecutionError, UnitError};
use crate::traits::Record;

/// What a unit produced: a data record, or a router's decision.
#[derive(Debug, Clone, PartialEq)]
pub enum UnitOutput {
    Record(Record),
    Routes(Vec<String>),
}

impl UnitOutput {
    /// The record downstream units resolve their inputs from.
    ///
    /// A router's decision is exposed as `{"routes": [...]}`.
    pub fn to_record(&self) -> Record {
        match self {
            UnitOutput::Record(record) => record.clone(),
            UnitOutput::Routes(routes) => {
                let mut record = Record::new();
                record.insert(
                    ROUTER_OUTPUT_FIELD.to_string(),
                    Value::from(routes.clone()),
                );
                record
            }
        }
    }

    pub fn as_record(&self) -> Option<&Record> {
        match self {
            UnitOutput::Record(record) => Some(record),
            UnitOutput::Routes(_) => None,
        }
    }

    pub fn routes(&self) -> Option<&[String]> {
        match self {
            UnitOutput::Routes(routes) => Some(routes),
            UnitOutput::Record(_) => None,
        }
    }

    fn to_value(&self) -> Value {
        match self {
            UnitOutput::Record(record) => Value::Object(record.clone()),
            UnitOutput::Routes(routes) => Value::from(routes.clone()),
        }
    }
}

/// Outcome of one attempted unit.
#[derive(Debug, Clone, PartialEq)]
pub struct UnitResult {
    pub unit_name: String,
    pub outcome: Result<UnitOutput, UnitError>,
    pub elapsed: Duration,
}

impl UnitResult {
    pub fn success(&self) -> bool {
        self.outcome.is_ok()
    }

    pub fn output(&self) -> Option<&UnitOutput> {
        self.outcome.as_ref().ok()
    }

    pub fn error(&self) -> Option<&UnitError> {
        self.outcome.as_ref().err()
    }
}

/// Outcome of one pipeline run.
///
/// `unit_results` lists every attempted unit in the order it settled; units that were
/// never reached do not appear. `outputs` holds the record of every unit that
/// succeeded, keyed by unit name.
#[derive(Debug, Clone)]
pub struct PipelineResult {
    pub success: bool,
    pub unit_results: Vec<UnitResult>,
    pub outputs: BTreeMap<String, Record>,
    pub total_elapsed: Duration,
    pub error: Option<ExecutionError>,
}

impl PipelineResult {
    pub fn unit_result(&self, unit: &str) -> Option<&UnitResult> {
        self.unit_results.iter().find(|r| r.unit_name == unit)
    }

    pub fn output(&self, unit: &str) -> Option<&Record> {
        self.outputs.get(unit)
    }

    /// Names of the attempted units, in settlement order.
    pub fn attempted(&self) -> Vec<&str> {
        self.unit_results
            .iter()
            .map(|r| r.unit_name.as_str())
            .collect()
    }

    pub fn failed(&self) -> impl Iterator<Item = &UnitResult> {
        self.unit_results.iter().filter(|r| !r.success())
    }

    /// Serializable summary of the run.
    pub fn report(&self) -> PipelineReport {
        PipelineReport {
            success: self.success,
            unit_results: self
                .unit_results
                .iter()
                .map(|result| UnitReport {
                    unit_name: result.unit_name.clone(),
                    success: result.success(),
                    outputs: result.output().map(UnitOutput::to_value),
                    error: result.error().map(ToString::to_string),
                    elapsed_ms: result.elapsed.as_millis() as u64,
                })
                .collect(),
            outputs: self.outputs.clone(),
            total_elapsed_ms: self.total_elapsed.as_millis() as u64,
            error: self.error.as_ref().map(ToString::to_string),
        }
    }
}

/// JSON shape of a [`PipelineResult`].
///
/// ```json
/// { "success": true, "unitResults": [{ "unitName": "source", "success": true,
///   "outputs": { "data": "hello" }, "elapsedMs": 0 }], "outputs": { ... },
///   "totalElapsedMs": 1 }
/// ```
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineReport {
    pub success: bool,
    pub unit_results: Vec<UnitReport>,
    pub outputs: BTreeMap<String, Record>,
    pub total_elapsed_ms: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UnitReport {
    pub unit_name: String,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outputs: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub elapsed_ms: u64,
}
