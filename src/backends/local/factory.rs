// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::collections::HashMap;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde_json::Value;

use super::units::*;
use crate::config::UnitDefinition;
use crate::errors::LoaderError;
use crate::pipeline::{Unit, UnitBehavior};
use crate::traits::Record;

const IMPLEMENTATIONS: &[&str] = &[
    "constant",
    "change_text_case",
    "change_text_case_upper",
    "change_text_case_lower",
    "field_router",
    "prefix_suffix_adder",
    "reverse_text",
    "token_counter",
];

/// Factory for the built-in (in-process) units a definition file can name
///
/// The `unit` field of a definition selects the implementation:
/// - "constant" -> ConstantUnit (its options become its output)
/// - "change_text_case" -> ChangeTextCaseUnit (requires `case`)
/// - "change_text_case_upper" / "change_text_case_lower" -> ChangeTextCaseUnit
/// - "field_router" -> FieldRouterUnit (a router)
/// - "prefix_suffix_adder" -> PrefixSuffixAdderUnit
/// - "reverse_text" -> ReverseTextUnit
/// - "token_counter" -> TokenCounterUnit
#[derive(Debug, Clone, Default)]
pub struct LocalUnitFactory;

impl LocalUnitFactory {
    pub fn new() -> Self {
        Self
    }

    /// Create the unit a definition describes, without its inputs.
    pub fn create_unit(&self, definition: &UnitDefinition) -> Result<Unit, LoaderError> {
        let behavior = self.create_behavior(&definition.name, &definition.unit, &definition.options)?;
        Ok(Unit::new(definition.name.clone(), behavior))
    }

    pub fn create_behavior(
        &self,
        name: &str,
        implementation: &str,
        options: &HashMap<String, Value>,
    ) -> Result<UnitBehavior, LoaderError> {
        let options: Record = options
            .iter()
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();

        let behavior = match implementation {
            "constant" => UnitBehavior::Transform(Arc::new(ConstantUnit::new(options))),
            "change_text_case" => UnitBehavior::Transform(Arc::new(ChangeTextCaseUnit::new(
                parse_config(name, &options)?,
            ))),
            "change_text_case_upper" => UnitBehavior::Transform(Arc::new(ChangeTextCaseUnit::upper())),
            "change_text_case_lower" => UnitBehavior::Transform(Arc::new(ChangeTextCaseUnit::lower())),
            "field_router" => {
                UnitBehavior::Router(Arc::new(FieldRouterUnit::new(parse_config(name, &options)?)))
            }
            "prefix_suffix_adder" => UnitBehavior::Transform(Arc::new(
                PrefixSuffixAdderUnit::new(parse_config(name, &options)?),
            )),
            "reverse_text" => UnitBehavior::Transform(Arc::new(ReverseTextUnit::new())),
            "token_counter" => UnitBehavior::Transform(Arc::new(TokenCounterUnit::new())),
            _ => {
                return Err(LoaderError::UnknownImplementation {
                    name: name.to_string(),
                    implementation: implementation.to_string(),
                })
            }
        };

        Ok(behavior)
    }

    /// List all available built-in unit implementations
    pub fn list_available_implementations() -> Vec<&'static str> {
        IMPLEMENTATIONS.to_vec()
    }

    /// Check if an implementation is available
    pub fn is_implementation_available(implementation: &str) -> bool {
        IMPLEMENTATIONS.contains(&implementation)
    }
}

fn parse_config<T: DeserializeOwned>(name: &str, options: &Record) -> Result<T, LoaderError> {
    parse_options(options).map_err(|error| LoaderError::InvalidOptions {
        name: name.to_string(),
        reason: error.to_string(),
    })
}
