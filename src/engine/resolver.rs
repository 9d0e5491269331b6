// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Input resolution: building a unit's input record from recorded outputs.

use std::collections::HashMap;

use crate::config::{InputBinding, UnitId};
use crate::errors::UnitError;
use crate::traits::Record;

/// Extract the fields a unit reads into a record keyed by each input's local name.
///
/// Only outputs already recorded in `produced` are consulted. For each binding:
/// * producer has no recorded output: `UnresolvedDependency` if required, else omitted
/// * producer output lacks the field: `MissingOutputField` if required, else omitted
///
/// The first failing required input, in declaration order, is reported.
pub fn resolve_inputs(
    unit: &str,
    bindings: &[InputBinding],
    produced: &HashMap<UnitId, Record>,
) -> Result<Record, UnitError> {
    let mut inputs = Record::new();

    for binding in bindings {
        let Some(output) = produced.get(&binding.producer) else {
            if binding.required {
                return Err(UnitError::UnresolvedDependency {
                    unit: unit.to_string(),
                    input: binding.name.clone(),
                    dependency: binding.producer_name().to_string(),
                });
            }
            continue;
        };

        match output.get(binding.field()) {
            Some(value) => {
                inputs.insert(binding.name.clone(), value.clone());
            }
            None if binding.required => {
                return Err(UnitError::MissingOutputField {
                    unit: unit.to_string(),
                    input: binding.name.clone(),
                    dependency: binding.producer_name().to_string(),
                    field: binding.field().to_string(),
                });
            }
            None => {}
        }
    }

    Ok(inputs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Address;
    use serde_json::json;

    fn binding(name: &str, producer: usize, source: &str, required: bool) -> InputBinding {
        InputBinding {
            name: name.to_string(),
            producer: UnitId(producer),
            address: Address::parse(source).unwrap(),
            required,
        }
    }

    fn produced() -> HashMap<UnitId, Record> {
        let mut record = Record::new();
        record.insert("data".into(), json!("hello"));
        record.insert("count".into(), json!(3));
        HashMap::from([(UnitId(0), record)])
    }

    #[test]
    fn test_resolves_fields_under_local_names() {
        let bindings = vec![
            binding("input", 0, "source:str:data", true),
            binding("n", 0, "source:int:count", true),
        ];
        let inputs = resolve_inputs("processor", &bindings, &produced()).unwrap();

        assert_eq!(inputs["input"], json!("hello"));
        assert_eq!(inputs["n"], json!(3));
        assert_eq!(inputs.len(), 2);
    }

    #[test]
    fn test_missing_producer_required() {
        let bindings = vec![binding("input", 1, "failing:str:data", true)];
        assert_eq!(
            resolve_inputs("processor", &bindings, &produced()).unwrap_err(),
            UnitError::UnresolvedDependency {
                unit: "processor".into(),
                input: "input".into(),
                dependency: "failing".into(),
            }
        );
    }

    #[test]
    fn test_missing_field_required() {
        let bindings = vec![binding("input", 0, "source:str:nope", true)];
        assert_eq!(
            resolve_inputs("processor", &bindings, &produced()).unwrap_err(),
            UnitError::MissingOutputField {
                unit: "processor".into(),
                input: "input".into(),
                dependency: "source".into(),
                field: "nope".into(),
            }
        );
    }

    #[test]
    fn test_optional_inputs_are_omitted() {
        let bindings = vec![
            binding("input", 0, "source:str:data", true),
            binding("hint", 1, "settings:str:hint", false),
            binding("extra", 0, "source:str:extra", false),
        ];
        let inputs = resolve_inputs("processor", &bindings, &produced()).unwrap();

        assert_eq!(inputs.len(), 1);
        assert!(inputs.contains_key("input"));
    }

    #[test]
    fn test_type_tag_does_not_affect_resolution() {
        let bindings = vec![binding("input", 0, "source:definitely_bytes:data", true)];
        let inputs = resolve_inputs("processor", &bindings, &produced()).unwrap();
        assert_eq!(inputs["input"], json!("hello"));
    }
}
