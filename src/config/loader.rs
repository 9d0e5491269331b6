// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::backends::local::LocalUnitFactory;
use crate::config::ExecutionOptions;
use crate::errors::LoaderError;
use crate::pipeline::{InputDeclaration, Pipeline};

/// A pipeline definition file.
///
/// Describes the units of a pipeline in terms of built-in unit implementations, plus
/// the execution options to run it with. Files are YAML unless their extension is
/// `.toml`.
///
/// # Fields
/// * `options` - Execution options (optional, every field defaulted)
/// * `units` - Unit definitions; their order does not affect execution
///
/// # Example
/// ```yaml
/// options:
///   unit_timeout_ms: 5000
/// units:
///   - name: source
///     unit: constant
///     options: { text: "hello world" }
///   - name: shout
///     unit: change_text_case
///     options: { case: upper }
///     inputs:
///       - { name: text, source: "source:str:text" }
/// ```
#[derive(Debug, Deserialize)]
pub struct PipelineDefinition {
    #[serde(default)]
    pub options: ExecutionOptions,
    pub units: Vec<UnitDefinition>,
}

/// Configuration for a single unit in a pipeline definition file.
///
/// # Fields
/// * `name` - Unique unit name, used in references
/// * `unit` - Built-in implementation name (see [`LocalUnitFactory`])
/// * `options` - Implementation-specific options
/// * `inputs` - Declared inputs; `required` defaults to true
///
/// # Example
/// ```yaml
/// name: "classify"
/// unit: field_router
/// options:
///   field: kind
///   routes: { a: path_a, b: path_b }
/// inputs:
///   - { name: kind, source: "source:str:kind" }
/// ```
#[derive(Debug, Deserialize)]
pub struct UnitDefinition {
    pub name: String,
    pub unit: String,
    #[serde(default)]
    pub options: HashMap<String, serde_json::Value>,
    #[serde(default)]
    pub inputs: Vec<InputDeclaration>,
}

impl PipelineDefinition {
    /// Instantiate every unit through `factory` and assemble the pipeline.
    ///
    /// The pipeline is defined but not yet validated; see
    /// [`load_and_validate_pipeline`] for both steps at once.
    pub fn build(&self, factory: &LocalUnitFactory) -> Result<Pipeline, LoaderError> {
        let units = self
            .units
            .iter()
            .map(|definition| {
                let unit = factory.create_unit(definition)?;
                Ok(definition
                    .inputs
                    .iter()
                    .cloned()
                    .fold(unit, |unit, input| unit.with_declaration(input)))
            })
            .collect::<Result<Vec<_>, LoaderError>>()?;

        Ok(Pipeline::define(units)?)
    }
}

/// Load a pipeline definition from a YAML or TOML file
pub fn load_pipeline_definition<P: AsRef<Path>>(path: P) -> Result<PipelineDefinition, LoaderError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)?;

    let definition: PipelineDefinition = match path.extension().and_then(|ext| ext.to_str()) {
        Some("toml") => toml::from_str(&content)?,
        _ => serde_yaml::from_str(&content)?,
    };

    definition
        .options
        .check()
        .map_err(|reason| LoaderError::InvalidExecutionOptions { reason })?;

    Ok(definition)
}

/// Load a definition file, build its pipeline with the built-in units and validate it.
///
/// Validation errors surface as [`LoaderError::Validation`] before anything runs.
pub fn load_and_validate_pipeline<P: AsRef<Path>>(
    path: P,
) -> Result<(Pipeline, ExecutionOptions), LoaderError> {
    let definition = load_pipeline_definition(path)?;
    let pipeline = definition.build(&LocalUnitFactory::new())?;
    pipeline.plan()?;

    Ok((pipeline, definition.options))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ValidationError;
    use std::io::Write;

    fn write_temp(content: &str, suffix: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn parse_basic_definition() {
        let yaml = r#"
units:
  - name: source
    unit: constant
    options: { text: "hello" }
  - name: shout
    unit: change_text_case
    options: { case: upper }
    inputs:
      - { name: text, source: "source:str:text" }
      - { name: hint, source: "source:str:hint", required: false }
"#;

        let definition: PipelineDefinition = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(definition.units.len(), 2);
        assert_eq!(definition.options.unit_timeout_ms, 30_000);
        assert!(definition.units[1].inputs[0].required);
        assert!(!definition.units[1].inputs[1].required);
        assert_eq!(definition.units[0].options["text"], "hello");
    }

    #[test]
    fn test_load_and_validate_valid_yaml() {
        let file = write_temp(
            r#"
options:
  unit_timeout_ms: 500
  continue_on_error: true
units:
  - name: source
    unit: constant
    options: { text: "hello" }
  - name: reversed
    unit: reverse_text
    inputs:
      - { name: text, source: "source:str:text" }
"#,
            ".yaml",
        );

        let (pipeline, options) = load_and_validate_pipeline(file.path()).unwrap();
        assert_eq!(pipeline.len(), 2);
        assert_eq!(options.unit_timeout_ms, 500);
        assert!(options.continue_on_error);
    }

    #[test]
    fn test_load_toml_definition() {
        let file = write_temp(
            r#"
[options]
max_concurrency = 2

[[units]]
name = "source"
unit = "constant"
options = { text = "a b c" }

[[units]]
name = "count"
unit = "token_counter"
inputs = [{ name = "text", source = "source:str:text" }]
"#,
            ".toml",
        );

        let (pipeline, options) = load_and_validate_pipeline(file.path()).unwrap();
        assert!(pipeline.contains("count"));
        assert_eq!(options.max_concurrency, 2);
    }

    #[test]
    fn test_load_and_validate_cyclic_definition() {
        let file = write_temp(
            r#"
units:
  - name: source
    unit: constant
  - name: a
    unit: reverse_text
    inputs: [{ name: text, source: "b:str:text" }]
  - name: b
    unit: reverse_text
    inputs: [{ name: text, source: "a:str:text" }]
"#,
            ".yaml",
        );

        let error = load_and_validate_pipeline(file.path()).unwrap_err();
        assert!(matches!(
            error,
            LoaderError::Validation(ValidationError::CyclicDependency { .. })
        ));
        assert!(error.to_string().contains("Cyclic dependency detected"));
    }

    #[test]
    fn test_unknown_implementation() {
        let file = write_temp(
            r#"
units:
  - name: source
    unit: teleporter
"#,
            ".yaml",
        );

        let error = load_and_validate_pipeline(file.path()).unwrap_err();
        assert!(matches!(error, LoaderError::UnknownImplementation { .. }));
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let file = write_temp(
            r#"
options:
  unit_timeout_ms: 0
units:
  - name: source
    unit: constant
"#,
            ".yaml",
        );

        assert!(matches!(
            load_pipeline_definition(file.path()).unwrap_err(),
            LoaderError::InvalidExecutionOptions { .. }
        ));
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            load_pipeline_definition("/definitely/not/here.yaml").unwrap_err(),
            LoaderError::Io(_)
        ));
    }
}
