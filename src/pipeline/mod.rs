// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Pipeline definition: named units and their declared inputs.
//!
//! A [`Pipeline`] is assembled once and reused across runs. Its validated form, the
//! [`ExecutionPlan`], is computed the first time it is needed and cached, so address
//! parsing and graph analysis happen once per pipeline rather than once per run.
//!
//! # Examples
//!
//! ```rust
//! use serde_json::json;
//! use the_switchyard::pipeline::{Pipeline, Unit};
//! use the_switchyard::traits::{Record, TransformFn};
//!
//! let source = Unit::transform("source", TransformFn::new(|_inputs: Record| async move {
//!     let mut out = Record::new();
//!     out.insert("data".into(), json!("hello"));
//!     Ok(out)
//! }));
//! let echo = Unit::transform("echo", TransformFn::new(|inputs: Record| async move { Ok(inputs) }))
//!     .with_input("input", "source:str:data");
//!
//! let pipeline = Pipeline::define(vec![source, echo]).unwrap();
//! let plan = pipeline.plan().unwrap();
//! assert_eq!(plan.static_order().unwrap().len(), 2);
//! ```

mod unit;

use std::collections::BTreeMap;
use std::sync::{Arc, OnceLock};

pub use unit::{InputDeclaration, Unit, UnitBehavior};

use crate::config::{validate, ExecutionPlan};
use crate::errors::ValidationError;

/// A named collection of units forming a dependency graph.
#[derive(Debug, Clone)]
pub struct Pipeline {
    units: BTreeMap<String, Unit>,
    plan: OnceLock<Result<Arc<ExecutionPlan>, ValidationError>>,
}

impl Pipeline {
    /// Assemble a pipeline from its units.
    ///
    /// Only name uniqueness is checked here. The remaining structural invariants are
    /// checked by [`Pipeline::plan`], which every execution calls before running
    /// anything.
    pub fn define(units: impl IntoIterator<Item = Unit>) -> Result<Self, ValidationError> {
        let mut by_name = BTreeMap::new();

        for unit in units {
            let name = unit.name().to_string();
            if by_name.insert(name.clone(), unit).is_some() {
                return Err(ValidationError::DuplicateUnit { unit: name });
            }
        }

        Ok(Self {
            units: by_name,
            plan: OnceLock::new(),
        })
    }

    /// Units in name order
    pub fn units(&self) -> impl Iterator<Item = &Unit> {
        self.units.values()
    }

    pub fn unit(&self, name: &str) -> Option<&Unit> {
        self.units.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.units.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    pub fn has_routers(&self) -> bool {
        self.units.values().any(Unit::is_router)
    }

    /// Validate the pipeline and return its execution plan.
    ///
    /// The outcome, success or failure, is computed once and cached.
    pub fn plan(&self) -> Result<Arc<ExecutionPlan>, ValidationError> {
        self.plan
            .get_or_init(|| validate(self).map(Arc::new))
            .clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::{Record, TransformFn};

    fn passthrough(name: &str) -> Unit {
        Unit::transform(name, TransformFn::new(|inputs: Record| async move { Ok(inputs) }))
    }

    #[test]
    fn test_define_rejects_duplicate_names() {
        let result = Pipeline::define(vec![passthrough("a"), passthrough("a")]);
        assert_eq!(
            result.unwrap_err(),
            ValidationError::DuplicateUnit { unit: "a".into() }
        );
    }

    #[test]
    fn test_units_iterate_in_name_order() {
        let pipeline =
            Pipeline::define(vec![passthrough("c"), passthrough("a"), passthrough("b")]).unwrap();
        let names: Vec<&str> = pipeline.units().map(Unit::name).collect();
        assert_eq!(names, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_plan_is_cached() {
        let pipeline = Pipeline::define(vec![passthrough("a")]).unwrap();
        let first = pipeline.plan().unwrap();
        let second = pipeline.plan().unwrap();
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn test_empty_pipeline_is_defined_but_invalid() {
        let pipeline = Pipeline::define(Vec::new()).unwrap();
        assert!(pipeline.is_empty());
        assert_eq!(pipeline.plan().unwrap_err(), ValidationError::EmptyPipeline);
    }
}
