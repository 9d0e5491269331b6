// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::collections::{BTreeMap, HashMap};

use crate::config::Address;
use crate::errors::ValidationError;
use crate::pipeline::Pipeline;

/// Newtype wrapper for the unit dependency graph providing type safety.
///
/// Maps each unit name to the distinct unit names it reads from, in the order its
/// input declarations first mention them. Keys iterate in name order, which is what
/// makes traversal (and therefore cycle reports and the static order) deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DependencyGraph(pub BTreeMap<String, Vec<String>>);

impl DependencyGraph {
    /// Create a new empty dependency graph
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Build the graph from a pipeline, parsing every input reference.
    ///
    /// Fails with `MalformedReference` on the first unparsable source. Referenced
    /// units are not checked for existence here.
    pub fn from_pipeline(pipeline: &Pipeline) -> Result<Self, ValidationError> {
        let mut graph = Self::new();

        for unit in pipeline.units() {
            let mut dependencies: Vec<String> = Vec::new();
            for input in unit.inputs() {
                let address = Address::parse(&input.source)?;
                if !dependencies.contains(&address.unit_name) {
                    dependencies.push(address.unit_name);
                }
            }
            graph.add_dependencies(unit.name().to_string(), dependencies);
        }

        Ok(graph)
    }

    /// Set the dependencies of a unit
    pub fn add_dependencies(&mut self, unit: String, dependencies: Vec<String>) {
        self.0.insert(unit, dependencies);
    }

    /// Get dependencies for a unit
    pub fn get_dependencies(&self, unit: &str) -> Option<&Vec<String>> {
        self.0.get(unit)
    }

    /// Get all unit names in the graph
    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.0.keys()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Reverse the edges: unit -> units that read from it.
    ///
    /// Every unit appears as a key; dependents are listed in name order.
    pub fn build_dependents(&self) -> HashMap<String, Vec<String>> {
        let mut dependents: HashMap<String, Vec<String>> =
            self.0.keys().map(|k| (k.clone(), Vec::new())).collect();

        for (unit, dependencies) in &self.0 {
            for dependency in dependencies {
                dependents
                    .entry(dependency.clone())
                    .or_default()
                    .push(unit.clone());
            }
        }

        dependents
    }
}

impl From<BTreeMap<String, Vec<String>>> for DependencyGraph {
    fn from(graph: BTreeMap<String, Vec<String>>) -> Self {
        Self(graph)
    }
}

impl From<DependencyGraph> for BTreeMap<String, Vec<String>> {
    fn from(graph: DependencyGraph) -> Self {
        graph.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn graph(edges: &[(&str, &[&str])]) -> DependencyGraph {
        DependencyGraph::from(
            edges
                .iter()
                .map(|(unit, deps)| {
                    (
                        unit.to_string(),
                        deps.iter().map(|d| d.to_string()).collect(),
                    )
                })
                .collect::<BTreeMap<_, _>>(),
        )
    }

    #[test]
    fn test_build_dependents_reverses_edges() {
        let g = graph(&[("a", &[]), ("b", &["a"]), ("c", &["a", "b"])]);
        let dependents = g.build_dependents();

        assert_eq!(dependents["a"], vec!["b", "c"]);
        assert_eq!(dependents["b"], vec!["c"]);
        assert!(dependents["c"].is_empty());
    }

    #[test]
    fn test_keys_iterate_in_name_order() {
        let g = graph(&[("zeta", &[]), ("alpha", &[]), ("mid", &[])]);
        let keys: Vec<&String> = g.keys().collect();
        assert_eq!(keys, vec!["alpha", "mid", "zeta"]);
    }
}
