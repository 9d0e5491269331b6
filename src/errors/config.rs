// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use thiserror::Error;

/// Structural errors found while validating a pipeline.
///
/// Every variant is raised before any unit executes. There is no continuation path
/// for a malformed graph, so these abort the run regardless of `continue_on_error`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A reference does not match `name:type:field`.
    #[error("Malformed reference '{reference}': expected 'unitName:typeTag:fieldName'")]
    MalformedReference {
        /// The offending reference text
        reference: String,
    },

    /// A unit references a unit that does not exist in the pipeline.
    #[error("Unit '{unit}' references '{reference}' but unit '{missing_unit}' does not exist")]
    UnknownReference {
        /// The unit that declared the input
        unit: String,
        /// The full reference text
        reference: String,
        /// The unit name that could not be found
        missing_unit: String,
    },

    /// A unit references one of its own outputs.
    #[error("Unit '{unit}' references its own output via '{reference}'")]
    SelfReference { unit: String, reference: String },

    /// A circular dependency was detected in the unit graph
    #[error("Cyclic dependency detected: {}", cycle.join(" -> "))]
    CyclicDependency {
        /// The cycle path, closing on its first element
        cycle: Vec<String>,
    },

    #[error("Pipeline has no units")]
    EmptyPipeline,

    #[error("Pipeline has no entry unit (every unit declares at least one input)")]
    NoEntryUnit,

    /// Two units were defined with the same name
    #[error("Duplicate unit name: '{unit}'")]
    DuplicateUnit { unit: String },
}
