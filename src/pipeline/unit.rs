// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::fmt;
use std::sync::Arc;

use serde::Deserialize;

use crate::traits::{Router, Transform};

/// One declared input of a unit.
///
/// `source` is the textual `unitName:typeTag:fieldName` reference. It is parsed and
/// checked during validation, not here, so a pipeline with a malformed reference can
/// still be defined and will fail validation with `MalformedReference`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct InputDeclaration {
    /// Key of the value in the unit's resolved input record
    pub name: String,
    pub source: String,
    /// Optional inputs are omitted from the record when unavailable
    #[serde(default = "default_required")]
    pub required: bool,
}

fn default_required() -> bool {
    true
}

impl InputDeclaration {
    pub fn required(name: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            source: source.into(),
            required: true,
        }
    }

    pub fn optional(name: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            source: source.into(),
            required: false,
        }
    }
}

/// What a unit does when it runs.
///
/// A unit is either a data transform or a router, never both.
#[derive(Clone)]
pub enum UnitBehavior {
    Transform(Arc<dyn Transform>),
    Router(Arc<dyn Router>),
}

impl UnitBehavior {
    pub fn is_router(&self) -> bool {
        matches!(self, UnitBehavior::Router(_))
    }

    pub fn kind(&self) -> &'static str {
        match self {
            UnitBehavior::Transform(_) => "transform",
            UnitBehavior::Router(_) => "router",
        }
    }
}

impl fmt::Debug for UnitBehavior {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "UnitBehavior::{}", self.kind())
    }
}

/// A named computation with declared inputs.
///
/// ```rust
/// use the_switchyard::pipeline::Unit;
/// use the_switchyard::traits::{Record, TransformFn};
///
/// let unit = Unit::transform("processor", TransformFn::new(|inputs: Record| async move { Ok(inputs) }))
///     .with_input("input", "source:str:data")
///     .with_optional_input("hint", "settings:str:hint");
///
/// assert_eq!(unit.name(), "processor");
/// assert_eq!(unit.inputs().len(), 2);
/// assert!(!unit.inputs()[1].required);
/// ```
#[derive(Debug, Clone)]
pub struct Unit {
    name: String,
    inputs: Vec<InputDeclaration>,
    behavior: UnitBehavior,
}

impl Unit {
    pub fn new(name: impl Into<String>, behavior: UnitBehavior) -> Self {
        Self {
            name: name.into(),
            inputs: Vec::new(),
            behavior,
        }
    }

    pub fn transform<T: Transform + 'static>(name: impl Into<String>, transform: T) -> Self {
        Self::new(name, UnitBehavior::Transform(Arc::new(transform)))
    }

    pub fn router<R: Router + 'static>(name: impl Into<String>, router: R) -> Self {
        Self::new(name, UnitBehavior::Router(Arc::new(router)))
    }

    /// Add a required input
    pub fn with_input(self, name: impl Into<String>, source: impl Into<String>) -> Self {
        self.with_declaration(InputDeclaration::required(name, source))
    }

    pub fn with_optional_input(self, name: impl Into<String>, source: impl Into<String>) -> Self {
        self.with_declaration(InputDeclaration::optional(name, source))
    }

    pub fn with_declaration(mut self, declaration: InputDeclaration) -> Self {
        self.inputs.push(declaration);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn inputs(&self) -> &[InputDeclaration] {
        &self.inputs
    }

    pub fn behavior(&self) -> &UnitBehavior {
        &self.behavior
    }

    pub fn is_router(&self) -> bool {
        self.behavior.is_router()
    }

    /// Entry units declare no inputs
    pub fn is_entry(&self) -> bool {
        self.inputs.is_empty()
    }
}
