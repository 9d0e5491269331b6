// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Unit implementations for The Switchyard.
//!
//! # Available Backends
//!
//! ## Local Backend
//! In-process built-in units that definition files refer to by name:
//! - **Seeding**: `constant` emits its options as its output
//! - **Text Transformation**: case conversion, reversal, prefix/suffix addition
//! - **Text Analysis**: token counting
//! - **Routing**: `field_router` picks the next units from an input value
//!
//! ## Stub Backend (Test-Only)
//! Units with scripted behavior for exercising the engine (only available in test
//! builds): echoing, failing, sleeping, counting and fixed-decision routing.
//!
//! # Architecture
//!
//! ```text
//! Definition file → LocalUnitFactory → Unit → Pipeline → PipelineExecutor
//! ```
//!
//! Code-defined pipelines skip the factory and wrap closures or their own
//! [`Transform`](crate::traits::Transform) and [`Router`](crate::traits::Router)
//! implementations directly.
//!
//! # Example
//! ```rust
//! use std::collections::HashMap;
//! use the_switchyard::backends::local::LocalUnitFactory;
//!
//! let behavior = LocalUnitFactory::new()
//!     .create_behavior("shout", "change_text_case_upper", &HashMap::new())?;
//! assert!(!behavior.is_router());
//! # Ok::<(), the_switchyard::errors::LoaderError>(())
//! ```

pub mod local;
#[cfg(test)]
pub mod stub;
