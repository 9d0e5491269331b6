// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

pub mod router;
pub mod transform;

pub use router::{Router, RouterFn};
pub use transform::{Transform, TransformFn};

/// The data exchanged between units: a JSON object keyed by field name.
pub type Record = serde_json::Map<String, serde_json::Value>;
