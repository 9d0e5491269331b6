// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

pub mod change_text_case;
pub mod constant;
pub mod field_router;
pub mod prefix_suffix_adder;
pub mod reverse_text;
pub mod token_counter;

pub use change_text_case::*;
pub use constant::*;
pub use field_router::*;
pub use prefix_suffix_adder::*;
pub use reverse_text::*;
pub use token_counter::*;

use anyhow::Context;
use serde::de::DeserializeOwned;

use crate::traits::Record;

/// Input and output field used by the text units
pub const TEXT_FIELD: &str = "text";

/// Read the `text` input as a string.
pub(crate) fn text_input(inputs: &Record) -> anyhow::Result<&str> {
    inputs
        .get(TEXT_FIELD)
        .with_context(|| format!("missing '{}' input", TEXT_FIELD))?
        .as_str()
        .with_context(|| format!("'{}' input is not a string", TEXT_FIELD))
}

pub(crate) fn text_output(text: String) -> Record {
    let mut record = Record::new();
    record.insert(TEXT_FIELD.to_string(), text.into());
    record
}

/// Deserialize a unit's options map into its config struct.
pub(crate) fn parse_options<T: DeserializeOwned>(options: &Record) -> Result<T, serde_json::Error> {
    serde_json::from_value(serde_json::Value::Object(options.clone()))
}
