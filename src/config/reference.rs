// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Reference parsing for unit input declarations.
//!
//! A reference addresses one output field of one unit using the textual form
//! `unitName:typeTag:fieldName`. Each of the three tokens must be a non-empty run of
//! ASCII letters, digits or underscores; nothing else (whitespace, `.`, `*`, extra
//! colons) is accepted.
//!
//! The type tag is preserved for diagnostics only. It is never compared against the
//! data a unit actually produces.
//!
//! Parsing is purely syntactic. Whether the named unit exists is checked later by
//! [`crate::config::validate_references`].
//!
//! # Examples
//!
//! ```rust
//! use the_switchyard::config::Address;
//!
//! let address = Address::parse("source:str:data").unwrap();
//! assert_eq!(address.unit_name, "source");
//! assert_eq!(address.type_tag, "str");
//! assert_eq!(address.field_name, "data");
//!
//! assert!(!Address::is_valid("source.data"));
//! assert!(!Address::is_valid("source:*:*"));
//! ```

use std::fmt;
use std::str::FromStr;

use crate::errors::ValidationError;

const SEPARATOR: char = ':';
const TOKEN_COUNT: usize = 3;

/// Parsed form of a `unitName:typeTag:fieldName` reference.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Address {
    pub unit_name: String,
    /// Documentation only; never validated against payloads.
    pub type_tag: String,
    pub field_name: String,
}

impl Address {
    pub fn new(
        unit_name: impl Into<String>,
        type_tag: impl Into<String>,
        field_name: impl Into<String>,
    ) -> Self {
        Self {
            unit_name: unit_name.into(),
            type_tag: type_tag.into(),
            field_name: field_name.into(),
        }
    }

    /// Parse a reference, failing with `MalformedReference` on any deviation from the
    /// grammar.
    pub fn parse(text: &str) -> Result<Self, ValidationError> {
        let tokens: Vec<&str> = text.split(SEPARATOR).collect();

        if tokens.len() != TOKEN_COUNT || !tokens.iter().all(|token| is_identifier(token)) {
            return Err(ValidationError::MalformedReference {
                reference: text.to_string(),
            });
        }

        Ok(Self::new(tokens[0], tokens[1], tokens[2]))
    }

    /// Non-failing probe for [`Address::parse`].
    pub fn is_valid(text: &str) -> bool {
        Self::parse(text).is_ok()
    }
}

fn is_identifier(token: &str) -> bool {
    !token.is_empty()
        && token
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_')
}

impl FromStr for Address {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}{}{}{}",
            self.unit_name, SEPARATOR, self.type_tag, SEPARATOR, self.field_name
        )
    }
}
