// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use async_trait::async_trait;
use serde::Deserialize;

use super::{text_input, text_output};
use crate::traits::{Record, Transform};

/// Target case for [`ChangeTextCaseUnit`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextCase {
    Upper,
    Lower,
    /// First letter of each word capitalized
    Proper,
    /// Like proper case, but short articles and prepositions stay lowercase
    Title,
}

/// Configuration for the Change Text Case unit
#[derive(Debug, Clone, Deserialize)]
pub struct ChangeTextCaseConfig {
    pub case: TextCase,
}

/// Change Text Case unit - converts the `text` input to a different case
pub struct ChangeTextCaseUnit {
    config: ChangeTextCaseConfig,
}

impl ChangeTextCaseUnit {
    pub fn new(config: ChangeTextCaseConfig) -> Self {
        Self { config }
    }

    pub fn upper() -> Self {
        Self::new(ChangeTextCaseConfig {
            case: TextCase::Upper,
        })
    }

    pub fn lower() -> Self {
        Self::new(ChangeTextCaseConfig {
            case: TextCase::Lower,
        })
    }

    fn convert(&self, input: &str) -> String {
        match self.config.case {
            TextCase::Upper => input.to_uppercase(),
            TextCase::Lower => input.to_lowercase(),
            TextCase::Proper => input
                .split_whitespace()
                .map(capitalize)
                .collect::<Vec<_>>()
                .join(" "),
            TextCase::Title => input
                .split_whitespace()
                .enumerate()
                .map(|(i, word)| {
                    let lower_word = word.to_lowercase();
                    if i == 0 || !is_minor_word(&lower_word) {
                        capitalize(word)
                    } else {
                        lower_word
                    }
                })
                .collect::<Vec<_>>()
                .join(" "),
        }
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase(),
    }
}

fn is_minor_word(word: &str) -> bool {
    matches!(
        word,
        "a" | "an" | "the" | "and" | "or" | "but" | "in" | "on" | "at" | "to" | "for" | "of"
            | "with" | "by"
    )
}

#[async_trait]
impl Transform for ChangeTextCaseUnit {
    async fn transform(&self, inputs: Record) -> anyhow::Result<Record> {
        let text = text_input(&inputs)?;
        Ok(text_output(self.convert(text)))
    }
}
