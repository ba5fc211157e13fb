//! Tokenizer: splits one raw LTSV line into [`LabeledField`]s.
//!
//! Fragments are separated by the field separator (tab by default) and each
//! non-empty fragment is split at the *first* pair separator (`:` by
//! default), so values may contain further separators.

use crate::error::LtsvError;
use crate::types::LabeledField;

pub const FIELD_SEPARATOR_DEFAULT: &str = "\t";
pub const PAIR_SEPARATOR_DEFAULT: &str = ":";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tokenizer {
    field_separator: String,
    pair_separator: String,
}

impl Default for Tokenizer {
    fn default() -> Self {
        Self {
            field_separator: FIELD_SEPARATOR_DEFAULT.to_string(),
            pair_separator: PAIR_SEPARATOR_DEFAULT.to_string(),
        }
    }
}

impl Tokenizer {
    /// Both separators must be non-empty; [`LtsvConfig`](crate::LtsvConfig)
    /// checks this before building one.
    pub fn new(field_separator: impl Into<String>, pair_separator: impl Into<String>) -> Self {
        Self {
            field_separator: field_separator.into(),
            pair_separator: pair_separator.into(),
        }
    }

    /// Tokenize `line` into `out`, reusing the buffer's existing strings.
    ///
    /// On success `out` holds exactly the fields of `line`. On error it is
    /// left empty; partial results are never exposed.
    pub fn tokenize_into(&self, line: &str, out: &mut Vec<LabeledField>) -> Result<(), LtsvError> {
        let mut used = 0;
        for fragment in line.split(self.field_separator.as_str()) {
            if fragment.is_empty() {
                continue;
            }
            let Some((label, value)) = fragment.split_once(self.pair_separator.as_str()) else {
                out.clear();
                return Err(LtsvError::InvalidLtsvLine {
                    fragment: fragment.to_string(),
                    fragment_len: fragment.len(),
                    line: line.to_string(),
                });
            };
            match out.get_mut(used) {
                Some(slot) => slot.assign(label, value),
                None => out.push(LabeledField::new(label, value)),
            }
            used += 1;
        }
        out.truncate(used);
        Ok(())
    }

    /// Allocating convenience over [`Tokenizer::tokenize_into`].
    pub fn tokenize(&self, line: &str) -> Result<Vec<LabeledField>, LtsvError> {
        let mut out = Vec::new();
        self.tokenize_into(line, &mut out)?;
        Ok(out)
    }
}
