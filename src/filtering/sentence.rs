//! sentence-level filtering
use lazy_static::lazy_static;
use regex::Regex;

use super::Filter;
use crate::normalize::Token;

lazy_static! {
    /// Unresolved links, templates or tables, and `| name =` template parameters.
    pub static ref TEMPLATE_RESIDUE: Regex =
        Regex::new(r"\{\{|\}\}|\[\[|\]\]|\{\||\|\}|\|\s*[\w ]+\s*=").unwrap();
}

/// Rejects sentences that still carry template-like syntax.
///
/// Templates the extractor could not close leave parameter lists and brackets behind,
/// and these sentences are partial anyway.
pub struct TemplateFree {
    pattern: Regex,
}

impl TemplateFree {
    /// Use a custom residue pattern.
    pub fn with_pattern(pattern: Regex) -> Self {
        Self { pattern }
    }

    /// Get a reference to the residue pattern.
    pub fn pattern(&self) -> &Regex {
        &self.pattern
    }
}

impl Filter<&str> for TemplateFree {
    fn detect(&self, sentence: &str) -> bool {
        !self.pattern.is_match(sentence)
    }
}

impl Default for TemplateFree {
    fn default() -> Self {
        Self {
            pattern: TEMPLATE_RESIDUE.clone(),
        }
    }
}

/// Simple length filter.
/// Returns `false` if provided sentence has less than [MinTokens::min_size] tokens.
///
/// [MinTokens::min_size] is 3 by default: shorter sentences are most often list or caption debris.
pub struct MinTokens {
    min_size: usize,
}

impl MinTokens {
    /// specify a minimum length
    pub fn with_min_size(min_size: usize) -> Self {
        Self { min_size }
    }

    /// Get a reference to the filter's min size.
    pub fn min_size(&self) -> &usize {
        &self.min_size
    }
}

impl Filter<&[Token]> for MinTokens {
    fn detect(&self, tokens: &[Token]) -> bool {
        tokens.len() >= self.min_size
    }
}

impl Default for MinTokens {
    fn default() -> Self {
        MinTokens { min_size: 3 }
    }
}
