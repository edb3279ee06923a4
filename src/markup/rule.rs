//! Extraction rules.
//!
//! A rule is a pure, named text transformation. The extractor is nothing more than
//! an ordered list of rules, so that one can see which rule changed what
//! (see [super::MarkupExtractor::trace]).
use regex::{Captures, Regex};

/// A single text transformation step.
pub trait Rule: Send + Sync {
    /// Rule name, used when tracing extraction.
    fn name(&self) -> &'static str;
    fn apply(&self, text: &str) -> String;
}

/// What a regex match gets replaced with.
pub enum Replacement {
    /// Expanded with the usual `$1`/`${name}` syntax.
    Template(String),
    /// Computed from the captures.
    Fn(fn(&Captures) -> String),
}

/// Replace every match of a regex, once.
pub struct RegexRule {
    name: &'static str,
    pattern: Regex,
    replacement: Replacement,
}

impl RegexRule {
    pub fn new(name: &'static str, pattern: Regex, replacement: &str) -> Self {
        Self {
            name,
            pattern,
            replacement: Replacement::Template(replacement.to_string()),
        }
    }

    pub fn with_fn(name: &'static str, pattern: Regex, f: fn(&Captures) -> String) -> Self {
        Self {
            name,
            pattern,
            replacement: Replacement::Fn(f),
        }
    }

    fn replace(&self, text: &str) -> String {
        match &self.replacement {
            Replacement::Template(t) => self.pattern.replace_all(text, t.as_str()).into_owned(),
            Replacement::Fn(f) => self.pattern.replace_all(text, *f).into_owned(),
        }
    }
}

impl Rule for RegexRule {
    fn name(&self) -> &'static str {
        self.name
    }

    fn apply(&self, text: &str) -> String {
        self.replace(text)
    }
}

/// Replace matches until there are none left.
///
/// Used for nested constructs: with a pattern that only matches innermost spans,
/// each round peels one nesting level.
/// The number of rounds is bounded: a replacement may re-create a match.
pub struct FixpointRule {
    inner: RegexRule,
    max_rounds: usize,
}

impl FixpointRule {
    pub fn new(inner: RegexRule, max_rounds: usize) -> Self {
        Self { inner, max_rounds }
    }
}

impl Rule for FixpointRule {
    fn name(&self) -> &'static str {
        self.inner.name
    }

    fn apply(&self, text: &str) -> String {
        let mut text = text.to_string();
        for _ in 0..self.max_rounds {
            if !self.inner.pattern.is_match(&text) {
                break;
            }
            text = self.inner.replace(&text);
        }
        text
    }
}

/// A rule implemented by a plain function, for transformations
/// regular expressions cannot express (nesting, line state…).
pub struct FnRule<F> {
    name: &'static str,
    f: F,
}

impl<F> FnRule<F>
where
    F: Fn(&str) -> String + Send + Sync,
{
    pub fn new(name: &'static str, f: F) -> Self {
        Self { name, f }
    }
}

impl<F> Rule for FnRule<F>
where
    F: Fn(&str) -> String + Send + Sync,
{
    fn name(&self) -> &'static str {
        self.name
    }

    fn apply(&self, text: &str) -> String {
        (self.f)(text)
    }
}

#[cfg(test)]
mod tests {
    use regex::Regex;

    use super::*;

    #[test]
    fn regex_rule() {
        let r = RegexRule::new("bold", Regex::new("'''(.+?)'''").unwrap(), "${1}");
        assert_eq!(r.apply("a '''b''' c '''d'''"), "a b c d");
        assert_eq!(r.name(), "bold");
    }

    #[test]
    fn regex_rule_fn() {
        let r = RegexRule::with_fn("upper", Regex::new("[a-z]+").unwrap(), |caps| {
            caps[0].to_uppercase()
        });
        assert_eq!(r.apply("ab 12 cd"), "AB 12 CD");
    }

    #[test]
    fn fixpoint_nested() {
        let inner = RegexRule::new("braces", Regex::new(r"\([^()]*\)").unwrap(), "X");
        let r = FixpointRule::new(inner, 16);
        assert_eq!(r.apply("a ((b) (c (d))) e"), "a X e");
    }

    #[test]
    fn fixpoint_bounded() {
        // replacement re-creates a match
        let inner = RegexRule::new("loop", Regex::new("a").unwrap(), "a");
        let r = FixpointRule::new(inner, 3);
        assert_eq!(r.apply("aaa"), "aaa");
    }

    #[test]
    fn fn_rule() {
        let r = FnRule::new("trim", |t: &str| t.trim().to_string());
        assert_eq!(r.apply("  a "), "a");
    }
}
