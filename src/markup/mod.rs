/*! Markup extraction.

Wikitext has no formal grammar, so instead of parsing it we apply an ordered list of
text rules (see [rule::Rule]) that remove non-prose structure, collapse templates into
[TEMPLATE_MARKER] and unwrap links and formatting.

Templates cannot be rendered here, so their text is never guessed: sentences carrying
the marker are dropped later on.
!*/
mod extractor;
pub mod rule;
pub mod structure;

pub use extractor::{ExtractorConfig, MarkupExtractor};

/// Stands for a template invocation (and all its nested templates).
pub const TEMPLATE_MARKER: &str = "__TEMPLATE__";
/// Stands for a `<math>` block.
pub const MATH_MARKER: &str = "__MATH__";
/// Stands for a source code block.
pub const CODE_MARKER: &str = "__CODE__";
