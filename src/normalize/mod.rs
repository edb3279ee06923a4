/*! Sentence normalization

Sentences coming out of segmentation are filtered, rewritten with placeholders and tokenized:

- numbers become [NUMBER_PLACEHOLDER],
- urls become [LINK_PLACEHOLDER],
- enclitic pronouns are split from their verbs (see [CliticTable]).

Tokens are joined with single spaces to form output lines.
!*/
mod clitic;
mod normalizer;
mod token;

pub use clitic::{CliticTable, StemRepair};
pub use normalizer::{DropReason, Normalized, Normalizer, NormalizerConfig};
pub use token::{Token, TokenKind};

pub const NUMBER_PLACEHOLDER: &str = "__NUMBER__";
pub const LINK_PLACEHOLDER: &str = "__LINK__";
