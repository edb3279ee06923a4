/*! Filtering utilities

Filters operate on sentence level, once the extraction is done.

Filters implement [filter::Filter], returning `true` for content that is kept:
- [sentence::TemplateFree] rejects sentences with template/link residue,
- [sentence::MinTokens] rejects sentences that are too short once tokenized.
! */
mod filter;
pub mod sentence;

pub use filter::Filter;
