/*! Sentence segmentation

Splits extracted prose into sentences. Deciding whether a period ends a sentence is delegated to a
[boundary::BoundaryModel], so that the default abbreviation-based model can be replaced
(by a trained one, or one for another language) without touching the segmenter.
!*/
pub mod boundary;
mod segmenter;

pub use boundary::{AbbreviationModel, BoundaryContext, BoundaryModel};
pub use segmenter::{SentenceSegmenter, SentenceUnit, Sentences};
