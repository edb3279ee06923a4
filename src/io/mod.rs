/*!
# IO utilities

Corpus saving. Dump reading lives in [crate::sources].
!*/
pub mod writer;

pub use writer::LineSink;
