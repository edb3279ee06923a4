//! Pipelines.
//!
//! [CorpusPipeline] turns page records into sentence lines, and [CorpusBuilder] runs it from a
//! dump file to corpus files. The light [pipeline::Pipeline] trait is implemented by the latter.
mod builder;
mod corpus;
#[allow(clippy::module_inception)]
pub mod pipeline;

pub use builder::{CorpusBuilder, CorpusOptions};
pub use corpus::{CorpusPipeline, PageOutcome, RunStats};
pub use pipeline::Pipeline;
