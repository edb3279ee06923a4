//! Dump file to corpus files.
use std::path::PathBuf;

use log::{info, warn};

use crate::error::Error;
use crate::io::writer::{ArticleWriter, LineSink, TextWriter, DEFAULT_PART_SIZE};
use crate::markup::{ExtractorConfig, MarkupExtractor};
use crate::normalize::{Normalizer, NormalizerConfig};
use crate::pipelines::corpus::{CorpusPipeline, RunStats};
use crate::pipelines::pipeline::Pipeline;
use crate::sentences::{AbbreviationModel, SentenceSegmenter};
use crate::sources::Dump;

/// Options of a [CorpusBuilder] run.
#[derive(Debug, Clone)]
pub struct CorpusOptions {
    /// Save one file per article instead of rotating files.
    pub one_per_file: bool,
    /// Maximum number of articles to process. `None` or `0` means all of them.
    pub max_pages: Option<usize>,
    /// Additional abbreviations (one per line).
    pub abbreviations: Option<PathBuf>,
    pub min_tokens: usize,
    /// Batch size when running in parallel. `None` runs sequentially.
    pub batch_size: Option<usize>,
    /// Size limit (bytes) of rotating files.
    pub part_size: u64,
}

impl Default for CorpusOptions {
    fn default() -> Self {
        Self {
            one_per_file: false,
            max_pages: None,
            abbreviations: None,
            min_tokens: NormalizerConfig::default().min_tokens,
            batch_size: None,
            part_size: DEFAULT_PART_SIZE,
        }
    }
}

/// Reads a MediaWiki dump (`.xml` or `.xml.gz`) and writes a sentence-per-line corpus to `dst`.
pub struct CorpusBuilder {
    src: PathBuf,
    dst: PathBuf,
    options: CorpusOptions,
}

impl CorpusBuilder {
    pub fn new(src: PathBuf, dst: PathBuf, options: CorpusOptions) -> Self {
        Self { src, dst, options }
    }

    fn build_pipeline(&self) -> Result<CorpusPipeline, Error> {
        let mut model = AbbreviationModel::default();
        if let Some(path) = &self.options.abbreviations {
            model.extend_from_file(path)?;
        }

        let normalizer_config = NormalizerConfig {
            min_tokens: self.options.min_tokens,
            ..Default::default()
        };

        let pipeline = CorpusPipeline::new(
            MarkupExtractor::new(ExtractorConfig::default())?,
            SentenceSegmenter::new(Box::new(model)),
            Normalizer::new(normalizer_config),
        );

        Ok(match self.options.max_pages {
            Some(max) if max > 0 => pipeline.with_max_pages(max),
            _ => pipeline,
        })
    }

    fn build_sink(&self) -> Box<dyn LineSink> {
        if self.options.one_per_file {
            Box::new(ArticleWriter::new(&self.dst))
        } else {
            Box::new(TextWriter::new(&self.dst, self.options.part_size))
        }
    }
}

impl Pipeline<RunStats> for CorpusBuilder {
    fn run(&self) -> Result<RunStats, Error> {
        if !self.src.is_file() {
            return Err(Error::Custom(format!(
                "{:?} does not exist or is not a file",
                self.src
            )));
        }
        if !self.dst.exists() {
            warn!("{:?} does not exist, creating it", self.dst);
            std::fs::create_dir_all(&self.dst)?;
        }

        let pipeline = self.build_pipeline()?;
        let mut sink = self.build_sink();

        info!("reading {:?}", self.src);
        let pages = Dump::from_path(&self.src)?;
        let stats = match self.options.batch_size {
            Some(batch_size) => pipeline.run_parallel(pages, &mut sink, batch_size)?,
            None => pipeline.run(pages, &mut sink)?,
        };

        info!(
            "read {} pages ({} errors): {} articles, {} skipped",
            stats.pages_read,
            stats.read_errors,
            stats.pages_processed,
            stats.skipped()
        );
        for (classification, count) in &stats.pages_skipped {
            info!("  {:?}: {}", classification, count);
        }
        info!(
            "wrote {} sentences, dropped {}",
            stats.sentences_written,
            stats.dropped()
        );
        for (reason, count) in &stats.sentences_dropped {
            info!("  {:?}: {}", reason, count);
        }

        Ok(stats)
    }
}
