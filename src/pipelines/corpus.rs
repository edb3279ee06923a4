//! Page to sentence lines pipeline.
//!
//! # Processing
//! 1. Each page is classified, and only encyclopedic articles are kept (no redirects,
//!   disambiguation pages, year/date articles or pages outside of the main namespace).
//! 1. Prose is extracted from the wiki markup.
//! 1. Prose is split into sentences.
//! 1. Sentences are normalized and tokenized, contaminated or too short ones are dropped.
//! 1. Remaining sentences are sent to a [LineSink], one line per sentence.
use std::collections::HashMap;

use itertools::Itertools;
use log::{debug, error, info};
use rayon::prelude::*;

use crate::classify::{classify_record, Classification};
use crate::error::Error;
use crate::io::LineSink;
use crate::markup::MarkupExtractor;
use crate::normalize::{DropReason, Normalized, Normalizer};
use crate::page::PageRecord;
use crate::sentences::SentenceSegmenter;

/// What a single page produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageOutcome {
    Skipped(Classification),
    Processed {
        lines: Vec<String>,
        dropped: Vec<DropReason>,
    },
}

/// Counters of a pipeline run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RunStats {
    /// Pages successfully read from the source.
    pub pages_read: usize,
    /// Eligible pages.
    pub pages_processed: usize,
    pub pages_skipped: HashMap<Classification, usize>,
    /// Records the source could not read.
    pub read_errors: usize,
    pub sentences_written: usize,
    pub sentences_dropped: HashMap<DropReason, usize>,
}

impl RunStats {
    /// Total number of skipped pages.
    pub fn skipped(&self) -> usize {
        self.pages_skipped.values().sum()
    }

    /// Total number of dropped sentences.
    pub fn dropped(&self) -> usize {
        self.sentences_dropped.values().sum()
    }
}

/// Sequential (or batch-parallel) page processing.
///
/// Components are immutable once built, so that a single instance can be shared between
/// rayon workers in [CorpusPipeline::run_parallel].
pub struct CorpusPipeline {
    extractor: MarkupExtractor,
    segmenter: SentenceSegmenter,
    normalizer: Normalizer,
    max_pages: Option<usize>,
}

impl CorpusPipeline {
    pub fn new(
        extractor: MarkupExtractor,
        segmenter: SentenceSegmenter,
        normalizer: Normalizer,
    ) -> Self {
        Self {
            extractor,
            segmenter,
            normalizer,
            max_pages: None,
        }
    }

    /// Stop after `max_pages` eligible pages.
    pub fn with_max_pages(mut self, max_pages: usize) -> Self {
        self.max_pages = Some(max_pages);
        self
    }

    /// Classify, extract, segment and normalize a single page.
    pub fn process_page(&self, page: &PageRecord) -> PageOutcome {
        let classification = classify_record(page);
        if !classification.is_eligible() {
            debug!("{:?}: skipped ({:?})", page.title(), classification);
            return PageOutcome::Skipped(classification);
        }

        let extraction = self.extractor.extract_page(page);
        if !extraction.accepted {
            debug!("{:?}: no prose", page.title());
        }

        let mut lines = Vec::new();
        let mut dropped = Vec::new();
        for sentence in self.segmenter.segment(&extraction.prose) {
            match self.normalizer.normalize(&sentence) {
                Normalized::Dropped(reason) => dropped.push(reason),
                tokens => lines.extend(tokens.line()),
            }
        }

        PageOutcome::Processed { lines, dropped }
    }

    /// Process pages in order, sending lines to `sink`.
    ///
    /// Read errors are logged and skipped, sink errors end the run.
    pub fn run<I, S>(&self, pages: I, sink: &mut S) -> Result<RunStats, Error>
    where
        I: IntoIterator<Item = Result<PageRecord, Error>>,
        S: LineSink + ?Sized,
    {
        let mut stats = RunStats::default();

        for page in pages {
            let page = match page {
                Ok(page) => page,
                Err(e) => {
                    error!("could not read page: {:?}", e);
                    stats.read_errors += 1;
                    continue;
                }
            };

            let outcome = self.process_page(&page);
            Self::emit(&page, outcome, sink, &mut stats)?;

            if self.limit_reached(&stats) {
                info!("reached maximum number of pages ({})", stats.pages_processed);
                break;
            }
        }

        sink.flush()?;
        Ok(stats)
    }

    /// Same as [CorpusPipeline::run], processing `batch_size` pages at a time with rayon.
    ///
    /// Output order is the same as input order.
    pub fn run_parallel<I, S>(
        &self,
        pages: I,
        sink: &mut S,
        batch_size: usize,
    ) -> Result<RunStats, Error>
    where
        I: IntoIterator<Item = Result<PageRecord, Error>>,
        S: LineSink + ?Sized,
    {
        let mut stats = RunStats::default();
        let batches = pages.into_iter().chunks(batch_size.max(1));

        'batches: for batch in &batches {
            // only get valid pages, print errors
            let batch: Vec<PageRecord> = batch
                .filter_map(|page| match page {
                    Ok(page) => Some(page),
                    Err(e) => {
                        error!("could not read page: {:?}", e);
                        stats.read_errors += 1;
                        None
                    }
                })
                .collect();

            debug!("processing batch of {} pages", batch.len());
            let outcomes: Vec<PageOutcome> = batch
                .par_iter()
                .map(|page| self.process_page(page))
                .collect();

            for (page, outcome) in batch.iter().zip(outcomes) {
                Self::emit(page, outcome, sink, &mut stats)?;

                if self.limit_reached(&stats) {
                    info!("reached maximum number of pages ({})", stats.pages_processed);
                    break 'batches;
                }
            }
        }

        sink.flush()?;
        Ok(stats)
    }

    fn emit<S>(
        page: &PageRecord,
        outcome: PageOutcome,
        sink: &mut S,
        stats: &mut RunStats,
    ) -> Result<(), Error>
    where
        S: LineSink + ?Sized,
    {
        stats.pages_read += 1;
        match outcome {
            PageOutcome::Skipped(classification) => {
                *stats.pages_skipped.entry(classification).or_insert(0) += 1;
            }
            PageOutcome::Processed { lines, dropped } => {
                for line in &lines {
                    sink.write_line(line)?;
                }
                sink.end_page(page)?;

                stats.pages_processed += 1;
                stats.sentences_written += lines.len();
                for reason in dropped {
                    *stats.sentences_dropped.entry(reason).or_insert(0) += 1;
                }
            }
        }
        Ok(())
    }

    fn limit_reached(&self, stats: &RunStats) -> bool {
        match self.max_pages {
            Some(max) if max > 0 => stats.pages_processed >= max,
            _ => false,
        }
    }
}

impl CorpusPipeline {
    /// Pipeline with default Portuguese settings.
    pub fn try_default() -> Result<Self, Error> {
        Ok(Self::new(
            MarkupExtractor::new(Default::default())?,
            SentenceSegmenter::default(),
            Normalizer::default(),
        ))
    }
}
