//! Command line arguments and parameters management/parsing.
use std::path::PathBuf;

use structopt::StructOpt;
use wikicorpus::io::writer::DEFAULT_PART_SIZE;
use wikicorpus::pipelines::CorpusOptions;

#[derive(Debug, StructOpt)]
#[structopt(
    name = "wikicorpus",
    about = "Build a tokenized, one sentence per line corpus from a Wikipedia XML dump."
)]
/// Corpus building command and parameters.
///
/// ```sh
/// USAGE:
///     wikicorpus [FLAGS] [OPTIONS] -i <src>
///
/// FLAGS:
///     -h, --help        Prints help information
///         --one         Saves one article per file
///         --parallel    Process pages in parallel batches
///     -V, --version     Prints version information
/// ```
pub struct WikiCorpus {
    #[structopt(short = "i", parse(from_os_str), help = "Wikipedia dump file (.xml or .xml.gz)")]
    pub src: PathBuf,
    #[structopt(
        short = "o",
        parse(from_os_str),
        help = "Output directory",
        default_value = "."
    )]
    pub dst: PathBuf,
    #[structopt(long = "one", help = "Saves one article per file")]
    pub one_per_file: bool,
    #[structopt(
        long = "max",
        help = "Maximum number of articles to read, 0 means all",
        default_value = "0"
    )]
    pub max_pages: usize,
    #[structopt(
        long = "abbreviations",
        parse(from_os_str),
        help = "Additional abbreviations file, one per line"
    )]
    pub abbreviations: Option<PathBuf>,
    #[structopt(
        long = "min-tokens",
        help = "Sentences with fewer tokens are dropped",
        default_value = "3"
    )]
    pub min_tokens: usize,
    #[structopt(long = "parallel", help = "Process pages in parallel batches")]
    pub parallel: bool,
    #[structopt(
        long = "batch-size",
        help = "Number of pages per parallel batch",
        default_value = "1000"
    )]
    pub batch_size: usize,
    #[structopt(
        long = "part-size",
        help = "Size limit of output files (MB), ignored with --one"
    )]
    pub part_size: Option<u64>,
}

impl From<&WikiCorpus> for CorpusOptions {
    fn from(args: &WikiCorpus) -> Self {
        Self {
            one_per_file: args.one_per_file,
            max_pages: Some(args.max_pages),
            abbreviations: args.abbreviations.clone(),
            min_tokens: args.min_tokens,
            batch_size: args.parallel.then(|| args.batch_size),
            part_size: args
                .part_size
                .map_or(DEFAULT_PART_SIZE, |mb| mb * 1_000_000),
        }
    }
}
