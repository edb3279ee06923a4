//! # wikicorpus
//!
//! Builds a sentence-per-line, tokenized Portuguese corpus out of a Wikipedia XML dump.
//!
//! ```sh
//! RUST_LOG=info wikicorpus -i ptwiki-latest-pages-articles.xml.gz -o corpus/
//! ```
use structopt::StructOpt;

#[macro_use]
extern crate log;

mod cli;

use wikicorpus::pipelines::{CorpusBuilder, Pipeline};

fn main() -> Result<(), wikicorpus::error::Error> {
    env_logger::init();

    let opt = cli::WikiCorpus::from_args();
    debug!("cli args\n{:#?}", opt);

    let options = (&opt).into();
    let builder = CorpusBuilder::new(opt.src, opt.dst, options);
    let stats = builder.run()?;

    if stats.pages_processed == 0 {
        warn!("no article was processed");
    }
    Ok(())
}
