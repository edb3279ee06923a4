/*!
# wikicorpus

Wikipedia dump to sentence-tokenized corpus.

Pages are read from a MediaWiki XML dump ([sources]), classified ([classify]), stripped of their
markup ([markup]), split into sentences ([sentences]) and normalized/tokenized ([normalize]).
[pipelines] ties everything together and writes lines through [io] sinks.

```no_run
use wikicorpus::pipelines::CorpusPipeline;
use wikicorpus::sources::Dump;

let pipeline = CorpusPipeline::try_default()?;
let pages = Dump::from_path("ptwiki.xml.gz")?;
let mut lines: Vec<String> = Vec::new();
let stats = pipeline.run(pages, &mut lines)?;
println!("{} sentences", stats.sentences_written);
# Ok::<(), wikicorpus::error::Error>(())
```
!*/
pub mod classify;
pub mod error;
pub mod filtering;
pub mod io;
pub mod markup;
pub mod normalize;
pub mod page;
pub mod pipelines;
pub mod sentences;
pub mod sources;
