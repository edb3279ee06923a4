/*!
# Output sinks

Pipelines push output lines into a [LineSink], page after page.

- [TextWriter] appends to `wiki-N.txt` files, rotating at a size limit (between pages),
- [ArticleWriter] writes each page into its own file,
- `Vec<String>` collects lines in memory.
!*/
mod articlewriter;
mod sink;
mod textwriter;

pub use articlewriter::ArticleWriter;
pub use sink::LineSink;
pub use textwriter::{TextWriter, DEFAULT_PART_SIZE};
