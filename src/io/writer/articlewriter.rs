//! One file per article.
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use log::{debug, info};

use super::LineSink;
use crate::error::Error;
use crate::page::PageRecord;

/// Writes the lines of each page into its own file, `wiki-<n>.txt`,
/// `n` being the (0-based) position of the page among eligible pages.
///
/// Lines are buffered until the end of the page. Pages without lines do not get a file.
pub struct ArticleWriter {
    dst: PathBuf,
    lines: Vec<String>,
    nb_pages: u64,
    pub nb_files: u64,
}

impl ArticleWriter {
    pub fn new(dst: &Path) -> Self {
        Self {
            dst: dst.to_path_buf(),
            lines: Vec::new(),
            nb_pages: 0,
            nb_files: 0,
        }
    }
}

impl LineSink for ArticleWriter {
    fn write_line(&mut self, line: &str) -> Result<(), Error> {
        self.lines.push(line.to_string());
        Ok(())
    }

    fn end_page(&mut self, page: &PageRecord) -> Result<(), Error> {
        let page_number = self.nb_pages;
        self.nb_pages += 1;

        if self.lines.is_empty() {
            debug!("{:?}: no line, no file", page.title());
            return Ok(());
        }

        let path = self.dst.join(format!("wiki-{}.txt", page_number));
        let mut file = BufWriter::new(File::create(&path)?);
        for line in self.lines.drain(..) {
            file.write_all(line.as_bytes())?;
            file.write_all(b"\n")?;
        }
        file.flush()?;

        info!("saved {:?} ({:?})", path, page.title());
        self.nb_files += 1;
        Ok(())
    }
}
