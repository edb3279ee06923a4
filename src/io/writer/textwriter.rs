//! Rotating text file writer.
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use log::{debug, info};

use super::LineSink;
use crate::error::Error;
use crate::page::PageRecord;

/// Default size limit for a single file (50MB).
pub const DEFAULT_PART_SIZE: u64 = 50_000_000;

/// Rotating file writer.
///
/// Writes lines to `wiki-1.txt`, `wiki-2.txt`... in `dst`, and holds a size (bytes) limit.
/// Files are only rotated between pages, so that a page is never split across two files:
/// a file may exceed the limit by the size of its last page.
///
/// Note that nothing is created unless a write is performed.
pub struct TextWriter {
    dst: PathBuf,
    text: Option<BufWriter<File>>,
    size: u64,
    size_limit: u64,
    pub nb_files: u64,
}

impl TextWriter {
    /// Create a new [TextWriter].
    /// size_limit is in bytes.
    pub fn new(dst: &Path, size_limit: u64) -> Self {
        Self {
            dst: dst.to_path_buf(),
            text: None,
            size: 0,
            size_limit,
            nb_files: 0,
        }
    }

    /// Rotate file.
    fn create_next_file(&mut self) -> Result<(), Error> {
        if let Some(mut text) = self.text.take() {
            text.flush()?;
        }

        let path = self.dst.join(format!("wiki-{}.txt", self.nb_files + 1));

        let mut options = OpenOptions::new();
        options.write(true).truncate(true).create(true);

        info!("creating {:?}", path);
        let text = options.open(path)?;

        self.text = Some(BufWriter::new(text));
        self.size = 0;
        self.nb_files += 1;
        Ok(())
    }

    /// returns remaining size in current file
    pub fn get_free_space(&self) -> u64 {
        self.size_limit.saturating_sub(self.size)
    }
}

impl LineSink for TextWriter {
    fn write_line(&mut self, line: &str) -> Result<(), Error> {
        // if there's no file open, create one
        if self.text.is_none() {
            self.create_next_file()?;
        }

        match &mut self.text {
            Some(text) => {
                text.write_all(line.as_bytes())?;
                text.write_all(b"\n")?;
                self.size += line.len() as u64 + 1;
                Ok(())
            }
            None => Err(Error::Custom(format!(
                "could not write to file {}",
                self.nb_files
            ))),
        }
    }

    fn end_page(&mut self, page: &PageRecord) -> Result<(), Error> {
        // next line will go to a new file
        if self.size >= self.size_limit {
            debug!(
                "file {} full after page {:?} ({} bytes)",
                self.nb_files,
                page.title(),
                self.size
            );
            if let Some(mut text) = self.text.take() {
                text.flush()?;
            }
        }
        Ok(())
    }

    fn flush(&mut self) -> Result<(), Error> {
        match &mut self.text {
            Some(text) => Ok(text.flush()?),
            None => Ok(()),
        }
    }
}

impl Drop for TextWriter {
    fn drop(&mut self) {
        if let Some(text) = &mut self.text {
            // errors are ignored, call flush explicitly to get them
            let _ = text.flush();
        }
    }
}
