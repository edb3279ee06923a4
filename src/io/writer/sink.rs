use crate::error::Error;
use crate::page::PageRecord;

/// Destination of output lines.
///
/// Lines arrive in page order. [LineSink::end_page] is called after the last line of each
/// eligible page, even if the page produced no line.
pub trait LineSink {
    fn write_line(&mut self, line: &str) -> Result<(), Error>;

    fn end_page(&mut self, _page: &PageRecord) -> Result<(), Error> {
        Ok(())
    }

    fn flush(&mut self) -> Result<(), Error> {
        Ok(())
    }
}

/// In-memory sink, mostly useful for testing.
impl LineSink for Vec<String> {
    fn write_line(&mut self, line: &str) -> Result<(), Error> {
        self.push(line.to_string());
        Ok(())
    }
}

impl<S: LineSink + ?Sized> LineSink for Box<S> {
    fn write_line(&mut self, line: &str) -> Result<(), Error> {
        (**self).write_line(line)
    }

    fn end_page(&mut self, page: &PageRecord) -> Result<(), Error> {
        (**self).end_page(page)
    }

    fn flush(&mut self) -> Result<(), Error> {
        (**self).flush()
    }
}
