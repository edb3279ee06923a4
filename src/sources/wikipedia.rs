use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
};

use flate2::read::MultiGzDecoder;
use log::{debug, warn};
use quick_xml::events::Event;
use quick_xml::Reader;

use crate::error::Error;
use crate::page::PageRecord;

/// MediaWiki XML export reader, generic over reader type.
///
/// Yields one [PageRecord] per `<page>` element, in dump order.
/// Only the page id, title, namespace and the text of the (first) revision are kept.
///
/// Malformed pages (missing title, id or text, bad entities, mismatched tags) are yielded as
/// errors and reading continues with the next page.
/// Syntax and I/O errors end the iteration.
pub struct Dump<R> {
    reader: Reader<R>,
    buf: Vec<u8>,
    done: bool,
}

/// Page currently being read.
#[derive(Debug, Default)]
struct PartialPage {
    title: Option<String>,
    namespace: Option<String>,
    id: Option<String>,
    text: Option<String>,
    in_revision: bool,
    /// First error met inside the page.
    error: Option<Error>,
}

impl PartialPage {
    fn push(&mut self, field: Field, text: &str) {
        let slot = match field {
            Field::Title => &mut self.title,
            Field::Namespace => &mut self.namespace,
            Field::Id => &mut self.id,
            Field::Text => &mut self.text,
        };
        slot.get_or_insert_with(String::new).push_str(text);
    }

    fn fail(&mut self, error: Error) {
        if self.error.is_none() {
            self.error = Some(error);
        }
    }

    fn build(mut self) -> Result<PageRecord, Error> {
        if let Some(error) = self.error.take() {
            return Err(error);
        }

        let missing = |field| Error::MissingField {
            field,
            title: self.title.clone(),
        };

        let id: u64 = self.id.as_deref().ok_or_else(|| missing("id"))?.trim().parse()?;
        let text = self.text.clone().ok_or_else(|| missing("text"))?;
        let namespace: Option<i64> = self
            .namespace
            .as_deref()
            .map(|ns| ns.trim().parse())
            .transpose()?;
        let title = match self.title {
            Some(title) => title,
            None => {
                return Err(Error::MissingField {
                    field: "title",
                    title: None,
                })
            }
        };

        let record = PageRecord::new(title, id, text);
        Ok(match namespace {
            Some(ns) => record.with_namespace(ns),
            None => record,
        })
    }
}

/// Field whose text content is being read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Title,
    Namespace,
    Id,
    Text,
}

/// Dump reader over a gzipped file, using [MultiGzDecoder].
impl Dump<BufReader<MultiGzDecoder<File>>> {
    pub fn from_path_gzip<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let gzip_file = File::open(path)?;
        let gzip_stream = MultiGzDecoder::new(gzip_file);
        Ok(Self::new(BufReader::new(gzip_stream)))
    }
}

impl Dump<BufReader<File>> {
    pub fn from_path_xml<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let file = File::open(path)?;
        Ok(Self::new(BufReader::new(file)))
    }
}

impl Dump<Box<dyn BufRead>> {
    /// Open a dump, decompressing it if its name ends with `.gz`.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let reader: Box<dyn BufRead> = match path.extension().and_then(|ext| ext.to_str()) {
            Some("gz") => {
                debug!("{:?}: reading gzipped dump", path);
                Box::new(BufReader::new(MultiGzDecoder::new(file)))
            }
            _ => Box::new(BufReader::new(file)),
        };
        Ok(Self::new(reader))
    }
}

impl<R: BufRead> Dump<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader: Reader::from_reader(reader),
            buf: Vec::new(),
            done: false,
        }
    }

    /// Read events until the next page is complete.
    fn read_page(&mut self) -> Option<Result<PageRecord, Error>> {
        let mut page: Option<PartialPage> = None;
        let mut field: Option<Field> = None;

        loop {
            self.buf.clear();
            let event = match self.reader.read_event_into(&mut self.buf) {
                Ok(event) => event,
                // the reader is still in sync, the page is lost but not the dump
                Err(e @ quick_xml::Error::IllFormed(_)) => {
                    warn!(
                        "ill-formed xml at byte {}: {}",
                        self.reader.buffer_position(),
                        e
                    );
                    match page.as_mut() {
                        Some(p) => {
                            p.fail(Error::Xml(e));
                            continue;
                        }
                        None => return Some(Err(Error::Xml(e))),
                    }
                }
                Err(e) => {
                    self.done = true;
                    return Some(Err(Error::Xml(e)));
                }
            };

            match event {
                Event::Start(e) => {
                    let name = e.name();
                    if name.as_ref() == b"page" {
                        if page.is_some() {
                            warn!("nested <page> element, previous page discarded");
                        }
                        page = Some(PartialPage::default());
                    } else if let Some(p) = page.as_mut() {
                        match name.as_ref() {
                            b"revision" => p.in_revision = true,
                            b"title" => field = Some(Field::Title),
                            b"ns" => field = Some(Field::Namespace),
                            // revisions and contributors have ids too
                            b"id" if !p.in_revision => field = Some(Field::Id),
                            b"text" if p.in_revision && p.text.is_none() => {
                                p.text = Some(String::new());
                                field = Some(Field::Text);
                            }
                            _ => {}
                        }
                    }
                }
                Event::Empty(e) => {
                    // deleted or empty revisions: <text bytes="0" />
                    if let (b"text", Some(p)) = (e.name().as_ref(), page.as_mut()) {
                        if p.in_revision && p.text.is_none() {
                            p.text = Some(String::new());
                        }
                    }
                }
                Event::Text(e) => {
                    if let (Some(f), Some(p)) = (field, page.as_mut()) {
                        match e.unescape() {
                            Ok(text) => p.push(f, &text),
                            Err(e) => {
                                let reason = format!("page {:?}: {}", p.title, e);
                                p.fail(Error::Custom(reason));
                            }
                        }
                    }
                }
                Event::CData(e) => {
                    if let (Some(f), Some(p)) = (field, page.as_mut()) {
                        p.push(f, &String::from_utf8_lossy(&e));
                    }
                }
                Event::End(e) => match e.name().as_ref() {
                    b"page" => {
                        if let Some(p) = page.take() {
                            return Some(p.build());
                        }
                    }
                    b"revision" => {
                        if let Some(p) = page.as_mut() {
                            p.in_revision = false;
                        }
                    }
                    b"title" | b"ns" | b"id" | b"text" => field = None,
                    _ => {}
                },
                Event::Eof => {
                    self.done = true;
                    return page.map(|p| {
                        Err(Error::Custom(format!(
                            "unexpected end of dump in page {:?}",
                            p.title
                        )))
                    });
                }
                _ => {}
            }
        }
    }
}

impl<R: BufRead> Iterator for Dump<R> {
    type Item = Result<PageRecord, Error>;
    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        self.read_page()
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use flate2::{write::GzEncoder, Compression};

    use super::Dump;
    use crate::error::Error;

    const DUMP: &str = r#"<mediawiki xmlns="http://www.mediawiki.org/xml/export-0.10/" xml:lang="pt">
  <siteinfo>
    <sitename>Wikipédia</sitename>
  </siteinfo>
  <page>
    <title>Lisboa</title>
    <ns>0</ns>
    <id>12</id>
    <revision>
      <id>9000</id>
      <contributor>
        <username>Alguém</username>
        <id>77</id>
      </contributor>
      <text bytes="60" xml:space="preserve">'''Lisboa''' é a capital de [[Portugal]] &amp; &lt;ref&gt;x&lt;/ref&gt;.</text>
    </revision>
  </page>
  <page>
    <title>Predefinição:Info</title>
    <ns>10</ns>
    <id>13</id>
    <revision>
      <id>9001</id>
      <text bytes="0" />
    </revision>
  </page>
</mediawiki>"#;

    #[test]
    fn read_pages() {
        let pages: Vec<_> = Dump::new(DUMP.as_bytes())
            .collect::<Result<_, _>>()
            .unwrap();
        assert_eq!(pages.len(), 2);

        let lisboa = &pages[0];
        assert_eq!(lisboa.title(), "Lisboa");
        assert_eq!(lisboa.id(), 12);
        assert_eq!(lisboa.namespace(), Some(0));
        assert_eq!(
            lisboa.raw_markup(),
            "'''Lisboa''' é a capital de [[Portugal]] & <ref>x</ref>."
        );

        let template = &pages[1];
        assert_eq!(template.id(), 13);
        assert_eq!(template.namespace(), Some(10));
        assert_eq!(template.raw_markup(), "");
    }

    #[test]
    fn missing_fields() {
        let dump = r#"<mediawiki>
  <page><title>Sem id</title><revision><text>a</text></revision></page>
  <page><title>Ok</title><id>2</id><revision><text>b</text></revision></page>
</mediawiki>"#;
        let pages: Vec<_> = Dump::new(dump.as_bytes()).collect();
        assert_eq!(pages.len(), 2);
        match &pages[0] {
            Err(Error::MissingField { field, title }) => {
                assert_eq!(*field, "id");
                assert_eq!(title.as_deref(), Some("Sem id"));
            }
            other => panic!("unexpected {:?}", other),
        }
        let ok = pages[1].as_ref().unwrap();
        assert_eq!(ok.title(), "Ok");
        assert_eq!(ok.namespace(), None);
    }

    #[test]
    fn bad_page_does_not_stop_reading() {
        let dump = r#"<mediawiki>
  <page><title>Entidade</title><id>1</id><revision><text>a &bogus; b</text></revision></page>
  <page><title>Seguinte</title><id>2</id><revision><text>b</text></revision></page>
</mediawiki>"#;
        let pages: Vec<_> = Dump::new(dump.as_bytes()).collect();
        assert_eq!(pages.len(), 2);
        match &pages[0] {
            Err(Error::Custom(reason)) => assert!(reason.contains("Entidade"), "{}", reason),
            other => panic!("unexpected {:?}", other),
        }
        assert_eq!(pages[1].as_ref().unwrap().title(), "Seguinte");
    }

    #[test]
    fn mismatched_tag_loses_one_page() {
        let dump = r#"<mediawiki>
  <page><title>Errado</titel><id>1</id><revision><text>a</text></revision></page>
  <page><title>Certo</title><id>2</id><revision><text>b</text></revision></page>
</mediawiki>"#;
        let pages: Vec<_> = Dump::new(dump.as_bytes()).collect();
        assert_eq!(pages.len(), 2);
        assert!(matches!(pages[0], Err(Error::Xml(_))));
        let ok = pages[1].as_ref().unwrap();
        assert_eq!(ok.title(), "Certo");
        assert_eq!(ok.raw_markup(), "b");
    }

    #[test]
    fn truncated_dump() {
        let dump = "<mediawiki><page><title>Cortado</title><id>1</id>";
        let pages: Vec<_> = Dump::new(dump.as_bytes()).collect();
        assert_eq!(pages.len(), 1);
        assert!(pages[0].is_err());
    }

    #[test]
    fn gzipped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dump.xml.gz");
        let mut encoder = GzEncoder::new(std::fs::File::create(&path).unwrap(), Compression::fast());
        encoder.write_all(DUMP.as_bytes()).unwrap();
        encoder.finish().unwrap();

        let titles: Vec<_> = Dump::from_path(&path)
            .unwrap()
            .map(|page| page.unwrap().title().to_string())
            .collect();
        assert_eq!(titles, vec!["Lisboa", "Predefinição:Info"]);

        let from_gzip = Dump::from_path_gzip(&path).unwrap().count();
        assert_eq!(from_gzip, 2);
    }
}
