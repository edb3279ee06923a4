use std::path::Path;

use wikicorpus::io::writer::{ArticleWriter, LineSink, TextWriter};
use wikicorpus::page::PageRecord;
use wikicorpus::pipelines::CorpusPipeline;

fn articles(nb: usize) -> Vec<PageRecord> {
    (0..nb)
        .map(|x| {
            let text = format!(
                "O artigo '''número {}''' tem uma [[frase]]. Também tem outra frase mais longa.",
                x
            );
            PageRecord::new(format!("Artigo {}", x), x as u64, text).with_namespace(0)
        })
        .collect()
}

fn read_parts(dst: &Path) -> Vec<String> {
    let mut parts = Vec::new();
    for i in 1.. {
        match std::fs::read_to_string(dst.join(format!("wiki-{}.txt", i))) {
            Ok(content) => parts.push(content),
            Err(_) => break,
        }
    }
    parts
}

#[test]
fn rotating_files_keep_pages_whole() {
    let dst = tempfile::tempdir().unwrap();
    let pipeline = CorpusPipeline::try_default().unwrap();

    // a bit more than a page per file
    let mut writer = TextWriter::new(dst.path(), 60);
    let stats = pipeline
        .run(articles(10).into_iter().map(Ok), &mut writer)
        .unwrap();
    assert_eq!(stats.sentences_written, 20);

    let parts = read_parts(dst.path());
    assert_eq!(parts.len() as u64, writer.nb_files);
    assert!(parts.len() > 1);

    for part in &parts {
        let lines: Vec<&str> = part.lines().collect();
        // each page writes two lines, and they never get split
        assert_eq!(lines.len() % 2, 0, "{:?}", lines);
        for pair in lines.chunks(2) {
            assert!(pair[0].starts_with("O artigo número __NUMBER__"));
            assert_eq!(pair[1], "Também tem outra frase mais longa .");
        }
    }

    let total: usize = parts.iter().map(|p| p.lines().count()).sum();
    assert_eq!(total, 20);
}

#[test]
fn single_file_with_large_limit() {
    let dst = tempfile::tempdir().unwrap();
    let pipeline = CorpusPipeline::try_default().unwrap();
    let mut writer = TextWriter::new(dst.path(), 50_000_000);
    pipeline
        .run_parallel(articles(25).into_iter().map(Ok), &mut writer, 4)
        .unwrap();

    let parts = read_parts(dst.path());
    assert_eq!(parts.len(), 1);
    assert_eq!(parts[0].lines().count(), 50);
}

#[test]
fn one_file_per_article() {
    let dst = tempfile::tempdir().unwrap();
    let pipeline = CorpusPipeline::try_default().unwrap();

    let mut pages = articles(3);
    // a page left without prose
    pages.insert(
        1,
        PageRecord::new("Vazio".to_string(), 99, "{{Esboço}}".to_string()).with_namespace(0),
    );

    let mut writer = ArticleWriter::new(dst.path());
    let stats = pipeline
        .run(pages.into_iter().map(Ok), &mut writer)
        .unwrap();
    assert_eq!(stats.pages_processed, 4);
    assert_eq!(writer.nb_files, 3);

    let read = |n: usize| std::fs::read_to_string(dst.path().join(format!("wiki-{}.txt", n)));
    assert_eq!(
        read(0).unwrap(),
        "O artigo número __NUMBER__ tem uma frase .\nTambém tem outra frase mais longa .\n"
    );
    assert!(read(1).is_err());
    assert!(read(2).is_ok());
    assert!(read(3).is_ok());
}

#[test]
fn boxed_sink() {
    let mut sink: Box<dyn LineSink> = Box::new(Vec::<String>::new());
    sink.write_line("uma linha qualquer .").unwrap();
    sink.flush().unwrap();
}
