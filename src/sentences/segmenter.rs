//! Sentence segmentation.
use std::str::Lines;

use crate::markup::TEMPLATE_MARKER;

use super::boundary::{AbbreviationModel, BoundaryContext, BoundaryModel};

/// A sentence, as found in extracted prose.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentenceUnit {
    text: String,
    contains_template_marker: bool,
}

impl SentenceUnit {
    pub fn new(text: String) -> Self {
        let contains_template_marker = text.contains(TEMPLATE_MARKER);
        Self {
            text,
            contains_template_marker,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn contains_template_marker(&self) -> bool {
        self.contains_template_marker
    }
}

/// Splits prose into [SentenceUnit]s.
///
/// Line breaks always end sentences (extracted prose has one paragraph per line).
/// Within a line, the injected [BoundaryModel] decides on each candidate.
pub struct SentenceSegmenter {
    model: Box<dyn BoundaryModel>,
}

impl SentenceSegmenter {
    pub fn new(model: Box<dyn BoundaryModel>) -> Self {
        Self { model }
    }

    /// Lazily segment `prose`.
    /// The returned iterator can be cloned to restart from its current position.
    pub fn segment<'a>(&'a self, prose: &'a str) -> Sentences<'a> {
        Sentences {
            model: self.model.as_ref(),
            lines: prose.lines(),
            rest: "",
        }
    }
}

impl Default for SentenceSegmenter {
    fn default() -> Self {
        Self::new(Box::new(AbbreviationModel::default()))
    }
}

/// Iterator over the sentences of a text, see [SentenceSegmenter::segment].
#[derive(Clone)]
pub struct Sentences<'a> {
    model: &'a dyn BoundaryModel,
    lines: Lines<'a>,
    rest: &'a str,
}

/// Sentence-final punctuation.
fn is_terminal(c: char) -> bool {
    matches!(c, '.' | '!' | '?' | '…')
}

/// Closing punctuation that belongs to the preceding sentence.
fn is_closing(c: char) -> bool {
    matches!(c, '"' | '\'' | '”' | '’' | '»' | ')' | ']')
}

/// Split `line` after its first sentence boundary.
fn split_first<'a>(model: &dyn BoundaryModel, line: &'a str) -> (&'a str, &'a str) {
    let mut chars = line.char_indices().peekable();

    while let Some((start, c)) = chars.next() {
        if !is_terminal(c) {
            continue;
        }

        // extend over the whole punctuation run
        let mut end = start + c.len_utf8();
        while let Some(&(idx, next)) = chars.peek() {
            if is_terminal(next) || is_closing(next) {
                end = idx + next.len_utf8();
                chars.next();
            } else {
                break;
            }
        }

        let after = &line[end..];
        match after.chars().next() {
            None => return (line, ""),
            Some(w) if w.is_whitespace() => {
                let context = BoundaryContext {
                    before: &line[..start],
                    mark: &line[start..end],
                    after,
                };
                if model.is_boundary(&context) {
                    return (&line[..end], after);
                }
            }
            _ => (),
        }
    }

    (line, "")
}

impl<'a> Iterator for Sentences<'a> {
    type Item = SentenceUnit;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if self.rest.is_empty() {
                self.rest = self.lines.next()?.trim();
                continue;
            }

            let (sentence, rest) = split_first(self.model, self.rest);
            self.rest = rest.trim_start();

            let sentence = sentence.trim();
            if !sentence.is_empty() {
                return Some(SentenceUnit::new(sentence.to_string()));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use itertools::Itertools;

    use super::*;
    use crate::sentences::AbbreviationModel;

    /// Splits on every candidate.
    struct Always;
    impl BoundaryModel for Always {
        fn is_boundary(&self, _: &BoundaryContext) -> bool {
            true
        }
    }

    /// Never splits inside a line.
    struct Never;
    impl BoundaryModel for Never {
        fn is_boundary(&self, _: &BoundaryContext) -> bool {
            false
        }
    }

    fn texts(segmenter: &SentenceSegmenter, prose: &str) -> Vec<String> {
        segmenter
            .segment(prose)
            .map(|s| s.text().to_string())
            .collect()
    }

    #[test]
    fn lines_are_boundaries() {
        let s = SentenceSegmenter::new(Box::new(Never));
        assert_eq!(
            texts(&s, "Um. Dois.\n\nTrês"),
            vec!["Um. Dois.", "Três"]
        );
    }

    #[test]
    fn model_is_consulted() {
        let s = SentenceSegmenter::new(Box::new(Always));
        assert_eq!(
            texts(&s, "Um. Dois! Três?\" Quatro... cinco 3.5 seis"),
            vec!["Um.", "Dois!", "Três?\"", "Quatro...", "cinco 3.5 seis"]
        );
    }

    #[test]
    fn abbreviation_model() {
        let s = SentenceSegmenter::new(Box::new(AbbreviationModel::default()));
        assert_eq!(
            texts(
                &s,
                "O Sr. Silva chegou em 1990. Depois foi embora (para sempre). Fim"
            ),
            vec![
                "O Sr. Silva chegou em 1990.",
                "Depois foi embora (para sempre).",
                "Fim"
            ]
        );
    }

    #[test]
    fn template_marker_flag() {
        let s = SentenceSegmenter::new(Box::new(AbbreviationModel::default()));
        let units: Vec<_> = s.segment("__TEMPLATE__ Texto real. Outro texto.").collect();
        assert_eq!(units.len(), 2);
        assert!(units[0].contains_template_marker());
        assert!(!units[1].contains_template_marker());
    }

    #[test]
    fn partition_reconstructs_prose() {
        let s = SentenceSegmenter::new(Box::new(AbbreviationModel::default()));
        let prose = "Primeira frase.  Segunda, com o Dr. Fulano!\nTerceira?\n\n  Quarta";
        let joined = s.segment(prose).map(|u| u.text().to_string()).join(" ");
        assert_eq!(
            joined.split_whitespace().collect::<Vec<_>>(),
            prose.split_whitespace().collect::<Vec<_>>()
        );
    }

    #[test]
    fn restartable() {
        let s = SentenceSegmenter::new(Box::new(Always));
        let mut it = s.segment("Um. Dois. Três.");
        it.next();
        let saved = it.clone();
        assert_eq!(it.count(), 2);
        assert_eq!(saved.map(|u| u.text().to_string()).collect::<Vec<_>>(), vec!["Dois.", "Três."]);
    }

    #[test]
    fn empty_prose() {
        let s = SentenceSegmenter::new(Box::new(Always));
        assert_eq!(s.segment("").count(), 0);
        assert_eq!(s.segment("\n \n").count(), 0);
    }
}
