//! Sentence boundary models.
//!
//! The segmenter finds candidate boundaries (terminal punctuation followed by whitespace),
//! a [BoundaryModel] decides which ones actually end a sentence.
use std::collections::HashSet;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use log::debug;

use crate::error::Error;

/// Surroundings of a candidate boundary, within a single line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundaryContext<'a> {
    /// Text of the sentence so far, up to the punctuation.
    pub before: &'a str,
    /// The punctuation run (`.`, `?!`, `."`, `...)`…).
    pub mark: &'a str,
    /// Rest of the line, starting with whitespace.
    pub after: &'a str,
}

impl<'a> BoundaryContext<'a> {
    /// Word right before the punctuation, without opening brackets or quotes.
    pub fn previous_word(&self) -> &'a str {
        self.before
            .rsplit(char::is_whitespace)
            .next()
            .unwrap_or("")
            .trim_start_matches(|c: char| !c.is_alphanumeric())
    }

    /// Word right after the boundary, without opening brackets or quotes.
    pub fn next_word(&self) -> &'a str {
        self.after
            .split_whitespace()
            .next()
            .unwrap_or("")
            .trim_start_matches(|c: char| !c.is_alphanumeric())
    }

    /// `true` if the mark holds a single period (possibly followed by closing quotes/brackets).
    pub fn is_period(&self) -> bool {
        self.mark.starts_with('.') && !self.mark.starts_with("..")
    }
}

/// Decides whether a candidate is a sentence boundary.
///
/// Models are shared across threads when running in parallel, hence the bounds.
pub trait BoundaryModel: Send + Sync {
    fn is_boundary(&self, context: &BoundaryContext) -> bool;

    /// Boundary probability, for models that have one.
    fn probability(&self, context: &BoundaryContext) -> f64 {
        if self.is_boundary(context) {
            1.0
        } else {
            0.0
        }
    }
}

/// Common Portuguese abbreviations (lowercase, without the final period).
const ABBREVIATIONS: &[&str] = &[
    "sr", "sra", "srta", "dr", "dra", "drs", "prof", "profa", "eng", "arq", "gen", "cel", "ten",
    "cap", "sgt", "gov", "pres", "dom", "d", "sto", "sta", "s", "av", "r", "p", "pp", "pág",
    "págs", "séc", "sécs", "vol", "vols", "ed", "eds", "cf", "op", "cit", "ibid", "id", "ex",
    "n", "nº", "no", "núm", "art", "arts", "fig", "figs", "tab", "obs", "aprox", "máx", "mín",
    "km", "kg", "cm", "mm", "tel", "ltda", "cia", "inc", "jr", "univ", "depto", "dept", "jan",
    "fev", "mar", "abr", "jun", "jul", "ago", "set", "out", "nov", "dez", "a.c", "d.c", "i.e",
    "e.g", "etc",
];

/// Abbreviations that commonly end sentences too.
const SENTENCE_FINAL: &[&str] = &["etc"];

/// Rule-based model in the spirit of Punkt: abbreviation list plus orthographic evidence.
///
/// A candidate is rejected when:
/// - the next word starts in lowercase (or with a digit after a period),
/// - the period follows a known abbreviation, unless that abbreviation often ends sentences and
///   the next word is capitalized,
/// - the period follows an initial (`J. R. Tolkien`) or a dotted abbreviation (`E.U.A.`)
///   and the next word is not clearly a new sentence.
#[derive(Debug, Clone)]
pub struct AbbreviationModel {
    abbreviations: HashSet<String>,
}

impl AbbreviationModel {
    pub fn new<I, S>(abbreviations: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            abbreviations: abbreviations
                .into_iter()
                .map(|a| normalize_abbreviation(a.as_ref()))
                .filter(|a| !a.is_empty())
                .collect(),
        }
    }

    /// Add abbreviations, one per line, from a file. Empty lines and `#` comments are ignored.
    pub fn extend_from_file(&mut self, path: &Path) -> Result<(), Error> {
        let reader = BufReader::new(File::open(path)?);
        let mut added = 0;
        for line in reader.lines() {
            let line = line?;
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            if self.abbreviations.insert(normalize_abbreviation(line)) {
                added += 1;
            }
        }
        debug!("loaded {} abbreviations from {:?}", added, path);
        Ok(())
    }

    pub fn is_abbreviation(&self, word: &str) -> bool {
        self.abbreviations.contains(&normalize_abbreviation(word))
    }
}

fn normalize_abbreviation(word: &str) -> String {
    word.trim().trim_end_matches('.').to_lowercase()
}

/// Single letter initial, or dotted abbreviation made of short segments (`E.U.A`, `a.C`).
fn is_initialism(word: &str) -> bool {
    let mut segments = word.split('.').filter(|s| !s.is_empty()).peekable();
    segments.peek().is_some()
        && segments.all(|s| s.chars().count() == 1 && s.chars().all(char::is_alphabetic))
}

impl Default for AbbreviationModel {
    fn default() -> Self {
        Self::new(ABBREVIATIONS)
    }
}

impl BoundaryModel for AbbreviationModel {
    fn is_boundary(&self, context: &BoundaryContext) -> bool {
        let next = context.next_word();
        let next_first = next.chars().next();

        // "...e então" / "Sim? claro"
        if next_first.map_or(false, char::is_lowercase) {
            return false;
        }
        if !context.is_period() {
            return true;
        }

        let previous = context.previous_word();
        let capitalized_next = next_first.map_or(false, char::is_uppercase);

        if self.is_abbreviation(previous) {
            let abbreviation = normalize_abbreviation(previous);
            return capitalized_next && SENTENCE_FINAL.contains(&abbreviation.as_str());
        }
        if is_initialism(previous) {
            return false;
        }
        // "no dia 25. de" is taken care of by the lowercase rule; "Art. 5." is not a boundary
        if previous.chars().all(|c| c.is_ascii_digit())
            && next_first.map_or(false, |c| c.is_ascii_digit())
        {
            return false;
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx<'a>(before: &'a str, mark: &'a str, after: &'a str) -> BoundaryContext<'a> {
        BoundaryContext {
            before,
            mark,
            after,
        }
    }

    #[test]
    fn words() {
        let c = ctx("Ele falou com o (Sr", ".", " \"Silva\" ontem");
        assert_eq!(c.previous_word(), "Sr");
        assert_eq!(c.next_word(), "Silva\"");
    }

    #[test]
    fn plain_boundary() {
        let m = AbbreviationModel::default();
        assert!(m.is_boundary(&ctx("Ele chegou", ".", " Depois saiu.")));
        assert!(m.is_boundary(&ctx("Ele chegou", "?", " Depois saiu.")));
        assert!(m.is_boundary(&ctx("Ele chegou", ".\"", " Depois saiu.")));
    }

    #[test]
    fn abbreviations() {
        let m = AbbreviationModel::default();
        assert!(!m.is_boundary(&ctx("Falou com o Sr", ".", " Silva.")));
        assert!(!m.is_boundary(&ctx("Ver a p", ".", " 12.")));
        assert!(m.is_boundary(&ctx("Frutas, legumes etc", ".", " Depois saiu.")));
        assert!(!m.is_boundary(&ctx("Frutas, legumes etc", ".", " e mais.")));
    }

    #[test]
    fn initials() {
        let m = AbbreviationModel::default();
        assert!(!m.is_boundary(&ctx("Escrito por J", ".", " R. R. Tolkien.")));
        assert!(!m.is_boundary(&ctx("Nasceu nos E.U.A", ".", " Kennedy.")));
    }

    #[test]
    fn lowercase_continuation() {
        let m = AbbreviationModel::default();
        assert!(!m.is_boundary(&ctx("Ele disse", "...", " e saiu.")));
        assert!(m.is_boundary(&ctx("Ele disse", "...", " Ninguém ouviu.")));
    }

    #[test]
    fn custom_abbreviations() {
        let mut m = AbbreviationModel::new(Vec::<String>::new());
        assert!(m.is_boundary(&ctx("Rua", ".", " Augusta")));

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("abbrev.txt");
        std::fs::write(&path, "# abreviaturas\nRua.\n\n").unwrap();
        m.extend_from_file(&path).unwrap();
        assert!(m.is_abbreviation("rua"));
        assert!(!m.is_boundary(&ctx("Rua", ".", " Augusta")));
    }

    #[test]
    fn probability() {
        let m = AbbreviationModel::default();
        assert_eq!(m.probability(&ctx("Ele chegou", ".", " Depois")), 1.0);
        assert_eq!(m.probability(&ctx("o Sr", ".", " Silva")), 0.0);
    }
}
