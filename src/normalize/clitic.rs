//! Enclitic pronoun separation.
//!
//! Portuguese attaches unstressed pronouns to verbs with a hyphen (`encontrou-se`, `dá-lhe`).
//! They are split off so that the verb and the pronoun become separate tokens.
//!
//! This is surface matching: any hyphenated word ending with a known pronoun is split,
//! whether or not it is a verb. Mesoclisis (`fá-lo-ia`) is not recovered.
use std::collections::HashSet;

/// Restores a verb ending that changed when a pronoun was attached.
///
/// `fazer` + `o` is written `fazê-lo`: the `r` is dropped, the pronoun takes an `l`
/// and the vowel gets an accent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StemRepair {
    /// Pronouns (adjacent to the verb) that trigger the repair.
    pub clitics: Vec<String>,
    /// Stem ending to replace.
    pub suffix: String,
    /// Replacement for the ending.
    pub replacement: String,
}

impl StemRepair {
    pub fn new(clitics: &[&str], suffix: &str, replacement: &str) -> Self {
        Self {
            clitics: clitics.iter().map(|c| c.to_string()).collect(),
            suffix: suffix.to_string(),
            replacement: replacement.to_string(),
        }
    }

    fn apply(&self, stem: &str, clitic: &str) -> Option<String> {
        if !self.clitics.iter().any(|c| c == clitic) {
            return None;
        }
        stem.strip_suffix(self.suffix.as_str())
            .filter(|base| !base.is_empty())
            .map(|base| format!("{}{}", base, self.replacement))
    }
}

/// Known pronouns and stem repairs.
#[derive(Debug, Clone)]
pub struct CliticTable {
    clitics: HashSet<String>,
    repairs: Vec<StemRepair>,
}

const CLITICS: &[&str] = &[
    "me", "te", "se", "nos", "vos", "lhe", "lhes", "o", "a", "os", "as", "lo", "la", "los", "las",
    "no", "na", "nas", "lho", "lha", "lhos", "lhas", "mo", "ma", "mos", "mas", "to", "ta", "tos",
    "tas",
];

const L_FORMS: &[&str] = &["lo", "la", "los", "las"];

impl Default for CliticTable {
    fn default() -> Self {
        let repairs = vec![
            StemRepair::new(L_FORMS, "á", "ar"),
            StemRepair::new(L_FORMS, "ê", "er"),
            StemRepair::new(L_FORMS, "í", "ir"),
            StemRepair::new(L_FORMS, "ô", "or"),
            StemRepair::new(L_FORMS, "i", "ir"),
            // encontramo-nos, vimo-nos
            StemRepair::new(&["nos"], "mo", "mos"),
            // encontramo-lo, fizemo-las
            StemRepair::new(L_FORMS, "mo", "mos"),
        ];
        Self::new(CLITICS.iter().map(|c| c.to_string()), repairs)
    }
}

impl CliticTable {
    pub fn new(clitics: impl IntoIterator<Item = String>, repairs: Vec<StemRepair>) -> Self {
        Self {
            clitics: clitics.into_iter().map(|c| c.to_lowercase()).collect(),
            repairs,
        }
    }

    pub fn is_clitic(&self, word: &str) -> bool {
        self.clitics.contains(&word.to_lowercase())
    }

    /// Split `word` into a stem and its trailing pronouns, in reading order.
    ///
    /// Returns `None` when `word` has no recognized pronoun.
    /// Several pronouns can be chained (`dá-se-lhe`).
    pub fn split<'a>(&self, word: &'a str) -> Option<(String, Vec<&'a str>)> {
        let mut stem = word;
        let mut clitics = Vec::new();

        while let Some((head, tail)) = stem.rsplit_once('-') {
            if !self.is_clitic(tail) || !is_stem(head) {
                break;
            }
            clitics.push(tail);
            stem = head;
        }

        if clitics.is_empty() {
            return None;
        }
        clitics.reverse();

        let first = clitics[0].to_lowercase();
        let stem = self
            .repairs
            .iter()
            .find_map(|r| r.apply(stem, &first))
            .unwrap_or_else(|| stem.to_string());

        Some((stem, clitics))
    }
}

/// A verb stem has at least two characters and ends with a letter.
fn is_stem(head: &str) -> bool {
    head.chars().count() >= 2 && head.chars().last().map_or(false, char::is_alphabetic)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn split(word: &str) -> Option<(String, Vec<&str>)> {
        CliticTable::default().split(word)
    }

    #[test]
    fn simple() {
        assert_eq!(split("encontrou-se"), Some(("encontrou".to_string(), vec!["se"])));
        assert_eq!(split("dá-lhe"), Some(("dá".to_string(), vec!["lhe"])));
        assert_eq!(split("Disse-me"), Some(("Disse".to_string(), vec!["me"])));
    }

    #[test]
    fn chained() {
        assert_eq!(
            split("dá-se-lhe"),
            Some(("dá".to_string(), vec!["se", "lhe"]))
        );
    }

    #[test]
    fn repairs() {
        assert_eq!(split("fazê-lo"), Some(("fazer".to_string(), vec!["lo"])));
        assert_eq!(split("amá-la"), Some(("amar".to_string(), vec!["la"])));
        assert_eq!(split("parti-los"), Some(("partir".to_string(), vec!["los"])));
        assert_eq!(split("pô-las"), Some(("por".to_string(), vec!["las"])));
        assert_eq!(
            split("encontramo-nos"),
            Some(("encontramos".to_string(), vec!["nos"]))
        );
        assert_eq!(
            split("encontramo-lo"),
            Some(("encontramos".to_string(), vec!["lo"]))
        );
        assert_eq!(split("fizemo-las"), Some(("fizemos".to_string(), vec!["las"])));
        // no repair outside of the triggering pronouns
        assert_eq!(split("parti-me"), Some(("parti".to_string(), vec!["me"])));
    }

    #[test]
    fn not_clitics() {
        assert_eq!(split("guarda-chuva"), None);
        assert_eq!(split("bem-te-vi"), None);
        assert_eq!(split("casa"), None);
        assert_eq!(split("-se"), None);
        assert_eq!(split("x-se"), None);
    }

    #[test]
    fn mesoclisis_left_alone() {
        assert_eq!(split("fá-lo-ia"), None);
    }

    #[test]
    fn false_positives_are_accepted() {
        // not a verb, but it looks like one
        assert_eq!(split("Porto-a"), Some(("Porto".to_string(), vec!["a"])));
    }
}
