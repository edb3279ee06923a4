//! Sentence normalization and tokenization.
use itertools::Itertools;
use lazy_static::lazy_static;
use regex::{Captures, Regex};

use crate::filtering::sentence::{MinTokens, TemplateFree, TEMPLATE_RESIDUE};
use crate::filtering::Filter;
use crate::sentences::SentenceUnit;

use super::clitic::CliticTable;
use super::token::{Token, TokenKind};
use super::{LINK_PLACEHOLDER, NUMBER_PLACEHOLDER};

lazy_static! {
    static ref NUMBER: Regex = Regex::new(r"\d+(?: \d+)*(?:[.,]\d+)*[²³]*").unwrap();
    // parenthesized path segments are kept when balanced, e.g. wiki/Lisboa_(cidade)
    static ref URL: Regex = Regex::new(
        r#"(?xi)
        (?:\b(?:https?|ftp)://|\bwww\.)
            (?:[^\s<>"\[\]{}|()]|\([^\s<>"\[\]{}|()]*\))*
            (?:[^\s<>"\[\]{}|.,;:!?'()]|\([^\s<>"\[\]{}|()]*\))
        | \b[a-z0-9-]+(?:\.[a-z0-9-]+)*\.(?:com|org|net|edu|gov|info|br|pt)\b   # bare domains
            (?:/
                (?:[^\s<>"\[\]{}|()]|\([^\s<>"\[\]{}|()]*\))*
                (?:[^\s<>"\[\]{}|.,;:!?'()]|\([^\s<>"\[\]{}|()]*\))
            )?
        "#
    )
    .unwrap();

    // the order of the alternatives matters
    static ref TOKEN: Regex = Regex::new(
        r"(?x)
        (?:[^\W\d_]\.)+             # one letter abbreviations, e.g. E.U.A.
        | __NUMBER__:__NUMBER__     # time and proportions
        | [DSds][Rr][Aa]?\.         # sr., sra., dr., dra.
        | [^\W\d_]{1,2}\$           # currency, e.g. R$
        | \w+(?:[-']\w+)*-?         # words with hyphens or apostrophes, clitics still attached
        | -+                        # dashes
        | \.{3,}                    # ellipsis
        | \S                        # anything else
        "
    )
    .unwrap();

    static ref OPENING_QUOTE: Regex = Regex::new(r"(^|\W)[‘’′`']").unwrap();
    static ref CLOSING_QUOTE: Regex = Regex::new(r"[‘’′`'](\W|$)").unwrap();
    static ref DOUBLE_QUOTE: Regex = Regex::new(r"[«»“”„]").unwrap();
    static ref DOTS: Regex = Regex::new(r"\.{2,}").unwrap();
    static ref REPEATED_PUNCTUATION: Regex = Regex::new(r",{2,}|;{2,}|:{2,}").unwrap();
    static ref GLUED_HYPHEN: Regex = Regex::new(r"(^|\s)-([^\W\d_])").unwrap();
}

/// Why a sentence produced no output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DropReason {
    /// The sentence holds a template placeholder.
    TemplateMarker,
    /// The sentence holds template syntax the extractor left behind.
    TemplateResidue,
    /// Not enough tokens to be a sentence.
    TooShort,
    Empty,
}

/// Result of [Normalizer::normalize].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Normalized {
    Tokens(Vec<Token>),
    Dropped(DropReason),
}

impl Normalized {
    /// Output line: tokens joined by single spaces.
    pub fn line(&self) -> Option<String> {
        match self {
            Normalized::Tokens(tokens) => Some(tokens.iter().map(Token::surface).join(" ")),
            Normalized::Dropped(_) => None,
        }
    }

    pub fn is_dropped(&self) -> bool {
        matches!(self, Normalized::Dropped(_))
    }
}

/// Swappable parts of the normalization.
#[derive(Debug, Clone)]
pub struct NormalizerConfig {
    /// Matches numbers, replaced by [NUMBER_PLACEHOLDER].
    pub number_pattern: Regex,
    /// Matches urls, replaced by [LINK_PLACEHOLDER].
    pub url_pattern: Regex,
    /// Matches leftover template syntax. Sentences matching it are dropped.
    pub template_residue: Regex,
    pub clitics: CliticTable,
    /// Sentences with fewer tokens are dropped.
    pub min_tokens: usize,
    /// Fix quotes and common punctuation typos.
    pub fix_punctuation: bool,
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        Self {
            number_pattern: NUMBER.clone(),
            url_pattern: URL.clone(),
            template_residue: TEMPLATE_RESIDUE.clone(),
            clitics: CliticTable::default(),
            min_tokens: *MinTokens::default().min_size(),
            fix_punctuation: true,
        }
    }
}

/// Turns sentences into token sequences.
///
/// 1. sentences with a template placeholder or template residue are dropped,
/// 1. quotes are unified and punctuation typos fixed,
/// 1. urls then numbers are replaced with placeholders,
/// 1. the text is tokenized, and enclitic pronouns split from their verbs,
/// 1. sentences that are too short are dropped.
///
/// Normalizing an output line again yields the same line.
pub struct Normalizer {
    number_pattern: Regex,
    url_pattern: Regex,
    template_free: TemplateFree,
    min_tokens: MinTokens,
    clitics: CliticTable,
    fix_punctuation: bool,
}

impl Normalizer {
    pub fn new(config: NormalizerConfig) -> Self {
        Self {
            number_pattern: config.number_pattern,
            url_pattern: config.url_pattern,
            template_free: TemplateFree::with_pattern(config.template_residue),
            min_tokens: MinTokens::with_min_size(config.min_tokens),
            clitics: config.clitics,
            fix_punctuation: config.fix_punctuation,
        }
    }

    pub fn normalize(&self, unit: &SentenceUnit) -> Normalized {
        if unit.contains_template_marker() {
            return Normalized::Dropped(DropReason::TemplateMarker);
        }
        if !self.template_free.detect(unit.text()) {
            return Normalized::Dropped(DropReason::TemplateResidue);
        }

        let text = if self.fix_punctuation {
            fix_punctuation(unit.text())
        } else {
            unit.text().to_string()
        };
        // urls first, their digits are part of them
        let text = self.url_pattern.replace_all(&text, LINK_PLACEHOLDER);
        let text = self.number_pattern.replace_all(&text, NUMBER_PLACEHOLDER);

        let tokens = self.tokenize(&text);
        if tokens.is_empty() {
            Normalized::Dropped(DropReason::Empty)
        } else if !self.min_tokens.detect(&tokens[..]) {
            Normalized::Dropped(DropReason::TooShort)
        } else {
            Normalized::Tokens(tokens)
        }
    }

    /// Normalize a raw sentence.
    pub fn normalize_str(&self, sentence: &str) -> Normalized {
        self.normalize(&SentenceUnit::new(sentence.to_string()))
    }

    fn tokenize(&self, text: &str) -> Vec<Token> {
        let mut tokens = Vec::new();
        for m in TOKEN.find_iter(text) {
            let token = Token::from_surface(m.as_str());
            if token.kind() == TokenKind::Word && token.surface().contains('-') {
                if let Some((stem, clitics)) = self.clitics.split(token.surface()) {
                    tokens.push(Token::new(stem, TokenKind::Word));
                    tokens.extend(
                        clitics
                            .into_iter()
                            .map(|c| Token::new(c.to_string(), TokenKind::Clitic)),
                    );
                    continue;
                }
            }
            tokens.push(token);
        }
        tokens
    }
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new(NormalizerConfig::default())
    }
}

/// Unify quotes and fix common punctuation typos (`,,`, `..`, ` -palavra`).
fn fix_punctuation(text: &str) -> String {
    let text = text.replace('…', "...");
    let text = DOUBLE_QUOTE.replace_all(&text, "\"");
    let text = OPENING_QUOTE.replace_all(&text, "${1}\"");
    let text = CLOSING_QUOTE.replace_all(&text, "\"${1}");
    // leave ellipses alone
    let text = DOTS.replace_all(&text, |caps: &Captures| {
        if caps[0].len() == 2 {
            ".".to_string()
        } else {
            caps[0].to_string()
        }
    });
    let text = REPEATED_PUNCTUATION.replace_all(&text, |caps: &Captures| {
        caps[0][..1].to_string()
    });
    GLUED_HYPHEN.replace_all(&text, "${1}- ${2}").into_owned()
}
