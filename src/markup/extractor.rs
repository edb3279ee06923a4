//! Wikitext to prose.
use log::trace;
use regex::{Captures, Regex};

use crate::error::Error;
use crate::page::{ExtractionResult, PageRecord};

use super::rule::{FixpointRule, FnRule, RegexRule, Rule};
use super::structure;
use super::{CODE_MARKER, MATH_MARKER, TEMPLATE_MARKER};

/// Nesting levels peeled by fixpoint rules before giving up.
const MAX_NESTING: usize = 64;

/// Tunable parts of the extraction.
#[derive(Debug, Clone)]
pub struct ExtractorConfig {
    /// Titles of the sections that are dropped entirely (references, see also, external links…).
    pub dropped_sections: Vec<String>,
    /// Namespaces whose links embed media rather than point to articles.
    pub file_namespaces: Vec<String>,
    /// HTML-like blocks that are dropped along with their content.
    pub dropped_tags: Vec<String>,
    /// HTML-like blocks that are replaced by the code placeholder.
    pub code_tags: Vec<String>,
    /// HTML-like tags that are removed, keeping their content.
    pub unwrapped_tags: Vec<String>,
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

impl Default for ExtractorConfig {
    /// Portuguese Wikipedia defaults.
    fn default() -> Self {
        Self {
            dropped_sections: strings(&[
                "Ver também",
                "Bibliografia",
                "Ligações externas",
                "Ligações Externas",
                "Referências",
                "Notas",
                "Notas e referências",
                "Fontes",
                "Leitura adicional",
            ]),
            file_namespaces: strings(&[
                "Ficheiro",
                "Arquivo",
                "Imagem",
                "Image",
                "File",
                "Multimédia",
                "Multimídia",
                "Media",
            ]),
            dropped_tags: strings(&[
                "gallery",
                "timeline",
                "noinclude",
                "includeonly",
                "onlyinclude",
                "small",
                "sup",
                "table",
                "imagemap",
                "score",
                "graph",
                "hiero",
                "chem",
                "templatedata",
            ]),
            code_tags: strings(&["code", "source", "syntaxhighlight", "pre"]),
            unwrapped_tags: strings(&[
                "b",
                "i",
                "u",
                "s",
                "tt",
                "sub",
                "span",
                "big",
                "font",
                "blockquote",
                "poem",
                "nowiki",
                "div",
                "center",
                "abbr",
                "em",
                "strong",
                "cite",
                "q",
            ]),
        }
    }
}

/// Turns wikitext into prose.
///
/// The extraction is an ordered list of [Rule]s, in five stages:
/// 1. removal of structure that never holds running prose (comments, categories, tables,
///    references, trailing sections, lists, media…), headings become paragraph breaks;
/// 1. every template is replaced by a single [TEMPLATE_MARKER];
/// 1. inline formatting and HTML tags are unwrapped;
/// 1. links are resolved to their displayed text;
/// 1. whitespace is normalized.
///
/// Later rules rely on earlier ones having run.
pub struct MarkupExtractor {
    rules: Vec<Box<dyn Rule>>,
}

impl MarkupExtractor {
    pub fn new(config: ExtractorConfig) -> Result<Self, Error> {
        let mut rules: Vec<Box<dyn Rule>> = Vec::new();
        Self::structure_rules(&mut rules, &config)?;
        Self::template_rules(&mut rules)?;
        Self::formatting_rules(&mut rules, &config)?;
        Self::link_rules(&mut rules)?;
        rules.push(Box::new(FnRule::new(
            "whitespace",
            structure::normalize_whitespace,
        )));

        Ok(Self { rules })
    }

    fn structure_rules(
        rules: &mut Vec<Box<dyn Rule>>,
        config: &ExtractorConfig,
    ) -> Result<(), Error> {
        rules.push(Box::new(RegexRule::new(
            "comments",
            Regex::new(r"(?s)<!--.*?-->")?,
            "",
        )));
        rules.push(Box::new(RegexRule::new(
            "unterminated comments",
            Regex::new(r"<!--[^\n]*")?,
            "",
        )));
        rules.push(Box::new(RegexRule::new(
            "magic words",
            Regex::new(
                r"__(?:NOTOC|TOC|FORCETOC|NOEDITSECTION|NEWSECTIONLINK|NOGALLERY|HIDDENCAT|INDEX|NOINDEX|STATICREDIRECT|DISAMBIG|NOTITLECONVERT|NOTC|NOCONTENTCONVERT|NOCC)__",
            )?,
            "",
        )));
        rules.push(Box::new(RegexRule::new(
            "interwiki",
            Regex::new(r"(?m)^[ \t]*\[\[[a-z][a-z][\w-]*:[^:\]\n]+\]\][ \t]*$")?,
            "",
        )));
        rules.push(Box::new(RegexRule::new(
            "categories",
            Regex::new(r"(?i)\[\[\s*(?:categoria|category)\s*:[^\]\n]*\]\]")?,
            "",
        )));

        let sections = config.dropped_sections.clone();
        rules.push(Box::new(FnRule::new("sections", move |text: &str| {
            structure::remove_sections(text, &sections)
        })));

        rules.push(Box::new(RegexRule::new(
            "math",
            Regex::new(r"(?is)<math\b[^>]*>.*?</math\s*>")?,
            &format!(" {} ", MATH_MARKER),
        )));

        rules.push(Box::new(RegexRule::new(
            "self-closing references",
            Regex::new(r"(?is)<ref\b[^>]*/>")?,
            "",
        )));
        rules.push(Box::new(RegexRule::new(
            "references",
            Regex::new(r"(?is)<ref\b[^>]*>.*?</ref\s*>")?,
            "",
        )));
        rules.push(Box::new(RegexRule::new(
            "unterminated references",
            Regex::new(r"(?i)<ref\b[^>]*>[^\n]*")?,
            "",
        )));
        rules.push(Box::new(RegexRule::new(
            "reference lists",
            Regex::new(r"(?is)<references\b[^>]*/>|<references\b[^>]*>.*?</references\s*>")?,
            "",
        )));

        // the regex crate has no backreferences, hence one rule per tag
        for tag in &config.code_tags {
            rules.push(Box::new(RegexRule::new(
                "code",
                Regex::new(&format!(
                    r"(?is)<{tag}\b[^>]*>.*?</{tag}\s*>",
                    tag = regex::escape(tag)
                ))?,
                &format!(" {} ", CODE_MARKER),
            )));
        }
        for tag in &config.dropped_tags {
            rules.push(Box::new(RegexRule::new(
                "non-prose blocks",
                Regex::new(&format!(
                    r"(?is)<{tag}\b[^>]*>.*?</{tag}\s*>",
                    tag = regex::escape(tag)
                ))?,
                "",
            )));
        }

        rules.push(Box::new(FnRule::new("tables", structure::remove_tables)));

        let namespaces = config.file_namespaces.clone();
        rules.push(Box::new(FnRule::new("media links", move |text: &str| {
            structure::remove_namespaced_links(text, &namespaces)
        })));

        rules.push(Box::new(FnRule::new(
            "lists",
            structure::remove_non_prose_lines,
        )));
        rules.push(Box::new(FnRule::new(
            "headings",
            structure::headings_to_breaks,
        )));

        Ok(())
    }

    fn template_rules(rules: &mut Vec<Box<dyn Rule>>) -> Result<(), Error> {
        rules.push(Box::new(FixpointRule::new(
            RegexRule::new(
                "template parameters",
                Regex::new(r"\{\{\{[^{}]*\}\}\}")?,
                "",
            ),
            MAX_NESTING,
        )));
        rules.push(Box::new(FixpointRule::new(
            RegexRule::new("templates", Regex::new(r"\{\{[^{}]*\}\}")?, TEMPLATE_MARKER),
            MAX_NESTING,
        )));
        rules.push(Box::new(FnRule::new("unterminated templates", |text: &str| {
            structure::close_open_templates(text, TEMPLATE_MARKER)
        })));
        Ok(())
    }

    fn formatting_rules(
        rules: &mut Vec<Box<dyn Rule>>,
        config: &ExtractorConfig,
    ) -> Result<(), Error> {
        rules.push(Box::new(RegexRule::new(
            "bold italics",
            Regex::new(r"'''''(.+?)'''''")?,
            "${1}",
        )));
        rules.push(Box::new(RegexRule::new(
            "bold",
            Regex::new(r"'''(.+?)'''")?,
            "${1}",
        )));
        rules.push(Box::new(RegexRule::new(
            "italics",
            Regex::new(r"''(.+?)''")?,
            "${1}",
        )));
        rules.push(Box::new(RegexRule::new(
            "unbalanced emphasis",
            Regex::new(r"'{2,}")?,
            "",
        )));

        rules.push(Box::new(RegexRule::new(
            "line breaks",
            Regex::new(r"(?i)<br\b[^>]*>")?,
            "\n",
        )));
        let tags = config
            .unwrapped_tags
            .iter()
            .map(|t| regex::escape(t))
            .collect::<Vec<_>>()
            .join("|");
        rules.push(Box::new(RegexRule::new(
            "inline tags",
            Regex::new(&format!(r"(?i)</?(?:{})\b[^>]*>", tags))?,
            "",
        )));
        rules.push(Box::new(RegexRule::with_fn(
            "entities",
            Regex::new(r"&(?:nbsp|amp|lt|gt|quot|ndash|mdash|#160);")?,
            entity,
        )));
        rules.push(Box::new(RegexRule::new("dashes", Regex::new(r"—|--")?, "-")));
        Ok(())
    }

    fn link_rules(rules: &mut Vec<Box<dyn Rule>>) -> Result<(), Error> {
        rules.push(Box::new(FixpointRule::new(
            RegexRule::with_fn(
                "internal links",
                Regex::new(r"\[\[([^\[\]]*)\]\]")?,
                internal_link,
            ),
            MAX_NESTING,
        )));
        rules.push(Box::new(RegexRule::with_fn(
            "unterminated internal links",
            Regex::new(r"(?m)\[\[([^\[\]\n]*)$")?,
            internal_link,
        )));
        rules.push(Box::new(RegexRule::new(
            "external links",
            Regex::new(r"\[(?:(?:https?|ftp):)?//[^\[\]\s]+\s+([^\]\n]*)\]")?,
            "${1}",
        )));
        rules.push(Box::new(RegexRule::new(
            "bare external links",
            Regex::new(r"\[(?:(?:https?|ftp):)?//[^\[\]\s]*\]")?,
            "",
        )));
        Ok(())
    }

    /// Extract prose from raw wikitext.
    ///
    /// This never fails: malformed markup degrades the output, it does not stop the extraction.
    pub fn extract(&self, raw_markup: &str) -> String {
        let mut text = raw_markup.to_string();
        for rule in &self.rules {
            let next = rule.apply(&text);
            if next != text {
                trace!("rule '{}' changed the text", rule.name());
            }
            text = next;
        }
        text
    }

    /// Extract prose from a page.
    pub fn extract_page(&self, page: &PageRecord) -> ExtractionResult {
        ExtractionResult::new(page.title().to_string(), self.extract(page.raw_markup()))
    }

    /// Run the extraction, keeping the output of every rule that changed the text.
    pub fn trace(&self, raw_markup: &str) -> Vec<(&'static str, String)> {
        let mut steps = Vec::new();
        let mut text = raw_markup.to_string();
        for rule in &self.rules {
            let next = rule.apply(&text);
            if next != text {
                steps.push((rule.name(), next.clone()));
            }
            text = next;
        }
        steps
    }

    /// Names of the rules, in application order.
    pub fn rule_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.rules.iter().map(|r| r.name())
    }
}

/// Display text of an internal link: the label if there is one, the target otherwise.
fn internal_link(caps: &Captures) -> String {
    let inner = &caps[1];
    let (target, label) = match inner.split_once('|') {
        Some((target, label)) => (target, label.trim()),
        None => (inner, ""),
    };
    if label.is_empty() {
        target.trim().trim_start_matches(':').to_string()
    } else {
        label.to_string()
    }
}

fn entity(caps: &Captures) -> String {
    match &caps[0] {
        "&nbsp;" | "&#160;" => " ",
        "&amp;" => "&",
        "&lt;" => "<",
        "&gt;" => ">",
        "&quot;" => "\"",
        _ => "-",
    }
    .to_string()
}
