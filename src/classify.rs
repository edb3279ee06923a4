//! Page eligibility.
//!
//! Only regular articles make it to the corpus. Disambiguation pages are mostly link lists,
//! year/date pages are mostly templates and enumerations, redirects have no content and
//! pages from other namespaces (help, portals, templates…) are not encyclopedic prose.
use lazy_static::lazy_static;
use regex::Regex;

use crate::page::PageRecord;

lazy_static! {
    static ref DISAMBIGUATION_TITLE: Regex = Regex::new(r"(?i)desambigua[çc][ãa]o").unwrap();
    static ref DISAMBIGUATION_BODY: Regex = Regex::new(
        r"(?i)\{\{\s*(?:desambigua[çc][ãa]o|desambig|disambig|dab)\s*(?:\||\}\})|__DISAMBIG__|\[\[\s*categoria\s*:\s*desambigua[çc][ãa]o"
    )
    .unwrap();
    static ref YEAR_TITLE: Regex = Regex::new(
        r"(?ix)^(?:
            \d{1,4}(?:\s*(?:a|d)\.\s?c\.)?
            | \d{1,4}s
            | (?:d[ée]cada\s+de|anos)\s+\d{1,4}(?:\s*(?:a|d)\.\s?c\.)?
            | (?:s[ée]culo|mil[ée]nio)\s+[ivxlcdm]+(?:\s*(?:a|d)\.\s?c\.)?
            | \d{1,2}º?\s+de\s+(?:janeiro|fevereiro|mar[çc]o|abril|maio|junho|julho|agosto|setembro|outubro|novembro|dezembro)
        )$"
    )
    .unwrap();
    static ref DAY_OF_YEAR_BODY: Regex = Regex::new(r"(?i)^\s*\{\{\s*dia do ano").unwrap();
    static ref REDIRECT_BODY: Regex = Regex::new(r"(?i)^\s*#\s*(?:redirecionamento|redirect)").unwrap();
    static ref NON_ARTICLE_TITLE: Regex = Regex::new(
        r"(?i)^(?:wikip[ée]dia|anexo|ajuda|mediawiki|categoria|predefini[çc][ãa]o|portal|livro|ficheiro|arquivo|imagem|usu[áa]rio|utilizador|m[óo]dulo|t[óo]pico|discuss[ãa]o|file|image|template|category|user|help)(?:\s+discuss[ãa]o)?\s*:"
    )
    .unwrap();
}

/// Outcome of page classification. Only [Classification::Eligible] pages are processed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Classification {
    Eligible,
    Disambiguation,
    YearArticle,
    Redirect,
    NonArticle,
}

impl Classification {
    pub fn is_eligible(&self) -> bool {
        matches!(self, Classification::Eligible)
    }
}

/// Classify a page from its title and raw markup.
pub fn classify(raw_markup: &str, title: &str) -> Classification {
    let title = title.trim();

    if NON_ARTICLE_TITLE.is_match(title) {
        Classification::NonArticle
    } else if REDIRECT_BODY.is_match(raw_markup) {
        Classification::Redirect
    } else if DISAMBIGUATION_TITLE.is_match(title) || DISAMBIGUATION_BODY.is_match(raw_markup) {
        Classification::Disambiguation
    } else if YEAR_TITLE.is_match(title) || DAY_OF_YEAR_BODY.is_match(raw_markup) {
        Classification::YearArticle
    } else {
        Classification::Eligible
    }
}

/// Classify a page record, also taking its namespace into account when known.
pub fn classify_record(page: &PageRecord) -> Classification {
    match page.namespace() {
        Some(ns) if ns != 0 => Classification::NonArticle,
        _ => classify(page.raw_markup(), page.title()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn regular_article() {
        let body = "'''Lisboa''' é a capital de [[Portugal]].";
        assert_eq!(classify(body, "Lisboa"), Classification::Eligible);
    }

    #[test]
    fn year_titles() {
        for title in [
            "1995",
            "44 a.C.",
            "1500 d.C.",
            "1990s",
            "Década de 1990",
            "Anos 1980",
            "Século XX",
            "Século III a.C.",
            "Milénio II",
            "25 de abril",
        ] {
            assert_eq!(
                classify("texto", title),
                Classification::YearArticle,
                "{}",
                title
            );
        }
    }

    #[test]
    fn titles_with_years_are_articles() {
        assert_eq!(
            classify("texto", "Copa do Mundo FIFA de 1950"),
            Classification::Eligible
        );
        assert_eq!(classify("texto", "Apollo 11"), Classification::Eligible);
    }

    #[test]
    fn day_of_year_body() {
        assert_eq!(
            classify("{{Dia do ano|mês=abril}}\nEventos", "Abril"),
            Classification::YearArticle
        );
    }

    #[test]
    fn disambiguation() {
        assert_eq!(
            classify("'''Mercúrio''' pode referir-se a:", "Mercúrio (desambiguação)"),
            Classification::Disambiguation
        );
        assert_eq!(
            classify("{{desambiguação}}\n* [[Mercúrio (planeta)]]", "Mercúrio"),
            Classification::Disambiguation
        );
        assert_eq!(
            classify("lista\n[[Categoria:Desambiguação]]", "Mercúrio"),
            Classification::Disambiguation
        );
        assert_eq!(classify("__DISAMBIG__", "Mercúrio"), Classification::Disambiguation);
    }

    #[test]
    fn disambiguation_template_prefix_only() {
        // a template that merely starts like the disambiguation one
        assert_eq!(
            classify("{{Dablink|outro}} Texto.", "Mercúrio"),
            Classification::Eligible
        );
    }

    #[test]
    fn redirects() {
        assert_eq!(
            classify("#REDIRECIONAMENTO [[Lisboa]]", "Lisbon"),
            Classification::Redirect
        );
        assert_eq!(
            classify("  #redirect [[Lisboa]]", "Lisbon"),
            Classification::Redirect
        );
    }

    #[test]
    fn non_article_namespaces() {
        assert_eq!(
            classify("texto", "Wikipédia:Página principal"),
            Classification::NonArticle
        );
        assert_eq!(
            classify("texto", "Predefinição:Info/País"),
            Classification::NonArticle
        );
        let page = PageRecord::new("Texto".to_string(), 1, "texto".to_string()).with_namespace(4);
        assert_eq!(classify_record(&page), Classification::NonArticle);
    }
}
