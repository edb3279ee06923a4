//! Line and nesting aware transformations.
//!
//! These cover the constructs that need state: sections that extend until the next heading,
//! tables and file links that nest, list blocks.
//! Every function here accepts malformed input and falls back to an implicit close
//! (end of line or end of paragraph) instead of failing.
use itertools::Itertools;

/// Parse a heading line (`== Title ==`), returning its level and title.
///
/// The level is the smallest of the opening and closing `=` runs, as MediaWiki does.
pub fn heading(line: &str) -> Option<(usize, &str)> {
    let line = line.trim();
    if !line.starts_with('=') || !line.ends_with('=') || line.len() < 3 {
        return None;
    }
    let open = line.chars().take_while(|c| *c == '=').count();
    let close = line.chars().rev().take_while(|c| *c == '=').count();
    // a line made only of '='
    if open + close > line.len() {
        return None;
    }
    let level = open.min(close);
    let title = line[level..line.len() - level].trim_matches('=').trim();
    Some((level, title))
}

/// Remove sections whose title is in `titles` (compared case-insensitively, ignoring
/// a template wrapper such as `{{Ver também}}`), down to the next heading of the same or higher level.
pub fn remove_sections(text: &str, titles: &[String]) -> String {
    let mut kept = Vec::new();
    let mut skipping: Option<usize> = None;

    for line in text.lines() {
        if let Some((level, title)) = heading(line) {
            if let Some(skip_level) = skipping {
                if level <= skip_level {
                    skipping = None;
                }
            }
            if skipping.is_none() && is_listed(title, titles) {
                skipping = Some(level);
            }
        }
        if skipping.is_none() {
            kept.push(line);
        }
    }

    kept.join("\n")
}

fn is_listed(title: &str, titles: &[String]) -> bool {
    let title = title
        .trim_start_matches("{{")
        .trim_end_matches("}}")
        .trim()
        .to_lowercase();
    titles.iter().any(|t| t.to_lowercase() == title)
}

/// Remove wikitable blocks (`{|` … `|}`), honoring nesting.
///
/// Table delimiters are only recognized at the start of a line.
/// An unterminated table ends at the next blank line.
pub fn remove_tables(text: &str) -> String {
    let mut kept = Vec::new();
    let mut depth = 0usize;

    for line in text.lines() {
        let trimmed = line.trim_start();
        if trimmed.starts_with("{|") {
            depth += 1;
            continue;
        }
        if depth > 0 {
            if trimmed.starts_with("|}") {
                depth -= 1;
            } else if trimmed.is_empty() {
                depth = 0;
                kept.push(line);
            }
            continue;
        }
        kept.push(line);
    }

    kept.join("\n")
}

/// Remove `[[Namespace:…]]` links for the given namespaces (file and image links).
///
/// Captions may contain links themselves, so brackets are counted.
/// An unterminated link is removed up to the end of its line.
pub fn remove_namespaced_links(text: &str, namespaces: &[String]) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(start) = rest.find("[[") {
        let target = &rest[start + 2..];
        if !has_namespace(target, namespaces) {
            out.push_str(&rest[..start + 2]);
            rest = target;
            continue;
        }

        out.push_str(&rest[..start]);
        match closing_brackets(target) {
            Some(end) => rest = &target[end..],
            None => {
                // implicit close at end of line
                rest = match target.find('\n') {
                    Some(nl) => &target[nl..],
                    None => "",
                };
            }
        }
    }
    out.push_str(rest);
    out
}

fn has_namespace(target: &str, namespaces: &[String]) -> bool {
    let target = target.trim_start().trim_start_matches(':').trim_start();
    match target.split_once(':') {
        Some((ns, _)) => {
            let ns = ns.trim().to_lowercase();
            !ns.contains(&['[', ']', '|', '\n'][..])
                && namespaces.iter().any(|n| n.to_lowercase() == ns)
        }
        None => false,
    }
}

/// Byte offset right after the `]]` closing a link whose `[[` has already been consumed.
fn closing_brackets(text: &str) -> Option<usize> {
    let bytes = text.as_bytes();
    let mut depth = 1usize;
    let mut i = 0;
    while i + 1 < bytes.len() {
        match (bytes[i], bytes[i + 1]) {
            (b'[', b'[') => {
                depth += 1;
                i += 2;
            }
            (b']', b']') => {
                depth -= 1;
                i += 2;
                if depth == 0 {
                    return Some(i);
                }
            }
            _ => i += 1,
        }
    }
    None
}

/// Remove list items, definition lines, indented lines and table row leftovers.
///
/// Lists are mostly enumerations of links, and do not make sentences.
pub fn remove_non_prose_lines(text: &str) -> String {
    text.lines()
        .filter(|line| {
            !matches!(
                line.trim_start().chars().next(),
                Some('*') | Some('#') | Some(':') | Some(';') | Some('|') | Some('!')
            )
        })
        .map(|line| {
            if line.trim_start().starts_with("----") {
                ""
            } else {
                line
            }
        })
        .join("\n")
}

/// Replace headings with an empty line so that they act as paragraph breaks.
pub fn headings_to_breaks(text: &str) -> String {
    text.lines()
        .map(|line| if heading(line).is_some() { "" } else { line })
        .join("\n")
}

/// Replace with `marker` the rest of a line from its first `{{` that no `}}` follows.
///
/// Templates that do close on their line are left to the regex passes.
pub fn close_open_templates(text: &str, marker: &str) -> String {
    text.lines()
        .map(|line| {
            let open = line
                .match_indices("{{")
                .map(|(idx, _)| idx)
                .find(|&idx| !line[idx..].contains("}}"));
            match open {
                Some(idx) => format!("{}{}", &line[..idx], marker),
                None => line.to_string(),
            }
        })
        .join("\n")
}

/// Trim lines, collapse inner whitespace runs and blank line runs.
pub fn normalize_whitespace(text: &str) -> String {
    let mut paragraphs: Vec<String> = Vec::new();
    let mut blank = false;

    for line in text.lines() {
        let line = line.split_whitespace().join(" ");
        if line.is_empty() {
            blank = true;
            continue;
        }
        if blank && !paragraphs.is_empty() {
            paragraphs.push(String::new());
        }
        blank = false;
        paragraphs.push(line);
    }

    paragraphs.join("\n")
}
