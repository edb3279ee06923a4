//! Page-level data carried through the pipeline.

/// A single page as read from the dump.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRecord {
    title: String,
    id: u64,
    namespace: Option<i64>,
    raw_markup: String,
}

impl PageRecord {
    pub fn new(title: String, id: u64, raw_markup: String) -> Self {
        Self {
            title,
            id,
            namespace: None,
            raw_markup,
        }
    }

    /// Set the namespace number (`<ns>` in MediaWiki dumps).
    pub fn with_namespace(mut self, namespace: i64) -> Self {
        self.namespace = Some(namespace);
        self
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn namespace(&self) -> Option<i64> {
        self.namespace
    }

    pub fn raw_markup(&self) -> &str {
        &self.raw_markup
    }
}

/// Prose extracted from a [PageRecord].
///
/// `prose` may still contain template placeholders, they are dealt with at sentence level.
/// `accepted` is `false` when nothing was left after extraction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionResult {
    pub title: String,
    pub prose: String,
    pub accepted: bool,
}

impl ExtractionResult {
    pub fn new(title: String, prose: String) -> Self {
        let accepted = !prose.trim().is_empty();
        Self {
            title,
            prose,
            accepted,
        }
    }
}
