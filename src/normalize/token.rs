//! Output tokens.
use super::{LINK_PLACEHOLDER, NUMBER_PLACEHOLDER};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Word,
    NumberPlaceholder,
    LinkPlaceholder,
    Clitic,
    Punct,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    surface: String,
    kind: TokenKind,
}

impl Token {
    pub fn new(surface: String, kind: TokenKind) -> Self {
        Self { surface, kind }
    }

    /// Build a token, guessing its kind from its surface.
    ///
    /// Clitics cannot be told apart from words by their surface, use [Token::new] for them.
    pub fn from_surface(surface: &str) -> Self {
        let kind = if surface.starts_with(NUMBER_PLACEHOLDER) {
            // includes compounds such as __NUMBER__:__NUMBER__
            TokenKind::NumberPlaceholder
        } else if surface == LINK_PLACEHOLDER {
            TokenKind::LinkPlaceholder
        } else if surface.chars().next().map_or(false, |c| c.is_alphanumeric() || c == '_') {
            TokenKind::Word
        } else {
            TokenKind::Punct
        };
        Self::new(surface.to_string(), kind)
    }

    pub fn surface(&self) -> &str {
        &self.surface
    }

    pub fn kind(&self) -> TokenKind {
        self.kind
    }
}
