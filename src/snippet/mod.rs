//! Snippet metadata
//!
//! A `.codesnippet` file is an Xcode property list. Only two of its keys
//! matter here: the identifier Xcode assigned to the snippet and the
//! human-readable title used to derive a file name.

pub mod name;
pub mod parser;

pub use name::canonical_name;
pub use parser::SnippetParser;

/// Extension of snippet files, without the dot
pub const SNIPPET_EXTENSION: &str = "codesnippet";

/// Property list keys that map onto [`Snippet`] fields
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnippetProperty {
    Title,
    Id,
}

impl SnippetProperty {
    /// The `<key>` text naming this property
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Title => "IDECodeSnippetSummary",
            Self::Id => "IDECodeSnippetIdentifier",
        }
    }

    /// Unknown keys map to `None`
    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        [Self::Title, Self::Id]
            .into_iter()
            .find(|property| property.key() == key)
    }
}

/// Metadata extracted from one snippet file; empty fields were not found
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snippet {
    pub title: String,
    pub id: String,
}

impl Snippet {
    pub fn set(&mut self, property: SnippetProperty, value: String) {
        match property {
            SnippetProperty::Title => self.title = value,
            SnippetProperty::Id => self.id = value,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.title.is_empty() && self.id.is_empty()
    }
}
