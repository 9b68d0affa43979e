//! Streaming extraction of snippet metadata
//!
//! The property list is scanned as a sequence of tag events and fed to a
//! small state machine. Only the kind of tag (`<key>` or `<string>`) drives
//! it, so nesting depth and unrelated sibling entries don't matter: a key
//! selects the property for the value that follows, any other key clears
//! the selection, and values with nothing selected are dropped.

use super::{Snippet, SnippetProperty};
use crate::system::System;
use roxmltree::{Document, Edge, ParsingOptions};
use std::path::Path;
use tracing::debug;

const KEY_TAG: &str = "key";
const VALUE_TAG: &str = "string";

/// Receiver of tag events in document order
pub trait TagVisitor {
    fn start_tag(&mut self, name: &str);
    fn text(&mut self, text: &str);
    fn end_tag(&mut self, name: &str);
}

/// Deepest element nesting a snippet document may have
///
/// Property lists written by Xcode nest a handful of levels. The tree
/// builder recurses per level, so anything deeper is refused up front.
pub const MAX_DEPTH: usize = 64;

/// Replay `document` as start/text/end events
pub fn scan(document: &Document<'_>, visitor: &mut dyn TagVisitor) {
    for edge in document.root_element().traverse() {
        match edge {
            Edge::Open(node) if node.is_element() => visitor.start_tag(node.tag_name().name()),
            Edge::Open(node) => {
                if node.is_text()
                    && let Some(text) = node.text()
                {
                    visitor.text(text);
                }
            }
            Edge::Close(node) if node.is_element() => visitor.end_tag(node.tag_name().name()),
            Edge::Close(_) => {}
        }
    }
}

/// Whether elements in `content` nest deeper than `limit`
///
/// A single pass over the raw markup. Comments, CDATA sections and
/// processing instructions are skipped. A DOCTYPE with an internal subset
/// counts as too deep since its entities could expand into more elements.
#[must_use]
pub fn exceeds_depth(content: &str, limit: usize) -> bool {
    let mut depth: usize = 0;
    let mut rest = content;

    while let Some(open) = rest.find('<') {
        rest = &rest[open..];

        let end = if rest.starts_with("<!--") {
            end_after(rest, "-->")
        } else if rest.starts_with("<![CDATA[") {
            end_after(rest, "]]>")
        } else if rest.starts_with("<?") {
            end_after(rest, "?>")
        } else {
            let end = tag_end(rest);
            let tag = &rest[..end.unwrap_or(rest.len())];
            if tag.starts_with("<!") {
                if tag.contains('[') {
                    return true;
                }
            } else if tag.starts_with("</") {
                depth = depth.saturating_sub(1);
            } else if !tag.ends_with("/>") {
                depth += 1;
                if depth > limit {
                    return true;
                }
            }
            end
        };

        let Some(end) = end else {
            break;
        };
        rest = &rest[end..];
    }

    false
}

fn end_after(text: &str, terminator: &str) -> Option<usize> {
    text.find(terminator).map(|at| at + terminator.len())
}

/// Byte offset just past the `>` closing the tag at the start of `text`
fn tag_end(text: &str) -> Option<usize> {
    let mut quote = None;
    for (at, c) in text.char_indices() {
        match quote {
            Some(open) if c == open => quote = None,
            Some(_) => {}
            None if c == '"' || c == '\'' => quote = Some(c),
            None if c == '>' => return Some(at + 1),
            None => {}
        }
    }
    None
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TagKind {
    Key,
    Value,
}

/// Tag visitor that collects a [`Snippet`]
#[derive(Debug, Default)]
pub struct SnippetParser {
    snippet: Snippet,
    pending: Option<SnippetProperty>,
    buffer: String,
    capturing: Option<TagKind>,
}

impl SnippetParser {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn finish(self) -> Snippet {
        self.snippet
    }

    /// Extract metadata from property list text
    ///
    /// Malformed documents yield an empty [`Snippet`].
    #[must_use]
    pub fn parse_str(content: &str) -> Snippet {
        if exceeds_depth(content, MAX_DEPTH) {
            debug!("Property list nests deeper than {MAX_DEPTH} levels");
            return Snippet::default();
        }

        let mut options = ParsingOptions::default();
        options.allow_dtd = true;

        let document = match Document::parse_with_options(content, options) {
            Ok(document) => document,
            Err(err) => {
                debug!("Not a readable property list: {err}");
                return Snippet::default();
            }
        };

        let mut parser = Self::new();
        scan(&document, &mut parser);
        parser.finish()
    }

    /// Extract metadata from the file at `path`
    ///
    /// Unreadable files yield an empty [`Snippet`].
    #[must_use]
    pub fn parse_file(system: &dyn System, path: &Path) -> Snippet {
        match system.read_to_string(path) {
            Ok(content) => Self::parse_str(&content),
            Err(err) => {
                debug!("Failed to read {}: {err}", path.display());
                Snippet::default()
            }
        }
    }
}

impl TagVisitor for SnippetParser {
    fn start_tag(&mut self, name: &str) {
        match name {
            KEY_TAG => self.capturing = Some(TagKind::Key),
            VALUE_TAG => self.capturing = Some(TagKind::Value),
            _ => {}
        }
        self.buffer.clear();
    }

    fn text(&mut self, text: &str) {
        if self.capturing.is_none() {
            return;
        }
        let trimmed = text.trim();
        if !trimmed.is_empty() {
            self.buffer.push_str(trimmed);
        }
    }

    fn end_tag(&mut self, _name: &str) {
        match self.capturing {
            Some(TagKind::Key) => {
                self.pending = SnippetProperty::from_key(&self.buffer);
            }
            Some(TagKind::Value) => {
                if let Some(property) = self.pending.take() {
                    self.snippet
                        .set(property, core::mem::take(&mut self.buffer));
                }
            }
            None => {}
        }
        self.buffer.clear();
        self.capturing = None;
    }
}
