//! Indented outline text and the hierarchy inferred from it.
//!
//! An outline is one entry per line. Leading whitespace decides nesting and an
//! optional ` # ` marker starts a trailing comment:
//!
//! ```text
//! src            # sources
//!   main.rs
//! README.md
//! ```

mod level;
mod parser;

pub use level::resolve_levels;
pub use parser::{parse_items, parse_line};

/// One parsed outline entry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Item {
    pub name: String,
    /// Count of leading whitespace characters; tabs count as one.
    pub indent: usize,
    pub comment: Option<String>,
}

impl Item {
    pub fn new(name: impl Into<String>, indent: usize) -> Self {
        Self {
            name: name.into(),
            indent,
            comment: None,
        }
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }
}

/// An [`Item`] placed in the hierarchy.
///
/// Folders and files are not distinct kinds: an entry is rendered as a folder
/// exactly when `has_children` is set.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Node {
    pub item: Item,
    pub level: usize,
    pub has_children: bool,
}

impl Node {
    pub fn new(item: Item, level: usize) -> Self {
        Self {
            item,
            level,
            has_children: false,
        }
    }

    pub fn with_children(mut self, has_children: bool) -> Self {
        self.has_children = has_children;
        self
    }

    pub fn name(&self) -> &str {
        &self.item.name
    }

    pub fn comment(&self) -> Option<&str> {
        self.item.comment.as_deref()
    }
}

/// Parse outline text into leveled nodes. Never fails; blank input yields no nodes.
pub fn parse(text: &str) -> Vec<Node> {
    let nodes = resolve_levels(parse_items(text));
    tracing::trace!(count = nodes.len(), "parsed outline");
    nodes
}

#[cfg(test)]
#[path = "outline_tests.rs"]
mod outline_tests;
