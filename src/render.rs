use std::fmt;

use serde::{Deserialize, Serialize};
use unicode_width::UnicodeWidthStr;

use crate::outline::{Item, Node};

const FOLDER_SUFFIX: &str = "/";
const ROOT_NAME: &str = ".";
const COMMENT_SEPARATOR: &str = "  # ";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TreeConfig {
    /// Nest every top-level entry under a synthetic `.` root.
    pub root_element: bool,
    /// Pad names so that trailing comments start in a common column.
    pub align_comments: bool,
}

/// Connector drawn in one column in front of an entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Ascii {
    Child,
    LastChild,
    Indent,
    Path,
}

impl Ascii {
    pub fn glyph(self) -> &'static str {
        match self {
            Ascii::Child => "├── ",
            Ascii::LastChild => "└── ",
            Ascii::Indent => "    ",
            Ascii::Path => "│   ",
        }
    }
}

/// A node together with the connectors of every column before its name.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DecoratedNode {
    pub node: Node,
    pub ascii: Vec<Ascii>,
}

/// One output line, kept in parts so callers can style them separately.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TreeRow {
    pub prefix: String,
    pub name: String,
    /// Spaces inserted between the name and the comment when aligning.
    pub padding: usize,
    pub comment: Option<String>,
}

impl fmt::Display for TreeRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.prefix, self.name)?;
        if let Some(comment) = &self.comment {
            write!(f, "{:pad$}{COMMENT_SEPARATOR}{comment}", "", pad = self.padding)?;
        }
        Ok(())
    }
}

/// Render leveled nodes as a box-drawing tree, one entry per line.
pub fn render(nodes: &[Node], config: &TreeConfig) -> String {
    render_rows(nodes, config)
        .iter()
        .map(TreeRow::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn render_rows(nodes: &[Node], config: &TreeConfig) -> Vec<TreeRow> {
    let mut nodes = add_folder_suffix(nodes);
    if config.root_element {
        nodes = add_root(nodes);
    }
    let decorated = add_ascii(nodes);

    let mut rows: Vec<TreeRow> = decorated
        .into_iter()
        .map(|DecoratedNode { node, ascii }| TreeRow {
            prefix: ascii.iter().map(|token| token.glyph()).collect(),
            name: node.item.name,
            padding: 0,
            comment: node.item.comment,
        })
        .collect();

    if config.align_comments {
        // Every row counts towards the column, commented or not.
        let column = rows.iter().map(row_label_width).max().unwrap_or(0);
        for row in rows.iter_mut().filter(|row| row.comment.is_some()) {
            row.padding = column - row_label_width(row);
        }
    }

    tracing::trace!(rows = rows.len(), ?config, "rendered tree");
    rows
}

fn row_label_width(row: &TreeRow) -> usize {
    row.prefix.width() + row.name.width()
}

pub fn add_folder_suffix(nodes: &[Node]) -> Vec<Node> {
    nodes
        .iter()
        .map(|node| {
            let mut node = node.clone();
            if node.has_children && !node.item.name.ends_with(FOLDER_SUFFIX) {
                node.item.name.push_str(FOLDER_SUFFIX);
            }
            node
        })
        .collect()
}

pub fn add_root(nodes: Vec<Node>) -> Vec<Node> {
    if nodes.is_empty() {
        return nodes;
    }
    let root = Node::new(Item::new(ROOT_NAME, 0), 0).with_children(true);
    std::iter::once(root)
        .chain(nodes.into_iter().map(|mut node| {
            node.level += 1;
            node
        }))
        .collect()
}

pub fn add_ascii(nodes: Vec<Node>) -> Vec<DecoratedNode> {
    let ascii: Vec<Vec<Ascii>> = (0..nodes.len())
        .map(|idx| ascii_tokens(&nodes, idx))
        .collect();
    nodes
        .into_iter()
        .zip(ascii)
        .map(|(node, ascii)| DecoratedNode { node, ascii })
        .collect()
}

pub fn ascii_tokens(nodes: &[Node], idx: usize) -> Vec<Ascii> {
    let level = nodes[idx].level;
    let mut ascii = vec![Ascii::Indent; level.saturating_sub(1)];
    if level > 0 {
        ascii.push(branch_token(nodes, idx));
    }
    for column in continuing_levels(nodes, idx) {
        if let Some(slot) = ascii.get_mut(column - 1) {
            *slot = Ascii::Path;
        }
    }
    ascii
}

/// `Child` when a sibling follows before the parent's subtree ends.
pub fn branch_token(nodes: &[Node], idx: usize) -> Ascii {
    let level = nodes[idx].level;
    for node in &nodes[idx + 1..] {
        if node.level == level {
            return Ascii::Child;
        }
        if node.level < level {
            break;
        }
    }
    Ascii::LastChild
}

/// Ancestor levels whose vertical line continues past this entry.
pub fn continuing_levels(nodes: &[Node], idx: usize) -> Vec<usize> {
    const MIN_LEVEL: usize = 1;
    let mut max_level = nodes[idx].level.saturating_sub(1);
    let mut levels = Vec::new();

    for node in &nodes[idx + 1..] {
        if node.level < MIN_LEVEL {
            break;
        }
        if node.level <= max_level {
            if !levels.contains(&node.level) {
                levels.push(node.level);
            }
            max_level = node.level;
        }
    }

    levels
}

#[cfg(test)]
#[path = "render_tests.rs"]
mod render_tests;
