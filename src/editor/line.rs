use std::fmt;

use super::Selection;
use crate::error::{Error, Result};

const INDENT: &str = "  ";
const INDENT_WIDTH: usize = INDENT.len();

/// Terminator that followed a line in the source text.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LineEnding {
    #[default]
    None,
    Lf,
    CrLf,
}

impl LineEnding {
    pub fn as_str(self) -> &'static str {
        match self {
            LineEnding::None => "",
            LineEnding::Lf => "\n",
            LineEnding::CrLf => "\r\n",
        }
    }

    pub fn len(self) -> usize {
        self.as_str().len()
    }

    pub fn is_none(self) -> bool {
        self == LineEnding::None
    }
}

/// One line of editable text with a selection relative to its content.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Line {
    content: String,
    ending: LineEnding,
    selection: Option<Selection>,
}

impl Line {
    pub fn new(content: impl Into<String>, ending: LineEnding, selection: Option<Selection>) -> Self {
        Self {
            content: content.into(),
            ending,
            selection,
        }
    }

    /// A fresh unterminated line with the caret at its end.
    pub fn from_text(text: impl Into<String>) -> Self {
        let content = text.into();
        let len = content.chars().count();
        Self::new(content, LineEnding::None, Some(Selection::caret(len)))
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn ending(&self) -> LineEnding {
        self.ending
    }

    pub(crate) fn set_ending(&mut self, ending: LineEnding) {
        self.ending = ending;
    }

    /// Content length in characters.
    pub fn len(&self) -> usize {
        self.content.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// Characters including the terminator.
    pub fn full_len(&self) -> usize {
        self.len() + self.ending.len()
    }

    pub fn selection(&self) -> Option<Selection> {
        self.selection
    }

    pub fn is_selected(&self) -> bool {
        self.selection.is_some()
    }

    pub fn has_text_selected(&self) -> bool {
        self.selection.is_some_and(|selection| selection.len() > 0)
    }

    pub fn is_cursor_at_end(&self) -> bool {
        let len = self.len();
        self.selection == Some(Selection::caret(len))
    }

    /// The leading whitespace run.
    pub fn indentation(&self) -> &str {
        let trimmed = self.content.trim_start_matches([' ', '\t']);
        &self.content[..self.content.len() - trimmed.len()]
    }

    pub fn indent(&mut self) {
        self.content.insert_str(0, INDENT);
        self.selection = self.selection.map(|s| s.shifted_right(INDENT_WIDTH));
    }

    pub fn outdent(&mut self) {
        let removed = self
            .content
            .chars()
            .take(INDENT_WIDTH)
            .take_while(|ch| *ch == ' ')
            .count();
        self.content.drain(..removed);
        self.selection = self.selection.map(|s| s.shifted_left(removed));
    }

    /// Replace the selected text with `text` and leave the caret after it.
    pub fn insert_text_before_selection(&mut self, text: &str) -> Result<()> {
        let selection = self.selection.ok_or(Error::NoSelection)?;
        let start = char_to_byte_idx(&self.content, selection.start);
        let end = char_to_byte_idx(&self.content, selection.end);
        self.content.replace_range(start..end, text);
        self.selection = Some(Selection::caret(selection.start + text.chars().count()));
        Ok(())
    }

    pub fn remove_selection(&mut self) {
        self.selection = None;
    }

    pub fn set_selection_to_end(&mut self) {
        self.selection = Some(Selection::caret(self.len()));
    }
}

impl fmt::Display for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.content)
    }
}

pub fn char_to_byte_idx(text: &str, char_idx: usize) -> usize {
    text.char_indices()
        .nth(char_idx)
        .map_or(text.len(), |(byte_idx, _)| byte_idx)
}
