//! Line-oriented editing over a text snapshot and its selection.
//!
//! An [`Editor`] is built from the widget's full text and global selection,
//! mutated by one command, and then turned back into text and a global
//! selection. It holds no state between commands.

use std::fmt;

mod line;
mod selection;

pub use line::{Line, LineEnding, char_to_byte_idx};
pub use selection::Selection;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Editor {
    lines: Vec<Line>,
}

impl Editor {
    pub fn new(text: &str, selection: Selection) -> Self {
        let mut lines = Vec::new();
        let mut line_start = 0;
        let mut rest = text;

        loop {
            let (raw, ending, tail) = match rest.find('\n') {
                Some(pos) => {
                    let raw = &rest[..pos];
                    match raw.strip_suffix('\r') {
                        Some(raw) => (raw, LineEnding::CrLf, &rest[pos + 1..]),
                        None => (raw, LineEnding::Lf, &rest[pos + 1..]),
                    }
                }
                None => (rest, LineEnding::None, ""),
            };
            let len = raw.chars().count();
            lines.push(Line::new(raw, ending, selection.relative_to(line_start, len)));
            line_start += len + ending.len();

            if ending.is_none() {
                break;
            }
            rest = tail;
        }

        Self { lines }
    }

    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    pub fn line_mut(&mut self, idx: usize) -> Option<&mut Line> {
        self.lines.get_mut(idx)
    }

    pub fn selected_lines(&self) -> Vec<&Line> {
        self.lines.iter().filter(|line| line.is_selected()).collect()
    }

    pub fn selected_indices(&self) -> Vec<usize> {
        self.lines
            .iter()
            .enumerate()
            .filter(|(_, line)| line.is_selected())
            .map(|(idx, _)| idx)
            .collect()
    }

    pub fn has_text_selected(&self) -> bool {
        self.lines.iter().any(Line::has_text_selected)
    }

    /// Splice `new_line` in directly after the line at `after`.
    ///
    /// The new line takes over the terminator of `after`, which in turn gets
    /// one in the style already used by the text.
    pub fn insert_line_after(&mut self, mut new_line: Line, after: usize) {
        let style = self.ending_style();
        let previous = &mut self.lines[after];
        let inherited = previous.ending();
        if inherited.is_none() {
            previous.set_ending(style);
        }
        new_line.set_ending(inherited);
        self.lines.insert(after + 1, new_line);
    }

    pub fn remove_selection(&mut self) {
        self.lines.iter_mut().for_each(Line::remove_selection);
    }

    /// Swap the line at `idx` with its predecessor. Terminators stay in place.
    pub fn move_line_up(&mut self, idx: usize) -> bool {
        if idx == 0 || idx >= self.lines.len() {
            return false;
        }
        self.swap_lines(idx - 1, idx);
        true
    }

    /// Swap the line at `idx` with its successor. Terminators stay in place.
    pub fn move_line_down(&mut self, idx: usize) -> bool {
        if idx + 1 >= self.lines.len() {
            return false;
        }
        self.swap_lines(idx, idx + 1);
        true
    }

    /// The selection in offsets of the reassembled text.
    ///
    /// Starts at the first selected line and ends in the last line of the
    /// first contiguous run of selected lines. `None` when no line is selected.
    pub fn global_selection(&self) -> Option<Selection> {
        let first = self.lines.iter().position(Line::is_selected)?;
        let last = (first..self.lines.len())
            .find(|&idx| !self.lines.get(idx + 1).is_some_and(Line::is_selected))
            .unwrap_or(first);

        let start = self.offset_of(first) + self.lines[first].selection()?.start;
        let end = self.offset_of(last) + self.lines[last].selection()?.end;
        Some(Selection::new(start, end))
    }

    fn offset_of(&self, idx: usize) -> usize {
        self.lines[..idx].iter().map(Line::full_len).sum()
    }

    fn swap_lines(&mut self, a: usize, b: usize) {
        let ending_a = self.lines[a].ending();
        let ending_b = self.lines[b].ending();
        self.lines.swap(a, b);
        self.lines[a].set_ending(ending_a);
        self.lines[b].set_ending(ending_b);
    }

    fn ending_style(&self) -> LineEnding {
        self.lines
            .iter()
            .map(Line::ending)
            .find(|ending| !ending.is_none())
            .unwrap_or(LineEnding::Lf)
    }
}

impl fmt::Display for Editor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in &self.lines {
            write!(f, "{}{}", line.content(), line.ending().as_str())?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "editor_tests.rs"]
mod editor_tests;
