use crate::editor::{Editor, Selection, char_to_byte_idx};
use crate::error::Result;
use crate::keys::{self, EditCommand};

/// A multi-line text input: the text and a selection running from `anchor`
/// to `head`, both in character offsets. `head` is where the caret is drawn.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TextArea {
    text: String,
    anchor: usize,
    head: usize,
    preferred_column: Option<usize>,
}

impl TextArea {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn head(&self) -> usize {
        self.head
    }

    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    /// Normalized selection, `start <= end`.
    pub fn selection(&self) -> Selection {
        Selection::new(self.anchor.min(self.head), self.anchor.max(self.head))
    }

    /// Clamped to the text; an offset inside a `\r\n` pair moves before the `\r`.
    pub fn set_selection(&mut self, selection: Selection) {
        self.anchor = self.snap(selection.start);
        self.head = self.snap(selection.end);
        self.preferred_column = None;
    }

    pub fn select_all(&mut self) {
        self.set_selection(Selection::new(0, self.char_len()));
    }

    pub fn create_editor(&self) -> Editor {
        Editor::new(&self.text, self.selection())
    }

    /// Replace the contents with the editor's text and selection.
    pub fn apply_editor(&mut self, editor: &Editor) {
        self.text = editor.to_string();
        match editor.global_selection() {
            Some(selection) => self.set_selection(selection),
            None => self.set_selection(self.selection()),
        }
    }

    /// Run an outline command. Returns `false` if it did not apply, in which
    /// case nothing changed.
    pub fn apply(&mut self, command: EditCommand) -> Result<bool> {
        let mut editor = self.create_editor();
        if !keys::apply(&mut editor, command)? {
            return Ok(false);
        }
        self.apply_editor(&editor);
        Ok(true)
    }

    /// Replace the selection with `text`.
    pub fn insert_str(&mut self, text: &str) {
        let selection = self.selection();
        let start = char_to_byte_idx(&self.text, selection.start);
        let end = char_to_byte_idx(&self.text, selection.end);
        self.text.replace_range(start..end, text);
        self.set_selection(Selection::caret(selection.start + text.chars().count()));
    }

    pub fn insert_char(&mut self, ch: char) {
        let mut buf = [0u8; 4];
        self.insert_str(ch.encode_utf8(&mut buf));
    }

    pub fn backspace(&mut self) -> bool {
        let selection = self.selection();
        if selection.is_caret() {
            if selection.start == 0 {
                return false;
            }
            self.set_selection(Selection::new(selection.start - 1, selection.start));
        }
        self.insert_str("");
        true
    }

    pub fn delete(&mut self) -> bool {
        let selection = self.selection();
        if selection.is_caret() {
            if selection.end >= self.char_len() {
                return false;
            }
            let end = self.step_forward(selection.start);
            self.set_selection(Selection::new(selection.start, end));
        }
        self.insert_str("");
        true
    }

    pub fn move_left(&mut self, extend: bool) {
        let selection = self.selection();
        let target = if !extend && !selection.is_caret() {
            selection.start
        } else {
            self.head.saturating_sub(1)
        };
        self.move_head(target, extend);
    }

    pub fn move_right(&mut self, extend: bool) {
        let selection = self.selection();
        let target = if !extend && !selection.is_caret() {
            selection.end
        } else {
            self.step_forward(self.head)
        };
        self.move_head(target, extend);
    }

    pub fn move_up(&mut self, extend: bool) {
        let (line, column) = self.line_col(self.head);
        let column = self.preferred_column.unwrap_or(column);
        let target = match line.checked_sub(1) {
            Some(previous) => self.offset_at(previous, column),
            None => 0,
        };
        self.move_head(target, extend);
        self.preferred_column = Some(column);
    }

    pub fn move_down(&mut self, extend: bool) {
        let (line, column) = self.line_col(self.head);
        let column = self.preferred_column.unwrap_or(column);
        let target = if line + 1 < self.line_count() {
            self.offset_at(line + 1, column)
        } else {
            self.char_len()
        };
        self.move_head(target, extend);
        self.preferred_column = Some(column);
    }

    pub fn move_home(&mut self, extend: bool) {
        let (line, _) = self.line_col(self.head);
        let target = self.offset_at(line, 0);
        self.move_head(target, extend);
    }

    pub fn move_end(&mut self, extend: bool) {
        let (line, _) = self.line_col(self.head);
        let target = self.offset_at(line, usize::MAX);
        self.move_head(target, extend);
    }

    /// Zero-based line and column of a character offset.
    pub fn line_col(&self, offset: usize) -> (usize, usize) {
        let mut line = 0;
        let mut column = 0;
        for ch in self.text.chars().take(offset) {
            if ch == '\n' {
                line += 1;
                column = 0;
            } else {
                column += 1;
            }
        }
        (line, column)
    }

    pub fn line_count(&self) -> usize {
        self.text.split('\n').count()
    }

    fn offset_at(&self, line: usize, column: usize) -> usize {
        let mut offset = 0;
        for (idx, raw) in self.text.split('\n').enumerate() {
            let content = raw.strip_suffix('\r').unwrap_or(raw);
            if idx == line {
                return offset + column.min(content.chars().count());
            }
            offset += raw.chars().count() + 1;
        }
        self.char_len()
    }

    fn move_head(&mut self, target: usize, extend: bool) {
        self.head = self.snap(target);
        if !extend {
            self.anchor = self.head;
        }
        self.preferred_column = None;
    }

    /// The offset one character after `offset`, stepping over `\r\n` as a unit.
    fn step_forward(&self, offset: usize) -> usize {
        let next = (offset + 1).min(self.char_len());
        if self.splits_crlf(next) { next + 1 } else { next }
    }

    fn snap(&self, offset: usize) -> usize {
        let offset = offset.min(self.char_len());
        if self.splits_crlf(offset) { offset - 1 } else { offset }
    }

    fn splits_crlf(&self, offset: usize) -> bool {
        if offset == 0 {
            return false;
        }
        let mut chars = self.text.chars().skip(offset - 1);
        chars.next() == Some('\r') && chars.next() == Some('\n')
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn area(text: &str, selection: Selection) -> TextArea {
        let mut area = TextArea::new(text);
        area.set_selection(selection);
        area
    }

    #[test]
    fn apply_round_trips_through_editor() {
        let mut area = area("src\n  file.txt", Selection::caret(14));
        assert!(area.apply(EditCommand::NewLine).unwrap());
        assert_eq!(area.text(), "src\n  file.txt\n  ");
        assert_eq!(area.selection(), Selection::caret(17));
    }

    #[test]
    fn unhandled_command_leaves_widget_untouched() {
        let mut area = area("  item", Selection::caret(2));
        assert!(!area.apply(EditCommand::NewLine).unwrap());
        assert_eq!(area.text(), "  item");
        assert_eq!(area.selection(), Selection::caret(2));
    }

    #[test]
    fn typing_replaces_selection() {
        let mut area = area("hello world", Selection::new(6, 11));
        area.insert_str("there");
        assert_eq!(area.text(), "hello there");
        assert_eq!(area.selection(), Selection::caret(11));
        area.insert_char('!');
        assert_eq!(area.text(), "hello there!");
    }

    #[test]
    fn backspace_and_delete_respect_bounds() {
        let mut area = area("ab", Selection::caret(0));
        assert!(!area.backspace());
        assert!(area.delete());
        assert_eq!(area.text(), "b");
        area.set_selection(Selection::caret(1));
        assert!(!area.delete());
        assert!(area.backspace());
        assert_eq!(area.text(), "");
    }

    #[test]
    fn backspace_removes_selected_range() {
        let mut area = area("abcd", Selection::new(1, 3));
        assert!(area.backspace());
        assert_eq!(area.text(), "ad");
        assert_eq!(area.selection(), Selection::caret(1));
    }

    #[test]
    fn shift_motion_extends_selection() {
        let mut area = area("abc\ndef", Selection::caret(1));
        area.move_right(true);
        area.move_down(true);
        assert_eq!(area.selection(), Selection::new(1, 6));
        area.move_left(false);
        assert_eq!(area.selection(), Selection::caret(1));
    }

    #[test]
    fn vertical_motion_remembers_column() {
        let mut area = area("abcdef\nx\nabcdef", Selection::caret(5));
        area.move_down(false);
        assert_eq!(area.head(), 8);
        area.move_down(false);
        assert_eq!(area.head(), 14);
        area.move_up(false);
        area.move_up(false);
        assert_eq!(area.head(), 5);
    }

    #[test]
    fn home_and_end_stay_on_line() {
        let mut area = area("abc\r\ndef", Selection::caret(6));
        area.move_home(false);
        assert_eq!(area.head(), 5);
        area.move_end(false);
        assert_eq!(area.head(), 8);
        area.set_selection(Selection::caret(1));
        area.move_end(false);
        assert_eq!(area.head(), 3);
    }

    #[test]
    fn caret_never_rests_inside_crlf() {
        let mut area = area("ab\r\ncd", Selection::caret(2));
        area.move_right(false);
        assert_eq!(area.head(), 4);
        area.move_left(false);
        assert_eq!(area.head(), 2);

        area.set_selection(Selection::caret(3));
        assert_eq!(area.selection(), Selection::caret(2));
        assert_eq!(area.create_editor().selected_indices(), [0]);

        area.set_selection(Selection::new(0, 3));
        assert_eq!(area.selection(), Selection::new(0, 2));
    }

    #[test]
    fn backspace_removes_whole_crlf() {
        let mut area = area("ab\r\ncd", Selection::caret(4));
        assert!(area.backspace());
        assert_eq!(area.text(), "abcd");
        assert_eq!(area.selection(), Selection::caret(2));
    }

    #[test]
    fn delete_removes_whole_crlf() {
        let mut area = area("ab\r\ncd", Selection::caret(2));
        assert!(area.delete());
        assert_eq!(area.text(), "abcd");
        assert_eq!(area.selection(), Selection::caret(2));
    }

    #[test]
    fn indent_at_end_of_crlf_line_edits_that_line() {
        let mut area = area("ab\r\ncd", Selection::caret(2));
        area.move_right(false);
        area.move_left(false);
        assert!(area.apply(EditCommand::Indent).unwrap());
        assert_eq!(area.text(), "ab  \r\ncd");
        assert_eq!(area.selection(), Selection::caret(4));
    }

    #[test]
    fn line_col_counts_characters() {
        let area = TextArea::new("ä\nbc");
        assert_eq!(area.line_col(0), (0, 0));
        assert_eq!(area.line_col(2), (1, 0));
        assert_eq!(area.line_col(4), (1, 2));
    }
}
