//! Outline editing commands bound to keys of the host text widget.

use crossterm::event::{KeyCode, KeyModifiers};

use crate::editor::{Editor, Line};
use crate::error::Result;

const INDENT: &str = "  ";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EditCommand {
    /// Tab
    Indent,
    /// Shift+Tab
    Outdent,
    /// Enter
    NewLine,
    /// Alt+Up
    MoveLinesUp,
    /// Alt+Down
    MoveLinesDown,
}

impl EditCommand {
    pub fn from_key(code: KeyCode, modifiers: KeyModifiers) -> Option<Self> {
        match code {
            KeyCode::BackTab => Some(Self::Outdent),
            KeyCode::Tab if modifiers.contains(KeyModifiers::SHIFT) => Some(Self::Outdent),
            KeyCode::Tab if modifiers.is_empty() => Some(Self::Indent),
            KeyCode::Enter if modifiers.is_empty() => Some(Self::NewLine),
            KeyCode::Up if modifiers == KeyModifiers::ALT => Some(Self::MoveLinesUp),
            KeyCode::Down if modifiers == KeyModifiers::ALT => Some(Self::MoveLinesDown),
            _ => None,
        }
    }
}

/// Run `command` against `editor`.
///
/// Returns `false` when the command does not apply to the current selection
/// and the widget should fall back to its default behaviour. With no line
/// selected nothing applies.
pub fn apply(editor: &mut Editor, command: EditCommand) -> Result<bool> {
    if editor.selected_indices().is_empty() {
        return Ok(false);
    }
    tracing::debug!(?command, "applying edit command");
    match command {
        EditCommand::Indent => indent(editor).map(|_| true),
        EditCommand::Outdent => {
            outdent(editor);
            Ok(true)
        }
        EditCommand::NewLine => Ok(new_line(editor)),
        EditCommand::MoveLinesUp => {
            move_lines_up(editor);
            Ok(true)
        }
        EditCommand::MoveLinesDown => {
            move_lines_down(editor);
            Ok(true)
        }
    }
}

/// Indent lines with selected text; insert two spaces at bare carets.
pub fn indent(editor: &mut Editor) -> Result<()> {
    for idx in editor.selected_indices() {
        let Some(line) = editor.line_mut(idx) else {
            continue;
        };
        if line.has_text_selected() {
            line.indent();
        } else {
            line.insert_text_before_selection(INDENT)?;
        }
    }
    Ok(())
}

pub fn outdent(editor: &mut Editor) {
    for idx in editor.selected_indices() {
        if let Some(line) = editor.line_mut(idx) {
            line.outdent();
        }
    }
}

/// Continue the current indentation on a new line.
///
/// Only applies to a single selected line whose caret sits at its end.
pub fn new_line(editor: &mut Editor) -> bool {
    let selected = editor.selected_indices();
    let [idx] = selected[..] else {
        return false;
    };
    let line = &editor.lines()[idx];
    if !line.is_cursor_at_end() {
        return false;
    }

    let new_line = Line::from_text(line.indentation());
    editor.insert_line_after(new_line, idx);
    editor.remove_selection();
    if let Some(line) = editor.line_mut(idx + 1) {
        line.set_selection_to_end();
    }
    true
}

/// Shift the selected block one line up.
///
/// A line only moves past an unselected neighbour, so a block already
/// touching the top stays where it is.
pub fn move_lines_up(editor: &mut Editor) {
    for idx in editor.selected_indices() {
        let blocked = idx == 0 || editor.lines()[idx - 1].is_selected();
        if !blocked {
            editor.move_line_up(idx);
        }
    }
}

/// Shift the selected block one line down. See [`move_lines_up`].
pub fn move_lines_down(editor: &mut Editor) {
    for idx in editor.selected_indices().into_iter().rev() {
        let blocked = editor
            .lines()
            .get(idx + 1)
            .is_none_or(Line::is_selected);
        if !blocked {
            editor.move_line_down(idx);
        }
    }
}

#[cfg(test)]
#[path = "keys_tests.rs"]
mod keys_tests;
