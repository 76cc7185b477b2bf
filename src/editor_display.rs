use std::mem;

use ratatui::{
    style::Style,
    text::{Line, Span},
};
use unicode_width::UnicodeWidthChar;

use crate::render::TreeRow;
use crate::textarea::TextArea;
use crate::theme::Theme;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CursorVisualPosition {
    pub line: usize,
    pub column: u16,
}

#[derive(Debug)]
pub struct OutlineView {
    pub lines: Vec<Line<'static>>,
    pub cursor: CursorVisualPosition,
}

impl OutlineView {
    pub fn total_lines(&self) -> usize {
        self.lines.len()
    }
}

/// Lay out the text area's contents with the selection highlighted.
pub fn outline_view(area: &TextArea, theme: &Theme) -> OutlineView {
    let selection = area.selection();
    let head = area.head();
    let mut lines = Vec::new();
    let mut builder = LineBuilder::default();
    let mut cursor = None;
    let mut position = CursorVisualPosition::default();

    for (offset, ch) in area.text().chars().enumerate() {
        if offset == head {
            cursor = Some(position);
        }
        match ch {
            '\n' => {
                lines.push(builder.finish());
                position.line += 1;
                position.column = 0;
            }
            '\r' => {}
            _ => {
                // Tabs count as one indent unit, so they are drawn one cell wide.
                let ch = if ch == '\t' { ' ' } else { ch };
                let style = if selection.start <= offset && offset < selection.end {
                    theme.selection_style()
                } else {
                    Style::default()
                };
                builder.push(ch, style);
                let width = ch.width().unwrap_or(0) as u16;
                position.column = position.column.saturating_add(width);
            }
        }
    }
    lines.push(builder.finish());

    OutlineView {
        lines,
        cursor: cursor.unwrap_or(position),
    }
}

/// Style rendered tree rows: connectors dimmed, folders highlighted, comments set apart.
pub fn tree_lines(rows: &[TreeRow], theme: &Theme) -> Vec<Line<'static>> {
    rows.iter()
        .map(|row| {
            let mut spans = Vec::with_capacity(3);
            if !row.prefix.is_empty() {
                spans.push(Span::styled(row.prefix.clone(), theme.connector_style()));
            }
            let name_style = if row.name.ends_with('/') || row.name == "." {
                theme.folder_style()
            } else {
                Style::default()
            };
            spans.push(Span::styled(row.name.clone(), name_style));
            if let Some(comment) = &row.comment {
                let padding = " ".repeat(row.padding);
                spans.push(Span::styled(
                    format!("{padding}  # {comment}"),
                    theme.comment_style(),
                ));
            }
            Line::from(spans)
        })
        .collect()
}

#[derive(Default)]
struct LineBuilder {
    spans: Vec<Span<'static>>,
    run: String,
    style: Style,
}

impl LineBuilder {
    fn push(&mut self, ch: char, style: Style) {
        if style != self.style {
            self.flush();
            self.style = style;
        }
        self.run.push(ch);
    }

    fn flush(&mut self) {
        if !self.run.is_empty() {
            self.spans
                .push(Span::styled(mem::take(&mut self.run), self.style));
        }
    }

    fn finish(&mut self) -> Line<'static> {
        self.flush();
        self.style = Style::default();
        Line::from(mem::take(&mut self.spans))
    }
}
