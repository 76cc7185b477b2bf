/// A range of character offsets; `start == end` is a caret.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Selection {
    pub start: usize,
    pub end: usize,
}

impl Selection {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn caret(offset: usize) -> Self {
        Self::new(offset, offset)
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_caret(&self) -> bool {
        self.len() == 0
    }

    pub fn shifted_right(self, by: usize) -> Self {
        Self::new(self.start + by, self.end + by)
    }

    pub fn shifted_left(self, by: usize) -> Self {
        Self::new(self.start.saturating_sub(by), self.end.saturating_sub(by))
    }

    /// Clip this selection to a line whose content starts at `line_start`
    /// and is `line_len` characters long.
    ///
    /// Returns `None` when the selection ends before the line or starts past
    /// its last character. A selection starting exactly at the end of the
    /// content still touches the line.
    pub fn relative_to(self, line_start: usize, line_len: usize) -> Option<Self> {
        let start = self.start as isize - line_start as isize;
        let end = self.end as isize - line_start as isize;
        if end < 0 || start > line_len as isize {
            return None;
        }
        Some(Self::new(start.max(0) as usize, (end as usize).min(line_len)))
    }
}
