use ratatui::style::{Color, Modifier, Style};

/// Theme configuration for the outline editor and tree preview
#[derive(Clone, Debug)]
pub struct Theme {
    /// Foreground (text) color for the status bar
    pub status_bar_fg: Color,

    /// Background color for the status bar
    pub status_bar_bg: Color,

    /// Color for the current file name in the status bar
    pub filename_color: Color,

    /// Foreground color for active selection
    pub selection_fg: Color,

    /// Background color for active selection
    pub selection_bg: Color,

    /// Color for pane borders
    pub border_color: Color,

    /// Color for box-drawing connectors in the tree
    pub connector_color: Color,

    /// Color for entries that have children
    pub folder_color: Color,

    /// Color for trailing comments
    pub comment_color: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            status_bar_fg: Color::White,
            status_bar_bg: Color::Blue,
            filename_color: Color::LightYellow,
            selection_fg: Color::White,
            selection_bg: Color::LightBlue,
            border_color: Color::Gray,
            connector_color: Color::DarkGray,
            folder_color: Color::LightBlue,
            comment_color: Color::Green,
        }
    }
}

impl Theme {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status_bar_style(&self) -> Style {
        Style::default()
            .fg(self.status_bar_fg)
            .bg(self.status_bar_bg)
    }

    pub fn filename_style(&self) -> Style {
        self.status_bar_style().fg(self.filename_color)
    }

    pub fn selection_style(&self) -> Style {
        Style::default().fg(self.selection_fg).bg(self.selection_bg)
    }

    pub fn border_style(&self) -> Style {
        Style::default().fg(self.border_color)
    }

    pub fn connector_style(&self) -> Style {
        Style::default().fg(self.connector_color)
    }

    /// Folders are bold so they stand out without color support
    pub fn folder_style(&self) -> Style {
        Style::default()
            .fg(self.folder_color)
            .add_modifier(Modifier::BOLD)
    }

    pub fn comment_style(&self) -> Style {
        Style::default()
            .fg(self.comment_color)
            .add_modifier(Modifier::ITALIC)
    }
}
