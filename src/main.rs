use std::{
    env, fs,
    io::{self, Read},
    path::{Path, PathBuf},
    time::{Duration, Instant},
};

use anyhow::{Context, Result, bail};
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Position, Rect},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph},
};

use outline_tree::{
    TreeConfig, clipboard,
    editor_display::{outline_view, tree_lines},
    keys::EditCommand,
    logging, parse, render,
    render::render_rows,
    settings::{Settings, settings_path},
    share::SharedState,
    textarea::TextArea,
    theme::Theme,
};

const STATUS_TIMEOUT: Duration = Duration::from_secs(4);

const USAGE: &str = "\
Usage:
  outline-tree [--state FRAGMENT] [FLAGS] [FILE]   edit an outline interactively
  outline-tree render [FLAGS] [FILE|-]             print the tree for an outline
  outline-tree share [FLAGS] [FILE|-]              print a shareable state fragment

Flags:
  --root                 wrap the tree in a '.' root entry
  --align-comments       line up trailing comments
  --no-align-comments    do not line up trailing comments";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Mode {
    Edit,
    Render,
    Share,
    Help,
}

#[derive(Debug, PartialEq, Eq)]
struct Options {
    mode: Mode,
    root_element: Option<bool>,
    align_comments: Option<bool>,
    state: Option<String>,
    path: Option<PathBuf>,
}

impl Options {
    fn tree_config(&self, base: TreeConfig) -> TreeConfig {
        TreeConfig {
            root_element: self.root_element.unwrap_or(base.root_element),
            align_comments: self.align_comments.unwrap_or(base.align_comments),
        }
    }
}

fn parse_args(args: impl IntoIterator<Item = String>) -> Result<Options> {
    let mut args = args.into_iter().peekable();
    let mode = match args.peek().map(String::as_str) {
        Some("render") => Mode::Render,
        Some("share") => Mode::Share,
        Some("help") => Mode::Help,
        _ => Mode::Edit,
    };
    if mode != Mode::Edit {
        args.next();
    }

    let mut options = Options {
        mode,
        root_element: None,
        align_comments: None,
        state: None,
        path: None,
    };

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => options.mode = Mode::Help,
            "--root" => options.root_element = Some(true),
            "--align-comments" => options.align_comments = Some(true),
            "--no-align-comments" => options.align_comments = Some(false),
            "--state" => {
                let Some(fragment) = args.next() else {
                    bail!("--state needs a fragment");
                };
                options.state = Some(fragment);
            }
            flag if flag.starts_with("--") => bail!("unknown flag {flag}"),
            path => {
                if options.path.is_some() {
                    bail!("unexpected argument {path}");
                }
                options.path = Some(PathBuf::from(path));
            }
        }
    }

    if options.state.is_some() && options.mode != Mode::Edit {
        bail!("--state only applies to the editor");
    }

    Ok(options)
}

fn main() -> Result<()> {
    run()
}

fn run() -> Result<()> {
    let options = parse_args(env::args().skip(1))?;
    let settings = Settings::load();
    let config = options.tree_config(settings.tree);

    match options.mode {
        Mode::Help => {
            println!("{USAGE}");
            Ok(())
        }
        Mode::Render => {
            let input = read_input(options.path.as_deref())?;
            println!("{}", render(&parse(&input), &config));
            Ok(())
        }
        Mode::Share => {
            let input = read_input(options.path.as_deref())?;
            let fragment = SharedState::new(input, config)
                .to_fragment()
                .context("failed to encode state")?;
            println!("{fragment}");
            Ok(())
        }
        Mode::Edit => run_editor(options, settings, config),
    }
}

fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) if path != Path::new("-") => fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display())),
        _ => {
            let mut input = String::new();
            io::stdin()
                .read_to_string(&mut input)
                .context("failed to read stdin")?;
            Ok(input)
        }
    }
}

fn run_editor(options: Options, settings: Settings, config: TreeConfig) -> Result<()> {
    let _logging = logging::init();

    let (input, config, initial_status) = match (&options.state, &options.path) {
        (Some(fragment), _) => {
            let state = SharedState::decode(fragment).context("failed to decode --state")?;
            (state.input, options.tree_config(state.config), None)
        }
        (None, Some(path)) if path.exists() => {
            let input = fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            (input, config, None)
        }
        (None, Some(_)) => (String::new(), config, Some("New file".to_string())),
        (None, None) => (settings.default_input.clone(), config, None),
    };

    let mut app = App::new(input, config, options.path, initial_status)
        .with_settings(settings, settings_path());

    enable_raw_mode().context("failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("failed to enter alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("failed to create terminal backend")?;
    terminal.clear().ok();

    let res = run_app(&mut terminal, &mut app).context("application error");

    disable_raw_mode().ok();
    execute!(terminal.backend_mut(), LeaveAlternateScreen).ok();
    terminal.show_cursor().ok();

    res
}

fn run_app<B: ratatui::backend::Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()> {
    let tick_rate = Duration::from_millis(250);
    let mut last_tick = Instant::now();

    while !app.should_quit {
        terminal
            .draw(|frame| app.draw(frame))
            .context("failed to draw frame")?;

        let timeout = tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or_else(|| Duration::from_secs(0));

        if event::poll(timeout).context("event poll failed")? {
            let evt = event::read().context("failed to read event")?;
            app.handle_event(evt)?;
        }

        if last_tick.elapsed() >= tick_rate {
            app.prune_status_message();
            last_tick = Instant::now();
        }
    }

    Ok(())
}

struct App {
    area: TextArea,
    config: TreeConfig,
    file_path: Option<PathBuf>,
    theme: Theme,
    settings: Settings,
    settings_path: Option<PathBuf>,
    scroll_top: usize,
    tree_scroll: usize,
    should_quit: bool,
    dirty: bool,
    status_message: Option<(String, Instant)>,
}

impl App {
    fn new(
        input: String,
        config: TreeConfig,
        file_path: Option<PathBuf>,
        initial_status: Option<String>,
    ) -> Self {
        Self {
            area: TextArea::new(input),
            config,
            file_path,
            theme: Theme::new(),
            settings: Settings::default(),
            settings_path: None,
            scroll_top: 0,
            tree_scroll: 0,
            should_quit: false,
            dirty: false,
            status_message: initial_status.map(|msg| (msg, Instant::now())),
        }
    }

    /// Persist tree option toggles to `path` on top of `settings`.
    fn with_settings(mut self, settings: Settings, path: Option<PathBuf>) -> Self {
        self.settings = settings;
        self.settings_path = path;
        self
    }

    fn draw(&mut self, frame: &mut Frame) {
        let area = frame.area();
        if area.height == 0 || area.width == 0 {
            return;
        }

        let vertical = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(1), Constraint::Length(1)])
            .split(area);
        let panes = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(vertical[0]);

        self.draw_outline(frame, panes[0]);
        self.draw_tree(frame, panes[1]);

        let status = Paragraph::new(self.status_line()).style(self.theme.status_bar_style());
        frame.render_widget(status, vertical[1]);
    }

    fn draw_outline(&mut self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .title("Outline")
            .borders(Borders::ALL)
            .border_style(self.theme.border_style());
        let inner = block.inner(area);
        let view = outline_view(&self.area, &self.theme);
        self.scroll_top = scroll_to_show(self.scroll_top, view.cursor.line, inner.height as usize);

        let paragraph = Paragraph::new(Text::from(view.lines))
            .block(block)
            .scroll((self.scroll_top as u16, 0));
        frame.render_widget(paragraph, area);

        let cursor = view.cursor;
        if inner.width > 0 && cursor.line >= self.scroll_top {
            let row = cursor.line - self.scroll_top;
            if row < inner.height as usize {
                let x = inner.x + cursor.column.min(inner.width - 1);
                frame.set_cursor_position(Position::new(x, inner.y + row as u16));
            }
        }
    }

    fn draw_tree(&mut self, frame: &mut Frame, area: Rect) {
        let rows = render_rows(&parse(self.area.text()), &self.config);
        let title = format!(
            "Tree [root {}] [align {}]",
            on_off(self.config.root_element),
            on_off(self.config.align_comments)
        );
        let block = Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(self.theme.border_style());
        let viewport = block.inner(area).height as usize;
        self.tree_scroll = self.tree_scroll_for(rows.len(), viewport);

        let paragraph = Paragraph::new(Text::from(tree_lines(&rows, &self.theme)))
            .block(block)
            .scroll((self.tree_scroll as u16, 0));
        frame.render_widget(paragraph, area);
    }

    /// Keep the tree row of the caret's outline line in view.
    fn tree_scroll_for(&self, row_count: usize, viewport: usize) -> usize {
        let (line, _) = self.area.line_col(self.area.head());
        let row = tree_row_for_line(self.area.text(), line, self.config.root_element);
        let row = row.min(row_count.saturating_sub(1));
        scroll_to_show(self.tree_scroll, row, viewport)
            .min(row_count.saturating_sub(viewport.max(1)))
    }

    fn status_line(&mut self) -> Line<'static> {
        self.prune_status_message();
        let (line, column) = self.area.line_col(self.area.head());
        let position = format!(" [{},{}] ", line + 1, column + 1);
        let file = match &self.file_path {
            Some(path) => path.display().to_string(),
            None => "[scratch]".to_string(),
        };
        let marker = if self.dirty { "*" } else { "" };

        let tail = match &self.status_message {
            Some((message, _)) => format!(" | {message}"),
            None => " | ^S save ^Q quit ^R root ^L align ^Y copy tree ^U copy link".to_string(),
        };

        Line::from(vec![
            Span::raw(position),
            Span::styled(format!("{file}{marker}"), self.theme.filename_style()),
            Span::raw(tail),
        ])
    }

    fn prune_status_message(&mut self) {
        if let Some((_, instant)) = &self.status_message {
            if instant.elapsed() > STATUS_TIMEOUT {
                self.status_message = None;
            }
        }
    }

    fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some((message.into(), Instant::now()));
    }

    fn handle_event(&mut self, event: Event) -> Result<()> {
        let Event::Key(KeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            ..
        }) = event
        else {
            return Ok(());
        };

        if modifiers.contains(KeyModifiers::CONTROL) {
            self.handle_control_key(code);
            return Ok(());
        }

        if let Some(command) = EditCommand::from_key(code, modifiers) {
            let handled = self.area.apply(command)?;
            if handled {
                self.mark_dirty();
            } else if command == EditCommand::NewLine {
                self.area.insert_char('\n');
                self.mark_dirty();
            }
            return Ok(());
        }

        let extend = modifiers.contains(KeyModifiers::SHIFT);
        match code {
            KeyCode::Left => self.area.move_left(extend),
            KeyCode::Right => self.area.move_right(extend),
            KeyCode::Up => self.area.move_up(extend),
            KeyCode::Down => self.area.move_down(extend),
            KeyCode::Home => self.area.move_home(extend),
            KeyCode::End => self.area.move_end(extend),
            KeyCode::Backspace => {
                if self.area.backspace() {
                    self.mark_dirty();
                }
            }
            KeyCode::Delete => {
                if self.area.delete() {
                    self.mark_dirty();
                }
            }
            KeyCode::Enter => {
                self.area.insert_char('\n');
                self.mark_dirty();
            }
            KeyCode::Char(ch) if !modifiers.contains(KeyModifiers::ALT) => {
                self.area.insert_char(ch);
                self.mark_dirty();
            }
            _ => {}
        }
        Ok(())
    }

    fn handle_control_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char('q') | KeyCode::Char('c') => self.should_quit = true,
            KeyCode::Char('s') => self.save(),
            KeyCode::Char('a') => self.area.select_all(),
            KeyCode::Char('r') => {
                self.config.root_element = !self.config.root_element;
                self.set_status(format!("Root element {}", on_off(self.config.root_element)));
                self.persist_config();
            }
            KeyCode::Char('l') => {
                self.config.align_comments = !self.config.align_comments;
                self.set_status(format!(
                    "Comment alignment {}",
                    on_off(self.config.align_comments)
                ));
                self.persist_config();
            }
            KeyCode::Char('y') => {
                let tree = render(&parse(self.area.text()), &self.config);
                self.copy("Tree copied", &tree);
            }
            KeyCode::Char('u') => {
                match SharedState::new(self.area.text(), self.config).to_fragment() {
                    Ok(fragment) => self.copy("Link fragment copied", &fragment),
                    Err(err) => {
                        tracing::warn!(error = %err, "could not encode state");
                        self.set_status("Could not create link");
                    }
                }
            }
            _ => {}
        }
    }

    fn copy(&mut self, success: &str, text: &str) {
        match clipboard::copy_to_clipboard(text) {
            Ok(()) => self.set_status(success),
            Err(err) => {
                tracing::warn!(error = %err, "clipboard copy failed");
                self.set_status("Could not copy to clipboard");
            }
        }
    }

    fn save(&mut self) {
        let Some(path) = self.file_path.clone() else {
            self.set_status("No file to save to; start with a file path");
            return;
        };
        match fs::write(&path, self.area.text()) {
            Ok(()) => {
                tracing::info!(path = %path.display(), "saved outline");
                self.dirty = false;
                self.set_status("Saved");
            }
            Err(err) => {
                tracing::warn!(path = %path.display(), error = %err, "save failed");
                self.set_status(format!("Could not save {}", path.display()));
            }
        }
    }

    fn persist_config(&mut self) {
        let Some(path) = self.settings_path.clone() else {
            return;
        };
        self.settings.tree = self.config;
        if let Err(err) = self.settings.save_to(&path) {
            tracing::warn!(path = %path.display(), error = %err, "could not save settings");
            self.set_status("Could not save settings");
        }
    }

    fn mark_dirty(&mut self) {
        self.dirty = true;
    }
}

fn scroll_to_show(top: usize, line: usize, viewport: usize) -> usize {
    let viewport = viewport.max(1);
    if line < top {
        line
    } else if line >= top + viewport {
        line + 1 - viewport
    } else {
        top
    }
}

/// Index of the tree row drawn for outline line `line`. Blank lines have no
/// row and map to the next entry.
fn tree_row_for_line(text: &str, line: usize, root_element: bool) -> usize {
    let entries_above = text
        .split('\n')
        .take(line)
        .filter(|raw| !raw.trim().is_empty())
        .count();
    entries_above + usize::from(root_element)
}

fn on_off(value: bool) -> &'static str {
    if value { "on" } else { "off" }
}
