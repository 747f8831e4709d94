use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use lessonmark_config::Config;
use lessonmark_engine::{LessonFile, io as lesson_io};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
};
use std::{
    env,
    fs::{self, File, OpenOptions},
    io::{self, Stdout, stdout},
    path::{Path, PathBuf},
    process,
};

mod lesson_view;

struct App {
    lessons_path: PathBuf,
    lesson_files: Vec<LessonFile>,
    file_list_state: ListState,
    current_content: Vec<String>,
}

impl App {
    fn new(lessons_path: PathBuf) -> Result<Self> {
        let lesson_files = lesson_io::list_lesson_files(&lessons_path)?;

        let mut app = Self {
            lessons_path,
            lesson_files,
            file_list_state: ListState::default(),
            current_content: Vec::new(),
        };

        if !app.lesson_files.is_empty() {
            app.file_list_state.select(Some(0));
            app.update_content_for_selection();
        }

        Ok(app)
    }

    fn next_file(&mut self) {
        if self.lesson_files.is_empty() {
            return;
        }
        let i = match self.file_list_state.selected() {
            Some(i) => (i + 1) % self.lesson_files.len(),
            None => 0,
        };
        self.file_list_state.select(Some(i));
        self.update_content_for_selection();
    }

    fn previous_file(&mut self) {
        if self.lesson_files.is_empty() {
            return;
        }
        let i = match self.file_list_state.selected() {
            Some(0) | None => self.lesson_files.len() - 1,
            Some(i) => i - 1,
        };
        self.file_list_state.select(Some(i));
        self.update_content_for_selection();
    }

    fn update_content_for_selection(&mut self) {
        let Some(file) = self
            .file_list_state
            .selected()
            .and_then(|index| self.lesson_files.get(index))
        else {
            return;
        };

        self.current_content = match lesson_io::load_lesson(file.relative_path(), &self.lessons_path) {
            Ok(lesson) => lesson_view::lesson_lines(&lesson, file.display_name()),
            Err(e) => {
                log::warn!("failed to load {}: {e}", file.display_path());
                vec![format!("Error reading lesson: {e}")]
            }
        };
    }
}

fn main() -> Result<()> {
    init_logging(&Config::log_path());

    // Determine lessons path from CLI args or config file
    let args: Vec<String> = env::args().collect();
    let config_path = Config::config_path();

    let (lessons_path, from_config) = match args.len() {
        2 => (PathBuf::from(&args[1]), false),
        1 => match Config::load() {
            Ok(Some(config)) => (config.lessons_path, true),
            Ok(None) => {
                eprintln!("Error: No lessons path provided and no config file found");
                eprintln!("Usage: {} <lessons-folder-path>", args[0]);
                eprintln!("Or create a config file at {}", config_path.display());
                process::exit(1);
            }
            Err(e) => {
                eprintln!("Error: Failed to load config file: {e}");
                eprintln!("Usage: {} <lessons-folder-path>", args[0]);
                process::exit(1);
            }
        },
        _ => {
            eprintln!("Usage: {} [lessons-folder-path]", args[0]);
            process::exit(1);
        }
    };

    if let Err(e) = lesson_io::validate_lessons_dir(&lessons_path) {
        let source = if from_config {
            format!(" from config file '{}'", config_path.display())
        } else {
            String::new()
        };
        eprintln!(
            "Error: Lessons path '{}'{} is invalid: {e}",
            lessons_path.display(),
            source
        );
        process::exit(1);
    }

    let mut app = App::new(lessons_path)?;

    // Setup terminal
    enable_raw_mode()?;
    execute!(stdout(), EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;

    let res = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        println!("{err:?}");
    }

    Ok(())
}

/// Logs go to `log_path`; stderr would draw over the alternate screen.
/// When the file cannot be opened, log output is discarded.
fn init_logging(log_path: &Path) {
    let target: Box<dyn io::Write + Send> = match open_log_file(log_path) {
        Ok(file) => Box::new(file),
        Err(_) => Box::new(io::sink()),
    };

    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Warn)
        .parse_default_env()
        .target(env_logger::Target::Pipe(target))
        .init();
}

fn open_log_file(log_path: &Path) -> io::Result<File> {
    if let Some(parent) = log_path.parent() {
        fs::create_dir_all(parent)?;
    }
    OpenOptions::new().create(true).append(true).open(log_path)
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<Stdout>>, app: &mut App) -> Result<()> {
    loop {
        terminal.draw(|f| ui(f, app))?;

        if let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            match key.code {
                KeyCode::Char('q') => return Ok(()),
                KeyCode::Down | KeyCode::Char('j') => app.next_file(),
                KeyCode::Up | KeyCode::Char('k') => app.previous_file(),
                _ => {}
            }
        }
    }
}

fn ui(f: &mut Frame, app: &mut App) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(f.area());
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(30), Constraint::Percentage(70)])
        .split(rows[0]);

    // Lesson list panel
    let file_items: Vec<ListItem> = app
        .lesson_files
        .iter()
        .map(|file| ListItem::new(Line::from(Span::raw(file.display_path().to_string()))))
        .collect();

    let files_list = List::new(file_items)
        .block(Block::default().borders(Borders::ALL).title("Lessons"))
        .highlight_style(Style::default().bg(Color::Yellow).fg(Color::Black));

    f.render_stateful_widget(files_list, chunks[0], &mut app.file_list_state);

    // Content panel
    let content_text: Vec<Line> = if app.current_content.is_empty() {
        vec![Line::from("Select a lesson to view it")]
    } else {
        app.current_content
            .iter()
            .map(|line| Line::from(line.as_str()))
            .collect()
    };

    let content = Paragraph::new(content_text)
        .block(Block::default().borders(Borders::ALL).title("Lesson"))
        .wrap(Wrap { trim: false });

    f.render_widget(content, chunks[1]);

    let help = Paragraph::new(Line::from("q: Quit | ↑/k: Previous | ↓/j: Next"));
    f.render_widget(help, rows[1]);
}
