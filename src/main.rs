mod app;
mod catalog;
mod config;
mod event;
mod session;
mod store;
mod terminal;
mod ui;

use std::io;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};

use app::{App, AppScreen, Judgement, NoticeKind};
use catalog::Catalog;
use event::{AppEvent, EventHandler};
use session::plan::{SessionMode, SessionPlan};
use terminal::TerminalGuard;
use ui::components::key_heatmap::KeyHeatmap;
use ui::components::menu::{MenuAction, MenuView};
use ui::components::progress_bar::ProgressBar;
use ui::components::stats_panel::StatsPanel;
use ui::components::summary::Summary;
use ui::components::theme_picker::ThemePicker;
use ui::components::typing_area::TypingArea;
use ui::layout::AppLayout;
use ui::lesson_entry::InputResult;

#[derive(Parser)]
#[command(
    name = "typedrill",
    version,
    about = "Terminal typing trainer with leveled drills and per-key accuracy tracking"
)]
struct Cli {
    #[arg(short, long, help = "Theme name for this session")]
    theme: Option<String>,

    #[arg(short, long, help = "Ring the terminal bell on each keystroke")]
    sound: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut app = App::new();

    if cli.sound {
        app.config.sound = true;
    }
    if let Some(name) = cli.theme.as_deref() {
        app.override_theme(name);
    }

    terminal::install_panic_hook();
    let guard = TerminalGuard::enter()?;

    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)?;

    let events = EventHandler::new(Duration::from_millis(100))?;

    let result = run_app(&mut terminal, &mut app, &events);

    drop(guard);

    if let Err(err) = result {
        eprintln!("Error: {err:?}");
    }

    Ok(())
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    events: &EventHandler,
) -> Result<()> {
    loop {
        terminal.draw(|frame| render(frame, app))?;

        match events.next()? {
            AppEvent::Key(key) => handle_key(app, key),
            AppEvent::Tick => {}
            AppEvent::Resize(_, _) => {}
            AppEvent::Shutdown => app.should_quit = true,
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn handle_key(app: &mut App, key: KeyEvent) {
    if key.kind != KeyEventKind::Press {
        return;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.should_quit = true;
        return;
    }

    match app.screen {
        AppScreen::Menu => handle_menu_key(app, key),
        AppScreen::Practice => handle_practice_key(app, key),
        AppScreen::Summary => handle_summary_key(app, key),
        AppScreen::Stats => handle_stats_key(app, key),
        AppScreen::ThemePicker => handle_theme_picker_key(app, key),
        AppScreen::LessonEntry => handle_lesson_entry_key(app, key),
    }
}

fn handle_menu_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => app.should_quit = true,
        KeyCode::Up | KeyCode::Char('k') => app.menu.prev(),
        KeyCode::Down | KeyCode::Char('j') => app.menu.next(),
        KeyCode::Enter => app.run_action(app.menu.action()),
        KeyCode::Char(ch) => {
            if let Some(action) = MenuAction::from_key(ch) {
                app.run_action(action);
            }
        }
        _ => {}
    }
}

fn handle_practice_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.go_to_menu(),
        KeyCode::Enter => app.submit_line(),
        KeyCode::Backspace => app.backspace(),
        KeyCode::Char(ch) => app.type_char(ch),
        _ => {}
    }
}

fn handle_summary_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Enter | KeyCode::Esc | KeyCode::Char('q') => app.go_to_menu(),
        _ => {}
    }
}

fn handle_stats_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') => app.go_to_menu(),
        _ => {}
    }
}

fn handle_theme_picker_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') => app.go_to_menu(),
        KeyCode::Up | KeyCode::Char('k') => app.theme_picker_prev(),
        KeyCode::Down | KeyCode::Char('j') => app.theme_picker_next(),
        KeyCode::Enter => app.apply_selected_theme(),
        _ => {}
    }
}

fn handle_lesson_entry_key(app: &mut App, key: KeyEvent) {
    match app.lesson_input.handle(key) {
        InputResult::Submit => app.submit_lesson(),
        InputResult::Cancel => app.go_to_menu(),
        InputResult::Continue => {}
    }
}

fn render(frame: &mut ratatui::Frame, app: &App) {
    let area = frame.area();
    let colors = &app.theme.colors;

    let bg = Block::default().style(Style::default().bg(colors.bg()));
    frame.render_widget(bg, area);

    match app.screen {
        AppScreen::Menu => render_menu(frame, app),
        AppScreen::Practice => render_practice(frame, app),
        AppScreen::Summary => render_summary(frame, app),
        AppScreen::Stats => render_stats(frame, app),
        AppScreen::ThemePicker => render_theme_picker(frame, app),
        AppScreen::LessonEntry => render_lesson_entry(frame, app),
    }
}

fn render_menu(frame: &mut ratatui::Frame, app: &App) {
    let area = frame.area();
    let colors = &app.theme.colors;

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(area);

    let streak_text = if app.progress.streak > 0 {
        format!(" | {} day streak", app.progress.streak)
    } else {
        String::new()
    };
    let header_info = format!(
        " Level {} ({}) | {:.0} avg WPM{}",
        app.progress.level,
        Catalog::level_name(app.progress.level),
        app.progress.average_wpm(),
        streak_text,
    );
    let header = Paragraph::new(Line::from(vec![
        Span::styled(
            " typedrill ",
            Style::default()
                .fg(colors.header_fg())
                .bg(colors.header_bg())
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            &*header_info,
            Style::default()
                .fg(colors.text_pending())
                .bg(colors.header_bg()),
        ),
    ]))
    .style(Style::default().bg(colors.header_bg()));
    frame.render_widget(header, layout[0]);

    let menu_area = ui::layout::centered_rect(50, 80, layout[1]);
    frame.render_widget(MenuView::new(&app.menu, &app.theme), menu_area);

    let (footer_text, footer_color) = match &app.notice {
        Some(notice) => (
            format!(" {}", notice.text),
            match notice.kind {
                NoticeKind::Warning => colors.warning(),
                NoticeKind::Info => colors.accent(),
            },
        ),
        None => (
            " [1-0] Select  [j/k] Move  [Enter] Start  [q] Quit ".to_string(),
            colors.text_pending(),
        ),
    };
    let footer = Paragraph::new(Line::from(Span::styled(
        footer_text,
        Style::default().fg(footer_color),
    )));
    frame.render_widget(footer, layout[2]);
}

fn render_practice(frame: &mut ratatui::Frame, app: &App) {
    let area = frame.area();
    let colors = &app.theme.colors;

    let (Some(plan), Some(attempt)) = (app.plan.as_ref(), app.attempt.as_ref()) else {
        return;
    };

    let app_layout = AppLayout::new(area);

    let daily_tag = match plan.mode {
        SessionMode::Daily => format!(" (Day {})", app.progress.streak),
        _ => String::new(),
    };
    let header_text = format!(
        " {}{daily_tag} | WPM: {:.0} | Acc: {:.1}% | Misses: {}",
        plan.mode.title(),
        attempt.wpm(),
        attempt.accuracy(),
        plan.tally.mistakes,
    );
    let header = Paragraph::new(Line::from(Span::styled(
        &*header_text,
        Style::default()
            .fg(colors.header_fg())
            .bg(colors.header_bg())
            .add_modifier(Modifier::BOLD),
    )))
    .style(Style::default().bg(colors.header_bg()));
    frame.render_widget(header, app_layout.header);

    let show_progress = AppLayout::show_progress_bar(area);

    let mut constraints: Vec<Constraint> = vec![Constraint::Min(5)];
    if show_progress {
        constraints.push(Constraint::Length(3));
    }
    let main_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(app_layout.main);

    frame.render_widget(TypingArea::new(attempt, &app.theme), main_layout[0]);

    if show_progress {
        if let Some((title, text, ratio)) = progress_strip(plan) {
            frame.render_widget(
                ProgressBar::new(&title, &text, ratio, &app.theme),
                main_layout[1],
            );
        }
    }

    let footer = match app.judgement {
        Some(Judgement::Passed) => Paragraph::new(Line::from(Span::styled(
            " Line passed ",
            Style::default().fg(colors.success()),
        ))),
        Some(Judgement::Failed) => Paragraph::new(Line::from(Span::styled(
            " Mismatch: try the line again ",
            Style::default().fg(colors.error()),
        ))),
        None => Paragraph::new(Line::from(Span::styled(
            " [ESC] Menu  [Backspace] Fix  [Enter] Submit ",
            Style::default().fg(colors.text_pending()),
        ))),
    };
    frame.render_widget(footer, app_layout.footer);
}

/// Title, text, and fill ratio for the practice progress strip. Position
/// within the session for sequential modes, a countdown for timed tests.
fn progress_strip(plan: &SessionPlan) -> Option<(String, String, f64)> {
    if let SessionMode::TimedTest { .. } = plan.mode {
        let remaining = plan.remaining()?;
        let duration = plan.duration?;
        let secs = remaining.as_secs();
        let ratio = if duration.as_secs_f64() > 0.0 {
            remaining.as_secs_f64() / duration.as_secs_f64()
        } else {
            0.0
        };
        return Some((
            "Time left".to_string(),
            format!("{}:{:02}", secs / 60, secs % 60),
            ratio,
        ));
    }

    let total = plan.targets.len();
    if total == 0 {
        return None;
    }
    let unit = match plan.mode {
        SessionMode::Level | SessionMode::Daily => "Set",
        SessionMode::Custom => "Lesson",
        _ => "Line",
    };
    let shown = plan.position.min(total.saturating_sub(1)) + 1;
    Some((
        "Progress".to_string(),
        format!("{unit} {shown}/{total}"),
        plan.position as f64 / total as f64,
    ))
}

fn render_summary(frame: &mut ratatui::Frame, app: &App) {
    let area = frame.area();

    if let Some(ref summary) = app.summary {
        let centered = ui::layout::centered_rect(60, 70, area);
        frame.render_widget(
            Summary::new(&summary.heading, &summary.lines, &app.theme),
            centered,
        );
    }
}

fn render_stats(frame: &mut ratatui::Frame, app: &App) {
    let area = frame.area();
    let colors = &app.theme.colors;

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(13),
            Constraint::Min(8),
            Constraint::Length(1),
        ])
        .split(area);

    frame.render_widget(
        StatsPanel::new(
            &app.progress,
            &app.catalog,
            app.config.target_wpm,
            &app.theme,
        ),
        layout[0],
    );
    frame.render_widget(KeyHeatmap::new(&app.progress.heatmap, &app.theme), layout[1]);

    let footer = Paragraph::new(Line::from(Span::styled(
        " [ESC] Back ",
        Style::default().fg(colors.text_pending()),
    )));
    frame.render_widget(footer, layout[2]);
}

fn render_theme_picker(frame: &mut ratatui::Frame, app: &App) {
    let area = frame.area();
    let centered = ui::layout::centered_rect(50, 60, area);

    frame.render_widget(
        ThemePicker::new(
            &app.theme_names,
            app.theme_selected,
            &app.progress.theme,
            &app.theme,
        ),
        centered,
    );
}

fn render_lesson_entry(frame: &mut ratatui::Frame, app: &App) {
    let area = frame.area();
    let colors = &app.theme.colors;

    let centered = ui::layout::centered_rect(60, 30, area);

    let block = Block::bordered()
        .title(" New Lesson ")
        .border_style(Style::default().fg(colors.accent()))
        .style(Style::default().bg(colors.bg()));
    let inner = block.inner(centered);
    frame.render_widget(block, centered);

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(inner);

    let help = Paragraph::new(Line::from(Span::styled(
        "  Type the lesson text. It becomes one practice line.",
        Style::default().fg(colors.text_pending()),
    )));
    frame.render_widget(help, layout[0]);

    let (before, at, after) = app.lesson_input.render_parts();
    let cursor_char = at.unwrap_or(' ');
    let input_line = Line::from(vec![
        Span::styled("  > ", Style::default().fg(colors.accent())),
        Span::styled(before, Style::default().fg(colors.fg())),
        Span::styled(
            cursor_char.to_string(),
            Style::default()
                .fg(colors.text_cursor_fg())
                .bg(colors.text_cursor_bg()),
        ),
        Span::styled(after, Style::default().fg(colors.fg())),
    ]);
    frame.render_widget(Paragraph::new(input_line), layout[1]);

    let footer = Paragraph::new(Line::from(Span::styled(
        "  [Enter] Save  [ESC] Cancel",
        Style::default().fg(colors.accent()),
    )));
    frame.render_widget(footer, layout[3]);
}
