use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};

use crate::ui::theme::Theme;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MenuAction {
    PracticeLevel,
    DailyPractice,
    RandomPractice,
    AddLesson,
    PlayLessons,
    TimedTest1,
    TimedTest5,
    Stats,
    Themes,
    Quit,
}

impl MenuAction {
    pub const ALL: [MenuAction; 10] = [
        MenuAction::PracticeLevel,
        MenuAction::DailyPractice,
        MenuAction::RandomPractice,
        MenuAction::AddLesson,
        MenuAction::PlayLessons,
        MenuAction::TimedTest1,
        MenuAction::TimedTest5,
        MenuAction::Stats,
        MenuAction::Themes,
        MenuAction::Quit,
    ];

    pub fn hotkey(self) -> char {
        match self {
            MenuAction::PracticeLevel => '1',
            MenuAction::DailyPractice => '2',
            MenuAction::RandomPractice => '3',
            MenuAction::AddLesson => '4',
            MenuAction::PlayLessons => '5',
            MenuAction::TimedTest1 => '6',
            MenuAction::TimedTest5 => '7',
            MenuAction::Stats => '8',
            MenuAction::Themes => '9',
            MenuAction::Quit => '0',
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            MenuAction::PracticeLevel => "Practice Level",
            MenuAction::DailyPractice => "Daily Practice",
            MenuAction::RandomPractice => "Random Practice",
            MenuAction::AddLesson => "Add Custom Lesson",
            MenuAction::PlayLessons => "Play Custom Lessons",
            MenuAction::TimedTest1 => "Timed Test (1 min)",
            MenuAction::TimedTest5 => "Timed Test (5 min)",
            MenuAction::Stats => "Statistics",
            MenuAction::Themes => "Themes",
            MenuAction::Quit => "Quit",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            MenuAction::PracticeLevel => "Work through the word sets of your current level",
            MenuAction::DailyPractice => "Level practice that keeps your streak alive",
            MenuAction::RandomPractice => "Current level lines in shuffled order",
            MenuAction::AddLesson => "Save a line of your own to practice later",
            MenuAction::PlayLessons => "Type through your saved lessons",
            MenuAction::TimedTest1 => "One minute against the hardest lines",
            MenuAction::TimedTest5 => "Five minutes against the hardest lines",
            MenuAction::Stats => "Totals, averages and per-key accuracy",
            MenuAction::Themes => "Switch the color theme",
            MenuAction::Quit => "Leave typedrill",
        }
    }

    pub fn from_key(ch: char) -> Option<Self> {
        Self::ALL.iter().copied().find(|a| a.hotkey() == ch)
    }
}

pub struct Menu {
    pub selected: usize,
}

impl Menu {
    pub fn new() -> Self {
        Self { selected: 0 }
    }

    pub fn next(&mut self) {
        self.selected = (self.selected + 1) % MenuAction::ALL.len();
    }

    pub fn prev(&mut self) {
        if self.selected > 0 {
            self.selected -= 1;
        } else {
            self.selected = MenuAction::ALL.len() - 1;
        }
    }

    pub fn action(&self) -> MenuAction {
        MenuAction::ALL[self.selected]
    }
}

pub struct MenuView<'a> {
    menu: &'a Menu,
    theme: &'a Theme,
}

impl<'a> MenuView<'a> {
    pub fn new(menu: &'a Menu, theme: &'a Theme) -> Self {
        Self { menu, theme }
    }
}

impl Widget for MenuView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .border_style(Style::default().fg(colors.border()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(4),
                Constraint::Min(0),
                Constraint::Length(2),
            ])
            .split(inner);

        let title_lines = vec![
            Line::from(""),
            Line::from(Span::styled(
                "typedrill",
                Style::default()
                    .fg(colors.accent())
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                "Terminal Typing Trainer",
                Style::default().fg(colors.fg()),
            )),
        ];
        Paragraph::new(title_lines)
            .alignment(Alignment::Center)
            .render(layout[0], buf);

        let item_layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints(
                MenuAction::ALL
                    .iter()
                    .map(|_| Constraint::Length(1))
                    .collect::<Vec<_>>(),
            )
            .split(layout[1]);

        for (i, action) in MenuAction::ALL.iter().enumerate() {
            let is_selected = i == self.menu.selected;
            let indicator = if is_selected { ">" } else { " " };
            let text = format!(
                " {indicator} [{key}] {label}",
                key = action.hotkey(),
                label = action.label()
            );

            let style = Style::default()
                .fg(if is_selected {
                    colors.accent()
                } else {
                    colors.fg()
                })
                .add_modifier(if is_selected {
                    Modifier::BOLD
                } else {
                    Modifier::empty()
                });

            if i < item_layout.len() {
                Paragraph::new(Line::from(Span::styled(text, style))).render(item_layout[i], buf);
            }
        }

        let desc = format!("   {}", self.menu.action().description());
        Paragraph::new(Line::from(Span::styled(
            desc,
            Style::default().fg(colors.text_pending()),
        )))
        .render(layout[2], buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_action_has_a_unique_hotkey() {
        let mut keys: Vec<char> = MenuAction::ALL.iter().map(|a| a.hotkey()).collect();
        keys.sort_unstable();
        keys.dedup();
        assert_eq!(keys.len(), MenuAction::ALL.len());
    }

    #[test]
    fn from_key_round_trips_every_action() {
        for action in MenuAction::ALL {
            assert_eq!(MenuAction::from_key(action.hotkey()), Some(action));
        }
        assert_eq!(MenuAction::from_key('x'), None);
    }

    #[test]
    fn selection_wraps_both_ways() {
        let mut menu = Menu::new();
        assert_eq!(menu.action(), MenuAction::PracticeLevel);
        menu.prev();
        assert_eq!(menu.action(), MenuAction::Quit);
        menu.next();
        assert_eq!(menu.action(), MenuAction::PracticeLevel);
    }
}
