use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};

use crate::ui::theme::Theme;

pub struct ThemePicker<'a> {
    pub names: &'a [String],
    pub selected: usize,
    pub current: &'a str,
    pub theme: &'a Theme,
}

impl<'a> ThemePicker<'a> {
    pub fn new(names: &'a [String], selected: usize, current: &'a str, theme: &'a Theme) -> Self {
        Self {
            names,
            selected,
            current,
            theme,
        }
    }
}

impl Widget for ThemePicker<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .title(" Themes ")
            .border_style(Style::default().fg(colors.accent()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2),
                Constraint::Min(0),
                Constraint::Length(2),
            ])
            .split(inner);

        let heading = Paragraph::new(Line::from(Span::styled(
            "  Pick a color theme (saved with your progress)",
            Style::default().fg(colors.fg()),
        )));
        heading.render(layout[0], buf);

        let items: Vec<Line> = self
            .names
            .iter()
            .enumerate()
            .map(|(i, name)| {
                let is_selected = i == self.selected;
                let indicator = if is_selected { ">" } else { " " };
                let marker = if name == self.current {
                    "  (current)"
                } else {
                    ""
                };
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
                Line::from(Span::styled(format!(" {indicator} {name}{marker}"), style))
            })
            .collect();
        Paragraph::new(items).render(layout[1], buf);

        let footer = Paragraph::new(Line::from(Span::styled(
            "  [Enter] Apply  [ESC] Back",
            Style::default().fg(colors.accent()),
        )));
        footer.render(layout[2], buf);
    }
}
