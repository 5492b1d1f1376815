use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};

use crate::ui::theme::Theme;

/// How a stat value is colored.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tone {
    Plain,
    Accent,
    Good,
    Warn,
    Bad,
}

pub fn accuracy_tone(accuracy: f64) -> Tone {
    if accuracy >= 95.0 {
        Tone::Good
    } else if accuracy >= 85.0 {
        Tone::Warn
    } else {
        Tone::Bad
    }
}

#[derive(Clone, Debug)]
pub struct SummaryLine {
    pub label: String,
    pub value: String,
    pub tone: Tone,
}

impl SummaryLine {
    pub fn new(label: &str, value: String, tone: Tone) -> Self {
        Self {
            label: label.to_string(),
            value,
            tone,
        }
    }
}

/// End-of-session panel: a heading and a column of labeled stats.
pub struct Summary<'a> {
    heading: &'a str,
    lines: &'a [SummaryLine],
    theme: &'a Theme,
}

impl<'a> Summary<'a> {
    pub fn new(heading: &'a str, lines: &'a [SummaryLine], theme: &'a Theme) -> Self {
        Self {
            heading,
            lines,
            theme,
        }
    }
}

impl Widget for Summary<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .title(" Session Complete ")
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
            self.heading,
            Style::default()
                .fg(colors.accent())
                .add_modifier(Modifier::BOLD),
        )))
        .alignment(Alignment::Center);
        heading.render(layout[0], buf);

        let stat_lines: Vec<Line> = self
            .lines
            .iter()
            .flat_map(|line| {
                let value_color = match line.tone {
                    Tone::Plain => colors.fg(),
                    Tone::Accent => colors.accent(),
                    Tone::Good => colors.success(),
                    Tone::Warn => colors.warning(),
                    Tone::Bad => colors.error(),
                };
                vec![
                    Line::from(vec![
                        Span::styled(
                            format!("  {:<12}", line.label),
                            Style::default().fg(colors.fg()),
                        ),
                        Span::styled(
                            line.value.clone(),
                            Style::default()
                                .fg(value_color)
                                .add_modifier(Modifier::BOLD),
                        ),
                    ]),
                    Line::from(""),
                ]
            })
            .collect();
        Paragraph::new(stat_lines).render(layout[1], buf);

        let help = Paragraph::new(Line::from(Span::styled(
            "  [Enter] Menu",
            Style::default().fg(colors.accent()),
        )));
        help.render(layout[2], buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accuracy_tone_thresholds() {
        assert_eq!(accuracy_tone(100.0), Tone::Good);
        assert_eq!(accuracy_tone(95.0), Tone::Good);
        assert_eq!(accuracy_tone(94.9), Tone::Warn);
        assert_eq!(accuracy_tone(85.0), Tone::Warn);
        assert_eq!(accuracy_tone(84.9), Tone::Bad);
        assert_eq!(accuracy_tone(0.0), Tone::Bad);
    }
}
