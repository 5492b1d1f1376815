use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};

use crate::catalog::Catalog;
use crate::store::schema::ProgressData;
use crate::ui::theme::Theme;

pub struct StatsPanel<'a> {
    pub progress: &'a ProgressData,
    pub catalog: &'a Catalog,
    pub target_wpm: u32,
    pub theme: &'a Theme,
}

impl<'a> StatsPanel<'a> {
    pub fn new(
        progress: &'a ProgressData,
        catalog: &'a Catalog,
        target_wpm: u32,
        theme: &'a Theme,
    ) -> Self {
        Self {
            progress,
            catalog,
            target_wpm,
            theme,
        }
    }
}

impl Widget for StatsPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .title(" Statistics ")
            .border_style(Style::default().fg(colors.accent()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        if self.progress.total_words == 0 {
            let msg = Paragraph::new(Line::from(Span::styled(
                " No practice recorded yet. Start typing!",
                Style::default().fg(colors.text_pending()),
            )));
            msg.render(inner, buf);
            return;
        }

        let level = self.progress.level;
        let set_count = self
            .catalog
            .get_level(level)
            .map(|sets| sets.len())
            .unwrap_or(0);
        let level_text = format!(
            "{} ({})   Set {}/{}",
            level,
            Catalog::level_name(level),
            self.progress.current_set + 1,
            set_count,
        );

        let avg_wpm = self.progress.average_wpm();
        let wpm_color = if avg_wpm >= self.target_wpm as f64 {
            colors.success()
        } else {
            colors.warning()
        };
        let wpm_text = format!("{avg_wpm:.1} (target {})", self.target_wpm);

        let streak_text = if self.progress.last_practice.is_empty() {
            format!("{} days", self.progress.streak)
        } else {
            format!(
                "{} days   Last practice: {}",
                self.progress.streak, self.progress.last_practice,
            )
        };

        let plain = Style::default().fg(colors.fg());
        let value = Style::default()
            .fg(colors.accent())
            .add_modifier(Modifier::BOLD);

        let lines = vec![
            Line::from(vec![
                Span::styled("  Level:          ", plain),
                Span::styled(level_text, value),
            ]),
            Line::from(""),
            Line::from(vec![
                Span::styled("  Words typed:    ", plain),
                Span::styled(format!("{}", self.progress.total_words), value),
            ]),
            Line::from(vec![
                Span::styled("  Errors:         ", plain),
                Span::styled(format!("{}", self.progress.total_errors), plain),
            ]),
            Line::from(vec![
                Span::styled("  Practice time:  ", plain),
                Span::styled(format_duration(self.progress.total_time), plain),
            ]),
            Line::from(vec![
                Span::styled("  Average WPM:    ", plain),
                Span::styled(
                    wpm_text,
                    Style::default().fg(wpm_color).add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(""),
            Line::from(vec![
                Span::styled("  Streak:         ", plain),
                Span::styled(streak_text, value),
            ]),
            Line::from(vec![
                Span::styled("  Custom lessons: ", plain),
                Span::styled(format!("{}", self.progress.custom_lessons.len()), plain),
            ]),
        ];

        Paragraph::new(lines).render(inner, buf);
    }
}

fn format_duration(secs: f64) -> String {
    let total = secs as u64;
    let hours = total / 3600;
    let mins = (total % 3600) / 60;
    let s = total % 60;
    if hours > 0 {
        format!("{hours}h {mins}m {s}s")
    } else if mins > 0 {
        format!("{mins}m {s}s")
    } else {
        format!("{s}s")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_duration_picks_the_right_units() {
        assert_eq!(format_duration(42.7), "42s");
        assert_eq!(format_duration(75.0), "1m 15s");
        assert_eq!(format_duration(3723.0), "1h 2m 3s");
        assert_eq!(format_duration(0.0), "0s");
    }
}
