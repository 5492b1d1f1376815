use std::collections::BTreeMap;

use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};

use crate::store::schema::KeyTally;
use crate::ui::theme::{Theme, ThemeColors};

const KEY_ROWS: [&str; 4] = ["1234567890", "qwertyuiop", "asdfghjkl;", "zxcvbnm,./"];

/// Per-key accuracy laid out as a keyboard grid, with the five worst and
/// five best keys listed underneath.
pub struct KeyHeatmap<'a> {
    pub heatmap: &'a BTreeMap<char, KeyTally>,
    pub theme: &'a Theme,
}

impl<'a> KeyHeatmap<'a> {
    pub fn new(heatmap: &'a BTreeMap<char, KeyTally>, theme: &'a Theme) -> Self {
        Self { heatmap, theme }
    }
}

fn key_color(tally: Option<&KeyTally>, colors: &ThemeColors) -> Color {
    match tally {
        Some(t) if t.total() > 0 => {
            let accuracy = t.accuracy();
            if accuracy >= 98.0 {
                colors.success()
            } else if accuracy >= 90.0 {
                colors.warning()
            } else {
                colors.error()
            }
        }
        _ => colors.text_pending(),
    }
}

fn display_key(ch: char) -> String {
    if ch == ' ' {
        "space".to_string()
    } else {
        ch.to_string()
    }
}

/// Keys with mistakes, least accurate first.
fn worst_keys(heatmap: &BTreeMap<char, KeyTally>, n: usize) -> Vec<(char, f64)> {
    let mut keys: Vec<(char, f64)> = heatmap
        .iter()
        .filter(|(_, t)| t.total() > 0 && t.wrong > 0)
        .map(|(&ch, t)| (ch, t.accuracy()))
        .collect();
    keys.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap().then_with(|| a.0.cmp(&b.0)));
    keys.truncate(n);
    keys
}

/// Keys with data, most accurate first.
fn best_keys(heatmap: &BTreeMap<char, KeyTally>, n: usize) -> Vec<(char, f64)> {
    let mut keys: Vec<(char, f64)> = heatmap
        .iter()
        .filter(|(_, t)| t.total() > 0)
        .map(|(&ch, t)| (ch, t.accuracy()))
        .collect();
    keys.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap().then_with(|| a.0.cmp(&b.0)));
    keys.truncate(n);
    keys
}

impl Widget for KeyHeatmap<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .title(" Key Accuracy ")
            .border_style(Style::default().fg(colors.accent()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(6), Constraint::Min(0)])
            .split(inner);

        self.render_grid(layout[0], buf);

        let lists = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(layout[1]);
        self.render_key_list(" Worst Accuracy (%) ", &worst_keys(self.heatmap, 5), lists[0], buf);
        self.render_key_list(" Best Accuracy (%) ", &best_keys(self.heatmap, 5), lists[1], buf);
    }
}

impl KeyHeatmap<'_> {
    fn render_grid(&self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let mut lines: Vec<Line> = Vec::with_capacity(KEY_ROWS.len() + 2);
        for (row_idx, row) in KEY_ROWS.iter().enumerate() {
            let mut spans = vec![Span::raw(" ".repeat(2 + row_idx))];
            for ch in row.chars() {
                let tally = self.heatmap.get(&ch);
                let cell = match tally {
                    Some(t) if t.total() > 0 => {
                        format!("{ch} {:<3}", t.accuracy().round() as u32)
                    }
                    _ => format!("{ch}    "),
                };
                spans.push(Span::styled(
                    cell,
                    Style::default().fg(key_color(tally, colors)),
                ));
                spans.push(Span::raw(" "));
            }
            lines.push(Line::from(spans));
        }

        lines.push(Line::from(""));
        let space_tally = self.heatmap.get(&' ');
        let space_cell = match space_tally {
            Some(t) if t.total() > 0 => {
                format!("      space {:<3}", t.accuracy().round() as u32)
            }
            _ => "      space".to_string(),
        };
        lines.push(Line::from(Span::styled(
            space_cell,
            Style::default()
                .fg(key_color(space_tally, colors))
                .add_modifier(Modifier::BOLD),
        )));

        Paragraph::new(lines).render(area, buf);
    }

    fn render_key_list(&self, title: &str, keys: &[(char, f64)], area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .title(Line::from(Span::styled(
                title.to_string(),
                Style::default()
                    .fg(colors.accent())
                    .add_modifier(Modifier::BOLD),
            )))
            .border_style(Style::default().fg(colors.accent_dim()));
        let inner = block.inner(area);
        block.render(area, buf);

        if keys.is_empty() {
            buf.set_string(
                inner.x,
                inner.y,
                " Not enough data",
                Style::default().fg(colors.text_pending()),
            );
            return;
        }

        for (i, (ch, acc)) in keys.iter().take(inner.height as usize).enumerate() {
            let y = inner.y + i as u16;
            if y >= inner.y + inner.height {
                break;
            }
            let label = format!(" {:<5} {acc:>5.1}% ", display_key(*ch));
            let label_len = label.len() as u16;
            let color = if *acc >= 95.0 {
                colors.warning()
            } else {
                colors.error()
            };
            buf.set_string(inner.x, y, &label, Style::default().fg(color));
            let bar_space = inner.width.saturating_sub(label_len) as usize;
            if bar_space > 0 {
                let filled = ((acc / 100.0) * bar_space as f64).round() as usize;
                let bar = "\u{2588}".repeat(filled.min(bar_space));
                buf.set_string(inner.x + label_len, y, &bar, Style::default().fg(color));
            }
        }
    }
}
