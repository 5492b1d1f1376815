use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget, Wrap};

use crate::session::attempt::AttemptState;
use crate::session::input::CharStatus;
use crate::ui::theme::Theme;

pub struct TypingArea<'a> {
    attempt: &'a AttemptState,
    theme: &'a Theme,
}

impl<'a> TypingArea<'a> {
    pub fn new(attempt: &'a AttemptState, theme: &'a Theme) -> Self {
        Self { attempt, theme }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum CellKind {
    Correct,
    Incorrect,
    Cursor,
    Pending,
}

/// Overlay the typed buffer on the target. Typed cells show what was
/// actually pressed (for correct cells that equals the target character),
/// excess input past the target end included; then the cursor cell and the
/// untyped remainder of the target.
fn build_cells(attempt: &AttemptState) -> Vec<(char, CellKind)> {
    let typed_len = attempt.typed.len();
    let mut cells = Vec::with_capacity(attempt.target.len().max(typed_len) + 1);

    for (i, &status) in attempt.statuses.iter().enumerate() {
        let kind = match status {
            CharStatus::Correct => CellKind::Correct,
            CharStatus::Incorrect => CellKind::Incorrect,
        };
        cells.push((attempt.typed[i], kind));
    }

    if typed_len < attempt.target.len() {
        cells.push((attempt.target[typed_len], CellKind::Cursor));
        for &ch in &attempt.target[typed_len + 1..] {
            cells.push((ch, CellKind::Pending));
        }
    } else {
        // Everything is typed; the cursor parks on a trailing blank.
        cells.push((' ', CellKind::Cursor));
    }

    cells
}

impl Widget for TypingArea<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let spans: Vec<Span> = build_cells(self.attempt)
            .into_iter()
            .map(|(ch, kind)| {
                let style = match kind {
                    CellKind::Correct => Style::default().fg(colors.text_correct()),
                    CellKind::Incorrect => Style::default()
                        .fg(colors.text_incorrect())
                        .bg(colors.text_incorrect_bg())
                        .add_modifier(Modifier::UNDERLINED),
                    CellKind::Cursor => Style::default()
                        .fg(colors.text_cursor_fg())
                        .bg(colors.text_cursor_bg()),
                    CellKind::Pending => Style::default().fg(colors.text_pending()),
                };
                Span::styled(ch.to_string(), style)
            })
            .collect();

        let block = Block::bordered()
            .title(" Type this ")
            .border_style(Style::default().fg(colors.border()))
            .style(Style::default().bg(colors.bg()));

        let paragraph = Paragraph::new(Line::from(spans))
            .block(block)
            .wrap(Wrap { trim: false });

        paragraph.render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::input;

    #[test]
    fn test_cells_fresh_attempt() {
        let attempt = AttemptState::new("abc");
        let cells = build_cells(&attempt);
        assert_eq!(cells.len(), 3);
        assert_eq!(cells[0], ('a', CellKind::Cursor));
        assert_eq!(cells[1], ('b', CellKind::Pending));
        assert_eq!(cells[2], ('c', CellKind::Pending));
    }

    #[test]
    fn test_cells_mixed_input() {
        let mut attempt = AttemptState::new("abc");
        input::process_char(&mut attempt, 'a');
        input::process_char(&mut attempt, 'x');
        let cells = build_cells(&attempt);
        assert_eq!(cells[0], ('a', CellKind::Correct));
        assert_eq!(cells[1], ('x', CellKind::Incorrect));
        assert_eq!(cells[2], ('c', CellKind::Cursor));
    }

    #[test]
    fn test_cells_excess_input_is_incorrect() {
        let mut attempt = AttemptState::new("ab");
        for ch in "abxy".chars() {
            input::process_char(&mut attempt, ch);
        }
        let cells = build_cells(&attempt);
        assert_eq!(cells[2], ('x', CellKind::Incorrect));
        assert_eq!(cells[3], ('y', CellKind::Incorrect));
        assert_eq!(cells[4], (' ', CellKind::Cursor));
    }

    #[test]
    fn test_cells_completed_target_parks_cursor() {
        let mut attempt = AttemptState::new("ok");
        input::process_char(&mut attempt, 'o');
        input::process_char(&mut attempt, 'k');
        let cells = build_cells(&attempt);
        assert_eq!(cells.len(), 3);
        assert_eq!(cells[2], (' ', CellKind::Cursor));
    }
}
