use std::time::Instant;

use crate::session::input::{CharStatus, KeyPress};

/// Live state of one line attempt. Timing runs from creation, the moment the
/// target is shown.
pub struct AttemptState {
    pub target: Vec<char>,
    pub typed: Vec<char>,
    /// Parallel to `typed`; popped together with it on backspace.
    pub statuses: Vec<CharStatus>,
    /// Every scored keystroke in order, kept across backspaces. Feeds the
    /// per-key heatmap at submission.
    pub trace: Vec<KeyPress>,
    pub started_at: Instant,
}

impl AttemptState {
    pub fn new(target: &str) -> Self {
        Self {
            target: target.chars().collect(),
            typed: Vec::new(),
            statuses: Vec::new(),
            trace: Vec::new(),
            started_at: Instant::now(),
        }
    }

    pub fn target_string(&self) -> String {
        self.target.iter().collect()
    }

    pub fn typed_string(&self) -> String {
        self.typed.iter().collect()
    }

    pub fn elapsed_secs(&self) -> f64 {
        self.started_at.elapsed().as_secs_f64()
    }

    pub fn correct_count(&self) -> usize {
        self.statuses
            .iter()
            .filter(|s| matches!(s, CharStatus::Correct))
            .count()
    }

    /// Positionally correct characters over the buffer length; exactly 100.0
    /// for an empty buffer.
    pub fn accuracy(&self) -> f64 {
        if self.typed.is_empty() {
            return 100.0;
        }
        (self.correct_count() as f64 / self.typed.len() as f64 * 100.0).clamp(0.0, 100.0)
    }

    /// Whitespace-separated words typed so far.
    pub fn word_count(&self) -> usize {
        self.typed_string().split_whitespace().count()
    }

    pub fn wpm(&self) -> f64 {
        let elapsed = self.elapsed_secs();
        if elapsed < 0.1 {
            return 0.0;
        }
        self.word_count() as f64 / (elapsed / 60.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::input;

    #[test]
    fn new_attempt_is_empty_and_fully_accurate() {
        let attempt = AttemptState::new("hello");
        assert_eq!(attempt.target.len(), 5);
        assert!(attempt.typed.is_empty());
        assert_eq!(attempt.accuracy(), 100.0);
        assert_eq!(attempt.wpm(), 0.0);
    }

    #[test]
    fn correct_typing_keeps_accuracy_at_100() {
        let mut attempt = AttemptState::new("cat");
        for ch in "cat".chars() {
            let press = input::process_char(&mut attempt, ch);
            assert!(press.correct);
        }
        assert_eq!(attempt.accuracy(), 100.0);
        assert_eq!(attempt.typed_string(), "cat");
    }

    #[test]
    fn wrong_char_lowers_accuracy() {
        let mut attempt = AttemptState::new("cat");
        input::process_char(&mut attempt, 'c');
        input::process_char(&mut attempt, 'x');
        assert_eq!(attempt.correct_count(), 1);
        assert!((attempt.accuracy() - 50.0).abs() < f64::EPSILON);
    }

    #[test]
    fn excess_chars_beyond_target_are_incorrect() {
        let mut attempt = AttemptState::new("ab");
        for ch in "abc".chars() {
            input::process_char(&mut attempt, ch);
        }
        assert_eq!(attempt.typed.len(), 3);
        assert_eq!(attempt.correct_count(), 2);
        assert_eq!(attempt.statuses[2], CharStatus::Incorrect);
    }

    #[test]
    fn empty_target_rejects_everything_typed() {
        let empty = AttemptState::new("");
        assert_eq!(empty.accuracy(), 100.0);

        let mut attempt = AttemptState::new("");
        let press = input::process_char(&mut attempt, 'x');
        assert!(!press.correct);
        assert_eq!(attempt.accuracy(), 0.0);
    }

    #[test]
    fn backspace_on_empty_buffer_is_a_noop() {
        let mut attempt = AttemptState::new("abc");
        input::process_backspace(&mut attempt);
        assert!(attempt.typed.is_empty());
        assert!(attempt.statuses.is_empty());
    }

    #[test]
    fn backspace_pops_buffer_and_status_but_not_trace() {
        let mut attempt = AttemptState::new("cat");
        input::process_char(&mut attempt, 'c');
        input::process_char(&mut attempt, 'a');
        input::process_char(&mut attempt, 'b');
        input::process_backspace(&mut attempt);
        input::process_char(&mut attempt, 't');

        assert_eq!(attempt.typed_string(), "cat");
        assert_eq!(attempt.correct_count(), 3);
        assert_eq!(attempt.trace.len(), 4);
        assert!(attempt.trace.iter().any(|p| p.key == 'b' && !p.correct));
    }

    #[test]
    fn metrics_stay_finite_and_non_negative() {
        let mut attempt = AttemptState::new("some words here");
        for ch in "some words".chars() {
            input::process_char(&mut attempt, ch);
        }
        assert!(attempt.wpm().is_finite());
        assert!(attempt.wpm() >= 0.0);
        assert!(attempt.accuracy().is_finite());
        assert!((0.0..=100.0).contains(&attempt.accuracy()));
        assert_eq!(attempt.word_count(), 2);
    }
}
