use crate::session::attempt::AttemptState;
use crate::session::input::KeyPress;

/// Trim and collapse runs of whitespace to single spaces. Submissions are
/// judged on normalized equality, so trailing spaces or double spaces
/// between words never fail a line.
pub fn normalize(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Outcome of one submitted line, ready to fold into the progress record.
#[derive(Clone, Debug)]
pub struct AttemptResult {
    pub passed: bool,
    pub typed_words: usize,
    pub target_words: usize,
    pub elapsed_secs: f64,
    pub keystrokes: Vec<KeyPress>,
}

impl AttemptResult {
    pub fn from_attempt(attempt: &AttemptState) -> Self {
        let typed = attempt.typed_string();
        let target = attempt.target_string();
        Self {
            passed: normalize(&typed) == normalize(&target),
            typed_words: typed.split_whitespace().count(),
            target_words: target.split_whitespace().count(),
            elapsed_secs: attempt.elapsed_secs(),
            keystrokes: attempt.trace.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::input;

    #[test]
    fn normalize_collapses_and_trims() {
        assert_eq!(normalize("  the   quick  fox "), "the quick fox");
        assert_eq!(normalize("already normal"), "already normal");
        assert_eq!(normalize("   "), "");
        assert_eq!(normalize("\tone\n two\t"), "one two");
    }

    #[test]
    fn normalize_is_idempotent() {
        for s in ["  a   b  ", "x", "", "a b c"] {
            let once = normalize(s);
            assert_eq!(normalize(&once), once);
        }
    }

    #[test]
    fn corrected_typo_still_passes() {
        let mut attempt = AttemptState::new("cat");
        input::process_char(&mut attempt, 'c');
        input::process_char(&mut attempt, 'a');
        input::process_char(&mut attempt, 'b');
        input::process_backspace(&mut attempt);
        input::process_char(&mut attempt, 't');

        let result = AttemptResult::from_attempt(&attempt);
        assert!(result.passed);
        assert_eq!(result.keystrokes.len(), 4);
        assert!(result.keystrokes.iter().any(|p| p.key == 'b' && !p.correct));
    }

    #[test]
    fn extra_spacing_does_not_fail_a_line() {
        let mut attempt = AttemptState::new("a b");
        for ch in " a  b ".chars() {
            input::process_char(&mut attempt, ch);
        }
        let result = AttemptResult::from_attempt(&attempt);
        assert!(result.passed);
    }

    #[test]
    fn mismatch_fails_the_line() {
        let mut attempt = AttemptState::new("cat");
        for ch in "car".chars() {
            input::process_char(&mut attempt, ch);
        }
        let result = AttemptResult::from_attempt(&attempt);
        assert!(!result.passed);
    }

    #[test]
    fn word_counts_are_whitespace_separated() {
        let mut attempt = AttemptState::new("the quick brown fox");
        for ch in "the quick".chars() {
            input::process_char(&mut attempt, ch);
        }
        let result = AttemptResult::from_attempt(&attempt);
        assert_eq!(result.target_words, 4);
        assert_eq!(result.typed_words, 2);
        assert!(result.elapsed_secs >= 0.0);
    }
}
