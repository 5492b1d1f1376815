use std::time::{Duration, Instant};

use rand::rngs::SmallRng;
use rand::seq::SliceRandom;

/// Which practice flow is running. The mode decides how a submitted line is
/// scored, what it persists, and what ends the session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionMode {
    Level,
    Daily,
    Random,
    Custom,
    TimedTest { minutes: u32 },
}

impl SessionMode {
    pub fn title(self) -> &'static str {
        match self {
            SessionMode::Level => "Level Practice",
            SessionMode::Daily => "Daily Practice",
            SessionMode::Random => "Random Practice",
            SessionMode::Custom => "Custom Lessons",
            SessionMode::TimedTest { .. } => "Timed Test",
        }
    }

    /// Lifetime word/error/time totals accumulate in these modes.
    pub fn tracks_totals(self) -> bool {
        matches!(
            self,
            SessionMode::Level | SessionMode::Daily | SessionMode::Random
        )
    }

    /// A mismatched line is kept for another attempt instead of advancing.
    pub fn retries_on_mismatch(self) -> bool {
        matches!(
            self,
            SessionMode::Level | SessionMode::Daily | SessionMode::Random
        )
    }

    /// Set and level counters move only in sequential level practice.
    pub fn advances_level(self) -> bool {
        matches!(self, SessionMode::Level | SessionMode::Daily)
    }
}

/// Running counters for the session, shown in the end-of-session summary.
/// Timed tests count every typed word here, right or wrong.
#[derive(Clone, Copy, Debug, Default)]
pub struct SessionTally {
    pub words: usize,
    pub lines: usize,
    pub passed: usize,
    pub mistakes: u32,
    pub seconds: f64,
}

/// The resolved target sequence for one session and the position within it.
/// Timed tests start with an empty list and append each sampled target as
/// the test goes on.
pub struct SessionPlan {
    pub mode: SessionMode,
    pub targets: Vec<String>,
    pub position: usize,
    pub deadline: Option<Instant>,
    /// Nominal test length; the denominator for timed-test WPM.
    pub duration: Option<Duration>,
    pub tally: SessionTally,
}

impl SessionPlan {
    pub fn sequential(mode: SessionMode, targets: Vec<String>, start_at: usize) -> Self {
        Self {
            mode,
            targets,
            position: start_at,
            deadline: None,
            duration: None,
            tally: SessionTally::default(),
        }
    }

    pub fn shuffled(mut targets: Vec<String>, rng: &mut SmallRng) -> Self {
        targets.shuffle(rng);
        Self::sequential(SessionMode::Random, targets, 0)
    }

    pub fn custom(lessons: Vec<String>) -> Self {
        Self::sequential(SessionMode::Custom, lessons, 0)
    }

    pub fn timed_test(minutes: u32) -> Self {
        let duration = Duration::from_secs(u64::from(minutes) * 60);
        Self {
            mode: SessionMode::TimedTest { minutes },
            targets: Vec::new(),
            position: 0,
            deadline: Some(Instant::now() + duration),
            duration: Some(duration),
            tally: SessionTally::default(),
        }
    }

    pub fn current_target(&self) -> Option<&str> {
        self.targets.get(self.position).map(String::as_str)
    }

    pub fn advance(&mut self) {
        self.position += 1;
    }

    pub fn is_finished(&self) -> bool {
        self.position >= self.targets.len()
    }

    /// Checked between lines only; a line in flight is always allowed to
    /// finish.
    pub fn deadline_passed(&self) -> bool {
        self.deadline.is_some_and(|d| Instant::now() >= d)
    }

    pub fn remaining(&self) -> Option<Duration> {
        self.deadline
            .map(|d| d.saturating_duration_since(Instant::now()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn lines(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn sequential_plan_walks_targets_in_order() {
        let mut plan = SessionPlan::sequential(SessionMode::Level, lines(&["a", "b"]), 0);
        assert_eq!(plan.current_target(), Some("a"));
        assert!(!plan.is_finished());
        plan.advance();
        assert_eq!(plan.current_target(), Some("b"));
        plan.advance();
        assert!(plan.is_finished());
        assert_eq!(plan.current_target(), None);
    }

    #[test]
    fn sequential_plan_can_resume_mid_list() {
        let plan = SessionPlan::sequential(SessionMode::Level, lines(&["a", "b", "c"]), 2);
        assert_eq!(plan.current_target(), Some("c"));
    }

    #[test]
    fn shuffled_plan_keeps_the_same_lines() {
        let originals = lines(&["one", "two", "three", "four", "five"]);
        let mut rng = SmallRng::seed_from_u64(42);
        let plan = SessionPlan::shuffled(originals.clone(), &mut rng);

        let mut sorted_plan = plan.targets.clone();
        sorted_plan.sort();
        let mut sorted_orig = originals;
        sorted_orig.sort();
        assert_eq!(sorted_plan, sorted_orig);
        assert_eq!(plan.mode, SessionMode::Random);
    }

    #[test]
    fn timed_test_starts_empty_with_a_deadline() {
        let plan = SessionPlan::timed_test(1);
        assert_eq!(plan.current_target(), None);
        assert!(plan.is_finished());
        assert!(!plan.deadline_passed());
        assert_eq!(plan.duration, Some(Duration::from_secs(60)));
    }

    #[test]
    fn expired_deadline_is_detected() {
        let mut plan = SessionPlan::timed_test(1);
        plan.deadline = Some(Instant::now());
        assert!(plan.deadline_passed());
        assert_eq!(plan.remaining(), Some(Duration::ZERO));
    }

    #[test]
    fn mode_flags_match_the_scoring_rules() {
        assert!(SessionMode::Level.tracks_totals());
        assert!(SessionMode::Daily.tracks_totals());
        assert!(SessionMode::Random.tracks_totals());
        assert!(!SessionMode::Custom.tracks_totals());
        assert!(!SessionMode::TimedTest { minutes: 1 }.tracks_totals());

        assert!(SessionMode::Level.advances_level());
        assert!(SessionMode::Daily.advances_level());
        assert!(!SessionMode::Random.advances_level());

        assert!(SessionMode::Level.retries_on_mismatch());
        assert!(!SessionMode::Custom.retries_on_mismatch());
        assert!(!SessionMode::TimedTest { minutes: 5 }.retries_on_mismatch());
    }
}
