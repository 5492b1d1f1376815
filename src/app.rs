use std::io::{self, Write};

use rand::Rng;
use rand::SeedableRng;
use rand::rngs::SmallRng;

use crate::catalog::Catalog;
use crate::config::Config;
use crate::session::attempt::AttemptState;
use crate::session::input;
use crate::session::plan::{SessionMode, SessionPlan, SessionTally};
use crate::session::result::AttemptResult;
use crate::store::progress::ProgressStore;
use crate::store::schema::ProgressData;
use crate::ui::components::menu::{Menu, MenuAction};
use crate::ui::components::summary::{SummaryLine, Tone, accuracy_tone};
use crate::ui::lesson_entry::LessonEntry;
use crate::ui::theme::Theme;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AppScreen {
    Menu,
    Practice,
    Summary,
    Stats,
    ThemePicker,
    LessonEntry,
}

/// Verdict on the line just submitted, shown while the next one is typed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Judgement {
    Passed,
    Failed,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Warning,
}

/// Transient message on the menu screen (save failures, empty lesson list).
#[derive(Clone, Debug)]
pub struct Notice {
    pub kind: NoticeKind,
    pub text: String,
}

impl Notice {
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Info,
            text: text.into(),
        }
    }

    pub fn warning(text: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Warning,
            text: text.into(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct SessionSummary {
    pub heading: String,
    pub lines: Vec<SummaryLine>,
}

impl SessionSummary {
    fn practice_stats(tally: &SessionTally) -> Vec<SummaryLine> {
        let wpm = if tally.seconds < 0.1 {
            0.0
        } else {
            tally.words as f64 / (tally.seconds / 60.0)
        };
        let accuracy = if tally.lines == 0 {
            100.0
        } else {
            tally.passed as f64 / tally.lines as f64 * 100.0
        };
        vec![
            SummaryLine::new("Words:", format!("{}", tally.words), Tone::Plain),
            SummaryLine::new("Speed:", format!("{wpm:.0} WPM"), Tone::Accent),
            SummaryLine::new(
                "Accuracy:",
                format!("{accuracy:.1}%"),
                accuracy_tone(accuracy),
            ),
            SummaryLine::new("Time:", format!("{:.1}s", tally.seconds), Tone::Plain),
            SummaryLine::new(
                "Misses:",
                format!("{}", tally.mistakes),
                if tally.mistakes == 0 {
                    Tone::Good
                } else {
                    Tone::Bad
                },
            ),
        ]
    }

    pub fn level_complete(finished: u32, now: u32, tally: &SessionTally) -> Self {
        let heading = if now > finished {
            format!("Level {finished} complete! Now on level {now}")
        } else {
            format!("Level {finished} complete!")
        };
        Self {
            heading,
            lines: Self::practice_stats(tally),
        }
    }

    pub fn daily_complete(streak: u32, tally: &SessionTally) -> Self {
        Self {
            heading: format!("Daily practice done. Day {streak} of your streak!"),
            lines: Self::practice_stats(tally),
        }
    }

    pub fn random_complete(tally: &SessionTally) -> Self {
        Self {
            heading: "Random practice complete".to_string(),
            lines: Self::practice_stats(tally),
        }
    }

    pub fn custom_complete(tally: &SessionTally) -> Self {
        Self {
            heading: "Custom lessons complete".to_string(),
            lines: vec![
                SummaryLine::new(
                    "Lessons:",
                    format!("{}/{} passed", tally.passed, tally.lines),
                    if tally.passed == tally.lines {
                        Tone::Good
                    } else {
                        Tone::Warn
                    },
                ),
                SummaryLine::new("Time:", format!("{:.1}s", tally.seconds), Tone::Plain),
            ],
        }
    }

    pub fn test_complete(minutes: u32, tally: &SessionTally) -> Self {
        let wpm = tally.words as f64 / minutes as f64;
        Self {
            heading: "Time's up!".to_string(),
            lines: vec![
                SummaryLine::new("Duration:", format!("{minutes} min"), Tone::Plain),
                SummaryLine::new("Words:", format!("{}", tally.words), Tone::Plain),
                SummaryLine::new("Speed:", format!("{wpm:.0} WPM"), Tone::Accent),
            ],
        }
    }
}

pub struct App {
    pub screen: AppScreen,
    pub catalog: Catalog,
    pub config: Config,
    pub theme: Theme,
    pub progress: ProgressData,
    pub store: Option<ProgressStore>,
    pub plan: Option<SessionPlan>,
    pub attempt: Option<AttemptState>,
    pub judgement: Option<Judgement>,
    pub summary: Option<SessionSummary>,
    pub menu: Menu,
    pub theme_names: Vec<String>,
    pub theme_selected: usize,
    pub lesson_input: LessonEntry,
    pub notice: Option<Notice>,
    pub should_quit: bool,
    rng: SmallRng,
}

impl App {
    pub fn new() -> Self {
        let config = Config::load().unwrap_or_default();

        let mut notice = None;
        let store = match ProgressStore::new() {
            Ok(store) => Some(store),
            Err(err) => {
                notice = Some(Notice::warning(format!(
                    "Progress will not be saved: {err}"
                )));
                None
            }
        };

        let progress = match store.as_ref().map(ProgressStore::load) {
            Some(Ok(progress)) => progress,
            Some(Err(err)) => {
                notice = Some(Notice::warning(format!("Starting fresh: {err}")));
                ProgressData::default()
            }
            None => ProgressData::default(),
        };

        Self::from_parts(config, progress, store, notice)
    }

    pub fn from_parts(
        config: Config,
        mut progress: ProgressData,
        store: Option<ProgressStore>,
        notice: Option<Notice>,
    ) -> Self {
        let catalog = Catalog::load();
        progress.clamp_to_catalog(&catalog);

        let theme = Theme::load(&progress.theme).unwrap_or_default();
        let mut theme_names = Theme::available_themes();
        theme_names.sort();

        Self {
            screen: AppScreen::Menu,
            catalog,
            config,
            theme,
            progress,
            store,
            plan: None,
            attempt: None,
            judgement: None,
            summary: None,
            menu: Menu::new(),
            theme_names,
            theme_selected: 0,
            lesson_input: LessonEntry::new(""),
            notice,
            should_quit: false,
            rng: SmallRng::from_entropy(),
        }
    }

    pub fn run_action(&mut self, action: MenuAction) {
        match action {
            MenuAction::PracticeLevel => self.start_level_practice(),
            MenuAction::DailyPractice => self.start_daily_practice(),
            MenuAction::RandomPractice => self.start_random_practice(),
            MenuAction::AddLesson => self.go_to_lesson_entry(),
            MenuAction::PlayLessons => self.start_custom_practice(),
            MenuAction::TimedTest1 => self.start_timed_test(1),
            MenuAction::TimedTest5 => self.start_timed_test(5),
            MenuAction::Stats => self.go_to_stats(),
            MenuAction::Themes => self.go_to_theme_picker(),
            MenuAction::Quit => self.should_quit = true,
        }
    }

    fn level_targets(&mut self) -> Option<Vec<String>> {
        match self.catalog.get_level(self.progress.level) {
            Ok(targets) if !targets.is_empty() => Some(targets.to_vec()),
            Ok(_) => {
                self.notice = Some(Notice::warning("This level has no practice lines"));
                None
            }
            Err(err) => {
                self.notice = Some(Notice::warning(err.to_string()));
                None
            }
        }
    }

    pub fn start_level_practice(&mut self) {
        let Some(targets) = self.level_targets() else {
            return;
        };
        let start = self.progress.current_set.min(targets.len() - 1);
        self.begin_plan(SessionPlan::sequential(SessionMode::Level, targets, start));
    }

    pub fn start_daily_practice(&mut self) {
        let today = chrono::Utc::now().format("%Y-%m-%d").to_string();
        if self.progress.mark_practiced(&today) {
            self.save_progress();
        }

        let Some(targets) = self.level_targets() else {
            return;
        };
        let start = self.progress.current_set.min(targets.len() - 1);
        self.begin_plan(SessionPlan::sequential(SessionMode::Daily, targets, start));
    }

    pub fn start_random_practice(&mut self) {
        let Some(targets) = self.level_targets() else {
            return;
        };
        let plan = SessionPlan::shuffled(targets, &mut self.rng);
        self.begin_plan(plan);
    }

    pub fn start_custom_practice(&mut self) {
        if self.progress.custom_lessons.is_empty() {
            self.notice = Some(Notice::info("No custom lessons yet. Add one first."));
            return;
        }
        let plan = SessionPlan::custom(self.progress.custom_lessons.clone());
        self.begin_plan(plan);
    }

    pub fn start_timed_test(&mut self, minutes: u32) {
        self.begin_plan(SessionPlan::timed_test(minutes));
    }

    fn begin_plan(&mut self, plan: SessionPlan) {
        self.plan = Some(plan);
        self.judgement = None;
        self.summary = None;
        self.notice = None;
        self.begin_next_attempt();
    }

    /// Put the plan's current target on screen. Timed tests sample a fresh
    /// target from the hardest level each time they run out.
    fn begin_next_attempt(&mut self) {
        let needs_sample = self
            .plan
            .as_ref()
            .is_some_and(|p| matches!(p.mode, SessionMode::TimedTest { .. }) && p.is_finished());

        if needs_sample {
            let pool = self.catalog.hardest();
            if pool.is_empty() {
                self.notice = Some(Notice::warning("No practice lines available"));
                self.go_to_menu();
                return;
            }
            let line = pool[self.rng.gen_range(0..pool.len())].clone();
            if let Some(plan) = self.plan.as_mut() {
                plan.targets.push(line);
            }
        }

        let target = self
            .plan
            .as_ref()
            .and_then(|p| p.current_target().map(str::to_string));
        match target {
            Some(target) => {
                self.attempt = Some(AttemptState::new(&target));
                self.screen = AppScreen::Practice;
            }
            None => self.go_to_menu(),
        }
    }

    pub fn type_char(&mut self, ch: char) {
        self.judgement = None;
        if let Some(attempt) = self.attempt.as_mut() {
            input::process_char(attempt, ch);
            if self.config.sound {
                ring_bell();
            }
        }
    }

    pub fn backspace(&mut self) {
        if let Some(attempt) = self.attempt.as_mut() {
            input::process_backspace(attempt);
        }
    }

    /// Score the in-flight line against the current target. Every keystroke
    /// lands in the heatmap; what else moves depends on the session mode.
    /// The progress record is saved once, at the end.
    pub fn submit_line(&mut self) {
        let Some(attempt) = self.attempt.take() else {
            return;
        };
        let result = AttemptResult::from_attempt(&attempt);

        for press in &result.keystrokes {
            self.progress.record_key(press.key, press.correct);
        }

        let mut session_done = false;
        if let Some(plan) = self.plan.as_mut() {
            plan.tally.lines += 1;
            plan.tally.seconds += result.elapsed_secs;
            if result.passed {
                plan.tally.passed += 1;
            }

            match plan.mode {
                SessionMode::Level | SessionMode::Daily | SessionMode::Random => {
                    if result.passed {
                        plan.tally.words += result.target_words;
                        self.progress.total_words += result.target_words as u64;
                        self.progress.total_time += result.elapsed_secs;
                        plan.advance();
                        if plan.mode.advances_level() {
                            if plan.is_finished() {
                                session_done = true;
                            } else {
                                self.progress.current_set = plan.position;
                            }
                        } else {
                            session_done = plan.is_finished();
                        }
                        self.judgement = Some(Judgement::Passed);
                    } else {
                        // Mismatch keeps the same target for another try.
                        plan.tally.mistakes += 1;
                        self.progress.total_errors += 1;
                        self.judgement = Some(Judgement::Failed);
                    }
                }
                SessionMode::Custom => {
                    // Judged for feedback only; never retried, no totals.
                    if result.passed {
                        self.judgement = Some(Judgement::Passed);
                    } else {
                        plan.tally.mistakes += 1;
                        self.judgement = Some(Judgement::Failed);
                    }
                    plan.advance();
                    session_done = plan.is_finished();
                }
                SessionMode::TimedTest { .. } => {
                    plan.tally.words += result.typed_words;
                    plan.advance();
                    session_done = plan.deadline_passed();
                    self.judgement = if result.passed {
                        Some(Judgement::Passed)
                    } else {
                        Some(Judgement::Failed)
                    };
                }
            }
        }

        if session_done {
            self.finish_session();
        } else if self.plan.is_some() {
            self.begin_next_attempt();
        }

        self.save_progress();
    }

    fn finish_session(&mut self) {
        let Some(plan) = self.plan.take() else {
            return;
        };

        let summary = match plan.mode {
            SessionMode::Level => {
                let finished = self.progress.level;
                self.progress.level = (finished + 1).min(Catalog::MAX_LEVEL);
                self.progress.current_set = 0;
                SessionSummary::level_complete(finished, self.progress.level, &plan.tally)
            }
            SessionMode::Daily => {
                let finished = self.progress.level;
                self.progress.level = (finished + 1).min(Catalog::MAX_LEVEL);
                self.progress.current_set = 0;
                SessionSummary::daily_complete(self.progress.streak, &plan.tally)
            }
            SessionMode::Random => SessionSummary::random_complete(&plan.tally),
            SessionMode::Custom => SessionSummary::custom_complete(&plan.tally),
            SessionMode::TimedTest { minutes } => {
                SessionSummary::test_complete(minutes, &plan.tally)
            }
        };

        self.summary = Some(summary);
        self.attempt = None;
        self.judgement = None;
        self.screen = AppScreen::Summary;
    }

    /// Leave whatever is running. An in-flight attempt is dropped without
    /// touching totals or the heatmap.
    pub fn go_to_menu(&mut self) {
        self.plan = None;
        self.attempt = None;
        self.judgement = None;
        self.summary = None;
        self.screen = AppScreen::Menu;
    }

    pub fn go_to_stats(&mut self) {
        self.screen = AppScreen::Stats;
    }

    pub fn go_to_theme_picker(&mut self) {
        self.theme_selected = self
            .theme_names
            .iter()
            .position(|name| *name == self.progress.theme)
            .unwrap_or(0);
        self.screen = AppScreen::ThemePicker;
    }

    pub fn theme_picker_next(&mut self) {
        if !self.theme_names.is_empty() {
            self.theme_selected = (self.theme_selected + 1) % self.theme_names.len();
        }
    }

    pub fn theme_picker_prev(&mut self) {
        if self.theme_names.is_empty() {
            return;
        }
        if self.theme_selected > 0 {
            self.theme_selected -= 1;
        } else {
            self.theme_selected = self.theme_names.len() - 1;
        }
    }

    pub fn apply_selected_theme(&mut self) {
        let Some(name) = self.theme_names.get(self.theme_selected) else {
            return;
        };
        match Theme::load(name) {
            Some(theme) => {
                self.theme = theme;
                self.progress.theme = name.clone();
                self.save_progress();
                self.go_to_menu();
            }
            None => {
                self.notice = Some(Notice::warning(format!("Theme \"{name}\" failed to load")));
            }
        }
    }

    /// CLI override: applied to this session only, never persisted.
    pub fn override_theme(&mut self, name: &str) {
        match Theme::load(name) {
            Some(theme) => self.theme = theme,
            None => {
                self.notice = Some(Notice::warning(format!("Unknown theme \"{name}\"")));
            }
        }
    }

    pub fn go_to_lesson_entry(&mut self) {
        self.lesson_input = LessonEntry::new("");
        self.screen = AppScreen::LessonEntry;
    }

    pub fn submit_lesson(&mut self) {
        let text = self.lesson_input.value().to_string();
        if self.progress.add_lesson(&text) {
            self.save_progress();
            self.notice = Some(Notice::info("Lesson saved."));
        } else {
            self.notice = Some(Notice::info("Empty lessons are not saved."));
        }
        self.go_to_menu();
    }

    pub fn save_progress(&mut self) {
        let Some(store) = self.store.as_ref() else {
            return;
        };
        if let Err(err) = store.save(&self.progress) {
            self.notice = Some(Notice::warning(format!("Save failed: {err}")));
        }
    }
}

fn ring_bell() {
    let mut stdout = io::stdout();
    let _ = stdout.write_all(b"\x07");
    let _ = stdout.flush();
}
