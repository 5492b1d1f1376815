use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;

/// One cell of the per-key accuracy heatmap.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyTally {
    pub correct: u64,
    pub wrong: u64,
}

impl KeyTally {
    pub fn total(&self) -> u64 {
        self.correct + self.wrong
    }

    pub fn accuracy(&self) -> f64 {
        if self.total() == 0 {
            return 100.0;
        }
        self.correct as f64 / self.total() as f64 * 100.0
    }
}

/// The single persisted progress record. Field order here is the key order
/// of the saved file, and the heatmap is a BTreeMap, so saving the same data
/// twice produces byte-identical output.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ProgressData {
    #[serde(default = "default_theme")]
    pub theme: String,
    #[serde(default = "default_level")]
    pub level: u32,
    #[serde(default)]
    pub current_set: usize,
    #[serde(default)]
    pub total_words: u64,
    #[serde(default)]
    pub total_errors: u64,
    #[serde(default)]
    pub total_time: f64,
    #[serde(default)]
    pub heatmap: BTreeMap<char, KeyTally>,
    #[serde(default)]
    pub streak: u32,
    /// ISO date `YYYY-MM-DD`; empty string when never practiced.
    #[serde(default)]
    pub last_practice: String,
    #[serde(default)]
    pub custom_lessons: Vec<String>,
}

fn default_theme() -> String {
    "neon".to_string()
}

fn default_level() -> u32 {
    1
}

impl Default for ProgressData {
    fn default() -> Self {
        Self {
            theme: default_theme(),
            level: default_level(),
            current_set: 0,
            total_words: 0,
            total_errors: 0,
            total_time: 0.0,
            heatmap: BTreeMap::new(),
            streak: 0,
            last_practice: String::new(),
            custom_lessons: Vec::new(),
        }
    }
}

impl ProgressData {
    /// Fold one scored keystroke into the heatmap.
    pub fn record_key(&mut self, key: char, correct: bool) {
        let tally = self.heatmap.entry(key).or_default();
        if correct {
            tally.correct += 1;
        } else {
            tally.wrong += 1;
        }
    }

    /// Streak bookkeeping: increments at most once per calendar day, by
    /// string equality on the stored date. Returns true when it advanced.
    pub fn mark_practiced(&mut self, today: &str) -> bool {
        if self.last_practice == today {
            return false;
        }
        self.streak += 1;
        self.last_practice = today.to_string();
        true
    }

    /// Append a custom lesson, whitespace-trimmed. Rejects empty text.
    pub fn add_lesson(&mut self, text: &str) -> bool {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return false;
        }
        self.custom_lessons.push(trimmed.to_string());
        true
    }

    /// Lifetime average WPM from the stored totals.
    pub fn average_wpm(&self) -> f64 {
        if self.total_time <= 0.0 {
            return 0.0;
        }
        self.total_words as f64 / (self.total_time / 60.0)
    }

    /// Clamp loaded values into the ranges the catalog defines: `level` to a
    /// known level, `current_set` to a valid index within it.
    pub fn clamp_to_catalog(&mut self, catalog: &Catalog) {
        self.level = self.level.clamp(1, Catalog::MAX_LEVEL);
        if let Ok(sets) = catalog.get_level(self.level) {
            self.current_set = self.current_set.min(sets.len().saturating_sub(1));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_fresh_install() {
        let data = ProgressData::default();
        assert_eq!(data.theme, "neon");
        assert_eq!(data.level, 1);
        assert_eq!(data.current_set, 0);
        assert_eq!(data.total_words, 0);
        assert_eq!(data.last_practice, "");
        assert!(data.heatmap.is_empty());
        assert!(data.custom_lessons.is_empty());
    }

    #[test]
    fn partial_json_fills_missing_fields_with_defaults() {
        let data: ProgressData = serde_json::from_str(r#"{"level": 2, "streak": 5}"#).unwrap();
        assert_eq!(data.level, 2);
        assert_eq!(data.streak, 5);
        assert_eq!(data.theme, "neon");
        assert_eq!(data.total_words, 0);
        assert!(data.heatmap.is_empty());
    }

    #[test]
    fn record_key_tallies_correct_and_wrong() {
        let mut data = ProgressData::default();
        data.record_key('a', true);
        data.record_key('a', true);
        data.record_key('a', false);
        data.record_key(' ', true);

        let a = data.heatmap[&'a'];
        assert_eq!(a.correct, 2);
        assert_eq!(a.wrong, 1);
        assert_eq!(data.heatmap[&' '].correct, 1);
    }

    #[test]
    fn key_tally_accuracy() {
        let empty = KeyTally::default();
        assert_eq!(empty.accuracy(), 100.0);

        let mixed = KeyTally {
            correct: 3,
            wrong: 1,
        };
        assert!((mixed.accuracy() - 75.0).abs() < f64::EPSILON);
    }

    #[test]
    fn streak_same_day_is_unchanged() {
        let mut data = ProgressData::default();
        assert!(data.mark_practiced("2024-01-01"));
        assert_eq!(data.streak, 1);

        assert!(!data.mark_practiced("2024-01-01"));
        assert_eq!(data.streak, 1);
        assert_eq!(data.last_practice, "2024-01-01");
    }

    #[test]
    fn streak_next_day_increments_by_one() {
        let mut data = ProgressData::default();
        data.mark_practiced("2024-01-01");
        assert!(data.mark_practiced("2024-01-02"));
        assert_eq!(data.streak, 2);
        assert_eq!(data.last_practice, "2024-01-02");
    }

    #[test]
    fn add_lesson_trims_and_rejects_empty() {
        let mut data = ProgressData::default();
        assert!(data.add_lesson("  hello world  "));
        assert_eq!(data.custom_lessons, vec!["hello world".to_string()]);

        assert!(!data.add_lesson("   "));
        assert!(!data.add_lesson(""));
        assert_eq!(data.custom_lessons.len(), 1);
    }

    #[test]
    fn average_wpm_guards_zero_time() {
        let mut data = ProgressData::default();
        assert_eq!(data.average_wpm(), 0.0);

        data.total_words = 80;
        data.total_time = 120.0;
        assert!((data.average_wpm() - 40.0).abs() < f64::EPSILON);
    }

    #[test]
    fn clamp_fixes_out_of_range_level_and_set() {
        let catalog = Catalog::load();

        let mut data = ProgressData::default();
        data.level = 0;
        data.clamp_to_catalog(&catalog);
        assert_eq!(data.level, 1);

        data.level = 99;
        data.current_set = 5000;
        data.clamp_to_catalog(&catalog);
        assert_eq!(data.level, Catalog::MAX_LEVEL);
        let sets = catalog.get_level(data.level).unwrap().len();
        assert!(data.current_set < sets);
    }
}
