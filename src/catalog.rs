use thiserror::Error;

const BEGINNER: &str = include_str!("../assets/levels/beginner.txt");
const INTERMEDIATE: &str = include_str!("../assets/levels/intermediate.txt");
const EXPERT: &str = include_str!("../assets/levels/expert.txt");

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("unknown level {0} (levels 1-3 are defined)")]
    UnknownLevel(u32),
}

/// Built-in practice content: one target per line, three difficulty levels,
/// parsed once from embedded assets. Immutable at runtime; user-added
/// lessons live in the progress record instead.
pub struct Catalog {
    levels: Vec<Vec<String>>,
}

impl Catalog {
    pub const MAX_LEVEL: u32 = 3;

    pub fn load() -> Self {
        Self {
            levels: vec![parse(BEGINNER), parse(INTERMEDIATE), parse(EXPERT)],
        }
    }

    pub fn get_level(&self, level: u32) -> Result<&[String], CatalogError> {
        if level == 0 {
            return Err(CatalogError::UnknownLevel(level));
        }
        self.levels
            .get((level - 1) as usize)
            .map(Vec::as_slice)
            .ok_or(CatalogError::UnknownLevel(level))
    }

    pub fn level_name(level: u32) -> &'static str {
        match level {
            1 => "Beginner",
            2 => "Intermediate",
            3 => "Expert",
            _ => "Unknown",
        }
    }

    /// Targets of the highest level; timed tests sample from these.
    pub fn hardest(&self) -> &[String] {
        self.levels.last().map(Vec::as_slice).unwrap_or(&[])
    }
}

fn parse(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_defined_levels_have_content() {
        let catalog = Catalog::load();
        for level in 1..=Catalog::MAX_LEVEL {
            let sets = catalog.get_level(level).unwrap();
            assert!(!sets.is_empty(), "level {level} is empty");
        }
    }

    #[test]
    fn unknown_levels_are_rejected() {
        let catalog = Catalog::load();
        assert_eq!(catalog.get_level(0), Err(CatalogError::UnknownLevel(0)));
        assert_eq!(catalog.get_level(4), Err(CatalogError::UnknownLevel(4)));
    }

    #[test]
    fn targets_are_trimmed_single_lines() {
        let catalog = Catalog::load();
        for level in 1..=Catalog::MAX_LEVEL {
            for target in catalog.get_level(level).unwrap() {
                assert_eq!(target, target.trim());
                assert!(!target.contains('\n'));
            }
        }
    }

    #[test]
    fn level_names() {
        assert_eq!(Catalog::level_name(1), "Beginner");
        assert_eq!(Catalog::level_name(2), "Intermediate");
        assert_eq!(Catalog::level_name(3), "Expert");
    }

    #[test]
    fn hardest_is_the_top_level() {
        let catalog = Catalog::load();
        assert_eq!(catalog.hardest(), catalog.get_level(3).unwrap());
    }
}
