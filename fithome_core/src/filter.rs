//! Exercise library search and filtering.

use crate::{Difficulty, Exercise, ExerciseCategory, Result};

/// Combined search / category / difficulty filter
///
/// `None` for category or difficulty means "all". An empty search term
/// matches everything.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ExerciseFilter {
    pub search: String,
    pub category: Option<ExerciseCategory>,
    pub difficulty: Option<Difficulty>,
}

impl ExerciseFilter {
    /// Build a filter from user-facing strings where `"all"` lifts a constraint
    pub fn parse(search: &str, category: &str, difficulty: &str) -> Result<Self> {
        Ok(Self {
            search: search.to_string(),
            category: parse_all_or(category)?,
            difficulty: parse_all_or(difficulty)?,
        })
    }

    pub fn matches(&self, exercise: &Exercise) -> bool {
        let term = self.search.to_lowercase();
        let matches_search = exercise.name.to_lowercase().contains(&term)
            || exercise.description.to_lowercase().contains(&term);
        let matches_category = self.category.map_or(true, |c| exercise.category == c);
        let matches_difficulty = self.difficulty.map_or(true, |d| exercise.difficulty == d);

        matches_search && matches_category && matches_difficulty
    }

    pub fn apply<'a>(&self, exercises: &'a [Exercise]) -> Vec<&'a Exercise> {
        exercises.iter().filter(|e| self.matches(e)).collect()
    }

    /// Reset every constraint ("Clear Filters")
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn is_cleared(&self) -> bool {
        self.search.is_empty() && self.category.is_none() && self.difficulty.is_none()
    }
}

fn parse_all_or<T>(value: &str) -> Result<Option<T>>
where
    T: std::str::FromStr<Err = crate::Error>,
{
    let value = value.trim();
    if value.is_empty() || value.eq_ignore_ascii_case("all") {
        Ok(None)
    } else {
        value.parse().map(Some)
    }
}
