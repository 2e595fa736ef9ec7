//! Core domain types for FitHome.
//!
//! This module defines the fundamental types used throughout the system:
//! - Exercises and their classification
//! - Workout definitions and finished-workout summaries
//! - Cumulative user statistics and the user profile

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ============================================================================
// Exercise Types
// ============================================================================

/// Body area an exercise belongs to
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum ExerciseCategory {
    Chest,
    Legs,
    Abs,
    FullBody,
    Arms,
}

impl ExerciseCategory {
    pub fn all() -> &'static [ExerciseCategory] {
        &[
            ExerciseCategory::Chest,
            ExerciseCategory::Legs,
            ExerciseCategory::Abs,
            ExerciseCategory::FullBody,
            ExerciseCategory::Arms,
        ]
    }

    pub fn label(&self) -> &'static str {
        match self {
            ExerciseCategory::Chest => "Chest",
            ExerciseCategory::Legs => "Legs",
            ExerciseCategory::Abs => "Abs",
            ExerciseCategory::FullBody => "Full Body",
            ExerciseCategory::Arms => "Arms",
        }
    }
}

impl fmt::Display for ExerciseCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ExerciseCategory {
    type Err = crate::Error;

    /// Accepts the display label or its kebab/compact form, case-insensitively
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .to_lowercase()
            .chars()
            .filter(|c| c.is_alphanumeric())
            .collect();
        ExerciseCategory::all()
            .iter()
            .copied()
            .find(|c| {
                c.label()
                    .to_lowercase()
                    .chars()
                    .filter(|ch| ch.is_alphanumeric())
                    .collect::<String>()
                    == normalized
            })
            .ok_or_else(|| crate::Error::Catalog(format!("Unknown category: {}", s)))
    }
}

/// Difficulty label of an exercise
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
}

impl Difficulty {
    pub fn all() -> &'static [Difficulty] {
        &[
            Difficulty::Beginner,
            Difficulty::Intermediate,
            Difficulty::Advanced,
        ]
    }

    pub fn label(&self) -> &'static str {
        match self {
            Difficulty::Beginner => "Beginner",
            Difficulty::Intermediate => "Intermediate",
            Difficulty::Advanced => "Advanced",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Difficulty {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Difficulty::all()
            .iter()
            .copied()
            .find(|d| d.label().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| crate::Error::Catalog(format!("Unknown difficulty: {}", s)))
    }
}

/// An exercise definition from the static catalog
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Exercise {
    pub id: u32,
    pub name: String,
    pub category: ExerciseCategory,
    pub difficulty: Difficulty,
    pub duration_seconds: u32,
    pub target_muscles: Vec<String>,
    pub description: String,
    pub instructions: Vec<String>,
    pub image_ref: String,
}

// ============================================================================
// Workout Types
// ============================================================================

/// An ordered list of exercises to run as one session
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct WorkoutDefinition {
    pub name: String,
    pub exercises: Vec<Exercise>,
}

/// Per-exercise result inside a workout summary
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ExerciseOutcome {
    pub id: u32,
    pub name: String,
    pub completed: bool,
}

/// Record of a finished workout, appended to the user's history
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutSummary {
    pub name: String,
    pub date: DateTime<Utc>,
    /// Wall-clock seconds from session start to completion
    pub duration: u64,
    pub exercises_completed: u32,
    pub total_exercises: u32,
    pub calories_estimated: u32,
    pub exercises: Vec<ExerciseOutcome>,
}

// ============================================================================
// User Types
// ============================================================================

/// Cumulative statistics across every completed workout
#[derive(Clone, Debug, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct UserStats {
    pub total_workouts: u32,
    /// Seconds
    pub total_time: u64,
    pub total_calories: u64,
    pub current_streak: u32,
    /// Oldest first
    pub history: Vec<WorkoutSummary>,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum Gender {
    Male,
    Female,
    Other,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum FitnessLevel {
    Beginner,
    Intermediate,
    Advanced,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum FitnessGoal {
    LoseWeight,
    BuildMuscle,
    StayFit,
}

/// User profile, edited independently of the statistics
#[derive(Clone, Debug, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct UserProfile {
    pub name: Option<String>,
    pub age: Option<u32>,
    pub gender: Option<Gender>,
    /// Kilograms
    pub weight: Option<f64>,
    /// Centimetres
    pub height: Option<f64>,
    pub fitness_level: Option<FitnessLevel>,
    pub goal: Option<FitnessGoal>,
}

/// FromStr and Display over the same kebab-case names serde uses
macro_rules! kebab_names {
    ($ty:ty, $what:literal, [$($text:literal => $variant:ident),+ $(,)?]) => {
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                let name = match self {
                    $(Self::$variant => $text,)+
                };
                f.write_str(name)
            }
        }

        impl FromStr for $ty {
            type Err = crate::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.trim().to_lowercase().as_str() {
                    $($text => Ok(Self::$variant),)+
                    other => Err(crate::Error::Other(format!(
                        concat!("Unknown ", $what, ": {}"),
                        other
                    ))),
                }
            }
        }
    };
}

kebab_names!(Gender, "gender", [
    "male" => Male,
    "female" => Female,
    "other" => Other,
]);

kebab_names!(FitnessLevel, "fitness level", [
    "beginner" => Beginner,
    "intermediate" => Intermediate,
    "advanced" => Advanced,
]);

kebab_names!(FitnessGoal, "goal", [
    "lose-weight" => LoseWeight,
    "build-muscle" => BuildMuscle,
    "stay-fit" => StayFit,
]);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_parses_labels_and_kebab() {
        assert_eq!(
            "Full Body".parse::<ExerciseCategory>().unwrap(),
            ExerciseCategory::FullBody
        );
        assert_eq!(
            "full-body".parse::<ExerciseCategory>().unwrap(),
            ExerciseCategory::FullBody
        );
        assert_eq!("ABS".parse::<ExerciseCategory>().unwrap(), ExerciseCategory::Abs);
        assert!("cardio".parse::<ExerciseCategory>().is_err());
    }

    #[test]
    fn test_difficulty_parse() {
        assert_eq!("beginner".parse::<Difficulty>().unwrap(), Difficulty::Beginner);
        assert!("expert".parse::<Difficulty>().is_err());
    }

    #[test]
    fn test_stats_json_uses_camel_case_keys() {
        let json = serde_json::to_value(UserStats::default()).unwrap();
        assert_eq!(json["totalWorkouts"], 0);
        assert_eq!(json["currentStreak"], 0);
        assert!(json["history"].as_array().unwrap().is_empty());
    }

    #[test]
    fn test_profile_missing_fields_default() {
        let profile: UserProfile = serde_json::from_str(r#"{"age": 31}"#).unwrap();
        assert_eq!(profile.age, Some(31));
        assert_eq!(profile.weight, None);
        assert_eq!(profile.goal, None);
    }

    #[test]
    fn test_profile_enum_wire_names() {
        let profile = UserProfile {
            goal: Some(FitnessGoal::BuildMuscle),
            fitness_level: Some(FitnessLevel::Advanced),
            ..Default::default()
        };
        let json = serde_json::to_value(&profile).unwrap();
        assert_eq!(json["goal"], "build-muscle");
        assert_eq!(json["fitnessLevel"], "advanced");
        assert_eq!("stay-fit".parse::<FitnessGoal>().unwrap(), FitnessGoal::StayFit);
        assert_eq!(FitnessGoal::BuildMuscle.to_string(), "build-muscle");
        assert_eq!(Gender::Other.to_string(), "other");
    }
}
