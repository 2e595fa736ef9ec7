//! Built-in exercise library and workout templates.
//!
//! The catalog is static: exercises and templates are defined here and never
//! change at runtime. Workouts are assembled from templates by id.

use crate::types::*;
use crate::{Error, ExerciseFilter, Result};
use once_cell::sync::Lazy;
use std::collections::HashSet;

/// Cached default catalog - built once and reused across all operations
static DEFAULT_CATALOG: Lazy<Catalog> = Lazy::new(build_default_catalog);

/// Get a reference to the cached default catalog
pub fn get_default_catalog() -> &'static Catalog {
    &DEFAULT_CATALOG
}

/// Where a template is offered on the dashboard
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TemplateKind {
    Category,
    QuickStart,
}

/// A named, ordered selection of catalog exercises
#[derive(Clone, Debug)]
pub struct WorkoutTemplate {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub duration_label: &'static str,
    pub difficulty_label: &'static str,
    pub kind: TemplateKind,
    pub exercise_ids: &'static [u32],
}

/// The complete exercise library plus workout templates
#[derive(Clone, Debug)]
pub struct Catalog {
    pub exercises: Vec<Exercise>,
    pub templates: Vec<WorkoutTemplate>,
}

impl Catalog {
    pub fn exercise(&self, id: u32) -> Option<&Exercise> {
        self.exercises.iter().find(|e| e.id == id)
    }

    pub fn template(&self, id: &str) -> Option<&WorkoutTemplate> {
        self.templates.iter().find(|t| t.id == id)
    }

    pub fn templates_of(&self, kind: TemplateKind) -> impl Iterator<Item = &WorkoutTemplate> {
        self.templates.iter().filter(move |t| t.kind == kind)
    }

    /// Exercises passing `filter`, in catalog order
    pub fn filter<'a>(&'a self, filter: &ExerciseFilter) -> Vec<&'a Exercise> {
        filter.apply(&self.exercises)
    }

    /// Build the workout for a dashboard category or quick-start template
    pub fn workout(&self, template_id: &str) -> Result<WorkoutDefinition> {
        let template = self
            .template(template_id)
            .ok_or_else(|| Error::Catalog(format!("Unknown workout: {}", template_id)))?;
        self.build_workout(template.name, template.exercise_ids)
    }

    /// Build an ad-hoc workout from exercise ids, keeping the given order
    pub fn build_workout(&self, name: &str, exercise_ids: &[u32]) -> Result<WorkoutDefinition> {
        let mut seen = HashSet::new();
        let mut exercises = Vec::with_capacity(exercise_ids.len());
        for id in exercise_ids {
            if !seen.insert(*id) {
                return Err(Error::Catalog(format!(
                    "Exercise {} listed twice in workout '{}'",
                    id, name
                )));
            }
            let exercise = self
                .exercise(*id)
                .ok_or_else(|| Error::Catalog(format!("Unknown exercise id: {}", id)))?;
            exercises.push(exercise.clone());
        }
        if exercises.is_empty() {
            return Err(Error::Catalog(format!("Workout '{}' has no exercises", name)));
        }

        tracing::debug!("Built workout '{}' with {} exercises", name, exercises.len());
        Ok(WorkoutDefinition {
            name: name.to_string(),
            exercises,
        })
    }

    /// Validate the catalog for consistency
    ///
    /// Returns a list of validation errors (empty if valid)
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        let mut ids = HashSet::new();
        for exercise in &self.exercises {
            if !ids.insert(exercise.id) {
                errors.push(format!("Duplicate exercise id {}", exercise.id));
            }
            if exercise.duration_seconds == 0 {
                errors.push(format!("Exercise '{}' has zero duration", exercise.name));
            }
            if exercise.instructions.is_empty() {
                errors.push(format!("Exercise '{}' has no instructions", exercise.name));
            }
        }

        let mut template_ids = HashSet::new();
        for template in &self.templates {
            if !template_ids.insert(template.id) {
                errors.push(format!("Duplicate template id '{}'", template.id));
            }
            if template.exercise_ids.is_empty() {
                errors.push(format!("Template '{}' has no exercises", template.id));
            }
            let mut seen = HashSet::new();
            for id in template.exercise_ids {
                if !ids.contains(id) {
                    errors.push(format!(
                        "Template '{}' references unknown exercise {}",
                        template.id, id
                    ));
                }
                if !seen.insert(id) {
                    errors.push(format!(
                        "Template '{}' lists exercise {} twice",
                        template.id, id
                    ));
                }
            }
        }

        errors
    }
}

#[allow(clippy::too_many_arguments)]
fn exercise(
    id: u32,
    name: &str,
    category: ExerciseCategory,
    difficulty: Difficulty,
    duration_seconds: u32,
    target_muscles: &[&str],
    description: &str,
    instructions: &[&str],
    image_ref: &str,
) -> Exercise {
    Exercise {
        id,
        name: name.into(),
        category,
        difficulty,
        duration_seconds,
        target_muscles: target_muscles.iter().map(|m| m.to_string()).collect(),
        description: description.into(),
        instructions: instructions.iter().map(|i| i.to_string()).collect(),
        image_ref: image_ref.into(),
    }
}

/// Builds the default catalog with built-in exercises and templates
///
/// **Note**: For production use, prefer `get_default_catalog()` which returns a
/// cached reference.
pub fn build_default_catalog() -> Catalog {
    use Difficulty::*;
    use ExerciseCategory::*;

    // ========================================================================
    // Exercises
    // ========================================================================

    let exercises = vec![
        exercise(
            1,
            "Push-ups",
            Chest,
            Beginner,
            30,
            &["Chest", "Triceps", "Shoulders"],
            "Classic upper body exercise targeting chest and arms",
            &[
                "Start in a high plank with hands under shoulders",
                "Lower your chest until it nearly touches the floor",
                "Press back up while keeping your body in a straight line",
            ],
            "photo-1571019613454-1cb2f99b2d8b",
        ),
        exercise(
            2,
            "Squats",
            Legs,
            Beginner,
            45,
            &["Quadriceps", "Glutes", "Hamstrings"],
            "Fundamental lower body exercise for strength and mobility",
            &[
                "Stand with feet shoulder-width apart",
                "Sit your hips back and down as if into a chair",
                "Drive through your heels to stand back up",
            ],
            "photo-1574680096145-d05b474e2155",
        ),
        exercise(
            3,
            "Plank",
            Abs,
            Intermediate,
            60,
            &["Core", "Abs", "Back"],
            "Isometric exercise for core stability and strength",
            &[
                "Rest on your forearms with elbows under shoulders",
                "Keep your body straight from head to heels",
                "Brace your core and breathe steadily",
            ],
            "photo-1566241142559-40e1dab266c6",
        ),
        exercise(
            4,
            "Mountain Climbers",
            FullBody,
            Intermediate,
            30,
            &["Core", "Legs", "Cardio"],
            "High-intensity cardio exercise engaging multiple muscle groups",
            &[
                "Start in a high plank",
                "Drive one knee toward your chest",
                "Switch legs quickly, keeping hips level",
            ],
            "photo-1598971639058-fab3c3109a00",
        ),
        exercise(
            5,
            "Burpees",
            FullBody,
            Advanced,
            20,
            &["Full Body", "Cardio"],
            "Full-body explosive exercise for maximum calorie burn",
            &[
                "Squat down and place your hands on the floor",
                "Jump your feet back into a plank",
                "Jump your feet forward and leap up with arms overhead",
            ],
            "photo-1599058917212-d750089bc07e",
        ),
        exercise(
            6,
            "Lunges",
            Legs,
            Beginner,
            40,
            &["Quadriceps", "Glutes", "Calves"],
            "Single-leg exercise for lower body strength and balance",
            &[
                "Step forward with one leg",
                "Lower until both knees are bent at 90 degrees",
                "Return to standing and alternate legs",
            ],
            "photo-1434682881908-b43d0467b798",
        ),
        exercise(
            7,
            "Tricep Dips",
            Arms,
            Intermediate,
            30,
            &["Triceps", "Shoulders"],
            "Bodyweight dip using a sturdy chair or step",
            &[
                "Sit on the edge of a chair and grip it beside your hips",
                "Slide forward and bend your elbows to lower your body",
                "Straighten your arms to rise back up",
            ],
            "photo-1530822847156-5df684ec5ee1",
        ),
        exercise(
            8,
            "Diamond Push-ups",
            Arms,
            Advanced,
            30,
            &["Triceps", "Chest"],
            "Close-grip variation that shifts the load onto the triceps",
            &[
                "Form a diamond with your thumbs and index fingers",
                "Lower your chest toward your hands",
                "Press up keeping elbows close to your sides",
            ],
            "photo-1598266663439-2056e6900339",
        ),
        exercise(
            9,
            "Crunches",
            Abs,
            Beginner,
            45,
            &["Abs"],
            "Basic abdominal curl for the upper abs",
            &[
                "Lie on your back with knees bent",
                "Curl your shoulders off the floor",
                "Lower slowly with control",
            ],
            "photo-1571019614242-c5c5dee9f50b",
        ),
        exercise(
            10,
            "Glute Bridges",
            Legs,
            Beginner,
            40,
            &["Glutes", "Hamstrings"],
            "Hip extension from the floor to strengthen the posterior chain",
            &[
                "Lie on your back with feet flat and knees bent",
                "Squeeze your glutes and lift your hips",
                "Hold briefly, then lower",
            ],
            "photo-1518611012118-696072aa579a",
        ),
        exercise(
            11,
            "Jumping Jacks",
            FullBody,
            Beginner,
            60,
            &["Full Body", "Cardio"],
            "Rhythmic warm-up that raises the heart rate",
            &[
                "Stand with feet together and arms at your sides",
                "Jump your feet out while raising your arms overhead",
                "Jump back to the start and repeat",
            ],
            "photo-1601422407692-ec4eeec1d9b3",
        ),
        exercise(
            12,
            "Bicycle Crunches",
            Abs,
            Intermediate,
            45,
            &["Abs", "Obliques"],
            "Rotating crunch that works the obliques",
            &[
                "Lie on your back with hands behind your head",
                "Bring one elbow toward the opposite knee",
                "Alternate sides in a pedalling motion",
            ],
            "photo-1541534741688-6078c6bfb5c5",
        ),
        exercise(
            13,
            "Wall Sit",
            Legs,
            Intermediate,
            45,
            &["Quadriceps", "Glutes"],
            "Isometric hold against a wall for leg endurance",
            &[
                "Lean your back against a wall",
                "Slide down until your knees are at 90 degrees",
                "Hold the position",
            ],
            "photo-1434596922112-19c563067271",
        ),
        exercise(
            14,
            "Arm Circles",
            Arms,
            Beginner,
            30,
            &["Shoulders"],
            "Gentle shoulder mobility drill",
            &[
                "Extend your arms out to the sides",
                "Make small circles, gradually growing larger",
                "Reverse direction halfway through",
            ],
            "photo-1517836357463-d25dfeac3438",
        ),
        exercise(
            15,
            "Child's Pose",
            FullBody,
            Beginner,
            60,
            &["Back", "Hips"],
            "Resting stretch for the back and hips",
            &[
                "Kneel and sit back on your heels",
                "Fold forward and extend your arms in front",
                "Breathe deeply and relax",
            ],
            "photo-1544367567-0f2fcb009e0b",
        ),
        exercise(
            16,
            "Cat-Cow Stretch",
            FullBody,
            Beginner,
            45,
            &["Spine", "Core"],
            "Flowing spinal mobility on hands and knees",
            &[
                "Start on hands and knees",
                "Arch your back while lifting your head",
                "Round your spine while tucking your chin",
            ],
            "photo-1506126613408-eca07ce68773",
        ),
    ];

    // ========================================================================
    // Workout Templates
    // ========================================================================

    let templates = vec![
        WorkoutTemplate {
            id: "full-body",
            name: "Full Body",
            description: "Complete workout targeting all muscle groups",
            duration_label: "20-30 mins",
            difficulty_label: "Intermediate",
            kind: TemplateKind::Category,
            exercise_ids: &[11, 2, 1, 4, 6, 3, 5],
        },
        WorkoutTemplate {
            id: "chest",
            name: "Chest & Arms",
            description: "Upper body focus with push-up variations",
            duration_label: "15-20 mins",
            difficulty_label: "Beginner",
            kind: TemplateKind::Category,
            exercise_ids: &[14, 1, 7, 8],
        },
        WorkoutTemplate {
            id: "abs",
            name: "Core & Abs",
            description: "Strengthen your core with targeted exercises",
            duration_label: "10-15 mins",
            difficulty_label: "All Levels",
            kind: TemplateKind::Category,
            exercise_ids: &[9, 12, 3, 4],
        },
        WorkoutTemplate {
            id: "legs",
            name: "Legs & Glutes",
            description: "Lower body strength and toning",
            duration_label: "20-25 mins",
            difficulty_label: "Intermediate",
            kind: TemplateKind::Category,
            exercise_ids: &[2, 6, 10, 13],
        },
        WorkoutTemplate {
            id: "morning-energy",
            name: "Morning Energy",
            description: "Full Body",
            duration_label: "7 mins",
            difficulty_label: "Beginner",
            kind: TemplateKind::QuickStart,
            exercise_ids: &[11, 2, 1, 4],
        },
        WorkoutTemplate {
            id: "lunch-break-hiit",
            name: "Lunch Break HIIT",
            description: "HIIT",
            duration_label: "12 mins",
            difficulty_label: "Advanced",
            kind: TemplateKind::QuickStart,
            exercise_ids: &[5, 4, 11, 6, 12],
        },
        WorkoutTemplate {
            id: "evening-stretch",
            name: "Evening Stretch",
            description: "Flexibility",
            duration_label: "10 mins",
            difficulty_label: "Beginner",
            kind: TemplateKind::QuickStart,
            exercise_ids: &[14, 16, 15],
        },
    ];

    Catalog {
        exercises,
        templates,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_loads() {
        let catalog = build_default_catalog();
        assert_eq!(catalog.exercises.len(), 16);
        assert_eq!(catalog.templates_of(TemplateKind::Category).count(), 4);
        assert_eq!(catalog.templates_of(TemplateKind::QuickStart).count(), 3);
    }

    #[test]
    fn test_default_catalog_validates() {
        let catalog = build_default_catalog();
        let errors = catalog.validate();
        assert!(
            errors.is_empty(),
            "Default catalog has validation errors: {:?}",
            errors
        );
    }

    #[test]
    fn test_workout_from_template_keeps_order() {
        let catalog = get_default_catalog();
        let workout = catalog.workout("legs").unwrap();
        assert_eq!(workout.name, "Legs & Glutes");
        let ids: Vec<u32> = workout.exercises.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![2, 6, 10, 13]);
    }

    #[test]
    fn test_unknown_template_is_error() {
        let catalog = get_default_catalog();
        assert!(matches!(catalog.workout("yoga"), Err(Error::Catalog(_))));
    }

    #[test]
    fn test_build_workout_rejects_duplicates_and_unknown() {
        let catalog = get_default_catalog();
        assert!(catalog.build_workout("Custom", &[1, 1]).is_err());
        assert!(catalog.build_workout("Custom", &[999]).is_err());
        assert!(catalog.build_workout("Custom", &[]).is_err());

        let custom = catalog.build_workout("Custom", &[3, 1]).unwrap();
        assert_eq!(custom.exercises[0].name, "Plank");
    }

    #[test]
    fn test_validate_flags_broken_template() {
        let mut catalog = build_default_catalog();
        catalog.templates.push(WorkoutTemplate {
            id: "broken",
            name: "Broken",
            description: "",
            duration_label: "",
            difficulty_label: "",
            kind: TemplateKind::QuickStart,
            exercise_ids: &[42],
        });
        let errors = catalog.validate();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("unknown exercise 42"));
    }
}
