//! Sharing a finished workout.

use crate::{Result, WorkoutSummary};

pub const SHARE_TITLE: &str = "Workout Complete!";

/// A platform capability that can publish a short text
pub trait ShareTarget {
    fn share(&mut self, title: &str, text: &str) -> Result<()>;
}

/// `"Mm Ss"` rendering of a duration in seconds
pub fn format_duration(seconds: u64) -> String {
    format!("{}m {}s", seconds / 60, seconds % 60)
}

pub fn share_text(summary: &WorkoutSummary) -> String {
    format!(
        "Just completed \"{}\" - {}/{} exercises, {} calories burned in {}!",
        summary.name,
        summary.exercises_completed,
        summary.total_exercises,
        summary.calories_estimated,
        format_duration(summary.duration)
    )
}

/// Share through `target` if there is one; returns whether anything was shared
pub fn share(target: Option<&mut dyn ShareTarget>, summary: &WorkoutSummary) -> Result<bool> {
    match target {
        Some(target) => {
            target.share(SHARE_TITLE, &share_text(summary))?;
            Ok(true)
        }
        None => {
            tracing::debug!("No share target available");
            Ok(false)
        }
    }
}
