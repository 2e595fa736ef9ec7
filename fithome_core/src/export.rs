//! CSV export of the workout history.

use crate::{Result, UserStats, WorkoutSummary};
use std::fs::File;
use std::path::Path;

/// A row in the CSV output
#[derive(Debug, serde::Serialize)]
struct CsvRow {
    name: String,
    date: String,
    duration: u64,
    exercises_completed: u32,
    total_exercises: u32,
    calories_estimated: u32,
    skipped: String,
}

impl From<&WorkoutSummary> for CsvRow {
    fn from(summary: &WorkoutSummary) -> Self {
        let skipped: Vec<&str> = summary
            .exercises
            .iter()
            .filter(|e| !e.completed)
            .map(|e| e.name.as_str())
            .collect();
        CsvRow {
            name: summary.name.clone(),
            date: summary.date.to_rfc3339(),
            duration: summary.duration,
            exercises_completed: summary.exercises_completed,
            total_exercises: summary.total_exercises,
            calories_estimated: summary.calories_estimated,
            skipped: skipped.join(";"),
        }
    }
}

/// Write every workout in `stats.history` to `path`, replacing the file
///
/// Returns the number of rows written.
pub fn export_history_csv(stats: &UserStats, path: &Path) -> Result<usize> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let file = File::create(path)?;
    let mut writer = csv::WriterBuilder::new()
        .has_headers(true)
        .from_writer(file);

    for summary in &stats.history {
        writer.serialize(CsvRow::from(summary))?;
    }

    // Headers are only emitted with the first row; write them for an empty history
    if stats.history.is_empty() {
        writer.write_record([
            "name",
            "date",
            "duration",
            "exercises_completed",
            "total_exercises",
            "calories_estimated",
            "skipped",
        ])?;
    }

    writer.flush()?;
    let file = writer
        .into_inner()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e.to_string()))?;
    file.sync_all()?;

    tracing::info!("Exported {} workouts to {:?}", stats.history.len(), path);
    Ok(stats.history.len())
}
