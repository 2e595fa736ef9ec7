//! Presentation shell: tab selection and text rendering of each view.
//!
//! Every render function returns the complete view as a `String`; the
//! binary decides where it goes.

use crate::catalog::{Catalog, TemplateKind};
use crate::session::{SessionPhase, WorkoutSession, REST_SECONDS};
use crate::share::format_duration;
use crate::stats::{achievements, weekly_activity, RECENT_WORKOUTS};
use crate::timer::format_clock;
use crate::{Error, ExerciseFilter, UserProfile, UserStats, WorkoutSummary};
use chrono::NaiveDate;
use std::fmt::{self, Write};
use std::str::FromStr;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Tab {
    #[default]
    Dashboard,
    Exercises,
    Progress,
    Profile,
}

impl Tab {
    pub fn all() -> &'static [Tab] {
        &[Tab::Dashboard, Tab::Exercises, Tab::Progress, Tab::Profile]
    }

    pub fn id(&self) -> &'static str {
        match self {
            Tab::Dashboard => "dashboard",
            Tab::Exercises => "exercises",
            Tab::Progress => "progress",
            Tab::Profile => "profile",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Tab::Dashboard => "Dashboard",
            Tab::Exercises => "Exercises",
            Tab::Progress => "Progress",
            Tab::Profile => "Profile",
        }
    }
}

impl fmt::Display for Tab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Tab {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Tab::all()
            .iter()
            .copied()
            .find(|t| t.id().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| Error::Other(format!("Unknown tab: {}", s)))
    }
}

/// One-line tab bar with the active tab bracketed
pub fn render_tab_bar(active: Tab) -> String {
    Tab::all()
        .iter()
        .map(|tab| {
            if *tab == active {
                format!("[{}]", tab.label())
            } else {
                format!(" {} ", tab.label())
            }
        })
        .collect::<Vec<_>>()
        .join("  ")
}

/// Collect a view written through `fmt::Write`
fn render(write: impl FnOnce(&mut String) -> fmt::Result) -> String {
    let mut out = String::new();
    // Writing into a String never fails
    let _ = write(&mut out);
    out
}

fn header(out: &mut String, active: Tab) -> fmt::Result {
    writeln!(out, "FitHome - No Equipment, No Excuses")?;
    writeln!(out, "{}", render_tab_bar(active))?;
    writeln!(out)
}

fn hours(seconds: u64) -> String {
    format!("{:.1} hours", seconds as f64 / 3600.0)
}

pub fn render_dashboard(catalog: &Catalog, stats: &UserStats, profile: &UserProfile) -> String {
    render(|out| write_dashboard(out, catalog, stats, profile))
}

fn write_dashboard(
    out: &mut String,
    catalog: &Catalog,
    stats: &UserStats,
    profile: &UserProfile,
) -> fmt::Result {
    header(out, Tab::Dashboard)?;

    if *profile == UserProfile::default() && stats.total_workouts == 0 {
        writeln!(out, "Ready to Get Fit?")?;
    } else {
        writeln!(out, "Welcome back, {}!", profile.display_name())?;
        writeln!(
            out,
            "  Workouts: {}   Streak: {}   Calories: {}",
            stats.total_workouts, stats.current_streak, stats.total_calories
        )?;
    }
    writeln!(out)?;

    writeln!(out, "Quick Start")?;
    for template in catalog.templates_of(TemplateKind::QuickStart) {
        writeln!(
            out,
            "  {:<18} {:<10} {:<12} (fithome workout {})",
            template.name, template.duration_label, template.description, template.id
        )?;
    }
    writeln!(out)?;

    writeln!(out, "Workout Categories")?;
    for template in catalog.templates_of(TemplateKind::Category) {
        writeln!(
            out,
            "  {:<18} {:<10} {:<12} (fithome workout {})",
            template.name, template.duration_label, template.difficulty_label, template.id
        )?;
        writeln!(out, "    {}", template.description)?;
    }
    Ok(())
}

pub fn render_exercises(catalog: &Catalog, filter: &ExerciseFilter) -> String {
    render(|out| write_exercises(out, catalog, filter))
}

fn write_exercises(out: &mut String, catalog: &Catalog, filter: &ExerciseFilter) -> fmt::Result {
    header(out, Tab::Exercises)?;

    let found = catalog.filter(filter);
    writeln!(
        out,
        "Exercise Library ({} of {})",
        found.len(),
        catalog.exercises.len()
    )?;
    writeln!(out)?;

    if found.is_empty() {
        writeln!(out, "No exercises found")?;
        writeln!(out, "Try adjusting your filters. Clear Filters: fithome exercises")?;
        return Ok(());
    }

    for exercise in found {
        writeln!(
            out,
            "  #{:<3} {:<20} {:<10} {:<13} {}s",
            exercise.id,
            exercise.name,
            exercise.category,
            exercise.difficulty,
            exercise.duration_seconds
        )?;
        writeln!(out, "       {}", exercise.description)?;
        writeln!(out, "       Targets: {}", exercise.target_muscles.join(", "))?;
    }
    Ok(())
}

pub fn render_progress(stats: &UserStats, today: NaiveDate) -> String {
    render(|out| write_progress(out, stats, today))
}

fn write_progress(out: &mut String, stats: &UserStats, today: NaiveDate) -> fmt::Result {
    header(out, Tab::Progress)?;

    writeln!(out, "Overview")?;
    writeln!(out, "  Total workouts: {}", stats.total_workouts)?;
    writeln!(out, "  Total time:     {}", hours(stats.total_time))?;
    writeln!(out, "  Current streak: {}", stats.current_streak)?;
    writeln!(out, "  Calories:       {}", stats.total_calories)?;
    if let Some(avg) = stats.average_workout_seconds() {
        writeln!(out, "  Average:        {} mins", avg / 60)?;
    }
    writeln!(out)?;

    writeln!(out, "Weekly Activity")?;
    for day in weekly_activity(&stats.history, today) {
        let bar = "#".repeat(day.workouts as usize);
        writeln!(
            out,
            "  {} {:<5} {:>3} min",
            day.weekday_label(),
            bar,
            day.minutes
        )?;
    }
    writeln!(out)?;

    writeln!(out, "Recent Workouts")?;
    if stats.history.is_empty() {
        writeln!(out, "  No workouts yet")?;
    }
    for workout in stats.recent(RECENT_WORKOUTS) {
        writeln!(
            out,
            "  {:<18} {}  {}  {}/{} exercises  {} kcal",
            workout.name,
            workout.date.format("%Y-%m-%d"),
            format_duration(workout.duration),
            workout.exercises_completed,
            workout.total_exercises,
            workout.calories_estimated
        )?;
    }
    writeln!(out)?;

    writeln!(out, "Achievements")?;
    for achievement in achievements() {
        let status = if achievement.unlocked(stats) {
            "Unlocked!".to_string()
        } else {
            let (current, target) = achievement.progress(stats);
            format!("{}/{}", current, target)
        };
        writeln!(
            out,
            "  {} {:<16} {:<30} {}",
            achievement.icon, achievement.name, achievement.description, status
        )?;
    }
    Ok(())
}

fn or_unset<T: fmt::Display>(value: Option<T>) -> String {
    value.map_or_else(|| "-".to_string(), |v| v.to_string())
}

pub fn render_profile(profile: &UserProfile) -> String {
    render(|out| write_profile(out, profile))
}

fn write_profile(out: &mut String, profile: &UserProfile) -> fmt::Result {
    header(out, Tab::Profile)?;

    writeln!(out, "Personal Information")?;
    writeln!(out, "  Name:          {}", or_unset(profile.name.as_deref()))?;
    writeln!(out, "  Age:           {}", or_unset(profile.age))?;
    writeln!(out, "  Weight (kg):   {}", or_unset(profile.weight))?;
    writeln!(out, "  Height (cm):   {}", or_unset(profile.height))?;
    writeln!(out, "  Gender:        {}", or_unset(profile.gender))?;
    writeln!(out, "  Fitness level: {}", or_unset(profile.fitness_level))?;
    writeln!(out, "  Goal:          {}", or_unset(profile.goal))?;
    Ok(())
}

/// Live view of a running session
pub fn render_session(session: &WorkoutSession) -> String {
    render(|out| write_session(out, session))
}

fn write_session(out: &mut String, session: &WorkoutSession) -> fmt::Result {
    let total = session.definition().exercises.len();

    match session.phase() {
        SessionPhase::InProgress { index } => {
            let timer = session.exercise_timer();
            writeln!(
                out,
                "{}  Exercise {} of {}  {:.0}% Complete",
                session.definition().name,
                index + 1,
                total,
                session.progress_percent()
            )?;
            if let Some(exercise) = session.current_exercise() {
                writeln!(
                    out,
                    "  {} ({} - {})  {}{}",
                    exercise.name,
                    exercise.category,
                    exercise.difficulty,
                    format_clock(timer.remaining()),
                    if timer.is_running() { "" } else { " [paused]" }
                )?;
                for (i, step) in exercise.instructions.iter().enumerate() {
                    writeln!(out, "    {}. {}", i + 1, step)?;
                }
            }
            let upcoming = session.upcoming();
            if !upcoming.is_empty() {
                let names: Vec<String> = upcoming
                    .iter()
                    .map(|e| format!("{} ({}s)", e.name, e.duration_seconds))
                    .collect();
                writeln!(out, "  Up next: {}", names.join(", "))?;
            }
        }
        SessionPhase::Resting {
            seconds_left,
            next_index,
        } => {
            let next = session
                .definition()
                .exercises
                .get(next_index)
                .map_or("Workout Complete!", |e| e.name.as_str());
            writeln!(
                out,
                "Rest Time  {}  ({}/{}s)",
                format_clock(seconds_left),
                REST_SECONDS - seconds_left,
                REST_SECONDS
            )?;
            writeln!(out, "  Next: {}", next)?;
        }
        SessionPhase::Complete => {
            if let Some(summary) = session.summary() {
                write_summary(out, summary)?;
            }
        }
    }
    Ok(())
}

/// Completion view
pub fn render_summary(summary: &WorkoutSummary) -> String {
    render(|out| write_summary(out, summary))
}

fn write_summary(out: &mut String, summary: &WorkoutSummary) -> fmt::Result {
    writeln!(out, "Workout Complete! {}", summary.name)?;
    writeln!(
        out,
        "  {}/{} Exercises Completed",
        summary.exercises_completed, summary.total_exercises
    )?;
    writeln!(out, "  Duration: {}", format_duration(summary.duration))?;
    writeln!(out, "  Calories: {}", summary.calories_estimated)?;
    for exercise in &summary.exercises {
        let mark = if exercise.completed { "✓" } else { "✗" };
        writeln!(out, "    {} {}", mark, exercise.name)?;
    }
    Ok(())
}
