//! Workout session state machine.
//!
//! A session walks an ordered exercise list. Each exercise runs on its own
//! countdown; between exercises a fixed rest countdown runs. Finishing or
//! skipping the last exercise completes the session and yields a
//! [`WorkoutSummary`]. Abandoning drops the session without a summary.
//!
//! The session never reads the clock itself: callers pass `now` so that
//! wall-clock duration is deterministic under test.

use crate::timer::{Countdown, TickOutcome};
use crate::{Error, Exercise, ExerciseOutcome, Result, WorkoutDefinition, WorkoutSummary};
use chrono::{DateTime, Utc};
use std::collections::BTreeSet;
use uuid::Uuid;

/// Length of every rest period between exercises
pub const REST_SECONDS: u32 = 30;

/// Metabolic equivalent used for all bodyweight exercises
pub const METS: f64 = 4.5;

/// Body weight assumed when the profile does not provide one
pub const DEFAULT_WEIGHT_KG: f64 = 70.0;

/// Externally visible session phase
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionPhase {
    InProgress { index: usize },
    Resting { seconds_left: u32, next_index: usize },
    Complete,
}

/// A phase change caused by a tick or a user action
#[derive(Clone, Debug, PartialEq)]
pub enum Transition {
    ExerciseStarted { index: usize },
    RestStarted { next_index: usize },
    Completed(WorkoutSummary),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Stage {
    InProgress(usize),
    Resting(usize),
    Complete,
}

/// Estimated kcal for a list of exercises at the given body weight
///
/// Each exercise contributes `METS * weight * hours`, rounded on its own.
/// Terms and total saturate at `u32::MAX`.
pub fn estimate_calories(exercises: &[Exercise], weight_kg: f64) -> u32 {
    exercises
        .iter()
        .map(|exercise| {
            let hours = f64::from(exercise.duration_seconds) / 3600.0;
            (METS * weight_kg * hours).round() as u32
        })
        .fold(0u32, u32::saturating_add)
}

#[derive(Debug)]
pub struct WorkoutSession {
    id: Uuid,
    definition: WorkoutDefinition,
    weight_kg: f64,
    started_at: DateTime<Utc>,
    completed: BTreeSet<u32>,
    stage: Stage,
    exercise_timer: Countdown,
    rest_timer: Countdown,
    summary: Option<WorkoutSummary>,
}

impl WorkoutSession {
    /// Begin a session on the first exercise with its countdown running
    pub fn start(
        definition: WorkoutDefinition,
        weight_kg: f64,
        now: DateTime<Utc>,
    ) -> Result<Self> {
        let first = definition.exercises.first().ok_or_else(|| {
            Error::Session(format!("Workout '{}' has no exercises", definition.name))
        })?;

        let mut exercise_timer = Countdown::new(first.duration_seconds);
        exercise_timer.start();

        let session = Self {
            id: Uuid::new_v4(),
            weight_kg,
            started_at: now,
            completed: BTreeSet::new(),
            stage: Stage::InProgress(0),
            exercise_timer,
            rest_timer: Countdown::new(REST_SECONDS),
            summary: None,
            definition,
        };

        tracing::info!(
            session = %session.id,
            "Started workout '{}' ({} exercises)",
            session.definition.name,
            session.definition.exercises.len()
        );
        Ok(session)
    }

    /// Advance the active countdown by one second
    pub fn tick(&mut self, now: DateTime<Utc>) -> Option<Transition> {
        match self.stage {
            Stage::InProgress(index) => match self.exercise_timer.tick() {
                TickOutcome::Finished => Some(self.finish_exercise(index, true, now)),
                TickOutcome::Running(_) | TickOutcome::Idle => None,
            },
            Stage::Resting(next_index) => match self.rest_timer.tick() {
                TickOutcome::Finished => Some(self.begin_exercise(next_index)),
                TickOutcome::Running(_) | TickOutcome::Idle => None,
            },
            Stage::Complete => None,
        }
    }

    /// Move past the current exercise without marking it completed
    pub fn skip_exercise(&mut self, now: DateTime<Utc>) -> Result<Transition> {
        match self.stage {
            Stage::InProgress(index) => {
                tracing::debug!(session = %self.id, "Skipped exercise {}", index);
                Ok(self.finish_exercise(index, false, now))
            }
            _ => Err(Error::Session("No exercise in progress to skip".into())),
        }
    }

    /// End the rest period early
    pub fn skip_rest(&mut self) -> Result<Transition> {
        match self.stage {
            Stage::Resting(next_index) => {
                self.rest_timer.pause();
                Ok(self.begin_exercise(next_index))
            }
            _ => Err(Error::Session("Not resting".into())),
        }
    }

    pub fn pause(&mut self) -> Result<()> {
        self.active_timer_mut()?.pause();
        Ok(())
    }

    pub fn resume(&mut self) -> Result<()> {
        self.active_timer_mut()?.start();
        Ok(())
    }

    /// Pause or resume the active countdown; returns whether it now runs
    pub fn toggle_timer(&mut self) -> Result<bool> {
        let timer = self.active_timer_mut()?;
        timer.toggle();
        Ok(timer.is_running())
    }

    /// Rewind the current exercise countdown to its full duration, stopped
    pub fn reset_timer(&mut self) -> Result<()> {
        match self.stage {
            Stage::InProgress(index) => {
                self.exercise_timer.reset();
                tracing::debug!(session = %self.id, "Reset timer for exercise {}", index);
                Ok(())
            }
            _ => Err(Error::Session("No exercise countdown to reset".into())),
        }
    }

    /// Discard the session without producing a summary
    pub fn abandon(mut self) {
        self.exercise_timer.pause();
        self.rest_timer.pause();
        tracing::info!(
            session = %self.id,
            "Abandoned workout '{}' after {} of {} exercises",
            self.definition.name,
            self.completed.len(),
            self.definition.exercises.len()
        );
    }

    fn active_timer_mut(&mut self) -> Result<&mut Countdown> {
        match self.stage {
            Stage::InProgress(_) => Ok(&mut self.exercise_timer),
            Stage::Resting(_) => Ok(&mut self.rest_timer),
            Stage::Complete => Err(Error::Session("Workout already complete".into())),
        }
    }

    fn finish_exercise(&mut self, index: usize, natural: bool, now: DateTime<Utc>) -> Transition {
        self.exercise_timer.pause();

        if natural {
            let exercise = &self.definition.exercises[index];
            self.completed.insert(exercise.id);
            tracing::debug!(session = %self.id, "Completed '{}'", exercise.name);
        }

        if index + 1 < self.definition.exercises.len() {
            let next_index = index + 1;
            self.stage = Stage::Resting(next_index);
            self.rest_timer = Countdown::new(REST_SECONDS);
            self.rest_timer.start();
            Transition::RestStarted { next_index }
        } else {
            let summary = self.build_summary(now);
            self.stage = Stage::Complete;
            self.summary = Some(summary.clone());
            tracing::info!(
                session = %self.id,
                "Workout '{}' complete: {}/{} exercises, {} kcal, {}s",
                summary.name,
                summary.exercises_completed,
                summary.total_exercises,
                summary.calories_estimated,
                summary.duration
            );
            Transition::Completed(summary)
        }
    }

    fn begin_exercise(&mut self, index: usize) -> Transition {
        let duration = self.definition.exercises[index].duration_seconds;
        self.stage = Stage::InProgress(index);
        self.exercise_timer = Countdown::new(duration);
        self.exercise_timer.start();
        Transition::ExerciseStarted { index }
    }

    fn build_summary(&self, now: DateTime<Utc>) -> WorkoutSummary {
        let elapsed_ms = (now - self.started_at).num_milliseconds().max(0);
        let duration = ((elapsed_ms + 500) / 1000) as u64;

        // Sums every exercise in the plan, skipped ones included
        let calories_estimated = estimate_calories(&self.definition.exercises, self.weight_kg);

        let exercises = self
            .definition
            .exercises
            .iter()
            .map(|exercise| ExerciseOutcome {
                id: exercise.id,
                name: exercise.name.clone(),
                completed: self.completed.contains(&exercise.id),
            })
            .collect();

        WorkoutSummary {
            name: self.definition.name.clone(),
            date: now,
            duration,
            exercises_completed: self.completed.len() as u32,
            total_exercises: self.definition.exercises.len() as u32,
            calories_estimated,
            exercises,
        }
    }

    // ------------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------------

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn definition(&self) -> &WorkoutDefinition {
        &self.definition
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub fn phase(&self) -> SessionPhase {
        match self.stage {
            Stage::InProgress(index) => SessionPhase::InProgress { index },
            Stage::Resting(next_index) => SessionPhase::Resting {
                seconds_left: self.rest_timer.remaining(),
                next_index,
            },
            Stage::Complete => SessionPhase::Complete,
        }
    }

    pub fn is_resting(&self) -> bool {
        matches!(self.stage, Stage::Resting(_))
    }

    pub fn is_complete(&self) -> bool {
        self.stage == Stage::Complete
    }

    /// The exercise being performed, if any
    pub fn current_exercise(&self) -> Option<&Exercise> {
        match self.stage {
            Stage::InProgress(index) => self.definition.exercises.get(index),
            _ => None,
        }
    }

    /// The exercise that follows the current rest period, if resting
    pub fn next_exercise(&self) -> Option<&Exercise> {
        match self.stage {
            Stage::Resting(next_index) => self.definition.exercises.get(next_index),
            _ => None,
        }
    }

    /// Up to three exercises queued after the current one
    pub fn upcoming(&self) -> &[Exercise] {
        let from = match self.stage {
            Stage::InProgress(index) => index + 1,
            Stage::Resting(next_index) => next_index + 1,
            Stage::Complete => return &[],
        };
        let exercises = &self.definition.exercises;
        let from = from.min(exercises.len());
        let to = (from + 3).min(exercises.len());
        &exercises[from..to]
    }

    pub fn completed_ids(&self) -> &BTreeSet<u32> {
        &self.completed
    }

    /// Share of exercises completed, 0-100
    pub fn progress_percent(&self) -> f64 {
        self.completed.len() as f64 / self.definition.exercises.len() as f64 * 100.0
    }

    pub fn exercise_timer(&self) -> &Countdown {
        &self.exercise_timer
    }

    pub fn rest_timer(&self) -> &Countdown {
        &self.rest_timer
    }

    pub fn summary(&self) -> Option<&WorkoutSummary> {
        self.summary.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::get_default_catalog;
    use chrono::Duration;

    fn t0() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2026-03-01T08:00:00Z")
            .unwrap()
            .with_timezone(&Utc)
    }

    /// Push-ups (30s) then Squats (45s) then Plank (60s)
    fn three_exercise_session() -> WorkoutSession {
        let workout = get_default_catalog()
            .build_workout("Test", &[1, 2, 3])
            .unwrap();
        WorkoutSession::start(workout, DEFAULT_WEIGHT_KG, t0()).unwrap()
    }

    fn run_current_exercise(session: &mut WorkoutSession, now: DateTime<Utc>) -> Transition {
        loop {
            if let Some(transition) = session.tick(now) {
                return transition;
            }
        }
    }

    #[test]
    fn test_natural_finish_marks_completed_and_rests() {
        let mut session = three_exercise_session();
        assert_eq!(session.phase(), SessionPhase::InProgress { index: 0 });

        for _ in 0..29 {
            assert_eq!(session.tick(t0()), None);
        }
        let transition = session.tick(t0()).unwrap();

        assert_eq!(transition, Transition::RestStarted { next_index: 1 });
        assert!(session.completed_ids().contains(&1));
        assert_eq!(
            session.phase(),
            SessionPhase::Resting {
                seconds_left: REST_SECONDS,
                next_index: 1
            }
        );
        assert_eq!(session.next_exercise().unwrap().name, "Squats");
    }

    #[test]
    fn test_skip_does_not_mark_completed() {
        let mut session = three_exercise_session();
        let transition = session.skip_exercise(t0()).unwrap();

        assert_eq!(transition, Transition::RestStarted { next_index: 1 });
        assert!(session.completed_ids().is_empty());
    }

    #[test]
    fn test_rest_countdown_leads_to_next_exercise() {
        let mut session = three_exercise_session();
        session.skip_exercise(t0()).unwrap();

        for _ in 0..REST_SECONDS - 1 {
            assert_eq!(session.tick(t0()), None);
        }
        assert_eq!(
            session.phase(),
            SessionPhase::Resting {
                seconds_left: 1,
                next_index: 1
            }
        );
        assert_eq!(
            session.tick(t0()),
            Some(Transition::ExerciseStarted { index: 1 })
        );
        assert_eq!(session.exercise_timer().remaining(), 45);
        assert!(session.exercise_timer().is_running());
    }

    #[test]
    fn test_skip_rest_starts_next_exercise() {
        let mut session = three_exercise_session();
        session.skip_exercise(t0()).unwrap();

        assert_eq!(
            session.skip_rest().unwrap(),
            Transition::ExerciseStarted { index: 1 }
        );
        assert_eq!(session.current_exercise().unwrap().name, "Squats");
    }

    #[test]
    fn test_last_exercise_goes_straight_to_complete() {
        let mut session = three_exercise_session();
        session.skip_exercise(t0()).unwrap();
        session.skip_rest().unwrap();
        session.skip_exercise(t0()).unwrap();
        session.skip_rest().unwrap();

        let end = t0() + Duration::seconds(95);
        let transition = run_current_exercise(&mut session, end);

        let summary = match transition {
            Transition::Completed(summary) => summary,
            other => panic!("expected completion, got {:?}", other),
        };
        assert!(session.is_complete());
        assert!(!session.is_resting());
        assert_eq!(summary.duration, 95);
        assert_eq!(summary.date, end);
        assert_eq!(summary.exercises_completed, 1);
        assert_eq!(summary.total_exercises, 3);
        assert_eq!(
            summary.exercises.iter().map(|e| e.completed).collect::<Vec<_>>(),
            vec![false, false, true]
        );
        assert_eq!(session.summary(), Some(&summary));
    }

    #[test]
    fn test_calories_sum_all_exercises_even_skipped() {
        let mut session = three_exercise_session();
        session.skip_exercise(t0()).unwrap();
        session.skip_rest().unwrap();
        session.skip_exercise(t0()).unwrap();
        session.skip_rest().unwrap();
        let transition = session.skip_exercise(t0()).unwrap();

        // 70kg: 30s -> 2.625 -> 3, 45s -> 3.9375 -> 4, 60s -> 5.25 -> 5
        match transition {
            Transition::Completed(summary) => {
                assert_eq!(summary.exercises_completed, 0);
                assert_eq!(summary.calories_estimated, 12);
            }
            other => panic!("expected completion, got {:?}", other),
        }
    }

    #[test]
    fn test_estimate_calories_scales_with_weight() {
        let workout = get_default_catalog().build_workout("One", &[3]).unwrap();
        assert_eq!(estimate_calories(&workout.exercises, 70.0), 5);
        assert_eq!(estimate_calories(&workout.exercises, 100.0), 8);
    }

    #[test]
    fn test_huge_weight_saturates_calories() {
        let workout = get_default_catalog().workout("chest").unwrap();
        assert_eq!(estimate_calories(&workout.exercises, 1e15), u32::MAX);

        let mut session = WorkoutSession::start(workout, f64::INFINITY, t0()).unwrap();
        let summary = loop {
            let transition = match session.skip_exercise(t0()) {
                Ok(t) => t,
                Err(_) => session.skip_rest().unwrap(),
            };
            if let Transition::Completed(summary) = transition {
                break summary;
            }
        };
        assert_eq!(summary.calories_estimated, u32::MAX);
    }

    #[test]
    fn test_complete_is_terminal() {
        let workout = get_default_catalog().build_workout("One", &[1]).unwrap();
        let mut session = WorkoutSession::start(workout, DEFAULT_WEIGHT_KG, t0()).unwrap();
        session.skip_exercise(t0()).unwrap();

        assert!(session.is_complete());
        assert_eq!(session.tick(t0()), None);
        assert!(session.skip_exercise(t0()).is_err());
        assert!(session.skip_rest().is_err());
        assert!(session.pause().is_err());
        assert!(session.upcoming().is_empty());
    }

    #[test]
    fn test_wrong_phase_actions_are_errors() {
        let mut session = three_exercise_session();
        assert!(matches!(session.skip_rest(), Err(Error::Session(_))));

        session.skip_exercise(t0()).unwrap();
        assert!(matches!(session.skip_exercise(t0()), Err(Error::Session(_))));
    }

    #[test]
    fn test_pause_freezes_exercise_countdown() {
        let mut session = three_exercise_session();
        session.tick(t0());
        session.pause().unwrap();

        for _ in 0..100 {
            assert_eq!(session.tick(t0()), None);
        }
        assert_eq!(session.exercise_timer().remaining(), 29);

        assert!(session.toggle_timer().unwrap());
        session.tick(t0());
        assert_eq!(session.exercise_timer().remaining(), 28);
    }

    #[test]
    fn test_reset_timer_rewinds_and_stops_exercise() {
        let mut session = three_exercise_session();
        for _ in 0..10 {
            session.tick(t0());
        }
        assert_eq!(session.exercise_timer().remaining(), 20);

        session.reset_timer().unwrap();
        assert_eq!(session.exercise_timer().remaining(), 30);
        assert!(!session.exercise_timer().is_running());
        assert_eq!(session.tick(t0()), None);
        assert_eq!(session.exercise_timer().remaining(), 30);

        session.resume().unwrap();
        session.tick(t0());
        assert_eq!(session.exercise_timer().remaining(), 29);

        session.skip_exercise(t0()).unwrap();
        assert!(matches!(session.reset_timer(), Err(Error::Session(_))));
    }

    #[test]
    fn test_completed_never_exceeds_total() {
        let mut session = three_exercise_session();
        let mut finished = None;
        while finished.is_none() {
            match session.tick(t0()) {
                Some(Transition::Completed(summary)) => finished = Some(summary),
                Some(_) | None => {}
            }
        }
        let summary = finished.unwrap();
        assert_eq!(summary.exercises_completed, 3);
        assert!(summary.exercises_completed <= summary.total_exercises);
        assert_eq!(session.progress_percent(), 100.0);
    }

    #[test]
    fn test_upcoming_lists_at_most_three() {
        let workout = get_default_catalog().workout("full-body").unwrap();
        let session = WorkoutSession::start(workout, DEFAULT_WEIGHT_KG, t0()).unwrap();

        let upcoming: Vec<&str> = session.upcoming().iter().map(|e| e.name.as_str()).collect();
        assert_eq!(upcoming, vec!["Squats", "Push-ups", "Mountain Climbers"]);
    }

    #[test]
    fn test_empty_workout_rejected() {
        let workout = WorkoutDefinition {
            name: "Nothing".into(),
            exercises: vec![],
        };
        assert!(matches!(
            WorkoutSession::start(workout, DEFAULT_WEIGHT_KG, t0()),
            Err(Error::Session(_))
        ));
    }

    #[test]
    fn test_clock_going_backwards_gives_zero_duration() {
        let workout = get_default_catalog().build_workout("One", &[1]).unwrap();
        let mut session = WorkoutSession::start(workout, DEFAULT_WEIGHT_KG, t0()).unwrap();
        match session.skip_exercise(t0() - Duration::seconds(10)).unwrap() {
            Transition::Completed(summary) => assert_eq!(summary.duration, 0),
            other => panic!("expected completion, got {:?}", other),
        }
    }
}
