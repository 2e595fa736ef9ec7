//! Stat aggregation and derived achievements.
//!
//! Folding a [`WorkoutSummary`] into [`UserStats`] is the only way statistics
//! change. Achievements are not stored: they are recomputed from the totals
//! every time they are displayed.

use crate::{UserStats, WorkoutSummary};
use chrono::{Datelike, Duration, NaiveDate};

/// Number of recent workouts shown on the progress view
pub const RECENT_WORKOUTS: usize = 4;

impl UserStats {
    /// Fold one finished workout into the cumulative totals
    ///
    /// The streak only ever grows; there is no missed-day reset.
    pub fn record(&mut self, summary: WorkoutSummary) {
        self.total_workouts += 1;
        self.total_time += summary.duration;
        self.total_calories += u64::from(summary.calories_estimated);
        self.current_streak += 1;

        tracing::debug!(
            "Recorded '{}': {} workouts, {}s, {} kcal, streak {}",
            summary.name,
            self.total_workouts,
            self.total_time,
            self.total_calories,
            self.current_streak
        );
        self.history.push(summary);
    }

    /// Most recent workouts first
    pub fn recent(&self, n: usize) -> impl Iterator<Item = &WorkoutSummary> {
        self.history.iter().rev().take(n)
    }

    pub fn average_workout_seconds(&self) -> Option<u64> {
        if self.total_workouts == 0 {
            None
        } else {
            Some(self.total_time / u64::from(self.total_workouts))
        }
    }
}

/// Pure form of [`UserStats::record`]
pub fn aggregate(stats: &UserStats, summary: WorkoutSummary) -> UserStats {
    let mut next = stats.clone();
    next.record(summary);
    next
}

/// Threshold an achievement is measured against
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Requirement {
    Workouts(u32),
    Streak(u32),
    Calories(u64),
    TimeSeconds(u64),
}

#[derive(Clone, Debug)]
pub struct Achievement {
    pub name: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
    pub requirement: Requirement,
}

impl Achievement {
    pub fn unlocked(&self, stats: &UserStats) -> bool {
        let (current, target) = self.progress(stats);
        current >= target
    }

    /// `(current, target)` in the requirement's own unit
    pub fn progress(&self, stats: &UserStats) -> (u64, u64) {
        match self.requirement {
            Requirement::Workouts(n) => (u64::from(stats.total_workouts), u64::from(n)),
            Requirement::Streak(n) => (u64::from(stats.current_streak), u64::from(n)),
            Requirement::Calories(n) => (stats.total_calories, n),
            Requirement::TimeSeconds(n) => (stats.total_time, n),
        }
    }
}

static ACHIEVEMENTS: [Achievement; 5] = [
    Achievement {
        name: "First Workout",
        description: "Complete your first workout",
        icon: "🎯",
        requirement: Requirement::Workouts(1),
    },
    Achievement {
        name: "On a Roll",
        description: "Reach a 5 workout streak",
        icon: "👑",
        requirement: Requirement::Streak(5),
    },
    Achievement {
        name: "Calorie Burner",
        description: "Burn 500 calories",
        icon: "🔥",
        requirement: Requirement::Calories(500),
    },
    Achievement {
        name: "Calorie Crusher",
        description: "Burn 1000 calories",
        icon: "💥",
        requirement: Requirement::Calories(1000),
    },
    Achievement {
        name: "Time Master",
        description: "Complete 2 hours of workouts",
        icon: "⏰",
        requirement: Requirement::TimeSeconds(7200),
    },
];

pub fn achievements() -> &'static [Achievement] {
    &ACHIEVEMENTS
}

/// Workouts logged on one calendar day (UTC)
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DayActivity {
    pub date: NaiveDate,
    pub workouts: u32,
    pub minutes: u64,
}

impl DayActivity {
    pub fn weekday_label(&self) -> String {
        self.date.weekday().to_string()
    }
}

/// Activity for the seven days ending on `today`, oldest first
pub fn weekly_activity(history: &[WorkoutSummary], today: NaiveDate) -> Vec<DayActivity> {
    (0..7)
        .rev()
        .map(|days_back| {
            let date = today - Duration::days(days_back);
            let (workouts, seconds) = history
                .iter()
                .filter(|w| w.date.date_naive() == date)
                .fold((0u32, 0u64), |(n, secs), w| (n + 1, secs + w.duration));
            DayActivity {
                date,
                workouts,
                minutes: seconds / 60,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Utc};

    fn summary(date: &str, duration: u64, calories: u32) -> WorkoutSummary {
        WorkoutSummary {
            name: "Full Body".into(),
            date: DateTime::parse_from_rfc3339(date).unwrap().with_timezone(&Utc),
            duration,
            exercises_completed: 3,
            total_exercises: 4,
            calories_estimated: calories,
            exercises: vec![],
        }
    }

    fn achievement(name: &str) -> &'static Achievement {
        achievements().iter().find(|a| a.name == name).unwrap()
    }

    #[test]
    fn test_first_workout_updates_totals_and_history() {
        let stats = UserStats::default();
        let next = aggregate(&stats, summary("2026-03-01T08:00:00Z", 600, 40));

        assert_eq!(next.total_workouts, 1);
        assert_eq!(next.history.len(), 1);
        assert_eq!(next.total_time, 600);
        assert_eq!(next.total_calories, 40);
        assert_eq!(next.current_streak, 1);
        // Input untouched
        assert_eq!(stats, UserStats::default());
    }

    #[test]
    fn test_total_workouts_tracks_history_length() {
        let mut stats = UserStats::default();
        for i in 0..6 {
            stats.record(summary("2026-03-01T08:00:00Z", 100 + i, 10));
            assert_eq!(stats.total_workouts as usize, stats.history.len());
        }
        assert_eq!(stats.current_streak, 6);
    }

    #[test]
    fn test_recent_is_newest_first_and_bounded() {
        let mut stats = UserStats::default();
        for duration in 1..=6 {
            stats.record(summary("2026-03-01T08:00:00Z", duration, 0));
        }
        let durations: Vec<u64> = stats.recent(RECENT_WORKOUTS).map(|w| w.duration).collect();
        assert_eq!(durations, vec![6, 5, 4, 3]);
        assert_eq!(stats.history.len(), 6);
    }

    #[test]
    fn test_average_workout_seconds() {
        let mut stats = UserStats::default();
        assert_eq!(stats.average_workout_seconds(), None);
        stats.record(summary("2026-03-01T08:00:00Z", 300, 0));
        stats.record(summary("2026-03-02T08:00:00Z", 600, 0));
        assert_eq!(stats.average_workout_seconds(), Some(450));
    }

    #[test]
    fn test_first_workout_achievement() {
        let mut stats = UserStats::default();
        assert!(!achievement("First Workout").unlocked(&stats));

        stats.record(summary("2026-03-01T08:00:00Z", 60, 5));
        assert!(achievement("First Workout").unlocked(&stats));
    }

    #[test]
    fn test_threshold_achievements() {
        let stats = UserStats {
            total_workouts: 5,
            total_time: 7199,
            total_calories: 500,
            current_streak: 4,
            history: vec![],
        };
        assert!(!achievement("On a Roll").unlocked(&stats));
        assert!(achievement("Calorie Burner").unlocked(&stats));
        assert!(!achievement("Calorie Crusher").unlocked(&stats));
        assert!(!achievement("Time Master").unlocked(&stats));
        assert_eq!(achievement("Time Master").progress(&stats), (7199, 7200));

        let stats = UserStats {
            total_time: 7200,
            current_streak: 5,
            total_calories: 1000,
            ..stats
        };
        assert!(achievements().iter().all(|a| a.unlocked(&stats)));
    }

    #[test]
    fn test_weekly_activity_buckets_by_day() {
        let history = vec![
            summary("2026-02-20T08:00:00Z", 600, 0), // outside window
            summary("2026-02-25T08:00:00Z", 1200, 0),
            summary("2026-03-01T07:00:00Z", 900, 0),
            summary("2026-03-01T19:00:00Z", 300, 0),
        ];
        let today = NaiveDate::from_ymd_opt(2026, 3, 1).unwrap();
        let week = weekly_activity(&history, today);

        assert_eq!(week.len(), 7);
        assert_eq!(week[0].date, NaiveDate::from_ymd_opt(2026, 2, 23).unwrap());
        assert_eq!(week[6].date, today);
        assert_eq!(week[6].workouts, 2);
        assert_eq!(week[6].minutes, 20);
        assert_eq!(week[2].workouts, 1);
        assert_eq!(week[2].minutes, 20);
        assert_eq!(week.iter().map(|d| d.workouts).sum::<u32>(), 3);
        assert_eq!(week[6].weekday_label(), "Sun");
    }
}
