//! Application state holder.
//!
//! `AppState` owns the injected store together with the in-memory statistics
//! and profile. It is loaded once at startup and written back synchronously
//! after every mutation.

use crate::store::{load_or_default, save_value, KeyValueStore, PROFILE_KEY, STATS_KEY};
use crate::{Error, Result, UserProfile, UserStats, WorkoutSummary};

pub struct AppState<S: KeyValueStore> {
    store: S,
    stats: UserStats,
    profile: UserProfile,
}

impl<S: KeyValueStore> AppState<S> {
    /// Read statistics and profile, defaulting whatever is missing or corrupt
    pub fn load(store: S) -> Result<Self> {
        let stats: UserStats = load_or_default(&store, STATS_KEY)?;
        let profile: UserProfile = load_or_default(&store, PROFILE_KEY)?;

        if stats.total_workouts as usize != stats.history.len() {
            tracing::warn!(
                "Stored totalWorkouts ({}) differs from history length ({})",
                stats.total_workouts,
                stats.history.len()
            );
        }

        tracing::debug!(
            "Loaded state: {} workouts, profile {}",
            stats.total_workouts,
            if profile == UserProfile::default() { "empty" } else { "set" }
        );
        Ok(Self {
            store,
            stats,
            profile,
        })
    }

    pub fn stats(&self) -> &UserStats {
        &self.stats
    }

    pub fn profile(&self) -> &UserProfile {
        &self.profile
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Fold a finished workout into the statistics and persist them
    pub fn record_workout(&mut self, summary: WorkoutSummary) -> Result<&UserStats> {
        self.stats.record(summary);
        save_value(&mut self.store, STATS_KEY, &self.stats)?;
        tracing::info!("Saved stats ({} workouts)", self.stats.total_workouts);
        Ok(&self.stats)
    }

    /// Replace the profile and persist it
    pub fn update_profile(&mut self, profile: UserProfile) -> Result<()> {
        profile.validate()?;
        self.profile = profile;
        save_value(&mut self.store, PROFILE_KEY, &self.profile)?;
        tracing::info!("Saved profile");
        Ok(())
    }

    /// Body weight for the calorie estimate
    pub fn weight_kg(&self, default_kg: f64) -> f64 {
        self.profile.weight_or(default_kg)
    }

    pub fn into_store(self) -> S {
        self.store
    }
}

impl UserProfile {
    /// Reject measurements that are not finite positive numbers
    pub fn validate(&self) -> Result<()> {
        for (field, value) in [("weight", self.weight), ("height", self.height)] {
            if let Some(v) = value {
                if !v.is_finite() || v <= 0.0 {
                    return Err(Error::Profile(format!(
                        "{} must be a positive number, got {}",
                        field, v
                    )));
                }
            }
        }
        Ok(())
    }

    /// Stored weight when present, finite and positive, otherwise `default_kg`
    pub fn weight_or(&self, default_kg: f64) -> f64 {
        match self.weight {
            Some(w) if w.is_finite() && w > 0.0 => w,
            _ => default_kg,
        }
    }

    /// Name used in greetings
    pub fn display_name(&self) -> &str {
        match self.name.as_deref() {
            Some(name) if !name.trim().is_empty() => name,
            _ => "Fitness Warrior",
        }
    }
}
