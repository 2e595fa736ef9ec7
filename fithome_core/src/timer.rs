//! Whole-second countdown clock.
//!
//! A `Countdown` does not track wall time. Its owner feeds it one `tick()`
//! per elapsed second (see [`crate::ticker`]).

/// Result of feeding one tick into a countdown
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    /// Paused or already finished; nothing changed
    Idle,
    /// Still counting; carries the seconds remaining
    Running(u32),
    /// Reached zero on this tick
    Finished,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Countdown {
    duration: u32,
    remaining: u32,
    running: bool,
}

impl Countdown {
    /// A stopped countdown holding the full duration
    pub fn new(duration: u32) -> Self {
        Self {
            duration,
            remaining: duration,
            running: false,
        }
    }

    /// Start or resume; a finished countdown restarts from its full duration
    pub fn start(&mut self) {
        if self.remaining == 0 {
            self.remaining = self.duration;
        }
        self.running = true;
    }

    /// Freeze without touching the remaining time
    pub fn pause(&mut self) {
        self.running = false;
    }

    pub fn toggle(&mut self) {
        if self.running {
            self.pause();
        } else {
            self.start();
        }
    }

    pub fn reset(&mut self) {
        self.remaining = self.duration;
        self.running = false;
    }

    pub fn tick(&mut self) -> TickOutcome {
        if !self.running {
            return TickOutcome::Idle;
        }

        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining == 0 {
            self.running = false;
            TickOutcome::Finished
        } else {
            TickOutcome::Running(self.remaining)
        }
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn duration(&self) -> u32 {
        self.duration
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn is_finished(&self) -> bool {
        self.remaining == 0 && !self.running
    }

    /// Fraction of the duration already elapsed, in `[0, 1]`
    pub fn progress(&self) -> f64 {
        if self.duration == 0 {
            return 1.0;
        }
        f64::from(self.duration - self.remaining) / f64::from(self.duration)
    }
}

/// `m:ss` rendering used by the session views
pub fn format_clock(seconds: u32) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reaches_zero_after_duration_ticks_and_finishes_once() {
        for duration in [1, 2, 30, 45] {
            let mut countdown = Countdown::new(duration);
            countdown.start();

            let mut finished = 0;
            for _ in 0..duration {
                if countdown.tick() == TickOutcome::Finished {
                    finished += 1;
                }
            }
            assert_eq!(countdown.remaining(), 0);
            assert_eq!(finished, 1);

            // Further ticks are inert
            for _ in 0..5 {
                assert_eq!(countdown.tick(), TickOutcome::Idle);
            }
            assert_eq!(countdown.remaining(), 0);
        }
    }

    #[test]
    fn test_stopped_countdown_ignores_ticks() {
        let mut countdown = Countdown::new(10);
        assert_eq!(countdown.tick(), TickOutcome::Idle);
        assert_eq!(countdown.remaining(), 10);
    }

    #[test]
    fn test_pause_freezes_without_reset() {
        let mut countdown = Countdown::new(10);
        countdown.start();
        countdown.tick();
        countdown.tick();
        countdown.pause();

        assert_eq!(countdown.tick(), TickOutcome::Idle);
        assert_eq!(countdown.remaining(), 8);

        countdown.start();
        assert_eq!(countdown.tick(), TickOutcome::Running(7));
    }

    #[test]
    fn test_start_after_finish_restarts_full_duration() {
        let mut countdown = Countdown::new(2);
        countdown.start();
        countdown.tick();
        assert_eq!(countdown.tick(), TickOutcome::Finished);
        assert!(countdown.is_finished());

        countdown.toggle();
        assert!(countdown.is_running());
        assert_eq!(countdown.remaining(), 2);
    }

    #[test]
    fn test_progress_and_reset() {
        let mut countdown = Countdown::new(4);
        countdown.start();
        countdown.tick();
        assert_eq!(countdown.progress(), 0.25);

        countdown.reset();
        assert_eq!(countdown.remaining(), 4);
        assert!(!countdown.is_running());
    }

    #[test]
    fn test_format_clock() {
        assert_eq!(format_clock(0), "0:00");
        assert_eq!(format_clock(45), "0:45");
        assert_eq!(format_clock(125), "2:05");
    }
}
