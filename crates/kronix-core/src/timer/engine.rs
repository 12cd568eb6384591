//! Focus timer state machine.
//!
//! The timer holds no threads and no clock. The caller invokes `tick()`
//! once per second while it is running; [`super::TimerDriver`] does that
//! with a single tokio interval.
//!
//! ## State Transitions
//!
//! ```text
//! Idle --start--> Running --pause--> Idle
//!                 Running --tick (0s left)--> Idle + TimerCompleted
//! any  --set_mode / reset--> Idle (full duration)
//! ```

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::events::Event;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerState {
    Idle,
    Running,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerMode {
    Work,
    Short,
    Long,
}

impl std::str::FromStr for TimerMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "work" => Ok(Self::Work),
            "short" => Ok(Self::Short),
            "long" => Ok(Self::Long),
            other => Err(format!("unknown timer mode '{other}' (expected work, short or long)")),
        }
    }
}

/// Session length per mode, in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModeDurations {
    pub work: u64,
    pub short: u64,
    pub long: u64,
}

impl Default for ModeDurations {
    fn default() -> Self {
        Self {
            work: 25 * 60,
            short: 5 * 60,
            long: 15 * 60,
        }
    }
}

impl ModeDurations {
    pub fn of(&self, mode: TimerMode) -> u64 {
        match mode {
            TimerMode::Work => self.work,
            TimerMode::Short => self.short,
            TimerMode::Long => self.long,
        }
    }
}

/// Countdown for a single focus or break session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FocusTimer {
    durations: ModeDurations,
    state: TimerState,
    mode: TimerMode,
    remaining_secs: u64,
    total_secs: u64,
    objective: String,
}

impl Default for FocusTimer {
    fn default() -> Self {
        Self::new(ModeDurations::default())
    }
}

impl FocusTimer {
    /// Idle, in work mode, with the full work duration remaining.
    pub fn new(durations: ModeDurations) -> Self {
        let total = durations.of(TimerMode::Work);
        Self {
            durations,
            state: TimerState::Idle,
            mode: TimerMode::Work,
            remaining_secs: total,
            total_secs: total,
            objective: String::new(),
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> TimerState {
        self.state
    }

    pub fn mode(&self) -> TimerMode {
        self.mode
    }

    pub fn remaining_secs(&self) -> u64 {
        self.remaining_secs
    }

    pub fn total_secs(&self) -> u64 {
        self.total_secs
    }

    pub fn objective(&self) -> &str {
        &self.objective
    }

    pub fn is_running(&self) -> bool {
        self.state == TimerState::Running
    }

    /// 0.0 .. 1.0 elapsed share of the current session.
    pub fn progress(&self) -> f64 {
        if self.total_secs == 0 {
            return 0.0;
        }
        1.0 - (self.remaining_secs as f64 / self.total_secs as f64)
    }

    pub fn snapshot(&self) -> Event {
        Event::StateSnapshot {
            state: self.state,
            mode: self.mode,
            objective: self.objective.clone(),
            remaining_secs: self.remaining_secs,
            total_secs: self.total_secs,
            clock: format_clock(self.remaining_secs),
            at: Utc::now(),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Stop and load the full duration of `mode`.
    pub fn set_mode(&mut self, mode: TimerMode) -> Event {
        let duration = self.durations.of(mode);
        self.state = TimerState::Idle;
        self.mode = mode;
        self.remaining_secs = duration;
        self.total_secs = duration;
        Event::ModeChanged {
            mode,
            duration_secs: duration,
            at: Utc::now(),
        }
    }

    /// Set the objective. Ignored while running.
    pub fn set_objective(&mut self, objective: &str) -> bool {
        if self.is_running() {
            return false;
        }
        self.objective = objective.trim().to_string();
        true
    }

    /// Start counting down. Requires a non-blank objective.
    ///
    /// Returns `Ok(None)` when already running.
    pub fn start(&mut self) -> Result<Option<Event>, ValidationError> {
        if self.is_running() {
            return Ok(None);
        }
        if self.objective.is_empty() {
            return Err(ValidationError::MissingObjective);
        }
        if self.remaining_secs == 0 {
            self.set_mode(self.mode);
        }
        self.state = TimerState::Running;
        Ok(Some(Event::TimerStarted {
            mode: self.mode,
            objective: self.objective.clone(),
            remaining_secs: self.remaining_secs,
            at: Utc::now(),
        }))
    }

    pub fn pause(&mut self) -> Option<Event> {
        if !self.is_running() {
            return None;
        }
        self.state = TimerState::Idle;
        Some(Event::TimerPaused {
            remaining_secs: self.remaining_secs,
            at: Utc::now(),
        })
    }

    /// Start when idle, pause when running.
    pub fn toggle(&mut self) -> Result<Option<Event>, ValidationError> {
        if self.is_running() {
            Ok(self.pause())
        } else {
            self.start()
        }
    }

    /// Advance one second. Returns `TimerCompleted` when the session ends.
    pub fn tick(&mut self) -> Option<Event> {
        if !self.is_running() {
            return None;
        }
        self.remaining_secs = self.remaining_secs.saturating_sub(1);
        if self.remaining_secs == 0 {
            self.state = TimerState::Idle;
            return Some(Event::TimerCompleted {
                mode: self.mode,
                objective: self.objective.clone(),
                at: Utc::now(),
            });
        }
        None
    }

    pub fn reset(&mut self) -> Event {
        self.set_mode(self.mode)
    }
}

/// `MM:SS` rendering of a second count.
pub fn format_clock(secs: u64) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn short_timer() -> FocusTimer {
        FocusTimer::new(ModeDurations {
            work: 3,
            short: 2,
            long: 4,
        })
    }

    #[test]
    fn start_requires_objective() {
        let mut timer = FocusTimer::default();
        assert_eq!(timer.start(), Err(ValidationError::MissingObjective));
        assert!(timer.set_objective("   "));
        assert_eq!(timer.start(), Err(ValidationError::MissingObjective));
        timer.set_objective("write chapter 3");
        assert!(matches!(timer.start(), Ok(Some(Event::TimerStarted { .. }))));
        assert_eq!(timer.state(), TimerState::Running);
        assert_eq!(timer.start(), Ok(None));
    }

    #[test]
    fn pause_preserves_remaining() {
        let mut timer = short_timer();
        timer.set_objective("x");
        timer.start().unwrap();
        timer.tick();
        assert!(timer.pause().is_some());
        assert_eq!(timer.state(), TimerState::Idle);
        assert_eq!(timer.remaining_secs(), 2);
        assert!(timer.tick().is_none());
        assert_eq!(timer.remaining_secs(), 2);
        assert!(timer.pause().is_none());
    }

    #[test]
    fn completes_exactly_once() {
        let mut timer = short_timer();
        timer.set_objective("x");
        timer.start().unwrap();
        assert!(timer.tick().is_none());
        assert!(timer.tick().is_none());
        let done = timer.tick();
        assert!(matches!(done, Some(Event::TimerCompleted { mode: TimerMode::Work, .. })));
        assert_eq!(timer.state(), TimerState::Idle);
        assert_eq!(timer.remaining_secs(), 0);
        assert!(timer.tick().is_none());
    }

    #[test]
    fn restart_after_completion_rearms() {
        let mut timer = short_timer();
        timer.set_objective("x");
        timer.start().unwrap();
        while timer.tick().is_none() {}
        timer.start().unwrap();
        assert_eq!(timer.remaining_secs(), 3);
    }

    #[test]
    fn set_mode_stops_and_loads_duration() {
        let mut timer = FocusTimer::default();
        timer.set_objective("x");
        timer.start().unwrap();
        timer.set_mode(TimerMode::Long);
        assert_eq!(timer.state(), TimerState::Idle);
        assert_eq!(timer.remaining_secs(), 900);
        assert_eq!(timer.total_secs(), 900);
        timer.set_mode(TimerMode::Short);
        assert_eq!(timer.remaining_secs(), 300);
    }

    #[test]
    fn reset_reapplies_current_mode() {
        let mut timer = short_timer();
        timer.set_mode(TimerMode::Long);
        timer.set_objective("x");
        timer.start().unwrap();
        timer.tick();
        timer.reset();
        assert_eq!(timer.mode(), TimerMode::Long);
        assert_eq!(timer.remaining_secs(), 4);
        assert!(!timer.is_running());
    }

    #[test]
    fn objective_locked_while_running() {
        let mut timer = FocusTimer::default();
        timer.set_objective("first");
        timer.start().unwrap();
        assert!(!timer.set_objective("second"));
        assert_eq!(timer.objective(), "first");
    }

    #[test]
    fn toggle_alternates() {
        let mut timer = FocusTimer::default();
        timer.set_objective("x");
        assert!(matches!(timer.toggle(), Ok(Some(Event::TimerStarted { .. }))));
        assert!(matches!(timer.toggle(), Ok(Some(Event::TimerPaused { .. }))));
    }

    #[test]
    fn clock_and_progress() {
        assert_eq!(format_clock(1500), "25:00");
        assert_eq!(format_clock(65), "01:05");
        assert_eq!(format_clock(0), "00:00");
        let mut timer = FocusTimer::new(ModeDurations { work: 4, short: 1, long: 1 });
        timer.set_objective("x");
        timer.start().unwrap();
        timer.tick();
        assert!((timer.progress() - 0.25).abs() < 1e-9);
    }
}
