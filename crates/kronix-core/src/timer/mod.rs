mod driver;
mod engine;

pub use driver::{SessionOutcome, TimerDriver};
pub use engine::{format_clock, FocusTimer, ModeDurations, TimerMode, TimerState};
