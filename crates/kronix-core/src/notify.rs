//! Completion alert side channel.
//!
//! The timer never talks to the desktop directly. It hands a completion
//! event to a [`Notifier`], which decides whether it may show anything.

use crate::events::Event;

pub const ALERT_TITLE: &str = "KRONIX ALERT";
pub const ALERT_BODY: &str = "Focus Sequence Complete.";

/// Whether the user allowed notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Permission {
    Granted,
    Denied,
    /// Never asked.
    Default,
}

pub trait Notifier {
    fn permission(&self) -> Permission;
    fn notify(&self, title: &str, body: &str);
}

/// Send the completion alert for `event` if permission was granted.
///
/// Returns whether a notification went out. Missing permission and
/// non-completion events are silent no-ops.
pub fn completion_alert<N: Notifier + ?Sized>(notifier: &N, event: &Event) -> bool {
    if !matches!(event, Event::TimerCompleted { .. }) {
        return false;
    }
    if notifier.permission() != Permission::Granted {
        tracing::debug!("completion alert suppressed: notifications not granted");
        return false;
    }
    notifier.notify(ALERT_TITLE, ALERT_BODY);
    true
}

/// Notifier that drops everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct Silent;

impl Notifier for Silent {
    fn permission(&self) -> Permission {
        Permission::Denied
    }

    fn notify(&self, _title: &str, _body: &str) {}
}
