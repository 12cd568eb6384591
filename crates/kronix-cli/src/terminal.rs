//! Terminal implementations of the core's side channels.

use std::io::{self, BufRead, Write};

use kronix_core::{Config, Confirm, Notifier, Permission};

/// Asks on stderr and reads the answer from stdin. `--yes` skips the question.
pub struct Prompt {
    assume_yes: bool,
}

impl Prompt {
    pub fn new(assume_yes: bool) -> Self {
        Self { assume_yes }
    }
}

impl Confirm for Prompt {
    fn confirm(&mut self, prompt: &str) -> bool {
        if self.assume_yes {
            return true;
        }
        eprint!("{prompt} [y/N] ");
        let _ = io::stderr().flush();

        let mut answer = String::new();
        match io::stdin().lock().read_line(&mut answer) {
            Ok(_) => matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"),
            Err(e) => {
                tracing::warn!(error = %e, "could not read confirmation");
                false
            }
        }
    }
}

/// Bell plus a line on stderr, gated on `notifications.enabled`.
pub struct TerminalNotifier {
    enabled: bool,
}

impl TerminalNotifier {
    pub fn from_config(config: &Config) -> Self {
        Self {
            enabled: config.notifications.enabled,
        }
    }
}

impl Notifier for TerminalNotifier {
    fn permission(&self) -> Permission {
        if self.enabled {
            Permission::Granted
        } else {
            Permission::Denied
        }
    }

    fn notify(&self, title: &str, body: &str) {
        eprintln!("\x07{title}: {body}");
    }
}
