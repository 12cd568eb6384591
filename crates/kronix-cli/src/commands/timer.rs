use std::io::Write;

use clap::Subcommand;
use kronix_core::timer::{format_clock, FocusTimer, TimerDriver, TimerMode};
use kronix_core::Config;

use super::{print_json, CliResult};
use crate::terminal::TerminalNotifier;

#[derive(Subcommand)]
pub enum TimerAction {
    /// Run one focus session in the foreground (Ctrl-C pauses and exits)
    Run {
        /// What this session is for
        #[arg(long)]
        objective: String,
        /// work, short or long
        #[arg(long, default_value = "work")]
        mode: TimerMode,
    },
}

pub fn run(action: TimerAction) -> CliResult {
    let config = Config::load_or_default();

    match action {
        TimerAction::Run { objective, mode } => {
            let mut timer = FocusTimer::new(config.timer.durations());
            timer.set_mode(mode);
            timer.set_objective(&objective);
            let notifier = TerminalNotifier::from_config(&config);

            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()?;
            let mut driver = TimerDriver::new(timer);
            let cancel = async {
                if tokio::signal::ctrl_c().await.is_err() {
                    std::future::pending::<()>().await;
                }
            };
            let outcome = runtime.block_on(driver.run(&notifier, cancel, |timer| {
                eprint!("\r{} ", format_clock(timer.remaining_secs()));
                let _ = std::io::stderr().flush();
            }))?;
            eprintln!();
            print_json(&outcome)?;
        }
    }
    Ok(())
}
