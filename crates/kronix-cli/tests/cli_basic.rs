//! CLI end-to-end tests.
//!
//! Each test drives the `kronix` binary against its own temporary data
//! directory and checks the JSON it prints.

use std::io::Write;
use std::process::{Command, Stdio};

use serde_json::Value;
use tempfile::TempDir;

struct Cli {
    dir: TempDir,
}

impl Cli {
    fn new() -> Self {
        Self {
            dir: TempDir::new().unwrap(),
        }
    }

    fn command(&self, args: &[&str]) -> Command {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_kronix"));
        cmd.args(args)
            .env("KRONIX_DATA_DIR", self.dir.path())
            .env_remove("KRONIX_LOG");
        cmd
    }

    /// Run with `stdin` piped in. Returns (stdout, stderr, exit code).
    fn run_with_input(&self, args: &[&str], stdin: &str) -> (String, String, i32) {
        let mut child = self
            .command(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .expect("failed to spawn kronix");
        child.stdin.take().unwrap().write_all(stdin.as_bytes()).unwrap();
        let output = child.wait_with_output().unwrap();
        (
            String::from_utf8_lossy(&output.stdout).to_string(),
            String::from_utf8_lossy(&output.stderr).to_string(),
            output.status.code().unwrap_or(-1),
        )
    }

    fn run(&self, args: &[&str]) -> (String, String, i32) {
        self.run_with_input(args, "")
    }

    fn json(&self, args: &[&str]) -> Value {
        let (stdout, stderr, code) = self.run(args);
        assert_eq!(code, 0, "kronix {args:?} failed: {stderr}");
        serde_json::from_str(&stdout).unwrap_or_else(|e| panic!("bad JSON from {args:?}: {e}\n{stdout}"))
    }
}

#[test]
fn task_lifecycle() {
    let cli = Cli::new();
    let added = cli.json(&["task", "add", "ship release", "--critical"]);
    assert_eq!(added["content"], "ship release");
    assert_eq!(added["is_mandatory"], true);
    let id = added["id"].as_i64().unwrap().to_string();

    let toggled = cli.json(&["task", "toggle", &id]);
    assert_eq!(toggled["is_done"], true);

    let list = cli.json(&["task", "list"]);
    assert_eq!(list.as_array().unwrap().len(), 1);
    assert_eq!(list[0]["is_done"], true);

    let deleted = cli.json(&["task", "delete", &id, "--yes"]);
    assert_eq!(deleted["deleted"], true);
    assert_eq!(cli.json(&["task", "list"]), Value::Array(vec![]));
}

#[test]
fn blank_task_is_ignored() {
    let cli = Cli::new();
    let added = cli.json(&["task", "add", "   "]);
    assert_eq!(added["added"], false);
    assert_eq!(cli.json(&["task", "list"]), Value::Array(vec![]));
}

#[test]
fn declined_delete_keeps_the_task() {
    let cli = Cli::new();
    let id = cli.json(&["task", "add", "keep"])["id"].as_i64().unwrap().to_string();

    let (stdout, stderr, code) = cli.run_with_input(&["task", "delete", &id], "n\n");
    assert_eq!(code, 0);
    assert!(stderr.contains("Delete protocol?"));
    let result: Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(result["deleted"], false);
    assert_eq!(cli.json(&["task", "list"]).as_array().unwrap().len(), 1);
}

#[test]
fn unknown_task_is_an_error() {
    let cli = Cli::new();
    let (_, stderr, code) = cli.run(&["task", "toggle", "42"]);
    assert_eq!(code, 1);
    assert!(stderr.starts_with("error: "), "{stderr}");
    assert!(stderr.contains("not found"));
}

#[test]
fn habit_days_toggle_and_validate() {
    let cli = Cli::new();
    let id = cli.json(&["habit", "add", "read"])["id"].as_i64().unwrap().to_string();

    assert_eq!(cli.json(&["habit", "toggle", &id, "5"])["marked"], true);
    assert_eq!(cli.json(&["habit", "toggle", &id, "12"])["marked"], true);
    let list = cli.json(&["habit", "list"]);
    assert_eq!(list[0]["completed_days"], "5,12");
    assert_eq!(list[0]["total"], 2);
    assert_eq!(list[0]["efficiency"], 6);

    let (_, stderr, code) = cli.run(&["habit", "toggle", &id, "32"]);
    assert_eq!(code, 1);
    assert!(stderr.starts_with("error: "));
}

#[test]
fn sleep_log_updates_same_day() {
    let cli = Cli::new();
    let first = cli.json(&["sleep", "log", "6", "--date", "2026-10-18"]);
    assert_eq!(first["result"]["outcome"], "inserted");
    let again = cli.json(&["sleep", "log", "7.5", "--date", "2026-10-18"]);
    assert_eq!(again["result"]["outcome"], "updated");

    let list = cli.json(&["sleep", "list"]);
    assert_eq!(list.as_array().unwrap().len(), 1);
    assert_eq!(list[0]["hours"], 7.5);

    let (_, stderr, code) = cli.run(&["sleep", "log", "--date", "2026-10-18", "--", "-1"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("invalid sleep hours"), "{stderr}");
    assert_eq!(cli.json(&["sleep", "list"])[0]["hours"], 7.5);
}

#[test]
fn integrity_reflects_state() {
    let cli = Cli::new();
    let empty = cli.json(&["stats", "integrity"]);
    assert_eq!(empty["average"], 0);
    assert_eq!(empty["status"], "critical");
    assert_eq!(empty["alert"], true);

    let id = cli.json(&["task", "add", "focus", "--critical"])["id"].as_i64().unwrap().to_string();
    cli.json(&["task", "toggle", &id]);
    let activity = cli.json(&["stats", "activity"]);
    let buckets = activity.as_array().unwrap();
    assert_eq!(buckets.len(), 7);
    assert_eq!(buckets[6]["xp"], 25);

    let dashboard = cli.json(&["stats", "dashboard"]);
    assert_eq!(dashboard["tasks"]["total_xp"], 25);
}

#[test]
fn export_import_and_reset() {
    let cli = Cli::new();
    cli.json(&["task", "add", "backed up"]);
    let out = TempDir::new().unwrap();
    let exported = cli.json(&["data", "export", "--dir", out.path().to_str().unwrap()]);
    let path = exported["path"].as_str().unwrap().to_string();
    assert!(path.ends_with("kronix_backup.json"));

    let reset = cli.json(&["data", "reset", "--yes"]);
    assert_eq!(reset["reset"], true);
    assert_eq!(cli.json(&["task", "list"]), Value::Array(vec![]));

    let summary = cli.json(&["data", "import", &path]);
    assert_eq!(summary["tasks"], 1);
    assert_eq!(cli.json(&["task", "list"])[0]["content"], "backed up");
}

#[test]
fn corrupt_import_is_rejected() {
    let cli = Cli::new();
    cli.json(&["task", "add", "survivor"]);
    let bad = cli.dir.path().join("bad.json");
    std::fs::write(&bad, "{ nope").unwrap();

    let (_, stderr, code) = cli.run(&["data", "import", bad.to_str().unwrap()]);
    assert_eq!(code, 1);
    assert!(stderr.contains("Import error"));
    assert_eq!(cli.json(&["task", "list"])[0]["content"], "survivor");
}

#[test]
fn config_get_set() {
    let cli = Cli::new();
    let (stdout, _, code) = cli.run(&["config", "get", "timer.work_minutes"]);
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "25");

    let (_, _, code) = cli.run(&["config", "set", "timer.work_minutes", "50"]);
    assert_eq!(code, 0);
    let (stdout, _, _) = cli.run(&["config", "get", "timer.work_minutes"]);
    assert_eq!(stdout.trim(), "50");

    let (_, stderr, code) = cli.run(&["config", "get", "nope"]);
    assert_eq!(code, 1);
    assert!(stderr.starts_with("error: "));
}

#[test]
fn timer_requires_objective() {
    let cli = Cli::new();
    let (_, stderr, code) = cli.run(&["timer", "run", "--objective", "  "]);
    assert_eq!(code, 1);
    assert!(stderr.contains("error: "));
}

#[test]
fn completions_are_generated() {
    let cli = Cli::new();
    let (stdout, _, code) = cli.run(&["completions", "bash"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("kronix"));
}
