//! Basic CLI E2E tests.
//!
//! Tests invoke CLI commands via cargo run against the dev data directory
//! and verify outputs. The full unlock flow lives in a single test so the
//! shared session file is never touched concurrently.

use std::process::Command;

/// Run a CLI command against the dev environment and return output.
fn run_cli(args: &[&str]) -> (String, String, i32) {
    let output = Command::new("cargo")
        .args(["run", "-p", "futurefeed-cli", "--"])
        .args(args)
        .env("FUTUREFEED_ENV", "dev")
        .env_remove("GEMINI_API_KEY")
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

fn run_cli_success(args: &[&str]) -> String {
    let (stdout, stderr, code) = run_cli(args);
    assert_eq!(code, 0, "CLI command failed: {args:?}\nstderr: {stderr}");
    stdout
}

#[test]
fn test_help() {
    let stdout = run_cli_success(&["--help"]);
    assert!(stdout.contains("Tap an app icon"));
}

#[test]
fn test_apps_lists_catalog() {
    let stdout = run_cli_success(&["apps"]);
    assert!(stdout.contains("insta"));
    assert!(stdout.contains("InstaScroll"));
    assert!(stdout.contains("Distraction"));
    assert!(stdout.contains("Utility"));
}

#[test]
fn test_full_unlock_flow() {
    run_cli_success(&["reset"]);

    // Onboarding.
    let stdout = run_cli_success(&["goal", "set", "Learn Go by Friday", "--category", "coding"]);
    assert!(stdout.contains("GoalSubmitted"));

    // Utility taps pass through without intercepting.
    let stdout = run_cli_success(&["tap", "mail"]);
    assert!(stdout.contains("AppOpened"));

    // Distraction tap intercepts; the canned provider supplies 3 items, the
    // first of which is a quiz whose correct option is listed first.
    let stdout = run_cli_success(&["tap", "insta", "--canned"]);
    assert!(stdout.contains("InterceptStarted"));
    assert!(stdout.contains("FeedReady"));

    // Wrong quiz answers don't consume the item.
    let (_, _, code) = run_cli(&["complete", "--answer", "2"]);
    assert_ne!(code, 0, "wrong quiz answer must exit nonzero");

    let stdout = run_cli_success(&["complete", "--answer", "1"]);
    assert!(stdout.contains("Correct!"));
    assert!(stdout.contains("FeedItemCompleted"));

    run_cli_success(&["complete"]);
    let stdout = run_cli_success(&["complete"]);
    assert!(stdout.contains("RewardUnlocked"));

    // Close early; the session is back home with counters reset.
    let stdout = run_cli_success(&["close"]);
    assert!(stdout.contains("RewardClosed"));

    let stdout = run_cli_success(&["status"]);
    assert!(stdout.contains("\"view\": \"home\""));
    assert!(stdout.contains("\"items_consumed\": 0"));

    run_cli_success(&["reset"]);
}

#[test]
fn test_demo_canned_runs_to_completion() {
    let stdout = run_cli_success(&["demo", "--canned"]);
    assert!(stdout.contains("RewardUnlocked"));
    assert!(stdout.contains("RewardExpired"));
    assert!(stdout.contains("Demo finished"));
}
