use assert_cmd::Command;
use predicates::{prelude::PredicateBooleanExt, str::contains};
use tempfile::TempDir;

const BIN_NAME: &str = "budget_tracker_cli";

fn script_command(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin(BIN_NAME).expect("binary exists");
    cmd.env("BUDGET_TRACKER_CLI_SCRIPT", "1")
        .env("BUDGET_TRACKER_HOME", home.path())
        .env("NO_COLOR", "1");
    cmd
}

#[test]
fn help_command_prints_overview() {
    let home = tempfile::tempdir().expect("tempdir");
    script_command(&home)
        .write_stdin("help\nexit\n")
        .assert()
        .success()
        .stdout(contains("Commands").and(contains("summary")));
}

#[test]
fn script_mode_records_entries_and_reports_totals() {
    let home = tempfile::tempdir().expect("tempdir");
    let input = "new inc salary 1000\nnew exp rent 400\nsummary\nexit\n";

    script_command(&home)
        .write_stdin(input)
        .assert()
        .success()
        .stdout(
            contains("Income added: salary")
                .and(contains("Available funds: $600.00"))
                .and(contains("(40%)")),
        );

    let json = std::fs::read_to_string(home.path().join("entries.json")).expect("entries file");
    assert!(json.contains("\"salary\""));
    assert!(json.contains("\"exp\""));
}

#[test]
fn entries_survive_between_runs() {
    let home = tempfile::tempdir().expect("tempdir");
    script_command(&home)
        .write_stdin("new exp coffee 3.5\nexit\n")
        .assert()
        .success();

    script_command(&home)
        .write_stdin("list\nsummary\nexit\n")
        .assert()
        .success()
        .stdout(contains("coffee").and(contains("(NaN%)")));
}

#[test]
fn empty_draft_is_reported_not_fatal() {
    let home = tempfile::tempdir().expect("tempdir");
    script_command(&home)
        .write_stdin("add\nlist\nexit\n")
        .assert()
        .success()
        .stdout(contains("Please fill in all fields").and(contains("No entries")));
}

#[test]
fn unknown_command_suggests_closest_match() {
    let home = tempfile::tempdir().expect("tempdir");
    script_command(&home)
        .write_stdin("lst\nexit\n")
        .assert()
        .success()
        .stdout(contains("Unknown command `lst`").and(contains("Did you mean `list`?")));
}
