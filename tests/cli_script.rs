use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use predicates::str::contains;
use tempfile::TempDir;

fn shell(home: &Path, input: &str) -> assert_cmd::assert::Assert {
    Command::cargo_bin("fundraising_cli")
        .unwrap()
        .env("FUNDRAISING_HOME", home)
        .env("FUNDRAISING_CLI_SCRIPT", "1")
        .env("RUST_LOG", "off")
        .write_stdin(input.to_string())
        .assert()
}

#[test]
fn script_mode_records_and_shows_dashboard() {
    let home = TempDir::new().unwrap();
    let input = "pledge-add \"Mary Wanjiku\" Eagles 5000\n\
                 cash-add \"Mary Wanjiku\" eagles 2000 --date 2024-03-01\n\
                 expense-add Chairs 500 --date 2024-03-02\n\
                 dashboard\n\
                 exit\n";

    shell(home.path(), input)
        .success()
        .stdout(contains("Pledge from Mary Wanjiku (Eagles) for KES 5,000"))
        .stdout(contains("Cash received : KES 2,000"))
        .stdout(contains("Net balance   : KES 1,500"));

    let slot = fs::read_to_string(home.path().join("dcd_fundraising_v20.json")).unwrap();
    assert!(slot.contains("\"Mary Wanjiku\""));
}

#[test]
fn saves_report_updated_totals() {
    let home = TempDir::new().unwrap();
    shell(home.path(), "cash-add Ann Youth 300\n")
        .success()
        .stdout(contains("Saved. Cash received KES 300 | Expenses KES 0 | Net KES 300"));
}

#[test]
fn invalid_input_is_reported_and_the_shell_continues() {
    let home = TempDir::new().unwrap();
    let input = "pledge-add Ann Choir 100\n\
                 pledge-add Ann\n\
                 pledge-add Ann Guests 100\n";

    shell(home.path(), input)
        .success()
        .stdout(contains("unknown department `Choir`"))
        .stdout(contains("usage: pledge-add <name> <department> <amount>"))
        .stdout(contains("recorded as"));
}

#[test]
fn unknown_command_suggests_closest_match() {
    let home = TempDir::new().unwrap();
    shell(home.path(), "dashbord\n")
        .success()
        .stdout(contains("Unknown command `dashbord`"))
        .stdout(contains("Suggestion: `dashboard`?"));
}

#[test]
fn pledges_table_shows_balances() {
    let home = TempDir::new().unwrap();
    let input = "pledge-add Grace Youth 100\n\
                 pledges\n\
                 departments\n";
    shell(home.path(), input)
        .success()
        .stdout(contains("Balance"))
        .stdout(contains("pending"))
        .stdout(contains("Daughters of Faith"));
}

#[test]
fn csv_import_reports_imported_and_skipped_rows() {
    let home = TempDir::new().unwrap();
    let csv = home.path().join("pledges.csv");
    fs::write(&csv, "name,department,amount\nAnn,Eagles,100\nBen,,50\n,Youth,20\n").unwrap();

    shell(home.path(), &format!("import-csv \"{}\"\npledges\n", csv.display()))
        .success()
        .stdout(contains("Imported 2 pledges."))
        .stdout(contains("Skipped 1 lines"))
        .stdout(contains("Guests"));
}

#[test]
fn destructive_commands_need_yes_in_script_mode() {
    let home = TempDir::new().unwrap();
    shell(home.path(), "pledge-add Ann Guests 100\nreset\n")
        .success()
        .stdout(contains("pass --yes"));
    assert!(fs::read_to_string(home.path().join("dcd_fundraising_v20.json"))
        .unwrap()
        .contains("Ann"));

    shell(home.path(), "reset --yes\n")
        .success()
        .stdout(contains("All records erased."));
    assert!(!home.path().join("dcd_fundraising_v20.json").exists());
}

#[test]
fn backup_then_restore_brings_records_back() {
    let home = TempDir::new().unwrap();
    shell(home.path(), "pledge-add Ann Guests 100\nbackup\nbackups\n")
        .success()
        .stdout(contains("Backup written to"))
        .stdout(contains("dcd-backup-"));

    let backup = fs::read_dir(home.path().join("backups"))
        .unwrap()
        .next()
        .unwrap()
        .unwrap()
        .path();

    shell(
        home.path(),
        &format!("reset --yes\nrestore \"{}\" --yes\npledges\n", backup.display()),
    )
    .success()
    .stdout(contains("Backup restored."))
    .stdout(contains("Ann"));
}

#[test]
fn malformed_backup_leaves_records_alone() {
    let home = TempDir::new().unwrap();
    let bad = home.path().join("bad.json");
    fs::write(&bad, "{}").unwrap();

    shell(
        home.path(),
        &format!("pledge-add Ann Guests 100\nrestore \"{}\" --yes\n", bad.display()),
    )
    .success()
    .stdout(contains("Invalid backup file format"))
    .stdout(contains("Backup restored.").not());

    let slot = fs::read_to_string(home.path().join("dcd_fundraising_v20.json")).unwrap();
    assert!(slot.contains("Ann"));
}

#[test]
fn help_lists_commands() {
    let home = TempDir::new().unwrap();
    shell(home.path(), "help\nhelp cash-add\nversion\n")
        .success()
        .stdout(contains("import-csv"))
        .stdout(contains("--pledge ID"))
        .stdout(contains("Fundraising Core"));
}
