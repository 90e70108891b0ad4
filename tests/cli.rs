use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use predicates::str::contains;
use tempfile::TempDir;

const BIN_NAME: &str = "budget";

fn budget(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin(BIN_NAME).expect("binary exists");
    cmd.env("BUDGET_LEDGER_DATA_DIR", dir);
    cmd.env_remove("RUST_LOG");
    cmd
}

fn add(dir: &Path, kind: &str, label: &str, amount: &str, date: &str) -> String {
    let output = budget(dir)
        .args([kind, "add", label, amount, "--date", date])
        .output()
        .expect("command runs");
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).expect("utf-8 output");
    stdout
        .lines()
        .find_map(|line| line.strip_prefix("ID: "))
        .expect("id line")
        .trim()
        .to_string()
}

#[test]
fn add_and_show_month() {
    let temp = TempDir::new().unwrap();

    budget(temp.path())
        .args(["income", "add", "Salary", "5000", "--date", "2024-03-01"])
        .assert()
        .success()
        .stdout(contains("Added income 'Salary' of ₹5000.00 on 2024-03-01"));

    add(temp.path(), "expense", "Rent", "1200", "2024-03-05");

    budget(temp.path())
        .args(["show", "--month", "3", "--year", "2024"])
        .assert()
        .success()
        .stdout(
            contains("March 2024")
                .and(contains("Salary"))
                .and(contains("Rent"))
                .and(contains("₹3800.00")),
        );

    assert!(temp.path().join("data").join("budget_data.json").exists());
}

#[test]
fn summary_of_empty_month_is_zero() {
    let temp = TempDir::new().unwrap();

    budget(temp.path())
        .args(["summary", "--month", "1", "--year", "2030"])
        .assert()
        .success()
        .stdout(contains("Summary for January 2030").and(contains("₹0.00")));
}

#[test]
fn delete_updates_totals() {
    let temp = TempDir::new().unwrap();
    add(temp.path(), "income", "Salary", "5000", "2024-03-01");
    let rent = add(temp.path(), "expense", "Rent", "1200", "2024-03-05");

    budget(temp.path())
        .args(["delete", &rent])
        .assert()
        .success()
        .stdout(contains("Deleted expense 'Rent'"));

    budget(temp.path())
        .args(["summary", "--month", "3", "--year", "2024"])
        .assert()
        .success()
        .stdout(contains("Total Expenses:").and(contains("₹5000.00")));

    budget(temp.path())
        .args(["delete", &rent])
        .assert()
        .failure()
        .stderr(contains("Record not found"));
}

#[test]
fn delete_with_mismatched_kind_or_month_leaves_record() {
    let temp = TempDir::new().unwrap();
    let rent = add(temp.path(), "expense", "Rent", "1200", "2024-03-05");

    budget(temp.path())
        .args(["delete", &rent, "--kind", "income"])
        .assert()
        .success()
        .stdout(contains("nothing deleted"));

    budget(temp.path())
        .args(["delete", &rent, "--month", "2024-3"])
        .assert()
        .success()
        .stdout(contains("nothing deleted"));

    budget(temp.path())
        .args(["expense", "list", "--month", "3", "--year", "2024"])
        .assert()
        .success()
        .stdout(contains("Rent").and(contains("Total: ₹1200.00")));

    budget(temp.path())
        .args(["delete", &rent, "--kind", "expense", "--month", "2024-2"])
        .assert()
        .success()
        .stdout(contains("Deleted expense 'Rent'"));
}

#[test]
fn invalid_amount_is_rejected() {
    let temp = TempDir::new().unwrap();

    budget(temp.path())
        .args(["expense", "add", "Coffee", "0", "--date", "2024-03-01"])
        .assert()
        .failure()
        .stderr(contains("Amount must be at least 0.01"));

    budget(temp.path())
        .arg("months")
        .assert()
        .success()
        .stdout(contains("No entries recorded yet."));
}

#[test]
fn large_amounts_stay_exact() {
    let temp = TempDir::new().unwrap();
    add(temp.path(), "income", "Windfall", "10000000000000", "2024-03-01");
    add(temp.path(), "income", "Windfall", "10000000000000", "2024-03-02");

    budget(temp.path())
        .args(["income", "add", "Too much", "92233720368547758", "--date", "2024-03-03"])
        .assert()
        .failure()
        .stderr(contains("Amount too large"));

    budget(temp.path())
        .args(["summary", "--month", "3", "--year", "2024"])
        .assert()
        .success()
        .stdout(contains("₹20000000000000.00"));
}

#[test]
fn amounts_round_half_up() {
    let temp = TempDir::new().unwrap();

    budget(temp.path())
        .args(["expense", "add", "Snacks", "10.999", "--date", "2024-03-01"])
        .assert()
        .success()
        .stdout(contains("of ₹11.00"));
}

#[test]
fn months_lists_populated_keys() {
    let temp = TempDir::new().unwrap();
    add(temp.path(), "expense", "Fuel", "45", "2023-12-02");
    add(temp.path(), "income", "Pay", "100", "2024-01-15");

    budget(temp.path())
        .arg("months")
        .assert()
        .success()
        .stdout(contains("2023-11").and(contains("2024-0")).and(contains("December 2023")));
}

#[test]
fn report_writes_named_file() {
    let temp = TempDir::new().unwrap();
    let out = temp.path().join("out");
    add(temp.path(), "income", "Salary", "5000", "2024-03-01");

    budget(temp.path())
        .args(["report", "--month", "3", "--year", "2024", "--output-dir"])
        .arg(&out)
        .assert()
        .success();

    let report = out.join("Infinity_Report_March_2024.html");
    let html = std::fs::read_to_string(report).unwrap();
    assert!(html.contains("Monthly Report: March 2024"));
    assert!(html.contains("No expenses data for this month."));
}

#[test]
fn report_with_missing_logo_fails_cleanly() {
    let temp = TempDir::new().unwrap();
    let out = temp.path().join("out");

    budget(temp.path())
        .args(["report", "--month", "3", "--year", "2024", "--output-dir"])
        .arg(&out)
        .arg("--logo")
        .arg(temp.path().join("missing.png"))
        .assert()
        .failure()
        .stderr(contains("Could not generate the report"));

    assert!(!out.join("Infinity_Report_March_2024.html").exists());
}

#[test]
fn export_csv_has_one_row_per_record() {
    let temp = TempDir::new().unwrap();
    let target = temp.path().join("ledger.csv");
    add(temp.path(), "income", "Salary", "5000", "2024-03-01");
    add(temp.path(), "expense", "Rent", "1200", "2024-03-05");

    budget(temp.path())
        .args(["export", "--format", "csv"])
        .arg(&target)
        .assert()
        .success()
        .stdout(contains("Exported 2 records"));

    let csv = std::fs::read_to_string(target).unwrap();
    assert_eq!(csv.lines().count(), 3);
    assert!(csv.starts_with("ID,Kind,Month,Date,Label,Amount"));
}

#[test]
fn theme_toggle_persists() {
    let temp = TempDir::new().unwrap();

    budget(temp.path())
        .args(["theme", "toggle"])
        .assert()
        .success()
        .stdout(contains("Theme set to dark"));

    budget(temp.path())
        .args(["theme", "show"])
        .assert()
        .success()
        .stdout(contains("Theme: dark"));
}

#[test]
fn history_lists_changes() {
    let temp = TempDir::new().unwrap();
    add(temp.path(), "income", "Gift", "50", "2024-02-14");

    add(temp.path(), "expense", "Rent", "1200", "2024-03-05");

    budget(temp.path())
        .arg("history")
        .assert()
        .success()
        .stdout(contains("added   income").and(contains("Gift")).and(contains("Rent")));

    budget(temp.path())
        .args(["history", "--month", "2024-1"])
        .assert()
        .success()
        .stdout(contains("Gift").and(contains("Rent").not()));

    budget(temp.path())
        .args(["history", "--month", "2023-0"])
        .assert()
        .success()
        .stdout(contains("No changes recorded for January 2023."));
}
