use assert_cmd::Command;
use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;
use tempfile::TempDir;

const BIN_NAME: &str = "fintrack";

fn fintrack(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin(BIN_NAME).expect("binary exists");
    cmd.env("FINTRACK_DATA_DIR", dir.path());
    cmd.env_remove("FINTRACK_LOG");
    cmd
}

fn add(dir: &TempDir, args: &[&str]) {
    fintrack(dir)
        .args(["transaction", "add"])
        .args(args)
        .assert()
        .success()
        .stdout(contains("Created transaction"));
}

#[test]
fn help_lists_commands() {
    let dir = TempDir::new().unwrap();
    fintrack(&dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(contains("transaction").and(contains("analytics")).and(contains("export")));
}

#[test]
fn init_seeds_default_categories() {
    let dir = TempDir::new().unwrap();
    fintrack(&dir)
        .arg("init")
        .assert()
        .success()
        .stdout(contains("Initialization complete"));

    assert!(dir.path().join("data").join("categories.json").exists());
    assert!(dir.path().join("config.json").exists());

    fintrack(&dir)
        .args(["category", "list"])
        .assert()
        .success()
        .stdout(contains("Housing").and(contains("Salary")));
}

#[test]
fn transaction_add_and_filtered_list() {
    let dir = TempDir::new().unwrap();
    add(&dir, &["expense", "42.50", "Weekly groceries", "-c", "Food & Dining", "-d", "2025-03-10"]);
    add(&dir, &["income", "3000", "March salary", "-c", "Salary", "-d", "2025-03-01"]);

    fintrack(&dir)
        .args(["transaction", "list"])
        .assert()
        .success()
        .stdout(contains("Weekly groceries").and(contains("March salary")));

    fintrack(&dir)
        .args(["transaction", "list", "--type", "income"])
        .assert()
        .success()
        .stdout(contains("March salary").and(contains("Weekly groceries").not()));

    fintrack(&dir)
        .args(["transaction", "list", "--search", "GROCER"])
        .assert()
        .success()
        .stdout(contains("Weekly groceries").and(contains("March salary").not()));
}

#[test]
fn transaction_add_rejects_unknown_category() {
    let dir = TempDir::new().unwrap();
    fintrack(&dir)
        .args(["transaction", "add", "expense", "10", "Lunch", "-c", "Yachts"])
        .assert()
        .failure()
        .stderr(contains("Category not found: Yachts"));
}

#[test]
fn transaction_add_rejects_non_positive_amount() {
    let dir = TempDir::new().unwrap();
    fintrack(&dir)
        .args(["transaction", "add", "expense", "0", "Nothing", "-c", "Shopping"])
        .assert()
        .failure()
        .stderr(contains("valid amount"));
}

#[test]
fn export_writes_signed_csv_to_stdout() {
    let dir = TempDir::new().unwrap();
    add(&dir, &["expense", "42.50", "Weekly groceries", "-c", "Food & Dining", "-d", "2025-03-10"]);
    add(&dir, &["income", "3000", "March salary", "-c", "Salary", "-d", "2025-03-01"]);

    fintrack(&dir)
        .args(["export", "--output", "-"])
        .assert()
        .success()
        .stdout(
            contains("Date,Type,Category,Description,Amount\n")
                .and(contains("2025-03-10,Expense,Food & Dining,Weekly groceries,-42.50\n"))
                .and(contains("2025-03-01,Income,Salary,March salary,3000.00\n")),
        );
}

#[test]
fn budget_status_flags_overspend() {
    let dir = TempDir::new().unwrap();
    add(&dir, &["expense", "150", "Concert tickets", "-c", "Entertainment"]);

    fintrack(&dir)
        .args(["budget", "set", "Entertainment", "100"])
        .assert()
        .success();

    fintrack(&dir)
        .args(["budget", "status"])
        .assert()
        .success()
        .stdout(contains("Entertainment").and(contains("OVER")));
}

#[test]
fn budget_rejects_income_category() {
    let dir = TempDir::new().unwrap();
    fintrack(&dir)
        .args(["budget", "set", "Salary", "100"])
        .assert()
        .failure()
        .stderr(contains("income category"));
}

#[test]
fn config_changes_display_currency() {
    let dir = TempDir::new().unwrap();
    fintrack(&dir)
        .args(["config", "--display-currency", "eur"])
        .assert()
        .success()
        .stdout(contains("Display currency: EUR"));

    fintrack(&dir)
        .arg("config")
        .assert()
        .success()
        .stdout(contains("Display currency: EUR"));
}

#[test]
fn analytics_and_overview_render() {
    let dir = TempDir::new().unwrap();
    add(&dir, &["income", "1000", "Paycheck", "-c", "Salary"]);
    add(&dir, &["expense", "250", "Rent share", "-c", "Housing"]);

    fintrack(&dir)
        .args(["analytics", "--period", "3"])
        .assert()
        .success()
        .stdout(contains("3 months").and(contains("Savings Rate")).and(contains("75%")));

    fintrack(&dir)
        .arg("overview")
        .assert()
        .success()
        .stdout(contains("Overview (USD)").and(contains("Rent share")));
}

#[test]
fn analytics_rejects_oversized_period() {
    let dir = TempDir::new().unwrap();
    fintrack(&dir)
        .args(["analytics", "--period", "4294967295"])
        .assert()
        .failure()
        .stderr(contains("between 1 and 120 months"));

    fintrack(&dir)
        .args(["config", "--period", "121"])
        .assert()
        .failure()
        .stderr(contains("between 1 and 120 months"));
}

#[test]
fn budget_status_for_a_past_month() {
    let dir = TempDir::new().unwrap();
    add(&dir, &["expense", "150", "Concert tickets", "-c", "Entertainment", "-d", "2025-01-05"]);

    fintrack(&dir)
        .args(["budget", "set", "Entertainment", "100"])
        .assert()
        .success();

    fintrack(&dir)
        .args(["budget", "status", "--month", "2025-01"])
        .assert()
        .success()
        .stdout(contains("Budget Status: 2025-01").and(contains("OVER")));

    fintrack(&dir)
        .args(["budget", "status", "--month", "2025-13"])
        .assert()
        .failure()
        .stderr(contains("Invalid month: 13"));
}
