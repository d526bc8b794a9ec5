//! CLI smoke tests. Everything runs offline via --no-history; nothing here
//! needs a database.

use anyhow::Result;
use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn migres() -> Command {
    Command::cargo_bin("migres").unwrap()
}

#[test]
fn help_lists_subcommands() {
    migres()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("resolve"))
        .stdout(predicate::str::contains("test-data"))
        .stdout(predicate::str::contains("init"));
}

#[test]
fn resolve_offline_prints_ordered_plan() -> Result<()> {
    let temp_dir = TempDir::new()?;
    std::fs::write(temp_dir.path().join("V1__init.sql"), "CREATE TABLE t();")?;
    std::fs::write(temp_dir.path().join("V2__more.sql"), "CREATE TABLE u();")?;
    std::fs::write(temp_dir.path().join("R__view.sql"), "CREATE VIEW v;")?;

    migres()
        .args(["resolve", "--no-history", "--dir"])
        .arg(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("V1__init.sql"))
        .stdout(predicate::str::contains("3 migration(s) resolved"))
        .stdout(predicate::str::contains("2 versioned, 1 repeatable"));

    Ok(())
}

#[test]
fn resolve_json_output() -> Result<()> {
    let temp_dir = TempDir::new()?;
    std::fs::write(temp_dir.path().join("B1__seed.sql"), "CREATE TABLE s();")?;

    let output = migres()
        .args(["resolve", "--no-history", "--format", "json", "--dir"])
        .arg(temp_dir.path())
        .output()?;
    assert!(output.status.success());

    let plan: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(plan[0]["kind"], "baseline");
    assert_eq!(plan[0]["version"], "1");
    assert_eq!(plan[0]["script"], "B1__seed.sql");

    Ok(())
}

#[test]
fn resolve_fails_on_duplicate_versions() -> Result<()> {
    let temp_dir = TempDir::new()?;
    std::fs::write(temp_dir.path().join("V1__init.sql"), "CREATE TABLE a();")?;
    std::fs::write(temp_dir.path().join("V1__dup.sql"), "CREATE TABLE b();")?;

    migres()
        .args(["resolve", "--no-history", "--dir"])
        .arg(temp_dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("duplicate"));

    Ok(())
}

#[test]
fn resolve_without_target_demands_configuration() -> Result<()> {
    let temp_dir = TempDir::new()?;

    migres()
        .current_dir(temp_dir.path())
        .env_remove("DATABASE_URL")
        .arg("resolve")
        .assert()
        .failure()
        .stderr(predicate::str::contains("No target database configured"));

    Ok(())
}

#[test]
fn test_data_set_is_separate() -> Result<()> {
    let temp_dir = TempDir::new()?;
    std::fs::write(temp_dir.path().join("V1__init.sql"), "CREATE TABLE t();")?;
    std::fs::write(
        temp_dir.path().join("T1__sample_rows.sql"),
        "INSERT INTO t DEFAULT VALUES;",
    )?;

    migres()
        .args(["test-data", "--dir"])
        .arg(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("T1__sample_rows.sql"))
        .stdout(predicate::str::contains("V1__init.sql").not());

    // And the production plan never contains the test-data script
    migres()
        .args(["resolve", "--no-history", "--dir"])
        .arg(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("T1__sample_rows.sql").not());

    Ok(())
}

#[test]
fn init_scaffolds_config_and_directory() -> Result<()> {
    let temp_dir = TempDir::new()?;

    migres()
        .current_dir(temp_dir.path())
        .arg("init")
        .assert()
        .success();

    assert!(temp_dir.path().join("migres.yaml").exists());
    assert!(temp_dir.path().join("migrations").is_dir());

    // Running init twice refuses to clobber the config
    migres()
        .current_dir(temp_dir.path())
        .arg("init")
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));

    Ok(())
}
