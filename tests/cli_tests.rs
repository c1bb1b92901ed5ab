//! Command-line surface tests
use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn scraper_cmd(workdir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("discourse-scraper").unwrap();
    cmd.current_dir(workdir.path())
        .env_remove("RUST_LOG")
        .env("DISCOURSE_SCRAPER__FORUM__BASE_URL", "http://127.0.0.1:9");
    cmd
}

#[test]
fn test_help_lists_subcommands() {
    let workdir = TempDir::new().unwrap();
    scraper_cmd(&workdir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("scrape"))
        .stdout(predicate::str::contains("login"))
        .stdout(predicate::str::contains("check"));
}

#[test]
fn test_config_reflects_environment_overrides() {
    let workdir = TempDir::new().unwrap();
    scraper_cmd(&workdir)
        .env("DISCOURSE_SCRAPER__FORUM__CATEGORY_ID", "99")
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("category_id = 99"))
        .stdout(predicate::str::contains("base_url = \"http://127.0.0.1:9\""));
}

#[test]
fn test_config_file_is_read_from_working_directory() {
    let workdir = TempDir::new().unwrap();
    std::fs::write(
        workdir.path().join("discourse-scraper.toml"),
        "[window]\ndate_from = \"2025-01-01\"\ndate_to = \"2025-04-14\"\n",
    )
    .unwrap();

    scraper_cmd(&workdir)
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("date_from = \"2025-01-01\""));
}

#[test]
fn test_check_without_session_fails() {
    let workdir = TempDir::new().unwrap();
    scraper_cmd(&workdir)
        .arg("check")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Forum Login Required"));
}

#[test]
fn test_scrape_without_session_in_non_interactive_mode_fails() {
    let workdir = TempDir::new().unwrap();
    scraper_cmd(&workdir)
        .args(["scrape", "--no-login"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Forum Login Required"));

    assert!(!workdir.path().join("downloaded_threads").exists());
}

#[test]
fn test_invalid_date_bound_is_rejected() {
    let workdir = TempDir::new().unwrap();
    scraper_cmd(&workdir)
        .args(["scrape", "--no-login", "--from", "January"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid date bound"));
}

#[test]
fn test_rc_file_overrides_toml_file() {
    let workdir = TempDir::new().unwrap();
    std::fs::write(workdir.path().join("discourse-scraper.toml"), "[forum]\ncategory_slug = \"from-toml\"\n").unwrap();
    std::fs::write(workdir.path().join(".discourse-scraper-rc"), "[forum]\ncategory_slug = \"from-rc\"\n").unwrap();

    scraper_cmd(&workdir)
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("category_slug = \"from-rc\""));
}

#[test]
fn test_explicit_config_file_overrides_rc_but_not_environment() {
    let workdir = TempDir::new().unwrap();
    std::fs::write(workdir.path().join(".discourse-scraper-rc"), "[forum]\ncategory_slug = \"from-rc\"\n").unwrap();
    std::fs::write(
        workdir.path().join("custom.toml"),
        "[forum]\ncategory_slug = \"from-flag\"\ncategory_id = 7\n",
    )
    .unwrap();

    scraper_cmd(&workdir)
        .env("DISCOURSE_SCRAPER__FORUM__CATEGORY_ID", "99")
        .args(["--config", "custom.toml", "config"])
        .assert()
        .success()
        .stdout(predicate::str::contains("category_slug = \"from-flag\""))
        .stdout(predicate::str::contains("category_id = 99"));
}

#[test]
fn test_missing_explicit_config_file_fails() {
    let workdir = TempDir::new().unwrap();
    scraper_cmd(&workdir)
        .args(["--config", "absent.toml", "config"])
        .assert()
        .failure();
}

#[test]
fn test_login_with_rejected_cookie_exits_with_error() {
    let workdir = TempDir::new().unwrap();
    scraper_cmd(&workdir)
        .arg("login")
        .write_stdin("not-a-real-token\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Forum Session Invalid"));

    // Saved before verification
    assert!(workdir.path().join("auth.json").exists());
}
