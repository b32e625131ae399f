//! Create, list, update, recover and delete profiles through the CLI

use crate::badgedesk;
use crate::common::TestBackend;
use anyhow::Result;

#[test]
fn test_create_list_update_delete() -> Result<()> {
    let backend = TestBackend::start()?;
    let config = backend.config();

    let created = badgedesk!(
        config,
        "create",
        "--name",
        "Ivan Petrov",
        "--org",
        "Acme",
        "--expires",
        "31.12.2030"
    )
    .assert_success()?;
    let id = created.parse_profile_id().expect("profile id in output");

    let listed = badgedesk!(config, "profiles").assert_success()?;
    assert!(listed.contains_stdout("Ivan Petrov"));
    assert!(listed.contains_stdout("31.12.2030"));
    assert!(listed.contains_stdout(&id));

    let count = badgedesk!(config, "count").assert_success()?;
    assert_eq!(count.stdout.trim(), "1");

    badgedesk!(config, "update", &id, "--name", "Ivan Sidorov").assert_success()?;
    let found = badgedesk!(config, "profiles", "sidorov").assert_success()?;
    assert!(found.contains_stdout("Ivan Sidorov"));
    // Organization survives an update that does not mention it
    assert!(found.contains_stdout("Acme"));

    badgedesk!(config, "recover", &id, "--pattern-bw").assert_success()?;

    badgedesk!(config, "delete", &id).stdin("n\n").assert_success()?;
    assert_eq!(badgedesk!(config, "count").assert_success()?.stdout.trim(), "1");

    badgedesk!(config, "delete", &id, "-y").assert_success()?;
    assert_eq!(badgedesk!(config, "count").assert_success()?.stdout.trim(), "0");

    let empty = badgedesk!(config, "profiles").assert_success()?;
    assert!(empty.contains_stdout("No profiles found"));
    Ok(())
}

#[test]
fn test_validation_errors_fail_the_command() -> Result<()> {
    let backend = TestBackend::start()?;
    let config = backend.config();

    let missing_name = badgedesk!(config, "create", "--org", "Acme").assert_failure()?;
    assert!(missing_name.contains_stderr("Full name is required"));

    let bad_date =
        badgedesk!(config, "create", "--name", "Ivan", "--expires", "2030-12-31").assert_failure()?;
    assert!(bad_date.contains_stderr("invalid date format"));

    let unknown = badgedesk!(config, "update", "NOPE0000", "--name", "X").assert_failure()?;
    assert!(unknown.contains_stderr("Profile not found"));

    // The recover form has no name field
    let created = badgedesk!(config, "create", "--name", "Maria").assert_success()?;
    let id = created.parse_profile_id().expect("profile id in output");
    badgedesk!(config, "recover", &id, "--name", "Other").assert_failure()?;
    Ok(())
}

#[test]
fn test_thirty_day_expiration() -> Result<()> {
    let backend = TestBackend::start()?;
    let config = backend.config();

    let expected = badge_core::dates::thirty_days_from(badge_core::dates::today());
    badgedesk!(config, "create", "--name", "Temp Worker", "--thirty-days").assert_success()?;

    let listed = badgedesk!(config, "profiles").assert_success()?;
    assert!(listed.contains_stdout(&expected));
    Ok(())
}

#[test]
fn test_unreachable_backend() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let config = dir.path().join("config.toml");

    // Reserve a port, then close it
    let listener = std::net::TcpListener::bind("127.0.0.1:0")?;
    let addr = listener.local_addr()?.to_string();
    drop(listener);
    crate::common::write_config(&config, &addr)?;

    badgedesk!(&config, "count").assert_failure()?;
    let create = badgedesk!(&config, "create", "--name", "Ivan").assert_failure()?;
    assert!(create.contains_stderr("Failed to create profile"));
    Ok(())
}
