//! Live previews through the CLI

use crate::badgedesk;
use crate::common::TestBackend;
use anyhow::Result;

#[test]
fn test_preview_writes_image() -> Result<()> {
    let backend = TestBackend::start()?;
    let out = backend.dir().join("card.svg");
    let out_arg = out.to_string_lossy().to_string();

    let result = badgedesk!(
        backend.config(),
        "preview",
        "--name",
        "Ivan Petrov",
        "--org",
        "Acme",
        "-o",
        &out_arg
    )
    .assert_success()?;
    assert!(result.contains_stdout("image/svg+xml"));

    let svg = std::fs::read_to_string(&out)?;
    assert!(svg.starts_with("<svg"));
    assert!(svg.contains("Ivan Petrov"));
    assert!(svg.contains("Acme"));
    Ok(())
}

#[test]
fn test_preview_prints_data_uri() -> Result<()> {
    let backend = TestBackend::start()?;

    let result = badgedesk!(backend.config(), "preview", "--name", "Ivan").assert_success()?;
    assert!(result.stdout.trim().starts_with("data:image/svg+xml;base64,"));
    Ok(())
}

#[test]
fn test_preview_without_name_fails() -> Result<()> {
    let backend = TestBackend::start()?;

    let result = badgedesk!(backend.config(), "preview", "--org", "Acme").assert_failure()?;
    assert!(result.contains_stderr("Full name is empty"));
    Ok(())
}

#[test]
fn test_edit_and_recover_previews_use_stored_profile() -> Result<()> {
    let backend = TestBackend::start()?;
    let config = backend.config();

    let created =
        badgedesk!(config, "create", "--name", "Maria Ivanova", "--dept", "R&D").assert_success()?;
    let id = created.parse_profile_id().expect("profile id in output");

    let out = backend.dir().join("edit.svg");
    let out_arg = out.to_string_lossy().to_string();
    badgedesk!(config, "preview", "--edit", &id, "--org", "Acme", "-o", &out_arg).assert_success()?;
    let svg = std::fs::read_to_string(&out)?;
    assert!(svg.contains("Maria Ivanova"));
    assert!(svg.contains("Acme"));
    assert!(svg.contains("R&amp;D"));

    let out = backend.dir().join("recover.svg");
    let out_arg = out.to_string_lossy().to_string();
    badgedesk!(config, "preview", "--recover", &id, "-o", &out_arg).assert_success()?;
    assert!(std::fs::read_to_string(&out)?.contains("Maria Ivanova"));

    let missing = badgedesk!(config, "preview", "--recover", "NOPE0000").assert_failure()?;
    assert!(missing.contains_stderr("Profile not found"));
    Ok(())
}
