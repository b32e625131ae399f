//! Template management through the CLI

use crate::badgedesk;
use crate::common::TestBackend;
use anyhow::Result;

#[test]
fn test_template_lifecycle() -> Result<()> {
    let backend = TestBackend::start()?;
    let config = backend.config();

    let empty = badgedesk!(config, "templates", "list").assert_success()?;
    assert!(empty.contains_stdout("No templates found"));

    badgedesk!(
        config,
        "templates",
        "save",
        "night",
        "--pattern",
        "sys.bmp",
        "--font",
        "Cormorant-Bold.ttf",
        "--font-size",
        "20"
    )
    .assert_success()?;

    let listed = badgedesk!(config, "templates", "list").assert_success()?;
    assert!(listed.contains_stdout("night"));
    assert!(listed.contains_stdout("20/16"));

    let shown = badgedesk!(config, "templates", "show", "night").assert_success()?;
    // Data font falls back to the name font
    assert!(shown.stdout.matches("Cormorant-Bold.ttf").count() >= 2);

    let preview = badgedesk!(config, "templates", "preview", "night").assert_success()?;
    assert!(preview.stdout.trim().starts_with("data:image/svg+xml"));

    badgedesk!(config, "templates", "delete", "night", "-y").assert_success()?;
    let after = badgedesk!(config, "templates", "list").assert_success()?;
    assert!(!after.contains_stdout("night"));

    badgedesk!(config, "templates", "show", "night").assert_failure()?;
    Ok(())
}

#[test]
fn test_template_save_rejects_reserved_name() -> Result<()> {
    let backend = TestBackend::start()?;

    let result = badgedesk!(
        backend.config(),
        "templates",
        "save",
        "default",
        "--pattern",
        "sys.bmp",
        "--font",
        "Cormorant-Bold.ttf"
    )
    .assert_failure()?;
    assert!(result.contains_stderr("Failed to save template"));
    Ok(())
}

#[test]
fn test_config_commands() -> Result<()> {
    let backend = TestBackend::start()?;
    let config = backend.config();

    let path = badgedesk!(config, "config", "path").assert_success()?;
    assert!(path.contains_stdout(&config.display().to_string()));

    let shown = badgedesk!(config, "config", "show").assert_success()?;
    assert!(shown.contains_stdout(&backend.addr));
    assert!(shown.contains_stdout("notice_auto_hide_ms = 5000"));
    Ok(())
}
