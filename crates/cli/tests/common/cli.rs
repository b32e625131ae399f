//! CLI command execution helpers with automatic timing
//!
//! Wraps the `badgedesk` binary, measures execution time and provides
//! assertion helpers.

use anyhow::{Context, Result};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::time::{Duration, Instant};

/// CLI command builder with timing
pub struct BadgeCommand {
    config_path: PathBuf,
    args: Vec<String>,
    env: HashMap<String, String>,
    stdin_data: Option<String>,
}

impl BadgeCommand {
    /// Create a command that uses the given config file
    pub fn new(config_path: impl AsRef<Path>) -> Self {
        Self {
            config_path: config_path.as_ref().to_path_buf(),
            args: Vec::new(),
            env: HashMap::new(),
            stdin_data: None,
        }
    }

    pub fn args(&mut self, args: &[&str]) -> &mut Self {
        self.args.extend(args.iter().map(|s| s.to_string()));
        self
    }

    pub fn env(&mut self, key: &str, value: &str) -> &mut Self {
        self.env.insert(key.to_string(), value.to_string());
        self
    }

    pub fn stdin(&mut self, data: &str) -> &mut Self {
        self.stdin_data = Some(data.to_string());
        self
    }

    /// Execute command and return result with timing
    pub fn execute(&self) -> Result<CommandResult> {
        let start = Instant::now();

        let mut command = Command::new(env!("CARGO_BIN_EXE_badgedesk"));
        command
            .arg("--config")
            .arg(&self.config_path)
            .args(&self.args)
            .env("RUST_LOG", "off")
            .envs(&self.env)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        let mut child = command.spawn().context("Failed to spawn badgedesk")?;
        if let Some(mut stdin) = child.stdin.take() {
            use std::io::Write;
            if let Some(data) = &self.stdin_data {
                stdin.write_all(data.as_bytes())?;
            }
        }
        let output = child.wait_with_output().context("Failed to wait for badgedesk")?;

        Ok(CommandResult {
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            exit_code: output.status.code().unwrap_or(-1),
            duration: start.elapsed(),
        })
    }

    /// Execute and assert success
    pub fn assert_success(&self) -> Result<CommandResult> {
        let result = self.execute()?;

        if !result.success() {
            anyhow::bail!(
                "Command failed (exit code: {}):\nArgs: {:?}\nStdout: {}\nStderr: {}",
                result.exit_code,
                self.args,
                result.stdout,
                result.stderr
            );
        }

        Ok(result)
    }

    /// Execute and expect failure
    pub fn assert_failure(&self) -> Result<CommandResult> {
        let result = self.execute()?;

        if result.success() {
            anyhow::bail!(
                "Command should have failed but succeeded:\nArgs: {:?}\nStdout: {}",
                self.args,
                result.stdout
            );
        }

        Ok(result)
    }
}

/// Command execution result with timing
#[derive(Debug, Clone)]
pub struct CommandResult {
    pub stdout: String,
    pub stderr: String,
    pub exit_code: i32,
    pub duration: Duration,
}

impl CommandResult {
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }

    pub fn contains_stdout(&self, text: &str) -> bool {
        self.stdout.contains(text)
    }

    pub fn contains_stderr(&self, text: &str) -> bool {
        self.stderr.contains(text)
    }

    /// Profile ID from a "Profile created, ID: XXXXXXXX" line
    pub fn parse_profile_id(&self) -> Option<String> {
        self.stdout.lines().find_map(extract_profile_id)
    }
}

/// Extract an 8 character profile ID following `ID: `
pub fn extract_profile_id(line: &str) -> Option<String> {
    let (_, rest) = line.split_once("ID: ")?;
    let id: String = rest.chars().take(8).collect();

    let valid = id.len() == 8 && id.chars().all(|c| c.is_ascii_uppercase() || c.is_ascii_digit());
    valid.then_some(id)
}

/// Macro for convenient command construction
///
/// Usage:
/// ```ignore
/// badgedesk!(config, "create", "--name", "Ivan").assert_success()?;
/// badgedesk!(config, "delete", &id).stdin("y\n").assert_success()?;
/// ```
#[macro_export]
macro_rules! badgedesk {
    ($config:expr, $($arg:expr),*) => {{
        let mut cmd = $crate::common::cli::BadgeCommand::new($config);
        cmd.args(&[$($arg),*]);
        cmd
    }};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_id_extraction() {
        assert_eq!(
            extract_profile_id("✓ Profile created, ID: AB12CD34"),
            Some("AB12CD34".to_string())
        );
        assert_eq!(extract_profile_id("ID: ab12"), None);
        assert_eq!(extract_profile_id("no id here"), None);
    }
}
