//! CLI command implementations

pub mod config;
pub mod create;
pub mod delete;
pub mod preview;
pub mod profiles;
pub mod recover;
pub mod serve;
pub mod templates;
pub mod update;

use anyhow::{Context, Result};
use backend::RpcClient;
use badge_core::FormContext;
use clap::Args;
use cli_lib::{AppConfig, Controller, FieldValue, FormField, Severity};
use owo_colors::OwoColorize;
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

/// Form fields settable from the command line
#[derive(Args, Debug, Default)]
pub struct FormArgs {
    /// Full name
    #[arg(long)]
    pub name: Option<String>,
    /// Organization
    #[arg(long)]
    pub org: Option<String>,
    /// Department
    #[arg(long)]
    pub dept: Option<String>,
    /// Expiration date (DD.MM.YYYY)
    #[arg(long, conflicts_with = "thirty_days")]
    pub expires: Option<String>,
    /// Expire 30 days from today
    #[arg(long)]
    pub thirty_days: bool,
    /// Template name
    #[arg(long)]
    pub template: Option<String>,
    /// Photo file
    #[arg(long)]
    pub photo: Option<PathBuf>,
    /// Keep the photo in color
    #[arg(long)]
    pub no_photo_bw: bool,
    /// Convert the pattern to black and white
    #[arg(long)]
    pub pattern_bw: bool,
}

impl FormArgs {
    /// Type the given values into `context`'s form
    ///
    /// Fields the form does not have (identity fields on the recover form)
    /// are rejected.
    pub async fn apply(&self, controller: &Controller, context: FormContext) -> Result<()> {
        let texts = [
            (FormField::FullName, &self.name),
            (FormField::Organization, &self.org),
            (FormField::Department, &self.dept),
            (FormField::ExpirationDate, &self.expires),
            (FormField::Template, &self.template),
        ];
        for (field, value) in texts {
            if let Some(value) = value {
                controller.input(&field.id(context), FieldValue::Text(value.clone()))?;
            }
        }

        if let Some(photo) = &self.photo {
            controller.input(&FormField::Photo.id(context), FieldValue::File(Some(photo.clone())))?;
        }
        if self.no_photo_bw {
            controller.input(&FormField::ConvertPhotoBw.id(context), FieldValue::Checked(false))?;
        }
        if self.pattern_bw {
            controller.input(&FormField::ConvertPatternBw.id(context), FieldValue::Checked(true))?;
        }

        if self.thirty_days && controller.set_30_days(context).await.is_none() {
            anyhow::bail!("Could not set a 30 day expiration on the {} form", context);
        }
        Ok(())
    }
}

/// Controller talking to the configured backend
pub fn connect(config: &AppConfig) -> Controller {
    let client =
        RpcClient::new(config.backend.address.clone()).with_timeout(config.request_timeout());
    Controller::new(Arc::new(client), config.ui.clone())
}

/// Print the notices an action produced; fail if it did not succeed
pub fn finish(controller: &Controller, succeeded: bool) -> Result<()> {
    let notices = controller.notifier().drain();

    let mut failure = None;
    for notice in notices {
        match notice.severity {
            Severity::Success => println!("{} {}", "✓".green(), notice.message),
            Severity::Warning | Severity::Danger if !succeeded => failure = Some(notice.message),
            Severity::Warning => println!("{} {}", "!".yellow(), notice.message),
            Severity::Danger => println!("{} {}", "✗".red(), notice.message),
        }
    }

    if succeeded {
        Ok(())
    } else {
        Err(anyhow::anyhow!(failure.unwrap_or_else(|| "Action failed".to_string())))
    }
}

/// Ask a yes/no question on stdin
pub fn confirm(prompt: &str) -> Result<bool> {
    print!("{} [y/N] ", prompt);
    std::io::stdout().flush().context("Failed to flush stdout")?;

    let mut answer = String::new();
    std::io::stdin()
        .read_line(&mut answer)
        .context("Failed to read confirmation")?;
    Ok(matches!(answer.trim(), "y" | "Y" | "yes"))
}

/// Write an image data URI to `out`, or print it
pub async fn emit_image(image_data: &str, out: Option<&std::path::Path>) -> Result<()> {
    match out {
        Some(path) => {
            let (mime, bytes) = badge_core::photo::decode_data_uri(image_data)
                .context("Backend returned an image that is not a base64 data URI")?;
            tokio::fs::write(path, &bytes)
                .await
                .with_context(|| format!("Failed to write {}", path.display()))?;
            println!(
                "{} Wrote {} ({}, {} bytes)",
                "✓".green(),
                path.display(),
                mime,
                bytes.len()
            );
        }
        None => println!("{}", image_data),
    }
    Ok(())
}
