//! badgedesk CLI - badgedesk command

use anyhow::Result;
use badge_core::FormContext;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{fmt, EnvFilter};

mod cmd;

use cmd::FormArgs;

/// badgedesk - badge and ID card profiles with live previews
#[derive(Parser)]
#[command(name = "badgedesk")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Config file (default: <config dir>/badgedesk/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the in-memory backend over RPC
    Serve {
        /// Listen address (default: backend.address from config)
        #[arg(long)]
        addr: Option<String>,
    },
    /// List profiles, optionally filtered by ID or name
    Profiles {
        /// Exact ID or part of the name
        term: Option<String>,
    },
    /// Show the number of stored profiles
    Count,
    /// Create a profile
    Create {
        #[command(flatten)]
        form: FormArgs,
    },
    /// Update a profile
    Update {
        /// Profile ID
        id: String,
        #[command(flatten)]
        form: FormArgs,
    },
    /// Re-issue the card of a profile with a new style or photo
    Recover {
        /// Profile ID
        id: String,
        #[command(flatten)]
        form: FormArgs,
    },
    /// Delete a profile
    Delete {
        /// Profile ID
        id: String,
        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
    /// Render a live preview of a form
    Preview {
        /// Preview the edit form of this profile
        #[arg(long, conflicts_with = "recover")]
        edit: Option<String>,
        /// Preview the recover form of this profile
        #[arg(long)]
        recover: Option<String>,
        /// Write the image here instead of printing its data URI
        #[arg(short, long)]
        out: Option<PathBuf>,
        #[command(flatten)]
        form: FormArgs,
    },
    /// Manage card templates
    #[command(subcommand)]
    Templates(TemplateCommands),
    /// Show configuration
    #[command(subcommand)]
    Config(ConfigCommands),
}

#[derive(Subcommand)]
enum TemplateCommands {
    /// List templates
    List,
    /// Show one template's settings
    Show {
        name: String,
    },
    /// Create or replace a template
    Save {
        name: String,
        /// Background pattern file
        #[arg(long)]
        pattern: String,
        /// Font for the name line
        #[arg(long)]
        font: String,
        /// Font for the data lines (default: same as --font)
        #[arg(long)]
        data_font: Option<String>,
        /// Name font size (default: 18)
        #[arg(long)]
        font_size: Option<u32>,
        /// Data font size (default: 16)
        #[arg(long)]
        data_font_size: Option<u32>,
        /// Keep the photo in color
        #[arg(long)]
        no_photo_bw: bool,
        /// Convert the pattern to black and white
        #[arg(long)]
        pattern_bw: bool,
    },
    /// Delete a template
    Delete {
        name: String,
        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
    /// Render a sample card with a template
    Preview {
        name: String,
        /// Write the image here instead of printing its data URI
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Print the effective configuration
    Show,
    /// Print the config file path
    Path,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = cli_lib::config::load(cli.config.as_deref())?;

    // RUST_LOG wins over the configured level
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log.level));
    fmt().with_env_filter(filter).with_writer(std::io::stderr).init();

    match cli.command {
        Commands::Serve { addr } => cmd::serve::run(&config, addr).await,
        Commands::Profiles { term } => cmd::profiles::run(&config, term.as_deref()).await,
        Commands::Count => cmd::profiles::run_count(&config).await,
        Commands::Create { form } => cmd::create::run(&config, &form).await,
        Commands::Update { id, form } => cmd::update::run(&config, &id, &form).await,
        Commands::Recover { id, form } => cmd::recover::run(&config, &id, &form).await,
        Commands::Delete { id, yes } => cmd::delete::run(&config, &id, yes).await,
        Commands::Preview { edit, recover, out, form } => {
            let target = match (edit, recover) {
                (Some(id), _) => Some((FormContext::Edit, id)),
                (None, Some(id)) => Some((FormContext::Recover, id)),
                (None, None) => None,
            };
            cmd::preview::run(&config, target, &form, out.as_deref()).await
        }
        Commands::Templates(templates_cmd) => match templates_cmd {
            TemplateCommands::List => cmd::templates::run_list(&config).await,
            TemplateCommands::Show { name } => cmd::templates::run_show(&config, &name).await,
            TemplateCommands::Save {
                name,
                pattern,
                font,
                data_font,
                font_size,
                data_font_size,
                no_photo_bw,
                pattern_bw,
            } => {
                let mut template = badge_core::TemplateRecord::new(name, pattern, font);
                template.data_font = data_font.unwrap_or_default();
                template.font_size_normal = font_size.unwrap_or(0);
                template.data_font_size_normal = data_font_size.unwrap_or(0);
                template.convert_photo_to_bw = !no_photo_bw;
                template.convert_pattern_to_bw = pattern_bw;
                cmd::templates::run_save(&config, template).await
            }
            TemplateCommands::Delete { name, yes } => {
                cmd::templates::run_delete(&config, &name, yes).await
            }
            TemplateCommands::Preview { name, out } => {
                cmd::templates::run_preview(&config, &name, out.as_deref()).await
            }
        },
        Commands::Config(config_cmd) => match config_cmd {
            ConfigCommands::Show => cmd::config::run_show(&config),
            ConfigCommands::Path => cmd::config::run_path(cli.config.as_deref()),
        },
    }
}
