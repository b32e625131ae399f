//! List and count profiles

use super::{connect, finish};
use anyhow::Result;
use cli_lib::table;
use cli_lib::AppConfig;
use owo_colors::OwoColorize;

pub async fn run(config: &AppConfig, term: Option<&str>) -> Result<()> {
    let controller = connect(config);

    let rows = match term {
        Some(term) => controller.search_profiles(term).await,
        None => controller.load_all_profiles().await,
    };
    finish(&controller, controller.notifier().current().is_none())?;

    println!("{}", table::render(&rows, true));
    println!();
    println!(
        "{} {} shown, {} stored",
        "Profiles:".bold(),
        rows.len(),
        controller.view().profiles_count
    );
    Ok(())
}

pub async fn run_count(config: &AppConfig) -> Result<()> {
    let controller = connect(config);
    match controller.update_profiles_count().await {
        Some(count) => {
            println!("{}", count);
            Ok(())
        }
        None => anyhow::bail!("Could not reach the backend at {}", config.backend.address),
    }
}
