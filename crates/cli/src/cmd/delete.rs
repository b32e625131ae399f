//! Delete a profile

use super::{confirm, connect, finish};
use anyhow::Result;
use cli_lib::AppConfig;

pub async fn run(config: &AppConfig, id: &str, yes: bool) -> Result<()> {
    let controller = connect(config);

    let rows = controller.search_profiles(id).await;
    if controller.notifier().current().is_some() {
        return finish(&controller, false);
    }
    let Some(profile) = rows.into_iter().find(|p| p.id.eq_ignore_ascii_case(id)) else {
        anyhow::bail!("Profile not found: {}", id);
    };

    let prompt = format!("Delete profile {} ({})?", profile.id, profile.full_name);
    let confirmed = yes || confirm(&prompt)?;
    if !confirmed {
        println!("Cancelled");
        return Ok(());
    }

    let deleted = controller.delete_profile(&profile.id, true).await;
    finish(&controller, deleted)
}
