//! Update a profile

use super::{connect, finish, FormArgs};
use anyhow::Result;
use badge_core::FormContext;
use cli_lib::AppConfig;

pub async fn run(config: &AppConfig, id: &str, form: &FormArgs) -> Result<()> {
    let controller = connect(config);

    // Start from the stored values, then overwrite what was given
    if !controller.open_edit(id).await {
        return finish(&controller, false);
    }
    form.apply(&controller, FormContext::Edit).await?;

    let updated = controller.update_profile().await;
    finish(&controller, updated)
}
