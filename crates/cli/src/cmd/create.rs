//! Create a profile

use super::{connect, finish, FormArgs};
use anyhow::Result;
use badge_core::FormContext;
use cli_lib::AppConfig;

pub async fn run(config: &AppConfig, form: &FormArgs) -> Result<()> {
    let controller = connect(config);
    form.apply(&controller, FormContext::Create).await?;

    let created = controller.create_profile().await;
    finish(&controller, created.is_some())
}
