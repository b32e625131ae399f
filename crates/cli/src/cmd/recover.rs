//! Re-issue a profile's card

use super::{connect, finish, FormArgs};
use anyhow::Result;
use badge_core::FormContext;
use cli_lib::AppConfig;

pub async fn run(config: &AppConfig, id: &str, form: &FormArgs) -> Result<()> {
    let controller = connect(config);

    if !controller.open_recover(id).await {
        return finish(&controller, false);
    }
    form.apply(&controller, FormContext::Recover).await?;

    let recovered = controller.recover_profile().await;
    finish(&controller, recovered)
}
