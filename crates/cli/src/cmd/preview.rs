//! Render a form preview through the debounced scheduler

use super::{connect, emit_image, finish, FormArgs};
use anyhow::{Context, Result};
use badge_core::FormContext;
use cli_lib::pane::Settled;
use cli_lib::AppConfig;
use preview::{PreviewOutcome, DEBOUNCE_WINDOW};
use std::path::Path;
use std::time::Duration;
use tracing::debug;

pub async fn run(
    config: &AppConfig,
    target: Option<(FormContext, String)>,
    form: &FormArgs,
    out: Option<&Path>,
) -> Result<()> {
    let controller = connect(config);
    let mut settled = controller.pane().subscribe();

    let context = match target {
        Some((context, id)) => {
            let opened = match context {
                FormContext::Recover => controller.open_recover(&id).await,
                _ => controller.open_edit(&id).await,
            };
            if !opened {
                return finish(&controller, false);
            }
            context
        }
        None => FormContext::Create,
    };

    form.apply(&controller, context).await?;
    controller.scheduler().schedule(context);

    let result = tokio::time::timeout(settle_bound(config, context), async {
        loop {
            settled.changed().await?;
            let current = settled.borrow_and_update().clone();
            match current {
                Some(Settled {
                    context: c,
                    outcome,
                }) if c == context && outcome != PreviewOutcome::Stale => {
                    return Ok::<_, anyhow::Error>(outcome);
                }
                other => debug!("Ignoring preview run {:?}", other),
            }
        }
    })
    .await
    .context("Timed out waiting for the preview")??;

    match result {
        PreviewOutcome::Displayed => {
            let image = controller
                .pane()
                .image(context)
                .context("Preview finished without an image")?;
            emit_image(&image, out).await
        }
        PreviewOutcome::Hidden => anyhow::bail!("Full name is empty, nothing to preview"),
        PreviewOutcome::NoProfile => anyhow::bail!("Profile not found"),
        PreviewOutcome::Rejected(error) => anyhow::bail!("Backend rejected the preview: {}", error),
        PreviewOutcome::Failed(error) => anyhow::bail!("Preview failed: {}", error),
        PreviewOutcome::Stale => anyhow::bail!("Preview was superseded by a newer one"),
    }
}

/// How long a scheduled preview may take to settle
///
/// Recover previews look the profile up before rendering, so they make two
/// backend calls.
fn settle_bound(config: &AppConfig, context: FormContext) -> Duration {
    let calls = match context {
        FormContext::Recover => 2,
        FormContext::Create | FormContext::Edit => 1,
    };
    DEBOUNCE_WINDOW + config.ui.modal_preview_delay() + config.request_timeout() * calls
}
