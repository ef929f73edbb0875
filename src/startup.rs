use crate::configuration::Settings;
use crate::content_loader::{load_content, load_subscribers};
use crate::dispatcher::{DeliverySummary, Dispatcher};
use crate::domain::RenderedEmail;
use crate::error::{ContentError, RunError};

/// One newsletter run: validate, load, render, dispatch.
///
/// Configuration problems surface as errors before anything is sent.
/// Per-subscriber failures never do; they are counted in the summary.
#[tracing::instrument(name = "Sending newsletter", skip_all)]
pub async fn run(settings: &Settings) -> Result<DeliverySummary, RunError> {
    tracing::info!(
        provider_configured = settings.api_key().is_some(),
        "Starting newsletter run"
    );
    let dispatcher = Dispatcher::from_settings(settings)?;
    let subscribers = load_subscribers(settings)?;
    if subscribers.is_empty() {
        tracing::info!("No subscribers to send to");
        return Ok(DeliverySummary::default());
    }
    let email = render_newsletter(settings)?;
    Ok(dispatcher.dispatch(&subscribers, &email).await)
}

/// Process exit status for a finished or aborted run.
///
/// Zero on full success, including an empty subscriber list. Any failed send
/// or any configuration or content error yields a nonzero status.
pub fn exit_status(outcome: &Result<DeliverySummary, RunError>) -> u8 {
    match outcome {
        Ok(summary) => summary.exit_status(),
        Err(_) => 1,
    }
}

/// Load and render the newsletter without sending it.
pub fn render_newsletter(settings: &Settings) -> Result<RenderedEmail, ContentError> {
    Ok(load_content(settings)?.render())
}
