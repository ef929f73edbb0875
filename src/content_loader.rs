use crate::configuration::Settings;
use crate::domain::{NewsletterContent, Subscriber};
use crate::error::{ConfigurationError, ContentError};
use std::io::ErrorKind;
use std::path::Path;

/// The subscribers for this run, in list order.
///
/// A configured test recipient replaces the list entirely and the list file
/// is not touched.
#[tracing::instrument(name = "Loading subscribers", skip_all)]
pub fn load_subscribers(settings: &Settings) -> Result<Vec<Subscriber>, ConfigurationError> {
    if let Some(recipient) = settings.recipient_override() {
        tracing::info!(
            subscriber_email = %recipient.email,
            "Sending to the configured test recipient only"
        );
        return Ok(vec![Subscriber::new(recipient.email, recipient.name)]);
    }
    let subscribers = read_subscriber_list(&settings.subscribers_file)?;
    tracing::info!(
        path = %settings.subscribers_file.display(),
        "Loaded {} subscribers",
        subscribers.len()
    );
    Ok(subscribers)
}

pub fn read_subscriber_list(path: &Path) -> Result<Vec<Subscriber>, ConfigurationError> {
    let raw = std::fs::read_to_string(path).map_err(|source| match source.kind() {
        ErrorKind::NotFound => ConfigurationError::MissingSubscriberList {
            path: path.to_path_buf(),
            source,
        },
        _ => ConfigurationError::UnreadableSubscriberList {
            path: path.to_path_buf(),
            source,
        },
    })?;
    serde_json::from_str(&raw).map_err(|source| ConfigurationError::MalformedSubscriberList {
        path: path.to_path_buf(),
        source,
    })
}

/// The newsletter body. A missing file is not fatal: the placeholder body is
/// sent instead.
#[tracing::instrument(name = "Loading newsletter content", skip_all)]
pub fn load_content(settings: &Settings) -> Result<NewsletterContent, ContentError> {
    let path = &settings.newsletter_file;
    match std::fs::read_to_string(path) {
        Ok(raw_markdown) => Ok(NewsletterContent {
            raw_markdown,
            subject: settings.subject().to_string(),
        }),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            tracing::warn!(
                path = %path.display(),
                "Newsletter file not found, sending placeholder content"
            );
            Ok(NewsletterContent::placeholder(settings.subject()))
        }
        Err(source) => Err(ContentError::Unreadable {
            path: path.clone(),
            source,
        }),
    }
}
