use std::path::PathBuf;

pub fn error_chain_fmt(
    e: &impl std::error::Error,
    f: &mut std::fmt::Formatter<'_>,
) -> std::fmt::Result {
    writeln!(f, "{}\n", e)?;
    let mut current = e.source();
    while let Some(cause) = current {
        writeln!(f, "Caused by:\n\t{}", cause)?;
        current = cause.source();
    }
    Ok(())
}

/// The error and its sources on one line, for log fields and reports.
pub fn error_chain(e: &dyn std::error::Error) -> String {
    let mut chain = e.to_string();
    let mut current = e.source();
    while let Some(cause) = current {
        chain.push_str(": ");
        chain.push_str(&cause.to_string());
        current = cause.source();
    }
    chain
}

/// A precondition for the run is missing or broken. Nothing has been sent
/// when one of these surfaces.
#[derive(thiserror::Error)]
pub enum ConfigurationError {
    #[error("Failed to read configuration")]
    Unreadable(#[from] config::ConfigError),
    #[error("SENDGRID_API_KEY is not set")]
    MissingCredential,
    #[error("Invalid sender address: {0}")]
    InvalidSender(String),
    #[error("Subscriber list {} does not exist", .path.display())]
    MissingSubscriberList {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Subscriber list {} could not be read", .path.display())]
    UnreadableSubscriberList {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Subscriber list {} is not a JSON array of subscribers", .path.display())]
    MalformedSubscriberList {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("Failed to build the HTTP client")]
    HttpClient(#[source] reqwest::Error),
}

impl std::fmt::Debug for ConfigurationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

/// The newsletter body exists but cannot be used.
#[derive(thiserror::Error)]
pub enum ContentError {
    #[error("Newsletter file {} could not be read", .path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl std::fmt::Debug for ContentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

#[derive(thiserror::Error)]
pub enum RunError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),
    #[error(transparent)]
    Content(#[from] ContentError),
}

impl std::fmt::Debug for RunError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}
