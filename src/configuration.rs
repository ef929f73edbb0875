use crate::domain::SubscriberEmailAddress;
use crate::error::ConfigurationError;
use config::{Config, ConfigError, Environment};
use secrecy::Secret;
use serde_aux::field_attributes::deserialize_number_from_string;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_SENDER: &str = "newsletter@blt.owasp.org";
pub const DEFAULT_SUBJECT: &str = "BLT Newsletter";

/// Everything a run needs, read once at process start.
///
/// Field names mirror the (lowercased) environment variables they are read
/// from, e.g. `SENDGRID_API_KEY` populates `sendgrid_api_key`.
#[derive(serde::Deserialize, Clone, Debug)]
pub struct Settings {
    pub sendgrid_api_key: Option<Secret<String>>,
    pub sendgrid_base_url: String,
    pub sendgrid_from_email: String,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub sendgrid_timeout_milliseconds: u64,
    pub newsletter_subject: String,
    pub newsletter_file: PathBuf,
    pub subscribers_file: PathBuf,
    pub test_email: Option<String>,
    pub test_name: Option<String>,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub max_concurrent_sends: usize,
}

/// A single recipient configured to replace the subscriber list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RecipientOverride {
    pub email: String,
    pub name: Option<String>,
}

impl Settings {
    /// `None` when the key is unset or blank.
    pub fn api_key(&self) -> Option<&Secret<String>> {
        use secrecy::ExposeSecret;
        self.sendgrid_api_key
            .as_ref()
            .filter(|key| !key.expose_secret().trim().is_empty())
    }

    pub fn sender(&self) -> Result<SubscriberEmailAddress, ConfigurationError> {
        SubscriberEmailAddress::parse(self.sendgrid_from_email.clone())
            .map_err(ConfigurationError::InvalidSender)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.sendgrid_timeout_milliseconds)
    }

    pub fn subject(&self) -> &str {
        let subject = self.newsletter_subject.trim();
        if subject.is_empty() {
            DEFAULT_SUBJECT
        } else {
            subject
        }
    }

    /// At least one send is always allowed in flight.
    pub fn concurrency(&self) -> usize {
        self.max_concurrent_sends.max(1)
    }

    pub fn recipient_override(&self) -> Option<RecipientOverride> {
        let email = non_blank(self.test_email.as_deref())?;
        Some(RecipientOverride {
            email: email.to_string(),
            name: non_blank(self.test_name.as_deref()).map(str::to_string),
        })
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Read settings from the process environment.
pub fn get_configuration() -> Result<Settings, ConfigError> {
    build_settings(Environment::default())
}

/// Layer the given environment source on top of the built-in defaults.
pub fn build_settings(environment: Environment) -> Result<Settings, ConfigError> {
    Config::builder()
        .set_default("sendgrid_base_url", "https://api.sendgrid.com")?
        .set_default("sendgrid_from_email", DEFAULT_SENDER)?
        .set_default("sendgrid_timeout_milliseconds", "10000")?
        .set_default("newsletter_subject", DEFAULT_SUBJECT)?
        .set_default("newsletter_file", "newsletter/latest.md")?
        .set_default("subscribers_file", "newsletter/subscribers.json")?
        .set_default("max_concurrent_sends", "1")?
        .add_source(environment)
        .build()?
        .try_deserialize::<Settings>()
}
