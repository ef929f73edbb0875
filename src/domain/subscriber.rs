use super::{SubscriberEmailAddress, SubscriberName};

pub const DEFAULT_SUBSCRIBER_NAME: &str = "Subscriber";

/// One entry of the subscriber list, as stored.
#[derive(serde::Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct Subscriber {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

/// A subscriber we will submit an email for.
///
/// The address is only trimmed. Whether it is deliverable is the provider's
/// call, and a rejection is recorded as a failed send.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Recipient {
    pub email: String,
    pub name: SubscriberName,
}

impl Recipient {
    /// Whether the address passes local syntax validation.
    pub fn has_valid_address(&self) -> bool {
        SubscriberEmailAddress::parse(self.email.clone()).is_ok()
    }
}

impl Subscriber {
    pub fn new(email: impl Into<String>, name: Option<String>) -> Self {
        Self {
            email: Some(email.into()),
            name,
        }
    }

    /// The trimmed address, `None` when missing or blank.
    pub fn email(&self) -> Option<&str> {
        self.email
            .as_deref()
            .map(str::trim)
            .filter(|email| !email.is_empty())
    }

    /// `None` for entries without an address. Names that fail validation
    /// fall back to the default display name.
    pub fn to_recipient(&self) -> Option<Recipient> {
        let email = self.email()?.to_string();
        let name = self
            .name
            .clone()
            .and_then(|name| SubscriberName::parse(name).ok())
            .unwrap_or_else(default_name);
        Some(Recipient { email, name })
    }
}

fn default_name() -> SubscriberName {
    SubscriberName::parse(DEFAULT_SUBSCRIBER_NAME.to_string())
        .unwrap_or_else(|_| unreachable!("the default subscriber name is valid"))
}
