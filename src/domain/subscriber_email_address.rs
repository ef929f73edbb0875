use validator::ValidateEmail;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SubscriberEmailAddress(String);

impl SubscriberEmailAddress {
    pub fn parse(s: String) -> Result<SubscriberEmailAddress, String> {
        if s.validate_email() {
            Ok(Self(s))
        } else {
            Err(format!("{} is not a valid subscriber email address.", s))
        }
    }
}

impl AsRef<str> for SubscriberEmailAddress {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SubscriberEmailAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}
