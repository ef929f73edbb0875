mod newsletter;
mod subscriber;
mod subscriber_email_address;
mod subscriber_name;

pub use newsletter::{NewsletterContent, PLACEHOLDER_BODY, RenderedEmail};
pub use subscriber::{DEFAULT_SUBSCRIBER_NAME, Recipient, Subscriber};
pub use subscriber_email_address::SubscriberEmailAddress;
pub use subscriber_name::SubscriberName;
