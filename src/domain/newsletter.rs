use crate::markdown;

/// Substituted for both parts of the email when the newsletter file is absent.
pub const PLACEHOLDER_BODY: &str = "Newsletter content not found";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewsletterContent {
    pub raw_markdown: String,
    pub subject: String,
}

/// Both bodies of the outgoing email. Identical input always yields
/// identical output.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderedEmail {
    pub plain_text: String,
    pub html_body: String,
}

impl NewsletterContent {
    pub fn placeholder(subject: impl Into<String>) -> Self {
        Self {
            raw_markdown: PLACEHOLDER_BODY.to_string(),
            subject: subject.into(),
        }
    }

    #[tracing::instrument(name = "Rendering newsletter", skip_all, fields(subject = %self.subject))]
    pub fn render(&self) -> RenderedEmail {
        let content = markdown::render(&self.raw_markdown);
        RenderedEmail {
            plain_text: self.raw_markdown.clone(),
            html_body: markdown::wrap(&content),
        }
    }
}
