use crate::domain::{Recipient, SubscriberEmailAddress};
use reqwest::{Client, StatusCode};
use secrecy::{ExposeSecret, Secret};

/// Status codes SendGrid answers with when it has taken a message.
const ACCEPTED: [StatusCode; 3] = [StatusCode::OK, StatusCode::CREATED, StatusCode::ACCEPTED];

#[derive(Clone, Debug)]
pub struct EmailClient {
    base_url: String,
    http_client: Client,
    sender: SubscriberEmailAddress,
    authorization_token: Secret<String>,
}

#[derive(serde::Serialize)]
struct SendEmailRequest<'a> {
    personalizations: [Personalization<'a>; 1],
    from: Address<'a>,
    subject: &'a str,
    content: [Content<'a>; 2],
}

#[derive(serde::Serialize)]
struct Personalization<'a> {
    to: [Address<'a>; 1],
}

#[derive(serde::Serialize)]
struct Address<'a> {
    email: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<&'a str>,
}

#[derive(serde::Serialize)]
struct Content<'a> {
    #[serde(rename = "type")]
    mime_type: &'a str,
    value: &'a str,
}

#[derive(Debug)]
pub struct EmailData<'a> {
    pub recipient: &'a Recipient,
    pub subject: &'a str,
    pub html_content: &'a str,
    pub text_content: &'a str,
}

#[derive(Debug, thiserror::Error)]
pub enum SendError {
    #[error("The email provider rejected the message with status {0}")]
    Rejected(StatusCode),
    #[error("Failed to reach the email provider")]
    Transport(#[from] reqwest::Error),
}

impl EmailClient {
    pub fn new(
        base_url: String,
        sender: SubscriberEmailAddress,
        authorization_token: Secret<String>,
        timeout: std::time::Duration,
    ) -> Result<Self, reqwest::Error> {
        let http_client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http_client,
            base_url: base_url.trim_end_matches('/').to_string(),
            sender,
            authorization_token,
        })
    }

    /// Submit one message. Only the accepted status codes count as success;
    /// any other answer comes back as [`SendError::Rejected`].
    #[tracing::instrument(
        name = "Sending email",
        skip_all,
        fields(subscriber_email = %data.recipient.email)
    )]
    pub async fn send_email(&self, data: EmailData<'_>) -> Result<(), SendError> {
        let url = format!("{}/v3/mail/send", self.base_url);
        let request_body = SendEmailRequest {
            personalizations: [Personalization {
                to: [Address {
                    email: data.recipient.email.as_str(),
                    name: Some(data.recipient.name.as_ref()),
                }],
            }],
            from: Address {
                email: self.sender.as_ref(),
                name: None,
            },
            subject: data.subject,
            content: [
                Content {
                    mime_type: "text/plain",
                    value: data.text_content,
                },
                Content {
                    mime_type: "text/html",
                    value: data.html_content,
                },
            ],
        };
        let response = self
            .http_client
            .post(&url)
            .bearer_auth(self.authorization_token.expose_secret())
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        if ACCEPTED.contains(&status) {
            Ok(())
        } else {
            tracing::debug!(
                status = status.as_u16(),
                body = %response.text().await.unwrap_or_default(),
                "Email provider rejected the message"
            );
            Err(SendError::Rejected(status))
        }
    }
}
