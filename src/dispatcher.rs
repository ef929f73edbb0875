use crate::configuration::Settings;
use crate::domain::{RenderedEmail, Subscriber};
use crate::email_client::{EmailClient, EmailData, SendError};
use crate::error::{ConfigurationError, error_chain};
use futures::StreamExt;
use futures::stream;

/// What happened to a single subscriber.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SendResult {
    Sent,
    ProviderRejected(u16),
    TransportError(String),
}

impl SendResult {
    pub fn is_sent(&self) -> bool {
        matches!(self, SendResult::Sent)
    }
}

impl From<Result<(), SendError>> for SendResult {
    fn from(outcome: Result<(), SendError>) -> Self {
        match outcome {
            Ok(()) => SendResult::Sent,
            Err(SendError::Rejected(status)) => SendResult::ProviderRejected(status.as_u16()),
            Err(e @ SendError::Transport(_)) => SendResult::TransportError(error_chain(&e)),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeliveryReport {
    pub email: String,
    pub result: SendResult,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DeliverySummary {
    pub successful: usize,
    pub failed: usize,
    /// Entries without a usable address. They are never sent and never
    /// count as failures.
    pub skipped: usize,
    /// One report per attempted send, in subscriber list order.
    pub reports: Vec<DeliveryReport>,
}

impl DeliverySummary {
    pub fn attempted(&self) -> usize {
        self.successful + self.failed
    }

    /// A run succeeds only if no attempted send failed.
    pub fn is_success(&self) -> bool {
        self.failed == 0
    }

    /// Process exit status for this run: zero only when nothing failed.
    pub fn exit_status(&self) -> u8 {
        if self.is_success() { 0 } else { 1 }
    }

    fn record(&mut self, report: DeliveryReport) {
        if report.result.is_sent() {
            self.successful += 1;
        } else {
            self.failed += 1;
        }
        self.reports.push(report);
    }
}

impl std::fmt::Display for DeliverySummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Newsletter sending complete: {} successful, {} failed",
            self.successful, self.failed
        )?;
        if self.skipped > 0 {
            write!(f, ", {} skipped", self.skipped)?;
        }
        Ok(())
    }
}

pub struct Dispatcher {
    email_client: EmailClient,
    subject: String,
    concurrency: usize,
}

impl Dispatcher {
    /// Fails when no provider credential is configured, so a misconfigured
    /// run never reaches the first send.
    pub fn from_settings(settings: &Settings) -> Result<Self, ConfigurationError> {
        let api_key = settings
            .api_key()
            .cloned()
            .ok_or(ConfigurationError::MissingCredential)?;
        let email_client = EmailClient::new(
            settings.sendgrid_base_url.clone(),
            settings.sender()?,
            api_key,
            settings.timeout(),
        )
        .map_err(ConfigurationError::HttpClient)?;
        Ok(Self::new(
            email_client,
            settings.subject().to_string(),
            settings.concurrency(),
        ))
    }

    pub fn new(email_client: EmailClient, subject: String, concurrency: usize) -> Self {
        Self {
            email_client,
            subject,
            concurrency: concurrency.max(1),
        }
    }

    /// Send the newsletter to every addressable subscriber.
    ///
    /// Failures are recorded per subscriber and never stop the remaining
    /// sends. With a concurrency above one, sends may complete out of order;
    /// the summary is assembled in list order regardless.
    #[tracing::instrument(
        name = "Dispatching newsletter",
        skip_all,
        fields(subject = %self.subject, subscribers = subscribers.len())
    )]
    pub async fn dispatch(
        &self,
        subscribers: &[Subscriber],
        email: &RenderedEmail,
    ) -> DeliverySummary {
        let mut summary = DeliverySummary::default();
        let mut recipients = Vec::with_capacity(subscribers.len());
        for (position, subscriber) in subscribers.iter().enumerate() {
            let Some(recipient) = subscriber.to_recipient() else {
                tracing::warn!(position, "Skipping a subscriber without an email address");
                summary.skipped += 1;
                continue;
            };
            if !recipient.has_valid_address() {
                tracing::warn!(
                    position,
                    subscriber_email = %recipient.email,
                    "Subscriber address looks malformed, submitting it anyway"
                );
            }
            recipients.push((position, recipient));
        }

        let mut outcomes: Vec<(usize, DeliveryReport)> = stream::iter(recipients)
            .map(|(position, recipient)| async move {
                let result: SendResult = self
                    .email_client
                    .send_email(EmailData {
                        recipient: &recipient,
                        subject: &self.subject,
                        html_content: &email.html_body,
                        text_content: &email.plain_text,
                    })
                    .await
                    .into();
                log_result(&recipient.email, &result);
                let report = DeliveryReport {
                    email: recipient.email,
                    result,
                };
                (position, report)
            })
            .buffer_unordered(self.concurrency)
            .collect()
            .await;

        outcomes.sort_by_key(|(position, _)| *position);
        for (_, report) in outcomes {
            summary.record(report);
        }
        tracing::info!(
            successful = summary.successful,
            failed = summary.failed,
            skipped = summary.skipped,
            "{}",
            summary
        );
        summary
    }
}

fn log_result(email: &str, result: &SendResult) {
    match result {
        SendResult::Sent => tracing::info!(subscriber_email = %email, "Sent newsletter"),
        SendResult::ProviderRejected(status) => tracing::error!(
            subscriber_email = %email,
            status,
            "Failed to deliver newsletter: the provider rejected the message. Skipping."
        ),
        SendResult::TransportError(message) => tracing::error!(
            subscriber_email = %email,
            error.cause_chain = %message,
            "Failed to deliver newsletter: the provider could not be reached. Skipping."
        ),
    }
}
