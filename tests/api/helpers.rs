use config::Environment;
use newsletter_sender::configuration::{Settings, build_settings};
use newsletter_sender::dispatcher::DeliverySummary;
use newsletter_sender::error::RunError;
use newsletter_sender::telemetry::{get_subscriber, init_subscriber};
use std::collections::HashMap;
use std::sync::LazyLock;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockBuilder, MockServer, Request};

// Ensure that the `tracing` stack is only initialised once using `LazyLock`
static TRACING: LazyLock<()> = LazyLock::new(|| {
    let default_filter_level = "info".to_string();
    let subscriber_name = "test".to_string();
    // The sink is part of the type returned by `get_subscriber`, hence the
    // two branches.
    if std::env::var("TEST_LOG").is_ok() {
        let subscriber = get_subscriber(subscriber_name, default_filter_level, std::io::stdout);
        init_subscriber(subscriber).expect("Failed to initialise tracing");
    } else {
        let subscriber = get_subscriber(subscriber_name, default_filter_level, std::io::sink);
        init_subscriber(subscriber).expect("Failed to initialise tracing");
    }
});

pub struct TestApp {
    pub email_server: MockServer,
    pub workspace: TempDir,
    variables: HashMap<String, String>,
}

impl TestApp {
    pub fn write_subscribers(&self, subscribers: serde_json::Value) {
        std::fs::write(
            self.workspace.path().join("subscribers.json"),
            subscribers.to_string(),
        )
        .expect("Failed to write subscriber list.");
    }

    pub fn write_newsletter(&self, markdown: &str) {
        std::fs::write(self.workspace.path().join("latest.md"), markdown)
            .expect("Failed to write newsletter.");
    }

    pub fn set(&mut self, key: &str, value: &str) {
        self.variables.insert(key.to_string(), value.to_string());
    }

    pub fn unset(&mut self, key: &str) {
        self.variables.remove(key);
    }

    pub fn settings(&self) -> Settings {
        build_settings(Environment::default().source(Some(self.variables.clone())))
            .expect("Failed to build settings.")
    }

    pub async fn run(&self) -> Result<DeliverySummary, RunError> {
        newsletter_sender::startup::run(&self.settings()).await
    }

    /// JSON bodies of every request that reached the mock provider.
    pub async fn sent_emails(&self) -> Vec<serde_json::Value> {
        self.email_server
            .received_requests()
            .await
            .unwrap()
            .iter()
            .map(|request| serde_json::from_slice(&request.body).unwrap())
            .collect()
    }
}

pub async fn spawn_app() -> TestApp {
    LazyLock::force(&TRACING);

    let email_server = MockServer::start().await;
    let workspace = tempfile::tempdir().expect("Failed to create a workspace.");
    let variables = HashMap::from([
        ("SENDGRID_API_KEY".to_string(), "SG.test-key".to_string()),
        ("SENDGRID_BASE_URL".to_string(), email_server.uri()),
        ("SENDGRID_TIMEOUT_MILLISECONDS".to_string(), "500".to_string()),
        (
            "SUBSCRIBERS_FILE".to_string(),
            workspace.path().join("subscribers.json").display().to_string(),
        ),
        (
            "NEWSLETTER_FILE".to_string(),
            workspace.path().join("latest.md").display().to_string(),
        ),
    ]);

    TestApp {
        email_server,
        workspace,
        variables,
    }
}

// Shorthand for a common mocking setup
pub fn when_sending_an_email() -> MockBuilder {
    Mock::given(path("/v3/mail/send")).and(method("POST"))
}

/// Matches provider requests addressed to one recipient.
pub struct RecipientMatcher(pub &'static str);

impl wiremock::Match for RecipientMatcher {
    fn matches(&self, request: &Request) -> bool {
        serde_json::from_slice::<serde_json::Value>(&request.body)
            .map(|body| recipient_of(&body) == self.0)
            .unwrap_or(false)
    }
}

pub fn recipient_of(body: &serde_json::Value) -> &str {
    body["personalizations"][0]["to"][0]["email"]
        .as_str()
        .unwrap_or_default()
}
