use crate::helpers::{spawn_app, when_sending_an_email};
use newsletter_sender::domain::PLACEHOLDER_BODY;
use newsletter_sender::startup::render_newsletter;
use wiremock::ResponseTemplate;

#[tokio::test]
async fn a_missing_newsletter_file_sends_the_placeholder_to_everyone() {
    // Arrange
    let app = spawn_app().await;
    app.write_subscribers(serde_json::json!([
        {"email": "a@example.com"},
        {"email": "b@example.com"}
    ]));
    when_sending_an_email()
        .respond_with(ResponseTemplate::new(202))
        .expect(2)
        .mount(&app.email_server)
        .await;

    // Act
    let summary = app.run().await.unwrap();

    // Assert
    assert_eq!(summary.successful, 2);
    for email in app.sent_emails().await {
        assert_eq!(email["content"][0]["value"], PLACEHOLDER_BODY);
        let html = email["content"][1]["value"].as_str().unwrap();
        assert!(html.contains(&format!("<p>{}</p>", PLACEHOLDER_BODY)));
    }
}

#[tokio::test]
async fn preview_renders_without_a_credential() {
    let mut app = spawn_app().await;
    app.unset("SENDGRID_API_KEY");
    app.write_newsletter("# Preview\n\n| a | b |\n|---|---|\n| 1 | 2 |\n");

    let email = render_newsletter(&app.settings()).unwrap();

    assert!(email.html_body.contains("<h1>Preview</h1>"));
    assert!(email.html_body.contains("<td>1</td>"));
    assert!(app.sent_emails().await.is_empty());
}

#[tokio::test]
async fn rendering_the_same_newsletter_twice_is_identical() {
    let app = spawn_app().await;
    app.write_newsletter("# Title\n\nSome **bold**, some *italic*, a [link](https://blt.owasp.org).\n");

    let first = render_newsletter(&app.settings()).unwrap();
    let second = render_newsletter(&app.settings()).unwrap();

    assert_eq!(first, second);
}
