use serde_json::json;
use wiremock::{
    Mock, ResponseTemplate,
    matchers::{any, method, path},
};

use crate::helpers::{CC, DATE, TITLE, TO, row, spawn_app, topic_column};

fn complete_row() -> serde_json::Value {
    let topic = topic_column(0);
    row(&[
        (DATE, json!("2024-03-01")),
        (TITLE, json!("Monthly Update")),
        (TO, json!("reader@example.com")),
        (CC, json!("editor@example.com; not-an-address")),
        (topic, json!("A")),
        (topic + 1, json!("https://x/img.png")),
    ])
}

#[tokio::test]
async fn send_without_recipient_is_rejected_before_any_request() {
    let app = spawn_app().await;
    let topic = topic_column(0);

    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&app.email_server)
        .await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&app.image_server)
        .await;

    let response = app
        .post_row(
            "send",
            &row(&[
                (TITLE, json!("Monthly Update")),
                (topic, json!("A")),
                (topic + 1, json!("https://drive.google.com/file/d/ID/view")),
            ]),
        )
        .await;

    assert_eq!(response.status().as_u16(), 400);
    let message = response.text().await.unwrap();
    assert!(message.contains("recipient"));
}

#[tokio::test]
async fn send_without_title_is_rejected() {
    let app = spawn_app().await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&app.email_server)
        .await;

    let response = app
        .post_row("draft", &row(&[(TO, json!("reader@example.com"))]))
        .await;

    assert_eq!(response.status().as_u16(), 400);
    assert!(response.text().await.unwrap().contains("title"));
}

#[tokio::test]
async fn send_delivers_the_rendered_newsletter() {
    let app = spawn_app().await;

    Mock::given(method("POST"))
        .and(path("/v1/email"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&app.email_server)
        .await;

    let response = app.post_row("send", &complete_row()).await;

    assert_eq!(response.status().as_u16(), 200);

    let requests = app.email_server.received_requests().await.unwrap();
    let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert_eq!(body["subject"], "Monthly Update - March 2024");
    assert_eq!(body["to"][0]["email"], "reader@example.com");
    assert_eq!(body["cc"].as_array().map(Vec::len), Some(1));
    assert!(body.get("bcc").is_none());
    assert!(
        body["html"]
            .as_str()
            .is_some_and(|html| html.contains(">Monthly Update</h1>"))
    );
}

#[tokio::test]
async fn draft_goes_to_the_drafts_endpoint() {
    let app = spawn_app().await;

    Mock::given(method("POST"))
        .and(path("/v1/drafts"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&app.email_server)
        .await;

    let response = app.post_row("draft", &complete_row()).await;

    assert_eq!(response.status().as_u16(), 200);
}

#[tokio::test]
async fn mail_api_failures_return_500() {
    let app = spawn_app().await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&app.email_server)
        .await;

    let response = app.post_row("send", &complete_row()).await;

    assert_eq!(response.status().as_u16(), 500);
}
