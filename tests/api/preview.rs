use base64::Engine;
use serde_json::json;
use wiremock::{
    Mock, ResponseTemplate,
    matchers::{method, path, query_param},
};

use crate::helpers::{
    DATE, FINAL_BUTTON_URL, LAYOUT_STYLE, SUBTITLE, TITLE, row, spawn_app, topic_column,
};

#[tokio::test]
async fn stacked_record_renders_header_and_topic() {
    let app = spawn_app().await;
    let topic = topic_column(0);

    let html = app
        .preview(&row(&[
            (TITLE, json!("Monthly Update")),
            (LAYOUT_STYLE, json!("Stacked")),
            (topic, json!("A")),
            (topic + 1, json!("https://x/img.png")),
            (topic + 2, json!("D1")),
        ]))
        .await;

    assert!(html.contains(">Monthly Update</h1>"));
    assert_eq!(html.matches(r#"class="stacked-topic""#).count(), 1);
    assert!(html.contains(">A</h2>"));
    assert!(html.contains(r#"src="https://x/img.png""#));
    assert!(html.contains(">D1</div>"));
    assert!(!html.contains(r#"class="button""#));
}

#[tokio::test]
async fn topics_without_images_are_left_out() {
    let app = spawn_app().await;
    let topic = topic_column(0);

    let html = app
        .preview(&row(&[
            (TITLE, json!("Monthly Update")),
            (topic, json!("A")),
            (topic + 2, json!("Described but not shown")),
        ]))
        .await;

    assert!(!html.contains("Described but not shown"));
    assert!(!html.contains("offset-row"));
    assert!(html.contains(r#"class="header""#));
    assert!(html.contains(r#"class="footer""#));
}

#[tokio::test]
async fn rich_text_cells_become_semantic_html() {
    let app = spawn_app().await;

    let html = app
        .preview(&row(&[(
            SUBTITLE,
            json!({ "runs": [{ "text": "Hello\n\nWorld", "bold": true }] }),
        )]))
        .await;

    assert!(html.contains("<b><p>Hello</p><p>World</p></b>"));
}

#[tokio::test]
async fn injected_markup_is_stripped() {
    let app = spawn_app().await;
    let topic = topic_column(0);

    let html = app
        .preview(&row(&[
            (topic, json!("<img src=x onerror=alert(1)>Safe")),
            (topic + 1, json!("https://x/img.png")),
            (topic + 2, json!("<script>steal()</script><em>kept</em>")),
        ]))
        .await;

    assert!(!html.contains("<script>"));
    assert!(!html.contains("onerror"));
    assert!(html.contains("steal()<em>kept</em>"));
}

#[tokio::test]
async fn shared_drive_images_are_embedded() {
    let app = spawn_app().await;
    let topic = topic_column(0);
    let png: &[u8] = &[0x89, b'P', b'N', b'G'];

    Mock::given(method("GET"))
        .and(path("/uc"))
        .and(query_param("id", "DRIVE42"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(png, "image/png"))
        .expect(1)
        .mount(&app.image_server)
        .await;

    let html = app
        .preview(&row(&[
            (topic, json!("A")),
            (topic + 1, json!("https://drive.google.com/file/d/DRIVE42/view")),
        ]))
        .await;

    let encoded = base64::engine::general_purpose::STANDARD.encode(png);
    assert!(html.contains(&format!("data:image/png;base64,{encoded}")));
}

#[tokio::test]
async fn unreachable_drive_images_fall_back_to_the_view_url() {
    let app = spawn_app().await;
    let topic = topic_column(0);

    Mock::given(path("/uc"))
        .respond_with(ResponseTemplate::new(403))
        .expect(1)
        .mount(&app.image_server)
        .await;

    let html = app
        .preview(&row(&[
            (topic, json!("A")),
            (topic + 1, json!("https://drive.google.com/open?id=LOCKED")),
        ]))
        .await;

    assert!(html.contains("https://drive.google.com/uc?export=view&amp;id=LOCKED"));
}

#[tokio::test]
async fn hero_record_has_one_hero_and_one_two_column_row() {
    let app = spawn_app().await;
    let mut entries = vec![(LAYOUT_STYLE, json!("HERO"))];
    for (index, title) in ["One", "Two", "Three"].into_iter().enumerate() {
        let topic = topic_column(index);
        entries.push((topic, json!(title)));
        entries.push((topic + 1, json!("https://x/img.png")));
    }

    let html = app.preview(&row(&entries)).await;

    assert_eq!(html.matches(r#"class="hero""#).count(), 1);
    assert_eq!(html.matches(r#"class="two-column""#).count(), 1);
}

#[tokio::test]
async fn header_and_call_to_action_follow_the_record() {
    let app = spawn_app().await;

    let html = app
        .preview(&row(&[
            (DATE, json!("2024-03-01")),
            (TITLE, json!("Monthly Update")),
            (FINAL_BUTTON_URL, json!("https://example.com/archive")),
        ]))
        .await;

    assert!(html.contains("March 2024"));
    assert!(html.contains(r#"class="cta""#));
    assert!(!html.contains("header-subtitle"));
}

#[tokio::test]
async fn unexpected_cell_types_are_coerced() {
    let app = spawn_app().await;
    let topic = topic_column(0);

    let html = app
        .preview(&row(&[
            (TITLE, json!(2024)),
            (topic, json!(true)),
            (topic + 1, json!(12)),
        ]))
        .await;

    assert!(html.contains(">2024</h1>"));
    assert!(!html.contains("offset-row"));
}

#[tokio::test]
async fn preview_rejects_malformed_bodies() {
    let app = spawn_app().await;

    let response = app
        .api_client
        .post(format!("{}/newsletters/preview", &app.address))
        .header("Content-Type", "application/json")
        .body("{ not json")
        .send()
        .await
        .expect("Failed to execute request.");

    assert_eq!(response.status().as_u16(), 400);
}
