use once_cell::sync::Lazy;
use serde_json::{Value, json};
use wiremock::MockServer;

use newsletter_renderer::{
    configuration::get_configuration,
    startup::Application,
    telemetry::{get_subscriber, init_subscriber},
};

static TRACING: Lazy<()> = Lazy::new(|| {
    let default_filter_level = "info".to_string();
    let subscriber_name = "test".to_string();

    if std::env::var("TEST_LOG").is_ok() {
        let subscriber = get_subscriber(subscriber_name, default_filter_level, std::io::stdout);
        init_subscriber(subscriber);
    } else {
        let subscriber = get_subscriber(subscriber_name, default_filter_level, std::io::sink);
        init_subscriber(subscriber);
    }
});

pub const ROW_WIDTH: usize = 23;
pub const DATE: usize = 0;
pub const TITLE: usize = 1;
pub const SUBTITLE: usize = 2;
pub const FINAL_BUTTON_URL: usize = 18;
pub const TO: usize = 19;
pub const CC: usize = 20;
pub const LAYOUT_STYLE: usize = 22;

/// First column of a topic: title, then image, description, button text, button url.
pub fn topic_column(topic: usize) -> usize {
    3 + topic * 5
}

pub struct TestApp {
    pub address: String,
    pub email_server: MockServer,
    pub image_server: MockServer,
    pub api_client: reqwest::Client,
}

impl TestApp {
    pub async fn post_row(&self, route: &str, row: &Value) -> reqwest::Response {
        self.api_client
            .post(format!("{}/newsletters/{}", &self.address, route))
            .json(row)
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn preview(&self, row: &Value) -> String {
        let response = self.post_row("preview", row).await;
        assert_eq!(response.status().as_u16(), 200);
        response.text().await.expect("Failed to read the response body.")
    }
}

/// A request body with the given cells set and every other cell null.
pub fn row(entries: &[(usize, Value)]) -> Value {
    let mut cells = vec![Value::Null; ROW_WIDTH];
    for (column, value) in entries {
        cells[*column] = value.clone();
    }
    json!({ "cells": cells })
}

pub async fn spawn_app() -> TestApp {
    Lazy::force(&TRACING);

    let email_server = MockServer::start().await;
    let image_server = MockServer::start().await;

    let config = {
        let mut c = get_configuration().expect("Failed to read configuration");
        c.app.port = 0;
        c.email_client.base_url = email_server.uri();
        c.images.download_base_url = format!("{}/uc", image_server.uri());
        c
    };

    let application = Application::build(config)
        .await
        .expect("Failed to build application.");
    let port = application.get_port();
    let _ = tokio::spawn(application.run_until_stopped());

    TestApp {
        address: format!("http://127.0.0.1:{port}"),
        email_server,
        image_server,
        api_client: reqwest::Client::new(),
    }
}
