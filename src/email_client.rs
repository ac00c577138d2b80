use std::time::Duration;

use reqwest::{Client, Url};
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;

use crate::domain::{RecipientEmail, RecipientList};

const SEND_ROUTE: &str = "v1/email";
const DRAFT_ROUTE: &str = "v1/drafts";

#[derive(Clone, Debug)]
pub struct EmailClient {
    http_client: Client,
    base_url: Url,
    sender: RecipientEmail,
    auth_token: SecretString,
}

/// A rendered newsletter ready for the mail API.
pub struct Message<'a> {
    pub to: &'a RecipientList,
    pub cc: &'a RecipientList,
    pub bcc: &'a RecipientList,
    pub subject: &'a str,
    pub html: &'a str,
}

#[derive(Serialize)]
struct EmailUnit<'a> {
    email: &'a str,
}

impl<'a> EmailUnit<'a> {
    fn new(email: &'a str) -> Self {
        Self { email }
    }

    fn list(recipients: &'a RecipientList) -> Vec<Self> {
        recipients.iter().map(|r| Self::new(r.as_ref())).collect()
    }
}

#[derive(Serialize)]
struct SendEmailRequest<'a> {
    from: EmailUnit<'a>,
    to: Vec<EmailUnit<'a>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    cc: Vec<EmailUnit<'a>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    bcc: Vec<EmailUnit<'a>>,
    subject: &'a str,
    html: &'a str,
}

impl EmailClient {
    pub fn new(
        base_url: Url,
        sender: RecipientEmail,
        auth_token: SecretString,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        Ok(Self {
            http_client: Client::builder().timeout(timeout).build()?,
            base_url,
            sender,
            auth_token,
        })
    }

    #[tracing::instrument(name = "Sending newsletter email", skip_all)]
    pub async fn send_email(&self, message: &Message<'_>) -> Result<(), anyhow::Error> {
        self.post(SEND_ROUTE, message).await
    }

    #[tracing::instrument(name = "Creating newsletter draft", skip_all)]
    pub async fn create_draft(&self, message: &Message<'_>) -> Result<(), anyhow::Error> {
        self.post(DRAFT_ROUTE, message).await
    }

    async fn post(&self, route: &str, message: &Message<'_>) -> Result<(), anyhow::Error> {
        let url = self.base_url.join(route)?;

        let body = SendEmailRequest {
            from: EmailUnit::new(self.sender.as_ref()),
            to: EmailUnit::list(message.to),
            cc: EmailUnit::list(message.cc),
            bcc: EmailUnit::list(message.bcc),
            subject: message.subject,
            html: message.html,
        };

        self.http_client
            .post(url)
            .header(
                "Authorization",
                "Bearer ".to_owned() + self.auth_token.expose_secret(),
            )
            .json(&body)
            .send()
            .await?
            .error_for_status()?;

        Ok(())
    }
}
