use anyhow::Context;

use super::record::NewsletterRecord;
use super::renderer::NewsletterRenderer;
use crate::domain::RecipientList;
use crate::email_client::{EmailClient, Message};
use crate::routes::error_chain_fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchMode {
    Send,
    Draft,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingField {
    Recipient,
    Title,
}

impl std::fmt::Display for MissingField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MissingField::Recipient => {
                f.write_str("The newsletter has no valid recipient in the `to` field.")
            }
            MissingField::Title => f.write_str("The newsletter has no title."),
        }
    }
}

#[derive(thiserror::Error)]
pub enum DispatchError {
    #[error("{0}")]
    MissingRequiredField(MissingField),
    #[error(transparent)]
    UnexpectedError(#[from] anyhow::Error),
}

impl std::fmt::Debug for DispatchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

/// Send the newsletter, or store it as a draft.
///
/// The recipient and the title are checked before anything is rendered, so a
/// rejected record never reaches the image host or the mail API.
#[tracing::instrument(name = "Dispatching newsletter", skip(record, renderer, email_client))]
pub async fn dispatch(
    record: &NewsletterRecord,
    mode: DispatchMode,
    renderer: &NewsletterRenderer,
    email_client: &EmailClient,
) -> Result<(), DispatchError> {
    let to = RecipientList::parse(record.to().unwrap_or_default());
    if to.is_empty() {
        return Err(DispatchError::MissingRequiredField(MissingField::Recipient));
    }
    if record.plain_title().is_empty() {
        return Err(DispatchError::MissingRequiredField(MissingField::Title));
    }

    let cc = RecipientList::parse(record.cc().unwrap_or_default());
    let bcc = RecipientList::parse(record.bcc().unwrap_or_default());
    let subject = record.subject();

    let html = renderer
        .render(record)
        .await
        .context("Failed to render the newsletter.")?;

    let message = Message {
        to: &to,
        cc: &cc,
        bcc: &bcc,
        subject: &subject,
        html: &html,
    };

    match mode {
        DispatchMode::Send => email_client
            .send_email(&message)
            .await
            .context("Failed to send the newsletter.")?,
        DispatchMode::Draft => email_client
            .create_draft(&message)
            .await
            .context("Failed to create the newsletter draft.")?,
    }

    Ok(())
}
