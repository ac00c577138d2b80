use actix_web::{HttpResponse, web};

use crate::domain::SheetRow;
use crate::email_client::EmailClient;
use crate::newsletter::{
    DispatchError, DispatchMode, NewsletterRecord, NewsletterRenderer, dispatch,
};

#[tracing::instrument(name = "Sending newsletter", skip_all)]
pub async fn send_newsletter(
    body: web::Json<SheetRow>,
    renderer: web::Data<NewsletterRenderer>,
    email_client: web::Data<EmailClient>,
) -> Result<HttpResponse, DispatchError> {
    dispatch_row(&body, DispatchMode::Send, &renderer, &email_client).await
}

#[tracing::instrument(name = "Drafting newsletter", skip_all)]
pub async fn draft_newsletter(
    body: web::Json<SheetRow>,
    renderer: web::Data<NewsletterRenderer>,
    email_client: web::Data<EmailClient>,
) -> Result<HttpResponse, DispatchError> {
    dispatch_row(&body, DispatchMode::Draft, &renderer, &email_client).await
}

async fn dispatch_row(
    row: &SheetRow,
    mode: DispatchMode,
    renderer: &NewsletterRenderer,
    email_client: &EmailClient,
) -> Result<HttpResponse, DispatchError> {
    let record = NewsletterRecord::from_row(row);
    dispatch(&record, mode, renderer, email_client).await?;
    Ok(HttpResponse::Ok().finish())
}
