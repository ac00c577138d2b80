use actix_web::{HttpResponse, http::header::ContentType, web};

use crate::domain::SheetRow;
use crate::newsletter::{NewsletterRecord, NewsletterRenderer, RenderError};

#[tracing::instrument(name = "Previewing newsletter", skip(body, renderer))]
pub async fn preview_newsletter(
    body: web::Json<SheetRow>,
    renderer: web::Data<NewsletterRenderer>,
) -> Result<HttpResponse, RenderError> {
    let record = NewsletterRecord::from_row(&body);
    let html = renderer.render(&record).await?;

    Ok(HttpResponse::Ok()
        .content_type(ContentType::html())
        .body(html))
}
