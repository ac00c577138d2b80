use chrono::{Datelike, Utc};

use super::composer::NewsletterComposer;
use super::image_resolver::ImageResolver;
use super::layout::render_topics;
use super::record::NewsletterRecord;
use crate::routes::error_chain_fmt;

#[derive(thiserror::Error)]
pub enum RenderError {
    #[error("Failed to fill in the newsletter template.")]
    Template(#[from] tera::Error),
}

impl std::fmt::Debug for RenderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

/// Turns a record into the final HTML document.
///
/// Image and formatting problems never fail a render; they degrade to
/// fallback values instead.
pub struct NewsletterRenderer {
    resolver: ImageResolver,
    composer: NewsletterComposer,
}

impl NewsletterRenderer {
    pub fn new(resolver: ImageResolver, composer: NewsletterComposer) -> Self {
        Self { resolver, composer }
    }

    #[tracing::instrument(
        name = "Rendering newsletter",
        skip(self, record),
        fields(layout = record.layout_style().as_str(), topics = record.topics().len())
    )]
    pub async fn render(&self, record: &NewsletterRecord) -> Result<String, RenderError> {
        let topics = record.resolve_topics(&self.resolver).await;
        let fragment = render_topics(record.layout_style(), &topics, self.composer.branding());
        let document = self
            .composer
            .compose(record, &fragment, Utc::now().year())?;
        Ok(document)
    }
}
