use tera::{Context, Tera};

use super::branding::Branding;
use super::layout::escape_attribute;
use super::record::NewsletterRecord;

const DOCUMENT_TEMPLATE: &str = "newsletter.html";

/// Wraps a rendered layout fragment into the full email document.
pub struct NewsletterComposer {
    tera: Tera,
    branding: Branding,
}

impl NewsletterComposer {
    pub fn new(branding: Branding) -> Result<Self, tera::Error> {
        let mut tera = Tera::default();
        tera.add_raw_template(
            DOCUMENT_TEMPLATE,
            include_str!("../../templates/newsletter.html"),
        )?;
        Ok(Self { tera, branding })
    }

    pub fn branding(&self) -> &Branding {
        &self.branding
    }

    /// Header regions are left out entirely when their value is empty, and the
    /// call to action only appears when the record links somewhere.
    #[tracing::instrument(name = "Composing newsletter document", skip_all)]
    pub fn compose(
        &self,
        record: &NewsletterRecord,
        content: &str,
        year: i32,
    ) -> Result<String, tera::Error> {
        let mut ctx = Context::new();
        ctx.insert("branding", &self.branding);
        ctx.insert("subject", &record.subject());
        ctx.insert("date", &record.formatted_date().unwrap_or_default());
        ctx.insert("title", record.title().trim());
        ctx.insert("subtitle", record.subtitle().trim());
        ctx.insert("content", content);
        ctx.insert(
            "cta_url",
            &record.final_button_url().map(escape_attribute),
        );
        ctx.insert("year", &year);
        self.tera.render(DOCUMENT_TEMPLATE, &ctx)
    }
}
