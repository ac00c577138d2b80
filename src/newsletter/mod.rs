//! The rendering pipeline: sheet row in, HTML email out.

pub mod branding;
pub mod composer;
pub mod dispatch;
pub mod image_resolver;
pub mod layout;
pub mod record;
pub mod renderer;
pub mod rich_text;
mod sanitizer;

pub use branding::Branding;
pub use composer::NewsletterComposer;
pub use dispatch::{DispatchError, DispatchMode, MissingField, dispatch};
pub use image_resolver::{FetchFailure, ImageResolver, ResolvedImage};
pub use layout::render_topics;
pub use record::{NewsletterRecord, ResolvedTopic, Topic};
pub use renderer::{NewsletterRenderer, RenderError};
pub use sanitizer::{ALLOWED_TAGS, sanitize};
