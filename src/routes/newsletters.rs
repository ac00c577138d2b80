mod dispatch;
mod errors;
mod preview;

pub use dispatch::{draft_newsletter, send_newsletter};
pub use preview::preview_newsletter;
