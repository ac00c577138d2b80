mod health_check;
mod helpers;
mod newsletters;

pub use health_check::health_check;
pub use helpers::error_chain_fmt;
pub use newsletters::{draft_newsletter, preview_newsletter, send_newsletter};
