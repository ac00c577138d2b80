mod cell;
mod layout_style;
mod recipient_email;

pub use cell::{CellValue, RichText, SheetRow, StyleError, TextRun};
pub use layout_style::LayoutStyle;
pub use recipient_email::{RecipientEmail, RecipientList};
