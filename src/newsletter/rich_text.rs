use crate::domain::{CellValue, RichText, TextRun};

use super::sanitizer::sanitize;

fn is_line_break(c: char) -> bool {
    matches!(c, '\n' | '\r' | '\u{000B}' | '\u{2028}' | '\u{2029}')
}

/// Styled text carries no markup of its own.
fn escape_text(line: &str) -> String {
    let mut escaped = String::with_capacity(line.len());
    for c in line.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Blank lines are dropped. A single line is kept as is, several lines become
/// one paragraph each. Every line goes through `line_to_html` before it is
/// wrapped.
fn paragraphs(text: &str, line_to_html: fn(&str) -> String) -> String {
    let lines: Vec<String> = text
        .split(is_line_break)
        .filter(|line| !line.trim().is_empty())
        .map(line_to_html)
        .collect();

    match lines.as_slice() {
        [] => String::new(),
        [line] => line.clone(),
        lines => lines.iter().map(|line| format!("<p>{line}</p>")).collect(),
    }
}

fn run_to_html(run: &TextRun) -> String {
    let mut html = paragraphs(&run.text, escape_text);
    if html.is_empty() {
        return html;
    }
    if run.italic {
        html = format!("<i>{html}</i>");
    }
    if run.bold {
        html = format!("<b>{html}</b>");
    }
    html
}

fn rich_to_html(rich: &RichText) -> String {
    match rich.styled_runs() {
        Ok(runs) => runs.iter().map(run_to_html).collect(),
        Err(err) => {
            tracing::debug!(
                error.message = %err,
                "Falling back to the unformatted cell text."
            );
            paragraphs(&rich.plain_text(), escape_text)
        }
    }
}

/// Convert a cell into semantic HTML (bold, italic, paragraphs).
///
/// Rich cells are plain text plus style flags, so their text is escaped. Plain
/// string cells may carry inline markup; each of their lines is sanitized on
/// its own so the paragraph tags added here stay intact. Run the result
/// through [`sanitize`](crate::newsletter::sanitize) before embedding it.
pub fn to_html(cell: &CellValue) -> String {
    match cell {
        CellValue::Rich(rich) => rich_to_html(rich),
        other => paragraphs(&other.coerced_text(), sanitize),
    }
}
