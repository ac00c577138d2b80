use once_cell::sync::Lazy;
use regex::Regex;

/// Tags that survive sanitization. Everything else is stripped.
pub const ALLOWED_TAGS: [&str; 6] = ["b", "strong", "i", "em", "p", "br"];

static TAG: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)<(/?)([a-z][a-z0-9]*)\b([^>]*)>").expect("valid regex"));

static STYLE_ATTRIBUTE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)(?:^|\s)style\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'=<>`]+))"#)
        .expect("valid regex")
});

/// Reduce markup to the allow-listed inline formatting tags.
///
/// Allowed tags are re-emitted in lower case without attributes, except for
/// `style` on `<p>`. Disallowed tags are dropped while their text stays. A `<`
/// followed by a letter or `/` that does not open a complete tag is removed,
/// any other stray `<` is escaped. The output is a fixed point:
/// sanitizing it again returns it unchanged.
pub fn sanitize(input: &str) -> String {
    let mut output = String::with_capacity(input.len());
    let mut last = 0;

    for caps in TAG.captures_iter(input) {
        let Some(whole) = caps.get(0) else { continue };
        push_escaped(&mut output, &input[last..whole.start()]);
        last = whole.end();

        let name = caps[2].to_ascii_lowercase();
        if !ALLOWED_TAGS.contains(&name.as_str()) {
            continue;
        }

        if !caps[1].is_empty() {
            output.push_str("</");
            output.push_str(&name);
            output.push('>');
            continue;
        }

        output.push('<');
        output.push_str(&name);
        if name == "p" {
            if let Some(style) = paragraph_style(&caps[3]) {
                output.push_str(" style=\"");
                output.push_str(&style);
                output.push('"');
            }
        }
        output.push('>');
    }

    push_escaped(&mut output, &input[last..]);
    output
}

/// A `<` that starts something tag-like but never closes is dropped; any other
/// `<` is escaped.
fn push_escaped(output: &mut String, text: &str) {
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        if c != '<' {
            output.push(c);
            continue;
        }
        match chars.peek() {
            Some(&next) if next == '/' || next.is_alphabetic() => {}
            _ => output.push_str("&lt;"),
        }
    }
}

/// Drop every tag and keep only the text between them.
pub fn strip_tags(input: &str) -> String {
    TAG.replace_all(input, "").into_owned()
}

fn paragraph_style(attributes: &str) -> Option<String> {
    let caps = STYLE_ATTRIBUTE.captures(attributes)?;
    let value = caps
        .get(1)
        .or_else(|| caps.get(2))
        .or_else(|| caps.get(3))?
        .as_str()
        .trim();

    if value.is_empty() {
        return None;
    }

    Some(value.replace('"', "&quot;").replace('<', "&lt;"))
}
