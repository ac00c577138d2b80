use std::fmt::Write;

use crate::domain::LayoutStyle;

use super::branding::Branding;
use super::record::{Button, ResolvedTopic};

const HERO_IMAGE_MAX_HEIGHT: u32 = 360;
const COLUMN_IMAGE_MAX_HEIGHT: u32 = 180;
const OFFSET_IMAGE_MAX_HEIGHT: u32 = 240;

#[derive(Debug, Clone, Copy)]
enum ButtonSize {
    Regular,
    Compact,
}

/// Escape a value placed inside a double-quoted attribute.
pub(crate) fn escape_attribute(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '"' => escaped.push_str("&quot;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            c => escaped.push(c),
        }
    }
    escaped
}

/// Render the topics of a newsletter as an HTML fragment.
///
/// An empty topic list always renders an empty fragment.
pub fn render_topics(style: LayoutStyle, topics: &[ResolvedTopic], branding: &Branding) -> String {
    if topics.is_empty() {
        return String::new();
    }

    match style {
        LayoutStyle::Stacked => stacked(topics, branding),
        LayoutStyle::Hero => hero(topics, branding),
        LayoutStyle::Offset => offset(topics, branding),
    }
}

fn button(button: &Button, branding: &Branding, size: ButtonSize) -> String {
    let (padding, font_size) = match size {
        ButtonSize::Regular => ("12px 28px", 16),
        ButtonSize::Compact => ("8px 18px", 14),
    };

    format!(
        r#"<table role="presentation" class="button" align="center" cellpadding="0" cellspacing="0" style="margin:0 auto;"><tr><td align="center" style="border-radius:6px;background-color:{color};"><a href="{url}" target="_blank" style="display:inline-block;padding:{padding};font-size:{font_size}px;font-weight:600;color:#ffffff;text-decoration:none;border-radius:6px;">{text}</a></td></tr></table>"#,
        color = branding.primary_color,
        url = escape_attribute(&button.url),
        text = tera::escape_html(&button.text),
    )
}

fn image(src: &str, max_height: Option<u32>) -> String {
    let max_height = max_height
        .map(|h| format!("max-height:{h}px;object-fit:cover;"))
        .unwrap_or_default();
    format!(
        r#"<img class="topic-image" src="{src}" alt="" width="100%" style="display:block;width:100%;max-width:100%;height:auto;{max_height}border:0;border-radius:8px;">"#,
        src = escape_attribute(src),
    )
}

fn description(text: &str, branding: &Branding, centered: bool) -> String {
    let align = if centered { "center" } else { "left" };
    format!(
        r#"<div class="topic-description" style="background-color:{background};border-left:4px solid {border};padding:16px;margin:0 0 16px 0;border-radius:4px;line-height:1.6;text-align:{align};">{text}</div>"#,
        background = branding.accent_color,
        border = branding.primary_color,
    )
}

fn stacked(topics: &[ResolvedTopic], branding: &Branding) -> String {
    let mut html = String::new();
    for topic in topics {
        html.push_str(r#"<table role="presentation" class="stacked-topic" width="100%" cellpadding="0" cellspacing="0" style="margin:0 0 32px 0;"><tr><td>"#);
        let _ = write!(
            html,
            r#"<h2 class="topic-title" style="margin:0 0 16px 0;font-size:22px;color:{};">{}</h2>"#,
            branding.primary_color, topic.title
        );
        if !topic.image_src().is_empty() {
            let _ = write!(
                html,
                r#"<div style="margin:0 0 16px 0;">{}</div>"#,
                image(topic.image_src(), None)
            );
        }
        if !topic.description.is_empty() {
            html.push_str(&description(&topic.description, branding, false));
        }
        if let Some(b) = &topic.button {
            html.push_str(&button(b, branding, ButtonSize::Regular));
        }
        html.push_str("</td></tr></table>");
    }
    html
}

fn hero(topics: &[ResolvedTopic], branding: &Branding) -> String {
    let mut html = String::new();

    if let Some(featured) = topics.first() {
        html.push_str(r#"<table role="presentation" class="hero" width="100%" cellpadding="0" cellspacing="0" style="margin:0 0 32px 0;"><tr><td align="center" style="text-align:center;">"#);
        let _ = write!(
            html,
            r#"<h2 class="topic-title" style="margin:0 0 20px 0;font-size:28px;color:{};">{}</h2>"#,
            branding.primary_color, featured.title
        );
        if !featured.image_src().is_empty() {
            let _ = write!(
                html,
                r#"<div style="margin:0 0 20px 0;">{}</div>"#,
                image(featured.image_src(), Some(HERO_IMAGE_MAX_HEIGHT))
            );
        }
        if !featured.description.is_empty() {
            html.push_str(&description(&featured.description, branding, true));
        }
        if let Some(b) = &featured.button {
            html.push_str(&button(b, branding, ButtonSize::Regular));
        }
        html.push_str("</td></tr></table>");
    }

    if let Some(left) = topics.get(1) {
        html.push_str(r#"<table role="presentation" class="two-column" width="100%" cellpadding="0" cellspacing="0"><tr>"#);
        html.push_str(&hero_column(left, branding, "0 8px 0 0"));
        match topics.get(2) {
            Some(right) => html.push_str(&hero_column(right, branding, "0 0 0 8px")),
            None => html.push_str(
                r#"<td class="placeholder-column" width="50%" valign="top" style="width:50%;">&nbsp;</td>"#,
            ),
        }
        html.push_str("</tr></table>");
    }

    html
}

fn hero_column(topic: &ResolvedTopic, branding: &Branding, padding: &str) -> String {
    let mut html = format!(
        r#"<td class="hero-column" width="50%" valign="top" style="width:50%;padding:{padding};">"#
    );
    let _ = write!(
        html,
        r#"<h3 class="topic-title" style="margin:0 0 12px 0;font-size:18px;color:{};">{}</h3>"#,
        branding.primary_color, topic.title
    );
    if !topic.image_src().is_empty() {
        let _ = write!(
            html,
            r#"<div style="margin:0 0 12px 0;">{}</div>"#,
            image(topic.image_src(), Some(COLUMN_IMAGE_MAX_HEIGHT))
        );
    }
    if !topic.description.is_empty() {
        html.push_str(&description(&topic.description, branding, false));
    }
    if let Some(b) = &topic.button {
        html.push_str(&button(b, branding, ButtonSize::Compact));
    }
    html.push_str("</td>");
    html
}

fn offset(topics: &[ResolvedTopic], branding: &Branding) -> String {
    let mut html = String::new();
    for (index, topic) in topics.iter().enumerate() {
        html.push_str(r#"<table role="presentation" class="offset-row" width="100%" cellpadding="0" cellspacing="0" style="margin:0 0 32px 0;"><tr>"#);

        if topic.image_src().is_empty() {
            html.push_str(&offset_content(topic, branding, "100%"));
        } else {
            let image_cell = format!(
                r#"<td class="offset-image" width="50%" valign="middle" style="width:50%;padding:0 8px;">{}</td>"#,
                image(topic.image_src(), Some(OFFSET_IMAGE_MAX_HEIGHT))
            );
            let content_cell = offset_content(topic, branding, "50%");
            if index % 2 == 0 {
                html.push_str(&image_cell);
                html.push_str(&content_cell);
            } else {
                html.push_str(&content_cell);
                html.push_str(&image_cell);
            }
        }

        html.push_str("</tr></table>");
    }
    html
}

fn offset_content(topic: &ResolvedTopic, branding: &Branding, width: &str) -> String {
    let mut html = format!(
        r#"<td class="offset-content" width="{width}" valign="middle" style="width:{width};padding:0 8px;">"#
    );
    let _ = write!(
        html,
        r#"<h2 class="topic-title" style="margin:0 0 12px 0;font-size:20px;color:{};">{}</h2>"#,
        branding.primary_color, topic.title
    );
    if !topic.description.is_empty() {
        html.push_str(&description(&topic.description, branding, false));
    }
    if let Some(b) = &topic.button {
        html.push_str(&button(b, branding, ButtonSize::Compact));
    }
    html.push_str("</td>");
    html
}
