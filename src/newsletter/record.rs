use chrono::{DateTime, Days, NaiveDate, NaiveDateTime};

use crate::domain::{CellValue, LayoutStyle, SheetRow};

use super::image_resolver::{ImageResolver, ResolvedImage};
use super::sanitizer::strip_tags;
use super::{rich_text, sanitize};

/// Column positions of one topic inside a record row.
#[derive(Debug, Clone, Copy)]
pub struct TopicColumns {
    pub title: usize,
    pub image: usize,
    pub description: usize,
    pub button_text: usize,
    pub button_url: usize,
}

/// Where every record field lives in a row.
#[derive(Debug, Clone, Copy)]
pub struct ColumnMap {
    pub date: usize,
    pub title: usize,
    pub subtitle: usize,
    pub topics: [TopicColumns; 3],
    pub final_button_url: usize,
    pub to: usize,
    pub cc: usize,
    pub bcc: usize,
    pub layout_style: usize,
}

const fn topic_columns(first: usize) -> TopicColumns {
    TopicColumns {
        title: first,
        image: first + 1,
        description: first + 2,
        button_text: first + 3,
        button_url: first + 4,
    }
}

/// The sheet layout records are read from.
pub const RECORD_COLUMNS: ColumnMap = ColumnMap {
    date: 0,
    title: 1,
    subtitle: 2,
    topics: [topic_columns(3), topic_columns(8), topic_columns(13)],
    final_button_url: 18,
    to: 19,
    cc: 20,
    bcc: 21,
    layout_style: 22,
};

/// Spreadsheet serial dates count days from this epoch.
const SERIAL_DATE_EPOCH: (i32, u32, u32) = (1899, 12, 30);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Button {
    pub text: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Topic {
    title: String,
    image_ref: String,
    description: String,
    button_text: Option<String>,
    button_url: Option<String>,
}

impl Topic {
    /// `None` unless both the title and the image reference are filled in.
    fn from_row(row: &SheetRow, columns: &TopicColumns) -> Option<Self> {
        let title = html_field(row.cell(columns.title));
        let image_ref = row
            .cell(columns.image)
            .string_value()
            .map(|s| s.trim().to_string())
            .unwrap_or_default();

        if title.trim().is_empty() || image_ref.is_empty() {
            return None;
        }

        Some(Self {
            title,
            image_ref,
            description: html_field(row.cell(columns.description)),
            button_text: row.cell(columns.button_text).non_empty_text(),
            button_url: row.cell(columns.button_url).non_empty_text(),
        })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn image_ref(&self) -> &str {
        &self.image_ref
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// A button is only shown when both its label and its link are present.
    pub fn button(&self) -> Option<Button> {
        match (&self.button_text, &self.button_url) {
            (Some(text), Some(url)) => Some(Button {
                text: text.clone(),
                url: url.clone(),
            }),
            _ => None,
        }
    }
}

/// A topic whose image reference has been turned into a usable source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedTopic {
    pub title: String,
    pub image: ResolvedImage,
    pub description: String,
    pub button: Option<Button>,
}

impl ResolvedTopic {
    pub fn image_src(&self) -> &str {
        self.image.src()
    }
}

/// One newsletter as read from the data source. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewsletterRecord {
    date: Option<NaiveDate>,
    title: String,
    plain_title: String,
    subtitle: String,
    topics: Vec<Topic>,
    final_button_url: Option<String>,
    to: Option<String>,
    cc: Option<String>,
    bcc: Option<String>,
    layout_style: LayoutStyle,
}

impl NewsletterRecord {
    #[tracing::instrument(name = "Reading newsletter record", skip_all)]
    pub fn from_row(row: &SheetRow) -> Self {
        Self::from_row_with(row, &RECORD_COLUMNS)
    }

    pub fn from_row_with(row: &SheetRow, columns: &ColumnMap) -> Self {
        let layout_style = row
            .cell(columns.layout_style)
            .non_empty_text()
            .map(|style| LayoutStyle::parse(&style))
            .unwrap_or_default();

        Self {
            date: parse_date(row.cell(columns.date)),
            title: html_field(row.cell(columns.title)),
            plain_title: plain_field(row.cell(columns.title)),
            subtitle: html_field(row.cell(columns.subtitle)),
            topics: columns
                .topics
                .iter()
                .filter_map(|topic| Topic::from_row(row, topic))
                .collect(),
            final_button_url: row.cell(columns.final_button_url).non_empty_text(),
            to: row.cell(columns.to).non_empty_text(),
            cc: row.cell(columns.cc).non_empty_text(),
            bcc: row.cell(columns.bcc).non_empty_text(),
            layout_style,
        }
    }

    pub fn date(&self) -> Option<NaiveDate> {
        self.date
    }

    /// "Month Year", as shown in the header and the subject line.
    pub fn formatted_date(&self) -> Option<String> {
        self.date.map(format_month_year)
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn plain_title(&self) -> &str {
        &self.plain_title
    }

    pub fn subtitle(&self) -> &str {
        &self.subtitle
    }

    /// Present topics only, in sheet order.
    pub fn topics(&self) -> &[Topic] {
        &self.topics
    }

    pub fn final_button_url(&self) -> Option<&str> {
        self.final_button_url.as_deref()
    }

    pub fn to(&self) -> Option<&str> {
        self.to.as_deref()
    }

    pub fn cc(&self) -> Option<&str> {
        self.cc.as_deref()
    }

    pub fn bcc(&self) -> Option<&str> {
        self.bcc.as_deref()
    }

    pub fn layout_style(&self) -> LayoutStyle {
        self.layout_style
    }

    /// The title, followed by the month when the record is dated.
    pub fn subject(&self) -> String {
        match self.formatted_date() {
            Some(date) => format!("{} - {}", self.plain_title, date),
            None => self.plain_title.clone(),
        }
    }

    /// Resolve every topic image, one after the other.
    #[tracing::instrument(name = "Resolving topic images", skip_all)]
    pub async fn resolve_topics(&self, resolver: &ImageResolver) -> Vec<ResolvedTopic> {
        let mut resolved = Vec::with_capacity(self.topics.len());
        for topic in &self.topics {
            resolved.push(ResolvedTopic {
                title: topic.title.clone(),
                image: resolver.resolve(&topic.image_ref).await,
                description: topic.description.clone(),
                button: topic.button(),
            });
        }
        resolved
    }
}

fn html_field(cell: &CellValue) -> String {
    sanitize(&rich_text::to_html(cell))
}

/// The cell text with any markup dropped, for places that cannot show HTML.
fn plain_field(cell: &CellValue) -> String {
    match cell {
        CellValue::Rich(rich) => rich.plain_text().trim().to_string(),
        other => strip_tags(&other.coerced_text()).trim().to_string(),
    }
}

pub fn format_month_year(date: NaiveDate) -> String {
    date.format("%B %Y").to_string()
}

fn parse_date(cell: &CellValue) -> Option<NaiveDate> {
    let parsed = match cell {
        CellValue::Empty => return None,
        CellValue::Number(serial) => serial_date(*serial),
        other => other.non_empty_text().and_then(|text| date_from_text(&text)),
    };

    if parsed.is_none() {
        tracing::debug!(cell = ?cell, "Ignoring a date cell that could not be parsed.");
    }
    parsed
}

fn date_from_text(text: &str) -> Option<NaiveDate> {
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(text) {
        return Some(timestamp.date_naive());
    }
    if let Ok(timestamp) = NaiveDateTime::parse_from_str(text, "%Y-%m-%d %H:%M:%S") {
        return Some(timestamp.date());
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d").ok()
}

fn serial_date(serial: f64) -> Option<NaiveDate> {
    if !serial.is_finite() || serial < 0.0 || serial > u32::MAX as f64 {
        return None;
    }
    let (year, month, day) = SERIAL_DATE_EPOCH;
    NaiveDate::from_ymd_opt(year, month, day)?.checked_add_days(Days::new(serial.floor() as u64))
}
