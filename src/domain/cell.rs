use serde::Deserialize;

/// One styled run of a rich-text cell.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TextRun {
    pub text: String,
    #[serde(default)]
    pub bold: bool,
    #[serde(default)]
    pub italic: bool,
}

impl TextRun {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            bold: false,
            italic: false,
        }
    }

    pub fn bold(text: impl Into<String>) -> Self {
        Self {
            bold: true,
            ..Self::plain(text)
        }
    }

    pub fn italic(text: impl Into<String>) -> Self {
        Self {
            italic: true,
            ..Self::plain(text)
        }
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum StyleError {
    #[error("The cell carries no style runs.")]
    NoRuns,
    #[error("The style runs do not match the cell text.")]
    RunsMismatchText,
}

/// A cell value carrying both its plain text and its formatting runs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RichText {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub runs: Vec<TextRun>,
}

impl RichText {
    pub fn from_runs(runs: Vec<TextRun>) -> Self {
        Self { text: None, runs }
    }

    pub fn plain_text(&self) -> String {
        match &self.text {
            Some(text) => text.clone(),
            None => self.runs.iter().map(|r| r.text.as_str()).collect(),
        }
    }

    /// Runs are only trusted when they spell out the same text as the cell.
    pub fn styled_runs(&self) -> Result<&[TextRun], StyleError> {
        if self.runs.is_empty() {
            return Err(StyleError::NoRuns);
        }

        if let Some(text) = &self.text {
            let joined: String = self.runs.iter().map(|r| r.text.as_str()).collect();
            if &joined != text {
                return Err(StyleError::RunsMismatchText);
            }
        }

        Ok(&self.runs)
    }
}

/// A single value read from the tabular data source.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Rich(RichText),
    Text(String),
    Number(f64),
    Bool(bool),
    #[default]
    Empty,
}

impl CellValue {
    /// The value as a string, only when the cell actually holds text.
    pub fn string_value(&self) -> Option<String> {
        match self {
            CellValue::Text(s) => Some(s.clone()),
            CellValue::Rich(rich) => Some(rich.plain_text()),
            _ => None,
        }
    }

    /// The value coerced to text; empty cells coerce to the empty string.
    pub fn coerced_text(&self) -> String {
        match self {
            CellValue::Number(n) => n.to_string(),
            CellValue::Bool(b) => b.to_string(),
            CellValue::Empty => String::new(),
            other => other.string_value().unwrap_or_default(),
        }
    }

    /// Trimmed text, `None` when the cell is blank.
    pub fn non_empty_text(&self) -> Option<String> {
        let text = self.coerced_text();
        let trimmed = text.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Text(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::Text(value)
    }
}

impl From<Vec<TextRun>> for CellValue {
    fn from(runs: Vec<TextRun>) -> Self {
        CellValue::Rich(RichText::from_runs(runs))
    }
}

static EMPTY_CELL: CellValue = CellValue::Empty;

/// One record row as delivered by the data source.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SheetRow {
    #[serde(default)]
    pub cells: Vec<CellValue>,
}

impl SheetRow {
    pub fn new(cells: Vec<CellValue>) -> Self {
        Self { cells }
    }

    /// Columns past the end of the row read as empty cells.
    pub fn cell(&self, column: usize) -> &CellValue {
        self.cells.get(column).unwrap_or(&EMPTY_CELL)
    }
}
