#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LayoutStyle {
    Stacked,
    Hero,
    #[default]
    Offset,
}

impl LayoutStyle {
    /// Case-insensitive; anything unrecognized falls back to `Offset`.
    pub fn parse(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "stacked" => LayoutStyle::Stacked,
            "hero" => LayoutStyle::Hero,
            _ => LayoutStyle::Offset,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LayoutStyle::Stacked => "stacked",
            LayoutStyle::Hero => "hero",
            LayoutStyle::Offset => "offset",
        }
    }
}
