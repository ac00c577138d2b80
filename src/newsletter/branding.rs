/// Look and feel of the generated document.
///
/// Fields missing from the configuration keep their default value.
#[derive(serde::Deserialize, serde::Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct Branding {
    pub brand_name: String,
    pub primary_color: String,
    pub accent_color: String,
    pub text_color: String,
    pub background_color: String,
    pub font_import_url: String,
    pub font_family: String,
    pub cta_label: String,
    pub footer_text: String,
}

impl Default for Branding {
    fn default() -> Self {
        Self {
            brand_name: "Newsletter".into(),
            primary_color: "#1f3a5f".into(),
            accent_color: "#eef3f8".into(),
            text_color: "#333333".into(),
            background_color: "#f4f4f4".into(),
            font_import_url: "https://fonts.googleapis.com/css2?family=Montserrat:wght@400;600;700&display=swap".into(),
            font_family: "'Montserrat', 'Helvetica Neue', Helvetica, Arial, sans-serif".into(),
            cta_label: "Read more".into(),
            footer_text: "You are receiving this email because you subscribed to our newsletter.".into(),
        }
    }
}
