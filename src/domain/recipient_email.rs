use validator::ValidateEmail;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipientEmail(String);

impl RecipientEmail {
    pub fn parse(s: String) -> Result<Self, String> {
        if !s.validate_email() {
            return Err(format!("{} is not a valid recipient email.", s));
        };
        Ok(Self(s))
    }
}

impl AsRef<str> for RecipientEmail {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for RecipientEmail {
    type Error = String;
    fn try_from(value: String) -> Result<Self, Self::Error> {
        RecipientEmail::parse(value)
    }
}

/// Addresses from one recipient cell. Entries are separated by `,` or `;`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecipientList(Vec<RecipientEmail>);

impl RecipientList {
    /// Invalid entries are skipped with a warning rather than failing the list.
    pub fn parse(raw: &str) -> Self {
        let recipients = raw
            .split([',', ';'])
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .filter_map(|s| match RecipientEmail::parse(s.to_string()) {
                Ok(email) => Some(email),
                Err(err) => {
                    tracing::warn!(
                        err.message = %err,
                        "Skipping the recipient. The address is invalid."
                    );
                    None
                }
            })
            .collect();
        Self(recipients)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &RecipientEmail> {
        self.0.iter()
    }
}
