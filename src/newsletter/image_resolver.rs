use base64::Engine;
use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::{Client, StatusCode, Url, header::CONTENT_TYPE};

use crate::domain::CellValue;

static BASE64_IMAGE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^data:(image/(?:png|jpe?g|gif|webp|svg\+xml));base64,[a-z0-9+/]+={0,2}$")
        .expect("valid regex")
});

static DRIVE_SHARE_LINK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)^https?://(?:drive|docs)\.google\.com/(?:file/d/([\w-]+)|(?:open|uc|thumbnail)\?(?:[^#]*&)?id=([\w-]+))",
    )
    .expect("valid regex")
});

const DATA_URI_PREFIX: &str = "data:";

/// Why a shared image could not be embedded.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchFailure {
    #[error("The image host answered with status {0}.")]
    UnexpectedStatus(u16),
    #[error("The image host returned `{0}` instead of an image.")]
    NotAnImage(String),
    #[error("The image request failed: {0}")]
    Transport(String),
}

/// The outcome of resolving one image reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedImage {
    /// Blank or non-text reference.
    Missing,
    /// A well-formed base64 image data URI, used as is.
    Inline { mime: String, src: String },
    /// Looks like a data URI but does not pass validation. Used as is.
    UncheckedDataUri(String),
    /// A shared file fetched and re-encoded as a data URI.
    Embedded {
        file_id: String,
        mime: String,
        src: String,
    },
    /// A shared file that could not be fetched; points at the view URL instead.
    Fallback {
        file_id: String,
        src: String,
        reason: FetchFailure,
    },
    /// Any other reference, used as is.
    Direct(String),
}

impl ResolvedImage {
    /// The value for the `src` attribute. Never fails; `Missing` is empty.
    pub fn src(&self) -> &str {
        match self {
            ResolvedImage::Missing => "",
            ResolvedImage::Inline { src, .. }
            | ResolvedImage::Embedded { src, .. }
            | ResolvedImage::Fallback { src, .. } => src,
            ResolvedImage::UncheckedDataUri(src) | ResolvedImage::Direct(src) => src,
        }
    }

    pub fn mime(&self) -> Option<&str> {
        match self {
            ResolvedImage::Inline { mime, .. } | ResolvedImage::Embedded { mime, .. } => {
                Some(mime)
            }
            _ => None,
        }
    }

    pub fn into_src(self) -> String {
        match self {
            ResolvedImage::Missing => String::new(),
            ResolvedImage::Inline { src, .. }
            | ResolvedImage::Embedded { src, .. }
            | ResolvedImage::Fallback { src, .. } => src,
            ResolvedImage::UncheckedDataUri(src) | ResolvedImage::Direct(src) => src,
        }
    }
}

/// Extract the file identifier from a Drive share link.
pub fn drive_file_id(reference: &str) -> Option<&str> {
    let caps = DRIVE_SHARE_LINK.captures(reference)?;
    caps.get(1).or_else(|| caps.get(2)).map(|m| m.as_str())
}

/// Turns image references into something a mail client can display.
///
/// Shared Drive files are downloaded once per call and embedded as base64 so
/// they render even when remote images are blocked. A failed download falls back
/// to the public view URL. There is no cache: every call hits the network.
#[derive(Clone, Debug)]
pub struct ImageResolver {
    http_client: Client,
    download_base_url: Url,
    view_base_url: Url,
}

impl ImageResolver {
    pub fn new(http_client: Client, download_base_url: Url, view_base_url: Url) -> Self {
        Self {
            http_client,
            download_base_url,
            view_base_url,
        }
    }

    pub fn download_url(&self, file_id: &str) -> Url {
        let mut url = self.download_base_url.clone();
        url.query_pairs_mut()
            .append_pair("export", "download")
            .append_pair("id", file_id);
        url
    }

    pub fn view_url(&self, file_id: &str) -> Url {
        let mut url = self.view_base_url.clone();
        url.query_pairs_mut()
            .append_pair("export", "view")
            .append_pair("id", file_id);
        url
    }

    /// Resolve a cell holding an image reference.
    pub async fn resolve_cell(&self, cell: &CellValue) -> ResolvedImage {
        match cell.string_value() {
            Some(reference) => self.resolve(&reference).await,
            None => ResolvedImage::Missing,
        }
    }

    #[tracing::instrument(name = "Resolving image reference", skip(self, reference))]
    pub async fn resolve(&self, reference: &str) -> ResolvedImage {
        let reference = reference.trim();
        if reference.is_empty() {
            return ResolvedImage::Missing;
        }

        if let Some(caps) = BASE64_IMAGE.captures(reference) {
            return ResolvedImage::Inline {
                mime: caps[1].to_ascii_lowercase(),
                src: reference.to_string(),
            };
        }

        if reference
            .get(..DATA_URI_PREFIX.len())
            .is_some_and(|prefix| prefix.eq_ignore_ascii_case(DATA_URI_PREFIX))
        {
            tracing::debug!("Using a data URI that failed validation as is.");
            return ResolvedImage::UncheckedDataUri(reference.to_string());
        }

        match drive_file_id(reference) {
            Some(file_id) => self.embed_shared_file(file_id).await,
            None => ResolvedImage::Direct(reference.to_string()),
        }
    }

    async fn embed_shared_file(&self, file_id: &str) -> ResolvedImage {
        match self.fetch_image(file_id).await {
            Ok((mime, bytes)) => {
                let encoded = base64::engine::general_purpose::STANDARD.encode(&bytes);
                ResolvedImage::Embedded {
                    file_id: file_id.to_string(),
                    src: format!("data:{mime};base64,{encoded}"),
                    mime,
                }
            }
            Err(reason) => {
                tracing::warn!(
                    file_id,
                    error.message = %reason,
                    "Failed to embed a shared image. Falling back to its view URL."
                );
                ResolvedImage::Fallback {
                    file_id: file_id.to_string(),
                    src: self.view_url(file_id).to_string(),
                    reason,
                }
            }
        }
    }

    #[tracing::instrument(name = "Downloading shared image", skip(self))]
    async fn fetch_image(&self, file_id: &str) -> Result<(String, Vec<u8>), FetchFailure> {
        let response = self
            .http_client
            .get(self.download_url(file_id))
            .send()
            .await
            .map_err(|e| FetchFailure::Transport(e.to_string()))?;

        if response.status() != StatusCode::OK {
            return Err(FetchFailure::UnexpectedStatus(response.status().as_u16()));
        }

        let mime = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.split(';').next())
            .map(|value| value.trim().to_ascii_lowercase())
            .unwrap_or_default();

        if !mime.starts_with("image/") {
            return Err(FetchFailure::NotAnImage(mime));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| FetchFailure::Transport(e.to_string()))?;

        Ok((mime, bytes.to_vec()))
    }
}
