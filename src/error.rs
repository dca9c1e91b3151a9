//! Error types for image generation.

use std::path::PathBuf;
use std::time::Duration;

/// Errors that can occur while generating images.
#[derive(Debug, thiserror::Error)]
pub enum NanoBananaError {
    /// The `GOOGLE_API_KEY` environment variable is not set.
    #[error("GOOGLE_API_KEY environment variable not set")]
    MissingApiKey,

    /// A style or image input file does not exist.
    #[error("{kind} file not found: {}", path.display())]
    InputNotFound {
        /// Human-readable input kind ("Style" or "Image").
        kind: &'static str,
        /// The path that was looked up.
        path: PathBuf,
    },

    /// API key rejected by the provider.
    #[error("authentication failed: {0}")]
    Auth(String),

    /// API returned an error response.
    #[error("API error: {status} - {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Error message from the response body.
        message: String,
    },

    /// Rate limit exceeded.
    #[error("rate limited, retry after {retry_after:?}")]
    RateLimited {
        /// Server-suggested wait, from the Retry-After header.
        retry_after: Option<Duration>,
    },

    /// Content was blocked by safety filters.
    #[error("content blocked: {0}")]
    ContentBlocked(String),

    /// Invalid request parameters.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Network or HTTP error.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Failed to decode base64 data.
    #[error("failed to decode: {0}")]
    Decode(String),

    /// I/O error (e.g., saving file).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for image generation operations.
pub type Result<T> = std::result::Result<T, NanoBananaError>;

const MAX_ERROR_LEN: usize = 500;

/// Reduces a raw error body to a single displayable line.
///
/// Google API errors arrive as JSON with a nested `error.message`; when that
/// shape is present only the message is kept. Whitespace is collapsed and the
/// result truncated so one bad response cannot flood stderr.
pub(crate) fn sanitize_error_message(text: &str) -> String {
    let message = serde_json::from_str::<serde_json::Value>(text)
        .ok()
        .and_then(|v| {
            v.get("error")?
                .get("message")?
                .as_str()
                .map(str::to_string)
        })
        .unwrap_or_else(|| text.to_string());

    let collapsed = message.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.len() > MAX_ERROR_LEN {
        let mut end = MAX_ERROR_LEN;
        while !collapsed.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...", &collapsed[..end])
    } else {
        collapsed
    }
}

/// Parses the Retry-After header as a number of seconds, if present.
pub(crate) fn parse_retry_after(headers: &reqwest::header::HeaderMap) -> Option<u64> {
    headers
        .get(reqwest::header::RETRY_AFTER)?
        .to_str()
        .ok()?
        .parse()
        .ok()
}
