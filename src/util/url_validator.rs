use thiserror::Error;
use url::Url;

/// Longest URL handed to the system browser.
const MAX_OPEN_URL_LENGTH: usize = 2048;

/// Errors that can occur when validating a URL before opening it.
#[derive(Error, Debug, PartialEq)]
pub enum UrlValidationError {
    /// The URL string could not be parsed.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
    /// The URL uses a scheme other than http or https.
    #[error("Unsupported scheme: {0} (only http/https allowed)")]
    UnsupportedScheme(String),
    /// The URL has no host component.
    #[error("URL has no host")]
    MissingHost,
    /// The URL is empty or longer than the open limit.
    #[error("URL length not allowed")]
    BadLength,
    /// The URL contains characters a shell or terminal could interpret.
    #[error("URL contains control characters")]
    ControlCharacters,
}

/// Validate a backend-supplied URL before passing it to `open::that`.
///
/// Article and post links come straight from the backend, so anything that
/// is not a plain http(s) link with a host is refused.
///
/// ```
/// use trendboard::util::validate_url_for_open;
///
/// assert!(validate_url_for_open("https://en.wikipedia.org/wiki/Aurora").is_ok());
/// assert!(validate_url_for_open("file:///etc/passwd").is_err());
/// assert!(validate_url_for_open("javascript:alert(1)").is_err());
/// ```
pub fn validate_url_for_open(url_str: &str) -> Result<Url, UrlValidationError> {
    if url_str.is_empty() || url_str.len() > MAX_OPEN_URL_LENGTH {
        return Err(UrlValidationError::BadLength);
    }
    if url_str.chars().any(char::is_control) {
        return Err(UrlValidationError::ControlCharacters);
    }

    let url = Url::parse(url_str)?;

    match url.scheme() {
        "http" | "https" => {}
        scheme => return Err(UrlValidationError::UnsupportedScheme(scheme.to_owned())),
    }

    if url.host_str().map_or(true, str::is_empty) {
        return Err(UrlValidationError::MissingHost);
    }

    Ok(url)
}
