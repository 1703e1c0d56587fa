//! Validation and normalization of post destination URLs.
//!
//! Post links are rendered on the public page and followed by the click
//! redirect, so only plain `http`/`https` URLs without credentials are kept.

use url::Url;

/// Errors that can occur while normalizing a post link.
#[derive(Debug, thiserror::Error)]
pub enum UrlNormalizationError {
    #[error("Invalid URL format: {0}")]
    InvalidFormat(String),

    #[error("Only HTTP and HTTPS protocols are allowed")]
    UnsupportedProtocol,

    #[error("Credentials are not allowed in public links")]
    CredentialsNotAllowed,

    #[error("Failed to normalize URL: {0}")]
    NormalizationFailed(String),
}

/// Normalizes a post link to a canonical form.
///
/// # Rules
///
/// 1. **Protocol**: only HTTP and HTTPS
/// 2. **Credentials**: rejected (`user:pass@host`)
/// 3. **Hostname**: lowercased
/// 4. **Default ports**: removed
/// 5. **Path, query and fragment**: preserved
///
/// # Errors
///
/// Returns [`UrlNormalizationError::InvalidFormat`] for malformed input,
/// [`UrlNormalizationError::UnsupportedProtocol`] for `javascript:`, `data:`
/// and friends, and [`UrlNormalizationError::CredentialsNotAllowed`] when the
/// URL embeds a username or password.
pub fn normalize_link_url(input: &str) -> Result<String, UrlNormalizationError> {
    let mut url = Url::parse(input.trim())
        .map_err(|e| UrlNormalizationError::InvalidFormat(e.to_string()))?;

    match url.scheme() {
        "http" | "https" => {}
        _ => return Err(UrlNormalizationError::UnsupportedProtocol),
    }

    if !url.username().is_empty() || url.password().is_some() {
        return Err(UrlNormalizationError::CredentialsNotAllowed);
    }

    if let Some(host) = url.host_str() {
        let host_lowercase = host.to_ascii_lowercase();
        url.set_host(Some(&host_lowercase)).map_err(|_| {
            UrlNormalizationError::NormalizationFailed("Failed to set normalized host".to_string())
        })?;
    }

    let is_default_port = matches!(
        (url.scheme(), url.port()),
        ("http", Some(80)) | ("https", Some(443))
    );
    if is_default_port {
        url.set_port(None).map_err(|_| {
            UrlNormalizationError::NormalizationFailed("Failed to remove default port".to_string())
        })?;
    }

    Ok(url.to_string())
}
