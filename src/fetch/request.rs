//! HTTP request building and sending.

use std::collections::HashMap;

use log::{debug, warn};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, USER_AGENT};
use reqwest::Url;
use tokio_util::sync::CancellationToken;

use crate::error_handling::{categorize_reqwest_error, ResolveError};
use crate::fetch::redirects::final_url;
use crate::utils::cancellable;

/// Builds the request headers: caller's custom headers, then the user agent.
///
/// Headers whose name or value is not valid HTTP are skipped with a warning.
/// The user agent replaces any `User-Agent` among the custom headers.
pub fn build_headers(user_agent: &str, custom_headers: &HashMap<String, String>) -> HeaderMap {
    let mut headers = HeaderMap::new();
    for (name, value) in custom_headers {
        match (
            HeaderName::from_bytes(name.as_bytes()),
            HeaderValue::from_str(value),
        ) {
            (Ok(name), Ok(value)) => {
                headers.append(name, value);
            }
            _ => warn!("Skipping invalid custom header '{name}'"),
        }
    }
    match HeaderValue::from_str(user_agent) {
        Ok(value) => {
            headers.insert(USER_AGENT, value);
        }
        Err(_) => warn!("Skipping invalid user agent '{user_agent}'"),
    }
    headers
}

/// Sends a GET to `url` and returns the URL it reached.
///
/// Any HTTP response counts as reached, whatever its status; only transport
/// failures (connect, TLS, timeout) give `Ok(None)`. The body is never read.
///
/// # Errors
///
/// Returns `ResolveError::Cancelled` if `cancel` fires during the request.
pub async fn send_request(
    client: &reqwest::Client,
    cancel: &CancellationToken,
    url: &Url,
    headers: HeaderMap,
) -> Result<Option<Url>, ResolveError> {
    let original_host = url.host_str().unwrap_or_default();
    let request = client.get(url.clone()).headers(headers).send();

    match cancellable(cancel, request).await? {
        Ok(response) => {
            let reached = final_url(&response, original_host);
            debug!("GET {url} -> {} ({reached})", response.status());
            Ok(Some(reached))
        }
        Err(e) => {
            debug!("GET {url} failed: {} ({e})", categorize_reqwest_error(&e));
            Ok(None)
        }
    }
}
