//! Scope-enforcing redirect handling.
//!
//! Redirects are followed by `reqwest` under a custom policy that never lets
//! a request leave the original hostname's scope. When the policy stops, the
//! redirect response itself is returned and `final_url()` works out which URL
//! the probe reached.

use log::debug;
use reqwest::redirect::Policy;
use reqwest::Url;

use crate::domain::in_scope;

/// Builds the redirect policy used by the probe client.
///
/// A redirect is followed only while its target host is in scope of the
/// first URL of the chain and fewer than `max_redirects` redirects have been
/// followed. Otherwise the chain stops and the last response is returned
/// instead of an error.
pub fn scoped_redirect_policy(max_redirects: usize) -> Policy {
    Policy::custom(move |attempt| {
        let previous = attempt.previous();
        let original_host = previous.first().and_then(|url| url.host_str());
        let target_host = attempt.url().host_str();

        let within_scope = match (original_host, target_host) {
            (Some(original), Some(target)) => in_scope(original, target),
            _ => false,
        };
        // previous() holds the original URL plus every redirect already followed
        let within_limit = previous.len() <= max_redirects;

        if within_scope && within_limit {
            attempt.follow()
        } else {
            debug!(
                "Stopping redirect chain at {} (in scope: {within_scope}, hops: {})",
                attempt.url(),
                previous.len()
            );
            attempt.stop()
        }
    })
}

/// Resolves the `Location` of a redirect response against its request URL.
pub fn redirect_target(response: &reqwest::Response) -> Option<Url> {
    if !response.status().is_redirection() {
        return None;
    }
    let location = response
        .headers()
        .get(reqwest::header::LOCATION)?
        .to_str()
        .ok()?;
    response.url().join(location).ok()
}

/// The URL a probe reached.
///
/// Normally the URL of the last response. When the chain was stopped because
/// the next hop left the scope of `original_host`, it is that out-of-scope
/// target, reported without ever having been requested.
pub fn final_url(response: &reqwest::Response, original_host: &str) -> Url {
    match redirect_target(response) {
        Some(target)
            if !target
                .host_str()
                .is_some_and(|host| in_scope(original_host, host)) =>
        {
            target
        }
        _ => response.url().clone(),
    }
}
