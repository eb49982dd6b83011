//! Hostname shape checks and scope containment.
//!
//! Key functions:
//! - `is_domain_name()` - Checks that a string is shaped like a DNS hostname
//! - `contains()` - Checks that a host equals, or is a subdomain of, another
//! - `registrable_domain()` - The Public Suffix List registrable domain of a host
//! - `in_scope()` - Containment in either direction, the redirect scope rule

use std::net::IpAddr;

/// Maximum length of a presentation-format domain name, trailing dot excluded.
const MAX_DOMAIN_LEN: usize = 253;
/// Maximum length of a single label.
const MAX_LABEL_LEN: usize = 63;

/// Returns `true` if `name` is shaped like a DNS hostname.
///
/// Labels are 1-63 characters of ASCII letters, digits, `-` and `_`, never
/// starting or ending with `-`. A single trailing dot is accepted. At least
/// one character somewhere must be a non-digit, so plain numbers and dotted
/// quads are never domain-shaped.
pub fn is_domain_name(name: &str) -> bool {
    let name = name.strip_suffix('.').unwrap_or(name);
    if name.is_empty() || name.len() > MAX_DOMAIN_LEN {
        return false;
    }

    let mut non_numeric = false;
    for label in name.split('.') {
        if label.is_empty() || label.len() > MAX_LABEL_LEN {
            return false;
        }
        if label.starts_with('-') || label.ends_with('-') {
            return false;
        }
        for c in label.chars() {
            match c {
                '0'..='9' => {}
                'a'..='z' | 'A'..='Z' | '-' | '_' => non_numeric = true,
                _ => return false,
            }
        }
    }
    non_numeric
}

/// Lowercases a hostname and drops a trailing root dot.
pub fn normalize_host(host: &str) -> String {
    host.strip_suffix('.').unwrap_or(host).to_ascii_lowercase()
}

/// Returns `true` if `host` is `parent` or one of its subdomains.
///
/// Comparison is case-insensitive and ignores a trailing root dot. Label
/// boundaries are respected: `notexample.com` is not inside `example.com`.
pub fn contains(parent: &str, host: &str) -> bool {
    let parent = normalize_host(parent);
    let host = normalize_host(host);
    if parent.is_empty() || host.is_empty() {
        return false;
    }
    host == parent || host.ends_with(&format!(".{parent}"))
}

/// Registrable domain of `host` per the Public Suffix List.
///
/// `None` for IP literals and for hosts that are themselves a public suffix
/// (`com`, `github.io`).
pub fn registrable_domain(host: &str) -> Option<String> {
    let host = normalize_host(host);
    if host.parse::<IpAddr>().is_ok() {
        return None;
    }
    psl::domain_str(&host).map(str::to_string)
}

/// Returns `true` if `host` stays within the scope of `original`.
///
/// Containment is accepted in either direction, so `www.example.com` and
/// `example.com` are in each other's scope while `other.com` is in neither.
/// Parent domains only count down to the registrable domain of `original`:
/// `shop.example.com` reaches `example.com` but never `com`.
pub fn in_scope(original: &str, host: &str) -> bool {
    if contains(original, host) {
        return true;
    }
    contains(host, original)
        && registrable_domain(original).is_some_and(|base| contains(&base, host))
}
