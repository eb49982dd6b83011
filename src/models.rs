use std::collections::HashMap;
use std::time::Duration;

use url::Url;

use crate::error_handling::Warning;

/// Input of a single resolution.
///
/// `endpoint` is `hostname` or `hostname:port`. An embedded port overrides
/// `ports`; an empty `ports` falls back to the configured defaults.
#[derive(Debug, Clone, Default)]
pub struct ResolveRequest {
    pub endpoint: String,
    pub ports: Vec<u16>,
    pub user_agent: String,
    pub custom_headers: HashMap<String, String>,
}

/// Successful outcome of a resolution.
///
/// `urls` is never empty. A warning means the URLs are usable but the caller
/// should decide whether to trust them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub urls: Vec<String>,
    pub warning: Option<Warning>,
}

/// Final URLs reached by HTTP probes, with the duration of the request that reached them.
///
/// Keeps first-seen order. Recording a URL twice keeps one entry and the
/// latest duration.
#[derive(Debug, Clone, Default)]
pub struct ProbedUrls {
    entries: Vec<(Url, Duration)>,
}

impl ProbedUrls {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, url: Url, elapsed: Duration) {
        match self.entries.iter_mut().find(|(seen, _)| *seen == url) {
            Some(entry) => entry.1 = elapsed,
            None => self.entries.push((url, elapsed)),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn urls(&self) -> impl Iterator<Item = &Url> {
        self.entries.iter().map(|(url, _)| url)
    }

    pub fn durations(&self) -> impl Iterator<Item = Duration> + '_ {
        self.entries.iter().map(|(_, elapsed)| *elapsed)
    }

    pub fn to_strings(&self) -> Vec<String> {
        self.urls().map(Url::to_string).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn url(s: &str) -> Url {
        Url::parse(s).expect("valid test URL")
    }

    #[test]
    fn test_probed_urls_deduplicates_final_destinations() {
        let mut probed = ProbedUrls::new();
        probed.record(url("https://example.com/"), Duration::from_secs(5));
        probed.record(url("http://example.com:8080/"), Duration::from_secs(1));
        probed.record(url("https://example.com/"), Duration::from_millis(200));

        assert_eq!(probed.len(), 2);
        assert_eq!(
            probed.to_strings(),
            vec!["https://example.com/", "http://example.com:8080/"]
        );
        // Latest attempt's duration replaces the earlier one
        let durations: Vec<Duration> = probed.durations().collect();
        assert_eq!(
            durations,
            vec![Duration::from_millis(200), Duration::from_secs(1)]
        );
    }

    #[test]
    fn test_probed_urls_empty() {
        let probed = ProbedUrls::new();
        assert!(probed.is_empty());
        assert!(probed.to_strings().is_empty());
    }
}
