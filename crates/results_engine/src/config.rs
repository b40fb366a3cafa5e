use std::sync::{Arc, LazyLock};
use std::time::Duration;

use regex::Regex;
use url::Url;

use crate::fetch::FetchSettings;
use crate::fixtures::FixtureSet;

pub const RENDER_DELAY: Duration = Duration::from_millis(700);
pub const CONTENT_REQUEST_TIMEOUT: Duration = Duration::from_millis(5000);
pub const FIXTURE_DELAY: Duration = Duration::from_millis(300);

/// Hosts that have no content backend and answer from fixtures instead.
static LOCAL_HOSTS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(localhost|127\.0\.0\.1|\[::1\])(:\d+)?$").expect("valid local host pattern")
});

/// Immutable settings handed to the controller at construction.
#[derive(Debug, Clone)]
pub struct ResultsConfig {
    /// Scheme and host the listing is served from.
    pub origin: Url,
    /// Listing base path, e.g. `/news/archive/`.
    pub base_path: String,
    /// Content backend to use instead of `origin`.
    pub endpoint_override: Option<Url>,
    pub fallback_hosts: Regex,
    pub fixtures: Option<Arc<FixtureSet>>,
    pub fixture_seed: Option<u64>,
    pub render_delay: Duration,
    pub request_timeout: Duration,
    pub fixture_delay: Duration,
    pub fetch: FetchSettings,
}

impl ResultsConfig {
    pub fn new(origin: Url, base_path: impl Into<String>) -> Self {
        Self {
            origin,
            base_path: base_path.into(),
            endpoint_override: None,
            fallback_hosts: LOCAL_HOSTS.clone(),
            fixtures: None,
            fixture_seed: None,
            render_delay: RENDER_DELAY,
            request_timeout: CONTENT_REQUEST_TIMEOUT,
            fixture_delay: FIXTURE_DELAY,
            fetch: FetchSettings::default(),
        }
    }

    pub fn with_fixtures(mut self, fixtures: FixtureSet) -> Self {
        self.fixtures = Some(Arc::new(fixtures));
        self
    }

    /// `host[:port]` of the origin.
    pub fn host(&self) -> String {
        let host = self.origin.host_str().unwrap_or_default();
        match self.origin.port() {
            Some(port) => format!("{host}:{port}"),
            None => host.to_string(),
        }
    }

    /// Fixtures are used only when nothing real is configured for a fallback host.
    pub fn fixture_source(&self) -> Option<Arc<FixtureSet>> {
        if self.endpoint_override.is_some() || !self.fallback_hosts.is_match(&self.host()) {
            return None;
        }
        self.fixtures.clone()
    }

    /// Absolute data URL for an encoded path.
    pub fn content_url(&self, path: &str) -> String {
        let root = self.endpoint_override.as_ref().unwrap_or(&self.origin);
        let content_path = results_core::url_codec::content_path(&self.base_path, path);
        format!("{}{}", root.as_str().trim_end_matches('/'), content_path)
    }

    pub fn page_url(&self, path: &str) -> String {
        results_core::url_codec::page_url(&self.base_path, path)
    }
}
