#[derive(Clone)]
pub struct AppConfig {
    pub log_level: String,
    /// Origin of the location-search service, without a trailing slash.
    pub base_url: String,
    /// Upper bound on a single location fetch, connect included.
    pub request_timeout_secs: u64,
    pub user_agent: String,
    /// Maximum number of grid fetches in flight during one expansion. Always >= 1.
    pub max_concurrent_fetches: usize,
    /// Cookie header used when none is given on the command line.
    pub cookie: Option<String>,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("log_level", &self.log_level)
            .field("base_url", &self.base_url)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("user_agent", &self.user_agent)
            .field("max_concurrent_fetches", &self.max_concurrent_fetches)
            .field("cookie", &self.cookie.as_ref().map(|_| "[redacted]"))
            .finish()
    }
}
