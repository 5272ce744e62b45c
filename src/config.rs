use std::env;

/// Application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server host address.
    pub host: String,
    /// Server port.
    pub port: u16,
    /// Trailing history window requested from the data provider.
    pub history_range: String,
    /// Bar interval requested from the data provider.
    pub history_interval: String,
    /// Yahoo Finance API base URL.
    pub yahoo_base_url: String,
    /// Timeout for outbound HTTP requests (seconds).
    pub http_timeout_secs: u64,
    /// Longest ticker accepted from clients.
    pub max_ticker_len: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3001,
            history_range: "1y".to_string(),
            history_interval: "1d".to_string(),
            yahoo_base_url: "https://query1.finance.yahoo.com".to_string(),
            http_timeout_secs: 30,
            max_ticker_len: 15,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup, falling back to defaults
    /// for missing or unparsable values.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        Self {
            host: lookup("HOST").unwrap_or(defaults.host),
            port: lookup("PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.port),
            history_range: lookup("HISTORY_RANGE").unwrap_or(defaults.history_range),
            history_interval: lookup("HISTORY_INTERVAL").unwrap_or(defaults.history_interval),
            yahoo_base_url: lookup("YAHOO_BASE_URL").unwrap_or(defaults.yahoo_base_url),
            http_timeout_secs: lookup("HTTP_TIMEOUT_SECS")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.http_timeout_secs),
            max_ticker_len: lookup("MAX_TICKER_LEN")
                .and_then(|v| v.parse().ok())
                .filter(|len| *len > 0)
                .unwrap_or(defaults.max_ticker_len),
        }
    }

    /// Address the HTTP server binds to.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
