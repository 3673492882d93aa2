use serde::{Deserialize, Serialize};
use std::time::Duration;

/// HTTP client settings shared by every request of a run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// `User-Agent` header. Defaults to `mailman-fetch/<version>`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
    /// Per-request timeout in seconds. No timeout when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

impl HttpConfig {
    const DEFAULT_AGENT: &'static str = concat!("mailman-fetch/", env!("CARGO_PKG_VERSION"));

    pub fn user_agent(&self) -> &str {
        self.user_agent.as_deref().unwrap_or(Self::DEFAULT_AGENT)
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}
