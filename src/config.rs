use crate::remote::config::HttpConfig;
use eyre::Context;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Settings read from the optional `--config` file.
///
/// ```toml
/// [http]
/// user_agent = "list-mirror (admin@example.org)"
/// timeout_secs = 30
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub http: HttpConfig,
}

impl Config {
    /// Loads the config at `path`. The file must exist; a missing file is
    /// reported rather than created with the defaults.
    pub fn load(path: &Path) -> eyre::Result<Self> {
        eyre::ensure!(path.is_file(), "config file {} does not exist", path.display());
        confy::load_path(path)
            .wrap_err_with(|| format!("could not load config from {}", path.display()))
    }
}
