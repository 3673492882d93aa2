use crate::{
    config::Config,
    remote::mailman::MailmanStore,
    sync::{run_sync, SyncOptions},
};
use clap::{crate_version, Parser};
use eyre::Context;
use reqwest::Url;
use std::{fs, path::PathBuf};
use tracing::*;

/// Download a whole mailman archive, skipping months that are already up to date.
#[derive(Debug, Parser)]
#[command(name = "mailman-fetch", author, version, long_about = None)]
pub struct Command {
    /// Index page of the archive, e.g. https://mail.python.org/pipermail/python-dev/
    archive_url: Url,

    /// Directory receiving the decompressed monthly archives. Created if missing.
    local_directory: PathBuf,

    /// Name files 2020-03.txt instead of 2020-March.txt so they sort naturally
    #[arg(short, long)]
    numeric: bool,

    /// Check every month instead of stopping at the first one already up to date
    #[arg(short, long)]
    all: bool,

    /// Log every archive that is checked
    #[arg(short, long)]
    pub verbose: bool,

    /// TOML file with HTTP settings
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
}

impl Command {
    /// Execute the archive sync
    pub async fn execute(self) -> eyre::Result<()> {
        info!(target: "cli", "mailman-fetch {} starting", crate_version!());

        let config = self.load_config()?;

        fs::create_dir_all(&self.local_directory).wrap_err_with(|| {
            format!("could not create local directory {}", self.local_directory.display())
        })?;

        let store = MailmanStore::new(self.archive_url.clone(), &config.http)?;
        info!(target: "cli", url = %store.index_url(), directory = %self.local_directory.display(), "Starting archive sync");
        let report = run_sync(&store, &self.local_directory, self.sync_options()).await?;

        info!(
            target: "cli",
            found = report.found,
            inspected = report.inspected,
            downloaded = report.downloaded,
            skipped = report.skipped,
            stopped_early = report.stopped_early,
            "Archive sync has finished"
        );
        Ok(())
    }

    fn sync_options(&self) -> SyncOptions {
        SyncOptions { numeric: self.numeric, stop_at_first_unmodified: !self.all }
    }

    fn load_config(&self) -> eyre::Result<Config> {
        match &self.config {
            Some(path) => {
                let config = Config::load(path)?;
                info!(target: "cli", path = %path.display(), "Configuration loaded");
                Ok(config)
            }
            None => Ok(Config::default()),
        }
    }
}
