use async_trait::async_trait;
use chrono::{DateTime, Utc};

pub mod config;
pub mod mailman;

/// Read access to a published list archive.
#[async_trait]
pub trait ArchiveRemote {
    /// Text of the index page listing the monthly archives.
    async fn index(&self) -> eyre::Result<String>;

    /// Last modification time of the archive `name`, in UTC.
    async fn last_modified(&self, name: &str) -> eyre::Result<DateTime<Utc>>;

    /// Raw gzip bytes of the archive `name`.
    async fn retrieve(&self, name: &str) -> eyre::Result<Vec<u8>>;
}
