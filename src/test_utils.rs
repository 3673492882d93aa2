use crate::remote::ArchiveRemote;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use flate2::{write::GzEncoder, Compression};
use reqwest::Url;
use std::{io::Write, sync::Mutex};

pub(crate) const MONTH: &[u8] = b"From alice at example.org  Sun Mar  1 12:30:00 2020\n\
From: alice at example.org (Alice)\n\
Date: Sun, 01 Mar 2020 12:30:00 +0000\n\
Subject: [list] hello\n\
\n\
Hi all.\n";

pub(crate) fn gzip(content: &[u8]) -> Vec<u8> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(content).unwrap();
    encoder.finish().unwrap()
}

/// Serves `app` on an ephemeral local port and returns the archive index URL
/// `http://127.0.0.1:<port>/pipermail/list/`.
pub(crate) async fn serve(app: axum::Router) -> Url {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move { axum::serve(listener, app).await.unwrap() });
    Url::parse(&format!("http://{addr}/pipermail/list/")).unwrap()
}

/// In-memory archive that records which archives were looked at.
#[derive(Debug, Default)]
pub(crate) struct MemoryRemote {
    index: Option<String>,
    archives: Vec<(String, DateTime<Utc>, Vec<u8>)>,
    inspected: Mutex<Vec<String>>,
    retrieved: Mutex<Vec<String>>,
}

impl MemoryRemote {
    /// Overrides the generated index page.
    pub(crate) fn with_index(mut self, index: &str) -> Self {
        self.index = Some(index.to_owned());
        self
    }

    pub(crate) fn with_archive(self, name: &str, mtime: DateTime<Utc>, content: &[u8]) -> Self {
        self.with_raw_archive(name, mtime, gzip(content))
    }

    pub(crate) fn with_raw_archive(
        mut self,
        name: &str,
        mtime: DateTime<Utc>,
        compressed: Vec<u8>,
    ) -> Self {
        self.archives.push((name.to_owned(), mtime, compressed));
        self
    }

    pub(crate) fn inspected(&self) -> Vec<String> {
        self.inspected.lock().unwrap().clone()
    }

    pub(crate) fn retrieved(&self) -> Vec<String> {
        self.retrieved.lock().unwrap().clone()
    }

    fn archive(&self, name: &str) -> eyre::Result<&(String, DateTime<Utc>, Vec<u8>)> {
        self.archives
            .iter()
            .find(|(archive, ..)| archive == name)
            .ok_or_else(|| eyre::eyre!("no archive named {name}"))
    }
}

#[async_trait]
impl ArchiveRemote for MemoryRemote {
    async fn index(&self) -> eyre::Result<String> {
        if let Some(index) = &self.index {
            return Ok(index.clone())
        }
        Ok(self
            .archives
            .iter()
            .map(|(name, ..)| format!("<td><A href=\"{name}\">[ Gzip'd Text ]</a></td>\n"))
            .collect())
    }

    async fn last_modified(&self, name: &str) -> eyre::Result<DateTime<Utc>> {
        self.inspected.lock().unwrap().push(name.to_owned());
        Ok(self.archive(name)?.1)
    }

    async fn retrieve(&self, name: &str) -> eyre::Result<Vec<u8>> {
        self.retrieved.lock().unwrap().push(name.to_owned());
        Ok(self.archive(name)?.2.clone())
    }
}
