use crate::{
    remote::{config::HttpConfig, ArchiveRemote},
    timestamp::{parse_last_modified, TimestampError},
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use eyre::Context;
use reqwest::{header, Client, Url};

#[derive(Debug, thiserror::Error)]
pub enum LastModifiedError {
    #[error("{url} did not send a Last-Modified header")]
    Missing { url: Url },
    #[error("{url} sent a Last-Modified header that is not visible ASCII")]
    NotAscii { url: Url },
    #[error("{url} sent an unparseable Last-Modified header")]
    Unparseable {
        url: Url,
        #[source]
        source: TimestampError,
    },
}

/// A pipermail archive served over plain HTTP.
///
/// Archive names are resolved against the index URL, the same way a browser
/// resolves the relative links on the index page.
#[derive(Debug)]
pub struct MailmanStore {
    client: Client,
    index_url: Url,
}

impl MailmanStore {
    pub fn new(index_url: Url, config: &HttpConfig) -> eyre::Result<Self> {
        let mut builder = Client::builder().user_agent(config.user_agent());
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        Ok(Self { client: builder.build()?, index_url })
    }

    pub fn index_url(&self) -> &Url {
        &self.index_url
    }

    pub fn archive_url(&self, name: &str) -> eyre::Result<Url> {
        self.index_url
            .join(name)
            .wrap_err_with(|| format!("cannot resolve {name} against {}", self.index_url))
    }
}

#[async_trait]
impl ArchiveRemote for MailmanStore {
    async fn index(&self) -> eyre::Result<String> {
        let url = &self.index_url;
        tracing::debug!(target: "remote::mailman", %url, "Fetching archive index");
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .and_then(|response| response.error_for_status())
            .wrap_err_with(|| format!("failed to fetch archive index from {url}"))?;
        Ok(response.text().await?)
    }

    async fn last_modified(&self, name: &str) -> eyre::Result<DateTime<Utc>> {
        let url = self.archive_url(name)?;
        tracing::trace!(target: "remote::mailman", %url, "Requesting archive headers");
        let response = self
            .client
            .head(url.clone())
            .send()
            .await
            .and_then(|response| response.error_for_status())
            .wrap_err_with(|| format!("failed to request headers of {url}"))?;

        let value = match response.headers().get(header::LAST_MODIFIED) {
            Some(value) => value,
            None => return Err(LastModifiedError::Missing { url }.into()),
        };
        let value = match value.to_str() {
            Ok(value) => value,
            Err(_) => return Err(LastModifiedError::NotAscii { url }.into()),
        };
        match parse_last_modified(value) {
            Ok(last_modified) => Ok(last_modified),
            Err(source) => Err(LastModifiedError::Unparseable { url, source }.into()),
        }
    }

    async fn retrieve(&self, name: &str) -> eyre::Result<Vec<u8>> {
        let url = self.archive_url(name)?;
        tracing::trace!(target: "remote::mailman", %url, "Retrieving archive");
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .and_then(|response| response.error_for_status())
            .wrap_err_with(|| format!("failed to download {url}"))?;
        let bytes = response.bytes().await.wrap_err_with(|| format!("failed to read {url}"))?;
        Ok(bytes.to_vec())
    }
}
