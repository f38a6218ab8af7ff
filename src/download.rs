//! Optional source-archive download stage
//!
//! Strictly sequential: one GET per synthesized URL, in manifest order.
//! Every failure (HTTP status >= 400, network error, file-write error) is
//! per-dependency: logged and skipped, never fatal to the run. No retries.

use crate::config::NetworkConfig;
use crate::error::{AuditError, Result};
use crate::types::ManifestEntry;
use reqwest::Client;
use std::collections::BTreeMap;
use std::path::Path;
use tokio::io::AsyncWriteExt;
use tracing::{info, warn};

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Build the HTTP client used for the whole download stage.
pub fn build_client(config: &NetworkConfig) -> Result<Client> {
    Client::builder()
        .user_agent(USER_AGENT)
        .timeout(config.timeout())
        .build()
        .map_err(AuditError::from)
}

/// Fetch one archive and write it to its destination, creating parent
/// directories as needed. The file is synced to durable storage before the
/// handle closes.
pub async fn fetch_archive(client: &Client, url: &str, dest: &Path) -> Result<()> {
    let response = client.get(url).send().await?;

    let status = response.status().as_u16();
    if status >= 400 {
        return Err(AuditError::HttpStatus {
            url: url.to_string(),
            status,
        });
    }

    let body = response.bytes().await?;

    if let Some(parent) = dest.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }
    let mut file = tokio::fs::File::create(dest).await?;
    file.write_all(&body).await?;
    file.sync_all().await?;

    Ok(())
}

/// Download every entry's archive in order. Returns the number of failures;
/// each failure has already been logged.
pub async fn download_archives(
    entries: &BTreeMap<String, ManifestEntry>,
    config: &NetworkConfig,
) -> Result<usize> {
    let client = build_client(config)?;
    let mut failures = 0;

    for entry in entries.values() {
        info!("Downloading source package from {}", entry.url);
        if let Err(e) = fetch_archive(&client, &entry.url, Path::new(&entry.other_distribution)).await
        {
            warn!("Can't download the package: {}", e);
            failures += 1;
        }
    }

    Ok(failures)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_fetch_archive_writes_body() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/foo/bar/tar.gz/1.2.0")
            .with_status(200)
            .with_body(b"tarball-bytes")
            .create_async()
            .await;

        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("staging").join("bar-1.2.0.tar.gz");

        let client = build_client(&NetworkConfig::default()).unwrap();
        let url = format!("{}/foo/bar/tar.gz/1.2.0", server.url());
        fetch_archive(&client, &url, &dest).await.unwrap();

        mock.assert_async().await;
        assert_eq!(std::fs::read(&dest).unwrap(), b"tarball-bytes");
    }

    #[tokio::test]
    async fn test_fetch_archive_status_404_is_an_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/missing/tar.gz/v1")
            .with_status(404)
            .create_async()
            .await;

        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("missing-v1.tar.gz");

        let client = build_client(&NetworkConfig::default()).unwrap();
        let url = format!("{}/missing/tar.gz/v1", server.url());
        let err = fetch_archive(&client, &url, &dest).await.unwrap_err();

        assert!(matches!(err, AuditError::HttpStatus { status: 404, .. }));
        assert!(!dest.exists());
    }

    #[tokio::test]
    async fn test_download_archives_continues_past_failures() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/bad/tar.gz/v1")
            .with_status(500)
            .create_async()
            .await;
        server
            .mock("GET", "/good/tar.gz/v1")
            .with_status(200)
            .with_body(b"ok")
            .create_async()
            .await;

        let dir = tempfile::tempdir().unwrap();
        let mut entries = BTreeMap::new();
        for name in ["bad", "good"] {
            entries.insert(
                format!("other:{}:v1", name),
                ManifestEntry {
                    name: name.to_string(),
                    license: String::new(),
                    repository: "Other".to_string(),
                    url: format!("{}/{}/tar.gz/v1", server.url(), name),
                    other_distribution: dir
                        .path()
                        .join(format!("{}-v1.tar.gz", name))
                        .display()
                        .to_string(),
                    other_url: format!("http://example.com/{}", name),
                    version: "v1".to_string(),
                },
            );
        }

        let failures = download_archives(&entries, &NetworkConfig::default())
            .await
            .unwrap();

        assert_eq!(failures, 1);
        assert!(dir.path().join("good-v1.tar.gz").exists());
        assert!(!dir.path().join("bad-v1.tar.gz").exists());
    }
}
