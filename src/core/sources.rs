// src/core/sources.rs

//! Reads an input list from either a remote URL or a local file.

use std::path::Path;
use tracing::{debug, info};
use url::Url;

use crate::error::LoadError;

/// Returns `true` if `source` is an absolute http(s) URL with a host.
pub fn is_remote(source: &str) -> bool {
    match Url::parse(source) {
        Ok(url) => matches!(url.scheme(), "http" | "https") && url.host_str().is_some(),
        Err(_) => false,
    }
}

/// Downloads `source` if it is a URL, otherwise reads it from disk.
pub async fn read_source(source: &str, client: &reqwest::Client) -> Result<String, LoadError> {
    if is_remote(source) {
        fetch(source, client).await
    } else {
        read_file(Path::new(source)).await
    }
}

pub async fn read_file(path: &Path) -> Result<String, LoadError> {
    debug!(path = %path.display(), "Reading local file.");
    tokio::fs::read_to_string(path).await.map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })
}

async fn fetch(url: &str, client: &reqwest::Client) -> Result<String, LoadError> {
    info!(url, "Downloading.");
    let to_load_error = |source: reqwest::Error| LoadError::Fetch { url: url.to_string(), source };

    let response = client
        .get(url)
        .send()
        .await
        .and_then(|res| res.error_for_status())
        .map_err(to_load_error)?;
    let body = response.text().await.map_err(to_load_error)?;
    debug!(url, bytes = body.len(), "Download finished.");
    Ok(body)
}
