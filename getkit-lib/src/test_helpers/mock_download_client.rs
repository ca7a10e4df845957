use crate::config::DEFAULT_API_BASE_URL;
use crate::download_client::DownloadClient;
use crate::error::{GetKitError, Result};
use crate::github::{ReleaseInfo, latest_release_url};
use reqwest::StatusCode;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Mutex;

/// Serves canned releases and bodies, and records every URL it is asked for.
/// Unknown URLs answer with HTTP 404.
#[derive(Default)]
pub struct MockDownloadClient {
    releases: HashMap<String, ReleaseInfo>,
    bodies: HashMap<String, Vec<u8>>,
    requests: Mutex<Vec<String>>,
}

impl MockDownloadClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_release(mut self, repo: &str, release: ReleaseInfo) -> Self {
        self.releases.insert(repo.to_string(), release);
        self
    }

    pub fn with_body(mut self, url: &str, body: &[u8]) -> Self {
        self.bodies.insert(url.to_string(), body.to_vec());
        self
    }

    /// URLs requested so far, in order.
    pub fn requests(&self) -> Vec<String> {
        self.requests
            .lock()
            .map(|requests| requests.clone())
            .unwrap_or_default()
    }

    fn record(&self, url: &str) {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(url.to_string());
        }
    }
}

fn not_found(url: &str) -> GetKitError {
    GetKitError::HttpStatus {
        url: url.to_string(),
        status: StatusCode::NOT_FOUND,
    }
}

impl DownloadClient for MockDownloadClient {
    async fn latest_release(&self, repo: &str) -> Result<ReleaseInfo> {
        let url = latest_release_url(DEFAULT_API_BASE_URL, repo);
        self.record(&url);
        self.releases
            .get(repo)
            .cloned()
            .ok_or_else(|| not_found(&url))
    }

    async fn download(&self, url: &str, output_path: &Path) -> Result<()> {
        self.record(url);
        let body = self.bodies.get(url).ok_or_else(|| not_found(url))?;
        std::fs::write(output_path, body).map_err(|source| GetKitError::DownloadWriteFailure {
            path: output_path.to_path_buf(),
            source,
        })
    }
}
