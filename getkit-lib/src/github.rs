use crate::config::Config;
use crate::download_client::DownloadClient;
use crate::error::{GetKitError, Result};
use crate::logging::{progress_bar_style, spinner_style};
use futures_util::StreamExt;
use reqwest::{Client, RequestBuilder, Response};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tokio::io::AsyncWriteExt;
use tracing::instrument;
use tracing_indicatif::span_ext::IndicatifSpanExt;

/// Matches the GitHub API JSON response for a single release
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct ReleaseInfo {
    pub tag_name: String,
    pub assets: Vec<ReleaseAsset>,
}

/// Matches the GitHub API JSON response for a single release asset
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct ReleaseAsset {
    pub name: String,
    pub browser_download_url: String,
}

impl ReleaseInfo {
    /// First asset whose name is exactly `name`.
    pub fn find_asset(&self, name: &str) -> Option<&ReleaseAsset> {
        self.assets.iter().find(|asset| asset.name == name)
    }
}

pub fn latest_release_url(api_base_url: &str, repo: &str) -> String {
    format!(
        "{}/repos/{}/releases/latest",
        api_base_url.trim_end_matches('/'),
        repo
    )
}

pub struct GitHubClient {
    api_base_url: String,
    token: Option<String>,
    client: Client,
}

impl DownloadClient for GitHubClient {
    #[instrument(skip_all)]
    async fn latest_release(&self, repo: &str) -> Result<ReleaseInfo> {
        let current_span = tracing::Span::current();
        current_span.pb_set_style(&spinner_style("{msg}"));
        current_span.pb_set_message(&format!("Fetching latest release of {repo}..."));
        current_span.pb_set_finish_message(&format!("Fetching latest release of {repo}... Done"));

        let url = latest_release_url(&self.api_base_url, repo);
        tracing::debug!("GET {}", url);

        let response = self.send(self.authorized(self.client.get(&url)), &url).await?;
        let body = response
            .text()
            .await
            .map_err(|source| GetKitError::NetworkTransportFailure {
                url: url.clone(),
                source,
            })?;

        serde_json::from_str(&body).map_err(|source| GetKitError::ResponseParseFailure {
            repo: repo.to_string(),
            source,
        })
    }

    #[instrument(skip_all)]
    async fn download(&self, url: &str, path: &Path) -> Result<()> {
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| url.to_string());

        let current_span = tracing::Span::current();
        current_span.pb_set_style(&progress_bar_style());
        current_span.pb_set_message(&format!("Downloading {file_name}..."));
        current_span.pb_set_finish_message(&format!("Downloading {file_name}... Complete!"));

        let response = self.send(self.client.get(url), url).await?;
        if let Some(length) = response.content_length() {
            current_span.pb_set_length(length);
        }

        let write_failure = |source: std::io::Error| GetKitError::DownloadWriteFailure {
            path: path.to_path_buf(),
            source,
        };

        let mut file = tokio::fs::File::create(path).await.map_err(write_failure)?;
        let mut downloaded = 0u64;
        let mut stream = response.bytes_stream();

        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(|source| GetKitError::NetworkTransportFailure {
                url: url.to_string(),
                source,
            })?;
            file.write_all(&chunk).await.map_err(write_failure)?;
            downloaded += chunk.len() as u64;

            current_span.pb_set_position(downloaded);
        }

        file.flush().await.map_err(write_failure)?;
        tracing::debug!("Wrote {} bytes to {}", downloaded, path.display());
        Ok(())
    }
}

impl GitHubClient {
    pub fn new(config: &Config) -> Result<Self> {
        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            // Idle limits only; total transfer time is not capped.
            .connect_timeout(config.timeout)
            .read_timeout(config.timeout)
            .build()
            .map_err(GetKitError::HttpClient)?;
        Ok(Self {
            api_base_url: config.api_base_url.clone(),
            token: config.github_token.clone(),
            client,
        })
    }

    /// Only the release API sees the token; asset hosts never do.
    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn send(&self, request: RequestBuilder, url: &str) -> Result<Response> {
        let response =
            request
                .send()
                .await
                .map_err(|source| GetKitError::NetworkTransportFailure {
                    url: url.to_string(),
                    source,
                })?;

        if !response.status().is_success() {
            return Err(GetKitError::HttpStatus {
                url: url.to_string(),
                status: response.status(),
            });
        }
        Ok(response)
    }
}
