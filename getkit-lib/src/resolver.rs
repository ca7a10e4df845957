use crate::catalog::{Catalog, CatalogEntry, EntrySource};
use crate::download_client::DownloadClient;
use crate::error::{GetKitError, Result};
use std::path::{Path, PathBuf};

/// Where a finished download came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DownloadSource {
    Release { repo: String, tag: String },
    Fallback { url: String },
}

/// What happened to one requested catalog entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DownloadOutcome {
    Downloaded { path: PathBuf, source: DownloadSource },
    /// The entry names neither a repository nor a fallback URL.
    NoSource { entry: String },
    /// The latest release has no asset with the configured name.
    AssetMissing {
        tag: String,
        asset_name: Option<String>,
    },
}

/// Looks `requested` up in `catalog` and downloads it into `download_dir`.
pub async fn resolve_and_download<D: DownloadClient>(
    catalog: &Catalog,
    requested: &str,
    download_dir: &Path,
    download_client: &D,
) -> Result<DownloadOutcome> {
    let entry = catalog
        .find(requested)
        .ok_or_else(|| GetKitError::NotFoundInCatalog(requested.to_string()))?;

    tracing::info!("Preparing to download: {}", entry.name);

    match entry.source() {
        EntrySource::Repo(repo) => {
            download_from_release(entry, repo, download_dir, download_client).await
        }
        EntrySource::Fallback(url) => {
            let path = download_dir.join(entry.fallback_file_name());
            tracing::info!("Downloading from: {}", url);
            download_client.download(url, &path).await?;
            Ok(DownloadOutcome::Downloaded {
                path,
                source: DownloadSource::Fallback {
                    url: url.to_string(),
                },
            })
        }
        EntrySource::None => {
            tracing::debug!("{} has neither a repository nor a fallback URL", entry.name);
            Ok(DownloadOutcome::NoSource {
                entry: entry.name.clone(),
            })
        }
    }
}

async fn download_from_release<D: DownloadClient>(
    entry: &CatalogEntry,
    repo: &str,
    download_dir: &Path,
    download_client: &D,
) -> Result<DownloadOutcome> {
    let release = download_client.latest_release(repo).await?;
    tracing::info!("Latest version: {}", release.tag_name);

    let Some(asset) = entry
        .asset_name()
        .and_then(|asset_name| release.find_asset(asset_name))
    else {
        return Ok(DownloadOutcome::AssetMissing {
            tag: release.tag_name,
            asset_name: entry.asset_name.clone(),
        });
    };

    let path = download_dir.join(&asset.name);
    tracing::info!("Downloading from: {}", asset.browser_download_url);
    download_client
        .download(&asset.browser_download_url, &path)
        .await?;

    Ok(DownloadOutcome::Downloaded {
        path,
        source: DownloadSource::Release {
            repo: repo.to_string(),
            tag: release.tag_name,
        },
    })
}
