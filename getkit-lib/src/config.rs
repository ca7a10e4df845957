use crate::error::{GetKitError, Result};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_API_BASE_URL: &str = "https://api.github.com";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const MIN_TIMEOUT_SECS: u64 = 1;

#[derive(Debug, Clone)]
pub struct Config {
    /// Root of the catalog tree, laid out as `<catalog_dir>/<os>/<category>.json`
    pub catalog_dir: PathBuf,

    /// Directory downloads are written to. It is never created by getkit.
    pub download_dir: PathBuf,

    /// Base URL of the GitHub REST API
    pub api_base_url: String,

    /// Connect timeout, and the longest a request may sit idle without
    /// receiving data. It does not cap the total transfer time.
    pub timeout: Duration,

    /// Token sent to the release API. Only set when explicitly requested.
    pub github_token: Option<String>,

    pub user_agent: String,
}

impl Config {
    pub fn new_for_paths(catalog_dir: &Path, download_dir: &Path) -> Self {
        Self {
            catalog_dir: catalog_dir.to_path_buf(),
            download_dir: download_dir.to_path_buf(),
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            github_token: None,
            user_agent: concat!("getkit/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }

    /// Builds the process-wide configuration from command line overrides.
    /// See also [Self::default_catalog_dir] and [Self::default_download_dir].
    pub fn setup(
        catalog_dir: Option<&Path>,
        download_dir: Option<&Path>,
        timeout_secs: Option<u64>,
        token_env: Option<&str>,
    ) -> Result<Self> {
        let catalog_dir = match catalog_dir {
            Some(dir) => dir.to_path_buf(),
            None => Self::default_catalog_dir()?,
        };
        let download_dir = match download_dir {
            Some(dir) => dir.to_path_buf(),
            None => Self::default_download_dir()?,
        };

        let mut config = Self::new_for_paths(&catalog_dir, &download_dir);
        if let Some(secs) = timeout_secs {
            config.timeout = Duration::from_secs(clamp_timeout(secs));
        }
        if let Some(var) = token_env {
            let token =
                std::env::var(var).map_err(|_| GetKitError::MissingToken(var.to_string()))?;
            config.github_token = Some(token);
        }

        tracing::debug!("Catalog directory: {}", config.catalog_dir.display());
        tracing::debug!("Download directory: {}", config.download_dir.display());

        Ok(config)
    }

    pub fn default_catalog_dir() -> Result<PathBuf> {
        let data_dir = match dirs::data_dir() {
            Some(dir) => dir,
            None => home_or_error(dirs::home_dir())?.join(".local/share"),
        };
        Ok(data_dir.join("getkit").join("packages"))
    }

    pub fn default_download_dir() -> Result<PathBuf> {
        download_dir_under(dirs::home_dir())
    }
}

fn download_dir_under(home: Option<PathBuf>) -> Result<PathBuf> {
    Ok(home_or_error(home)?.join("Downloads"))
}

fn home_or_error(home: Option<PathBuf>) -> Result<PathBuf> {
    home.filter(|dir| !dir.as_os_str().is_empty())
        .ok_or(GetKitError::NoHomeDirectory)
}

fn clamp_timeout(secs: u64) -> u64 {
    if secs < MIN_TIMEOUT_SECS {
        tracing::warn!(
            "Configured timeout of {} seconds is too low; using minimum of {} seconds",
            secs,
            MIN_TIMEOUT_SECS
        );
        MIN_TIMEOUT_SECS
    } else {
        secs
    }
}
