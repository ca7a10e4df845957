use crate::error::{GetKitError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Operating systems a catalog can be published for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OsKey {
    Windows,
    Linux,
    MacOs,
}

impl OsKey {
    /// Short name used on the command line.
    pub fn key(&self) -> &'static str {
        match self {
            OsKey::Windows => "win",
            OsKey::Linux => "linux",
            OsKey::MacOs => "mac",
        }
    }

    /// Name of the catalog sub-folder holding this system's categories.
    pub fn folder(&self) -> &'static str {
        match self {
            OsKey::Windows => "windows",
            OsKey::Linux => "linux",
            OsKey::MacOs => "macos",
        }
    }
}

impl FromStr for OsKey {
    type Err = GetKitError;

    fn from_str(s: &str) -> Result<Self> {
        match strip_flag_dash(s) {
            "win" => Ok(OsKey::Windows),
            "linux" => Ok(OsKey::Linux),
            "mac" => Ok(OsKey::MacOs),
            _ => Err(GetKitError::InvalidOs(s.to_string())),
        }
    }
}

impl fmt::Display for OsKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.folder())
    }
}

/// Command line values may be written as `-win` or `win`.
fn strip_flag_dash(s: &str) -> &str {
    s.strip_prefix('-').unwrap_or(s)
}

/// Which catalog file to read: one category for one operating system.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogLocation {
    pub os: OsKey,
    pub category: String,
}

impl CatalogLocation {
    pub fn new(os: &str, category: &str) -> Result<Self> {
        Ok(Self {
            os: os.parse()?,
            category: strip_flag_dash(category).to_string(),
        })
    }

    pub fn path(&self, catalog_dir: &Path) -> PathBuf {
        catalog_dir
            .join(self.os.folder())
            .join(format!("{}.json", self.category))
    }
}

/// One installable software item.
#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq, Eq)]
pub struct CatalogEntry {
    pub name: String,
    #[serde(default)]
    pub repo: Option<String>,
    #[serde(default)]
    pub asset_name: Option<String>,
    #[serde(default)]
    pub fallback_url: Option<String>,
    /// File name used when downloading from `fallback_url`.
    #[serde(default)]
    pub file_name: Option<String>,
}

/// Where an entry is downloaded from. `repo` wins over `fallback_url`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntrySource<'a> {
    Repo(&'a str),
    Fallback(&'a str),
    None,
}

impl CatalogEntry {
    pub fn source(&self) -> EntrySource<'_> {
        if let Some(repo) = non_empty(&self.repo) {
            EntrySource::Repo(repo)
        } else if let Some(url) = non_empty(&self.fallback_url) {
            EntrySource::Fallback(url)
        } else {
            EntrySource::None
        }
    }

    pub fn asset_name(&self) -> Option<&str> {
        non_empty(&self.asset_name)
    }

    /// Target file name for the fallback download. Entries without an explicit
    /// `file_name` keep the historical `<name>.exe` naming on every system.
    pub fn fallback_file_name(&self) -> String {
        non_empty(&self.file_name)
            .map(str::to_string)
            .unwrap_or_else(|| format!("{}.exe", self.name))
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
}

impl Catalog {
    pub fn new(entries: Vec<CatalogEntry>) -> Self {
        Self { entries }
    }

    pub fn load(catalog_dir: &Path, location: &CatalogLocation) -> Result<Self> {
        let path = location.path(catalog_dir);
        tracing::info!("Loading catalog: {}", path.display());

        let content = fs::read_to_string(&path).map_err(|source| GetKitError::CatalogNotFound {
            path: path.clone(),
            source,
        })?;
        Self::from_json(&path, &content)
    }

    fn from_json(path: &Path, content: &str) -> Result<Self> {
        let entries = serde_json::from_str::<Vec<CatalogEntry>>(content).map_err(|source| {
            GetKitError::CatalogMalformed {
                path: path.to_path_buf(),
                source,
            }
        })?;
        tracing::debug!("Catalog holds {} entries", entries.len());
        Ok(Self { entries })
    }

    /// First entry whose name matches `name`, ignoring case.
    pub fn find(&self, name: &str) -> Option<&CatalogEntry> {
        let wanted = name.to_lowercase();
        self.entries
            .iter()
            .find(|entry| entry.name.to_lowercase() == wanted)
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }
}
