use crate::cli::GlobalArgs;
use crate::ui;
use anyhow::{Context, Result};
use clap::Args;
use getkit_lib::catalog::{Catalog, CatalogLocation};
use getkit_lib::github::GitHubClient;
use getkit_lib::resolver::{DownloadOutcome, DownloadSource, resolve_and_download};

#[derive(Args)]
pub struct GetCommand {
    /// Target system: -win, -linux or -mac
    #[arg(allow_hyphen_values = true)]
    pub os: String,

    /// Catalog category, e.g. -dev
    #[arg(allow_hyphen_values = true)]
    pub category: String,

    /// Name of the program to download (case-insensitive)
    pub name: String,
}

impl GetCommand {
    pub async fn run(self, global_args: GlobalArgs) -> Result<()> {
        let config = global_args.config()?;
        let location = CatalogLocation::new(&self.os, &self.category)?;
        let catalog = Catalog::load(&config.catalog_dir, &location)?;
        let github_client = GitHubClient::new(&config)?;

        let outcome =
            resolve_and_download(&catalog, &self.name, &config.download_dir, &github_client)
                .await
                .context(format!("Failed to get {}", self.name))?;

        match outcome {
            DownloadOutcome::Downloaded { path, source } => {
                ui::success(&format!("Download complete: {}", path.display()));
                if let DownloadSource::Release { repo, tag } = source {
                    ui::info(&format!("Release {tag} of {repo}"));
                }
            }
            DownloadOutcome::NoSource { entry } => {
                ui::warning(&format!(
                    "{entry} has no repository or fallback URL in the catalog; nothing to download."
                ));
            }
            DownloadOutcome::AssetMissing { tag, asset_name } => {
                ui::warning(&format!(
                    "Release {tag} has no asset named {}; nothing was downloaded.",
                    asset_name.as_deref().unwrap_or("<unset>")
                ));
                ui::tip(&format!(
                    "Check the asset_name of {} in {}.",
                    self.name,
                    location.path(&config.catalog_dir).display()
                ));
            }
        }

        Ok(())
    }
}
