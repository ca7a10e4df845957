use crate::cli::GlobalArgs;
use crate::ui;
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use getkit_lib::catalog::{Catalog, CatalogEntry, CatalogLocation, EntrySource};

#[derive(Args)]
pub struct ListCommand {
    /// Target system: -win, -linux or -mac
    #[arg(allow_hyphen_values = true)]
    pub os: String,

    /// Catalog category, e.g. -dev
    #[arg(allow_hyphen_values = true)]
    pub category: String,
}

impl ListCommand {
    pub fn run(self, global_args: GlobalArgs) -> Result<()> {
        let config = global_args.config()?;
        let location = CatalogLocation::new(&self.os, &self.category)?;
        let catalog = Catalog::load(&config.catalog_dir, &location)?;

        if catalog.entries().is_empty() {
            ui::warning("The catalog is empty.");
            return Ok(());
        }

        for entry in catalog.entries() {
            ui::info(&describe_entry(entry));
        }
        ui::tip(&get_hint(&location));
        Ok(())
    }
}

fn get_hint(location: &CatalogLocation) -> String {
    format!(
        "Use `getkit get -{} -{} <name>` to download one of them.",
        location.os.key(),
        location.category
    )
}

fn describe_entry(entry: &CatalogEntry) -> String {
    let source = match entry.source() {
        EntrySource::Repo(repo) => format!(
            "github:{repo} ({})",
            entry.asset_name().unwrap_or("no asset configured")
        ),
        EntrySource::Fallback(url) => url.to_string(),
        EntrySource::None => "no download source".red().to_string(),
    };
    format!("  {} {}", entry.name.bold(), source.dimmed())
}
